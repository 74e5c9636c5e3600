//! Logic Gates.
//!
//! Bitwise gates over any number of equally wide inputs (`in0`, `in1`, ...)
//! producing one output `out` of the same width.

use crate::common::mask;
use crate::core::{InputDecl, Logic, OutputDecl};

/// Bitwise operation applied by a [`LogicGate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOp {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl GateOp {
    fn name(self) -> &'static str {
        match self {
            GateOp::And => "And",
            GateOp::Or => "Or",
            GateOp::Xor => "Xor",
            GateOp::Nand => "Nand",
            GateOp::Nor => "Nor",
            GateOp::Xnor => "Xnor",
        }
    }

    /// Reduces the operand values, before any output inversion.
    fn reduce(self, values: &[u64]) -> u64 {
        let mut iter = values.iter().copied();
        let first = iter.next().unwrap_or(0);
        match self {
            GateOp::And | GateOp::Nand => iter.fold(first, |acc, v| acc & v),
            GateOp::Or | GateOp::Nor => iter.fold(first, |acc, v| acc | v),
            GateOp::Xor | GateOp::Xnor => iter.fold(first, |acc, v| acc ^ v),
        }
    }

    fn inverted(self) -> bool {
        matches!(self, GateOp::Nand | GateOp::Nor | GateOp::Xnor)
    }
}

/// An n-input bitwise gate.
#[derive(Clone, Copy, Debug)]
pub struct LogicGate {
    op: GateOp,
    width: u32,
    inputs: usize,
}

impl LogicGate {
    pub fn new(op: GateOp, width: u32, inputs: usize) -> Self {
        Self { op, width, inputs }
    }

    pub fn and(width: u32, inputs: usize) -> Self {
        Self::new(GateOp::And, width, inputs)
    }

    pub fn or(width: u32, inputs: usize) -> Self {
        Self::new(GateOp::Or, width, inputs)
    }

    pub fn xor(width: u32, inputs: usize) -> Self {
        Self::new(GateOp::Xor, width, inputs)
    }

    pub fn op(&self) -> GateOp {
        self.op
    }
}

impl Logic for LogicGate {
    fn type_name(&self) -> &'static str {
        self.op.name()
    }

    fn inputs(&self) -> Vec<InputDecl> {
        (0..self.inputs)
            .map(|i| InputDecl::new(format!("in{i}"), self.width))
            .collect()
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::comb("out", self.width)]
    }

    fn evaluate(&mut self, _output: usize, inputs: &[u64]) -> u64 {
        let value = self.op.reduce(inputs);
        let value = if self.op.inverted() { !value } else { value };
        value & mask(self.width)
    }
}

/// Bitwise inverter.
#[derive(Clone, Copy, Debug)]
pub struct Not {
    width: u32,
}

impl Not {
    pub fn new(width: u32) -> Self {
        Self { width }
    }
}

impl Logic for Not {
    fn type_name(&self) -> &'static str {
        "Not"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        vec![InputDecl::new("in", self.width)]
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::comb("out", self.width)]
    }

    fn evaluate(&mut self, _output: usize, inputs: &[u64]) -> u64 {
        !inputs[0] & mask(self.width)
    }
}
