//! Clocked Register.
//!
//! The register output shows the current state; the value on `in` is only
//! taken over at the next clock edge. Because the output never depends on
//! the input within a propagation pass, a register breaks any signal loop
//! it sits in.

use crate::common::mask;
use crate::core::{Class, InputDecl, Logic, OutputDecl};

/// A register with a reset value and an optional write enable.
#[derive(Clone, Copy, Debug)]
pub struct Register {
    width: u32,
    reset_value: u64,
    enable: bool,
    /// The instantaneous value of this register.
    data: u64,
    /// The value captured for the next clock edge.
    next: Option<u64>,
}

impl Register {
    /// A register loading `in` on every clock edge.
    pub fn new(width: u32, reset_value: u64) -> Self {
        let reset_value = reset_value & mask(width);
        Self {
            width,
            reset_value,
            enable: false,
            data: reset_value,
            next: None,
        }
    }

    /// A register with an `enable` input; it only loads while enable is 1.
    pub fn with_enable(width: u32, reset_value: u64) -> Self {
        Self {
            enable: true,
            ..Self::new(width, reset_value)
        }
    }
}

impl Logic for Register {
    fn type_name(&self) -> &'static str {
        "Register"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        let mut decls = vec![InputDecl::new("in", self.width)];
        if self.enable {
            decls.push(InputDecl::new("enable", 1));
        }
        decls
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::state("out", self.width)]
    }

    fn class(&self) -> Class {
        Class::Sequential
    }

    fn state(&self, _output: usize) -> u64 {
        self.data
    }

    fn capture(&mut self, inputs: &[u64]) {
        let enabled = !self.enable || inputs[1] & 1 == 1;
        self.next = enabled.then(|| inputs[0] & mask(self.width));
    }

    fn commit(&mut self) {
        if let Some(next) = self.next.take() {
            self.data = next;
        }
    }

    fn reset(&mut self) {
        self.data = self.reset_value;
        self.next = None;
    }
}
