use crate::common::mask;
use crate::core::{InputDecl, Logic, OutputDecl};

/// Adds `a` and `b`, wrapping at the port width.
#[derive(Clone, Copy, Debug)]
pub struct Adder {
    width: u32,
}

impl Adder {
    pub fn new(width: u32) -> Self {
        Self { width }
    }
}

impl Logic for Adder {
    fn type_name(&self) -> &'static str {
        "Adder"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        vec![InputDecl::new("a", self.width), InputDecl::new("b", self.width)]
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::comb("out", self.width)]
    }

    fn evaluate(&mut self, _output: usize, inputs: &[u64]) -> u64 {
        inputs[0].wrapping_add(inputs[1]) & mask(self.width)
    }
}
