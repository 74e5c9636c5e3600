use crate::common::mask;
use crate::core::{InputDecl, Logic, OutputDecl};

/// Drives a fixed value on its `out` port.
#[derive(Clone, Copy, Debug)]
pub struct Constant {
    width: u32,
    value: u64,
}

impl Constant {
    /// The value is truncated to `width` bits.
    pub fn new(width: u32, value: u64) -> Self {
        Self {
            width,
            value: value & mask(width),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Logic for Constant {
    fn type_name(&self) -> &'static str {
        "Constant"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        Vec::new()
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::comb("out", self.width)]
    }

    fn evaluate(&mut self, _output: usize, _inputs: &[u64]) -> u64 {
        self.value
    }
}
