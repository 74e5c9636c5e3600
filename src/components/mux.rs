use crate::common::width_for;
use crate::core::{InputDecl, Logic, OutputDecl};

/// Selects one of `n` inputs (`in0`..) by the `select` input.
///
/// A select value past the last input drives zero.
#[derive(Clone, Copy, Debug)]
pub struct Multiplexer {
    width: u32,
    inputs: usize,
}

impl Multiplexer {
    pub fn new(width: u32, inputs: usize) -> Self {
        Self { width, inputs }
    }

    /// Width of the `select` port.
    pub fn select_width(&self) -> u32 {
        width_for(self.inputs)
    }
}

impl Logic for Multiplexer {
    fn type_name(&self) -> &'static str {
        "Multiplexer"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        let mut decls: Vec<InputDecl> = (0..self.inputs)
            .map(|i| InputDecl::new(format!("in{i}"), self.width))
            .collect();
        decls.push(InputDecl::new("select", self.select_width()));
        decls
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::comb("out", self.width)]
    }

    fn evaluate(&mut self, _output: usize, inputs: &[u64]) -> u64 {
        let select = inputs[self.inputs] as usize;
        if select < self.inputs {
            inputs[select]
        } else {
            0
        }
    }
}
