//! Closure-Backed Components.
//!
//! Lets callers describe a combinational component inline instead of
//! writing a `Logic` implementation, e.g. for an instruction-set specific
//! decoder or ALU assembled outside the kernel.

use crate::core::{InputDecl, Logic, OutputDecl};

/// A combinational component whose outputs are computed by a closure.
///
/// The closure receives the output slot and the input values and returns
/// the output value; the kernel masks it to the output width.
pub struct FnComponent<F> {
    type_name: &'static str,
    inputs: Vec<InputDecl>,
    outputs: Vec<OutputDecl>,
    f: F,
}

impl<F> FnComponent<F>
where
    F: FnMut(usize, &[u64]) -> u64,
{
    /// # Arguments
    ///
    /// * `type_name` - Name shown in traces.
    /// * `inputs` - `(name, width)` of each input port.
    /// * `outputs` - `(name, width)` of each output port; every output
    ///   depends on all inputs.
    /// * `f` - The combinational rule.
    pub fn new(
        type_name: &'static str,
        inputs: &[(&str, u32)],
        outputs: &[(&str, u32)],
        f: F,
    ) -> Self {
        Self {
            type_name,
            inputs: inputs.iter().map(|&(n, w)| InputDecl::new(n, w)).collect(),
            outputs: outputs.iter().map(|&(n, w)| OutputDecl::comb(n, w)).collect(),
            f,
        }
    }

    /// Replaces the output declarations, e.g. to narrow dependencies with
    /// [`OutputDecl::comb_on`].
    pub fn with_outputs(mut self, outputs: Vec<OutputDecl>) -> Self {
        self.outputs = outputs;
        self
    }
}

impl<F> Logic for FnComponent<F>
where
    F: FnMut(usize, &[u64]) -> u64,
{
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn inputs(&self) -> Vec<InputDecl> {
        self.inputs.clone()
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        self.outputs.clone()
    }

    fn evaluate(&mut self, output: usize, inputs: &[u64]) -> u64 {
        (self.f)(output, inputs)
    }
}
