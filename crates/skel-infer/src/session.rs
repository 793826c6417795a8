use crate::InferError;
use skel_base::Tensor;
use std::collections::HashMap;

/// A loaded model ready for forward passes.
///
/// Implementations are not required to be reentrant; callers serialize `run`.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
