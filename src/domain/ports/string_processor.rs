//! StringProcessor port - postprocessing of generated text

use std::fmt::Debug;

use crate::error::GenerationError;

/// Pure transformation of generated content, applied in declaration order.
pub trait StringProcessor: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn process(&self, input: &str) -> Result<String, GenerationError>;
}
