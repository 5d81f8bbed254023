//! Mergepoint mappings

use serde::{Deserialize, Serialize};

use super::OutletRef;

/// Where mapped outlets go relative to the chain built so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergepointPosition {
    /// Discard the chain so far
    #[default]
    Replace,
    Prepend,
    Append,
}

/// Outlets configured for one mergepoint of one outlet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergepointMapping {
    pub outlets: Vec<OutletRef>,
    pub position: MergepointPosition,
}

impl MergepointMapping {
    pub fn new(outlets: Vec<OutletRef>, position: MergepointPosition) -> Self {
        Self { outlets, position }
    }

    /// Applies this mapping on top of `chain`.
    pub fn apply(&self, chain: &mut Vec<OutletRef>) {
        match self.position {
            MergepointPosition::Replace => *chain = self.outlets.clone(),
            MergepointPosition::Prepend => {
                let mut combined = self.outlets.clone();
                combined.append(chain);
                *chain = combined;
            }
            MergepointPosition::Append => chain.extend(self.outlets.iter().cloned()),
        }
    }
}
