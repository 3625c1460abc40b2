use serde::{Deserialize, Serialize};

pub type SubObjectiveId = u64;

/// One step of an objective's execution log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubObjective {
    pub id: SubObjectiveId,
    /// Instruction given for the step.
    pub input: String,
    /// Response recorded for the step.
    pub output: String,
}
