use std::fmt;

use serde::{Deserialize, Serialize};

/// States of the retrieval pipeline.
///
/// `Embedding → Searching → Expanding → Aggregating → Done`, with `Expanding`
/// skipped when the expand flag is off and `Failed` reachable from any
/// working stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Embedding,
    Searching,
    Expanding,
    Aggregating,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Embedding => "embedding",
            PipelineStage::Searching => "searching",
            PipelineStage::Expanding => "expanding",
            PipelineStage::Aggregating => "aggregating",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
