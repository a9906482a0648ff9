//! Assignee suggestion from recent assignment history.

use serde::{Deserialize, Serialize};

/// Someone recently assigned a bug in the same area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentAssignee {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Picks the most recent assignee, if any. `recent` is newest first.
pub fn suggest_assignee(module: &str, recent: &[RecentAssignee]) -> Option<String> {
    let suggestion = recent.first().map(|a| a.name.clone());
    tracing::debug!(module, ?suggestion, candidates = recent.len(), "assignee suggested");
    suggestion
}
