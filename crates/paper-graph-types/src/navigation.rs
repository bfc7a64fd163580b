//! Navigation contracts between the kernel and the host application.
//!
//! Interactions return action values; the kernel never performs navigation
//! itself (no callbacks, no routing dependency).

use serde::{Deserialize, Serialize};

/// Reference to a single graph entity (paper or cluster).
///
/// Hover and selection each hold at most one of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityRef {
    Paper { id: String },
    Cluster { id: String },
}

impl EntityRef {
    pub fn paper(id: impl Into<String>) -> Self {
        EntityRef::Paper { id: id.into() }
    }

    pub fn cluster(id: impl Into<String>) -> Self {
        EntityRef::Cluster { id: id.into() }
    }

    /// The underlying stable id, regardless of entity kind.
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Paper { id } | EntityRef::Cluster { id } => id,
        }
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, EntityRef::Cluster { .. })
    }
}

/// Navigation request emitted by the kernel for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationAction {
    /// Open the full view of a single paper
    OpenPaper { paper_id: String },
    /// Open the paper listing for a cluster
    OpenClusterPapers { cluster_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_id() {
        assert_eq!(EntityRef::paper("p1").id(), "p1");
        assert_eq!(EntityRef::cluster("c1").id(), "c1");
        assert!(EntityRef::cluster("c1").is_cluster());
    }

    #[test]
    fn test_action_tagged_serialization() {
        let action = NavigationAction::OpenPaper {
            paper_id: "attention-2017".into(),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"open_paper\""));
    }
}
