//! Flat citation graph contracts: papers and directed citation links.

use serde::{Deserialize, Serialize};

use crate::cluster::{ClusterConnection, ClusterNode};

/// A single paper in the citation graph.
///
/// Position and visual size are derived by the layout engine per snapshot;
/// they are intentionally absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperNode {
    /// Stable identifier, unique among papers (e.g. a DOI or slug)
    pub id: String,
    pub title: String,
    /// Ordered author list, first author first
    pub authors: Vec<String>,
    pub year: i32,
    pub citation_count: u32,
    pub reference_count: u32,
    /// Research category used for filtering and color lookup
    pub category: String,
    /// Whether the paper is in the viewing user's library
    #[serde(default)]
    pub owned_by_user: bool,
}

/// A directed citation edge: `source` cites `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationLink {
    pub source: String,
    pub target: String,
    /// Relative visual weight of the edge
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl CitationLink {
    /// True if either endpoint matches `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// The wholesale graph bundle supplied by the provider.
///
/// Supplied complete at session start and on explicit refresh; the kernel
/// never receives incremental patches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub papers: Vec<PaperNode>,
    #[serde(default)]
    pub links: Vec<CitationLink>,
    #[serde(default)]
    pub clusters: Vec<ClusterNode>,
    #[serde(default)]
    pub connections: Vec<ClusterConnection>,
}

impl GraphSnapshot {
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty() && self.clusters.is_empty()
    }

    /// Number of links touching the given paper id (detail-panel stat).
    pub fn link_degree(&self, id: &str) -> usize {
        self.links.iter().filter(|l| l.touches(id)).count()
    }

    /// Number of connections touching the given cluster id (detail-panel stat).
    pub fn connection_degree(&self, id: &str) -> usize {
        self.connections.iter().filter(|c| c.touches(id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = GraphSnapshot {
            papers: vec![PaperNode {
                id: "attention-2017".into(),
                title: "Attention Is All You Need".into(),
                authors: vec!["Vaswani".into()],
                year: 2017,
                citation_count: 67_000,
                reference_count: 42,
                category: "nlp".into(),
                owned_by_user: true,
            }],
            links: vec![CitationLink {
                source: "attention-2017".into(),
                target: "seq2seq-2014".into(),
                weight: 1.0,
            }],
            clusters: vec![],
            connections: vec![],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GraphSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot: GraphSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_link_degree() {
        let snapshot = GraphSnapshot {
            links: vec![
                CitationLink {
                    source: "a".into(),
                    target: "b".into(),
                    weight: 1.0,
                },
                CitationLink {
                    source: "c".into(),
                    target: "a".into(),
                    weight: 1.0,
                },
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.link_degree("a"), 2);
        assert_eq!(snapshot.link_degree("b"), 1);
        assert_eq!(snapshot.link_degree("z"), 0);
    }
}
