//! Topic cluster contracts for the research-map view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An aggregated thematic grouping of papers.
///
/// The centroid is a hand-placed percent-of-canvas coordinate carried in the
/// cluster-map configuration, not here; this type is provider data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterNode {
    /// Stable identifier, unique among clusters
    pub id: String,
    pub name: String,
    pub paper_count: u32,
    /// Display color as a hex string (e.g. "#4caf50"); resolved to a
    /// concrete color by the kernel's palette
    pub color: String,
    #[serde(default)]
    pub subclusters: Vec<Subcluster>,
    /// Topic keywords; ordered set so serialization is stable
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    /// Year-over-year growth of the cluster's paper count
    #[serde(default)]
    pub growth_rate: f32,
}

impl ClusterNode {
    /// Case-insensitive match against name or any keyword.
    pub fn matches_query(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(needle_lower))
    }
}

/// A sub-grouping inside a cluster, positioned relative to its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcluster {
    pub id: String,
    pub name: String,
    pub paper_count: u32,
    /// Offset from the parent centroid, in world units
    pub offset: (f32, f32),
}

/// A weighted edge between two clusters representing shared papers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConnection {
    pub from: String,
    pub to: String,
    /// Connection strength in [0, 1]
    pub strength: f32,
    pub shared_paper_count: u32,
}

impl ClusterConnection {
    /// True if either endpoint matches `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> ClusterNode {
        ClusterNode {
            id: "transformers".into(),
            name: "Transformer Architectures".into(),
            paper_count: 128,
            color: "#7c4dff".into(),
            subclusters: vec![Subcluster {
                id: "vit".into(),
                name: "Vision Transformers".into(),
                paper_count: 31,
                offset: (40.0, -25.0),
            }],
            keywords: ["attention", "self-attention", "bert"]
                .into_iter()
                .map(String::from)
                .collect(),
            growth_rate: 0.4,
        }
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        assert!(cluster().matches_query("transformer"));
        assert!(cluster().matches_query("architect"));
    }

    #[test]
    fn test_matches_keyword() {
        assert!(cluster().matches_query("bert"));
        assert!(!cluster().matches_query("genomics"));
    }

    #[test]
    fn test_connection_touches() {
        let conn = ClusterConnection {
            from: "a".into(),
            to: "b".into(),
            strength: 0.7,
            shared_paper_count: 12,
        };
        assert!(conn.touches("a"));
        assert!(conn.touches("b"));
        assert!(!conn.touches("c"));
    }
}
