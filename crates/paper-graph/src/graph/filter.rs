//! Filter pipeline - reduces the full snapshot to the visible subgraph.
//!
//! A pure O(N+E) function of snapshot and criteria; the source snapshot is
//! never mutated. Surviving links are exactly those whose endpoints both
//! survive, so the filtered subgraph can never contain a dangling edge. An
//! empty result is a valid outcome (rendered as an explicit empty state),
//! not an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use paper_graph_types::{
    CitationLink, ClusterConnection, ClusterNode, GraphSnapshot, PaperNode,
};

/// Category criterion: exact match or the "all" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a toolbar value; `"all"` (any case) is the sentinel.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(wanted) => wanted == category,
        }
    }
}

/// The visible-subgraph criteria.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring over title, authors, cluster name, keywords.
    /// Empty matches everything.
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub category: CategoryFilter,
    /// Restrict papers to the user's own library
    #[serde(default)]
    pub owned_only: bool,
}

impl FilterCriteria {
    pub fn is_unrestricted(&self) -> bool {
        self.search_query.is_empty() && self.category == CategoryFilter::All && !self.owned_only
    }
}

/// The filtered subgraph: owned copies, source snapshot untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredGraph {
    pub papers: Vec<PaperNode>,
    pub links: Vec<CitationLink>,
    pub clusters: Vec<ClusterNode>,
    pub connections: Vec<ClusterConnection>,
    /// Malformed links whose endpoint is absent from the full snapshot
    /// (not merely filtered out) - dropped, counted for diagnostics
    pub dangling_links: usize,
    /// Same, for cluster connections
    pub dangling_connections: usize,
}

impl FilteredGraph {
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty() && self.clusters.is_empty()
    }
}

fn paper_matches(paper: &PaperNode, criteria: &FilterCriteria, needle: &str) -> bool {
    if criteria.owned_only && !paper.owned_by_user {
        return false;
    }
    if !criteria.category.matches(&paper.category) {
        return false;
    }
    if needle.is_empty() {
        return true;
    }
    paper.title.to_lowercase().contains(needle)
        || paper.authors.iter().any(|a| a.to_lowercase().contains(needle))
}

/// Produce the visible subgraph for the given criteria.
///
/// Clusters are aggregates: only the search query applies to them
/// (ownership and paper category do not).
pub fn filter_graph(snapshot: &GraphSnapshot, criteria: &FilterCriteria) -> FilteredGraph {
    let needle = criteria.search_query.to_lowercase();

    let papers: Vec<PaperNode> = snapshot
        .papers
        .iter()
        .filter(|p| paper_matches(p, criteria, &needle))
        .cloned()
        .collect();

    // Endpoints missing from the FULL snapshot are malformed provider data;
    // endpoints merely excluded by the criteria are not.
    let all_paper_ids: HashSet<&str> = snapshot.papers.iter().map(|p| p.id.as_str()).collect();
    let dangling_links = snapshot
        .links
        .iter()
        .filter(|l| {
            !all_paper_ids.contains(l.source.as_str()) || !all_paper_ids.contains(l.target.as_str())
        })
        .count();

    let paper_ids: HashSet<&str> = papers.iter().map(|p| p.id.as_str()).collect();
    let links: Vec<CitationLink> = snapshot
        .links
        .iter()
        .filter(|l| paper_ids.contains(l.source.as_str()) && paper_ids.contains(l.target.as_str()))
        .cloned()
        .collect();

    let clusters: Vec<ClusterNode> = snapshot
        .clusters
        .iter()
        .filter(|c| needle.is_empty() || c.matches_query(&needle))
        .cloned()
        .collect();

    let all_cluster_ids: HashSet<&str> = snapshot.clusters.iter().map(|c| c.id.as_str()).collect();
    let dangling_connections = snapshot
        .connections
        .iter()
        .filter(|c| {
            !all_cluster_ids.contains(c.from.as_str()) || !all_cluster_ids.contains(c.to.as_str())
        })
        .count();

    let cluster_ids: HashSet<&str> = clusters.iter().map(|c| c.id.as_str()).collect();
    let connections: Vec<ClusterConnection> = snapshot
        .connections
        .iter()
        .filter(|c| cluster_ids.contains(c.from.as_str()) && cluster_ids.contains(c.to.as_str()))
        .cloned()
        .collect();

    FilteredGraph {
        papers,
        links,
        clusters,
        connections,
        dangling_links,
        dangling_connections,
    }
}
