//! Cluster map layout - hand-placed centroids with parent-relative subclusters.
//!
//! Centroids are percent-of-canvas coordinates carried in static
//! configuration rather than the output of a force simulation; the engine
//! only maps percentages to world coordinates and translates subcluster
//! offsets. The filter/viewport/interaction contracts are independent of
//! this choice, so a real physics layout can replace it without touching
//! the rest of the kernel.

use std::collections::HashMap;

use egui::Pos2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use paper_graph_types::ClusterNode;

use super::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Paper-count thresholds and orb radius per bucket, largest first.
const CLUSTER_SIZE_BUCKETS: &[(u32, f32)] = &[(500, 90.0), (200, 70.0), (100, 55.0), (50, 42.0)];
const MIN_CLUSTER_RADIUS: f32 = 32.0;

/// Radius of the fallback ring for clusters missing from the config
const FALLBACK_RING_FRACTION: f32 = 0.35;

/// Visual radius for a cluster orb - a step function of paper count.
pub fn cluster_radius(paper_count: u32) -> f32 {
    for &(threshold, radius) in CLUSTER_SIZE_BUCKETS {
        if paper_count >= threshold {
            return radius;
        }
    }
    MIN_CLUSTER_RADIUS
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("centroid for cluster '{cluster}' out of range: ({x}, {y}) must be within 0-100")]
    CentroidOutOfRange { cluster: String, x: f32, y: f32 },
}

/// Hand-placed centroid, in percent of canvas (0-100 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentroidPct {
    pub x: f32,
    pub y: f32,
}

/// Static cluster-map placement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMapConfig {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f32,
    /// cluster id -> centroid percent
    #[serde(default)]
    pub placements: HashMap<String, CentroidPct>,
}

fn default_canvas_width() -> f32 {
    CANVAS_WIDTH
}

fn default_canvas_height() -> f32 {
    CANVAS_HEIGHT
}

impl Default for ClusterMapConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            placements: HashMap::new(),
        }
    }
}

impl ClusterMapConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        for (cluster, pct) in &self.placements {
            let in_range = (0.0..=100.0).contains(&pct.x) && (0.0..=100.0).contains(&pct.y);
            if !in_range {
                return Err(ConfigError::CentroidOutOfRange {
                    cluster: cluster.clone(),
                    x: pct.x,
                    y: pct.y,
                });
            }
        }
        Ok(self)
    }

    fn world_pos(&self, pct: CentroidPct) -> Pos2 {
        Pos2::new(
            pct.x / 100.0 * self.canvas_width,
            pct.y / 100.0 * self.canvas_height,
        )
    }

    fn center(&self) -> Pos2 {
        Pos2::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Positions and sizes for the cluster map view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterLayout {
    pub centroids: HashMap<String, Pos2>,
    pub radii: HashMap<String, f32>,
    /// subcluster id -> world position (parent centroid + local offset)
    pub subcluster_positions: HashMap<String, Pos2>,
}

impl ClusterLayout {
    pub fn centroid(&self, id: &str) -> Option<Pos2> {
        self.centroids.get(id).copied()
    }
}

/// Lay out clusters from the placement config.
///
/// Clusters absent from the config take deterministic slots on a fallback
/// ring, in input order. Subclusters are translated by their parent-relative
/// offset, never repositioned.
pub fn layout_clusters(clusters: &[ClusterNode], config: &ClusterMapConfig) -> ClusterLayout {
    let mut layout = ClusterLayout::default();
    if clusters.is_empty() {
        return layout;
    }

    let center = config.center();
    let ring = config.canvas_width.min(config.canvas_height) * FALLBACK_RING_FRACTION;
    let unplaced = clusters
        .iter()
        .filter(|c| !config.placements.contains_key(&c.id))
        .count()
        .max(1) as f32;

    let mut fallback_slot = 0usize;
    for cluster in clusters {
        let pos = match config.placements.get(&cluster.id) {
            Some(&pct) => config.world_pos(pct),
            None => {
                let angle = (fallback_slot as f32 / unplaced) * std::f32::consts::TAU;
                fallback_slot += 1;
                Pos2::new(center.x + ring * angle.cos(), center.y + ring * angle.sin())
            }
        };
        layout.centroids.insert(cluster.id.clone(), pos);
        layout
            .radii
            .insert(cluster.id.clone(), cluster_radius(cluster.paper_count));

        for sub in &cluster.subclusters {
            layout.subcluster_positions.insert(
                sub.id.clone(),
                Pos2::new(pos.x + sub.offset.0, pos.y + sub.offset.1),
            );
        }
    }
    layout
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use paper_graph_types::Subcluster;

    use super::*;

    fn cluster(id: &str, paper_count: u32) -> ClusterNode {
        ClusterNode {
            id: id.into(),
            name: id.into(),
            paper_count,
            color: "#4caf50".into(),
            subclusters: vec![],
            keywords: Default::default(),
            growth_rate: 0.0,
        }
    }

    #[test]
    fn test_configured_centroid_maps_to_percent_of_canvas() {
        let mut config = ClusterMapConfig::default();
        config
            .placements
            .insert("c1".into(), CentroidPct { x: 25.0, y: 50.0 });

        let layout = layout_clusters(&[cluster("c1", 10)], &config);
        assert_eq!(
            layout.centroid("c1"),
            Some(Pos2::new(0.25 * CANVAS_WIDTH, 0.5 * CANVAS_HEIGHT))
        );
    }

    #[test]
    fn test_missing_cluster_gets_fallback_slot() {
        let config = ClusterMapConfig::default();
        let layout = layout_clusters(&[cluster("c1", 10), cluster("c2", 10)], &config);
        let a = layout.centroid("c1").unwrap();
        let b = layout.centroid("c2").unwrap();
        assert_ne!(a, b);

        // deterministic across calls
        let again = layout_clusters(&[cluster("c1", 10), cluster("c2", 10)], &config);
        assert_eq!(layout, again);
    }

    #[test]
    fn test_subcluster_position_is_parent_plus_offset() {
        let mut config = ClusterMapConfig::default();
        config
            .placements
            .insert("c1".into(), CentroidPct { x: 50.0, y: 50.0 });

        let mut parent = cluster("c1", 80);
        parent.subclusters.push(Subcluster {
            id: "s1".into(),
            name: "sub".into(),
            paper_count: 12,
            offset: (30.0, -18.0),
        });

        let layout = layout_clusters(&[parent], &config);
        let centroid = layout.centroid("c1").unwrap();
        assert_eq!(
            layout.subcluster_positions["s1"],
            Pos2::new(centroid.x + 30.0, centroid.y - 18.0)
        );
    }

    #[test]
    fn test_cluster_radius_non_decreasing() {
        let counts = [10u32, 50, 100, 200, 500, 900];
        let radii: Vec<f32> = counts.iter().map(|&c| cluster_radius(c)).collect();
        for pair in radii.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_yaml_config_parses() {
        let yaml = r#"
canvas_width: 800
canvas_height: 600
placements:
  transformers: { x: 30, y: 40 }
  genomics: { x: 70, y: 60 }
"#;
        let config = ClusterMapConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.placements.len(), 2);
        assert_eq!(config.canvas_width, 800.0);
    }

    #[test]
    fn test_out_of_range_centroid_rejected() {
        let yaml = r#"
placements:
  bad: { x: 130, y: 40 }
"#;
        let err = ClusterMapConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::CentroidOutOfRange { .. }));
    }
}
