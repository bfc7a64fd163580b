//! Render frame assembly.
//!
//! The kernel's output boundary: one plain-data frame per recompute, handed
//! to the host's render adapter. Node positions are world coordinates; the
//! adapter applies [`ViewTransform`] when painting.

use egui::{Color32, Pos2, Vec2};

use paper_graph_types::EntityRef;
use paper_viewport::{highlight_mask, InteractionContext};

use super::camera::Camera2D;
use super::cluster_map::ClusterLayout;
use super::colors::{
    category_color, parse_hex_color, with_alpha, DIMMED_EDGE_ALPHA, EDGE_COLOR,
    EDGE_HIGHLIGHT_COLOR,
};
use super::filter::FilteredGraph;
use super::layout::PaperLayout;

/// Cluster connections weaker than this render dashed.
pub const WEAK_CONNECTION_STRENGTH: f32 = 0.4;

/// The zoom/pan transform for the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f32,
    pub pan: Vec2,
}

/// One drawable node.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub entity: EntityRef,
    pub pos: Pos2,
    pub radius: f32,
    pub color: Color32,
    pub highlighted: bool,
    pub label: String,
}

/// One drawable edge, endpoints already resolved to world positions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEdge {
    pub source: Pos2,
    pub target: Pos2,
    pub color: Color32,
    pub highlighted: bool,
    pub dashed: bool,
}

/// The per-frame render model consumed by the host's adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub transform: ViewTransform,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

fn edge_color(highlighted: bool, any_highlight: bool) -> Color32 {
    if highlighted {
        EDGE_HIGHLIGHT_COLOR
    } else if any_highlight {
        with_alpha(EDGE_COLOR, DIMMED_EDGE_ALPHA)
    } else {
        EDGE_COLOR
    }
}

/// Assemble the frame from the filtered, laid-out graph and current
/// interaction/camera state.
pub fn build_frame(
    filtered: &FilteredGraph,
    paper_layout: &PaperLayout,
    cluster_layout: &ClusterLayout,
    interaction: &InteractionContext,
    camera: &Camera2D,
) -> RenderFrame {
    let active = interaction.active_entity();
    let any_highlight = active.is_some();
    let mut frame = RenderFrame {
        transform: ViewTransform {
            zoom: camera.zoom(),
            pan: camera.center().to_vec2(),
        },
        ..Default::default()
    };

    // Papers
    for paper in &filtered.papers {
        let Some(pos) = paper_layout.position(&paper.id) else {
            continue;
        };
        let entity = EntityRef::paper(&paper.id);
        frame.nodes.push(RenderNode {
            highlighted: active == Some(&entity),
            pos,
            radius: paper_layout.radii.get(&paper.id).copied().unwrap_or(9.0),
            color: category_color(&paper.category),
            label: paper.title.clone(),
            entity,
        });
    }

    // Cluster orbs, plus subclusters for expanded clusters
    for cluster in &filtered.clusters {
        let Some(pos) = cluster_layout.centroid(&cluster.id) else {
            continue;
        };
        let color = parse_hex_color(&cluster.color).unwrap_or_else(|| category_color(&cluster.name));
        let entity = EntityRef::cluster(&cluster.id);
        frame.nodes.push(RenderNode {
            highlighted: active == Some(&entity),
            pos,
            radius: cluster_layout.radii.get(&cluster.id).copied().unwrap_or(32.0),
            color,
            label: cluster.name.clone(),
            entity,
        });

        if interaction.is_expanded(&cluster.id) {
            for sub in &cluster.subclusters {
                let Some(sub_pos) = cluster_layout.subcluster_positions.get(&sub.id) else {
                    continue;
                };
                let sub_entity = EntityRef::cluster(&sub.id);
                frame.nodes.push(RenderNode {
                    highlighted: active == Some(&sub_entity),
                    pos: *sub_pos,
                    radius: 18.0,
                    color: with_alpha(color, 200),
                    label: sub.name.clone(),
                    entity: sub_entity,
                });
            }
        }
    }

    // Citation links: solid. Recompute the full highlight mask every frame.
    let link_mask = highlight_mask(
        active,
        filtered
            .links
            .iter()
            .map(|l| (l.source.as_str(), l.target.as_str())),
    );
    for (link, highlighted) in filtered.links.iter().zip(link_mask) {
        let (Some(source), Some(target)) = (
            paper_layout.position(&link.source),
            paper_layout.position(&link.target),
        ) else {
            continue;
        };
        frame.edges.push(RenderEdge {
            source,
            target,
            color: edge_color(highlighted, any_highlight),
            highlighted,
            dashed: false,
        });
    }

    // Cluster connections: dashed when weak.
    let conn_mask = highlight_mask(
        active,
        filtered
            .connections
            .iter()
            .map(|c| (c.from.as_str(), c.to.as_str())),
    );
    for (conn, highlighted) in filtered.connections.iter().zip(conn_mask) {
        let (Some(source), Some(target)) = (
            cluster_layout.centroid(&conn.from),
            cluster_layout.centroid(&conn.to),
        ) else {
            continue;
        };
        frame.edges.push(RenderEdge {
            source,
            target,
            color: edge_color(highlighted, any_highlight),
            highlighted,
            dashed: conn.strength < WEAK_CONNECTION_STRENGTH,
        });
    }

    frame
}
