//! Layout engine - deterministic radial positioning for flat citation graphs.
//!
//! Node *i* of *n* is placed at angle `(i / n) * 2π` around the canvas
//! center. Papers owned by the user sit on a smaller radius (pulled toward
//! the center), and every position carries a small bounded jitter derived by
//! hashing the paper id, so the layout is a pure function of the filtered
//! node set: pan/zoom/hover never move a node, and repeated layout calls on
//! the same set reproduce identical positions.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::f32::consts::TAU;
use std::hash::{Hash, Hasher};

use egui::Pos2;

use paper_graph_types::PaperNode;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Logical canvas, in world units
pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 750.0;
pub const CANVAS_CENTER: Pos2 = Pos2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);

/// Ring radius for papers not in the user's library
const BASE_RADIUS: f32 = 280.0;
/// Fixed reduction applied to owned papers, pulling them inward
const OWNED_RADIUS_DELTA: f32 = 70.0;
/// Maximum jitter per axis; must stay below `OWNED_RADIUS_DELTA / 2` so the
/// owned ring never crosses the outer ring
const JITTER: f32 = 24.0;

/// Citation-count thresholds and the node radius for each bucket,
/// largest first. Radii are strictly decreasing so visual size is a
/// non-decreasing function of citation count.
const SIZE_BUCKETS: &[(u32, f32)] = &[(50_000, 34.0), (10_000, 26.0), (1_000, 19.0), (100, 13.0)];
const MIN_NODE_RADIUS: f32 = 9.0;

/// Visual radius for a paper node - a step function of citation count.
pub fn node_radius(citation_count: u32) -> f32 {
    for &(threshold, radius) in SIZE_BUCKETS {
        if citation_count >= threshold {
            return radius;
        }
    }
    MIN_NODE_RADIUS
}

// =============================================================================
// LAYOUT OUTPUT
// =============================================================================

/// Positions and sizes for the laid-out citation graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperLayout {
    pub positions: HashMap<String, Pos2>,
    pub radii: HashMap<String, f32>,
}

impl PaperLayout {
    pub fn position(&self, id: &str) -> Option<Pos2> {
        self.positions.get(id).copied()
    }
}

fn hash_unit(id: &str, salt: u64) -> f32 {
    let mut hasher = DefaultHasher::new();
    salt.hash(&mut hasher);
    id.hash(&mut hasher);
    // map to [-1, 1]
    (hasher.finish() % 10_000) as f32 / 5_000.0 - 1.0
}

/// Order-independent fingerprint of an id set.
///
/// The orchestrator relays out only when this changes; viewport and
/// interaction changes leave it untouched.
pub fn id_set_fingerprint<'a>(ids: impl IntoIterator<Item = &'a str>) -> u64 {
    ids.into_iter()
        .map(|id| {
            let mut hasher = DefaultHasher::new();
            id.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, |acc, h| acc ^ h)
}

/// Fingerprint of the filtered paper set.
pub fn node_set_fingerprint(papers: &[PaperNode]) -> u64 {
    id_set_fingerprint(papers.iter().map(|p| p.id.as_str()))
}

/// Compute positions and sizes for the filtered citation graph.
///
/// Links with a missing endpoint never reach this function (the filter
/// drops and counts them); placement depends on the node set alone.
/// Empty input yields empty maps; a single node is placed exactly at the
/// canvas center.
pub fn layout_papers(papers: &[PaperNode]) -> PaperLayout {
    let mut layout = PaperLayout::default();
    if papers.is_empty() {
        return layout;
    }

    if let [only] = papers {
        layout.positions.insert(only.id.clone(), CANVAS_CENTER);
        layout
            .radii
            .insert(only.id.clone(), node_radius(only.citation_count));
        return layout;
    }

    let n = papers.len() as f32;
    for (i, paper) in papers.iter().enumerate() {
        let angle = (i as f32 / n) * TAU;
        let radius = if paper.owned_by_user {
            BASE_RADIUS - OWNED_RADIUS_DELTA
        } else {
            BASE_RADIUS
        };
        let jx = hash_unit(&paper.id, 0x517c_c1b7) * JITTER;
        let jy = hash_unit(&paper.id, 0x2545_f491) * JITTER;
        let pos = Pos2::new(
            CANVAS_CENTER.x + radius * angle.cos() + jx,
            CANVAS_CENTER.y + radius * angle.sin() + jy,
        );
        layout.positions.insert(paper.id.clone(), pos);
        layout
            .radii
            .insert(paper.id.clone(), node_radius(paper.citation_count));
    }

    layout
}
