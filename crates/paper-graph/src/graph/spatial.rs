//! Spatial index for pointer hit testing.
//!
//! Uses an R-tree (via `rstar`) for O(log n) lookups instead of a linear
//! scan over every laid-out node. Rebuilt whenever the layout changes.

use egui::Pos2;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use paper_graph_types::EntityRef;

/// Spatial entry for one laid-out node (paper or cluster orb).
#[derive(Debug, Clone)]
pub struct SpatialNode {
    pub entity: EntityRef,
    center: [f32; 2],
    radius: f32,
    bounds: AABB<[f32; 2]>,
}

impl SpatialNode {
    pub fn new(entity: EntityRef, center: Pos2, radius: f32) -> Self {
        let center = [center.x, center.y];
        let bounds = AABB::from_corners(
            [center[0] - radius, center[1] - radius],
            [center[0] + radius, center[1] + radius],
        );
        Self {
            entity,
            center,
            radius,
            bounds,
        }
    }
}

impl RTreeObject for SpatialNode {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

impl PointDistance for SpatialNode {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = point[0] - self.center[0];
        let dy = point[1] - self.center[1];
        let dist_to_edge = ((dx * dx + dy * dy).sqrt() - self.radius).max(0.0);
        dist_to_edge * dist_to_edge
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        let dx = point[0] - self.center[0];
        let dy = point[1] - self.center[1];
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// R-tree over laid-out node circles, queried in world space.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialNode>,
}

impl SpatialIndex {
    /// Rebuild the index from the current layout.
    pub fn rebuild(&mut self, nodes: Vec<SpatialNode>) {
        self.tree = RTree::bulk_load(nodes);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Entity under the given world point, if any.
    pub fn hit_test(&self, world: Pos2) -> Option<&EntityRef> {
        let point = [world.x, world.y];
        self.tree
            .locate_all_at_point(&point)
            .next()
            .map(|node| &node.entity)
    }

    /// Nearest entity within `max_dist` of the point (forgiving hover).
    pub fn nearest_within(&self, world: Pos2, max_dist: f32) -> Option<&EntityRef> {
        let point = [world.x, world.y];
        self.tree
            .nearest_neighbor_iter_with_distance_2(&point)
            .next()
            .filter(|(_, d2)| *d2 <= max_dist * max_dist)
            .map(|(node, _)| &node.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SpatialIndex {
        let mut index = SpatialIndex::default();
        index.rebuild(vec![
            SpatialNode::new(EntityRef::paper("a"), Pos2::new(0.0, 0.0), 10.0),
            SpatialNode::new(EntityRef::paper("b"), Pos2::new(100.0, 0.0), 10.0),
            SpatialNode::new(EntityRef::cluster("c"), Pos2::new(0.0, 100.0), 30.0),
        ]);
        index
    }

    #[test]
    fn test_hit_inside_circle() {
        let index = index();
        assert_eq!(
            index.hit_test(Pos2::new(3.0, 4.0)),
            Some(&EntityRef::paper("a"))
        );
    }

    #[test]
    fn test_miss_outside_circle() {
        let index = index();
        assert_eq!(index.hit_test(Pos2::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_nearest_within_tolerance() {
        let index = index();
        assert_eq!(
            index.nearest_within(Pos2::new(113.0, 0.0), 5.0),
            Some(&EntityRef::paper("b"))
        );
        assert_eq!(index.nearest_within(Pos2::new(150.0, 0.0), 5.0), None);
    }
}
