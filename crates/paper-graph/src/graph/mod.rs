//! Citation/topic graph view - the kernel's orchestrating state.
//!
//! # Architecture
//!
//! ```text
//! GraphSnapshot (provider)
//!        │
//!        ▼
//! filter (search/category/ownership)
//!        │
//!        ▼
//! layout + cluster_map - only when the filtered node set changed
//!        │
//!        ├──► SpatialIndex (hit testing)
//!        ▼
//! Camera2D + InteractionContext
//!        │
//!        ▼
//! RenderFrame (render adapter, external)
//! ```
//!
//! All recomputation is synchronous and explicit: every mutating operation
//! calls [`CitationGraphView::recompute`] itself; there is no implicit
//! reactivity. The only suspending operation is a graph refresh, gated by a
//! single in-flight flag.

pub mod camera;
pub mod cluster_map;
pub mod colors;
pub mod filter;
pub mod layout;
pub mod render;
pub mod spatial;

use egui::{Pos2, Rect};
use tracing::{debug, warn};

use paper_graph_types::{EntityRef, GraphSnapshot, NavigationAction};
use paper_viewport::{InteractionContext, InteractionError, ToolMode};

use crate::api::{GraphProvider, RetrievalError};
use camera::Camera2D;
use cluster_map::{layout_clusters, ClusterLayout, ClusterMapConfig};
use filter::{filter_graph, CategoryFilter, FilterCriteria, FilteredGraph};
use layout::{id_set_fingerprint, layout_papers, node_set_fingerprint, PaperLayout};
use render::{build_frame, RenderFrame};
use spatial::{SpatialIndex, SpatialNode};

/// Pointer slack for hover hit testing, in world units
const HOVER_TOLERANCE: f32 = 4.0;

/// Which view this kernel instance drives; selects the camera zoom bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    /// Flat citation graph (papers and citation links)
    #[default]
    CitationGraph,
    /// Topic cluster research map
    ResearchMap,
}

/// Derived stats exposed for the detail panel when an entity is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDetails {
    pub entity: EntityRef,
    pub label: String,
    /// Links (papers) or connections (clusters) touching the entity,
    /// counted over the full snapshot
    pub connection_count: usize,
    /// Papers inside the cluster; `None` for papers
    pub paper_count: Option<u32>,
}

/// The kernel's complete per-session state.
pub struct CitationGraphView {
    view: ViewKind,
    snapshot: GraphSnapshot,
    criteria: FilterCriteria,
    map_config: ClusterMapConfig,

    filtered: FilteredGraph,
    paper_layout: PaperLayout,
    cluster_layout: ClusterLayout,
    layout_fingerprint: u64,

    camera: Camera2D,
    interaction: InteractionContext,
    spatial: SpatialIndex,

    refresh_in_flight: bool,
    notice: Option<String>,
}

impl CitationGraphView {
    pub fn new(view: ViewKind) -> Self {
        Self::with_config(view, ClusterMapConfig::default())
    }

    pub fn with_config(view: ViewKind, map_config: ClusterMapConfig) -> Self {
        let camera = match view {
            ViewKind::CitationGraph => Camera2D::for_citation_graph(),
            ViewKind::ResearchMap => Camera2D::for_cluster_map(),
        };
        Self {
            view,
            snapshot: GraphSnapshot::default(),
            criteria: FilterCriteria::default(),
            map_config,
            filtered: FilteredGraph::default(),
            paper_layout: PaperLayout::default(),
            cluster_layout: ClusterLayout::default(),
            layout_fingerprint: 0,
            camera,
            interaction: InteractionContext::new(),
            spatial: SpatialIndex::default(),
            refresh_in_flight: false,
            notice: None,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    pub fn filtered(&self) -> &FilteredGraph {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn interaction(&self) -> &InteractionContext {
        &self.interaction
    }

    /// Filter yielded no nodes: rendered as an explicit empty state.
    pub fn is_empty_result(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Edges dropped from the current snapshot because an endpoint id is
    /// unknown (malformed provider data, not criteria filtering).
    pub fn dropped_edges(&self) -> usize {
        self.filtered.dangling_links + self.filtered.dangling_connections
    }

    // =========================================================================
    // DATA AND CRITERIA
    // =========================================================================

    /// Swap in a whole new snapshot (session start or completed refresh).
    ///
    /// Always relays out: a refreshed snapshot can change paper attributes
    /// without changing the id set.
    pub fn set_snapshot(&mut self, snapshot: GraphSnapshot) {
        self.snapshot = snapshot;
        self.recompute(true);
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
        self.recompute(false);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.criteria.category = category;
        self.recompute(false);
    }

    pub fn set_owned_only(&mut self, owned_only: bool) {
        self.criteria.owned_only = owned_only;
        self.recompute(false);
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute(false);
    }

    /// Re-derive the filtered subgraph, and the layout if the filtered node
    /// set changed. Viewport and interaction changes never reach here.
    fn recompute(&mut self, force: bool) {
        self.filtered = filter_graph(&self.snapshot, &self.criteria);
        if self.filtered.dangling_links > 0 || self.filtered.dangling_connections > 0 {
            warn!(
                dangling_links = self.filtered.dangling_links,
                dangling_connections = self.filtered.dangling_connections,
                "snapshot references unknown node ids, edges dropped"
            );
        }

        let fingerprint = node_set_fingerprint(&self.filtered.papers)
            ^ id_set_fingerprint(self.filtered.clusters.iter().map(|c| c.id.as_str()))
                .rotate_left(1);
        if force || fingerprint != self.layout_fingerprint {
            self.paper_layout = layout_papers(&self.filtered.papers);
            self.cluster_layout = layout_clusters(&self.filtered.clusters, &self.map_config);
            self.layout_fingerprint = fingerprint;
            self.rebuild_spatial();
            debug!(
                papers = self.filtered.papers.len(),
                clusters = self.filtered.clusters.len(),
                links = self.filtered.links.len(),
                "relaid out filtered graph"
            );
        }
    }

    fn rebuild_spatial(&mut self) {
        let mut nodes = Vec::with_capacity(self.filtered.papers.len() + self.filtered.clusters.len());
        for paper in &self.filtered.papers {
            if let Some(pos) = self.paper_layout.position(&paper.id) {
                let radius = self.paper_layout.radii.get(&paper.id).copied().unwrap_or(9.0);
                nodes.push(SpatialNode::new(EntityRef::paper(&paper.id), pos, radius));
            }
        }
        for cluster in &self.filtered.clusters {
            if let Some(pos) = self.cluster_layout.centroid(&cluster.id) {
                let radius = self
                    .cluster_layout
                    .radii
                    .get(&cluster.id)
                    .copied()
                    .unwrap_or(32.0);
                nodes.push(SpatialNode::new(EntityRef::cluster(&cluster.id), pos, radius));
            }
            if self.interaction.is_expanded(&cluster.id) {
                for sub in &cluster.subclusters {
                    if let Some(pos) = self.cluster_layout.subcluster_positions.get(&sub.id) {
                        nodes.push(SpatialNode::new(EntityRef::cluster(&sub.id), *pos, 18.0));
                    }
                }
            }
        }
        self.spatial.rebuild(nodes);
    }

    // =========================================================================
    // REFRESH (the only suspending operation)
    // =========================================================================

    /// Mark a refresh as in flight.
    ///
    /// Returns `false` (a no-op, not an error, not queued) if one is already
    /// in flight; the caller must not fetch in that case.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refresh_in_flight {
            debug!("refresh already in flight, ignoring");
            return false;
        }
        self.refresh_in_flight = true;
        true
    }

    /// Complete an in-flight refresh: atomically swap the snapshot on
    /// success, or record a dismissible notice on failure. The old graph
    /// stays fully interactive either way.
    pub fn complete_refresh(&mut self, result: Result<GraphSnapshot, RetrievalError>) {
        self.refresh_in_flight = false;
        match result {
            Ok(snapshot) => self.set_snapshot(snapshot),
            Err(err) => {
                warn!(error = %err, "graph refresh failed");
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Fetch from the provider, honoring the in-flight gate.
    ///
    /// Returns whether a fetch actually happened.
    pub fn refresh(&mut self, provider: &dyn GraphProvider) -> bool {
        if !self.begin_refresh() {
            return false;
        }
        let result = provider.fetch_graph();
        self.complete_refresh(result);
        true
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_in_flight
    }

    /// The current retrieval-failure notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // =========================================================================
    // VIEWPORT
    // =========================================================================

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    /// Canonical view: zoom 100%, pan (0,0). Idempotent.
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.interaction.set_tool(tool);
    }

    // =========================================================================
    // POINTER EVENTS
    // =========================================================================

    /// Route pointer motion: pans while a pan drag is active, otherwise
    /// updates hover via hit testing.
    pub fn pointer_move(&mut self, screen_pos: Pos2, screen_rect: Rect) {
        if let Ok(drag) = self.interaction.drag_active() {
            let delta = (
                (screen_pos.x - drag.start.0) / self.camera.zoom(),
                (screen_pos.y - drag.start.1) / self.camera.zoom(),
            );
            self.camera.set_center(Pos2::new(
                drag.pan_origin.0 - delta.0,
                drag.pan_origin.1 - delta.1,
            ));
            return;
        }

        let world = self.camera.screen_to_world(screen_pos, screen_rect);
        match self.spatial.nearest_within(world, HOVER_TOLERANCE).cloned() {
            Some(entity) => self.interaction.pointer_enter(entity),
            None => self.interaction.pointer_leave(),
        }
    }

    /// Click: select the entity under the pointer (returning its detail
    /// stats) or clear the selection on empty canvas.
    pub fn click(&mut self, screen_pos: Pos2, screen_rect: Rect) -> Option<SelectionDetails> {
        let world = self.camera.screen_to_world(screen_pos, screen_rect);
        match self.spatial.nearest_within(world, HOVER_TOLERANCE).cloned() {
            Some(entity) => {
                self.interaction.click_entity(entity.clone());
                Some(self.selection_details(&entity))
            }
            None => {
                self.interaction.click_background();
                None
            }
        }
    }

    /// Begin a pan drag. Fails with [`InteractionError::PanToolInactive`]
    /// unless the pan tool is active.
    pub fn begin_drag(&mut self, screen_pos: Pos2) -> Result<(), InteractionError> {
        let center = self.camera.center();
        self.interaction
            .drag_start((screen_pos.x, screen_pos.y), (center.x, center.y))
    }

    pub fn end_drag(&mut self) -> Result<(), InteractionError> {
        self.interaction.drag_end()
    }

    /// Toggle a cluster's expansion; idempotent under double-invocation.
    pub fn toggle_expand(&mut self, cluster_id: &str) {
        self.interaction.toggle_expand(cluster_id);
        // expansion changes which subclusters are hit-testable
        self.rebuild_spatial();
    }

    /// Navigation intent for the current selection; mechanics are external.
    pub fn open_selected(&self) -> Option<NavigationAction> {
        match self.interaction.selected()? {
            EntityRef::Paper { id } => Some(NavigationAction::OpenPaper {
                paper_id: id.clone(),
            }),
            EntityRef::Cluster { id } => Some(NavigationAction::OpenClusterPapers {
                cluster_id: id.clone(),
            }),
        }
    }

    fn selection_details(&self, entity: &EntityRef) -> SelectionDetails {
        match entity {
            EntityRef::Paper { id } => {
                let label = self
                    .snapshot
                    .papers
                    .iter()
                    .find(|p| &p.id == id)
                    .map(|p| p.title.clone())
                    .unwrap_or_default();
                SelectionDetails {
                    entity: entity.clone(),
                    label,
                    connection_count: self.snapshot.link_degree(id),
                    paper_count: None,
                }
            }
            EntityRef::Cluster { id } => {
                // Hit testing hands out subcluster ids too once a cluster is
                // expanded, so fall back to the parents' subcluster lists.
                let (label, paper_count) =
                    match self.snapshot.clusters.iter().find(|c| &c.id == id) {
                        Some(cluster) => (cluster.name.clone(), Some(cluster.paper_count)),
                        None => self
                            .snapshot
                            .clusters
                            .iter()
                            .flat_map(|c| &c.subclusters)
                            .find(|s| &s.id == id)
                            .map(|s| (s.name.clone(), Some(s.paper_count)))
                            .unwrap_or_default(),
                    };
                SelectionDetails {
                    entity: entity.clone(),
                    label,
                    connection_count: self.snapshot.connection_degree(id),
                    paper_count,
                }
            }
        }
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Assemble the frame for the render adapter.
    pub fn frame(&self) -> RenderFrame {
        build_frame(
            &self.filtered,
            &self.paper_layout,
            &self.cluster_layout,
            &self.interaction,
            &self.camera,
        )
    }

    /// Reset interaction state to `Idle` when the user navigates away.
    pub fn reset_session(&mut self) {
        self.interaction.reset();
        self.rebuild_spatial();
    }
}
