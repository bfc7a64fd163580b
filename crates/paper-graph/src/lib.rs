//! Citation Graph Visualization Kernel
//!
//! This crate contains ONLY the visualization kernel - no page chrome, no
//! routing, no drawing. The host application owns the render adapter and the
//! navigation mechanics; the kernel consumes a [`GraphSnapshot`] and produces
//! a [`RenderFrame`] per recompute.
//!
//! # Architecture
//!
//! ```text
//! GraphSnapshot (from provider)
//!        │
//!        ▼
//! filter (search/category/ownership)
//!        │
//!        ▼
//! layout + cluster_map (positions, sizes)
//!        │
//!        ├──► SpatialIndex (hit testing)
//!        │
//!        ▼
//! Camera2D (pan/zoom transform)
//!        │
//!        ▼
//! InteractionContext (hover/selection/drag)
//!        │
//!        ▼
//! RenderFrame (to the host's render adapter)
//! ```

pub mod api;
pub mod graph;

pub use api::{GraphProvider, HttpGraphProvider, RetrievalError};
pub use graph::{
    camera::Camera2D,
    cluster_map::{ClusterLayout, ClusterMapConfig, ConfigError},
    filter::{filter_graph, CategoryFilter, FilterCriteria, FilteredGraph},
    layout::{layout_papers, PaperLayout},
    render::{RenderEdge, RenderFrame, RenderNode, ViewTransform},
    CitationGraphView, SelectionDetails, ViewKind,
};
pub use paper_graph_types::{
    CitationLink, ClusterConnection, ClusterNode, EntityRef, GraphSnapshot, NavigationAction,
    PaperNode, Subcluster,
};
