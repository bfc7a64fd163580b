//! Shared Data Contracts for the Citation Graph Kernel
//!
//! This crate is the single source of truth for all types crossing the
//! provider boundary (server JSON -> kernel) and the navigation boundary
//! (kernel -> host application).
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  Graph Provider  │  JSON   │  Visualization   │
//! │  (server)        │ ◄─────► │  kernel          │
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. All boundary types live here - no inline struct definitions in the kernel
//! 2. String IDs everywhere for JSON compatibility
//! 3. No geometry or UI dependency - this crate is pure data, usable by a server
//! 4. Positions and sizes are derived by the kernel, never carried on these types

pub mod cluster;
pub mod graph;
pub mod navigation;

pub use cluster::{ClusterConnection, ClusterNode, Subcluster};
pub use graph::{CitationLink, GraphSnapshot, PaperNode};
pub use navigation::{EntityRef, NavigationAction};
