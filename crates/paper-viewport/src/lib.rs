//! Interaction State Machine for the Citation Graph Kernel
//!
//! Owns hover, selection, drag, tool-mode, and cluster-expansion state for a
//! single viewing session. All ambient view state is collected into one
//! explicit [`InteractionContext`] value threaded through update calls - no
//! globals, no callbacks.
//!
//! The machine has four observable states:
//!
//! ```text
//! Idle ──pointer_enter──► Hovering ──click_entity──► Selected
//!   ▲                        │                          │
//!   └──────pointer_leave─────┘      click_background────┘
//!
//! drag_start (pan tool) ──► Dragging ──drag_end──► prior state
//! ```
//!
//! Selection persists through hover-out; drag-end restores whatever
//! selection existed when the drag began.

pub mod highlight;
pub mod interaction;

pub use highlight::highlight_mask;
pub use interaction::{
    DragState, InteractionContext, InteractionError, InteractionState, ToolMode,
};
