//! Hover/selection/drag state and its transition rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use paper_graph_types::EntityRef;

/// Error types for invalid interaction operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("pan drag requires the pan tool; current tool is {current:?}")]
    PanToolInactive { current: ToolMode },

    #[error("a drag is already in progress")]
    DragInProgress,

    #[error("no drag in progress")]
    NoActiveDrag,
}

/// Pointer tool selected in the toolbar.
///
/// In `Select` mode pointer drags are reserved for node interaction and must
/// never pan the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Select,
    Pan,
}

/// An in-progress pan drag.
///
/// `pan_origin` records the camera pan at drag start so pointer motion can be
/// applied as an absolute offset rather than accumulated deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub tool: ToolMode,
    pub start: (f32, f32),
    pub pan_origin: (f32, f32),
}

/// The canonical observable state of the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionState {
    Idle,
    Hovering(EntityRef),
    Selected(EntityRef),
    Dragging(DragState),
}

/// All interaction state for one viewing session.
///
/// Hover and selection each reference at most one entity. The derived
/// [`state`](Self::state) accessor reports the canonical machine state with
/// drag taking precedence over hover, and hover over selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionContext {
    hover: Option<EntityRef>,
    selected: Option<EntityRef>,
    drag: Option<DragState>,
    tool: ToolMode,
    /// Clusters currently expanded to show subclusters
    expanded: BTreeSet<String>,
}

impl InteractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    /// Canonical machine state.
    pub fn state(&self) -> InteractionState {
        if let Some(drag) = self.drag {
            return InteractionState::Dragging(drag);
        }
        if let Some(entity) = &self.hover {
            return InteractionState::Hovering(entity.clone());
        }
        if let Some(entity) = &self.selected {
            return InteractionState::Selected(entity.clone());
        }
        InteractionState::Idle
    }

    /// The entity driving edge highlighting: hover wins over selection.
    pub fn active_entity(&self) -> Option<&EntityRef> {
        self.hover.as_ref().or(self.selected.as_ref())
    }

    pub fn hovered(&self) -> Option<&EntityRef> {
        self.hover.as_ref()
    }

    pub fn selected(&self) -> Option<&EntityRef> {
        self.selected.as_ref()
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // =========================================================================
    // POINTER TRANSITIONS
    // =========================================================================

    /// Pointer moved onto an entity. Ignored while a drag is active.
    pub fn pointer_enter(&mut self, entity: EntityRef) {
        if self.drag.is_some() {
            return;
        }
        self.hover = Some(entity);
    }

    /// Pointer left all entities. Selection persists through hover-out.
    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    /// Click on an entity: replaces any prior selection (no multi-select).
    ///
    /// The click consumes the hover so the machine reports `Selected`; the
    /// next pointer move re-establishes hover.
    pub fn click_entity(&mut self, entity: EntityRef) {
        self.hover = None;
        self.selected = Some(entity);
    }

    /// Click on empty canvas: back to `Idle`, detail panel closed.
    pub fn click_background(&mut self) {
        self.hover = None;
        self.selected = None;
    }

    // =========================================================================
    // DRAG TRANSITIONS
    // =========================================================================

    /// Begin a pan drag at `start` (screen coordinates).
    ///
    /// Only valid while the pan tool is active; in select mode pointer drags
    /// belong to node interaction.
    pub fn drag_start(
        &mut self,
        start: (f32, f32),
        pan_origin: (f32, f32),
    ) -> Result<(), InteractionError> {
        if self.tool != ToolMode::Pan {
            return Err(InteractionError::PanToolInactive { current: self.tool });
        }
        if self.drag.is_some() {
            return Err(InteractionError::DragInProgress);
        }
        self.hover = None;
        self.drag = Some(DragState {
            tool: self.tool,
            start,
            pan_origin,
        });
        Ok(())
    }

    /// Current drag, for applying pointer motion to the camera.
    pub fn drag_active(&self) -> Result<DragState, InteractionError> {
        self.drag.ok_or(InteractionError::NoActiveDrag)
    }

    /// End the drag; the machine returns to the prior selection state.
    pub fn drag_end(&mut self) -> Result<(), InteractionError> {
        if self.drag.take().is_none() {
            return Err(InteractionError::NoActiveDrag);
        }
        Ok(())
    }

    /// Switch tools. Switching away from pan cancels any active drag.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if tool != self.tool {
            self.drag = None;
        }
        self.tool = tool;
    }

    // =========================================================================
    // CLUSTER EXPANSION
    // =========================================================================

    /// Toggle a cluster's membership in the expanded set.
    ///
    /// Each cluster toggles independently; toggling twice restores the
    /// original membership.
    pub fn toggle_expand(&mut self, cluster_id: &str) {
        if !self.expanded.remove(cluster_id) {
            self.expanded.insert(cluster_id.to_string());
        }
    }

    pub fn is_expanded(&self, cluster_id: &str) -> bool {
        self.expanded.contains(cluster_id)
    }

    pub fn expanded(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    // =========================================================================
    // SESSION RESET
    // =========================================================================

    /// Reset to `Idle` when the user navigates away from the view.
    pub fn reset(&mut self) {
        *self = Self {
            tool: self.tool,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn paper(id: &str) -> EntityRef {
        EntityRef::paper(id)
    }

    #[test]
    fn test_new_context_is_idle() {
        let ctx = InteractionContext::new();
        assert_eq!(ctx.state(), InteractionState::Idle);
        assert_eq!(ctx.active_entity(), None);
    }

    #[test]
    fn test_hover_and_leave() {
        let mut ctx = InteractionContext::new();
        ctx.pointer_enter(paper("a"));
        assert_eq!(ctx.state(), InteractionState::Hovering(paper("a")));

        ctx.pointer_leave();
        assert_eq!(ctx.state(), InteractionState::Idle);
    }

    #[test]
    fn test_selection_persists_through_hover_out() {
        let mut ctx = InteractionContext::new();
        ctx.click_entity(paper("a"));
        ctx.pointer_enter(paper("b"));
        ctx.pointer_leave();
        assert_eq!(ctx.state(), InteractionState::Selected(paper("a")));
    }

    #[test]
    fn test_click_replaces_selection() {
        let mut ctx = InteractionContext::new();
        ctx.click_entity(paper("a"));
        ctx.click_entity(paper("b"));
        assert_eq!(ctx.selected(), Some(&paper("b")));
        assert_eq!(ctx.state(), InteractionState::Selected(paper("b")));
    }

    #[test]
    fn test_click_background_clears_selection() {
        let mut ctx = InteractionContext::new();
        ctx.click_entity(paper("a"));
        ctx.click_background();
        assert_eq!(ctx.state(), InteractionState::Idle);
    }

    #[test]
    fn test_hover_wins_over_selection_for_highlight() {
        let mut ctx = InteractionContext::new();
        ctx.click_entity(paper("a"));
        ctx.pointer_enter(paper("b"));
        assert_eq!(ctx.active_entity(), Some(&paper("b")));
    }

    #[test]
    fn test_drag_requires_pan_tool() {
        let mut ctx = InteractionContext::new();
        let err = ctx.drag_start((10.0, 10.0), (0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            InteractionError::PanToolInactive {
                current: ToolMode::Select
            }
        );
        assert!(!ctx.is_dragging());
    }

    #[test]
    fn test_drag_end_restores_prior_selection() {
        let mut ctx = InteractionContext::new();
        ctx.click_entity(paper("a"));
        ctx.set_tool(ToolMode::Pan);
        ctx.drag_start((5.0, 5.0), (0.0, 0.0)).unwrap();
        assert!(matches!(ctx.state(), InteractionState::Dragging(_)));

        ctx.drag_end().unwrap();
        assert_eq!(ctx.state(), InteractionState::Selected(paper("a")));
    }

    #[test]
    fn test_double_drag_start_rejected() {
        let mut ctx = InteractionContext::new();
        ctx.set_tool(ToolMode::Pan);
        ctx.drag_start((0.0, 0.0), (0.0, 0.0)).unwrap();
        assert_eq!(
            ctx.drag_start((1.0, 1.0), (0.0, 0.0)),
            Err(InteractionError::DragInProgress)
        );
    }

    #[test]
    fn test_tool_switch_cancels_drag() {
        let mut ctx = InteractionContext::new();
        ctx.set_tool(ToolMode::Pan);
        ctx.drag_start((0.0, 0.0), (0.0, 0.0)).unwrap();
        ctx.set_tool(ToolMode::Select);
        assert!(!ctx.is_dragging());
        assert_eq!(ctx.drag_end(), Err(InteractionError::NoActiveDrag));
    }

    #[test]
    fn test_toggle_expand_is_involutive() {
        let mut ctx = InteractionContext::new();
        ctx.toggle_expand("c1");
        ctx.toggle_expand("c2");
        ctx.toggle_expand("c1");
        assert!(!ctx.is_expanded("c1"));
        assert!(ctx.is_expanded("c2"));
        assert_eq!(ctx.expanded().len(), 1);
    }

    #[test]
    fn test_reset_keeps_tool_clears_rest() {
        let mut ctx = InteractionContext::new();
        ctx.set_tool(ToolMode::Pan);
        ctx.click_entity(paper("a"));
        ctx.toggle_expand("c1");
        ctx.reset();
        assert_eq!(ctx.state(), InteractionState::Idle);
        assert!(ctx.expanded().is_empty());
        assert_eq!(ctx.tool(), ToolMode::Pan);
    }
}
