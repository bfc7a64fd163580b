//! Edge highlighting rule.
//!
//! An edge renders highlighted iff its source or target equals the active
//! (hovering-else-selected) entity id. The mask is recomputed in full on
//! every state change; partial or cached highlight sets can go stale and are
//! not permitted.

use paper_graph_types::EntityRef;

/// Compute the highlight mask for a list of edges given the active entity.
///
/// `edges` yields `(source_id, target_id)` pairs; the result has one flag per
/// edge in order. With no active entity every flag is `false`.
pub fn highlight_mask<'a, I>(active: Option<&EntityRef>, edges: I) -> Vec<bool>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    match active {
        Some(entity) => {
            let id = entity.id();
            edges
                .into_iter()
                .map(|(source, target)| source == id || target == id)
                .collect()
        }
        None => edges.into_iter().map(|_| false).collect(),
    }
}
