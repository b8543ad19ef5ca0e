//! Element tree helpers shared by the controllers.

use vitrin_types::backend::PageBackend;
use vitrin_types::geometry::ElementId;

/// Whether `el` is `ancestor` or one of its descendants.
pub fn is_within(backend: &mut dyn PageBackend, ancestor: ElementId, el: ElementId) -> bool {
    closest_of(backend, el, &[ancestor]).is_some()
}

/// Nearest element among `candidates` on the path from `el` up to the root,
/// starting with `el` itself.
pub fn closest_of(
    backend: &mut dyn PageBackend,
    el: ElementId,
    candidates: &[ElementId],
) -> Option<ElementId> {
    let mut cursor = Some(el);
    while let Some(node) = cursor {
        if candidates.contains(&node) {
            return Some(node);
        }
        cursor = backend.parent(node);
    }
    None
}
