//! Ownership rule deciding who may delete a blog.

use super::models::{AuthPrincipal, Blog};

/// Whether `principal` may delete `blog`.
///
/// Only the owner may delete. A missing principal, a missing blog, or a
/// blog with no recorded owner always denies. Identifiers are compared by
/// value, so the textual form a client used to send them does not matter.
pub fn can_delete(principal: Option<&AuthPrincipal>, blog: Option<&Blog>) -> bool {
    // ---
    match (principal, blog.and_then(|b| b.owner_id)) {
        (Some(principal), Some(owner_id)) => principal.user_id == owner_id,
        _ => false,
    }
}
