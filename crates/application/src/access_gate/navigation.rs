use rolegate_domain::NavigationEntry;

use crate::permission_resolver::{EffectivePermissionSet, has_all};

/// Keeps the entries whose requirement is held, preserving menu order.
///
/// Entries without a requirement are always kept. The check is the same
/// `has_all` the gate applies to whole views, so an entry is visible exactly
/// when the view it links to would be granted.
#[must_use]
pub fn visible_entries(
    effective: &EffectivePermissionSet,
    entries: &[NavigationEntry],
) -> Vec<NavigationEntry> {
    entries
        .iter()
        .filter(|entry| match entry.required_permission.as_deref() {
            Some(required) => has_all(effective, &[required]),
            None => true,
        })
        .cloned()
        .collect()
}
