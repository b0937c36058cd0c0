//! Flattening of direct and role-derived grants into effective permission names.
//!
//! Checks are made on permission *names* rather than identifiers: call sites
//! only know the capability token they need (e.g. `"view roles"`), never the
//! numeric id the backing store assigned to it.

use std::collections::BTreeSet;

use rolegate_domain::User;
use serde::Serialize;

/// Effective permission names of one user, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectivePermissionSet(BTreeSet<String>);

impl EffectivePermissionSet {
    /// Returns whether the exact, case-sensitive name is held.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Returns the number of distinct names held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no permission is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates held names in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the required names that are not held, in input order.
    #[must_use]
    pub fn missing<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.contains(name))
            .map(str::to_owned)
            .collect()
    }

    /// Returns the held names in lexical order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl FromIterator<String> for EffectivePermissionSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns the union of a user's direct permission names and the names of
/// every permission granted by the user's roles.
///
/// An absent user (unauthenticated) has no effective permissions.
#[must_use]
pub fn effective_permission_names(user: Option<&User>) -> EffectivePermissionSet {
    let Some(user) = user else {
        return EffectivePermissionSet::default();
    };

    let direct = user.permissions().iter();
    let inherited = user.roles().iter().flat_map(|role| role.permissions().iter());

    direct
        .chain(inherited)
        .map(|permission| permission.name().to_owned())
        .collect()
}

/// Returns whether every required name is held. No requirement always passes.
#[must_use]
pub fn has_all<S: AsRef<str>>(effective: &EffectivePermissionSet, required: &[S]) -> bool {
    required
        .iter()
        .all(|name| effective.contains(name.as_ref()))
}

/// Returns whether at least one required name is held.
#[must_use]
pub fn has_any<S: AsRef<str>>(effective: &EffectivePermissionSet, required: &[S]) -> bool {
    required
        .iter()
        .any(|name| effective.contains(name.as_ref()))
}

#[cfg(test)]
mod tests;
