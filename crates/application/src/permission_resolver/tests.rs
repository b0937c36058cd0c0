use proptest::prelude::*;

use crate::test_support::{permission, role, user};

use super::{EffectivePermissionSet, effective_permission_names, has_all, has_any};

const NAMES: &[&str] = &[
    "view users",
    "create users",
    "delete users",
    "view roles",
    "update roles",
    "view permissions",
    "View users",
];

#[test]
fn absent_user_has_no_permissions() {
    let effective = effective_permission_names(None);
    assert!(effective.is_empty());
}

#[test]
fn user_without_roles_or_grants_has_no_permissions() {
    let subject = user(1, Vec::new(), Vec::new());
    let effective = effective_permission_names(Some(&subject));

    assert!(effective.is_empty());
    assert!(has_all::<&str>(&effective, &[]));
    assert!(!has_all(&effective, &["x"]));
}

#[test]
fn union_covers_direct_and_role_permissions() {
    let subject = user(
        1,
        vec![
            role(1, "Viewer", vec![permission(1, "view users")]),
            role(2, "Editor", vec![permission(1, "view users"), permission(2, "create users")]),
        ],
        vec![permission(3, "view settings")],
    );

    let effective = effective_permission_names(Some(&subject));

    assert_eq!(
        effective.into_vec(),
        vec!["create users", "view settings", "view users"]
    );
}

#[test]
fn union_is_by_name_not_identity() {
    let subject = user(
        1,
        vec![role(1, "Viewer", vec![permission(10, "view users")])],
        vec![permission(20, "view users")],
    );

    assert_eq!(effective_permission_names(Some(&subject)).len(), 1);
}

#[test]
fn comparison_is_case_sensitive_without_prefix_matching() {
    let effective: EffectivePermissionSet = ["view users".to_owned()].into_iter().collect();

    assert!(!has_all(&effective, &["View users"]));
    assert!(!has_all(&effective, &["view"]));
    assert!(!has_any(&effective, &["view users*"]));
}

#[test]
fn has_any_requires_one_match() {
    let effective: EffectivePermissionSet = ["view roles".to_owned()].into_iter().collect();

    assert!(has_any(&effective, &["view users", "view roles"]));
    assert!(!has_any(&effective, &["view users"]));
    assert!(!has_any::<&str>(&effective, &[]));
}

#[test]
fn missing_lists_unheld_requirements_in_order() {
    let effective: EffectivePermissionSet = ["view users".to_owned()].into_iter().collect();

    assert_eq!(
        effective.missing(&["delete users", "view users", "create users"]),
        vec!["delete users".to_owned(), "create users".to_owned()]
    );
}

fn name_subset() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(NAMES, 0..=NAMES.len())
}

proptest! {
    #[test]
    fn effective_set_is_superset_of_every_source(
        direct in name_subset(),
        first_role in name_subset(),
        second_role in name_subset(),
    ) {
        let to_permissions = |names: &[&str], offset: i64| {
            names
                .iter()
                .enumerate()
                .map(|(index, name)| permission(offset + index as i64, name))
                .collect::<Vec<_>>()
        };
        let subject = user(
            1,
            vec![
                role(1, "First", to_permissions(first_role.as_slice(), 100)),
                role(2, "Second", to_permissions(second_role.as_slice(), 200)),
            ],
            to_permissions(direct.as_slice(), 0),
        );

        let effective = effective_permission_names(Some(&subject));

        prop_assert!(has_all(&effective, &direct));
        prop_assert!(has_all(&effective, &first_role));
        prop_assert!(has_all(&effective, &second_role));
        for name in effective.iter() {
            let declared = direct
                .iter()
                .chain(first_role.iter())
                .chain(second_role.iter())
                .any(|candidate| *candidate == name);
            prop_assert!(declared);
        }
    }

    #[test]
    fn adding_a_role_permission_never_shrinks_the_set(
        direct in name_subset(),
        granted in name_subset(),
        extra in proptest::sample::select(NAMES),
    ) {
        let base_permissions: Vec<_> = granted
            .iter()
            .enumerate()
            .map(|(index, name)| permission(index as i64, name))
            .collect();
        let mut extended_permissions = base_permissions.clone();
        extended_permissions.push(permission(999, extra));
        let direct_permissions: Vec<_> = direct
            .iter()
            .enumerate()
            .map(|(index, name)| permission(500 + index as i64, name))
            .collect();

        let before = user(1, vec![role(1, "Role", base_permissions)], direct_permissions.clone());
        let after = user(1, vec![role(1, "Role", extended_permissions)], direct_permissions);

        let before = effective_permission_names(Some(&before));
        let after = effective_permission_names(Some(&after));

        for name in before.iter() {
            prop_assert!(after.contains(name));
        }
        prop_assert!(after.contains(extra));
    }

    #[test]
    fn has_all_is_monotonic_under_subsets(
        held in name_subset(),
        required in name_subset(),
        keep_mask in proptest::collection::vec(any::<bool>(), NAMES.len()),
    ) {
        let effective: EffectivePermissionSet =
            held.iter().map(|name| (*name).to_owned()).collect();
        let subset: Vec<&str> = required
            .iter()
            .zip(keep_mask.iter())
            .filter_map(|(name, keep)| keep.then_some(*name))
            .collect();

        if has_all(&effective, &required) {
            prop_assert!(has_all(&effective, &subset));
        }
    }
}
