use crate::Roles;

use serde_json::json;

#[test]
fn given_scalar_role_when_deserialized_then_becomes_collection() {
    let roles: Roles = serde_json::from_value(json!("Admin")).unwrap();

    assert_eq!(roles.len(), 1);
    assert!(roles.contains("admin"));
}

#[test]
fn given_role_array_when_deserialized_then_keeps_original_case() {
    let roles: Roles = serde_json::from_value(json!(["Admin", "User"])).unwrap();

    assert_eq!(roles.iter().collect::<Vec<_>>(), vec!["Admin", "User"]);
    assert_eq!(roles.normalized(), vec!["admin", "user"]);
}

#[test]
fn given_null_roles_when_deserialized_then_empty() {
    let roles: Roles = serde_json::from_value(json!(null)).unwrap();

    assert!(roles.is_empty());
}

#[test]
fn given_blank_entries_when_constructed_then_dropped() {
    let roles = Roles::new(["  ", "user ", ""]);

    assert_eq!(roles.iter().collect::<Vec<_>>(), vec!["user"]);
}

#[test]
fn given_mixed_json_array_when_from_value_then_non_strings_skipped() {
    let roles = Roles::from_value(&json!(["Admin", 7, {"nested": true}, null]));

    assert_eq!(roles.iter().collect::<Vec<_>>(), vec!["Admin", "7"]);
}

#[test]
fn given_roles_when_serialized_then_plain_array() {
    let roles = Roles::new(["Admin"]);

    assert_eq!(serde_json::to_value(&roles).unwrap(), json!(["Admin"]));
}
