use crate::{Identity, IdentitySource, LoginCredentials, Roles};

use serde_json::json;

#[test]
fn given_identity_when_serialize_roundtrip_then_equal() {
    let original = Identity {
        id: "42".into(),
        email: "ada@example.com".into(),
        full_name: "Ada Lovelace".into(),
        roles: Roles::new(["Admin"]),
    };

    let json = serde_json::to_string(&original).unwrap();
    let restored: Identity = serde_json::from_str(&json).unwrap();

    assert_eq!(original, restored);
    assert!(json.contains("fullName"));
}

#[test]
fn given_numeric_id_when_deserialize_then_stored_as_string() {
    let identity: Identity = serde_json::from_value(json!({
        "id": 17,
        "email": "bob@example.com",
        "fullName": "Bob",
        "roles": "User"
    }))
    .unwrap();

    assert_eq!(identity.id, "17");
    assert!(identity.is_user());
    assert!(!identity.is_admin());
}

#[test]
fn given_missing_fields_when_deserialize_then_defaults() {
    let identity: Identity = serde_json::from_value(json!({ "email": "x@y.z" })).unwrap();

    assert!(identity.id.is_empty());
    assert!(identity.roles.is_empty());
}

#[test]
fn given_mixed_case_admin_role_when_is_admin_then_true() {
    let identity = Identity {
        roles: Roles::new(["ADMIN"]),
        ..Default::default()
    };

    assert!(identity.is_admin());
    assert!(identity.has_role("Admin"));
}

#[test]
fn given_partial_identity_when_display_name_then_falls_back() {
    let identity = Identity {
        id: "7".into(),
        email: "eve@example.com".into(),
        ..Default::default()
    };

    assert_eq!(identity.display_name(), "eve@example.com");
}

#[test]
fn given_unverified_claims_source_when_is_trusted_then_false() {
    assert!(!IdentitySource::UnverifiedClaims.is_trusted());
    assert!(IdentitySource::VerifiedClaims.is_trusted());
    assert!(IdentitySource::Cache.is_trusted());
}

#[test]
fn given_credentials_when_debug_formatted_then_password_redacted() {
    let credentials = LoginCredentials::new("ada@example.com", "hunter2");

    let debug = format!("{credentials:?}");

    assert!(debug.contains("ada@example.com"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn given_singular_role_key_when_deserialize_then_roles_read_from_it() {
    let identity: Identity = serde_json::from_value(json!({
        "id": "1",
        "email": "ada@example.com",
        "fullName": "Ada",
        "role": "Admin"
    }))
    .unwrap();

    assert!(identity.is_admin());
    assert_eq!(identity.roles.iter().collect::<Vec<_>>(), vec!["Admin"]);
}

#[test]
fn given_roles_and_role_keys_when_deserialize_then_roles_wins() {
    let identity: Identity = serde_json::from_value(json!({
        "roles": ["User"],
        "role": "Admin"
    }))
    .unwrap();

    assert!(identity.is_user());
    assert!(!identity.is_admin());
}

#[test]
fn given_singular_role_identity_when_serialized_then_written_as_roles() {
    let identity: Identity = serde_json::from_value(json!({ "role": "User" })).unwrap();

    let value = serde_json::to_value(&identity).unwrap();

    assert_eq!(value["roles"], json!(["User"]));
    assert!(value.get("role").is_none());
}
