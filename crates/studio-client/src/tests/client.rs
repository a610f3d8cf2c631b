use crate::client::error_message;
use crate::{Client, ClientError, LoginResponse};

use std::sync::Arc;

use serde_json::json;

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = Client::new("http://localhost:5000/");
    assert_eq!(client.base_url, "http://localhost:5000");
}

#[test]
fn test_base_url_no_trailing_slash() {
    let client = Client::new("http://localhost:5000");
    assert_eq!(client.base_url, "http://localhost:5000");
}

#[test]
fn test_no_provider_has_no_credential() {
    let client = Client::new("http://localhost:5000");
    assert!(!client.has_credential());
}

#[test]
fn test_empty_credential_is_not_a_credential() {
    let client = Client::new("http://localhost:5000")
        .with_credentials(Arc::new(|| Some(String::new())));
    assert!(!client.has_credential());
}

#[test]
fn test_error_message_shapes() {
    assert_eq!(
        error_message(&json!({"message": "Invalid credentials"})),
        Some("Invalid credentials".to_string())
    );
    assert_eq!(
        error_message(&json!({"error": {"code": "X", "message": "nested"}})),
        Some("nested".to_string())
    );
    assert_eq!(
        error_message(&json!({"error": "flat"})),
        Some("flat".to_string())
    );
    assert_eq!(
        error_message(&json!({"title": "Unauthorized", "status": 401})),
        Some("Unauthorized".to_string())
    );
    assert_eq!(error_message(&json!({"status": 500})), None);
}

#[test]
fn test_status_error_accessors() {
    let err = ClientError::status_error(403, "Forbidden".into(), Some(json!({"x": 1})));
    assert_eq!(err.status(), Some(403));
    assert!(err.is_unauthorized());
    assert_eq!(err.payload(), Some(&json!({"x": 1})));
    assert_eq!(err.user_message(), "Forbidden");

    let not_found = ClientError::status_error(404, "Not Found".into(), None);
    assert!(!not_found.is_unauthorized());
}

#[test]
fn test_login_response_into_parts_with_numeric_user_id() {
    let response: LoginResponse = serde_json::from_value(json!({
        "token": "abc",
        "userId": 12,
        "email": "ada@example.com",
        "fullName": "Ada",
        "roles": "Admin"
    }))
    .unwrap();

    let (token, identity) = response.into_parts();

    assert_eq!(token, "abc");
    assert_eq!(identity.id, "12");
    assert_eq!(identity.roles.len(), 1);
    assert!(identity.is_admin());
}
