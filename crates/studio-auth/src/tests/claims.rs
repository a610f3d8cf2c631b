use crate::tests::{TEST_SECRET, create_test_token};
use crate::{AuthError, ClaimsDecoder, IdentitySource};

use serde_json::json;

#[test]
fn given_email_subject_and_role_array_when_decoded_unverified_then_identity_built() {
    let token = create_test_token(&json!({ "sub": "a@b.com", "roles": ["User"] }), TEST_SECRET);

    let decoded = ClaimsDecoder::unverified().decode(&token).unwrap();
    let identity = decoded.claims.to_identity().unwrap();

    assert!(!decoded.verified);
    assert_eq!(decoded.identity_source(), IdentitySource::UnverifiedClaims);
    assert_eq!(identity.id, "a@b.com");
    assert_eq!(identity.email, "a@b.com");
    assert!(identity.is_user());
}

#[test]
fn given_namespaced_role_claim_when_decoded_then_roles_read() {
    let token = create_test_token(
        &json!({
            "nameid": "99",
            "email": "boss@example.com",
            "unique_name": "The Boss",
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "Admin"
        }),
        TEST_SECRET,
    );

    let identity = ClaimsDecoder::unverified()
        .decode(&token)
        .unwrap()
        .claims
        .to_identity()
        .unwrap();

    assert_eq!(identity.id, "99");
    assert_eq!(identity.full_name, "The Boss");
    assert!(identity.is_admin());
}

#[test]
fn given_claims_without_identifying_keys_when_to_identity_then_none() {
    let token = create_test_token(&json!({ "iss": "studio", "iat": 1 }), TEST_SECRET);

    let decoded = ClaimsDecoder::unverified().decode(&token).unwrap();

    assert!(decoded.claims.to_identity().is_none());
}

#[test]
fn given_opaque_token_when_decoded_then_malformed_error() {
    let result = ClaimsDecoder::unverified().decode("not-a-jwt");

    assert!(matches!(result, Err(AuthError::MalformedToken { .. })));
}

#[test]
fn given_garbage_payload_when_decoded_then_encoding_error() {
    let result = ClaimsDecoder::unverified().decode("aaa.!!!.ccc");

    assert!(matches!(result, Err(AuthError::PayloadEncoding { .. })));
}

#[test]
fn given_non_object_payload_when_decoded_then_json_error() {
    // "WzFd" is base64url for `[1]`
    let result = ClaimsDecoder::unverified().decode("aaa.WzFd.ccc");

    assert!(matches!(result, Err(AuthError::PayloadJson { .. })));
}

#[test]
fn given_correct_secret_when_decoded_with_hs256_then_verified() {
    let exp = chrono::Utc::now().timestamp() + 3600;
    let token = create_test_token(&json!({ "sub": "u-1", "exp": exp }), TEST_SECRET);

    let decoded = ClaimsDecoder::with_hs256(TEST_SECRET).decode(&token).unwrap();

    assert!(decoded.verified);
    assert_eq!(decoded.identity_source(), IdentitySource::VerifiedClaims);
    assert_eq!(decoded.claims.expires_at(), Some(exp));
}

#[test]
fn given_wrong_secret_when_decoded_with_hs256_then_decode_error() {
    let token = create_test_token(&json!({ "sub": "u-1" }), TEST_SECRET);

    let result = ClaimsDecoder::with_hs256(b"wrong-secret-key-at-least-32-bytes").decode(&token);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_expired_token_when_decoded_with_hs256_then_token_expired() {
    let exp = chrono::Utc::now().timestamp() - 3600;
    let token = create_test_token(&json!({ "sub": "u-1", "exp": exp }), TEST_SECRET);

    let result = ClaimsDecoder::with_hs256(TEST_SECRET).decode(&token);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_optional_secret_when_from_secret_then_picks_mode() {
    assert!(!ClaimsDecoder::from_secret(None).is_verifying());
    assert!(ClaimsDecoder::from_secret(Some("12345678901234567890123456789012")).is_verifying());
}

#[test]
fn given_jti_sub_and_email_claims_when_to_identity_then_jti_is_id_and_sub_is_email() {
    let token = create_test_token(
        &json!({
            "jti": "token-id-7",
            "sub": "ada@example.com",
            "email": "other@example.com",
            "name": "Ada",
            "fullName": "Ada Lovelace"
        }),
        TEST_SECRET,
    );

    let identity = ClaimsDecoder::unverified()
        .decode(&token)
        .unwrap()
        .claims
        .to_identity()
        .unwrap();

    assert_eq!(identity.id, "token-id-7");
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.full_name, "Ada");
}

#[test]
fn given_only_email_claim_when_to_identity_then_email_used() {
    let token = create_test_token(&json!({ "email": "ada@example.com" }), TEST_SECRET);

    let identity = ClaimsDecoder::unverified()
        .decode(&token)
        .unwrap()
        .claims
        .to_identity()
        .unwrap();

    assert_eq!(identity.email, "ada@example.com");
    assert!(identity.id.is_empty());
}
