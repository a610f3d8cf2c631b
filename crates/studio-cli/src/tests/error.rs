use crate::CliError;

use studio_session::{RedirectReason, SessionError};

#[test]
fn given_missing_role_redirect_then_message_names_the_role() {
    let err = CliError::redirected(
        "clients",
        "/".to_string(),
        &RedirectReason::MissingRole("admin".into()),
    );

    let message = err.to_string();
    assert!(message.contains("'clients'"));
    assert!(message.contains("requires the admin role"));
    assert!(err.hint().is_some());
}

#[test]
fn given_session_error_then_hint_comes_from_session() {
    let err = CliError::from(SessionError::session_expired());

    assert_eq!(
        err.hint(),
        Some(SessionError::session_expired().recovery_hint())
    );
}

#[test]
fn given_unsupported_command_then_no_hint() {
    let err = CliError::Unsupported {
        command: "shell".into(),
    };

    assert!(err.hint().is_none());
}
