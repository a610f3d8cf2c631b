//! HTTP transport for the studio backend.
//!
//! A [`Client`] is bound to one base URL. Authorization is attached per
//! request from an optional [`CredentialProvider`] scoped to that client.

pub(crate) mod client;
pub(crate) mod client_summary;
pub(crate) mod credential_provider;
pub(crate) mod error;
pub(crate) mod login_response;

#[cfg(test)]
mod tests;

pub use client::Client;
pub use client_summary::{ClientSummary, License, NO_LICENSE_NAME};
pub use credential_provider::CredentialProvider;
pub use error::{ClientError, Result as ClientResult};
pub use login_response::LoginResponse;
