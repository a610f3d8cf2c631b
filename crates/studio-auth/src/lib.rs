pub mod claims;
pub mod claims_decoder;
pub mod error;
pub mod identity;
pub mod identity_source;
pub mod login_credentials;
pub mod roles;

pub use claims::Claims;
pub use claims_decoder::{ClaimsDecoder, DecodedClaims};
pub use error::{AuthError, Result};
pub use identity::{Identity, lenient_string};
pub use identity_source::IdentitySource;
pub use login_credentials::LoginCredentials;
pub use roles::{ROLE_ADMIN, ROLE_USER, Roles};

#[cfg(test)]
mod tests;
