pub mod bearer;
pub mod claims;
pub mod decoder;
pub mod error;

pub use bearer::{bearer_from_headers, extract_bearer};
pub use claims::{Audience, ClaimField, Claims, RealmAccess, ResourceAccess};
pub use decoder::ClaimsDecoder;
pub use error::{AuthError, AuthResult, DecodeFailure, SchemaViolation};
