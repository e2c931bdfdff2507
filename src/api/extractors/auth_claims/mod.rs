/*!
 * Authenticated-claims extractor
 *
 * Responsibility:
 * - Give handlers the typed Claims decoded by the claims middleware
 * - axum plumbing lives in core; the Claims type itself lives in services::auth
 */

mod core;

pub use self::core::AuthClaims;
