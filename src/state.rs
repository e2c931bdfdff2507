/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cloned per request, so everything inside is Arc / cheap to clone
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::ClaimsDecoder;

#[derive(Clone, Debug)]
pub struct AppState {
    pub claims_decoder: Arc<ClaimsDecoder>,
}

impl AppState {
    pub fn new(claims_decoder: Arc<ClaimsDecoder>) -> Self {
        Self { claims_decoder }
    }

    pub fn from_config(config: &Config) -> Self {
        let decoder = ClaimsDecoder::new().with_expected_algorithm(config.expected_token_algorithm);
        Self::new(Arc::new(decoder))
    }
}
