/// Factory: build the shared `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;

pub fn build_verifier(config: &Config) -> Arc<TokenVerifier> {
    Arc::new(TokenVerifier::from_config(config))
}
