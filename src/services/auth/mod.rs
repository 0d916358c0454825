/*
 * Responsibility
 * - Bearer トークンの暗号学的検証 (TokenVerifier)
 * - 検証済みペイロードの型 (Claims)
 */
pub mod claims;
pub mod factory;
pub mod verifier;

pub use claims::Claims;
pub use factory::build_verifier;
pub use verifier::{TokenVerifier, VerifierOptions};
