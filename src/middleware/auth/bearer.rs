//! Bearer トークン検証 → Claims を extensions に入れる
//!
//! - `Authorization` ヘッダから credential を取り出す (scheme `Bearer` は任意・大文字小文字無視)
//! - 空なら verifier を呼ばずに `No token` で拒否
//! - 検証失敗は理由を問わず `Invalid token` で拒否
//! - 成功時のみ `Claims` を request extensions に格納し、next を 1 回だけ呼ぶ

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AuthError;
use crate::services::auth::{Claims, TokenVerifier};
use crate::state::AppState;

const SCHEME: &str = "bearer";

/// 認証が必要な Router に gate を掛ける。
///
/// `route_layer` なので、マッチしないパスは 401 ではなく 404 のまま。
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::bearer::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, bearer_middleware))
}

pub async fn bearer_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = authenticate(&state.verifier, req.headers())?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Admit (claims) or reject (reason) a request based on its headers alone.
pub fn authenticate(verifier: &TokenVerifier, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let token = extract_bearer(headers).ok_or(AuthError::MissingCredential)?;
    verifier.verify(&token)
}

/// Pull the credential out of `Authorization`.
///
/// HeaderMap lookups are already case-insensitive. Only the first value is
/// considered. Returns `None` when nothing usable is left after stripping the
/// scheme and whitespace.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?;
    // non-UTF-8 bytes survive as replacement chars and fail verification
    let value = String::from_utf8_lossy(raw.as_bytes());

    let token = strip_scheme(value.trim()).trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

fn strip_scheme(value: &str) -> &str {
    let Some(prefix) = value.get(..SCHEME.len()) else {
        return value;
    };
    if !prefix.eq_ignore_ascii_case(SCHEME) {
        return value;
    }

    let rest = &value[SCHEME.len()..];
    // "BearerXYZ" is a token, not a scheme
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        rest
    } else {
        value
    }
}
