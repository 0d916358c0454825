/*
 * Responsibility
 * - GET /me: gate を通過したリクエストの user (= 検証済み Claims) をそのまま返す
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::AuthUser;
use crate::services::auth::Claims;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Claims,
}

pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user: claims })
}
