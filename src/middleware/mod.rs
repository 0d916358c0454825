/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Bearer gate (route 単位) / http: request-id, trace, timeout, body limit (Router 全体)
 */
pub mod auth;
pub mod http;
