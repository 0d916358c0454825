/*!
 * Request extractors
 *
 * Public API:
 * - AuthUser: gate が格納した Claims を handler に渡す
 */
mod auth_user;

pub use auth_user::AuthUser;
