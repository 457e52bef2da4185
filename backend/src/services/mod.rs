pub mod admin;
pub mod existing_data;
pub mod export;
pub mod hht;
pub mod master;
pub mod reports;
pub mod transactions;

use actix_web::web::{self, scope};
use actix_web::Scope;

use crate::proxy;

/// Catches `/api/...` paths no group claims, so they never fall through to the SPA.
pub fn api_fallback() -> Scope {
    scope("/api").default_service(web::to(proxy::not_found))
}
