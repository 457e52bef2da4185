//! Pass-through routes used by the hand-held terminals.

use actix_web::Scope;

use crate::proxy::{self, Endpoint};

const API_PATH: &str = "/api/hht";

const ENDPOINTS: &[Endpoint] = &[
    proxy::get("/serial-detail"),
    proxy::post("/put-away"),
    proxy::post("/picking"),
    proxy::post("/stock-count"),
    proxy::post("/dispatch"),
    proxy::post("/material-return"),
];

pub fn configure_routes() -> Scope {
    proxy::scope_for(API_PATH, ENDPOINTS)
}
