//! Pass-through routes for the report screens and the dashboard summary.

use actix_web::Scope;

use crate::proxy::{self, Endpoint};

const API_PATH: &str = "/api/reports";

const ENDPOINTS: &[Endpoint] = &[
    proxy::post("/fg-label-printing"),
    proxy::post("/material-receipt"),
    proxy::post("/material-return"),
    proxy::post("/fg-movement"),
    proxy::get("/dashboard"),
];

pub fn configure_routes() -> Scope {
    proxy::scope_for(API_PATH, ENDPOINTS)
}
