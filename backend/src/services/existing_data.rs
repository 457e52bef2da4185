//! Pass-through routes for labelling stock that predates the system.

use actix_web::Scope;

use crate::proxy::{self, Endpoint};

const API_PATH: &str = "/api/existing-data";

const ENDPOINTS: &[Endpoint] = &[
    proxy::get("/item-codes"),
    proxy::get("/lot-numbers"),
    proxy::get("/item-detail"),
    proxy::get("/last-serial"),
    proxy::post("/print-insert"),
];

pub fn configure_routes() -> Scope {
    proxy::scope_for(API_PATH, ENDPOINTS)
}
