//! # Admin Service Module
//!
//! Routes under `/api/admin`. Most are plain pass-throughs declared in
//! [`ENDPOINTS`]; the two that also manage the `token` cookie have their own
//! handlers:
//!
//! - `login`: `POST /check-credentials` needs no token. A successful answer
//!   carrying a token also sets the `token` cookie.
//! - `logout`: `POST /logout` tells the backend when it can, and always
//!   clears the cookie.

mod login;
mod logout;

use actix_web::web::post;
use actix_web::Scope;

use crate::proxy::{self, Endpoint};

const API_PATH: &str = "/api/admin";

const ENDPOINTS: &[Endpoint] = &[
    proxy::get("/user-role/get-all"),
    proxy::post("/user-role/insert"),
    proxy::put("/user-role/update"),
    proxy::post("/change-password"),
];

pub fn configure_routes() -> Scope {
    proxy::scope_for(API_PATH, ENDPOINTS)
        .route("/check-credentials", post().to(login::process))
        .route("/logout", post().to(logout::process))
}
