//! Shared types and client-independent logic for the WMS console.
//!
//! Everything in this crate is plain Rust so it can be used by both the
//! actix server and the Yew front end, and tested natively.

pub mod auth;
pub mod forms;
pub mod labels;
pub mod listing;
pub mod menu;
pub mod model;
pub mod reports;
pub mod route;
pub mod session;
pub mod theme;
