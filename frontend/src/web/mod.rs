//! Thin wrappers over the browser APIs the screens need.
//!
//! Everything touching `window`, `document`, cookies or history goes through
//! here so components only deal with typed values.

pub mod clock;
pub mod cookie;
pub mod download;
pub mod http;
pub mod router;
pub mod storage;
pub mod theme;
