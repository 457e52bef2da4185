pub mod dashboard;
pub mod envelope;
pub mod export;
pub mod master;
pub mod reports;
pub mod serde_helper;
pub mod transactions;
