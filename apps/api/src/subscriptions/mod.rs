pub mod handlers;
pub mod metrics;
pub mod plans;
pub mod service;
pub mod store;
