// Library for tests to access modules

pub mod config;
pub mod device;
pub mod error;
pub mod exposition;
pub mod models;
pub mod routes;
pub mod self_metrics;
pub mod snapshot;
pub mod timeout;
pub mod version;
