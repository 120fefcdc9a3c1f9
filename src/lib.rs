// Library for tests to access modules

pub mod array;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod routes;
pub mod snapshot;
pub mod sysinfo_repo;
