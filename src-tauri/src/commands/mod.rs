pub mod config;
pub mod draft;
pub mod portrait;
pub mod session;
