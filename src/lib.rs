pub mod api_connection;
pub mod cli;
pub mod config;
pub mod diet;
pub mod export;
pub mod i18n;
pub mod metrics;
pub mod planner;
pub mod profile;
pub mod reference;
pub mod render;
pub mod session;
pub mod store;
pub mod tracking;
