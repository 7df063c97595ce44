//! Shared frontend utilities: runtime configuration and build metadata.
//! Configuration values are public; credentials never pass through here.

pub(crate) mod build_info;
pub(crate) mod config;

pub(crate) use config::AppConfig;
