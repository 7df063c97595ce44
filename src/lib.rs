//! # usermgmt
//!
//! Operator tooling for the user management REST API (`/api/users`).
//!
//! - `usermgmt <command>` runs a single API operation from the terminal with
//!   HTTP Basic credentials taken from flags or the environment.
//! - `usermgmt serve` hosts the compiled web console (`apps/web`) and hands it
//!   the API base URL through `/config.js`.
//!
//! Credentials are never persisted. Every invocation sends them with its one
//! request and drops them on exit.

pub mod cli;
pub mod usermgmt;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
