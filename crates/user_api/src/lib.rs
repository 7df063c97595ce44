//! # user_api
//!
//! Client side of the user management REST API (`/api/users`).
//!
//! - [`client`]: one method per endpoint, HTTP Basic auth on every request and
//!   uniform error translation (server `message` or a localized fallback).
//! - [`console`]: the admin console's state machine (login, user table,
//!   create/edit and password dialogs, banners), independent of any renderer.
//!
//! The crate holds no session: credentials are passed into every call and only
//! live as long as the caller keeps them.

pub mod client;
pub mod console;
pub mod error;
pub mod model;

pub use client::{Credentials, UserApi, UserClient, DEFAULT_BASE_URL};
pub use error::{ApiError, Operation};
pub use model::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, User, UserId};
