//! Mentor profile screen and admin report queue for the Grew mentoring
//! platform.
//!
//! The HTTP client is external: it plugs in through the traits in
//! [`gateway`]. [`view::ProfileController`] aggregates profile, category,
//! review, board and follow data into one [`view::ProfileView`];
//! [`admin::ReportQueue`] drives moderation. [`devtools`] carries an
//! in-memory gateway used by tests and the `grew-preview` binary.

pub mod admin;
pub mod chatting;
pub mod config;
pub mod devtools;
pub mod error;
pub mod follow;
pub mod gateway;
pub mod pagination;
pub mod profile;
pub mod reviews;
pub mod types;
pub mod view;

pub use config::{load_config, GrewConfig};
pub use error::{ViewError, ViewErrorPayload};
pub use view::{ProfileController, ProfileView};
