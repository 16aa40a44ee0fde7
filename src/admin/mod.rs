//! Admin moderation surface.

pub mod reports;

pub use reports::ReportQueue;
