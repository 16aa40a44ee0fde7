//! Error types for the profile view and admin queue
//!
//! Errors are classified by how the screen reacts:
//! - NotFound / Transport: profile fetch failed, redirect to the listing
//! - ReviewFetch: review page failed, same reaction as a profile failure
//! - ReportFetch / ReportUpdate / Rejected: admin queue failures; shown as a
//!   message on the queue, never a redirect
//!
//! Non-fatal failures (category lookup, follow check, boards) never become a
//! `ViewError`; they are logged and replaced with a default where they occur.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::types::ProfileId;

pub const PROFILE_LOAD_FAILED: &str = "멘토 프로필을 가져오는 중 오류가 발생했습니다.";
pub const REVIEW_LOAD_FAILED: &str = "리뷰 목록을 가져오는 중 오류가 발생했습니다.";
pub const REPORT_LOAD_FAILED: &str = "신고 내역을 가져오는 중 오류가 발생했습니다.";
pub const REPORT_UPDATE_FAILED: &str = "신고 상태를 변경하는 중 오류가 발생했습니다.";
pub const REPORT_UPDATE_REJECTED: &str = "신고 상태 변경이 거부되었습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Mentor profile {0} not found")]
    NotFound(ProfileId),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Review fetch failed: {0}")]
    ReviewFetch(String),

    #[error("Report fetch failed: {0}")]
    ReportFetch(String),

    #[error("Report status update failed: {0}")]
    ReportUpdate(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl ViewError {
    /// Fatal errors replace the whole view with an error paragraph and a redirect.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ViewError::NotFound(_) | ViewError::Transport(_) | ViewError::ReviewFetch(_)
        )
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            ViewError::NotFound(_) => ErrorType::NotFound,
            ViewError::Transport(_)
            | ViewError::ReviewFetch(_)
            | ViewError::ReportFetch(_)
            | ViewError::ReportUpdate(_) => ErrorType::TransportFailure,
            ViewError::Rejected(_) => ErrorType::Rejected,
        }
    }

    /// Where a fatal error sends the viewer; `None` for non-fatal errors.
    pub fn redirect_target(&self, listing_route: &str) -> Option<String> {
        self.is_fatal().then(|| listing_route.to_string())
    }

    /// The single line shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ViewError::NotFound(_) | ViewError::Transport(_) => PROFILE_LOAD_FAILED,
            ViewError::ReviewFetch(_) => REVIEW_LOAD_FAILED,
            ViewError::ReportFetch(_) => REPORT_LOAD_FAILED,
            ViewError::ReportUpdate(_) => REPORT_UPDATE_FAILED,
            ViewError::Rejected(_) => REPORT_UPDATE_REJECTED,
        }
    }
}

impl From<GatewayError> for ViewError {
    fn from(err: GatewayError) -> Self {
        ViewError::Transport(err.to_string())
    }
}

/// Serializable error representation handed to presentation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewErrorPayload {
    pub message: String,
    pub error_type: ErrorType,
    pub detail: String,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorType {
    NotFound,
    TransportFailure,
    Rejected,
}

impl ViewErrorPayload {
    pub fn new(err: &ViewError, listing_route: &str) -> Self {
        ViewErrorPayload {
            message: err.user_message().to_string(),
            error_type: err.error_type(),
            detail: err.to_string(),
            redirect_to: err.redirect_target(listing_route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors_carry_redirect() {
        let payload = ViewErrorPayload::new(&ViewError::NotFound(42), "/mentor-profile");
        assert_eq!(payload.message, PROFILE_LOAD_FAILED);
        assert_eq!(payload.error_type, ErrorType::NotFound);
        assert_eq!(payload.redirect_to.as_deref(), Some("/mentor-profile"));

        let payload = ViewErrorPayload::new(&ViewError::ReviewFetch("503".into()), "/list");
        assert_eq!(payload.message, REVIEW_LOAD_FAILED);
        assert_eq!(payload.redirect_to.as_deref(), Some("/list"));
    }

    #[test]
    fn test_rejection_is_not_fatal() {
        let err = ViewError::Rejected("already resolved".into());
        assert!(!err.is_fatal());
        assert!(ViewErrorPayload::new(&err, "/list").redirect_to.is_none());
        assert_eq!(err.redirect_target("/list"), None);
    }

    #[test]
    fn test_admin_failures_have_their_own_messages() {
        let load = ViewError::ReportFetch("timeout".into());
        assert_eq!(load.user_message(), REPORT_LOAD_FAILED);
        assert_eq!(load.error_type(), ErrorType::TransportFailure);
        assert_eq!(load.redirect_target("/mentor-profile"), None);

        let update = ViewError::ReportUpdate("timeout".into());
        assert_eq!(update.user_message(), REPORT_UPDATE_FAILED);
        assert!(!update.is_fatal());

        let rejected = ViewError::Rejected(String::new());
        assert_eq!(rejected.user_message(), REPORT_UPDATE_REJECTED);
    }

    #[test]
    fn test_gateway_error_maps_to_transport() {
        let err: ViewError = GatewayError::Status {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(err.error_type(), ErrorType::TransportFailure);
        assert!(err.to_string().contains("500"));
    }
}
