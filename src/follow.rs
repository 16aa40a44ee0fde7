//! Follow relationship between the viewer and a mentor.
//!
//! Checking is best-effort: a failed check logs and leaves the previous
//! value alone. Toggling is a small state machine,
//! `Idle -> Pending -> Applied | Failed`, with the flag flipped optimistically
//! while pending and reverted when the request fails.

use serde::Serialize;

use crate::gateway::{GatewayError, MentoringGateway};
use crate::types::{FollowRelationship, MemberNo, Session};

pub const FOLLOW_FAILED: &str = "팔로우가 실패하였습니다";
pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";

#[derive(Debug, thiserror::Error)]
pub enum FollowError {
    #[error("Viewer is not signed in")]
    NotSignedIn,
    #[error("Follow request rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl FollowError {
    pub fn user_message(&self) -> String {
        match self {
            FollowError::NotSignedIn => LOGIN_REQUIRED.to_string(),
            FollowError::Rejected(msg) if !msg.is_empty() => msg.clone(),
            FollowError::Rejected(_) | FollowError::Gateway(_) => FOLLOW_FAILED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum FollowStatus {
    Idle,
    Pending,
    Applied,
    Failed(String),
}

/// Follow flag plus where the last toggle stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowState {
    pub following: bool,
    pub status: FollowStatus,
}

impl Default for FollowState {
    fn default() -> Self {
        Self {
            following: false,
            status: FollowStatus::Idle,
        }
    }
}

impl FollowState {
    pub fn is_pending(&self) -> bool {
        self.status == FollowStatus::Pending
    }

    /// Result of a follow check. Ignored while a toggle is in flight.
    pub fn observe(&mut self, following: bool) {
        if !self.is_pending() {
            self.following = following;
        }
    }

    /// Flip optimistically and return the requested value, or `None` when a
    /// toggle is already pending.
    pub fn begin_toggle(&mut self) -> Option<bool> {
        if self.is_pending() {
            return None;
        }
        self.following = !self.following;
        self.status = FollowStatus::Pending;
        Some(self.following)
    }

    pub fn apply(&mut self, following: bool) {
        self.following = following;
        self.status = FollowStatus::Applied;
    }

    /// Revert the optimistic flip.
    pub fn fail(&mut self, requested: bool, message: String) {
        self.following = !requested;
        self.status = FollowStatus::Failed(message);
    }
}

/// Whether the viewer follows `mentor_no`. `None` when unknown: anonymous
/// viewer, failed request, or a response without data.
pub async fn check_follow(
    gateway: &dyn MentoringGateway,
    session: &Session,
    mentor_no: MemberNo,
) -> Option<bool> {
    let token = session.token()?;
    match gateway.is_following(token, mentor_no).await {
        Ok(envelope) => envelope.data,
        Err(e) => {
            log::warn!("Follow check for mentor {} failed: {}", mentor_no, e);
            None
        }
    }
}

/// Send a follow/unfollow request. Returns the follow flag now in effect.
pub async fn toggle_follow(
    gateway: &dyn MentoringGateway,
    session: &Session,
    relationship: &FollowRelationship,
) -> Result<bool, FollowError> {
    let token = session.token().ok_or(FollowError::NotSignedIn)?;
    let ack = gateway.set_follow(token, relationship).await?;
    if ack.success {
        Ok(relationship.follow)
    } else {
        Err(FollowError::Rejected(ack.message.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devtools::{sample_fixture, Endpoint, FixtureGateway, MENTEE_TOKEN};

    #[test]
    fn test_state_machine_reverts_on_failure() {
        let mut state = FollowState::default();
        assert_eq!(state.begin_toggle(), Some(true));
        assert!(state.following);
        assert!(state.is_pending());

        // A second click while pending is ignored.
        assert_eq!(state.begin_toggle(), None);
        // So is a late follow check.
        state.observe(false);
        assert!(state.following);

        state.fail(true, FOLLOW_FAILED.into());
        assert!(!state.following);
        assert_eq!(state.status, FollowStatus::Failed(FOLLOW_FAILED.into()));

        assert_eq!(state.begin_toggle(), Some(true));
        state.apply(true);
        assert!(state.following);
        assert_eq!(state.status, FollowStatus::Applied);
    }

    #[tokio::test]
    async fn test_check_follow_anonymous_skips_gateway() {
        let gw = FixtureGateway::new(sample_fixture());
        assert_eq!(check_follow(&gw, &Session::anonymous(), 9).await, None);
        assert_eq!(gw.call_count(Endpoint::IsFollowing), 0);
    }

    #[tokio::test]
    async fn test_check_follow_failure_is_unknown() {
        let gw = FixtureGateway::new(sample_fixture());
        let session = Session::signed_in(100, MENTEE_TOKEN);
        assert_eq!(check_follow(&gw, &session, 9).await, Some(false));

        gw.fail(Endpoint::IsFollowing);
        assert_eq!(check_follow(&gw, &session, 9).await, None);
    }

    #[tokio::test]
    async fn test_toggle_round_trip_through_gateway() {
        let gw = FixtureGateway::new(sample_fixture());
        let session = Session::signed_in(100, MENTEE_TOKEN);
        let follow = FollowRelationship {
            follower_no: 100,
            mentor_no: 9,
            follow: true,
        };

        assert!(toggle_follow(&gw, &session, &follow).await.unwrap());
        assert_eq!(check_follow(&gw, &session, 9).await, Some(true));

        let unfollow = FollowRelationship {
            follow: false,
            ..follow
        };
        assert!(!toggle_follow(&gw, &session, &unfollow).await.unwrap());
        assert_eq!(check_follow(&gw, &session, 9).await, Some(false));
    }

    #[tokio::test]
    async fn test_toggle_errors() {
        let gw = FixtureGateway::new(sample_fixture());
        let follow = FollowRelationship {
            follower_no: 100,
            mentor_no: 9,
            follow: true,
        };

        let err = toggle_follow(&gw, &Session::anonymous(), &follow)
            .await
            .unwrap_err();
        assert!(matches!(err, FollowError::NotSignedIn));
        assert_eq!(err.user_message(), LOGIN_REQUIRED);

        gw.fail(Endpoint::SetFollow);
        let session = Session::signed_in(100, MENTEE_TOKEN);
        let err = toggle_follow(&gw, &session, &follow).await.unwrap_err();
        assert!(matches!(err, FollowError::Gateway(_)));
        assert_eq!(err.user_message(), FOLLOW_FAILED);
    }
}
