//! Domain types shared by the profile view, the follow tracker and the
//! admin report queue.
//!
//! These are the shapes the view layer hands to presentation. Wire records
//! (what the gateway returns) live in `gateway.rs` and are converted here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ProfileId = i64;
pub type MemberNo = i64;
pub type CategoryNo = i64;

/// Viewer identity passed explicitly into every call that needs it.
///
/// An anonymous session has neither a member number nor a token; the view
/// still renders, but follow and mentoring requests are refused locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub member_no: Option<MemberNo>,
    pub token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(member_no: MemberNo, token: impl Into<String>) -> Self {
        Self {
            member_no: Some(member_no),
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.member_no.is_some() && self.token().is_some()
    }
}

/// A mentor's public profile. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub profile_no: ProfileId,
    /// Member that owns the profile; this is the follow target.
    pub member_no: Option<MemberNo>,
    pub member_name: String,
    pub image_url: Option<String>,
    pub headline: Option<String>,
    pub introduction: Option<String>,
    pub specialty: Option<String>,
    pub category_no: Option<CategoryNo>,
    pub mentoring_count: u32,
    pub activity_count: u32,
    pub rating: f64,
    pub follow_count: u32,
    pub careers: Vec<CareerEntry>,
    /// Free-text career summary, for profiles without structured entries.
    pub career_text: Option<String>,
}

impl MentorProfile {
    /// Category id worth resolving. Zero is how the backend spells "unset".
    pub fn category_to_resolve(&self) -> Option<CategoryNo> {
        self.category_no.filter(|no| *no != 0)
    }
}

/// One line of career history. `end_date == None` means currently employed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerEntry {
    pub company_name: String,
    pub job_title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl CareerEntry {
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_no: CategoryNo,
    pub category_name: String,
}

/// Mentee-authored review. Score is expected in 0..=5 but never validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_no: i64,
    pub title: String,
    pub content: String,
    pub score: f64,
    pub author_name: String,
}

/// Mentor-authored post shown under the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub board_no: i64,
    pub title: String,
    pub content: String,
    pub view_count: u32,
    pub created_at: Option<String>,
}

/// One page of reviews plus the total the source reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total_pages: u32,
}

/// Follow request body: `follow == true` subscribes, `false` unsubscribes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRelationship {
    pub follower_no: MemberNo,
    pub mentor_no: MemberNo,
    #[serde(default = "default_follow")]
    pub follow: bool,
}

fn default_follow() -> bool {
    true
}

/// Moderation state a report can be moved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    InProgress,
    Resolved,
    FalseReport,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::InProgress => "IN_PROGRESS",
            ReportStatus::Resolved => "RESOLVED",
            ReportStatus::FalseReport => "FALSE_REPORT",
        }
    }

    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN_PROGRESS" => Some(ReportStatus::InProgress),
            "RESOLVED" => Some(ReportStatus::Resolved),
            "FALSE_REPORT" => Some(ReportStatus::FalseReport),
            _ => None,
        }
    }
}

/// A report in the admin queue. `status == None` means not yet triaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_no: i64,
    pub reporter_name: String,
    pub reporter_id: String,
    pub reason: String,
    pub status: Option<ReportStatus>,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_requires_member_and_token() {
        assert!(!Session::anonymous().is_signed_in());
        assert!(Session::signed_in(7, "tok").is_signed_in());

        let blank_token = Session {
            member_no: Some(7),
            token: Some(String::new()),
        };
        assert!(!blank_token.is_signed_in());
        assert_eq!(blank_token.token(), None);
    }

    #[test]
    fn test_report_status_wire_names() {
        let json = serde_json::to_string(&ReportStatus::FalseReport).unwrap();
        assert_eq!(json, "\"FALSE_REPORT\"");
        assert_eq!(
            ReportStatus::from_str_lossy(" in_progress "),
            Some(ReportStatus::InProgress)
        );
        assert_eq!(ReportStatus::from_str_lossy("PENDING"), None);
    }

    #[test]
    fn test_zero_category_is_not_resolved() {
        let mut profile = MentorProfile {
            profile_no: 1,
            member_no: None,
            member_name: "kim".into(),
            image_url: None,
            headline: None,
            introduction: None,
            specialty: None,
            category_no: Some(0),
            mentoring_count: 0,
            activity_count: 0,
            rating: 0.0,
            follow_count: 0,
            careers: vec![],
            career_text: None,
        };
        assert_eq!(profile.category_to_resolve(), None);
        profile.category_no = Some(3);
        assert_eq!(profile.category_to_resolve(), Some(3));
    }
}
