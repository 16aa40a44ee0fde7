//! Remote data gateway seam.
//!
//! The HTTP client that actually talks to the mentoring backend lives outside
//! this crate. Everything here is the contract it has to satisfy: the
//! response envelopes, the wire records (camelCase JSON, every field
//! optional), and the two async traits the view and admin layers call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::profile::career::parse_career_date;
use crate::types::{
    Board, CareerEntry, Category, CategoryNo, FollowRelationship, MemberNo, MentorProfile,
    ProfileId, Report, ReportStatus, Review,
};

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `{ "data": ... }` wrapper every read endpoint returns. `data` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn of(data: T) -> Self {
        Self { data: Some(data) }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }
}

/// `{ "success": bool, "message": ... }` returned by mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub mentor_profile_no: Option<ProfileId>,
    #[serde(default)]
    pub member_no: Option<MemberNo>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub mentor_image: Option<String>,
    #[serde(default)]
    pub mentor_headline: Option<String>,
    #[serde(default)]
    pub mentor_introduce: Option<String>,
    #[serde(default)]
    pub mentor_specialty: Option<String>,
    #[serde(default)]
    pub category_no: Option<CategoryNo>,
    #[serde(default)]
    pub mentor_mentoring_count: Option<u32>,
    #[serde(default)]
    pub mentor_activity_count: Option<u32>,
    #[serde(default)]
    pub mentor_rating: Option<f64>,
    #[serde(default)]
    pub mentor_follow_count: Option<u32>,
    #[serde(default)]
    pub mentor_career: Option<String>,
    #[serde(default)]
    pub careers: Vec<CareerRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecord {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub category_no: CategoryNo,
    #[serde(default)]
    pub category_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub review_no: i64,
    #[serde(default)]
    pub review_title: Option<String>,
    #[serde(default)]
    pub review_content: Option<String>,
    #[serde(default)]
    pub review_score: Option<f64>,
    #[serde(default)]
    pub mentee_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPageRecord {
    #[serde(default)]
    pub content: Vec<ReviewRecord>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    pub board_no: i64,
    #[serde(default)]
    pub board_title: Option<String>,
    #[serde(default)]
    pub board_content: Option<String>,
    #[serde(default)]
    pub board_view_count: Option<u32>,
    #[serde(default)]
    pub board_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPageRecord {
    #[serde(default)]
    pub content: Vec<BoardRecord>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub report_no: i64,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub report_reason: Option<String>,
    /// Free-form on the wire; unknown values (e.g. "RECEIVED") mean untriaged.
    #[serde(default)]
    pub report_status: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
}

/// Filter applied by `list_reports`. `None` lists every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
}

impl ReportFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(status: ReportStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn matches(&self, status: Option<ReportStatus>) -> bool {
        match self.status {
            None => true,
            Some(wanted) => status == Some(wanted),
        }
    }
}

// ---------------------------------------------------------------------------
// Record -> domain conversion
// ---------------------------------------------------------------------------

impl ProfileRecord {
    /// A record without a profile number is structurally empty and is
    /// treated as "not found" by the resolver.
    pub fn is_empty(&self) -> bool {
        self.mentor_profile_no.map_or(true, |no| no == 0)
    }

    pub fn into_profile(self) -> Option<MentorProfile> {
        if self.is_empty() {
            return None;
        }
        let profile_no = self.mentor_profile_no?;

        let careers = self
            .careers
            .into_iter()
            .filter_map(|c| c.into_entry(profile_no))
            .collect();

        Some(MentorProfile {
            profile_no,
            member_no: self.member_no,
            member_name: self.member_name.unwrap_or_default(),
            image_url: self.mentor_image.filter(|s| !s.is_empty()),
            headline: self.mentor_headline.filter(|s| !s.is_empty()),
            introduction: self.mentor_introduce.filter(|s| !s.is_empty()),
            specialty: self.mentor_specialty.filter(|s| !s.is_empty()),
            category_no: self.category_no,
            mentoring_count: self.mentor_mentoring_count.unwrap_or(0),
            activity_count: self.mentor_activity_count.unwrap_or(0),
            rating: self.mentor_rating.unwrap_or(0.0),
            follow_count: self.mentor_follow_count.unwrap_or(0),
            careers,
            career_text: self.mentor_career.filter(|s| !s.trim().is_empty()),
        })
    }
}

impl CareerRecord {
    fn into_entry(self, profile_no: ProfileId) -> Option<CareerEntry> {
        let start_date = match self.start_date.as_deref().and_then(parse_career_date) {
            Some(d) => d,
            None => {
                log::warn!(
                    "Profile {}: dropping career entry with unreadable start date {:?}",
                    profile_no,
                    self.start_date
                );
                return None;
            }
        };
        // An unreadable end date is treated as "still employed" rather than dropping the row.
        let end_date = self.end_date.as_deref().and_then(parse_career_date);

        Some(CareerEntry {
            company_name: self.company_name.unwrap_or_default(),
            job_title: self.job_title.unwrap_or_default(),
            start_date,
            end_date,
        })
    }
}

impl From<CategoryRecord> for Category {
    fn from(r: CategoryRecord) -> Self {
        Category {
            category_no: r.category_no,
            category_name: r.category_name,
        }
    }
}

impl From<ReviewRecord> for Review {
    fn from(r: ReviewRecord) -> Self {
        Review {
            review_no: r.review_no,
            title: r.review_title.unwrap_or_default(),
            content: r.review_content.unwrap_or_default(),
            score: r.review_score.unwrap_or(0.0),
            author_name: r.mentee_name.unwrap_or_default(),
        }
    }
}

impl From<BoardRecord> for Board {
    fn from(r: BoardRecord) -> Self {
        Board {
            board_no: r.board_no,
            title: r.board_title.unwrap_or_default(),
            content: r.board_content.unwrap_or_default(),
            view_count: r.board_view_count.unwrap_or(0),
            created_at: r.board_date,
        }
    }
}

impl From<ReportRecord> for Report {
    fn from(r: ReportRecord) -> Self {
        Report {
            report_no: r.report_no,
            reporter_name: r.member_name.unwrap_or_default(),
            reporter_id: r.member_id.unwrap_or_default(),
            reason: r.report_reason.unwrap_or_default(),
            status: r.report_status.as_deref().and_then(ReportStatus::from_str_lossy),
            created_at: r.report_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Failures a gateway implementation may report.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Not authorized")]
    Unauthorized,
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Everything the mentor profile screen reads or writes.
///
/// Page indices are 0-based here; callers translate from the 1-based pages
/// shown to the user.
#[async_trait]
pub trait MentoringGateway: Send + Sync {
    async fn get_profile(&self, profile_no: ProfileId)
        -> Result<Envelope<ProfileRecord>, GatewayError>;

    async fn list_categories(&self) -> Result<Envelope<Vec<CategoryRecord>>, GatewayError>;

    async fn list_reviews(
        &self,
        profile_no: ProfileId,
        page_index: u32,
        page_size: u32,
        token: Option<&str>,
    ) -> Result<Envelope<ReviewPageRecord>, GatewayError>;

    async fn list_boards(
        &self,
        profile_no: ProfileId,
        page_index: u32,
        page_size: u32,
    ) -> Result<Envelope<BoardPageRecord>, GatewayError>;

    async fn is_following(
        &self,
        token: &str,
        mentor_no: MemberNo,
    ) -> Result<Envelope<bool>, GatewayError>;

    async fn set_follow(
        &self,
        token: &str,
        relationship: &FollowRelationship,
    ) -> Result<Ack, GatewayError>;

    async fn create_chatting(
        &self,
        mentee_no: MemberNo,
        profile_no: ProfileId,
    ) -> Result<Ack, GatewayError>;
}

/// Admin moderation endpoints.
#[async_trait]
pub trait ReportGateway: Send + Sync {
    async fn list_reports(
        &self,
        filter: &ReportFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Envelope<Vec<ReportRecord>>, GatewayError>;

    async fn set_report_status(
        &self,
        report_no: i64,
        status: ReportStatus,
    ) -> Result<Ack, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_profile_record_parses_camel_case() {
        let json = r#"{
            "data": {
                "mentorProfileNo": 42,
                "memberNo": 9,
                "memberName": "김멘토",
                "mentorImage": "",
                "mentorIntroduce": "백엔드 개발자입니다",
                "categoryNo": 3,
                "mentorMentoringCount": 12,
                "mentorActivityCount": 16,
                "mentorRating": 4.5,
                "mentorCareer": "Grew 백엔드 3년",
                "careers": [
                    { "companyName": "Grew", "jobTitle": "Engineer", "startDate": "2020-01", "endDate": "2023-07-15" },
                    { "companyName": "Broken", "startDate": "soon" }
                ]
            }
        }"#;
        let envelope: Envelope<ProfileRecord> = serde_json::from_str(json).unwrap();
        let profile = envelope.data.unwrap().into_profile().unwrap();

        assert_eq!(profile.profile_no, 42);
        assert_eq!(profile.member_no, Some(9));
        assert_eq!(profile.member_name, "김멘토");
        assert_eq!(profile.image_url, None);
        assert_eq!(profile.introduction.as_deref(), Some("백엔드 개발자입니다"));
        assert_eq!(profile.mentoring_count, 12);
        assert_eq!(profile.follow_count, 0);
        assert_eq!(profile.careers.len(), 1);
        assert_eq!(profile.career_text.as_deref(), Some("Grew 백엔드 3년"));
        assert_eq!(
            profile.careers[0].end_date,
            NaiveDate::from_ymd_opt(2023, 7, 15)
        );
    }

    #[test]
    fn test_empty_profile_record_is_not_a_profile() {
        let envelope: Envelope<ProfileRecord> = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        let record = envelope.data.unwrap();
        assert!(record.is_empty());
        assert!(record.into_profile().is_none());

        let absent: Envelope<ProfileRecord> = serde_json::from_str("{}").unwrap();
        assert!(absent.data.is_none());
    }

    #[test]
    fn test_report_record_unknown_status_is_untriaged() {
        let record = ReportRecord {
            report_no: 1,
            report_status: Some("RECEIVED".into()),
            ..Default::default()
        };
        let report = Report::from(record);
        assert_eq!(report.status, None);
        assert!(ReportFilter::all().matches(report.status));
        assert!(!ReportFilter::with_status(ReportStatus::Resolved).matches(report.status));
    }
}
