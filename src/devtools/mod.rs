//! Dev tools: an in-memory gateway seeded from JSON fixtures.
//!
//! `FixtureGateway` implements both gateway traits over a `Fixture` and can
//! be told to fail, stall, or reject individual endpoints. It backs the unit
//! tests and the `grew-preview` binary; nothing here talks to a network.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::gateway::{
    Ack, BoardPageRecord, BoardRecord, CategoryRecord, Envelope, GatewayError,
    MentoringGateway, ProfileRecord, ReportFilter, ReportGateway, ReportRecord,
    ReviewPageRecord, ReviewRecord,
};
use crate::types::{FollowRelationship, MemberNo, ProfileId, ReportStatus};

// Fixture embedded at compile time
const SAMPLE_FIXTURE: &str = include_str!("fixtures/mentoring.json");

/// Token the sample fixture maps to mentee member 100.
pub const MENTEE_TOKEN: &str = "mentee-token";

/// Backend data the fixture gateway serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub reviews: HashMap<ProfileId, Vec<ReviewRecord>>,
    #[serde(default)]
    pub boards: HashMap<ProfileId, Vec<BoardRecord>>,
    #[serde(default)]
    pub follows: Vec<FollowRelationship>,
    /// Auth token -> member number.
    #[serde(default)]
    pub tokens: HashMap<String, MemberNo>,
    #[serde(default)]
    pub reports: Vec<ReportRecord>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read fixture {}: {}", path.display(), e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse fixture: {}", e))
    }
}

/// Two mentors (42 with 12 reviews, 7 with an unknown category), three
/// categories, two boards, one mentee token and three reports.
pub fn sample_fixture() -> Fixture {
    serde_json::from_str(SAMPLE_FIXTURE).unwrap_or_else(|e| {
        log::error!("Embedded sample fixture is invalid: {}", e);
        Fixture::default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Profile,
    Categories,
    Reviews,
    Boards,
    IsFollowing,
    SetFollow,
    Chatting,
    Reports,
    ReportStatus,
}

/// One recorded gateway call, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetProfile(ProfileId),
    ListCategories,
    ListReviews {
        profile_no: ProfileId,
        page_index: u32,
        page_size: u32,
    },
    ListBoards {
        profile_no: ProfileId,
        page_index: u32,
        page_size: u32,
    },
    IsFollowing(MemberNo),
    SetFollow(FollowRelationship),
    CreateChatting {
        mentee_no: MemberNo,
        profile_no: ProfileId,
    },
    ListReports {
        filter: ReportFilter,
        page_index: u32,
        page_size: u32,
    },
    SetReportStatus {
        report_no: i64,
        status: ReportStatus,
    },
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Call::GetProfile(_) => Endpoint::Profile,
            Call::ListCategories => Endpoint::Categories,
            Call::ListReviews { .. } => Endpoint::Reviews,
            Call::ListBoards { .. } => Endpoint::Boards,
            Call::IsFollowing(_) => Endpoint::IsFollowing,
            Call::SetFollow(_) => Endpoint::SetFollow,
            Call::CreateChatting { .. } => Endpoint::Chatting,
            Call::ListReports { .. } => Endpoint::Reports,
            Call::SetReportStatus { .. } => Endpoint::ReportStatus,
        }
    }
}

#[derive(Default)]
pub struct FixtureGateway {
    fixture: Mutex<Fixture>,
    failing: Mutex<HashSet<Endpoint>>,
    delays: Mutex<HashMap<Endpoint, Duration>>,
    review_page_delays: Mutex<HashMap<u32, Duration>>,
    chat_rejection: Mutex<Option<String>>,
    calls: Mutex<Vec<Call>>,
}

impl FixtureGateway {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Mutex::new(fixture),
            ..Self::default()
        }
    }

    pub fn fixture(&self) -> Fixture {
        self.fixture.lock().clone()
    }

    pub fn update_fixture(&self, mutator: impl FnOnce(&mut Fixture)) {
        mutator(&mut self.fixture.lock());
    }

    /// Make every call to `endpoint` fail with a transport error.
    pub fn fail(&self, endpoint: Endpoint) {
        self.failing.lock().insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.failing.lock().remove(&endpoint);
    }

    pub fn delay(&self, endpoint: Endpoint, delay: Duration) {
        self.delays.lock().insert(endpoint, delay);
    }

    /// Stall only the review page at 0-based `page_index`.
    pub fn delay_review_page(&self, page_index: u32, delay: Duration) {
        self.review_page_delays.lock().insert(page_index, delay);
    }

    /// Answer chat requests with `success: false` and this message.
    pub fn reject_chatting(&self, message: &str) {
        *self.chat_rejection.lock() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .count()
    }

    /// Record the call, apply any configured delay, then fail if the endpoint is down.
    async fn enter(&self, call: Call) -> Result<(), GatewayError> {
        let endpoint = call.endpoint();
        let page_index = match &call {
            Call::ListReviews { page_index, .. } => Some(*page_index),
            _ => None,
        };
        self.calls.lock().push(call);

        let delay = self.delays.lock().get(&endpoint).copied();
        let page_delay = page_index.and_then(|i| self.review_page_delays.lock().get(&i).copied());
        for pause in [delay, page_delay].into_iter().flatten() {
            tokio::time::sleep(pause).await;
        }

        let down = self.failing.lock().contains(&endpoint);
        if down {
            return Err(GatewayError::Transport(format!(
                "fixture endpoint {:?} is down",
                endpoint
            )));
        }
        Ok(())
    }

    fn member_for(&self, token: &str) -> Result<MemberNo, GatewayError> {
        self.fixture
            .lock()
            .tokens
            .get(token)
            .copied()
            .ok_or(GatewayError::Unauthorized)
    }
}

/// Slice `items` into the 0-based page and count the pages.
fn page_of<T: Clone>(items: &[T], page_index: u32, page_size: u32) -> (Vec<T>, u32) {
    let size = page_size.max(1) as usize;
    let total_pages = items.len().div_ceil(size) as u32;
    let content = items
        .iter()
        .skip(page_index as usize * size)
        .take(size)
        .cloned()
        .collect();
    (content, total_pages)
}

#[async_trait]
impl MentoringGateway for FixtureGateway {
    async fn get_profile(
        &self,
        profile_no: ProfileId,
    ) -> Result<Envelope<ProfileRecord>, GatewayError> {
        self.enter(Call::GetProfile(profile_no)).await?;
        let fixture = self.fixture.lock();
        Ok(Envelope {
            data: fixture
                .profiles
                .iter()
                .find(|p| p.mentor_profile_no == Some(profile_no))
                .cloned(),
        })
    }

    async fn list_categories(&self) -> Result<Envelope<Vec<CategoryRecord>>, GatewayError> {
        self.enter(Call::ListCategories).await?;
        Ok(Envelope::of(self.fixture.lock().categories.clone()))
    }

    async fn list_reviews(
        &self,
        profile_no: ProfileId,
        page_index: u32,
        page_size: u32,
        _token: Option<&str>,
    ) -> Result<Envelope<ReviewPageRecord>, GatewayError> {
        self.enter(Call::ListReviews {
            profile_no,
            page_index,
            page_size,
        })
        .await?;
        let fixture = self.fixture.lock();
        let all = fixture
            .reviews
            .get(&profile_no)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let (content, total_pages) = page_of(all, page_index, page_size);
        Ok(Envelope::of(ReviewPageRecord {
            content,
            total_pages,
        }))
    }

    async fn list_boards(
        &self,
        profile_no: ProfileId,
        page_index: u32,
        page_size: u32,
    ) -> Result<Envelope<BoardPageRecord>, GatewayError> {
        self.enter(Call::ListBoards {
            profile_no,
            page_index,
            page_size,
        })
        .await?;
        let fixture = self.fixture.lock();
        let all = fixture
            .boards
            .get(&profile_no)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let (content, total_pages) = page_of(all, page_index, page_size);
        Ok(Envelope::of(BoardPageRecord {
            content,
            total_pages,
        }))
    }

    async fn is_following(
        &self,
        token: &str,
        mentor_no: MemberNo,
    ) -> Result<Envelope<bool>, GatewayError> {
        self.enter(Call::IsFollowing(mentor_no)).await?;
        let member = self.member_for(token)?;
        let following = self
            .fixture
            .lock()
            .follows
            .iter()
            .any(|f| f.follower_no == member && f.mentor_no == mentor_no && f.follow);
        Ok(Envelope::of(following))
    }

    async fn set_follow(
        &self,
        token: &str,
        relationship: &FollowRelationship,
    ) -> Result<Ack, GatewayError> {
        self.enter(Call::SetFollow(relationship.clone())).await?;
        let member = self.member_for(token)?;
        if member != relationship.follower_no {
            return Ok(Ack::rejected("follower does not match token"));
        }

        let mut fixture = self.fixture.lock();
        fixture
            .follows
            .retain(|f| !(f.follower_no == member && f.mentor_no == relationship.mentor_no));
        if relationship.follow {
            fixture.follows.push(relationship.clone());
        }
        Ok(Ack::ok())
    }

    async fn create_chatting(
        &self,
        mentee_no: MemberNo,
        profile_no: ProfileId,
    ) -> Result<Ack, GatewayError> {
        self.enter(Call::CreateChatting {
            mentee_no,
            profile_no,
        })
        .await?;
        let rejection = self.chat_rejection.lock().clone();
        Ok(match rejection {
            Some(message) => Ack::rejected(message),
            None => Ack::ok(),
        })
    }
}

#[async_trait]
impl ReportGateway for FixtureGateway {
    async fn list_reports(
        &self,
        filter: &ReportFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Envelope<Vec<ReportRecord>>, GatewayError> {
        self.enter(Call::ListReports {
            filter: filter.clone(),
            page_index,
            page_size,
        })
        .await?;
        let fixture = self.fixture.lock();
        let matching: Vec<ReportRecord> = fixture
            .reports
            .iter()
            .filter(|r| {
                filter.matches(
                    r.report_status
                        .as_deref()
                        .and_then(ReportStatus::from_str_lossy),
                )
            })
            .cloned()
            .collect();
        let (content, _) = page_of(&matching, page_index, page_size);
        Ok(Envelope::of(content))
    }

    async fn set_report_status(
        &self,
        report_no: i64,
        status: ReportStatus,
    ) -> Result<Ack, GatewayError> {
        self.enter(Call::SetReportStatus { report_no, status }).await?;
        let mut fixture = self.fixture.lock();
        match fixture.reports.iter_mut().find(|r| r.report_no == report_no) {
            Some(report) => {
                report.report_status = Some(status.as_str().to_string());
                Ok(Ack::ok())
            }
            None => Ok(Ack::rejected(format!("Unknown report {}", report_no))),
        }
    }
}

/// Apply a named scenario to a gateway. Used by the preview binary.
pub fn apply_scenario(scenario: &str, gateway: &FixtureGateway) -> Result<String, String> {
    match scenario {
        "mock_full" => Ok("Sample data served as-is".into()),
        "mock_empty" => {
            gateway.update_fixture(|f| *f = Fixture::default());
            Ok("Every endpoint answers with empty data".into())
        }
        "profile_down" => {
            gateway.fail(Endpoint::Profile);
            Ok("Profile endpoint fails".into())
        }
        "reviews_down" => {
            gateway.fail(Endpoint::Reviews);
            Ok("Review endpoint fails".into())
        }
        "degraded" => {
            gateway.fail(Endpoint::Categories);
            gateway.fail(Endpoint::Boards);
            gateway.fail(Endpoint::IsFollowing);
            Ok("Category, board and follow endpoints fail".into())
        }
        _ => Err(format!("Unknown scenario: {}", scenario)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_fixture_parses() {
        let fixture: Fixture = serde_json::from_str(SAMPLE_FIXTURE).unwrap();
        assert_eq!(fixture.profiles.len(), 2);
        assert_eq!(fixture.reviews[&42].len(), 12);
        assert_eq!(fixture.boards[&42].len(), 2);
        assert_eq!(fixture.tokens[MENTEE_TOKEN], 100);
        assert_eq!(fixture.reports.len(), 3);
    }

    #[test]
    fn test_page_of_counts_partial_last_page() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(page_of(&items, 0, 5), (vec![1, 2, 3, 4, 5], 3));
        assert_eq!(page_of(&items, 2, 5), (vec![11, 12], 3));
        assert_eq!(page_of(&items, 9, 5), (vec![], 3));
        assert_eq!(page_of::<u32>(&[], 0, 5), (vec![], 0));
    }

    #[test]
    fn test_fixture_load_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("fixture.json");
        fs::write(&path, r#"{ "categories": [{ "categoryNo": 1, "categoryName": "x" }] }"#)
            .unwrap();

        let fixture = Fixture::load(&path).unwrap();
        assert_eq!(fixture.categories.len(), 1);
        assert!(fixture.profiles.is_empty());
        assert!(Fixture::load(&temp.path().join("missing.json")).is_err());
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let gw = FixtureGateway::new(sample_fixture());
        let err = gw.is_following("nope", 9).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized));
    }

    #[tokio::test]
    async fn test_scenarios() {
        let gw = FixtureGateway::new(sample_fixture());
        apply_scenario("reviews_down", &gw).unwrap();
        assert!(gw.list_reviews(42, 0, 5, None).await.is_err());
        assert!(apply_scenario("nonsense", &gw).is_err());

        apply_scenario("mock_empty", &gw).unwrap();
        assert!(gw.get_profile(42).await.unwrap().data.is_none());
    }
}
