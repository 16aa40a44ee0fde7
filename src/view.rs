//! Mentor profile view controller.
//!
//! Owns the view state for one profile screen and drives every fetch that
//! feeds it. The controller is cheap to clone; clones share state, so the
//! profile, board, review and follow fetches can run as concurrent futures
//! on one task. The state lock is never held across an `.await`.
//!
//! Stale completions are dropped by generation: every mount bumps the mount
//! generation, every review trigger bumps the review generation, and a
//! completion is applied only if both stamps it carries are still current.
//! Follow checks carry a third stamp that every later check or toggle
//! invalidates.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::Serialize;

use crate::chatting::{self, ChatOutcome};
use crate::config::GrewConfig;
use crate::error::{ViewError, ViewErrorPayload};
use crate::follow::{self, FollowState, FollowStatus, FOLLOW_FAILED, LOGIN_REQUIRED};
use crate::gateway::MentoringGateway;
use crate::pagination::{PageWindow, PaginationState};
use crate::profile::{resolver, ProfileCard};
use crate::reviews;
use crate::types::{
    Board, FollowRelationship, MemberNo, MentorProfile, ProfileId, Review, Session,
};

/// Profile slot: not fetched yet, fetched but empty, or loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "profile", rename_all = "camelCase")]
pub enum ProfileSlot {
    NotLoaded,
    Missing,
    Loaded(MentorProfile),
}

impl ProfileSlot {
    pub fn as_loaded(&self) -> Option<&MentorProfile> {
        match self {
            ProfileSlot::Loaded(profile) => Some(profile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewPhase {
    Loading,
    Ready,
    Error,
}

/// Read-only snapshot handed to presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub profile: ProfileSlot,
    pub category_name: String,
    pub reviews: Vec<Review>,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub page_window: PageWindow,
    pub boards: Vec<Board>,
    pub is_following: bool,
    pub follow_status: FollowStatus,
    pub loading: bool,
    pub error: Option<ViewErrorPayload>,
    /// Set together with `error` for fatal failures.
    pub redirect: Option<String>,
    pub selected_review: Option<Review>,
    /// One-line side-channel message (follow and mentoring request results).
    pub notice: Option<String>,
}

impl ProfileView {
    /// Rendering is all-or-nothing: error paragraph, loading indicator, or the view.
    pub fn phase(&self) -> ViewPhase {
        if self.error.is_some() {
            ViewPhase::Error
        } else if self.loading || self.profile.as_loaded().is_none() {
            ViewPhase::Loading
        } else {
            ViewPhase::Ready
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReviewTicket {
    mount: u64,
    review: u64,
    profile_no: ProfileId,
    page: u32,
    page_size: u32,
}

struct ViewInner {
    profile_no: Option<ProfileId>,
    profile: ProfileSlot,
    category_name: String,
    pagination: PaginationState,
    reviews: Vec<Review>,
    boards: Vec<Board>,
    follow: FollowState,
    profile_pending: bool,
    review_pending: bool,
    error: Option<ViewError>,
    selected_review: Option<i64>,
    notice: Option<String>,
    mount_generation: u64,
    review_generation: u64,
    /// Bumped by every follow check and toggle; a check applies only if it is still the latest.
    follow_generation: u64,
}

impl ViewInner {
    fn new(page_size: u32, category_label: &str) -> Self {
        Self {
            profile_no: None,
            profile: ProfileSlot::NotLoaded,
            category_name: category_label.to_string(),
            pagination: PaginationState::new(page_size),
            reviews: Vec::new(),
            boards: Vec::new(),
            follow: FollowState::default(),
            profile_pending: false,
            review_pending: false,
            error: None,
            selected_review: None,
            notice: None,
            mount_generation: 0,
            review_generation: 0,
            follow_generation: 0,
        }
    }

    /// Discard everything shown and start over for `profile_no`. Page size survives.
    fn remount(&mut self, profile_no: ProfileId, category_label: &str) -> (u64, ReviewTicket) {
        let mount = self.mount_generation + 1;
        let review = self.review_generation;
        let follow = self.follow_generation;
        *self = ViewInner::new(self.pagination.page_size, category_label);
        self.mount_generation = mount;
        self.review_generation = review;
        self.follow_generation = follow;
        self.profile_no = Some(profile_no);
        self.profile_pending = true;
        let ticket = self.next_review_ticket(profile_no);
        (mount, ticket)
    }

    fn next_review_ticket(&mut self, profile_no: ProfileId) -> ReviewTicket {
        self.review_generation += 1;
        self.review_pending = true;
        ReviewTicket {
            mount: self.mount_generation,
            review: self.review_generation,
            profile_no,
            page: self.pagination.current_page,
            page_size: self.pagination.page_size,
        }
    }

    /// First fatal error wins; later ones are only logged.
    fn fail(&mut self, err: ViewError) {
        if self.error.is_none() {
            self.error = Some(err);
        } else {
            log::debug!("View already failed, dropping later error: {}", err);
        }
    }
}

#[derive(Clone)]
pub struct ProfileController {
    gateway: Arc<dyn MentoringGateway>,
    session: Session,
    config: Arc<GrewConfig>,
    inner: Arc<Mutex<ViewInner>>,
}

impl ProfileController {
    pub fn new(gateway: Arc<dyn MentoringGateway>, session: Session, config: GrewConfig) -> Self {
        let inner = ViewInner::new(config.review_page_size, &config.category_fallback);
        Self {
            gateway,
            session,
            config: Arc::new(config),
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> ProfileView {
        let inner = self.inner.lock();
        let listing_route = &self.config.listing_route;
        ProfileView {
            profile: inner.profile.clone(),
            category_name: inner.category_name.clone(),
            reviews: inner.reviews.clone(),
            total_pages: inner.pagination.total_pages,
            current_page: inner.pagination.current_page,
            page_size: inner.pagination.page_size,
            page_window: inner.pagination.window(self.config.pages_to_show),
            boards: inner.boards.clone(),
            is_following: inner.follow.following,
            follow_status: inner.follow.status.clone(),
            loading: inner.profile_pending || inner.review_pending,
            error: inner
                .error
                .as_ref()
                .map(|e| ViewErrorPayload::new(e, listing_route)),
            redirect: inner
                .error
                .as_ref()
                .and_then(|e| e.redirect_target(listing_route)),
            selected_review: inner
                .selected_review
                .and_then(|no| inner.reviews.iter().find(|r| r.review_no == no).cloned()),
            notice: inner.notice.clone(),
        }
    }

    /// Display card for the loaded profile, if any.
    pub fn card(&self, today: NaiveDate) -> Option<ProfileCard> {
        let inner = self.inner.lock();
        inner
            .profile
            .as_loaded()
            .map(|p| ProfileCard::from_profile(p, &inner.category_name, today))
    }

    /// Load everything for `profile_no`, discarding whatever was shown before.
    ///
    /// Profile, boards and the first review page are fetched concurrently.
    /// Category resolution and the follow check start once the profile is in.
    pub async fn mount(&self, profile_no: ProfileId) {
        let (mount, ticket) = self
            .inner
            .lock()
            .remount(profile_no, &self.config.category_fallback);
        log::info!("Mounting mentor profile {} (generation {})", profile_no, mount);

        tokio::join!(
            self.load_profile(mount, profile_no),
            self.load_boards(mount, profile_no),
            self.run_review_fetch(ticket),
        );
    }

    /// Go to a 1-based review page. Re-requesting the current page refetches it.
    pub async fn paginate(&self, page: u32) {
        if let Some(ticket) = self.begin_review_fetch(|p| p.go_to(page)) {
            self.run_review_fetch(ticket).await;
        }
    }

    /// Change the review page size; numbering restarts at page 1.
    pub async fn set_page_size(&self, page_size: u32) {
        if let Some(ticket) = self.begin_review_fetch(|p| p.resize(page_size)) {
            self.run_review_fetch(ticket).await;
        }
    }

    /// Flip the follow relationship. Returns the follow flag after the attempt.
    pub async fn toggle_follow(&self) -> bool {
        let (mount, relationship) = {
            let mut inner = self.inner.lock();
            let mentor_no = inner.profile.as_loaded().and_then(|p| p.member_no);

            let Some(follower_no) = self.session.member_no.filter(|_| self.session.is_signed_in())
            else {
                inner.notice = Some(LOGIN_REQUIRED.to_string());
                return inner.follow.following;
            };
            let Some(mentor_no) = mentor_no else {
                log::warn!("Follow toggle without a loaded mentor profile");
                inner.notice = Some(FOLLOW_FAILED.to_string());
                return inner.follow.following;
            };
            let Some(follow) = inner.follow.begin_toggle() else {
                return inner.follow.following;
            };
            // Checks already in flight predate this toggle.
            inner.follow_generation += 1;
            (
                inner.mount_generation,
                FollowRelationship {
                    follower_no,
                    mentor_no,
                    follow,
                },
            )
        };

        let result =
            follow::toggle_follow(self.gateway.as_ref(), &self.session, &relationship).await;

        let mut inner = self.inner.lock();
        if inner.mount_generation != mount {
            return inner.follow.following;
        }
        // Checks sent while the toggle was in flight may have read the old state.
        inner.follow_generation += 1;
        match result {
            Ok(following) => {
                log::info!(
                    "Follow for mentor {} is now {}",
                    relationship.mentor_no,
                    following
                );
                inner.follow.apply(following);
            }
            Err(e) => {
                log::warn!(
                    "Follow toggle for mentor {} failed: {}",
                    relationship.mentor_no,
                    e
                );
                let message = e.user_message();
                inner.follow.fail(relationship.follow, message.clone());
                inner.notice = Some(message);
            }
        }
        inner.follow.following
    }

    /// Re-query the follow flag for the mounted mentor.
    pub async fn refresh_follow(&self) {
        let (mount, mentor_no) = {
            let inner = self.inner.lock();
            (
                inner.mount_generation,
                inner.profile.as_loaded().and_then(|p| p.member_no),
            )
        };
        self.check_follow(mount, mentor_no).await;
    }

    /// Select a review on the current page. Unknown ids clear the selection.
    pub fn select_review(&self, review_no: i64) -> Option<Review> {
        let mut inner = self.inner.lock();
        let found = inner
            .reviews
            .iter()
            .find(|r| r.review_no == review_no)
            .cloned();
        inner.selected_review = found.as_ref().map(|r| r.review_no);
        found
    }

    /// Ask to open a mentoring chat with the mounted mentor.
    pub async fn request_mentoring(&self) -> ChatOutcome {
        let profile_no = self
            .inner
            .lock()
            .profile
            .as_loaded()
            .map(|p| p.profile_no);

        let outcome =
            chatting::request_chat(self.gateway.as_ref(), &self.session, profile_no).await;
        self.inner.lock().notice = Some(outcome.message());
        outcome
    }

    pub fn dismiss_notice(&self) {
        self.inner.lock().notice = None;
    }

    // -----------------------------------------------------------------------
    // Fetch plumbing
    // -----------------------------------------------------------------------

    async fn load_profile(&self, mount: u64, profile_no: ProfileId) {
        let result = resolver::load_profile(self.gateway.as_ref(), profile_no).await;

        let profile = {
            let mut inner = self.inner.lock();
            if inner.mount_generation != mount {
                log::debug!("Discarding superseded profile {}", profile_no);
                return;
            }
            inner.profile_pending = false;
            match result {
                Ok(profile) => {
                    inner.profile = ProfileSlot::Loaded(profile.clone());
                    profile
                }
                Err(e) => {
                    if matches!(e, ViewError::NotFound(_)) {
                        inner.profile = ProfileSlot::Missing;
                    }
                    inner.fail(e);
                    return;
                }
            }
        };

        tokio::join!(
            self.load_category(mount, &profile),
            self.check_follow(mount, profile.member_no),
        );
    }

    async fn load_category(&self, mount: u64, profile: &MentorProfile) {
        let name =
            resolver::category_label(self.gateway.as_ref(), profile, &self.config.category_fallback)
                .await;
        let mut inner = self.inner.lock();
        if inner.mount_generation == mount {
            inner.category_name = name;
        }
    }

    async fn check_follow(&self, mount: u64, mentor_no: Option<MemberNo>) {
        let Some(mentor_no) = mentor_no else {
            return;
        };
        let stamp = {
            let mut inner = self.inner.lock();
            if inner.mount_generation != mount {
                return;
            }
            inner.follow_generation += 1;
            inner.follow_generation
        };

        let Some(following) =
            follow::check_follow(self.gateway.as_ref(), &self.session, mentor_no).await
        else {
            return;
        };
        let mut inner = self.inner.lock();
        if inner.mount_generation != mount || inner.follow_generation != stamp {
            log::debug!("Discarding superseded follow check for mentor {}", mentor_no);
            return;
        }
        inner.follow.observe(following);
    }

    async fn load_boards(&self, mount: u64, profile_no: ProfileId) {
        let result = self
            .gateway
            .list_boards(profile_no, 0, self.config.board_page_size)
            .await;

        let mut inner = self.inner.lock();
        if inner.mount_generation != mount {
            return;
        }
        match result {
            Ok(envelope) => {
                inner.boards = envelope
                    .data
                    .map(|page| page.content.into_iter().map(Board::from).collect())
                    .unwrap_or_default();
            }
            Err(e) => log::warn!("Profile {}: boards unavailable: {}", profile_no, e),
        }
    }

    fn begin_review_fetch(
        &self,
        update: impl FnOnce(&mut PaginationState),
    ) -> Option<ReviewTicket> {
        let mut inner = self.inner.lock();
        let profile_no = inner.profile_no?;
        if inner.error.is_some() {
            log::debug!("Ignoring pagination on a failed view");
            return None;
        }
        update(&mut inner.pagination);
        Some(inner.next_review_ticket(profile_no))
    }

    async fn run_review_fetch(&self, ticket: ReviewTicket) {
        let result = reviews::load_review_page(
            self.gateway.as_ref(),
            &self.session,
            ticket.profile_no,
            ticket.page,
            ticket.page_size,
        )
        .await;

        let mut inner = self.inner.lock();
        if inner.mount_generation != ticket.mount || inner.review_generation != ticket.review {
            log::debug!(
                "Discarding superseded review page {} (generation {})",
                ticket.page,
                ticket.review
            );
            return;
        }
        inner.review_pending = false;
        match result {
            Ok(page) => {
                inner.pagination.total_pages = page.total_pages;
                inner.reviews = page.reviews;
                if let Some(selected) = inner.selected_review {
                    if !inner.reviews.iter().any(|r| r.review_no == selected) {
                        inner.selected_review = None;
                    }
                }
            }
            Err(e) => inner.fail(e),
        }
    }
}
