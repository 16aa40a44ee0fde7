//! Review page fetching.

use crate::error::ViewError;
use crate::gateway::MentoringGateway;
use crate::types::{ProfileId, Review, ReviewPage, Session};

/// Fetch one page of reviews. `page` is 1-based; the gateway gets `page - 1`.
///
/// An empty page is a valid answer (possibly with `total_pages == 0`). A
/// gateway failure is `ViewError::ReviewFetch`.
pub async fn load_review_page(
    gateway: &dyn MentoringGateway,
    session: &Session,
    profile_no: ProfileId,
    page: u32,
    page_size: u32,
) -> Result<ReviewPage, ViewError> {
    let page_index = page.saturating_sub(1);
    let page_size = page_size.max(1);

    let envelope = gateway
        .list_reviews(profile_no, page_index, page_size, session.token())
        .await
        .map_err(|e| {
            log::warn!(
                "Profile {}: review page {} failed: {}",
                profile_no,
                page,
                e
            );
            ViewError::ReviewFetch(e.to_string())
        })?;

    let record = envelope.data.unwrap_or_default();
    let reviews: Vec<Review> = record.content.into_iter().map(Review::from).collect();
    log::debug!(
        "Profile {}: review page {} -> {} reviews of {} pages",
        profile_no,
        page,
        reviews.len(),
        record.total_pages
    );

    Ok(ReviewPage {
        reviews,
        total_pages: record.total_pages,
    })
}
