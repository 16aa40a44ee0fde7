//! Profile and category resolution.
//!
//! A missing or empty profile is a hard failure; a category that cannot be
//! resolved is not, and falls back to a fixed label.

use crate::error::ViewError;
use crate::gateway::MentoringGateway;
use crate::types::{Category, CategoryNo, MentorProfile, ProfileId};

/// Fetch one mentor profile.
///
/// An absent payload and a structurally empty record both come back as
/// `ViewError::NotFound`; gateway failures as `ViewError::Transport`.
pub async fn load_profile(
    gateway: &dyn MentoringGateway,
    profile_no: ProfileId,
) -> Result<MentorProfile, ViewError> {
    let envelope = gateway.get_profile(profile_no).await.map_err(|e| {
        log::warn!("Profile {}: fetch failed: {}", profile_no, e);
        ViewError::from(e)
    })?;

    match envelope.data.and_then(|record| record.into_profile()) {
        Some(profile) => {
            log::debug!(
                "Profile {}: loaded {} ({} career entries)",
                profile_no,
                profile.member_name,
                profile.careers.len()
            );
            Ok(profile)
        }
        None => {
            log::warn!("Profile {}: empty or missing record", profile_no);
            Err(ViewError::NotFound(profile_no))
        }
    }
}

/// Resolve a category id to its display name by scanning the full listing.
///
/// Never fails: no match, or a failed listing call, yields `fallback`.
pub async fn resolve_category(
    gateway: &dyn MentoringGateway,
    category_no: CategoryNo,
    fallback: &str,
) -> String {
    let categories: Vec<Category> = match gateway.list_categories().await {
        Ok(envelope) => envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Category::from)
            .collect(),
        Err(e) => {
            log::warn!("Category {}: listing failed: {}", category_no, e);
            return fallback.to_string();
        }
    };

    match categories.into_iter().find(|c| c.category_no == category_no) {
        Some(category) => category.category_name,
        None => {
            log::info!("Category {}: no match in listing", category_no);
            fallback.to_string()
        }
    }
}

/// Category label for a loaded profile: only profiles carrying a non-zero
/// category id hit the gateway.
pub async fn category_label(
    gateway: &dyn MentoringGateway,
    profile: &MentorProfile,
    fallback: &str,
) -> String {
    match profile.category_to_resolve() {
        Some(category_no) => resolve_category(gateway, category_no, fallback).await,
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CATEGORY_LABEL;
    use crate::devtools::{Endpoint, FixtureGateway};
    use crate::gateway::{CategoryRecord, ProfileRecord};

    fn gateway() -> FixtureGateway {
        let mut fixture = crate::devtools::sample_fixture();
        fixture.profiles.push(ProfileRecord::default());
        FixtureGateway::new(fixture)
    }

    #[tokio::test]
    async fn test_load_profile_passes_fields_through() {
        let gw = gateway();
        let profile = load_profile(&gw, 42).await.unwrap();
        let record = gw
            .fixture()
            .profiles
            .iter()
            .find(|p| p.mentor_profile_no == Some(42))
            .cloned()
            .unwrap();

        assert_eq!(profile.profile_no, 42);
        assert_eq!(Some(profile.member_name.clone()), record.member_name);
        assert_eq!(profile.member_no, record.member_no);
        assert_eq!(profile.category_no, record.category_no);
        assert_eq!(Some(profile.mentoring_count), record.mentor_mentoring_count);
        assert_eq!(Some(profile.rating), record.mentor_rating);
        assert_eq!(profile.careers.len(), record.careers.len());
    }

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let gw = gateway();
        assert_eq!(load_profile(&gw, 999).await, Err(ViewError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_transport_error() {
        let gw = gateway();
        gw.fail(Endpoint::Profile);
        assert!(matches!(
            load_profile(&gw, 42).await,
            Err(ViewError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_category_matches_first_exact_id() {
        let gw = gateway();
        gw.update_fixture(|f| {
            f.categories.push(CategoryRecord {
                category_no: 3,
                category_name: "duplicate".into(),
            })
        });
        let name = resolve_category(&gw, 3, DEFAULT_CATEGORY_LABEL).await;
        assert_eq!(name, "백엔드");
    }

    #[tokio::test]
    async fn test_unmatched_or_failed_category_falls_back() {
        let gw = gateway();
        assert_eq!(
            resolve_category(&gw, 77, DEFAULT_CATEGORY_LABEL).await,
            DEFAULT_CATEGORY_LABEL
        );

        gw.fail(Endpoint::Categories);
        assert_eq!(resolve_category(&gw, 3, "none").await, "none");
    }

    #[tokio::test]
    async fn test_profile_without_category_skips_lookup() {
        let gw = gateway();
        let mut profile = load_profile(&gw, 42).await.unwrap();
        profile.category_no = None;
        gw.fail(Endpoint::Categories);

        assert_eq!(category_label(&gw, &profile, "-").await, "-");
        assert_eq!(gw.call_count(Endpoint::Categories), 0);
    }
}
