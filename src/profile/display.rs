//! Presentation-neutral display values with the fallbacks the profile
//! screen uses for missing fields.

use chrono::NaiveDate;
use serde::Serialize;

use crate::profile::career::career_duration;
use crate::types::{CareerEntry, MentorProfile, Review};

pub const DEFAULT_PROFILE_IMAGE: &str = "/default-profile.png";
pub const NO_SPECIALTY: &str = "대표 멘토링 분야 정보 없음";
pub const NO_INTRODUCTION: &str = "멘토 소개 정보 없음";
pub const NO_CAREER: &str = "멘토 경력 정보 없음";
pub const UNKNOWN_AUTHOR: &str = "작성자 이름";
pub const EMPTY_REVIEW: &str = "리뷰 내용이 없습니다.";
pub const NO_SCORE: &str = "없음";

/// Mentoring requests as a percentage of activity, rounded. Zero activity is 0%.
pub fn matching_rate(mentoring_count: u32, activity_count: u32) -> u32 {
    if activity_count == 0 {
        return 0;
    }
    (f64::from(mentoring_count) / f64::from(activity_count) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerLine {
    pub company_name: String,
    pub job_title: String,
    pub period: String,
    pub duration: String,
    pub is_current: bool,
}

impl CareerLine {
    pub fn from_entry(entry: &CareerEntry, today: NaiveDate) -> Self {
        let end = match entry.end_date {
            Some(d) => d.format("%Y.%m").to_string(),
            None => "현재".to_string(),
        };
        CareerLine {
            company_name: entry.company_name.clone(),
            job_title: entry.job_title.clone(),
            period: format!("{} - {}", entry.start_date.format("%Y.%m"), end),
            duration: career_duration(entry.start_date, entry.end_date, today),
            is_current: entry.is_current(),
        }
    }
}

/// Header card for a loaded profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCard {
    pub title: String,
    pub image_url: String,
    pub specialty: String,
    pub category_name: String,
    pub introduction: String,
    pub mentoring_count: u32,
    pub matching_rate: u32,
    pub rating: f64,
    pub follow_count: u32,
    pub careers: Vec<CareerLine>,
    /// Shown instead of the career list when there is none: the free-text
    /// career, else a fixed placeholder.
    pub career_placeholder: Option<String>,
}

impl ProfileCard {
    pub fn from_profile(profile: &MentorProfile, category_name: &str, today: NaiveDate) -> Self {
        let careers: Vec<CareerLine> = profile
            .careers
            .iter()
            .map(|c| CareerLine::from_entry(c, today))
            .collect();

        ProfileCard {
            title: format!("{} 멘토", profile.member_name),
            image_url: profile
                .image_url
                .clone()
                .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string()),
            specialty: profile
                .specialty
                .clone()
                .unwrap_or_else(|| NO_SPECIALTY.to_string()),
            category_name: category_name.to_string(),
            introduction: profile
                .introduction
                .clone()
                .unwrap_or_else(|| NO_INTRODUCTION.to_string()),
            mentoring_count: profile.mentoring_count,
            matching_rate: matching_rate(profile.mentoring_count, profile.activity_count),
            rating: profile.rating,
            follow_count: profile.follow_count,
            career_placeholder: careers.is_empty().then(|| {
                profile
                    .career_text
                    .clone()
                    .unwrap_or_else(|| NO_CAREER.to_string())
            }),
            careers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    pub review_no: i64,
    pub author: String,
    pub content: String,
    pub score: String,
}

impl From<&Review> for ReviewCard {
    fn from(review: &Review) -> Self {
        ReviewCard {
            review_no: review.review_no,
            author: non_empty_or(&review.author_name, UNKNOWN_AUTHOR),
            content: non_empty_or(&review.content, EMPTY_REVIEW),
            score: if review.score > 0.0 {
                review.score.to_string()
            } else {
                NO_SCORE.to_string()
            },
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> MentorProfile {
        MentorProfile {
            profile_no: 42,
            member_no: Some(9),
            member_name: "김멘토".into(),
            image_url: None,
            headline: None,
            introduction: Some("안녕하세요".into()),
            specialty: None,
            category_no: Some(3),
            mentoring_count: 12,
            activity_count: 16,
            rating: 4.5,
            follow_count: 3,
            careers: vec![CareerEntry {
                company_name: "Grew".into(),
                job_title: "Engineer".into(),
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                end_date: Some(NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()),
            }],
            career_text: None,
        }
    }

    #[test]
    fn test_matching_rate() {
        assert_eq!(matching_rate(12, 16), 75);
        assert_eq!(matching_rate(1, 3), 33);
        assert_eq!(matching_rate(2, 3), 67);
        assert_eq!(matching_rate(5, 0), 0);
    }

    #[test]
    fn test_card_fallbacks() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let card = ProfileCard::from_profile(&profile(), "백엔드", today);

        assert_eq!(card.title, "김멘토 멘토");
        assert_eq!(card.image_url, DEFAULT_PROFILE_IMAGE);
        assert_eq!(card.specialty, NO_SPECIALTY);
        assert_eq!(card.introduction, "안녕하세요");
        assert_eq!(card.matching_rate, 75);
        assert_eq!(card.careers[0].duration, "(3년 6개월)");
        assert_eq!(card.careers[0].period, "2020.01 - 2023.07");
        assert!(card.career_placeholder.is_none());

        let mut bare = profile();
        bare.careers.clear();
        let card = ProfileCard::from_profile(&bare, "백엔드", today);
        assert_eq!(card.career_placeholder.as_deref(), Some(NO_CAREER));
    }

    #[test]
    fn test_free_text_career_fills_empty_list() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut text_only = profile();
        text_only.careers.clear();
        text_only.career_text = Some("네이버 5년, 카카오 2년".into());

        let card = ProfileCard::from_profile(&text_only, "백엔드", today);
        assert!(card.careers.is_empty());
        assert_eq!(card.career_placeholder.as_deref(), Some("네이버 5년, 카카오 2년"));

        // Structured entries win over the free text.
        let mut both = profile();
        both.career_text = Some("ignored".into());
        let card = ProfileCard::from_profile(&both, "백엔드", today);
        assert_eq!(card.careers.len(), 1);
        assert!(card.career_placeholder.is_none());
    }

    #[test]
    fn test_review_card_fallbacks() {
        let review = Review {
            review_no: 1,
            title: String::new(),
            content: "  ".into(),
            score: 0.0,
            author_name: String::new(),
        };
        let card = ReviewCard::from(&review);
        assert_eq!(card.author, UNKNOWN_AUTHOR);
        assert_eq!(card.content, EMPTY_REVIEW);
        assert_eq!(card.score, NO_SCORE);
    }
}
