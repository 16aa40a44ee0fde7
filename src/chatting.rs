//! Mentoring request: opens a chat between the viewer and the mentor.
//!
//! The outcome is reported as a one-line notice; it never touches the page
//! error slot.

use serde::Serialize;

use crate::gateway::MentoringGateway;
use crate::types::{ProfileId, Session};

pub const MISSING_PARTICIPANT: &str = "멘토 또는 멘티 정보가 없습니다.";
pub const CHAT_STARTED: &str = "멘토와의 채팅이 시작되었습니다!";
pub const CHAT_REJECTED: &str = "채팅 생성에 실패했습니다.";
pub const CHAT_FAILED: &str = "채팅 생성 중 오류가 발생했습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatOutcome {
    Started,
    /// No signed-in viewer or no profile; the gateway was not called.
    MissingParticipant,
    Rejected(String),
    Failed,
}

impl ChatOutcome {
    pub fn message(&self) -> String {
        match self {
            ChatOutcome::Started => CHAT_STARTED.to_string(),
            ChatOutcome::MissingParticipant => MISSING_PARTICIPANT.to_string(),
            ChatOutcome::Rejected(msg) => msg.clone(),
            ChatOutcome::Failed => CHAT_FAILED.to_string(),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, ChatOutcome::Started)
    }
}

pub async fn request_chat(
    gateway: &dyn MentoringGateway,
    session: &Session,
    profile_no: Option<ProfileId>,
) -> ChatOutcome {
    let (Some(mentee_no), Some(profile_no)) = (session.member_no, profile_no) else {
        return ChatOutcome::MissingParticipant;
    };

    match gateway.create_chatting(mentee_no, profile_no).await {
        Ok(ack) if ack.success => {
            log::info!("Chat opened: mentee {} -> profile {}", mentee_no, profile_no);
            ChatOutcome::Started
        }
        Ok(ack) => ChatOutcome::Rejected(
            ack.message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| CHAT_REJECTED.to_string()),
        ),
        Err(e) => {
            log::warn!("Chat request for profile {} failed: {}", profile_no, e);
            ChatOutcome::Failed
        }
    }
}
