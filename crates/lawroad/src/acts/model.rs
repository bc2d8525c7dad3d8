use super::domain::{
    ActStatus, Category, Priority, ProgressTag, Reading, StageStatus, UserRole,
};
use super::domain::Sponsor;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stable external identifier of an act, e.g. `PL_2025_001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActId(pub String);

impl std::fmt::Display for ActId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One named step of the legislative process. A `None` date means the
/// stage has not been reached yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub status: StageStatus,
}

impl Stage {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: None,
            status: StageStatus::Pending,
        }
    }
}

/// Append-only document history entry. `file_path` is set once a PDF has
/// been attached through the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActVersion {
    pub version: u32,
    pub date: NaiveDate,
    pub kind: String,
    pub file_path: Option<String>,
}

/// Recorded Sejm vote after a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingVote {
    pub reading: Reading,
    #[serde(rename = "for")]
    pub in_favor: u32,
    pub against: u32,
    pub abstain: u32,
}

/// Date range during which citizens may submit consultation comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ConsultationWindow {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// A tracked legislative item with its full procedural state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Act {
    pub id: ActId,
    pub title: String,
    pub summary: String,
    pub status: ActStatus,
    pub progress: ProgressTag,
    pub category: Category,
    pub tags: Vec<String>,
    pub priority: Priority,
    pub sponsor: Sponsor,
    pub date_submitted: NaiveDate,
    pub last_updated: NaiveDate,
    pub kadencja: String,
    pub stages: Vec<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation: Option<ConsultationWindow>,
    pub versions: Vec<ActVersion>,
    pub votes: Vec<ReadingVote>,
}

impl Act {
    /// Whether the consultation window is open on the given day. Acts
    /// without a window never accept comments.
    pub fn consultation_open(&self, today: NaiveDate) -> bool {
        self.consultation
            .as_ref()
            .map(|window| window.contains(today))
            .unwrap_or(false)
    }
}

/// Public consultation opinion. Citizen-authored comments start
/// unapproved and become visible to other roles only after moderation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub act_id: ActId,
    pub author: String,
    pub author_email: String,
    pub author_role: UserRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub approved: bool,
}

/// Reference-data tag managed by officers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub name: String,
}

/// E-mail notification target: a whole category or a single act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTarget {
    Category(Category),
    Act(ActId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub email: String,
    pub target: SubscriptionTarget,
}

/// Authenticated caller as resolved by the identity provider. The domain
/// never inspects credentials; it only trusts the resolved role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}
