//! Services composing the domain over storage abstractions.
//!
//! The HTTP layer owns the concrete repositories; everything here is
//! exercised in isolation through the traits.

use super::comments::{draft_comment, visible_comments, CommentError};
use super::domain::StageStatus;
use super::model::{
    Act, ActId, ActVersion, Comment, Identity, ReadingVote, Stage, Subscription, Tag,
};
use super::stages;
use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for acts.
pub trait ActRepository: Send + Sync {
    fn insert(&self, act: Act) -> Result<Act, RepositoryError>;
    fn update(&self, act: Act) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ActId) -> Result<Option<Act>, RepositoryError>;
    fn remove(&self, id: &ActId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<Act>, RepositoryError>;
}

/// Storage abstraction for consultation comments.
pub trait CommentRepository: Send + Sync {
    fn insert(&self, comment: Comment) -> Result<Comment, RepositoryError>;
    fn update(&self, comment: Comment) -> Result<(), RepositoryError>;
    fn remove(&self, id: &str) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<Comment>, RepositoryError>;
    fn for_act(&self, act_id: &ActId) -> Result<Vec<Comment>, RepositoryError>;
}

/// Reference-data tag storage.
pub trait TagRepository: Send + Sync {
    fn insert(&self, name: &str) -> Result<Tag, RepositoryError>;
    fn update(&self, tag: Tag) -> Result<(), RepositoryError>;
    fn remove(&self, id: u32) -> Result<(), RepositoryError>;
    fn fetch(&self, id: u32) -> Result<Option<Tag>, RepositoryError>;
    fn list(&self) -> Result<Vec<Tag>, RepositoryError>;
}

/// E-mail subscription storage.
pub trait SubscriptionStore: Send + Sync {
    fn add(&self, subscription: Subscription) -> Result<(), RepositoryError>;
    fn for_email(&self, email: &str) -> Result<Vec<Subscription>, RepositoryError>;
}

/// Opaque PDF storage. The domain only ever sees the resulting path.
pub trait DocumentStore: Send + Sync {
    fn store(&self, key: &str, bytes: &[u8]) -> Result<String, DocumentError>;
    fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, DocumentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document storage unavailable: {0}")]
    Unavailable(String),
    #[error("document payload is empty")]
    EmptyPayload,
}

/// Error raised by the act service.
#[derive(Debug, thiserror::Error)]
pub enum ActServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("operation requires officer or admin role")]
    Forbidden,
    #[error("act {0} has no version {1}")]
    VersionNotFound(ActId, u32),
}

/// Error raised by the comment service.
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Comment(#[from] CommentError),
    #[error("operation requires officer or admin role")]
    Forbidden,
}

#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
}

static COMMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_comment_id() -> String {
    let id = COMMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("cmt-{id:06}")
}

/// Act catalogue operations: CRUD on acts plus the nested stage, version,
/// and reading-vote sub-resources the multi-step editor writes against a
/// stable act id. Every mutation requires a moderating role.
pub struct ActService<R, D> {
    acts: Arc<R>,
    documents: Arc<D>,
}

impl<R, D> ActService<R, D>
where
    R: ActRepository + 'static,
    D: DocumentStore + 'static,
{
    pub fn new(acts: Arc<R>, documents: Arc<D>) -> Self {
        Self { acts, documents }
    }

    pub fn list(&self) -> Result<Vec<Act>, ActServiceError> {
        Ok(self.acts.list()?)
    }

    pub fn get(&self, id: &ActId) -> Result<Act, ActServiceError> {
        Ok(self.acts.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    pub fn create(&self, editor: &Identity, act: Act) -> Result<Act, ActServiceError> {
        self.require_editor(editor)?;
        self.warn_non_canonical(&act);
        Ok(self.acts.insert(act)?)
    }

    pub fn replace(&self, editor: &Identity, act: Act) -> Result<(), ActServiceError> {
        self.require_editor(editor)?;
        self.warn_non_canonical(&act);
        Ok(self.acts.update(act)?)
    }

    pub fn delete(&self, editor: &Identity, id: &ActId) -> Result<(), ActServiceError> {
        self.require_editor(editor)?;
        Ok(self.acts.remove(id)?)
    }

    /// Append a stage. New stages start pending with no date; the stage
    /// name is advisory-checked against the canonical catalogue.
    pub fn add_stage(
        &self,
        editor: &Identity,
        id: &ActId,
        name: &str,
    ) -> Result<Act, ActServiceError> {
        self.require_editor(editor)?;
        if !stages::is_canonical(name) {
            warn!(act = %id, stage = name, "stage name is not in the canonical catalogue");
        }
        let mut act = self.get(id)?;
        act.stages.push(Stage::pending(name));
        self.acts.update(act.clone())?;
        Ok(act)
    }

    pub fn update_stage(
        &self,
        editor: &Identity,
        id: &ActId,
        index: usize,
        date: Option<NaiveDate>,
        status: StageStatus,
    ) -> Result<Act, ActServiceError> {
        self.require_editor(editor)?;
        let mut act = self.get(id)?;
        let stage = act
            .stages
            .get_mut(index)
            .ok_or(RepositoryError::NotFound)?;
        stage.date = date;
        stage.status = status;
        self.acts.update(act.clone())?;
        Ok(act)
    }

    pub fn remove_stage(
        &self,
        editor: &Identity,
        id: &ActId,
        index: usize,
    ) -> Result<Act, ActServiceError> {
        self.require_editor(editor)?;
        let mut act = self.get(id)?;
        if index >= act.stages.len() {
            return Err(RepositoryError::NotFound.into());
        }
        act.stages.remove(index);
        self.acts.update(act.clone())?;
        Ok(act)
    }

    /// Append a version entry. The version number continues the history;
    /// the document is attached separately.
    pub fn add_version(
        &self,
        editor: &Identity,
        id: &ActId,
        date: NaiveDate,
        kind: &str,
    ) -> Result<ActVersion, ActServiceError> {
        self.require_editor(editor)?;
        let mut act = self.get(id)?;
        let version = ActVersion {
            version: act.versions.last().map(|v| v.version + 1).unwrap_or(1),
            date,
            kind: kind.to_string(),
            file_path: None,
        };
        act.versions.push(version.clone());
        self.acts.update(act)?;
        Ok(version)
    }

    /// Store uploaded PDF bytes for a version and record the resulting
    /// path on the version entry.
    pub fn attach_document(
        &self,
        editor: &Identity,
        id: &ActId,
        version: u32,
        bytes: &[u8],
    ) -> Result<String, ActServiceError> {
        self.require_editor(editor)?;
        if bytes.is_empty() {
            return Err(DocumentError::EmptyPayload.into());
        }
        let mut act = self.get(id)?;
        let entry = act
            .versions
            .iter_mut()
            .find(|v| v.version == version)
            .ok_or_else(|| ActServiceError::VersionNotFound(id.clone(), version))?;

        let key = format!("{}_v{}.pdf", id.0, version);
        let path = self.documents.store(&key, bytes)?;
        entry.file_path = Some(path.clone());
        self.acts.update(act)?;
        Ok(path)
    }

    pub fn fetch_document(&self, path: &str) -> Result<Option<Vec<u8>>, ActServiceError> {
        Ok(self.documents.fetch(path)?)
    }

    /// Record or overwrite the vote tallies for one reading.
    pub fn set_reading_vote(
        &self,
        editor: &Identity,
        id: &ActId,
        vote: ReadingVote,
    ) -> Result<Act, ActServiceError> {
        self.require_editor(editor)?;
        let mut act = self.get(id)?;
        match act.votes.iter_mut().find(|v| v.reading == vote.reading) {
            Some(existing) => *existing = vote,
            None => act.votes.push(vote),
        }
        self.acts.update(act.clone())?;
        Ok(act)
    }

    pub fn remove_reading_vote(
        &self,
        editor: &Identity,
        id: &ActId,
        reading: super::domain::Reading,
    ) -> Result<Act, ActServiceError> {
        self.require_editor(editor)?;
        let mut act = self.get(id)?;
        let before = act.votes.len();
        act.votes.retain(|vote| vote.reading != reading);
        if act.votes.len() == before {
            return Err(RepositoryError::NotFound.into());
        }
        self.acts.update(act.clone())?;
        Ok(act)
    }

    fn require_editor(&self, editor: &Identity) -> Result<(), ActServiceError> {
        if editor.role.can_moderate() {
            Ok(())
        } else {
            Err(ActServiceError::Forbidden)
        }
    }

    fn warn_non_canonical(&self, act: &Act) {
        for index in stages::non_canonical_indices(&act.stages) {
            warn!(
                act = %act.id,
                stage = %act.stages[index].name,
                "stage name is not in the canonical catalogue"
            );
        }
    }
}

/// Plain-language explanation of where an act stands, assembled from the
/// derived progress view.
pub fn plain_language_explanation(act: &Act) -> String {
    let percent = (stages::percent_complete(&act.stages) * 100.0).round() as u32;
    match stages::current_stage(&act.stages) {
        Some(stage) => format!(
            "{} ma status \"{}\". Obecny etap procesu legislacyjnego to \"{}\". \
             Zakończono {}% etapów.",
            act.title,
            act.status.label(),
            stage.name,
            percent
        ),
        None => format!(
            "{} ma status \"{}\". Proces legislacyjny jeszcze się nie rozpoczął.",
            act.title,
            act.status.label()
        ),
    }
}

/// Consultation comment flow: submission by citizens, moderation by
/// officers and admins, role-scoped reads.
pub struct CommentService<R, C> {
    acts: Arc<R>,
    comments: Arc<C>,
}

impl<R, C> CommentService<R, C>
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
{
    pub fn new(acts: Arc<R>, comments: Arc<C>) -> Self {
        Self { acts, comments }
    }

    pub fn submit(
        &self,
        act_id: &ActId,
        author: &Identity,
        content: &str,
    ) -> Result<Comment, CommentServiceError> {
        let act = self
            .acts
            .fetch(act_id)?
            .ok_or(RepositoryError::NotFound)?;
        let mut comment = draft_comment(&act, author, content, Utc::now())?;
        comment.id = next_comment_id();
        Ok(self.comments.insert(comment)?)
    }

    /// Comments on an act as seen by the viewer, in submission order.
    pub fn list_for(
        &self,
        act_id: &ActId,
        viewer: &Identity,
    ) -> Result<Vec<Comment>, CommentServiceError> {
        let all = self.comments.for_act(act_id)?;
        Ok(visible_comments(&all, viewer).into_iter().cloned().collect())
    }

    pub fn approve(
        &self,
        moderator: &Identity,
        comment_id: &str,
    ) -> Result<Comment, CommentServiceError> {
        self.require_moderator(moderator)?;
        let mut comment = self
            .comments
            .fetch(comment_id)?
            .ok_or(RepositoryError::NotFound)?;
        comment.approved = true;
        self.comments.update(comment.clone())?;
        Ok(comment)
    }

    pub fn delete(
        &self,
        moderator: &Identity,
        comment_id: &str,
    ) -> Result<(), CommentServiceError> {
        self.require_moderator(moderator)?;
        Ok(self.comments.remove(comment_id)?)
    }

    fn require_moderator(&self, identity: &Identity) -> Result<(), CommentServiceError> {
        if identity.role.can_moderate() {
            Ok(())
        } else {
            Err(CommentServiceError::Forbidden)
        }
    }
}

/// E-mail subscriptions to categories and acts.
pub struct SubscriptionService<S> {
    store: Arc<S>,
}

impl<S> SubscriptionService<S>
where
    S: SubscriptionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn subscribe(&self, subscription: Subscription) -> Result<(), SubscriptionError> {
        let email = subscription.email.trim();
        // Shape check only; confirmation mail delivery is the notifier's job.
        if email.is_empty() || !email.contains('@') {
            return Err(SubscriptionError::InvalidEmail(subscription.email));
        }
        Ok(self.store.add(Subscription {
            email: email.to_string(),
            ..subscription
        })?)
    }

    pub fn subscriptions_for(&self, email: &str) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(self.store.for_email(email)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acts::domain::{
        ActStatus, Category, Priority, ProgressTag, Reading, Sponsor, UserRole,
    };
    use crate::acts::model::ConsultationWindow;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryActs {
        records: Mutex<Vec<Act>>,
    }

    impl ActRepository for MemoryActs {
        fn insert(&self, act: Act) -> Result<Act, RepositoryError> {
            let mut guard = self.records.lock().expect("acts mutex poisoned");
            if guard.iter().any(|existing| existing.id == act.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.push(act.clone());
            Ok(act)
        }

        fn update(&self, act: Act) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("acts mutex poisoned");
            match guard.iter_mut().find(|existing| existing.id == act.id) {
                Some(existing) => {
                    *existing = act;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }

        fn fetch(&self, id: &ActId) -> Result<Option<Act>, RepositoryError> {
            let guard = self.records.lock().expect("acts mutex poisoned");
            Ok(guard.iter().find(|act| &act.id == id).cloned())
        }

        fn remove(&self, id: &ActId) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("acts mutex poisoned");
            let before = guard.len();
            guard.retain(|act| &act.id != id);
            if guard.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }

        fn list(&self) -> Result<Vec<Act>, RepositoryError> {
            Ok(self.records.lock().expect("acts mutex poisoned").clone())
        }
    }

    #[derive(Default)]
    struct MemoryComments {
        records: Mutex<Vec<Comment>>,
    }

    impl CommentRepository for MemoryComments {
        fn insert(&self, comment: Comment) -> Result<Comment, RepositoryError> {
            let mut guard = self.records.lock().expect("comments mutex poisoned");
            guard.push(comment.clone());
            Ok(comment)
        }

        fn update(&self, comment: Comment) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("comments mutex poisoned");
            match guard.iter_mut().find(|existing| existing.id == comment.id) {
                Some(existing) => {
                    *existing = comment;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }

        fn remove(&self, id: &str) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("comments mutex poisoned");
            let before = guard.len();
            guard.retain(|comment| comment.id != id);
            if guard.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }

        fn fetch(&self, id: &str) -> Result<Option<Comment>, RepositoryError> {
            let guard = self.records.lock().expect("comments mutex poisoned");
            Ok(guard.iter().find(|comment| comment.id == id).cloned())
        }

        fn for_act(&self, act_id: &ActId) -> Result<Vec<Comment>, RepositoryError> {
            let guard = self.records.lock().expect("comments mutex poisoned");
            Ok(guard
                .iter()
                .filter(|comment| &comment.act_id == act_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MemoryDocuments {
        blobs: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl DocumentStore for MemoryDocuments {
        fn store(&self, key: &str, bytes: &[u8]) -> Result<String, DocumentError> {
            let path = format!("/docs/{key}");
            self.blobs
                .lock()
                .expect("documents mutex poisoned")
                .insert(path.clone(), bytes.to_vec());
            Ok(path)
        }

        fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, DocumentError> {
            Ok(self
                .blobs
                .lock()
                .expect("documents mutex poisoned")
                .get(path)
                .cloned())
        }
    }

    fn sample_act(id: &str) -> Act {
        Act {
            id: ActId(id.to_string()),
            title: "Projekt ustawy o cyberbezpieczeństwie".to_string(),
            summary: "Wymogi bezpieczeństwa dla systemów informatycznych.".to_string(),
            status: ActStatus::Procedowany,
            progress: ProgressTag::WToku,
            category: Category::Bezpieczenstwo,
            tags: vec!["cyfryzacja".to_string()],
            priority: Priority::High,
            sponsor: Sponsor::MinisterCyfryzacji,
            date_submitted: NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date"),
            last_updated: NaiveDate::from_ymd_opt(2025, 5, 15).expect("valid date"),
            kadencja: "X".to_string(),
            stages: vec![
                Stage {
                    name: "Projekt został przyjęty do prac rady ministrów".to_string(),
                    date: NaiveDate::from_ymd_opt(2025, 2, 1),
                    status: StageStatus::Done,
                },
                Stage {
                    name: "Konsultacje publiczne".to_string(),
                    date: NaiveDate::from_ymd_opt(2025, 2, 15),
                    status: StageStatus::InProgress,
                },
            ],
            consultation: Some(ConsultationWindow {
                start: NaiveDate::from_ymd_opt(2025, 2, 15).expect("valid"),
                end: NaiveDate::from_ymd_opt(2099, 12, 31).expect("valid"),
            }),
            versions: vec![ActVersion {
                version: 1,
                date: NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid"),
                kind: "projekt".to_string(),
                file_path: None,
            }],
            votes: Vec::new(),
        }
    }

    fn officer() -> Identity {
        Identity {
            name: "Jan Urzędnik".to_string(),
            email: "urzednik@gov.pl".to_string(),
            role: UserRole::Officer,
        }
    }

    fn citizen() -> Identity {
        Identity {
            name: "Anna Kowalska".to_string(),
            email: "anna@example.com".to_string(),
            role: UserRole::Citizen,
        }
    }

    fn act_service() -> ActService<MemoryActs, MemoryDocuments> {
        ActService::new(
            Arc::new(MemoryActs::default()),
            Arc::new(MemoryDocuments::default()),
        )
    }

    #[test]
    fn citizens_cannot_mutate_acts() {
        let service = act_service();
        let result = service.create(&citizen(), sample_act("PL_2025_010"));
        assert!(matches!(result, Err(ActServiceError::Forbidden)));
    }

    #[test]
    fn create_conflicts_on_duplicate_id() {
        let service = act_service();
        service
            .create(&officer(), sample_act("PL_2025_010"))
            .expect("first insert");
        let result = service.create(&officer(), sample_act("PL_2025_010"));
        assert!(matches!(
            result,
            Err(ActServiceError::Repository(RepositoryError::Conflict))
        ));
    }

    #[test]
    fn nested_editor_flow_builds_up_an_act() {
        let service = act_service();
        let id = ActId("PL_2025_011".to_string());
        let mut act = sample_act("PL_2025_011");
        act.stages.clear();
        act.versions.clear();
        service.create(&officer(), act).expect("act created");

        service
            .add_stage(&officer(), &id, "Konsultacje publiczne")
            .expect("stage added");
        let act = service
            .update_stage(
                &officer(),
                &id,
                0,
                NaiveDate::from_ymd_opt(2025, 3, 1),
                StageStatus::InProgress,
            )
            .expect("stage updated");
        assert_eq!(act.stages[0].status, StageStatus::InProgress);

        let version = service
            .add_version(
                &officer(),
                &id,
                NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid"),
                "projekt",
            )
            .expect("version added");
        assert_eq!(version.version, 1);

        let path = service
            .attach_document(&officer(), &id, 1, b"%PDF-1.7 ...")
            .expect("document stored");
        assert_eq!(path, "/docs/PL_2025_011_v1.pdf");
        let act = service.get(&id).expect("act fetched");
        assert_eq!(act.versions[0].file_path.as_deref(), Some(path.as_str()));

        let act = service
            .set_reading_vote(
                &officer(),
                &id,
                ReadingVote {
                    reading: Reading::First,
                    in_favor: 245,
                    against: 180,
                    abstain: 15,
                },
            )
            .expect("vote recorded");
        assert_eq!(act.votes.len(), 1);

        // Overwriting the same reading keeps a single entry.
        let act = service
            .set_reading_vote(
                &officer(),
                &id,
                ReadingVote {
                    reading: Reading::First,
                    in_favor: 250,
                    against: 175,
                    abstain: 15,
                },
            )
            .expect("vote replaced");
        assert_eq!(act.votes.len(), 1);
        assert_eq!(act.votes[0].in_favor, 250);
    }

    #[test]
    fn attach_document_rejects_empty_and_unknown_version() {
        let service = act_service();
        let id = ActId("PL_2025_012".to_string());
        service
            .create(&officer(), sample_act("PL_2025_012"))
            .expect("act created");

        let result = service.attach_document(&officer(), &id, 1, b"");
        assert!(matches!(
            result,
            Err(ActServiceError::Document(DocumentError::EmptyPayload))
        ));

        let result = service.attach_document(&officer(), &id, 9, b"%PDF");
        assert!(matches!(result, Err(ActServiceError::VersionNotFound(_, 9))));
    }

    #[test]
    fn comment_flow_moderates_citizen_submissions() {
        let acts = Arc::new(MemoryActs::default());
        let comments = Arc::new(MemoryComments::default());
        acts.insert(sample_act("PL_2025_013")).expect("seeded");
        let service = CommentService::new(acts, comments);
        let id = ActId("PL_2025_013".to_string());

        let comment = service
            .submit(&id, &citizen(), "Popieram, ale brakuje przepisów przejściowych.")
            .expect("comment accepted");
        assert!(!comment.approved);

        // Moderation is refused to citizens, allowed to officers.
        assert!(matches!(
            service.approve(&citizen(), &comment.id),
            Err(CommentServiceError::Forbidden)
        ));
        let approved = service.approve(&officer(), &comment.id).expect("approved");
        assert!(approved.approved);

        let visible = service.list_for(&id, &citizen()).expect("listed");
        assert_eq!(visible.len(), 1);

        service.delete(&officer(), &comment.id).expect("deleted");
        assert!(service.list_for(&id, &officer()).expect("listed").is_empty());
    }

    #[test]
    fn explanation_reflects_current_stage() {
        let act = sample_act("PL_2025_014");
        let text = plain_language_explanation(&act);
        assert!(text.contains("Procedowany"));
        assert!(text.contains("Konsultacje publiczne"));
        assert!(text.contains("50%"));

        let mut unstarted = act;
        for stage in &mut unstarted.stages {
            stage.status = StageStatus::Pending;
            stage.date = None;
        }
        let text = plain_language_explanation(&unstarted);
        assert!(text.contains("jeszcze się nie rozpoczął"));
    }

    #[derive(Default)]
    struct MemorySubscriptions {
        records: Mutex<Vec<Subscription>>,
    }

    impl SubscriptionStore for MemorySubscriptions {
        fn add(&self, subscription: Subscription) -> Result<(), RepositoryError> {
            self.records
                .lock()
                .expect("subscriptions mutex poisoned")
                .push(subscription);
            Ok(())
        }

        fn for_email(&self, email: &str) -> Result<Vec<Subscription>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("subscriptions mutex poisoned")
                .iter()
                .filter(|subscription| subscription.email == email)
                .cloned()
                .collect())
        }
    }

    #[test]
    fn subscriptions_require_plausible_email() {
        use crate::acts::model::SubscriptionTarget;

        let service = SubscriptionService::new(Arc::new(MemorySubscriptions::default()));
        let result = service.subscribe(Subscription {
            email: "not-an-address".to_string(),
            target: SubscriptionTarget::Category(Category::Finanse),
        });
        assert!(matches!(result, Err(SubscriptionError::InvalidEmail(_))));

        service
            .subscribe(Subscription {
                email: " anna@example.com ".to_string(),
                target: SubscriptionTarget::Act(ActId("PL_2025_001".to_string())),
            })
            .expect("subscribed");
        let stored = service
            .subscriptions_for("anna@example.com")
            .expect("listed");
        assert_eq!(stored.len(), 1);
    }
}
