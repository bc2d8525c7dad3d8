use chrono::NaiveDate;
use lawroad::acts::model::{Act, ActId, Comment, Identity, Subscription, Tag};
use lawroad::acts::service::{
    ActRepository, ActService, CommentRepository, CommentService, DocumentError, DocumentStore,
    RepositoryError, SubscriptionService, SubscriptionStore, TagRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Token-to-identity resolution boundary. A real deployment plugs an
/// identity service in here; the in-memory provider exists for demo and
/// test wiring only.
pub(crate) trait IdentityProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Option<Identity>;
}

#[derive(Default)]
pub(crate) struct InMemoryIdentityProvider {
    tokens: Mutex<HashMap<String, Identity>>,
}

impl InMemoryIdentityProvider {
    pub(crate) fn register(&self, token: &str, identity: Identity) {
        self.tokens
            .lock()
            .expect("identity mutex poisoned")
            .insert(token.to_string(), identity);
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn resolve(&self, token: &str) -> Option<Identity> {
        self.tokens
            .lock()
            .expect("identity mutex poisoned")
            .get(token)
            .cloned()
    }
}

/// Everything the route handlers need, behind one shared state value.
pub(crate) struct PortalState<R, C, T, S, D> {
    pub(crate) acts: Arc<ActService<R, D>>,
    pub(crate) comments: Arc<CommentService<R, C>>,
    pub(crate) subscriptions: Arc<SubscriptionService<S>>,
    pub(crate) tags: Arc<T>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
}

impl<R, C, T, S, D> Clone for PortalState<R, C, T, S, D> {
    fn clone(&self) -> Self {
        Self {
            acts: self.acts.clone(),
            comments: self.comments.clone(),
            subscriptions: self.subscriptions.clone(),
            tags: self.tags.clone(),
            identity: self.identity.clone(),
        }
    }
}

#[derive(Default)]
pub(crate) struct InMemoryActRepository {
    records: Mutex<Vec<Act>>,
}

impl ActRepository for InMemoryActRepository {
    fn insert(&self, act: Act) -> Result<Act, RepositoryError> {
        let mut guard = self.records.lock().expect("act mutex poisoned");
        if guard.iter().any(|existing| existing.id == act.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(act.clone());
        Ok(act)
    }

    fn update(&self, act: Act) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("act mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == act.id) {
            Some(existing) => {
                *existing = act;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ActId) -> Result<Option<Act>, RepositoryError> {
        let guard = self.records.lock().expect("act mutex poisoned");
        Ok(guard.iter().find(|act| &act.id == id).cloned())
    }

    fn remove(&self, id: &ActId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("act mutex poisoned");
        let before = guard.len();
        guard.retain(|act| &act.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Act>, RepositoryError> {
        Ok(self.records.lock().expect("act mutex poisoned").clone())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCommentRepository {
    records: Mutex<Vec<Comment>>,
}

impl CommentRepository for InMemoryCommentRepository {
    fn insert(&self, comment: Comment) -> Result<Comment, RepositoryError> {
        self.records
            .lock()
            .expect("comment mutex poisoned")
            .push(comment.clone());
        Ok(comment)
    }

    fn update(&self, comment: Comment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("comment mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == comment.id) {
            Some(existing) => {
                *existing = comment;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn remove(&self, id: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("comment mutex poisoned");
        let before = guard.len();
        guard.retain(|comment| comment.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn fetch(&self, id: &str) -> Result<Option<Comment>, RepositoryError> {
        let guard = self.records.lock().expect("comment mutex poisoned");
        Ok(guard.iter().find(|comment| comment.id == id).cloned())
    }

    fn for_act(&self, act_id: &ActId) -> Result<Vec<Comment>, RepositoryError> {
        let guard = self.records.lock().expect("comment mutex poisoned");
        Ok(guard
            .iter()
            .filter(|comment| &comment.act_id == act_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryTagRepository {
    records: Mutex<Vec<Tag>>,
    sequence: AtomicU32,
}

impl TagRepository for InMemoryTagRepository {
    fn insert(&self, name: &str) -> Result<Tag, RepositoryError> {
        let mut guard = self.records.lock().expect("tag mutex poisoned");
        if guard.iter().any(|tag| tag.name == name) {
            return Err(RepositoryError::Conflict);
        }
        let tag = Tag {
            id: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            name: name.to_string(),
        };
        guard.push(tag.clone());
        Ok(tag)
    }

    fn update(&self, tag: Tag) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("tag mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == tag.id) {
            Some(existing) => {
                *existing = tag;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn remove(&self, id: u32) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("tag mutex poisoned");
        let before = guard.len();
        guard.retain(|tag| tag.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn fetch(&self, id: u32) -> Result<Option<Tag>, RepositoryError> {
        let guard = self.records.lock().expect("tag mutex poisoned");
        Ok(guard.iter().find(|tag| tag.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Tag>, RepositoryError> {
        Ok(self.records.lock().expect("tag mutex poisoned").clone())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySubscriptionStore {
    records: Mutex<Vec<Subscription>>,
}

impl SubscriptionStore for InMemorySubscriptionStore {
    fn add(&self, subscription: Subscription) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("subscription mutex poisoned");
        if !guard.contains(&subscription) {
            guard.push(subscription);
        }
        Ok(())
    }

    fn for_email(&self, email: &str) -> Result<Vec<Subscription>, RepositoryError> {
        let guard = self.records.lock().expect("subscription mutex poisoned");
        Ok(guard
            .iter()
            .filter(|subscription| subscription.email == email)
            .cloned()
            .collect())
    }
}

/// Keeps uploaded PDFs in memory; used by tests and the demo listing.
#[derive(Default)]
pub(crate) struct InMemoryDocumentStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl DocumentStore for InMemoryDocumentStore {
    fn store(&self, key: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        let path = format!("/docs/{key}");
        self.blobs
            .lock()
            .expect("document mutex poisoned")
            .insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, DocumentError> {
        Ok(self
            .blobs
            .lock()
            .expect("document mutex poisoned")
            .get(path)
            .cloned())
    }
}

/// Writes uploaded PDFs under the configured upload directory.
pub(crate) struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches("/docs/"))
    }
}

impl DocumentStore for LocalDocumentStore {
    fn store(&self, key: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        std::fs::create_dir_all(&self.root)
            .map_err(|err| DocumentError::Unavailable(err.to_string()))?;
        std::fs::write(self.root.join(key), bytes)
            .map_err(|err| DocumentError::Unavailable(err.to_string()))?;
        Ok(format!("/docs/{key}"))
    }

    fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, DocumentError> {
        match std::fs::read(self.resolve(path)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DocumentError::Unavailable(err.to_string())),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
