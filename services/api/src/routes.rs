use crate::infra::{deserialize_date, deserialize_optional_date, AppState, PortalState};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use lawroad::acts::domain::{Reading, StageStatus};
use lawroad::acts::filter::{featured_acts, filter_acts, FilterCriteria};
use lawroad::acts::model::{Act, ActId, Identity, ReadingVote, Subscription};
use lawroad::acts::service::{
    plain_language_explanation, ActRepository, ActServiceError, CommentRepository,
    CommentServiceError, DocumentStore, RepositoryError, SubscriptionError, SubscriptionStore,
    TagRepository,
};
use lawroad::acts::stages::{
    current_stage, current_stage_index, non_canonical_indices, percent_complete,
    validate_chronology, ChronologyViolation,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn portal_router<R, C, T, S, D>(state: PortalState<R, C, T, S, D>) -> Router
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/acts",
            get(list_acts_endpoint::<R, C, T, S, D>).post(create_act_endpoint::<R, C, T, S, D>),
        )
        .route("/api/acts/featured", get(featured_acts_endpoint::<R, C, T, S, D>))
        .route(
            "/api/acts/:id",
            get(get_act_endpoint::<R, C, T, S, D>)
                .put(replace_act_endpoint::<R, C, T, S, D>)
                .delete(delete_act_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/acts/:id/with-details",
            get(act_details_endpoint::<R, C, T, S, D>),
        )
        .route("/api/acts/:id/stages", post(add_stage_endpoint::<R, C, T, S, D>))
        .route(
            "/api/acts/:id/stages/:index",
            put(update_stage_endpoint::<R, C, T, S, D>)
                .delete(remove_stage_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/acts/:id/versions",
            post(add_version_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/acts/:id/versions/:version/file",
            put(upload_document_endpoint::<R, C, T, S, D>)
                .get(download_document_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/acts/:id/reading-votes",
            post(set_reading_vote_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/acts/:id/reading-votes/:reading",
            delete(remove_reading_vote_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/acts/:id/explanation",
            post(explanation_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/acts/:id/comments",
            get(list_comments_endpoint::<R, C, T, S, D>)
                .post(submit_comment_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/comments/:id/approve",
            post(approve_comment_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/comments/:id",
            delete(delete_comment_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/tags",
            get(list_tags_endpoint::<R, C, T, S, D>).post(create_tag_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/tags/:id",
            put(update_tag_endpoint::<R, C, T, S, D>)
                .delete(delete_tag_endpoint::<R, C, T, S, D>),
        )
        .route(
            "/api/subscriptions",
            get(list_subscriptions_endpoint::<R, C, T, S, D>)
                .post(subscribe_endpoint::<R, C, T, S, D>),
        )
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Raw act-listing query. The legacy UI sends `""` and `"all"` as "no
/// filter"; both fold into an absent criterion before reaching the
/// filter engine.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ActListQuery {
    title: Option<String>,
    category: Option<String>,
    status: Option<String>,
    progress: Option<String>,
    sponsor: Option<String>,
    kadencja: Option<String>,
}

fn fold_sentinel(value: Option<String>) -> Option<String> {
    value.filter(|raw| {
        let trimmed = raw.trim();
        !trimmed.is_empty() && trimmed != "all"
    })
}

pub(crate) fn criteria_from_query(query: ActListQuery) -> Result<FilterCriteria, String> {
    let mut fields = serde_json::Map::new();
    if let Some(title) = fold_sentinel(query.title) {
        fields.insert("title".to_string(), json!(title));
    }
    if let Some(category) = fold_sentinel(query.category) {
        fields.insert("category".to_string(), json!(category));
    }
    if let Some(status) = fold_sentinel(query.status) {
        fields.insert("status".to_string(), json!(status));
    }
    if let Some(progress) = fold_sentinel(query.progress) {
        fields.insert("progress".to_string(), json!(progress));
    }
    if let Some(sponsor) = fold_sentinel(query.sponsor) {
        fields.insert("sponsor".to_string(), json!(sponsor));
    }
    if let Some(kadencja) = fold_sentinel(query.kadencja) {
        fields.insert("kadencja".to_string(), json!(kadencja));
    }
    serde_json::from_value(serde_json::Value::Object(fields)).map_err(|err| err.to_string())
}

/// Listing entry with the derived progress view attached.
#[derive(Debug, Serialize)]
pub(crate) struct ActSummaryView {
    #[serde(flatten)]
    pub(crate) act: Act,
    pub(crate) current_stage: Option<String>,
    pub(crate) current_stage_index: Option<usize>,
    pub(crate) percent_complete: f32,
}

impl From<Act> for ActSummaryView {
    fn from(act: Act) -> Self {
        let current_stage = current_stage(&act.stages).map(|stage| stage.name.clone());
        let current_stage_index = current_stage_index(&act.stages);
        let percent_complete = percent_complete(&act.stages);
        Self {
            act,
            current_stage,
            current_stage_index,
            percent_complete,
        }
    }
}

/// Detail view adds the diagnostics the editor surfaces as warnings.
#[derive(Debug, Serialize)]
pub(crate) struct ActDetailView {
    #[serde(flatten)]
    pub(crate) summary: ActSummaryView,
    pub(crate) chronology_violations: Vec<ChronologyViolation>,
    pub(crate) non_canonical_stages: Vec<usize>,
}

impl From<Act> for ActDetailView {
    fn from(act: Act) -> Self {
        let chronology_violations = validate_chronology(&act.stages);
        let non_canonical_stages = non_canonical_indices(&act.stages);
        Self {
            summary: ActSummaryView::from(act),
            chronology_violations,
            non_canonical_stages,
        }
    }
}

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

fn act_error(err: ActServiceError) -> Response {
    let status = match &err {
        ActServiceError::Forbidden => StatusCode::FORBIDDEN,
        ActServiceError::Repository(RepositoryError::NotFound)
        | ActServiceError::VersionNotFound(..) => StatusCode::NOT_FOUND,
        ActServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ActServiceError::Document(lawroad::acts::service::DocumentError::EmptyPayload) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err)
}

fn comment_error(err: CommentServiceError) -> Response {
    use lawroad::acts::comments::CommentError;
    let status = match &err {
        CommentServiceError::Forbidden => StatusCode::FORBIDDEN,
        CommentServiceError::Comment(CommentError::RoleNotAllowed) => StatusCode::FORBIDDEN,
        CommentServiceError::Comment(CommentError::ConsultationClosed)
        | CommentServiceError::Comment(CommentError::EmptyContent) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CommentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err)
}

fn repository_error(err: RepositoryError) -> Response {
    let status = match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err)
}

fn authenticate<R, C, T, S, D>(
    state: &PortalState<R, C, T, S, D>,
    headers: &HeaderMap,
) -> Result<Identity, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "missing bearer token"))?;

    state
        .identity
        .resolve(token)
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "unrecognized token"))
}

async fn list_acts_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Query(query): Query<ActListQuery>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let criteria = match criteria_from_query(query) {
        Ok(criteria) => criteria,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };
    match state.acts.list() {
        Ok(acts) => {
            let views: Vec<ActSummaryView> = filter_acts(&acts, &criteria)
                .into_iter()
                .cloned()
                .map(ActSummaryView::from)
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => act_error(err),
    }
}

async fn featured_acts_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    match state.acts.list() {
        Ok(acts) => {
            let views: Vec<ActSummaryView> = featured_acts(&acts)
                .into_iter()
                .cloned()
                .map(ActSummaryView::from)
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => act_error(err),
    }
}

async fn get_act_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    match state.acts.get(&ActId(id)) {
        Ok(act) => (StatusCode::OK, Json(ActSummaryView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

async fn act_details_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    match state.acts.get(&ActId(id)) {
        Ok(act) => (StatusCode::OK, Json(ActDetailView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

/// Payload for creating an act shell; stages, versions, and votes are
/// added incrementally through the sub-resource endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateActRequest {
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) summary: String,
    pub(crate) status: lawroad::acts::domain::ActStatus,
    pub(crate) progress: lawroad::acts::domain::ProgressTag,
    pub(crate) category: lawroad::acts::domain::Category,
    pub(crate) sponsor: lawroad::acts::domain::Sponsor,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    pub(crate) priority: lawroad::acts::domain::Priority,
    pub(crate) kadencja: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) date_submitted: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) consultation_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) consultation_end: Option<NaiveDate>,
}

impl CreateActRequest {
    fn into_act(self) -> Act {
        let consultation = match (self.consultation_start, self.consultation_end) {
            (Some(start), Some(end)) => {
                Some(lawroad::acts::model::ConsultationWindow { start, end })
            }
            _ => None,
        };
        Act {
            id: ActId(self.id),
            title: self.title,
            summary: self.summary,
            status: self.status,
            progress: self.progress,
            category: self.category,
            tags: self.tags,
            priority: self.priority,
            sponsor: self.sponsor,
            date_submitted: self.date_submitted,
            last_updated: self.date_submitted,
            kadencja: self.kadencja,
            stages: Vec::new(),
            consultation,
            versions: Vec::new(),
            votes: Vec::new(),
        }
    }
}

async fn create_act_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    headers: HeaderMap,
    Json(payload): Json<CreateActRequest>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.acts.create(&editor, payload.into_act()) {
        Ok(act) => (StatusCode::CREATED, Json(ActSummaryView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

async fn replace_act_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(mut act): Json<Act>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    // The path id is authoritative.
    act.id = ActId(id);
    match state.acts.replace(&editor, act.clone()) {
        Ok(()) => (StatusCode::OK, Json(ActSummaryView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

async fn delete_act_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.acts.delete(&editor, &ActId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => act_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageCreateRequest {
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageUpdateRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) date: Option<NaiveDate>,
    pub(crate) status: StageStatus,
}

async fn add_stage_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<StageCreateRequest>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.acts.add_stage(&editor, &ActId(id), &payload.name) {
        Ok(act) => (StatusCode::CREATED, Json(ActDetailView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

async fn update_stage_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path((id, index)): Path<(String, usize)>,
    headers: HeaderMap,
    Json(payload): Json<StageUpdateRequest>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state
        .acts
        .update_stage(&editor, &ActId(id), index, payload.date, payload.status)
    {
        Ok(act) => (StatusCode::OK, Json(ActDetailView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

async fn remove_stage_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path((id, index)): Path<(String, usize)>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.acts.remove_stage(&editor, &ActId(id), index) {
        Ok(act) => (StatusCode::OK, Json(ActDetailView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionCreateRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) date: NaiveDate,
    pub(crate) kind: String,
}

async fn add_version_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<VersionCreateRequest>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state
        .acts
        .add_version(&editor, &ActId(id), payload.date, &payload.kind)
    {
        Ok(version) => (StatusCode::CREATED, Json(version)).into_response(),
        Err(err) => act_error(err),
    }
}

async fn upload_document_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path((id, version)): Path<(String, u32)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state
        .acts
        .attach_document(&editor, &ActId(id), version, &body)
    {
        Ok(path) => (StatusCode::CREATED, Json(json!({ "file_path": path }))).into_response(),
        Err(err) => act_error(err),
    }
}

async fn download_document_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path((id, version)): Path<(String, u32)>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let act = match state.acts.get(&ActId(id)) {
        Ok(act) => act,
        Err(err) => return act_error(err),
    };
    let Some(path) = act
        .versions
        .iter()
        .find(|entry| entry.version == version)
        .and_then(|entry| entry.file_path.clone())
    else {
        return error_response(StatusCode::NOT_FOUND, "no document attached to this version");
    };

    match state.acts.fetch_document(&path) {
        Ok(Some(bytes)) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Ok(None) => error_response(StatusCode::NOT_FOUND, "document missing from storage"),
        Err(err) => act_error(err),
    }
}

async fn set_reading_vote_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(vote): Json<ReadingVote>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.acts.set_reading_vote(&editor, &ActId(id), vote) {
        Ok(act) => (StatusCode::OK, Json(ActSummaryView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

fn parse_reading(raw: &str) -> Option<Reading> {
    match raw {
        "first" => Some(Reading::First),
        "second" => Some(Reading::Second),
        "third" => Some(Reading::Third),
        _ => None,
    }
}

async fn remove_reading_vote_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path((id, reading)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let Some(reading) = parse_reading(&reading) else {
        return error_response(StatusCode::BAD_REQUEST, "reading must be first|second|third");
    };
    match state.acts.remove_reading_vote(&editor, &ActId(id), reading) {
        Ok(act) => (StatusCode::OK, Json(ActSummaryView::from(act))).into_response(),
        Err(err) => act_error(err),
    }
}

async fn explanation_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    match state.acts.get(&ActId(id)) {
        Ok(act) => (
            StatusCode::OK,
            Json(json!({ "explanation": plain_language_explanation(&act) })),
        )
            .into_response(),
        Err(err) => act_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentRequest {
    pub(crate) content: String,
}

async fn submit_comment_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<CommentRequest>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let author = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.comments.submit(&ActId(id), &author, &payload.content) {
        Ok(comment) => (StatusCode::CREATED, Json(comment)).into_response(),
        Err(err) => comment_error(err),
    }
}

async fn list_comments_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let viewer = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.comments.list_for(&ActId(id), &viewer) {
        Ok(comments) => (StatusCode::OK, Json(comments)).into_response(),
        Err(err) => comment_error(err),
    }
}

async fn approve_comment_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let moderator = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.comments.approve(&moderator, &id) {
        Ok(comment) => (StatusCode::OK, Json(comment)).into_response(),
        Err(err) => comment_error(err),
    }
}

async fn delete_comment_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let moderator = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.comments.delete(&moderator, &id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => comment_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagRequest {
    pub(crate) name: String,
}

async fn list_tags_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    match state.tags.list() {
        Ok(tags) => (StatusCode::OK, Json(tags)).into_response(),
        Err(err) => repository_error(err),
    }
}

async fn create_tag_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    headers: HeaderMap,
    Json(payload): Json<TagRequest>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    if !editor.role.can_moderate() {
        return error_response(StatusCode::FORBIDDEN, "operation requires officer or admin role");
    }
    match state.tags.insert(&payload.name) {
        Ok(tag) => (StatusCode::CREATED, Json(tag)).into_response(),
        Err(err) => repository_error(err),
    }
}

async fn update_tag_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
    Json(payload): Json<TagRequest>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    if !editor.role.can_moderate() {
        return error_response(StatusCode::FORBIDDEN, "operation requires officer or admin role");
    }
    let tag = lawroad::acts::model::Tag {
        id,
        name: payload.name,
    };
    match state.tags.update(tag.clone()) {
        Ok(()) => (StatusCode::OK, Json(tag)).into_response(),
        Err(err) => repository_error(err),
    }
}

async fn delete_tag_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let editor = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    if !editor.role.can_moderate() {
        return error_response(StatusCode::FORBIDDEN, "operation requires officer or admin role");
    }
    match state.tags.remove(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => repository_error(err),
    }
}

async fn subscribe_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    Json(subscription): Json<Subscription>,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    match state.subscriptions.subscribe(subscription) {
        Ok(()) => (StatusCode::CREATED, Json(json!({ "status": "subscribed" }))).into_response(),
        Err(err @ SubscriptionError::InvalidEmail(_)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, err)
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

async fn list_subscriptions_endpoint<R, C, T, S, D>(
    State(state): State<PortalState<R, C, T, S, D>>,
    headers: HeaderMap,
) -> Response
where
    R: ActRepository + 'static,
    C: CommentRepository + 'static,
    T: TagRepository + 'static,
    S: SubscriptionStore + 'static,
    D: DocumentStore + 'static,
{
    let viewer = match authenticate(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.subscriptions.subscriptions_for(&viewer.email) {
        Ok(subscriptions) => (StatusCode::OK, Json(subscriptions)).into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_identities, sample_acts};
    use crate::infra::{
        InMemoryActRepository, InMemoryCommentRepository, InMemoryDocumentStore,
        InMemoryIdentityProvider, InMemorySubscriptionStore, InMemoryTagRepository,
    };
    use axum::body::to_bytes;
    use lawroad::acts::service::{ActService, CommentService, SubscriptionService};
    use serde_json::Value;
    use std::sync::Arc;

    type TestState = PortalState<
        InMemoryActRepository,
        InMemoryCommentRepository,
        InMemoryTagRepository,
        InMemorySubscriptionStore,
        InMemoryDocumentStore,
    >;

    fn seeded_state() -> TestState {
        let acts = Arc::new(InMemoryActRepository::default());
        let comments = Arc::new(InMemoryCommentRepository::default());
        let tags = Arc::new(InMemoryTagRepository::default());
        let subscriptions = Arc::new(InMemorySubscriptionStore::default());
        let documents = Arc::new(InMemoryDocumentStore::default());
        let identity = Arc::new(InMemoryIdentityProvider::default());

        for act in sample_acts() {
            lawroad::acts::service::ActRepository::insert(acts.as_ref(), act).expect("seed act");
        }
        for (token, who) in demo_identities() {
            identity.register(token, who);
        }

        PortalState {
            acts: Arc::new(ActService::new(acts.clone(), documents.clone())),
            comments: Arc::new(CommentService::new(acts, comments)),
            subscriptions: Arc::new(SubscriptionService::new(subscriptions)),
            tags,
            identity,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().expect("valid header"),
        );
        headers
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[test]
    fn query_sentinels_fold_to_unconstrained() {
        let criteria = criteria_from_query(ActListQuery {
            title: Some(String::new()),
            category: Some("all".to_string()),
            status: Some(" all ".to_string()),
            progress: None,
            sponsor: None,
            kadencja: Some(String::new()),
        })
        .expect("criteria parse");
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn query_values_map_to_typed_criteria() {
        let criteria = criteria_from_query(ActListQuery {
            title: Some("podatku".to_string()),
            category: Some("finanse".to_string()),
            status: Some("procedowany".to_string()),
            progress: Some("w_toku".to_string()),
            sponsor: Some("minister_finansow".to_string()),
            kadencja: Some("X".to_string()),
        })
        .expect("criteria parse");
        assert_eq!(criteria.title.as_deref(), Some("podatku"));
        assert_eq!(
            criteria.category,
            Some(lawroad::acts::domain::Category::Finanse)
        );

        let err = criteria_from_query(ActListQuery {
            status: Some("niepoprawny".to_string()),
            ..ActListQuery::default()
        });
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn router_wires_listing_and_health() {
        use tower::ServiceExt;

        let response = portal_router(seeded_state())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/acts?status=uchwalony")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let entries = body.as_array().expect("array body");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"], "PL_2025_003");

        let response = portal_router(seeded_state())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn listing_applies_filters_and_derives_progress() {
        let state = seeded_state();
        let response = list_acts_endpoint(
            State(state),
            Query(ActListQuery {
                category: Some("finanse".to_string()),
                status: Some("procedowany".to_string()),
                ..ActListQuery::default()
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let entries = body.as_array().expect("array body");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"], "PL_2025_001");
        assert_eq!(entries[0]["current_stage"], "Praca w komisjach po I czytaniu");
        assert_eq!(entries[0]["current_stage_index"], 10);
    }

    #[tokio::test]
    async fn citizens_cannot_create_acts() {
        let state = seeded_state();
        let payload = serde_json::from_value::<CreateActRequest>(serde_json::json!({
            "id": "PL_2025_099",
            "title": "Projekt testowy",
            "status": "planowany",
            "progress": "w_toku",
            "category": "kultura",
            "sponsor": "minister_kultury",
            "priority": "low",
            "kadencja": "X",
            "date_submitted": "2025-06-01"
        }))
        .expect("payload parses");

        let response =
            create_act_endpoint(State(state), bearer("token-obywatel"), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn editor_builds_act_through_sub_resources() {
        let state = seeded_state();
        let officer = bearer("token-urzednik");

        let payload = serde_json::from_value::<CreateActRequest>(serde_json::json!({
            "id": "PL_2025_100",
            "title": "Projekt ustawy o testach",
            "status": "planowany",
            "progress": "w_toku",
            "category": "administracja",
            "sponsor": "minister_cyfryzacji",
            "priority": "normal",
            "kadencja": "X",
            "date_submitted": "2025-06-01"
        }))
        .expect("payload parses");
        let response =
            create_act_endpoint(State(state.clone()), officer.clone(), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = add_stage_endpoint(
            State(state.clone()),
            Path("PL_2025_100".to_string()),
            officer.clone(),
            Json(StageCreateRequest {
                name: "Konsultacje publiczne".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = add_version_endpoint(
            State(state.clone()),
            Path("PL_2025_100".to_string()),
            officer.clone(),
            Json(VersionCreateRequest {
                date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid"),
                kind: "projekt".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = upload_document_endpoint(
            State(state.clone()),
            Path(("PL_2025_100".to_string(), 1)),
            officer.clone(),
            Bytes::from_static(b"%PDF-1.7 test"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["file_path"], "/docs/PL_2025_100_v1.pdf");

        let response = download_document_endpoint(
            State(state),
            Path(("PL_2025_100".to_string(), 1)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/pdf")
        );
    }

    #[tokio::test]
    async fn consultation_comment_flow_over_http() {
        let state = seeded_state();

        // The education reform act has an open-ended demo window.
        let response = submit_comment_endpoint(
            State(state.clone()),
            Path("PL_2025_004".to_string()),
            bearer("token-obywatel"),
            Json(CommentRequest {
                content: "Popieram zmiany w egzaminach.".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["approved"], false);
        let comment_id = body["id"].as_str().expect("comment id").to_string();

        // Officers may not submit, citizens may not approve.
        let response = submit_comment_endpoint(
            State(state.clone()),
            Path("PL_2025_004".to_string()),
            bearer("token-urzednik"),
            Json(CommentRequest {
                content: "Opinia urzędnika".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = approve_comment_endpoint(
            State(state.clone()),
            Path(comment_id.clone()),
            bearer("token-obywatel"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = approve_comment_endpoint(
            State(state.clone()),
            Path(comment_id),
            bearer("token-urzednik"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        // A closed window rejects new submissions.
        let response = submit_comment_endpoint(
            State(state),
            Path("PL_2025_001".to_string()),
            bearer("token-obywatel"),
            Json(CommentRequest {
                content: "Spóźniona opinia".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn anonymous_requests_are_unauthorized_for_writes() {
        let state = seeded_state();
        let response = delete_act_endpoint(
            State(state),
            Path("PL_2025_001".to_string()),
            HeaderMap::new(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn subscriptions_validate_email_shape() {
        let state = seeded_state();
        let response = subscribe_endpoint(
            State(state.clone()),
            Json(Subscription {
                email: "invalid".to_string(),
                target: lawroad::acts::model::SubscriptionTarget::Act(ActId(
                    "PL_2025_001".to_string(),
                )),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = subscribe_endpoint(
            State(state),
            Json(Subscription {
                email: "obywatel@example.com".to_string(),
                target: lawroad::acts::model::SubscriptionTarget::Category(
                    lawroad::acts::domain::Category::Edukacja,
                ),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
