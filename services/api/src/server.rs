use crate::cli::ServeArgs;
use crate::demo::{demo_identities, sample_acts};
use crate::infra::{
    AppState, InMemoryActRepository, InMemoryCommentRepository, InMemoryIdentityProvider,
    InMemorySubscriptionStore, InMemoryTagRepository, LocalDocumentStore, PortalState,
};
use crate::routes::portal_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lawroad::acts::service::{ActRepository, ActService, CommentService, SubscriptionService};
use lawroad::config::{AppConfig, AppEnvironment};
use lawroad::error::AppError;
use lawroad::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let acts = Arc::new(InMemoryActRepository::default());
    let comments = Arc::new(InMemoryCommentRepository::default());
    let tags = Arc::new(InMemoryTagRepository::default());
    let subscriptions = Arc::new(InMemorySubscriptionStore::default());
    let documents = Arc::new(LocalDocumentStore::new(config.storage.upload_dir.clone()));
    let identity = Arc::new(InMemoryIdentityProvider::default());

    if config.environment != AppEnvironment::Production {
        for act in sample_acts() {
            if let Err(err) = acts.insert(act) {
                warn!(%err, "skipping demo act");
            }
        }
        for (token, who) in demo_identities() {
            info!(token, email = %who.email, role = ?who.role, "registered demo identity");
            identity.register(token, who);
        }
    }

    let state = PortalState {
        acts: Arc::new(ActService::new(acts.clone(), documents)),
        comments: Arc::new(CommentService::new(acts, comments)),
        subscriptions: Arc::new(SubscriptionService::new(subscriptions)),
        tags,
        identity,
    };

    let app = portal_router(state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "legislative act portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
