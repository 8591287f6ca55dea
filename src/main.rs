use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use match_ranker::config::Settings;
use match_ranker::core::{CompatibilityScorer, HeuristicOnly, Matcher, MatcherOptions};
use match_ranker::routes::{self, matches::AppState};
use match_ranker::services::{CompatibilityClient, DirectoryClient, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting match ranker service...");

    let directory = DirectoryClient::new(
        settings.backend.endpoint.clone(),
        Duration::from_secs(settings.backend.timeout_secs),
    )
    .map_err(|e| {
        error!("Failed to create profile backend client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Profile directory client initialized ({})", settings.backend.endpoint);

    let sessions = Arc::new(SessionStore::new(
        Arc::new(directory),
        settings.cache.max_sessions,
        settings.cache.session_ttl_secs,
    ));

    info!(
        "Session cache initialized (max: {} sessions, TTL: {}s)",
        settings.cache.max_sessions,
        settings.cache.session_ttl_secs
    );

    let compatibility = &settings.compatibility;
    let call_timeout = Duration::from_millis(compatibility.timeout_ms);

    let scorer: Arc<dyn CompatibilityScorer> = if compatibility.enabled && !compatibility.endpoint.is_empty() {
        match CompatibilityClient::new(compatibility.endpoint.clone(), call_timeout) {
            Ok(client) => {
                info!("Compatibility client initialized ({})", compatibility.endpoint);
                Arc::new(client)
            }
            Err(e) => {
                error!("Failed to create compatibility client ({}), using heuristic scoring only", e);
                Arc::new(HeuristicOnly)
            }
        }
    } else {
        info!("Compatibility service disabled, using heuristic scoring only");
        Arc::new(HeuristicOnly)
    };

    let options = MatcherOptions {
        concurrency: compatibility.concurrency.max(1),
        call_timeout,
    };

    info!("Matcher initialized with options: {:?}", options);

    let app_state = AppState {
        sessions,
        matcher: Matcher::new(scorer, options),
        matching: settings.matching,
        request_deadline: Duration::from_millis(compatibility.request_deadline_ms),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
