//! HTTP front end.
//!
//! # Endpoints
//!
//! All routes live under `/api/v1` and answer JSON:
//!
//! - `GET /ping` - liveness check
//! - `GET /allWords` - the dictionary
//! - `GET /words` - a random same-length `from`/`to` pair for a new game
//! - `GET /validate?word=a&word=b` - whether every word is in the dictionary
//! - `GET /solve?from=a&to=b` - a shortest ladder
//! - `GET /hint?from=a&to=b` - the next word of a shortest ladder and the steps left

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, CORS_MAX_AGE};
use crate::error::{HintError, InvalidInput, SolveError};
use crate::game::{random_pair, validate_words};
use crate::index::normalize;
use crate::solver::{Hint, Ladder, LadderSolver};
use crate::store::DictionaryStore;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<DictionaryStore>,
    rng: Arc<Mutex<StdRng>>,
    solve_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<DictionaryStore>, rng: StdRng, solve_timeout: Duration) -> Self {
        Self {
            store,
            rng: Arc::new(Mutex::new(rng)),
            solve_timeout,
        }
    }

    pub fn from_config(store: Arc<DictionaryStore>, config: &ServerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(store, rng, config.solve_timeout)
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordsResponse {
    pub words: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoolResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SolveResponse {
    pub from: String,
    pub to: String,
    pub solution: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LadderQuery {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid words provided")]
    MissingWords,
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("no ladder exists from '{from}' to '{to}'")]
    NoLadder { from: String, to: String },
    #[error("'{from}' is already '{to}'")]
    AlreadySolved { from: String, to: String },
    #[error("dictionary has no playable word pair")]
    NoPair,
    #[error("solver task failed: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingWords | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NoLadder { .. } => StatusCode::NOT_FOUND,
            ApiError::AlreadySolved { .. } => StatusCode::CONFLICT,
            ApiError::NoPair => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SolveError> for ApiError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::InvalidInput(reason) => ApiError::InvalidInput(reason),
            SolveError::Unreachable { start, end } => ApiError::NoLadder { from: start, to: end },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        let body = MessageResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "pong".to_string(),
    })
}

async fn all_words(State(state): State<AppState>) -> Json<WordsResponse> {
    let index = state.store.snapshot();
    Json(WordsResponse {
        words: index.words().to_vec(),
    })
}

async fn words(State(state): State<AppState>) -> Result<Json<GameResponse>, ApiError> {
    let index = state.store.snapshot();
    let pair = {
        let mut rng = state.rng.lock().unwrap_or_else(PoisonError::into_inner);
        random_pair(&index, &mut *rng)
    };
    let (from, to) = pair.ok_or(ApiError::NoPair)?;
    Ok(Json(GameResponse { from, to }))
}

async fn validate(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<BoolResponse> {
    let index = state.store.snapshot();
    let words = params
        .iter()
        .filter(|(key, _)| key == "word")
        .map(|(_, word)| word);
    Json(BoolResponse {
        success: validate_words(&index, words),
    })
}

/// Run a solve on the blocking pool under the configured timeout.
///
/// A timeout is reported the same way as an unreachable pair.
async fn run_solve(state: &AppState, query: &LadderQuery) -> Result<Ladder, ApiError> {
    if query.from.trim().is_empty() || query.to.trim().is_empty() {
        return Err(ApiError::MissingWords);
    }

    let index = state.store.snapshot();
    let (from, to) = (query.from.clone(), query.to.clone());
    let task = tokio::task::spawn_blocking(move || {
        LadderSolver::new(&index)
            .solve(&from, &to)
            .into_result(&from, &to)
    });

    match tokio::time::timeout(state.solve_timeout, task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(err)) => Err(ApiError::Internal(err.to_string())),
        Err(_) => {
            tracing::warn!(from = %query.from, to = %query.to, "solve timed out");
            Err(ApiError::NoLadder {
                from: normalize(&query.from),
                to: normalize(&query.to),
            })
        }
    }
}

async fn solve(
    State(state): State<AppState>,
    Query(query): Query<LadderQuery>,
) -> Result<Json<SolveResponse>, ApiError> {
    let ladder = run_solve(&state, &query).await?;
    Ok(Json(SolveResponse {
        from: ladder.start().to_string(),
        to: ladder.end().to_string(),
        solution: ladder.into_words(),
    }))
}

async fn hint(
    State(state): State<AppState>,
    Query(query): Query<LadderQuery>,
) -> Result<Json<Hint>, ApiError> {
    let ladder = run_solve(&state, &query).await?;
    let hint = ladder.hint().map_err(|HintError::AlreadySolved| ApiError::AlreadySolved {
        from: ladder.start().to_string(),
        to: ladder.end().to_string(),
    })?;
    Ok(Json(hint))
}

// =============================================================================
// Router
// =============================================================================

fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, ORIGIN, ACCEPT])
        .max_age(CORS_MAX_AGE))
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ping", get(ping))
        .route("/allWords", get(all_words))
        .route("/words", get(words))
        .route("/validate", get(validate))
        .route("/solve", get(solve))
        .route("/hint", get(hint));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router with CORS applied per `config`.
pub fn app(state: AppState, config: &ServerConfig) -> anyhow::Result<Router> {
    let router = router(state);
    match &config.allowed_origin {
        Some(origin) => Ok(router.layer(cors_layer(origin)?)),
        None => Ok(router),
    }
}

/// Load the dictionary and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("server starting");
    let store = Arc::new(DictionaryStore::open(&config.words_path)?);
    let state = AppState::from_config(store, &config);
    let app = app(state, &config)?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
