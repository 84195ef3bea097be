use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use setlatro_core::{classify, is_valid_set, Card, Catalog, Event, GameConfig, GameSnapshot};
use setlatro_core::SaveSummary;
use setlatro_store::{Applied, JsonFileBackend, SessionStore, StoreError};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

struct Settings {
    addr: String,
    saves: PathBuf,
    config: Option<PathBuf>,
    workers: usize,
}

impl Settings {
    fn from_env() -> Self {
        let workers = std::env::var("SETLATRO_WORKERS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(4)
            .max(1);
        Self {
            addr: std::env::var("SETLATRO_ADDR").unwrap_or_else(|_| "0.0.0.0:8001".to_string()),
            saves: std::env::var_os("SETLATRO_SAVES")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("balatro-saves.json")),
            config: std::env::var_os("SETLATRO_CONFIG").map(PathBuf::from),
            workers,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    let config = load_config(settings.config.as_deref())?;
    let backend = Arc::new(JsonFileBackend::new(&settings.saves));
    let store = Arc::new(
        SessionStore::open(backend, Catalog::builtin(), Arc::new(config))
            .with_context(|| format!("open saves at {}", settings.saves.display()))?,
    );
    let server = Arc::new(
        Server::http(&settings.addr).map_err(|err| anyhow!("bind {}: {err}", settings.addr))?,
    );
    info!(addr = %settings.addr, workers = settings.workers, "setlatro server listening");

    let mut workers = Vec::with_capacity(settings.workers);
    for worker in 0..settings.workers {
        let server = Arc::clone(&server);
        let store = Arc::clone(&store);
        let handle = thread::Builder::new()
            .name(format!("setlatro-http-{worker}"))
            .spawn(move || serve(&server, &store))
            .context("spawn request worker")?;
        workers.push(handle);
    }
    for handle in workers {
        if handle.join().is_err() {
            error!("request worker panicked");
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config = serde_json::from_str(&body)
        .with_context(|| format!("parse config {}", path.display()))?;
    info!(path = %path.display(), "loaded game config");
    Ok(config)
}

fn serve(server: &Server, store: &SessionStore) {
    loop {
        match server.recv() {
            Ok(request) => {
                if let Err(err) = handle_request(request, store) {
                    warn!(%err, "request error");
                }
            }
            Err(err) => {
                error!(%err, "server stopped accepting requests");
                break;
            }
        }
    }
}

#[derive(Serialize, Default)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<GameSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saves: Option<Vec<SaveSummary>>,
}

impl ApiResponse {
    fn success() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            error: Some(message),
            ..Self::default()
        }
    }

    fn applied<T: Serialize>(applied: Applied<T>) -> Result<Self, ApiError> {
        Ok(Self {
            result: Some(serde_json::to_value(&applied.value).map_err(ApiError::internal)?),
            state: Some(applied.state),
            events: applied.events,
            ..Self::success()
        })
    }
}

struct ApiError {
    status: u16,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: 404,
            message: message.into(),
        }
    }

    fn internal(err: impl std::fmt::Display) -> Self {
        Self {
            status: 500,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::not_found(err.to_string()),
            err if err.is_rejection() => ApiError::bad_request(err.to_string()),
            err => ApiError::internal(err),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("invalid request body: {err}"))
    }
}

#[derive(Deserialize, Default)]
struct CreateRequest {
    #[serde(default)]
    seed: Option<u64>,
}

/// Body of `POST /api/runs/{id}/{operation}`. Each operation reads the
/// fields it needs.
#[derive(Deserialize, Default)]
struct OperationRequest {
    #[serde(default)]
    card_indices: Vec<usize>,
    #[serde(default)]
    slot: Option<usize>,
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    ids: Vec<String>,
    #[serde(default)]
    target_indices: Vec<usize>,
    #[serde(default)]
    order: Vec<usize>,
}

#[derive(Deserialize)]
struct IsSetRequest {
    cards: Vec<Card>,
}

#[derive(Serialize)]
struct IsSetResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    set_type: Option<String>,
}

fn handle_request(mut request: Request, store: &SessionStore) -> anyhow::Result<()> {
    let method = request.method().clone();
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or_default().to_string();
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    debug!(%method, %path, "request");

    let body = read_body(&mut request)?;
    let outcome = route(&method, &segments, &body, store);
    let (status, response) = match outcome {
        Ok(response) => (200, response),
        Err(err) => (err.status, ApiResponse::failure(err.message)),
    };
    respond_json(request, status, &response)
}

fn route(
    method: &Method,
    segments: &[&str],
    body: &str,
    store: &SessionStore,
) -> Result<ApiResponse, ApiError> {
    match (method, segments) {
        (Method::Post, ["api", "runs"]) => {
            let req: CreateRequest = parse_body(body)?;
            let applied = store.create(req.seed)?;
            Ok(ApiResponse {
                id: Some(applied.value),
                state: Some(applied.state),
                events: applied.events,
                ..ApiResponse::success()
            })
        }
        (Method::Get, ["api", "runs", id]) => Ok(ApiResponse {
            id: Some(id.to_string()),
            state: Some(store.get(id)?),
            ..ApiResponse::success()
        }),
        (Method::Post, ["api", "runs", id, operation]) => {
            let req: OperationRequest = parse_body(body)?;
            let mut response = apply_operation(store, id, operation, req)?;
            response.id = Some(id.to_string());
            Ok(response)
        }
        (Method::Get, ["api", "saves"]) => Ok(ApiResponse {
            saves: Some(store.list()),
            ..ApiResponse::success()
        }),
        (Method::Delete, ["api", "saves", id]) => {
            store.delete(id)?;
            Ok(ApiResponse {
                id: Some(id.to_string()),
                ..ApiResponse::success()
            })
        }
        (Method::Post, ["api", "is_set"]) => {
            let req: IsSetRequest = serde_json::from_str(body)?;
            let valid = is_valid_set(&req.cards);
            let result = IsSetResult {
                valid,
                set_type: valid.then(|| classify(&req.cards).key()),
            };
            Ok(ApiResponse {
                result: Some(serde_json::to_value(result).map_err(ApiError::internal)?),
                ..ApiResponse::success()
            })
        }
        _ => Err(ApiError::not_found("no such route")),
    }
}

fn apply_operation(
    store: &SessionStore,
    id: &str,
    operation: &str,
    req: OperationRequest,
) -> Result<ApiResponse, ApiError> {
    match operation {
        "play_set" => ApiResponse::applied(
            store.update(id, |state, events| state.play_set(&req.card_indices, events))?,
        ),
        "discard" => ApiResponse::applied(
            store.update(id, |state, events| state.discard(&req.card_indices, events))?,
        ),
        "buy_joker" => {
            let slot = required(req.slot, "slot")?;
            ApiResponse::applied(store.update(id, |state, events| state.buy_joker(slot, events))?)
        }
        "sell_joker" => {
            let index = required(req.index, "index")?;
            ApiResponse::applied(
                store.update(id, |state, events| state.sell_joker(index, events))?,
            )
        }
        "buy_booster_pack" => {
            let slot = required(req.slot, "slot")?;
            ApiResponse::applied(
                store.update(id, |state, events| state.buy_booster_pack(slot, events))?,
            )
        }
        "choose_pack_reward" => ApiResponse::applied(
            store.update(id, |state, events| state.choose_pack_reward(&req.ids, events))?,
        ),
        "skip_pack" => {
            ApiResponse::applied(store.update(id, |state, events| state.skip_pack(events))?)
        }
        "use_consumable" => {
            let index = required(req.index, "index")?;
            ApiResponse::applied(store.update(id, |state, events| {
                state.use_consumable(index, &req.target_indices, events)
            })?)
        }
        "reorder_jokers" => ApiResponse::applied(
            store.update(id, |state, events| state.reorder_jokers(&req.order, events))?,
        ),
        "leave_shop" => {
            ApiResponse::applied(store.update(id, |state, events| state.leave_shop(events))?)
        }
        other => Err(ApiError::not_found(format!("unknown operation {other}"))),
    }
}

fn required(value: Option<usize>, field: &str) -> Result<usize, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(format!("missing field {field}")))
}

fn parse_body<T: for<'de> Deserialize<'de> + Default>(body: &str) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(body)?)
}

fn read_body(request: &mut Request) -> anyhow::Result<String> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .context("read request body")?;
    Ok(body)
}

fn respond_json(request: Request, status: u16, response: &ApiResponse) -> anyhow::Result<()> {
    let body = serde_json::to_vec(response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|()| anyhow!("invalid content type header"))?;
    request.respond(
        Response::from_data(body)
            .with_header(header)
            .with_status_code(StatusCode(status)),
    )?;
    Ok(())
}
