use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::core::{
    CountryStats, Language, TargetQuery, calculate, countries, country_by_id, validate_country,
    validate_query,
};
use crate::narrative::{NarrativeGenerator, compose_dossier};

pub const DEFAULT_NARRATIVE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub generator: Option<Arc<dyn NarrativeGenerator>>,
    pub narrative_timeout: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            generator: None,
            narrative_timeout: DEFAULT_NARRATIVE_TIMEOUT,
        }
    }
}

type SharedState = Arc<AppState>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatePayload {
    country_id: Option<String>,
    country: Option<CountryStats>,
    target_income: Option<f64>,
    age_min: Option<i32>,
    age_max: Option<i32>,
    user_income: Option<f64>,
    user_age: Option<u32>,
    lang: Option<String>,
}

#[derive(Debug)]
struct ApiRequest {
    country: CountryStats,
    query: TargetQuery,
    lang: Language,
}

#[derive(Debug)]
enum RequestError {
    Invalid(String),
    UnknownCountry(String),
}

impl RequestError {
    fn into_response(self) -> Response {
        match self {
            RequestError::Invalid(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
            RequestError::UnknownCountry(id) => {
                error_response(StatusCode::NOT_FOUND, &format!("Unknown country: {id}"))
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CountrySummary<'a> {
    id: &'a str,
    name_en: &'a str,
    name_pt: &'a str,
    currency: &'a str,
    single_eligible_adults: u64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

const DEFAULT_COUNTRY_ID: &str = "bra";

fn default_query_for_api() -> TargetQuery {
    TargetQuery {
        target_income: 6_000.0,
        age_min: 25,
        age_max: 40,
        user_income: 3_000.0,
        user_age: Some(28),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/countries", get(countries_handler))
        .route(
            "/api/calculate",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .route(
            "/api/dossier",
            get(dossier_get_handler).post(dossier_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(Arc::new(state))
}

pub async fn run_http_server(port: u16, state: AppState) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let narrative_enabled = state.generator.is_some();
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(narrative_enabled, "RealityCheck HTTP API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn countries_handler() -> Response {
    let listing: Vec<CountrySummary<'_>> = countries()
        .iter()
        .map(|c| CountrySummary {
            id: &c.id,
            name_en: &c.name_en,
            name_pt: &c.name_pt,
            currency: &c.currency,
            single_eligible_adults: c.single_eligible_adults,
        })
        .collect();
    json_response(StatusCode::OK, listing)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_get_handler(
    payload: Result<Query<CalculatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => calculate_handler_impl(payload),
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn calculate_post_handler(
    payload: Result<Json<CalculatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => calculate_handler_impl(payload),
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

fn calculate_handler_impl(payload: CalculatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    match calculate(&request.country, &request.query, request.lang) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

async fn dossier_get_handler(
    State(state): State<SharedState>,
    payload: Result<Query<CalculatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => dossier_handler_impl(&state, payload).await,
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn dossier_post_handler(
    State(state): State<SharedState>,
    payload: Result<Json<CalculatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => dossier_handler_impl(&state, payload).await,
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn dossier_handler_impl(state: &AppState, payload: CalculatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    let outcome = compose_dossier(
        &request.country,
        &request.query,
        request.lang,
        state.generator.as_deref(),
        state.narrative_timeout,
    )
    .await;

    match outcome {
        Ok(outcome) => json_response(StatusCode::OK, outcome),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

/// Extractor failures are reported as 400 with the same JSON error shape as
/// every other bad request.
fn rejection_response(detail: &str) -> Response {
    tracing::debug!("Rejected API payload: {detail}");
    error_response(StatusCode::BAD_REQUEST, &format!("Invalid API payload: {detail}"))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, RequestError> {
    let payload = serde_json::from_str::<CalculatePayload>(json)
        .map_err(|e| RequestError::Invalid(format!("Invalid API JSON payload: {e}")))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: CalculatePayload) -> Result<ApiRequest, RequestError> {
    let mut query = default_query_for_api();

    if let Some(v) = payload.target_income {
        query.target_income = v;
    }
    if let Some(v) = payload.age_min {
        query.age_min = v;
    }
    if let Some(v) = payload.age_max {
        query.age_max = v;
    }
    if let Some(v) = payload.user_income {
        query.user_income = v;
    }
    if payload.user_age.is_some() {
        query.user_age = payload.user_age;
    }

    let lang = payload
        .lang
        .as_deref()
        .map(Language::from_tag)
        .unwrap_or_default();

    let country = match payload.country {
        Some(country) => country,
        None => {
            let id = payload.country_id.as_deref().unwrap_or(DEFAULT_COUNTRY_ID);
            country_by_id(id)
                .cloned()
                .ok_or_else(|| RequestError::UnknownCountry(id.to_string()))?
        }
    };

    validate_country(&country).map_err(|e| RequestError::Invalid(e.to_string()))?;
    validate_query(&query).map_err(|e| RequestError::Invalid(e.to_string()))?;

    Ok(ApiRequest {
        country,
        query,
        lang,
    })
}
