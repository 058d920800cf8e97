//! Dashboard API route handlers.
//!
//! All endpoints return JSON except the SVG chart. State is shared via
//! `Arc<DashboardState>`; the form sits behind a `RwLock` so simulation
//! runs see a consistent snapshot.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::chart::{format_balance, ChartData};
use crate::config::ChartConfig;
use crate::error::DebtSimError;
use crate::form::{DebtDraft, DebtEntry, FormState};
use crate::storage::{self, Settings};
use crate::types::{BalanceSeries, DebtId};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub form: RwLock<FormState>,
    /// Document used when save/load requests name no path.
    pub document_path: String,
    pub chart: ChartConfig,
}

impl DashboardState {
    pub fn new(form: FormState, document_path: impl Into<String>) -> Self {
        Self {
            form: RwLock::new(form),
            document_path: document_path.into(),
            chart: ChartConfig::default(),
        }
    }

    pub fn with_chart(mut self, chart: ChartConfig) -> Self {
        self.chart = chart;
        self
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Library error rendered as `{ "error": "..." }` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub DebtSimError);

impl From<DebtSimError> for ApiError {
    fn from(err: DebtSimError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            DebtSimError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DebtSimError::MalformedPersistedState { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DebtSimError::DebtNotFound(_) => StatusCode::NOT_FOUND,
            DebtSimError::Io(_) | DebtSimError::Serialize(_) | DebtSimError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self.0, "Request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FormResponse {
    pub initial_balance: String,
    pub annual_interest_rate: String,
    pub start_date: String,
    pub pay_immediately: bool,
    pub debts: Vec<DebtEntry>,
    pub can_simulate: bool,
}

impl From<&FormState> for FormResponse {
    fn from(form: &FormState) -> Self {
        Self {
            initial_balance: form.initial_balance.clone(),
            annual_interest_rate: form.annual_interest_rate.clone(),
            start_date: form.start_date.clone(),
            pay_immediately: form.pay_immediately,
            debts: form.debts.iter().cloned().collect(),
            can_simulate: form.can_simulate(),
        }
    }
}

/// Add/Update button payload: with an `id` the selected row is updated.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDebtRequest {
    #[serde(default)]
    pub id: Option<DebtId>,
    #[serde(flatten)]
    pub draft: DebtDraft,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileRequest {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileResponse {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    pub points: BalanceSeries,
    pub final_balance: String,
    pub summary: String,
    pub chart: ChartData,
}

impl From<BalanceSeries> for SimulationResponse {
    fn from(series: BalanceSeries) -> Self {
        let chart = ChartData::from_series(&series);
        Self {
            final_balance: format_balance(series.final_balance()),
            summary: chart.summary.clone(),
            points: series,
            chart,
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/form
pub async fn get_form(State(state): State<AppState>) -> Json<FormResponse> {
    let form = state.form.read().await;
    Json(FormResponse::from(&*form))
}

/// PUT /api/settings
pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Json<FormResponse> {
    let mut form = state.form.write().await;
    form.initial_balance = settings.initial_balance;
    form.annual_interest_rate = settings.annual_interest_rate;
    form.start_date = settings.start_date;
    form.pay_immediately = settings.pay_immediately;
    Json(FormResponse::from(&*form))
}

/// GET /api/debts
pub async fn list_debts(State(state): State<AppState>) -> Json<Vec<DebtEntry>> {
    let form = state.form.read().await;
    Json(form.debts.iter().cloned().collect())
}

/// POST /api/debts
pub async fn submit_debt(
    State(state): State<AppState>,
    Json(req): Json<SubmitDebtRequest>,
) -> ApiResult<(StatusCode, Json<DebtEntry>)> {
    let debt = req.draft.parse()?;
    let mut form = state.form.write().await;
    let id = form.debts.submit(req.id, debt.clone())?;
    let status = if req.id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(DebtEntry { id, debt })))
}

/// PUT /api/debts/:id
pub async fn update_debt(
    State(state): State<AppState>,
    Path(id): Path<DebtId>,
    Json(draft): Json<DebtDraft>,
) -> ApiResult<Json<DebtEntry>> {
    let debt = draft.parse()?;
    let mut form = state.form.write().await;
    form.debts.update(id, debt.clone())?;
    Ok(Json(DebtEntry { id, debt }))
}

/// DELETE /api/debts/:id
pub async fn delete_debt(
    State(state): State<AppState>,
    Path(id): Path<DebtId>,
) -> ApiResult<StatusCode> {
    let mut form = state.form.write().await;
    form.debts.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/simulate
pub async fn simulate(State(state): State<AppState>) -> ApiResult<Json<SimulationResponse>> {
    let form = state.form.read().await;
    let series = form.simulate()?;
    Ok(Json(SimulationResponse::from(series)))
}

/// GET /api/chart.svg
pub async fn chart_svg(State(state): State<AppState>) -> ApiResult<Response> {
    let form = state.form.read().await;
    let series = form.simulate()?;
    let svg = ChartData::from_series(&series).to_svg(state.chart.width, state.chart.height)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// POST /api/save
pub async fn save(
    State(state): State<AppState>,
    req: Option<Json<FileRequest>>,
) -> ApiResult<Json<FileResponse>> {
    let path = resolve_path(&state, req);
    let document = state.form.read().await.to_document();
    storage::save_document(&document, Some(&path))?;
    Ok(Json(FileResponse {
        message: format!("Debts and settings saved to {path}"),
        path,
    }))
}

/// POST /api/load
///
/// The form is only touched once the document has loaded cleanly.
pub async fn load(
    State(state): State<AppState>,
    req: Option<Json<FileRequest>>,
) -> ApiResult<Json<FileResponse>> {
    let path = resolve_path(&state, req);
    let document = storage::load_document(Some(&path))?;
    state.form.write().await.apply_document(document);
    info!(path = %path, "Form replaced from document");
    Ok(Json(FileResponse {
        message: format!("Debts and settings loaded from {path}"),
        path,
    }))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

fn resolve_path(state: &DashboardState, req: Option<Json<FileRequest>>) -> String {
    req.and_then(|Json(r)| r.path)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| state.document_path.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
