use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

mod page;

use crate::admin::{ConnectionRequest, ConnectionTestResult, ConnectionTester};
use crate::db::models::{AdminConfig, Match, Team};
use crate::db::Database;
use crate::error::FetchError;
use crate::source::MatchSource;
use crate::stats::export::{matches_to_csv, CSV_FILENAME};
use crate::stats::summary::{breakdown, MatchBreakdown};
use crate::stats::table::{PageSize, SortDirection, SortKey, SortSpec};
use crate::stats::team::{team_stats, TeamStats};
use crate::stats::{summarize, FilterSpec, Summary, TablePage, TableView};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub source: Arc<dyn MatchSource>,
    pub tester: ConnectionTester,
}

type ApiError = (StatusCode, String);

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/teams", get(teams_handler))
        .route("/api/teams/:name", get(team_stats_handler))
        .route("/api/matches", get(matches_handler))
        .route("/api/matches/:id", get(match_detail_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/extended-stats", get(extended_stats_handler))
        .route("/api/export.csv", get(export_handler))
        .route(
            "/api/saved-filters",
            get(list_saved_filters_handler).post(create_saved_filter_handler),
        )
        .route("/api/saved-filters/:id", delete(delete_saved_filter_handler))
        .route(
            "/api/admin/config",
            get(get_admin_config_handler)
                .put(save_admin_config_handler)
                .delete(reset_admin_config_handler),
        )
        .route("/api/admin/test", post(test_connection_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

fn fetch_failed(e: FetchError) -> ApiError {
    warn!("Fetch failed: {}", e);
    (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
}

fn internal(e: anyhow::Error) -> ApiError {
    error!("Internal error: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

// ── Query parameters ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nav {
    Next,
    Prev,
}

/// Filter criteria plus the client's table state and an optional table action.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub home: Option<String>,
    pub away: Option<String>,
    pub btts: Option<bool>,
    pub comeback: Option<bool>,
    pub sort: Option<SortKey>,
    pub dir: Option<SortDirection>,
    pub page: Option<usize>,
    pub page_size: Option<PageSize>,
    /// Column header clicked
    pub toggle: Option<SortKey>,
    pub nav: Option<Nav>,
    /// New page size picked
    pub resize: Option<PageSize>,
}

impl MatchQuery {
    fn filter(&self) -> FilterSpec {
        FilterSpec {
            home: self.home.clone(),
            away: self.away.clone(),
            btts: self.btts,
            comeback: self.comeback,
        }
        .normalized()
    }

    /// Current table state with the requested action applied.
    fn view(&self, total_rows: usize) -> TableView {
        let mut view = TableView {
            sort: SortSpec {
                key: self.sort,
                direction: self.dir.unwrap_or_default(),
            },
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or_default(),
        };
        if let Some(key) = self.toggle {
            view.select_sort(key);
        }
        if let Some(size) = self.resize {
            view.set_page_size(size);
        }
        match self.nav {
            Some(Nav::Next) => view.next_page(total_rows),
            Some(Nav::Prev) => view.prev_page(total_rows),
            None => {}
        }
        view
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TeamSearch {
    pub q: Option<String>,
}

// ── Responses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    #[serde(rename = "match")]
    pub fixture: Match,
    pub breakdown: MatchBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedStats {
    pub home_team: Option<Team>,
    pub away_team: Option<Team>,
    pub summary: Summary,
}

#[derive(Debug, Deserialize)]
pub struct NewSavedFilter {
    pub name: String,
    #[serde(default)]
    pub filters: FilterSpec,
}

#[derive(Debug, Serialize)]
pub struct AdminSaveResponse {
    pub saved: bool,
    pub config: AdminConfig,
    pub test: ConnectionTestResult,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Serve the dashboard HTML page.
async fn index_handler() -> impl IntoResponse {
    Html(page::DASHBOARD_HTML)
}

/// GET /api/teams?q=
async fn teams_handler(
    State(state): State<Arc<AppState>>,
    Query(search): Query<TeamSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let teams = state.source.fetch_teams().await.map_err(fetch_failed)?;
    let needle = search.q.unwrap_or_default().trim().to_lowercase();
    let teams: Vec<Team> = teams
        .into_iter()
        .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
        .collect();
    Ok(Json(teams))
}

/// GET /api/teams/:name
async fn team_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TeamStats>, ApiError> {
    let teams = state.source.fetch_teams().await.map_err(fetch_failed)?;
    let team = teams
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Team {:?} not found", name)))?;
    let matches = state
        .source
        .fetch_matches(&FilterSpec::default())
        .await
        .map_err(fetch_failed)?;
    team_stats(&team, &matches)
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No matches for {:?}", name)))
}

/// GET /api/matches?home=&away=&btts=&comeback=&sort=&dir=&page=&pageSize=
async fn matches_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<TablePage>, ApiError> {
    let matches = state
        .source
        .fetch_matches(&query.filter())
        .await
        .map_err(fetch_failed)?;
    let view = query.view(matches.len());
    Ok(Json(view.render(&matches)))
}

/// GET /api/matches/:id
async fn match_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MatchDetail>, ApiError> {
    let matches = state
        .source
        .fetch_matches(&FilterSpec::default())
        .await
        .map_err(fetch_failed)?;
    let fixture = matches
        .into_iter()
        .find(|m| m.id() == id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Match {} not found", id)))?;
    Ok(Json(MatchDetail {
        breakdown: breakdown(&fixture),
        fixture,
    }))
}

/// GET /api/summary
async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Summary>, ApiError> {
    let matches = state
        .source
        .fetch_matches(&query.filter())
        .await
        .map_err(fetch_failed)?;
    Ok(Json(summarize(&matches)))
}

/// GET /api/extended-stats?home=&away=
async fn extended_stats_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<ExtendedStats>, ApiError> {
    let spec = query.filter().teams_only();
    let matches = state
        .source
        .fetch_matches(&spec)
        .await
        .map_err(fetch_failed)?;
    let teams = state.source.fetch_teams().await.map_err(fetch_failed)?;
    let find = |name: &Option<String>| {
        name.as_deref()
            .and_then(|n| teams.iter().find(|t| t.name == n).cloned())
    };
    Ok(Json(ExtendedStats {
        home_team: find(&spec.home),
        away_team: find(&spec.away),
        summary: summarize(&matches),
    }))
}

/// GET /api/export.csv
async fn export_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let matches = state
        .source
        .fetch_matches(&query.filter())
        .await
        .map_err(fetch_failed)?;
    let body = matches_to_csv(&matches).map_err(internal)?;
    info!("Exported {} matches to CSV", matches.len());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        body,
    ))
}

/// GET /api/saved-filters
async fn list_saved_filters_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.list_saved_filters().map(Json).map_err(internal)
}

/// POST /api/saved-filters
async fn create_saved_filter_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewSavedFilter>,
) -> Result<impl IntoResponse, ApiError> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Filter name is required".to_string()));
    }
    let saved = state
        .db
        .save_filter(&body.name, body.filters)
        .map_err(internal)?;
    info!("Saved filter {:?} ({})", saved.name, saved.id);
    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /api/saved-filters/:id
async fn delete_saved_filter_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.db.delete_filter(&id).map_err(internal)? {
        info!("Deleted saved filter {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/config
async fn get_admin_config_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.get_admin_config().map(Json).map_err(internal)
}

/// PUT /api/admin/config: stored only when the connection test succeeds.
async fn save_admin_config_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectionRequest>,
) -> Result<Json<AdminSaveResponse>, ApiError> {
    let url = req.validate().map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;
    let test = state.tester.test(&url, req.key.trim()).await;
    if !test.success {
        let config = state.db.get_admin_config().map_err(internal)?;
        return Ok(Json(AdminSaveResponse {
            saved: false,
            config,
            test,
        }));
    }
    let config = req.into_config(true);
    state.db.put_admin_config(&config).map_err(internal)?;
    info!("Admin connection saved for {}", config.url);
    Ok(Json(AdminSaveResponse {
        saved: true,
        config,
        test,
    }))
}

/// DELETE /api/admin/config
async fn reset_admin_config_handler(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    state.db.reset_admin_config().map_err(internal)?;
    info!("Admin connection reset");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/test
async fn test_connection_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectionRequest>,
) -> Result<Json<ConnectionTestResult>, ApiError> {
    let url = req.validate().map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;
    Ok(Json(state.tester.test(&url, req.key.trim()).await))
}
