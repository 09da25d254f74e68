// Handlers for the JSON API consumed by the storefront

use axum::{
    extract::{Json as JsonExtract, Path, State},
    http::header,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tokio::sync::MutexGuard;

use crate::{
    backend_api, catalog,
    catalog::CatalogSnapshot,
    engine::{describe, CarBrowser, FilterSummary, PageCommand, PageView},
    error::{AppError, AppResult},
    export, finance,
    models::FilterCriteria,
    showroom::{Showroom, ShowroomView},
    AppState,
};

const MAX_PAGE_SIZE: usize = 60;

// --- Request / Response Structs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    criteria: FilterCriteria,
    #[serde(default)]
    page: usize,
    page_size: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(flatten)]
    page: PageView,
    summary: FilterSummary,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    start_x: f64,
    end_x: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwipeResponse {
    command: Option<PageCommand>,
    #[serde(flatten)]
    showroom: ShowroomView,
}

// --- Helpers ---

pub(super) async fn load_catalog(app_state: &AppState) -> AppResult<CatalogSnapshot> {
    app_state.catalog.snapshot().await.map_err(AppError::Upstream)
}

// Filters the current catalog and cuts out one page
pub(super) async fn search_page(
    app_state: &AppState,
    criteria: &FilterCriteria,
    page: usize,
    page_size: usize,
) -> AppResult<(PageView, FilterSummary)> {
    let snapshot = load_catalog(app_state).await?;
    let filtered = app_state
        .filter_memo
        .filtered(snapshot.generation, &snapshot.cars, criteria);

    let mut browser = CarBrowser::new(page_size.min(MAX_PAGE_SIZE))?;
    browser.apply_filtered(snapshot.generation, criteria, filtered);
    // Page 0 of an empty result is a valid, empty page
    if page != 0 {
        browser.goto(page)?;
    }
    Ok((browser.view(), browser.summary().clone()))
}

pub(super) async fn synced_showroom(app_state: &AppState) -> AppResult<MutexGuard<'_, Showroom>> {
    let snapshot = load_catalog(app_state).await?;
    let mut showroom = app_state.showroom.lock().await;
    showroom.sync(&snapshot)?;
    Ok(showroom)
}

// --- Facets ---

pub async fn get_manufacturers(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("[HANDLER] /api/manufacturers - Request received.");
    let snapshot = load_catalog(&app_state).await?;
    let manufacturers = catalog::manufacturers(&snapshot.cars);
    tracing::debug!("[HANDLER] /api/manufacturers - Returning {} manufacturers.", manufacturers.len());
    Ok(Json(manufacturers))
}

pub async fn get_models(
    State(app_state): State<AppState>,
    Path(manufacturer): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("[HANDLER] /api/models/:manufacturer - Request received for: {}", manufacturer);
    let snapshot = load_catalog(&app_state).await?;
    Ok(Json(catalog::models_for(&snapshot.cars, &manufacturer)))
}

// --- Cars ---

pub async fn get_car(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("[HANDLER] /api/cars/:id - Request received for car {}", id);
    let snapshot = load_catalog(&app_state).await?;
    match snapshot.find(id) {
        Some(car) => Ok(Json(car.clone())),
        None => Err(AppError::NotFound(format!("Car {} not found", id))),
    }
}

pub async fn search_cars(
    State(app_state): State<AppState>,
    JsonExtract(request): JsonExtract<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("API call: search_cars with request: {:?}", request);

    let page_size = request.page_size.unwrap_or(app_state.settings.page_size);
    let (page, summary) = search_page(&app_state, &request.criteria, request.page, page_size).await?;

    if page.total_items == 0 {
        tracing::info!("No cars found matching criteria.");
    }

    Ok(Json(SearchResponse { page, summary }))
}

pub async fn summarize_filters(JsonExtract(criteria): JsonExtract<FilterCriteria>) -> Json<FilterSummary> {
    Json(describe(&criteria))
}

pub async fn export_cars(
    State(app_state): State<AppState>,
    JsonExtract(criteria): JsonExtract<FilterCriteria>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("API call: export_cars with criteria: {:?}", criteria);

    let snapshot = load_catalog(&app_state).await?;
    let filtered = app_state
        .filter_memo
        .filtered(snapshot.generation, &snapshot.cars, &criteria);
    let body = export::cars_to_csv(&filtered)?;
    let disposition = format!("attachment; filename=\"{}\"", export::export_file_name());

    tracing::info!("Exported {} cars to CSV.", filtered.len());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

// --- Finance ---

pub async fn get_finance_offers(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("API call: get_finance_offers");
    let offers = backend_api::fetch_finance_offers(&app_state.http_client, &app_state.settings)
        .await
        .map_err(AppError::Upstream)?;
    Ok(Json(offers))
}

pub async fn finance_quote(
    JsonExtract(request): JsonExtract<finance::QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("API call: finance_quote with request: {:?}", request);
    Ok(Json(finance::quote(&request)?))
}

// --- Showroom carousel ---

pub async fn get_showroom(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let showroom = synced_showroom(&app_state).await?;
    Ok(Json(showroom.view()?))
}

pub async fn showroom_next(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut showroom = synced_showroom(&app_state).await?;
    showroom.navigate(PageCommand::Next)?;
    Ok(Json(showroom.view()?))
}

pub async fn showroom_prev(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut showroom = synced_showroom(&app_state).await?;
    showroom.navigate(PageCommand::Prev)?;
    Ok(Json(showroom.view()?))
}

pub async fn showroom_goto(
    State(app_state): State<AppState>,
    Path(page): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("API call: showroom_goto page {}", page);
    let mut showroom = synced_showroom(&app_state).await?;
    showroom.goto(page)?;
    Ok(Json(showroom.view()?))
}

pub async fn showroom_swipe(
    State(app_state): State<AppState>,
    JsonExtract(swipe): JsonExtract<SwipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("API call: showroom_swipe {:?}", swipe);
    let mut showroom = synced_showroom(&app_state).await?;
    let command = showroom.swipe(swipe.start_x, swipe.end_x)?;
    Ok(Json(SwipeResponse {
        command,
        showroom: showroom.view()?,
    }))
}
