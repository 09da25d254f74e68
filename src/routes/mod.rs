// Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

mod api;
mod pages;

pub fn create_router(app_state: AppState) -> Router {
    let api_router: Router<AppState> = Router::new()
        // Facets
        .route("/manufacturers", get(api::get_manufacturers))
        .route("/models/:manufacturer", get(api::get_models))
        // Browsing
        .route("/cars/search", post(api::search_cars))
        .route("/cars/summary", post(api::summarize_filters))
        .route("/cars/export", post(api::export_cars))
        .route("/cars/:id", get(api::get_car))
        // Finance
        .route("/finance/offers", get(api::get_finance_offers))
        .route("/finance/quote", post(api::finance_quote))
        // Landing carousel
        .route("/showroom", get(api::get_showroom))
        .route("/showroom/next", post(api::showroom_next))
        .route("/showroom/prev", post(api::showroom_prev))
        .route("/showroom/goto/:page", post(api::showroom_goto))
        .route("/showroom/swipe", post(api::showroom_swipe));

    Router::new()
        .route("/", get(pages::landing_page))
        .route("/cars", get(pages::cars_page))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
