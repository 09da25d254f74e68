// Server-rendered storefront pages

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use reqwest::Url;
use serde::Deserialize;

use super::api::{search_page, synced_showroom};
use crate::{
    backend_api,
    engine::{format_price, FilterSummary},
    error::AppError,
    models::{Car, FilterCriteria, FinanceOffer},
    AppState,
};

// What a template needs to draw one car tile
struct CarCard {
    id: i64,
    title: String,
    category: String,
    price_text: String,
    colors_text: String,
    image_url: String,
}

impl From<&Car> for CarCard {
    fn from(car: &Car) -> Self {
        CarCard {
            id: car.id,
            title: car.display_name(),
            category: car.category.clone(),
            price_text: car
                .price()
                .map_or_else(|| "Price on request".to_string(), format_price),
            colors_text: car
                .available_exterior_colors
                .iter()
                .map(|tag| tag.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            image_url: car.image_url.clone().unwrap_or_default(),
        }
    }
}

struct OfferCard {
    name: String,
    rate_text: String,
    term_months: u32,
}

impl From<&FinanceOffer> for OfferCard {
    fn from(offer: &FinanceOffer) -> Self {
        OfferCard {
            name: offer.name.clone(),
            rate_text: format!("{:.2}%", offer.interest_rate),
            term_months: offer.term_months,
        }
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {
    slides: Vec<CarCard>,
    slide_number: usize,
    total_slides: usize,
    offers: Vec<OfferCard>,
}

#[derive(Template)]
#[template(path = "cars.html")]
struct CarsTemplate {
    cards: Vec<CarCard>,
    summary: FilterSummary,
    page_number: usize,
    total_pages: usize,
    total_items: usize,
    prev_href: String,
    next_href: String,
}

// Scalar facets that fit in a query string; color facets are API-only
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    manufacturer: Option<String>,
    model: Option<String>,
    category: Option<String>,
    min_year: Option<i32>,
    max_year: Option<i32>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    featured: Option<bool>,
    #[serde(default)]
    page: usize,
}

impl BrowseQuery {
    fn criteria(&self) -> FilterCriteria {
        let text = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        FilterCriteria {
            manufacturer: text(&self.manufacturer),
            model: text(&self.model),
            category: text(&self.category),
            min_year: self.min_year,
            max_year: self.max_year,
            min_price: finite(self.min_price),
            max_price: finite(self.max_price),
            featured: self.featured,
            ..FilterCriteria::default()
        }
    }

    // Link to another page of the same search
    fn href_for_page(&self, page: usize) -> String {
        let Ok(mut url) = Url::parse("http://localhost/cars") else {
            return "/cars".to_string();
        };
        {
            let mut pairs = url.query_pairs_mut();
            let texts = [
                ("manufacturer", &self.manufacturer),
                ("model", &self.model),
                ("category", &self.category),
            ];
            for (key, value) in texts {
                if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                    pairs.append_pair(key, value);
                }
            }
            let numbers = [
                ("min_year", self.min_year.map(f64::from)),
                ("max_year", self.max_year.map(f64::from)),
                ("min_price", finite(self.min_price)),
                ("max_price", finite(self.max_price)),
            ];
            for (key, value) in numbers {
                if let Some(value) = value {
                    pairs.append_pair(key, &value.to_string());
                }
            }
            if let Some(featured) = self.featured {
                pairs.append_pair("featured", &featured.to_string());
            }
            pairs.append_pair("page", &page.to_string());
        }
        format!("/cars?{}", url.query().unwrap_or_default())
    }
}

// The query parser accepts "NaN" and "inf"; neither is a usable bound
fn finite(bound: Option<f64>) -> Option<f64> {
    bound.filter(|v| v.is_finite())
}

fn render<T: Template>(template: T, name: &str) -> Result<Html<String>, AppError> {
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render {} template: {}", name, e);
            Err(AppError::InternalServerError(anyhow::Error::new(e)))
        }
    }
}

// Handler function to render the landing page
pub async fn landing_page(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let (slide, offers) = futures::future::join(
        async {
            let showroom = synced_showroom(&app_state).await?;
            showroom.view().map_err(AppError::from)
        },
        backend_api::fetch_finance_offers(&app_state.http_client, &app_state.settings),
    )
    .await;
    let slide = slide?;

    // The offers teaser is optional; the page still renders without it
    let offers = offers.unwrap_or_else(|e| {
        tracing::warn!("Finance offers unavailable for landing page: {:?}", e);
        Vec::new()
    });

    let template = LandingTemplate {
        slides: slide.page.items.iter().map(CarCard::from).collect(),
        slide_number: slide.page.current_page + 1,
        total_slides: slide.page.total_pages,
        offers: offers.iter().map(OfferCard::from).collect(),
    };
    render(template, "landing")
}

// Handler function to render one page of the car listing
pub async fn cars_page(
    State(app_state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Rendering cars page for query: {:?}", query);

    let criteria = query.criteria();
    let (page, summary) = search_page(&app_state, &criteria, query.page, app_state.settings.page_size).await?;

    let has_prev = page.current_page > 0;
    let has_next = page.current_page + 1 < page.total_pages;
    let template = CarsTemplate {
        cards: page.items.iter().map(CarCard::from).collect(),
        summary,
        page_number: page.current_page + 1,
        total_pages: page.total_pages,
        total_items: page.total_items,
        prev_href: if has_prev { query.href_for_page(page.current_page - 1) } else { String::new() },
        next_href: if has_next { query.href_for_page(page.current_page + 1) } else { String::new() },
    };
    render(template, "cars")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::describe;
    use crate::engine::filter::fixtures::{car, color};

    #[test]
    fn blank_query_values_are_no_constraint() {
        let query = BrowseQuery {
            manufacturer: Some("  ".into()),
            model: Some("Model 3".into()),
            ..Default::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.manufacturer, None);
        assert_eq!(criteria.model.as_deref(), Some("Model 3"));
    }

    #[test]
    fn non_finite_price_bounds_are_dropped() {
        let query = BrowseQuery {
            min_price: Some(f64::NAN),
            max_price: Some(f64::INFINITY),
            ..Default::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.min_price, None);
        assert_eq!(criteria.max_price, None);
        assert_eq!(query.href_for_page(0), "/cars?page=0");
    }

    #[test]
    fn page_links_keep_the_search() {
        let query = BrowseQuery {
            manufacturer: Some("Tesla".into()),
            min_price: Some(50000.0),
            ..Default::default()
        };
        assert_eq!(
            query.href_for_page(2),
            "/cars?manufacturer=Tesla&min_price=50000&page=2"
        );
    }

    #[test]
    fn car_card_formats_price_and_colors() {
        let mut c = car(5, "Tesla", "Model Y", 2024, Some(1_250_000.0));
        c.available_exterior_colors = vec![color(1, "Red"), color(2, "Black")];
        let card = CarCard::from(&c);
        assert_eq!(card.title, "2024 Tesla Model Y");
        assert_eq!(card.price_text, "1.3M");
        assert_eq!(card.colors_text, "Red, Black");

        let no_price = CarCard::from(&car(6, "BYD", "Seal", 2024, None));
        assert_eq!(no_price.price_text, "Price on request");
    }

    #[test]
    fn cars_template_renders_empty_state() {
        let template = CarsTemplate {
            cards: Vec::new(),
            summary: describe(&FilterCriteria::default()),
            page_number: 1,
            total_pages: 0,
            total_items: 0,
            prev_href: String::new(),
            next_href: String::new(),
        };
        let html = template.render().unwrap();
        assert!(html.contains("No cars match your filters"));
    }
}
