// Functions to interact with the dealership REST backend (cars, finance offers)

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::{sleep, Duration};

use crate::config::Settings;
use crate::models::{Car, FinanceOffer};

const MAX_RETRIES: u32 = 5;
const INITIAL_RETRY_DELAY_MS: u64 = 500;

// Builds the shared HTTP client once at startup
pub fn build_client(settings: &Settings) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(settings.request_timeout());

    if let Some(proxy_url) = settings.proxy_url.as_deref().filter(|url| !url.is_empty()) {
        let proxy = reqwest::Proxy::all(proxy_url)
            .with_context(|| format!("Invalid proxy URL '{}'", proxy_url))?;
        builder = builder.proxy(proxy);
        tracing::info!("Routing backend requests through configured proxy.");
    }

    builder.build().context("Failed to build reqwest client")
}

// List endpoints answer either with a bare array or with {"data": [...]}
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { data: items } => items,
        }
    }
}

fn endpoint(settings: &Settings, path: &str) -> String {
    format!("{}/{}", settings.backend_api_url.trim_end_matches('/'), path)
}

fn parse_listing<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_slice::<Listing<T>>(body).map(Listing::into_vec)
}

// GETs a list endpoint, retrying transient failures with exponential backoff
async fn fetch_listing<T: DeserializeOwned>(client: &Client, url: &str) -> Result<Vec<T>> {
    let mut retry_delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS);

    for attempt in 0..MAX_RETRIES {
        tracing::debug!(url, attempt, "Fetch attempt {}/{}", attempt + 1, MAX_RETRIES);

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    tracing::warn!(url, attempt, status = %status, "HTTP error encountered. Retrying...");
                } else {
                    match response.bytes().await {
                        Ok(body) => match parse_listing::<T>(&body) {
                            Ok(items) => {
                                tracing::debug!(url, attempt, count = items.len(), "Successfully fetched listing");
                                return Ok(items);
                            }
                            Err(e) => {
                                let response_text = String::from_utf8_lossy(&body);
                                tracing::debug!(url, attempt, error = %e, response_body = %response_text, "JSON parse error details");
                                tracing::warn!(url, attempt, error = %e, "JSON parse error encountered. Retrying...");
                            }
                        },
                        Err(e) => {
                            tracing::warn!(url, attempt, error = %e, "Failed to read response bytes. Retrying...");
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(url, attempt, error = %e, "Network error during request. Retrying...");
            }
        }

        if attempt + 1 < MAX_RETRIES {
            sleep(retry_delay).await;
            retry_delay *= 2;
        }
    }

    Err(anyhow!("Failed to fetch {} after {} attempts", url, MAX_RETRIES))
}

pub async fn fetch_cars(client: &Client, settings: &Settings) -> Result<Vec<Car>> {
    let url = endpoint(settings, "cars");
    let cars = fetch_listing::<Car>(client, &url)
        .await
        .context("Failed to fetch cars from backend")?;
    tracing::info!("Fetched {} cars from backend.", cars.len());
    Ok(cars)
}

pub async fn fetch_finance_offers(client: &Client, settings: &Settings) -> Result<Vec<FinanceOffer>> {
    let url = endpoint(settings, "finance-offers");
    fetch_listing::<FinanceOffer>(client, &url)
        .await
        .context("Failed to fetch finance offers from backend")
}
