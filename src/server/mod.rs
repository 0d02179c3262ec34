use crate::core::aggregator::FanOutAggregator;
use crate::core::fetcher::HttpNumberSource;
use crate::core::{processor, ConfigProvider};
use crate::domain::model::{ErrorResponse, SortedNumbers};
use crate::utils::error::{AggError, Result};
use crate::utils::validation::validate_url;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<FanOutAggregator<HttpNumberSource>>,
    source_timeout: Duration,
    max_sources: usize,
}

impl AppState {
    pub fn new<C: ConfigProvider>(
        aggregator: FanOutAggregator<HttpNumberSource>,
        config: &C,
    ) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            source_timeout: config.source_timeout(),
            max_sources: config.max_sources(),
        }
    }

    /// 核心管線:扇出聚合,然後去重排序。
    async fn run_pipeline(&self, urls: &[String]) -> Result<Vec<f64>> {
        let merged = self.aggregator.aggregate(urls, self.source_timeout).await;
        Ok(processor::dedupe_and_sort(merged))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sorted-numbers", get(sorted_numbers))
        .route("/healthz", get(health))
        .with_state(state)
}

async fn sorted_numbers(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let urls = match parse_source_urls(query.as_deref(), state.max_sources) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::warn!("🛑 Rejected request: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.run_pipeline(&urls).await {
        Ok(numbers) => Json(SortedNumbers { numbers }).into_response(),
        Err(e) => {
            tracing::error!("❌ Aggregation pipeline failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch or sort numbers".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// 請求必須帶至少一個合法的 url 參數;核心管線只會看到驗證過的 URL。
fn parse_source_urls(query: Option<&str>, max_sources: usize) -> Result<Vec<String>> {
    let query = query.unwrap_or("");

    let urls: Vec<String> = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .collect();

    if urls.is_empty() {
        return Err(AggError::ValidationError {
            message: "at least one url parameter is required".to_string(),
        });
    }

    if urls.len() > max_sources {
        return Err(AggError::ValidationError {
            message: format!(
                "too many sources: {} given, limit is {}",
                urls.len(),
                max_sources
            ),
        });
    }

    for url in &urls {
        validate_url("url", url)?;
    }

    Ok(urls)
}
