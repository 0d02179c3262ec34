use crate::core::NumberSource;
use crate::utils::error::SourceError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 透過 HTTP GET 抓取數字的來源實作。
///
/// 每次抓取都是回應與計時器的競賽：reqwest 的 per-request timeout 先到就固定
/// 結果為 `Timeout`，之後底層連線即使完成也不會再被觀察到。
pub struct HttpNumberSource {
    client: Client,
}

impl HttpNumberSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpNumberSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    async fn fetch_numbers(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<Vec<f64>, SourceError> {
        tracing::debug!("📡 Fetching numbers from: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_request_error(url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::BadStatus {
                url: url.to_string(),
                status,
            });
        }

        // timeout 也涵蓋讀取 body 的時間
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| classify_request_error(url, timeout, e))?;

        extract_numbers(url, payload)
    }
}

fn classify_request_error(url: &str, timeout: Duration, e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else if e.is_decode() {
        SourceError::BadPayload {
            url: url.to_string(),
            reason: e.to_string(),
        }
    } else {
        SourceError::Request {
            url: url.to_string(),
            source: e,
        }
    }
}

/// 從回應 body 取出數字序列。接受純數字陣列，或帶 `numbers` 欄位的物件。
/// 任何非數字元素都讓整個 payload 視為失敗，不做部分擷取。
fn extract_numbers(url: &str, payload: serde_json::Value) -> Result<Vec<f64>, SourceError> {
    let items = match payload {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("numbers") {
            Some(serde_json::Value::Array(items)) => items,
            _ => {
                return Err(SourceError::BadPayload {
                    url: url.to_string(),
                    reason: "expected a JSON array of numbers or a 'numbers' array".to_string(),
                })
            }
        },
        other => {
            return Err(SourceError::BadPayload {
                url: url.to_string(),
                reason: format!("expected a JSON array of numbers, got: {}", other),
            })
        }
    };

    items
        .into_iter()
        .map(|item| {
            item.as_f64().ok_or_else(|| SourceError::BadPayload {
                url: url.to_string(),
                reason: format!("non-numeric element in payload: {}", item),
            })
        })
        .collect()
}
