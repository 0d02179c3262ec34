use crate::core::{FetchOutcome, NumberSource};
use futures::future;
use std::time::Duration;

/// 對所有來源同時扇出抓取的聚合器。
///
/// 等待每一個來源塵埃落定(join-all-settled),個別失敗不會中止其他抓取,
/// 也不會讓整輪失敗:全部失敗只會得到空的合併結果。
pub struct FanOutAggregator<S: NumberSource> {
    source: S,
}

impl<S: NumberSource> FanOutAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// 每個 URL 發出一次抓取,全部同時啟動,回傳各來源的標記結果。
    pub async fn collect_outcomes(&self, urls: &[String], timeout: Duration) -> Vec<FetchOutcome> {
        let fetches = urls.iter().map(|url| async move {
            FetchOutcome {
                url: url.clone(),
                result: self.source.fetch_numbers(url, timeout).await,
            }
        });
        future::join_all(fetches).await
    }

    /// 合併所有成功來源的數字。失敗的來源記錄原因後丟棄。
    pub async fn aggregate(&self, urls: &[String], timeout: Duration) -> Vec<f64> {
        if urls.is_empty() {
            tracing::debug!("🔀 No sources supplied, skipping fan-out");
            return Vec::new();
        }

        tracing::debug!(
            "🔀 Fanning out to {} sources (timeout: {:?})",
            urls.len(),
            timeout
        );

        let outcomes = self.collect_outcomes(urls, timeout).await;
        let successes = outcomes.iter().filter(|o| o.is_success()).count();

        let mut merged = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(numbers) => {
                    tracing::debug!("🔀 {}: merged {} values", outcome.url, numbers.len());
                    merged.extend(numbers);
                }
                Err(reason) => {
                    tracing::warn!("🔀 Source dropped: {}", reason);
                }
            }
        }

        tracing::info!(
            "🔀 Fan-out settled: {}/{} sources merged, {} values",
            successes,
            urls.len(),
            merged.len()
        );

        merged
    }
}
