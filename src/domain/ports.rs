use crate::utils::error::SourceError;
use async_trait::async_trait;
use std::time::Duration;

/// 數字來源的抽象。讓網路效果可以在測試中注入替身。
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch_numbers(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<Vec<f64>, SourceError>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_host(&self) -> &str;
    fn port(&self) -> u16;
    fn source_timeout(&self) -> Duration;
    fn max_sources(&self) -> usize;
}
