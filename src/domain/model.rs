use crate::utils::error::SourceError;
use serde::{Deserialize, Serialize};

/// 單一來源在一輪扇出中的最終結果。失敗原因只保留給日誌使用。
#[derive(Debug)]
pub struct FetchOutcome {
    pub url: String,
    pub result: std::result::Result<Vec<f64>, SourceError>,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortedNumbers {
    pub numbers: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
