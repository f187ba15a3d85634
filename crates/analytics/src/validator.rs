use std::collections::HashSet;
use std::sync::Arc;

use tandem_core::series::error::AnalyticsError;
use tandem_core::store::port::SeriesStore;
use tracing::debug;

use crate::queries;

/// # Summary
/// 股票代码校验器：确认请求的代码都存在于存储已知的股票集合中。
///
/// # Invariants
/// - 每次调用都重新读取已知集合，不跨请求缓存。
/// - 只校验股票代码；货币代码不在该集合内，不经过本校验器。
pub struct SymbolValidator {
    store: Arc<dyn SeriesStore>,
}

impl SymbolValidator {
    pub fn new(store: Arc<dyn SeriesStore>) -> Self {
        Self { store }
    }

    /// # Summary
    /// 校验一个或多个股票代码。
    ///
    /// # Logic
    /// 1. 列表为空直接失败，不访问存储。
    /// 2. 读取去重后的已知代码集合。
    /// 3. 任一代码缺失即整体失败 (不存在部分成功)。
    ///
    /// # Arguments
    /// * `symbols`: 待校验的股票代码。
    ///
    /// # Returns
    /// 全部存在返回 Ok，否则返回 `AnalyticsError::InvalidIdentifier`；存储失败透传为 `Store`。
    pub async fn validate(&self, symbols: &[&str]) -> Result<(), AnalyticsError> {
        if symbols.is_empty() {
            return Err(AnalyticsError::InvalidIdentifier(
                "no symbols requested".to_string(),
            ));
        }

        let rows = self.store.run_query(&queries::known_symbols()).await?;
        let known: HashSet<&str> = rows
            .iter()
            .filter_map(|row| row.get("SYMBOL").and_then(|v| v.as_text()))
            .collect();
        debug!("Validating {:?} against {} known symbols", symbols, known.len());

        match symbols.iter().find(|s| !known.contains(**s)) {
            Some(unknown) => Err(AnalyticsError::InvalidIdentifier(format!(
                "unknown symbol {}",
                unknown
            ))),
            None => Ok(()),
        }
    }
}
