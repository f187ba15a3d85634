use std::sync::Arc;

use tandem_core::common::CorrelationKind;
use tandem_core::config::AnalyticsConfig;
use tandem_core::series::entity::{
    CorrelationReport, CorrelationTrace, NewsItem, NewsQuery, PriceSeries, TimeSeries,
};
use tandem_core::series::error::AnalyticsError;
use tandem_core::store::port::SeriesStore;
use tracing::{debug, warn};

use crate::correlation::{AlignedPair, rolling_correlation};
use crate::news;
use crate::retriever::SeriesRetriever;
use crate::validator::SymbolValidator;

/// # Summary
/// 序列服务 (Facade)：编排校验、检索、对齐与相关性计算。
///
/// # Invariants
/// - 不持有跨请求的可变状态；每次请求独立构造序列与轨迹。
/// - `fetch_*` 系列方法永不失败，任何错误都记录 warn 日志并降级为空结果。
/// - 所有方法都是普通 `async fn`，调用方可以用 `tokio::time::timeout` 包裹或直接丢弃 Future 取消。
pub struct SeriesService {
    store: Arc<dyn SeriesStore>,
    validator: SymbolValidator,
    retriever: SeriesRetriever,
    config: AnalyticsConfig,
}

impl SeriesService {
    /// # Summary
    /// 构造序列服务。
    ///
    /// # Arguments
    /// * `store`: 序列存储实现。
    /// * `config`: 已校验的分析配置 (窗口长度与日期边界)。
    pub fn new(store: Arc<dyn SeriesStore>, config: AnalyticsConfig) -> Arc<Self> {
        Arc::new(Self {
            validator: SymbolValidator::new(store.clone()),
            retriever: SeriesRetriever::new(store.clone()),
            store,
            config,
        })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// # Summary
    /// 获取主展示区间内的股票价格序列 (可失败版本)。
    ///
    /// # Logic
    /// 1. 校验股票代码。
    /// 2. 在主展示区间内检索收盘价。
    pub async fn try_fetch_price_series(&self, symbol: &str) -> Result<TimeSeries, AnalyticsError> {
        self.validator.validate(&[symbol]).await?;
        self.retriever
            .get_stock_series(symbol, self.config.primary)
            .await
    }

    /// 获取价格序列，失败时返回空序列
    pub async fn fetch_price_series(&self, symbol: &str) -> PriceSeries {
        match self.try_fetch_price_series(symbol).await {
            Ok(series) => series.into(),
            Err(e) => {
                warn!("Price series for {} unavailable: {}", symbol, e);
                PriceSeries::empty(symbol)
            }
        }
    }

    /// # Summary
    /// 计算两条序列的滚动相关性轨迹 (可失败版本)。
    ///
    /// # Logic
    /// 1. 校验股票代码：股票对校验两个代码，股票-货币只校验股票。
    /// 2. 在相关性区间内并发检索两条序列，任一失败则整体失败。
    /// 3. 将两条序列合并到公共日期轴。
    /// 4. 按配置窗口计算滚动相关性。
    ///
    /// # Arguments
    /// * `id_a`: 股票代码。
    /// * `id_b`: 第二个股票代码或货币代码。
    /// * `kind`: 配对类型。
    ///
    /// # Returns
    /// 相关性轨迹；公共日期不足一个窗口时返回空轨迹。
    pub async fn try_fetch_correlation(
        &self,
        id_a: &str,
        id_b: &str,
        kind: CorrelationKind,
    ) -> Result<CorrelationTrace, AnalyticsError> {
        match kind {
            CorrelationKind::StockStock => self.validator.validate(&[id_a, id_b]).await?,
            CorrelationKind::StockCurrency => self.validator.validate(&[id_a]).await?,
        }

        let bound = self.config.correlation;
        let (left, right) = tokio::try_join!(
            self.retriever.get_stock_series(id_a, bound),
            self.retriever.get_series(kind.second_kind(), id_b, bound),
        )?;

        let pair = AlignedPair::align(&left, &right, self.config.alignment)?;
        let trace = rolling_correlation(&pair, self.config.window);
        debug!(
            "Correlated {} vs {} ({}): {} aligned rows, {} coefficients",
            id_a,
            id_b,
            kind,
            pair.len(),
            trace.len()
        );
        Ok(trace)
    }

    /// 计算相关性，失败时返回空轨迹
    pub async fn fetch_correlation(
        &self,
        id_a: &str,
        id_b: &str,
        kind: CorrelationKind,
    ) -> CorrelationReport {
        match self.try_fetch_correlation(id_a, id_b, kind).await {
            Ok(trace) => CorrelationReport {
                id_a: id_a.to_string(),
                id_b: id_b.to_string(),
                kind,
                trace,
            },
            Err(e) => {
                warn!("Correlation {} vs {} ({}) unavailable: {}", id_a, id_b, kind, e);
                CorrelationReport::empty(id_a, id_b, kind)
            }
        }
    }

    /// # Summary
    /// 查询新闻列表。
    ///
    /// # Logic
    /// 1. 将请求条数裁剪到配置上限。
    /// 2. 委托给 `news::list_news`。
    pub async fn list_news(&self, mut query: NewsQuery) -> Result<Vec<NewsItem>, AnalyticsError> {
        query.max = query.max.min(self.config.news_max_limit);
        news::list_news(self.store.as_ref(), query).await
    }
}
