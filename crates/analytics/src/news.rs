use tandem_core::series::entity::{NewsItem, NewsQuery};
use tandem_core::series::error::AnalyticsError;
use tandem_core::store::port::{Row, SeriesStore, SqlValue};
use tracing::debug;

use crate::queries;

/// # Summary
/// 查询新闻列表。
///
/// # Logic
/// 1. 拒绝 `max == 0` 以及起点晚于终点的请求。
/// 2. 以绑定参数构造查询：未给出的日期边界绑定为 NULL，由 SQL 中的 `IS NULL` 条件放行。
/// 3. 将结果行解码为 `NewsItem`，缺少标题的行被跳过。
///
/// # Arguments
/// * `store`: 序列存储。
/// * `query`: 查询条件，`max` 已被裁剪到配置上限内。
///
/// # Returns
/// 按日期倒序、标题倒序排列的新闻列表。
pub async fn list_news(
    store: &dyn SeriesStore,
    query: NewsQuery,
) -> Result<Vec<NewsItem>, AnalyticsError> {
    if query.max == 0 {
        return Err(AnalyticsError::InvalidQuery(
            "max must be positive".to_string(),
        ));
    }
    if let (Some(start), Some(end)) = (query.start, query.end)
        && start > end
    {
        return Err(AnalyticsError::InvalidQuery(format!(
            "startDate {} is after endDate {}",
            start, end
        )));
    }

    let rows = store
        .run_query(&queries::news(query.start, query.end, query.max))
        .await?;
    debug!("Fetched {} news rows", rows.len());
    Ok(rows.iter().filter_map(decode_news).collect())
}

fn text(row: &Row, column: &str) -> Option<String> {
    row.get(column).and_then(SqlValue::as_text).map(str::to_string)
}

fn decode_news(row: &Row) -> Option<NewsItem> {
    Some(NewsItem {
        title: text(row, "NEWS_TITLE")?,
        date: text(row, "NEWS_DATE"),
        source: text(row, "NEWS_SRC"),
        url: text(row, "NEWS_URL"),
        text: text(row, "NEWS_TEXT"),
    })
}
