use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tandem_analytics::service::SeriesService;
use tandem_core::common::CorrelationKind;
use tandem_core::config::AnalyticsConfig;
use tandem_core::series::entity::NewsQuery;
use tandem_core::series::error::AnalyticsError;
use tandem_store::series::SqliteSeriesStore;

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 8, 1).unwrap() + Days::new(offset)
}

async fn seed_prices(store: &SqliteSeriesStore, symbol: &str, n: u64, f: fn(u64) -> f64) -> anyhow::Result<()> {
    for i in 0..n {
        sqlx::query(
            "INSERT INTO STOCK_TRADES (SYMBOL, TRADE_DATE, OPEN_PRICE, HIGH_PRICE, LOW_PRICE, CLOSE_PRICE, VOLUME) \
             VALUES (?, ?, '0', '0', '0', ?, 1000)",
        )
        .bind(symbol)
        .bind(day(i).to_string())
        .bind(format!("{:.2}", f(i)))
        .execute(store.pool())
        .await?;
    }
    Ok(())
}

async fn seed_news(store: &SqliteSeriesStore, date: &str, title: &str) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO NEWS (NEWS_DATE, NEWS_SRC, NEWS_URL, NEWS_TITLE, NEWS_TEXT) VALUES (?, 'wire', NULL, ?, 'body')",
    )
    .bind(date)
    .bind(title)
    .execute(store.pool())
    .await?;
    Ok(())
}

fn up(i: u64) -> f64 {
    50.0 + ((i * 5) % 17) as f64
}

fn down(i: u64) -> f64 {
    200.0 - ((i * 5) % 17) as f64 * 2.0
}

#[tokio::test]
async fn test_correlation_against_sqlite() -> anyhow::Result<()> {
    let store = Arc::new(SqliteSeriesStore::in_memory().await?);
    seed_prices(&store, "AAPL", 60, up).await?;
    seed_prices(&store, "GOOG", 60, down).await?;

    let service = SeriesService::new(store, AnalyticsConfig::default());
    let report = service
        .fetch_correlation("AAPL", "GOOG", CorrelationKind::StockStock)
        .await;

    assert_eq!(report.trace.len(), 10);
    assert_eq!(report.trace.points[0].date, day(50));
    // 完全负线性相关
    assert!(report.trace.coefficients().all(|c| (c + 1.0).abs() < 1e-9));

    let prices = service.fetch_price_series("AAPL").await;
    assert_eq!(prices.points.len(), 29);
    assert!((prices.points[0].value - up(31)).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_unknown_symbol_against_sqlite() -> anyhow::Result<()> {
    let store = Arc::new(SqliteSeriesStore::in_memory().await?);
    seed_prices(&store, "AAPL", 60, up).await?;

    let service = SeriesService::new(store, AnalyticsConfig::default());
    let result = service
        .try_fetch_correlation("AAPL", "ZZZZ", CorrelationKind::StockStock)
        .await;
    assert!(matches!(result, Err(AnalyticsError::InvalidIdentifier(_))));
    Ok(())
}

#[tokio::test]
async fn test_news_ordering_limit_and_bounds() -> anyhow::Result<()> {
    let store = Arc::new(SqliteSeriesStore::in_memory().await?);
    seed_news(&store, "2017-07-18 09:00:00.000000000", "Alpha").await?;
    seed_news(&store, "2017-07-18 09:00:00.000000000", "Beta").await?;
    seed_news(&store, "2017-07-17 12:30:00.000000000", "Gamma").await?;
    seed_news(&store, "2017-07-10 08:00:00.000000000", "Delta").await?;
    // 重复标题只返回一条
    seed_news(&store, "2017-07-10 08:00:00.000000000", "Delta").await?;

    let service = SeriesService::new(store, AnalyticsConfig::default());

    let all = service
        .list_news(NewsQuery { start: None, end: None, max: 10 })
        .await?;
    let titles: Vec<_> = all.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Beta", "Alpha", "Gamma", "Delta"]);
    assert_eq!(all[0].source.as_deref(), Some("wire"));
    assert_eq!(all[0].url, None);

    let limited = service
        .list_news(NewsQuery { start: None, end: None, max: 2 })
        .await?;
    assert_eq!(limited.len(), 2);

    let bounded = service
        .list_news(NewsQuery {
            start: NaiveDate::from_ymd_opt(2017, 7, 11),
            end: NaiveDate::from_ymd_opt(2017, 7, 18),
            max: 10,
        })
        .await?;
    // 终点日只包含 05:40 之前的新闻
    let titles: Vec<_> = bounded.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Gamma"]);

    let reversed = service
        .list_news(NewsQuery {
            start: NaiveDate::from_ymd_opt(2017, 7, 18),
            end: NaiveDate::from_ymd_opt(2017, 7, 11),
            max: 10,
        })
        .await;
    assert!(matches!(reversed, Err(AnalyticsError::InvalidQuery(_))));

    let zero = service
        .list_news(NewsQuery { start: None, end: None, max: 0 })
        .await;
    assert!(matches!(zero, Err(AnalyticsError::InvalidQuery(_))));
    Ok(())
}
