use tandem_core::store::error::StoreError;
use tandem_core::store::port::{Query, SeriesStore, SqlValue};
use tandem_store::series::SqliteSeriesStore;
use tempfile::tempdir;

async fn insert_trade(store: &SqliteSeriesStore, symbol: &str, date: &str, close: &str) {
    sqlx::query("INSERT INTO STOCK_TRADES (SYMBOL, TRADE_DATE, CLOSE_PRICE) VALUES (?, ?, ?)")
        .bind(symbol)
        .bind(date)
        .bind(close)
        .execute(store.pool())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_store_full_integration() -> anyhow::Result<()> {
    // 1. 初始化临时测试环境 (嵌套目录应自动创建)
    let tmp_dir = tempdir()?;
    let db_path = tmp_dir.path().join("nested").join("series.db");
    let store = SqliteSeriesStore::open(&db_path, 2).await?;
    assert!(db_path.exists());

    insert_trade(&store, "F", "2017-01-04", "12.59").await;
    insert_trade(&store, "F", "2017-01-03", "12.59").await;
    insert_trade(&store, "F", "2017-01-03", "12.59").await;
    insert_trade(&store, "TSLA", "2017-01-03", "216.99").await;

    // 2. 命名参数绑定 + DISTINCT + 排序
    let query = Query::new(
        "SELECT DISTINCT SYMBOL, TRADE_DATE, CLOSE_PRICE FROM STOCK_TRADES \
         WHERE (\"SYMBOL\" = $symbol AND TRADE_DATE >= $startDate AND TRADE_DATE <= $endDate) \
         ORDER BY TRADE_DATE",
    )
    .bind("symbol", "F")
    .bind("startDate", "2017-01-01")
    .bind("endDate", "2017-12-31");
    let rows = store.run_query(&query).await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["TRADE_DATE"], SqlValue::Text("2017-01-03".to_string()));
    assert_eq!(rows[1]["TRADE_DATE"], SqlValue::Text("2017-01-04".to_string()));
    assert_eq!(rows[0]["CLOSE_PRICE"], SqlValue::Text("12.59".to_string()));

    // 3. 重新打开同一文件，数据保留且建表幂等
    drop(store);
    let reopened = SqliteSeriesStore::open(&db_path, 1).await?;
    let symbols = reopened
        .run_query(&Query::new("SELECT DISTINCT SYMBOL FROM STOCK_TRADES ORDER BY SYMBOL"))
        .await?;
    let symbols: Vec<_> = symbols.iter().map(|r| r["SYMBOL"].clone()).collect();
    assert_eq!(symbols, vec![SqlValue::from("F"), SqlValue::from("TSLA")]);
    Ok(())
}

#[tokio::test]
async fn test_decodes_storage_classes() -> anyhow::Result<()> {
    let store = SqliteSeriesStore::in_memory().await?;
    let rows = store
        .run_query(
            &Query::new("SELECT $i AS I, $r AS R, $t AS T, $n AS N, $i + 1 AS J")
                .bind("i", 41_i64)
                .bind("r", 1.5)
                .bind("t", "text")
                .bind("n", None::<String>),
        )
        .await?;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["I"], SqlValue::Integer(41));
    assert_eq!(row["J"], SqlValue::Integer(42));
    assert_eq!(row["R"], SqlValue::Real(1.5));
    assert_eq!(row["T"], SqlValue::Text("text".to_string()));
    assert_eq!(row["N"], SqlValue::Null);
    Ok(())
}

#[tokio::test]
async fn test_quoted_placeholder_is_not_bound() -> anyhow::Result<()> {
    let store = SqliteSeriesStore::in_memory().await?;
    let rows = store
        .run_query(&Query::new("SELECT '$symbol' AS S, $x AS X").bind("x", 1_i64))
        .await?;
    assert_eq!(rows[0]["S"], SqlValue::from("$symbol"));
    Ok(())
}

#[tokio::test]
async fn test_errors_surface_as_store_error() -> anyhow::Result<()> {
    let store = SqliteSeriesStore::in_memory().await?;

    let unbound = store
        .run_query(&Query::new("SELECT * FROM STOCK_TRADES WHERE SYMBOL = $symbol"))
        .await;
    assert!(matches!(unbound, Err(StoreError::Query(_))));

    let missing_table = store.run_query(&Query::new("SELECT * FROM NO_SUCH_TABLE")).await;
    assert!(matches!(missing_table, Err(StoreError::Database(_))));
    Ok(())
}
