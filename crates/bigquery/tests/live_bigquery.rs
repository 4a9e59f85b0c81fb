//! Tests against the live BigQuery service.
//!
//! Ignored by default. Run with:
//!
//! ```bash
//! GOOGLE_KEY_PATH=/path/to/key.json GOOGLE_PROJECT_ID=my-project \
//!   cargo test -p bqshould-bigquery --test live_bigquery -- --ignored
//! ```

use bqshould::TestSet;
use bqshould_bigquery::{BigQueryConfig, BigQueryExecutor};

const COMMENT_COUNT: i64 = 8399417;

async fn executor() -> BigQueryExecutor {
    let config = BigQueryConfig::from_env().expect("GOOGLE_KEY_PATH and GOOGLE_PROJECT_ID must be set");
    BigQueryExecutor::connect(config)
        .await
        .expect("Failed to connect to BigQuery")
}

#[tokio::test]
#[ignore = "requires BigQuery credentials"]
async fn test_legacy_sql() {
    let executor = executor().await;
    let mut set =
        TestSet::query("SELECT COUNT(*) FROM [bigquery-public-data:hacker_news.comments] LIMIT 1000");
    set.should(0, 0).be_equal(COMMENT_COUNT).label("legacy count");

    set.test(&executor).await.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires BigQuery credentials"]
async fn test_standard_sql() {
    let executor = executor().await;
    let mut set = TestSet::query(
        "#standardSQL\nSELECT COUNT(*) FROM `bigquery-public-data.hacker_news.comments` LIMIT 1000",
    );
    set.should(0, 0).be_equal(COMMENT_COUNT).label("standard count");

    set.test(&executor).await.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires BigQuery credentials"]
async fn test_invalid_sql_is_execution_error() {
    let executor = executor().await;
    let mut set = TestSet::query("#standardSQL\nSELEC 1");
    set.should(0, 0).be_equal(1);
    set.should(0, 1).be_equal(2);

    let outcome = set.test(&executor).await;
    assert!(!outcome.valid);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.execution_error().is_some());
}
