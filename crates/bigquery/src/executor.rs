//! BigQuery implementation of `QueryExecutor`.

use crate::cell::rows_to_result_set;
use crate::config::BigQueryConfig;
use crate::dialect::SqlDialect;
use bqshould::{ExecutionError, QueryExecutor, ResultSet};
use gcp_bigquery_client::model::get_query_results_parameters::GetQueryResultsParameters;
use gcp_bigquery_client::model::query_request::QueryRequest;
use gcp_bigquery_client::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Runs queries as BigQuery jobs.
///
/// Only the first page of results is read, which is enough for cell
/// assertions near the top of the result.
pub struct BigQueryExecutor {
    client: Client,
    config: BigQueryConfig,
}

impl BigQueryExecutor {
    /// Read the service-account key and create an authenticated client.
    pub async fn connect(config: BigQueryConfig) -> Result<Self, ExecutionError> {
        config.validate()?;

        let sa_key = gcp_bigquery_client::yup_oauth2::read_service_account_key(&config.key_path)
            .await
            .map_err(|e| {
                ExecutionError::Credentials(format!(
                    "Failed to read service account key {}: {e}",
                    config.key_path.display()
                ))
            })?;

        let client = Client::from_service_account_key(sa_key, false)
            .await
            .map_err(|e| ExecutionError::Client(format!("Failed to create BigQuery client: {e}")))?;

        info!(
            "Connected to BigQuery (project={}, dialect={})",
            config.project_id, config.default_dialect
        );
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BigQueryConfig {
        &self.config
    }

    /// Wait for an unfinished job and return its first page of rows.
    async fn wait_for_job(
        &self,
        job_id: &str,
        location: Option<String>,
        started: Instant,
    ) -> Result<ResultSet, ExecutionError> {
        loop {
            let remaining = self.config.timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(ExecutionError::Timeout(self.config.timeout));
            }
            debug!("Waiting for BigQuery job {job_id} ({remaining:?} left)");

            let page = self
                .client
                .job()
                .get_query_results(
                    &self.config.project_id,
                    job_id,
                    results_parameters(location.clone(), remaining),
                )
                .await
                .map_err(|e| ExecutionError::Query(format!("Failed to fetch query results: {e}")))?;

            if page.job_complete != Some(false) {
                return Ok(rows_to_result_set(page.rows.as_deref()));
            }
        }
    }
}

/// Build the job request for `sql`.
pub fn build_query_request(config: &BigQueryConfig, sql: &str) -> QueryRequest {
    let dialect = SqlDialect::detect(sql, config.default_dialect);
    let mut request = QueryRequest::new(sql);
    request.use_legacy_sql = dialect.is_legacy();
    request.location = config.location.clone();
    request.timeout_ms = Some(timeout_millis(config.timeout));
    request
}

/// Poll parameters whose long-poll wait ends with the remaining budget.
fn results_parameters(location: Option<String>, remaining: Duration) -> GetQueryResultsParameters {
    GetQueryResultsParameters {
        location,
        timeout_ms: Some(timeout_millis(remaining)),
        ..Default::default()
    }
}

fn timeout_millis(timeout: Duration) -> i32 {
    i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX)
}

#[async_trait::async_trait]
impl QueryExecutor for BigQueryExecutor {
    async fn execute(&self, sql: &str) -> Result<ResultSet, ExecutionError> {
        let started = Instant::now();
        let request = build_query_request(&self.config, sql);
        debug!(
            "Submitting query (legacy_sql={}): {}",
            request.use_legacy_sql, sql
        );

        let response = self
            .client
            .job()
            .query(&self.config.project_id, request)
            .await
            .map_err(|e| ExecutionError::Query(e.to_string()))?;

        let result = if response.job_complete == Some(false) {
            let job_ref = response
                .job_reference
                .ok_or_else(|| ExecutionError::Query("No job reference in query response".to_string()))?;
            let job_id = job_ref
                .job_id
                .ok_or_else(|| ExecutionError::Query("No job_id in query response".to_string()))?;
            let location = job_ref.location.or_else(|| self.config.location.clone());
            self.wait_for_job(&job_id, location, started).await?
        } else {
            rows_to_result_set(response.rows.as_deref())
        };

        debug!(
            "Query finished in {:?} with {} row(s)",
            started.elapsed(),
            result.num_rows()
        );
        Ok(result)
    }
}
