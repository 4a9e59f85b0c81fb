//! A query together with the conditions its result must satisfy.

use crate::condition::Condition;
use crate::executor::QueryExecutor;
use crate::outcome::TestOutcome;
use crate::result_set::ResultSet;
use tracing::{debug, error, info};

/// A SQL query and the ordered list of cell conditions checked against it.
///
/// ```ignore
/// let mut set = TestSet::query("SELECT COUNT(*) FROM `bigquery-public-data.hacker_news.comments`");
/// set.should(0, 0).be_equal(8399417).label("comments");
///
/// let outcome = set.test(&executor).await;
/// assert!(outcome.valid, "{:?}", outcome.errors);
/// ```
#[derive(Debug, Clone)]
pub struct TestSet {
    query: String,
    conditions: Vec<Condition>,
    /// Rows from the most recent successful execution.
    result: Option<ResultSet>,
}

impl TestSet {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            query: sql.into(),
            conditions: Vec::new(),
            result: None,
        }
    }

    /// Alias of [`TestSet::new`] that reads naturally at the call site.
    pub fn query(sql: impl Into<String>) -> Self {
        Self::new(sql)
    }

    /// Declare a condition on the cell at (`row`, `col`) and return it for
    /// configuration. Coordinates are only checked against the result when
    /// the set is evaluated.
    pub fn should(&mut self, row: usize, col: usize) -> &mut Condition {
        self.conditions.push(Condition::new(row, col));
        let last = self.conditions.len() - 1;
        &mut self.conditions[last]
    }

    /// Run the query once and evaluate every condition against its rows.
    ///
    /// Conditions are evaluated independently; one failing never stops the
    /// rest. If the query itself fails, the outcome carries only that error.
    pub async fn test<E>(&mut self, executor: &E) -> TestOutcome
    where
        E: QueryExecutor + ?Sized,
    {
        debug!(
            "Executing query with {} condition(s): {}",
            self.conditions.len(),
            self.query
        );

        let result = match executor.execute(&self.query).await {
            Ok(result) => result,
            Err(e) => {
                self.result = None;
                debug!("Query execution failed: {e}");
                return TestOutcome::execution_failed(e);
            }
        };
        debug!("Query returned {} row(s)", result.num_rows());

        let errors = self
            .conditions
            .iter()
            .map(|c| c.check(&result).err())
            .collect();
        self.result = Some(result);

        let outcome = TestOutcome::evaluated(errors);
        info!("{}", outcome.summary());
        outcome
    }

    /// Run [`TestSet::test`] and log every failure as one line.
    ///
    /// Nothing is returned; use `test` when the outcome is needed.
    pub async fn test_log<E>(&mut self, executor: &E)
    where
        E: QueryExecutor + ?Sized,
    {
        let outcome = self.test(executor).await;
        for (_, err) in outcome.failures() {
            error!("{err}");
        }
    }

    pub fn sql(&self) -> &str {
        &self.query
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn result(&self) -> Option<&ResultSet> {
        self.result.as_ref()
    }

    /// Number of declared conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
