//! YAML suite files: several named test sets run together.
//!
//! ```yaml
//! tests:
//!   - name: hacker news comment count
//!     query: "SELECT COUNT(*) FROM [bigquery-public-data:hacker_news.comments]"
//!     conditions:
//!       - { row: 0, col: 0, equals: 8399417, label: comments }
//! ```

use bqshould::{QueryExecutor, TestOutcome, TestSet, Value};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info};

/// Errors loading a suite file.
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Error reading suite file
    #[error("Failed to read suite file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Suite declares no tests
    #[error("Suite contains no tests")]
    Empty,

    /// Two tests share a name
    #[error("Duplicate test name: {0}")]
    DuplicateName(String),

    /// A requested test is not in the suite
    #[error("Test not found in suite: {0}")]
    TestNotFound(String),
}

/// One condition as written in a suite file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteCondition {
    pub row: usize,
    pub col: usize,

    /// Expected value. Leaving it out produces a condition that always
    /// fails with "has no expected value"; `equals: ~` expects a NULL cell.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub equals: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Only called when the key is present, so an explicit null stays
/// `Some(Value::Null)` instead of collapsing into a missing key.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// One named test set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteCase {
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub conditions: Vec<SuiteCondition>,
}

impl SuiteCase {
    /// Build the test set this case describes.
    pub fn to_test_set(&self) -> TestSet {
        let mut set = TestSet::query(self.query.clone());
        for c in &self.conditions {
            let condition = set.should(c.row, c.col);
            if let Some(value) = &c.equals {
                condition.be_equal(value.clone());
            }
            if let Some(label) = &c.label {
                condition.label(label.clone());
            }
        }
        set
    }
}

/// A parsed suite file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    pub tests: Vec<SuiteCase>,
}

impl Suite {
    /// Load suite from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SuiteError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse suite from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SuiteError> {
        let suite: Suite = serde_yaml::from_str(yaml)?;
        suite.validate()?;
        Ok(suite)
    }

    fn validate(&self) -> Result<(), SuiteError> {
        if self.tests.is_empty() {
            return Err(SuiteError::Empty);
        }
        let mut seen = HashSet::new();
        for case in &self.tests {
            if !seen.insert(case.name.as_str()) {
                return Err(SuiteError::DuplicateName(case.name.clone()));
            }
        }
        Ok(())
    }

    /// Keep only the named tests, in suite order. An empty list keeps all.
    pub fn filter(mut self, names: &[String]) -> Result<Self, SuiteError> {
        if names.is_empty() {
            return Ok(self);
        }
        for name in names {
            if !self.tests.iter().any(|t| &t.name == name) {
                return Err(SuiteError::TestNotFound(name.clone()));
            }
        }
        self.tests.retain(|t| names.contains(&t.name));
        Ok(self)
    }

    pub fn test_names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.name.as_str()).collect()
    }

    /// Run every test in order and log each failure as one line.
    pub async fn run<E>(&self, executor: &E) -> SuiteReport
    where
        E: QueryExecutor + ?Sized,
    {
        let started = Instant::now();
        let mut report = SuiteReport::default();

        for case in &self.tests {
            let mut set = case.to_test_set();
            let outcome = set.test(executor).await;

            if outcome.is_valid() {
                info!("Test '{}': {}", case.name, outcome.summary());
                report.passed += 1;
            } else {
                for (_, err) in outcome.failures() {
                    error!("Test '{}': {err}", case.name);
                }
                report.failed += 1;
            }
            report.cases.push(CaseReport {
                name: case.name.clone(),
                outcome,
            });
        }

        report.duration = started.elapsed();
        info!("{}", report.summary());
        report
    }
}

/// Outcome of one suite case.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub outcome: TestOutcome,
}

/// Outcome of a whole suite run.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
    pub passed: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl SuiteReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Names of the cases that did not pass.
    pub fn failed_names(&self) -> Vec<&str> {
        self.cases
            .iter()
            .filter(|c| !c.outcome.is_valid())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let total = self.passed + self.failed;
        if self.is_success() {
            format!("All {total} test(s) passed in {:?}", self.duration)
        } else {
            format!(
                "{} of {total} test(s) failed in {:?}: {}",
                self.failed,
                self.duration,
                self.failed_names().join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE: &str = r#"
tests:
  - name: legacy count
    query: "SELECT COUNT(*) FROM [bigquery-public-data:hacker_news.comments]"
    conditions:
      - row: 0
        col: 0
        equals: 8399417
        label: comments
  - name: people
    query: SELECT name, age FROM people
    conditions:
      - { row: 1, col: 0, equals: bob }
      - { row: 1, col: 1, equals: "41", label: bob age }
      - { row: 2, col: 1 }
      - { row: 2, col: 1, equals: ~ }
      - { row: 2, col: 1, equals: null }
"#;

    #[test]
    fn test_parse_suite() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        assert_eq!(suite.test_names(), vec!["legacy count", "people"]);
        assert_eq!(suite.tests[0].conditions[0].equals, Some(Value::Int(8399417)));
        assert_eq!(
            suite.tests[1].conditions[1].equals,
            Some(Value::String("41".to_string()))
        );
        assert_eq!(suite.tests[1].conditions[2].equals, None);
        assert_eq!(suite.tests[1].conditions[3].equals, Some(Value::Null));
        assert_eq!(suite.tests[1].conditions[4].equals, Some(Value::Null));
    }

    #[test]
    fn test_case_to_test_set() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        let set = suite.tests[1].to_test_set();
        assert_eq!(set.sql(), "SELECT name, age FROM people");
        assert_eq!(set.len(), 5);

        let conditions = set.conditions();
        assert_eq!(conditions[0].expected(), Some("bob"));
        assert_eq!(conditions[0].label_text(), "");
        assert_eq!(conditions[1].label_text(), "bob age");
        assert_eq!(conditions[2].expected(), None);
        assert_eq!(conditions[3].expected(), Some("NULL"));
    }

    #[test]
    fn test_empty_suite_rejected() {
        assert!(matches!(
            Suite::from_yaml("tests: []"),
            Err(SuiteError::Empty)
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = r#"
tests:
  - { name: a, query: SELECT 1 }
  - { name: a, query: SELECT 2 }
"#;
        match Suite::from_yaml(yaml) {
            Err(SuiteError::DuplicateName(name)) => assert_eq!(name, "a"),
            other => panic!("expected duplicate name error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            Suite::from_yaml("tests: [ {name: a"),
            Err(SuiteError::Yaml(_))
        ));
    }

    #[test]
    fn test_filter() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        let filtered = suite.clone().filter(&["people".to_string()]).unwrap();
        assert_eq!(filtered.test_names(), vec!["people"]);

        let all = suite.clone().filter(&[]).unwrap();
        assert_eq!(all.tests.len(), 2);

        assert!(matches!(
            suite.filter(&["missing".to_string()]),
            Err(SuiteError::TestNotFound(_))
        ));
    }
}
