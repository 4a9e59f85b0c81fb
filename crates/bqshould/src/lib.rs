//! Cell-level assertions over SQL query results.
//!
//! A [`TestSet`] pairs a query with a list of [`Condition`]s, each naming a
//! (row, column) position and the value expected there. Evaluating the set
//! runs the query once through a [`QueryExecutor`] and compares every
//! declared cell as a string.
//!
//! # Example
//!
//! ```ignore
//! use bqshould::{StaticExecutor, ResultSet, TestSet};
//!
//! let executor = StaticExecutor::new(ResultSet::from_iter([["8399417"]]));
//!
//! let mut set = TestSet::query("SELECT COUNT(*) FROM comments");
//! set.should(0, 0).be_equal(8399417).label("comment count");
//!
//! let outcome = set.test(&executor).await;
//! assert!(outcome.valid);
//! ```

pub mod condition;
pub mod error;
pub mod executor;
pub mod outcome;
pub mod result_set;
pub mod test_set;
pub mod value;


pub use condition::Condition;
pub use error::{ExecutionError, TestError, TestFailure};
pub use executor::{QueryExecutor, StaticExecutor};
pub use outcome::TestOutcome;
pub use result_set::{CellOutOfRange, ResultSet};
pub use test_set::TestSet;
pub use value::Value;
