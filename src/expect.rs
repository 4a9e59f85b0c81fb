//! Inline expectations for the `check` command.

use anyhow::Context;
use bqshould::TestSet;
use std::str::FromStr;

/// An expectation written as `[LABEL@]ROW,COL=VALUE`.
///
/// `VALUE` is everything after the first `=` and is compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub label: Option<String>,
    pub row: usize,
    pub col: usize,
    pub value: String,
}

impl Expectation {
    /// Attach this expectation to `set`.
    pub fn apply(&self, set: &mut TestSet) {
        let condition = set.should(self.row, self.col);
        condition.be_equal(self.value.as_str());
        if let Some(label) = &self.label {
            condition.label(label.clone());
        }
    }
}

impl FromStr for Expectation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, value) = s
            .split_once('=')
            .with_context(|| format!("Invalid expectation '{s}': expected [LABEL@]ROW,COL=VALUE"))?;

        let (label, coords) = match target.rsplit_once('@') {
            Some((label, coords)) => (Some(label.to_string()), coords),
            None => (None, target),
        };

        let (row, col) = coords
            .split_once(',')
            .with_context(|| format!("Invalid coordinates '{coords}': expected ROW,COL"))?;
        let row = row
            .trim()
            .parse()
            .with_context(|| format!("Invalid row: {row}"))?;
        let col = col
            .trim()
            .parse()
            .with_context(|| format!("Invalid column: {col}"))?;

        Ok(Self {
            label,
            row,
            col,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let e: Expectation = "0,0=8399417".parse().unwrap();
        assert_eq!(
            e,
            Expectation {
                label: None,
                row: 0,
                col: 0,
                value: "8399417".to_string()
            }
        );
    }

    #[test]
    fn test_parse_with_label_and_equals_in_value() {
        let e: Expectation = "total rows@2, 3=a=b".parse().unwrap();
        assert_eq!(e.label.as_deref(), Some("total rows"));
        assert_eq!((e.row, e.col), (2, 3));
        assert_eq!(e.value, "a=b");
    }

    #[test]
    fn test_parse_empty_value() {
        let e: Expectation = "1,1=".parse().unwrap();
        assert_eq!(e.value, "");
    }

    #[test]
    fn test_parse_errors() {
        assert!("0,0".parse::<Expectation>().is_err());
        assert!("0=1".parse::<Expectation>().is_err());
        assert!("x,0=1".parse::<Expectation>().is_err());
        assert!("0,-1=1".parse::<Expectation>().is_err());
    }

    #[test]
    fn test_apply() {
        let mut set = TestSet::query("SELECT 1");
        "one@0,0=1".parse::<Expectation>().unwrap().apply(&mut set);
        assert_eq!(set.conditions()[0].expected(), Some("1"));
        assert_eq!(set.conditions()[0].label_text(), "one");
    }
}
