//! SQL dialect selection.

/// BigQuery SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    /// Legacy SQL (`[project:dataset.table]` references). The REST API
    /// runs queries as legacy SQL unless told otherwise.
    #[default]
    Legacy,
    /// GoogleSQL, formerly "standard SQL".
    Standard,
}

const STANDARD_DIRECTIVE: &str = "#standardsql";
const LEGACY_DIRECTIVE: &str = "#legacysql";

impl SqlDialect {
    /// Pick the dialect for `sql`.
    ///
    /// A leading `#standardSQL` or `#legacySQL` line wins over `default`.
    pub fn detect(sql: &str, default: SqlDialect) -> SqlDialect {
        let head: String = sql
            .trim_start()
            .chars()
            .take(STANDARD_DIRECTIVE.len())
            .collect::<String>()
            .to_lowercase();

        if head.starts_with(STANDARD_DIRECTIVE) {
            SqlDialect::Standard
        } else if head.starts_with(LEGACY_DIRECTIVE) {
            SqlDialect::Legacy
        } else {
            default
        }
    }

    pub fn is_legacy(self) -> bool {
        self == SqlDialect::Legacy
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

impl std::str::FromStr for SqlDialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "legacysql" => Ok(Self::Legacy),
            "standard" | "standardsql" | "googlesql" => Ok(Self::Standard),
            _ => Err(anyhow::anyhow!(
                "Invalid SQL dialect: '{s}'. Expected 'legacy' or 'standard'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_directives() {
        let standard = "#standardSQL\nSELECT COUNT(*) FROM `bigquery-public-data.hacker_news.comments`";
        assert_eq!(
            SqlDialect::detect(standard, SqlDialect::Legacy),
            SqlDialect::Standard
        );
        assert_eq!(
            SqlDialect::detect("  #legacySQL\nSELECT 1", SqlDialect::Standard),
            SqlDialect::Legacy
        );
        assert_eq!(
            SqlDialect::detect("#STANDARDSQL SELECT 1", SqlDialect::Legacy),
            SqlDialect::Standard
        );
    }

    #[test]
    fn test_detect_falls_back_to_default() {
        let legacy = "SELECT COUNT(*) FROM [bigquery-public-data:hacker_news.comments]";
        assert_eq!(
            SqlDialect::detect(legacy, SqlDialect::Legacy),
            SqlDialect::Legacy
        );
        assert_eq!(
            SqlDialect::detect(legacy, SqlDialect::Standard),
            SqlDialect::Standard
        );
        assert_eq!(SqlDialect::detect("", SqlDialect::Legacy), SqlDialect::Legacy);
        assert_eq!(
            SqlDialect::detect("# comment\nSELECT 1", SqlDialect::Standard),
            SqlDialect::Standard
        );
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("legacy".parse::<SqlDialect>().unwrap(), SqlDialect::Legacy);
        assert_eq!("Standard".parse::<SqlDialect>().unwrap(), SqlDialect::Standard);
        assert!("postgres".parse::<SqlDialect>().is_err());
        assert_eq!(SqlDialect::Standard.to_string(), "standard");
        assert_eq!(SqlDialect::default(), SqlDialect::Legacy);
    }
}
