//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Toggles consumed by the query classifier.
///
/// Every field is independent. Deserializes from kebab-case keys, missing
/// keys fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserOptions {
    /// Classify statements by their leading keyword. When off, everything is
    /// a DATA statement and keyword-driven rewrites are disabled.
    pub detect_query_type: bool,
    /// Rewrite `?` placeholders into generated `$jpN` parameters.
    pub detect_jdbc_parameters: bool,
    /// Also rewrite placeholders in DDL, DECLARE and unrecognized statements.
    pub force_jdbc_parameters: bool,
    /// Prefix the executed text with `DECLARE` lines for generated parameters.
    pub declare_jdbc_parameters: bool,
    /// Rewrite `IN (?, ?, ...)` into a single list parameter.
    pub replace_in_by_list: bool,
}

impl ParserOptions {
    /// Creates options with the default toggles.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            detect_query_type: true,
            detect_jdbc_parameters: true,
            force_jdbc_parameters: false,
            declare_jdbc_parameters: true,
            replace_in_by_list: true,
        }
    }

    /// Sets whether statements are classified by keyword.
    #[must_use]
    pub const fn with_detect_query_type(mut self, value: bool) -> Self {
        self.detect_query_type = value;
        self
    }

    /// Sets whether `?` placeholders are rewritten.
    #[must_use]
    pub const fn with_detect_jdbc_parameters(mut self, value: bool) -> Self {
        self.detect_jdbc_parameters = value;
        self
    }

    /// Sets whether placeholders are rewritten outside DATA statements.
    #[must_use]
    pub const fn with_force_jdbc_parameters(mut self, value: bool) -> Self {
        self.force_jdbc_parameters = value;
        self
    }

    /// Sets whether a `DECLARE` preamble is emitted.
    #[must_use]
    pub const fn with_declare_jdbc_parameters(mut self, value: bool) -> Self {
        self.declare_jdbc_parameters = value;
        self
    }

    /// Sets whether `IN` lists are collapsed into list parameters.
    #[must_use]
    pub const fn with_replace_in_by_list(mut self, value: bool) -> Self {
        self.replace_in_by_list = value;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert!(options.detect_query_type);
        assert!(options.detect_jdbc_parameters);
        assert!(!options.force_jdbc_parameters);
        assert!(options.declare_jdbc_parameters);
        assert!(options.replace_in_by_list);
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::new()
            .with_detect_query_type(false)
            .with_force_jdbc_parameters(true)
            .with_replace_in_by_list(false);
        assert!(!options.detect_query_type);
        assert!(options.force_jdbc_parameters);
        assert!(!options.replace_in_by_list);
    }
}
