//! Fragment rendering configuration.

/// How a column name containing a double quote is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuotePolicy {
    /// Double the embedded quote (`a"b` renders as `"a""b"`).
    #[default]
    Escape,
    /// Refuse the name with a validation error.
    Reject,
}

/// Configuration for [`sql_for_partial_update_with`](crate::sql_for_partial_update_with).
///
/// The default renders placeholders from `$1` and escapes embedded quotes,
/// which is exactly what [`sql_for_partial_update`](crate::sql_for_partial_update) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentConfig {
    /// Index of the first placeholder. Must be at least 1.
    pub first_placeholder: usize,
    /// Handling of `"` inside resolved column names.
    pub quote_policy: QuotePolicy,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            first_placeholder: 1,
            quote_policy: QuotePolicy::Escape,
        }
    }
}

impl FragmentConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start numbering placeholders at `index`.
    ///
    /// Use this when the SET clause follows other bound parameters, e.g. a CTE
    /// that already consumed `$1..$n`.
    pub fn with_first_placeholder(mut self, index: usize) -> Self {
        self.first_placeholder = index;
        self
    }

    /// Set the quote policy.
    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    /// Reject column names that contain `"` instead of escaping them.
    pub fn strict_identifiers(self) -> Self {
        self.with_quote_policy(QuotePolicy::Reject)
    }
}
