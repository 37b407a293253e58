//! Configuration for the reactor.

/// Configuration for a [`Reactor`](crate::Reactor).
///
/// Controls the fixpoint kill switch, base-language loading, and which
/// optional built-in rules are registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactorConfig {
    /// Upper bound on fixpoint passes (`None` = bounded only by progress).
    pub max_passes: Option<usize>,

    /// Load the base-language source before user documents.
    pub load_base_language: bool,

    /// Register the `max-occurs` rule.
    pub check_occurrences: bool,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            max_passes: None,
            load_base_language: true,
            check_occurrences: true,
        }
    }
}

impl ReactorConfig {
    /// Configuration for compiling against the hard-coded bootstrap schema.
    #[must_use]
    pub fn bootstrap() -> Self {
        Self {
            load_base_language: false,
            ..Self::default()
        }
    }

    /// Builder method to set the pass limit.
    #[must_use]
    pub fn with_max_passes(mut self, limit: Option<usize>) -> Self {
        self.max_passes = limit;
        self
    }

    /// Builder method to enable/disable base-language loading.
    #[must_use]
    pub fn with_base_language(mut self, load: bool) -> Self {
        self.load_base_language = load;
        self
    }

    /// Builder method to enable/disable occurrence checks.
    #[must_use]
    pub fn with_occurrence_checks(mut self, check: bool) -> Self {
        self.check_occurrences = check;
        self
    }
}
