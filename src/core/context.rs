//! Parser configuration

/// Limits applied while rewriting definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of full rewrite passes over one template before the
    /// expansion is reported as cyclic
    /// Default: 100
    pub max_expansion_passes: usize,

    /// Maximum template size in bytes while expanding optional-argument calls
    /// Default: 1 MiB
    pub max_template_len: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_expansion_passes: 100,
            max_template_len: 1 << 20,
        }
    }
}

impl ParseOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight limits for untrusted input
    pub fn strict() -> Self {
        Self {
            max_expansion_passes: 16,
            max_template_len: 64 * 1024,
        }
    }

    /// Generous limits for large, deeply layered stylesheets
    pub fn lenient() -> Self {
        Self {
            max_expansion_passes: 1000,
            max_template_len: 16 << 20,
        }
    }

    pub fn with_max_expansion_passes(mut self, passes: usize) -> Self {
        self.max_expansion_passes = passes.max(1);
        self
    }

    pub fn with_max_template_len(mut self, len: usize) -> Self {
        self.max_template_len = len;
        self
    }
}
