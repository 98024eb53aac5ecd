//! JSON output options.

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    #[default]
    Compact,
    /// Pretty-printed with 2-space indentation
    Pretty,
}

/// How shared records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceHandling {
    /// `$id` / `$ref` / `$values` metadata; shared records written once
    #[default]
    Preserve,
    /// Plain JSON; shared records repeated in full
    Plain,
}

/// Options for writing findings.
#[derive(Debug, Clone, Default)]
pub struct JsonOptions {
    /// Layout
    pub format: JsonFormat,

    /// Reference metadata
    pub references: ReferenceHandling,
}

impl JsonOptions {
    /// Create options with the invocation defaults: compact, reference-preserving.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set reference handling.
    pub fn with_references(mut self, references: ReferenceHandling) -> Self {
        self.references = references;
        self
    }

    /// Shorthand for pretty-printed output.
    pub fn pretty(self) -> Self {
        self.with_format(JsonFormat::Pretty)
    }

    /// Shorthand for output without reference metadata.
    pub fn plain(self) -> Self {
        self.with_references(ReferenceHandling::Plain)
    }
}
