//! Synthesizer configuration.

/// Vector dimensionality used when an index declares none.
pub const DEFAULT_VECTOR_DIMENSIONS: u32 = 384;

/// Similarity function used when a vector index declares none.
pub const DEFAULT_VECTOR_SIMILARITY: &str = "cosine";

/// Configuration for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthConfig {
    /// Emit a file header comment at the top of statement scripts.
    pub file_header: bool,
    /// Emit a `// NodeType: Person` comment before each resource block.
    pub block_headers: bool,
    /// Emit `IF NOT EXISTS` on every statement.
    pub if_not_exists: bool,
    /// Dimensions for vector indexes without a `dimensions` option.
    pub vector_dimensions: u32,
    /// Similarity function for vector indexes without a `similarity` option.
    pub vector_similarity: String,
    /// Pretty-print structured documents.
    pub pretty: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            file_header: true,
            block_headers: true,
            if_not_exists: true,
            vector_dimensions: DEFAULT_VECTOR_DIMENSIONS,
            vector_similarity: DEFAULT_VECTOR_SIMILARITY.to_string(),
            pretty: true,
        }
    }
}

impl SynthConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a file header is emitted.
    #[must_use]
    pub fn with_file_header(mut self, enabled: bool) -> Self {
        self.file_header = enabled;
        self
    }

    /// Sets whether per-resource header comments are emitted.
    #[must_use]
    pub fn with_block_headers(mut self, enabled: bool) -> Self {
        self.block_headers = enabled;
        self
    }

    /// Sets whether `IF NOT EXISTS` is emitted.
    #[must_use]
    pub fn with_if_not_exists(mut self, enabled: bool) -> Self {
        self.if_not_exists = enabled;
        self
    }

    /// Sets the default vector dimensions.
    #[must_use]
    pub fn with_vector_dimensions(mut self, dimensions: u32) -> Self {
        self.vector_dimensions = dimensions;
        self
    }

    /// Sets the default vector similarity function.
    #[must_use]
    pub fn with_vector_similarity(mut self, similarity: impl Into<String>) -> Self {
        self.vector_similarity = similarity.into();
        self
    }

    /// Sets whether structured documents are pretty-printed.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
