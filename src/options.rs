/// Tokenizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of bracketed element groups. `[len:1]` has depth 1.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    pub fn new() -> Self { Self::default() }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: Self::DEFAULT_MAX_DEPTH }
    }
}

/// Where the ignore marker `-` may appear in a tag list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IgnorePolicy {
    /// `-` anywhere in a list discards the directives resolved before it
    /// and stops resolution.
    #[default]
    Anywhere,
    /// `-` must be the first tag of its list.
    Leading,
}

/// Resolver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub ignore_policy: IgnorePolicy,
}

impl ResolveOptions {
    pub fn new() -> Self { Self::default() }

    pub fn with_ignore_policy(mut self, ignore_policy: IgnorePolicy) -> Self {
        self.ignore_policy = ignore_policy;
        self
    }
}
