use std::time::Duration;

/// Configuration for a probe run.
///
/// # Examples
///
/// ```rust
/// use pptx_probe::ProbeOptions;
/// use std::time::Duration;
///
/// // Create with defaults
/// let options = ProbeOptions::default();
///
/// // Or customize
/// let options = ProbeOptions::new()
///     .with_deep(false)
///     .with_max_layouts(Some(5))
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Measure placeholders on transient slides instead of reading declared
    /// geometry only
    pub deep: bool,
    /// Analyze at most this many layouts
    pub max_layouts: Option<usize>,
    /// Wall-clock budget, checked before each layout
    pub timeout: Duration,
    /// Checksum the file before and after and fail if it changed
    pub verify_integrity: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            deep: true,
            max_layouts: None,
            timeout: Duration::from_secs(30),
            verify_integrity: true,
        }
    }
}

impl ProbeOptions {
    /// Create a new `ProbeOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set deep (instantiating) or shallow (declared types only) analysis.
    #[inline]
    pub fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    /// Limit the number of layouts analyzed. The report carries a note when
    /// layouts are skipped.
    #[inline]
    pub fn with_max_layouts(mut self, max_layouts: Option<usize>) -> Self {
        self.max_layouts = max_layouts;
        self
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Toggle the before/after checksum comparison.
    ///
    /// Disabling it skips reading the file twice more.
    #[inline]
    pub fn with_verify_integrity(mut self, verify: bool) -> Self {
        self.verify_integrity = verify;
        self
    }
}
