//! Extractor tuning knobs, following the teacher's `SyncConfig`
//! (`src/sync/config.rs`) default-struct pattern. The core has no I/O, so
//! there is no `from_env`; `ExtractorConfig::default()` matches the literal
//! constants named throughout `spec.md` §4.5.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractorConfig {
    /// Radius (characters) of the context window used for granularity,
    /// description text, and fuzzy-match masking (`spec.md` §4.5.1 step 4,
    /// §4.5.4).
    pub context_window: usize,
    /// Radius (characters) searched around an event for a duration fragment
    /// (`spec.md` §4.5.1 step 6).
    pub duration_search_window: usize,
    /// Minimum fuzzy-match score to retain an anchor candidate (`spec.md`
    /// §4.5.4).
    pub fuzzy_match_threshold: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            context_window: 50,
            duration_search_window: 50,
            fuzzy_match_threshold: 0.5,
        }
    }
}
