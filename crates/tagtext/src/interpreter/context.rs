//! Per-resolution processing context.
//!
//! One `EvalContext` is owned by each top-level resolution and threaded
//! explicitly through every evaluator and dispatch call. Nothing here is
//! ambient or global, so concurrent resolutions are isolated by
//! construction: two resolutions never share parameters, error log, or
//! dry-run state.

use std::collections::HashMap;

/// State carried through one resolution: a key/value parameter store, an
/// ordered error log, and the dry-run flag.
#[derive(Debug, Default)]
pub struct EvalContext {
    /// Parameters readable and writable by function handlers.
    params: HashMap<String, String>,
    /// Ordered error messages accumulated during this resolution.
    errors: Vec<String>,
    /// When set, dispatch must not invoke handlers.
    dry_run: bool,
}

impl EvalContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context pre-seeded with parameters.
    pub fn with_params(params: HashMap<String, String>) -> Self {
        Self {
            params,
            errors: Vec::new(),
            dry_run: false,
        }
    }

    /// Replace all parameters with `seed`, discarding any prior state.
    pub fn initialize(&mut self, seed: HashMap<String, String>) {
        self.params = seed;
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter value, or `default` if the key is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Set a parameter value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Remove all parameters.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// The current parameter mapping.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Append a message to the error log without aborting resolution.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Whether any errors were reported during the last resolution.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The reported errors, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The reported errors joined with newlines.
    pub fn errors_text(&self) -> String {
        self.errors.join("\n")
    }

    /// Whether this resolution is a dry run.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Reset per-resolution state on entry to a top-level resolve.
    pub(crate) fn begin_resolution(&mut self, dry_run: bool) {
        self.errors.clear();
        self.dry_run = dry_run;
    }

    /// Restore the dry-run flag on every exit path, so dry-run state never
    /// leaks into the next resolution.
    pub(crate) fn end_resolution(&mut self) {
        self.dry_run = false;
    }
}
