//! Deployment environment lookup.
//!
//! Handlers never read process state directly; they ask an
//! [`EnvironmentSource`] handed to the application at construction.

/// Source of the deployment environment name.
pub trait EnvironmentSource: Send + Sync {
    /// Returns the configured environment, or `None` when unset.
    ///
    /// Called once per request; implementations must not cache.
    fn environment(&self) -> Option<String>;
}

/// Reads a named process environment variable on every call.
#[derive(Debug, Clone)]
pub struct ProcessEnvironment {
    var: String,
}

impl ProcessEnvironment {
    /// Creates a source backed by the variable `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Returns the name of the variable being read.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl EnvironmentSource for ProcessEnvironment {
    fn environment(&self) -> Option<String> {
        // Only a missing or non-UTF-8 value counts as unset; "" is reported as is.
        std::env::var(&self.var).ok()
    }
}

/// Fixed environment value, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment(Option<String>);

impl FixedEnvironment {
    /// A source that always reports `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// A source that always reports no environment.
    pub fn unset() -> Self {
        Self(None)
    }
}

impl EnvironmentSource for FixedEnvironment {
    fn environment(&self) -> Option<String> {
        self.0.clone()
    }
}
