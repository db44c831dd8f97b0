//! Guards construction of components that need an optional external
//! dependency.
//!
//! The check runs before the guarded initializer, so a missing hard
//! requirement fails fast without any construction side effects. A
//! `warn_only` requirement downgrades the failure to a warning and lets
//! construction proceed.

use thiserror::Error;

/// A missing hard requirement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequirementError {
    pub dependency: String,
    pub message: String,
}

/// A named optional dependency with a failure policy.
#[derive(Debug, Clone)]
pub struct Requirement {
    dependency: String,
    message: Option<String>,
    warn_only: bool,
}

impl Requirement {
    pub fn new(dependency: impl Into<String>) -> Self {
        Self {
            dependency: dependency.into(),
            message: None,
            warn_only: false,
        }
    }

    /// Replaces the default error or warning text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Downgrades a failed check to a warning.
    pub fn warn_only(mut self) -> Self {
        self.warn_only = true;
        self
    }

    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    /// Applies the failure policy to an availability verdict.
    pub fn check(&self, available: bool) -> Result<(), RequirementError> {
        if available {
            return Ok(());
        }

        if self.warn_only {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("`{}` not available, proceeding anyway", self.dependency));
            tracing::warn!(dependency = %self.dependency, "{message}");
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("`{}` is required", self.dependency));
        Err(RequirementError {
            dependency: self.dependency.clone(),
            message,
        })
    }

    /// Probes for the dependency and, only on success, runs the
    /// initializer. The probe receives the dependency name so one probe
    /// can serve several requirements.
    pub fn guard<T>(
        &self,
        probe: impl FnOnce(&str) -> bool,
        init: impl FnOnce() -> T,
    ) -> Result<T, RequirementError> {
        self.check(probe(&self.dependency))?;
        Ok(init())
    }
}
