//! Applies the configured [`ErrorPolicy`] to a failing step.

use crate::config::ErrorPolicy;
use crate::error::{Diagnostic, Phase, Result};

/// Routes errors of one bind or render call through the policy.
///
/// Under `Strict` the error is handed back unchanged. Under `Lenient` it is
/// logged, recorded as a [`Diagnostic`] and replaced by a fallback value.
pub(crate) struct Recovery<'d> {
    policy: ErrorPolicy,
    phase: Phase,
    diagnostics: &'d mut Vec<Diagnostic>,
}

impl<'d> Recovery<'d> {
    pub(crate) fn new(policy: ErrorPolicy, phase: Phase, diagnostics: &'d mut Vec<Diagnostic>) -> Self {
        Self {
            policy,
            phase,
            diagnostics,
        }
    }

    pub(crate) fn recover<T>(&mut self, result: Result<T>, fallback: impl FnOnce() -> T) -> Result<T> {
        let error = match result {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        match self.policy {
            ErrorPolicy::Strict => Err(error),
            ErrorPolicy::Lenient => {
                tracing::warn!(phase = %self.phase, "{}", error);
                self.diagnostics.push(Diagnostic {
                    phase: self.phase,
                    error,
                });
                Ok(fallback())
            }
        }
    }
}
