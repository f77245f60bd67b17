// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of step dispatching.
//!
//! Nothing in this crate recovers from a [`StepError`]: every one of them
//! aborts the current step and is reported upward as is.

use derive_more::{Display, Error};

use crate::step::AmbiguousMatchError;

/// Failure of dispatching a single step line.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum StepError {
    /// No registered pattern matches the step line.
    #[display("Step is not defined: {step_text}")]
    Undefined {
        /// Step line that matched nothing.
        #[error(not(source))]
        step_text: String,
    },

    /// More than one registered pattern matches the step line.
    #[display("Step match is ambiguous: {_0}")]
    Ambiguous(AmbiguousMatchError),

    /// The matched step line doesn't carry what its step needs.
    #[display("Invalid step arguments: {_0}")]
    Argument(ArgumentError),

    /// A collaborator reported a failed check.
    #[display("{_0}")]
    Failed(AssertionFailure),
}

impl StepError {
    /// Creates a new [`StepError::Undefined`].
    #[must_use]
    pub fn undefined(step_text: impl Into<String>) -> Self {
        Self::Undefined { step_text: step_text.into() }
    }

    /// Returns the collaborator's [`AssertionFailure`], if that's what this
    /// [`StepError`] is.
    #[must_use]
    pub const fn as_failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Undefined { .. } | Self::Ambiguous(_) | Self::Argument(_) => {
                None
            }
        }
    }
}

impl From<AmbiguousMatchError> for StepError {
    fn from(err: AmbiguousMatchError) -> Self {
        Self::Ambiguous(err)
    }
}

impl From<ArgumentError> for StepError {
    fn from(err: ArgumentError) -> Self {
        Self::Argument(err)
    }
}

impl From<AssertionFailure> for StepError {
    fn from(failure: AssertionFailure) -> Self {
        Self::Failed(failure)
    }
}

/// Matched step line lacking data its step needs.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum ArgumentError {
    /// The matched pattern has no capture group of this name.
    #[display("no `{name}` capture group in the matched pattern")]
    MissingCapture {
        /// Name of the missing capture group.
        #[error(not(source))]
        name: &'static str,
    },

    /// The step expects a table, but none was attached.
    #[display("the step expects a table, but none was given")]
    MissingTable,
}

/// Failed check reported by a collaborator.
///
/// Its message is surfaced verbatim, so it should say what was expected and
/// what was found.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("{message}")]
pub struct AssertionFailure {
    /// Human-readable description of the mismatch.
    #[error(not(source))]
    pub message: String,
}

impl AssertionFailure {
    /// Creates a new [`AssertionFailure`] with the given `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Creates a new [`AssertionFailure`] describing a field holding
    /// unexpected text.
    #[must_use]
    pub fn field_mismatch(field: &str, expected: &str, actual: &str) -> Self {
        Self::new(format!(
            "expected field `{field}` to contain \"{expected}\", \
             but found \"{actual}\"",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_displayed_verbatim() {
        let err = StepError::from(AssertionFailure::field_mismatch(
            "Salary", "9999999", "99999999",
        ));

        assert_eq!(
            err.to_string(),
            "expected field `Salary` to contain \"9999999\", \
             but found \"99999999\"",
        );
        assert!(err.as_failure().is_some());
    }

    #[test]
    fn undefined_names_the_step() {
        let err = StepError::undefined("I do something else");

        assert_eq!(err.to_string(), "Step is not defined: I do something else");
        assert!(err.as_failure().is_none());
    }

    #[test]
    fn argument_errors_convert() {
        let err = StepError::from(ArgumentError::MissingTable);

        assert_eq!(
            err.to_string(),
            "Invalid step arguments: the step expects a table, but none was \
             given",
        );
    }
}
