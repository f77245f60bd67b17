// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Matching context handed to a [`Step`] function.
//!
//! [`Step`]: super::Step

use crate::{error::ArgumentError, table::Table};

/// Name of a capturing group inside a step pattern.
pub type CaptureName = Option<String>;

/// Context for a [`Step`] function execution.
///
/// [`Step`]: super::Step
#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    /// Step line the pattern was matched against.
    pub step_text: String,

    /// Regex matches of the [`Context::step_text`].
    ///
    /// The whole match goes first, then every capturing group in order. A
    /// group which didn't participate in the match is an empty string.
    pub matches: Vec<(CaptureName, String)>,

    /// [`Table`] attached to the step line, if any.
    pub table: Option<Table>,
}

impl Context {
    /// Returns the value of the capture group at `index` (0 is the whole
    /// match).
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.matches.get(index).map(|(_, value)| value.as_str())
    }

    /// Returns the value of the capture group named `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value of the capture group named `name`.
    ///
    /// # Errors
    ///
    /// If the matched pattern has no such group.
    pub fn require(&self, name: &'static str) -> Result<&str, ArgumentError> {
        self.named(name).ok_or(ArgumentError::MissingCapture { name })
    }

    /// Takes the [`Table`] out of this [`Context`].
    ///
    /// # Errors
    ///
    /// If the step line came without a [`Table`].
    pub fn take_table(&mut self) -> Result<Table, ArgumentError> {
        self.table.take().ok_or(ArgumentError::MissingTable)
    }
}
