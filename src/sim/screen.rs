// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Screen model shared by the [`HomePage`] and the [`Driver`].

use std::{cell::RefCell, rc::Rc};

use itertools::Itertools as _;

use super::calculator::{Breakdown, Money};
use crate::{
    context::{FieldDriver, HomeScreen},
    error::AssertionFailure,
    table::Table,
};

/// Text field of the [`Screen`].
#[derive(Clone, Debug)]
struct Field {
    name: String,
    text: String,
    max_length: Option<usize>,
}

/// Salary screen: a single salary field and the deductions breakdown of
/// whatever income it holds.
#[derive(Clone, Debug)]
pub struct Screen {
    salary: Field,
    breakdown: Option<Breakdown>,
}

impl Screen {
    pub(super) const fn new(
        salary_field: String,
        max_length: Option<usize>,
    ) -> Self {
        Self {
            salary: Field {
                name: salary_field,
                text: String::new(),
                max_length,
            },
            breakdown: None,
        }
    }

    fn field(&self, name: &str) -> Result<&Field, AssertionFailure> {
        if self.salary.name == name {
            Ok(&self.salary)
        } else {
            Err(AssertionFailure::new(format!(
                "no field named `{name}` on the screen",
            )))
        }
    }

    /// Types the `text` into the field named `name`, replacing what it held.
    ///
    /// Characters beyond the field's maximum length are dropped, as a device
    /// keyboard would.
    ///
    /// # Errors
    ///
    /// If there is no such field.
    pub fn type_text(
        &mut self,
        name: &str,
        text: &str,
    ) -> Result<(), AssertionFailure> {
        _ = self.field(name)?;

        let typed = match self.salary.max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_owned(),
        };
        if typed.len() < text.len() {
            tracing::debug!(field = name, typed, "field is full, input cut");
        }
        self.salary.text = typed;

        self.breakdown = self
            .salary
            .text
            .parse::<Money>()
            .map(Breakdown::of)
            .inspect_err(|e| tracing::debug!(error = %e, "no breakdown"))
            .ok();
        Ok(())
    }

    /// Returns the text held by the field named `name`.
    ///
    /// # Errors
    ///
    /// If there is no such field.
    pub fn text(&self, name: &str) -> Result<&str, AssertionFailure> {
        self.field(name).map(|f| f.text.as_str())
    }

    /// Returns the shown deductions breakdown, if any.
    #[must_use]
    pub const fn breakdown(&self) -> Option<&Breakdown> {
        self.breakdown.as_ref()
    }
}

/// Page object of the simulated home [`Screen`].
#[derive(Clone, Debug)]
pub struct HomePage {
    screen: Rc<RefCell<Screen>>,
}

impl HomePage {
    pub(super) const fn new(screen: Rc<RefCell<Screen>>) -> Self {
        Self { screen }
    }

    /// Returns the shown deductions breakdown, if any.
    #[must_use]
    pub fn breakdown(&self) -> Option<Breakdown> {
        self.screen.borrow().breakdown().copied()
    }
}

impl HomeScreen for HomePage {
    fn set_annual_income(
        &mut self,
        amount: &str,
    ) -> Result<(), AssertionFailure> {
        let mut screen = self.screen.borrow_mut();
        let field = screen.salary.name.clone();
        screen.type_text(&field, amount)
    }

    /// Compares every row after the header, `| label | amount |`, with the
    /// shown breakdown row of the same label.
    fn check_deductions(
        &mut self,
        table: &Table,
    ) -> Result<(), AssertionFailure> {
        let screen = self.screen.borrow();
        let Some(breakdown) = screen.breakdown() else {
            return Err(AssertionFailure::new(format!(
                "no breakdown is shown for `{}`",
                screen.salary.text,
            )));
        };

        let mismatches = table
            .body()
            .iter()
            .filter_map(|row| match row.as_slice() {
                [label, expected, ..] => match breakdown.get(label) {
                    None => Some(format!("no `{label}` row in the breakdown")),
                    Some(shown) => (shown.to_string() != expected.trim())
                        .then(|| {
                            format!(
                                "`{label}`: expected {}, but shown {shown}",
                                expected.trim(),
                            )
                        }),
                },
                _ => Some(format!("malformed breakdown row: {row:?}")),
            })
            .collect::<Vec<_>>();

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(AssertionFailure::new(format!(
                "breakdown for `{}` differs:\n{}",
                screen.salary.text,
                mismatches.iter().join("\n"),
            )))
        }
    }
}

/// Field driver of the simulated [`Screen`].
#[derive(Clone, Debug)]
pub struct Driver {
    screen: Rc<RefCell<Screen>>,
}

impl Driver {
    pub(super) const fn new(screen: Rc<RefCell<Screen>>) -> Self {
        Self { screen }
    }
}

impl FieldDriver for Driver {
    fn enter_text_in_field(
        &mut self,
        text: &str,
        field: &str,
    ) -> Result<(), AssertionFailure> {
        self.screen.borrow_mut().type_text(field, text)
    }

    fn check_text_in_field(
        &mut self,
        expected: &str,
        field: &str,
    ) -> Result<(), AssertionFailure> {
        let screen = self.screen.borrow();
        let actual = screen.text(field)?;
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionFailure::field_mismatch(field, expected, actual))
        }
    }
}
