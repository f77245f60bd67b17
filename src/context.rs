// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Collaborators the steps delegate to, and the per-scenario bundle of them.

use crate::{error::AssertionFailure, table::Table};

/// Page object of the home screen, where an annual income is entered and its
/// deductions breakdown is shown.
pub trait HomeScreen {
    /// Enters the given annual income.
    ///
    /// # Errors
    ///
    /// If the income cannot be entered.
    fn set_annual_income(&mut self, amount: &str)
        -> Result<(), AssertionFailure>;

    /// Checks the shown deductions breakdown against the given [`Table`].
    ///
    /// # Errors
    ///
    /// If the shown breakdown disagrees with the [`Table`].
    fn check_deductions(&mut self, table: &Table)
        -> Result<(), AssertionFailure>;
}

/// Generic helper driving text fields of the UI by their names.
pub trait FieldDriver {
    /// Types the given `text` into the field named `field`.
    ///
    /// # Errors
    ///
    /// If there is no such field.
    fn enter_text_in_field(
        &mut self,
        text: &str,
        field: &str,
    ) -> Result<(), AssertionFailure>;

    /// Checks that the field named `field` holds exactly the `expected` text.
    ///
    /// # Errors
    ///
    /// If there is no such field, or it holds something else.
    fn check_text_in_field(
        &mut self,
        expected: &str,
        field: &str,
    ) -> Result<(), AssertionFailure>;
}

impl<T: HomeScreen + ?Sized> HomeScreen for &mut T {
    fn set_annual_income(
        &mut self,
        amount: &str,
    ) -> Result<(), AssertionFailure> {
        (**self).set_annual_income(amount)
    }

    fn check_deductions(
        &mut self,
        table: &Table,
    ) -> Result<(), AssertionFailure> {
        (**self).check_deductions(table)
    }
}

impl<T: FieldDriver + ?Sized> FieldDriver for &mut T {
    fn enter_text_in_field(
        &mut self,
        text: &str,
        field: &str,
    ) -> Result<(), AssertionFailure> {
        (**self).enter_text_in_field(text, field)
    }

    fn check_text_in_field(
        &mut self,
        expected: &str,
        field: &str,
    ) -> Result<(), AssertionFailure> {
        (**self).check_text_in_field(expected, field)
    }
}

/// Collaborators of a single scenario: the `home` page object and the `base`
/// field driver.
///
/// Created when a scenario starts and torn down with
/// [`ScenarioContext::finish()`] when it ends. A [`Registry`] only borrows it
/// for the duration of one step.
///
/// [`Registry`]: crate::Registry
#[derive(Debug)]
pub struct ScenarioContext<Home, Base> {
    home: Home,
    base: Base,
}

impl<Home, Base> ScenarioContext<Home, Base>
where
    Home: HomeScreen,
    Base: FieldDriver,
{
    /// Starts a new scenario with the given collaborators.
    #[must_use]
    pub fn new(home: Home, base: Base) -> Self {
        tracing::trace!("scenario context created");
        Self { home, base }
    }

    /// Returns the home screen page object.
    pub fn home(&mut self) -> &mut Home {
        &mut self.home
    }

    /// Returns the generic field driver.
    pub fn base(&mut self) -> &mut Base {
        &mut self.base
    }

    /// Ends the scenario, handing the collaborators back.
    pub fn finish(self) -> (Home, Base) {
        tracing::trace!("scenario context torn down");
        (self.home, self.base)
    }
}
