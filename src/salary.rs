// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Salary deduction steps.
//!
//! | Step line | Delegates to |
//! |---|---|
//! | `I enter an annual income of "<amount>"` | [`HomeScreen::set_annual_income()`] |
//! | `I should see the following breakdown` + table | [`HomeScreen::check_deductions()`] |
//! | `I attempt to enter an annual income of "<amount>"` | [`FieldDriver::enter_text_in_field()`] |
//! | `I should be prevented from typing more than "<amount>"` | [`FieldDriver::check_text_in_field()`] |

use derive_more::Display;
use lazy_regex::regex;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    context::{FieldDriver, HomeScreen, ScenarioContext},
    error::{ArgumentError, AssertionFailure},
    step::{Collection, Context, Location},
    table::Table,
};

/// Annual income exactly as written in a step line.
///
/// Never parsed here: `"1,000"` stays `"1,000"` all the way down to the
/// collaborator.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub struct Amount(String);

impl Amount {
    /// Returns the captured text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Amount {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl From<String> for Amount {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Step line parsed into its typed arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SalaryStep {
    /// `I enter an annual income of "<amount>"`
    EnterAnnualIncome(Amount),

    /// `I should see the following breakdown`
    CheckBreakdown(Table),

    /// `I attempt to enter an annual income of "<amount>"`
    AttemptAnnualIncome(Amount),

    /// `I should be prevented from typing more than "<amount>"`
    CheckIncomeCap(Amount),
}

impl SalaryStep {
    /// Performs this step with the collaborators of the given
    /// [`ScenarioContext`].
    ///
    /// Field-level steps address the field named `salary_field`.
    ///
    /// # Errors
    ///
    /// Whatever the invoked collaborator reports, untouched.
    pub fn run<Home, Base>(
        &self,
        ctx: &mut ScenarioContext<Home, Base>,
        salary_field: &str,
    ) -> Result<(), AssertionFailure>
    where
        Home: HomeScreen,
        Base: FieldDriver,
    {
        match self {
            Self::EnterAnnualIncome(amount) => {
                ctx.home().set_annual_income(amount.as_str())
            }
            Self::CheckBreakdown(table) => ctx.home().check_deductions(table),
            Self::AttemptAnnualIncome(amount) => {
                ctx.base().enter_text_in_field(amount.as_str(), salary_field)
            }
            Self::CheckIncomeCap(amount) => {
                ctx.base().check_text_in_field(amount.as_str(), salary_field)
            }
        }
    }
}

static STEPS: Lazy<Collection<SalaryStep>> = Lazy::new(|| {
    Collection::new()
        .step(
            Some(Location::caller()),
            Regex::clone(regex!(
                r#"^I enter an annual income of "(?P<amount>[^"]*)"$"#
            )),
            enter_annual_income,
        )
        .step(
            Some(Location::caller()),
            Regex::clone(regex!(r"^I should see the following breakdown$")),
            check_breakdown,
        )
        .step(
            Some(Location::caller()),
            Regex::clone(regex!(
                r#"^I attempt to enter an annual income of "(?P<amount>[^"]*)"$"#
            )),
            attempt_annual_income,
        )
        .step(
            Some(Location::caller()),
            Regex::clone(regex!(
                r#"^I should be prevented from typing more than "(?P<amount>[^"]*)"$"#
            )),
            check_income_cap,
        )
});

/// Returns the [`Collection`] of all the salary deduction steps.
///
/// Built once, on first use.
#[must_use]
pub fn steps() -> &'static Collection<SalaryStep> {
    &STEPS
}

fn enter_annual_income(ctx: Context) -> Result<SalaryStep, ArgumentError> {
    Ok(SalaryStep::EnterAnnualIncome(ctx.require("amount")?.into()))
}

fn check_breakdown(mut ctx: Context) -> Result<SalaryStep, ArgumentError> {
    ctx.take_table().map(SalaryStep::CheckBreakdown)
}

fn attempt_annual_income(ctx: Context) -> Result<SalaryStep, ArgumentError> {
    Ok(SalaryStep::AttemptAnnualIncome(ctx.require("amount")?.into()))
}

fn check_income_cap(ctx: Context) -> Result<SalaryStep, ArgumentError> {
    Ok(SalaryStep::CheckIncomeCap(ctx.require("amount")?.into()))
}
