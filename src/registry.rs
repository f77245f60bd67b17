// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dispatching step lines to the salary steps.

use clap::ValueEnum;
use derive_more::Display;

use crate::{
    config::Config,
    context::{FieldDriver, HomeScreen, ScenarioContext},
    error::StepError,
    salary::{self, SalaryStep},
    step::Collection,
    table::Table,
};

/// Way of resolving a step line matching several patterns.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, ValueEnum,
)]
pub enum AmbiguityPolicy {
    /// Fail with [`StepError::Ambiguous`].
    #[default]
    #[display("error")]
    Error,

    /// Use the earliest registered of the matching patterns.
    #[display("first-registered")]
    FirstRegistered,
}

/// Step registry dispatching step lines to the [`SalaryStep`]s.
///
/// # Example
///
/// ```rust
/// # use salary_steps::{
/// #     AssertionFailure, FieldDriver, HomeScreen, Registry, ScenarioContext,
/// #     Table,
/// # };
/// #
/// #[derive(Default)]
/// struct Home(Vec<String>);
///
/// impl HomeScreen for Home {
///     fn set_annual_income(&mut self, amount: &str) -> Result<(), AssertionFailure> {
///         self.0.push(amount.to_owned());
///         Ok(())
///     }
///
///     fn check_deductions(&mut self, _: &Table) -> Result<(), AssertionFailure> {
///         Ok(())
///     }
/// }
///
/// struct Base;
///
/// impl FieldDriver for Base {
///     fn enter_text_in_field(&mut self, _: &str, _: &str) -> Result<(), AssertionFailure> {
///         Ok(())
///     }
///
///     fn check_text_in_field(&mut self, _: &str, _: &str) -> Result<(), AssertionFailure> {
///         Ok(())
///     }
/// }
///
/// let registry = Registry::default();
/// let mut ctx = ScenarioContext::new(Home::default(), Base);
///
/// registry
///     .dispatch(r#"I enter an annual income of "50000""#, None, &mut ctx)
///     .unwrap();
///
/// let (home, _) = ctx.finish();
/// assert_eq!(home.0, ["50000"]);
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    /// Registered steps.
    steps: &'static Collection<SalaryStep>,

    /// Options of dispatching.
    config: Config,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Registry {
    /// Creates a new [`Registry`] of the salary steps.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_steps(salary::steps(), config)
    }

    /// Creates a new [`Registry`] of the given `steps`.
    #[must_use]
    pub const fn with_steps(
        steps: &'static Collection<SalaryStep>,
        config: Config,
    ) -> Self {
        Self { steps, config }
    }

    /// Returns the [`Config`] of this [`Registry`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Iterates over the registered patterns in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &'static str> {
        let steps: &'static Collection<SalaryStep> = self.steps;
        steps.patterns().map(|re| re.as_str())
    }

    /// Matches the step `line` and parses it into a [`SalaryStep`], without
    /// performing it.
    ///
    /// # Errors
    ///
    /// - [`StepError::Undefined`] if no pattern matches the `line`;
    /// - [`StepError::Ambiguous`] if several patterns match it under
    ///   [`AmbiguityPolicy::Error`];
    /// - [`StepError::Argument`] if the matched step lacks its arguments.
    pub fn parse(
        &self,
        line: &str,
        table: Option<&Table>,
    ) -> Result<SalaryStep, StepError> {
        let (step_fn, loc, ctx) = self
            .steps
            .find(line, table, self.config.ambiguity)?
            .ok_or_else(|| StepError::undefined(line))?;

        if let Some(loc) = loc {
            tracing::trace!(%loc, "step matched");
        }

        step_fn(ctx).map_err(Into::into)
    }

    /// Dispatches the step `line` (with its `table`, if any) to the
    /// collaborators of the given [`ScenarioContext`].
    ///
    /// Nothing is invoked on the collaborators unless the `line` matches
    /// exactly one step and parses successfully.
    ///
    /// # Errors
    ///
    /// - Any error of [`Registry::parse()`];
    /// - [`StepError::Failed`] carrying the collaborator's failure as is.
    pub fn dispatch<Home, Base>(
        &self,
        line: &str,
        table: Option<&Table>,
        ctx: &mut ScenarioContext<Home, Base>,
    ) -> Result<(), StepError>
    where
        Home: HomeScreen,
        Base: FieldDriver,
    {
        let _span = tracing::debug_span!("step", line).entered();

        let result = self.parse(line, table).and_then(|step| {
            tracing::debug!(?step, "dispatching");
            step.run(ctx, &self.config.salary_field)
                .map_err(StepError::from)
        });
        if let Err(e) = &result {
            tracing::debug!(error = %e, "step failed");
        }
        result
    }
}
