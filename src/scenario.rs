// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sequential execution of [`gherkin`] scenarios through a [`Registry`].
//!
//! Steps run one after another. The first failing step stops its scenario,
//! and every scenario gets a fresh [`ScenarioContext`].

use derive_more::{Display, Error};

use crate::{
    context::{FieldDriver, HomeScreen, ScenarioContext},
    error::StepError,
    feature::{expand_examples, ExpandExamplesError},
    registry::Registry,
    table::Table,
};

/// Failure of a single scenario.
#[derive(Clone, Debug, Display, Error, PartialEq)]
#[display("Scenario `{scenario}` failed at line {line}, step `{step}`: {error}")]
pub struct ScenarioFailure {
    /// Name of the failed scenario.
    #[error(not(source))]
    pub scenario: String,

    /// Text of the failed step.
    #[error(not(source))]
    pub step: String,

    /// Line of the failed step in its feature file.
    pub line: usize,

    /// Why the step failed.
    #[error(source)]
    pub error: StepError,
}

/// Result of a single scenario of a feature.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioOutcome {
    /// Name of the rule holding the scenario, if any.
    pub rule: Option<String>,

    /// Name of the scenario.
    pub name: String,

    /// Number of passed steps, background ones included, or the failure.
    pub result: Result<usize, ScenarioFailure>,
}

impl ScenarioOutcome {
    /// Indicates whether the scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs the `background` steps and then the `scenario` steps with the given
/// [`ScenarioContext`].
///
/// Returns the number of passed steps. The `scenario` is run as is, so a
/// [Scenario Outline][1] should go through [`expand_examples()`] first.
///
/// # Errors
///
/// On the first failed step.
///
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
pub fn run_scenario<Home, Base>(
    registry: &Registry,
    background: Option<&gherkin::Background>,
    scenario: &gherkin::Scenario,
    ctx: &mut ScenarioContext<Home, Base>,
) -> Result<usize, ScenarioFailure>
where
    Home: HomeScreen,
    Base: FieldDriver,
{
    run_steps(registry, background.as_slice(), scenario, ctx)
}

/// Runs the steps of all the `backgrounds` in order, and then the `scenario`
/// steps.
fn run_steps<Home, Base>(
    registry: &Registry,
    backgrounds: &[&gherkin::Background],
    scenario: &gherkin::Scenario,
    ctx: &mut ScenarioContext<Home, Base>,
) -> Result<usize, ScenarioFailure>
where
    Home: HomeScreen,
    Base: FieldDriver,
{
    let _span =
        tracing::info_span!("scenario", name = %scenario.name).entered();

    let steps = backgrounds
        .iter()
        .flat_map(|bg| &bg.steps)
        .chain(&scenario.steps);

    let mut passed = 0;
    for step in steps {
        let table = step.table.as_ref().map(Table::from);
        registry.dispatch(&step.value, table.as_ref(), ctx).map_err(
            |error| ScenarioFailure {
                scenario: scenario.name.clone(),
                step: step.value.clone(),
                line: step.position.line,
                error,
            },
        )?;
        passed += 1;
    }

    tracing::debug!(passed, "scenario passed");
    Ok(passed)
}

/// Runs every scenario of the `feature`, each with a fresh
/// [`ScenarioContext`] built by `new_context` and torn down afterwards.
///
/// [Scenario Outline][1]s run once per [Examples][2] row. Scenarios of a
/// rule run after the feature's own ones, with the rule's background
/// following the feature's one.
///
/// # Errors
///
/// If a [Scenario Outline][1] can't be expanded, before any scenario runs.
///
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
/// [2]: https://cucumber.io/docs/gherkin/reference#examples
pub fn run_feature<Home, Base, F>(
    registry: &Registry,
    feature: &gherkin::Feature,
    mut new_context: F,
) -> Result<Vec<ScenarioOutcome>, ExpandExamplesError>
where
    Home: HomeScreen,
    Base: FieldDriver,
    F: FnMut() -> ScenarioContext<Home, Base>,
{
    let _span =
        tracing::info_span!("feature", name = %feature.name).entered();

    let feature = expand_examples(feature.clone())?;

    let own = feature
        .scenarios
        .iter()
        .map(|sc| (None, feature.background.iter().collect::<Vec<_>>(), sc));
    let ruled = feature.rules.iter().flat_map(|rule| {
        let backgrounds = feature
            .background
            .iter()
            .chain(&rule.background)
            .collect::<Vec<_>>();
        rule.scenarios
            .iter()
            .map(move |sc| (Some(&rule.name), backgrounds.clone(), sc))
    });

    Ok(own
        .chain(ruled)
        .map(|(rule, backgrounds, scenario)| {
            let mut ctx = new_context();
            let result = run_steps(registry, &backgrounds, scenario, &mut ctx);
            _ = ctx.finish();

            if let Err(e) = &result {
                tracing::warn!(error = %e, "scenario failed");
            }
            ScenarioOutcome {
                rule: rule.cloned(),
                name: scenario.name.clone(),
                result,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use gherkin::{Feature, GherkinEnv};

    use super::*;
    use crate::error::AssertionFailure;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn record(&mut self, call: String) -> Result<(), AssertionFailure> {
            let fail = self.fail_on.is_some_and(|f| call.contains(f));
            self.calls.push(call);
            if fail {
                return Err(AssertionFailure::new("recorder told to fail"));
            }
            Ok(())
        }
    }

    impl HomeScreen for Recorder {
        fn set_annual_income(
            &mut self,
            amount: &str,
        ) -> Result<(), AssertionFailure> {
            self.record(format!("set_annual_income({amount})"))
        }

        fn check_deductions(
            &mut self,
            table: &Table,
        ) -> Result<(), AssertionFailure> {
            self.record(format!("check_deductions({} rows)", table.len()))
        }
    }

    impl FieldDriver for Recorder {
        fn enter_text_in_field(
            &mut self,
            text: &str,
            field: &str,
        ) -> Result<(), AssertionFailure> {
            self.record(format!("enter_text_in_field({text}, {field})"))
        }

        fn check_text_in_field(
            &mut self,
            expected: &str,
            field: &str,
        ) -> Result<(), AssertionFailure> {
            self.record(format!("check_text_in_field({expected}, {field})"))
        }
    }

    const FEATURE: &str = r#"Feature: Salary deductions

  Background:
    Given I enter an annual income of "20000"

  Scenario: Breakdown
    When I enter an annual income of "50000"
    Then I should see the following breakdown
      | Deduction  | Amount    |
      | Income tax | £9,403.00 |

  Scenario: Unknown step
    When I enter an annual income of "50000"
    And I press the big red button
    Then I should see the following breakdown
      | Deduction | Amount |
"#;

    fn feature() -> Feature {
        Feature::parse(FEATURE, GherkinEnv::default()).unwrap()
    }

    #[test]
    fn runs_background_then_scenario_steps() {
        let feature = feature();
        let mut ctx =
            ScenarioContext::new(Recorder::default(), Recorder::default());

        let passed = run_scenario(
            &Registry::default(),
            feature.background.as_ref(),
            &feature.scenarios[0],
            &mut ctx,
        )
        .unwrap();

        let (home, base) = ctx.finish();
        assert_eq!(passed, 3);
        assert_eq!(
            home.calls,
            [
                "set_annual_income(20000)",
                "set_annual_income(50000)",
                "check_deductions(2 rows)",
            ],
        );
        assert!(base.calls.is_empty());
    }

    #[test]
    fn stops_at_first_failing_step() {
        let feature = feature();
        let mut ctx =
            ScenarioContext::new(Recorder::default(), Recorder::default());

        let err = run_scenario(
            &Registry::default(),
            None,
            &feature.scenarios[1],
            &mut ctx,
        )
        .unwrap_err();

        assert_eq!(err.scenario, "Unknown step");
        assert_eq!(err.step, "I press the big red button");
        assert_eq!(err.line, 14);
        assert_eq!(err.error, StepError::undefined("I press the big red button"));

        let (home, _) = ctx.finish();
        assert_eq!(home.calls, ["set_annual_income(50000)"]);
    }

    #[test]
    fn collaborator_failure_keeps_its_message() {
        let feature = feature();
        let home = Recorder { fail_on: Some("check_deductions"), ..Recorder::default() };
        let mut ctx = ScenarioContext::new(home, Recorder::default());

        let err = run_scenario(
            &Registry::default(),
            None,
            &feature.scenarios[0],
            &mut ctx,
        )
        .unwrap_err();

        assert_eq!(
            err.error,
            StepError::Failed(AssertionFailure::new("recorder told to fail")),
        );
        assert!(err.to_string().ends_with(": recorder told to fail"));
    }

    #[test]
    fn runs_every_scenario_with_a_fresh_context() {
        let feature = feature();
        let mut created = 0;

        let outcomes = run_feature(&Registry::default(), &feature, || {
            created += 1;
            ScenarioContext::new(Recorder::default(), Recorder::default())
        })
        .unwrap();

        assert_eq!(created, 2);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].passed());
        assert_eq!(outcomes[0].result, Ok(3));
        assert_eq!(outcomes[0].rule, None);
        assert!(!outcomes[1].passed());
    }

    const RULES: &str = r#"Feature: Salary cap

  Background:
    Given I enter an annual income of "1"

  Rule: Cap
    Background:
      Given I enter an annual income of "2"

    Scenario: Too many figures
      When I attempt to enter an annual income of "99999999"

  Rule: Outline
    Scenario Outline: Typing <typed>
      When I attempt to enter an annual income of "<typed>"
      Then I should be prevented from typing more than "<kept>"

      Examples:
        | typed    | kept    |
        | 99999999 | 9999999 |
        | 123      | 123     |
"#;

    #[test]
    fn runs_rule_scenarios_after_both_backgrounds() {
        let feature = Feature::parse(RULES, GherkinEnv::default()).unwrap();

        let outcomes = run_feature(&Registry::default(), &feature, || {
            ScenarioContext::new(Recorder::default(), Recorder::default())
        })
        .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].rule.as_deref(), Some("Cap"));
        assert_eq!(outcomes[0].result, Ok(3));
        assert!(outcomes.iter().all(ScenarioOutcome::passed));

        let mut ctx =
            ScenarioContext::new(Recorder::default(), Recorder::default());
        let rule = &feature.rules[0];
        let backgrounds = [
            feature.background.as_ref().unwrap(),
            rule.background.as_ref().unwrap(),
        ];
        assert_eq!(
            run_steps(
                &Registry::default(),
                &backgrounds,
                &rule.scenarios[0],
                &mut ctx,
            ),
            Ok(3),
        );

        let (home, base) = ctx.finish();
        assert_eq!(
            home.calls,
            ["set_annual_income(1)", "set_annual_income(2)"],
        );
        assert_eq!(base.calls, ["enter_text_in_field(99999999, Salary)"]);
    }

    #[test]
    fn runs_outline_once_per_examples_row() {
        let feature = Feature::parse(RULES, GherkinEnv::default()).unwrap();

        let outcomes = run_feature(&Registry::default(), &feature, || {
            ScenarioContext::new(Recorder::default(), Recorder::default())
        })
        .unwrap();

        assert_eq!(outcomes[1].rule.as_deref(), Some("Outline"));
        assert_eq!(outcomes[1].name, "Typing 99999999");
        assert_eq!(outcomes[2].name, "Typing 123");
        assert_eq!(outcomes[2].result, Ok(3));

        let expanded = expand_examples(feature).unwrap();
        let mut ctx =
            ScenarioContext::new(Recorder::default(), Recorder::default());
        assert_eq!(
            run_scenario(
                &Registry::default(),
                None,
                &expanded.rules[1].scenarios[0],
                &mut ctx,
            ),
            Ok(2),
        );

        let (_, base) = ctx.finish();
        assert_eq!(
            base.calls,
            [
                "enter_text_in_field(99999999, Salary)",
                "check_text_in_field(9999999, Salary)",
            ],
        );
    }

    #[test]
    fn unresolvable_outline_runs_nothing() {
        let feature = Feature::parse(
            r#"Feature: Broken
  Scenario: Plain
    When I enter an annual income of "1"

  Scenario Outline: Typo
    When I enter an annual income of "<amount>"

    Examples:
      | income |
      | 1      |
"#,
            GherkinEnv::default(),
        )
        .unwrap();
        let mut created = 0;

        let err = run_feature(&Registry::default(), &feature, || {
            created += 1;
            ScenarioContext::new(Recorder::default(), Recorder::default())
        })
        .unwrap_err();

        assert_eq!(err.name, "amount");
        assert_eq!(created, 0);
    }
}
