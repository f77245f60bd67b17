// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expansion of [Scenario Outline][1]s into plain scenarios.
//!
//! [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline

use std::{fmt, iter, mem, path::PathBuf};

use derive_more::Error;
use lazy_regex::regex;

/// Error of a [Scenario Outline][1] using a `<placeholder>` its
/// [Examples][2] have no column for.
///
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
/// [2]: https://cucumber.io/docs/gherkin/reference#examples
#[derive(Clone, Debug, Error, PartialEq)]
pub struct ExpandExamplesError {
    /// Position of the unknown placeholder.
    pub pos: gherkin::LineCol,

    /// Name of the unknown placeholder.
    pub name: String,

    /// Path to the `.feature` file, if any.
    pub path: Option<PathBuf>,
}

impl fmt::Display for ExpandExamplesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to resolve <{}> at ", self.name)?;
        if let Some(path) = &self.path {
            write!(f, "{}:", path.display())?;
        }
        write!(f, "{}:{}", self.pos.line, self.pos.col)
    }
}

/// Replaces every [Scenario Outline][1] of the `feature`, its rules
/// included, with one plain scenario per [Examples][2] row.
///
/// # Errors
///
/// If a placeholder has no matching [Examples][2] column.
///
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
/// [2]: https://cucumber.io/docs/gherkin/reference#examples
pub fn expand_examples(
    mut feature: gherkin::Feature,
) -> Result<gherkin::Feature, ExpandExamplesError> {
    let path = feature.path.clone();
    let expand = |scenarios: Vec<gherkin::Scenario>| -> Result<_, _> {
        scenarios
            .into_iter()
            .flat_map(|s| expand_scenario(s, path.as_ref()))
            .collect()
    };

    for rule in &mut feature.rules {
        rule.scenarios = expand(mem::take(&mut rule.scenarios))?;
    }
    feature.scenarios = expand(mem::take(&mut feature.scenarios))?;

    Ok(feature)
}

fn expand_scenario(
    scenario: gherkin::Scenario,
    path: Option<&PathBuf>,
) -> Vec<Result<gherkin::Scenario, ExpandExamplesError>> {
    if scenario.examples.is_empty() {
        return vec![Ok(scenario)];
    }

    scenario
        .examples
        .iter()
        .filter_map(|ex| {
            ex.table
                .as_ref()?
                .rows
                .split_first()
                .map(|(header, rows)| (header, rows, ex))
        })
        .flat_map(|(header, rows, ex)| {
            rows.iter().enumerate().map(move |(id, row)| (header, row, id, ex))
        })
        .map(|(header, row, id, ex)| {
            let replace = |text: &str, pos| {
                let mut err = None;
                let replaced = regex!(r"<([^>\s]+)>")
                    .replace_all(text, |cap: &regex::Captures<'_>| {
                        let name = cap.get(1).map_or("", |m| m.as_str());
                        header
                            .iter()
                            .zip(row)
                            .find_map(|(k, v)| (k == name).then_some(v.as_str()))
                            .unwrap_or_else(|| {
                                err = Some(ExpandExamplesError {
                                    pos,
                                    name: name.to_owned(),
                                    path: path.cloned(),
                                });
                                ""
                            })
                    })
                    .into_owned();
                err.map_or(Ok(replaced), Err)
            };

            let mut expanded = scenario.clone();
            expanded.examples.clear();
            expanded.tags.extend(ex.tags.iter().cloned());
            // Points at the examples row the scenario is expanded from.
            expanded.position = ex.position;
            expanded.position.line += id + 2;

            expanded.name = replace(&expanded.name, expanded.position)?;
            for step in &mut expanded.steps {
                let pos = step.position;
                for value in iter::once(&mut step.value)
                    .chain(step.docstring.iter_mut())
                    .chain(step.table.iter_mut().flat_map(|t| {
                        t.rows.iter_mut().flat_map(|r| r.iter_mut())
                    }))
                {
                    *value = replace(value.as_str(), pos)?;
                }
            }

            Ok(expanded)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use gherkin::{Feature, GherkinEnv};

    use super::*;

    fn parse(input: &str) -> Feature {
        Feature::parse(input, GherkinEnv::default()).unwrap()
    }

    #[test]
    fn expands_one_scenario_per_examples_row() {
        let feature = expand_examples(parse(
            r#"Feature: Cap
  Scenario Outline: Typing <typed>
    When I attempt to enter an annual income of "<typed>"
    Then I should be prevented from typing more than "<kept>"

    Examples:
      | typed    | kept    |
      | 99999999 | 9999999 |
      | 123      | 123     |
"#,
        ))
        .unwrap();

        assert_eq!(feature.scenarios.len(), 2);
        let first = &feature.scenarios[0];
        assert_eq!(first.name, "Typing 99999999");
        assert!(first.examples.is_empty());
        assert_eq!(
            first.steps[0].value,
            r#"I attempt to enter an annual income of "99999999""#,
        );
        assert_eq!(
            first.steps[1].value,
            r#"I should be prevented from typing more than "9999999""#,
        );
        assert_eq!(first.position.line, 8);
        assert_eq!(feature.scenarios[1].position.line, 9);
        assert_eq!(
            feature.scenarios[1].steps[1].value,
            r#"I should be prevented from typing more than "123""#,
        );
    }

    #[test]
    fn expands_placeholders_in_tables_and_rules() {
        let feature = expand_examples(parse(
            r#"Feature: Breakdown
  Rule: Higher rate
    Scenario Outline: Tax
      When I enter an annual income of "<income>"
      Then I should see the following breakdown
        | Deduction  | Amount |
        | Income tax | <tax>  |

      Examples:
        | income | tax       |
        | 50000  | £9,403.00 |
"#,
        ))
        .unwrap();

        let scenario = &feature.rules[0].scenarios[0];
        assert_eq!(
            scenario.steps[1].table.as_ref().unwrap().rows[1],
            ["Income tax", "£9,403.00"],
        );
    }

    #[test]
    fn leaves_plain_scenarios_alone() {
        let plain = parse(
            r#"Feature: Plain
  Scenario: Literal <angles>
    When I enter an annual income of "<none>"
"#,
        );

        let expanded = expand_examples(plain.clone()).unwrap();

        assert_eq!(expanded.scenarios, plain.scenarios);
    }

    #[test]
    fn unknown_placeholder_fails() {
        let err = expand_examples(parse(
            r#"Feature: Cap
  Scenario Outline: Typing
    When I attempt to enter an annual income of "<typo>"

    Examples:
      | typed |
      | 1     |
"#,
        ))
        .unwrap_err();

        assert_eq!(err.name, "typo");
        assert_eq!(err.pos.line, 3);
        assert!(
            err.to_string().starts_with("Failed to resolve <typo> at 3:"),
            "{err}",
        );
    }
}
