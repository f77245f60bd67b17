// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step pattern [`Collection`] and matching.

use std::fmt;

use itertools::Itertools as _;
use linked_hash_map::LinkedHashMap;
use regex::Regex;

use super::{
    context::Context, error::AmbiguousMatchError, location::Location,
    regex::HashableRegex, Step,
};
use crate::{registry::AmbiguityPolicy, table::Table};

/// Alias for a [`Step`] with its [`Location`] and [`Context`] returned by
/// [`Collection::find()`].
pub type WithContext<'me, Out> = (&'me Step<Out>, Option<Location>, Context);

/// Collection of [`Step`]s keyed by their patterns, in registration order.
///
/// Every step line is expected to match exactly 1 pattern. What happens
/// otherwise is decided by the [`AmbiguityPolicy`] given to
/// [`Collection::find()`].
pub struct Collection<Out> {
    steps: LinkedHashMap<HashableRegex, (Option<Location>, Step<Out>)>,
}

impl<Out> fmt::Debug for Collection<Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field(
                "steps",
                &self
                    .steps
                    .iter()
                    .map(|(re, (loc, step))| (re, loc, format!("{step:p}")))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// Implemented manually to omit redundant `Out: Default` trait bound, imposed
// by `#[derive(Default)]`.
impl<Out> Default for Collection<Out> {
    fn default() -> Self {
        Self { steps: LinkedHashMap::new() }
    }
}

impl<Out> Collection<Out> {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [`Step`] matching the given `regex`.
    ///
    /// Registering the same pattern twice replaces the earlier [`Step`] and
    /// moves the pattern to the end of the registration order.
    #[must_use]
    pub fn step(
        mut self,
        loc: Option<Location>,
        regex: Regex,
        step: Step<Out>,
    ) -> Self {
        _ = self.steps.insert(regex.into(), (loc, step));
        self
    }

    /// Returns the number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Indicates whether no patterns are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over the registered patterns in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &HashableRegex> + '_ {
        self.steps.keys()
    }

    /// Returns a [`Step`] function matching the given step line, if any.
    ///
    /// The `table` is carried into the returned [`Context`] as is.
    ///
    /// # Errors
    ///
    /// If the step line matches multiple patterns and the `policy` is
    /// [`AmbiguityPolicy::Error`].
    pub fn find(
        &self,
        text: &str,
        table: Option<&Table>,
        policy: AmbiguityPolicy,
    ) -> Result<Option<WithContext<'_, Out>>, AmbiguousMatchError> {
        let mut candidates = self
            .steps
            .iter()
            .filter_map(|(re, (loc, step_fn))| {
                re.captures(text).map(|caps| (re, *loc, step_fn, caps))
            })
            .collect::<Vec<_>>();

        if candidates.len() > 1 && policy == AmbiguityPolicy::Error {
            return Err(AmbiguousMatchError {
                possible_matches: candidates
                    .into_iter()
                    .map(|(re, loc, ..)| (re.clone(), loc))
                    .sorted()
                    .collect(),
            });
        }
        if candidates.len() > 1 {
            tracing::warn!(
                step = text,
                candidates = candidates.len(),
                "ambiguous step, using the first registered pattern",
            );
        }

        if candidates.is_empty() {
            return Ok(None);
        }
        let (re, loc, step_fn, caps) = candidates.swap_remove(0);

        let matches = re
            .capture_names()
            .map(|name| name.map(str::to_owned))
            .zip(caps.iter())
            .map(|(name, m)| {
                (name, m.map(|m| m.as_str().to_owned()).unwrap_or_default())
            })
            .collect();

        Ok(Some((
            step_fn,
            loc,
            Context {
                step_text: text.to_owned(),
                matches,
                table: table.cloned(),
            },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(ctx: Context) -> Result<String, crate::error::ArgumentError> {
        Ok(ctx.capture(1).unwrap_or_default().to_owned())
    }

    fn constant(_: Context) -> Result<String, crate::error::ArgumentError> {
        Ok("constant".into())
    }

    fn collection() -> Collection<String> {
        Collection::new()
            .step(
                Some(Location::new("steps.rs", 1, 1)),
                Regex::new(r#"^I enter "(?P<amount>[^"]*)"$"#).unwrap(),
                echo,
            )
            .step(
                Some(Location::new("steps.rs", 2, 1)),
                Regex::new(r"^I enter .*$").unwrap(),
                constant,
            )
    }

    #[test]
    fn finds_single_match_with_named_captures() {
        let steps = Collection::new().step(
            None,
            Regex::new(r#"^I enter "(?P<amount>[^"]*)"$"#).unwrap(),
            echo,
        );

        let (step_fn, loc, ctx) = steps
            .find(r#"I enter "1,000""#, None, AmbiguityPolicy::Error)
            .unwrap()
            .unwrap();

        assert_eq!(loc, None);
        assert_eq!(ctx.named("amount"), Some("1,000"));
        assert_eq!(ctx.capture(0), Some(r#"I enter "1,000""#));
        assert_eq!(step_fn(ctx).unwrap(), "1,000");
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let steps = collection();

        let found = steps
            .find("I leave", None, AmbiguityPolicy::Error)
            .unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn errors_on_ambiguity_by_default() {
        let steps = collection();

        let err = steps
            .find(r#"I enter "5""#, None, AmbiguityPolicy::Error)
            .unwrap_err();

        assert_eq!(
            err.patterns().collect::<Vec<_>>(),
            [r#"^I enter "(?P<amount>[^"]*)"$"#, "^I enter .*$"],
        );
    }

    #[test]
    fn first_registered_wins_when_configured() {
        let steps = collection();

        let (step_fn, loc, ctx) = steps
            .find(r#"I enter "5""#, None, AmbiguityPolicy::FirstRegistered)
            .unwrap()
            .unwrap();

        assert_eq!(loc, Some(Location::new("steps.rs", 1, 1)));
        assert_eq!(step_fn(ctx).unwrap(), "5");
    }

    #[test]
    fn carries_table_unmodified() {
        let table = Table::from(vec![vec!["a", "b"], vec!["c", "d"]]);

        let steps = collection();

        let (.., ctx) = steps
            .find("I enter it", Some(&table), AmbiguityPolicy::Error)
            .unwrap()
            .unwrap();

        assert_eq!(ctx.table, Some(table));
    }

    #[test]
    fn reregistering_a_pattern_replaces_it() {
        let steps = collection().step(
            None,
            Regex::new(r"^I enter .*$").unwrap(),
            echo,
        );

        assert_eq!(steps.len(), 2);
        assert_eq!(
            steps.patterns().map(HashableRegex::as_str).collect::<Vec<_>>(),
            [r#"^I enter "(?P<amount>[^"]*)"$"#, "^I enter .*$"],
        );
    }
}
