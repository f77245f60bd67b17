// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error of a step line matching several patterns.

use std::fmt;

use derive_more::Error;

use super::{location::Location, regex::HashableRegex};

/// Error of a step line matching multiple [`Step`] patterns inside a
/// [`Collection`].
///
/// [`Collection`]: super::Collection
/// [`Step`]: super::Step
#[derive(Clone, Debug, Error, PartialEq)]
pub struct AmbiguousMatchError {
    /// Patterns the step line matches, sorted by their source.
    pub possible_matches: Vec<(HashableRegex, Option<Location>)>,
}

impl AmbiguousMatchError {
    /// Returns source patterns of the [`AmbiguousMatchError::possible_matches`].
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.possible_matches.iter().map(|(re, _)| re.as_str())
    }
}

impl fmt::Display for AmbiguousMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Possible matches:")?;
        for (re, loc) in &self.possible_matches {
            write!(f, "\n{re}")?;
            if let Some(loc) = loc {
                write!(f, " --> {loc}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn lists_every_pattern_with_its_location() {
        let err = AmbiguousMatchError {
            possible_matches: vec![
                (
                    Regex::new("^I enter (.*)$").unwrap().into(),
                    Some(Location::new("src/salary.rs", 10, 5)),
                ),
                (Regex::new("^I (.*) income$").unwrap().into(), None),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Possible matches:\n\
             ^I enter (.*)$ --> src/salary.rs:10:5\n\
             ^I (.*) income$",
        );
        assert_eq!(
            err.patterns().collect::<Vec<_>>(),
            ["^I enter (.*)$", "^I (.*) income$"],
        );
    }
}
