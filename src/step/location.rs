// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Source location of a registered [`Step`].
//!
//! [`Step`]: super::Step

use std::panic;

use derive_more::Display;

/// Location of the code registering a [`Step`] function.
///
/// Used to point at conflicting registrations when a step line is ambiguous.
///
/// [`Step`]: super::Step
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}:{column}")]
pub struct Location {
    /// Path to the file where the [`Step`] was registered.
    ///
    /// [`Step`]: super::Step
    pub path: &'static str,

    /// Line of the registration.
    pub line: u32,

    /// Column of the registration.
    pub column: u32,
}

impl Location {
    /// Creates a new [`Location`].
    #[must_use]
    pub const fn new(path: &'static str, line: u32, column: u32) -> Self {
        Self { path, line, column }
    }

    /// Returns the [`Location`] of the caller of the function this is called
    /// from, if that function is `#[track_caller]`.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let loc = panic::Location::caller();
        Self::new(loc.file(), loc.line(), loc.column())
    }
}

#[cfg(test)]
mod tests {
    use super::Location;

    #[test]
    fn displays_as_path_line_column() {
        let loc = Location::new("src/salary.rs", 42, 10);

        assert_eq!(loc.to_string(), "src/salary.rs:42:10");
    }

    #[test]
    fn orders_by_path_then_line_then_column() {
        let a = Location::new("a.rs", 1, 1);

        assert!(a < Location::new("b.rs", 1, 1));
        assert!(a < Location::new("a.rs", 2, 1));
        assert!(a < Location::new("a.rs", 1, 2));
    }

    #[test]
    fn caller_points_into_this_file() {
        let loc = Location::caller();

        assert!(loc.path.ends_with("location.rs"), "{loc}");
        assert!(loc.line > 0);
    }
}
