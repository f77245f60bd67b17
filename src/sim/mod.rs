// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory salary screen to run the steps against without a device.
//!
//! # Example
//!
//! ```rust
//! # use salary_steps::{sim, Registry, ScenarioContext, Table};
//! #
//! let (home, base) = sim::launch();
//! let mut ctx = ScenarioContext::new(home, base);
//! let registry = Registry::default();
//!
//! registry
//!     .dispatch(r#"I enter an annual income of "50000""#, None, &mut ctx)
//!     .unwrap();
//! registry
//!     .dispatch(
//!         "I should see the following breakdown",
//!         Some(&Table::from(vec![
//!             vec!["Deduction", "Amount"],
//!             vec!["Net annual income", "£36,325.70"],
//!         ])),
//!         &mut ctx,
//!     )
//!     .unwrap();
//! ```

pub mod calculator;
pub mod screen;

use std::{cell::RefCell, rc::Rc};

use smart_default::SmartDefault;

#[doc(inline)]
pub use self::{
    calculator::{Breakdown, Money, MoneyParseError},
    screen::{Driver, HomePage, Screen},
};

/// Options of a launched simulated screen.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct SimOptions {
    /// Name of the salary field.
    #[default = "Salary"]
    pub salary_field: String,

    /// Maximum number of characters the salary field accepts.
    #[default(Some(7))]
    pub max_length: Option<usize>,
}

/// Launches a simulated screen with the default [`SimOptions`].
#[must_use]
pub fn launch() -> (HomePage, Driver) {
    launch_with(SimOptions::default())
}

/// Launches a simulated screen, returning its page object and field driver
/// sharing it.
#[must_use]
pub fn launch_with(opts: SimOptions) -> (HomePage, Driver) {
    tracing::debug!(?opts, "launching simulated screen");

    let screen = Rc::new(RefCell::new(Screen::new(
        opts.salary_field,
        opts.max_length,
    )));
    (HomePage::new(Rc::clone(&screen)), Driver::new(screen))
}
