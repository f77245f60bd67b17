// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration of a [`Registry`].
//!
//! [`Config`] is a set of [`clap::Args`], so a runner embedding the
//! [`Registry`] may `#[command(flatten)]` it into its own CLI.
//!
//! [`Registry`]: crate::Registry

use clap::Args;
use smart_default::SmartDefault;

use crate::registry::AmbiguityPolicy;

/// Options of a [`Registry`].
///
/// # Example
///
/// ```rust
/// # use clap::Parser;
/// # use salary_steps::{AmbiguityPolicy, Config};
/// #
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     steps: Config,
/// }
///
/// let cli = Cli::parse_from(["runner", "--ambiguous-steps", "first-registered"]);
/// assert_eq!(cli.steps.ambiguity, AmbiguityPolicy::FirstRegistered);
/// assert_eq!(cli.steps.salary_field, "Salary");
/// ```
///
/// [`Registry`]: crate::Registry
#[derive(Args, Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Config {
    /// What to do when a step line matches several patterns.
    #[arg(
        id = "ambiguous-steps",
        long = "ambiguous-steps",
        value_name = "policy",
        value_enum,
        default_value = "error",
        global = true
    )]
    pub ambiguity: AmbiguityPolicy,

    /// Name of the field annual incomes are typed into.
    #[arg(
        id = "salary-field",
        long = "salary-field",
        value_name = "name",
        default_value = "Salary",
        global = true
    )]
    #[default = "Salary"]
    pub salary_field: String,
}
