// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step bindings of the salary deductions acceptance tests.
//!
//! A [`Registry`] matches [Gherkin] step lines against four anchored
//! patterns and hands the captured arguments, untouched, to the scenario's
//! collaborators: a [`HomeScreen`] page object and a generic
//! [`FieldDriver`]. Whole scenarios and features run through
//! [`run_scenario()`] and [`run_feature()`], and the [`sim`] module provides
//! an in-memory screen to run them against.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

#![deny(nonstandard_style, rustdoc::all, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::as_conversions,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::str_to_string,
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod context;
pub mod error;
pub mod feature;
pub mod registry;
pub mod salary;
pub mod scenario;
pub mod sim;
pub mod step;
pub mod table;

pub use gherkin;

#[doc(inline)]
pub use self::{
    config::Config,
    context::{FieldDriver, HomeScreen, ScenarioContext},
    error::{ArgumentError, AssertionFailure, StepError},
    feature::{expand_examples, ExpandExamplesError},
    registry::{AmbiguityPolicy, Registry},
    salary::{Amount, SalaryStep},
    scenario::{run_feature, run_scenario, ScenarioFailure, ScenarioOutcome},
    table::Table,
};
