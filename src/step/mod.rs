// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions for a [`Collection`] which is used to store [`Step`] [`fn`]s
//! and corresponding [`Regex`] patterns.
//!
//! [`Regex`]: regex::Regex

pub mod collection;
pub mod context;
pub mod error;
pub mod location;
pub mod regex;

pub use self::{
    collection::{Collection, WithContext},
    context::{CaptureName, Context},
    error::AmbiguousMatchError,
    location::Location,
    regex::HashableRegex,
};

use crate::error::ArgumentError;

/// Alias for a [`fn`] turning a matched step line into a typed step value.
pub type Step<Out> = fn(Context) -> Result<Out, ArgumentError>;
