// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Income tax and National Insurance deductions for the 2015-16 tax year.
//!
//! National Insurance is category A. Every band is truncated to whole pence
//! separately.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use itertools::Itertools as _;

/// Sum of money, in pence.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(pub u64);

impl Money {
    /// Creates a new [`Money`] of whole `pounds`.
    #[must_use]
    pub const fn pounds(pounds: u64) -> Self {
        Self(pounds * 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.0 / 100).to_string().chars().collect::<Vec<_>>();
        let pounds = digits
            .rchunks(3)
            .rev()
            .map(|group| group.iter().collect::<String>())
            .join(",");
        write!(f, "£{pounds}.{:02}", self.0 % 100)
    }
}

/// Error of parsing [`Money`] out of a text.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("`{text}` is not a sum of money")]
pub struct MoneyParseError {
    /// Text that failed to parse.
    #[error(not(source))]
    pub text: String,
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parses text like `50000`, `£50,000` or `50000.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MoneyParseError { text: s.to_owned() };

        let cleaned = s.trim().trim_start_matches('£').replace(',', "");
        let (pounds, pence) =
            cleaned.split_once('.').unwrap_or((cleaned.as_str(), "0"));
        if pounds.is_empty()
            || pence.is_empty()
            || pence.len() > 2
            || !pounds.bytes().chain(pence.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        let pounds = pounds.parse::<u64>().map_err(|_| err())?;
        let pence = format!("{pence:0<2}").parse::<u64>().map_err(|_| err())?;
        pounds
            .checked_mul(100)
            .and_then(|p| p.checked_add(pence))
            .map(Self)
            .ok_or_else(err)
    }
}

const MAX_PERSONAL_ALLOWANCE: u64 = 1_060_000;
const PERSONAL_ALLOWANCE_THRESHOLD: u64 = 10_000_000;
const BASIC_RATE_BAND: u64 = 3_178_500;
const HIGHER_RATE_THRESHOLD: u64 = 15_000_000;

const BASIC_RATE: u64 = 2_000;
const HIGHER_RATE: u64 = 4_000;
const ADDITIONAL_RATE: u64 = 4_500;

/// Primary Threshold.
const NI_PT: u64 = 806_000;
/// Upper Accrual Point.
const NI_UAP: u64 = 4_004_000;
/// Upper Earnings Limit.
const NI_UEL: u64 = 4_238_500;

const NI_MAIN_RATE: u64 = 1_200;
const NI_UPPER_RATE: u64 = 200;

/// Applies a rate given in basis points, truncating to whole pence.
const fn apply_rate(amount: u64, basis_points: u64) -> u64 {
    amount / 10_000 * basis_points + amount % 10_000 * basis_points / 10_000
}

/// Part of `gross` falling between `low` and `high`.
fn band(gross: u64, low: u64, high: u64) -> u64 {
    gross.clamp(low, high) - low
}

/// Deductions breakdown of an annual income.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Breakdown {
    /// Gross annual income.
    pub gross: Money,

    /// Tax-free personal allowance.
    pub personal_allowance: Money,

    /// Income tax over all the rates.
    pub income_tax: Money,

    /// National Insurance contributions.
    pub national_insurance: Money,

    /// Income tax and National Insurance together.
    pub total_deductions: Money,

    /// What remains of the gross income.
    pub net_income: Money,
}

impl Breakdown {
    /// Calculates the [`Breakdown`] of the given `gross` annual income.
    #[must_use]
    pub fn of(gross: Money) -> Self {
        let g = gross.0;

        let allowance = personal_allowance(g);
        let basic_limit = BASIC_RATE_BAND + allowance;

        let basic =
            apply_rate(g.min(basic_limit).saturating_sub(allowance), BASIC_RATE);
        let higher = if g > basic_limit {
            apply_rate(g.min(HIGHER_RATE_THRESHOLD) - basic_limit, HIGHER_RATE)
        } else {
            0
        };
        let additional = apply_rate(
            g.saturating_sub(HIGHER_RATE_THRESHOLD),
            ADDITIONAL_RATE,
        );
        let tax = basic + higher + additional;

        let ni = national_insurance(g);

        Self {
            gross,
            personal_allowance: Money(allowance),
            income_tax: Money(tax),
            national_insurance: Money(ni),
            total_deductions: Money(tax + ni),
            net_income: Money(g.saturating_sub(tax + ni)),
        }
    }

    /// Returns labelled rows of this [`Breakdown`], as shown on the screen.
    #[must_use]
    pub const fn rows(&self) -> [(&'static str, Money); 6] {
        [
            ("Gross annual income", self.gross),
            ("Personal allowance", self.personal_allowance),
            ("Income tax", self.income_tax),
            ("National Insurance", self.national_insurance),
            ("Total deductions", self.total_deductions),
            ("Net annual income", self.net_income),
        ]
    }

    /// Returns the row labelled `label`, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Money> {
        self.rows()
            .into_iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label.trim()))
            .map(|(_, money)| money)
    }
}

/// The allowance shrinks by £1 for every £2 above the threshold.
///
/// Any remainder of a £2 step only takes £1 off the excess, pence included,
/// and the allowance never grows above its maximum.
fn personal_allowance(gross: u64) -> u64 {
    let Some(mut excess) = gross.checked_sub(PERSONAL_ALLOWANCE_THRESHOLD)
    else {
        return MAX_PERSONAL_ALLOWANCE;
    };
    if excess % 200 > 0 {
        excess = excess.saturating_sub(100);
    }
    MAX_PERSONAL_ALLOWANCE.saturating_sub(excess / 2)
}

/// Nothing is due below the Primary Threshold.
fn national_insurance(gross: u64) -> u64 {
    apply_rate(band(gross, NI_PT, NI_UAP), NI_MAIN_RATE)
        + apply_rate(band(gross, NI_UAP, NI_UEL), NI_MAIN_RATE)
        + apply_rate(gross.saturating_sub(NI_UEL), NI_UPPER_RATE)
}
