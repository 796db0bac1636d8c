// Currency strings such as "$50" to whole-dollar budgets.

use crate::domain::model::{Amount, Attendee};
use crate::utils::error::{AuctionError, Result};
use regex::Regex;
use std::sync::LazyLock;

static STRICT_BUDGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\$?\s*(\d+)(?:\.\d*)?\s*$").expect("strict budget pattern compiles")
});

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?)(\d+)").expect("leading integer pattern compiles"));

/// Reads a budget like `"$50"`, `"75"` or `"$12.99"` (cents are dropped).
///
/// Anything else fails with [`AuctionError::InvalidBudgetFormat`].
pub fn parse_budget(raw: &str) -> Result<Amount> {
    STRICT_BUDGET
        .captures(raw)
        .and_then(|caps| caps[1].parse::<Amount>().ok())
        .ok_or_else(|| AuctionError::InvalidBudgetFormat {
            value: raw.to_string(),
        })
}

/// Lenient reading: drops every `$`, then takes the leading integer.
///
/// No leading digits gives 0, as does a negative amount. Values past
/// `Amount::MAX` saturate.
pub fn coerce_budget(raw: &str) -> Amount {
    let stripped = raw.replace('$', "");
    let Some(caps) = LEADING_INTEGER.captures(&stripped) else {
        tracing::warn!(budget = raw, "budget has no leading digits, using 0");
        return 0;
    };
    if &caps[1] == "-" {
        tracing::warn!(budget = raw, "negative budget, using 0");
        return 0;
    }
    caps[2].parse::<Amount>().unwrap_or(Amount::MAX)
}

impl Attendee {
    /// Builds an attendee from a currency-formatted budget, coercing as
    /// [`coerce_budget`] does.
    pub fn from_currency(name: impl Into<String>, budget: &str) -> Self {
        Attendee::new(name, coerce_budget(budget))
    }

    /// Like [`Attendee::from_currency`] but rejects malformed budgets.
    pub fn try_from_currency(name: impl Into<String>, budget: &str) -> Result<Self> {
        Ok(Attendee::new(name, parse_budget(budget)?))
    }
}
