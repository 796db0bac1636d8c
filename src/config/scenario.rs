use crate::adapters::budget::{coerce_budget, parse_budget};
use crate::adapters::roster::load_roster;
use crate::core::auction::Auction;
use crate::domain::model::{Amount, Attendee, Item};
use crate::utils::error::{AuctionError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_unique_names, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub auction: AuctionSection,
    #[serde(default)]
    pub attendees: Vec<AttendeeConfig>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
    #[serde(default)]
    pub bids: Vec<BidConfig>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionSection {
    pub name: String,
    pub description: Option<String>,
    pub strict_budgets: Option<bool>,
    pub roster: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeConfig {
    pub name: String,
    pub budget: BudgetValue,
}

/// A budget written either as a number (`50`) or a currency string (`"$50"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetValue {
    Amount(Amount),
    Text(String),
}

impl BudgetValue {
    pub fn resolve(&self, strict: bool) -> Result<Amount> {
        match self {
            BudgetValue::Amount(amount) => Ok(*amount),
            BudgetValue::Text(text) if strict => parse_budget(text),
            BudgetValue::Text(text) => Ok(coerce_budget(text)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidConfig {
    pub item: String,
    pub attendee: String,
    pub amount: Amount,
}

impl ScenarioConfig {
    /// Loads a scenario from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses a scenario from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AuctionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn is_strict(&self) -> bool {
        self.auction.strict_budgets.unwrap_or(false)
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.auction.strict_budgets = Some(strict);
    }

    /// Roster path, resolved against the scenario file's directory when relative.
    pub fn roster_path(&self) -> Option<PathBuf> {
        let roster = Path::new(self.auction.roster.as_deref()?);
        Some(match &self.base_dir {
            Some(base) if roster.is_relative() => base.join(roster),
            _ => roster.to_path_buf(),
        })
    }

    /// Checks names, bids and budgets for consistency.
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("auction.name", &self.auction.name)?;

        if let Some(roster) = &self.auction.roster {
            validate_path("auction.roster", roster)?;
        }

        for attendee in &self.attendees {
            validate_non_empty_string("attendees.name", &attendee.name)?;
            if self.is_strict() {
                attendee.budget.resolve(true)?;
            }
        }
        validate_unique_names("attendees.name", self.attendees.iter().map(|a| a.name.as_str()))?;

        for item in &self.items {
            validate_non_empty_string("items.name", &item.name)?;
        }
        validate_unique_names("items.name", self.items.iter().map(|i| i.name.as_str()))?;

        for bid in &self.bids {
            if !self.items.iter().any(|item| item.name == bid.item) {
                return Err(AuctionError::UnknownItemName {
                    name: bid.item.clone(),
                });
            }
        }

        Ok(())
    }

    /// Builds the auction: inline attendees, then the roster file if any,
    /// then items, then bids in file order.
    pub fn build_auction(&self) -> Result<Auction> {
        self.build_auction_with(self.roster_attendees()?)
    }

    /// Attendees from the `auction.roster` file, empty when none is set.
    pub fn roster_attendees(&self) -> Result<Vec<Attendee>> {
        match self.roster_path() {
            Some(path) => load_roster(path, self.is_strict()),
            None => Ok(Vec::new()),
        }
    }

    pub fn build_auction_with(&self, roster: Vec<Attendee>) -> Result<Auction> {
        let strict = self.is_strict();
        let mut auction = Auction::new();

        let inline = self
            .attendees
            .iter()
            .map(|a| -> Result<Attendee> {
                Ok(Attendee::new(a.name.clone(), a.budget.resolve(strict)?))
            })
            .collect::<Result<Vec<_>>>()?;

        for attendee in inline.into_iter().chain(roster) {
            if auction.find_attendee(attendee.name()).is_some() {
                return Err(AuctionError::DuplicateAttendee {
                    name: attendee.name().to_string(),
                });
            }
            auction.register_attendee(attendee);
        }

        for item in &self.items {
            auction.add_item(Item::new(item.name.clone()))?;
        }

        for bid in &self.bids {
            let item = auction
                .find_item(&bid.item)
                .ok_or_else(|| AuctionError::UnknownItemName {
                    name: bid.item.clone(),
                })?;
            let attendee = auction.find_attendee(&bid.attendee).ok_or_else(|| {
                AuctionError::UnknownAttendeeName {
                    name: bid.attendee.clone(),
                }
            })?;
            auction.place_bid(item, attendee, bid.amount)?;
        }

        tracing::info!(
            "Loaded auction '{}': {} items, {} attendees, {} bids",
            self.auction.name,
            auction.items().len(),
            auction.attendees().len(),
            self.bids.len()
        );
        Ok(auction)
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
