use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole-dollar amount used for budgets and bids.
pub type Amount = u64;

/// Handle to an attendee registered with an [`crate::Auction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttendeeId(pub(crate) usize);

impl AttendeeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to an item added to an [`crate::Auction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A participant with a name and a spendable budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    name: String,
    budget: Amount,
}

impl Attendee {
    pub fn new(name: impl Into<String>, budget: Amount) -> Self {
        Self {
            name: name.into(),
            budget,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn budget(&self) -> Amount {
        self.budget
    }

    pub fn set_budget(&mut self, budget: Amount) {
        self.budget = budget;
    }

    pub fn can_afford(&self, amount: Amount) -> bool {
        self.budget >= amount
    }

    /// Caller must have checked [`Attendee::can_afford`].
    pub(crate) fn spend(&mut self, amount: Amount) {
        self.budget -= amount;
    }
}

/// An auctioned object and the bids placed on it.
///
/// Bids are kept in first-insertion order per attendee; a later bid by the
/// same attendee replaces the amount but keeps the original position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    name: String,
    bids: IndexMap<AttendeeId, Amount>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bids: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_bid(&mut self, attendee: AttendeeId, amount: Amount) {
        self.bids.insert(attendee, amount);
    }

    pub fn bids(&self) -> impl Iterator<Item = (AttendeeId, Amount)> + '_ {
        self.bids.iter().map(|(attendee, amount)| (*attendee, *amount))
    }

    pub fn bid_of(&self, attendee: AttendeeId) -> Option<Amount> {
        self.bids.get(&attendee).copied()
    }

    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    pub fn has_bids(&self) -> bool {
        !self.bids.is_empty()
    }

    pub fn current_high_bid(&self) -> Option<Amount> {
        self.bids.values().copied().max()
    }
}

/// Final result for one item after closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Sold { winner: AttendeeId, price: Amount },
    NotSold,
}

impl Outcome {
    pub fn winner(&self) -> Option<AttendeeId> {
        match self {
            Outcome::Sold { winner, .. } => Some(*winner),
            Outcome::NotSold => None,
        }
    }

    pub fn is_sold(&self) -> bool {
        matches!(self, Outcome::Sold { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Sold { price, .. } => write!(f, "Sold for ${}", price),
            Outcome::NotSold => f.write_str("Not Sold"),
        }
    }
}

/// Outcome of every item in an auction, in item order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Allocation {
    outcomes: IndexMap<ItemId, Outcome>,
}

impl Allocation {
    pub(crate) fn new(outcomes: IndexMap<ItemId, Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn get(&self, item: ItemId) -> Option<Outcome> {
        self.outcomes.get(&item).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, Outcome)> + '_ {
        self.outcomes.iter().map(|(id, outcome)| (*id, *outcome))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn sold_count(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_sold()).count()
    }

    /// Money actually raised, as opposed to [`crate::Auction::potential_revenue`].
    /// Saturates at [`Amount::MAX`].
    pub fn revenue(&self) -> Amount {
        self.outcomes
            .values()
            .map(|outcome| match outcome {
                Outcome::Sold { price, .. } => *price,
                Outcome::NotSold => 0,
            })
            .fold(0, Amount::saturating_add)
    }

    pub fn items_won_by(&self, attendee: AttendeeId) -> Vec<ItemId> {
        self.iter()
            .filter(|(_, outcome)| outcome.winner() == Some(attendee))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Per-bidder aggregate built by [`crate::Auction::bidder_info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidderInfo {
    pub budget: Amount,
    pub items: Vec<ItemId>,
}

/// Bidder aggregates keyed by attendee, iterated in first-bid order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BidderInfoMap {
    entries: IndexMap<AttendeeId, BidderInfo>,
}

impl BidderInfoMap {
    pub(crate) fn entry_or_insert_with(
        &mut self,
        attendee: AttendeeId,
        init: impl FnOnce() -> BidderInfo,
    ) -> &mut BidderInfo {
        self.entries.entry(attendee).or_insert_with(init)
    }

    pub fn get(&self, attendee: AttendeeId) -> Option<&BidderInfo> {
        self.entries.get(&attendee)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttendeeId, &BidderInfo)> + '_ {
        self.entries.iter().map(|(id, info)| (*id, info))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
