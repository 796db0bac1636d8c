//! Auction closing
//!
//! Every bid in the auction competes in one global ranking, highest amount
//! first. Walking the ranking, an item goes to the first bidder who can still
//! pay for it, and the price comes off that bidder's budget before their
//! lower-ranked bids are looked at. Equal amounts keep encounter order (items
//! in auction order, then bid order within an item), which `sort_by`
//! guarantees by being stable.
use crate::core::auction::Auction;
use crate::domain::model::{Allocation, Amount, AttendeeId, ItemId, Outcome};
use crate::utils::error::Result;
use indexmap::IndexMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
struct RankedBid {
    attendee: AttendeeId,
    item: ItemId,
    amount: Amount,
}

impl Auction {
    /// Awards every item and deducts winning bids from budgets.
    ///
    /// A closed auction stays closed: a second call fails with
    /// [`crate::AuctionError::AlreadyClosed`] and touches nothing.
    pub fn close_auction(&mut self) -> Result<Allocation> {
        self.ensure_open()?;

        let mut ranking = self.ranked_bids();
        ranking.sort_by(|a, b| b.amount.cmp(&a.amount));

        let mut outcomes: IndexMap<ItemId, Outcome> =
            self.item_ids().map(|id| (id, Outcome::NotSold)).collect();

        for bid in ranking {
            let Some(slot) = outcomes.get_mut(&bid.item) else {
                continue;
            };
            if slot.is_sold() {
                continue;
            }
            let Some(attendee) = self.attendees.get_mut(bid.attendee.index()) else {
                continue;
            };
            if !attendee.can_afford(bid.amount) {
                debug!(
                    attendee = attendee.name(),
                    budget = attendee.budget(),
                    amount = bid.amount,
                    "bid skipped, budget exhausted"
                );
                continue;
            }

            attendee.spend(bid.amount);
            *slot = Outcome::Sold {
                winner: bid.attendee,
                price: bid.amount,
            };
            debug!(
                item = self.items[bid.item.index()].name(),
                winner = attendee.name(),
                price = bid.amount,
                remaining = attendee.budget(),
                "item awarded"
            );
        }

        self.closed = true;
        let allocation = Allocation::new(outcomes);
        info!(
            items = allocation.len(),
            sold = allocation.sold_count(),
            revenue = allocation.revenue(),
            "auction closed"
        );
        Ok(allocation)
    }

    fn ranked_bids(&self) -> Vec<RankedBid> {
        self.item_ids()
            .zip(&self.items)
            .flat_map(|(item, entry)| {
                entry.bids().map(move |(attendee, amount)| RankedBid {
                    attendee,
                    item,
                    amount,
                })
            })
            .collect()
    }
}
