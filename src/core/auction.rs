use crate::core::clock::SystemClock;
use crate::domain::model::{Amount, Attendee, AttendeeId, BidderInfo, BidderInfoMap, Item, ItemId};
use crate::domain::ports::Clock;
use crate::utils::error::{AuctionError, Result};
use indexmap::IndexSet;
use tracing::debug;

/// Format used by [`Auction::date`].
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A silent auction: an ordered set of items and the attendees bidding on them.
///
/// Attendees live in an arena owned by the auction and are referred to by
/// [`AttendeeId`] from every item's bids, so a budget deducted while closing
/// is seen by every later lookup of that attendee.
#[derive(Debug, Clone, Default)]
pub struct Auction {
    pub(crate) items: Vec<Item>,
    pub(crate) attendees: Vec<Attendee>,
    pub(crate) closed: bool,
}

impl Auction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_attendee(&mut self, attendee: Attendee) -> AttendeeId {
        let id = AttendeeId(self.attendees.len());
        debug!(
            attendee = attendee.name(),
            budget = attendee.budget(),
            "attendee registered"
        );
        self.attendees.push(attendee);
        id
    }

    /// Appends an item. Any bids it already carries must reference attendees
    /// registered with this auction.
    pub fn add_item(&mut self, item: Item) -> Result<ItemId> {
        self.ensure_open()?;
        if let Some((unknown, _)) = item.bids().find(|(id, _)| self.attendee(*id).is_none()) {
            return Err(AuctionError::UnknownAttendee { id: unknown.index() });
        }

        let id = ItemId(self.items.len());
        debug!(item = item.name(), bids = item.bid_count(), "item added");
        self.items.push(item);
        Ok(id)
    }

    pub fn place_bid(
        &mut self,
        item: ItemId,
        attendee: AttendeeId,
        amount: Amount,
    ) -> Result<()> {
        self.ensure_open()?;
        if self.attendee(attendee).is_none() {
            return Err(AuctionError::UnknownAttendee { id: attendee.index() });
        }
        let target = self
            .items
            .get_mut(item.index())
            .ok_or(AuctionError::UnknownItem { id: item.index() })?;

        debug!(
            item = target.name(),
            attendee = attendee.index(),
            amount,
            "bid placed"
        );
        target.add_bid(attendee, amount);
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> {
        (0..self.items.len()).map(ItemId)
    }

    pub fn find_item(&self, name: &str) -> Option<ItemId> {
        self.items.iter().position(|item| item.name() == name).map(ItemId)
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn attendee(&self, id: AttendeeId) -> Option<&Attendee> {
        self.attendees.get(id.index())
    }

    pub fn attendee_mut(&mut self, id: AttendeeId) -> Option<&mut Attendee> {
        self.attendees.get_mut(id.index())
    }

    pub fn find_attendee(&self, name: &str) -> Option<AttendeeId> {
        self.attendees
            .iter()
            .position(|attendee| attendee.name() == name)
            .map(AttendeeId)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(Item::name).collect()
    }

    /// Items nobody has bid on, in auction order.
    pub fn unpopular_items(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| !item.has_bids()).collect()
    }

    pub fn unpopular_item_ids(&self) -> Vec<ItemId> {
        self.item_ids()
            .filter(|id| !self.items[id.index()].has_bids())
            .collect()
    }

    /// Sum of every item's current high bid; items without bids count as 0.
    /// Saturates at [`Amount::MAX`].
    pub fn potential_revenue(&self) -> Amount {
        self.items
            .iter()
            .map(|item| item.current_high_bid().unwrap_or(0))
            .fold(0, Amount::saturating_add)
    }

    /// Distinct bidder names in first-occurrence order.
    pub fn bidders(&self) -> Vec<&str> {
        self.items
            .iter()
            .flat_map(|item| item.bids())
            .filter_map(|(id, _)| self.attendee(id))
            .map(Attendee::name)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Budget and bid-on items per bidder. Budgets are read at call time.
    pub fn bidder_info(&self) -> BidderInfoMap {
        let mut info = BidderInfoMap::default();
        for (item_id, item) in self.item_ids().zip(&self.items) {
            for (attendee_id, _) in item.bids() {
                let Some(attendee) = self.attendee(attendee_id) else {
                    continue;
                };
                info.entry_or_insert_with(attendee_id, || BidderInfo {
                    budget: attendee.budget(),
                    items: Vec::new(),
                })
                .items
                .push(item_id);
            }
        }
        info
    }

    /// Today's date as `dd/mm/yyyy`.
    pub fn date(&self) -> String {
        self.date_with(&SystemClock::new())
    }

    pub fn date_with(&self, clock: &dyn Clock) -> String {
        clock.today().format(DATE_FORMAT).to_string()
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(AuctionError::AlreadyClosed);
        }
        Ok(())
    }
}
