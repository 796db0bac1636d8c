pub mod auction;
pub mod clock;
pub mod closing;

pub use crate::domain::model::{
    Allocation, Amount, Attendee, AttendeeId, BidderInfo, BidderInfoMap, Item, ItemId, Outcome,
};
pub use crate::domain::ports::Clock;
pub use crate::utils::error::Result;
