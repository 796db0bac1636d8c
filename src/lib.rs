pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};
pub use config::ScenarioConfig;

pub use app::report::{run_auction, AuctionReport};
pub use core::{
    auction::Auction,
    clock::{FixedClock, SystemClock},
};
pub use domain::model::{
    Allocation, Amount, Attendee, AttendeeId, BidderInfo, BidderInfoMap, Item, ItemId, Outcome,
};
pub use domain::ports::Clock;
pub use utils::error::{AuctionError, Result};
