// Adapters layer: turning raw input (currency strings, CSV rosters) into domain values.

pub mod budget;
pub mod roster;
