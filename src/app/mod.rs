// Application layer: turning an auction into something a person reads.

pub mod report;
