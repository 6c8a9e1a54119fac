pub mod aggregator;
pub mod poller;
