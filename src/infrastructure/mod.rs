pub mod notifications;
pub mod probes;
