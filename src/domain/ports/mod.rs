pub mod notifier;
pub mod prober;

pub use notifier::{NotificationError, Notifier};
pub use prober::{DirectoryProber, ProbeError};
