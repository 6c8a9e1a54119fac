pub mod email;
pub mod null;

pub use email::SmtpNotifier;
pub use null::NullNotifier;
