pub mod alert;
pub mod probe;
pub mod target;

pub use alert::{AlertRecord, AlertReport};
pub use probe::ProbeResult;
pub use target::Target;
