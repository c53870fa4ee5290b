pub mod error;
pub mod models;
pub mod session;
pub mod trigger;

pub use error::Error;
pub use models::trigger::{Trigger, TriggerStatus};
pub use models::version::ApiVersion;
pub use session::ZabbixApi;
