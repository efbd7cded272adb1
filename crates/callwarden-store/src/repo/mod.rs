pub mod call_log;
pub mod contacts;
pub mod counters;
pub mod settings;

pub use call_log::{CallLogRepo, ScreenedCallNew};
pub use contacts::{Contact, ContactNew, ContactsRepo};
pub use counters::{CountersRepo, BLOCKED_CALLS};
pub use settings::{SettingsRepo, PROTECTION_ENABLED};
