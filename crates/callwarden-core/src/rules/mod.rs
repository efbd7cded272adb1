pub mod compare;
pub mod dial_plan;
pub mod matching;

pub use compare::LenientComparer;
pub use dial_plan::{DialPlan, InsertedDigit};
pub use matching::numbers_match;
