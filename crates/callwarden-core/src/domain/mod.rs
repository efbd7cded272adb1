pub mod call;
pub mod number;
pub mod verdict;

pub use call::ScreenedCall;
pub use number::NormalizedNumber;
pub use verdict::{BlockReason, Verdict};
