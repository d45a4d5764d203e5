pub mod error;
pub mod units;

pub use error::{QueueError, Result};
pub use units::{GB, MB};
