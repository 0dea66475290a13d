//! Request execution
//!
//! One logical request on top of the transport seam: bounded retry with
//! two separate budgets (immediate re-attempts for 5xx responses,
//! backed-off re-attempts for transport failures) and envelope decoding
//! of whatever finally comes back.

mod executor;

pub use executor::{Executor, RetryConfig};
