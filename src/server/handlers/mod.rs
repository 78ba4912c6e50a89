//! Relay HTTP handlers.

mod analyze;
mod catch_all;

pub use analyze::{analyze_handler, first_query_value, EMPTY_STATE_PAGE};
pub use catch_all::catch_all_handler;
