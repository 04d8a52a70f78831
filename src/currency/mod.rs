//! EUR exchange-rate cache and display-currency conversion
//!
//! Stored amounts are always EUR. A time-bounded cache of EUR-based
//! multipliers is fetched from the rate provider; conversion and formatting
//! happen only at presentation time.

pub mod format;
pub mod rates;

pub use format::format_amount;
pub use rates::{convert, fallback_rates, Clock, RateService, RateTable, SystemClock};
