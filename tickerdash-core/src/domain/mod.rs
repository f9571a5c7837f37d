//! Domain types for the dashboard core.

pub mod bar;
pub mod currency;
pub mod period;
pub mod series;
pub mod ticker;

pub use bar::Bar;
pub use currency::{Currency, SUFFIX_CURRENCIES};
pub use period::{Interval, Period, PeriodParseError};
pub use series::QuoteSeries;
pub use ticker::Ticker;
