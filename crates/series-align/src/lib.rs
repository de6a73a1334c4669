pub mod align;
pub mod export;
pub mod normalize;
pub mod stats;
pub mod table;

pub use align::align;
pub use export::to_csv;
pub use normalize::canonical_date;
pub use stats::{numeric_series, summarize, TRADING_DAYS_PER_YEAR};
pub use table::{project, DEFAULT_ROW_LIMIT};
