//! psplit-summary
//!
//! Presentation derivatives of an engine result: the grouped clipboard payout
//! text, a plain-text table, and the date/amount formatting they share.
//! Nothing here recomputes the split; every number comes from `compute`.

mod clipboard;
mod format;
mod table;
mod types;

pub use clipboard::{choose_price, clipboard_text, cluster_payouts};
pub use format::{format_amount, format_clipboard_date, format_date, header_title};
pub use table::render_table;
pub use types::{PayoutCluster, PriceSplit, SummaryOptions};
