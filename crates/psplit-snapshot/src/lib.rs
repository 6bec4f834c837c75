//! psplit-snapshot
//!
//! Persistence boundary for split snapshots:
//! - `normalize_state` rebuilds engine input from any stored JSON, tolerating
//!   missing fields, numeric strings and legacy index-based member references
//! - `RecordBook` keeps several named snapshots (one per session) in one file
//!
//! The engine only ever sees id-based references; migration happens here.

mod normalize;
mod records;

pub use normalize::{
    blank_state, coerce_bool, coerce_number, gen_id, normalize_state, today_ymd,
};
pub use records::{load_record_book, save_record_book, Record, RecordBook};
