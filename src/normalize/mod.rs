mod pass;
mod record;

pub use pass::{NormalizeReport, normalize, normalize_with, resolve_rows, validate_payload};
pub use record::{DayRecord, Metrics, positional_key};
