//! Time helpers

use chrono::Utc;

/// Current time as epoch milliseconds (the timestamp format stored on orders)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
