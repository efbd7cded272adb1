use chrono::{DateTime, Local, Utc};

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

/// Local-time rendering of an epoch-seconds timestamp for human output.
pub fn format_timestamp(at: i64) -> String {
    match DateTime::<Utc>::from_timestamp(at, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => format!("@{at}"),
    }
}
