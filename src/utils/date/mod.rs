// Date utility functions

use chrono::{DateTime, Local, NaiveTime};

/// Same calendar day as `date`, at `hour:minute:00` local time.
/// Returns `None` when the wall-clock time does not exist (DST gap).
pub fn with_time_of_day(date: DateTime<Local>, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    date.date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
}

/// 24-hour clock with seconds, e.g. `07:05:00`
pub fn format_time_of_day(date: &DateTime<Local>) -> String {
    date.format("%H:%M:%S").to_string()
}
