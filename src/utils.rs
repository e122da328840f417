use chrono::{DateTime, Local, TimeZone};

/// `DD_MM_YYYY_HH_MM_SS.wav` in the given timezone, one-second resolution.
pub fn upload_filename<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d_%m_%Y_%H_%M_%S.wav").to_string()
}

/// Filename for an upload received now, in local time.
pub fn upload_filename_now() -> String {
    upload_filename(&Local::now())
}
