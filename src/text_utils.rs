use std::io;
use std::io::ErrorKind;

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

/// Format of the `date` field in the post index, e.g. `22-05-2020, 10:54`
pub const DATE_FORMAT: &str = "%d-%m-%Y, %H:%M";

pub const DESCRIPTION_LENGTH: usize = 100;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
    static ref NON_DESCRIPTION_CHARS: Regex = Regex::new(r"[^A-Za-z0-9 .]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub fn parse_date_time(buf: &str) -> io::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(buf, DATE_FORMAT)
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Unable to parse date time {}: {}", buf, e)))
}

pub fn format_date_time(date_time: &NaiveDateTime) -> String {
    date_time.format(DATE_FORMAT).to_string()
}

/// `My First Post!` becomes `my_first_post`
pub fn slugify(title: &str) -> String {
    let lower = title.to_ascii_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lower, "");
    WHITESPACE.replace_all(stripped.trim(), "_").to_string()
}

/// Flattens a markdown body into a single plain line of at most
/// `DESCRIPTION_LENGTH` characters, followed by `...` when cut.
pub fn summarize(body: &str) -> String {
    let flat = WHITESPACE.replace_all(body, " ");
    let plain = NON_DESCRIPTION_CHARS.replace_all(&flat, "");
    let plain = plain.trim();

    match plain.char_indices().nth(DESCRIPTION_LENGTH) {
        Some((cut, _)) => format!("{}...", &plain[..cut]),
        None => plain.to_string(),
    }
}
