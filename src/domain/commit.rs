use chrono::{DateTime, FixedOffset};
use std::fmt;

/// Date layout appended after the abbreviated hash, e.g. `Mon Jan 02 15:04:05 2006 -0700`
pub const DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Abbreviated hash and committer date of the newest commit.
///
/// Its `Display` form is the suffix appended to non-precise versions:
/// a leading space, `+`, the hash, a space, then the date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub short_hash: String,
    pub date: DateTime<FixedOffset>,
}

impl CommitIdentity {
    /// Create a commit identity from an abbreviated hash and a date
    pub fn new(short_hash: impl Into<String>, date: DateTime<FixedOffset>) -> Self {
        CommitIdentity {
            short_hash: short_hash.into(),
            date,
        }
    }

    /// Build from git's representation of time: seconds since the epoch plus
    /// the committer's offset from UTC in minutes.
    ///
    /// Returns `None` when either value is out of range.
    pub fn from_epoch(short_hash: impl Into<String>, seconds: i64, offset_minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_minutes.checked_mul(60)?)?;
        let date = DateTime::from_timestamp(seconds, 0)?.with_timezone(&offset);
        Some(CommitIdentity::new(short_hash, date))
    }
}

impl fmt::Display for CommitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " +{} {}", self.short_hash, self.date.format(DATE_FORMAT))
    }
}
