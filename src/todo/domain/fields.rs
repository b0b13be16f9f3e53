//! Validated scalar values carried by todos and todo requests.

use super::TodoValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters in a todo name.
pub const NAME_MAX_CHARS: usize = 255;

/// Maximum number of characters in a todo description.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Maximum number of characters in a reflection memo.
pub const REFLECTION_MEMO_MAX_CHARS: usize = 2000;

/// Number of seconds in one minute of estimated time.
pub const SECONDS_PER_MINUTE: i64 = 60;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Non-empty todo name of at most [`NAME_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoName(String);

impl TodoName {
    /// Creates a validated name. Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::EmptyName`] for blank input and
    /// [`TodoValidationError::NameTooLong`] when the trimmed value exceeds
    /// [`NAME_MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TodoValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length > NAME_MAX_CHARS {
            return Err(TodoValidationError::NameTooLong {
                length,
                limit: NAME_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoName {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoName> for String {
    fn from(name: TodoName) -> Self {
        name.0
    }
}

impl fmt::Display for TodoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text todo description of at most [`DESCRIPTION_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoDescription(String);

impl TodoDescription {
    /// Creates a validated description. The text is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::DescriptionTooLong`] when the value
    /// exceeds [`DESCRIPTION_MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TodoValidationError> {
        let text = value.into();
        let length = text.chars().count();
        if length > DESCRIPTION_MAX_CHARS {
            return Err(TodoValidationError::DescriptionTooLong {
                length,
                limit: DESCRIPTION_MAX_CHARS,
            });
        }
        Ok(Self(text))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoDescription {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoDescription> for String {
    fn from(description: TodoDescription) -> Self {
        description.0
    }
}

/// Planned duration of a todo in whole seconds, at least one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct EstimatedTime(u64);

impl EstimatedTime {
    /// Creates a validated estimate from seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidEstimatedTime`] when the value is
    /// below one second.
    pub fn from_secs(seconds: i64) -> Result<Self, TodoValidationError> {
        match u64::try_from(seconds) {
            Ok(value) if value >= 1 => Ok(Self(value)),
            _ => Err(TodoValidationError::InvalidEstimatedTime(seconds)),
        }
    }

    /// Creates a validated estimate from minutes as entered in a form.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidEstimatedTime`] when the value is
    /// below one minute or overflows.
    pub fn from_minutes(minutes: i64) -> Result<Self, TodoValidationError> {
        let seconds = minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .ok_or(TodoValidationError::InvalidEstimatedTime(minutes))?;
        Self::from_secs(seconds)
    }

    /// Returns the estimate in seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for EstimatedTime {
    type Error = TodoValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_secs(value)
    }
}

impl From<EstimatedTime> for u64 {
    fn from(estimate: EstimatedTime) -> Self {
        estimate.0
    }
}

/// Calendar due date serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parses a strict `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidDueDate`] when the value is not
    /// zero-padded `YYYY-MM-DD` or names a day that does not exist.
    pub fn parse(value: &str) -> Result<Self, TodoValidationError> {
        let trimmed = value.trim();
        let well_formed = trimmed.len() == 10
            && trimmed.char_indices().all(|(index, ch)| match index {
                4 | 7 => ch == '-',
                _ => ch.is_ascii_digit(),
            });
        if !well_formed {
            return Err(TodoValidationError::InvalidDueDate(value.to_owned()));
        }
        NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
            .map(Self)
            .map_err(|_| TodoValidationError::InvalidDueDate(value.to_owned()))
    }

    /// Wraps an already valid calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<String> for DueDate {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DueDate> for String {
    fn from(due_date: DueDate) -> Self {
        due_date.to_string()
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DUE_DATE_FORMAT))
    }
}

/// Reflection note written when a todo is completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReflectionMemo(String);

impl ReflectionMemo {
    /// Creates a validated memo. Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::EmptyReflectionMemo`] for blank input
    /// and [`TodoValidationError::ReflectionMemoTooLong`] when the trimmed
    /// value exceeds [`REFLECTION_MEMO_MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TodoValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptyReflectionMemo);
        }
        let length = trimmed.chars().count();
        if length > REFLECTION_MEMO_MAX_CHARS {
            return Err(TodoValidationError::ReflectionMemoTooLong {
                length,
                limit: REFLECTION_MEMO_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the memo as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReflectionMemo {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReflectionMemo> for String {
    fn from(memo: ReflectionMemo) -> Self {
        memo.0
    }
}
