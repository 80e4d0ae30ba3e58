use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// A phone number stored as bare digits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// The stored digits, exactly as persisted
    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the number has the ten digits the display format expects
    pub fn is_complete(&self) -> bool {
        self.0.len() == 10
    }
}

impl FromStr for Phone {
    type Err = ();

    /// Keeps only the digits, e.g. "(819) 392-1234" becomes "8193921234"
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self(raw.chars().filter(char::is_ascii_digit).collect()))
    }
}

impl From<String> for Phone {
    fn from(raw: String) -> Self {
        Self::from_str(&raw).unwrap_or_default()
    }
}

impl Display for Phone {
    /// Ten-digit numbers render as NNN-NNN-NNNN, anything else as stored
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_complete() {
            write!(f, "{}-{}-{}", &self.0[..3], &self.0[3..6], &self.0[6..])
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::phone::Phone;
    use std::str::FromStr;

    #[test]
    fn test_strips_formatting_to_digits() {
        let phone = Phone::from_str("(819) 392-1234").unwrap();
        assert_eq!(phone.digits(), "8193921234");
        assert!(phone.is_complete());
    }

    #[test]
    fn test_ten_digits_display_with_dashes() {
        let phone = Phone::from_str("8193921234").unwrap();
        assert_eq!(phone.to_string(), "819-392-1234");
    }

    #[test]
    fn test_short_numbers_display_unchanged() {
        let phone = Phone::from_str("555-0100").unwrap();
        assert_eq!(phone.to_string(), "5550100");
        assert!(!phone.is_complete());
    }

    #[test]
    fn test_empty_input() {
        let phone = Phone::from_str("").unwrap();
        assert!(phone.is_empty());
        assert_eq!(phone.to_string(), "");
    }
}
