use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    Day,
    Week,
    Month,
    #[default]
    Year,
}

impl RecurringInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringInterval::Day => "day",
            RecurringInterval::Week => "week",
            RecurringInterval::Month => "month",
            RecurringInterval::Year => "year",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "day" => Some(RecurringInterval::Day),
            "week" => Some(RecurringInterval::Week),
            "month" => Some(RecurringInterval::Month),
            "year" => Some(RecurringInterval::Year),
            _ => None,
        }
    }
}

impl Display for RecurringInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_round_trips() {
        for interval in [
            RecurringInterval::Day,
            RecurringInterval::Week,
            RecurringInterval::Month,
            RecurringInterval::Year,
        ] {
            assert_eq!(RecurringInterval::from_str(interval.as_str()), Some(interval));
        }
        assert_eq!(RecurringInterval::from_str("decade"), None);
    }

    #[test]
    fn defaults_to_year() {
        assert_eq!(RecurringInterval::default(), RecurringInterval::Year);
    }
}
