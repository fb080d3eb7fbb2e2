//! The singleton settings record and its enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User preferences; always present, defaulted when nothing is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "Settings::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default = "Settings::enabled")]
    pub budget_alerts: bool,
    #[serde(default = "Settings::enabled")]
    pub bill_reminders: bool,
    #[serde(default = "Settings::enabled")]
    pub goal_progress: bool,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub notification_email: String,
    #[serde(default)]
    pub notification_frequency: NotificationFrequency,
    #[serde(default)]
    pub two_factor: bool,
}

impl Settings {
    fn default_currency() -> String {
        "USD".into()
    }

    fn enabled() -> bool {
        true
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            currency: Self::default_currency(),
            date_format: DateFormat::default(),
            budget_alerts: true,
            bill_reminders: true,
            goal_progress: true,
            email_notifications: false,
            notification_email: String::new(),
            notification_frequency: NotificationFrequency::default(),
            two_factor: false,
        }
    }
}

/// Shallow changeset for [`Settings`]; `None` fields keep stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub date_format: Option<DateFormat>,
    #[serde(default)]
    pub budget_alerts: Option<bool>,
    #[serde(default)]
    pub bill_reminders: Option<bool>,
    #[serde(default)]
    pub goal_progress: Option<bool>,
    #[serde(default)]
    pub email_notifications: Option<bool>,
    #[serde(default)]
    pub notification_email: Option<String>,
    #[serde(default)]
    pub notification_frequency: Option<NotificationFrequency>,
    #[serde(default)]
    pub two_factor: Option<bool>,
}

impl SettingsPatch {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(currency) = self.currency {
            settings.currency = currency;
        }
        if let Some(date_format) = self.date_format {
            settings.date_format = date_format;
        }
        if let Some(value) = self.budget_alerts {
            settings.budget_alerts = value;
        }
        if let Some(value) = self.bill_reminders {
            settings.bill_reminders = value;
        }
        if let Some(value) = self.goal_progress {
            settings.goal_progress = value;
        }
        if let Some(value) = self.email_notifications {
            settings.email_notifications = value;
        }
        if let Some(email) = self.notification_email {
            settings.notification_email = email;
        }
        if let Some(frequency) = self.notification_frequency {
            settings.notification_frequency = frequency;
        }
        if let Some(value) = self.two_factor {
            settings.two_factor = value;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Theme::System),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(label)
    }
}

/// Display format for dates; stored values are always ISO regardless.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

impl DateFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "MM/DD/YYYY" => Some(DateFormat::MonthDayYear),
            "DD/MM/YYYY" => Some(DateFormat::DayMonthYear),
            "YYYY-MM-DD" => Some(DateFormat::Iso),
            _ => None,
        }
    }

    /// chrono format string for rendering dates in this format.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::Iso => "%Y-%m-%d",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
            DateFormat::Iso => "YYYY-MM-DD",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl NotificationFrequency {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(NotificationFrequency::Daily),
            "weekly" => Some(NotificationFrequency::Weekly),
            "monthly" => Some(NotificationFrequency::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationFrequency::Daily => "daily",
            NotificationFrequency::Weekly => "weekly",
            NotificationFrequency::Monthly => "monthly",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_dashboard() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::System);
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.date_format, DateFormat::MonthDayYear);
        assert!(settings.budget_alerts);
        assert!(settings.bill_reminders);
        assert!(!settings.email_notifications);
        assert_eq!(settings.notification_frequency, NotificationFrequency::Daily);
    }

    #[test]
    fn date_format_round_trips_its_selector_string() {
        let json = serde_json::to_string(&DateFormat::DayMonthYear).unwrap();
        assert_eq!(json, "\"DD/MM/YYYY\"");
        let parsed: DateFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DateFormat::DayMonthYear);
    }

    #[test]
    fn patch_merges_into_existing_settings() {
        let mut settings = Settings::default();
        SettingsPatch {
            currency: Some("EUR".into()),
            email_notifications: Some(true),
            notification_email: Some("me@example.com".into()),
            ..SettingsPatch::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.currency, "EUR");
        assert!(settings.email_notifications);
        assert_eq!(settings.notification_email, "me@example.com");
        assert_eq!(settings.theme, Theme::System);
    }
}
