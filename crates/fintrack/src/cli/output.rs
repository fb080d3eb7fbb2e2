//! Console rendering helpers shared by every command handler.

use chrono::NaiveDate;
use colored::Colorize;

use fintrack_domain::Settings;

pub fn print_header(text: &str) {
    println!("{}", text.bold().underline());
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}

pub fn print_info(text: &str) {
    println!("{text}");
}

pub fn print_detail(text: &str) {
    println!("  {}", text.dimmed());
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.red());
}

pub fn print_two_column(rows: &[(&str, String)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("  {label:<width$}  {value}");
    }
}

/// Amount rendered against the configured currency code.
pub fn format_currency(settings: &Settings, amount: f64) -> String {
    format!("{amount:.2} {}", settings.currency)
}

/// Date rendered in the configured display format.
pub fn format_date(settings: &Settings, date: NaiveDate) -> String {
    date.format(settings.date_format.pattern()).to_string()
}

#[cfg(test)]
mod tests {
    use fintrack_domain::DateFormat;

    use super::*;

    #[test]
    fn currency_respects_the_configured_code() {
        let mut settings = Settings::default();
        settings.currency = "EUR".into();
        assert_eq!(format_currency(&settings, 1234.5), "1234.50 EUR");
    }

    #[test]
    fn date_follows_the_configured_format() {
        let mut settings = Settings::default();
        let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        assert_eq!(format_date(&settings, date), "09/03/2025");
        settings.date_format = DateFormat::Iso;
        assert_eq!(format_date(&settings, date), "2025-09-03");
    }
}
