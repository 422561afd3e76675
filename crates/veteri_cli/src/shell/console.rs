//! Line-oriented prompts over any `BufRead`/`Write` pair.
//!
//! # Invariants
//! - Every typed prompt re-asks until the input parses.
//! - End of input surfaces as `io::ErrorKind::UnexpectedEof`.
//! - Prompts with a current value keep it on an empty line.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Typed at an optional-field prompt to drop the stored value.
pub const CLEAR_INPUT: &str = "-";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Reads one trimmed line after printing `label`.
    pub fn line(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            writeln!(self.output)?;
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(buffer.trim().to_string())
    }

    /// Free text; may be empty.
    pub fn text(&mut self, label: &str) -> io::Result<String> {
        self.line(&format!("{label}: "))
    }

    pub fn required_text(&mut self, label: &str) -> io::Result<String> {
        self.ask(label, "a non-empty value", None, |value| {
            Some(value.to_string())
        })
    }

    /// Free text; an empty line keeps `current`.
    pub fn text_or(&mut self, label: &str, current: &str) -> io::Result<String> {
        let value = self.line(&format!("{label} [{current}]: "))?;
        if value.is_empty() {
            return Ok(current.to_string());
        }
        Ok(value)
    }

    /// Email address or empty.
    pub fn email(&mut self, label: &str, current: Option<&str>) -> io::Result<String> {
        let keep = Some(current.unwrap_or_default().to_string());
        self.ask_with_current(label, current, "an email address", keep, |value| {
            veteri_core::model::is_valid_email(value).then(|| value.to_string())
        })
    }

    /// Any `FromStr` value, re-prompted until it parses.
    pub fn parsed<T: FromStr>(&mut self, label: &str, hint: &str) -> io::Result<T> {
        self.ask(label, hint, None, |value| value.parse().ok())
    }

    /// Like [`Console::parsed`], but an empty line keeps `current`.
    pub fn parsed_or<T>(&mut self, label: &str, hint: &str, current: T) -> io::Result<T>
    where
        T: FromStr + Display + Clone,
    {
        let shown = current.to_string();
        self.ask_with_current(label, Some(&shown), hint, Some(current), |value| {
            value.parse().ok()
        })
    }

    pub fn weight(&mut self, label: &str, current: Option<f64>) -> io::Result<f64> {
        let shown = current.map(|value| value.to_string());
        self.ask_with_current(
            label,
            shown.as_deref(),
            "a non-negative number",
            current,
            |value| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|weight| weight.is_finite() && *weight >= 0.0)
            },
        )
    }

    pub fn date(&mut self, label: &str, current: Option<NaiveDate>) -> io::Result<NaiveDate> {
        let shown = current.map(|value| value.to_string());
        self.ask_with_current(label, shown.as_deref(), "a date as YYYY-MM-DD", current, parse_date)
    }

    /// Optional date; an empty line yields `empty`.
    pub fn optional_date(
        &mut self,
        label: &str,
        empty: Option<NaiveDate>,
    ) -> io::Result<Option<NaiveDate>> {
        let shown = empty.map(|value| value.to_string());
        let shown = shown.as_deref().unwrap_or("none");
        self.ask_with_current(
            label,
            Some(shown),
            "a date as YYYY-MM-DD",
            Some(empty),
            |value| parse_date(value).map(Some),
        )
    }

    /// Optional date with a stored value: empty keeps `current`,
    /// [`CLEAR_INPUT`] clears it.
    pub fn clearable_date(
        &mut self,
        label: &str,
        current: Option<NaiveDate>,
    ) -> io::Result<Option<NaiveDate>> {
        let shown = current.map_or_else(|| "none".to_string(), |value| value.to_string());
        self.ask_with_current(
            &format!("{label}, {CLEAR_INPUT} for none"),
            Some(&shown),
            "a date as YYYY-MM-DD",
            Some(current),
            |value| match value {
                CLEAR_INPUT => Some(None),
                other => parse_date(other).map(Some),
            },
        )
    }

    pub fn date_time(
        &mut self,
        label: &str,
        current: Option<NaiveDateTime>,
    ) -> io::Result<NaiveDateTime> {
        let shown = current.map(|value| value.format(DATE_TIME_FORMAT).to_string());
        self.ask_with_current(
            label,
            shown.as_deref(),
            "a date-time as YYYY-MM-DD HH:MM",
            current,
            parse_date_time,
        )
    }

    fn ask_with_current<T>(
        &mut self,
        label: &str,
        current: Option<&str>,
        hint: &str,
        on_empty: Option<T>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        let label = match current {
            Some(current) => format!("{label} [{current}]"),
            None => label.to_string(),
        };
        self.ask(&label, hint, on_empty, parse)
    }

    fn ask<T>(
        &mut self,
        label: &str,
        hint: &str,
        mut on_empty: Option<T>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        loop {
            let value = self.line(&format!("{label}: "))?;
            if value.is_empty() {
                if let Some(default) = on_empty.take() {
                    return Ok(default);
                }
            } else if let Some(parsed) = parse(&value) {
                return Ok(parsed);
            }
            self.say(format_args!("Invalid value, expected {hint}."))?;
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Accepts `YYYY-MM-DD HH:MM`, with or without seconds.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

pub fn is_end_of_input(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::UnexpectedEof
}
