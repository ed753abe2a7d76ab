//! Week period service
//!
//! Resolves the week under review from the clock or from a user expression,
//! in the UTC offset configured in [`Settings`].

use crate::config::settings::Settings;
use crate::error::{BorderoError, BorderoResult};
use crate::models::WeekPeriod;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc, Weekday};

/// Service for week navigation
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// The current instant in the configured offset
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.settings.offset())
    }

    /// The week containing today
    pub fn current_week(&self) -> WeekPeriod {
        WeekPeriod::containing(self.now())
    }

    /// The week containing a calendar date
    pub fn week_for_date(&self, date: NaiveDate) -> WeekPeriod {
        WeekPeriod::starting_on(date, self.settings.offset())
    }

    /// Parse a week expression, or fall back to the current week
    pub fn parse_or_current(&self, expr: Option<&str>) -> BorderoResult<WeekPeriod> {
        match expr {
            Some(s) => self.parse(s),
            None => Ok(self.current_week()),
        }
    }

    /// Parse a week expression
    ///
    /// Formats supported:
    /// - Relative: "current", "this", "now", "last", "prev", "previous", "next"
    /// - Offsets in weeks: "+2", "-1"
    /// - ISO week: "2025-W03"
    /// - Any date inside the week: "2025-01-15"
    pub fn parse(&self, s: &str) -> BorderoResult<WeekPeriod> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "current" | "this" | "now" => return Ok(self.current_week()),
            "last" | "prev" | "previous" => {
                return self.current_week().prev().ok_or_else(|| invalid(trimmed))
            }
            "next" => return self.current_week().next().ok_or_else(|| invalid(trimmed)),
            _ => {}
        }

        if lower.starts_with('+') || lower.starts_with('-') {
            if let Ok(delta) = lower.parse::<i64>() {
                return self
                    .current_week()
                    .advance(delta)
                    .ok_or_else(|| invalid(trimmed));
            }
        }

        if let Some((year, week)) = lower.split_once("-w") {
            let year: i32 = year.parse().map_err(|_| invalid(trimmed))?;
            let week: u32 = week.parse().map_err(|_| invalid(trimmed))?;
            let monday =
                NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(|| invalid(trimmed))?;
            return Ok(self.week_for_date(monday));
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|date| self.week_for_date(date))
            .map_err(|_| invalid(trimmed))
    }

    /// The last `count` weeks, oldest first, ending with the current one
    pub fn recent_weeks(&self, count: usize) -> Vec<WeekPeriod> {
        let current = self.current_week();
        (0..count as i64)
            .rev()
            .filter_map(|back| current.advance(-back))
            .collect()
    }

    /// The current week followed by the next `count - 1`
    pub fn upcoming_weeks(&self, count: usize) -> Vec<WeekPeriod> {
        let current = self.current_week();
        (0..count as i64)
            .filter_map(|ahead| current.advance(ahead))
            .collect()
    }

    /// Check if a period is the current week
    pub fn is_current(&self, period: &WeekPeriod) -> bool {
        period.contains(&self.now())
    }

    /// Format a period in a human-friendly way
    pub fn format_period_friendly(&self, period: &WeekPeriod) -> String {
        format!("Semana {} ({})", period.label(), period)
    }
}

fn invalid(s: &str) -> BorderoError {
    BorderoError::Validation(format!(
        "Invalid week: {}. Use current/last/next, +N/-N, YYYY-Www or YYYY-MM-DD",
        s
    ))
}
