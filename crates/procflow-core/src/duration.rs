//! Compound hour/minute durations used by task time limits.
//!
//! Time limits are entered as compound strings following the grammar
//! `("<H>H")? ("<M>M")?`, e.g. `2H`, `45M` or `1H30M`. A missing unit means
//! "unspecified", which is not the same as zero: several branches of the
//! arithmetic below depend on which units the operands carry.
//!
//! The two derived quantities are:
//! - [`subtract`]: the time from now until the first warning, given the
//!   deadline and the lead time before it.
//! - [`divide`]: how many periodic warnings fit in the first-warning window.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Reasons a duration string or a duration computation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration has neither an hour nor a minute unit")]
    Empty,

    #[error("malformed duration `{0}`, expected `<H>H<M>M`")]
    Malformed(String),

    #[error("cannot subtract an hour amount from a duration without hours")]
    MixedUnits,

    #[error("result is not a positive duration")]
    NonPositive,

    #[error("divisor has neither an hour nor a minute unit")]
    UnspecifiedDivisor,

    #[error("divisor resolves to a zero duration")]
    ZeroDivisor,
}

/// An hour/minute duration where each unit may be unspecified.
///
/// At least one unit is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    hours: Option<u32>,
    minutes: Option<u32>,
}

impl Duration {
    /// Creates a duration from its units.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::Empty`] if both units are `None`.
    pub fn new(hours: Option<u32>, minutes: Option<u32>) -> Result<Self, DurationError> {
        if hours.is_none() && minutes.is_none() {
            return Err(DurationError::Empty);
        }
        Ok(Self { hours, minutes })
    }

    /// Parses a compound duration string such as `1H30M`.
    ///
    /// # Examples
    ///
    /// ```
    /// use procflow_core::duration::Duration;
    ///
    /// let duration = Duration::parse("1H30M").unwrap();
    /// assert_eq!(duration.hours(), Some(1));
    /// assert_eq!(duration.minutes(), Some(30));
    /// assert_eq!(duration.total_minutes(), 90);
    ///
    /// assert!(Duration::parse("").is_err());
    /// assert!(Duration::parse("30M1H").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, DurationError> {
        if input.is_empty() {
            return Err(DurationError::Empty);
        }

        let (hours, rest) = match input.split_once('H') {
            Some((digits, rest)) => (Some(parse_amount(digits, input)?), rest),
            None => (None, input),
        };

        let minutes = if rest.is_empty() {
            None
        } else {
            let digits = rest
                .strip_suffix('M')
                .ok_or_else(|| DurationError::Malformed(input.to_owned()))?;
            Some(parse_amount(digits, input)?)
        };

        Self::new(hours, minutes)
    }

    /// The hour unit, if specified.
    pub fn hours(&self) -> Option<u32> {
        self.hours
    }

    /// The minute unit, if specified.
    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    /// Both units normalised to minutes; unspecified units count as zero.
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.hours.unwrap_or(0)) * 60 + u64::from(self.minutes.unwrap_or(0))
    }

    /// Computes `self - reduction`, keeping the unit layout of `self`.
    ///
    /// Any outcome that leaves no positive time before the first action is
    /// rejected, as is subtracting hours from a duration that has none.
    ///
    /// # Examples
    ///
    /// ```
    /// use procflow_core::duration::Duration;
    ///
    /// let deadline = Duration::parse("2H").unwrap();
    /// let lead = Duration::parse("30M").unwrap();
    /// assert_eq!(deadline.checked_sub(&lead).unwrap().to_string(), "1H30M");
    /// ```
    pub fn checked_sub(&self, reduction: &Duration) -> Result<Duration, DurationError> {
        let Some(minuend_hours) = self.hours else {
            if reduction.hours.is_some() {
                return Err(DurationError::MixedUnits);
            }
            let minuend_minutes = self.minutes.ok_or(DurationError::Empty)?;
            let Some(reduction_minutes) = reduction.minutes else {
                return Ok(*self);
            };
            let remaining = minuend_minutes
                .checked_sub(reduction_minutes)
                .filter(|minutes| *minutes > 0)
                .ok_or(DurationError::NonPositive)?;
            return Self::new(None, Some(remaining));
        };

        let new_hour = i64::from(minuend_hours) - i64::from(reduction.hours.unwrap_or(0));

        let (hours, minutes) = match (self.minutes, reduction.minutes) {
            (Some(minuend_minutes), Some(reduction_minutes))
                if minuend_minutes >= reduction_minutes =>
            {
                (
                    new_hour,
                    Some(i64::from(minuend_minutes - reduction_minutes)),
                )
            }
            (minuend_minutes, Some(reduction_minutes)) => {
                let minuend_minutes = i64::from(minuend_minutes.unwrap_or(0));
                let reduction_minutes = i64::from(reduction_minutes);
                // Borrow as many whole hours as the minute deficit needs.
                let borrowed = (reduction_minutes - minuend_minutes + 59) / 60;
                let hours = new_hour - borrowed;
                if hours <= 0 {
                    return Err(DurationError::NonPositive);
                }
                (
                    hours,
                    Some(minuend_minutes + borrowed * 60 - reduction_minutes),
                )
            }
            (Some(minuend_minutes), None) => (new_hour, Some(i64::from(minuend_minutes))),
            (None, None) => (new_hour, None),
        };

        Self::from_remaining(hours, minutes)
    }

    /// Counts how many whole `self` periods fit into `dividend`.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::ZeroDivisor`] if `self` totals zero minutes.
    pub fn cycles_within(&self, dividend: &Duration) -> Result<u64, DurationError> {
        let divisor = self.total_minutes();
        if divisor == 0 {
            return Err(DurationError::ZeroDivisor);
        }
        Ok(dividend.total_minutes() / divisor)
    }

    fn from_remaining(hours: i64, minutes: Option<i64>) -> Result<Duration, DurationError> {
        let total = hours * 60 + minutes.unwrap_or(0);
        if hours < 0 || minutes.is_some_and(|m| m < 0) || total <= 0 {
            return Err(DurationError::NonPositive);
        }

        let hours = u32::try_from(hours).map_err(|_| DurationError::NonPositive)?;
        let minutes = minutes
            .map(u32::try_from)
            .transpose()
            .map_err(|_| DurationError::NonPositive)?;

        Self::new(Some(hours), minutes)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hours) = self.hours {
            write!(f, "{hours}H")?;
        }
        if let Some(minutes) = self.minutes {
            write!(f, "{minutes}M")?;
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Computes `minuend - reduction` on compound strings.
///
/// An empty `reduction` leaves the minuend unchanged (it must still be positive).
///
/// # Examples
///
/// ```
/// use procflow_core::duration::subtract;
///
/// assert_eq!(subtract("10M", "30M").unwrap(), "20M");
/// assert_eq!(subtract("30M", "2H").unwrap(), "1H30M");
/// assert!(subtract("40M", "30M").is_err());
/// ```
pub fn subtract(reduction: &str, minuend: &str) -> Result<String, DurationError> {
    let minuend = Duration::parse(minuend)?;
    if reduction.is_empty() {
        return Duration::from_remaining(
            i64::from(minuend.hours.unwrap_or(0)),
            minuend.minutes.map(i64::from),
        )
        .map(|_| minuend.to_string());
    }

    let reduction = Duration::parse(reduction)?;
    minuend.checked_sub(&reduction).map(|result| result.to_string())
}

/// Computes `floor(dividend / divisor)` on compound strings.
///
/// An empty dividend is the degenerate "no window" case and yields zero
/// cycles. Any other dividend must parse.
///
/// # Examples
///
/// ```
/// use procflow_core::duration::divide;
///
/// assert_eq!(divide("10M", "1H").unwrap(), 6);
/// assert_eq!(divide("2H", "30M").unwrap(), 0);
/// assert_eq!(divide("10M", "").unwrap(), 0);
/// assert!(divide("", "1H").is_err());
/// ```
pub fn divide(divisor: &str, dividend: &str) -> Result<u64, DurationError> {
    if dividend.trim().is_empty() {
        return Ok(0);
    }
    if divisor.trim().is_empty() {
        return Err(DurationError::UnspecifiedDivisor);
    }

    let divisor = Duration::parse(divisor)?;
    let dividend = Duration::parse(dividend)?;
    divisor.cycles_within(&dividend)
}

fn parse_amount(digits: &str, input: &str) -> Result<u32, DurationError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationError::Malformed(input.to_owned()));
    }
    digits
        .parse()
        .map_err(|_| DurationError::Malformed(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        let cases = [
            ("2H", Some(2), None),
            ("45M", None, Some(45)),
            ("1H30M", Some(1), Some(30)),
            ("0H5M", Some(0), Some(5)),
        ];

        for (input, hours, minutes) in cases {
            let duration = Duration::parse(input).expect("Failed to parse");
            assert_eq!(duration.hours(), hours, "Input: {input}");
            assert_eq!(duration.minutes(), minutes, "Input: {input}");
        }
    }

    #[test]
    fn test_parse_invalid() {
        let failures = ["", "H", "M", "HM", "2HM", "30M1H", "1H30", "1.5H", " 2H", "2h", "-1H"];

        for input in failures {
            assert!(Duration::parse(input).is_err(), "Should fail: '{input}'");
        }
        assert_eq!(Duration::parse(""), Err(DurationError::Empty));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Duration::new(None, None), Err(DurationError::Empty));
        assert!(Duration::new(Some(0), None).is_ok());
    }

    #[test]
    fn test_subtract_minutes_only() {
        assert_eq!(subtract("10M", "30M").unwrap(), "20M");
        assert_eq!(subtract("40M", "30M"), Err(DurationError::NonPositive));
        assert_eq!(subtract("30M", "30M"), Err(DurationError::NonPositive));
    }

    #[test]
    fn test_subtract_rejects_hours_from_minutes() {
        assert_eq!(subtract("1H", "90M"), Err(DurationError::MixedUnits));
        assert_eq!(subtract("1H10M", "90M"), Err(DurationError::MixedUnits));
    }

    #[test]
    fn test_subtract_empty_reduction_passes_minuend() {
        assert_eq!(subtract("", "30M").unwrap(), "30M");
        assert_eq!(subtract("", "2H15M").unwrap(), "2H15M");
        assert!(subtract("", "0M").is_err());
    }

    #[test]
    fn test_subtract_with_hours() {
        // Both carry minutes, no borrow needed.
        assert_eq!(subtract("1H10M", "3H40M").unwrap(), "2H30M");
        // Both carry minutes, borrow one hour.
        assert_eq!(subtract("1H50M", "3H10M").unwrap(), "1H20M");
        // Reduction minutes only, minuend hours only.
        assert_eq!(subtract("30M", "2H").unwrap(), "1H30M");
        // Minuend minutes pass through.
        assert_eq!(subtract("1H", "3H20M").unwrap(), "2H20M");
        // Hours only.
        assert_eq!(subtract("1H", "3H").unwrap(), "2H");
        // No borrow needed, so zero hours may remain.
        assert_eq!(subtract("2H10M", "2H30M").unwrap(), "0H20M");
    }

    #[test]
    fn test_subtract_with_hours_rejects_non_positive() {
        assert_eq!(subtract("3H", "3H"), Err(DurationError::NonPositive));
        assert_eq!(subtract("4H", "3H"), Err(DurationError::NonPositive));
        assert_eq!(subtract("30M", "1H"), Err(DurationError::NonPositive));
        assert_eq!(subtract("2H40M", "3H10M"), Err(DurationError::NonPositive));
        assert_eq!(subtract("2H40M", "2H30M"), Err(DurationError::NonPositive));
        assert_eq!(subtract("4H", "3H20M"), Err(DurationError::NonPositive));
    }

    #[test]
    fn test_subtract_large_minute_reduction_borrows_enough() {
        assert_eq!(subtract("90M", "3H").unwrap(), "1H30M");
        assert_eq!(subtract("130M", "3H"), Err(DurationError::NonPositive));
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide("10M", "1H").unwrap(), 6);
        assert_eq!(divide("20M", "1H30M").unwrap(), 4);
        assert_eq!(divide("1H", "3H").unwrap(), 3);
        assert_eq!(divide("1H30M", "3H").unwrap(), 2);
        assert_eq!(divide("1H", "90M").unwrap(), 1);
        assert_eq!(divide("2H", "30M").unwrap(), 0);
    }

    #[test]
    fn test_divide_degenerate_dividend() {
        assert_eq!(divide("10M", "").unwrap(), 0);
        assert_eq!(divide("", "").unwrap(), 0);
        assert_eq!(divide("10M", "  ").unwrap(), 0);
    }

    #[test]
    fn test_divide_rejects_malformed_dividend() {
        for dividend in ["abc", "5", "1H30"] {
            assert!(
                matches!(divide("10M", dividend), Err(DurationError::Malformed(_))),
                "Input: {dividend}"
            );
        }
    }

    #[test]
    fn test_divide_invalid_divisor() {
        assert_eq!(divide("", "1H"), Err(DurationError::UnspecifiedDivisor));
        assert!(matches!(divide("5", "1H"), Err(DurationError::Malformed(_))));
        assert_eq!(divide("0M", "1H"), Err(DurationError::ZeroDivisor));
        assert_eq!(divide("0H0M", "1H"), Err(DurationError::ZeroDivisor));
        assert!(matches!(divide("xM", "1H"), Err(DurationError::Malformed(_))));
    }
}
