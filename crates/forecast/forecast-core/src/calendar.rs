//! Forecast date generation
//!
//! Surveillance series are monthly by default. Daily and yearly series are
//! recognised from the median spacing of their dates.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sampling frequency of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    #[default]
    Monthly,
    Yearly,
}

impl Frequency {
    /// Infer from the median gap between distinct dates.
    ///
    /// Fewer than two distinct dates give [`Frequency::Monthly`].
    pub fn infer(dates: &[NaiveDate]) -> Self {
        let mut sorted = dates.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() < 2 {
            return Frequency::Monthly;
        }

        let mut gaps: Vec<i64> = sorted
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .collect();
        gaps.sort_unstable();
        let median = gaps[gaps.len() / 2];

        match median {
            i64::MIN..=14 => Frequency::Daily,
            15..=200 => Frequency::Monthly,
            _ => Frequency::Yearly,
        }
    }

    /// Date `steps` periods after `date`, or `None` past the calendar range.
    pub fn advance(&self, date: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => date.checked_add_days(Days::new(u64::from(steps))),
            Frequency::Monthly => date.checked_add_months(Months::new(steps)),
            Frequency::Yearly => date.checked_add_months(Months::new(steps.checked_mul(12)?)),
        }
    }

    /// Typical number of periods in a yearly cycle
    pub fn season_length(&self) -> usize {
        match self {
            Frequency::Daily => 7,
            Frequency::Monthly => 12,
            Frequency::Yearly => 1,
        }
    }
}

/// `horizon` dates strictly after `last`, one period apart.
///
/// Each date is computed from `last` directly so month-end dates do not
/// drift. Generation stops early only at the end of the calendar range.
pub fn future_dates(last: NaiveDate, frequency: Frequency, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon)
        .map_while(|step| {
            let step = u32::try_from(step).ok()?;
            frequency.advance(last, step)
        })
        .collect()
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_infer_monthly() {
        let dates: Vec<NaiveDate> = (1..=12).map(|m| ymd(2020, m, 1)).collect();
        assert_eq!(Frequency::infer(&dates), Frequency::Monthly);
    }

    #[test]
    fn test_infer_yearly_and_daily() {
        let years: Vec<NaiveDate> = (2000..2010).map(|y| ymd(y, 1, 1)).collect();
        assert_eq!(Frequency::infer(&years), Frequency::Yearly);

        let days: Vec<NaiveDate> = (1..=20).map(|d| ymd(2021, 3, d)).collect();
        assert_eq!(Frequency::infer(&days), Frequency::Daily);
    }

    #[test]
    fn test_infer_degenerate() {
        assert_eq!(Frequency::infer(&[]), Frequency::Monthly);
        let same = vec![ymd(2020, 1, 1); 3];
        assert_eq!(Frequency::infer(&same), Frequency::Monthly);
    }

    #[test]
    fn test_future_dates_monthly_month_end() {
        let dates = future_dates(ymd(2023, 1, 31), Frequency::Monthly, 3);
        assert_eq!(dates, vec![ymd(2023, 2, 28), ymd(2023, 3, 31), ymd(2023, 4, 30)]);
    }

    #[test]
    fn test_future_dates_strictly_increasing() {
        for freq in [Frequency::Daily, Frequency::Monthly, Frequency::Yearly] {
            let last = ymd(2020, 2, 29);
            let dates = future_dates(last, freq, 24);
            assert_eq!(dates.len(), 24);
            assert!(dates[0] > last);
            assert!(dates.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(ymd(2024, 7, 19)), ymd(2024, 7, 1));
    }
}
