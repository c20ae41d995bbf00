//! Temporal range extraction.

use chrono::{Datelike, NaiveDate};

use crate::models::filter::DateRange;

use super::patterns::{BARE_YEAR, MONTH_REFERENCE, RELATIVE_PERIOD};
use super::vocabulary::{month_number, relative_period, RelativePeriod};
use super::{ExtractionMatch, FieldExtractor};

/// Temporal phrase extractor.
///
/// Relative phrases are resolved against `today`. Candidates are returned in
/// precedence order: relative phrases, then month names, then bare years.
pub struct TemporalExtractor {
    today: NaiveDate,
}

impl TemporalExtractor {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    fn relative_range(&self, period: RelativePeriod) -> Option<DateRange> {
        let (year, month) = (self.today.year(), self.today.month());
        match period {
            RelativePeriod::ThisMonth => month_range(year, month),
            RelativePeriod::LastMonth => {
                let (y, m) = shift_month(year, month, -1);
                month_range(y, m)
            }
            RelativePeriod::NextMonth => {
                let (y, m) = shift_month(year, month, 1);
                month_range(y, m)
            }
            RelativePeriod::ThisYear => year_range(year),
            RelativePeriod::LastYear => year_range(year - 1),
            RelativePeriod::NextYear => year_range(year + 1),
        }
    }
}

impl FieldExtractor for TemporalExtractor {
    type Output = DateRange;

    fn extract_all(&self, query: &str) -> Vec<ExtractionMatch<DateRange>> {
        let mut results = Vec::new();

        // "this month", "previous year"
        for m in RELATIVE_PERIOD.find_iter(query) {
            if let Some(range) = relative_period(m.as_str()).and_then(|p| self.relative_range(p)) {
                results.push(
                    ExtractionMatch::new(range, m.as_str()).with_position(m.start(), m.end()),
                );
            }
        }

        // "january 2025", "march"
        for caps in MONTH_REFERENCE.captures_iter(query) {
            let (Some(full), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let year = caps.get(2).and_then(|y| y.as_str().parse::<i32>().ok());

            // "may" on its own is too often the verb
            if name.as_str() == "may" && year.is_none() {
                continue;
            }

            let range = month_number(name.as_str())
                .and_then(|month| month_range(year.unwrap_or(self.today.year()), month));
            if let Some(range) = range {
                results.push(
                    ExtractionMatch::new(range, full.as_str())
                        .with_position(full.start(), full.end()),
                );
            }
        }

        // "2025"
        for caps in BARE_YEAR.captures_iter(query) {
            let Some(m) = caps.get(1) else { continue };
            // Already covered by a "month year" match
            if results.iter().any(|r: &ExtractionMatch<DateRange>| {
                r.position.0 <= m.start() && m.end() <= r.position.1
            }) {
                continue;
            }
            if let Some(range) = m.as_str().parse::<i32>().ok().and_then(year_range) {
                results.push(
                    ExtractionMatch::new(range, m.as_str()).with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = shift_month(year, month, 1);
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some(DateRange::new(start, end))
}

fn year_range(year: i32) -> Option<DateRange> {
    Some(DateRange::new(
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(today: NaiveDate, query: &str) -> Option<DateRange> {
        TemporalExtractor::new(today).extract(query).map(|m| m.value)
    }

    #[test]
    fn test_this_month_brackets_today() {
        let today = date(2025, 2, 14);
        let r = range(today, "invoices this month").unwrap();
        assert_eq!(r, DateRange::new(date(2025, 2, 1), date(2025, 2, 28)));
        assert!(r.contains(today));
    }

    #[test]
    fn test_last_month_crosses_year() {
        let r = range(date(2025, 1, 10), "paid last month").unwrap();
        assert_eq!(r, DateRange::new(date(2024, 12, 1), date(2024, 12, 31)));

        let r = range(date(2024, 12, 10), "due next month").unwrap();
        assert_eq!(r, DateRange::new(date(2025, 1, 1), date(2025, 1, 31)));
    }

    #[test]
    fn test_synonyms_for_relative_phrases() {
        let today = date(2024, 3, 5);
        assert_eq!(range(today, "previous month"), range(today, "last month"));
        assert_eq!(
            range(today, "current year"),
            Some(DateRange::new(date(2024, 1, 1), date(2024, 12, 31)))
        );
        assert_eq!(
            range(today, "last year"),
            Some(DateRange::new(date(2023, 1, 1), date(2023, 12, 31)))
        );
    }

    #[test]
    fn test_month_with_year() {
        let r = range(date(2026, 6, 1), "hosting invoices january 2025").unwrap();
        assert_eq!(r, DateRange::new(date(2025, 1, 1), date(2025, 1, 31)));
    }

    #[test]
    fn test_month_without_year_uses_current_year() {
        let r = range(date(2024, 6, 1), "invoices in february").unwrap();
        assert_eq!(r, DateRange::new(date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_may_needs_a_year() {
        assert_eq!(range(date(2025, 6, 1), "invoices that may be overdue"), None);
        assert_eq!(
            range(date(2025, 6, 1), "invoices from may 2024"),
            Some(DateRange::new(date(2024, 5, 1), date(2024, 5, 31)))
        );
    }

    #[test]
    fn test_bare_year() {
        assert_eq!(
            range(date(2025, 6, 1), "maintenance invoices 2023"),
            Some(DateRange::new(date(2023, 1, 1), date(2023, 12, 31)))
        );
        assert_eq!(range(date(2025, 6, 1), "contract 527995"), None);
    }

    #[test]
    fn test_relative_phrase_takes_precedence() {
        let r = range(date(2025, 6, 15), "march invoices this month").unwrap();
        assert_eq!(r, DateRange::new(date(2025, 6, 1), date(2025, 6, 30)));
    }

    #[test]
    fn test_month_year_not_repeated_as_bare_year() {
        let all = TemporalExtractor::new(date(2025, 6, 1)).extract_all("january 2025");
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(2025, 1, -1), (2024, 12));
        assert_eq!(shift_month(2025, 12, 1), (2026, 1));
        assert_eq!(shift_month(2025, 6, 0), (2025, 6));
    }
}
