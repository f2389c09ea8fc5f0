//! Pure queries over an in-memory snapshot of day logs. No I/O here;
//! callers fetch the snapshot from the store and sort explicitly.

use chrono::{Duration, NaiveDate};

use crate::catalog::{EXERCISES, SUPPLEMENTS};
use crate::models::DayLog;

/// Ascending by date. ISO date strings sort lexicographically in
/// chronological order.
pub fn sort_asc(logs: &mut [DayLog]) {
    logs.sort_by(|a, b| a.date.cmp(&b.date));
}

pub fn sort_desc(logs: &mut [DayLog]) {
    logs.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Keep records from the trailing `days`-day window ending at `today`
/// (inclusive of today, so a 7-day window starts 6 days back).
/// `None` means all time.
#[must_use]
pub fn window_last_days(logs_asc: &[DayLog], days: Option<u32>, today: NaiveDate) -> Vec<DayLog> {
    let Some(days) = days else {
        return logs_asc.to_vec();
    };
    let cutoff = (today - Duration::days(i64::from(days.saturating_sub(1))))
        .format("%Y-%m-%d")
        .to_string();
    logs_asc
        .iter()
        .filter(|l| l.date >= cutoff)
        .cloned()
        .collect()
}

/// First `limit` records of an already-sorted slice; `None` means no limit.
#[must_use]
pub fn first_n(logs: &[DayLog], limit: Option<usize>) -> &[DayLog] {
    match limit {
        Some(n) => &logs[..logs.len().min(n)],
        None => logs,
    }
}

/// Names of catalog supplements marked taken, plus the custom item when it
/// is both named and taken.
#[must_use]
pub fn taken_supplements(log: &DayLog) -> Vec<String> {
    let mut taken: Vec<String> = SUPPLEMENTS
        .iter()
        .filter(|s| log.supplements.get(s.id).copied().unwrap_or(false))
        .map(|s| s.name.to_string())
        .collect();
    let custom = log.custom_vitamin_name.trim();
    if !custom.is_empty() && log.custom_vitamin_taken {
        taken.push(custom.to_string());
    }
    taken
}

/// Names of catalog exercises marked done.
#[must_use]
pub fn done_exercises(log: &DayLog) -> Vec<String> {
    EXERCISES
        .iter()
        .filter(|e| log.exercises.get(e.id).copied().unwrap_or(false))
        .map(|e| e.name.to_string())
        .collect()
}

/// Case-insensitive substring match against, in priority order: the date,
/// the custom item name, taken supplement names, done exercise names.
/// An empty query matches everything.
#[must_use]
pub fn matches_search(log: &DayLog, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    if log.date.to_lowercase().contains(&q) {
        return true;
    }
    if log.custom_vitamin_name.to_lowercase().contains(&q) {
        return true;
    }
    let taken = taken_supplements(log).join(" ").to_lowercase();
    if taken.contains(&q) {
        return true;
    }
    let done = done_exercises(log).join(" ").to_lowercase();
    done.contains(&q)
}

/// Count of catalog supplements taken, plus one when the custom item is
/// both named and taken.
#[must_use]
pub fn supplement_taken_count(log: &DayLog) -> usize {
    let mut count = SUPPLEMENTS
        .iter()
        .filter(|s| log.supplements.get(s.id).copied().unwrap_or(false))
        .count();
    if !log.custom_vitamin_name.trim().is_empty() && log.custom_vitamin_taken {
        count += 1;
    }
    count
}

/// Total number of supplements possible today: the catalog, plus one when a
/// custom item is named (whether or not it was taken).
#[must_use]
pub fn supplement_total(log: &DayLog) -> usize {
    SUPPLEMENTS.len() + usize::from(!log.custom_vitamin_name.trim().is_empty())
}

#[must_use]
pub fn exercise_count(log: &DayLog) -> usize {
    EXERCISES
        .iter()
        .filter(|e| log.exercises.get(e.id).copied().unwrap_or(false))
        .count()
}

/// Rounded completion percentage; a zero total yields 0, never an error.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn completion_percent(taken: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (taken as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(date: &str) -> DayLog {
        DayLog::empty(date)
    }

    #[test]
    fn test_sort_orders_by_date() {
        let mut logs = vec![log("2024-03-01"), log("2024-01-15"), log("2024-02-01")];
        sort_asc(&mut logs);
        let dates: Vec<&str> = logs.iter().map(|l| l.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-02-01", "2024-03-01"]);

        sort_desc(&mut logs);
        let dates: Vec<&str> = logs.iter().map(|l| l.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-15"]);
    }

    #[test]
    fn test_window_last_days() {
        let logs = vec![log("2024-06-01"), log("2024-06-09"), log("2024-06-15")];
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let week = window_last_days(&logs, Some(7), today);
        let dates: Vec<&str> = week.iter().map(|l| l.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-09", "2024-06-15"]);

        // window boundary day is included: 7 days back from the 15th is the 9th
        let single = window_last_days(&logs, Some(1), today);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].date, "2024-06-15");
    }

    #[test]
    fn test_window_all_time_sentinel() {
        let logs = vec![log("2020-01-01"), log("2024-06-15")];
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(window_last_days(&logs, None, today).len(), 2);
    }

    #[test]
    fn test_first_n() {
        let logs = vec![log("2024-06-15"), log("2024-06-14"), log("2024-06-13")];
        assert_eq!(first_n(&logs, Some(2)).len(), 2);
        assert_eq!(first_n(&logs, Some(10)).len(), 3);
        assert_eq!(first_n(&logs, None).len(), 3);
    }

    #[test]
    fn test_search_matches_date_first() {
        let l = log("2024-06-15");
        assert!(matches_search(&l, "06-15"));
        assert!(matches_search(&l, ""));
        assert!(!matches_search(&l, "magnesium"));
    }

    #[test]
    fn test_search_matches_taken_names_only() {
        let mut l = log("2024-06-15");
        assert!(!matches_search(&l, "magnesium"));
        l.supplements.insert("magnesium".to_string(), true);
        assert!(matches_search(&l, "MAGNESIUM"));
    }

    #[test]
    fn test_search_matches_custom_name_even_when_not_taken() {
        let mut l = log("2024-06-15");
        l.custom_vitamin_name = "Zinc Picolinate".to_string();
        assert!(matches_search(&l, "zinc"));
    }

    #[test]
    fn test_search_matches_exercises() {
        let mut l = log("2024-06-15");
        l.exercises.insert("treadmill".to_string(), true);
        assert!(matches_search(&l, "treadmill"));
    }

    #[test]
    fn test_tally_counts_catalog_plus_custom_taken() {
        let mut l = log("2024-06-15");
        l.supplements.insert("nac".to_string(), true);
        l.supplements.insert("taurine".to_string(), true);
        assert_eq!(supplement_taken_count(&l), 2);

        // named but not taken: total grows, taken does not
        l.custom_vitamin_name = "Zinc".to_string();
        assert_eq!(supplement_taken_count(&l), 2);
        assert_eq!(supplement_total(&l), SUPPLEMENTS.len() + 1);

        l.custom_vitamin_taken = true;
        assert_eq!(supplement_taken_count(&l), 3);
    }

    #[test]
    fn test_tally_ignores_unknown_ids() {
        let mut l = log("2024-06-15");
        l.supplements.insert("retired_item".to_string(), true);
        assert_eq!(supplement_taken_count(&l), 0);
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(22, 22), 100);
    }

    #[test]
    fn test_taken_lists_use_display_names() {
        let mut l = log("2024-06-15");
        l.supplements.insert("protein_powder".to_string(), true);
        l.exercises.insert("weight_training".to_string(), true);
        l.custom_vitamin_name = " Zinc ".to_string();
        l.custom_vitamin_taken = true;

        let taken = taken_supplements(&l);
        assert_eq!(taken, vec!["Protein Powder 84g", "Zinc"]);
        assert_eq!(done_exercises(&l), vec!["Weight Training"]);
    }
}
