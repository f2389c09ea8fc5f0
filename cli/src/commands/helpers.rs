use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday")
            }),
        },
    }
}

pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a window argument: "all" means no limit, otherwise a positive
/// number of days.
pub(crate) fn parse_days(s: &str) -> Result<Option<u32>> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    let days: u32 = s
        .parse()
        .with_context(|| format!("Invalid window '{s}'. Use a number of days or 'all'"))?;
    if days == 0 {
        bail!("Window must be at least 1 day");
    }
    Ok(Some(days))
}

pub(crate) fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

pub(crate) fn mark(b: bool) -> &'static str {
    if b { "✓" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_none_is_today() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(None).unwrap(), today);
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(Some("today".to_string())).unwrap(), today);
        assert_eq!(
            parse_date(Some("yesterday".to_string())).unwrap(),
            today - chrono::Duration::days(1)
        );
    }

    #[test]
    fn test_parse_date_iso() {
        let date = parse_date(Some("2024-01-15".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("nope".to_string())).is_err());
        assert!(parse_date(Some("15/01/2024".to_string())).is_err());
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("30").unwrap(), Some(30));
        assert_eq!(parse_days("all").unwrap(), None);
        assert_eq!(parse_days("ALL").unwrap(), None);
        assert!(parse_days("0").is_err());
        assert!(parse_days("soon").is_err());
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(80.55)), "80.6");
        assert_eq!(fmt_opt(None), "-");
    }
}
