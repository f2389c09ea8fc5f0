use anyhow::Result;
use chrono::Local;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use vitalog_core::db::Database;
use vitalog_core::query;

use super::helpers::{fmt_opt, mark, parse_days};

pub(crate) fn cmd_history(
    db: &Database,
    days: &str,
    limit: Option<usize>,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let days = parse_days(days)?;
    let today = Local::now().date_naive();

    let mut logs = db.list_all()?;
    query::sort_asc(&mut logs);
    let mut logs = query::window_last_days(&logs, days, today);
    if let Some(q) = search {
        logs.retain(|l| query::matches_search(l, q));
    }
    query::sort_desc(&mut logs);
    let logs = query::first_n(&logs, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
        return Ok(());
    }
    if logs.is_empty() {
        eprintln!("No logs found. Use `vitalog log` to record a day.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Supps")]
        supps: String,
        #[tabled(rename = "%")]
        pct: String,
        #[tabled(rename = "Exercises")]
        exercises: String,
        #[tabled(rename = "Fasted")]
        fasted: &'static str,
        #[tabled(rename = "Weight (kg)")]
        weight: String,
        #[tabled(rename = "F.Sugar")]
        fasting_sugar: String,
    }

    let rows: Vec<HistoryRow> = logs
        .iter()
        .map(|l| {
            let taken = query::supplement_taken_count(l);
            let total = query::supplement_total(l);
            HistoryRow {
                date: l.date.clone(),
                supps: format!("{taken}/{total}"),
                pct: format!("{}%", query::completion_percent(taken, total)),
                exercises: query::exercise_count(l).to_string(),
                fasted: mark(l.fasted),
                weight: fmt_opt(l.weight),
                fasting_sugar: fmt_opt(l.fasting_blood_sugar),
            }
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}
