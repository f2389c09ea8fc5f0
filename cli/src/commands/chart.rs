use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use vitalog_core::chart::{ADHERENCE_BARS, ChartFrame, LINE_CHARTS, build_bar_chart, build_line_chart};
use vitalog_core::db::Database;
use vitalog_core::query;

use super::helpers::parse_days;
use crate::svg;

const BAR_PADDING: f64 = 58.0;

/// Render every chart over the selected window: the five measurement line
/// charts plus the adherence bars. With `--json` the geometry is printed
/// instead of writing SVG files.
pub(crate) fn cmd_chart(db: &Database, days: &str, out: &Path, json: bool) -> Result<()> {
    let days = parse_days(days)?;
    let today = Local::now().date_naive();

    let mut logs = db.list_all()?;
    query::sort_asc(&mut logs);
    let logs = query::window_last_days(&logs, days, today);

    let frame = ChartFrame::default();
    let bar_frame = ChartFrame {
        padding: BAR_PADDING,
        ..frame
    };

    let lines: Vec<_> = LINE_CHARTS
        .iter()
        .map(|def| (def, build_line_chart(frame, &logs, def.series, def.y_label)))
        .collect();
    let adherence = build_bar_chart(bar_frame, &logs, ADHERENCE_BARS);

    if json {
        let charts: Vec<serde_json::Value> = lines
            .iter()
            .map(|(def, chart)| {
                serde_json::json!({
                    "key": def.key,
                    "title": def.title,
                    "chart": chart,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "days": days,
                "records": logs.len(),
                "lines": charts,
                "adherence": adherence,
            }))?
        );
        return Ok(());
    }

    if logs.is_empty() {
        eprintln!("No logs in the selected window; charts will be empty.");
    }

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    for (def, chart) in &lines {
        let path = out.join(format!("vitalog-{}.svg", def.key));
        std::fs::write(&path, svg::line_chart_svg(chart, def.title))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    let path = out.join("vitalog-adherence.svg");
    std::fs::write(&path, svg::bar_chart_svg(&adherence, "Adherence"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalog_core::models::DayLog;

    #[test]
    fn test_chart_writes_six_files() {
        let db = Database::open_in_memory().unwrap();
        let mut log = DayLog::empty("2024-06-15");
        log.weight = Some(80.0);
        db.put_log(&log).unwrap();

        let dir = tempfile::tempdir().unwrap();
        cmd_chart(&db, "all", dir.path(), false).unwrap();

        let files: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files.len(), 6);
        assert!(files.contains(&"vitalog-sugar.svg".to_string()));
        assert!(files.contains(&"vitalog-adherence.svg".to_string()));
    }

    #[test]
    fn test_chart_empty_store_still_renders() {
        let db = Database::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        cmd_chart(&db, "30", dir.path(), false).unwrap();
        let svg =
            std::fs::read_to_string(dir.path().join("vitalog-weight-fat.svg")).unwrap();
        assert!(svg.starts_with("<svg"));
    }
}
