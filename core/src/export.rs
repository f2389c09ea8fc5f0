//! Import and export. JSON is the full-fidelity interchange format; CSV is
//! a flat spreadsheet view with one column per catalog item.

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{EXERCISES, SUPPLEMENTS};
use crate::db::Database;
use crate::errors::{Result, StoreError};
use crate::models::{DayLog, LogPatch, validate_date};
use crate::query;

/// Outcome of a JSON import: how many records were merged in and how many
/// payload entries were skipped for missing or invalid dates.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Pretty-printed JSON array of every record, ascending by date.
pub fn export_json(db: &Database) -> Result<String> {
    let mut logs = db.list_all()?;
    query::sort_asc(&mut logs);
    serde_json::to_string_pretty(&logs).map_err(|e| StoreError::MalformedInput(e.to_string()))
}

/// CSV with a fixed column layout: identity, one `supp_<id>` column per
/// catalog supplement, the custom item pair, one `ex_<id>` column per
/// exercise, the fasting flags, then the measurements. Booleans are `1`/`0`;
/// absent measurements are empty cells.
pub fn to_csv(logs: &[DayLog]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["id".to_string(), "date".to_string()];
    header.extend(SUPPLEMENTS.iter().map(|s| format!("supp_{}", s.id)));
    header.push("custom_vitamin_name".to_string());
    header.push("custom_vitamin_taken".to_string());
    header.extend(EXERCISES.iter().map(|e| format!("ex_{}", e.id)));
    for col in [
        "fasted",
        "water_fasted",
        "fasting_blood_sugar",
        "pre_dinner_sugar",
        "post_dinner_sugar",
        "waist_size",
        "weight",
        "fat_percentage",
        "blood_pressure_systolic",
        "blood_pressure_diastolic",
        "grip_strength_left",
        "grip_strength_right",
    ] {
        header.push(col.to_string());
    }
    writer.write_record(&header)?;

    for log in logs {
        let mut row = vec![log.id.clone(), log.date.clone()];
        for item in SUPPLEMENTS {
            row.push(flag(log.supplements.get(item.id).copied().unwrap_or(false)));
        }
        row.push(log.custom_vitamin_name.clone());
        row.push(flag(log.custom_vitamin_taken));
        for item in EXERCISES {
            row.push(flag(log.exercises.get(item.id).copied().unwrap_or(false)));
        }
        row.push(flag(log.fasted));
        row.push(flag(log.water_fasted));
        for value in [
            log.fasting_blood_sugar,
            log.pre_dinner_sugar,
            log.post_dinner_sugar,
            log.waist_size,
            log.weight,
            log.fat_percentage,
            log.blood_pressure_systolic,
            log.blood_pressure_diastolic,
            log.grip_strength_left,
            log.grip_strength_right,
        ] {
            row.push(value.map(|v| v.to_string()).unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::MalformedInput(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::MalformedInput(e.to_string()))
}

/// Every stored record as CSV, ascending by date.
pub fn export_csv(db: &Database) -> Result<String> {
    let mut logs = db.list_all()?;
    query::sort_asc(&mut logs);
    to_csv(&logs)
}

fn flag(b: bool) -> String {
    if b { "1" } else { "0" }.to_string()
}

/// Import a JSON payload: either a single record object or an array of
/// them. Each entry is treated as a patch and merged onto whatever the
/// store already holds for that date, so importing never erases fields the
/// payload does not mention. Entries without a valid `YYYY-MM-DD` date are
/// counted as skipped, not fatal. Records are written one at a time in
/// payload order; on a storage failure the earlier writes stay committed.
pub fn import_json(db: &Database, text: &str) -> Result<ImportSummary> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| StoreError::MalformedInput(format!("not valid JSON: {e}")))?;

    let entries = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        other => {
            return Err(StoreError::MalformedInput(format!(
                "expected a record or an array of records, got {other}"
            )));
        }
    };

    let mut summary = ImportSummary::default();
    for entry in entries {
        let Ok(patch) = serde_json::from_value::<LogPatch>(entry) else {
            summary.skipped += 1;
            continue;
        };
        let Some(date) = patch.date.clone() else {
            summary.skipped += 1;
            continue;
        };
        if validate_date(&date).is_err() {
            summary.skipped += 1;
            continue;
        }
        let existing = db.get_log(&date)?;
        let merged = patch.apply_to(&date, existing.as_ref());
        db.put_log(&merged)?;
        summary.imported += 1;
    }
    Ok(summary)
}
