use anyhow::{Result, bail};
use clap::Args;

use vitalog_core::catalog::{self, EXERCISES};
use vitalog_core::db::Database;
use vitalog_core::models::DayLog;
use vitalog_core::query;

use super::helpers::{date_key, parse_date};

/// Edits applied on top of whatever is already stored for the day. Flags
/// that are not given leave the stored value untouched.
#[derive(Args)]
pub(crate) struct EditArgs {
    /// Mark a catalog item as done (supplement or exercise id, repeatable)
    #[arg(long, value_name = "ID")]
    pub take: Vec<String>,
    /// Unmark a catalog item (repeatable)
    #[arg(long, value_name = "ID")]
    pub untake: Vec<String>,
    /// Set the custom supplement name
    #[arg(long, value_name = "NAME")]
    pub custom_name: Option<String>,
    /// Mark the custom supplement taken or not
    #[arg(long, value_name = "BOOL")]
    pub custom_taken: Option<bool>,
    /// Set the fasted flag
    #[arg(long, value_name = "BOOL")]
    pub fasted: Option<bool>,
    /// Set the water-fasted flag
    #[arg(long, value_name = "BOOL")]
    pub water_fasted: Option<bool>,
    /// Fasting blood sugar (mmol/L)
    #[arg(long, value_name = "VALUE")]
    pub fasting_sugar: Option<f64>,
    /// Pre-dinner blood sugar (mmol/L)
    #[arg(long, value_name = "VALUE")]
    pub pre_dinner_sugar: Option<f64>,
    /// Post-dinner blood sugar (mmol/L)
    #[arg(long, value_name = "VALUE")]
    pub post_dinner_sugar: Option<f64>,
    /// Waist size (cm)
    #[arg(long, value_name = "VALUE")]
    pub waist: Option<f64>,
    /// Body weight (kg)
    #[arg(long, value_name = "VALUE")]
    pub weight: Option<f64>,
    /// Body fat percentage
    #[arg(long, value_name = "VALUE")]
    pub fat: Option<f64>,
    /// Systolic blood pressure (mmHg)
    #[arg(long, value_name = "VALUE")]
    pub systolic: Option<f64>,
    /// Diastolic blood pressure (mmHg)
    #[arg(long, value_name = "VALUE")]
    pub diastolic: Option<f64>,
    /// Left-hand grip strength (kg)
    #[arg(long, value_name = "VALUE")]
    pub grip_left: Option<f64>,
    /// Right-hand grip strength (kg)
    #[arg(long, value_name = "VALUE")]
    pub grip_right: Option<f64>,
    /// Clear a measurement (field name, repeatable)
    #[arg(long, value_name = "FIELD")]
    pub clear: Vec<String>,
}

fn set_item(log: &mut DayLog, id: &str, value: bool) -> Result<()> {
    if catalog::is_supplement_id(id) {
        log.supplements.insert(id.to_string(), value);
    } else if catalog::is_exercise_id(id) {
        log.exercises.insert(id.to_string(), value);
    } else {
        bail!("Unknown item id '{id}'. Run `vitalog catalog` to list valid ids");
    }
    Ok(())
}

fn clear_field(log: &mut DayLog, field: &str) -> Result<()> {
    let slot = match field {
        "fasting-sugar" => &mut log.fasting_blood_sugar,
        "pre-dinner-sugar" => &mut log.pre_dinner_sugar,
        "post-dinner-sugar" => &mut log.post_dinner_sugar,
        "waist" => &mut log.waist_size,
        "weight" => &mut log.weight,
        "fat" => &mut log.fat_percentage,
        "systolic" => &mut log.blood_pressure_systolic,
        "diastolic" => &mut log.blood_pressure_diastolic,
        "grip-left" => &mut log.grip_strength_left,
        "grip-right" => &mut log.grip_strength_right,
        _ => bail!(
            "Unknown field '{field}'. Use one of: fasting-sugar, pre-dinner-sugar, \
             post-dinner-sugar, waist, weight, fat, systolic, diastolic, grip-left, grip-right"
        ),
    };
    *slot = None;
    Ok(())
}

pub(crate) fn cmd_log(
    db: &Database,
    date: Option<String>,
    edit: EditArgs,
    json: bool,
) -> Result<()> {
    let key = date_key(parse_date(date)?);
    let mut log = db.get_log(&key)?.unwrap_or_else(|| DayLog::empty(&key));

    for id in &edit.take {
        set_item(&mut log, id, true)?;
    }
    for id in &edit.untake {
        set_item(&mut log, id, false)?;
    }
    if let Some(name) = edit.custom_name {
        log.custom_vitamin_name = name;
    }
    if let Some(v) = edit.custom_taken {
        log.custom_vitamin_taken = v;
    }
    if let Some(v) = edit.fasted {
        log.fasted = v;
    }
    if let Some(v) = edit.water_fasted {
        log.water_fasted = v;
    }
    if let Some(v) = edit.fasting_sugar {
        log.fasting_blood_sugar = Some(v);
    }
    if let Some(v) = edit.pre_dinner_sugar {
        log.pre_dinner_sugar = Some(v);
    }
    if let Some(v) = edit.post_dinner_sugar {
        log.post_dinner_sugar = Some(v);
    }
    if let Some(v) = edit.waist {
        log.waist_size = Some(v);
    }
    if let Some(v) = edit.weight {
        log.weight = Some(v);
    }
    if let Some(v) = edit.fat {
        log.fat_percentage = Some(v);
    }
    if let Some(v) = edit.systolic {
        log.blood_pressure_systolic = Some(v);
    }
    if let Some(v) = edit.diastolic {
        log.blood_pressure_diastolic = Some(v);
    }
    if let Some(v) = edit.grip_left {
        log.grip_strength_left = Some(v);
    }
    if let Some(v) = edit.grip_right {
        log.grip_strength_right = Some(v);
    }
    for field in &edit.clear {
        clear_field(&mut log, field)?;
    }

    let stored = db.put_log(&log)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    } else {
        print_day(&stored);
    }
    Ok(())
}

pub(crate) fn cmd_show(db: &Database, date: Option<String>, json: bool) -> Result<()> {
    let key = date_key(parse_date(date)?);

    if let Some(log) = db.get_log(&key)? {
        if json {
            println!("{}", serde_json::to_string_pretty(&log)?);
        } else {
            print_day(&log);
        }
    } else if json {
        println!(
            "{}",
            serde_json::json!({ "error": format!("No log for {key}") })
        );
    } else {
        eprintln!("No log for {key}. Use `vitalog log` to record one.");
    }
    Ok(())
}

pub(crate) fn cmd_delete(db: &Database, date: Option<String>, json: bool) -> Result<()> {
    let key = date_key(parse_date(date)?);
    let existed = db.delete_log(&key)?;

    if json {
        println!("{}", serde_json::json!({ "date": key, "deleted": existed }));
    } else if existed {
        println!("Deleted log for {key}");
    } else {
        println!("No log for {key}, nothing to delete");
    }
    Ok(())
}

fn print_day(log: &DayLog) {
    let taken = query::supplement_taken_count(log);
    let total = query::supplement_total(log);
    let pct = query::completion_percent(taken, total);
    println!("{}", log.date);
    println!("  Supplements: {taken}/{total} ({pct}%)");
    for name in query::taken_supplements(log) {
        println!("    ✓ {name}");
    }
    let done = query::done_exercises(log);
    println!("  Exercises: {}/{}", done.len(), EXERCISES.len());
    for name in done {
        println!("    ✓ {name}");
    }
    if !log.custom_vitamin_name.trim().is_empty() && !log.custom_vitamin_taken {
        println!("  Custom ({}) not taken", log.custom_vitamin_name.trim());
    }
    if log.fasted || log.water_fasted {
        let kind = if log.water_fasted { "water fasted" } else { "fasted" };
        println!("  Fasting: {kind}");
    }

    let measurements = [
        ("Fasting sugar (mmol/L)", log.fasting_blood_sugar),
        ("Pre-dinner sugar (mmol/L)", log.pre_dinner_sugar),
        ("Post-dinner sugar (mmol/L)", log.post_dinner_sugar),
        ("Waist (cm)", log.waist_size),
        ("Weight (kg)", log.weight),
        ("Body fat (%)", log.fat_percentage),
        ("BP systolic (mmHg)", log.blood_pressure_systolic),
        ("BP diastolic (mmHg)", log.blood_pressure_diastolic),
        ("Grip left (kg)", log.grip_strength_left),
        ("Grip right (kg)", log.grip_strength_right),
    ];
    if measurements.iter().any(|(_, v)| v.is_some()) {
        println!("  Measurements:");
        for (label, value) in measurements {
            if let Some(v) = value {
                println!("    {label}: {v}");
            }
        }
    }
}
