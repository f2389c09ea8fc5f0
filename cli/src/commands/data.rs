use std::path::Path;

use anyhow::{Context, Result, bail};

use vitalog_core::db::Database;
use vitalog_core::export::{export_csv, export_json, import_json};
use vitalog_core::models::validate_date;

pub(crate) fn cmd_export(db: &Database, format: &str, out: Option<&Path>) -> Result<()> {
    let text = match format {
        "json" => export_json(db)?,
        "csv" => export_csv(db)?,
        _ => bail!("Unknown format '{format}'. Use 'json' or 'csv'"),
    };

    match out {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} record(s) to {}", db.count()?, path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub(crate) fn cmd_import(db: &Database, file: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let summary = import_json(db, &text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Imported {} record(s), skipped {}",
            summary.imported, summary.skipped
        );
    }
    Ok(())
}

pub(crate) fn cmd_clear(
    db: &Database,
    all: bool,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    let removed = if all {
        db.clear_all()?
    } else {
        let (Some(from), Some(to)) = (from, to) else {
            bail!("Use --all, or both --from and --to");
        };
        validate_date(from)?;
        validate_date(to)?;
        if from > to {
            bail!("--from ({from}) must not be after --to ({to})");
        }
        db.clear_range(from, to)?
    };

    if json {
        println!("{}", serde_json::json!({ "removed": removed }));
    } else {
        println!("Removed {removed} record(s)");
    }
    Ok(())
}
