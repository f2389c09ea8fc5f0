use anyhow::Result;
use tabled::{Table, Tabled, settings::Style};

use vitalog_core::catalog::{EXERCISES, SUPPLEMENTS};

pub(crate) fn cmd_catalog(json: bool) -> Result<()> {
    if json {
        let supplements: Vec<serde_json::Value> = SUPPLEMENTS
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "name": s.name,
                    "time": s.time.map(|t| t.label()),
                })
            })
            .collect();
        let exercises: Vec<serde_json::Value> = EXERCISES
            .iter()
            .map(|e| serde_json::json!({ "id": e.id, "name": e.name }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "supplements": supplements,
                "exercises": exercises,
            }))?
        );
        return Ok(());
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "Id")]
        id: &'static str,
        #[tabled(rename = "Name")]
        name: &'static str,
        #[tabled(rename = "Time")]
        time: &'static str,
    }

    let supplements: Vec<ItemRow> = SUPPLEMENTS
        .iter()
        .map(|s| ItemRow {
            id: s.id,
            name: s.name,
            time: s.time.map_or("", |t| t.label()),
        })
        .collect();
    println!("Supplements:");
    println!("{}", Table::new(&supplements).with(Style::rounded()));

    let exercises: Vec<ItemRow> = EXERCISES
        .iter()
        .map(|e| ItemRow {
            id: e.id,
            name: e.name,
            time: "",
        })
        .collect();
    println!("\nExercises:");
    println!("{}", Table::new(&exercises).with(Style::rounded()));

    Ok(())
}
