use std::collections::BTreeMap;
use std::path::Path;

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::{Result, StoreError};
use crate::models::{DayLog, validate_date};

/// Date-keyed store for day logs: one row per calendar date.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS logs (
                    date TEXT PRIMARY KEY,
                    id TEXT NOT NULL,
                    supplements TEXT NOT NULL,
                    custom_vitamin_name TEXT NOT NULL DEFAULT '',
                    custom_vitamin_taken INTEGER NOT NULL DEFAULT 0,
                    exercises TEXT NOT NULL,
                    fasted INTEGER NOT NULL DEFAULT 0,
                    water_fasted INTEGER NOT NULL DEFAULT 0,
                    fasting_blood_sugar REAL,
                    pre_dinner_sugar REAL,
                    post_dinner_sugar REAL,
                    waist_size REAL,
                    weight REAL,
                    fat_percentage REAL,
                    blood_pressure_systolic REAL,
                    blood_pressure_diastolic REAL,
                    grip_strength_left REAL,
                    grip_strength_right REAL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    // Expects columns in table order (date..updated_at).
    fn log_from_row(row: &rusqlite::Row) -> rusqlite::Result<DayLog> {
        let supplements_json: String = row.get(2)?;
        let exercises_json: String = row.get(5)?;
        let supplements: BTreeMap<String, bool> =
            serde_json::from_str(&supplements_json).unwrap_or_default();
        let exercises: BTreeMap<String, bool> =
            serde_json::from_str(&exercises_json).unwrap_or_default();
        Ok(DayLog {
            date: row.get(0)?,
            id: row.get(1)?,
            supplements,
            custom_vitamin_name: row.get(3)?,
            custom_vitamin_taken: row.get(4)?,
            exercises,
            fasted: row.get(6)?,
            water_fasted: row.get(7)?,
            fasting_blood_sugar: row.get(8)?,
            pre_dinner_sugar: row.get(9)?,
            post_dinner_sugar: row.get(10)?,
            waist_size: row.get(11)?,
            weight: row.get(12)?,
            fat_percentage: row.get(13)?,
            blood_pressure_systolic: row.get(14)?,
            blood_pressure_diastolic: row.get(15)?,
            grip_strength_left: row.get(16)?,
            grip_strength_right: row.get(17)?,
        })
    }

    const SELECT_COLS: &'static str = "date, id, supplements, custom_vitamin_name,
        custom_vitamin_taken, exercises, fasted, water_fasted,
        fasting_blood_sugar, pre_dinner_sugar, post_dinner_sugar,
        waist_size, weight, fat_percentage,
        blood_pressure_systolic, blood_pressure_diastolic,
        grip_strength_left, grip_strength_right";

    /// Insert or replace the record at its date key. The write is a single
    /// statement, so a record is never half-committed. Idempotent.
    pub fn put_log(&self, log: &DayLog) -> Result<DayLog> {
        validate_date(&log.date)?;
        let mut log = log.clone();
        log.normalize();

        let supplements = serde_json::to_string(&log.supplements)
            .map_err(|e| StoreError::MalformedInput(e.to_string()))?;
        let exercises = serde_json::to_string(&log.exercises)
            .map_err(|e| StoreError::MalformedInput(e.to_string()))?;
        let now = Local::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO logs (date, id, supplements, custom_vitamin_name,
                custom_vitamin_taken, exercises, fasted, water_fasted,
                fasting_blood_sugar, pre_dinner_sugar, post_dinner_sugar,
                waist_size, weight, fat_percentage,
                blood_pressure_systolic, blood_pressure_diastolic,
                grip_strength_left, grip_strength_right, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                     ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?19)
             ON CONFLICT(date) DO UPDATE SET
                id = excluded.id,
                supplements = excluded.supplements,
                custom_vitamin_name = excluded.custom_vitamin_name,
                custom_vitamin_taken = excluded.custom_vitamin_taken,
                exercises = excluded.exercises,
                fasted = excluded.fasted,
                water_fasted = excluded.water_fasted,
                fasting_blood_sugar = excluded.fasting_blood_sugar,
                pre_dinner_sugar = excluded.pre_dinner_sugar,
                post_dinner_sugar = excluded.post_dinner_sugar,
                waist_size = excluded.waist_size,
                weight = excluded.weight,
                fat_percentage = excluded.fat_percentage,
                blood_pressure_systolic = excluded.blood_pressure_systolic,
                blood_pressure_diastolic = excluded.blood_pressure_diastolic,
                grip_strength_left = excluded.grip_strength_left,
                grip_strength_right = excluded.grip_strength_right,
                updated_at = excluded.updated_at",
            params![
                log.date,
                log.id,
                supplements,
                log.custom_vitamin_name,
                log.custom_vitamin_taken,
                exercises,
                log.fasted,
                log.water_fasted,
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
                now,
            ],
        )?;
        Ok(log)
    }

    /// Absence is not an error; callers substitute `DayLog::empty`.
    pub fn get_log(&self, date: &str) -> Result<Option<DayLog>> {
        let query = format!("SELECT {} FROM logs WHERE date = ?1", Self::SELECT_COLS);
        let log = self
            .conn
            .query_row(&query, params![date], Self::log_from_row)
            .optional()?;
        Ok(log.map(|mut l| {
            l.normalize();
            l
        }))
    }

    /// Returns whether a record existed. Deleting a missing date is a no-op.
    pub fn delete_log(&self, date: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM logs WHERE date = ?1", params![date])?;
        Ok(rows > 0)
    }

    /// Every stored record, in no guaranteed order.
    pub fn list_all(&self) -> Result<Vec<DayLog>> {
        let query = format!("SELECT {} FROM logs", Self::SELECT_COLS);
        let mut stmt = self.conn.prepare(&query)?;
        let logs = stmt
            .query_map([], Self::log_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logs
            .into_iter()
            .map(|mut l| {
                l.normalize();
                l
            })
            .collect())
    }

    pub fn clear_all(&self) -> Result<usize> {
        let rows = self.conn.execute("DELETE FROM logs", [])?;
        Ok(rows)
    }

    /// Remove every record with `from <= date <= to` in one statement, so
    /// the operation cannot leave a partial survivor set behind.
    pub fn clear_range(&self, from: &str, to: &str) -> Result<usize> {
        validate_date(from)?;
        validate_date(to)?;
        let rows = self.conn.execute(
            "DELETE FROM logs WHERE date BETWEEN ?1 AND ?2",
            params![from, to],
        )?;
        Ok(rows)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?;
        #[allow(clippy::cast_sign_loss)]
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SUPPLEMENTS;

    fn log_with(date: &str) -> DayLog {
        DayLog::empty(date)
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let db = Database::open_in_memory().unwrap();
        let mut log = log_with("2024-06-15");
        log.supplements.insert("nac".to_string(), true);
        log.weight = Some(80.5);
        log.fasted = true;

        db.put_log(&log).unwrap();
        let stored = db.get_log("2024-06-15").unwrap().unwrap();
        assert_eq!(stored.id, log.id);
        assert_eq!(stored.supplements.get("nac"), Some(&true));
        assert_eq!(stored.weight, Some(80.5));
        assert!(stored.fasted);
    }

    #[test]
    fn test_put_same_date_replaces() {
        let db = Database::open_in_memory().unwrap();
        let mut first = log_with("2024-06-15");
        first.weight = Some(80.0);
        db.put_log(&first).unwrap();

        let mut second = log_with("2024-06-15");
        second.weight = Some(79.0);
        db.put_log(&second).unwrap();

        let logs = db.list_all().unwrap();
        assert_eq!(logs.len(), 1);
        let stored = db.get_log("2024-06-15").unwrap().unwrap();
        assert_eq!(stored.weight, Some(79.0));
        assert_eq!(stored.id, second.id);
    }

    #[test]
    fn test_put_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let log = log_with("2024-06-15");
        let a = db.put_log(&log).unwrap();
        let b = db.put_log(&log).unwrap();
        assert_eq!(a, b);
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_put_rejects_bad_date() {
        let db = Database::open_in_memory().unwrap();
        let log = log_with("June 15");
        assert!(matches!(
            db.put_log(&log),
            Err(StoreError::InvalidDate(_))
        ));
        let log = log_with("");
        assert!(db.put_log(&log).is_err());
    }

    #[test]
    fn test_put_normalizes_checklists() {
        let db = Database::open_in_memory().unwrap();
        let mut log = log_with("2024-06-15");
        log.supplements.clear();
        log.supplements.insert("creatine".to_string(), true);
        db.put_log(&log).unwrap();

        let stored = db.get_log("2024-06-15").unwrap().unwrap();
        assert_eq!(stored.supplements.len(), SUPPLEMENTS.len());
        assert_eq!(stored.supplements.get("creatine"), Some(&true));
        assert_eq!(stored.supplements.get("magnesium"), Some(&false));
    }

    #[test]
    fn test_put_drops_non_finite_measurements() {
        let db = Database::open_in_memory().unwrap();
        let mut log = log_with("2024-06-15");
        log.weight = Some(f64::NAN);
        db.put_log(&log).unwrap();
        let stored = db.get_log("2024-06-15").unwrap().unwrap();
        assert!(stored.weight.is_none());
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_log("2024-06-15").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.delete_log("2024-06-15").unwrap());

        db.put_log(&log_with("2024-06-15")).unwrap();
        assert!(db.delete_log("2024-06-15").unwrap());
        assert!(db.get_log("2024-06-15").unwrap().is_none());
    }

    #[test]
    fn test_clear_all() {
        let db = Database::open_in_memory().unwrap();
        db.put_log(&log_with("2024-06-14")).unwrap();
        db.put_log(&log_with("2024-06-15")).unwrap();
        assert_eq!(db.clear_all().unwrap(), 2);
        assert!(db.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_clear_range_inclusive_bounds() {
        let db = Database::open_in_memory().unwrap();
        for date in [
            "2023-12-31",
            "2024-01-01",
            "2024-01-05",
            "2024-01-10",
            "2024-01-11",
        ] {
            db.put_log(&log_with(date)).unwrap();
        }

        let removed = db.clear_range("2024-01-01", "2024-01-10").unwrap();
        assert_eq!(removed, 3);

        let mut remaining: Vec<String> =
            db.list_all().unwrap().into_iter().map(|l| l.date).collect();
        remaining.sort();
        assert_eq!(remaining, vec!["2023-12-31", "2024-01-11"]);
    }

    #[test]
    fn test_clear_range_validates_bounds() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.clear_range("nope", "2024-01-10").is_err());
        assert!(db.clear_range("2024-01-01", "").is_err());
    }
}
