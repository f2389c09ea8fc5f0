use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::catalog::{EXERCISES, SUPPLEMENTS};
use crate::errors::StoreError;

/// One calendar day's log. `date` is the primary key; at most one record
/// per date exists in the store. Field names are the JSON wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    #[serde(default)]
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub supplements: BTreeMap<String, bool>,
    #[serde(default)]
    pub custom_vitamin_name: String,
    #[serde(default)]
    pub custom_vitamin_taken: bool,
    #[serde(default)]
    pub exercises: BTreeMap<String, bool>,
    #[serde(default)]
    pub fasted: bool,
    #[serde(default)]
    pub water_fasted: bool,
    // Measurements: `None` means "not measured today", never zero.
    #[serde(default)]
    pub fasting_blood_sugar: Option<f64>,
    #[serde(default)]
    pub pre_dinner_sugar: Option<f64>,
    #[serde(default)]
    pub post_dinner_sugar: Option<f64>,
    #[serde(default)]
    pub waist_size: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub fat_percentage: Option<f64>,
    #[serde(default)]
    pub blood_pressure_systolic: Option<f64>,
    #[serde(default)]
    pub blood_pressure_diastolic: Option<f64>,
    #[serde(default)]
    pub grip_strength_left: Option<f64>,
    #[serde(default)]
    pub grip_strength_right: Option<f64>,
}

impl DayLog {
    /// Normalized empty skeleton for a date: fresh id, every catalog id
    /// present and false, no measurements.
    #[must_use]
    pub fn empty(date: &str) -> Self {
        let supplements = SUPPLEMENTS.iter().map(|s| (s.id.to_string(), false)).collect();
        let exercises = EXERCISES.iter().map(|e| (e.id.to_string(), false)).collect();
        DayLog {
            id: Uuid::new_v4().to_string(),
            date: date.to_string(),
            supplements,
            custom_vitamin_name: String::new(),
            custom_vitamin_taken: false,
            exercises,
            fasted: false,
            water_fasted: false,
            fasting_blood_sugar: None,
            pre_dinner_sugar: None,
            post_dinner_sugar: None,
            waist_size: None,
            weight: None,
            fat_percentage: None,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            grip_strength_left: None,
            grip_strength_right: None,
        }
    }

    /// Restore the invariants the store guarantees: a non-empty id, every
    /// catalog id present with a boolean, and measurements that are either
    /// finite or absent (non-finite values become absent, never NaN).
    pub fn normalize(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        for item in SUPPLEMENTS {
            self.supplements.entry(item.id.to_string()).or_insert(false);
        }
        for item in EXERCISES {
            self.exercises.entry(item.id.to_string()).or_insert(false);
        }
        for field in [
            &mut self.fasting_blood_sugar,
            &mut self.pre_dinner_sugar,
            &mut self.post_dinner_sugar,
            &mut self.waist_size,
            &mut self.weight,
            &mut self.fat_percentage,
            &mut self.blood_pressure_systolic,
            &mut self.blood_pressure_diastolic,
            &mut self.grip_strength_left,
            &mut self.grip_strength_right,
        ] {
            if field.is_some_and(|v| !v.is_finite()) {
                *field = None;
            }
        }
    }
}

/// Validate a store date key: non-empty and strictly `YYYY-MM-DD`.
pub fn validate_date(date: &str) -> Result<(), StoreError> {
    if date.is_empty() || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(StoreError::InvalidDate(date.to_string()));
    }
    Ok(())
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// A partial record, as supplied by JSON import. Only fields present in
/// the payload override; numeric fields use `Option<Option<f64>>` so an
/// explicit `null` clears a measurement while an absent key leaves it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub supplements: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub custom_vitamin_name: Option<String>,
    #[serde(default)]
    pub custom_vitamin_taken: Option<bool>,
    #[serde(default)]
    pub exercises: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub fasted: Option<bool>,
    #[serde(default)]
    pub water_fasted: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub fasting_blood_sugar: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub pre_dinner_sugar: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub post_dinner_sugar: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub waist_size: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub weight: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub fat_percentage: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub blood_pressure_systolic: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub blood_pressure_diastolic: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub grip_strength_left: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub grip_strength_right: Option<Option<f64>>,
}

impl LogPatch {
    /// Merge rule for import: start from the normalized skeleton for the
    /// date, overlay the existing stored record if any, then overlay this
    /// patch field-by-field. Checklist maps merge key-by-key, so keys the
    /// patch does not mention survive from the existing record. A patch
    /// without an id inherits the existing id, or the skeleton's fresh one.
    #[must_use]
    pub fn apply_to(self, date: &str, existing: Option<&DayLog>) -> DayLog {
        let mut log = match existing {
            Some(prior) => {
                let mut log = prior.clone();
                log.normalize();
                log
            }
            None => DayLog::empty(date),
        };
        log.date = date.to_string();

        if let Some(id) = self.id.filter(|id| !id.is_empty()) {
            log.id = id;
        }
        if let Some(map) = self.supplements {
            log.supplements.extend(map);
        }
        if let Some(map) = self.exercises {
            log.exercises.extend(map);
        }
        if let Some(name) = self.custom_vitamin_name {
            log.custom_vitamin_name = name;
        }
        if let Some(v) = self.custom_vitamin_taken {
            log.custom_vitamin_taken = v;
        }
        if let Some(v) = self.fasted {
            log.fasted = v;
        }
        if let Some(v) = self.water_fasted {
            log.water_fasted = v;
        }
        if let Some(v) = self.fasting_blood_sugar {
            log.fasting_blood_sugar = v;
        }
        if let Some(v) = self.pre_dinner_sugar {
            log.pre_dinner_sugar = v;
        }
        if let Some(v) = self.post_dinner_sugar {
            log.post_dinner_sugar = v;
        }
        if let Some(v) = self.waist_size {
            log.waist_size = v;
        }
        if let Some(v) = self.weight {
            log.weight = v;
        }
        if let Some(v) = self.fat_percentage {
            log.fat_percentage = v;
        }
        if let Some(v) = self.blood_pressure_systolic {
            log.blood_pressure_systolic = v;
        }
        if let Some(v) = self.blood_pressure_diastolic {
            log.blood_pressure_diastolic = v;
        }
        if let Some(v) = self.grip_strength_left {
            log.grip_strength_left = v;
        }
        if let Some(v) = self.grip_strength_right {
            log.grip_strength_right = v;
        }

        log.normalize();
        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EXERCISES, SUPPLEMENTS};

    #[test]
    fn test_empty_skeleton_covers_catalog() {
        let log = DayLog::empty("2024-01-05");
        assert_eq!(log.supplements.len(), SUPPLEMENTS.len());
        assert_eq!(log.exercises.len(), EXERCISES.len());
        assert!(log.supplements.values().all(|v| !v));
        assert!(log.exercises.values().all(|v| !v));
        assert!(!log.id.is_empty());
        assert!(log.weight.is_none());
    }

    #[test]
    fn test_normalize_fills_missing_catalog_ids() {
        let mut log = DayLog::empty("2024-01-05");
        log.supplements.clear();
        log.supplements.insert("magnesium".to_string(), true);
        log.normalize();
        assert_eq!(log.supplements.len(), SUPPLEMENTS.len());
        assert_eq!(log.supplements.get("magnesium"), Some(&true));
        assert_eq!(log.supplements.get("nac"), Some(&false));
    }

    #[test]
    fn test_normalize_coerces_non_finite_to_absent() {
        let mut log = DayLog::empty("2024-01-05");
        log.weight = Some(f64::NAN);
        log.waist_size = Some(f64::INFINITY);
        log.fat_percentage = Some(22.5);
        log.normalize();
        assert!(log.weight.is_none());
        assert!(log.waist_size.is_none());
        assert_eq!(log.fat_percentage, Some(22.5));
    }

    #[test]
    fn test_normalize_keeps_unknown_ids() {
        let mut log = DayLog::empty("2024-01-05");
        log.supplements.insert("retired_item".to_string(), true);
        log.normalize();
        assert_eq!(log.supplements.get("retired_item"), Some(&true));
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-05").is_ok());
        assert!(validate_date("").is_err());
        assert!(validate_date("05/01/2024").is_err());
        assert!(validate_date("2024-13-40").is_err());
    }

    #[test]
    fn test_patch_merges_checklists_key_by_key() {
        let first: LogPatch =
            serde_json::from_str(r#"{"date":"2024-01-05","supplements":{"nac":true}}"#).unwrap();
        let log = first.apply_to("2024-01-05", None);
        assert_eq!(log.supplements.get("nac"), Some(&true));

        let second: LogPatch =
            serde_json::from_str(r#"{"date":"2024-01-05","supplements":{"taurine":true}}"#)
                .unwrap();
        let merged = second.apply_to("2024-01-05", Some(&log));
        assert_eq!(merged.supplements.get("nac"), Some(&true));
        assert_eq!(merged.supplements.get("taurine"), Some(&true));
    }

    #[test]
    fn test_patch_without_id_inherits() {
        let patch: LogPatch = serde_json::from_str(r#"{"date":"2024-01-05"}"#).unwrap();
        let log = patch.apply_to("2024-01-05", None);
        assert!(!log.id.is_empty());

        let existing = log.clone();
        let patch: LogPatch =
            serde_json::from_str(r#"{"date":"2024-01-05","weight":81.2}"#).unwrap();
        let merged = patch.apply_to("2024-01-05", Some(&existing));
        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.weight, Some(81.2));
    }

    #[test]
    fn test_patch_explicit_null_clears_measurement() {
        let mut existing = DayLog::empty("2024-01-05");
        existing.weight = Some(80.0);
        existing.waist_size = Some(90.0);

        let patch: LogPatch =
            serde_json::from_str(r#"{"date":"2024-01-05","weight":null}"#).unwrap();
        let merged = patch.apply_to("2024-01-05", Some(&existing));
        assert!(merged.weight.is_none());
        // absent key leaves the existing value alone
        assert_eq!(merged.waist_size, Some(90.0));
    }

    #[test]
    fn test_day_log_json_round_trip() {
        let mut log = DayLog::empty("2024-06-15");
        log.supplements.insert("creatine".to_string(), true);
        log.custom_vitamin_name = "Zinc".to_string();
        log.custom_vitamin_taken = true;
        log.fasted = true;
        log.blood_pressure_systolic = Some(121.0);

        let text = serde_json::to_string(&log).unwrap();
        let back: DayLog = serde_json::from_str(&text).unwrap();
        assert_eq!(back, log);
    }
}
