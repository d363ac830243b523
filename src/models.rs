use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Coarse bleeding volume recorded with a logged period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowIntensity {
    Spotting,
    Light,
    Medium,
    Heavy,
}

impl FlowIntensity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spotting => "spotting",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }
}

impl fmt::Display for FlowIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown flow intensity '{0}'")]
pub struct UnknownFlowIntensity(pub String);

impl FromStr for FlowIntensity {
    type Err = UnknownFlowIntensity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spotting" => Ok(Self::Spotting),
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "heavy" => Ok(Self::Heavy),
            other => Err(UnknownFlowIntensity(other.to_string())),
        }
    }
}

/// One logged menstrual period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub flow_intensity: FlowIntensity,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCycleEntry {
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub flow_intensity: FlowIntensity,
    pub notes: Option<String>,
}

impl NewCycleEntry {
    pub fn validate(&self) -> Result<(), String> {
        match self.end_date {
            Some(end) if end < self.start_date => {
                Err(format!("end_date {end} is before start_date {}", self.start_date))
            }
            _ => Ok(()),
        }
    }

    pub fn into_entry(self, id: Uuid, created_at: DateTime<Utc>) -> CycleEntry {
        CycleEntry {
            id,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            flow_intensity: self.flow_intensity,
            notes: self.notes,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub symptom_type: String,
    pub intensity: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSymptom {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub symptom_type: String,
    pub intensity: i32,
    pub notes: Option<String>,
}

impl NewSymptom {
    pub fn validate(&self) -> Result<(), String> {
        if self.symptom_type.trim().is_empty() {
            return Err("symptom_type must not be blank".into());
        }
        if !(1..=10).contains(&self.intensity) {
            return Err(format!("intensity {} is outside 1-10", self.intensity));
        }
        Ok(())
    }

    pub fn into_log(self, id: Uuid, created_at: DateTime<Utc>) -> SymptomLog {
        SymptomLog {
            id,
            user_id: self.user_id,
            date: self.date,
            symptom_type: self.symptom_type.trim().to_string(),
            intensity: self.intensity,
            notes: self.notes,
            created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteSymptomRequest {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub symptom_type: String,
}

#[derive(Debug, Serialize)]
pub struct SymptomsByDate {
    pub date: NaiveDate,
    pub symptoms: Vec<String>,
}
