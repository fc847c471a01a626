use crate::action_type::ActionType;
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerSubmission {
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSubmission {
    pub organization: String,
    pub action_type: ActionType,
    pub location: String,
    /// ISO-8601 date, e.g. `2025-03-01`.
    pub start_date: String,
    pub duration_days: u32,
    pub description: String,
    pub demands: Option<String>,
    pub contact_info: Option<String>,
    pub learn_more_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// A new labor action reported from the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeReport {
    pub employer: EmployerSubmission,
    pub action: ActionSubmission,
}

/// A position sighting for an action that is already known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    pub action_id: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldReport {
    Strike(StrikeReport),
    Location(LocationReport),
}

impl FieldReport {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldReport::Strike(_) => "strike",
            FieldReport::Location(_) => "location",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            FieldReport::Strike(report) => validate_strike(report),
            FieldReport::Location(report) => validate_location(report),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    Ok(())
}

fn validate_strike(report: &StrikeReport) -> Result<(), String> {
    require("Employer name", &report.employer.name)?;
    require("Organization", &report.action.organization)?;
    require("Location", &report.action.location)?;
    require("Start date", &report.action.start_date)?;
    require("Description", &report.action.description)?;

    if report.action.duration_days == 0 {
        return Err("Duration must be at least one day".to_string());
    }
    if report.action.description.len() > 5000 {
        return Err("Description cannot exceed 5000 characters".to_string());
    }
    for url in [&report.employer.website, &report.action.learn_more_url]
        .into_iter()
        .flatten()
    {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err("URL must start with http:// or https://".to_string());
        }
    }
    if let Some(c) = report.action.coordinates {
        Coordinates::validate(c.lat, c.lng).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn validate_location(report: &LocationReport) -> Result<(), String> {
    require("Action id", &report.action_id)?;
    Coordinates::validate(report.coordinates.lat, report.coordinates.lng)
        .map_err(|e| e.to_string())?;
    if let Some(notes) = &report.notes {
        if notes.len() > 1000 {
            return Err("Notes cannot exceed 1000 characters".to_string());
        }
    }
    Ok(())
}

/// Provider acknowledgement of a submitted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportReceipt {
    pub id: String,
    pub message: String,
}

/// A currently active labor action, as listed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAction {
    pub id: Arc<str>,
    pub employer_id: Arc<str>,
    pub employer_name: Arc<str>,
    pub action_type: ActionType,
    pub organization: Option<Arc<str>>,
    pub location: Option<Arc<str>>,
    pub start_date: Option<Arc<str>>,
    pub end_date: Option<Arc<str>>,
    pub description: Option<Arc<str>>,
}

impl ActiveAction {
    pub fn display_name(&self) -> String {
        match &self.organization {
            Some(org) => format!("{} - {}", self.employer_name, org),
            None => format!("{} - {}", self.employer_name, self.action_type.display_name()),
        }
    }
}
