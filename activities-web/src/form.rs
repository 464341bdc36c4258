use activities_core::dates::{parse_datetime, DATETIME_FORMAT, FORM_DATETIME_FORMAT};
use activities_core::{Activity, ActivityInput};
use chrono::Timelike;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

pub const SAVE_FAILED: &str = "An error occurred. Please try again.";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a date.")]
    MissingDate,

    #[error("'{0}' is not a valid date and time.")]
    InvalidDate(String),
}

/// Raw create/edit form state. Field set mirrors an activity minus `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub venue: String,
}

impl ActivityForm {
    pub fn from_activity(activity: &Activity) -> Self {
        // Minutes only unless that would drop stored seconds
        let date_format = if activity.date.second() == 0 {
            FORM_DATETIME_FORMAT
        } else {
            DATETIME_FORMAT
        };
        Self {
            title: activity.title.clone(),
            description: activity.description.clone().unwrap_or_default(),
            category: activity.category.clone(),
            date: activity.date.format(date_format).to_string(),
            city: activity.city.clone(),
            venue: activity.venue.clone(),
        }
    }

    /// Request body for the API. `id` is set in edit mode.
    pub fn to_input(&self, id: Option<Uuid>) -> Result<ActivityInput, FormError> {
        let raw_date = self.date.trim();
        if raw_date.is_empty() {
            return Err(FormError::MissingDate);
        }
        let date = parse_datetime(raw_date).map_err(|_| FormError::InvalidDate(raw_date.to_string()))?;

        let description = Some(self.description.clone()).filter(|d| !d.trim().is_empty());

        Ok(ActivityInput {
            id,
            title: self.title.clone(),
            description,
            category: self.category.clone(),
            date,
            city: self.city.clone(),
            venue: self.venue.clone(),
        })
    }
}

/// Whether the form creates a new activity or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Add Activity",
            FormMode::Edit(_) => "Edit Activity",
        }
    }

    pub fn action(&self) -> String {
        match self {
            FormMode::Create => "/activities/new".to_string(),
            FormMode::Edit(id) => format!("/activities/{id}/edit"),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(*id),
        }
    }
}
