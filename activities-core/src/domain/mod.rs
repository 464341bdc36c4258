pub mod dates;

use crate::common::error::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A stored activity. `id` is assigned by storage and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(with = "dates::wall_clock")]
    pub date: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub venue: String,
}

/// Request body for create and update.
///
/// Every field the client leaves out takes its default rather than the
/// stored value, so an update always overwrites the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(with = "dates::wall_clock")]
    pub date: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub venue: String,
}

impl ActivityInput {
    /// Build the stored record. Any `id` carried in the body is ignored.
    pub fn into_activity(self, id: Uuid) -> Activity {
        Activity {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            date: self.date,
            city: self.city,
            venue: self.venue,
        }
    }
}

impl Activity {
    pub fn to_input(&self) -> ActivityInput {
        ActivityInput {
            id: Some(self.id),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            date: self.date,
            city: self.city.clone(),
            venue: self.venue.clone(),
        }
    }

    /// Calendar day key, `YYYY-MM-DD`.
    pub fn day_key(&self) -> String {
        dates::day_key(&self.date)
    }
}

/// Conjunction of optional list predicates. `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub city: Option<String>,
}

impl ActivityFilter {
    /// Build a filter from raw query values. Blank values count as absent;
    /// a non-blank date that does not parse is an error.
    pub fn from_params(
        date: Option<&str>,
        category: Option<&str>,
        city: Option<&str>,
    ) -> Result<Self> {
        let date = match non_blank(date) {
            Some(raw) => Some(dates::parse_filter_date(raw)?),
            None => None,
        };

        Ok(Self {
            date,
            category: non_blank(category).map(str::to_string),
            city: non_blank(city).map(str::to_string),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.category.is_none() && self.city.is_none()
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        self.date.map_or(true, |day| activity.date.date() == day)
            && self
                .category
                .as_deref()
                .map_or(true, |category| activity.category == category)
            && self.city.as_deref().map_or(true, |city| activity.city == city)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
