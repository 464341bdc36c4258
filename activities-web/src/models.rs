use activities_core::dates::{format_day, parse_filter_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthCursor;

/// Filter sent to `GET /api/activities`. Absent fields are left off the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Query string of the list page.
///
/// `date`, `category` and `city` are the filter actually applied to the
/// fetch. `month` is the calendar cursor and `selected` the day picked in
/// the calendar; neither affects the fetch until the user applies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ListQuery {
    /// The filter to fetch with. Errors carry a message for the page.
    pub fn filter(&self) -> Result<ListFilter, String> {
        let date = match non_blank(&self.date) {
            Some(raw) => Some(parse_filter_date(raw).map_err(|e| e.to_string())?),
            None => None,
        };
        Ok(ListFilter {
            date,
            category: non_blank(&self.category).map(str::to_string),
            city: non_blank(&self.city).map(str::to_string),
        })
    }

    /// Day picked in the calendar; today when absent or unreadable.
    pub fn selected_day(&self, today: NaiveDate) -> NaiveDate {
        non_blank(&self.selected)
            .and_then(|raw| parse_filter_date(raw).ok())
            .unwrap_or(today)
    }

    /// Month shown by the calendar; the selected day's month by default.
    pub fn cursor(&self, today: NaiveDate) -> MonthCursor {
        non_blank(&self.month)
            .and_then(MonthCursor::parse)
            .unwrap_or_else(|| MonthCursor::containing(self.selected_day(today)))
    }

    pub fn with_month(&self, cursor: MonthCursor) -> Self {
        Self {
            month: Some(cursor.key()),
            ..self.clone()
        }
    }

    pub fn with_selected(&self, day: NaiveDate) -> Self {
        Self {
            selected: Some(format_day(&day)),
            ..self.clone()
        }
    }

    /// Apply the selected day as the date filter.
    pub fn applied(&self, today: NaiveDate) -> Self {
        let selected = self.selected_day(today);
        Self {
            date: Some(format_day(&selected)),
            selected: Some(format_day(&selected)),
            ..self.clone()
        }
    }

    /// `/` plus this query, for links and redirects.
    pub fn href(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("/?{query}"),
            _ => "/".to_string(),
        }
    }
}

/// Someone shown as attending an activity. Display-only placeholder data:
/// there is no attendee entity behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attendee {
    pub name: &'static str,
    pub is_host: bool,
    pub is_following: bool,
}

pub const PLACEHOLDER_ATTENDEES: [Attendee; 3] = [
    Attendee {
        name: "Bob",
        is_host: true,
        is_following: true,
    },
    Attendee {
        name: "Tom",
        is_host: false,
        is_following: true,
    },
    Attendee {
        name: "Sally",
        is_host: false,
        is_following: false,
    },
];

pub fn placeholder_host() -> &'static str {
    PLACEHOLDER_ATTENDEES
        .iter()
        .find(|a| a.is_host)
        .map_or("", |a| a.name)
}
