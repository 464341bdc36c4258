use activities_core::Activity;
use askama::Template;
use chrono::NaiveDate;

use crate::calendar::{month_grid, WEEKDAYS};
use crate::form::{ActivityForm, FormMode};
use crate::listing::DayGroup;
use crate::models::{placeholder_host, ListQuery, PLACEHOLDER_ATTENDEES};

/// One activity as the list and detail pages show it.
pub struct ActivityCard {
    pub title: String,
    pub category: String,
    pub city: String,
    pub venue: String,
    pub description: String,
    pub time: String,
    pub when: String,
    pub detail_href: String,
    pub edit_href: String,
    pub delete_action: String,
}

impl ActivityCard {
    pub fn new(activity: &Activity, query: &ListQuery) -> Self {
        let id = activity.id;
        // `href()` is "/" or "/?..."; the delete action keeps only the query part
        let list_href = query.href();
        let query_suffix = list_href.trim_start_matches('/');

        Self {
            title: activity.title.clone(),
            category: activity.category.clone(),
            city: activity.city.clone(),
            venue: activity.venue.clone(),
            description: activity.description.clone().unwrap_or_default(),
            time: activity.date.format("%H:%M").to_string(),
            when: activity.date.format("%A %-d %B %Y, %H:%M").to_string(),
            detail_href: format!("/activities/{id}"),
            edit_href: format!("/activities/{id}/edit"),
            delete_action: format!("/activities/{id}/delete{query_suffix}"),
        }
    }
}

pub struct DaySection {
    pub key: String,
    pub heading: String,
    pub cards: Vec<ActivityCard>,
}

impl DaySection {
    pub fn new(group: &DayGroup, query: &ListQuery) -> Self {
        Self {
            key: group.key.clone(),
            heading: group.day.format("%A %-d %B %Y").to_string(),
            cards: group
                .activities
                .iter()
                .map(|activity| ActivityCard::new(activity, query))
                .collect(),
        }
    }
}

pub struct CalendarDay {
    pub day: u32,
    pub href: String,
    pub class: String,
}

pub struct CalendarView {
    pub title: String,
    pub weekdays: Vec<&'static str>,
    pub weeks: Vec<Vec<CalendarDay>>,
    pub selected_label: String,
    pub prev_year_href: String,
    pub prev_month_href: String,
    pub next_month_href: String,
    pub next_year_href: String,
    pub apply_href: String,
    pub clear_href: String,
}

impl CalendarView {
    pub fn new(query: &ListQuery, today: NaiveDate) -> Self {
        let cursor = query.cursor(today);
        let selected = query.selected_day(today);

        let days: Vec<CalendarDay> = month_grid(cursor, today, selected)
            .into_iter()
            .map(|cell| {
                let mut class = vec!["day"];
                if !cell.in_month {
                    class.push("outside");
                }
                if cell.is_weekend {
                    class.push("weekend");
                }
                if cell.is_today {
                    class.push("today");
                }
                if cell.is_selected {
                    class.push("selected");
                }
                CalendarDay {
                    day: cell.day,
                    href: query.with_selected(cell.date).href(),
                    class: class.join(" "),
                }
            })
            .collect();

        let mut weeks = Vec::with_capacity(days.len() / 7);
        let mut days = days.into_iter().peekable();
        while days.peek().is_some() {
            weeks.push(days.by_ref().take(7).collect());
        }

        Self {
            title: cursor.title(),
            weekdays: WEEKDAYS.to_vec(),
            weeks,
            selected_label: selected.format("%-d %B %Y").to_string(),
            prev_year_href: query.with_month(cursor.shift_years(-1)).href(),
            prev_month_href: query.with_month(cursor.shift_months(-1)).href(),
            next_month_href: query.with_month(cursor.shift_months(1)).href(),
            next_year_href: query.with_month(cursor.shift_years(1)).href(),
            apply_href: query.applied(today).href(),
            clear_href: "/".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "activities.html")]
pub struct ActivitiesTemplate {
    pub sections: Vec<DaySection>,
    pub calendar: CalendarView,
    pub error: String,
    pub date: String,
    pub category: String,
    pub city: String,
    pub month: String,
    pub selected: String,
}

impl ActivitiesTemplate {
    pub fn new(
        query: &ListQuery,
        today: NaiveDate,
        groups: &[DayGroup],
        error: impl Into<String>,
    ) -> Self {
        Self {
            sections: groups
                .iter()
                .map(|group| DaySection::new(group, query))
                .collect(),
            calendar: CalendarView::new(query, today),
            error: error.into(),
            date: query.date.clone().unwrap_or_default(),
            category: query.category.clone().unwrap_or_default(),
            city: query.city.clone().unwrap_or_default(),
            month: query.month.clone().unwrap_or_default(),
            selected: query.selected.clone().unwrap_or_default(),
        }
    }
}

pub struct AttendeeView {
    pub name: &'static str,
    pub is_host: bool,
    pub is_following: bool,
}

#[derive(Template)]
#[template(path = "activity_detail.html")]
pub struct DetailTemplate {
    pub activity: ActivityCard,
    pub attendees: Vec<AttendeeView>,
    pub going_label: String,
    pub host_label: String,
}

impl DetailTemplate {
    pub fn new(activity: &Activity) -> Self {
        Self {
            activity: ActivityCard::new(activity, &ListQuery::default()),
            attendees: PLACEHOLDER_ATTENDEES
                .iter()
                .map(|a| AttendeeView {
                    name: a.name,
                    is_host: a.is_host,
                    is_following: a.is_following,
                })
                .collect(),
            going_label: format!("{} People Going", PLACEHOLDER_ATTENDEES.len()),
            host_label: format!("Hosted by {}", placeholder_host()),
        }
    }
}

#[derive(Template)]
#[template(path = "activity_form.html")]
pub struct FormTemplate {
    pub heading: &'static str,
    pub action: String,
    pub cancel_href: String,
    pub form: ActivityForm,
    pub error: String,
}

impl FormTemplate {
    pub fn new(mode: FormMode, form: ActivityForm, error: impl Into<String>) -> Self {
        let cancel_href = match mode.id() {
            Some(id) => format!("/activities/{id}"),
            None => "/".to_string(),
        };
        Self {
            heading: mode.heading(),
            action: mode.action(),
            cancel_href,
            form,
            error: error.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate {
    pub message: String,
}

impl MessageTemplate {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::group_by_day;
    use activities_core::dates::parse_datetime;
    use uuid::Uuid;

    fn activity(title: &str, date: &str) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: Some("Desc".to_string()),
            category: "culture".to_string(),
            date: parse_datetime(date).unwrap(),
            city: "Paris".to_string(),
            venue: "Louvre".to_string(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_view_has_six_weeks() {
        let view = CalendarView::new(&ListQuery::default(), day(2024, 6, 15));
        assert_eq!(view.title, "June 2024");
        assert_eq!(view.weeks.len(), 6);
        assert!(view.weeks.iter().all(|week| week.len() == 7));
        assert_eq!(view.weekdays.first(), Some(&"MON"));
        assert_eq!(view.prev_month_href, "/?month=2024-05");
        assert_eq!(view.next_year_href, "/?month=2025-06");
        assert_eq!(view.apply_href, "/?date=2024-06-15&selected=2024-06-15");
    }

    #[test]
    fn test_calendar_view_flags_today_and_selected() {
        let query = ListQuery::default().with_selected(day(2024, 6, 3));
        let view = CalendarView::new(&query, day(2024, 6, 15));
        let cells: Vec<&CalendarDay> = view.weeks.iter().flatten().collect();

        let today: Vec<_> = cells.iter().filter(|c| c.class.contains("today")).collect();
        let selected: Vec<_> = cells
            .iter()
            .filter(|c| c.class.contains("selected"))
            .collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day, 15);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].day, 3);
    }

    #[test]
    fn test_delete_action_keeps_list_query() {
        let query = ListQuery {
            city: Some("Paris".to_string()),
            ..Default::default()
        };
        let item = activity("Louvre visit", "2024-06-01T09:00");
        let card = ActivityCard::new(&item, &query);
        assert_eq!(
            card.delete_action,
            format!("/activities/{}/delete?city=Paris", item.id)
        );
        assert_eq!(card.time, "09:00");

        let plain = ActivityCard::new(&item, &ListQuery::default());
        assert_eq!(plain.delete_action, format!("/activities/{}/delete", item.id));
    }

    #[test]
    fn test_list_page_renders_groups_in_order() {
        let groups = group_by_day(vec![
            activity("Morning", "2024-06-01T09:00"),
            activity("Evening", "2024-06-01T18:00"),
            activity("Next day", "2024-06-02T08:00"),
        ]);
        let page = ActivitiesTemplate::new(&ListQuery::default(), day(2024, 6, 15), &groups, "");
        let html = page.render().unwrap();

        let next = html.find("Next day").unwrap();
        let evening = html.find("Evening").unwrap();
        let morning = html.find("Morning").unwrap();
        assert!(next < evening && evening < morning);
        assert!(html.contains("June 2024"));
    }

    #[test]
    fn test_detail_page_shows_placeholder_attendees() {
        let html = DetailTemplate::new(&activity("Louvre visit", "2024-06-01T09:00"))
            .render()
            .unwrap();
        assert!(html.contains("3 People Going"));
        assert!(html.contains("Hosted by Bob"));
        assert!(html.contains("Sally"));
    }

    #[test]
    fn test_form_page_keeps_submitted_values() {
        let form = ActivityForm {
            title: "Half filled".to_string(),
            ..Default::default()
        };
        let html = FormTemplate::new(FormMode::Create, form, crate::form::SAVE_FAILED)
            .render()
            .unwrap();
        assert!(html.contains("Add Activity"));
        assert!(html.contains("Half filled"));
        assert!(html.contains("An error occurred. Please try again."));
    }
}
