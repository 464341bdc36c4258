use activities_core::Activity;
use chrono::NaiveDate;

/// Activities of one calendar day, in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub key: String,
    pub day: NaiveDate,
    pub activities: Vec<Activity>,
}

/// Most recent first. Stable, so equal dates keep their fetch order.
pub fn sort_newest_first(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by(|a, b| b.date.cmp(&a.date));
    activities
}

/// Sort newest first, then split into per-day groups keyed `YYYY-MM-DD`
/// from the activity's wall-clock date.
pub fn group_by_day(activities: Vec<Activity>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for activity in sort_newest_first(activities) {
        let day = activity.date.date();
        match groups.last_mut() {
            Some(group) if group.day == day => group.activities.push(activity),
            _ => groups.push(DayGroup {
                key: activity.day_key(),
                day,
                activities: vec![activity],
            }),
        }
    }

    groups
}
