use chrono::{Duration, NaiveTime};

use crate::models::{PlanItem, PlannerSettings, Timeline, TimelineEntry, TimelineKind};

fn add_minutes(time: NaiveTime, minutes: u32) -> NaiveTime {
    // Wraps past midnight.
    time.overflowing_add_signed(Duration::minutes(i64::from(minutes))).0
}

/// Lay the plan out back to back from the configured start time.
///
/// A ride takes its wait plus the ride duration; the wait is the item's
/// override, else `current_wait(name)`, else 0. A break takes its minutes.
pub fn build_timeline(
    plan: &[PlanItem],
    settings: &PlannerSettings,
    current_wait: impl Fn(&str) -> Option<u32>,
) -> Timeline {
    let mut clock = settings.start_time;
    let mut total_minutes = 0u32;
    let mut entries = Vec::with_capacity(plan.len());

    for (index, item) in plan.iter().enumerate() {
        let (kind, wait, wait_known, duration) = match item {
            PlanItem::Ride {
                name,
                wait_override,
            } => {
                let wait = wait_override.or_else(|| current_wait(name));
                let minutes = wait.unwrap_or(0);
                (
                    TimelineKind::Ride,
                    minutes,
                    wait.is_some(),
                    minutes.saturating_add(settings.ride_duration_minutes),
                )
            }
            PlanItem::Break { minutes, .. } => (TimelineKind::Break, 0, true, *minutes),
        };

        let end = add_minutes(clock, duration);
        entries.push(TimelineEntry {
            index,
            kind,
            label: item.label().to_string(),
            wait_minutes: wait,
            wait_known,
            duration_minutes: duration,
            start: clock,
            end,
        });

        clock = end;
        total_minutes = total_minutes.saturating_add(duration);
    }

    Timeline {
        start: settings.start_time,
        end: clock,
        total_minutes,
        entries,
    }
}
