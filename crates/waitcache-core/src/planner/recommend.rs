use crate::models::Ride;

/// Number of suggestions shown in the "next best rides" panel.
pub const DEFAULT_NEXT_RIDES: usize = 3;

/// Open rides not yet completed, shortest current wait first.
pub fn next_best_rides<'a>(
    rides: &'a [Ride],
    is_completed: impl Fn(&str) -> bool,
    limit: usize,
) -> Vec<&'a Ride> {
    let mut candidates: Vec<&Ride> = rides
        .iter()
        .filter(|r| r.is_open() && !is_completed(&r.name))
        .collect();

    candidates.sort_by_key(|r| r.wait_time);
    candidates.truncate(limit);
    candidates
}
