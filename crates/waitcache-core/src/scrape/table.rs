use std::sync::LazyLock;

use regex::Regex;

use crate::models::LiveRide;
use crate::utils::{decode_entities, js_parse_int, strip_tags};

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr(?:\s[^>]*)?>(.*?)</tr>").expect("Invalid table row regex"));

static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td(?:\s[^>]*)?>(.*?)</td>").expect("Invalid table cell regex"));

fn cell_text(html: &str) -> String {
    decode_entities(&strip_tags(html)).trim().to_string()
}

/// Parse the live wait-time table.
///
/// Columns are attraction, height requirement, (unused), wait. A wait that
/// does not parse counts as 0. Rows are returned shortest wait first.
pub fn parse_live_table(html: &str, is_completed: impl Fn(&str) -> bool) -> Vec<LiveRide> {
    let mut rides: Vec<LiveRide> = ROW_RE
        .captures_iter(html)
        .filter_map(|row| {
            let cells: Vec<String> = CELL_RE
                .captures_iter(row.get(1)?.as_str())
                .filter_map(|c| c.get(1).map(|m| cell_text(m.as_str())))
                .collect();

            let name = cells.first()?.clone();
            if name.is_empty() {
                return None;
            }

            let wait_time = cells
                .get(3)
                .and_then(|w| js_parse_int(w))
                .and_then(|w| u32::try_from(w).ok())
                .unwrap_or(0);

            Some(LiveRide {
                completed: is_completed(&name),
                height_req: cells.get(1).cloned().unwrap_or_default(),
                name,
                wait_time,
            })
        })
        .collect();

    rides.sort_by_key(|r| r.wait_time);
    rides
}
