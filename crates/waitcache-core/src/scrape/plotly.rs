use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::ScrapeError;
use crate::models::{Ride, Snapshot, WaitPoint};
use crate::park::ParkProfile;
use crate::utils::js_parse_int;

/// x-axis label of the summary column the heat map appends to each row.
const AVERAGE_LABEL: &str = "Average";

static NEW_PLOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Plotly\.newPlot\([^,]+,\s*(\[.*?\]),\s*\{").expect("Invalid Plotly.newPlot regex")
});

/// First trace of the heat map: `x` time labels, `y` ride names, `z` one
/// row of waits per ride.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeatmapTrace {
    #[serde(default)]
    pub x: Vec<Value>,
    #[serde(default)]
    pub y: Vec<Value>,
    #[serde(default)]
    pub z: Vec<Value>,
}

/// Return the data-array literal passed to `Plotly.newPlot`.
pub fn extract_plot_data(plot_html: &str) -> Result<&str, ScrapeError> {
    NEW_PLOT_RE
        .captures(plot_html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ScrapeError::PlotNotFound)
}

/// Rewrite a JavaScript array/object literal as JSON.
///
/// Handles single-quoted strings, `NaN`/`undefined`/`Infinity`, bare
/// object keys and trailing commas. Anything else is copied through and
/// left for the JSON parser to reject.
pub fn js_to_json(literal: &str) -> String {
    let src = literal.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(src.len());
    let mut i = 0;

    while i < src.len() {
        let b = src[i];
        match b {
            b'"' => {
                out.push(b'"');
                i += 1;
                while i < src.len() {
                    let c = src[i];
                    out.push(c);
                    i += 1;
                    if c == b'\\' && i < src.len() {
                        out.push(src[i]);
                        i += 1;
                    } else if c == b'"' {
                        break;
                    }
                }
            }
            b'\'' => {
                out.push(b'"');
                i += 1;
                while i < src.len() {
                    let c = src[i];
                    i += 1;
                    match c {
                        b'\\' if i < src.len() => {
                            let next = src[i];
                            i += 1;
                            if next == b'\'' {
                                out.push(b'\'');
                            } else {
                                out.push(b'\\');
                                out.push(next);
                            }
                        }
                        b'\'' => break,
                        b'"' => out.extend_from_slice(b"\\\""),
                        _ => out.push(c),
                    }
                }
                out.push(b'"');
            }
            b',' => {
                let next = src[i + 1..].iter().find(|c| !c.is_ascii_whitespace());
                if !matches!(next, Some(b']') | Some(b'}')) {
                    out.push(b',');
                }
                i += 1;
            }
            b'-' if src.get(i + 1) == Some(&b'I') => {
                // -Infinity
                i += 1;
            }
            _ if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {
                let start = i;
                while i < src.len()
                    && (src[i].is_ascii_alphanumeric() || src[i] == b'_' || src[i] == b'$')
                {
                    i += 1;
                }
                let in_number = matches!(out.last(), Some(c) if c.is_ascii_digit() || *c == b'.');
                match &literal[start..i] {
                    // Exponent of a number literal such as `1e1` or `2.5E-1`.
                    word if in_number => out.extend_from_slice(word.as_bytes()),
                    "NaN" | "undefined" | "Infinity" => out.extend_from_slice(b"null"),
                    word @ ("true" | "false" | "null") => out.extend_from_slice(word.as_bytes()),
                    word => {
                        out.push(b'"');
                        out.extend_from_slice(word.as_bytes());
                        out.push(b'"');
                    }
                }
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // Only ASCII was inserted and multi-byte sequences were copied whole.
    String::from_utf8_lossy(&out).into_owned()
}

/// Extract and parse the first heat-map trace from the `plot1` HTML.
pub fn parse_heatmap(plot_html: &str) -> Result<HeatmapTrace, ScrapeError> {
    let literal = extract_plot_data(plot_html)?;

    let traces: Vec<HeatmapTrace> = match serde_json::from_str(literal) {
        Ok(traces) => traces,
        Err(_) => serde_json::from_str(&js_to_json(literal))
            .map_err(|e| ScrapeError::InvalidPlotData(e.to_string()))?,
    };

    let trace = traces.into_iter().next().ok_or(ScrapeError::EmptyPlot)?;
    debug!(rides = trace.y.len(), time_points = trace.x.len(), "Extracted heat-map trace");
    Ok(trace)
}

fn label_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Wait minutes from a heat-map cell; blanks and non-numbers are `None`.
fn wait_of(value: &Value) -> Option<u32> {
    let minutes = match value {
        Value::String(s) => js_parse_int(s)?,
        Value::Number(n) => {
            let f = n.as_f64()?;
            if !f.is_finite() {
                return None;
            }
            f.trunc() as i64
        }
        _ => return None,
    };
    u32::try_from(minutes).ok()
}

/// Turn a heat-map trace into a snapshot: one ride per `y` entry, one
/// point per `x` label except the trailing "Average" column.
pub fn build_snapshot(trace: &HeatmapTrace, date: NaiveDate, park: &ParkProfile) -> Snapshot {
    let labels: Vec<String> = trace.x.iter().map(label_of).collect();
    let empty = Vec::new();

    let rides = trace
        .y
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = label_of(name);
            let row = trace.z.get(i).and_then(Value::as_array).unwrap_or(&empty);

            let points = labels
                .iter()
                .enumerate()
                .filter(|(_, label)| label.as_str() != AVERAGE_LABEL)
                .map(|(j, label)| WaitPoint::new(label.clone(), row.get(j).and_then(wait_of)))
                .collect();

            let land = park.land_for(&name).to_string();
            Ride::from_series(name, land, points)
        })
        .collect();

    Snapshot {
        date,
        park: park.name.to_string(),
        rides,
    }
}
