use chrono::{NaiveDateTime, NaiveTime};

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Remove HTML tags and collapse runs of whitespace into single spaces.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the handful of HTML entities that show up in ride names.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let decoded = tail.find(';').and_then(|end| {
            let entity = &tail[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" | "#39" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, end))
        });

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Integer parsing with JavaScript `parseInt` semantics: leading whitespace
/// and sign are accepted, parsing stops at the first non-digit, and a
/// string with no leading digits yields `None`.
pub fn js_parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Rounding with JavaScript `Math.round` semantics (halves go toward +inf).
pub fn js_round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Parse a time-axis label into a time of day.
///
/// Accepts "8:45 AM", "8:45AM", "08:45", "8 PM", full timestamps such as
/// "2025-06-17 08:45:00", and labels with a trailing `<br>` annotation.
pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    let head = label.split("<br>").next().unwrap_or(label).trim();
    if head.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(head, fmt) {
            return Some(dt.time());
        }
    }

    let upper = head.to_ascii_uppercase();
    let (clock, pm) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => (h.trim().parse::<u32>().ok()?, m.trim().parse::<u32>().ok()?),
        None => (clock.trim().parse::<u32>().ok()?, 0),
    };

    let hour = match pm {
        Some(pm) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            hour % 12 + if pm { 12 } else { 0 }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Serde adapter storing a `NaiveTime` as "HH:MM".
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_label(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time of day: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<td class=\"x\"> Stardust <b>Racers</b>\n</td>"), "Stardust Racers");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Hiccup&#39;s Wing Gliders"), "Hiccup's Wing Gliders");
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&#x41;BC"), "ABC");
        assert_eq!(decode_entities("50 & up"), "50 & up");
        assert_eq!(decode_entities("&bogus; x"), "&bogus; x");
    }

    #[test]
    fn test_js_parse_int() {
        assert_eq!(js_parse_int("45"), Some(45));
        assert_eq!(js_parse_int("  45 min"), Some(45));
        assert_eq!(js_parse_int("12.9"), Some(12));
        assert_eq!(js_parse_int("-3"), Some(-3));
        assert_eq!(js_parse_int(""), None);
        assert_eq!(js_parse_int("Closed"), None);
    }

    #[test]
    fn test_js_round_halves_toward_positive() {
        assert_eq!(js_round(88.5), 89);
        assert_eq!(js_round(88.49), 88);
        assert_eq!(js_round(-2.5), -2);
        assert_eq!(js_round(-2.51), -3);
    }

    #[test]
    fn test_parse_time_label_variants() {
        assert_eq!(parse_time_label("8:45 AM"), Some(t(8, 45)));
        assert_eq!(parse_time_label("8:45am"), Some(t(8, 45)));
        assert_eq!(parse_time_label("12:15 PM"), Some(t(12, 15)));
        assert_eq!(parse_time_label("12:15 AM"), Some(t(0, 15)));
        assert_eq!(parse_time_label("9 PM"), Some(t(21, 0)));
        assert_eq!(parse_time_label("20:30"), Some(t(20, 30)));
        assert_eq!(parse_time_label("2025-06-17 08:45:00"), Some(t(8, 45)));
        assert_eq!(parse_time_label("10:00 AM<br>Sat"), Some(t(10, 0)));
    }

    #[test]
    fn test_parse_time_label_rejects_garbage() {
        assert_eq!(parse_time_label("Average"), None);
        assert_eq!(parse_time_label(""), None);
        assert_eq!(parse_time_label("13:00 PM"), None);
        assert_eq!(parse_time_label("25:00"), None);
    }
}
