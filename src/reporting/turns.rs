//! Derivation of service turns from weekly opening hours.

use crate::models::restaurant::{parse_opening_hours, OpeningHours};

/// Weekday iteration order for turn derivation. Stable order keeps the
/// first-occurrence rules deterministic.
const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const DEFAULT_SHIFT_COVERS: i32 = 50;

/// A service turn derived from the weekly opening hours.
///
/// Turn names are unique within one derivation and the list is sorted
/// ascending by start hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub name: String,
    /// Inclusive hour the turn opens (floor of the decimal start)
    pub start_hour: u32,
    /// Exclusive hour bound (ceiling of the decimal end, may be 24)
    pub end_hour: u32,
    /// Covers limit for one day of service
    pub capacity: i32,
    /// Number of weekdays on which this turn is scheduled (1-7)
    pub days_active: u32,
}

impl Turn {
    /// Whether an hour-of-day falls inside this turn's `[start, end)` window
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

/// The schedule used when a restaurant has no parseable opening hours
pub fn fallback_turns() -> Vec<Turn> {
    vec![
        Turn {
            name: "Comida".to_string(),
            start_hour: 12,
            end_hour: 16,
            capacity: 50,
            days_active: 7,
        },
        Turn {
            name: "Cena".to_string(),
            start_hour: 19,
            end_hour: 23,
            capacity: 60,
            days_active: 7,
        },
    ]
}

/// Derive the turn list from a stored opening-hours document.
///
/// Absent or malformed configuration never fails; it resolves to
/// [`fallback_turns`].
pub fn extract_turns(opening_hours: Option<&serde_json::Value>) -> Vec<Turn> {
    let Some(value) = opening_hours else {
        return fallback_turns();
    };
    match parse_opening_hours(value) {
        Some(config) => turns_from_config(&config),
        None => fallback_turns(),
    }
}

/// Derive turns from an already-parsed weekly schedule.
///
/// Turns are keyed by shift name. The first occurrence of a name, in
/// weekday order, fixes the turn's hours and capacity; later occurrences
/// only count toward `days_active`.
pub fn turns_from_config(config: &OpeningHours) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();

    for weekday in WEEKDAYS {
        let Some(day) = lookup_day(config, weekday) else {
            continue;
        };
        if !day.enabled {
            continue;
        }
        // A turn counts at most one day per weekday, even if the name
        // appears on several shifts that day.
        let mut counted_today: Vec<&str> = Vec::new();
        for shift in &day.shifts {
            let (Some(name), Some(start), Some(end)) = (&shift.name, &shift.start, &shift.end)
            else {
                continue;
            };
            let (Some(start_dec), Some(end_dec)) = (parse_hhmm(start), parse_hhmm(end)) else {
                continue;
            };
            if let Some(turn) = turns.iter_mut().find(|t| t.name == *name) {
                if !counted_today.contains(&name.as_str()) {
                    turn.days_active += 1;
                }
            } else {
                turns.push(Turn {
                    name: name.clone(),
                    start_hour: start_dec.floor() as u32,
                    end_hour: end_dec.ceil() as u32,
                    capacity: shift.max_covers.unwrap_or(DEFAULT_SHIFT_COVERS),
                    days_active: 1,
                });
            }
            counted_today.push(name.as_str());
        }
    }

    if turns.is_empty() {
        return fallback_turns();
    }
    turns.sort_by_key(|t| t.start_hour);
    turns
}

fn lookup_day<'a>(
    config: &'a OpeningHours,
    weekday: &str,
) -> Option<&'a crate::models::restaurant::DaySchedule> {
    config
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(weekday))
        .map(|(_, day)| day)
}

/// Parse local wall-clock "HH:MM" into decimal hours
fn parse_hhmm(s: &str) -> Option<f64> {
    let (h, m) = s.split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(f64::from(h) + f64::from(m) / 60.0)
}
