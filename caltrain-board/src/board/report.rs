//! Plain-text departure board rendering.
//!
//! A pure projection of the reconciled directory. Times are shown in the
//! viewer's local wall clock; lateness comes from each train's own
//! aimed/expected pair.

use crate::domain::{Direction, Station, Train, to_local};

use super::directory::StationDirectory;

/// Indent for train and placeholder lines.
const INDENT: &str = "    ";

/// Render the whole directory, optionally restricted to stations whose
/// display name contains `name_filter`.
pub fn render(directory: &StationDirectory, name_filter: Option<&str>) -> String {
    let blocks: Vec<String> = directory
        .iter()
        .filter(|station| name_filter.is_none_or(|needle| station.name().contains(needle)))
        .map(render_station)
        .collect();
    blocks.join("\n")
}

/// Render one station's two boards.
pub fn render_station(station: &Station) -> String {
    let mut lines = vec![format!("{}:", station.name())];

    lines.push("Northbound Trains:".to_string());
    push_direction(&mut lines, station.trains(Direction::Northbound));

    lines.push("Southbound Trains:".to_string());
    push_direction(&mut lines, station.trains(Direction::Southbound));

    lines.join("\n")
}

fn push_direction(lines: &mut Vec<String>, trains: &[Train]) {
    if trains.is_empty() {
        lines.push(format!("{INDENT}No upcoming trains."));
        return;
    }

    let mut ordered: Vec<&Train> = trains.iter().collect();
    // Stable sort: equal aimed times keep feed order
    ordered.sort_by_key(|train| train.aimed_departure);

    for train in ordered {
        lines.push(format!("{INDENT}{}", render_train(train)));
    }
}

/// One train line: fixed-width id, local 12-hour expected time, lateness.
/// With no live estimate there is nothing to show but the placeholder.
fn render_train(train: &Train) -> String {
    match (train.expected_departure, train.minutes_late()) {
        (Some(expected), Some(minutes_late)) => {
            let time = to_local(expected).format("%I:%M%p").to_string();
            let annotation = if minutes_late > 0 {
                format!("({minutes_late} minutes late)")
            } else {
                "(On time)".to_string()
            };
            format!("{:<5}{:<10} {}", train.id, time, annotation)
        }
        _ => "?".to_string(),
    }
}
