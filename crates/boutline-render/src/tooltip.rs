use boutline_core::{Trajectory, TrajectoryPoint};

/// Hover text for one trajectory point, one line per field.
///
/// `Cumulative` is the boxer's real net record after the bout, not the shifted y coordinate.
pub fn point_tooltip(trajectory: &Trajectory, point: &TrajectoryPoint) -> String {
    let origin = trajectory.target_y - trajectory.record_at_reference as f64;
    let net = (point.y - origin).round() as i64;
    let sign = if net > 0 { "+" } else { "" };

    let mut lines = vec![trajectory.display_name.clone()];
    match point.source_fight.as_ref() {
        Some(fight) => {
            lines.push(format!(
                "Fight {}: vs {}",
                fight.sequence_number, fight.opponent
            ));
            lines.push(format!("Result: {}", fight.result));
            lines.push(format!(
                "Method: {}",
                fight.method.as_deref().unwrap_or("-")
            ));
            lines.push(format!(
                "Date: {}",
                fight
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string())
            ));
        }
        None => lines.push("No bout data".to_string()),
    }
    lines.push(format!("Cumulative: {sign}{net}"));
    lines.join("\n")
}
