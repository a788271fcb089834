//! Plain-text rendering of simulation snapshots.

use std::fmt::Write as _;

use textworld_core::snapshot::{PlayerView, SimulationSnapshot};

/// Width of a need gauge in characters.
const GAUGE_WIDTH: usize = 20;

/// Describe the player's surroundings.
pub fn render_look(player: &PlayerView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        player.location.as_deref().unwrap_or("Nowhere")
    );
    if let Some(description) = &player.description {
        let _ = writeln!(out, "{description}");
    }
    let exits = if player.exits.is_empty() {
        "none".to_owned()
    } else {
        player.exits.join(", ")
    };
    let _ = writeln!(out, "Exits: {exits}");
    if !player.nearby.is_empty() {
        let _ = writeln!(out, "Here: {}", player.nearby.join(", "));
    }
    out
}

/// Need gauges, one per line.
pub fn render_status(player: &PlayerView) -> String {
    let mut out = String::new();
    for need in &player.needs {
        let filled = gauge_cells(need.percentage);
        let _ = writeln!(
            out,
            "{:<8} [{}{}] {:>5.1}%",
            need.name,
            "#".repeat(filled),
            "-".repeat(GAUGE_WIDTH.saturating_sub(filled)),
            need.percentage
        );
    }
    out
}

/// Occupancy grid: `@` for the player's tile, a count where others are,
/// `.` for empty tiles.
pub fn render_map(snapshot: &SimulationSnapshot) -> String {
    let player_tile = snapshot.player.as_ref().and_then(|p| {
        snapshot
            .locations
            .iter()
            .find(|l| l.occupants.contains(&p.name))
            .map(|l| (l.x, l.y))
    });

    let mut out = String::new();
    for (y, row) in snapshot.occupancy.iter().enumerate() {
        for (x, count) in row.iter().enumerate() {
            if player_tile == Some((x, y)) {
                out.push('@');
            } else if *count == 0 {
                out.push('.');
            } else if *count < 10 {
                let _ = write!(out, "{count}");
            } else {
                out.push('+');
            }
        }
        out.push('\n');
    }
    out
}

/// Number of filled gauge cells for a percentage.
fn gauge_cells(percentage: f64) -> usize {
    let clamped = percentage.clamp(0.0, 100.0);
    (0..=GAUGE_WIDTH)
        .rev()
        .find(|cells| {
            let threshold = f64::from(u32::try_from(*cells).unwrap_or(u32::MAX)) * 100.0
                / f64::from(u32::try_from(GAUGE_WIDTH).unwrap_or(u32::MAX));
            clamped >= threshold
        })
        .unwrap_or(0)
}
