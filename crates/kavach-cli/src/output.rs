use kavach_core::metrics::{Metric, MetricBand};
use kavach_core::proximity::Direction;
use kavach_core::DashboardSnapshot;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  "));

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

/// Human-readable dashboard dump. `warning_m` marks proximity readings
/// that are too close.
pub fn print_snapshot(s: &DashboardSnapshot, warning_m: f64) {
    println!(
        "tick {}  {}  subsystems {}/{} healthy",
        s.tick,
        s.time.format("%H:%M:%S"),
        s.healthy_subsystems(),
        s.subsystem_status.len()
    );
    println!();

    let rows = Direction::all()
        .iter()
        .map(|&d| {
            let v = s.proximity.get(d);
            let flag = if v < warning_m { "TOO CLOSE" } else { "" };
            vec![d.to_string(), format!("{v:.1} m"), flag.to_string()]
        })
        .collect();
    print_table(&["DIRECTION", "DISTANCE", ""], rows);
    println!();

    let rows = Metric::all()
        .iter()
        .map(|&m| {
            let v = s.safety_metrics.get(m);
            vec![
                m.to_string(),
                format!("{v:.1}%"),
                MetricBand::classify(v).as_str().to_string(),
            ]
        })
        .collect();
    print_table(&["METRIC", "VALUE", "BAND"], rows);
    println!();

    let rows = s
        .subsystem_status
        .iter()
        .map(|(name, status)| vec![name.to_string(), status.to_string()])
        .collect();
    print_table(&["SUBSYSTEM", "STATUS"], rows);
    println!();

    let rows = s
        .alerts
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.kind.to_string(),
                a.priority.to_string(),
                a.timestamp.format("%H:%M:%S").to_string(),
                a.message.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "TYPE", "PRIORITY", "TIME", "MESSAGE"], rows);
    println!();

    let rows = s
        .actions
        .iter()
        .map(|a| {
            vec![
                a.time.format("%H:%M:%S").to_string(),
                a.status.to_string(),
                a.action.clone(),
            ]
        })
        .collect();
    print_table(&["TIME", "STATUS", "ACTION"], rows);
    println!();

    let rows = s
        .maintenance_items
        .iter()
        .map(|m| {
            vec![
                m.component.clone(),
                m.status.to_string(),
                m.next_service.clone(),
            ]
        })
        .collect();
    print_table(&["COMPONENT", "STATUS", "NEXT SERVICE"], rows);
}
