/// Text rendering of the dashboard: status banner, summary cards, reading table
use crate::models::{Metric, Reading, SyncStatus};
use crate::sync::DashboardView;
use crate::utils::{format_datetime, format_two_decimals, ReadingSummary};

pub const NO_DATA: &str = "No data available.";

fn with_unit(value: String, unit: &str) -> String {
    if unit.is_empty() {
        value
    } else {
        format!("{} {}", value, unit)
    }
}

/// One line per metric card, in display order
pub fn render_summary(summary: &ReadingSummary) -> Vec<String> {
    Metric::ALL
        .iter()
        .map(|metric| {
            let stats = summary.metric(*metric);
            let headline = format!("{} {} (Avg)", metric.icon(), metric.title());
            // vibration is the card that reports anomalies
            let detail = match metric {
                Metric::Vibration => format!("{} anomalies", summary.anomaly_count),
                _ => format!("Max: {}", with_unit(stats.max_display(), metric.unit())),
            };
            format!(
                "{}: {} | {}",
                headline,
                with_unit(stats.average_display(), metric.unit()),
                detail
            )
        })
        .collect()
}

pub fn render_row(reading: &Reading) -> String {
    let metrics: Vec<String> = Metric::ALL
        .iter()
        .map(|m| format!("{}={}", m.field_name(), format_two_decimals(m.value(reading))))
        .collect();
    format!("{} {} {}", reading.id, metrics.join(" "), reading.label)
}

pub fn render_status(status: &SyncStatus) -> Option<String> {
    match status {
        SyncStatus::Idle => None,
        SyncStatus::Loading => Some("Loading sensor data...".to_string()),
        SyncStatus::Submitting => Some("Submitting reading...".to_string()),
        SyncStatus::Error(message) => Some(format!("Error: {}", message)),
    }
}

/// Full dashboard as lines of text
pub fn render(view: &DashboardView) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(banner) = render_status(&view.status) {
        lines.push(banner);
    }
    if let Some(synced) = &view.last_synced {
        lines.push(format!("Last updated: {}", format_datetime(synced)));
    }

    if view.readings.is_empty() {
        lines.push(NO_DATA.to_string());
        return lines;
    }

    lines.push("Summary".to_string());
    lines.extend(render_summary(&view.summary));
    lines.push(format!("Sensor Data Table ({} readings)", view.readings.len()));
    lines.extend(view.readings.iter().map(render_row));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Label, ReadingInput};
    use crate::utils::calculate_summary;

    fn sample() -> Vec<Reading> {
        let mut anomalous = Reading::from_input(
            "s2".to_string(),
            ReadingInput {
                vibration: 3.0,
                temperature: 70.0,
                torque: 4.0,
                current: 5.0,
                noise: 60.0,
            },
        );
        anomalous.label = Label::Anomaly;
        vec![
            Reading::from_input(
                "s1".to_string(),
                ReadingInput {
                    vibration: 1.0,
                    temperature: 50.0,
                    torque: 2.0,
                    current: 3.0,
                    noise: 40.0,
                },
            ),
            anomalous,
        ]
    }

    #[test]
    fn cards_show_units_and_anomalies() {
        let lines = render_summary(&calculate_summary(&sample()));
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "💥 Vibration (Avg): 2.00 | 1 anomalies");
        assert_eq!(lines[1], "🌡️ Temperature (Avg): 60.00 °C | Max: 70.00 °C");
        assert_eq!(lines[2], "⚙️ Torque (Avg): 3.00 | Max: 4.00");
        assert_eq!(lines[4], "🔊 Noise (Avg): 50.00 dB | Max: 60.00 dB");
    }

    #[test]
    fn rows_label_anomalies() {
        let rows: Vec<String> = sample().iter().map(render_row).collect();
        assert!(rows[0].ends_with("Normal"));
        assert!(rows[1].starts_with("s2 vibration=3.00"));
        assert!(rows[1].ends_with("Anomaly"));
    }

    #[test]
    fn empty_view_renders_no_data_and_error_banner() {
        let view = DashboardView {
            readings: Vec::new(),
            status: SyncStatus::Error("HTTP error! status: 500".to_string()),
            summary: calculate_summary(&[]),
            last_synced: None,
        };
        let lines = render(&view);
        assert_eq!(lines, ["Error: HTTP error! status: 500", NO_DATA]);
    }
}
