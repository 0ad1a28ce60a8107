/// Utility functions for aggregation and formatting
use time::{format_description, OffsetDateTime};
use uuid::Uuid;

use crate::models::{Metric, Reading};

/// Render the last successful sync time for the dashboard header
///
/// Shown as DD.MM.YYYY - HH:MM:SS; an unformattable time prints in the
/// `time` crate's own representation instead.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    match format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]") {
        Ok(format) => dt.format(&format).unwrap_or_else(|_| dt.to_string()),
        Err(_) => dt.to_string(),
    }
}

/// Format a value as fixed-point with exactly two decimals
///
/// Rounds half away from zero and never produces "-0.00".
pub fn format_two_decimals(value: f64) -> String {
    // past 1e15 an f64 has no fractional digits left to round, and
    // scaling by 100 could overflow to infinity
    if value.abs() >= 1e15 {
        return format!("{:.2}", value);
    }
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2}", rounded)
}

/// Generate an id for a locally created reading
pub fn new_reading_id() -> String {
    Uuid::new_v4().to_string()
}

/// Average and maximum of one metric over a reading set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub metric: Metric,
    pub average: f64,
    pub max: f64,
}

impl MetricSummary {
    pub fn average_display(&self) -> String {
        format_two_decimals(self.average)
    }

    pub fn max_display(&self) -> String {
        format_two_decimals(self.max)
    }
}

/// Aggregates over the whole current reading set
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSummary {
    pub metrics: [MetricSummary; 5],
    pub anomaly_count: usize,
    pub samples: usize,
}

impl ReadingSummary {
    pub fn metric(&self, metric: Metric) -> &MetricSummary {
        // laid out in Metric::ALL order, which matches the discriminants
        &self.metrics[metric as usize]
    }

    pub fn average(&self, metric: Metric) -> String {
        self.metric(metric).average_display()
    }

    pub fn max(&self, metric: Metric) -> String {
        self.metric(metric).max_display()
    }
}

/// Calculate per-metric averages, maxima and the anomaly count
///
/// Single pass over the readings. Averages accumulate `value / n` so sets of
/// very large readings cannot overflow. An empty set yields zero for every
/// statistic instead of dividing by zero.
///
/// # Arguments
/// * `readings` - The current reading set, in any order
///
/// # Returns
/// ReadingSummary with one MetricSummary per metric in display order
pub fn calculate_summary(readings: &[Reading]) -> ReadingSummary {
    let count = readings.len();
    let mut means = [0.0_f64; 5];
    let mut maxima = [f64::NEG_INFINITY; 5];
    let mut anomaly_count = 0;

    for reading in readings {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            let value = metric.value(reading);
            means[i] += value / count as f64;
            maxima[i] = maxima[i].max(value);
        }
        if reading.is_anomaly() {
            anomaly_count += 1;
        }
    }

    let metrics = std::array::from_fn(|i| {
        let metric = Metric::ALL[i];
        if count == 0 {
            MetricSummary {
                metric,
                average: 0.0,
                max: 0.0,
            }
        } else {
            MetricSummary {
                metric,
                average: means[i],
                max: maxima[i],
            }
        }
    });

    ReadingSummary {
        metrics,
        anomaly_count,
        samples: count,
    }
}
