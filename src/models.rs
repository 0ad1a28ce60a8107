use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Classification assigned to a reading by the collection service.
///
/// Travels on the wire as the integer `0` (normal) or `1` (anomalous). The
/// service sometimes hands numbers back as floats, so `1.0` is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub enum Label {
    #[default]
    Normal,
    Anomaly,
}

impl TryFrom<f64> for Label {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Label::Normal)
        } else if value == 1.0 {
            Ok(Label::Anomaly)
        } else {
            Err(format!("label must be 0 or 1, got {}", value))
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        match label {
            Label::Normal => 0,
            Label::Anomaly => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Normal => write!(f, "Normal"),
            Label::Anomaly => write!(f, "Anomaly"),
        }
    }
}

/// One robotic-arm sensor sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub vibration: f64,
    pub temperature: f64, // °C
    pub torque: f64,
    pub current: f64, // A
    pub noise: f64,   // dB
    pub label: Label,
}

impl Reading {
    /// Build an unclassified reading from operator input
    pub fn from_input(id: String, input: ReadingInput) -> Self {
        Reading {
            id,
            vibration: input.vibration,
            temperature: input.temperature,
            torque: input.torque,
            current: input.current,
            noise: input.noise,
            label: Label::Normal,
        }
    }

    pub fn is_anomaly(&self) -> bool {
        self.label == Label::Anomaly
    }

    pub fn has_finite_metrics(&self) -> bool {
        Metric::ALL.iter().all(|m| m.value(self).is_finite())
    }
}

// Ids are opaque; some service versions return them as numbers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "id must be a string or number, got {}",
            other
        ))),
    }
}

/// The five validated metrics of a reading the operator wants to submit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingInput {
    pub vibration: f64,
    pub temperature: f64,
    pub torque: f64,
    pub current: f64,
    pub noise: f64,
}

/// The numeric metrics every reading carries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Vibration,
    Temperature,
    Torque,
    Current,
    Noise,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Vibration,
        Metric::Temperature,
        Metric::Torque,
        Metric::Current,
        Metric::Noise,
    ];

    pub fn value(&self, reading: &Reading) -> f64 {
        match self {
            Metric::Vibration => reading.vibration,
            Metric::Temperature => reading.temperature,
            Metric::Torque => reading.torque,
            Metric::Current => reading.current,
            Metric::Noise => reading.noise,
        }
    }

    /// Field name as used on the wire and in the operator form
    pub fn field_name(&self) -> &'static str {
        match self {
            Metric::Vibration => "vibration",
            Metric::Temperature => "temperature",
            Metric::Torque => "torque",
            Metric::Current => "current",
            Metric::Noise => "noise",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Vibration => "Vibration",
            Metric::Temperature => "Temperature",
            Metric::Torque => "Torque",
            Metric::Current => "Current",
            Metric::Noise => "Noise",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Current => "A",
            Metric::Noise => "dB",
            Metric::Vibration | Metric::Torque => "",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Metric::Vibration => "💥",
            Metric::Temperature => "🌡️",
            Metric::Torque => "⚙️",
            Metric::Current => "⚡",
            Metric::Noise => "🔊",
        }
    }
}

/// Synchronization status of the dashboard. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
    Submitting,
    Error(String),
}

impl SyncStatus {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SyncStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}
