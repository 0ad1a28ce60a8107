/// Operator input form for new sensor readings
use thiserror::Error;

use crate::models::{Metric, ReadingInput};

/// A form field that could not be turned into a finite number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be a number, got {value:?}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
}

/// Raw text of the five metric fields, exactly as the operator typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingForm {
    pub vibration: String,
    pub temperature: String,
    pub torque: String,
    pub current: String,
    pub noise: String,
}

impl ReadingForm {
    /// Fill the form from whitespace separated values in metric order.
    /// Missing trailing values leave their fields empty.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut form = ReadingForm::default();
        for (metric, value) in Metric::ALL.iter().zip(values) {
            *form.field_mut(*metric) = value.to_string();
        }
        form
    }

    pub fn field(&self, metric: Metric) -> &str {
        match metric {
            Metric::Vibration => &self.vibration,
            Metric::Temperature => &self.temperature,
            Metric::Torque => &self.torque,
            Metric::Current => &self.current,
            Metric::Noise => &self.noise,
        }
    }

    pub fn field_mut(&mut self, metric: Metric) -> &mut String {
        match metric {
            Metric::Vibration => &mut self.vibration,
            Metric::Temperature => &mut self.temperature,
            Metric::Torque => &mut self.torque,
            Metric::Current => &mut self.current,
            Metric::Noise => &mut self.noise,
        }
    }

    /// Parse every field, stopping at the first one that is not a finite number
    pub fn validate(&self) -> Result<ReadingInput, ValidationError> {
        Ok(ReadingInput {
            vibration: parse_metric(self, Metric::Vibration)?,
            temperature: parse_metric(self, Metric::Temperature)?,
            torque: parse_metric(self, Metric::Torque)?,
            current: parse_metric(self, Metric::Current)?,
            noise: parse_metric(self, Metric::Noise)?,
        })
    }

    pub fn reset(&mut self) {
        *self = ReadingForm::default();
    }
}

fn parse_metric(form: &ReadingForm, metric: Metric) -> Result<f64, ValidationError> {
    let raw = form.field(metric);
    // "inf" and "NaN" parse as f64 but are not usable metrics
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError {
            field: metric.field_name(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_numeric_fields() {
        let form = ReadingForm::from_values(["2.5", "60", "1", "4", " 55 "]);
        let input = form.validate().unwrap();
        assert_eq!(input.vibration, 2.5);
        assert_eq!(input.temperature, 60.0);
        assert_eq!(input.noise, 55.0);
    }

    #[test]
    fn rejects_empty_and_non_numeric_fields() {
        let form = ReadingForm::from_values(["2.5", "", "1", "4", "55"]);
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "temperature");

        let form = ReadingForm::from_values(["2.5", "60", "abc", "4", "55"]);
        assert_eq!(form.validate().unwrap_err().field, "torque");
    }

    #[test]
    fn rejects_non_finite_values() {
        let form = ReadingForm::from_values(["2.5", "60", "1", "inf", "55"]);
        assert_eq!(form.validate().unwrap_err().field, "current");

        let form = ReadingForm::from_values(["NaN", "60", "1", "4", "55"]);
        assert_eq!(form.validate().unwrap_err().field, "vibration");
    }

    #[test]
    fn missing_values_leave_fields_empty() {
        let form = ReadingForm::from_values(["1", "2"]);
        assert_eq!(form.torque, "");
        assert_eq!(form.validate().unwrap_err().field, "torque");
    }

    #[test]
    fn reset_clears_all_fields() {
        let mut form = ReadingForm::from_values(["1", "2", "3", "4", "5"]);
        form.reset();
        assert_eq!(form, ReadingForm::default());
    }
}
