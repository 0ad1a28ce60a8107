/// Ordered in-memory set of the readings currently on display
use log::warn;
use std::collections::HashSet;

use crate::models::Reading;

#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    readings: Vec<Reading>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a freshly fetched one, keeping service order.
    /// The first occurrence of a duplicated id wins.
    pub fn replace_all(&mut self, readings: Vec<Reading>) {
        let mut seen = HashSet::with_capacity(readings.len());
        self.readings = readings
            .into_iter()
            .filter(|reading| {
                let fresh = seen.insert(reading.id.clone());
                if !fresh {
                    warn!("Dropping duplicate reading id {}", reading.id);
                }
                fresh
            })
            .collect();
    }

    /// Put a just-submitted reading at the front of the set
    pub fn prepend(&mut self, reading: Reading) {
        self.readings.retain(|existing| existing.id != reading.id);
        self.readings.insert(0, reading);
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }

    pub fn current(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
