//! Upper-limit ("red zone") checks on equipment readings.

use serde::{Deserialize, Serialize};

use crate::types::{EquipmentRecord, Metric};

/// Optional per-metric maxima. `None` disables the check for that metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdSettings {
    pub max_flowrate: Option<f64>,
    pub max_pressure: Option<f64>,
    pub max_temperature: Option<f64>,
}

/// A reading that exceeded its configured limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalAlert {
    /// Position of the record in the dataset.
    pub record_index: usize,
    pub equipment_name: String,
    pub metric: Metric,
    pub value: f64,
    pub limit: f64,
}

impl ThresholdSettings {
    /// Configured limit for `metric`, if any.
    pub fn limit(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Flowrate => self.max_flowrate,
            Metric::Pressure => self.max_pressure,
            Metric::Temperature => self.max_temperature,
        }
    }

    /// Whether `record` has any reading strictly above its limit.
    pub fn is_exceeded_by(&self, record: &EquipmentRecord) -> bool {
        Metric::ALL
            .iter()
            .any(|&m| self.limit(m).is_some_and(|limit| record.metric(m) > limit))
    }

    /// Every reading strictly above its limit, in record order and then metric order.
    pub fn check(&self, records: &[EquipmentRecord]) -> Vec<CriticalAlert> {
        let mut alerts = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            for metric in Metric::ALL {
                let Some(limit) = self.limit(metric) else {
                    continue;
                };
                let value = record.metric(metric);
                if value > limit {
                    alerts.push(CriticalAlert {
                        record_index: idx,
                        equipment_name: record.name.clone(),
                        metric,
                        value,
                        limit,
                    });
                }
            }
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord::new("P-1", "Pump", 120.0, 5.0, 80.0),
            EquipmentRecord::new("V-1", "Valve", 40.0, 9.5, 200.0),
            EquipmentRecord::new("R-1", "Reactor", 100.0, 2.0, 150.0),
        ]
    }

    #[test]
    fn default_settings_never_alert() {
        let t = ThresholdSettings::default();
        assert!(t.check(&records()).is_empty());
        assert!(!t.is_exceeded_by(&records()[0]));
    }

    #[test]
    fn limits_are_strict_and_ordered() {
        let t = ThresholdSettings {
            max_flowrate: Some(100.0),
            max_pressure: None,
            max_temperature: Some(150.0),
        };
        let alerts = t.check(&records());
        let got: Vec<(usize, Metric)> = alerts.iter().map(|a| (a.record_index, a.metric)).collect();
        // R-1 sits exactly on both limits and is not flagged.
        assert_eq!(got, vec![(0, Metric::Flowrate), (1, Metric::Temperature)]);
        assert_eq!(alerts[1].equipment_name, "V-1");
        assert_eq!(alerts[1].limit, 150.0);
        assert!(t.is_exceeded_by(&records()[1]));
        assert!(!t.is_exceeded_by(&records()[2]));
    }

    #[test]
    fn settings_deserialize_from_camel_case() {
        let t: ThresholdSettings = serde_json::from_str(r#"{"maxPressure": 8.0}"#).unwrap();
        assert_eq!(t.limit(Metric::Pressure), Some(8.0));
        assert_eq!(t.limit(Metric::Flowrate), None);
    }
}
