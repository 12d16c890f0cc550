//! Summary statistics over equipment records.

use std::collections::BTreeMap;

use crate::types::{EquipmentRecord, Metric, MetricStats, Summary};

/// Compute [`MetricStats`] for `values`.
///
/// - `avg` is the arithmetic mean.
/// - `std_dev` is the population standard deviation (divisor `N`).
/// - An empty slice yields all zeros.
pub fn metric_stats(values: &[f64]) -> MetricStats {
    if values.is_empty() {
        return MetricStats::default();
    }

    let n = values.len() as f64;
    let (sum, min, max) = values.iter().fold(
        (0.0_f64, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, min, max), &v| (sum + v, min.min(v), max.max(v)),
    );
    let avg = sum / n;
    let sq_dev = values.iter().fold(0.0_f64, |acc, &v| acc + (v - avg).powi(2));

    MetricStats {
        avg,
        min,
        max,
        std_dev: (sq_dev / n).sqrt(),
    }
}

/// Stats of one metric across `records`.
pub fn metric_stats_for(records: &[EquipmentRecord], metric: Metric) -> MetricStats {
    let values: Vec<f64> = records.iter().map(|r| r.metric(metric)).collect();
    metric_stats(&values)
}

/// Count records per category label, verbatim.
pub fn type_distribution(records: &[EquipmentRecord]) -> BTreeMap<String, usize> {
    records.iter().fold(BTreeMap::new(), |mut acc, r| {
        *acc.entry(r.category.clone()).or_insert(0) += 1;
        acc
    })
}

/// Compute the full [`Summary`] of `records`. Pure and total: never fails, including for an
/// empty slice.
pub fn summarize(records: &[EquipmentRecord]) -> Summary {
    Summary {
        total_count: records.len(),
        flowrate: metric_stats_for(records, Metric::Flowrate),
        pressure: metric_stats_for(records, Metric::Pressure),
        temperature: metric_stats_for(records, Metric::Temperature),
        type_distribution: type_distribution(records),
    }
}
