// src/simulation/dataset.rs

use crate::simulation::metrics::{mean, SimulationResult};

/// Ordered rows of a Monte-Carlo batch, one per trial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<SimulationResult>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one trial's result.
    pub fn push(&mut self, row: SimulationResult) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[SimulationResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulationResult> {
        self.rows.iter()
    }

    /// Descriptive statistics for one numeric column.
    pub fn describe_column(
        &self,
        name: &'static str,
        column: impl Fn(&SimulationResult) -> f64,
    ) -> ColumnSummary {
        let values: Vec<f64> = self.rows.iter().map(column).collect();
        ColumnSummary::from_values(name, values)
    }

    /// Summary of the headline columns: wait, utilization, throughput and
    /// service level.
    pub fn describe(&self) -> Vec<ColumnSummary> {
        vec![
            self.describe_column("avg_wait_time", |r| r.avg_wait_time),
            self.describe_column("utilization", |r| r.utilization),
            self.describe_column("throughput", |r| r.throughput),
            self.describe_column("service_level", |r| r.service_level),
        ]
    }
}

impl FromIterator<SimulationResult> for Dataset {
    fn from_iter<I: IntoIterator<Item = SimulationResult>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SimulationResult;
    type IntoIter = std::slice::Iter<'a, SimulationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Count, mean, sample standard deviation, min, quartiles and max.
///
/// An empty column reports zero everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn from_values(name: &'static str, mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let count = values.len();
        let m = mean(&values);

        let std = if count > 1 {
            let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            name,
            count,
            mean: m,
            std,
            min: values.first().copied().unwrap_or(0.0),
            p25: quantile(&values, 0.25),
            p50: quantile(&values, 0.50),
            p75: quantile(&values, 0.75),
            max: values.last().copied().unwrap_or(0.0),
        }
    }
}

/// Linear-interpolated quantile of already sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::SimulationParameters;
    use crate::simulation::metrics::MetricsAggregator;

    fn row(served: u64) -> SimulationResult {
        let mut metrics = MetricsAggregator::new();
        for _ in 0..served {
            metrics.record_departure(1.0, 1.0);
        }
        let params = SimulationParameters::new(1.0, 1.0, 1, 5).with_simulation_time(10.0);
        metrics.summarize(&params)
    }

    #[test]
    fn append_only_in_order() {
        let mut dataset = Dataset::new();
        assert!(dataset.is_empty());

        dataset.push(row(1));
        dataset.push(row(2));
        dataset.push(row(3));

        assert_eq!(dataset.len(), 3);
        let served: Vec<u64> = dataset.iter().map(|r| r.customers_served).collect();
        assert_eq!(served, vec![1, 2, 3]);
    }

    #[test]
    fn summary_statistics() {
        let summary = ColumnSummary::from_values("x", vec![4.0, 1.0, 3.0, 2.0]);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert!((summary.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.p25, 1.75);
        assert_eq!(summary.p50, 2.5);
        assert_eq!(summary.p75, 3.25);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn empty_and_single_columns() {
        let empty = ColumnSummary::from_values("x", Vec::new());
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, 0.0);
        assert_eq!(empty.max, 0.0);

        let single = ColumnSummary::from_values("x", vec![7.0]);
        assert_eq!(single.std, 0.0);
        assert_eq!(single.p25, 7.0);
        assert_eq!(single.p75, 7.0);
    }

    #[test]
    fn describes_headline_columns() {
        let dataset: Dataset = (1..=4).map(row).collect();
        let summary = dataset.describe();

        let names: Vec<&str> = summary.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["avg_wait_time", "utilization", "throughput", "service_level"]
        );
        assert!(summary.iter().all(|c| c.count == 4));
        // Throughput is served / 10.
        assert!((summary[2].mean - 0.25).abs() < 1e-12);
    }
}
