//! Sequence statistics over historical forward-rate observations

use crate::error::{ModelError, Result};
use handlebank_core::{Object, Property};

/// Summary statistics for a series of N-dimensional rate observations:
/// per-component mean, variance, standard deviation, min and max, plus the
/// sample correlation matrix across components.
#[derive(Debug, Clone)]
pub struct HistoricalRatesAnalysis {
    samples: usize,
    size: usize,
    mean: Vec<f64>,
    variance: Vec<f64>,
    standard_deviation: Vec<f64>,
    min: Vec<f64>,
    max: Vec<f64>,
    correlation: Vec<Vec<f64>>,
    labels: Option<Vec<String>>,
    permanent: bool,
}

impl HistoricalRatesAnalysis {
    /// Each inner vector is one observation across all rates; every
    /// observation must have the same width and at least two observations
    /// are required.
    pub fn new(series: Vec<Vec<f64>>) -> Result<Self> {
        if series.is_empty() {
            return Err(ModelError::EmptySeries);
        }
        let size = series[0].len();
        if size == 0 {
            return Err(ModelError::EmptySeries);
        }
        for (index, row) in series.iter().enumerate() {
            if row.len() != size {
                return Err(ModelError::RaggedSeries {
                    index,
                    len: row.len(),
                    expected: size,
                });
            }
        }
        let samples = series.len();
        if samples < 2 {
            return Err(ModelError::InvalidParameter(
                "at least two observations are required".into(),
            ));
        }

        let n = samples as f64;
        let mut mean = vec![0.0; size];
        let mut min = vec![f64::INFINITY; size];
        let mut max = vec![f64::NEG_INFINITY; size];
        for row in &series {
            for (k, &value) in row.iter().enumerate() {
                mean[k] += value;
                min[k] = min[k].min(value);
                max[k] = max[k].max(value);
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        // Sample covariance (n - 1 denominator)
        let mut covariance = vec![vec![0.0; size]; size];
        for row in &series {
            for i in 0..size {
                let di = row[i] - mean[i];
                for j in 0..size {
                    covariance[i][j] += di * (row[j] - mean[j]);
                }
            }
        }
        for row in &mut covariance {
            for value in row.iter_mut() {
                *value /= n - 1.0;
            }
        }

        let variance: Vec<f64> = (0..size).map(|i| covariance[i][i]).collect();
        let standard_deviation: Vec<f64> = variance.iter().map(|v| v.sqrt()).collect();

        let correlation = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| {
                        if i == j {
                            1.0
                        } else {
                            let denom = standard_deviation[i] * standard_deviation[j];
                            if denom > 0.0 {
                                covariance[i][j] / denom
                            } else {
                                0.0
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            samples,
            size,
            mean,
            variance,
            standard_deviation,
            min,
            max,
            correlation,
            labels: None,
            permanent: false,
        })
    }

    /// Attach one label per rate component, in series order
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self> {
        if labels.len() != self.size {
            return Err(ModelError::InvalidParameter(format!(
                "{} labels for {} rates",
                labels.len(),
                self.size
            )));
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Mark the object as surviving ordinary garbage collection
    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn variance(&self) -> &[f64] {
        &self.variance
    }

    pub fn standard_deviation(&self) -> &[f64] {
        &self.standard_deviation
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    pub fn correlation(&self) -> &[Vec<f64>] {
        &self.correlation
    }
}

impl Object for HistoricalRatesAnalysis {
    fn class_name(&self) -> &'static str {
        "HistoricalRatesAnalysis"
    }

    fn properties(&self) -> Vec<Property> {
        let mut properties = vec![
            Property::new("samples", self.samples),
            Property::new("size", self.size),
        ];
        if let Some(labels) = &self.labels {
            properties.push(Property::new("labels", labels.join(",")));
        }
        properties
    }

    fn permanent(&self) -> bool {
        self.permanent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_statistics_values() {
        let analysis = HistoricalRatesAnalysis::new(vec![
            vec![1.0, 2.0],
            vec![2.0, 4.0],
            vec![3.0, 6.0],
        ])
        .unwrap();

        assert_eq!(analysis.samples(), 3);
        assert_eq!(analysis.size(), 2);
        assert!(close(analysis.mean()[0], 2.0));
        assert!(close(analysis.mean()[1], 4.0));
        assert!(close(analysis.variance()[0], 1.0));
        assert!(close(analysis.variance()[1], 4.0));
        assert!(close(analysis.standard_deviation()[1], 2.0));
        assert!(close(analysis.min()[0], 1.0));
        assert!(close(analysis.max()[1], 6.0));
    }

    #[test]
    fn test_perfectly_correlated_columns() {
        let analysis = HistoricalRatesAnalysis::new(vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
        ])
        .unwrap();

        let c = analysis.correlation();
        assert!(close(c[0][0], 1.0));
        assert!(close(c[0][1], 1.0));
        assert!(close(c[1][0], 1.0));
    }

    #[test]
    fn test_constant_column_has_zero_correlation() {
        let analysis = HistoricalRatesAnalysis::new(vec![
            vec![1.0, 5.0],
            vec![2.0, 5.0],
            vec![3.0, 5.0],
        ])
        .unwrap();

        let c = analysis.correlation();
        assert!(close(c[0][1], 0.0));
        assert!(close(c[1][1], 1.0));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            HistoricalRatesAnalysis::new(vec![]),
            Err(ModelError::EmptySeries)
        ));
        assert!(matches!(
            HistoricalRatesAnalysis::new(vec![vec![]]),
            Err(ModelError::EmptySeries)
        ));
        assert!(matches!(
            HistoricalRatesAnalysis::new(vec![vec![1.0, 2.0], vec![1.0]]),
            Err(ModelError::RaggedSeries {
                index: 1,
                len: 1,
                expected: 2
            })
        ));
        assert!(HistoricalRatesAnalysis::new(vec![vec![1.0]]).is_err());
    }

    #[test]
    fn test_labels() {
        let series = vec![vec![1.0, 2.0], vec![2.0, 4.0]];

        let analysis = HistoricalRatesAnalysis::new(series.clone()).unwrap();
        assert!(analysis.labels().is_none());

        let analysis = HistoricalRatesAnalysis::new(series.clone())
            .unwrap()
            .with_labels(vec!["3M".into(), "6M".into()])
            .unwrap();
        assert_eq!(analysis.labels(), Some(&["3M".to_string(), "6M".to_string()][..]));
        assert!(analysis.properties().iter().any(|p| p.name == "labels"));

        assert!(matches!(
            HistoricalRatesAnalysis::new(series)
                .unwrap()
                .with_labels(vec!["3M".into()]),
            Err(ModelError::InvalidParameter(_))
        ));
    }
}
