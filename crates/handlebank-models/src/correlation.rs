//! Forward-rate correlation structures
//!
//! Each type builds its correlation matrix at construction time and is then
//! immutable, which is what lets the repository hand out shared references
//! freely.

use crate::error::{ModelError, Result};
use handlebank_core::{Object, Property};

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ModelError::InvalidParameter(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value < 0.0 || !value.is_finite() {
        return Err(ModelError::InvalidParameter(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_increasing(rate_times: &[f64]) -> Result<()> {
    if rate_times.is_empty() {
        return Err(ModelError::EmptyRateTimes);
    }
    for pair in rate_times.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ModelError::InvalidParameter(format!(
                "rate times must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

/// Correlation between forward rates i and j of the form
/// rho + (1 - rho) * exp(-beta * |i - j|), with a reduced-rank factor count.
#[derive(Debug, Clone)]
pub struct LinearExponentialCorrelation {
    size: usize,
    rho: f64,
    beta: f64,
    factors: usize,
    matrix: Vec<Vec<f64>>,
    permanent: bool,
}

impl LinearExponentialCorrelation {
    pub fn new(size: usize, rho: f64, beta: f64, factors: usize) -> Result<Self> {
        if size == 0 {
            return Err(ModelError::InvalidParameter("size must be positive".into()));
        }
        if !(-1.0..=1.0).contains(&rho) {
            return Err(ModelError::InvalidParameter(format!(
                "rho must lie in [-1, 1], got {}",
                rho
            )));
        }
        check_non_negative("beta", beta)?;
        if factors == 0 {
            return Err(ModelError::InvalidParameter(
                "factor count must be positive".into(),
            ));
        }
        if factors > size {
            return Err(ModelError::TooManyFactors { factors, size });
        }

        let matrix = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| {
                        let distance = i.abs_diff(j) as f64;
                        rho + (1.0 - rho) * (-beta * distance).exp()
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            size,
            rho,
            beta,
            factors,
            matrix,
            permanent: false,
        })
    }

    /// Mark the object as surviving ordinary garbage collection
    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn factors(&self) -> usize {
        self.factors
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }
}

impl Object for LinearExponentialCorrelation {
    fn class_name(&self) -> &'static str {
        "LinearExponentialCorrelation"
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::new("size", self.size),
            Property::new("rho", self.rho),
            Property::new("beta", self.beta),
            Property::new("factors", self.factors),
        ]
    }

    fn permanent(&self) -> bool {
        self.permanent
    }
}

/// Exponentially decaying correlation between forward rates with maturities
/// t_i: c(i, j) = L + (1 - L) * exp(-beta * |t_i^gamma - t_j^gamma|)
#[derive(Debug, Clone)]
pub struct ExponentialForwardCorrelation {
    rate_times: Vec<f64>,
    long_term_corr: f64,
    beta: f64,
    gamma: f64,
    times: Vec<f64>,
    matrix: Vec<Vec<f64>>,
    permanent: bool,
}

impl ExponentialForwardCorrelation {
    /// `times` are the evolution times; when empty they default to the rate
    /// times with the last one dropped.
    pub fn new(
        rate_times: Vec<f64>,
        long_term_corr: f64,
        beta: f64,
        gamma: f64,
        times: Vec<f64>,
    ) -> Result<Self> {
        check_increasing(&rate_times)?;
        if rate_times[0] <= 0.0 {
            return Err(ModelError::InvalidParameter(
                "rate times must be positive".into(),
            ));
        }
        check_unit_interval("long-term correlation", long_term_corr)?;
        check_non_negative("beta", beta)?;
        check_unit_interval("gamma", gamma)?;

        let times = if times.is_empty() {
            rate_times[..rate_times.len() - 1].to_vec()
        } else {
            check_increasing(&times)?;
            times
        };

        let n = rate_times.len();
        let matrix = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let di = rate_times[i].powf(gamma);
                        let dj = rate_times[j].powf(gamma);
                        long_term_corr
                            + (1.0 - long_term_corr) * (-beta * (di - dj).abs()).exp()
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            rate_times,
            long_term_corr,
            beta,
            gamma,
            times,
            matrix,
            permanent: false,
        })
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    pub fn size(&self) -> usize {
        self.rate_times.len()
    }

    pub fn rate_times(&self) -> &[f64] {
        &self.rate_times
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }
}

impl Object for ExponentialForwardCorrelation {
    fn class_name(&self) -> &'static str {
        "ExponentialForwardCorrelation"
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::new("size", self.rate_times.len()),
            Property::new("longTermCorr", self.long_term_corr),
            Property::new("beta", self.beta),
            Property::new("gamma", self.gamma),
        ]
    }

    fn permanent(&self) -> bool {
        self.permanent
    }
}

/// A user-supplied forward correlation matrix held fixed through time.
///
/// The matrix is square with dimension one less than the number of rate
/// times, matching one forward rate per accrual period.
#[derive(Debug, Clone)]
pub struct TimeHomogeneousForwardCorrelation {
    rate_times: Vec<f64>,
    matrix: Vec<Vec<f64>>,
    permanent: bool,
}

impl TimeHomogeneousForwardCorrelation {
    pub fn new(fwd_correlation: Vec<Vec<f64>>, rate_times: Vec<f64>) -> Result<Self> {
        check_increasing(&rate_times)?;
        let expected = rate_times.len() - 1;

        if fwd_correlation.len() != expected {
            return Err(ModelError::MatrixShape {
                rows: fwd_correlation.len(),
                cols: fwd_correlation.first().map_or(0, Vec::len),
                expected,
            });
        }
        for row in &fwd_correlation {
            if row.len() != expected {
                return Err(ModelError::MatrixShape {
                    rows: fwd_correlation.len(),
                    cols: row.len(),
                    expected,
                });
            }
        }

        Ok(Self {
            rate_times,
            matrix: fwd_correlation,
            permanent: false,
        })
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    pub fn size(&self) -> usize {
        self.matrix.len()
    }

    pub fn rate_times(&self) -> &[f64] {
        &self.rate_times
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }
}

impl Object for TimeHomogeneousForwardCorrelation {
    fn class_name(&self) -> &'static str {
        "TimeHomogeneousForwardCorrelation"
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::new("size", self.size()),
            Property::new("rateTimes", self.rate_times.len()),
        ]
    }

    fn permanent(&self) -> bool {
        self.permanent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_linear_exponential_matrix() {
        let model = LinearExponentialCorrelation::new(3, 0.5, 0.1, 2).unwrap();
        let m = model.matrix();

        // Unit diagonal
        for i in 0..3 {
            assert!(close(m[i][i], 1.0));
        }
        // Symmetric, decaying off the diagonal
        assert!(close(m[0][1], 0.5 + 0.5 * (-0.1f64).exp()));
        assert!(close(m[0][1], m[1][0]));
        assert!(m[0][2] < m[0][1]);
    }

    #[test]
    fn test_linear_exponential_validation() {
        assert!(matches!(
            LinearExponentialCorrelation::new(3, 0.5, 0.1, 4),
            Err(ModelError::TooManyFactors { factors: 4, size: 3 })
        ));
        assert!(LinearExponentialCorrelation::new(0, 0.5, 0.1, 1).is_err());
        assert!(LinearExponentialCorrelation::new(3, 1.5, 0.1, 1).is_err());
        assert!(LinearExponentialCorrelation::new(3, 0.5, -0.1, 1).is_err());
    }

    #[test]
    fn test_exponential_forward_matrix() {
        let model =
            ExponentialForwardCorrelation::new(vec![0.5, 1.0, 1.5], 0.2, 0.4, 1.0, vec![])
                .unwrap();

        let m = model.matrix();
        assert!(close(m[1][1], 1.0));
        assert!(close(m[0][1], 0.2 + 0.8 * (-0.4f64 * 0.5).exp()));
        assert!(close(m[0][2], 0.2 + 0.8 * (-0.4f64 * 1.0).exp()));

        // Evolution times default to rate times minus the last
        assert_eq!(model.times(), &[0.5, 1.0]);
    }

    #[test]
    fn test_exponential_forward_validation() {
        assert!(matches!(
            ExponentialForwardCorrelation::new(vec![], 0.2, 0.4, 1.0, vec![]),
            Err(ModelError::EmptyRateTimes)
        ));
        // Not increasing
        assert!(ExponentialForwardCorrelation::new(vec![1.0, 0.5], 0.2, 0.4, 1.0, vec![]).is_err());
        // Correlation outside [0, 1]
        assert!(ExponentialForwardCorrelation::new(vec![0.5, 1.0], 1.2, 0.4, 1.0, vec![]).is_err());
    }

    #[test]
    fn test_time_homogeneous_shape_checks() {
        let ok = TimeHomogeneousForwardCorrelation::new(
            vec![vec![1.0, 0.8], vec![0.8, 1.0]],
            vec![0.5, 1.0, 1.5],
        );
        assert!(ok.is_ok());
        assert_eq!(ok.unwrap().size(), 2);

        assert!(matches!(
            TimeHomogeneousForwardCorrelation::new(vec![vec![1.0]], vec![0.5, 1.0, 1.5]),
            Err(ModelError::MatrixShape { expected: 2, .. })
        ));
        assert!(matches!(
            TimeHomogeneousForwardCorrelation::new(vec![], vec![]),
            Err(ModelError::EmptyRateTimes)
        ));
    }

    #[test]
    fn test_permanent_flag() {
        let model = LinearExponentialCorrelation::new(2, 0.5, 0.1, 1)
            .unwrap()
            .permanent();
        assert!(Object::permanent(&model));
    }
}
