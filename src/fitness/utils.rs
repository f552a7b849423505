//! Model helpers shared by the observation-based fitness functions

use nalgebra::{DMatrix, DVector};

use crate::error::GenomeError;

/// `x . coeff[..n] + coeff[n]` where `n = x.len()`
///
/// The intercept is the last coefficient.
pub fn linear_fit(coeff: &[f64], x: &[f64]) -> Result<f64, GenomeError> {
    if coeff.len() != x.len() + 1 {
        return Err(GenomeError::DimensionMismatch {
            expected: x.len() + 1,
            actual: coeff.len(),
        });
    }
    let (slopes, intercept) = coeff.split_at(x.len());
    Ok(slopes.iter().zip(x).map(|(c, xi)| c * xi).sum::<f64>() + intercept[0])
}

/// Single-variable polynomial, highest degree first
pub fn polynomial_fit(coeff: &[f64], x: &[f64]) -> Result<f64, GenomeError> {
    if x.len() != 1 {
        return Err(GenomeError::DimensionMismatch {
            expected: 1,
            actual: x.len(),
        });
    }
    Ok(coeff.iter().fold(0.0, |acc, c| acc * x[0] + c))
}

/// Squared residual of one observation
pub fn residual<F>(coeff: &[f64], x: &[f64], yi: f64, fit: F) -> Result<f64, GenomeError>
where
    F: Fn(&[f64], &[f64]) -> Result<f64, GenomeError>,
{
    Ok((yi - fit(coeff, x)?).powi(2))
}

/// Sum of squared residuals over every observation row
pub fn least_squares<F>(
    xs: &DMatrix<f64>,
    y: &DVector<f64>,
    coeff: &[f64],
    fit: F,
) -> Result<f64, GenomeError>
where
    F: Fn(&[f64], &[f64]) -> Result<f64, GenomeError>,
{
    if xs.nrows() != y.len() {
        return Err(GenomeError::DimensionMismatch {
            expected: xs.nrows(),
            actual: y.len(),
        });
    }

    let mut total = 0.0;
    for (row, yi) in xs.row_iter().zip(y.iter()) {
        let x: Vec<f64> = row.iter().copied().collect();
        total += residual(coeff, &x, *yi, &fit)?;
    }
    Ok(total)
}

/// Logistic model `1 / (1 + exp(-(alpha + coeff . x)))`
pub fn logit(alpha: f64, coeff: &[f64], x: &[f64]) -> Result<f64, GenomeError> {
    if coeff.len() != x.len() {
        return Err(GenomeError::DimensionMismatch {
            expected: x.len(),
            actual: coeff.len(),
        });
    }
    let kernel: f64 = coeff.iter().zip(x).map(|(b, xi)| b * xi).sum();
    Ok(1.0 / (1.0 + (-(alpha + kernel)).exp()))
}
