//! Piecewise linear interpolation over ordered reference points.
//!
//! Inputs outside the curve's domain clamp to the first or last value;
//! nothing is ever extrapolated.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("curve needs at least two points, got {0}")]
    TooShort(usize),

    #[error("curve xs and ys differ in length ({xs} vs {ys})")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("curve xs must be non-decreasing (index {0})")]
    NotSorted(usize),

    #[error("curve contains a non-finite value")]
    NonFinite,
}

/// Where `x` falls on an ordered sequence of breakpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Exactly at (or clamped to) breakpoint `index`.
    At(usize),
    /// Strictly between `lower` and `lower + 1`.
    Between { lower: usize, frac: f64 },
}

/// Locate `x` among `xs`, which must be non-empty and non-decreasing.
pub fn locate(xs: &[f64], x: f64) -> Position {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return Position::At(0);
    }
    if x >= xs[last] {
        return Position::At(last);
    }
    for i in 0..last {
        if x == xs[i] {
            return Position::At(i);
        }
        if x > xs[i] && x < xs[i + 1] {
            let frac = (x - xs[i]) / (xs[i + 1] - xs[i]);
            return Position::Between { lower: i, frac };
        }
    }
    Position::At(last)
}

/// Linear interpolation of `ys` over `xs` at `x`, clamped at both ends.
///
/// # Panics
/// If `xs` is empty or shorter than `ys`. Use [`ReferenceCurve`] for
/// checked construction.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    match locate(xs, x) {
        Position::At(i) => ys[i],
        Position::Between { lower, frac } => ys[lower] + frac * (ys[lower + 1] - ys[lower]),
    }
}

/// Two parallel sequences validated once, then evaluated many times.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl ReferenceCurve {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, CurveError> {
        validate_breakpoints(&xs)?;
        if xs.len() != ys.len() {
            return Err(CurveError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if ys.iter().any(|y| !y.is_finite()) {
            return Err(CurveError::NonFinite);
        }
        Ok(Self { xs, ys })
    }

    pub fn eval(&self, x: f64) -> f64 {
        interpolate(&self.xs, &self.ys, x)
    }

    /// The same points with the axes swapped. Only meaningful when `ys`
    /// is itself non-decreasing.
    pub fn inverted(&self) -> Result<ReferenceCurve, CurveError> {
        ReferenceCurve::new(self.ys.clone(), self.xs.clone())
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
}

/// Checks that `xs` has at least two finite, non-decreasing values.
pub fn validate_breakpoints(xs: &[f64]) -> Result<(), CurveError> {
    if xs.len() < 2 {
        return Err(CurveError::TooShort(xs.len()));
    }
    if xs.iter().any(|x| !x.is_finite()) {
        return Err(CurveError::NonFinite);
    }
    if let Some(i) = xs.windows(2).position(|w| w[1] < w[0]) {
        return Err(CurveError::NotSorted(i + 1));
    }
    Ok(())
}
