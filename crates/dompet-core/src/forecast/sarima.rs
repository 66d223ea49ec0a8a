//! Seasonal ARIMA (p,d,q)(P,D,Q,s)
//!
//! The model is written in backshift notation as
//!
//! ```text
//! φ(B) Φ(B^s) (1-B)^d (1-B^s)^D y_t = θ(B) Θ(B^s) e_t
//! ```
//!
//! Coefficients are estimated by conditional sum of squares: residuals
//! are computed recursively on the differenced series, starting once
//! enough autoregressive history exists, with earlier innovations taken
//! as zero. Each coefficient is kept inside (-1, 1) by optimising over
//! `atanh` of its value.

use serde::Serialize;
use tracing::debug;

use super::optimize::{nelder_mead, SimplexOptions};
use super::Predictor;
use crate::error::{Error, Result};

/// Non-seasonal order (p, d, q)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Order {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

/// Seasonal order (P, D, Q) with period s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonalOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub period: usize,
}

impl SeasonalOrder {
    pub fn none() -> Self {
        Self {
            p: 0,
            d: 0,
            q: 0,
            period: 0,
        }
    }

    fn is_active(&self) -> bool {
        self.p + self.d + self.q > 0
    }
}

/// Estimated coefficients, grouped by polynomial
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coefficients {
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub seasonal_ar: Vec<f64>,
    pub seasonal_ma: Vec<f64>,
}

impl Coefficients {
    fn from_params(params: &[f64], order: &Order, seasonal: &SeasonalOrder) -> Self {
        let mut it = params.iter().copied();
        let mut take = |n: usize| -> Vec<f64> { it.by_ref().take(n).collect() };
        Self {
            ar: take(order.p),
            ma: take(order.q),
            seasonal_ar: take(seasonal.p),
            seasonal_ma: take(seasonal.q),
        }
    }
}

#[derive(Debug, Clone)]
struct Fitted {
    coefficients: Coefficients,
    /// Full AR side: φ(B)Φ(B^s), leading 1
    ar_poly: Vec<f64>,
    /// Full MA side: θ(B)Θ(B^s), leading 1
    ma_poly: Vec<f64>,
    history: Vec<f64>,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Sarima {
    order: Order,
    seasonal: SeasonalOrder,
    fitted: Option<Fitted>,
}

impl Sarima {
    pub fn new(order: Order, seasonal: SeasonalOrder) -> Result<Self> {
        if seasonal.is_active() && seasonal.period < 2 {
            return Err(Error::Forecast(format!(
                "seasonal period must be at least 2, got {}",
                seasonal.period
            )));
        }
        Ok(Self {
            order,
            seasonal,
            fitted: None,
        })
    }

    /// Shortest series that leaves at least one residual after differencing
    pub fn min_observations(&self) -> usize {
        self.differencing_lag() + self.ar_lag() + 1
    }

    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.fitted.as_ref().map(|f| &f.coefficients)
    }

    fn differencing_lag(&self) -> usize {
        self.order.d + self.seasonal.d * self.seasonal.period
    }

    fn ar_lag(&self) -> usize {
        self.order.p + self.seasonal.p * self.seasonal.period
    }

    fn n_params(&self) -> usize {
        self.order.p + self.order.q + self.seasonal.p + self.seasonal.q
    }

    fn differencing_poly(&self) -> Vec<f64> {
        let mut poly = vec![1.0];
        for _ in 0..self.order.d {
            poly = poly_mul(&poly, &[1.0, -1.0]);
        }
        for _ in 0..self.seasonal.d {
            poly = poly_mul(&poly, &seasonal_poly(&[-1.0], self.seasonal.period));
        }
        poly
    }

    fn lag_polys(&self, coefficients: &Coefficients) -> (Vec<f64>, Vec<f64>) {
        let negated = |c: &[f64]| c.iter().map(|v| -v).collect::<Vec<_>>();

        let ar = poly_mul(
            &seasonal_poly(&negated(&coefficients.ar), 1),
            &seasonal_poly(&negated(&coefficients.seasonal_ar), self.seasonal.period),
        );
        let ma = poly_mul(
            &seasonal_poly(&coefficients.ma, 1),
            &seasonal_poly(&coefficients.seasonal_ma, self.seasonal.period),
        );
        (ar, ma)
    }
}

impl Predictor for Sarima {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        let required = self.min_observations();
        if data.len() < required {
            return Err(Error::InsufficientData {
                required,
                actual: data.len(),
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(Error::Forecast("series contains non-finite values".into()));
        }

        let differenced = apply_difference(data, &self.differencing_poly());
        let start = self.ar_lag();

        let objective = |u: &[f64]| -> f64 {
            let params: Vec<f64> = u.iter().map(|x| x.tanh()).collect();
            let coefficients = Coefficients::from_params(&params, &self.order, &self.seasonal);
            let (ar, ma) = self.lag_polys(&coefficients);
            let residuals = css_residuals(&differenced, &ar, &ma, start);
            let score = mean_square(&residuals[start..]);
            if score.is_finite() {
                score
            } else {
                f64::INFINITY
            }
        };

        let minimum = nelder_mead(
            objective,
            &vec![0.0; self.n_params()],
            SimplexOptions::default(),
        );
        let params: Vec<f64> = minimum.point.iter().map(|x| x.tanh()).collect();
        let coefficients = Coefficients::from_params(&params, &self.order, &self.seasonal);
        let (ar_poly, ma_poly) = self.lag_polys(&coefficients);
        let residuals = css_residuals(&differenced, &ar_poly, &ma_poly, start);

        debug!(
            observations = data.len(),
            iterations = minimum.iterations,
            sigma2 = minimum.value,
            ?coefficients,
            "SARIMA fitted"
        );

        self.fitted = Some(Fitted {
            coefficients,
            ar_poly,
            ma_poly,
            history: data.to_vec(),
            differenced,
            residuals,
        });
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| Error::Forecast("model has not been fitted".into()))?;

        let mut w = fitted.differenced.clone();
        let mut e = fitted.residuals.clone();
        for _ in 0..steps {
            let t = w.len();
            let mut next = 0.0;
            for (k, a) in fitted.ar_poly.iter().enumerate().skip(1) {
                if k <= t {
                    next -= a * w[t - k];
                }
            }
            for (k, b) in fitted.ma_poly.iter().enumerate().skip(1) {
                if k <= t {
                    next += b * e[t - k];
                }
            }
            w.push(next);
            e.push(0.0);
        }

        let future = &w[fitted.differenced.len()..];
        let forecast = integrate(&fitted.history, future, &self.differencing_poly());

        if forecast.iter().any(|v| !v.is_finite()) {
            return Err(Error::Forecast("forecast produced non-finite values".into()));
        }
        Ok(forecast)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// `1 + c_1 B^s + c_2 B^2s + ...`
fn seasonal_poly(coefficients: &[f64], period: usize) -> Vec<f64> {
    let mut poly = vec![0.0; coefficients.len() * period + 1];
    poly[0] = 1.0;
    for (j, c) in coefficients.iter().enumerate() {
        poly[(j + 1) * period] = *c;
    }
    poly
}

/// Apply a differencing polynomial; output is shorter by its degree
fn apply_difference(data: &[f64], poly: &[f64]) -> Vec<f64> {
    let lag = poly.len() - 1;
    (lag..data.len())
        .map(|t| poly.iter().enumerate().map(|(k, c)| c * data[t - k]).sum())
        .collect()
}

/// Undo [`apply_difference`] for values following `history`
fn integrate(history: &[f64], future: &[f64], poly: &[f64]) -> Vec<f64> {
    let mut y = history.to_vec();
    for w in future {
        let t = y.len();
        let mut next = *w;
        for (k, c) in poly.iter().enumerate().skip(1) {
            next -= c * y[t - k];
        }
        y.push(next);
    }
    y.split_off(history.len())
}

/// e_t = Σ a_k w_{t-k} - Σ_{k≥1} b_k e_{t-k}, with e_t = 0 before `start`
fn css_residuals(w: &[f64], ar: &[f64], ma: &[f64], start: usize) -> Vec<f64> {
    let mut e = vec![0.0; w.len()];
    for t in start..w.len() {
        let mut value = 0.0;
        for (k, a) in ar.iter().enumerate() {
            if k <= t {
                value += a * w[t - k];
            }
        }
        for (k, b) in ma.iter().enumerate().skip(1) {
            if k <= t {
                value -= b * e[t - k];
            }
        }
        e[t] = value;
    }
    e
}

fn mean_square(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64
}
