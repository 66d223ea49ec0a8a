//! Daily spending forecast
//!
//! Spending points are summed per day, gaps filled with zero, and a weekly
//! seasonal ARIMA(1,1,1)(1,1,1,7) is fitted on the result. The forecast
//! covers the days right after the last observed date. Daily amounts are
//! clamped at zero; the reported total is the sum of the unclamped forecast.

pub mod optimize;
pub mod sarima;
pub mod series;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::currency::format_rupiah;
use crate::error::{Error, Result};
use crate::models::SpendingPoint;

pub use sarima::{Order, Sarima, SeasonalOrder};
pub use series::DailySeries;

/// A time-series model that is fitted once, then asked for future values
pub trait Predictor {
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Values for the `steps` periods following the fitted data
    fn predict(&self, steps: usize) -> Result<Vec<f64>>;

    fn is_fitted(&self) -> bool;
}

/// One forecasted day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingForecast {
    /// Sum of the raw model forecast, e.g. "Rp 1,234,567"
    pub next_month_total: String,
    pub forecast_data: Vec<ForecastDay>,
}

/// Forecasts daily spending with a weekly seasonal model
#[derive(Debug, Clone)]
pub struct SpendingForecaster {
    order: Order,
    seasonal: SeasonalOrder,
    horizon: usize,
}

impl SpendingForecaster {
    pub const WEEKLY_PERIOD: usize = 7;

    pub fn new(horizon: usize) -> Self {
        Self {
            order: Order { p: 1, d: 1, q: 1 },
            seasonal: SeasonalOrder {
                p: 1,
                d: 1,
                q: 1,
                period: Self::WEEKLY_PERIOD,
            },
            horizon,
        }
    }

    pub fn forecast(&self, points: &[SpendingPoint]) -> Result<SpendingForecast> {
        if points.is_empty() {
            return Err(Error::InvalidData("No transaction data provided".into()));
        }

        let series = DailySeries::from_points(points)?;
        debug!(
            points = points.len(),
            days = series.len(),
            start = %series.start(),
            end = %series.end(),
            "Aggregated daily spending"
        );

        let mut model = Sarima::new(self.order, self.seasonal)?;
        model.fit(series.values())?;
        let raw = model.predict(self.horizon)?;
        let total: f64 = raw.iter().sum();

        let forecast_data: Vec<ForecastDay> = future_dates(series.end(), self.horizon)
            .zip(raw)
            .map(|(date, amount)| ForecastDay {
                date,
                amount: amount.max(0.0),
            })
            .collect();

        info!(
            days = series.len(),
            horizon = self.horizon,
            total,
            "Spending forecast ready"
        );

        Ok(SpendingForecast {
            next_month_total: format_rupiah(total),
            forecast_data,
        })
    }
}

fn future_dates(last: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    (1..=count as i64).map(move |i| last + Duration::days(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(start: NaiveDate, amounts: &[f64]) -> Vec<SpendingPoint> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| SpendingPoint {
                date: start + Duration::days(i as i64),
                amount: *a,
            })
            .collect()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_forecast_dates_follow_last_observation() {
        let week = [50_000.0, 20_000.0, 20_000.0, 30_000.0, 20_000.0, 80_000.0, 120_000.0];
        let amounts: Vec<f64> = (0..28).map(|i| week[i % 7]).collect();
        let forecast = SpendingForecaster::new(30)
            .forecast(&points(start(), &amounts))
            .unwrap();

        assert_eq!(forecast.forecast_data.len(), 30);
        assert_eq!(
            forecast.forecast_data[0].date,
            NaiveDate::from_ymd_opt(2025, 1, 29).unwrap()
        );
        assert_eq!(
            forecast.forecast_data[29].date,
            NaiveDate::from_ymd_opt(2025, 2, 27).unwrap()
        );
    }

    fn declining() -> Vec<SpendingPoint> {
        // Steep decline pushes the unclamped forecast well below zero
        let amounts: Vec<f64> = (0..35).map(|i| 400_000.0 - i as f64 * 11_000.0).collect();
        points(start(), &amounts)
    }

    #[test]
    fn test_forecast_is_never_negative() {
        let forecast = SpendingForecaster::new(30).forecast(&declining()).unwrap();

        assert!(forecast.forecast_data.iter().all(|d| d.amount >= 0.0));
        assert!(forecast.next_month_total.starts_with("Rp "));
    }

    #[test]
    fn test_total_sums_unclamped_forecast() {
        let data = declining();
        let forecast = SpendingForecaster::new(30).forecast(&data).unwrap();

        let series = DailySeries::from_points(&data).unwrap();
        let forecaster = SpendingForecaster::new(30);
        let mut model = Sarima::new(forecaster.order, forecaster.seasonal).unwrap();
        model.fit(series.values()).unwrap();
        let raw = model.predict(30).unwrap();
        let raw_sum: f64 = raw.iter().sum();

        assert!(raw.iter().any(|v| *v < 0.0));
        assert_eq!(forecast.next_month_total, format_rupiah(raw_sum));
        assert!(forecast.next_month_total.starts_with("Rp -"));
    }

    #[test]
    fn test_total_of_repeating_week() {
        let week = [10_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let amounts: Vec<f64> = (0..21).map(|i| week[i % 7]).collect();
        let forecast = SpendingForecaster::new(14)
            .forecast(&points(start(), &amounts))
            .unwrap();

        assert_eq!(forecast.next_month_total, "Rp 20,000");
    }

    #[test]
    fn test_gaps_count_as_zero_spending_days() {
        let sparse = vec![
            SpendingPoint {
                date: start(),
                amount: 10_000.0,
            },
            SpendingPoint {
                date: start() + Duration::days(20),
                amount: 10_000.0,
            },
        ];
        // 21 days after zero fill, enough for the weekly model
        let forecast = SpendingForecaster::new(7).forecast(&sparse).unwrap();
        assert_eq!(forecast.forecast_data.len(), 7);
    }

    #[test]
    fn test_too_few_days() {
        let amounts = vec![10_000.0; 10];
        let err = SpendingForecaster::new(30)
            .forecast(&points(start(), &amounts))
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData { required: 17, actual: 10 }));
    }

    #[test]
    fn test_empty_input() {
        assert!(SpendingForecaster::new(30).forecast(&[]).is_err());
    }

    #[test]
    fn test_serializes_dates_as_plain_days() {
        let day = ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            amount: 1.5,
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2025-03-09");
        assert_eq!(json["amount"], 1.5);
    }
}
