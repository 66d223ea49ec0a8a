//! Daily spending series

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::models::SpendingPoint;

/// Summed amounts for every calendar day from the first to the last observation
///
/// Days without transactions hold 0: no spending, not missing data.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    values: Vec<f64>,
}

impl DailySeries {
    /// Group points by date, sum them, and fill gaps with zero
    pub fn from_points(points: &[SpendingPoint]) -> Result<Self> {
        let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for point in points {
            *sums.entry(point.date).or_insert(0.0) += point.amount;
        }

        let (start, end) = match (sums.keys().next(), sums.keys().next_back()) {
            (Some(s), Some(e)) => (*s, *e),
            _ => return Err(Error::InvalidData("No transaction data provided".into())),
        };

        let days = (end - start).num_days() as usize + 1;
        let values = (0..days)
            .map(|offset| {
                let day = start + Duration::days(offset as i64);
                sums.get(&day).copied().unwrap_or(0.0)
            })
            .collect();

        Ok(Self { start, values })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last observed day
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(self.values.len() as i64 - 1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        let offset = (date - self.start).num_days();
        if offset < 0 {
            return None;
        }
        self.values.get(offset as usize).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (self.start + Duration::days(i as i64), *v))
    }
}
