//! Cumulative mined-coins series for the dashboard chart.

use crate::format::parse_backend_timestamp;
use crate::value_objects::NumberOrString;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default chart bucket width, in seconds.
pub const DEFAULT_BUCKET_SECS: i64 = 5 * 60;

/// One mining reward as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinedCoinPoint {
    pub timestamp: String,
    pub amount: NumberOrString,
}

/// The mined-coins payload: either a list of points or a map from
/// timestamp to amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinedCoins {
    Points(Vec<MinedCoinPoint>),
    ByTimestamp(BTreeMap<String, NumberOrString>),
}

impl MinedCoins {
    /// Flattens either payload shape into points.
    pub fn into_points(self) -> Vec<MinedCoinPoint> {
        match self {
            MinedCoins::Points(points) => points,
            MinedCoins::ByTimestamp(map) => map
                .into_iter()
                .map(|(timestamp, amount)| MinedCoinPoint { timestamp, amount })
                .collect(),
        }
    }
}

impl Default for MinedCoins {
    fn default() -> Self {
        MinedCoins::Points(Vec::new())
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    /// Start of the bucket.
    pub bucket_start: DateTime<Utc>,
    /// Coins mined inside the bucket.
    pub amount: Decimal,
    /// Coins mined up to and including the bucket.
    pub cumulative: Decimal,
}

/// Builds the cumulative series.
///
/// Points sharing a timestamp are de-duplicated (the last one wins), points
/// with unparseable timestamps or amounts are dropped, the rest are summed
/// into `bucket_secs`-wide windows in ascending time order.
pub fn cumulative_mined_coins(
    points: impl IntoIterator<Item = MinedCoinPoint>,
    bucket_secs: i64,
) -> Vec<ChartPoint> {
    let bucket_secs = bucket_secs.max(1);

    let mut by_timestamp: BTreeMap<String, Decimal> = BTreeMap::new();
    for point in points {
        if let Some(amount) = point.amount.to_decimal() {
            by_timestamp.insert(point.timestamp, amount);
        }
    }

    let mut buckets: BTreeMap<i64, Decimal> = BTreeMap::new();
    for (timestamp, amount) in by_timestamp {
        let Some(ts) = parse_backend_timestamp(&timestamp) else {
            continue;
        };
        let start = ts.timestamp().div_euclid(bucket_secs) * bucket_secs;
        *buckets.entry(start).or_default() += amount;
    }

    let mut cumulative = Decimal::ZERO;
    buckets
        .into_iter()
        .filter_map(|(start, amount)| {
            cumulative += amount;
            DateTime::from_timestamp(start, 0).map(|bucket_start| ChartPoint {
                bucket_start,
                amount,
                cumulative,
            })
        })
        .collect()
}
