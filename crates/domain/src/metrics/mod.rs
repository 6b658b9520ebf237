//! Aggregations over series served by the explorer backend.

pub mod mined_coins;

pub use mined_coins::{
    ChartPoint, DEFAULT_BUCKET_SECS, MinedCoinPoint, MinedCoins, cumulative_mined_coins,
};
