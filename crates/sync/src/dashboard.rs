//! Network totals shown on the landing page.

use archive_explorer_data::ExplorerApi;
use archive_explorer_domain::value_objects::NumberOrString;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

/// Each contract is reported once but stored by this many replicas.
pub const CONTRACT_REPLICAS: u32 = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkStats {
    /// Archived bytes.
    pub archived_storage: u64,
    pub total_contracts: Decimal,
    pub total_coins: Decimal,
    pub total_stored_files: Decimal,
}

/// Fetches all four totals concurrently. If any request fails, every total
/// falls back to zero.
pub async fn fetch_network_stats<A: ExplorerApi + ?Sized>(api: &A) -> NetworkStats {
    let (storage, contracts, coins, files) = tokio::join!(
        api.get_archived_storage(),
        api.get_total_amount_of_contracts(),
        api.get_total_amount_of_coins(),
        api.get_total_amount_of_files(),
    );

    match (storage, contracts, coins, files) {
        (Ok(storage), Ok(contracts), Ok(coins), Ok(files)) => {
            let stats = NetworkStats {
                archived_storage: decimal(storage).trunc().to_u64().unwrap_or(0),
                total_contracts: decimal(contracts) * Decimal::from(CONTRACT_REPLICAS),
                total_coins: decimal(coins),
                total_stored_files: decimal(files),
            };
            debug!(?stats, "Fetched network stats");
            stats
        }
        (storage, contracts, coins, files) => {
            let error = [
                storage.err(),
                contracts.err(),
                coins.err(),
                files.err(),
            ]
            .into_iter()
            .flatten()
            .next();
            if let Some(e) = error {
                warn!(error = %e, "Failed to fetch network stats");
            }
            NetworkStats::default()
        }
    }
}

fn decimal(value: Option<NumberOrString>) -> Decimal {
    value.and_then(|v| v.to_decimal()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockExplorer;
    use rust_decimal_macros::dec;

    fn api_with_stats(stats: Vec<Option<NumberOrString>>) -> MockExplorer {
        let api = MockExplorer::default();
        *api.stats.lock().unwrap() = stats;
        api
    }

    #[tokio::test]
    async fn test_stats_with_replicas() {
        let api = api_with_stats(vec![
            Some(NumberOrString::from("2500000.7")),
            Some(NumberOrString::from(12)),
            Some(NumberOrString::from("1234.5")),
            Some(NumberOrString::from(30)),
        ]);

        let stats = fetch_network_stats(&api).await;

        assert_eq!(stats.archived_storage, 2_500_000);
        assert_eq!(stats.total_contracts, dec!(48));
        assert_eq!(stats.total_coins, dec!(1234.5));
        assert_eq!(stats.total_stored_files, dec!(30));
    }

    #[tokio::test]
    async fn test_missing_or_garbled_values_are_zero() {
        let api = api_with_stats(vec![None, Some(NumberOrString::from("n/a"))]);

        let stats = fetch_network_stats(&api).await;

        assert_eq!(stats, NetworkStats::default());
    }

    #[tokio::test]
    async fn test_any_failure_zeroes_everything() {
        let api = api_with_stats(vec![
            Some(NumberOrString::from(1)),
            Some(NumberOrString::from(1)),
            Some(NumberOrString::from(1)),
            Some(NumberOrString::from(1)),
        ]);
        api.fail_always();

        assert_eq!(fetch_network_stats(&api).await, NetworkStats::default());
    }
}
