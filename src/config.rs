//! Module defining the tunables of the pipeline and of the record generators

use std::time::Duration;

use crate::generator::Generate;

/// Number of metrics snapshots kept by default.
pub const DEFAULT_LEDGER_CAPACITY: usize = 100;
/// Number of records the last-known-status store keeps by default.
pub const DEFAULT_STORE_CAPACITY: usize = 10_000;
pub const DEFAULT_RECORD_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub ledger_capacity: usize,
    pub store_capacity: usize,
    /// Upper bound on the processing of a single record
    pub record_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ledger_capacity: DEFAULT_LEDGER_CAPACITY,
            store_capacity: DEFAULT_STORE_CAPACITY,
            record_timeout: DEFAULT_RECORD_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.ledger_capacity == 0 {
            return Err("ledger capacity must be positive".to_string());
        }
        if self.store_capacity == 0 {
            return Err("store capacity must be positive".to_string());
        }
        if self.record_timeout.is_zero() {
            return Err("record timeout must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Time between two firings
    pub interval: Duration,
    /// Fewest records published per firing
    pub min_records: usize,
    /// Most records published per firing (inclusive)
    pub max_records: usize,
}

impl GeneratorConfig {
    /// Defaults per record kind: 5 to 15 orders or 3 to 8 articles every 10 seconds.
    pub fn for_kind<R: Generate>() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            min_records: R::MIN_PER_FIRING,
            max_records: R::MAX_PER_FIRING,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.interval.is_zero() {
            return Err("generator interval must be positive".to_string());
        }
        if self.min_records == 0 {
            return Err("at least one record must be generated per firing".to_string());
        }
        if self.min_records > self.max_records {
            return Err(format!(
                "min records ({}) exceeds max records ({})",
                self.min_records, self.max_records
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{Article, Order};

    #[test]
    fn defaults_are_valid() {
        assert_eq!(PipelineConfig::default().validate(), Ok(()));
        assert_eq!(GeneratorConfig::for_kind::<Order>().validate(), Ok(()));
        assert_eq!(GeneratorConfig::for_kind::<Article>().validate(), Ok(()));
    }

    #[test]
    fn kind_defaults() {
        let orders = GeneratorConfig::for_kind::<Order>();
        assert_eq!((orders.min_records, orders.max_records), (5, 15));
        assert_eq!(orders.interval, Duration::from_secs(10));

        let articles = GeneratorConfig::for_kind::<Article>();
        assert_eq!((articles.min_records, articles.max_records), (3, 8));
    }

    #[rstest]
    #[case(0, 100, 5)]
    #[case(100, 0, 5)]
    #[case(100, 100, 0)]
    fn zero_pipeline_settings_are_rejected(
        #[case] ledger_capacity: usize,
        #[case] store_capacity: usize,
        #[case] timeout_secs: u64,
    ) {
        let config = PipelineConfig {
            ledger_capacity,
            store_capacity,
            record_timeout: Duration::from_secs(timeout_secs),
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case::empty_range(0, 0)]
    #[case::inverted_range(9, 3)]
    fn bad_generator_ranges_are_rejected(#[case] min_records: usize, #[case] max_records: usize) {
        let config = GeneratorConfig {
            interval: DEFAULT_INTERVAL,
            min_records,
            max_records,
        };
        assert!(config.validate().is_err());
    }
}
