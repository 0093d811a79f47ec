//! Balance-proportional lot sizing.

use pipgym_types::{AccountConfig, InstrumentConfig};

/// Lot size as a function of the current balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotSizer {
    /// Balance backing one lot
    pub balance_per_lot: f64,
    /// Smallest tradable lot size
    pub min_lots: f64,
    /// Largest tradable lot size
    pub max_lots: f64,
}

impl LotSizer {
    /// Builds a sizer from the account and instrument configuration.
    #[must_use]
    pub fn from_config(account: &AccountConfig, instrument: &InstrumentConfig) -> Self {
        Self {
            balance_per_lot: account.balance_per_lot,
            min_lots: instrument.min_lots,
            max_lots: instrument.max_lots,
        }
    }

    /// `clamp(round(balance / balance_per_lot, 2), min_lots, max_lots)`
    #[must_use]
    pub fn lot_size(&self, balance: f64) -> f64 {
        let raw = (balance / self.balance_per_lot * 100.0).round() / 100.0;
        raw.clamp(self.min_lots, self.max_lots)
    }
}

impl Default for LotSizer {
    fn default() -> Self {
        Self::from_config(&AccountConfig::default(), &InstrumentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lot_size_proportional() {
        let sizer = LotSizer::default();
        assert_relative_eq!(sizer.lot_size(10_000.0), 10.0);
        assert_relative_eq!(sizer.lot_size(1_000.0), 1.0);
        assert_relative_eq!(sizer.lot_size(1_234.0), 1.23);
    }

    #[test]
    fn test_lot_size_clamped() {
        let sizer = LotSizer::default();
        assert_relative_eq!(sizer.lot_size(1.0), 0.01);
        assert_relative_eq!(sizer.lot_size(-50.0), 0.01);
        assert_relative_eq!(sizer.lot_size(1_000_000.0), 100.0);
    }
}
