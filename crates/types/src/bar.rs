/// One OHLCV + spread sample at a fixed timeframe.
/// `timestamp_ns` is the bar open time.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bar {
    /// Unix epoch nanoseconds UTC (open time)
    pub timestamp_ns: i64,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Spread in points
    pub spread: f64,
    /// Volume (1.0 when the source has no volume column)
    #[serde(default = "default_volume")]
    pub volume: f64,
}

/// Volume assigned to bars loaded from a table without a volume column.
pub const DEFAULT_VOLUME: f64 = 1.0;

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

impl Bar {
    /// Full high-low range of the bar.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Signed body (close - open).
    #[must_use]
    pub fn body(&self) -> f64 {
        self.close - self.open
    }

    /// Distance from the body top to the high.
    #[must_use]
    pub fn upper_wick(&self) -> f64 {
        self.high - self.close.max(self.open)
    }

    /// Distance from the body bottom to the low.
    #[must_use]
    pub fn lower_wick(&self) -> f64 {
        self.close.min(self.open) - self.low
    }
}
