use crate::error::CoreError;

/// Direction of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Long position
    Long,
    /// Short position
    Short,
}

impl Direction {
    /// Sign applied to price deltas: +1 for long, -1 for short.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }

    /// Integer form used in trade metrics (`current_direction`).
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Long => 1,
            Direction::Short => -1,
        }
    }
}

/// Discrete action accepted by the simulator.
///
/// The integer encoding is fixed: 0 = hold, 1 = buy, 2 = sell, 3 = close.
/// Any other integer is rejected instead of being wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Do nothing
    Hold,
    /// Open a long position
    Buy,
    /// Open a short position
    Sell,
    /// Close the open position
    Close,
}

impl Action {
    /// Number of actions in the action space.
    pub const COUNT: usize = 4;

    /// All actions in encoding order.
    pub const ALL: [Action; Action::COUNT] = [Action::Hold, Action::Buy, Action::Sell, Action::Close];

    /// Integer encoding of the action.
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Action::Hold => 0,
            Action::Buy => 1,
            Action::Sell => 2,
            Action::Close => 3,
        }
    }

    /// Direction a buy/sell action would open, `None` otherwise.
    #[must_use]
    pub fn entry_direction(self) -> Option<Direction> {
        match self {
            Action::Buy => Some(Direction::Long),
            Action::Sell => Some(Direction::Short),
            Action::Hold | Action::Close => None,
        }
    }
}

impl TryFrom<i64> for Action {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Hold),
            1 => Ok(Action::Buy),
            2 => Ok(Action::Sell),
            3 => Ok(Action::Close),
            other => Err(CoreError::InvalidAction(other)),
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Action::try_from(i64::from(value))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Hold => "hold",
            Action::Buy => "buy",
            Action::Sell => "sell",
            Action::Close => "close",
        };
        f.write_str(name)
    }
}
