use derive_more::{Constructor, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - USD price
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, From, Into, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Round half away from zero to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Self {
        let factor = 10f64.powi(decimals as i32);
        Self((self.0 * factor).round() / factor)
    }
}

/// Value Object - epoch seconds as the chart engine plots them
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Constructor, Display,
    Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Value Object - market symbol, e.g. `ETH_USD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_uppercase())
    }
}

/// Candle period offered by the exchange chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    FiveMinutes,

    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    FifteenMinutes,

    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,

    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    FourHours,

    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,
}

impl ChartPeriod {
    pub fn duration_secs(&self) -> i64 {
        match self {
            Self::FiveMinutes => 5 * 60,
            Self::FifteenMinutes => 15 * 60,
            Self::OneHour => 60 * 60,
            Self::FourHours => 4 * 60 * 60,
            Self::OneDay => 24 * 60 * 60,
        }
    }
}

impl Default for ChartPeriod {
    fn default() -> Self {
        Self::FourHours
    }
}
