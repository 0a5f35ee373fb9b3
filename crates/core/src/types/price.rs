//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept unrounded internally; rounding to two decimal places only
//! happens when a price is formatted for display.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown to shoppers.
pub const DISPLAY_DECIMALS: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rials, not fils).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// The amount rounded half away from zero to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "20.00 ريال" or "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.rounded();
        match self.currency_code {
            CurrencyCode::USD => format!("${amount:.2}"),
            code => format!("{amount:.2} {}", code.symbol()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the shop can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Yemeni rial.
    #[default]
    YER,
    /// Saudi riyal.
    SAR,
    /// US dollar.
    USD,
}

impl CurrencyCode {
    /// Symbol shown after the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::YER | Self::SAR => "ريال",
            Self::USD => "$",
        }
    }

    /// The ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::YER => "YER",
            Self::SAR => "SAR",
            Self::USD => "USD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YER" => Ok(Self::YER),
            "SAR" => Ok(Self::SAR),
            "USD" => Ok(Self::USD),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}
