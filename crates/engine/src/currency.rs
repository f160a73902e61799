use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code for a user's base currency.
///
/// The calculator itself is currency-agnostic: every monetary input and every
/// produced total is denominated in whatever unit the inputs already use. The
/// code is carried so clients can label amounts; no conversion happens in the
/// engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Kwd,
    Sar,
    Aed,
    Eur,
    Usd,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Kwd => "KWD",
            Currency::Sar => "SAR",
            Currency::Aed => "AED",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "KWD" => Ok(Currency::Kwd),
            "SAR" => Ok(Currency::Sar),
            "AED" => Ok(Currency::Aed),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(EngineError::InvalidQuantity(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}
