use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::FIXED_ARS_PER_USD;
use crate::errors::{CurrencyError, Result};
use crate::fx::fx_traits::RateProviderTrait;
use crate::ledger::ledger_model::Currency;

/// Both stored representations of one monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub ars: f64,
    pub usd: f64,
}

/// Rate provider backed by a single hardcoded ARS/USD rate.
///
/// This is a placeholder policy, not a live exchange-rate lookup. Every
/// stored pair derived through it is only as good as the constant it uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedRateProvider;

impl RateProviderTrait for FixedRateProvider {
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
        match (from, to) {
            (Currency::Ars, Currency::Usd) => Ok(Decimal::ONE / FIXED_ARS_PER_USD),
            (Currency::Usd, Currency::Ars) => Ok(FIXED_ARS_PER_USD),
            (Currency::Ars, Currency::Ars) | (Currency::Usd, Currency::Usd) => Ok(Decimal::ONE),
        }
    }
}

/// Computes the paired ARS/USD values for an amount captured in one currency.
pub fn currency_pair(
    amount: f64,
    captured_in: Currency,
    provider: &dyn RateProviderTrait,
) -> Result<CurrencyPair> {
    let amount_dec = Decimal::from_f64(amount).ok_or_else(|| {
        CurrencyError::ConversionFailed(format!("amount {} is not representable", amount))
    })?;

    let (ars, usd) = match captured_in {
        Currency::Ars => {
            let usd = amount_dec * provider.rate(Currency::Ars, Currency::Usd)?;
            (amount_dec, usd)
        }
        Currency::Usd => {
            let ars = amount_dec * provider.rate(Currency::Usd, Currency::Ars)?;
            (ars, amount_dec)
        }
    };

    Ok(CurrencyPair {
        ars: ars.to_f64().ok_or_else(|| {
            CurrencyError::ConversionFailed("converted ARS value overflows f64".to_string())
        })?,
        usd: usd.to_f64().ok_or_else(|| {
            CurrencyError::ConversionFailed("converted USD value overflows f64".to_string())
        })?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ars_capture_derives_usd() {
        let pair = currency_pair(500.0, Currency::Ars, &FixedRateProvider).unwrap();
        assert_eq!(pair.ars, 500.0);
        assert_eq!(pair.usd, 0.5);
    }

    #[test]
    fn usd_capture_derives_ars() {
        let pair = currency_pair(2.5, Currency::Usd, &FixedRateProvider).unwrap();
        assert_eq!(pair.ars, 2500.0);
        assert_eq!(pair.usd, 2.5);
    }

    #[test]
    fn same_currency_rate_is_identity() {
        let rate = FixedRateProvider.rate(Currency::Usd, Currency::Usd).unwrap();
        assert_eq!(rate, Decimal::ONE);
    }
}
