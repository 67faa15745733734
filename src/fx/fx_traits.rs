use crate::errors::Result;
use crate::ledger::ledger_model::Currency;
use rust_decimal::Decimal;

/// Trait defining the contract for exchange-rate providers.
///
/// The shipped implementation is a fixed-rate placeholder; deployments that
/// want live rates plug their own provider in here.
pub trait RateProviderTrait: Send + Sync {
    /// Units of `to` per one unit of `from`.
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal>;
}
