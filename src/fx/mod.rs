pub mod fx_service;
pub mod fx_traits;

pub use fx_service::{currency_pair, CurrencyPair, FixedRateProvider};
pub use fx_traits::RateProviderTrait;
