pub mod db;

pub mod categories;
pub mod events;
pub mod fx;
pub mod ledger;
pub mod summary;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
pub use ledger::*;
