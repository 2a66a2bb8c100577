pub mod alloy;
mod ledger;

#[cfg(any(test, feature = "test-util"))]
pub use ledger::MockLedger;
pub use ledger::{Error, Ledger, Transaction};

pub type AlloyProvider = ::alloy::providers::DynProvider;
