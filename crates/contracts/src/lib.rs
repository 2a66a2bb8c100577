//! Access to the asset token contract suite. The contracts are not compiled
//! into the binaries: their ABIs and bytecode are read at startup from the
//! build artifacts, and their addresses from the address book written by the
//! deployment.

pub mod address_book;
pub mod artifact;
pub mod bindings;
pub mod contract;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use self::{
    address_book::AddressBook,
    artifact::{Artifact, Artifacts},
    bindings::{AssetToken, ProfitDistributor},
    contract::Contract,
};

/// Fixed-point decimals of the asset token.
pub const ASSET_TOKEN_DECIMALS: u8 = 18;

/// Fixed-point decimals of the stablecoin profits are paid out in.
pub const STABLECOIN_DECIMALS: u8 = 6;
