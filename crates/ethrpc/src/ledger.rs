//! The capability this code base needs from a blockchain node. Everything
//! that talks to the chain goes through [`Ledger`] so components can be
//! tested against a mocked node.

use {
    alloy::{
        primitives::{Address, Bytes, TxHash},
        providers::PendingTransactionError,
        transports::TransportError,
    },
    std::time::Duration,
};

/// A state-changing call to submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    pub to: Address,
    pub data: Bytes,
    /// Sender of the transaction. `None` means the ledger's own signer; any
    /// other address must currently be impersonated on the node.
    pub from: Option<Address>,
    /// Skips gas estimation when set.
    pub gas_limit: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Node(#[from] TransportError),
    #[error(transparent)]
    Pending(#[from] PendingTransactionError),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("deployment transaction {0} did not create a contract")]
    NoContractAddress(TxHash),
    #[error("node did not respond within {0:?}")]
    Timeout(Duration),
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Ledger: Send + Sync + 'static {
    /// Address of the identity signing state-changing calls.
    fn signer(&self) -> Address;

    /// Creates a contract from `code` (creation bytecode followed by the
    /// encoded constructor arguments) and waits for the deployment to be
    /// confirmed.
    async fn deploy(&self, code: Bytes) -> Result<Address, Error>;

    /// Executes a read-only call against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error>;

    /// Submits a transaction and waits for it to be confirmed. Reverted
    /// transactions are errors.
    async fn send(&self, tx: Transaction) -> Result<TxHash, Error>;

    /// Lets the node accept unsigned transactions from `account`. Only
    /// supported by development nodes.
    async fn impersonate(&self, account: Address) -> Result<(), Error>;

    /// Reverts [`Ledger::impersonate`].
    async fn stop_impersonating(&self, account: Address) -> Result<(), Error>;
}
