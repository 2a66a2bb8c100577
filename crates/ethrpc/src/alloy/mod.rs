mod instrumentation;
mod ledger;

pub use ledger::AlloyLedger;
#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock;
use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::{ClientBuilder, RpcClient},
        signers::local::PrivateKeySigner,
    },
    instrumentation::InstrumentationLayer,
    url::Url,
};

/// Creates a provider without a wallet. Transactions sent through it are
/// signed by the node, which only works for impersonated accounts.
pub fn provider(url: &Url, label: &'static str) -> AlloyProvider {
    ProviderBuilder::new()
        .connect_client(client(url, label))
        .erased()
}

/// Creates a provider that signs every transaction with `signer`.
pub fn provider_with_signer(url: &Url, signer: PrivateKeySigner) -> AlloyProvider {
    ProviderBuilder::new()
        .wallet(EthereumWallet::new(signer))
        .connect_client(client(url, "signed"))
        .erased()
}

fn client(url: &Url, label: &'static str) -> RpcClient {
    ClientBuilder::default()
        .layer(InstrumentationLayer { label })
        .http(url.clone())
}

/// Provider answering requests from the responses queued on `asserter`.
#[cfg(any(test, feature = "test-util"))]
pub fn mocked_provider(asserter: mock::Asserter) -> AlloyProvider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter)
        .erased()
}
