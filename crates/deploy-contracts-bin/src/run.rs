use {
    crate::{
        arguments::Arguments,
        deployment::{Deployer, Parameters},
    },
    anyhow::Result,
    clap::Parser,
    contracts::{AddressBook, Artifacts},
    ethrpc::Ledger,
    std::sync::Arc,
};

pub async fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    observe::tracing::initialize(&args.shared.observe_config());
    tracing::info!("running deploy-contracts with validated arguments:\n{}", args);

    if let Err(err) = run(args).await {
        tracing::error!("deployment failed: {:?}", err);
        std::process::exit(1);
    }
}

/// Assumes tracing has already been set up.
pub async fn run(args: Arguments) -> Result<AddressBook> {
    let artifacts = Artifacts::load(&args.artifacts_dir)?;
    let ledger = Arc::new(args.shared.ledger()?);
    tracing::info!(deployer = %ledger.signer(), "deploying contracts");

    let parameters = Parameters {
        token_name: args.token_name,
        token_symbol: args.token_symbol,
        stablecoin: args.stablecoin,
    };
    Deployer::new(ledger, artifacts)
        .deploy_and_persist(&parameters, &args.output)
        .await
}
