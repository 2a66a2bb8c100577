use {
    crate::{
        api::{self, AppState},
        arguments::Arguments,
    },
    anyhow::{Context, Result},
    clap::Parser,
    contracts::{
        AddressBook,
        Artifact,
        Artifacts,
        AssetToken,
        Contract,
        ProfitDistributor,
        artifact,
    },
    ethrpc::Ledger,
    std::sync::Arc,
    tokio::net::TcpListener,
};

pub async fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    observe::tracing::initialize(&args.shared.observe_config());
    tracing::info!("running asset-api with validated arguments:\n{}", args);

    if let Err(err) = run(args).await {
        tracing::error!("asset-api failed: {:?}", err);
        std::process::exit(1);
    }
}

/// Assumes tracing has already been set up.
pub async fn run(args: Arguments) -> Result<()> {
    let book = AddressBook::load(&args.address_book)?;
    let ledger: Arc<dyn Ledger> = Arc::new(args.shared.ledger()?);

    let contract = |name: &'static str, address| -> Result<Contract> {
        let artifact = Artifact::from_file(&artifact::path(&args.artifacts_dir, name))?;
        Ok(Contract::new(name, address, Arc::new(artifact.abi), ledger.clone())
            .with_gas_limit(args.gas_limit))
    };
    let state = AppState {
        token: AssetToken(contract(Artifacts::ASSET_TOKEN, book.asset_token_proxy)?),
        profit_distributor: ProfitDistributor(contract(
            Artifacts::PROFIT_DISTRIBUTOR,
            book.profit_distributor_proxy,
        )?),
        policy: contract(Artifacts::POLICY, book.policy)?,
        ledger: ledger.clone(),
    };
    tracing::info!(
        signer = %ledger.signer(),
        token = %state.token.address(),
        profit_distributor = %state.profit_distributor.address(),
        policy = %state.policy.address(),
        "contracts loaded"
    );

    let listener = TcpListener::bind((args.bind_ip, args.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", args.bind_ip, args.port))?;
    tracing::info!(address = %listener.local_addr()?, "serving asset api");
    axum::serve(listener, api::handle_all_routes(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")
}

#[cfg(unix)]
async fn shutdown_signal() {
    // Kubernetes sends sigterm, whereas locally sigint (ctrl-c) is most common
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(?err, "failed to listen for sigterm");
                std::future::pending::<()>().await;
            }
        }
    };
    let sigint = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(?err, "failed to listen for sigint");
            std::future::pending::<()>().await;
        }
    };
    futures::pin_mut!(sigint);
    futures::pin_mut!(sigterm);
    futures::future::select(sigterm, sigint).await;
    tracing::info!("shutting down");
}

#[cfg(windows)]
async fn shutdown_signal() {
    // We don't support signal handling on windows
    std::future::pending().await
}
