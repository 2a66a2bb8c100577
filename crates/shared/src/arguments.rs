//! Contains command line arguments and related helpers that are shared between
//! the binaries.

use {
    alloy::signers::local::PrivateKeySigner,
    anyhow::{Result, bail},
    ethrpc::alloy::AlloyLedger,
    std::{
        fmt::{self, Display, Formatter},
        time::Duration,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

/// First account of the `test test ... junk` mnemonic that Hardhat and Anvil
/// fund on startup. Publicly known, never use it outside of local chains.
const DEV_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[derive(clap::Parser)]
#[group(skip)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Emit log lines as JSON objects.
    #[clap(long, env, action = clap::ArgAction::Set, default_value = "false")]
    pub use_json_logs: bool,
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

#[derive(clap::Parser)]
#[group(skip)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Private key of the account deploying contracts and signing
    /// transactions.
    #[clap(long, env)]
    pub private_key: Option<PrivateKeySigner>,

    /// Sign with the well-known first development account when no private key
    /// is configured. Only meaningful against a local Hardhat or Anvil node.
    #[clap(long, env, action = clap::ArgAction::Set, default_value = "false")]
    pub use_dev_signer: bool,

    /// Upper bound for every node interaction, including waiting for a
    /// transaction to be mined.
    #[clap(
        long,
        env,
        default_value = "30s",
        value_parser = humantime::parse_duration,
    )]
    pub rpc_timeout: Duration,
}

impl Arguments {
    pub fn observe_config(&self) -> observe::Config {
        observe::Config::new(
            &self.logging.log_filter,
            self.logging.log_stderr_threshold.into_level(),
            self.logging.use_json_logs,
        )
    }

    /// The identity signing transactions.
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        match (&self.private_key, self.use_dev_signer) {
            (Some(signer), _) => Ok(signer.clone()),
            (None, true) => {
                let signer: PrivateKeySigner = DEV_PRIVATE_KEY.parse()?;
                tracing::warn!(
                    address = %signer.address(),
                    "signing with the publicly known development key"
                );
                Ok(signer)
            }
            (None, false) => bail!("no private key configured, set PRIVATE_KEY"),
        }
    }

    pub fn ledger(&self) -> Result<AlloyLedger> {
        Ok(AlloyLedger::new(
            &self.node_url,
            self.signer()?,
            self.rpc_timeout,
        ))
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            private_key,
            use_dev_signer,
            rpc_timeout,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        display_secret_option(f, "private_key", private_key)?;
        writeln!(f, "use_dev_signer: {use_dev_signer}")?;
        writeln!(f, "rpc_timeout: {rpc_timeout:?}")?;
        Ok(())
    }
}

pub fn display_secret_option<T>(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<T>,
) -> std::fmt::Result {
    display_option(f, name, &option.as_ref().map(|_| "SECRET"))
}

pub fn display_option(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<impl Display>,
) -> std::fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}
