use {
    alloy::primitives::Address,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub shared: shared::arguments::Arguments,

    /// Directory containing the compiled contracts in Foundry's output layout.
    #[clap(long, env, default_value = "./out")]
    pub artifacts_dir: PathBuf,

    /// Where to write the addresses of the deployed contracts. An existing
    /// file is replaced.
    #[clap(long, env, default_value = "./contract-addresses.json")]
    pub output: PathBuf,

    #[clap(long, env, default_value = "MyToken")]
    pub token_name: String,

    #[clap(long, env, default_value = "MTK")]
    pub token_symbol: String,

    /// Stablecoin the profit distributor pays out. Defaults to the mock USDC
    /// of the local development chain.
    #[clap(long, env, default_value = "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9")]
    pub stablecoin: Address,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            shared,
            artifacts_dir,
            output,
            token_name,
            token_symbol,
            stablecoin,
        } = self;

        write!(f, "{shared}")?;
        writeln!(f, "artifacts_dir: {}", artifacts_dir.display())?;
        writeln!(f, "output: {}", output.display())?;
        writeln!(f, "token_name: {token_name}")?;
        writeln!(f, "token_symbol: {token_symbol}")?;
        writeln!(f, "stablecoin: {stablecoin}")?;
        Ok(())
    }
}
