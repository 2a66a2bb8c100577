use std::{
    fmt::{self, Display, Formatter},
    net::IpAddr,
    path::PathBuf,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub shared: shared::arguments::Arguments,

    #[clap(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    #[clap(long, env, default_value = "0.0.0.0")]
    pub bind_ip: IpAddr,

    /// Addresses written by `deploy-contracts`.
    #[clap(long, env, default_value = "./contract-addresses.json")]
    pub address_book: PathBuf,

    /// Directory containing the compiled contracts in Foundry's output layout.
    #[clap(long, env, default_value = "./out")]
    pub artifacts_dir: PathBuf,

    /// Gas limit of every transaction the API submits.
    #[clap(long, env, default_value = "500000")]
    pub gas_limit: u64,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            shared,
            port,
            bind_ip,
            address_book,
            artifacts_dir,
            gas_limit,
        } = self;

        write!(f, "{shared}")?;
        writeln!(f, "port: {port}")?;
        writeln!(f, "bind_ip: {bind_ip}")?;
        writeln!(f, "address_book: {}", address_book.display())?;
        writeln!(f, "artifacts_dir: {}", artifacts_dir.display())?;
        writeln!(f, "gas_limit: {gas_limit}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn defaults() {
        let args = Arguments::parse_from(["asset-api"]);
        assert_eq!(args.bind_ip.to_string(), "0.0.0.0");
        assert_eq!(args.gas_limit, 500_000);
        assert_eq!(args.address_book, PathBuf::from("./contract-addresses.json"));
        assert_eq!(args.artifacts_dir, PathBuf::from("./out"));
    }
}
