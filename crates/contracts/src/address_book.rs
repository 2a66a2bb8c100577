use {
    alloy::primitives::Address,
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::{fs, io::Write, path::Path},
    tempfile::NamedTempFile,
};

/// Addresses of a deployed contract suite, persisted as JSON by the
/// deployment and read back by the API on startup. Every field is required so
/// an incomplete book fails to load.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBook {
    pub asset_token_impl: Address,
    pub asset_token_proxy: Address,
    pub policy: Address,
    pub profit_distributor_impl: Address,
    pub profit_distributor_proxy: Address,
    pub usdc_address: Address,
}

impl AddressBook {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read(path)
            .with_context(|| format!("failed to read address book {}", path.display()))?;
        serde_json::from_slice(&contents)
            .with_context(|| format!("malformed address book {}", path.display()))
    }

    /// Writes the book to `path`, replacing any previous one. The file is
    /// written next to the target first and then renamed over it so readers
    /// never observe a partial book.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut file, self).context("failed to serialize address book")?;
        file.write_all(b"\n")?;
        file.persist(path)
            .with_context(|| format!("failed to write address book {}", path.display()))?;
        Ok(())
    }

    /// Named entries in deployment order.
    pub fn entries(&self) -> [(&'static str, Address); 6] {
        [
            ("assetTokenImpl", self.asset_token_impl),
            ("assetTokenProxy", self.asset_token_proxy),
            ("policy", self.policy),
            ("profitDistributorImpl", self.profit_distributor_impl),
            ("profitDistributorProxy", self.profit_distributor_proxy),
            ("usdcAddress", self.usdc_address),
        ]
    }
}
