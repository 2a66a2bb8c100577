use {
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt},
        json_abi::JsonAbi,
        primitives::Bytes,
    },
    anyhow::{Context, Result, ensure},
    serde::Deserialize,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// A compiled contract as emitted by the build tooling.
#[derive(Clone, Debug, Deserialize)]
pub struct Artifact {
    pub abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<Bytecode>,
}

/// Hardhat stores the creation bytecode as a plain hex string, Foundry nests
/// it in an object next to source maps and link references.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum Bytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

impl Artifact {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read(path)
            .with_context(|| format!("failed to read artifact {}", path.display()))?;
        serde_json::from_slice(&contents)
            .with_context(|| format!("malformed artifact {}", path.display()))
    }

    /// Creation bytecode, if the artifact contains any. Interfaces and
    /// abstract contracts come with an empty one.
    pub fn bytecode(&self) -> Option<&Bytes> {
        let bytecode = match self.bytecode.as_ref()? {
            Bytecode::Hex(bytes) => bytes,
            Bytecode::Object { object } => object,
        };
        (!bytecode.is_empty()).then_some(bytecode)
    }

    /// The payload of a deployment transaction: creation bytecode followed by
    /// the ABI encoded constructor arguments.
    pub fn creation_code(&self, args: &[DynSolValue]) -> Result<Bytes> {
        let bytecode = self.bytecode().context("artifact has no creation bytecode")?;
        let arguments = match &self.abi.constructor {
            Some(constructor) => constructor
                .abi_encode_input(args)
                .context("failed to encode constructor arguments")?,
            None => {
                ensure!(
                    args.is_empty(),
                    "contract has no constructor but got {} arguments",
                    args.len()
                );
                Vec::new()
            }
        };
        Ok([&bytecode[..], arguments.as_slice()].concat().into())
    }
}

/// All artifacts of the contract suite.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub asset_token: Artifact,
    pub policy: Artifact,
    pub profit_distributor: Artifact,
    pub proxy: Artifact,
}

impl Artifacts {
    pub const ASSET_TOKEN: &str = "AssetToken";
    pub const POLICY: &str = "AssetTokenPolicy";
    pub const PROFIT_DISTRIBUTOR: &str = "ProfitDistributor";
    pub const PROXY: &str = "ERC1967Proxy";

    /// Loads every artifact from a Foundry output directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let load = |contract| Artifact::from_file(&path(dir, contract));
        Ok(Self {
            asset_token: load(Self::ASSET_TOKEN)?,
            policy: load(Self::POLICY)?,
            profit_distributor: load(Self::PROFIT_DISTRIBUTOR)?,
            proxy: load(Self::PROXY)?,
        })
    }
}

/// Location of a contract's artifact in a Foundry output directory:
/// `<dir>/<Contract>.sol/<Contract>.json`.
pub fn path(dir: &Path, contract: &str) -> PathBuf {
    dir.join(format!("{contract}.sol"))
        .join(format!("{contract}.json"))
}
