//! Typed wrappers around the functions of the contract suite that this code
//! base calls.

use {
    crate::contract::Contract,
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, Bytes, TxHash, U256},
    },
    anyhow::{Context, Result, bail},
};

#[derive(Clone, Debug)]
pub struct AssetToken(pub Contract);

impl AssetToken {
    /// Calldata of `initialize(name, symbol, owner)`, run by the proxy
    /// constructor.
    pub fn initialize_calldata(
        logic: &Contract,
        name: &str,
        symbol: &str,
        owner: Address,
    ) -> Result<Bytes> {
        logic.encode(
            "initialize",
            &[
                DynSolValue::String(name.to_owned()),
                DynSolValue::String(symbol.to_owned()),
                DynSolValue::Address(owner),
            ],
        )
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub async fn name(&self) -> Result<String> {
        string(self.0.read("name", &[]).await?)
    }

    pub async fn symbol(&self) -> Result<String> {
        string(self.0.read("symbol", &[]).await?)
    }

    pub async fn total_supply(&self) -> Result<U256> {
        uint(self.0.read("totalSupply", &[]).await?)
    }

    pub async fn mint(&self, to: Address, amount: U256) -> Result<TxHash> {
        self.0
            .write(
                "mint",
                &[DynSolValue::Address(to), DynSolValue::Uint(amount, 256)],
            )
            .await
    }

    pub async fn set_policy(&self, policy: Address) -> Result<TxHash> {
        self.0
            .write("setPolicy", &[DynSolValue::Address(policy)])
            .await
    }

    pub async fn set_profit_distributor(&self, distributor: Address) -> Result<TxHash> {
        self.0
            .write("setProfitDistributor", &[DynSolValue::Address(distributor)])
            .await
    }
}

#[derive(Clone, Debug)]
pub struct ProfitDistributor(pub Contract);

impl ProfitDistributor {
    /// Calldata of `initialize(token, stablecoin, admin, operator)`, run by
    /// the proxy constructor.
    pub fn initialize_calldata(
        logic: &Contract,
        token: Address,
        stablecoin: Address,
        admin: Address,
        operator: Address,
    ) -> Result<Bytes> {
        logic.encode(
            "initialize",
            &[
                DynSolValue::Address(token),
                DynSolValue::Address(stablecoin),
                DynSolValue::Address(admin),
                DynSolValue::Address(operator),
            ],
        )
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub async fn deposit_profit(&self, amount: U256) -> Result<TxHash> {
        self.0
            .write("depositProfit", &[DynSolValue::Uint(amount, 256)])
            .await
    }

    pub async fn earned(&self, account: Address) -> Result<U256> {
        uint(
            self.0
                .read("earned", &[DynSolValue::Address(account)])
                .await?,
        )
    }

    /// Claims the profit of `account`. The node must be impersonating it.
    pub async fn claim_as(&self, account: Address) -> Result<TxHash> {
        self.0.write_as(account, "claim", &[]).await
    }
}

fn single(values: Vec<DynSolValue>) -> Result<DynSolValue> {
    let [value]: [DynSolValue; 1] = values
        .try_into()
        .map_err(|values: Vec<_>| anyhow::anyhow!("expected 1 return value, got {}", values.len()))?;
    Ok(value)
}

fn string(values: Vec<DynSolValue>) -> Result<String> {
    match single(values)? {
        DynSolValue::String(value) => Ok(value),
        other => bail!("expected string return value, got {other:?}"),
    }
}

fn uint(values: Vec<DynSolValue>) -> Result<U256> {
    single(values)?
        .as_uint()
        .map(|(value, _)| value)
        .context("expected unsigned integer return value")
}
