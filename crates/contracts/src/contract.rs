use {
    alloy::{
        dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
        json_abi::{Function, JsonAbi},
        primitives::{Address, Bytes, TxHash},
    },
    anyhow::{Context, Result},
    ethrpc::{Ledger, Transaction},
    std::{fmt, sync::Arc},
};

/// A deployed contract whose interface is only known at runtime.
#[derive(Clone)]
pub struct Contract {
    name: &'static str,
    address: Address,
    abi: Arc<JsonAbi>,
    ledger: Arc<dyn Ledger>,
    gas_limit: Option<u64>,
}

impl Contract {
    pub fn new(
        name: &'static str,
        address: Address,
        abi: Arc<JsonAbi>,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        Self {
            name,
            address,
            abi,
            ledger,
            gas_limit: None,
        }
    }

    /// Gas limit for transactions sent to this contract. Without one the node
    /// estimates it.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn function(&self, name: &str, argc: usize) -> Result<&Function> {
        self.abi
            .function(name)
            .into_iter()
            .flatten()
            .find(|function| function.inputs.len() == argc)
            .with_context(|| {
                format!(
                    "{} has no function {name} taking {argc} arguments",
                    self.name
                )
            })
    }

    /// Calldata invoking `function` with `args`.
    pub fn encode(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes> {
        let calldata = self
            .function(function, args.len())?
            .abi_encode_input(args)
            .with_context(|| format!("failed to encode {}.{function}", self.name))?;
        Ok(calldata.into())
    }

    /// Executes a read-only call and decodes its return values.
    pub async fn read(&self, function: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        let abi = self.function(function, args.len())?;
        let calldata = abi
            .abi_encode_input(args)
            .with_context(|| format!("failed to encode {}.{function}", self.name))?;
        let output = self
            .ledger
            .call(self.address, calldata.into())
            .await
            .with_context(|| format!("{}.{function} call failed", self.name))?;
        abi.abi_decode_output(&output)
            .with_context(|| format!("failed to decode {}.{function} output", self.name))
    }

    /// Sends a transaction signed by the ledger's own identity.
    pub async fn write(&self, function: &str, args: &[DynSolValue]) -> Result<TxHash> {
        self.transact(None, function, args).await
    }

    /// Sends a transaction from `from`, which the node must currently
    /// impersonate.
    pub async fn write_as(
        &self,
        from: Address,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<TxHash> {
        self.transact(Some(from), function, args).await
    }

    async fn transact(
        &self,
        from: Option<Address>,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<TxHash> {
        let tx = Transaction {
            to: self.address,
            data: self.encode(function, args)?,
            from,
            gas_limit: self.gas_limit,
        };
        let tx_hash = self
            .ledger
            .send(tx)
            .await
            .with_context(|| format!("{}.{function} transaction failed", self.name))?;
        tracing::debug!(contract = self.name, function, ?tx_hash, "transaction confirmed");
        Ok(tx_hash)
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("gas_limit", &self.gas_limit)
            .finish_non_exhaustive()
    }
}
