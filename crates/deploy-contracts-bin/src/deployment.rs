//! Deploys the contract suite in dependency order and wires the contracts
//! together. Every step waits for its transaction to be confirmed and the
//! first failure aborts the whole sequence.

use {
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, Bytes},
    },
    anyhow::{Context, Result},
    contracts::{AddressBook, Artifact, Artifacts, AssetToken, Contract, ProfitDistributor},
    ethrpc::Ledger,
    std::{path::Path, sync::Arc},
};

/// Values the deployed contracts are initialized with.
#[derive(Clone, Debug)]
pub struct Parameters {
    pub token_name: String,
    pub token_symbol: String,
    pub stablecoin: Address,
}

pub struct Deployer {
    ledger: Arc<dyn Ledger>,
    artifacts: Artifacts,
}

impl Deployer {
    pub fn new(ledger: Arc<dyn Ledger>, artifacts: Artifacts) -> Self {
        Self { ledger, artifacts }
    }

    /// Deploys everything and returns the resulting addresses.
    pub async fn deploy_all(&self, parameters: &Parameters) -> Result<AddressBook> {
        let admin = self.ledger.signer();

        let asset_token_impl = self
            .deploy(Artifacts::ASSET_TOKEN, &self.artifacts.asset_token, &[])
            .await?;
        let init = AssetToken::initialize_calldata(
            &self.handle(Artifacts::ASSET_TOKEN, &self.artifacts.asset_token, asset_token_impl),
            &parameters.token_name,
            &parameters.token_symbol,
            admin,
        )?;
        let asset_token_proxy = self.deploy_proxy(asset_token_impl, init).await?;
        tracing::info!(address = %asset_token_proxy, "deployed AssetToken proxy");

        let policy = self
            .deploy(Artifacts::POLICY, &self.artifacts.policy, &[])
            .await?;

        let profit_distributor_impl = self
            .deploy(
                Artifacts::PROFIT_DISTRIBUTOR,
                &self.artifacts.profit_distributor,
                &[],
            )
            .await?;
        let init = ProfitDistributor::initialize_calldata(
            &self.handle(
                Artifacts::PROFIT_DISTRIBUTOR,
                &self.artifacts.profit_distributor,
                profit_distributor_impl,
            ),
            asset_token_proxy,
            parameters.stablecoin,
            admin,
            admin,
        )?;
        let profit_distributor_proxy = self.deploy_proxy(profit_distributor_impl, init).await?;
        tracing::info!(address = %profit_distributor_proxy, "deployed ProfitDistributor proxy");

        let token = AssetToken(self.handle(
            Artifacts::ASSET_TOKEN,
            &self.artifacts.asset_token,
            asset_token_proxy,
        ));
        token
            .set_policy(policy)
            .await
            .context("failed to set token policy")?;
        token
            .set_profit_distributor(profit_distributor_proxy)
            .await
            .context("failed to set token profit distributor")?;
        tracing::info!("policy and profit distributor set");

        Ok(AddressBook {
            asset_token_impl,
            asset_token_proxy,
            policy,
            profit_distributor_impl,
            profit_distributor_proxy,
            usdc_address: parameters.stablecoin,
        })
    }

    /// Deploys everything and writes the address book to `output`. Nothing is
    /// written if any step fails.
    pub async fn deploy_and_persist(
        &self,
        parameters: &Parameters,
        output: &Path,
    ) -> Result<AddressBook> {
        let book = self.deploy_all(parameters).await?;
        book.save(output)?;
        for (name, address) in book.entries() {
            tracing::info!(%address, "{name}");
        }
        tracing::info!(path = %output.display(), "contract addresses saved");
        Ok(book)
    }

    async fn deploy(
        &self,
        name: &'static str,
        artifact: &Artifact,
        args: &[DynSolValue],
    ) -> Result<Address> {
        tracing::info!("deploying {name}");
        let code = artifact
            .creation_code(args)
            .with_context(|| format!("invalid {name} artifact"))?;
        let address = self
            .ledger
            .deploy(code)
            .await
            .with_context(|| format!("failed to deploy {name}"))?;
        tracing::info!(%address, "deployed {name}");
        Ok(address)
    }

    async fn deploy_proxy(&self, implementation: Address, init: Bytes) -> Result<Address> {
        self.deploy(
            Artifacts::PROXY,
            &self.artifacts.proxy,
            &[
                DynSolValue::Address(implementation),
                DynSolValue::Bytes(init.to_vec()),
            ],
        )
        .await
    }

    fn handle(&self, name: &'static str, artifact: &Artifact, address: Address) -> Contract {
        Contract::new(
            name,
            address,
            Arc::new(artifact.abi.clone()),
            self.ledger.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{TxHash, address},
        contracts::testing,
        ethrpc::{MockLedger, Transaction},
        mockall::{Sequence, predicate::eq},
        std::collections::HashSet,
    };

    const ADMIN: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const STABLECOIN: Address = address!("Cf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9");

    const TOKEN_IMPL: Address = Address::repeat_byte(0x01);
    const TOKEN_PROXY: Address = Address::repeat_byte(0x02);
    const POLICY: Address = Address::repeat_byte(0x03);
    const DISTRIBUTOR_IMPL: Address = Address::repeat_byte(0x04);
    const DISTRIBUTOR_PROXY: Address = Address::repeat_byte(0x05);

    fn parameters() -> Parameters {
        Parameters {
            token_name: "MyToken".into(),
            token_symbol: "MTK".into(),
            stablecoin: STABLECOIN,
        }
    }

    fn logic(name: &'static str, artifact: &Artifact) -> Contract {
        Contract::new(
            name,
            Address::ZERO,
            Arc::new(artifact.abi.clone()),
            Arc::new(MockLedger::new()),
        )
    }

    fn proxy_code(implementation: Address, init: Bytes) -> Bytes {
        testing::artifacts()
            .proxy
            .creation_code(&[
                DynSolValue::Address(implementation),
                DynSolValue::Bytes(init.to_vec()),
            ])
            .unwrap()
    }

    fn setter(signature: &str, argument: Address) -> Transaction {
        Transaction {
            to: TOKEN_PROXY,
            data: [
                &testing::selector(signature)[..],
                &[0u8; 12][..],
                argument.as_slice(),
            ]
            .concat()
            .into(),
            from: None,
            gas_limit: None,
        }
    }

    /// A ledger expecting the full deployment in order.
    fn deploying_ledger() -> MockLedger {
        observe::tracing::initialize_reentrant("deploy_contracts=debug");
        let artifacts = testing::artifacts();
        let token_init = AssetToken::initialize_calldata(
            &logic(Artifacts::ASSET_TOKEN, &artifacts.asset_token),
            "MyToken",
            "MTK",
            ADMIN,
        )
        .unwrap();
        let distributor_init = ProfitDistributor::initialize_calldata(
            &logic(
                Artifacts::PROFIT_DISTRIBUTOR,
                &artifacts.profit_distributor,
            ),
            TOKEN_PROXY,
            STABLECOIN,
            ADMIN,
            ADMIN,
        )
        .unwrap();

        let mut ledger = MockLedger::new();
        ledger.expect_signer().return_const(ADMIN);

        let mut seq = Sequence::new();
        let deployments = [
            (artifacts.asset_token.bytecode().unwrap().clone(), TOKEN_IMPL),
            (proxy_code(TOKEN_IMPL, token_init), TOKEN_PROXY),
            (artifacts.policy.bytecode().unwrap().clone(), POLICY),
            (
                artifacts.profit_distributor.bytecode().unwrap().clone(),
                DISTRIBUTOR_IMPL,
            ),
            (proxy_code(DISTRIBUTOR_IMPL, distributor_init), DISTRIBUTOR_PROXY),
        ];
        for (code, address) in deployments {
            ledger
                .expect_deploy()
                .with(eq(code))
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| Ok(address));
        }
        for tx in [
            setter("setPolicy(address)", POLICY),
            setter("setProfitDistributor(address)", DISTRIBUTOR_PROXY),
        ] {
            ledger
                .expect_send()
                .with(eq(tx))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(TxHash::repeat_byte(0x11)));
        }
        ledger
    }

    #[tokio::test]
    async fn deploys_and_wires_suite() {
        let deployer = Deployer::new(Arc::new(deploying_ledger()), testing::artifacts());
        let book = deployer.deploy_all(&parameters()).await.unwrap();

        assert_eq!(
            book,
            AddressBook {
                asset_token_impl: TOKEN_IMPL,
                asset_token_proxy: TOKEN_PROXY,
                policy: POLICY,
                profit_distributor_impl: DISTRIBUTOR_IMPL,
                profit_distributor_proxy: DISTRIBUTOR_PROXY,
                usdc_address: STABLECOIN,
            }
        );
        let distinct: HashSet<_> = book.entries().into_iter().map(|(_, a)| a).collect();
        assert_eq!(distinct.len(), 6);
    }

    #[tokio::test]
    async fn persists_address_book() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("contract-addresses.json");
        let deployer = Deployer::new(Arc::new(deploying_ledger()), testing::artifacts());

        let book = deployer
            .deploy_and_persist(&parameters(), &output)
            .await
            .unwrap();
        assert_eq!(AddressBook::load(&output).unwrap(), book);
    }

    #[tokio::test]
    async fn failed_step_aborts_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("contract-addresses.json");

        let mut ledger = MockLedger::new();
        ledger.expect_signer().return_const(ADMIN);
        let mut seq = Sequence::new();
        ledger
            .expect_deploy()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Address::repeat_byte(0x01)));
        ledger
            .expect_deploy()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ethrpc::Error::Reverted(TxHash::repeat_byte(0x22))));
        ledger.expect_send().never();

        let deployer = Deployer::new(Arc::new(ledger), testing::artifacts());
        let err = deployer
            .deploy_and_persist(&parameters(), &output)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to deploy AssetTokenPolicy"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn failed_setter_aborts_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("contract-addresses.json");

        let mut ledger = MockLedger::new();
        ledger.expect_signer().return_const(ADMIN);
        let mut next = 0u8;
        ledger.expect_deploy().times(5).returning(move |_| {
            next += 1;
            Ok(Address::repeat_byte(next))
        });
        ledger
            .expect_send()
            .times(1)
            .returning(|_| Err(ethrpc::Error::Reverted(TxHash::repeat_byte(0x33))));

        let deployer = Deployer::new(Arc::new(ledger), testing::artifacts());
        let err = deployer
            .deploy_and_persist(&parameters(), &output)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to set token policy"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn missing_bytecode_deploys_nothing() {
        let mut artifacts = testing::artifacts();
        artifacts.asset_token =
            serde_json::from_value(serde_json::json!({ "abi": [], "bytecode": "0x" })).unwrap();
        let mut ledger = MockLedger::new();
        ledger.expect_signer().return_const(ADMIN);
        ledger.expect_deploy().never();

        let deployer = Deployer::new(Arc::new(ledger), artifacts);
        assert!(deployer.deploy_all(&parameters()).await.is_err());
    }
}
