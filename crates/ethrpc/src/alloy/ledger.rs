use {
    crate::{AlloyProvider, Error, Ledger, Transaction},
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, Bytes, TxHash},
        providers::Provider,
        rpc::types::{TransactionReceipt, TransactionRequest},
        signers::local::PrivateKeySigner,
    },
    std::time::Duration,
    tokio::sync::Mutex,
    url::Url,
};

/// [`Ledger`] backed by a JSON-RPC node.
///
/// Submissions for the signer are serialized so concurrent requests never
/// race for the same nonce. Waiting for confirmations happens outside of that
/// critical section.
pub struct AlloyLedger {
    signed: AlloyProvider,
    unsigned: AlloyProvider,
    signer: Address,
    timeout: Duration,
    submission: Mutex<()>,
}

impl AlloyLedger {
    pub fn new(url: &Url, signer: PrivateKeySigner, timeout: Duration) -> Self {
        let address = signer.address();
        Self::from_providers(
            super::provider_with_signer(url, signer),
            super::provider(url, "impersonated"),
            address,
            timeout,
        )
    }

    pub fn from_providers(
        signed: AlloyProvider,
        unsigned: AlloyProvider,
        signer: Address,
        timeout: Duration,
    ) -> Self {
        Self {
            signed,
            unsigned,
            signer,
            timeout,
            submission: Mutex::new(()),
        }
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, Error>>,
    ) -> Result<T, Error> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| Error::Timeout(self.timeout))?
    }

    async fn submit(
        &self,
        provider: &AlloyProvider,
        request: TransactionRequest,
    ) -> Result<TransactionReceipt, Error> {
        let pending = {
            let _submission = self.submission.lock().await;
            provider.send_transaction(request).await?
        };
        let tx_hash = *pending.tx_hash();
        tracing::debug!(?tx_hash, "submitted transaction");

        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            return Err(Error::Reverted(tx_hash));
        }
        tracing::debug!(
            ?tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "transaction confirmed"
        );
        Ok(receipt)
    }

    async fn node_request(&self, method: &'static str, account: Address) -> Result<(), Error> {
        // Hardhat answers `true`, anvil answers `null`.
        let _: serde_json::Value = self
            .unsigned
            .raw_request(method.into(), (account,))
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Ledger for AlloyLedger {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn deploy(&self, code: Bytes) -> Result<Address, Error> {
        self.bounded(async {
            let request = TransactionRequest::default().with_deploy_code(code);
            let receipt = self.submit(&self.signed, request).await?;
            receipt
                .contract_address
                .ok_or(Error::NoContractAddress(receipt.transaction_hash))
        })
        .await
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error> {
        self.bounded(async {
            let request = TransactionRequest::default().with_to(to).with_input(data);
            Ok(self.signed.call(request).await?)
        })
        .await
    }

    async fn send(&self, tx: Transaction) -> Result<TxHash, Error> {
        self.bounded(async {
            let mut request = TransactionRequest::default()
                .with_to(tx.to)
                .with_input(tx.data);
            if let Some(gas_limit) = tx.gas_limit {
                request = request.with_gas_limit(gas_limit);
            }
            let provider = match tx.from {
                Some(from) if from != self.signer => {
                    request = request.with_from(from);
                    &self.unsigned
                }
                _ => &self.signed,
            };
            let receipt = self.submit(provider, request).await?;
            Ok(receipt.transaction_hash)
        })
        .await
    }

    async fn impersonate(&self, account: Address) -> Result<(), Error> {
        self.bounded(self.node_request("hardhat_impersonateAccount", account))
            .await
    }

    async fn stop_impersonating(&self, account: Address) -> Result<(), Error> {
        self.bounded(self.node_request("hardhat_stopImpersonatingAccount", account))
            .await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::alloy::mocked_provider,
        alloy::{
            primitives::{B256, address},
            providers::mock::Asserter,
        },
        serde_json::json,
    };

    const SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const TX_HASH: TxHash = TxHash::repeat_byte(0x09);
    const DEPLOYED: Address = Address::repeat_byte(0x42);

    fn receipt(success: bool, contract_address: Option<Address>) -> serde_json::Value {
        json!({
            "type": "0x2",
            "status": if success { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0x0b),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x1",
            "from": SIGNER,
            "to": if contract_address.is_some() { None } else { Some(Address::repeat_byte(1)) },
            "contractAddress": contract_address,
        })
    }

    /// Queues the submission of a transaction followed by its receipt. The
    /// receipt is queued more than once to cover receipt polling.
    fn push_submission(asserter: &Asserter, receipt: serde_json::Value) {
        asserter.push_success(&TX_HASH);
        for _ in 0..3 {
            asserter.push_success(&receipt);
        }
    }

    fn transaction() -> Transaction {
        Transaction {
            to: Address::repeat_byte(1),
            data: Bytes::new(),
            from: None,
            gas_limit: Some(100_000),
        }
    }

    fn ledger(asserter: &Asserter) -> AlloyLedger {
        AlloyLedger::from_providers(
            mocked_provider(asserter.clone()),
            mocked_provider(asserter.clone()),
            SIGNER,
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn forwards_call_results() {
        let asserter = Asserter::new();
        let output = Bytes::from(vec![0u8; 32]);
        asserter.push_success(&output);

        let result = ledger(&asserter)
            .call(Address::repeat_byte(1), Bytes::new())
            .await
            .unwrap();
        assert_eq!(result, output);
    }

    #[tokio::test]
    async fn impersonation_accepts_hardhat_and_anvil_responses() {
        let asserter = Asserter::new();
        asserter.push_success(&true);
        asserter.push_success(&serde_json::Value::Null);

        let ledger = ledger(&asserter);
        let account = Address::repeat_byte(7);
        ledger.impersonate(account).await.unwrap();
        ledger.stop_impersonating(account).await.unwrap();
    }

    #[tokio::test]
    async fn node_failures_are_node_errors() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("execution reverted");

        let result = ledger(&asserter)
            .call(Address::repeat_byte(1), Bytes::new())
            .await;
        assert!(matches!(result, Err(Error::Node(_))));
    }

    #[tokio::test]
    async fn exposes_signer() {
        assert_eq!(ledger(&Asserter::new()).signer(), SIGNER);
    }

    #[tokio::test]
    async fn confirmed_transaction_returns_hash() {
        let asserter = Asserter::new();
        push_submission(&asserter, receipt(true, None));

        let tx_hash = ledger(&asserter).send(transaction()).await.unwrap();
        assert_eq!(tx_hash, TX_HASH);
    }

    #[tokio::test]
    async fn failed_status_is_a_revert() {
        let asserter = Asserter::new();
        push_submission(&asserter, receipt(false, None));

        let result = ledger(&asserter).send(transaction()).await;
        assert!(matches!(result, Err(Error::Reverted(hash)) if hash == TX_HASH));
    }

    #[tokio::test]
    async fn deploy_returns_created_address() {
        let asserter = Asserter::new();
        push_submission(&asserter, receipt(true, Some(DEPLOYED)));

        let address = ledger(&asserter)
            .deploy(Bytes::from_static(&[0x60, 0x01]))
            .await
            .unwrap();
        assert_eq!(address, DEPLOYED);
    }

    #[tokio::test]
    async fn deploy_without_contract_address_fails() {
        let asserter = Asserter::new();
        push_submission(&asserter, receipt(true, None));

        let result = ledger(&asserter)
            .deploy(Bytes::from_static(&[0x60, 0x01]))
            .await;
        assert!(matches!(result, Err(Error::NoContractAddress(hash)) if hash == TX_HASH));
    }

    #[tokio::test(start_paused = true)]
    async fn unresolved_operations_time_out() {
        let ledger = ledger(&Asserter::new());
        let result = ledger
            .bounded(std::future::pending::<Result<(), Error>>())
            .await;
        assert!(matches!(result, Err(Error::Timeout(timeout)) if timeout == Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn submissions_wait_for_the_submission_lock() {
        let asserter = Asserter::new();
        let ledger = ledger(&asserter);

        let submission = ledger.submission.lock().await;
        let result = ledger.send(transaction()).await;
        assert!(matches!(result, Err(Error::Timeout(_))));
        drop(submission);

        push_submission(&asserter, receipt(true, None));
        assert_eq!(ledger.send(transaction()).await.unwrap(), TX_HASH);
    }
}
