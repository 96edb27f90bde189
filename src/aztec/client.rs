//! Typed client for an Aztec node and PXE.
//!
//! Each method maps one capability onto an endpoint role, an RPC method name
//! and a parameter shape. Existence-style lookups (public keys, contract
//! instances, auth witnesses, L1→L2 message witnesses) return `None` on
//! any client failure: a missing entry is a normal answer for them.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{json, Value};

use super::{
    error::{ClientError, ClientResult},
    models::*,
    rpc::RpcTransport,
};

pub const DEFAULT_PXE_URL: &str = "http://localhost:8080";
pub const DEFAULT_NODE_URL: &str = "http://localhost:8080";
pub const DEFAULT_L1_RPC_URL: &str = "http://localhost:8545";

const EXAMPLE_CONTRACTS: [&str; 23] = [
    "TokenContract",
    "TokenBridgeContract",
    "CounterContract",
    "EasyPrivateVotingContract",
    "EscrowContract",
    "CardGameContract",
    "CrowdfundingContract",
    "DocsExampleContract",
    "EcdsaKAccountContract",
    "EcdsaRAccountContract",
    "FPCContract",
    "InclusionProofsContract",
    "MultiCallEntrypointContract",
    "NFTContract",
    "PendingNoteHashesContract",
    "PriceFeedContract",
    "SchnorrAccountContract",
    "SchnorrHardcodedAccountContract",
    "SchnorrSingleKeyAccountContract",
    "SlowTreeContract",
    "StatefulTestContract",
    "TestContract",
    "UniswapContract",
];

/// Client for the node and PXE JSON-RPC endpoints.
#[derive(Clone, Debug)]
pub struct AztecClient {
    transport: RpcTransport,
    endpoints: Arc<RwLock<EndpointUrls>>,
}

impl Default for AztecClient {
    fn default() -> Self {
        Self::new(DEFAULT_PXE_URL, None, DEFAULT_L1_RPC_URL)
    }
}

impl AztecClient {
    /// Creates a client. Without a node URL the node role is served by the
    /// PXE URL, which is how the sandbox exposes both.
    pub fn new(
        pxe_url: impl Into<String>,
        node_url: Option<String>,
        l1_rpc_url: impl Into<String>,
    ) -> Self {
        Self::with_transport(RpcTransport::new(), pxe_url, node_url, l1_rpc_url)
    }

    pub fn with_transport(
        transport: RpcTransport,
        pxe_url: impl Into<String>,
        node_url: Option<String>,
        l1_rpc_url: impl Into<String>,
    ) -> Self {
        let pxe = pxe_url.into();
        let node = node_url.unwrap_or_else(|| pxe.clone());
        Self {
            transport,
            endpoints: Arc::new(RwLock::new(EndpointUrls {
                pxe,
                node,
                l1: l1_rpc_url.into(),
            })),
        }
    }

    pub fn transport(&self) -> &RpcTransport {
        &self.transport
    }

    fn pxe_url(&self) -> String {
        self.endpoints.read().unwrap_or_else(PoisonError::into_inner).pxe.clone()
    }

    fn node_url(&self) -> String {
        self.endpoints.read().unwrap_or_else(PoisonError::into_inner).node.clone()
    }

    async fn pxe<T: serde::de::DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> ClientResult<T> {
        self.transport.call(&self.pxe_url(), method, params).await
    }

    async fn node<T: serde::de::DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> ClientResult<T> {
        self.transport.call(&self.node_url(), method, params).await
    }

    // --- Node & network ---

    pub async fn get_node_info(&self) -> ClientResult<NodeInfo> {
        self.node("node_getInfo", vec![]).await
    }

    pub async fn get_block_number(&self) -> ClientResult<u64> {
        self.node("aztec_getBlockNumber", vec![]).await
    }

    /// Fetches a block by number, or the latest one when `block_number` is `None`.
    pub async fn get_block(&self, block_number: Option<u64>) -> ClientResult<Option<BlockInfo>> {
        let params = block_number.map(|n| vec![json!(n)]).unwrap_or_default();
        self.node("aztec_getBlock", params).await
    }

    pub async fn get_current_base_fee(&self) -> ClientResult<BaseFee> {
        self.node("aztec_getCurrentBaseFee", vec![]).await
    }

    pub async fn get_chain_id(&self) -> ClientResult<u64> {
        self.get_node_info()
            .await?
            .l1_chain_id
            .ok_or_else(|| ClientError::Decode("node info has no l1ChainId".to_string()))
    }

    pub async fn get_protocol_version(&self) -> ClientResult<u64> {
        self.get_node_info()
            .await?
            .protocol_version
            .ok_or_else(|| ClientError::Decode("node info has no protocolVersion".to_string()))
    }

    pub async fn get_l1_contract_addresses(&self) -> ClientResult<L1ContractAddresses> {
        Ok(self.get_node_info().await?.l1_contract_addresses.unwrap_or_default())
    }

    pub async fn get_protocol_contract_addresses(&self) -> ClientResult<ProtocolContractAddresses> {
        Ok(self
            .get_node_info()
            .await?
            .protocol_contract_addresses
            .unwrap_or_default())
    }

    // --- Logs ---

    pub async fn get_logs(&self, filter: &LogFilter) -> ClientResult<Vec<LogEntry>> {
        self.pxe("pxe_getLogs", vec![serde_json::to_value(filter)?]).await
    }

    // --- Accounts ---

    pub async fn get_registered_accounts(&self) -> ClientResult<Vec<AccountInfo>> {
        let addresses: Vec<String> = self.pxe("pxe_getRegisteredAccounts", vec![]).await?;
        Ok(addresses.into_iter().map(AccountInfo::from_address).collect())
    }

    pub async fn register_account(&self, secret_key: &str, partial_address: &str) -> ClientResult<AccountInfo> {
        let registered: RegisteredAccount = self
            .pxe("pxe_registerAccount", vec![json!(secret_key), json!(partial_address)])
            .await?;
        Ok(AccountInfo {
            address: registered.address,
            public_key: registered.public_key,
            partial_address: Some(partial_address.to_string()),
            ..Default::default()
        })
    }

    pub async fn get_account_public_key(&self, address: &str) -> Option<String> {
        self.pxe::<Option<String>>("pxe_getRegisteredAccountPublicKey", vec![json!(address)])
            .await
            .ok()
            .flatten()
    }

    pub async fn register_sender(&self, address: &str) -> ClientResult<()> {
        self.transport
            .request(&self.pxe_url(), "pxe_registerSender", vec![json!(address)])
            .await
            .map(drop)
    }

    // --- Contracts ---

    pub async fn get_contract_instance(&self, address: &str) -> Option<ContractInfo> {
        self.pxe::<Option<ContractInfo>>("pxe_getContractInstance", vec![json!(address)])
            .await
            .ok()
            .flatten()
    }

    pub async fn get_contract_class(&self, class_id: &str) -> ClientResult<Value> {
        self.pxe("pxe_getContractClass", vec![json!(class_id)]).await
    }

    pub async fn register_contract(
        &self,
        address: &str,
        artifact: Value,
        options: Option<&RegisterContractOptions>,
    ) -> ClientResult<()> {
        let options = serde_json::to_value(options)?;
        self.transport
            .request(
                &self.pxe_url(),
                "pxe_registerContract",
                vec![json!(address), artifact, options],
            )
            .await
            .map(drop)
    }

    pub async fn is_contract_class_publicly_registered(&self, class_id: &str) -> ClientResult<bool> {
        self.node("aztec_isContractClassPubliclyRegistered", vec![json!(class_id)])
            .await
    }

    pub async fn is_contract_publicly_deployed(&self, address: &str) -> ClientResult<bool> {
        self.node("aztec_isContractPubliclyDeployed", vec![json!(address)])
            .await
    }

    // --- Transactions ---

    /// Submits a transaction and returns its hash.
    pub async fn send_transaction(&self, tx_request: Value, options: Option<&SendTxOptions>) -> ClientResult<String> {
        let options = serde_json::to_value(options)?;
        self.pxe("pxe_sendTx", vec![tx_request, options]).await
    }

    /// Simulates a transaction. Upstream failures come back as
    /// `SimulationResult { success: false, error }`, never as `Err`.
    pub async fn simulate_transaction(
        &self,
        tx_request: Value,
        options: Option<&SimulateTxOptions>,
    ) -> SimulationResult {
        let options = match serde_json::to_value(options) {
            Ok(options) => options,
            Err(e) => return SimulationResult::failed(e.to_string()),
        };
        match self
            .pxe::<SimulationOutput>("pxe_simulateTx", vec![tx_request, options])
            .await
        {
            Ok(output) => SimulationResult::succeeded(output),
            Err(e) => SimulationResult::failed(e.to_string()),
        }
    }

    pub async fn get_transaction_receipt(&self, tx_hash: &str) -> ClientResult<TransactionReceipt> {
        let raw: RawReceipt = self
            .node("aztec_getTransactionReceipt", vec![json!(tx_hash)])
            .await?;
        Ok(TransactionReceipt::from_raw(tx_hash, raw))
    }

    pub async fn get_tx_effect(&self, tx_hash: &str) -> ClientResult<Value> {
        self.node("aztec_getTxEffect", vec![json!(tx_hash)]).await
    }

    pub async fn get_pending_txs(&self) -> ClientResult<Vec<String>> {
        self.pxe("pxe_getPendingTxs", vec![]).await
    }

    pub async fn estimate_gas(&self, tx_request: Value) -> ClientResult<GasEstimate> {
        self.pxe("pxe_estimateGas", vec![tx_request]).await
    }

    // --- Auth witnesses ---

    pub async fn create_auth_witness(&self, message_hash: &str, secret_key: &str) -> ClientResult<AuthWitness> {
        self.pxe(
            "pxe_createAuthWitness",
            vec![json!(message_hash), json!(secret_key)],
        )
        .await
    }

    pub async fn add_auth_witness(&self, witness: &str) -> ClientResult<()> {
        self.transport
            .request(&self.pxe_url(), "pxe_addAuthWitness", vec![json!(witness)])
            .await
            .map(drop)
    }

    pub async fn get_auth_witness(&self, message_hash: &str) -> Option<String> {
        self.pxe::<Option<String>>("pxe_getAuthWitness", vec![json!(message_hash)])
            .await
            .ok()
            .flatten()
    }

    // --- Notes ---

    pub async fn get_notes(&self, filter: &NoteFilter) -> ClientResult<Vec<Value>> {
        self.pxe("pxe_getNotes", vec![serde_json::to_value(filter)?]).await
    }

    pub async fn add_note(&self, note: Value) -> ClientResult<()> {
        self.transport
            .request(&self.pxe_url(), "pxe_addNote", vec![note])
            .await
            .map(drop)
    }

    // --- Sync status ---

    pub async fn get_sync_status(&self) -> ClientResult<SyncStatus> {
        self.pxe("pxe_getSyncStatus", vec![]).await
    }

    pub async fn is_global_state_synchronized(&self) -> ClientResult<bool> {
        self.pxe("pxe_isGlobalStateSynchronized", vec![]).await
    }

    pub async fn is_account_synchronized(&self, address: &str) -> ClientResult<bool> {
        self.pxe("pxe_isAccountStateSynchronized", vec![json!(address)])
            .await
    }

    // --- L1 → L2 messaging ---

    pub async fn get_l1_to_l2_message_witness(
        &self,
        contract_address: &str,
        message_hash: &str,
        secret: &str,
    ) -> Option<L1ToL2MessageWitness> {
        self.pxe::<Option<L1ToL2MessageWitness>>(
            "pxe_getL1ToL2MembershipWitness",
            vec![json!(contract_address), json!(message_hash), json!(secret)],
        )
        .await
        .ok()
        .flatten()
    }

    // --- Secrets ---

    pub async fn compute_secret_hash(&self, secret: &str) -> ClientResult<String> {
        self.pxe("pxe_computeSecretHash", vec![json!(secret)]).await
    }

    /// Asks the PXE for a random secret, then for its hash. The second call
    /// is only made when the first one succeeded.
    pub async fn generate_secret_and_hash(&self) -> ClientResult<SecretAndHash> {
        let secret: String = self.pxe("pxe_generateSecret", vec![]).await?;
        let hash = self.compute_secret_hash(&secret).await?;
        Ok(SecretAndHash { secret, hash })
    }

    // --- Health ---

    /// The node is live when `node_getInfo` answers, whatever its shape.
    pub async fn is_node_healthy(&self) -> bool {
        self.transport
            .request(&self.node_url(), "node_getInfo", vec![])
            .await
            .is_ok()
    }

    pub async fn is_pxe_healthy(&self) -> bool {
        self.get_registered_accounts().await.is_ok()
    }

    /// Probes both endpoints concurrently, then adds block height and sync
    /// status for whichever side answered. Supplementary failures leave the
    /// field unset.
    pub async fn health_check(&self) -> HealthStatus {
        let (node, pxe) = futures::join!(self.is_node_healthy(), self.is_pxe_healthy());

        let block_number = if node {
            self.get_block_number().await.ok()
        } else {
            None
        };
        let sync_status = if pxe {
            self.get_sync_status().await.ok()
        } else {
            None
        };

        HealthStatus {
            node,
            pxe,
            block_number,
            sync_status,
        }
    }

    // --- Static catalog ---

    pub fn available_example_contracts(&self) -> Vec<&'static str> {
        EXAMPLE_CONTRACTS.to_vec()
    }

    // --- Endpoint configuration ---

    pub fn urls(&self) -> EndpointUrls {
        self.endpoints.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Applies the present, non-empty fields of `update` in one step.
    pub fn set_urls(&self, update: EndpointUpdate) {
        self.endpoints
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(update);
    }
}
