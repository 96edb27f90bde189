// src/aztec/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- Node & network ---

/// Response of `node_getInfo`. Every known field is optional because node
/// releases add and drop them; anything else is kept in `extra` so
/// `aztec_get_node_info` returns it untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    #[serde(default)]
    pub node_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_contract_addresses: Option<L1ContractAddresses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_contract_addresses: Option<ProtocolContractAddresses>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct L1ContractAddresses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbox_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_juice_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staking_asset_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_juice_portal_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_issuer_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_distributor_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_proposer_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolContractAddresses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_registerer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_juice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_deployer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_call_entrypoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_count: Option<u64>,
    /// Header layout changes between protocol versions, so it is kept raw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaseFee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_per_da_gas: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_per_l2_gas: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Logs ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_log: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Accounts & contracts ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_address: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl AccountInfo {
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }
}

/// Result of `pxe_registerAccount`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAccount {
    pub address: String,
    #[serde(default)]
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialization_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_keys: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterContractOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,
}

// --- Transactions ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendTxOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulate_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTxOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tx_validation: Option<bool>,
}

/// Receipt status. Values outside the known set are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxStatus {
    Success,
    Failed,
    Pending,
    Dropped,
    Other(String),
}

impl From<String> for TxStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => TxStatus::Success,
            "failed" => TxStatus::Failed,
            "pending" => TxStatus::Pending,
            "dropped" => TxStatus::Dropped,
            _ => TxStatus::Other(value),
        }
    }
}

impl From<TxStatus> for String {
    fn from(status: TxStatus) -> Self {
        match status {
            TxStatus::Success => "success".to_string(),
            TxStatus::Failed => "failed".to_string(),
            TxStatus::Pending => "pending".to_string(),
            TxStatus::Dropped => "dropped".to_string(),
            TxStatus::Other(raw) => raw,
        }
    }
}

/// Receipt as the node returns it, before the tx hash is attached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub transaction_fee: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_hash: String,
    pub status: TxStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_fee: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<GasUsed>,
}

impl TransactionReceipt {
    pub fn from_raw(tx_hash: impl Into<String>, raw: RawReceipt) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            status: TxStatus::from(raw.status),
            block_number: raw.block_number,
            block_hash: raw.block_hash,
            error: raw.error,
            transaction_fee: raw.transaction_fee,
            gas_used: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GasUsed {
    pub da: u64,
    pub l2: u64,
    #[serde(rename = "teardownDA")]
    pub teardown_da: u64,
    #[serde(rename = "teardownL2")]
    pub teardown_l2: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaxFeesPerGas {
    pub da: u64,
    pub l2: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimate {
    pub gas_limits: GasUsed,
    pub max_fees_per_gas: MaxFeesPerGas,
    pub estimated_fee: String,
}

/// Raw `pxe_simulateTx` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    #[serde(default)]
    pub return_values: Option<Vec<Value>>,
    #[serde(default)]
    pub gas_used: Option<GasUsed>,
    #[serde(default)]
    pub logs: Option<Vec<LogEntry>>,
}

/// Outcome of a simulation. A failed simulation is a value, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<GasUsed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<LogEntry>>,
}

impl SimulationResult {
    pub fn succeeded(output: SimulationOutput) -> Self {
        Self {
            success: true,
            return_values: output.return_values,
            gas_used: output.gas_used,
            error: None,
            logs: output.logs,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            return_values: None,
            gas_used: None,
            error: Some(error.into()),
            logs: None,
        }
    }
}

// --- Auth witnesses & notes ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthWitness {
    pub witness: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    Active,
    Nullified,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteFilter {
    pub contract_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NoteStatus>,
}

// --- Sync, bridge & crypto ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_to_block: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct L1ToL2MessageWitness {
    pub message_hash: String,
    pub secret: String,
    pub index: u64,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecretAndHash {
    pub secret: String,
    pub hash: String,
}

// --- Health ---

/// Combined liveness of both endpoints. Supplementary fields are omitted,
/// not null, when they were skipped or could not be fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub node: bool,
    pub pxe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_status: Option<SyncStatus>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.node && self.pxe
    }
}

// --- Endpoint configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointUrls {
    pub pxe: String,
    pub node: String,
    pub l1: String,
}

/// Partial endpoint update: only present, non-empty fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointUpdate {
    #[serde(default)]
    pub pxe: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub l1: Option<String>,
}

impl EndpointUrls {
    pub fn apply(&mut self, update: EndpointUpdate) {
        fn merge(slot: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
        merge(&mut self.pxe, update.pxe);
        merge(&mut self.node, update.node);
        merge(&mut self.l1, update.l1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tx_status_passes_unknown_values_through() {
        let known: TxStatus = serde_json::from_value(json!("dropped")).unwrap();
        assert_eq!(known, TxStatus::Dropped);

        let unknown: TxStatus = serde_json::from_value(json!("reorged")).unwrap();
        assert_eq!(unknown, TxStatus::Other("reorged".into()));
        assert_eq!(serde_json::to_value(&unknown).unwrap(), json!("reorged"));
    }

    #[test]
    fn test_node_info_keeps_unknown_fields() {
        let info: NodeInfo = serde_json::from_value(json!({
            "nodeVersion": "1.2.0",
            "l1ChainId": 31337,
            "protocolVersion": 1,
            "rollupVersion": 42
        }))
        .unwrap();
        assert_eq!(info.l1_chain_id, Some(31337));
        assert!(info.l1_contract_addresses.is_none());
        assert_eq!(info.extra.get("rollupVersion"), Some(&json!(42)));

        let back = serde_json::to_value(&info).unwrap();
        assert_eq!(back["rollupVersion"], json!(42));
        assert!(back.get("enr").is_none());
    }

    #[test]
    fn test_node_info_without_protocol_version() {
        let raw = json!({
            "nodeVersion": "1.0.0",
            "l1ChainId": 11155111,
            "rollupVersion": 1714840162
        });
        let info: NodeInfo = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(info.l1_chain_id, Some(11155111));
        assert!(info.protocol_version.is_none());
        assert_eq!(serde_json::to_value(&info).unwrap(), raw);
    }

    #[test]
    fn test_upstream_shapes_pass_through() {
        let block = json!({"archive": {"root": "0x1"}, "header": {}});
        let decoded: BlockInfo = serde_json::from_value(block.clone()).unwrap();
        assert!(decoded.number.is_none());
        assert_eq!(serde_json::to_value(&decoded).unwrap(), block);

        let fee = json!({"feePerL2Gas": "0x10", "feePerDaGas": "0x0", "feePerBlobGas": 3});
        let decoded: BaseFee = serde_json::from_value(fee.clone()).unwrap();
        assert_eq!(decoded.fee_per_l2_gas, Some(json!("0x10")));
        assert_eq!(serde_json::to_value(&decoded).unwrap()["feePerBlobGas"], json!(3));

        let log = json!({"id": {"blockNumber": 3}, "log": {"data": ["0x1"]}});
        let decoded: LogEntry = serde_json::from_value(log.clone()).unwrap();
        assert!(decoded.contract_address.is_none());
        assert_eq!(serde_json::to_value(&decoded).unwrap(), log);

        let sync: SyncStatus = serde_json::from_value(json!({"blocks": 4})).unwrap();
        assert_eq!(sync.blocks, Some(4));
        assert!(sync.synced_to_block.is_none());
    }

    #[test]
    fn test_health_status_omits_missing_supplementary_fields() {
        let status = HealthStatus {
            node: false,
            pxe: false,
            block_number: None,
            sync_status: None,
        };
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"node": false, "pxe": false})
        );
    }

    #[test]
    fn test_endpoint_update_applies_present_fields_only() {
        let mut urls = EndpointUrls {
            pxe: "http://pxe".into(),
            node: "http://node".into(),
            l1: "http://l1".into(),
        };
        urls.apply(EndpointUpdate {
            pxe: None,
            node: Some("http://node-2".into()),
            l1: Some(String::new()),
        });
        assert_eq!(urls.pxe, "http://pxe");
        assert_eq!(urls.node, "http://node-2");
        assert_eq!(urls.l1, "http://l1");
    }

    #[test]
    fn test_gas_used_wire_names() {
        let gas: GasUsed = serde_json::from_value(json!({
            "da": 1, "l2": 2, "teardownDA": 3, "teardownL2": 4
        }))
        .unwrap();
        assert_eq!(gas.teardown_da, 3);
        assert_eq!(gas.teardown_l2, 4);
    }
}
