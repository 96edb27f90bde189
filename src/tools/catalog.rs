// src/tools/catalog.rs
//
// Static tool descriptors advertised through `tools/list`.

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Network,
    Account,
    Contract,
    Transaction,
    Bridge,
    Validator,
    Governance,
    Crypto,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 8] = [
        ToolCategory::Network,
        ToolCategory::Account,
        ToolCategory::Contract,
        ToolCategory::Transaction,
        ToolCategory::Bridge,
        ToolCategory::Validator,
        ToolCategory::Governance,
        ToolCategory::Crypto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Network => "network",
            ToolCategory::Account => "account",
            ToolCategory::Contract => "contract",
            ToolCategory::Transaction => "transaction",
            ToolCategory::Bridge => "bridge",
            ToolCategory::Validator => "validator",
            ToolCategory::Governance => "governance",
            ToolCategory::Crypto => "crypto",
        }
    }
}

/// One advertised tool. Serializes to the MCP `Tool` shape.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    #[serde(skip)]
    pub category: ToolCategory,
}

fn tool(category: ToolCategory, name: &'static str, description: &'static str, input_schema: Value) -> ToolDescriptor {
    ToolDescriptor {
        name,
        description,
        input_schema,
        category,
    }
}

fn no_args() -> Value {
    json!({ "type": "object", "properties": {}, "required": [] })
}

/// `contractAddress` / `functionName` / `args` / `from` schema shared by the
/// send, simulate and estimate tools.
fn contract_call_schema(from_description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "contractAddress": { "type": "string", "description": "Contract address" },
            "functionName": { "type": "string", "description": "Function name" },
            "args": { "type": "array", "description": "Function arguments", "items": { "type": "string" }, "default": [] },
            "from": { "type": "string", "description": from_description }
        },
        "required": ["contractAddress", "functionName", "from"]
    })
}

fn network_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Network as C;
    vec![
        tool(C, "aztec_get_node_info",
            "Get comprehensive information about the Aztec node including version, L1 chain ID, protocol version, and contract addresses",
            no_args()),
        tool(C, "aztec_get_block_number", "Get the current Aztec L2 block number", no_args()),
        tool(C, "aztec_get_block",
            "Get detailed block information by block number. Returns latest block if no number specified",
            json!({
                "type": "object",
                "properties": {
                    "blockNumber": { "type": "number", "description": "Block number to fetch. Leave empty for latest block" }
                },
                "required": []
            })),
        tool(C, "aztec_get_current_base_fee",
            "Get the current base fee for DA (Data Availability) and L2 gas", no_args()),
        tool(C, "aztec_get_logs",
            "Get public logs filtered by transaction hash, block range, or contract address",
            json!({
                "type": "object",
                "properties": {
                    "txHash": { "type": "string", "description": "Filter by transaction hash" },
                    "fromBlock": { "type": "number", "description": "Start block number (default: 1)" },
                    "toBlock": { "type": "number", "description": "End block number (default: latest)" },
                    "contractAddress": { "type": "string", "description": "Filter by contract address" }
                },
                "required": []
            })),
        tool(C, "aztec_get_l1_contract_addresses",
            "Get all L1 contract addresses including rollup, registry, inbox, outbox, fee juice, and governance contracts",
            no_args()),
        tool(C, "aztec_get_protocol_contract_addresses",
            "Get Aztec protocol contract addresses including class registerer, fee juice, instance deployer",
            no_args()),
        tool(C, "aztec_health_check",
            "Check the health status of Aztec node and PXE, including sync status", no_args()),
    ]
}

fn account_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Account as C;
    vec![
        tool(C, "aztec_get_accounts", "List all registered accounts in the PXE", no_args()),
        tool(C, "aztec_create_account",
            "Create a new Aztec account. Supports multiple account types: schnorr (default), ecdsasecp256r1, ecdsasecp256r1ssh, ecdsasecp256k1",
            json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "description": "Account type",
                        "enum": ["schnorr", "ecdsasecp256r1", "ecdsasecp256r1ssh", "ecdsasecp256k1"],
                        "default": "schnorr"
                    },
                    "alias": { "type": "string", "description": "Alias for the account (for easy reference)" },
                    "secretKey": { "type": "string", "description": "Optional secret key. Random if not provided" },
                    "publicDeploy": { "type": "boolean", "description": "Whether to publicly deploy the account contract", "default": false }
                },
                "required": []
            })),
        tool(C, "aztec_deploy_account", "Deploy an already registered Aztec account contract",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Address of the registered account to deploy" },
                    "skipInitialization": { "type": "boolean", "description": "Skip contract initialization", "default": false }
                },
                "required": ["address"]
            })),
        tool(C, "aztec_register_sender",
            "Register a sender address for note syncing. Required to receive notes from this address",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Sender address to register" }
                },
                "required": ["address"]
            })),
        tool(C, "aztec_get_account_public_key", "Get the public key for a registered account",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Account address" }
                },
                "required": ["address"]
            })),
        tool(C, "aztec_import_test_accounts",
            "Import pre-funded test accounts from the sandbox/devnet", no_args()),
    ]
}

fn contract_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Contract as C;
    vec![
        tool(C, "aztec_deploy_contract",
            "Deploy a compiled Noir contract to Aztec. Requires contract artifact and deployer account",
            json!({
                "type": "object",
                "properties": {
                    "artifact": { "type": "string", "description": "Contract artifact name (e.g., TokenContract) or path to compiled JSON" },
                    "args": { "type": "array", "description": "Constructor arguments", "items": { "type": "string" }, "default": [] },
                    "from": { "type": "string", "description": "Deployer account address or alias" },
                    "alias": { "type": "string", "description": "Alias for the deployed contract" },
                    "salt": { "type": "string", "description": "Deployment salt for deterministic addresses" },
                    "publicDeploy": { "type": "boolean", "description": "Publish the contract publicly", "default": false }
                },
                "required": ["artifact", "from"]
            })),
        tool(C, "aztec_register_contract", "Register an existing contract in the PXE to interact with it",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Contract address to register" },
                    "artifact": { "type": "string", "description": "Contract artifact name or path" },
                    "alias": { "type": "string", "description": "Alias for easy reference" },
                    "publicKey": { "type": "string", "description": "Encryption public key (for contracts receiving private notes)" }
                },
                "required": ["address", "artifact"]
            })),
        tool(C, "aztec_get_contract_info",
            "Get information about a deployed contract including class ID, deployer, and public keys",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Contract address" }
                },
                "required": ["address"]
            })),
        tool(C, "aztec_inspect_contract", "List all external callable functions for a contract artifact",
            json!({
                "type": "object",
                "properties": {
                    "artifact": { "type": "string", "description": "Contract artifact name or path to JSON file" }
                },
                "required": ["artifact"]
            })),
        tool(C, "aztec_list_example_contracts",
            "List all available example contracts from @aztec/noir-contracts.js", no_args()),
        tool(C, "aztec_compute_selector", "Compute the function selector for a given function signature",
            json!({
                "type": "object",
                "properties": {
                    "functionSignature": { "type": "string", "description": "Function signature (e.g., 'transfer(Field,Field)')" }
                },
                "required": ["functionSignature"]
            })),
        tool(C, "aztec_is_contract_deployed", "Check if a contract is publicly deployed on the network",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Contract address to check" }
                },
                "required": ["address"]
            })),
    ]
}

fn transaction_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Transaction as C;

    let mut send_schema = contract_call_schema("Sender account address or alias");
    send_schema["properties"]["authWitnesses"] = json!({
        "type": "array",
        "description": "Authorization witnesses for delegated calls",
        "items": { "type": "string" }
    });

    vec![
        tool(C, "aztec_send_transaction",
            "Send a transaction by calling a function on an Aztec contract (private or public)",
            send_schema),
        tool(C, "aztec_simulate_transaction",
            "Simulate a transaction without executing it. Returns gas estimation and potential errors",
            contract_call_schema("Sender account address or alias")),
        tool(C, "aztec_get_transaction_receipt",
            "Get the receipt for a transaction including status, block number, and fees",
            json!({
                "type": "object",
                "properties": {
                    "txHash": { "type": "string", "description": "Transaction hash" }
                },
                "required": ["txHash"]
            })),
        tool(C, "aztec_get_pending_transactions", "List all pending transactions in the PXE mempool", no_args()),
        tool(C, "aztec_estimate_gas", "Estimate gas costs for a transaction",
            contract_call_schema("Sender account")),
        tool(C, "aztec_create_authwit",
            "Create an authorization witness for delegated actions (private auth)",
            json!({
                "type": "object",
                "properties": {
                    "functionName": { "type": "string", "description": "Function to authorize" },
                    "caller": { "type": "string", "description": "Address authorized to call" },
                    "contractAddress": { "type": "string", "description": "Contract address" },
                    "args": { "type": "array", "description": "Function arguments", "items": { "type": "string" } },
                    "from": { "type": "string", "description": "Account creating the authwit" }
                },
                "required": ["functionName", "caller", "contractAddress", "from"]
            })),
        tool(C, "aztec_authorize_action",
            "Authorize a public call on behalf of an account (public auth)",
            json!({
                "type": "object",
                "properties": {
                    "functionName": { "type": "string", "description": "Function to authorize" },
                    "caller": { "type": "string", "description": "Address authorized to call" },
                    "contractAddress": { "type": "string", "description": "Contract address" },
                    "from": { "type": "string", "description": "Account authorizing the action" }
                },
                "required": ["functionName", "caller", "contractAddress", "from"]
            })),
    ]
}

fn bridge_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Bridge as C;
    vec![
        tool(C, "aztec_bridge_erc20", "Bridge ERC20 tokens from L1 Ethereum to Aztec L2",
            json!({
                "type": "object",
                "properties": {
                    "amount": { "type": "string", "description": "Amount to bridge" },
                    "recipient": { "type": "string", "description": "Aztec L2 recipient address" },
                    "tokenAddress": { "type": "string", "description": "L1 ERC20 token address" },
                    "portalAddress": { "type": "string", "description": "L1 portal contract address" },
                    "mint": { "type": "boolean", "description": "Mint tokens on L1 first (testnet only)", "default": false },
                    "private": { "type": "boolean", "description": "Use private bridging flow", "default": false }
                },
                "required": ["amount", "recipient"]
            })),
        tool(C, "aztec_get_l1_balance", "Get ERC20 token balance on L1 Ethereum for an address",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Ethereum address to check" },
                    "tokenAddress": { "type": "string", "description": "ERC20 token address" }
                },
                "required": ["address", "tokenAddress"]
            })),
        tool(C, "aztec_get_l1_to_l2_message_witness",
            "Get the witness for claiming an L1 to L2 message on Aztec",
            json!({
                "type": "object",
                "properties": {
                    "contractAddress": { "type": "string", "description": "Aztec contract address" },
                    "messageHash": { "type": "string", "description": "L1 to L2 message hash" },
                    "secret": { "type": "string", "description": "Secret for claiming" }
                },
                "required": ["contractAddress", "messageHash", "secret"]
            })),
        tool(C, "aztec_deploy_l1_contracts",
            "Deploy all L1 infrastructure contracts for a new Aztec network (admin only)",
            json!({
                "type": "object",
                "properties": {
                    "privateKey": { "type": "string", "description": "L1 deployer private key" },
                    "mnemonic": { "type": "string", "description": "L1 deployer mnemonic (alternative to privateKey)" },
                    "testAccounts": { "type": "boolean", "description": "Initialize test accounts with fee juice", "default": false },
                    "sponsoredFpc": { "type": "boolean", "description": "Deploy sponsored FPC contract", "default": false }
                },
                "required": []
            })),
        tool(C, "aztec_get_canonical_fpc_address",
            "Get the canonical SponsoredFPC address for the current network version", no_args()),
    ]
}

fn validator_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Validator as C;
    vec![
        tool(C, "aztec_add_validator", "Add a validator to the L1 rollup contract via direct deposit",
            json!({
                "type": "object",
                "properties": {
                    "attester": { "type": "string", "description": "Ethereum address of the attester" },
                    "withdrawer": { "type": "string", "description": "Ethereum address of the withdrawer" },
                    "blsSecretKey": { "type": "string", "description": "BN254 scalar field element for BLS signatures" },
                    "privateKey": { "type": "string", "description": "L1 private key for the transaction" }
                },
                "required": ["attester", "withdrawer", "blsSecretKey"]
            })),
        tool(C, "aztec_remove_validator", "Remove a validator from the L1 rollup contract",
            json!({
                "type": "object",
                "properties": {
                    "validator": { "type": "string", "description": "Validator address to remove" },
                    "privateKey": { "type": "string", "description": "L1 private key with permission" }
                },
                "required": ["validator"]
            })),
        tool(C, "aztec_get_sequencers", "List registered sequencers on the L1 rollup contract",
            json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "Command: list, who-next",
                        "enum": ["list", "who-next"],
                        "default": "list"
                    },
                    "blockNumber": { "type": "number", "description": "Block number to query next sequencer for" }
                },
                "required": []
            })),
        tool(C, "aztec_advance_epoch",
            "Use L1 cheat codes to warp time to the next epoch (devnet/sandbox only)", no_args()),
        tool(C, "aztec_prune_rollup", "Prune the pending chain on the rollup contract",
            json!({
                "type": "object",
                "properties": {
                    "rollupAddress": { "type": "string", "description": "Rollup contract address" },
                    "privateKey": { "type": "string", "description": "L1 private key with permission" }
                },
                "required": []
            })),
    ]
}

fn governance_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Governance as C;
    vec![
        tool(C, "aztec_deposit_governance_tokens", "Deposit governance tokens to participate in voting",
            json!({
                "type": "object",
                "properties": {
                    "amount": { "type": "string", "description": "Amount of tokens to deposit" },
                    "recipient": { "type": "string", "description": "Recipient of voting power" },
                    "mint": { "type": "boolean", "description": "Mint tokens first (testnet only)", "default": false },
                    "privateKey": { "type": "string", "description": "L1 private key" }
                },
                "required": ["amount"]
            })),
        tool(C, "aztec_propose_governance", "Create a governance proposal with token lock",
            json!({
                "type": "object",
                "properties": {
                    "payloadAddress": { "type": "string", "description": "Address of the payload contract" },
                    "privateKey": { "type": "string", "description": "L1 private key" }
                },
                "required": ["payloadAddress"]
            })),
        tool(C, "aztec_vote_on_proposal", "Vote on a governance proposal",
            json!({
                "type": "object",
                "properties": {
                    "proposalId": { "type": "string", "description": "Proposal ID to vote on" },
                    "voteAmount": { "type": "string", "description": "Amount of voting power to use" },
                    "inFavor": { "type": "boolean", "description": "Vote in favor (true) or against (false)" },
                    "privateKey": { "type": "string", "description": "L1 private key" }
                },
                "required": ["proposalId", "voteAmount", "inFavor"]
            })),
        tool(C, "aztec_execute_proposal", "Execute a passed governance proposal",
            json!({
                "type": "object",
                "properties": {
                    "proposalId": { "type": "string", "description": "Proposal ID to execute" },
                    "wait": { "type": "boolean", "description": "Wait until proposal is executable", "default": false },
                    "privateKey": { "type": "string", "description": "L1 private key" }
                },
                "required": ["proposalId"]
            })),
    ]
}

fn crypto_tools() -> Vec<ToolDescriptor> {
    use ToolCategory::Crypto as C;
    let json_output = || {
        json!({
            "type": "object",
            "properties": {
                "json": { "type": "boolean", "description": "Output in JSON format", "default": true }
            },
            "required": []
        })
    };
    vec![
        tool(C, "aztec_generate_keys",
            "Generate a new encryption and signing key pair for Aztec accounts", json_output()),
        tool(C, "aztec_generate_secret_and_hash",
            "Generate an arbitrary secret (Fr field element) and its hash using Aztec defaults", no_args()),
        tool(C, "aztec_generate_bls_keypair", "Generate a BLS keypair for validator operations",
            json!({
                "type": "object",
                "properties": {
                    "mnemonic": { "type": "string", "description": "Mnemonic for BLS derivation" },
                    "ikm": { "type": "string", "description": "Initial keying material (alternative to mnemonic)" },
                    "blsPath": { "type": "string", "description": "EIP-2334 path (default: m/12381/3600/0/0/0)" },
                    "compressed": { "type": "boolean", "description": "Output compressed public key", "default": false }
                },
                "required": []
            })),
        tool(C, "aztec_generate_p2p_key", "Generate a LibP2P peer private key for P2P networking", no_args()),
        tool(C, "aztec_generate_l1_account",
            "Generate a new Ethereum L1 account (private key and address)", json_output()),
    ]
}

lazy_static! {
    static ref TOOLS: Vec<ToolDescriptor> = {
        let mut all = Vec::new();
        all.extend(network_tools());
        all.extend(account_tools());
        all.extend(contract_tools());
        all.extend(transaction_tools());
        all.extend(bridge_tools());
        all.extend(validator_tools());
        all.extend(governance_tools());
        all.extend(crypto_tools());
        all
    };
}

/// Every descriptor, grouped by category in catalog order.
pub fn tools() -> &'static [ToolDescriptor] {
    &TOOLS
}

/// Category name to tool names, in catalog order.
pub fn tool_categories() -> Vec<(ToolCategory, Vec<&'static str>)> {
    ToolCategory::ALL
        .iter()
        .map(|category| {
            let names = TOOLS
                .iter()
                .filter(|t| t.category == *category)
                .map(|t| t.name)
                .collect();
            (*category, names)
        })
        .collect()
}

pub fn find_tool(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.name == name)
}

pub fn tool_count() -> usize {
    TOOLS.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size_and_category_counts() {
        assert_eq!(tool_count(), 47);
        let counts: Vec<(&str, usize)> = tool_categories()
            .iter()
            .map(|(c, names)| (c.as_str(), names.len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("network", 8),
                ("account", 6),
                ("contract", 7),
                ("transaction", 7),
                ("bridge", 5),
                ("validator", 5),
                ("governance", 4),
                ("crypto", 5),
            ]
        );
    }

    #[test]
    fn test_names_are_unique_and_prefixed() {
        let names: HashSet<&str> = tools().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), tools().len());
        assert!(tools().iter().all(|t| t.name.starts_with("aztec_")));
    }

    #[test]
    fn test_categories_partition_catalog() {
        let mut seen = HashSet::new();
        for (_, names) in tool_categories() {
            for name in names {
                assert!(seen.insert(name), "{} listed twice", name);
            }
        }
        assert_eq!(seen.len(), tool_count());
    }

    #[test]
    fn test_schemas_are_objects_with_consistent_required() {
        for t in tools() {
            let schema = &t.input_schema;
            assert_eq!(schema["type"], "object", "{}", t.name);
            let properties = schema["properties"].as_object().expect("properties");
            let required = schema["required"].as_array().expect("required");
            for key in required {
                let key = key.as_str().unwrap();
                assert!(properties.contains_key(key), "{} requires unknown '{}'", t.name, key);
            }
        }
    }

    #[test]
    fn test_enum_defaults_belong_to_enum() {
        for (tool_name, field, default) in [
            ("aztec_create_account", "type", "schnorr"),
            ("aztec_get_sequencers", "command", "list"),
        ] {
            let prop = &find_tool(tool_name).unwrap().input_schema["properties"][field];
            let values = prop["enum"].as_array().unwrap();
            assert_eq!(prop["default"], default);
            assert!(values.contains(&prop["default"]));
        }
    }

    #[test]
    fn test_descriptor_serializes_to_mcp_shape() {
        let value = serde_json::to_value(find_tool("aztec_get_block").unwrap()).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "description", "inputSchema"]);
        assert!(find_tool("aztec_nope").is_none());
    }
}
