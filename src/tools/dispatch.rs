// src/tools/dispatch.rs
//
// Name -> handler table. Live-call tools query the node or PXE through the
// client; instruction tools render a CLI command without any I/O.

use std::collections::HashMap;

use futures::future::{BoxFuture, FutureExt};
use lazy_static::lazy_static;
use serde_json::{json, to_value, Value};
use tracing::debug;

use super::{commands, DispatchError};
use crate::aztec::models::LogFilter;
use crate::aztec::AztecClient;
use crate::utils::{get_optional_str, get_optional_u64, get_required_arg, Args};

pub type LiveFuture<'a> = BoxFuture<'a, Result<Value, DispatchError>>;
pub type LiveHandler = for<'a> fn(&'a AztecClient, &'a Args) -> LiveFuture<'a>;
pub type InstructionHandler = fn(&Args) -> Result<Value, DispatchError>;

#[derive(Clone, Copy)]
pub enum ToolHandler {
    /// Performs one or more RPC calls and shapes the result.
    LiveCall(LiveHandler),
    /// Returns `{instruction, command, ...}` for the user to run themselves.
    InstructionSynthesis(InstructionHandler),
}

impl ToolHandler {
    pub fn is_live(&self) -> bool {
        matches!(self, ToolHandler::LiveCall(_))
    }
}

lazy_static! {
    static ref HANDLERS: HashMap<&'static str, ToolHandler> = {
        use ToolHandler::{InstructionSynthesis as Cli, LiveCall as Live};

        let entries: [(&'static str, ToolHandler); 47] = [
            // network
            ("aztec_get_node_info", Live(get_node_info)),
            ("aztec_get_block_number", Live(get_block_number)),
            ("aztec_get_block", Live(get_block)),
            ("aztec_get_current_base_fee", Live(get_current_base_fee)),
            ("aztec_get_logs", Live(get_logs)),
            ("aztec_get_l1_contract_addresses", Live(get_l1_contract_addresses)),
            ("aztec_get_protocol_contract_addresses", Live(get_protocol_contract_addresses)),
            ("aztec_health_check", Live(health_check)),
            // accounts
            ("aztec_get_accounts", Live(get_accounts)),
            ("aztec_create_account", Cli(commands::create_account)),
            ("aztec_deploy_account", Cli(commands::deploy_account)),
            ("aztec_register_sender", Live(register_sender)),
            ("aztec_get_account_public_key", Live(get_account_public_key)),
            ("aztec_import_test_accounts", Cli(commands::import_test_accounts)),
            // contracts
            ("aztec_deploy_contract", Cli(commands::deploy_contract)),
            ("aztec_register_contract", Cli(commands::register_contract)),
            ("aztec_get_contract_info", Live(get_contract_info)),
            ("aztec_inspect_contract", Cli(commands::inspect_contract)),
            ("aztec_list_example_contracts", Live(list_example_contracts)),
            ("aztec_compute_selector", Cli(commands::compute_selector)),
            ("aztec_is_contract_deployed", Live(is_contract_deployed)),
            // transactions
            ("aztec_send_transaction", Cli(commands::send_transaction)),
            ("aztec_simulate_transaction", Cli(commands::simulate_transaction)),
            ("aztec_get_transaction_receipt", Live(get_transaction_receipt)),
            ("aztec_get_pending_transactions", Live(get_pending_transactions)),
            ("aztec_estimate_gas", Cli(commands::estimate_gas)),
            ("aztec_create_authwit", Cli(commands::create_authwit)),
            ("aztec_authorize_action", Cli(commands::authorize_action)),
            // bridge
            ("aztec_bridge_erc20", Cli(commands::bridge_erc20)),
            ("aztec_get_l1_balance", Cli(commands::get_l1_balance)),
            ("aztec_get_l1_to_l2_message_witness", Live(get_l1_to_l2_message_witness)),
            ("aztec_deploy_l1_contracts", Cli(commands::deploy_l1_contracts)),
            ("aztec_get_canonical_fpc_address", Cli(commands::get_canonical_fpc_address)),
            // validators
            ("aztec_add_validator", Cli(commands::add_validator)),
            ("aztec_remove_validator", Cli(commands::remove_validator)),
            ("aztec_get_sequencers", Cli(commands::get_sequencers)),
            ("aztec_advance_epoch", Cli(commands::advance_epoch)),
            ("aztec_prune_rollup", Cli(commands::prune_rollup)),
            // governance
            ("aztec_deposit_governance_tokens", Cli(commands::deposit_governance_tokens)),
            ("aztec_propose_governance", Cli(commands::propose_governance)),
            ("aztec_vote_on_proposal", Cli(commands::vote_on_proposal)),
            ("aztec_execute_proposal", Cli(commands::execute_proposal)),
            // crypto
            ("aztec_generate_keys", Cli(commands::generate_keys)),
            ("aztec_generate_secret_and_hash", Cli(commands::generate_secret_and_hash)),
            ("aztec_generate_bls_keypair", Cli(commands::generate_bls_keypair)),
            ("aztec_generate_p2p_key", Cli(commands::generate_p2p_key)),
            ("aztec_generate_l1_account", Cli(commands::generate_l1_account)),
        ];

        entries.into_iter().collect()
    };
}

/// Runs the tool `name` with `args`. Client failures are returned unchanged.
pub async fn handle_tool_call(client: &AztecClient, name: &str, args: &Args) -> Result<Value, DispatchError> {
    let handler = HANDLERS
        .get(name)
        .copied()
        .ok_or_else(|| DispatchError::UnknownOperation { name: name.to_string() })?;

    debug!(tool = name, live = handler.is_live(), "dispatching tool");

    match handler {
        ToolHandler::LiveCall(run) => run(client, args).await,
        ToolHandler::InstructionSynthesis(render) => render(args),
    }
}

/// Every registered tool name with its handler kind.
pub fn registered_tools() -> impl Iterator<Item = (&'static str, ToolHandler)> {
    HANDLERS.iter().map(|(name, handler)| (*name, *handler))
}

pub fn is_registered(name: &str) -> bool {
    HANDLERS.contains_key(name)
}

// --- Live handlers ---

fn get_node_info<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move { Ok(to_value(client.get_node_info().await?)?) }.boxed()
}

fn get_block_number<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move {
        let block_number = client.get_block_number().await?;
        Ok(json!({ "blockNumber": block_number }))
    }
    .boxed()
}

fn get_block<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let block = client.get_block(get_optional_u64(args, "blockNumber")?).await?;
        Ok(to_value(block)?)
    }
    .boxed()
}

fn get_current_base_fee<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move { Ok(to_value(client.get_current_base_fee().await?)?) }.boxed()
}

fn get_logs<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let filter = LogFilter {
            tx_hash: get_optional_str(args, "txHash"),
            from_block: get_optional_u64(args, "fromBlock")?,
            to_block: get_optional_u64(args, "toBlock")?,
            contract_address: get_optional_str(args, "contractAddress"),
            after_log: None,
        };
        Ok(to_value(client.get_logs(&filter).await?)?)
    }
    .boxed()
}

fn get_l1_contract_addresses<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move { Ok(to_value(client.get_l1_contract_addresses().await?)?) }.boxed()
}

fn get_protocol_contract_addresses<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move { Ok(to_value(client.get_protocol_contract_addresses().await?)?) }.boxed()
}

fn health_check<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move { Ok(to_value(client.health_check().await)?) }.boxed()
}

fn get_accounts<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move {
        let accounts = client.get_registered_accounts().await?;
        Ok(json!({ "accounts": accounts }))
    }
    .boxed()
}

fn register_sender<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let address: String = get_required_arg(args, "address")?;
        client.register_sender(&address).await?;
        Ok(json!({
            "success": true,
            "message": format!("Registered sender: {}", address),
        }))
    }
    .boxed()
}

fn get_account_public_key<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let address: String = get_required_arg(args, "address")?;
        let public_key = client.get_account_public_key(&address).await;
        Ok(json!({ "address": address, "publicKey": public_key }))
    }
    .boxed()
}

fn get_contract_info<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let address: String = get_required_arg(args, "address")?;
        match client.get_contract_instance(&address).await {
            Some(info) => Ok(to_value(info)?),
            None => Ok(json!({ "error": "Contract not found", "address": address })),
        }
    }
    .boxed()
}

fn list_example_contracts<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move {
        Ok(json!({
            "contracts": client.available_example_contracts(),
            "note": "These contracts are available from @aztec/noir-contracts.js",
            "usage": "Use with aztec-wallet deploy <ContractName> --from <account>",
        }))
    }
    .boxed()
}

fn is_contract_deployed<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let address: String = get_required_arg(args, "address")?;
        let deployed = client.is_contract_publicly_deployed(&address).await?;
        Ok(json!({ "address": address, "isDeployed": deployed }))
    }
    .boxed()
}

fn get_transaction_receipt<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let tx_hash: String = get_required_arg(args, "txHash")?;
        Ok(to_value(client.get_transaction_receipt(&tx_hash).await?)?)
    }
    .boxed()
}

fn get_pending_transactions<'a>(client: &'a AztecClient, _args: &'a Args) -> LiveFuture<'a> {
    async move {
        let pending = client.get_pending_txs().await?;
        Ok(json!({ "pendingTxs": pending }))
    }
    .boxed()
}

fn get_l1_to_l2_message_witness<'a>(client: &'a AztecClient, args: &'a Args) -> LiveFuture<'a> {
    async move {
        let contract_address: String = get_required_arg(args, "contractAddress")?;
        let message_hash: String = get_required_arg(args, "messageHash")?;
        let secret: String = get_required_arg(args, "secret")?;
        match client
            .get_l1_to_l2_message_witness(&contract_address, &message_hash, &secret)
            .await
        {
            Some(witness) => Ok(to_value(witness)?),
            None => Ok(json!({ "error": "Message witness not found", "messageHash": message_hash })),
        }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog;

    #[test]
    fn test_table_matches_catalog() {
        assert_eq!(registered_tools().count(), catalog::tool_count());
        for descriptor in catalog::tools() {
            assert!(is_registered(descriptor.name), "{} has no handler", descriptor.name);
        }
    }

    #[test]
    fn test_live_and_instruction_split() {
        let live = registered_tools().filter(|(_, h)| h.is_live()).count();
        assert_eq!(live, 17);
        assert_eq!(registered_tools().count() - live, 30);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let client = AztecClient::default();
        let err = handle_tool_call(&client, "aztec_teleport", &Args::new()).await.unwrap_err();
        assert!(err.is_unknown_operation());
        assert_eq!(err.to_string(), "Unknown tool: aztec_teleport");
    }

    #[tokio::test]
    async fn test_list_example_contracts_is_static() {
        let client = AztecClient::new("http://127.0.0.1:1", None, "http://127.0.0.1:1");
        let result = handle_tool_call(&client, "aztec_list_example_contracts", &Args::new())
            .await
            .unwrap();
        assert_eq!(result["contracts"].as_array().unwrap().len(), 23);
        assert_eq!(result["contracts"][0], "TokenContract");
    }
}
