// src/tools/commands.rs
//
// Tools backed by the `aztec` / `aztec-wallet` CLIs. They never touch the
// network: each one renders the exact command line for its arguments and
// returns it next to a short instruction and the arguments it echoed.

use serde_json::{json, Value};

use super::DispatchError;
use crate::utils::{
    get_flag, get_flag_default_on, get_optional_str, get_optional_u64, get_required_arg,
    get_string_list, Args,
};

const AZTEC: &str = "aztec";
const AZTEC_WALLET: &str = "aztec-wallet";

/// Builder for a single CLI command line. Segments are appended in call
/// order and joined with one space; optional segments with no value are
/// skipped entirely.
#[derive(Debug, Clone)]
pub struct CliCommand {
    parts: Vec<String>,
}

impl CliCommand {
    pub fn new(program: &str) -> Self {
        Self {
            parts: vec![program.to_string()],
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.parts.push(value.into());
        self
    }

    /// `<flag> <value>`, always present.
    pub fn option(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    /// `<flag> <value>` only when `value` is set.
    pub fn option_if(self, flag: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.option(flag, value),
            None => self,
        }
    }

    /// `<flag> "<value>"` only when `value` is set.
    pub fn quoted_option_if(self, flag: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.option(flag, format!("\"{}\"", value)),
            None => self,
        }
    }

    /// Bare `<flag>` when `enabled`.
    pub fn flag_if(self, flag: &str, enabled: bool) -> Self {
        if enabled {
            self.arg(flag)
        } else {
            self
        }
    }

    /// `<flag> v1 v2 ...` when `values` is non-empty.
    pub fn list_if(self, flag: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        values.iter().fold(self.arg(flag), |cmd, v| cmd.arg(v.clone()))
    }

    /// `<flag> v1,v2,...` when `values` is non-empty.
    pub fn joined_if(self, flag: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        self.option(flag, values.join(","))
    }

    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

type InstructionResult = Result<Value, DispatchError>;

// --- Accounts ---

pub fn create_account(args: &Args) -> InstructionResult {
    let account_type = get_optional_str(args, "type").unwrap_or_else(|| "schnorr".to_string());
    let command = CliCommand::new(AZTEC_WALLET)
        .arg("create-account")
        .option("-t", account_type.clone())
        .option_if("-a", get_optional_str(args, "alias"))
        .flag_if("--public-deploy", get_flag(args, "publicDeploy"))
        .build();
    Ok(json!({
        "instruction": "Account creation requires aztec-wallet CLI",
        "command": command,
        "type": account_type,
        "note": "Run this command in terminal with Aztec sandbox running",
    }))
}

pub fn deploy_account(args: &Args) -> InstructionResult {
    let address: String = get_required_arg(args, "address")?;
    let command = CliCommand::new(AZTEC_WALLET)
        .arg("deploy-account")
        .arg(address.clone())
        .flag_if("--skip-initialization", get_flag(args, "skipInitialization"))
        .build();
    Ok(json!({
        "instruction": "Account deployment requires aztec-wallet CLI",
        "command": command,
        "address": address,
    }))
}

pub fn import_test_accounts(_args: &Args) -> InstructionResult {
    Ok(json!({
        "instruction": "Import test accounts from sandbox",
        "command": CliCommand::new(AZTEC_WALLET).arg("import-test-accounts").build(),
        "note": "This imports pre-funded accounts from the sandbox for testing",
    }))
}

// --- Contracts ---

pub fn deploy_contract(args: &Args) -> InstructionResult {
    let artifact: String = get_required_arg(args, "artifact")?;
    let from: String = get_required_arg(args, "from")?;
    let constructor_args = get_string_list(args, "args");
    let command = CliCommand::new(AZTEC_WALLET)
        .arg("deploy")
        .arg(artifact.clone())
        .option("--from", from.clone())
        .list_if("--args", &constructor_args)
        .option_if("-a", get_optional_str(args, "alias"))
        .option_if("--salt", get_optional_str(args, "salt"))
        .flag_if("--public-deploy", get_flag(args, "publicDeploy"))
        .build();
    Ok(json!({
        "instruction": "Contract deployment requires aztec-wallet CLI",
        "command": command,
        "artifact": artifact,
        "from": from,
        "args": constructor_args,
    }))
}

pub fn register_contract(args: &Args) -> InstructionResult {
    let address: String = get_required_arg(args, "address")?;
    let artifact: String = get_required_arg(args, "artifact")?;
    let command = CliCommand::new(AZTEC_WALLET)
        .arg("register-contract")
        .arg(address.clone())
        .arg(artifact.clone())
        .option_if("-a", get_optional_str(args, "alias"))
        .option_if("-k", get_optional_str(args, "publicKey"))
        .build();
    Ok(json!({
        "instruction": "Register contract in PXE",
        "command": command,
        "address": address,
        "artifact": artifact,
    }))
}

pub fn inspect_contract(args: &Args) -> InstructionResult {
    let artifact: String = get_required_arg(args, "artifact")?;
    Ok(json!({
        "instruction": "Inspect contract functions",
        "command": CliCommand::new(AZTEC).arg("inspect-contract").arg(artifact.clone()).build(),
        "artifact": artifact,
        "note": "This lists all external callable functions for the contract",
    }))
}

pub fn compute_selector(args: &Args) -> InstructionResult {
    let signature: String = get_required_arg(args, "functionSignature")?;
    Ok(json!({
        "instruction": "Compute function selector",
        "command": CliCommand::new(AZTEC)
            .arg("compute-selector")
            .arg(format!("\"{}\"", signature))
            .build(),
        "functionSignature": signature,
        "note": "Returns the 4-byte selector for the function",
    }))
}

// --- Transactions ---

/// Shared `<subcommand> <fn> -ca <contract> -f <from> [--args ...]` prefix.
struct ContractCall {
    contract_address: String,
    function_name: String,
    from: String,
    args: Vec<String>,
}

impl ContractCall {
    fn from_args(args: &Args) -> Result<Self, DispatchError> {
        Ok(Self {
            contract_address: get_required_arg(args, "contractAddress")?,
            function_name: get_required_arg(args, "functionName")?,
            from: get_required_arg(args, "from")?,
            args: get_string_list(args, "args"),
        })
    }

    fn command(&self, subcommand: &str) -> CliCommand {
        CliCommand::new(AZTEC_WALLET)
            .arg(subcommand)
            .arg(self.function_name.clone())
            .option("-ca", self.contract_address.clone())
            .option("-f", self.from.clone())
            .list_if("--args", &self.args)
    }
}

pub fn send_transaction(args: &Args) -> InstructionResult {
    let call = ContractCall::from_args(args)?;
    let command = call
        .command("send")
        .joined_if("--auth-witness", &get_string_list(args, "authWitnesses"))
        .build();
    Ok(json!({
        "instruction": "Send transaction via aztec-wallet",
        "command": command,
        "contractAddress": call.contract_address,
        "functionName": call.function_name,
        "from": call.from,
        "args": call.args,
    }))
}

pub fn simulate_transaction(args: &Args) -> InstructionResult {
    let call = ContractCall::from_args(args)?;
    let command = call.command("simulate").build();
    Ok(json!({
        "instruction": "Simulate transaction (dry run)",
        "command": command,
        "contractAddress": call.contract_address,
        "functionName": call.function_name,
        "from": call.from,
        "args": call.args,
        "note": "Simulation shows return values and gas estimation without executing",
    }))
}

pub fn estimate_gas(args: &Args) -> InstructionResult {
    let call = ContractCall::from_args(args)?;
    let command = call.command("simulate").arg("--estimate-gas-only").build();
    Ok(json!({
        "instruction": "Estimate gas for transaction",
        "command": command,
        "contractAddress": call.contract_address,
        "functionName": call.function_name,
        "from": call.from,
        "note": "Returns DA gas, L2 gas, and estimated fee",
    }))
}

pub fn create_authwit(args: &Args) -> InstructionResult {
    let function_name: String = get_required_arg(args, "functionName")?;
    let caller: String = get_required_arg(args, "caller")?;
    let contract_address: String = get_required_arg(args, "contractAddress")?;
    let from: String = get_required_arg(args, "from")?;
    let command = CliCommand::new(AZTEC_WALLET)
        .arg("create-authwit")
        .arg(function_name.clone())
        .arg(caller.clone())
        .option("-ca", contract_address.clone())
        .option("-f", from.clone())
        .list_if("--args", &get_string_list(args, "args"))
        .build();
    Ok(json!({
        "instruction": "Create authorization witness for private delegation",
        "command": command,
        "functionName": function_name,
        "caller": caller,
        "contractAddress": contract_address,
        "from": from,
    }))
}

pub fn authorize_action(args: &Args) -> InstructionResult {
    let function_name: String = get_required_arg(args, "functionName")?;
    let caller: String = get_required_arg(args, "caller")?;
    let contract_address: String = get_required_arg(args, "contractAddress")?;
    let from: String = get_required_arg(args, "from")?;
    let command = CliCommand::new(AZTEC_WALLET)
        .arg("authorize-action")
        .arg(function_name.clone())
        .arg(caller.clone())
        .option("-ca", contract_address.clone())
        .option("-f", from.clone())
        .build();
    Ok(json!({
        "instruction": "Authorize public action on behalf of account",
        "command": command,
        "functionName": function_name,
        "caller": caller,
        "contractAddress": contract_address,
        "from": from,
    }))
}

// --- L1 bridge ---

pub fn bridge_erc20(args: &Args) -> InstructionResult {
    let amount: String = get_required_arg(args, "amount")?;
    let recipient: String = get_required_arg(args, "recipient")?;
    let private = get_flag(args, "private");
    let command = CliCommand::new(AZTEC)
        .arg("bridge-erc20")
        .arg(amount.clone())
        .arg(recipient.clone())
        .option_if("-t", get_optional_str(args, "tokenAddress"))
        .option_if("-p", get_optional_str(args, "portalAddress"))
        .flag_if("--mint", get_flag(args, "mint"))
        .flag_if("--private", private)
        .build();
    Ok(json!({
        "instruction": "Bridge ERC20 tokens from L1 to Aztec L2",
        "command": command,
        "amount": amount,
        "recipient": recipient,
        "private": private,
    }))
}

pub fn get_l1_balance(args: &Args) -> InstructionResult {
    let address: String = get_required_arg(args, "address")?;
    let token_address: String = get_required_arg(args, "tokenAddress")?;
    let command = CliCommand::new(AZTEC)
        .arg("get-l1-balance")
        .arg(address.clone())
        .option("-t", token_address.clone())
        .build();
    Ok(json!({
        "instruction": "Get L1 ERC20 balance",
        "command": command,
        "address": address,
        "tokenAddress": token_address,
    }))
}

pub fn deploy_l1_contracts(args: &Args) -> InstructionResult {
    let command = CliCommand::new(AZTEC)
        .arg("deploy-l1-contracts")
        .option_if("-pk", get_optional_str(args, "privateKey"))
        .quoted_option_if("-m", get_optional_str(args, "mnemonic"))
        .flag_if("--test-accounts", get_flag(args, "testAccounts"))
        .flag_if("--sponsored-fpc", get_flag(args, "sponsoredFpc"))
        .build();
    Ok(json!({
        "instruction": "Deploy L1 infrastructure contracts",
        "command": command,
        "note": "This deploys rollup, registry, inbox, outbox, and other L1 contracts",
        "warning": "Admin operation - requires sufficient L1 ETH",
    }))
}

pub fn get_canonical_fpc_address(_args: &Args) -> InstructionResult {
    Ok(json!({
        "instruction": "Get canonical SponsoredFPC address",
        "command": CliCommand::new(AZTEC).arg("get-canonical-sponsored-fpc-address").build(),
        "note": "Returns the FPC address for current network version",
    }))
}

// --- Validators & sequencers ---

pub fn add_validator(args: &Args) -> InstructionResult {
    let attester: String = get_required_arg(args, "attester")?;
    let withdrawer: String = get_required_arg(args, "withdrawer")?;
    let bls_secret_key: String = get_required_arg(args, "blsSecretKey")?;
    let command = CliCommand::new(AZTEC)
        .arg("add-l1-validator")
        .option("--attester", attester.clone())
        .option("--withdrawer", withdrawer.clone())
        .option("--bls-secret-key", bls_secret_key)
        .option_if("-pk", get_optional_str(args, "privateKey"))
        .build();
    Ok(json!({
        "instruction": "Add validator to L1 rollup contract",
        "command": command,
        "attester": attester,
        "withdrawer": withdrawer,
        "note": "Requires stake deposit",
    }))
}

pub fn remove_validator(args: &Args) -> InstructionResult {
    let validator: String = get_required_arg(args, "validator")?;
    let command = CliCommand::new(AZTEC)
        .arg("remove-l1-validator")
        .option("--validator", validator.clone())
        .option_if("-pk", get_optional_str(args, "privateKey"))
        .build();
    Ok(json!({
        "instruction": "Remove validator from L1 rollup",
        "command": command,
        "validator": validator,
    }))
}

pub fn get_sequencers(args: &Args) -> InstructionResult {
    let subcommand = get_optional_str(args, "command").unwrap_or_else(|| "list".to_string());
    let instruction = if subcommand == "list" {
        "List sequencers"
    } else {
        "Get next sequencer"
    };
    let command = CliCommand::new(AZTEC)
        .arg("sequencers")
        .arg(subcommand)
        .option_if(
            "--block-number",
            get_optional_u64(args, "blockNumber")?.map(|n| n.to_string()),
        )
        .build();
    Ok(json!({
        "instruction": instruction,
        "command": command,
    }))
}

pub fn advance_epoch(_args: &Args) -> InstructionResult {
    Ok(json!({
        "instruction": "Advance to next epoch (devnet only)",
        "command": CliCommand::new(AZTEC).arg("advance-epoch").build(),
        "note": "Uses L1 cheat codes to warp time - only works on local devnet",
        "warning": "This is a testing utility, not for production",
    }))
}

pub fn prune_rollup(args: &Args) -> InstructionResult {
    let command = CliCommand::new(AZTEC)
        .arg("prune-rollup")
        .option_if("--rollup", get_optional_str(args, "rollupAddress"))
        .option_if("-pk", get_optional_str(args, "privateKey"))
        .build();
    Ok(json!({
        "instruction": "Prune pending chain on rollup",
        "command": command,
        "note": "Removes stale pending blocks",
    }))
}

// --- Governance ---

pub fn deposit_governance_tokens(args: &Args) -> InstructionResult {
    let amount: String = get_required_arg(args, "amount")?;
    let command = CliCommand::new(AZTEC)
        .arg("deposit-governance-tokens")
        .option("-a", amount.clone())
        .option_if("--recipient", get_optional_str(args, "recipient"))
        .flag_if("--mint", get_flag(args, "mint"))
        .option_if("-p", get_optional_str(args, "privateKey"))
        .build();
    Ok(json!({
        "instruction": "Deposit governance tokens for voting",
        "command": command,
        "amount": amount,
    }))
}

pub fn propose_governance(args: &Args) -> InstructionResult {
    let payload_address: String = get_required_arg(args, "payloadAddress")?;
    let command = CliCommand::new(AZTEC)
        .arg("propose-with-lock")
        .option("-p", payload_address.clone())
        .option_if("-pk", get_optional_str(args, "privateKey"))
        .build();
    Ok(json!({
        "instruction": "Create governance proposal",
        "command": command,
        "payloadAddress": payload_address,
        "note": "Requires locked governance tokens",
    }))
}

pub fn vote_on_proposal(args: &Args) -> InstructionResult {
    let proposal_id: String = get_required_arg(args, "proposalId")?;
    let vote_amount: String = get_required_arg(args, "voteAmount")?;
    let in_favor: bool = get_required_arg(args, "inFavor")?;
    let command = CliCommand::new(AZTEC)
        .arg("vote-on-governance-proposal")
        .option("-p", proposal_id.clone())
        .option("-a", vote_amount.clone())
        .option("--in-favor", if in_favor { "yea" } else { "nay" })
        .option_if("-pk", get_optional_str(args, "privateKey"))
        .build();
    Ok(json!({
        "instruction": "Vote on governance proposal",
        "command": command,
        "proposalId": proposal_id,
        "voteAmount": vote_amount,
        "inFavor": in_favor,
    }))
}

pub fn execute_proposal(args: &Args) -> InstructionResult {
    let proposal_id: String = get_required_arg(args, "proposalId")?;
    let wait = get_flag(args, "wait");
    let command = CliCommand::new(AZTEC)
        .arg("execute-governance-proposal")
        .option("-p", proposal_id.clone())
        .option_if("--wait", wait.then(|| "true".to_string()))
        .option_if("-pk", get_optional_str(args, "privateKey"))
        .build();
    Ok(json!({
        "instruction": "Execute passed governance proposal",
        "command": command,
        "proposalId": proposal_id,
    }))
}

// --- Keys & secrets ---

pub fn generate_keys(args: &Args) -> InstructionResult {
    let command = CliCommand::new(AZTEC)
        .arg("generate-keys")
        .flag_if("--json", get_flag_default_on(args, "json"))
        .build();
    Ok(json!({
        "instruction": "Generate encryption and signing keys",
        "command": command,
        "note": "Generates a new key pair for Aztec accounts",
        "output": "Returns encryptionPrivateKey, encryptionPublicKey, signingPrivateKey, signingPublicKey",
    }))
}

pub fn generate_secret_and_hash(_args: &Args) -> InstructionResult {
    Ok(json!({
        "instruction": "Generate secret and its hash",
        "command": CliCommand::new(AZTEC).arg("generate-secret-and-hash").build(),
        "note": "Generates a random Fr field element and computes its Aztec hash",
        "usage": "Useful for creating secrets for private claims and messages",
    }))
}

pub fn generate_bls_keypair(args: &Args) -> InstructionResult {
    let command = CliCommand::new(AZTEC)
        .arg("generate-bls-keypair")
        .quoted_option_if("--mnemonic", get_optional_str(args, "mnemonic"))
        .option_if("--ikm", get_optional_str(args, "ikm"))
        .option_if("--bls-path", get_optional_str(args, "blsPath"))
        .flag_if("--compressed", get_flag(args, "compressed"))
        .arg("--json")
        .build();
    Ok(json!({
        "instruction": "Generate BLS keypair for validator operations",
        "command": command,
        "note": "BLS keys are used for validator attestations",
    }))
}

pub fn generate_p2p_key(_args: &Args) -> InstructionResult {
    Ok(json!({
        "instruction": "Generate LibP2P peer private key",
        "command": CliCommand::new(AZTEC).arg("generate-p2p-private-key").build(),
        "note": "Used for P2P networking between Aztec nodes",
    }))
}

pub fn generate_l1_account(args: &Args) -> InstructionResult {
    let command = CliCommand::new(AZTEC)
        .arg("generate-l1-account")
        .flag_if("--json", get_flag_default_on(args, "json"))
        .build();
    Ok(json!({
        "instruction": "Generate Ethereum L1 account",
        "command": command,
        "note": "Generates a new Ethereum private key and address",
    }))
}
