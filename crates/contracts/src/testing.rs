//! Artifacts and encoding helpers for tests that run against a mocked ledger.

use {
    crate::artifact::{self, Artifact, Artifacts},
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, Bytes, U256, keccak256},
    },
    serde_json::{Value, json},
    std::{fs, path::Path},
};

fn param(name: &str, ty: &str) -> Value {
    json!({ "name": name, "type": ty, "internalType": ty })
}

fn function(name: &str, inputs: Vec<Value>, outputs: Vec<Value>, mutability: &str) -> Value {
    json!({
        "type": "function",
        "name": name,
        "inputs": inputs,
        "outputs": outputs,
        "stateMutability": mutability,
    })
}

fn asset_token_abi() -> Value {
    json!([
        function(
            "initialize",
            vec![
                param("name_", "string"),
                param("symbol_", "string"),
                param("owner", "address"),
            ],
            vec![],
            "nonpayable",
        ),
        function("name", vec![], vec![param("", "string")], "view"),
        function("symbol", vec![], vec![param("", "string")], "view"),
        function("totalSupply", vec![], vec![param("", "uint256")], "view"),
        function(
            "mint",
            vec![param("to", "address"), param("amount", "uint256")],
            vec![],
            "nonpayable",
        ),
        function("setPolicy", vec![param("policy", "address")], vec![], "nonpayable"),
        function(
            "setProfitDistributor",
            vec![param("distributor", "address")],
            vec![],
            "nonpayable",
        ),
    ])
}

fn profit_distributor_abi() -> Value {
    json!([
        function(
            "initialize",
            vec![
                param("token", "address"),
                param("stablecoin", "address"),
                param("admin", "address"),
                param("operator", "address"),
            ],
            vec![],
            "nonpayable",
        ),
        function("depositProfit", vec![param("amount", "uint256")], vec![], "nonpayable"),
        function(
            "earned",
            vec![param("account", "address")],
            vec![param("", "uint256")],
            "view",
        ),
        function("claim", vec![], vec![], "nonpayable"),
    ])
}

fn proxy_abi() -> Value {
    json!([{
        "type": "constructor",
        "inputs": [param("implementation", "address"), param("_data", "bytes")],
        "stateMutability": "payable",
    }])
}

/// Artifact documents keyed by contract name. The bytecode of each contract is
/// a distinct two byte blob so deployments can be told apart.
fn documents() -> [(&'static str, Value); 4] {
    [
        (
            Artifacts::ASSET_TOKEN,
            json!({ "abi": asset_token_abi(), "bytecode": { "object": "0x6001", "sourceMap": "" } }),
        ),
        (
            Artifacts::POLICY,
            json!({ "abi": [], "bytecode": { "object": "0x6002", "linkReferences": {} } }),
        ),
        (
            Artifacts::PROFIT_DISTRIBUTOR,
            json!({ "abi": profit_distributor_abi(), "bytecode": "0x6003" }),
        ),
        (Artifacts::PROXY, json!({ "abi": proxy_abi(), "bytecode": "0x6004" })),
    ]
}

pub fn artifacts() -> Artifacts {
    let [token, policy, distributor, proxy] = documents().map(|(_, document)| {
        serde_json::from_value::<Artifact>(document).expect("valid artifact fixture")
    });
    Artifacts {
        asset_token: token,
        policy,
        profit_distributor: distributor,
        proxy,
    }
}

/// Lays the artifacts out in `dir` the way Foundry does.
pub fn write_artifacts(dir: &Path) {
    for (contract, document) in documents() {
        let path = artifact::path(dir, contract);
        fs::create_dir_all(path.parent().expect("artifact path has a parent"))
            .expect("create artifact directory");
        fs::write(&path, document.to_string()).expect("write artifact fixture");
    }
}

/// Four byte selector of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Return data of a function returning a single `uint256`.
pub fn uint_output(value: U256) -> Bytes {
    DynSolValue::Uint(value, 256).abi_encode().into()
}

/// Return data of a function returning a single `string`.
pub fn string_output(value: &str) -> Bytes {
    DynSolValue::Tuple(vec![DynSolValue::String(value.to_owned())])
        .abi_encode_params()
        .into()
}

/// The address argument at `index` of ABI encoded calldata.
pub fn address_argument(calldata: &[u8], index: usize) -> Address {
    let start = 4 + index * 32;
    Address::from_slice(&calldata[start + 12..start + 32])
}
