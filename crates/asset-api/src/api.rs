use {
    alloy::primitives::{Address, B256, TxHash},
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::{Method, StatusCode, header},
        response::{IntoResponse, Json, Response},
    },
    contracts::{AssetToken, Contract, ProfitDistributor},
    ethrpc::Ledger,
    serde::{Deserialize, Serialize},
    std::{fmt::Display, str::FromStr, sync::Arc},
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
};

mod get_earned;
mod get_token_info;
mod post_claim_profit;
mod post_deposit_profit;
mod post_mint;

/// Contract handles shared by all handlers. Built once at startup.
pub struct AppState {
    pub ledger: Arc<dyn Ledger>,
    pub token: AssetToken,
    pub profit_distributor: ProfitDistributor,
    pub policy: Contract,
}

const MAX_JSON_BODY_PAYLOAD: usize = 1024 * 16;

pub fn handle_all_routes(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route(
            "/token/info",
            axum::routing::get(get_token_info::get_token_info_handler),
        )
        .route(
            "/token/mint",
            axum::routing::post(post_mint::post_mint_handler),
        )
        .route(
            "/profit/deposit",
            axum::routing::post(post_deposit_profit::post_deposit_profit_handler),
        )
        .route(
            "/profit/earned/{address}",
            axum::routing::get(get_earned::get_earned_handler),
        )
        .route(
            "/profit/claim",
            axum::routing::post(post_claim_profit::post_claim_profit_handler),
        )
        .with_state(state);

    finalize_router(api_router)
}

/// Nests the routes under /api and adds cors, body limits and request
/// tracing.
fn finalize_router(api_router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", api_router)
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_PAYLOAD))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
pub struct Error {
    pub error: String,
}

/// Reply for requests that fail before any contract is called.
pub fn error_reply(message: impl Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Error {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Outcome of a state-changing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    pub success: bool,
    pub tx_hash: TxHash,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl TxResponse {
    pub fn confirmed(tx_hash: TxHash, message: String) -> Self {
        Self {
            success: true,
            tx_hash,
            message,
            note: None,
        }
    }

    /// Stand-in reported when the transaction failed. Carries the all zero
    /// hash since no transaction was confirmed.
    pub fn mocked(message: String) -> Self {
        Self {
            success: true,
            tx_hash: B256::ZERO,
            message: format!("{message} (mock)"),
            note: None,
        }
    }

    pub fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }
}

/// An address as submitted by the caller. The original text is kept so
/// responses echo exactly what was sent.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct AddressInput(String);

impl AddressInput {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> anyhow::Result<Address> {
        Address::from_str(self.0.trim())
            .map_err(|err| anyhow::anyhow!("invalid address {:?}: {err}", self.0))
    }
}

#[cfg(test)]
pub async fn response_body(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[cfg(test)]
pub mod testing {
    use {
        super::*,
        axum::{body::Body, http::Request},
        ethrpc::MockLedger,
        tower::ServiceExt,
    };

    pub const TOKEN: Address = Address::repeat_byte(0xaa);
    pub const DISTRIBUTOR: Address = Address::repeat_byte(0xdd);
    pub const POLICY: Address = Address::repeat_byte(0xcc);
    pub const GAS_LIMIT: u64 = 500_000;
    pub const SENTINEL: &str =
        "0x0000000000000000000000000000000000000000000000000000000000000000";

    pub fn app(ledger: MockLedger) -> Router {
        observe::tracing::initialize_reentrant("asset_api=debug");
        let artifacts = contracts::testing::artifacts();
        let ledger: Arc<dyn Ledger> = Arc::new(ledger);
        let contract = |name, address, abi| {
            Contract::new(name, address, Arc::new(abi), ledger.clone()).with_gas_limit(GAS_LIMIT)
        };
        handle_all_routes(Arc::new(AppState {
            token: AssetToken(contract("AssetToken", TOKEN, artifacts.asset_token.abi)),
            profit_distributor: ProfitDistributor(contract(
                "ProfitDistributor",
                DISTRIBUTOR,
                artifacts.profit_distributor.abi,
            )),
            policy: contract("AssetTokenPolicy", POLICY, artifacts.policy.abi),
            ledger,
        }))
    }

    pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        (response.status(), response_body(response).await)
    }

    pub async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap();
        (response.status(), response_body(response).await)
    }
}
