use {
    crate::api::{self, AddressInput, AppState, TxResponse},
    alloy::primitives::{Address, TxHash},
    axum::{
        extract::{State, rejection::JsonRejection},
        response::{IntoResponse, Json, Response},
    },
    serde::Deserialize,
    std::sync::Arc,
};

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    address: AddressInput,
}

pub async fn post_claim_profit_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ClaimRequest>, JsonRejection>,
) -> Response {
    let parsed = request
        .map_err(anyhow::Error::from)
        .and_then(|Json(request)| Ok((request.address.parse()?, request.address)));
    let (account, input) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(?err, "invalid claim request");
            return api::error_reply("Failed to claim profit");
        }
    };

    let message = format!("Claimed profit for {}", input.as_str());
    let response = match claim(&state, account).await {
        Ok(tx_hash) => TxResponse::confirmed(tx_hash, message),
        Err(err) => {
            tracing::warn!(?err, %account, "claim failed, replying with mock response");
            TxResponse::mocked(message)
        }
    };
    Json(response).into_response()
}

/// Claims on behalf of `account` by having the node impersonate it for the
/// duration of the claim. Impersonation is always stopped again.
async fn claim(state: &AppState, account: Address) -> anyhow::Result<TxHash> {
    let claimed = match state.ledger.impersonate(account).await {
        Ok(()) => state.profit_distributor.claim_as(account).await,
        Err(err) => Err(err.into()),
    };
    if let Err(err) = state.ledger.stop_impersonating(account).await {
        tracing::warn!(?err, %account, "failed to stop impersonating account");
    }
    claimed
}
