use {
    crate::api::{self, AppState, TxResponse},
    axum::{
        extract::{State, rejection::JsonRejection},
        response::{IntoResponse, Json, Response},
    },
    contracts::STABLECOIN_DECIMALS,
    number::serialization::DecimalAmount,
    serde::Deserialize,
    std::sync::Arc,
};

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    amount: DecimalAmount,
}

pub async fn post_deposit_profit_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<DepositRequest>, JsonRejection>,
) -> Response {
    let parsed = request.map_err(anyhow::Error::from).and_then(|Json(request)| {
        let amount = number::units::parse(request.amount.as_str(), STABLECOIN_DECIMALS)?;
        Ok((request, amount))
    });
    let (request, amount) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(?err, "invalid deposit request");
            return api::error_reply("Failed to deposit profit");
        }
    };

    let message = format!("Deposited {} USDC as profit", request.amount);
    let response = match state.profit_distributor.deposit_profit(amount).await {
        Ok(tx_hash) => TxResponse::confirmed(tx_hash, message),
        Err(err) => {
            tracing::warn!(?err, %amount, "profit deposit failed, replying with mock response");
            TxResponse::mocked(message)
        }
    };
    Json(response).into_response()
}
