use {
    crate::api::{self, AddressInput, AppState, TxResponse},
    axum::{
        extract::{State, rejection::JsonRejection},
        response::{IntoResponse, Json, Response},
    },
    contracts::ASSET_TOKEN_DECIMALS,
    number::serialization::DecimalAmount,
    serde::Deserialize,
    std::sync::Arc,
};

#[derive(Debug, Deserialize)]
pub struct MintRequest {
    address: AddressInput,
    amount: DecimalAmount,
}

pub async fn post_mint_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<MintRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return api::error_reply(rejection.body_text()),
    };
    let parsed = request.address.parse().and_then(|to| {
        let amount = number::units::parse(request.amount.as_str(), ASSET_TOKEN_DECIMALS)?;
        Ok((to, amount))
    });
    let (to, amount) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return api::error_reply(err),
    };

    let message = format!(
        "Minted {} tokens to {}",
        request.amount,
        request.address.as_str()
    );
    let response = match state.token.mint(to, amount).await {
        Ok(tx_hash) => TxResponse::confirmed(tx_hash, message),
        Err(err) => {
            tracing::warn!(?err, %to, "mint failed, replying with mock response");
            TxResponse::mocked(message).with_note("Real transaction failed, returning mock response")
        }
    };
    Json(response).into_response()
}
