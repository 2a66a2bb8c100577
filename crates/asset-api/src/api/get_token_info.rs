use {
    crate::api::{self, AppState},
    axum::{
        extract::State,
        response::{IntoResponse, Json, Response},
    },
    contracts::ASSET_TOKEN_DECIMALS,
    serde::Serialize,
    std::sync::Arc,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfo {
    name: String,
    symbol: String,
    total_supply: String,
}

async fn token_info(state: &AppState) -> anyhow::Result<TokenInfo> {
    Ok(TokenInfo {
        name: state.token.name().await?,
        symbol: state.token.symbol().await?,
        total_supply: number::units::format(
            state.token.total_supply().await?,
            ASSET_TOKEN_DECIMALS,
        ),
    })
}

pub async fn get_token_info_handler(State(state): State<Arc<AppState>>) -> Response {
    match token_info(&state).await {
        Ok(info) => Json(info).into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to fetch token info");
            api::error_reply(format!("{err:#}"))
        }
    }
}
