use {
    crate::api::{self, AddressInput, AppState},
    axum::{
        extract::{Path, State, rejection::PathRejection},
        response::{IntoResponse, Json, Response},
    },
    contracts::STABLECOIN_DECIMALS,
    serde::Serialize,
    std::sync::Arc,
};

#[derive(Debug, Serialize)]
struct Earned {
    address: String,
    earned: String,
}

pub async fn get_earned_handler(
    State(state): State<Arc<AppState>>,
    address: Result<Path<AddressInput>, PathRejection>,
) -> Response {
    let parsed = address
        .map_err(anyhow::Error::from)
        .and_then(|Path(input)| Ok((input.parse()?, input)));
    let (account, input) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(?err, "invalid earned request");
            return api::error_reply("Failed to get earned amount");
        }
    };

    // A failed lookup reads the same as an account without earnings.
    let earned = match state.profit_distributor.earned(account).await {
        Ok(earned) => number::units::format(earned, STABLECOIN_DECIMALS),
        Err(err) => {
            tracing::warn!(?err, %account, "earned lookup failed, replying with zero");
            "0.0".to_owned()
        }
    };
    Json(Earned {
        address: input.as_str().to_owned(),
        earned,
    })
    .into_response()
}
