use axum::{extract::rejection::JsonRejection, extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use store::NewWithdrawal;

use crate::web::{
    error::{Error, Result},
    AppState,
};

/// Submission body as sent by the withdrawal form. Every field is optional here
/// so that an incomplete body is reported as missing fields, not as a parse error.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,
    pub card_number: Option<String>,
    pub card_exp: Option<String>,
    pub card_name: Option<String>,
    pub zip_code: Option<String>,
}

impl SubmitRequest {
    /// Every field must be present and non-empty, the amount must be non-zero.
    pub fn validate(self) -> Result<NewWithdrawal> {
        fn present(field: Option<String>) -> Result<String> {
            field.filter(|f| !f.is_empty()).ok_or(Error::MissingFields)
        }

        let amount = self.amount.filter(|a| !a.is_zero()).ok_or(Error::MissingFields)?;

        Ok(NewWithdrawal {
            amount,
            card_number: present(self.card_number)?,
            card_exp: present(self.card_exp)?,
            card_name: present(self.card_name)?,
            zip_code: present(self.zip_code)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}

pub async fn submit(
    State(state): State<AppState>,
    payload: core::result::Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<Ack>> {
    let Json(request) = payload.map_err(|e| {
        log::warn!("Unreadable submission: {e}");
        Error::MissingFields
    })?;
    let new = request.validate()?;

    let record = state.store.append(new).await.map_err(Error::SaveFailed)?;
    log::info!("Recorded withdrawal {}", record.timestamp);

    Ok(Json(Ack { message: "Withdrawal recorded successfully" }))
}
