use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity key of a stored record. Two appends within the same millisecond share it.
pub type Timestamp = String;

/// A withdrawal as submitted, before the store assigns its timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWithdrawal {
    pub amount: Decimal,
    pub card_number: String,
    pub card_exp: String,
    pub card_name: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRecord {
    // written as an exact json number, read back from numbers or strings
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub card_number: String,
    pub card_exp: String,
    pub card_name: String,
    pub zip_code: String,
    pub timestamp: Timestamp,
}

impl WithdrawalRecord {
    pub(crate) fn stamp(new: NewWithdrawal, timestamp: Timestamp) -> Self {
        let NewWithdrawal { amount, card_number, card_exp, card_name, zip_code } = new;
        Self { amount, card_number, card_exp, card_name, zip_code, timestamp }
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub(crate) fn now() -> Timestamp {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
