//! Durable log of withdrawal submissions kept in a single JSON file.
//!
//! The collection supports three operations, each a full read-modify-write cycle
//! over the file: [`Store::list`], [`Store::append`] and
//! [`Store::delete_by_timestamp`]. Records are keyed by the timestamp assigned on
//! append.

pub use crate::{
    error::StoreError,
    record::{NewWithdrawal, Timestamp, WithdrawalRecord},
    store::{Store, StoreMode},
};

mod error;
mod record;
mod store;
