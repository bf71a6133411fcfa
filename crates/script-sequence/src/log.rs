use crate::{
    error::DecodeError,
    hex::{bytes_to_hex, uint_to_hex},
    record::{Fields, Record, impl_serde_via_wire},
};
use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An event emitted during a transaction, as recorded in a receipt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Log {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_hash: Bytes,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: Bytes,
    pub transaction_index: u64,
    pub log_index: u64,
    /// Set when the log was dropped by a chain reorganization.
    pub removed: bool,
    /// Fields not modelled above, written back unchanged.
    pub other: BTreeMap<String, Value>,
}

/// JSON shape of a [`Log`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogJson {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_hash: String,
    pub block_number: String,
    pub block_timestamp: String,
    pub transaction_hash: String,
    pub transaction_index: String,
    pub log_index: String,
    pub removed: bool,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Record for Log {
    const NAME: &'static str = "log";

    type Wire = LogJson;

    fn from_wire(wire: LogJson) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>();
        Ok(Self {
            block_hash: fields.bytes("blockHash", &wire.block_hash)?,
            block_number: fields.uint("blockNumber", &wire.block_number)?,
            block_timestamp: fields.uint("blockTimestamp", &wire.block_timestamp)?,
            transaction_hash: fields.bytes("transactionHash", &wire.transaction_hash)?,
            transaction_index: fields.uint("transactionIndex", &wire.transaction_index)?,
            log_index: fields.uint("logIndex", &wire.log_index)?,
            address: wire.address,
            topics: wire.topics,
            data: wire.data,
            removed: wire.removed,
            other: wire.other,
        })
    }

    fn to_wire(&self) -> LogJson {
        LogJson {
            address: self.address.clone(),
            topics: self.topics.clone(),
            data: self.data.clone(),
            block_hash: bytes_to_hex(&self.block_hash),
            block_number: uint_to_hex(self.block_number),
            block_timestamp: uint_to_hex(self.block_timestamp),
            transaction_hash: bytes_to_hex(&self.transaction_hash),
            transaction_index: uint_to_hex(self.transaction_index),
            log_index: uint_to_hex(self.log_index),
            removed: self.removed,
            other: self.other.clone(),
        }
    }
}

impl_serde_via_wire!(Log);
