use crate::{
    error::DecodeError,
    hex::{bytes_to_hex, uint_to_hex},
    log::{Log, LogJson},
    record::{Fields, Record, impl_serde_via_wire},
};
use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The receipt of a transaction sent by `forge script`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Receipt {
    pub status: u64,
    pub cumulative_gas_used: u64,
    pub logs: Vec<Log>,
    pub logs_bloom: Bytes,
    pub receipt_type: u64,
    pub transaction_hash: Bytes,
    pub transaction_index: u64,
    pub block_hash: Bytes,
    pub block_number: u64,
    pub gas_used: u64,
    pub effective_gas_price: u64,
    pub blob_gas_price: u64,
    pub from: Option<Address>,
    pub to: Option<Address>,
    /// Set when the transaction created a contract.
    pub contract_address: Option<Address>,
    /// Fields not modelled above, written back unchanged.
    pub other: BTreeMap<String, Value>,
}

impl Receipt {
    /// Returns `true` if the transaction succeeded.
    pub fn is_success(&self) -> bool {
        self.status == 1
    }
}

/// JSON shape of a [`Receipt`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptJson {
    pub status: String,
    pub cumulative_gas_used: String,
    pub logs: Vec<LogJson>,
    pub logs_bloom: String,
    #[serde(rename = "type")]
    pub receipt_type: String,
    pub transaction_hash: String,
    pub transaction_index: String,
    pub block_hash: String,
    pub block_number: String,
    pub gas_used: String,
    pub effective_gas_price: String,
    pub blob_gas_price: String,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub contract_address: Option<Address>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Record for Receipt {
    const NAME: &'static str = "receipt";

    type Wire = ReceiptJson;

    fn from_wire(wire: ReceiptJson) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>();
        Ok(Self {
            status: fields.uint("status", &wire.status)?,
            cumulative_gas_used: fields.uint("cumulativeGasUsed", &wire.cumulative_gas_used)?,
            logs: fields.sequence("logs", wire.logs)?,
            logs_bloom: fields.bytes("logsBloom", &wire.logs_bloom)?,
            receipt_type: fields.uint("type", &wire.receipt_type)?,
            transaction_hash: fields.bytes("transactionHash", &wire.transaction_hash)?,
            transaction_index: fields.uint("transactionIndex", &wire.transaction_index)?,
            block_hash: fields.bytes("blockHash", &wire.block_hash)?,
            block_number: fields.uint("blockNumber", &wire.block_number)?,
            gas_used: fields.uint("gasUsed", &wire.gas_used)?,
            effective_gas_price: fields.uint("effectiveGasPrice", &wire.effective_gas_price)?,
            blob_gas_price: fields.uint("blobGasPrice", &wire.blob_gas_price)?,
            from: wire.from,
            to: wire.to,
            contract_address: wire.contract_address,
            other: wire.other,
        })
    }

    fn to_wire(&self) -> ReceiptJson {
        ReceiptJson {
            status: uint_to_hex(self.status),
            cumulative_gas_used: uint_to_hex(self.cumulative_gas_used),
            logs: self.logs.iter().map(Record::to_wire).collect(),
            logs_bloom: bytes_to_hex(&self.logs_bloom),
            receipt_type: uint_to_hex(self.receipt_type),
            transaction_hash: bytes_to_hex(&self.transaction_hash),
            transaction_index: uint_to_hex(self.transaction_index),
            block_hash: bytes_to_hex(&self.block_hash),
            block_number: uint_to_hex(self.block_number),
            gas_used: uint_to_hex(self.gas_used),
            effective_gas_price: uint_to_hex(self.effective_gas_price),
            blob_gas_price: uint_to_hex(self.blob_gas_price),
            from: self.from,
            to: self.to,
            contract_address: self.contract_address,
            other: self.other.clone(),
        }
    }
}

impl_serde_via_wire!(Receipt);
