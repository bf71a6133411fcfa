use crate::{
    error::DecodeError,
    hex::{bytes_to_hex, uint_to_hex},
    record::{Fields, Record, impl_serde_via_wire},
};
use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The signed payload of a [`Transaction`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InnerTransaction {
    pub from: Option<Address>,
    pub gas: u64,
    pub value: u64,
    pub input: Bytes,
    pub nonce: u64,
    pub chain_id: u64,
    /// Fields not modelled above, written back unchanged.
    pub other: BTreeMap<String, Value>,
}

/// JSON shape of an [`InnerTransaction`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerTransactionJson {
    pub from: Option<Address>,
    pub gas: String,
    pub value: String,
    pub input: String,
    pub nonce: String,
    pub chain_id: String,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Record for InnerTransaction {
    const NAME: &'static str = "inner";

    type Wire = InnerTransactionJson;

    fn from_wire(wire: InnerTransactionJson) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>();
        Ok(Self {
            gas: fields.uint("gas", &wire.gas)?,
            value: fields.uint("value", &wire.value)?,
            input: fields.bytes("input", &wire.input)?,
            nonce: fields.uint("nonce", &wire.nonce)?,
            chain_id: fields.uint("chainId", &wire.chain_id)?,
            from: wire.from,
            other: wire.other,
        })
    }

    fn to_wire(&self) -> InnerTransactionJson {
        InnerTransactionJson {
            from: self.from,
            gas: uint_to_hex(self.gas),
            value: uint_to_hex(self.value),
            input: bytes_to_hex(&self.input),
            nonce: uint_to_hex(self.nonce),
            chain_id: uint_to_hex(self.chain_id),
            other: self.other.clone(),
        }
    }
}

impl_serde_via_wire!(InnerTransaction);

/// A transaction sent by `forge script`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    pub hash: Bytes,
    /// Kind of transaction, e.g. `CREATE` or `CALL`.
    pub transaction_type: String,
    /// Name of the deployed contract; only set for contract creations.
    pub contract_name: Option<String>,
    /// Address of the contract created or called by this transaction.
    pub contract_address: Option<Address>,
    pub transaction: InnerTransaction,
    pub is_fixed_gas_limit: bool,
    /// Fields not modelled above, written back unchanged.
    pub other: BTreeMap<String, Value>,
}

impl Transaction {
    /// Returns `true` if this transaction deployed the contract called `name`.
    pub fn deploys(&self, name: &str) -> bool {
        self.contract_name.as_deref() == Some(name)
    }
}

/// JSON shape of a [`Transaction`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionJson {
    pub hash: String,
    pub transaction_type: String,
    pub contract_name: Option<String>,
    pub contract_address: Option<Address>,
    pub transaction: InnerTransactionJson,
    pub is_fixed_gas_limit: bool,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Record for Transaction {
    const NAME: &'static str = "transaction";

    type Wire = TransactionJson;

    fn from_wire(wire: TransactionJson) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>();
        Ok(Self {
            hash: fields.bytes("hash", &wire.hash)?,
            transaction: fields.nested("transaction", wire.transaction)?,
            transaction_type: wire.transaction_type,
            contract_name: wire.contract_name,
            contract_address: wire.contract_address,
            is_fixed_gas_limit: wire.is_fixed_gas_limit,
            other: wire.other,
        })
    }

    fn to_wire(&self) -> TransactionJson {
        TransactionJson {
            hash: bytes_to_hex(&self.hash),
            transaction_type: self.transaction_type.clone(),
            contract_name: self.contract_name.clone(),
            contract_address: self.contract_address,
            transaction: self.transaction.to_wire(),
            is_fixed_gas_limit: self.is_fixed_gas_limit,
            other: self.other.clone(),
        }
    }
}

impl_serde_via_wire!(Transaction);
