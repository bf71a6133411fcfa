use crate::{
    error::{ContractNotFound, DecodeError},
    receipt::{Receipt, ReceiptJson},
    record::{Fields, Record, impl_serde_via_wire},
    transaction::{Transaction, TransactionJson},
};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// File name of the latest run inside a broadcast directory.
pub const RUN_LATEST: &str = "run-latest.json";

/// Everything `forge script --broadcast` recorded for a single run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Broadcast {
    pub transactions: Vec<Transaction>,
    /// Receipts of `transactions`. They carry no contract names.
    pub receipts: Vec<Receipt>,
    pub timestamp: u64,
    pub chain: u64,
    pub commit: Option<String>,
    /// Fields not modelled above, written back unchanged.
    pub other: BTreeMap<String, Value>,
}

impl Broadcast {
    /// Returns the path forge writes the latest run of `script_name` on `chain_id` to:
    /// `<broadcast_dir>/<script_name>/<chain_id>/run-latest.json`.
    pub fn artifact_path(broadcast_dir: &Path, script_name: &str, chain_id: u64) -> PathBuf {
        broadcast_dir.join(script_name).join(chain_id.to_string()).join(RUN_LATEST)
    }

    /// Returns the address the contract `name` was deployed at.
    ///
    /// Transactions are scanned in order and the first one whose contract name matches exactly
    /// wins.
    pub fn find_contract_address(&self, name: &str) -> Result<Address, ContractNotFound> {
        let address =
            self.transactions.iter().find(|tx| tx.deploys(name)).and_then(|tx| tx.contract_address);
        match address {
            Some(address) => {
                tracing::debug!(%name, %address, "found contract");
                Ok(address)
            }
            None => Err(ContractNotFound { name: name.to_string() }),
        }
    }
}

/// JSON shape of a [`Broadcast`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BroadcastJson {
    pub transactions: Vec<TransactionJson>,
    pub receipts: Vec<ReceiptJson>,
    pub timestamp: u64,
    pub chain: u64,
    pub commit: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Record for Broadcast {
    const NAME: &'static str = "broadcast";

    type Wire = BroadcastJson;

    fn from_wire(wire: BroadcastJson) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>();
        let broadcast = Self {
            transactions: fields.sequence("transactions", wire.transactions)?,
            receipts: fields.sequence("receipts", wire.receipts)?,
            timestamp: wire.timestamp,
            chain: wire.chain,
            commit: wire.commit,
            other: wire.other,
        };
        tracing::trace!(
            transactions = broadcast.transactions.len(),
            receipts = broadcast.receipts.len(),
            chain = broadcast.chain,
            "decoded broadcast"
        );
        Ok(broadcast)
    }

    fn to_wire(&self) -> BroadcastJson {
        BroadcastJson {
            transactions: self.transactions.iter().map(Record::to_wire).collect(),
            receipts: self.receipts.iter().map(Record::to_wire).collect(),
            timestamp: self.timestamp,
            chain: self.chain,
            commit: self.commit.clone(),
            other: self.other.clone(),
        }
    }
}

impl_serde_via_wire!(Broadcast);
