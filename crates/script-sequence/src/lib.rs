//! # bearchain-script-sequence
//!
//! Types for the broadcast artifacts `forge script --broadcast` writes to
//! `<broadcast>/<script>/<chain id>/run-latest.json`.
//!
//! Numbers and byte blobs in these artifacts are hex strings rather than JSON numbers. Every
//! record goes through the [`hex`] codec on its way in and out, see [`Record`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod hex;

mod record;
pub use record::Record;

mod error;
pub use error::{ContractNotFound, DecodeError, EncodeError};

mod log;
pub use log::{Log, LogJson};

mod receipt;
pub use receipt::{Receipt, ReceiptJson};

mod transaction;
pub use transaction::{InnerTransaction, InnerTransactionJson, Transaction, TransactionJson};

mod broadcast;
pub use broadcast::{Broadcast, BroadcastJson, RUN_LATEST};
