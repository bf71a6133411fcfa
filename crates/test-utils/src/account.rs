use alloy_primitives::Address;
use alloy_signer_local::{LocalSignerError, PrivateKeySigner};

/// Errors that can happen when building an [`Account`].
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("invalid private key for {address}")]
    InvalidKey {
        address: Address,
        #[source]
        source: LocalSignerError,
    },
    #[error("private key for {expected} belongs to {derived}")]
    AddressMismatch { expected: Address, derived: Address },
}

/// A funded account of the local node.
#[derive(Clone, Debug)]
pub struct Account {
    address: Address,
    signer: PrivateKeySigner,
    private_key_hex: String,
    balance: u64,
}

impl Account {
    /// Creates an account from its address and `0x`-prefixed private key.
    ///
    /// Fails if the key is malformed or does not belong to `address`.
    pub fn new(
        address: Address,
        private_key_hex: impl Into<String>,
        balance: u64,
    ) -> Result<Self, AccountError> {
        let private_key_hex = private_key_hex.into();
        let signer: PrivateKeySigner = private_key_hex
            .parse()
            .map_err(|source| AccountError::InvalidKey { address, source })?;
        if signer.address() != address {
            return Err(AccountError::AddressMismatch { expected: address, derived: signer.address() });
        }
        Ok(Self { address, signer, private_key_hex, balance })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns a signer for transactions sent from this account.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Returns the private key as passed to `--private-key`.
    pub fn private_key_hex(&self) -> &str {
        &self.private_key_hex
    }

    /// Returns the genesis balance, in ether.
    pub fn balance(&self) -> u64 {
        self.balance
    }
}
