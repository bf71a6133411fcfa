//! The decode/encode capability shared by every broadcast record.

use crate::{
    error::{DecodeError, EncodeError},
    hex::{self, HexError},
};
use alloy_primitives::Bytes;
use serde::{Serialize, de::DeserializeOwned};

/// A record from a broadcast artifact.
///
/// Each record has a wire representation, [`Record::Wire`], which mirrors the JSON document
/// field for field with every integer and byte blob kept as a hex string. Decoding parses the
/// wire shape first and then converts the hex fields; encoding is the mirror image.
///
/// Nullable fields such as a receipt's `to` decode to `None` whether they are `null` or
/// missing, and always encode as an explicit `null`.
pub trait Record: Sized {
    /// Name used in error messages.
    const NAME: &'static str;

    /// JSON shape of the record.
    type Wire: Serialize + DeserializeOwned;

    /// Converts the wire representation, failing on the first malformed field.
    fn from_wire(wire: Self::Wire) -> Result<Self, DecodeError>;

    /// Builds the wire representation.
    fn to_wire(&self) -> Self::Wire;

    /// Decodes the record from JSON bytes.
    fn decode(json: &[u8]) -> Result<Self, DecodeError> {
        let wire = serde_json::from_slice(json)
            .map_err(|source| DecodeError::Json { record: Self::NAME, source })?;
        Self::from_wire(wire)
    }

    /// Encodes the record as JSON bytes.
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec(&self.to_wire()).map_err(|source| EncodeError { record: Self::NAME, source })
    }
}

/// Converts the hex fields of a single record, tagging failures with the record name.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fields {
    record: &'static str,
}

impl Fields {
    pub(crate) const fn of<R: Record>() -> Self {
        Self { record: R::NAME }
    }

    fn field_error(&self, field: &'static str) -> impl FnOnce(HexError) -> DecodeError {
        let record = self.record;
        move |source| DecodeError::Field { record, field, source }
    }

    pub(crate) fn uint(&self, field: &'static str, value: &str) -> Result<u64, DecodeError> {
        hex::hex_to_uint(value).map_err(self.field_error(field))
    }

    pub(crate) fn bytes(&self, field: &'static str, value: &str) -> Result<Bytes, DecodeError> {
        hex::hex_to_bytes(value).map_err(self.field_error(field))
    }

    pub(crate) fn nested<R: Record>(
        &self,
        field: &'static str,
        wire: R::Wire,
    ) -> Result<R, DecodeError> {
        R::from_wire(wire).map_err(|source| DecodeError::Nested {
            record: self.record,
            field: field.to_string(),
            source: Box::new(source),
        })
    }

    /// Converts a sequence of nested records in order, naming the failing element by index.
    pub(crate) fn sequence<R: Record>(
        &self,
        field: &'static str,
        wires: Vec<R::Wire>,
    ) -> Result<Vec<R>, DecodeError> {
        wires
            .into_iter()
            .enumerate()
            .map(|(i, wire)| {
                R::from_wire(wire).map_err(|source| DecodeError::Nested {
                    record: self.record,
                    field: format!("{field}[{i}]"),
                    source: Box::new(source),
                })
            })
            .collect()
    }
}

/// Implements `Serialize` and `Deserialize` for a [`Record`] through its wire type.
macro_rules! impl_serde_via_wire {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::Record::to_wire(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let wire = <<$ty as $crate::Record>::Wire as serde::Deserialize<'de>>::deserialize(
                    deserializer,
                )?;
                <$ty as $crate::Record>::from_wire(wire)
                    .map_err(|err| serde::de::Error::custom(err.report()))
            }
        }
    };
}

pub(crate) use impl_serde_via_wire;
