use crate::hex::HexError;

/// Errors that can happen while decoding a broadcast record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not valid JSON for the record's shape.
    #[error("{record}: malformed json")]
    Json {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// A hex encoded field could not be converted.
    #[error("{record}: parsing {field}")]
    Field {
        record: &'static str,
        field: &'static str,
        #[source]
        source: HexError,
    },
    /// A nested record failed to decode.
    #[error("{record}: decoding {field}")]
    Nested {
        record: &'static str,
        field: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Returns the name of the outermost record that failed to decode.
    pub fn record(&self) -> &'static str {
        match self {
            Self::Json { record, .. } | Self::Field { record, .. } | Self::Nested { record, .. } => {
                *record
            }
        }
    }

    /// Returns the dotted path to the offending field, e.g. `receipt.logs[1].blockHash`.
    pub fn field_path(&self) -> String {
        let mut path = self.record().to_string();
        let mut current = self;
        loop {
            match current {
                Self::Json { .. } => return path,
                Self::Field { field, .. } => {
                    path.push('.');
                    path.push_str(field);
                    return path;
                }
                Self::Nested { field, source, .. } => {
                    path.push('.');
                    path.push_str(field);
                    current = &**source;
                }
            }
        }
    }

    /// Renders the error together with every underlying cause.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }

    /// Returns the hex conversion failure at the root of this error, if any.
    pub fn hex_error(&self) -> Option<&HexError> {
        match self {
            Self::Json { .. } => None,
            Self::Field { source, .. } => Some(source),
            Self::Nested { source, .. } => source.hex_error(),
        }
    }
}

/// Error returned when a record cannot be serialized.
///
/// Records only hold values that have a wire representation, so this indicates a broken
/// invariant rather than bad input.
#[derive(Debug, thiserror::Error)]
#[error("{record}: encoding")]
pub struct EncodeError {
    pub record: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// The requested contract name has no deployment in the broadcast.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("contract not found: {name}")]
pub struct ContractNotFound {
    pub name: String,
}
