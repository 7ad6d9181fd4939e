use thiserror::Error;

/// Range/validation error raised by construction, coercion and arithmetic.
///
/// Every failure surfaces synchronously to the immediate caller; nothing is
/// retried and a failed construction never yields a partially valid value.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TemporalError {
    /// A field is outside its natural bound, or an intermediate result is
    /// not representable.
    #[error("{field} {value} is out of range")]
    InvalidField { field: &'static str, value: i128 },
    /// A property bag carries an unrecognized field, or no usable field.
    #[error("invalid {target} property bag: {message}")]
    InvalidPropertyBag {
        target: &'static str,
        message: String,
    },
    /// A duration argument carries a field not meaningful for the receiver.
    #[error("invalid duration for {target}: a {field} component is not accepted")]
    InvalidDuration {
        target: &'static str,
        field: &'static str,
    },
    /// The grammar for the target type does not match the input string.
    #[error("invalid {target} string {input:?}: {message}")]
    InvalidString {
        target: &'static str,
        input: String,
        message: &'static str,
    },
    /// The coercion dispatcher exhausted every recognized shape.
    #[error("invalid {target} value: {value}")]
    InvalidInput {
        target: &'static str,
        value: String,
    },
    /// An unrecognized disambiguation policy token.
    #[error("invalid disambiguation {token:?}")]
    InvalidDisambiguation { token: String },
}
