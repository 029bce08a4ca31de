//! Error types for the talisp evaluator

use thiserror::Error;

/// Evaluation errors
///
/// None of these are recovered inside the evaluator; every failure
/// propagates unchanged to the caller of [`eval`](crate::runtime::eval)
/// and aborts evaluation of the enclosing form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Reference to a symbol absent from the active environment chain
    ///
    /// **Triggered by:** evaluating a `Symbol` form with no binding in the
    /// environment or any of its parents, including shadowed layers.
    /// **Example:** evaluating `undefined` against the initial environment
    #[error("Unbound symbol: {name}")]
    UnboundSymbol {
        /// Symbol name that failed to resolve
        name: String,
    },

    /// Argument count does not exactly match a closure's parameter count
    ///
    /// **Triggered by:** applying a closure to too few or too many
    /// arguments. Arguments are never silently truncated or padded.
    /// **Example:** `((fn [a] a) 1 2)`
    #[error("Arity mismatch: expected {expected} arguments, got {got}")]
    Arity {
        /// Number of parameters the closure declares
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// A form does not match any recognized evaluation shape
    ///
    /// **Triggered by:** malformed `fn`/`if` shapes, improper lists in
    /// call position, bare vectors, or application of a non-callable value.
    /// **Example:** `(fn [a])` (missing body)
    #[error("Invalid form: {0}")]
    InvalidForm(String),

    /// A native procedure rejected its operands
    ///
    /// **Triggered by:** wrong argument count or operand types for a
    /// builtin, or division by zero.
    /// **Example:** `(/ 1 0)`, `(< "a" 1)`
    #[error("Host operation failed: {op}: {reason}")]
    HostOperation {
        /// Name of the native procedure
        op: String,
        /// Why the operands were rejected
        reason: String,
    },
}

impl Error {
    /// Create an invalid-form error with a message
    pub fn invalid_form(msg: impl Into<String>) -> Self {
        Error::InvalidForm(msg.into())
    }

    /// Create a host-operation error for the named builtin
    pub fn host(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::HostOperation {
            op: op.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for talisp operations
pub type Result<T> = std::result::Result<T, Error>;
