//! # Talisp - a minimal Lisp-like expression evaluator
//!
//! A tree-walking evaluator for a minimal Lisp-like expression language.
//! It consumes pre-built structured forms (symbols, pairs, the empty list,
//! vectors, literal scalars) and reduces them to values under a lexical
//! environment, supporting exactly two special forms plus function
//! application with closures:
//!
//! - `(fn [params...] body)` - a function literal capturing the current
//!   environment
//! - `(if predicate consequent alternative)` - a conditional that
//!   evaluates exactly one branch
//!
//! There is no reader: forms are built directly with [`Value`]
//! constructors. A separate front end may produce them from text as long
//! as it emits values conforming to the model below.
//!
//! ## Quick Start
//!
//! ```rust
//! use talisp::{eval, initial_env, Value};
//!
//! # fn main() -> talisp::Result<()> {
//! // (+ 1 2) -> 3
//! let form = Value::list(vec![Value::symbol("+"), Value::Int(1), Value::Int(2)]);
//! assert_eq!(eval(&form, &initial_env())?, Value::Int(3));
//!
//! // ((fn [a] (* a 11)) 7) -> 77
//! let form = Value::list(vec![
//!     Value::list(vec![
//!         Value::symbol("fn"),
//!         Value::vector(vec![Value::symbol("a")]),
//!         Value::list(vec![Value::symbol("*"), Value::symbol("a"), Value::Int(11)]),
//!     ]),
//!     Value::Int(7),
//! ]);
//! assert_eq!(eval(&form, &initial_env())?, Value::Int(77));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! forms (Value) → eval → recursive structural dispatch
//!                          ├─ Environment   symbol resolution
//!                          └─ apply         closures & native procedures
//! ```
//!
//! ### Main Components
//!
//! - [`Value`] - closed sum type of forms and runtime values
//! - [`Environment`] - immutable Symbol → Value scope chain
//! - [`eval`] - pure structural dispatch over the value model
//! - [`apply`] - the application protocol for closures and natives
//! - [`initial_env`] - frozen base environment (`+ - * / < >`)
//!
//! ## Error Handling
//!
//! All failures are values of [`Error`]: unbound symbols, closure arity
//! mismatches, unrecognized or malformed form shapes, and operand
//! rejections from native procedures. Nothing is recovered internally;
//! errors propagate unchanged to the caller of [`eval`]. The only
//! resource-exhaustion mode is host stack overflow from deeply nested
//! forms, which is fatal rather than reportable.

/// Version of the talisp evaluator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod runtime;

// Re-export main types
pub use error::{Error, Result};
pub use runtime::{
    apply, eval, initial_env, Closure, ConsCell, Environment, ListIter, NativeProcedure, Symbol,
    Value,
};
