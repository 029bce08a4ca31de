//! Runtime: value model, environments, builtins and the evaluator

pub mod builtins;
pub mod environment;
pub mod eval;
pub mod value;

pub use builtins::initial_env;
pub use environment::Environment;
pub use eval::{apply, eval};
pub use value::{Closure, ConsCell, ListIter, NativeProcedure, Symbol, Value};
