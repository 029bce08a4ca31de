use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::runtime::value::{Symbol, Value};

/// Lexical environment: an immutable Symbol -> Value mapping
///
/// Implemented as a parent-pointer scope chain: each frame holds its own
/// bindings plus a shared reference to the frame it extends. Extension is
/// O(1) and lookup is O(depth); nothing is ever written to an existing
/// frame, so clones are cheap and concurrent reads need no locking.
#[derive(Debug, Clone)]
pub struct Environment {
    frame: Arc<Frame>,
}

#[derive(Debug)]
struct Frame {
    bindings: HashMap<Symbol, Value>,
    parent: Option<Environment>,
}

impl Environment {
    /// Creates an empty root environment
    pub fn new() -> Self {
        Environment {
            frame: Arc::new(Frame {
                bindings: HashMap::new(),
                parent: None,
            }),
        }
    }

    /// Creates a root environment from a set of bindings
    pub fn with_bindings(bindings: impl IntoIterator<Item = (Symbol, Value)>) -> Self {
        Environment {
            frame: Arc::new(Frame {
                bindings: bindings.into_iter().collect(),
                parent: None,
            }),
        }
    }

    /// Resolves a symbol, walking the chain from innermost to outermost
    pub fn lookup(&self, sym: &Symbol) -> Result<Value> {
        let mut frame = &self.frame;
        loop {
            if let Some(val) = frame.bindings.get(sym) {
                return Ok(val.clone());
            }
            match &frame.parent {
                Some(parent) => frame = &parent.frame,
                None => {
                    return Err(Error::UnboundSymbol {
                        name: sym.name().to_string(),
                    })
                }
            }
        }
    }

    /// Returns a new environment layering `bindings` on top of this one
    ///
    /// Same-named entries shadow the receiver's; the receiver itself is
    /// unchanged and remains queryable. Callers supply unique symbols;
    /// with duplicates the last pair wins.
    pub fn extend(&self, bindings: impl IntoIterator<Item = (Symbol, Value)>) -> Environment {
        Environment {
            frame: Arc::new(Frame {
                bindings: bindings.into_iter().collect(),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Checks whether a symbol is bound anywhere in the chain
    pub fn contains(&self, sym: &Symbol) -> bool {
        self.lookup(sym).is_ok()
    }

    /// Returns the number of frames in the chain (1 for a root)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = &self.frame;
        while let Some(parent) = &frame.parent {
            depth += 1;
            frame = &parent.frame;
        }
        depth
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_root() {
        let env = Environment::with_bindings([(Symbol::new("x"), Value::Int(42))]);
        assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_unbound_symbol() {
        let env = Environment::new();
        let err = env.lookup(&Symbol::new("missing")).unwrap_err();
        assert_eq!(
            err,
            Error::UnboundSymbol {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_extension_shadows() {
        let outer = Environment::with_bindings([(Symbol::new("x"), Value::Int(10))]);
        let inner = outer.extend([(Symbol::new("x"), Value::Int(20))]);

        assert_eq!(inner.lookup(&Symbol::new("x")).unwrap(), Value::Int(20));
        // The receiver is untouched by the extension
        assert_eq!(outer.lookup(&Symbol::new("x")).unwrap(), Value::Int(10));
    }

    #[test]
    fn test_extension_sees_parent() {
        let outer = Environment::with_bindings([(Symbol::new("x"), Value::Int(1))]);
        let inner = outer.extend([(Symbol::new("y"), Value::Int(2))]);

        assert_eq!(inner.lookup(&Symbol::new("x")).unwrap(), Value::Int(1));
        assert_eq!(inner.lookup(&Symbol::new("y")).unwrap(), Value::Int(2));
        assert!(outer.lookup(&Symbol::new("y")).is_err());
    }

    #[test]
    fn test_unbound_reports_through_whole_chain() {
        let outer = Environment::with_bindings([(Symbol::new("x"), Value::Int(1))]);
        let inner = outer.extend([(Symbol::new("y"), Value::Int(2))]);
        assert!(inner.lookup(&Symbol::new("z")).is_err());
    }

    #[test]
    fn test_contains_and_depth() {
        let root = Environment::with_bindings([(Symbol::new("x"), Value::Int(1))]);
        assert_eq!(root.depth(), 1);
        assert!(root.contains(&Symbol::new("x")));
        assert!(!root.contains(&Symbol::new("y")));

        let child = root.extend([(Symbol::new("y"), Value::Int(2))]);
        assert_eq!(child.depth(), 2);
        assert!(child.contains(&Symbol::new("x")));
        assert!(child.contains(&Symbol::new("y")));
    }

    #[test]
    fn test_ordered_bindings_last_wins() {
        let env = Environment::new().extend([
            (Symbol::new("x"), Value::Int(1)),
            (Symbol::new("x"), Value::Int(2)),
        ]);
        assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), Value::Int(2));
    }
}
