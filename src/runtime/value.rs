use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::Result;
use crate::runtime::Environment;

/// An identifier, compared and hashed by name
///
/// Symbols are the keys of [`Environment`] bindings and the heads of
/// special forms. Cloning is cheap (shared string).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Creates a symbol with the given name
    pub fn new(name: impl AsRef<str>) -> Self {
        Symbol(Arc::from(name.as_ref()))
    }

    /// Returns the symbol's name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pair cell
///
/// A proper list is a chain of cells whose tails are `Cons` values,
/// terminated by [`Value::Nil`]. Other tail values are constructible but
/// are rejected by the evaluator.
#[derive(Debug, Clone)]
pub struct ConsCell {
    /// First element of the pair
    pub head: Value,
    /// Rest of the pair (Cons or Nil for proper lists)
    pub tail: Value,
}

/// A user-defined function value
///
/// Immutable snapshot taken at creation time: the captured environment is
/// shared by reference and never mutated afterward.
#[derive(Debug, Clone)]
pub struct Closure {
    /// Parameter symbols, bound positionally at application time
    pub params: Vec<Symbol>,
    /// Single body expression
    pub body: Value,
    /// Environment captured where the function literal was evaluated
    pub env: Environment,
}

/// Host function signature for native procedures
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A host-provided operation, opaque to the evaluator beyond its arity
///
/// Natives validate their own argument count and operand types, reporting
/// violations as [`Error::HostOperation`](crate::error::Error::HostOperation).
#[derive(Clone)]
pub struct NativeProcedure {
    name: Arc<str>,
    arity: usize,
    func: Arc<NativeFn>,
}

impl NativeProcedure {
    /// Creates a native procedure with a fixed arity
    pub fn new(
        name: impl AsRef<str>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        NativeProcedure {
            name: Arc::from(name.as_ref()),
            arity,
            func: Arc::new(func),
        }
    }

    /// Returns the procedure name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fixed argument count
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Applies the host operation to already-evaluated arguments
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeProcedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<native {}/{}>", self.name, self.arity)
    }
}

// Natives are compared by identity (the host closure has no structure)
impl PartialEq for NativeProcedure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

/// Runtime value representation
///
/// A closed sum type covering every form the evaluator accepts and every
/// value it can produce. Forms are immutable after construction.
#[derive(Debug, Clone)]
pub enum Value {
    // Literal scalars (self-evaluating)
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating-point value
    Float(f64),
    /// String value
    Str(String),

    // Structured forms
    /// Identifier, resolved against the environment
    Symbol(Symbol),
    /// The empty list (evaluates to itself)
    Nil,
    /// Pair / list cell (reference-counted)
    Cons(Arc<ConsCell>),
    /// Fixed ordered sequence of forms, used as a parameter list
    Vector(Arc<Vec<Value>>),

    // Callables
    /// User function with captured environment
    Closure(Arc<Closure>),
    /// Host-provided operation
    Native(NativeProcedure),
}

impl Value {
    /// Creates a symbol value from a name
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    /// Creates a string value
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Creates a pair cell
    pub fn cons(head: Value, tail: Value) -> Self {
        Value::Cons(Arc::new(ConsCell { head, tail }))
    }

    /// Creates a vector value from a vector of forms
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Arc::new(items))
    }

    /// Builds a proper list (Cons chain terminated by Nil) from elements
    pub fn list(items: Vec<Value>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(Value::Nil, |tail, head| Value::cons(head, tail))
    }

    /// Creates a native procedure value
    pub fn native(
        name: impl AsRef<str>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Value::Native(NativeProcedure::new(name, arity, func))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Nil => "nil",
            Value::Cons(_) => "cons",
            Value::Vector(_) => "vector",
            Value::Closure(_) => "closure",
            Value::Native(_) => "native",
        }
    }

    /// Returns true if the value is truthy in a conditional
    ///
    /// Total over the value model: `Null`, `false`, `0`, `0.0`, the empty
    /// string and the empty list are falsy; every other value, including
    /// pairs, vectors, symbols and callables, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Nil => false,
            Value::Symbol(_) => true,
            Value::Cons(_) => true,
            Value::Vector(_) => true,
            Value::Closure(_) => true,
            Value::Native(_) => true,
        }
    }

    /// Lazily iterates a Cons spine head-to-tail
    ///
    /// The iterator stops at the first non-Cons tail, so a proper list
    /// yields exactly its elements and `Nil` yields none. It borrows the
    /// value; calling `iter_list` again restarts from the front.
    pub fn iter_list(&self) -> ListIter<'_> {
        ListIter { cursor: self }
    }

    /// Collects the elements of a proper list
    ///
    /// Returns `None` when the spine is not terminated by exactly `Nil`
    /// (an improper list, or a value that is not a list at all).
    pub fn proper_list(&self) -> Option<Vec<&Value>> {
        let mut items = Vec::new();
        let mut cursor = self;
        loop {
            match cursor {
                Value::Cons(cell) => {
                    items.push(&cell.head);
                    cursor = &cell.tail;
                }
                Value::Nil => return Some(items),
                _ => return None,
            }
        }
    }
}

/// Borrowing iterator over a Cons spine
///
/// See [`Value::iter_list`].
pub struct ListIter<'a> {
    cursor: &'a Value,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor {
            Value::Cons(cell) => {
                self.cursor = &cell.tail;
                Some(&cell.head)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Symbol(sym) => write!(f, "{}", sym),
            Value::Nil => write!(f, "()"),
            Value::Cons(_) => {
                write!(f, "(")?;
                let mut cursor = self;
                let mut first = true;
                loop {
                    match cursor {
                        Value::Cons(cell) => {
                            if !first {
                                write!(f, " ")?;
                            }
                            first = false;
                            write!(f, "{}", cell.head)?;
                            cursor = &cell.tail;
                        }
                        Value::Nil => break,
                        // Dotted-pair notation for improper tails
                        other => {
                            write!(f, " . {}", other)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Vector(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Closure(closure) => write!(f, "<closure({} params)>", closure.params.len()),
            Value::Native(native) => write!(f, "<native {}>", native.name()),
        }
    }
}

// Structural equality; closures and natives compared by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Cons(a), Value::Cons(b)) => a.head == b.head && a.tail == b.tail,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Arc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a == b,
            _ => false,
        }
    }
}

// Hashing consistent with PartialEq above (floats by bit pattern,
// callables by pointer identity)
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null | Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::Symbol(sym) => sym.hash(state),
            Value::Cons(cell) => {
                cell.head.hash(state);
                cell.tail.hash(state);
            }
            Value::Vector(items) => {
                for item in items.iter() {
                    item.hash(state);
                }
            }
            Value::Closure(closure) => Arc::as_ptr(closure).hash(state),
            Value::Native(native) => Arc::as_ptr(&native.func).hash(state),
        }
    }
}
