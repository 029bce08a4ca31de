//! Tree-walking evaluator: structural dispatch plus the application protocol

use std::sync::Arc;

use tracing::trace;

use crate::error::{Error, Result};
use crate::runtime::value::{Closure, Value};
use crate::runtime::Environment;

/// Reduces a form to a value under a lexical environment
///
/// Pure, synchronous and deterministic: recursion depth equals form
/// nesting depth, and no error is recovered internally. Special forms
/// (`fn`, `if`) are recognized positionally as the head of a proper list,
/// before any attempt to resolve them as bindings.
pub fn eval(form: &Value, env: &Environment) -> Result<Value> {
    match form {
        Value::Cons(_) => eval_list(form, env),
        Value::Nil => Ok(Value::Nil),
        Value::Symbol(sym) => env.lookup(sym),
        // Literal scalars evaluate to themselves
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {
            Ok(form.clone())
        }
        // A callable presented directly as a form evaluates to itself,
        // never to a second reduction of its body
        Value::Closure(_) | Value::Native(_) => Ok(form.clone()),
        Value::Vector(_) => Err(Error::invalid_form(format!(
            "a bare vector is not a form: {}",
            form
        ))),
    }
}

/// Applies a callable to already-evaluated arguments
///
/// Closure application binds arguments positionally over the captured
/// environment and evaluates the single body expression there. Native
/// procedures receive the argument slice as-is and report their own
/// operand failures.
pub fn apply(procedure: &Value, args: &[Value]) -> Result<Value> {
    match procedure {
        Value::Closure(closure) => {
            if args.len() != closure.params.len() {
                return Err(Error::Arity {
                    expected: closure.params.len(),
                    got: args.len(),
                });
            }
            trace!(params = closure.params.len(), "applying closure");
            let call_env = closure
                .env
                .extend(closure.params.iter().cloned().zip(args.iter().cloned()));
            eval(&closure.body, &call_env)
        }
        Value::Native(native) => {
            trace!(name = native.name(), "applying native procedure");
            native.invoke(args)
        }
        other => Err(Error::invalid_form(format!(
            "value is not callable: {}",
            other.type_name()
        ))),
    }
}

fn eval_list(form: &Value, env: &Environment) -> Result<Value> {
    let items = form.proper_list().ok_or_else(|| {
        Error::invalid_form(format!("improper list in call position: {}", form))
    })?;

    // A Cons spine always yields at least its own head
    match items[0] {
        Value::Symbol(sym) if sym.name() == "fn" => eval_fn(&items, env),
        Value::Symbol(sym) if sym.name() == "if" => eval_if(&items, env),
        _ => eval_application(&items, env),
    }
}

/// `(fn [params...] body)` - builds a closure over the current environment
fn eval_fn(items: &[&Value], env: &Environment) -> Result<Value> {
    if items.len() != 3 {
        return Err(Error::invalid_form(format!(
            "fn expects a parameter vector and exactly one body form, got {} forms",
            items.len() - 1
        )));
    }
    let params = match items[1] {
        Value::Vector(elements) => elements
            .iter()
            .map(|element| match element {
                Value::Symbol(sym) => Ok(sym.clone()),
                other => Err(Error::invalid_form(format!(
                    "fn parameter must be a symbol, got {}",
                    other.type_name()
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(Error::invalid_form(format!(
                "fn parameters must be a vector, got {}",
                other.type_name()
            )))
        }
    };
    trace!(params = params.len(), "creating closure");
    Ok(Value::Closure(Arc::new(Closure {
        params,
        body: items[2].clone(),
        env: env.clone(),
    })))
}

/// `(if predicate consequent alternative)` - evaluates exactly one branch
fn eval_if(items: &[&Value], env: &Environment) -> Result<Value> {
    if items.len() != 4 {
        return Err(Error::invalid_form(format!(
            "if expects a predicate, a consequent and an alternative, got {} forms",
            items.len() - 1
        )));
    }
    let predicate = eval(items[1], env)?;
    if predicate.is_truthy() {
        eval(items[2], env)
    } else {
        eval(items[3], env)
    }
}

/// `(procedure arg...)` - ordinary application
fn eval_application(items: &[&Value], env: &Environment) -> Result<Value> {
    let procedure = eval(items[0], env)?;
    // Argument forms evaluate strictly left-to-right, exactly once each
    let mut args = Vec::with_capacity(items.len() - 1);
    for arg_form in &items[1..] {
        args.push(eval(arg_form, env)?);
    }
    apply(&procedure, &args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::builtins::initial_env;
    use crate::runtime::value::Symbol;

    fn sym(name: &str) -> Value {
        Value::symbol(name)
    }

    #[test]
    fn test_nil_evaluates_to_itself() {
        assert_eq!(eval(&Value::Nil, &initial_env()).unwrap(), Value::Nil);
    }

    #[test]
    fn test_symbol_resolution() {
        let env = Environment::with_bindings([(Symbol::new("x"), Value::Int(42))]);
        assert_eq!(eval(&sym("x"), &env).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_callable_form_evaluates_to_itself() {
        let env = initial_env();
        let plus = env.lookup(&Symbol::new("+")).unwrap();
        assert_eq!(eval(&plus, &env).unwrap(), plus);

        let closure = eval(
            &Value::list(vec![sym("fn"), Value::vector(vec![]), Value::Int(1)]),
            &env,
        )
        .unwrap();
        assert_eq!(eval(&closure, &env).unwrap(), closure);
    }

    #[test]
    fn test_bare_vector_is_invalid() {
        let err = eval(&Value::vector(vec![Value::Int(1)]), &initial_env()).unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));
    }

    #[test]
    fn test_improper_list_is_invalid() {
        let dotted = Value::cons(sym("+"), Value::Int(1));
        let err = eval(&dotted, &initial_env()).unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));
    }

    #[test]
    fn test_fn_shape_is_checked() {
        let env = initial_env();

        // Missing body
        let err = eval(
            &Value::list(vec![sym("fn"), Value::vector(vec![sym("a")])]),
            &env,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));

        // Two body forms
        let err = eval(
            &Value::list(vec![
                sym("fn"),
                Value::vector(vec![sym("a")]),
                sym("a"),
                sym("a"),
            ]),
            &env,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));

        // Parameter slot is not a vector
        let err = eval(
            &Value::list(vec![sym("fn"), Value::list(vec![sym("a")]), sym("a")]),
            &env,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));

        // Non-symbol parameter
        let err = eval(
            &Value::list(vec![
                sym("fn"),
                Value::vector(vec![Value::Int(1)]),
                Value::Int(1),
            ]),
            &env,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));
    }

    #[test]
    fn test_if_shape_is_checked() {
        let err = eval(
            &Value::list(vec![sym("if"), Value::Bool(true), Value::Int(1)]),
            &initial_env(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));
    }

    #[test]
    fn test_applying_non_callable() {
        let err = apply(&Value::Int(1), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));

        let form = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let err = eval(&form, &initial_env()).unwrap_err();
        assert!(matches!(err, Error::InvalidForm(_)));
    }
}
