use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{
        env::Environment,
        evaluator::core::{Context, EvalResult},
        value::{
            core::Value,
            function::{Function, NativeFn},
        },
    },
};

/// Defines the builtins installed into the root environment.
///
/// Each entry provides:
/// - the name the builtin is bound under (operators are plain bindings, so
///   `+` is a name like any other, and unary operators live under their
///   `prefix:` key),
/// - the exact argument count,
/// - whether the builtin is lazy (receives thunks instead of values),
/// - a function pointer implementing it.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table used to build the root environment),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                lazy: $lazy:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            lazy:  bool,
            func:  NativeFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, lazy: $lazy, func: $func },
            )*
        ];
        /// The names of all builtins in the root environment.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "+"          => { arity: 2, lazy: false, func: add },
    "-"          => { arity: 2, lazy: false, func: sub },
    "*"          => { arity: 2, lazy: false, func: mul },
    "/"          => { arity: 2, lazy: false, func: div },
    "%"          => { arity: 2, lazy: false, func: rem },
    "^"          => { arity: 2, lazy: false, func: pow },
    "<"          => { arity: 2, lazy: false, func: lt },
    "<="         => { arity: 2, lazy: false, func: le },
    ">"          => { arity: 2, lazy: false, func: gt },
    ">="         => { arity: 2, lazy: false, func: ge },
    "=="         => { arity: 2, lazy: false, func: eq },
    ".."         => { arity: 2, lazy: false, func: range },
    "and"        => { arity: 2, lazy: true,  func: and },
    "or"         => { arity: 2, lazy: true,  func: or },
    "prefix:-"   => { arity: 1, lazy: false, func: negate },
    "prefix:not" => { arity: 1, lazy: false, func: not },
    "print"      => { arity: 1, lazy: false, func: print },
    "assert"     => { arity: 1, lazy: false, func: assert_value },
}

/// Builds the root environment of the default Teacup definition.
///
/// Every table entry becomes a strict or lazy function value; `true` and
/// `false` are ordinary bindings, which is why the lexer needs no boolean
/// token kind.
#[must_use]
pub fn root_environment() -> Rc<Environment> {
    let env = Environment::root();

    for def in BUILTIN_TABLE {
        let function = if def.lazy {
            Function::Lazy { name:  def.name,
                             arity: def.arity,
                             func:  def.func, }
        } else {
            Function::Strict { name:  def.name,
                               arity: def.arity,
                               func:  def.func, }
        };
        env.define(def.name, Value::Function(Rc::new(function)));
    }

    env.define("true", Value::Bool(true));
    env.define("false", Value::Bool(false));

    env
}

/// Addition on numbers; two strings concatenate instead.
fn add(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    match (&args[0], &args[1]) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(Rc::from(format!("{a}{b}").as_str()))),
        _ => Ok(Value::Number(args[0].as_number(at)? + args[1].as_number(at)?)),
    }
}

fn sub(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number(at)? - args[1].as_number(at)?))
}

fn mul(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number(at)? * args[1].as_number(at)?))
}

/// Division; a zero divisor is an error rather than an infinity.
fn div(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    let dividend = args[0].as_number(at)?;
    let divisor = args[1].as_number(at)?;

    if divisor == 0.0 {
        return Err(RuntimeError::DivisionByZero { at });
    }
    Ok(Value::Number(dividend / divisor))
}

fn rem(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    let dividend = args[0].as_number(at)?;
    let divisor = args[1].as_number(at)?;

    if divisor == 0.0 {
        return Err(RuntimeError::DivisionByZero { at });
    }
    Ok(Value::Number(dividend % divisor))
}

fn pow(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number(at)?.powf(args[1].as_number(at)?)))
}

/// Totally orders two comparable values.
///
/// Numbers order through `OrderedFloat`, strings lexicographically; mixing
/// the two or ordering anything else is a type error.
fn ordering(a: &Value, b: &Value, at: usize) -> EvalResult<std::cmp::Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(OrderedFloat(*x).cmp(&OrderedFloat(*y))),
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        _ => Err(RuntimeError::TypeError { details: "ordering requires two numbers or two strings"
                                                    .to_string(),
                                           at }),
    }
}

fn lt(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Bool(ordering(&args[0], &args[1], at)? == std::cmp::Ordering::Less))
}

fn le(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Bool(ordering(&args[0], &args[1], at)? != std::cmp::Ordering::Greater))
}

fn gt(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Bool(ordering(&args[0], &args[1], at)? == std::cmp::Ordering::Greater))
}

fn ge(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Bool(ordering(&args[0], &args[1], at)? != std::cmp::Ordering::Less))
}

fn eq(_: &Context, args: &[Value], _at: usize) -> EvalResult<Value> {
    Ok(Value::Bool(args[0] == args[1]))
}

/// The half-open range `a .. b` as a list with unit steps.
fn range(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    let mut from = args[0].as_number(at)?;
    let to = args[1].as_number(at)?;

    if !from.is_finite() || !to.is_finite() {
        return Err(RuntimeError::TypeError { details: "range bounds must be finite".to_string(),
                                             at });
    }

    let mut items = Vec::new();
    while from < to {
        items.push(Value::Number(from));
        from += 1.0;
    }

    Ok(Value::List(Rc::new(items)))
}

/// Short-circuit conjunction over thunks: the right thunk is never forced
/// when the left one yields `false`.
fn and(context: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    if !context.call(&args[0], Vec::new(), at)?.as_bool(at)? {
        return Ok(Value::Bool(false));
    }
    Ok(Value::Bool(context.call(&args[1], Vec::new(), at)?.as_bool(at)?))
}

/// Short-circuit disjunction over thunks: the right thunk is never forced
/// when the left one yields `true`.
fn or(context: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    if context.call(&args[0], Vec::new(), at)?.as_bool(at)? {
        return Ok(Value::Bool(true));
    }
    Ok(Value::Bool(context.call(&args[1], Vec::new(), at)?.as_bool(at)?))
}

fn negate(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Number(-args[0].as_number(at)?))
}

fn not(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    Ok(Value::Bool(!args[0].as_bool(at)?))
}

/// Sends the argument to the context's output sink and returns it
/// unchanged, so `print` composes inside larger expressions.
fn print(context: &Context, args: &[Value], _at: usize) -> EvalResult<Value> {
    context.emit(&args[0]);
    Ok(args[0].clone())
}

/// Fails evaluation unless the argument is `true`. The workhorse of the
/// self-checking demo scripts.
fn assert_value(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
    if args[0].as_bool(at)? {
        Ok(Value::Bool(true))
    } else {
        Err(RuntimeError::AssertionFailed { at })
    }
}
