use std::{cell::RefCell, collections::HashMap, fs, rc::Rc};

use teacup::{
    error::RuntimeError,
    evaluate, get_result,
    interpreter::{
        evaluator::core::{Context, EvalResult, HandlerKey},
        value::{core::Value, function::Function},
    },
};
use walkdir::WalkDir;

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {src}\n{e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail: {src}")
    }
}

fn assert_value(src: &str, expected: &Value) {
    match evaluate(src) {
        Ok(Some(value)) => assert_eq!(&value, expected, "wrong value for: {src}"),
        Ok(None) => panic!("Script produced no value: {src}"),
        Err(e) => panic!("Script failed: {src}\n{e}"),
    }
}

fn numbers(ns: &[f64]) -> Value {
    Value::List(Rc::new(ns.iter().copied().map(Value::Number).collect()))
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "tea")
                                      })
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Err(e) = get_result(&source, false) {
            panic!("Demo script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn arithmetic_and_precedence() {
    assert_value("1 + 2 * 3", &Value::Number(7.0));
    assert_value("(1 + 2) * 3", &Value::Number(9.0));
    assert_value("10 % 4 + 1", &Value::Number(3.0));
    assert_value("7 - 2 - 1", &Value::Number(4.0));
}

#[test]
fn exponentiation_is_right_associative() {
    assert_value("2 ^ 3 ^ 2", &Value::Number(512.0));
    assert_value("(2 ^ 3) ^ 2", &Value::Number(64.0));
}

#[test]
fn unary_minus_via_prefix_tagging() {
    assert_value("-3 + 4", &Value::Number(1.0));
    assert_value("2 * -3", &Value::Number(-6.0));
    assert_value("-(2 + 3)", &Value::Number(-5.0));
    assert_value("1 - -1", &Value::Number(2.0));
}

#[test]
fn comparisons_and_logic() {
    assert_value("1 < 2", &Value::Bool(true));
    assert_value("2 <= 2", &Value::Bool(true));
    assert_value("3 > 4", &Value::Bool(false));
    assert_value("3 >= 4", &Value::Bool(false));
    assert_value("2 == 2", &Value::Bool(true));
    assert_value("not true", &Value::Bool(false));
    assert_value("not (1 > 2)", &Value::Bool(true));
    assert_value("true and false", &Value::Bool(false));
    assert_value("false or true", &Value::Bool(true));
    assert_value("\"abc\" < \"abd\"", &Value::Bool(true));
}

#[test]
fn logic_is_short_circuiting() {
    assert_value("true or (1 / 0)", &Value::Bool(true));
    assert_value("false and (1 / 0)", &Value::Bool(false));
    assert_failure("false or (1 / 0)");
}

#[test]
fn let_bindings_are_sequential() {
    assert_value("let x = 10, y = x + 1 in y * 2 end", &Value::Number(22.0));
    assert_value("let x = 1 in let x = x + 1 in x end end", &Value::Number(2.0));
}

#[test]
fn let_function_bindings_recurse() {
    assert_value("let fact(n) = if n == 0 then 1 else n * fact(n - 1) end in fact(5) end",
                 &Value::Number(120.0));
    assert_value("let f() = 5 in f() end", &Value::Number(5.0));
    assert_value("let add(a, b) = a + b in add(2, 5) end", &Value::Number(7.0));
}

#[test]
fn lambdas_and_higher_order_functions() {
    assert_value("let double = x -> x * 2 in double(21) end", &Value::Number(42.0));
    assert_value("(x -> x + 1)(41)", &Value::Number(42.0));
    assert_value("let compose(f, g) = x -> f(g(x)) in compose(n -> n * 2, n -> n + 1)(20) end",
                 &Value::Number(42.0));
}

#[test]
fn closures_capture_their_environment() {
    // Rebinding y in an inner scope must not leak into the closure.
    assert_value("let y = 1 in let f = x -> x + y in let y = 100 in f(1) end end end",
                 &Value::Number(2.0));
}

#[test]
fn conditional_cascade() {
    assert_value("if 1 < 2 then 10 else 20 end", &Value::Number(10.0));
    assert_value("if 1 > 2 then 10 else 20 end", &Value::Number(20.0));
    assert_value("if false then 1 elif true then 2 else 3 end", &Value::Number(2.0));
    assert_value("if false then 1 elif false then 2 else 3 end", &Value::Number(3.0));
    assert_value("if false then 1 end", &Value::Null);
}

#[test]
fn ranges_and_comprehensions() {
    assert_value("1 .. 6", &numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]));
    assert_value("3 .. 3", &numbers(&[]));
    assert_value("for x in 1 .. 4 do x * x end", &numbers(&[1.0, 4.0, 9.0]));
    assert_value("for x in 1 .. 6 when x % 2 == 0 do x * x end",
                 &numbers(&[4.0, 16.0]));
}

#[test]
fn lists_and_indexing() {
    assert_value("[1, 2, 3][0]", &Value::Number(1.0));
    assert_value("[1, 2, 3][2]", &Value::Number(3.0));
    assert_value("[]", &numbers(&[]));
    assert_value("[[1, 2], [3, 4]][1][0]", &Value::Number(3.0));
    assert_value("[[1, 2], [3, 4]][1, 0]", &Value::Number(3.0));
    assert_value("[1, 2, 3].length", &Value::Number(3.0));
}

#[test]
fn strings() {
    assert_value("\"hello\"", &Value::Str(Rc::from("hello")));
    assert_value("\"foo\" + \"bar\"", &Value::Str(Rc::from("foobar")));
    assert_value("\"hello\".length", &Value::Number(5.0));
    assert_value("\"hello\" == \"hello\"", &Value::Bool(true));
}

#[test]
fn sequences_return_the_last_value() {
    assert_value("1 + 1\n2 + 2", &Value::Number(4.0));
    assert_value("1; 2; 3", &Value::Number(3.0));
    assert_value("1, 2, 3", &Value::Number(3.0));
    assert_value("begin 1; 2; 3 end", &Value::Number(3.0));
    assert_value("1 + 1\n", &Value::Number(2.0));
    assert_value("\n2 + 2", &Value::Number(4.0));
}

#[test]
fn comments_are_discarded() {
    assert_value("1 + 1 # one more", &Value::Number(2.0));
    assert_value("# leading note\n2 + 2", &Value::Number(4.0));
}

#[test]
fn empty_input_produces_no_value() {
    assert_eq!(evaluate("").unwrap(), None);
    assert_eq!(evaluate("   # just a comment").unwrap(), None);
}

#[test]
fn defined_bindings_are_visible() {
    let context = Context::new();
    context.define("pi", Value::Number(3.0));

    let result = context.evaluate("pi * 2").unwrap();
    assert_eq!(result, Some(Value::Number(6.0)));
}

#[test]
fn defined_operators_dispatch_through_the_environment() {
    fn larger(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
        let a = args[0].as_number(at)?;
        let b = args[1].as_number(at)?;
        Ok(Value::Number(if a > b { a } else { b }))
    }

    let context = Context::new();
    context.define("**",
                   Value::Function(Rc::new(Function::Strict { name:  "**",
                                                              arity: 2,
                                                              func:  larger, })));

    let result = context.evaluate("3 ** 5").unwrap();
    assert_eq!(result, Some(Value::Number(5.0)));
}

#[test]
fn registered_handlers_override_defaults() {
    fn count_args(_: &Context, _: &teacup::ast::Node,
                  _: &Rc<teacup::interpreter::env::Environment>,
                  args: &[&teacup::ast::Node])
                  -> EvalResult<Value> {
        Ok(Value::Number(args.len() as f64))
    }

    let mut context = Context::new();
    context.register_handler(HandlerKey::Exact("E + E".to_string()), count_args);

    // The latest registration wins over the builtin operator rule.
    let result = context.evaluate("1 + 2").unwrap();
    assert_eq!(result, Some(Value::Number(2.0)));
}

#[test]
fn callable_fields_bind_their_receiver() {
    fn shifted(_: &Context, args: &[Value], at: usize) -> EvalResult<Value> {
        let Value::Object(fields) = &args[0] else {
            return Err(RuntimeError::TypeError { details: "expected the receiver object"
                                                          .to_string(),
                                                 at });
        };
        let offset = fields["offset"].as_number(at)?;
        Ok(Value::Number(offset + args[1].as_number(at)?))
    }

    let mut fields = HashMap::new();
    fields.insert("offset".to_string(), Value::Number(10.0));
    fields.insert("add".to_string(),
                  Value::Function(Rc::new(Function::Strict { name:  "add",
                                                             arity: 2,
                                                             func:  shifted, })));

    let context = Context::new();
    context.define("shifter", Value::Object(Rc::new(fields)));

    assert_eq!(context.evaluate("shifter.offset").unwrap(),
               Some(Value::Number(10.0)));
    assert_eq!(context.evaluate("shifter.add(5)").unwrap(),
               Some(Value::Number(15.0)));
}

#[test]
fn print_routes_through_the_sink() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut context = Context::new();
    context.set_sink(move |value| sink.borrow_mut().push(value.to_string()));

    let result = context.evaluate("print(1 + 2)").unwrap();
    assert_eq!(result, Some(Value::Number(3.0)));
    assert_eq!(*seen.borrow(), vec!["3".to_string()]);
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 / 0");
    assert_failure("1 % 0");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("foo + 1");
    assert_failure("x");
}

#[test]
fn failed_assertion_is_error() {
    assert_success("assert(1 < 2)");
    assert_failure("assert(1 > 2)");
}

#[test]
fn wrong_function_arity_is_error() {
    assert_failure("let f(x, y) = x + y in f(3) end");
    assert_failure("let f(x) = x in f(1, 2) end");
}

#[test]
fn calling_a_non_function_is_error() {
    assert_failure("5(3)");
}

#[test]
fn indexing_errors() {
    assert_failure("[1, 2][5]");
    assert_failure("[1, 2][0.5]");
    assert_failure("[1, 2][-1]");
    assert_failure("5[0]");
}

#[test]
fn chained_comparisons_have_no_meaning() {
    assert_failure("1 < 2 < 3");
}

#[test]
fn invalid_binding_targets_are_errors() {
    assert_failure("let 1 = 2 in 1 end");
    assert_failure("let (x) = 2 in x end");
    assert_failure("(1 + 2) -> 3");
}

#[test]
fn booleans_are_required_where_booleans_go() {
    assert_failure("if 1 then 2 end");
    assert_failure("1 and true");
    assert_failure("for x in 1 .. 3 when x do x end");
}
