use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        env::Environment,
        evaluator::{binding, builtin, call, collection, control, leaf, utils},
        lexer::tokenize,
        parser::{core::parse, priority::PriorityTable},
        tagger::tag_prefixes,
        value::{core::Value, function::Function},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The boxed function type stored in the handler table.
pub type HandlerFn = Box<dyn Fn(&Context, &Node, &Rc<Environment>, &[&Node]) -> EvalResult<Value>>;

/// Selects the nodes a handler accepts.
///
/// A key either names one signature exactly or carries a predicate over
/// signature strings, which is how the open-ended shapes (sequences, the
/// conditional cascade, the generic operator rule) are matched.
pub enum HandlerKey {
    /// Matches one signature string exactly.
    Exact(String),
    /// Matches every signature the predicate accepts.
    Matches(fn(&str) -> bool),
}

impl HandlerKey {
    /// Whether this key accepts the given signature.
    #[must_use]
    pub fn accepts(&self, signature: &str) -> bool {
        match self {
            Self::Exact(key) => key == signature,
            Self::Matches(predicate) => predicate(signature),
        }
    }
}

/// One entry of the handler table: a key and the function it dispatches to.
pub struct Handler {
    key:  HandlerKey,
    func: HandlerFn,
}

impl Handler {
    /// Creates a handler matching one signature exactly.
    pub fn exact<F>(key: &str, func: F) -> Self
        where F: Fn(&Context, &Node, &Rc<Environment>, &[&Node]) -> EvalResult<Value> + 'static
    {
        Self { key:  HandlerKey::Exact(key.to_string()),
               func: Box::new(func), }
    }

    /// Creates a handler matching every signature a predicate accepts.
    pub fn matches<F>(predicate: fn(&str) -> bool, func: F) -> Self
        where F: Fn(&Context, &Node, &Rc<Environment>, &[&Node]) -> EvalResult<Value> + 'static
    {
        Self { key:  HandlerKey::Matches(predicate),
               func: Box::new(func), }
    }
}

/// A complete, self-contained language definition.
///
/// A context owns everything evaluation needs: the priority table driving
/// the parser, the handler table driving dispatch, the root environment
/// with the builtins, and the output sink. Nothing is process-wide, so
/// independent contexts never observe each other.
///
/// ## Usage
///
/// `Context` is created once and reused for evaluating programs. Extension
/// happens through [`Context::define`] for new root bindings and
/// [`Context::register_handler`] for new node shapes; the latest
/// registration wins, so extensions override the defaults.
pub struct Context {
    /// Priorities consulted by the parser.
    pub priorities: PriorityTable,
    /// The root environment holding the builtins.
    pub globals:    Rc<Environment>,
    handlers:       Vec<Handler>,
    sink:           Box<dyn Fn(&Value)>,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates the default Teacup definition: the standard priority table,
    /// the built-in handler set, and a root environment with the standard
    /// builtins. Output goes to stdout until a sink is injected.
    #[must_use]
    pub fn new() -> Self {
        Self { priorities: PriorityTable::teacup(),
               globals:    builtin::root_environment(),
               handlers:   default_handlers(),
               sink:       Box::new(|value| println!("{value}")), }
    }

    /// Runs the full pipeline against this definition.
    ///
    /// Source text is tokenized, prefix-tagged, parsed, and evaluated in
    /// the root environment. The first failing stage aborts the pipeline.
    ///
    /// # Parameters
    /// - `source`: The program text.
    ///
    /// # Returns
    /// The result value, or `None` when the source contains no tokens at
    /// all.
    ///
    /// # Errors
    /// Returns the underlying [`crate::error::ParseError`] or
    /// [`RuntimeError`] of the stage that failed.
    pub fn evaluate(&self, source: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        let mut tokens = tokenize(source)?;
        tag_prefixes(&mut tokens);

        let Some(root) = parse(&tokens, &self.priorities)? else {
            return Ok(None);
        };

        Ok(Some(self.eval(&root, &self.globals)?))
    }

    /// Evaluates one node in an environment.
    ///
    /// A leaf token dispatches on its kind name; a branch dispatches on its
    /// signature. Handlers are consulted latest-first and the first key
    /// that accepts the signature wins; its function receives the node and
    /// the filled operand slots as arguments.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnknownNodeType`] when no handler accepts
    /// the node, or whatever error the chosen handler raises.
    pub fn eval(&self, node: &Node, env: &Rc<Environment>) -> EvalResult<Value> {
        let signature = utils::node_signature(node);
        let args: Vec<&Node> = match node {
            Node::Leaf(_) => Vec::new(),
            Node::Branch(branch) => branch.args().collect(),
        };

        for handler in self.handlers.iter().rev() {
            if handler.key.accepts(signature) {
                return (handler.func)(self, node, env, &args);
            }
        }

        Err(RuntimeError::UnknownNodeType { signature: signature.to_string(),
                                            at:        node.start(), })
    }

    /// Calls a callable value with already-prepared arguments.
    ///
    /// For lazy callees the arguments are expected to be thunks; preparing
    /// them is the caller's concern (see the call handlers).
    ///
    /// # Errors
    /// Returns [`RuntimeError::NotCallable`] for non-function values and
    /// [`RuntimeError::ArgumentCountMismatch`] on arity violations.
    pub fn call(&self, callee: &Value, args: Vec<Value>, at: usize) -> EvalResult<Value> {
        match callee {
            Value::Function(function) => self.call_function(function, args, at),
            _ => Err(RuntimeError::NotCallable { at }),
        }
    }

    fn call_function(&self, function: &Function, mut args: Vec<Value>, at: usize)
                     -> EvalResult<Value> {
        match function {
            Function::Strict { arity, func, .. } | Function::Lazy { arity, func, .. } => {
                utils::check_arity(*arity, args.len(), at)?;
                func(self, &args, at)
            },
            Function::Closure { params, body, env } => {
                utils::check_arity(params.len(), args.len(), at)?;

                let frame = Environment::child(env);
                for (param, arg) in params.iter().zip(args) {
                    frame.define(param.clone(), arg);
                }

                self.eval(body, &frame)
            },
            Function::Bound { receiver, method } => {
                args.insert(0, receiver.clone());
                self.call_function(method, args, at)
            },
        }
    }

    /// Installs a binding into the root environment.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.globals.define(name, value);
    }

    /// Registers a handler that overrides any earlier one accepting the
    /// same signatures.
    pub fn register_handler<F>(&mut self, key: HandlerKey, func: F)
        where F: Fn(&Self, &Node, &Rc<Environment>, &[&Node]) -> EvalResult<Value> + 'static
    {
        self.handlers.push(Handler { key,
                                     func: Box::new(func) });
    }

    /// Injects the output sink used by `print`.
    pub fn set_sink(&mut self, sink: impl Fn(&Value) + 'static) {
        self.sink = Box::new(sink);
    }

    /// Sends a value to the output sink.
    pub fn emit(&self, value: &Value) {
        (self.sink)(value);
    }
}

/// The built-in handler table, weakest first.
///
/// The generic operator rule sits near the bottom so that every
/// specifically-shaped handler (field access, lambdas, sequences) takes
/// precedence over it, and user registrations in turn override everything
/// here.
fn default_handlers() -> Vec<Handler> {
    vec![Handler::exact("word", leaf::word),
         Handler::exact("infix", leaf::word),
         Handler::exact("prefix", leaf::prefix),
         Handler::exact("number", leaf::number),
         Handler::exact("string", leaf::string),
         Handler::matches(call::operator_signature, call::operator),
         Handler::matches(control::sequence_signature, control::sequence),
         Handler::exact("_ ( E ) _", control::grouping),
         Handler::exact("_ begin E end _", control::grouping),
         Handler::exact("E ( E ) _", call::apply),
         Handler::exact("E ( _ ) _", call::apply_empty),
         Handler::exact("_ [ E ] _", collection::list_literal),
         Handler::exact("_ [ _ ] _", collection::empty_list),
         Handler::exact("E [ E ] _", collection::index),
         Handler::exact("E . E", collection::field),
         Handler::matches(control::conditional_signature, control::conditional),
         Handler::exact("E -> E", call::lambda),
         Handler::exact("_ let E in E end _", binding::let_in),
         Handler::exact("_ for E in E do E end _", control::comprehension),
         Handler::exact("_ for E in E when E do E end _", control::comprehension),]
}
