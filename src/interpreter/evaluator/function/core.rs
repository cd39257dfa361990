use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            function::{container, convert, functional, io, math},
            postfix::Slot,
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context (for output, input and open files), a
/// slice of evaluated argument values and the line number. The argument
/// count has already been checked against the declared [`Arity`].
type BuiltinFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `Any` accepts every count, as `print` does.
#[derive(Debug, Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    Any,
}

struct BuiltinDef {
    name:  &'static str,
    arity: Arity,
    func:  BuiltinFn,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces a static table of `BuiltinDef` entries for lookup and
/// a public list of the builtin names, under the identifiers given first.
macro_rules! builtin_functions {
    (
        $table:ident, $(#[$meta:meta])* $names:ident;
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static $table: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        $(#[$meta])*
        pub const $names: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    MATH_TABLE,
    /// Math builtins, resolved before every other function.
    MATH_FUNCTIONS;
    "abs"   => { arity: Arity::Exact(1), func: math::abs },
    "min"   => { arity: Arity::Exact(2), func: |_, args, line| math::min_max("min", args, line) },
    "max"   => { arity: Arity::Exact(2), func: |_, args, line| math::min_max("max", args, line) },
    "sin"   => { arity: Arity::Exact(1), func: |_, args, line| math::unary("sin", args, line) },
    "cos"   => { arity: Arity::Exact(1), func: |_, args, line| math::unary("cos", args, line) },
    "tan"   => { arity: Arity::Exact(1), func: |_, args, line| math::unary("tan", args, line) },
    "asin"  => { arity: Arity::Exact(1), func: |_, args, line| math::unary("asin", args, line) },
    "acos"  => { arity: Arity::Exact(1), func: |_, args, line| math::unary("acos", args, line) },
    "atan"  => { arity: Arity::Exact(1), func: |_, args, line| math::unary("atan", args, line) },
    "log"   => { arity: Arity::Exact(1), func: |_, args, line| math::unary("log", args, line) },
    "log2"  => { arity: Arity::Exact(1), func: |_, args, line| math::unary("log2", args, line) },
    "log10" => { arity: Arity::Exact(1), func: |_, args, line| math::unary("log10", args, line) },
    "sqrt"  => { arity: Arity::Exact(1), func: |_, args, line| math::unary("sqrt", args, line) },
    "cot"   => { arity: Arity::Exact(1), func: |_, args, line| math::unary("cot", args, line) },
    "sec"   => { arity: Arity::Exact(1), func: |_, args, line| math::unary("sec", args, line) },
    "csc"   => { arity: Arity::Exact(1), func: |_, args, line| math::unary("csc", args, line) },
    "ceil"  => { arity: Arity::Exact(1), func: |_, args, line| math::rounding("ceil", args, line) },
    "floor" => { arity: Arity::Exact(1), func: |_, args, line| math::rounding("floor", args, line) },
    "round" => { arity: Arity::Exact(1), func: |_, args, line| math::rounding("round", args, line) },
}

builtin_functions! {
    BUILTIN_TABLE,
    /// General builtins: I/O, conversion, containers and iteration helpers.
    BUILTIN_FUNCTIONS;
    "print"      => { arity: Arity::Any, func: io::print },
    "pprint"     => { arity: Arity::Exact(1), func: io::pprint },
    "input"      => { arity: Arity::OneOf(&[0, 1]), func: io::input },
    "read"       => { arity: Arity::Exact(1), func: io::read },
    "readLine"   => { arity: Arity::Exact(1), func: io::read_lines },
    "write"      => { arity: Arity::OneOf(&[2, 3]), func: io::write },
    "open"       => { arity: Arity::OneOf(&[1, 2]), func: io::open },
    "close"      => { arity: Arity::Exact(1), func: io::close },
    "len"        => { arity: Arity::Exact(1), func: |_, args, line| convert::len(&args[0], line) },
    "type"       => { arity: Arity::Exact(1), func: |_, args, _| Ok(Value::from(args[0].type_name())) },
    "str"        => { arity: Arity::Exact(1), func: |_, args, _| Ok(Value::Str(args[0].to_string())) },
    "int"        => { arity: Arity::Exact(1), func: |_, args, line| convert::to_int(&args[0], line) },
    "float"      => { arity: Arity::Exact(1), func: |_, args, line| convert::to_float(&args[0], line) },
    "bool"       => { arity: Arity::Exact(1), func: |_, args, _| Ok(Value::Bool(args[0].is_truthy())) },
    "repr"       => { arity: Arity::Exact(1), func: |_, args, _| Ok(Value::Str(args[0].repr())) },
    "isinstance" => { arity: Arity::Exact(2), func: convert::isinstance },
    "list"       => { arity: Arity::OneOf(&[0, 1]), func: container::list },
    "set"        => { arity: Arity::OneOf(&[0, 1]), func: container::set },
    "dict"       => { arity: Arity::OneOf(&[0, 1]), func: container::dict },
    "range_list" => { arity: Arity::Exact(2), func: container::range_list },
    "append"     => { arity: Arity::Exact(2), func: container::append },
    "pop"        => { arity: Arity::Exact(1), func: container::pop },
    "sum"        => { arity: Arity::OneOf(&[1, 2]), func: functional::sum },
    "sorted"     => { arity: Arity::OneOf(&[1, 2]), func: functional::sorted },
    "reversed"   => { arity: Arity::Exact(1), func: functional::reversed },
    "all"        => { arity: Arity::Exact(1), func: |_, args, line| functional::all_any(true, &args[0], line) },
    "any"        => { arity: Arity::Exact(1), func: |_, args, line| functional::all_any(false, &args[0], line) },
    "enumerate"  => { arity: Arity::Exact(1), func: functional::enumerate },
    "zip"        => { arity: Arity::Exact(2), func: functional::zip },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::Any => true,
        }
    }

    /// The accepted counts as shown in arity errors, such as `1` or `2 or 3`.
    fn describe(self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(arr) => match arr.split_last() {
                Some((last, rest)) if !rest.is_empty() => {
                    let rest = rest.iter().map(ToString::to_string).collect::<Vec<_>>();
                    format!("{} or {last}", rest.join(", "))
                },
                _ => arr.iter().map(ToString::to_string).collect(),
            },
            Self::Any => "any number of".to_string(),
        }
    }
}

fn find_builtin(name: &str) -> Option<&'static BuiltinDef> {
    MATH_TABLE.iter().chain(BUILTIN_TABLE).find(|b| b.name == name)
}

/// Returns `true` when `name` is a builtin function.
///
/// The parser uses this to tell a new declaration in
/// `var a = 1 b = 2.` apart from a call such as `print(a)`.
///
/// # Example
/// ```
/// use scriptit::interpreter::evaluator::function::core::is_builtin_name;
///
/// assert!(is_builtin_name("print"));
/// assert!(is_builtin_name("sqrt"));
/// assert!(!is_builtin_name("total"));
/// ```
#[must_use]
pub fn is_builtin_name(name: &str) -> bool {
    MATH_FUNCTIONS.contains(&name) || BUILTIN_FUNCTIONS.contains(&name)
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The evaluator first checks whether the name matches a math builtin,
    /// then a general builtin. If so, it verifies arity and executes the
    /// builtin. Otherwise it looks up a user function with the same name
    /// and number of parameters.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `args`: Evaluated arguments, with the variables they were read from.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result or an error if lookup or arity fails.
    pub(crate) fn call_function(&mut self, name: &str, args: Vec<Slot>, line: usize) -> EvalResult<Value> {
        if let Some(builtin) = find_builtin(name) {
            if !builtin.arity.check(args.len()) {
                return Err(RuntimeError::BuiltinArity { name: builtin.name,
                                                        expected: builtin.arity.describe(),
                                                        found: args.len(),
                                                        line });
            }
            let values = args.into_iter().map(|slot| slot.value).collect::<Vec<_>>();
            return (builtin.func)(self, &values, line);
        }

        self.call_user_function(name, args, line)
    }

    /// Executes a user-defined function.
    ///
    /// The function is looked up by name and argument count. Its parameters
    /// are bound by value in a new barrier frame whose parent is the caller's
    /// frame, and the body runs as a block below it. When the body finishes,
    /// every `@` parameter whose argument was a plain variable is assigned
    /// back to that variable in the caller's scope.
    ///
    /// # Errors
    /// - `UnknownFunction` when no function of this name takes `args.len()`
    ///   parameters.
    /// - `ForwardDeclared` when only a forward declaration exists.
    /// - `CallDepthExceeded` on runaway recursion.
    ///
    /// # Returns
    /// The value given by `give`, or `None` when the body ends without one.
    fn call_user_function(&mut self, name: &str, args: Vec<Slot>, line: usize) -> EvalResult<Value> {
        let def = self.scope
                      .get_function(name, args.len())
                      .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                     line })?;
        let body = def.body
                      .clone()
                      .ok_or_else(|| RuntimeError::ForwardDeclared { name: name.to_string(),
                                                                     line })?;

        trace!(name, argc = args.len(), line, "calling user function");

        let (result, write_back) = self.nested_call(line, |ctx| {
                                           ctx.scoped(true, |ctx| {
                                                  for (param, arg) in def.params.iter().zip(&args) {
                                                      ctx.scope.define(param, arg.value.clone());
                                                  }

                                                  let result = match ctx.execute_block(&body)? {
                                                      Flow::Returned(value) => value,
                                                      Flow::Normal => Value::None,
                                                  };

                                                  let write_back =
                                                      def.params
                                                         .iter()
                                                         .zip(&def.by_ref)
                                                         .zip(&args)
                                                         .filter(|((_, by_ref), _)| **by_ref)
                                                         .filter_map(|((param, _), arg)| {
                                                             arg.origin
                                                                .clone()
                                                                .map(|origin| (origin, ctx.scope.get(param)))
                                                         })
                                                         .collect::<Vec<_>>();
                                                  Ok((result, write_back))
                                              })
                                       })?;

        for (variable, value) in write_back {
            self.scope.set(&variable, value)?;
        }

        Ok(result)
    }
}
