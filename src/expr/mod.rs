//! Expression language for configuration values
//!
//! Values may embed `{{expr}}` spans. Each span is parsed, evaluated and
//! replaced by the decimal (or string) form of its result; text outside spans
//! is copied unchanged.
//!
//! ```text
//! col_main_bg={{rgb(51, 51, 51)}}
//! col_tr1_bg={{c("track.bg")}}
//! tcp_vol_blend={{blend(add, 0.5)}}
//! ```
//!
//! The language is arithmetic over integers, floats and strings plus a fixed
//! set of functions (see [`parser::Function`]). There are no variables and
//! no user-defined functions.

mod functions;
mod lexer;
mod macros;
mod parser;
mod value;

use std::collections::HashMap;

use tracing::trace;

use crate::constants::{ConstantsTable, split_name};
use crate::error::{self, ExprError};
use functions::{NRGB, SetArgs};
use macros::{Segment, split_macros};
use parser::{Expr, Function, parse};
use value::Value;

const SET_PARAMS: [&str; 13] = [
    "target",
    "x",
    "y",
    "w",
    "h",
    "ls",
    "ts",
    "rs",
    "bs",
    "condition",
    "add",
    "sub",
    "else",
];

/// Evaluates expressions against a constants table and a presets table.
///
/// One evaluator is used per build. It caches evaluated constants by dotted
/// name, so a constant shared by many values is evaluated once.
#[derive(Debug, Default)]
pub struct Evaluator {
    constants: ConstantsTable,
    presets: ConstantsTable,
    cache: HashMap<String, Value>,
    resolving: Vec<String>,
}

impl Evaluator {
    pub fn new(constants: ConstantsTable, presets: ConstantsTable) -> Self {
        Self {
            constants,
            presets,
            ..Self::default()
        }
    }

    /// Replace every macro span in `text`.
    ///
    /// `location` names where the text came from (e.g. `REAPER.col_main_bg`) and
    /// is only used in error messages.
    pub fn expand(&mut self, text: &str, location: &str) -> error::Result<String> {
        let segments = split_macros(text)
            .map_err(|malformed| error::expr::failed(location, malformed.span, malformed.error))?;

        let mut out = String::with_capacity(text.len());
        for segment in segments {
            match segment {
                Segment::Text(literal) => out.push_str(literal),
                Segment::Macro(source) => {
                    let value = self.evaluate(source).map_err(|e| {
                        error::expr::failed(location, format!("{{{{{source}}}}}"), e)
                    })?;
                    trace!(location, source, result = ?value, "expanded macro");
                    out.push_str(&value.to_output_string());
                }
            }
        }
        Ok(out)
    }

    /// Parse and evaluate one expression
    pub fn evaluate(&mut self, source: &str) -> Result<Value, ExprError> {
        let expr = parse(source)?;
        self.eval(&expr)
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, ExprError> {
        match expr {
            Expr::Int(i) => Ok(Value::Int(*i)),
            Expr::Float(f) => Ok(Value::Float(*f)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Symbol(name) => match name.as_str() {
                "NRGB" => Ok(Value::Int(NRGB)),
                _ => Err(ExprError::UnknownName { name: name.clone() }),
            },
            Expr::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                value::unary(*op, operand)
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                value::binary(*op, lhs, rhs)
            }
            Expr::Call {
                function,
                args,
                kwargs,
            } => self.call(*function, args, kwargs),
        }
    }

    fn call(
        &mut self,
        function: Function,
        args: &[Expr],
        kwargs: &[(String, Expr)],
    ) -> Result<Value, ExprError> {
        match function {
            Function::Rgb | Function::Nrgb => {
                let [r, g, b] = self.ints(function, &["r", "g", "b"], args, kwargs)?;
                let packed = if function == Function::Rgb {
                    functions::rgb(r, g, b)?
                } else {
                    functions::nrgb(r, g, b)?
                };
                Ok(Value::Int(packed))
            }
            Function::Rgba => {
                let [r, g, b, a] = self.ints(function, &["r", "g", "b", "a"], args, kwargs)?;
                Ok(Value::Int(functions::rgba(r, g, b, a)?))
            }
            Function::Hex => {
                if let Some((name, _)) = kwargs.first() {
                    return Err(ExprError::UnexpectedKeyword {
                        function: function.name(),
                        name: name.clone(),
                    });
                }
                if args.is_empty() {
                    return Err(ExprError::ArgumentCount {
                        function: function.name(),
                        expected: "at least 1".to_string(),
                        found: 0,
                    });
                }
                let bytes = args
                    .iter()
                    .map(|arg| self.int(function, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Int(functions::hex(&bytes)?))
            }
            Function::Arr => {
                let [value] = self.ints(function, &["val"], args, kwargs)?;
                Ok(Value::Str(functions::arr(value)?))
            }
            Function::Rev => {
                let [value] = self.ints(function, &["val"], args, kwargs)?;
                Ok(Value::Int(functions::rev(value)?))
            }
            Function::Blend => {
                let bound = bind(function, &["mode", "frac"], 2, args, kwargs)?;
                let (Some(mode), Some(frac)) = (bound[0], bound[1]) else {
                    return Err(arity(function, "2", args, kwargs));
                };
                let mode = self.text(mode)?;
                let frac = self.number(function, frac)?;
                Ok(Value::Int(functions::blend(&mode, frac)?))
            }
            Function::Set => {
                let bound = bind(function, &SET_PARAMS, 1, args, kwargs)?;
                let mut rendered = Vec::with_capacity(bound.len());
                for arg in bound {
                    rendered.push(arg.map(|expr| self.text(expr)).transpose()?);
                }
                let mut rendered = rendered.into_iter();
                let mut next = || rendered.next().flatten();

                let target = next().unwrap_or_default();
                let coordinates = std::array::from_fn(|_| next());
                let args = SetArgs {
                    target,
                    coordinates,
                    condition: next(),
                    add: next(),
                    sub: next(),
                    otherwise: next(),
                };
                Ok(Value::Str(functions::set(&args)))
            }
            Function::ConstRef => {
                let name = self.name_arg(function, args, kwargs)?;
                self.constant(&name)
            }
            Function::PresetRef => {
                let name = self.name_arg(function, args, kwargs)?;
                self.preset(&name)
            }
        }
    }

    /// Bind all-required integer parameters
    fn ints<const N: usize>(
        &mut self,
        function: Function,
        params: &[&'static str; N],
        args: &[Expr],
        kwargs: &[(String, Expr)],
    ) -> Result<[i64; N], ExprError> {
        let bound = bind(function, params, N, args, kwargs)?;
        let mut values = [0i64; N];
        for (slot, arg) in values.iter_mut().zip(bound) {
            let arg = arg.ok_or_else(|| arity(function, &N.to_string(), args, kwargs))?;
            *slot = self.int(function, arg)?;
        }
        Ok(values)
    }

    fn int(&mut self, function: Function, expr: &Expr) -> Result<i64, ExprError> {
        match self.eval(expr)? {
            Value::Int(i) => Ok(i),
            other => Err(ExprError::InvalidArgument {
                function: function.name(),
                expected: "an integer",
                found: other.type_name().to_string(),
            }),
        }
    }

    fn number(&mut self, function: Function, expr: &Expr) -> Result<f64, ExprError> {
        match self.eval(expr)? {
            #[allow(clippy::cast_precision_loss)]
            Value::Int(i) => Ok(i as f64),
            Value::Float(f) => Ok(f),
            Value::Str(_) => Err(ExprError::InvalidArgument {
                function: function.name(),
                expected: "a number",
                found: "str".to_string(),
            }),
        }
    }

    /// Text of an argument in symbolic position: bare names stand for themselves
    fn text(&mut self, expr: &Expr) -> Result<String, ExprError> {
        match expr {
            Expr::Symbol(name) => Ok(name.clone()),
            other => Ok(self.eval(other)?.to_output_string()),
        }
    }

    fn name_arg(
        &mut self,
        function: Function,
        args: &[Expr],
        kwargs: &[(String, Expr)],
    ) -> Result<String, ExprError> {
        let bound = bind(function, &["name"], 1, args, kwargs)?;
        let name = bound[0].ok_or_else(|| arity(function, "1", args, kwargs))?;
        self.text(name)
    }

    fn constant(&mut self, name: &str) -> Result<Value, ExprError> {
        if let Some(value) = self.cache.get(name) {
            return Ok(value.clone());
        }
        if split_name(name).is_none() {
            return Err(ExprError::InvalidLookupName {
                kind: "constant",
                name: name.to_string(),
            });
        }
        let raw = self
            .constants
            .get(name)
            .ok_or_else(|| ExprError::UnknownConstant {
                name: name.to_string(),
            })?
            .to_string();

        let value = self.resolve(name.to_string(), &raw).map_err(|e| match e {
            circular @ ExprError::CircularConstant { .. } => circular,
            other => ExprError::InConstant {
                name: name.to_string(),
                source: Box::new(other),
            },
        })?;
        self.cache.insert(name.to_string(), value.clone());
        Ok(value)
    }

    fn preset(&mut self, name: &str) -> Result<Value, ExprError> {
        if split_name(name).is_none() {
            return Err(ExprError::InvalidLookupName {
                kind: "preset",
                name: name.to_string(),
            });
        }
        let raw = self
            .presets
            .get(name)
            .ok_or_else(|| ExprError::UnknownPreset {
                name: name.to_string(),
            })?
            .to_string();

        self.resolve(format!("p({name})"), &raw)
    }

    /// Evaluate a table entry, tracking the chain of entries being resolved
    fn resolve(&mut self, key: String, raw: &str) -> Result<Value, ExprError> {
        if let Some(start) = self.resolving.iter().position(|k| *k == key) {
            let mut chain = self.resolving[start..].to_vec();
            chain.push(key);
            return Err(ExprError::CircularConstant {
                chain: chain.join(" -> "),
            });
        }

        self.resolving.push(key);
        let result = self.evaluate(raw);
        self.resolving.pop();
        result
    }
}

/// Match call arguments to parameter names.
///
/// Returns one slot per parameter. The first `required` parameters must be
/// filled.
fn bind<'e>(
    function: Function,
    params: &[&'static str],
    required: usize,
    args: &'e [Expr],
    kwargs: &'e [(String, Expr)],
) -> Result<Vec<Option<&'e Expr>>, ExprError> {
    let expected = || {
        if required == params.len() {
            required.to_string()
        } else {
            format!("{required} to {}", params.len())
        }
    };

    if args.len() > params.len() {
        return Err(ExprError::ArgumentCount {
            function: function.name(),
            expected: expected(),
            found: args.len() + kwargs.len(),
        });
    }

    let mut slots: Vec<Option<&Expr>> = vec![None; params.len()];
    for (slot, arg) in slots.iter_mut().zip(args) {
        *slot = Some(arg);
    }

    for (name, arg) in kwargs {
        let Some(index) = params.iter().position(|p| p == name) else {
            return Err(ExprError::UnexpectedKeyword {
                function: function.name(),
                name: name.clone(),
            });
        };
        if slots[index].is_some() {
            return Err(ExprError::DuplicateArgument {
                function: function.name(),
                name: name.clone(),
            });
        }
        slots[index] = Some(arg);
    }

    if slots[..required].iter().any(Option::is_none) {
        return Err(ExprError::ArgumentCount {
            function: function.name(),
            expected: expected(),
            found: args.len() + kwargs.len(),
        });
    }

    Ok(slots)
}

fn arity(function: Function, expected: &str, args: &[Expr], kwargs: &[(String, Expr)]) -> ExprError {
    ExprError::ArgumentCount {
        function: function.name(),
        expected: expected.to_string(),
        found: args.len() + kwargs.len(),
    }
}
