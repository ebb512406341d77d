//! Runtime values and arithmetic

use crate::error::ExprError;

/// Result of evaluating an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
        }
    }

    /// Text spliced back into the host value
    pub fn to_output_string(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.clone(),
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(_) => None,
        }
    }
}

/// Apply unary `+` or `-`
pub fn unary(op: char, operand: Value) -> Result<Value, ExprError> {
    match (op, operand) {
        ('+', v @ (Value::Int(_) | Value::Float(_))) => Ok(v),
        ('-', Value::Int(i)) => i.checked_neg().map(Value::Int).ok_or(ExprError::Overflow),
        ('-', Value::Float(f)) => Ok(Value::Float(-f)),
        (op, v) => Err(ExprError::InvalidOperand {
            op,
            operand: v.type_name(),
        }),
    }
}

/// Apply one of `+ - * /`
///
/// Integer arithmetic is checked. Integer division stays integral only when
/// it is exact.
pub fn binary(op: char, lhs: Value, rhs: Value) -> Result<Value, ExprError> {
    match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) if op == '+' => Ok(Value::Str(a + &b)),
        (Value::Int(a), Value::Int(b)) => int_op(op, a, b),
        (lhs, rhs) => {
            let (Some(a), Some(b)) = (lhs.as_float(), rhs.as_float()) else {
                return Err(ExprError::InvalidOperands {
                    op,
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                });
            };
            float_op(op, a, b)
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn int_op(op: char, a: i64, b: i64) -> Result<Value, ExprError> {
    let result = match op {
        '+' => a.checked_add(b),
        '-' => a.checked_sub(b),
        '*' => a.checked_mul(b),
        '/' => {
            if b == 0 {
                return Err(ExprError::DivisionByZero);
            }
            match a.checked_rem(b) {
                Some(0) => a.checked_div(b),
                Some(_) => return float_op(op, a as f64, b as f64),
                None => None,
            }
        }
        _ => {
            return Err(ExprError::InvalidOperands {
                op,
                lhs: "int",
                rhs: "int",
            });
        }
    };
    result.map(Value::Int).ok_or(ExprError::Overflow)
}

fn float_op(op: char, a: f64, b: f64) -> Result<Value, ExprError> {
    let result = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' if b == 0.0 => return Err(ExprError::DivisionByZero),
        '/' => a / b,
        _ => {
            return Err(ExprError::InvalidOperands {
                op,
                lhs: "float",
                rhs: "float",
            });
        }
    };
    Ok(Value::Float(result))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(binary('+', Value::Int(2), Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(binary('-', Value::Int(2), Value::Int(3)), Ok(Value::Int(-1)));
        assert_eq!(binary('*', Value::Int(4), Value::Int(3)), Ok(Value::Int(12)));
        assert_eq!(binary('/', Value::Int(12), Value::Int(3)), Ok(Value::Int(4)));
    }

    #[test]
    fn test_inexact_division_is_float() {
        assert_eq!(binary('/', Value::Int(1), Value::Int(2)), Ok(Value::Float(0.5)));
        assert_eq!(binary('/', Value::Int(-7), Value::Int(2)), Ok(Value::Float(-3.5)));
    }

    #[test]
    fn test_mixed_arithmetic() {
        assert_eq!(binary('*', Value::Int(2), Value::Float(0.25)), Ok(Value::Float(0.5)));
        assert_eq!(binary('+', Value::Float(0.5), Value::Int(1)), Ok(Value::Float(1.5)));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            binary('/', Value::Int(1), Value::Int(0)),
            Err(ExprError::DivisionByZero)
        );
        assert_eq!(
            binary('/', Value::Float(1.0), Value::Int(0)),
            Err(ExprError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(
            binary('*', Value::Int(i64::MAX), Value::Int(2)),
            Err(ExprError::Overflow)
        );
        assert_eq!(
            binary('/', Value::Int(i64::MIN), Value::Int(-1)),
            Err(ExprError::Overflow)
        );
        assert_eq!(unary('-', Value::Int(i64::MIN)), Err(ExprError::Overflow));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            binary('+', Value::Str("a".into()), Value::Str("b".into())),
            Ok(Value::Str("ab".into()))
        );
        assert!(matches!(
            binary('-', Value::Str("a".into()), Value::Str("b".into())),
            Err(ExprError::InvalidOperands { op: '-', .. })
        ));
        assert!(matches!(
            binary('+', Value::Str("a".into()), Value::Int(1)),
            Err(ExprError::InvalidOperands { lhs: "str", rhs: "int", .. })
        ));
    }

    #[test]
    fn test_unary() {
        assert_eq!(unary('-', Value::Int(5)), Ok(Value::Int(-5)));
        assert_eq!(unary('+', Value::Float(0.5)), Ok(Value::Float(0.5)));
        assert!(unary('-', Value::Str("x".into())).is_err());
    }

    #[test]
    fn test_output_strings() {
        assert_eq!(Value::Int(-16_776_961).to_output_string(), "-16776961");
        assert_eq!(Value::Float(0.5).to_output_string(), "0.5");
        assert_eq!(Value::Float(2.0).to_output_string(), "2.0");
        assert_eq!(Value::Str("17 34 51".into()).to_output_string(), "17 34 51");
    }
}
