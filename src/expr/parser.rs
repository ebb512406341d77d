//! Expression syntax tree and recursive descent parser
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | string | name | name '(' args ')' | '(' expr ')'
//! args    := [arg (',' arg)* [',']]
//! arg     := name '=' expr | expr
//! ```

use super::lexer::{Token, tokenize};
use crate::error::ExprError;

/// The closed set of callable functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Rgb,
    Nrgb,
    Rgba,
    Hex,
    Arr,
    Blend,
    Rev,
    Set,
    /// `c("section.key")`
    ConstRef,
    /// `p("section.name")`
    PresetRef,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "rgb" => Function::Rgb,
            "nrgb" => Function::Nrgb,
            "rgba" => Function::Rgba,
            "hex" => Function::Hex,
            "arr" => Function::Arr,
            "blend" => Function::Blend,
            "rev" => Function::Rev,
            "set" => Function::Set,
            "c" => Function::ConstRef,
            "p" => Function::PresetRef,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Rgb => "rgb",
            Function::Nrgb => "nrgb",
            Function::Rgba => "rgba",
            Function::Hex => "hex",
            Function::Arr => "arr",
            Function::Blend => "blend",
            Function::Rev => "rev",
            Function::Set => "set",
            Function::ConstRef => "c",
            Function::PresetRef => "p",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    /// Bare name such as `NRGB`, `add` or `colors.bg`
    Symbol(String),
    Unary {
        op: char,
        operand: Box<Expr>,
    },
    Binary {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
        kwargs: Vec<(String, Expr)>,
    },
}

/// Deepest nesting of operators, parentheses and calls in one expression
pub const MAX_DEPTH: usize = 256;

/// Parse one complete expression
pub fn parse(source: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected("end of expression", Some(token))),
    }
}

fn unexpected(expected: &str, found: Option<&Token>) -> ExprError {
    ExprError::UnexpectedToken {
        expected: expected.to_string(),
        found: found.map_or_else(|| "end of expression".to_string(), Token::describe),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Height of the tree built so far, bounded by [`MAX_DEPTH`]
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_second(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), ExprError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(unexpected(&token.describe(), self.peek()))
        }
    }

    fn descend(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let start = self.depth;
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => '+',
                Some(Token::Minus) => '-',
                _ => {
                    self.depth = start;
                    return Ok(lhs);
                }
            };
            self.pos += 1;
            // Each operator in a chain adds one level to the left operand
            self.descend()?;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let start = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => '*',
                Some(Token::Slash) => '/',
                _ => {
                    self.depth = start;
                    return Ok(lhs);
                }
            };
            self.pos += 1;
            self.descend()?;
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        self.descend()?;
        let expr = match self.peek() {
            Some(Token::Plus | Token::Minus) => {
                let op = if self.next() == Some(Token::Plus) { '+' } else { '-' };
                Expr::Unary {
                    op,
                    operand: Box::new(self.unary()?),
                }
            }
            _ => self.primary()?,
        };
        self.depth -= 1;
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        match self.next() {
            Some(Token::Int(i)) => Ok(Expr::Int(i)),
            Some(Token::Float(f)) => Ok(Expr::Float(f)),
            Some(Token::Str(s)) => Ok(Expr::Str(s)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if !self.eat(&Token::LParen) {
                    return Ok(Expr::Symbol(name));
                }
                let function =
                    Function::from_name(&name).ok_or(ExprError::UnknownFunction { name })?;
                let (args, kwargs) = self.arguments()?;
                Ok(Expr::Call {
                    function,
                    args,
                    kwargs,
                })
            }
            other => {
                self.pos -= 1;
                Err(unexpected("a value", other.as_ref()))
            }
        }
    }

    /// Arguments after the opening parenthesis, through the closing one
    fn arguments(&mut self) -> Result<(Vec<Expr>, Vec<(String, Expr)>), ExprError> {
        let mut args = Vec::new();
        let mut kwargs: Vec<(String, Expr)> = Vec::new();

        while !self.eat(&Token::RParen) {
            let keyword = match (self.peek(), self.peek_second()) {
                (Some(Token::Ident(name)), Some(Token::Assign)) => Some(name.clone()),
                _ => None,
            };

            if let Some(name) = keyword {
                self.pos += 2;
                kwargs.push((name, self.expr()?));
            } else if kwargs.is_empty() {
                args.push(self.expr()?);
            } else {
                return Err(unexpected("keyword argument", self.peek()));
            }

            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen)?;
                break;
            }
        }

        Ok((args, kwargs))
    }
}
