//! Tokenizer for the expression language

use crate::error::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Assign,
}

impl Token {
    /// Short description used in parse errors
    pub fn describe(&self) -> String {
        match self {
            Token::Int(i) => format!("number {i}"),
            Token::Float(f) => format!("number {f}"),
            Token::Str(s) => format!("string {s:?}"),
            Token::Ident(name) => format!("name '{name}'"),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Assign => "'='".to_string(),
        }
    }
}

/// Split expression source into tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(&(offset, ch)) = chars.get(pos) {
        let token = match ch {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '=' => Token::Assign,
            '"' | '\'' => {
                let (text, next) = read_string(&chars, pos, ch)?;
                tokens.push(Token::Str(text));
                pos = next;
                continue;
            }
            c if c.is_ascii_digit() => {
                let end = scan_while(&chars, pos, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
                let end = extend_exponent(&chars, pos, end);
                tokens.push(parse_number(&slice(source, &chars, pos, end))?);
                pos = end;
                continue;
            }
            c if c.is_alphabetic() || c == '_' => {
                let end = scan_while(&chars, pos, |c| c.is_alphanumeric() || c == '_' || c == '.');
                tokens.push(Token::Ident(slice(source, &chars, pos, end)));
                pos = end;
                continue;
            }
            other => return Err(ExprError::UnexpectedChar { ch: other, offset }),
        };
        tokens.push(token);
        pos += 1;
    }

    Ok(tokens)
}

fn scan_while(chars: &[(usize, char)], start: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    while chars.get(end).is_some_and(|&(_, c)| pred(c)) {
        end += 1;
    }
    end
}

/// `1e-3` stops at the `-` in [`scan_while`]; pick up the signed exponent.
fn extend_exponent(chars: &[(usize, char)], start: usize, end: usize) -> usize {
    let is_decimal = chars[start..end]
        .iter()
        .all(|&(_, c)| c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E');
    let ends_with_e = end > start && matches!(chars[end - 1].1, 'e' | 'E');
    let signed = chars.get(end).is_some_and(|&(_, c)| c == '+' || c == '-');
    let digit_follows = chars.get(end + 1).is_some_and(|&(_, c)| c.is_ascii_digit());

    if is_decimal && ends_with_e && signed && digit_follows {
        scan_while(chars, end + 1, |c| c.is_ascii_digit())
    } else {
        end
    }
}

fn slice(source: &str, chars: &[(usize, char)], start: usize, end: usize) -> String {
    let from = chars[start].0;
    let to = chars.get(end).map_or(source.len(), |&(offset, _)| offset);
    source[from..to].to_string()
}

fn parse_number(literal: &str) -> Result<Token, ExprError> {
    let invalid = || ExprError::InvalidNumber {
        literal: literal.to_string(),
    };
    let digits = literal.replace('_', "");

    let radix = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return i64::from_str_radix(&digits[2..], radix)
            .map(Token::Int)
            .map_err(|_| invalid());
    }

    if digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.parse().map(Token::Int).map_err(|_| invalid());
    }

    digits
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Token::Float)
        .ok_or_else(invalid)
}

fn read_string(chars: &[(usize, char)], start: usize, quote: char) -> Result<(String, usize), ExprError> {
    let mut text = String::new();
    let mut pos = start + 1;

    while let Some(&(_, ch)) = chars.get(pos) {
        pos += 1;
        match ch {
            c if c == quote => return Ok((text, pos)),
            '\\' => {
                let Some(&(_, escaped)) = chars.get(pos) else {
                    break;
                };
                pos += 1;
                text.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            c => text.push(c),
        }
    }

    Err(ExprError::UnterminatedString)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source).expect("should tokenize")
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("42"), vec![Token::Int(42)]);
        assert_eq!(lex("0x112233"), vec![Token::Int(0x11_2233)]);
        assert_eq!(lex("0b101"), vec![Token::Int(5)]);
        assert_eq!(lex("0.5"), vec![Token::Float(0.5)]);
        assert_eq!(lex("1e-3"), vec![Token::Float(0.001)]);
        assert_eq!(lex("1_000"), vec![Token::Int(1000)]);
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(tokenize("0xZZ"), Err(ExprError::InvalidNumber { .. })));
        assert!(matches!(tokenize("12abc"), Err(ExprError::InvalidNumber { .. })));
        assert!(matches!(
            tokenize("99999999999999999999"),
            Err(ExprError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_call_tokens() {
        assert_eq!(
            lex("rgb(1, 2,3)"),
            vec![
                Token::Ident("rgb".into()),
                Token::LParen,
                Token::Int(1),
                Token::Comma,
                Token::Int(2),
                Token::Comma,
                Token::Int(3),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_dotted_identifiers() {
        assert_eq!(lex("colors.bg_main"), vec![Token::Ident("colors.bg_main".into())]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(lex("'add'"), vec![Token::Str("add".into())]);
        assert_eq!(lex(r#""a \"b\"""#), vec![Token::Str("a \"b\"".into())]);
        assert_eq!(tokenize("'open"), Err(ExprError::UnterminatedString));
    }

    #[test]
    fn test_operators_and_keywords() {
        assert_eq!(
            lex("-a*b/c+d"),
            vec![
                Token::Minus,
                Token::Ident("a".into()),
                Token::Star,
                Token::Ident("b".into()),
                Token::Slash,
                Token::Ident("c".into()),
                Token::Plus,
                Token::Ident("d".into()),
            ]
        );
        assert_eq!(
            lex("x=1"),
            vec![Token::Ident("x".into()), Token::Assign, Token::Int(1)]
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("1 % 2"),
            Err(ExprError::UnexpectedChar { ch: '%', offset: 2 })
        );
    }
}
