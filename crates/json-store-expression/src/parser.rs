//! Infix expression parser.
//!
//! Precedence, loosest first: `||`, `&&`, `== !=`, `< <= > >=`, `+ -`,
//! `* / %`, unary `- + !`.

use crate::ast::Expr;
use crate::error::ExprError;
use json_store_path::{find_closing_bracket, Value};

/// Parses an expression such as `Store.items[Store.idx] * 2 + 1`.
pub fn parse_expression(input: &str) -> Result<Expr, ExprError> {
    let mut parser = ExprParser { input, pos: 0 };
    let expr = parser.parse_expr()?;
    parser.skip_whitespace();
    if parser.pos < input.len() {
        return Err(parser.error(format!("unexpected input at offset {}", parser.pos)));
    }
    Ok(expr)
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

/// Binary operators per precedence level, loosest first. Within a level the
/// longest token comes first so that `<=` is not read as `<`.
const LEVELS: &[&[&str]] = &[
    &["||"],
    &["&&"],
    &["==", "!="],
    &["<=", ">=", "<", ">"],
    &["+", "-"],
    &["*", "/", "%"],
];

impl<'a> ExprParser<'a> {
    fn parse_expr(&mut self) -> Result<Expr, ExprError> {
        self.parse_level(0)
    }

    /// Parses a left-associative chain of the operators at `level`.
    fn parse_level(&mut self, level: usize) -> Result<Expr, ExprError> {
        let Some(tokens) = LEVELS.get(level) else {
            return self.parse_unary();
        };
        let mut left = self.parse_level(level + 1)?;
        'chain: loop {
            for &token in tokens.iter() {
                if self.eat(token) {
                    let right = self.parse_level(level + 1)?;
                    left = Expr::op(token, vec![left, right]);
                    continue 'chain;
                }
            }
            return Ok(left);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.advance();
                Ok(Expr::op("neg", vec![self.parse_unary()?]))
            }
            Some('+') => {
                self.advance();
                Ok(Expr::op("num", vec![self.parse_unary()?]))
            }
            Some('!') if !self.rest().starts_with("!=") => {
                self.advance();
                Ok(Expr::op("!", vec![self.parse_unary()?]))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.advance();
                let inner = self.parse_expr()?;
                if !self.eat(")") {
                    return Err(self.error("expected ')'".to_string()));
                }
                Ok(inner)
            }
            Some(q @ ('"' | '\'')) => self.parse_string(q),
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => self.parse_word(),
            Some(c) => Err(self.error(format!("unexpected character '{}' at offset {}", c, self.pos))),
            None => Err(self.error("unexpected end of input".to_string())),
        }
    }

    fn parse_number(&mut self) -> Result<Expr, ExprError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            self.advance();
        }
        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(|n| Expr::Literal(Value::Number(n)))
            .map_err(|_| self.error(format!("invalid number '{}'", text)))
    }

    fn parse_string(&mut self, quote: char) -> Result<Expr, ExprError> {
        self.advance();
        let mut out = String::new();
        loop {
            let c = self
                .peek()
                .ok_or_else(|| self.error("unterminated string".to_string()))?;
            self.advance();
            match c {
                '\\' => {
                    let escaped = self
                        .peek()
                        .ok_or_else(|| self.error("unterminated string".to_string()))?;
                    self.advance();
                    out.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                }
                c if c == quote => return Ok(Expr::Literal(Value::String(out))),
                c => out.push(c),
            }
        }
    }

    /// A keyword literal or a reference: identifier characters, dots and
    /// balanced bracket groups.
    fn parse_word(&mut self) -> Result<Expr, ExprError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                '[' => {
                    let close = find_closing_bracket(self.input, self.pos)
                        .ok_or_else(|| self.error(format!("unterminated bracket at offset {}", self.pos)))?;
                    self.pos = close + 1;
                }
                c if c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.' => self.advance(),
                _ => break,
            }
        }
        let word = &self.input[start..self.pos];
        Ok(match word {
            "true" => Expr::Literal(Value::Bool(true)),
            "false" => Expr::Literal(Value::Bool(false)),
            "null" => Expr::Literal(Value::Null),
            "undefined" => Expr::Literal(Value::Undefined),
            _ => Expr::Reference(word.to_string()),
        })
    }

    /// Consumes `token` (after optional whitespace) if it is next.
    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, reason: String) -> ExprError {
        ExprError::Syntax {
            expr: self.input.to_string(),
            reason,
        }
    }
}
