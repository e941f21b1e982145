//! Expression AST - the conditions and projections the compiler emits.
//!
//! This module provides a strongly-typed AST for SQL expressions
//! with exhaustive pattern matching enforced by the compiler.

use super::dialect::{Dialect, SqlDialect};
use super::token::{Token, TokenStream};

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled in `to_tokens_for_dialect()` - the compiler
/// enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier quoted per dialect (output aliases, generated names)
    Ident(String),

    /// Literal values
    Literal(Literal),

    /// Binary operation: left op right
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// Function call: name(args...)
    Function {
        name: String,
        args: Vec<Expr>,
        distinct: bool,
    },

    /// IN: expr IN (values...)
    In {
        expr: Box<Expr>,
        values: Vec<Expr>,
        negated: bool,
    },

    /// IS NULL / IS NOT NULL
    IsNull { expr: Box<Expr>, negated: bool },

    /// LIKE: expr LIKE 'pattern', with an optional ESCAPE specifier.
    Like {
        expr: Box<Expr>,
        pattern: String,
        escape: Option<char>,
    },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// Raw SQL expression passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user-supplied filter values to this variant.** Raw SQL is
    /// not sanitized and can lead to SQL injection vulnerabilities. Only use
    /// with model-owned fragments (field `sql` and join `sql_on` after
    /// placeholder substitution, `sql_table` relation references).
    ///
    /// For filter values, use `Expr::Literal` variants which properly escape
    /// content for the target dialect.
    Raw(String),
}

/// Literal values the compiler can inline.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Gt,
    Lt,
    And,
    Or,
}

fn binary_op_to_token(op: BinaryOperator) -> Token {
    match op {
        BinaryOperator::Gt => Token::Gt,
        BinaryOperator::Lt => Token::Lt,
        BinaryOperator::And => Token::And,
        BinaryOperator::Or => Token::Or,
    }
}

impl Expr {
    /// Convert this expression to a token stream for a specific dialect.
    pub fn to_tokens_for_dialect(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Ident(name) => {
                ts.push(Token::Ident(name.clone()));
            }

            Expr::Literal(lit) => {
                ts.push(match lit {
                    Literal::Int(n) => Token::LitInt(*n),
                    Literal::Float(f) => Token::LitFloat(*f),
                    Literal::String(s) => Token::LitString(s.clone()),
                });
            }

            Expr::BinaryOp { left, op, right } => {
                ts.append(&left.to_tokens_for_dialect(dialect));
                ts.space();
                ts.push(binary_op_to_token(*op));
                ts.space();
                ts.append(&right.to_tokens_for_dialect(dialect));
            }

            Expr::Function {
                name,
                args,
                distinct,
            } => {
                ts.push(Token::FunctionName(name.clone()));
                ts.lparen();
                if *distinct {
                    ts.push(Token::Distinct).space();
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.append(&arg.to_tokens_for_dialect(dialect));
                }
                ts.rparen();
            }

            Expr::In {
                expr,
                values,
                negated,
            } => {
                // Empty IN list: "x IN ()" is invalid SQL.
                // "x IN ()" must select no rows, "x NOT IN ()" every row.
                if values.is_empty() {
                    ts.push(if *negated {
                        Token::TruePredicate
                    } else {
                        Token::FalsePredicate
                    });
                } else {
                    ts.append(&expr.to_tokens_for_dialect(dialect));
                    if *negated {
                        ts.space().push(Token::Not);
                    }
                    ts.space().push(Token::In).space().lparen();
                    for (i, val) in values.iter().enumerate() {
                        if i > 0 {
                            ts.comma().space();
                        }
                        ts.append(&val.to_tokens_for_dialect(dialect));
                    }
                    ts.rparen();
                }
            }

            Expr::IsNull { expr, negated } => {
                ts.append(&expr.to_tokens_for_dialect(dialect));
                ts.space();
                ts.push(if *negated {
                    Token::IsNotNull
                } else {
                    Token::IsNull
                });
            }

            Expr::Like {
                expr,
                pattern,
                escape,
            } => {
                ts.append(&expr.to_tokens_for_dialect(dialect));
                ts.space()
                    .push(Token::Like)
                    .space()
                    .push(Token::LitString(pattern.clone()));
                // Engines without an ESCAPE clause (BigQuery) treat the
                // backslashes in the pattern as their native LIKE escape.
                if let Some(escape_char) = escape {
                    if dialect.supports_like_escape() {
                        ts.space()
                            .push(Token::Escape)
                            .space()
                            .push(Token::LitString(escape_char.to_string()));
                    }
                }
            }

            Expr::Paren(inner) => {
                ts.lparen();
                ts.append(&inner.to_tokens_for_dialect(dialect));
                ts.rparen();
            }

            Expr::Raw(s) => {
                ts.push(Token::Raw(s.clone()));
            }
        }

        ts
    }

    /// Serialize to SQL for a specific dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens_for_dialect(dialect).serialize(dialect)
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Raw SQL fragment. See the security warning on [`Expr::Raw`].
pub fn raw_sql(sql: &str) -> Expr {
    Expr::Raw(sql.into())
}

/// Identifier, quoted per dialect (e.g. an output alias).
pub fn ident(name: &str) -> Expr {
    Expr::Ident(name.into())
}

/// Integer literal.
pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

/// Float literal.
pub fn lit_float(f: f64) -> Expr {
    Expr::Literal(Literal::Float(f))
}

/// String literal.
pub fn lit_str(s: &str) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

/// COUNT(expr)
pub fn count(expr: Expr) -> Expr {
    Expr::Function {
        name: "COUNT".into(),
        args: vec![expr],
        distinct: false,
    }
}

/// COUNT(DISTINCT expr)
pub fn count_distinct(expr: Expr) -> Expr {
    Expr::Function {
        name: "COUNT".into(),
        args: vec![expr],
        distinct: true,
    }
}

/// SUM(expr)
pub fn sum(expr: Expr) -> Expr {
    Expr::Function {
        name: "SUM".into(),
        args: vec![expr],
        distinct: false,
    }
}

/// AVG(expr)
pub fn avg(expr: Expr) -> Expr {
    Expr::Function {
        name: "AVG".into(),
        args: vec![expr],
        distinct: false,
    }
}

/// MIN(expr)
pub fn min(expr: Expr) -> Expr {
    Expr::Function {
        name: "MIN".into(),
        args: vec![expr],
        distinct: false,
    }
}

/// MAX(expr)
pub fn max(expr: Expr) -> Expr {
    Expr::Function {
        name: "MAX".into(),
        args: vec![expr],
        distinct: false,
    }
}

/// expr LIKE 'prefix%', escaping LIKE wildcards inside `prefix`.
///
/// `%`, `_` and `\` are escaped with `\`. The ESCAPE specifier is emitted
/// only when escaping occurred and the dialect has one, so clean prefixes
/// keep the plain `LIKE 'value%'` shape.
pub fn like_prefix(expr: Expr, prefix: &str) -> Expr {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    let mut escaped = false;
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
            escaped = true;
        }
        pattern.push(c);
    }
    pattern.push('%');
    Expr::Like {
        expr: Box::new(expr),
        pattern,
        escape: escaped.then_some('\\'),
    }
}

// =============================================================================
// Fluent combinators
// =============================================================================

/// Fluent methods for building expressions.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn gt(self, right: impl Into<Expr>) -> Expr {
        Expr::BinaryOp {
            left: Box::new(self.into_expr()),
            op: BinaryOperator::Gt,
            right: Box::new(right.into()),
        }
    }

    fn lt(self, right: impl Into<Expr>) -> Expr {
        Expr::BinaryOp {
            left: Box::new(self.into_expr()),
            op: BinaryOperator::Lt,
            right: Box::new(right.into()),
        }
    }

    fn and(self, right: impl Into<Expr>) -> Expr {
        Expr::BinaryOp {
            left: Box::new(self.into_expr()),
            op: BinaryOperator::And,
            right: Box::new(right.into()),
        }
    }

    fn or(self, right: impl Into<Expr>) -> Expr {
        Expr::BinaryOp {
            left: Box::new(self.into_expr()),
            op: BinaryOperator::Or,
            right: Box::new(right.into()),
        }
    }

    fn in_list(self, values: Vec<Expr>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            values,
            negated: false,
        }
    }

    fn not_in_list(self, values: Vec<Expr>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            values,
            negated: true,
        }
    }

    fn is_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: false,
        }
    }

    fn is_not_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: true,
        }
    }

    fn paren(self) -> Expr {
        Expr::Paren(Box::new(self.into_expr()))
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        lit_int(n)
    }
}

impl From<f64> for Expr {
    fn from(f: f64) -> Self {
        lit_float(f)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        lit_str(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Literal(Literal::String(s))
    }
}
