//! Expression and type productions.
//!
//! Binary operators parse by precedence climbing: `||` binds loosest, then
//! `&&`, comparisons, additive, and multiplicative operators; unary and
//! postfix operators bind tightest. `if … then … else …` spans the whole
//! expression and must be parenthesized to nest inside an operand.

use crate::Diagnostic;
use crate::Span;
use crate::SupportedVersion;
use crate::concrete::BinaryOp;
use crate::concrete::Expr;
use crate::concrete::ExprKind;
use crate::concrete::Ident;
use crate::concrete::ObjectMember;
use crate::concrete::Type;
use crate::concrete::UnaryOp;
use crate::lexer::Token;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parses an expression.
    pub(crate) fn expr(&mut self) -> Result<Expr, Diagnostic> {
        if let Some(start) = self.consume_if(Token::IfKeyword)? {
            let condition = Box::new(self.expr()?);
            self.expect(Token::ThenKeyword)?;
            let true_expr = Box::new(self.expr()?);
            self.expect(Token::ElseKeyword)?;
            let false_expr = Box::new(self.expr()?);
            let span = start.merge(false_expr.span);
            return Ok(Expr {
                kind: ExprKind::IfThenElse {
                    condition,
                    true_expr,
                    false_expr,
                },
                span,
            });
        }

        self.or_expr()
    }

    /// Parses a `||` expression.
    fn or_expr(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.and_expr()?;
        while self.consume_if(Token::LogicalOr)?.is_some() {
            let rhs = self.and_expr()?;
            lhs = binary(BinaryOp::LogicalOr, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parses a `&&` expression.
    fn and_expr(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.comparison_expr()?;
        while self.consume_if(Token::LogicalAnd)?.is_some() {
            let rhs = self.comparison_expr()?;
            lhs = binary(BinaryOp::LogicalAnd, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parses a comparison expression.
    fn comparison_expr(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.additive_expr()?;
        loop {
            let op = match self.peek()? {
                Some((Token::Equal, _)) => BinaryOp::Equality,
                Some((Token::NotEqual, _)) => BinaryOp::Inequality,
                Some((Token::Less, _)) => BinaryOp::Less,
                Some((Token::LessEqual, _)) => BinaryOp::LessEqual,
                Some((Token::Greater, _)) => BinaryOp::Greater,
                Some((Token::GreaterEqual, _)) => BinaryOp::GreaterEqual,
                _ => break,
            };
            self.next()?;
            let rhs = self.additive_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parses an additive expression.
    fn additive_expr(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.multiplicative_expr()?;
        loop {
            let op = match self.peek()? {
                Some((Token::Plus, _)) => BinaryOp::Addition,
                Some((Token::Minus, _)) => BinaryOp::Subtraction,
                _ => break,
            };
            self.next()?;
            let rhs = self.multiplicative_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parses a multiplicative expression.
    fn multiplicative_expr(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.unary_expr()?;
        loop {
            let op = match self.peek()? {
                Some((Token::Asterisk, _)) => BinaryOp::Multiplication,
                Some((Token::Slash, _)) => BinaryOp::Division,
                Some((Token::Percent, _)) => BinaryOp::Modulo,
                _ => break,
            };
            self.next()?;
            let rhs = self.unary_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parses a unary expression.
    fn unary_expr(&mut self) -> Result<Expr, Diagnostic> {
        let op = match self.peek()? {
            Some((Token::Minus, span)) => Some((UnaryOp::Negation, span)),
            Some((Token::Exclamation, span)) => Some((UnaryOp::LogicalNot, span)),
            _ => None,
        };

        if let Some((op, span)) = op {
            self.next()?;
            let operand = Box::new(self.unary_expr()?);
            let span = span.merge(operand.span);
            return Ok(Expr {
                kind: ExprKind::Unary { op, operand },
                span,
            });
        }

        self.postfix_expr()
    }

    /// Parses a postfix (index or member access) expression.
    fn postfix_expr(&mut self) -> Result<Expr, Diagnostic> {
        let mut expr = self.primary_expr()?;
        loop {
            match self.peek()? {
                Some((Token::OpenBracket, _)) => {
                    self.next()?;
                    let index = Box::new(self.expr()?);
                    let close = self.expect(Token::CloseBracket)?;
                    let span = expr.span.merge(close);
                    expr = Expr {
                        kind: ExprKind::Index {
                            target: Box::new(expr),
                            index,
                        },
                        span,
                    };
                }
                Some((Token::Dot, _)) => {
                    self.next()?;
                    let member = self.ident()?;
                    let span = expr.span.merge(member.span);
                    expr = Expr {
                        kind: ExprKind::Access {
                            target: Box::new(expr),
                            member,
                        },
                        span,
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Parses a primary expression.
    fn primary_expr(&mut self) -> Result<Expr, Diagnostic> {
        match self.peek()? {
            Some((Token::TrueKeyword, span)) => {
                self.next()?;
                Ok(Expr {
                    kind: ExprKind::Boolean(true),
                    span,
                })
            }
            Some((Token::FalseKeyword, span)) => {
                self.next()?;
                Ok(Expr {
                    kind: ExprKind::Boolean(false),
                    span,
                })
            }
            Some((Token::NoneKeyword, span)) => {
                if self.version() < SupportedVersion::V2 {
                    return Err(Diagnostic::error(
                        span,
                        format!(
                            "`None` is not supported in WDL version `{version}`",
                            version = self.version()
                        ),
                    ));
                }
                self.next()?;
                Ok(Expr {
                    kind: ExprKind::None,
                    span,
                })
            }
            Some((Token::NullKeyword, span)) => {
                self.next()?;
                Ok(Expr {
                    kind: ExprKind::Null,
                    span,
                })
            }
            Some((Token::Integer, span)) => {
                self.next()?;
                Ok(Expr {
                    kind: ExprKind::Integer(self.integer_literal(span)?),
                    span,
                })
            }
            Some((Token::Float, span)) => {
                self.next()?;
                let value = self.text(span).parse().map_err(|_| {
                    Diagnostic::error(span, "literal float exceeds the range for a 64-bit float")
                })?;
                Ok(Expr {
                    kind: ExprKind::Float(value),
                    span,
                })
            }
            Some((quote @ (Token::SingleQuote | Token::DoubleQuote), span)) => {
                self.next()?;
                let literal = self.string_literal(quote, span)?;
                let span = literal.span;
                Ok(Expr {
                    kind: ExprKind::String(literal),
                    span,
                })
            }
            Some((Token::Ident, span)) => {
                // A struct literal follows the name with a brace; only 2.0
                // documents have struct literals.
                if self.version() >= SupportedVersion::V2
                    && matches!(self.peek2()?, Some((Token::OpenBrace, _)))
                {
                    let name = self.ident()?;
                    return self.struct_literal(name);
                }

                self.next()?;
                if matches!(self.peek()?, Some((Token::OpenParen, _))) {
                    let target = Ident::new(self.text(span), span);
                    return self.apply_expr(target);
                }

                Ok(Expr {
                    kind: ExprKind::Ident(self.text(span).to_string()),
                    span,
                })
            }
            Some((Token::ObjectKeyword, span)) => {
                self.next()?;
                self.expect(Token::OpenBrace)?;
                let members = self.object_members()?;
                let close = self.last_span();
                Ok(Expr {
                    kind: ExprKind::Object(members),
                    span: span.merge(close),
                })
            }
            Some((Token::OpenBracket, span)) => {
                self.next()?;
                let mut elements = Vec::new();
                while !matches!(self.peek()?, Some((Token::CloseBracket, _))) {
                    elements.push(self.expr()?);
                    if self.consume_if(Token::Comma)?.is_none() {
                        break;
                    }
                }
                let close = self.expect(Token::CloseBracket)?;
                Ok(Expr {
                    kind: ExprKind::Array(elements),
                    span: span.merge(close),
                })
            }
            Some((Token::OpenBrace, span)) => {
                self.next()?;
                let mut items = Vec::new();
                while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
                    let key = self.expr()?;
                    self.expect(Token::Colon)?;
                    let value = self.expr()?;
                    items.push((key, value));
                    if self.consume_if(Token::Comma)?.is_none() {
                        break;
                    }
                }
                let close = self.expect(Token::CloseBrace)?;
                Ok(Expr {
                    kind: ExprKind::Map(items),
                    span: span.merge(close),
                })
            }
            Some((Token::OpenParen, span)) => {
                self.next()?;
                let first = self.expr()?;
                if self.consume_if(Token::Comma)?.is_some() {
                    let second = self.expr()?;
                    let close = self.expect(Token::CloseParen)?;
                    return Ok(Expr {
                        kind: ExprKind::Pair(Box::new(first), Box::new(second)),
                        span: span.merge(close),
                    });
                }
                let close = self.expect(Token::CloseParen)?;
                Ok(Expr {
                    kind: ExprKind::Group(Box::new(first)),
                    span: span.merge(close),
                })
            }
            _ => Err(self.expected("expression")),
        }
    }

    /// Parses the arguments of a standard library function call.
    fn apply_expr(&mut self, target: Ident) -> Result<Expr, Diagnostic> {
        self.expect(Token::OpenParen)?;
        let mut arguments = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseParen, _))) {
            arguments.push(self.expr()?);
            if self.consume_if(Token::Comma)?.is_none() {
                break;
            }
        }
        let close = self.expect(Token::CloseParen)?;
        let span = target.span.merge(close);
        Ok(Expr {
            kind: ExprKind::Apply { target, arguments },
            span,
        })
    }

    /// Parses the members of a struct literal.
    fn struct_literal(&mut self, name: Ident) -> Result<Expr, Diagnostic> {
        self.expect(Token::OpenBrace)?;
        let members = self.object_members()?;
        let span = name.span.merge(self.last_span());
        Ok(Expr {
            kind: ExprKind::Struct { name, members },
            span,
        })
    }

    /// Parses `name: expr` members through the closing brace.
    fn object_members(&mut self) -> Result<Vec<ObjectMember>, Diagnostic> {
        let mut members = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
            let name = self.ident()?;
            self.expect(Token::Colon)?;
            let value = self.expr()?;
            members.push(ObjectMember { name, value });
            if self.consume_if(Token::Comma)?.is_none() {
                break;
            }
        }
        self.expect(Token::CloseBrace)?;
        Ok(members)
    }

    /// Parses an identifier.
    pub(crate) fn ident(&mut self) -> Result<Ident, Diagnostic> {
        let span = self.expect(Token::Ident)?;
        Ok(Ident::new(self.text(span), span))
    }

    /// Parses a literal integer, in decimal, octal, or hexadecimal notation.
    fn integer_literal(&mut self, span: Span) -> Result<i64, Diagnostic> {
        let text = self.text(span);
        let value = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
        {
            i64::from_str_radix(hex, 16)
        } else if text.len() > 1 && text.starts_with('0') {
            i64::from_str_radix(&text[1..], 8)
        } else {
            text.parse()
        };

        value.map_err(|_| {
            Diagnostic::error(
                span,
                format!(
                    "literal integer exceeds the range for a 64-bit signed integer \
                     ({min}..={max})",
                    min = i64::MIN,
                    max = i64::MAX,
                ),
            )
        })
    }

    /// Parses a type.
    pub(crate) fn type_(&mut self) -> Result<Type, Diagnostic> {
        let ty = match self.next()? {
            Some((Token::BooleanTypeKeyword, span)) => Type::Boolean { span },
            Some((Token::IntTypeKeyword, span)) => Type::Int { span },
            Some((Token::FloatTypeKeyword, span)) => Type::Float { span },
            Some((Token::StringTypeKeyword, span)) => Type::String { span },
            Some((Token::FileTypeKeyword, span)) => Type::File { span },
            Some((Token::DirectoryTypeKeyword, span)) => {
                if self.version() < SupportedVersion::V2 {
                    return Err(Diagnostic::error(
                        span,
                        format!(
                            "type `Directory` is not supported in WDL version `{version}`",
                            version = self.version()
                        ),
                    ));
                }
                Type::Directory { span }
            }
            Some((Token::ObjectTypeKeyword, span)) => Type::Object { span },
            Some((Token::Ident, span)) => Type::Named {
                name: Ident::new(self.text(span), span),
            },
            Some((Token::ArrayTypeKeyword, span)) => {
                self.expect(Token::OpenBracket)?;
                let element = Box::new(self.type_()?);
                let close = self.expect(Token::CloseBracket)?;
                let non_empty = self.consume_if(Token::Plus)?.is_some();
                Type::Array {
                    element,
                    non_empty,
                    span: span.merge(self.last_span()).merge(close),
                }
            }
            Some((Token::MapTypeKeyword, span)) => {
                self.expect(Token::OpenBracket)?;
                let key = Box::new(self.type_()?);
                self.expect(Token::Comma)?;
                let value = Box::new(self.type_()?);
                let close = self.expect(Token::CloseBracket)?;
                Type::Map {
                    key,
                    value,
                    span: span.merge(close),
                }
            }
            Some((Token::PairTypeKeyword, span)) => {
                self.expect(Token::OpenBracket)?;
                let left = Box::new(self.type_()?);
                self.expect(Token::Comma)?;
                let right = Box::new(self.type_()?);
                let close = self.expect(Token::CloseBracket)?;
                Type::Pair {
                    left,
                    right,
                    span: span.merge(close),
                }
            }
            Some((t, span)) => {
                return Err(Diagnostic::error(
                    span,
                    format!("expected type, but found {found}", found = t.describe()),
                ));
            }
            None => return Err(self.unexpected_eof("type")),
        };

        if let Some(question) = self.consume_if(Token::QuestionMark)? {
            let span = ty.span().merge(question);
            return Ok(Type::Optional {
                inner: Box::new(ty),
                span,
            });
        }

        Ok(ty)
    }
}

/// Builds a binary expression node.
fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.merge(rhs.span);
    Expr {
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    }
}
