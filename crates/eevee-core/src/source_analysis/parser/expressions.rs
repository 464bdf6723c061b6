// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for Eevee.
//!
//! Expressions are parsed with a recursive precedence ladder: each level
//! handles one tier of operators and delegates to the next tighter tier.
//! Binary and logical levels fold left-associatively in a loop, so chains
//! like `a + b - c` and `a == b == c` nest to the left. Assignment is the
//! one right-associative level.
//!
//! Operator fields on AST nodes are derived from the token *kind*, never
//! the lexeme, which is how the keyword aliases (`is`, `not`, `and`, `or`)
//! end up as their symbolic spellings in the tree.

use crate::ast::{Expression, Identifier};
use crate::source_analysis::TokenKind;

use super::Parser;

/// Equality operators with their normalized spellings.
const EQUALITY_OPERATORS: &[(TokenKind, &str)] =
    &[(TokenKind::Eq, "=="), (TokenKind::NotEq, "!=")];

/// Relational operators with their normalized spellings.
const RELATIONAL_OPERATORS: &[(TokenKind, &str)] = &[
    (TokenKind::Lt, "<"),
    (TokenKind::LtEq, "<="),
    (TokenKind::Gt, ">"),
    (TokenKind::GtEq, ">="),
];

/// Additive operators.
const ADDITIVE_OPERATORS: &[(TokenKind, &str)] =
    &[(TokenKind::Plus, "+"), (TokenKind::Minus, "-")];

/// Multiplicative operators.
const MULTIPLICATIVE_OPERATORS: &[(TokenKind, &str)] = &[
    (TokenKind::Star, "*"),
    (TokenKind::Slash, "/"),
    (TokenKind::Percent, "%"),
];

impl Parser {
    /// Parses any expression.
    ///
    /// In REPL mode, a bare literal or identifier directly followed by
    /// `EOF` parses as a primary expression, so interactive input can end
    /// in a trailing expression without a full statement form.
    pub(super) fn parse_expression(&mut self) -> Expression {
        if self.repl_mode
            && (self.current_kind().is_literal() || self.check(&TokenKind::Ident))
            && self.peek_kind().is_some_and(TokenKind::is_eof)
        {
            return self.parse_primary_expression();
        }

        self.parse_assignment_expression()
    }

    /// Parses an assignment or delegates down the ladder.
    ///
    /// Assignment is right-associative: `a = b = c` parses as `a = (b = c)`.
    pub(super) fn parse_assignment_expression(&mut self) -> Expression {
        let left = self.parse_logical_or_expression();

        if self.current_kind().is_assignment_op() {
            let operator = self.assignment_operator();
            let right = self.parse_assignment_expression();
            return Expression::assignment(operator, left, right);
        }

        left
    }

    /// Consumes the current assignment operator and returns its spelling.
    ///
    /// Callers check [`TokenKind::is_assignment_op`] first, so the error
    /// arm is a guard that cannot arise through normal parsing.
    fn assignment_operator(&mut self) -> &'static str {
        let symbol = match self.current_kind() {
            TokenKind::Assign => "=",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::StarAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::PercentAssign => "%=",
            _ => {
                self.error("Expected assignment operator");
                return "=";
            }
        };
        self.advance();
        symbol
    }

    /// Parses `logical_and { || logical_and }`.
    fn parse_logical_or_expression(&mut self) -> Expression {
        let mut left = self.parse_logical_and_expression();

        while self.match_token(&TokenKind::Or) {
            let right = self.parse_logical_and_expression();
            left = Expression::logical("||", left, right);
        }

        left
    }

    /// Parses `equality { && equality }`.
    fn parse_logical_and_expression(&mut self) -> Expression {
        let mut left = self.parse_equality_expression();

        while self.match_token(&TokenKind::And) {
            let right = self.parse_equality_expression();
            left = Expression::logical("&&", left, right);
        }

        left
    }

    fn parse_equality_expression(&mut self) -> Expression {
        self.parse_binary_level(EQUALITY_OPERATORS, Self::parse_relational_expression)
    }

    fn parse_relational_expression(&mut self) -> Expression {
        self.parse_binary_level(RELATIONAL_OPERATORS, Self::parse_additive_expression)
    }

    fn parse_additive_expression(&mut self) -> Expression {
        self.parse_binary_level(ADDITIVE_OPERATORS, Self::parse_multiplicative_expression)
    }

    fn parse_multiplicative_expression(&mut self) -> Expression {
        self.parse_binary_level(MULTIPLICATIVE_OPERATORS, Self::parse_unary_expression)
    }

    /// Parses one left-associative binary level.
    ///
    /// Folds in a loop while the current token is in the operator set:
    /// `a + b - c` becomes `((a + b) - c)` rather than stopping after one
    /// fold.
    fn parse_binary_level(
        &mut self,
        operators: &[(TokenKind, &'static str)],
        next: fn(&mut Self) -> Expression,
    ) -> Expression {
        let mut left = next(self);

        while let Some(symbol) = operator_symbol(operators, self.current_kind()) {
            self.advance();
            let right = next(self);
            left = Expression::binary(symbol, left, right);
        }

        left
    }

    /// Parses `(+|-|!) unary | primary`.
    fn parse_unary_expression(&mut self) -> Expression {
        let symbol = match self.current_kind() {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            _ => return self.parse_primary_expression(),
        };

        self.advance();
        let right = self.parse_unary_expression();
        Expression::unary(symbol, right)
    }

    /// Parses a literal, grouped expression, or identifier.
    ///
    /// Anything else is an error; the parser reports it and substitutes the
    /// null literal so expression construction can continue above.
    pub(super) fn parse_primary_expression(&mut self) -> Expression {
        let kind = *self.current_kind();
        match kind {
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::Str => self.parse_string_literal(),
            TokenKind::True | TokenKind::False => {
                self.advance();
                Expression::bool(kind == TokenKind::True)
            }
            TokenKind::Null => {
                self.advance();
                Expression::null()
            }
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::Ident => Expression::Identifier(self.parse_identifier()),
            TokenKind::Illegal => {
                let message = format!(
                    "Illegal character: {:?}",
                    self.current_token().lexeme().as_str()
                );
                self.error(message);
                Expression::null()
            }
            _ => {
                let message = format!("Unexpected token: \"{kind}\"");
                self.error(message);
                Expression::null()
            }
        }
    }

    /// Parses `( expression )`.
    fn parse_grouped_expression(&mut self) -> Expression {
        self.eat(&TokenKind::LParen);
        let expression = self.parse_expression();
        self.eat(&TokenKind::RParen);
        expression
    }

    /// Parses an identifier token into an [`Identifier`] node.
    pub(super) fn parse_identifier(&mut self) -> Identifier {
        let token = self.eat(&TokenKind::Ident);
        Identifier::new(token.lexeme().clone())
    }

    /// Parses an integer literal as base-10 `i64`.
    ///
    /// A lexeme that does not fit records an error and yields value 0 so a
    /// node is still produced.
    fn parse_integer_literal(&mut self) -> Expression {
        let token = self.eat(&TokenKind::Int);

        match token.lexeme().parse::<i64>() {
            Ok(value) => Expression::integer(value),
            Err(_) => {
                let message = format!("Could not parse {:?} as integer", token.lexeme().as_str());
                self.error(message);
                Expression::integer(0)
            }
        }
    }

    /// Parses a float literal as `f64`, with the same 0-value convention as
    /// integers on failure.
    fn parse_float_literal(&mut self) -> Expression {
        let token = self.eat(&TokenKind::Float);

        match token.lexeme().parse::<f64>() {
            Ok(value) => Expression::float(value),
            Err(_) => {
                let message = format!("Could not parse {:?} as float", token.lexeme().as_str());
                self.error(message);
                Expression::float(0.0)
            }
        }
    }

    /// Parses a string literal, stripping the delimiting quotes.
    fn parse_string_literal(&mut self) -> Expression {
        let token = self.eat(&TokenKind::Str);
        let lexeme = token.lexeme();

        let value = if lexeme.len() >= 2 {
            &lexeme[1..lexeme.len() - 1]
        } else {
            ""
        };
        Expression::string(value)
    }
}

/// Looks up the normalized spelling for the current operator, if it is in
/// the given set.
fn operator_symbol(
    operators: &[(TokenKind, &'static str)],
    current: &TokenKind,
) -> Option<&'static str> {
    operators
        .iter()
        .find(|(kind, _)| kind == current)
        .map(|&(_, symbol)| symbol)
}
