// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing for Eevee.
//!
//! Statements are dispatched on the current token kind at each statement
//! boundary. Every statement may be followed by one optional `EOL`, which
//! the dispatcher consumes, so statement parsers never have to worry about
//! their own trailing line ends.

use crate::ast::{Expression, ForInit, Statement, VariableDeclaration, VariableStatement};
use crate::source_analysis::TokenKind;

use super::Parser;

impl Parser {
    /// Parses statements until the stop kind (or `EOF`) is reached.
    pub(super) fn parse_statements(&mut self, stop: &TokenKind) -> Vec<Statement> {
        let mut statements = Vec::new();

        while !self.check(stop) && !self.is_at_end() {
            statements.push(self.parse_statement());
        }

        statements
    }

    /// Parses one statement and its optional trailing `EOL`.
    fn parse_statement(&mut self) -> Statement {
        let statement = match self.current_kind() {
            TokenKind::Indent => self.parse_block_statement(),
            TokenKind::Let => Statement::Variable(self.parse_variable_statement()),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        };

        self.match_token(&TokenKind::Eol);
        statement
    }

    /// Parses `INDENT statements DEDENT`.
    fn parse_block_statement(&mut self) -> Statement {
        self.eat(&TokenKind::Indent);
        let statements = self.parse_statements(&TokenKind::Dedent);
        self.eat(&TokenKind::Dedent);

        Statement::Block { statements }
    }

    /// Parses `fn name(params) body`.
    ///
    /// The parameter list is a possibly empty comma-separated list of
    /// identifiers. The body is one statement, usually a block on the
    /// following lines.
    fn parse_function_declaration(&mut self) -> Statement {
        self.eat(&TokenKind::Function);
        let name = self.parse_identifier();

        self.eat(&TokenKind::LParen);
        let mut parameters = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                parameters.push(self.parse_identifier());
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.eat(&TokenKind::RParen);

        self.match_token(&TokenKind::Eol);
        let body = Box::new(self.parse_statement());

        Statement::Function {
            name,
            parameters,
            body,
        }
    }

    /// Parses `return [value]`.
    ///
    /// A return at the end of its line (or block, or input) carries the
    /// null literal.
    fn parse_return_statement(&mut self) -> Statement {
        self.eat(&TokenKind::Return);

        let value = if matches!(
            self.current_kind(),
            TokenKind::Eol | TokenKind::Dedent | TokenKind::Eof
        ) {
            Expression::null()
        } else {
            self.parse_expression()
        };

        Statement::Return { value }
    }

    /// Parses `let decl {, decl}`.
    ///
    /// Also used for the `for` initializer clause, which is why this
    /// returns the bare [`VariableStatement`] rather than a [`Statement`].
    pub(super) fn parse_variable_statement(&mut self) -> VariableStatement {
        self.eat(&TokenKind::Let);

        let mut declarations = vec![self.parse_variable_declaration()];
        while self.match_token(&TokenKind::Comma) {
            declarations.push(self.parse_variable_declaration());
        }

        VariableStatement::new(declarations)
    }

    /// Parses `name [= value]`.
    ///
    /// The comma lookahead short-circuits before the assign check, so in
    /// `let x, y = 42` the declaration of `x` has no initializer.
    fn parse_variable_declaration(&mut self) -> VariableDeclaration {
        let identifier = self.parse_identifier();

        let initializer = if !self.check(&TokenKind::Comma) && self.check(&TokenKind::Assign) {
            self.advance();
            Some(self.parse_assignment_expression())
        } else {
            None
        };

        VariableDeclaration::new(identifier, initializer)
    }

    /// Parses `if condition then consequent [else alternate]`.
    fn parse_if_statement(&mut self) -> Statement {
        self.eat(&TokenKind::If);
        let condition = self.parse_expression();
        self.eat(&TokenKind::Then);
        self.match_token(&TokenKind::Eol);
        let consequent = Box::new(self.parse_statement());

        let alternate = if self.match_token(&TokenKind::Else) {
            self.match_token(&TokenKind::Eol);
            Some(Box::new(self.parse_statement()))
        } else {
            None
        };

        Statement::If {
            condition,
            consequent,
            alternate,
        }
    }

    /// Parses `while condition do body`.
    fn parse_while_statement(&mut self) -> Statement {
        self.eat(&TokenKind::While);
        let condition = self.parse_expression();
        self.eat(&TokenKind::Do);
        self.match_token(&TokenKind::Eol);
        let body = Box::new(self.parse_statement());

        Statement::While { condition, body }
    }

    /// Parses `do body while condition`.
    fn parse_do_while_statement(&mut self) -> Statement {
        self.eat(&TokenKind::Do);
        self.match_token(&TokenKind::Eol);
        let body = Box::new(self.parse_statement());
        self.eat(&TokenKind::While);
        self.match_token(&TokenKind::Eol);
        let condition = self.parse_expression();

        Statement::DoWhile { condition, body }
    }

    /// Parses `for [init]; [condition]; [iterator] do body`.
    ///
    /// Each clause is absent when its terminator immediately follows. The
    /// initializer is a variable statement when introduced by `let`,
    /// otherwise an expression.
    fn parse_for_statement(&mut self) -> Statement {
        self.eat(&TokenKind::For);

        let initializer = if self.check(&TokenKind::Semi) {
            None
        } else if self.check(&TokenKind::Let) {
            Some(ForInit::Variable(self.parse_variable_statement()))
        } else {
            Some(ForInit::Expression(self.parse_expression()))
        };
        self.eat(&TokenKind::Semi);

        let condition = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.eat(&TokenKind::Semi);

        let iterator = if self.check(&TokenKind::Do) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.eat(&TokenKind::Do);

        self.match_token(&TokenKind::Eol);
        let body = Box::new(self.parse_statement());

        Statement::For {
            initializer,
            condition,
            iterator,
            body,
        }
    }

    /// Parses an expression in statement position, synchronizing to the
    /// next line end if the expression left the parser in panic mode.
    fn parse_expression_statement(&mut self) -> Statement {
        let expression = self.parse_expression();

        if self.panicking {
            self.synchronize();
        }

        Statement::expression(expression)
    }
}
