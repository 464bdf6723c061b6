// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for Eevee.
//!
//! The AST represents the structure of an Eevee program after parsing.
//! Statements and expressions are two disjoint tagged sum types; the
//! top-level [`Program`] owns every node, and nothing mutates an AST after
//! construction.
//!
//! # Canonical String Form
//!
//! Every node has a deterministic parenthesized [`Display`](std::fmt::Display)
//! form, e.g. `(BinaryExpression + (IntegerLiteral 2) (IntegerLiteral 2))`.
//! Absent subterms print as `<nil>`. Two ASTs are considered structurally
//! equal iff their string forms are equal, which is how the parser tests
//! compare trees.
//!
//! # JSON Form
//!
//! Nodes serialize with [`serde`] as `{"type": "<NodeKindName>", ...}`, so
//! `serde_json::to_string_pretty` on a [`Program`] yields the tree the CLI
//! prints.
//!
//! # Operator Normalization
//!
//! Operator fields always hold the symbolic spelling (`==`, `!=`, `&&`,
//! `||`, ...). The keyword aliases `is`/`not`/`and`/`or` are rewritten by
//! the parser before a node is built and never appear in an AST.

use ecow::EcoString;
use serde::Serialize;

/// Top-level container for a parsed source unit.
///
/// # Example
///
/// ```
/// use eevee_core::ast::{Expression, Program, Statement};
///
/// // Source: 2 * 2
/// let program = Program::new(vec![Statement::expression(Expression::binary(
///     "*",
///     Expression::integer(2),
///     Expression::integer(2),
/// ))]);
/// assert_eq!(
///     program.to_string(),
///     "(Program (ExpressionStatement (BinaryExpression * (IntegerLiteral 2) (IntegerLiteral 2))))",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "Program")]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Creates a program from its statements.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// An indentation-delimited block: `INDENT statements DEDENT`.
    #[serde(rename = "BlockStatement")]
    Block {
        /// Statements in the block, in source order.
        statements: Vec<Statement>,
    },

    /// A function declaration: `fn name(params) body`.
    #[serde(rename = "FunctionDeclaration")]
    Function {
        /// The function name.
        name: Identifier,
        /// Parameter names, possibly empty.
        parameters: Vec<Identifier>,
        /// The body statement, usually a block.
        body: Box<Statement>,
    },

    /// A return statement. A bare `return` carries the null literal.
    #[serde(rename = "ReturnStatement")]
    Return {
        /// The returned value.
        value: Expression,
    },

    /// An `if`/`then`/`else` statement.
    #[serde(rename = "IfStatement")]
    If {
        /// The tested condition.
        condition: Expression,
        /// Statement executed when the condition holds.
        consequent: Box<Statement>,
        /// Optional `else` branch.
        alternate: Option<Box<Statement>>,
    },

    /// A `while ... do` loop.
    #[serde(rename = "WhileStatement")]
    While {
        /// The loop condition.
        condition: Expression,
        /// The loop body.
        body: Box<Statement>,
    },

    /// A `do ... while` loop; the body runs before the first test.
    #[serde(rename = "DoWhileStatement")]
    DoWhile {
        /// The loop condition.
        condition: Expression,
        /// The loop body.
        body: Box<Statement>,
    },

    /// A C-style `for` loop. Any of the three clauses may be absent.
    #[serde(rename = "ForStatement")]
    For {
        /// Optional initializer clause.
        initializer: Option<ForInit>,
        /// Optional condition clause.
        condition: Option<Expression>,
        /// Optional iterator clause, run after each body execution.
        iterator: Option<Expression>,
        /// The loop body.
        body: Box<Statement>,
    },

    /// An expression in statement position.
    #[serde(rename = "ExpressionStatement")]
    Expression {
        /// The wrapped expression.
        expression: Expression,
    },

    /// A variable statement: `let` with one or more declarations.
    ///
    /// Untagged (and therefore last): [`VariableStatement`] carries its own
    /// type tag.
    #[serde(untagged)]
    Variable(VariableStatement),
}

impl Statement {
    /// Wraps an expression in statement position.
    #[must_use]
    pub fn expression(expression: Expression) -> Self {
        Self::Expression { expression }
    }

    /// Creates a block statement.
    #[must_use]
    pub fn block(statements: Vec<Statement>) -> Self {
        Self::Block { statements }
    }
}

/// A `let` statement: one or more declarations.
///
/// This is a named struct rather than inline variant fields because the
/// `for` initializer reuses it via [`ForInit::Variable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "VariableStatement")]
pub struct VariableStatement {
    /// The declarations, in source order.
    pub declarations: Vec<VariableDeclaration>,
}

impl VariableStatement {
    /// Creates a variable statement from its declarations.
    #[must_use]
    pub fn new(declarations: Vec<VariableDeclaration>) -> Self {
        Self { declarations }
    }
}

/// One declaration in a variable statement: `name` or `name = value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "VariableDeclaration")]
pub struct VariableDeclaration {
    /// The declared name.
    pub identifier: Identifier,
    /// The initializer, absent in `let x` and in `let x, y = 42` for `x`.
    pub initializer: Option<Expression>,
}

impl VariableDeclaration {
    /// Creates a declaration.
    #[must_use]
    pub fn new(identifier: Identifier, initializer: Option<Expression>) -> Self {
        Self {
            identifier,
            initializer,
        }
    }
}

/// The initializer clause of a `for` statement.
///
/// `for let i = 0; ...` uses a variable statement; `for i = 0; ...` uses a
/// plain expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    /// A `let` initializer.
    Variable(VariableStatement),
    /// An expression initializer.
    Expression(Expression),
}

/// A name in expression position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "Identifier")]
pub struct Identifier {
    /// The identifier text.
    pub name: EcoString,
}

impl Identifier {
    /// Creates an identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self { name: name.into() }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// An assignment: `x = 1`, `x += 1`. Right-associative.
    #[serde(rename = "AssignmentExpression")]
    Assignment {
        /// One of `=`, `+=`, `-=`, `*=`, `/=`, `%=`.
        operator: EcoString,
        /// The assignment target.
        left: Box<Expression>,
        /// The assigned value.
        right: Box<Expression>,
    },

    /// A logical expression: `&&` or `||`.
    #[serde(rename = "LogicalExpression")]
    Logical {
        /// Either `&&` or `||`.
        operator: EcoString,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },

    /// A binary expression over the arithmetic and comparison operators.
    #[serde(rename = "BinaryExpression")]
    Binary {
        /// One of `+ - * / % == != < <= > >=`.
        operator: EcoString,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },

    /// A prefix expression: `-x`, `!ready`, `+1`.
    #[serde(rename = "UnaryExpression")]
    Unary {
        /// One of `+`, `-`, `!`.
        operator: EcoString,
        /// The operand.
        right: Box<Expression>,
    },

    /// Member access: `a.b` or `a[b]`. Carried in the model but not yet
    /// produced by the parser.
    #[serde(rename = "MemberExpression")]
    Member {
        /// `true` for `a[b]`, `false` for `a.b`.
        computed: bool,
        /// The accessed object.
        object: Box<Expression>,
        /// The property name or index expression.
        property: Box<Expression>,
    },

    /// An integer literal.
    #[serde(rename = "IntegerLiteral")]
    Integer {
        /// The parsed value.
        value: i64,
    },

    /// A floating-point literal.
    #[serde(rename = "FloatLiteral")]
    Float {
        /// The parsed value.
        value: f64,
    },

    /// A string literal, quotes stripped.
    #[serde(rename = "StringLiteral")]
    Str {
        /// The content between the delimiting quotes.
        value: EcoString,
    },

    /// A boolean literal.
    #[serde(rename = "BoolLiteral")]
    Bool {
        /// The literal value.
        value: bool,
    },

    /// The null literal.
    #[serde(rename = "NullLiteral")]
    Null {
        /// Carried only for the JSON form, where the node always has a
        /// `"value": null` field like the other literals.
        value: (),
    },

    /// A name reference. Untagged (and therefore last): [`Identifier`]
    /// carries its own type tag.
    #[serde(untagged)]
    Identifier(Identifier),
}

impl Expression {
    /// Creates an assignment expression.
    #[must_use]
    pub fn assignment(operator: impl Into<EcoString>, left: Expression, right: Expression) -> Self {
        Self::Assignment {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a logical expression.
    #[must_use]
    pub fn logical(operator: impl Into<EcoString>, left: Expression, right: Expression) -> Self {
        Self::Logical {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(operator: impl Into<EcoString>, left: Expression, right: Expression) -> Self {
        Self::Binary {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(operator: impl Into<EcoString>, right: Expression) -> Self {
        Self::Unary {
            operator: operator.into(),
            right: Box::new(right),
        }
    }

    /// Creates an identifier expression.
    #[must_use]
    pub fn identifier(name: impl Into<EcoString>) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    /// Creates an integer literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Integer { value }
    }

    /// Creates a float literal.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::Float { value }
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<EcoString>) -> Self {
        Self::Str {
            value: value.into(),
        }
    }

    /// Creates a boolean literal.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::Bool { value }
    }

    /// Creates the null literal.
    #[must_use]
    pub fn null() -> Self {
        Self::Null { value: () }
    }
}

// ============================================================================
// Canonical string form
// ============================================================================

/// The sentinel printed for absent subterms.
const NIL: &str = "<nil>";

fn write_statements(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    statements: &[Statement],
) -> std::fmt::Result {
    write!(f, "({name}")?;
    for statement in statements {
        write!(f, " {statement}")?;
    }
    write!(f, ")")
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_statements(f, "Program", &self.statements)
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block { statements } => write_statements(f, "BlockStatement", statements),
            Self::Function {
                name,
                parameters,
                body,
            } => {
                write!(f, "(FunctionDeclaration {name}")?;
                for parameter in parameters {
                    write!(f, " {parameter}")?;
                }
                write!(f, " {body})")
            }
            Self::Return { value } => write!(f, "(ReturnStatement {value})"),
            Self::Variable(statement) => statement.fmt(f),
            Self::If {
                condition,
                consequent,
                alternate,
            } => {
                write!(f, "(IfStatement {condition} {consequent} ")?;
                match alternate {
                    Some(alternate) => write!(f, "{alternate})"),
                    None => write!(f, "{NIL})"),
                }
            }
            Self::While { condition, body } => write!(f, "(WhileStatement {condition} {body})"),
            Self::DoWhile { condition, body } => {
                write!(f, "(DoWhileStatement {condition} {body})")
            }
            Self::For {
                initializer,
                condition,
                iterator,
                body,
            } => {
                write!(f, "(ForStatement ")?;
                match initializer {
                    Some(initializer) => write!(f, "{initializer} ")?,
                    None => write!(f, "{NIL} ")?,
                }
                match condition {
                    Some(condition) => write!(f, "{condition} ")?,
                    None => write!(f, "{NIL} ")?,
                }
                match iterator {
                    Some(iterator) => write!(f, "{iterator} ")?,
                    None => write!(f, "{NIL} ")?,
                }
                write!(f, "{body})")
            }
            Self::Expression { expression } => write!(f, "(ExpressionStatement {expression})"),
        }
    }
}

impl std::fmt::Display for VariableStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(VariableStatement")?;
        for declaration in &self.declarations {
            write!(f, " {declaration}")?;
        }
        write!(f, ")")
    }
}

impl std::fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(VariableDeclaration {} ", self.identifier)?;
        match &self.initializer {
            Some(initializer) => write!(f, "{initializer})"),
            None => write!(f, "{NIL})"),
        }
    }
}

impl std::fmt::Display for ForInit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(statement) => statement.fmt(f),
            Self::Expression(expression) => expression.fmt(f),
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(Identifier {})", self.name)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assignment {
                operator,
                left,
                right,
            } => write!(f, "(AssignmentExpression {operator} {left} {right})"),
            Self::Logical {
                operator,
                left,
                right,
            } => write!(f, "(LogicalExpression {operator} {left} {right})"),
            Self::Binary {
                operator,
                left,
                right,
            } => write!(f, "(BinaryExpression {operator} {left} {right})"),
            Self::Unary { operator, right } => write!(f, "(UnaryExpression {operator} {right})"),
            Self::Member {
                computed,
                object,
                property,
            } => write!(f, "(MemberExpression {computed} {object} {property})"),
            Self::Identifier(identifier) => identifier.fmt(f),
            Self::Integer { value } => write!(f, "(IntegerLiteral {value})"),
            Self::Float { value } => write!(f, "(FloatLiteral {value})"),
            Self::Str { value } => write!(f, "(StringLiteral {value})"),
            Self::Bool { value } => write!(f, "(BoolLiteral {value})"),
            Self::Null { .. } => write!(f, "(NullLiteral {NIL})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_form_literals() {
        assert_eq!(Expression::integer(42).to_string(), "(IntegerLiteral 42)");
        assert_eq!(Expression::float(3.14).to_string(), "(FloatLiteral 3.14)");
        assert_eq!(
            Expression::string("eevee").to_string(),
            "(StringLiteral eevee)"
        );
        assert_eq!(Expression::bool(true).to_string(), "(BoolLiteral true)");
        assert_eq!(Expression::null().to_string(), "(NullLiteral <nil>)");
        assert_eq!(
            Expression::identifier("pokemon").to_string(),
            "(Identifier pokemon)"
        );
    }

    #[test]
    fn canonical_form_trims_float_zeros() {
        // Whole floats print without a fraction in the canonical form.
        assert_eq!(Expression::float(3.0).to_string(), "(FloatLiteral 3)");
    }

    #[test]
    fn canonical_form_nested_expression() {
        let expression = Expression::binary(
            "+",
            Expression::binary("*", Expression::integer(2), Expression::integer(2)),
            Expression::integer(2),
        );
        assert_eq!(
            expression.to_string(),
            "(BinaryExpression + (BinaryExpression * (IntegerLiteral 2) (IntegerLiteral 2)) (IntegerLiteral 2))",
        );
    }

    #[test]
    fn canonical_form_absent_subterms() {
        let statement = Statement::If {
            condition: Expression::bool(true),
            consequent: Box::new(Statement::expression(Expression::integer(1))),
            alternate: None,
        };
        assert_eq!(
            statement.to_string(),
            "(IfStatement (BoolLiteral true) (ExpressionStatement (IntegerLiteral 1)) <nil>)",
        );

        let statement = Statement::For {
            initializer: None,
            condition: None,
            iterator: None,
            body: Box::new(Statement::expression(Expression::identifier("x"))),
        };
        assert_eq!(
            statement.to_string(),
            "(ForStatement <nil> <nil> <nil> (ExpressionStatement (Identifier x)))",
        );
    }

    #[test]
    fn canonical_form_variable_statement() {
        let statement = Statement::Variable(VariableStatement::new(vec![
            VariableDeclaration::new(Identifier::new("x"), None),
            VariableDeclaration::new(Identifier::new("y"), Some(Expression::integer(42))),
        ]));
        assert_eq!(
            statement.to_string(),
            "(VariableStatement (VariableDeclaration (Identifier x) <nil>) \
             (VariableDeclaration (Identifier y) (IntegerLiteral 42)))",
        );
    }

    #[test]
    fn canonical_form_empty_program() {
        assert_eq!(Program::default().to_string(), "(Program)");
    }

    #[test]
    fn json_tags_every_node() {
        let program = Program::new(vec![Statement::expression(Expression::binary(
            "+",
            Expression::integer(40),
            Expression::integer(2),
        ))]);

        let value = serde_json::to_value(&program).expect("serializes");
        assert_eq!(
            value,
            json!({
                "type": "Program",
                "statements": [{
                    "type": "ExpressionStatement",
                    "expression": {
                        "type": "BinaryExpression",
                        "operator": "+",
                        "left": {"type": "IntegerLiteral", "value": 40},
                        "right": {"type": "IntegerLiteral", "value": 2},
                    },
                }],
            }),
        );
    }

    #[test]
    fn json_absent_subterms_are_null() {
        let statement = Statement::If {
            condition: Expression::bool(false),
            consequent: Box::new(Statement::expression(Expression::null())),
            alternate: None,
        };
        let value = serde_json::to_value(&statement).expect("serializes");
        assert_eq!(value["type"], "IfStatement");
        assert_eq!(value["alternate"], serde_json::Value::Null);

        // The null literal keeps the literal convention: an explicit
        // "value": null field, not just the type tag.
        let node = value["consequent"]["expression"]
            .as_object()
            .expect("null literal serializes as an object");
        assert_eq!(node["type"], "NullLiteral");
        assert!(node.contains_key("value"));
        assert_eq!(node["value"], serde_json::Value::Null);
    }

    #[test]
    fn json_for_initializer_variants() {
        let with_let = Statement::For {
            initializer: Some(ForInit::Variable(VariableStatement::new(vec![
                VariableDeclaration::new(Identifier::new("i"), Some(Expression::integer(0))),
            ]))),
            condition: None,
            iterator: None,
            body: Box::new(Statement::expression(Expression::identifier("i"))),
        };
        let value = serde_json::to_value(&with_let).expect("serializes");
        assert_eq!(value["initializer"]["type"], "VariableStatement");

        let with_expression = Statement::For {
            initializer: Some(ForInit::Expression(Expression::assignment(
                "=",
                Expression::identifier("i"),
                Expression::integer(0),
            ))),
            condition: None,
            iterator: None,
            body: Box::new(Statement::expression(Expression::identifier("i"))),
        };
        let value = serde_json::to_value(&with_expression).expect("serializes");
        assert_eq!(value["initializer"]["type"], "AssignmentExpression");
    }
}
