//! Typed instructions produced by the parser.
//!
//! Every statement of the input becomes one [`Instruction`]. The types here
//! are plain owned data: they carry no reference to the source text and are
//! handed over to whatever executes them.

use alloc::string::String;
use alloc::vec::Vec;

/// A parsed top-level statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instruction {
    /// CREATE TABLE statement.
    CreateTable(CreateTable),
    /// SELECT statement.
    Select(Select),
    /// INSERT statement.
    Insert(Insert),
    /// DELETE statement.
    Delete(Delete),
}

/// The statement kind of an [`Instruction`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstructionKind {
    /// CREATE TABLE statement.
    CreateTable,
    /// SELECT statement.
    Select,
    /// INSERT statement.
    Insert,
    /// DELETE statement.
    Delete,
}

impl Instruction {
    /// Returns the table the statement targets.
    ///
    /// For a SELECT this is the table of the FROM clause.
    #[must_use]
    pub fn table_name(&self) -> &str {
        match self {
            Instruction::CreateTable(create) => &create.table_name,
            Instruction::Select(select) => &select.table_name,
            Instruction::Insert(insert) => &insert.table_name,
            Instruction::Delete(delete) => &delete.table_name,
        }
    }

    /// Returns the statement kind.
    #[must_use]
    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::CreateTable(_) => InstructionKind::CreateTable,
            Instruction::Select(_) => InstructionKind::Select,
            Instruction::Insert(_) => InstructionKind::Insert,
            Instruction::Delete(_) => InstructionKind::Delete,
        }
    }
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTable {
    /// Table name.
    pub table_name: String,
    /// Column definitions, in declaration order.
    pub columns: Vec<ColumnDefinition>,
}

impl CreateTable {
    /// Iterate over the columns declared `PRIMARY KEY`.
    pub fn primary_key(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|column| column.primary_key)
    }
}

/// A column definition in CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Declared column type.
    pub data_type: DataType,
    /// Whether this column is marked as PRIMARY KEY.
    pub primary_key: bool,
}

/// The column types the language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// INT
    Int,
    /// TEXT
    Text,
    /// DATE
    Date,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Select {
    /// Table of the FROM clause.
    pub table_name: String,
    /// Projected attributes, in order.
    pub attributes: Vec<AttributeRef>,
    /// JOIN clauses, in order.
    pub joins: Vec<JoinClause>,
    /// WHERE clause.
    pub predicate: Option<Predicate>,
}

impl Select {
    /// Whether the projection is a lone unqualified `*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(
            self.attributes.as_slice(),
            [AttributeRef { table_qualifier: None, is_wildcard: true, .. }]
        )
    }
}

/// A reference to an attribute, possibly qualified by a table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeRef {
    /// The table the attribute is qualified with.
    pub table_qualifier: Option<String>,
    /// The attribute name; `*` for wildcards.
    pub name: String,
    /// Whether this is `*` or `table.*`.
    pub is_wildcard: bool,
}

impl AttributeRef {
    /// An unqualified attribute.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table_qualifier: None,
            name: name.into(),
            is_wildcard: false,
        }
    }

    /// A `table.attribute` reference.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table_qualifier: Some(table.into()),
            name: name.into(),
            is_wildcard: false,
        }
    }

    /// A `*` or `table.*` wildcard.
    #[must_use]
    pub fn wildcard(table: Option<String>) -> Self {
        Self {
            table_qualifier: table,
            name: "*".into(),
            is_wildcard: true,
        }
    }
}

/// An equality join: `JOIN joined_table ON left_attr = right_attr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinClause {
    /// The table being joined.
    pub joined_table: String,
    /// Left side of the join condition.
    pub left_attr: AttributeRef,
    /// Right side of the join condition.
    pub right_attr: AttributeRef,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insert {
    /// Table name.
    pub table_name: String,
    /// Column names; always as many as `values`.
    pub columns: Vec<String>,
    /// Values to insert.
    pub values: Vec<Literal>,
}

impl Insert {
    /// Iterate over `(column, value)` pairs.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.columns.iter().map(String::as_str).zip(&self.values)
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delete {
    /// Table name.
    pub table_name: String,
    /// WHERE clause.
    pub predicate: Option<Predicate>,
}

/// The condition of a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predicate {
    /// A lone literal, tested for truthiness (`WHERE 1`).
    Literal(Literal),
    /// `attribute = literal`.
    Comparison {
        /// Attribute being compared.
        left: AttributeRef,
        /// Comparison operator.
        operator: Operator,
        /// Value compared against.
        right: Literal,
    },
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// `=`
    Equals,
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    /// Numeric value.
    Number(Number),
    /// Text/string value.
    Text(String),
}

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    /// A whole number that fits in an `i64`.
    Integer(i64),
    /// Any other number.
    Real(f64),
}

impl Number {
    /// Convert a numeric lexeme (`digits` or `digits.digits`).
    ///
    /// Integers too large for `i64` fall back to `Real`.
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        if !lexeme.contains('.') {
            if let Ok(v) = lexeme.parse::<i64>() {
                return Some(Number::Integer(v));
            }
        }
        lexeme.parse::<f64>().ok().map(Number::Real)
    }
}
