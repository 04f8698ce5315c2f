//! SQL output formatting.
//!
//! Rendering an [`Instruction`] yields SQL that lexes and parses back to an
//! equal instruction.

use alloc::string::{String, ToString};
use core::fmt::{self, Display, Write};

use crate::ast::{
    AttributeRef, ColumnDefinition, CreateTable, DataType, Delete, Insert, Instruction,
    JoinClause, Literal, Number, Operator, Predicate, Select,
};
use crate::lexer::Keyword;

/// Trait for types that can be formatted as SQL statements.
pub trait FormatSql {
    /// Format this value as a SQL string.
    fn format_sql(&self) -> String;
}

impl<T: Display> FormatSql for T {
    fn format_sql(&self) -> String {
        self.to_string()
    }
}

/// An identifier, written bare when it lexes back as the same identifier.
struct Ident<'a>(&'a str);

impl Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = self.0.bytes();
        let plain = bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
            && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
            && Keyword::lookup(self.0).is_none();
        if plain {
            f.write_str(self.0)
        } else {
            write_quoted(f, self.0, '"')
        }
    }
}

/// Write `value` between `quote`s, doubling embedded quotes.
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str, quote: char) -> fmt::Result {
    f.write_char(quote)?;
    for c in value.chars() {
        if c == quote {
            f.write_char(quote)?;
        }
        f.write_char(c)?;
    }
    f.write_char(quote)
}

/// Write `items` separated by `", "`.
fn write_list<T: Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(v) => write!(f, "{v}"),
            Number::Real(v) => {
                // Keep a decimal point so the value is read back as Real
                let s = alloc::format!("{v}");
                if s.contains('.') {
                    f.write_str(&s)
                } else {
                    write!(f, "{s}.0")
                }
            }
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Text(s) => write_quoted(f, s, '\''),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            DataType::Int => Keyword::Int,
            DataType::Text => Keyword::Text,
            DataType::Date => Keyword::Date,
        };
        write!(f, "{keyword}")
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equals => f.write_str("="),
        }
    }
}

impl Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table_qualifier {
            write!(f, "{}.", Ident(table))?;
        }
        if self.is_wildcard {
            f.write_str("*")
        } else {
            write!(f, "{}", Ident(&self.name))
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Literal(literal) => write!(f, "{literal}"),
            Predicate::Comparison {
                left,
                operator,
                right,
            } => write!(f, "{left} {operator} {right}"),
        }
    }
}

impl Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Ident(&self.name), self.data_type)?;
        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        Ok(())
    }
}

impl Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TABLE {} (", Ident(&self.table_name))?;
        write_list(f, &self.columns)?;
        f.write_str(")")
    }
}

impl Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JOIN {} ON {} = {}",
            Ident(&self.joined_table),
            self.left_attr,
            self.right_attr
        )
    }
}

impl Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        write_list(f, &self.attributes)?;
        write!(f, " FROM {}", Ident(&self.table_name))?;
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        if let Some(predicate) = &self.predicate {
            write!(f, " WHERE {predicate}")?;
        }
        Ok(())
    }
}

impl Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} (", Ident(&self.table_name))?;
        write_list(f, self.columns.iter().map(|column| Ident(column)))?;
        f.write_str(") VALUES (")?;
        write_list(f, &self.values)?;
        f.write_str(")")
    }
}

impl Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", Ident(&self.table_name))?;
        if let Some(predicate) = &self.predicate {
            write!(f, " WHERE {predicate}")?;
        }
        Ok(())
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::CreateTable(create) => write!(f, "{create}"),
            Instruction::Select(select) => write!(f, "{select}"),
            Instruction::Insert(insert) => write!(f, "{insert}"),
            Instruction::Delete(delete) => write!(f, "{delete}"),
        }
    }
}
