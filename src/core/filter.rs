//! Structured filters and their compilation into SQL boolean expressions
//!
//! A [`Filter`] maps field names to either a literal (equality) or a bag of
//! operators. Fields and operators keep their insertion order, so
//! compilation is deterministic.
//!
//! ```
//! use rust_orm_system::core::filter::Filter;
//!
//! let filter = Filter::new().eq("a", 1).gt("b", 5);
//! assert_eq!(filter.compile().unwrap(), "`a` = \"1\" AND `b` > \"5\"");
//! ```

use super::codec::{quote_identifier, quoted_literal, sql_text};
use super::error::{DatabaseError, Result};
use super::value::DatabaseValue;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Greater than (`$gt`)
    Gt,
    /// Less than (`$lt`)
    Lt,
    /// Greater than or equal (`$gte`)
    Gte,
    /// Less than or equal (`$lte`)
    Lte,
    /// Not equal (`$ne`)
    Ne,
    /// Set membership (`$in`)
    In,
}

impl Operator {
    /// Operator key as written in JSON filters
    pub fn key(&self) -> &'static str {
        match self {
            Operator::Gt => "$gt",
            Operator::Lt => "$lt",
            Operator::Gte => "$gte",
            Operator::Lte => "$lte",
            Operator::Ne => "$ne",
            Operator::In => "$in",
        }
    }

    fn as_sql(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Ne => "!=",
            Operator::In => "IN",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "$gt" => Some(Operator::Gt),
            "$lt" => Some(Operator::Lt),
            "$gte" => Some(Operator::Gte),
            "$lte" => Some(Operator::Lte),
            "$ne" => Some(Operator::Ne),
            "$in" => Some(Operator::In),
            _ => None,
        }
    }
}

/// Operand of an operator: a single value, or a list for `$in`
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Single value
    Value(DatabaseValue),
    /// List of values
    List(Vec<DatabaseValue>),
}

/// What a single field is matched against
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Equality with a literal
    Eq(DatabaseValue),
    /// Operator bag, in insertion order; each operator appears at most once
    Ops(Vec<(Operator, Operand)>),
}

/// Ordered field → selector mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<(String, Selector)>,
}

impl Filter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `field` equal to `value`, replacing any earlier selector on it
    #[must_use]
    pub fn eq(mut self, field: &str, value: impl Into<DatabaseValue>) -> Self {
        let selector = Selector::Eq(value.into());
        match self.position(field) {
            Some(i) => self.terms[i].1 = selector,
            None => self.terms.push((field.to_string(), selector)),
        }
        self
    }

    /// Add `field > value`
    #[must_use]
    pub fn gt(self, field: &str, value: impl Into<DatabaseValue>) -> Self {
        self.op(field, Operator::Gt, Operand::Value(value.into()))
    }

    /// Add `field < value`
    #[must_use]
    pub fn lt(self, field: &str, value: impl Into<DatabaseValue>) -> Self {
        self.op(field, Operator::Lt, Operand::Value(value.into()))
    }

    /// Add `field >= value`
    #[must_use]
    pub fn gte(self, field: &str, value: impl Into<DatabaseValue>) -> Self {
        self.op(field, Operator::Gte, Operand::Value(value.into()))
    }

    /// Add `field <= value`
    #[must_use]
    pub fn lte(self, field: &str, value: impl Into<DatabaseValue>) -> Self {
        self.op(field, Operator::Lte, Operand::Value(value.into()))
    }

    /// Add `field != value`
    #[must_use]
    pub fn ne(self, field: &str, value: impl Into<DatabaseValue>) -> Self {
        self.op(field, Operator::Ne, Operand::Value(value.into()))
    }

    /// Add `field IN (values)`
    #[must_use]
    pub fn is_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<DatabaseValue>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.op(field, Operator::In, Operand::List(list))
    }

    /// Add an operator on `field`
    ///
    /// An equality selector on the same field is replaced by an operator
    /// bag; repeating an operator overwrites its operand in place.
    #[must_use]
    pub fn op(mut self, field: &str, operator: Operator, operand: Operand) -> Self {
        let index = match self.position(field) {
            Some(i) => i,
            None => {
                self.terms
                    .push((field.to_string(), Selector::Ops(Vec::new())));
                self.terms.len() - 1
            }
        };

        let selector = &mut self.terms[index].1;
        if let Selector::Eq(_) = selector {
            *selector = Selector::Ops(Vec::new());
        }
        if let Selector::Ops(ops) = selector {
            match ops.iter_mut().find(|(existing, _)| *existing == operator) {
                Some(entry) => entry.1 = operand,
                None => ops.push((operator, operand)),
            }
        }
        self
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.terms.iter().position(|(name, _)| name == field)
    }

    /// Whether the filter has no fields
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Field/selector pairs in insertion order
    pub fn terms(&self) -> &[(String, Selector)] {
        &self.terms
    }

    /// Parse a Mongo-style JSON object
    ///
    /// `{"a": 1, "b": {"$gt": 5, "$in": [1, 2]}}`. Key order is preserved.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| DatabaseError::invalid_filter("filter must be a JSON object"))?;

        let mut filter = Filter::new();
        for (field, selector) in object {
            filter = match selector {
                serde_json::Value::Object(ops) => {
                    let mut filter = filter;
                    for (key, operand) in ops {
                        let operator = Operator::from_key(key).ok_or_else(|| {
                            DatabaseError::invalid_filter(format!(
                                "unknown operator `{key}` on field `{field}`"
                            ))
                        })?;
                        filter = filter.op(field, operator, json_operand(field, operator, operand)?);
                    }
                    filter
                }
                scalar => filter.eq(field, json_scalar(field, scalar)?),
            };
        }
        Ok(filter)
    }

    /// Compile into a SQL boolean expression
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::EmptyFilterSet`] when an `$in` list is empty
    /// after dropping falsy entries.
    pub fn compile(&self) -> Result<String> {
        let mut terms = Vec::with_capacity(self.terms.len());
        for (field, selector) in &self.terms {
            let column = quote_identifier(field);
            match selector {
                Selector::Eq(DatabaseValue::Null) => terms.push(format!("{column} IS NULL")),
                Selector::Eq(value) => terms.push(format!("{column} = {}", quoted_literal(value))),
                Selector::Ops(ops) => {
                    for (operator, operand) in ops {
                        terms.push(compile_op(field, &column, *operator, operand)?);
                    }
                }
            }
        }
        Ok(terms.join(" AND "))
    }
}

fn compile_op(field: &str, column: &str, operator: Operator, operand: &Operand) -> Result<String> {
    match (operator, operand) {
        (Operator::In, Operand::List(values)) => {
            let kept: Vec<String> = values
                .iter()
                .filter(|v| v.is_truthy())
                .map(sql_text)
                .collect();
            if kept.is_empty() {
                return Err(DatabaseError::empty_filter_set(field));
            }
            Ok(format!("{column} IN ({})", kept.join(", ")))
        }
        (Operator::In, Operand::Value(value)) => {
            compile_op(field, column, operator, &Operand::List(vec![value.clone()]))
        }
        // operator values are not quote-escaped
        (_, Operand::Value(value)) => Ok(format!(
            "{column} {} \"{}\"",
            operator.as_sql(),
            sql_text(value)
        )),
        (_, Operand::List(_)) => Err(DatabaseError::invalid_filter(format!(
            "`{}` on field `{field}` takes a single value",
            operator.key()
        ))),
    }
}

fn json_scalar(field: &str, value: &serde_json::Value) -> Result<DatabaseValue> {
    DatabaseValue::from_json(value).ok_or_else(|| {
        DatabaseError::invalid_filter(format!("field `{field}` must be a scalar or operator object"))
    })
}

fn json_operand(field: &str, operator: Operator, value: &serde_json::Value) -> Result<Operand> {
    match (operator, value) {
        (Operator::In, serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| json_scalar(field, item))
            .collect::<Result<Vec<_>>>()
            .map(Operand::List),
        _ => json_scalar(field, value).map(Operand::Value),
    }
}
