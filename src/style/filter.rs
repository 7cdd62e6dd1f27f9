//! Filter expression trees.
//!
//! On the wire a filter is a tuple whose first element is the operator:
//!
//! - comparison: `["==", "NAME", "New York"]`
//! - combination: `["&&", filter, filter, ...]`
//! - negation: `["!", filter]`
//! - range: `["<=x<=", "POP", 10, 100]`
//!
//! Long operator names (`PropertyIsEqualTo`, `And`, `Not`, ...) are accepted
//! on decode; encoding always emits the symbolic form.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{StyleError, StyleResult};

/// Attribute comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    /// Wildcard match: `*` any run, `.` one character, `!` escape.
    Like,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ComparisonOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::Like => "*=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterOrEqual => ">=",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "==" | "PropertyIsEqualTo" => ComparisonOperator::Equal,
            "!=" | "PropertyIsNotEqualTo" => ComparisonOperator::NotEqual,
            "*=" | "PropertyIsLike" => ComparisonOperator::Like,
            "<" | "PropertyIsLessThan" => ComparisonOperator::Less,
            "<=" | "PropertyIsLessThanOrEqualTo" => ComparisonOperator::LessOrEqual,
            ">" | "PropertyIsGreaterThan" => ComparisonOperator::Greater,
            ">=" | "PropertyIsGreaterThanOrEqualTo" => ComparisonOperator::GreaterOrEqual,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinationOperator {
    And,
    Or,
}

impl CombinationOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            CombinationOperator::And => "&&",
            CombinationOperator::Or => "||",
        }
    }
}

impl fmt::Display for CombinationOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

const NOT_TOKENS: [&str; 2] = ["!", "Not"];
const BETWEEN_TOKENS: [&str; 2] = ["<=x<=", "PropertyIsBetween"];
const IS_NULL_TOKEN: &str = "PropertyIsNull";

/// Boolean expression over feature attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Comparison {
        op: ComparisonOperator,
        property: String,
        value: Value,
    },
    /// `lower <= property <= upper`
    Between {
        property: String,
        lower: Value,
        upper: Value,
    },
    Combination {
        op: CombinationOperator,
        filters: Vec<Filter>,
    },
    Not(Box<Filter>),
}

impl Filter {
    pub fn compare(op: ComparisonOperator, property: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Comparison {
            op,
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn eq(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(ComparisonOperator::Equal, property, value)
    }

    pub fn ne(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(ComparisonOperator::NotEqual, property, value)
    }

    pub fn like(property: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Like, property, pattern.into())
    }

    pub fn lt(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(ComparisonOperator::Less, property, value)
    }

    pub fn le(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(ComparisonOperator::LessOrEqual, property, value)
    }

    pub fn gt(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(ComparisonOperator::Greater, property, value)
    }

    pub fn ge(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(ComparisonOperator::GreaterOrEqual, property, value)
    }

    /// Equality with null; a missing attribute counts as null.
    pub fn is_null(property: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Equal, property, Value::Null)
    }

    pub fn between(property: impl Into<String>, lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Filter::Between {
            property: property.into(),
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::Combination {
            op: CombinationOperator::And,
            filters,
        }
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Combination {
            op: CombinationOperator::Or,
            filters,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(filter: Filter) -> Self {
        Filter::Not(Box::new(filter))
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Filter::Comparison { .. } | Filter::Between { .. } => 1,
            Filter::Combination { filters, .. } => 1 + filters.iter().map(Filter::size).sum::<usize>(),
            Filter::Not(inner) => 1 + inner.size(),
        }
    }

    /// Decode a filter tuple.
    pub fn from_value(value: &Value) -> StyleResult<Self> {
        let arr = value
            .as_array()
            .ok_or_else(|| StyleError::invalid_filter(format!("expected a tuple, got {}", value)))?;
        let token = match arr.first() {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(StyleError::invalid_filter(format!(
                    "operator must be a string, got {}",
                    other
                )))
            }
            None => return Err(StyleError::invalid_filter("empty filter tuple")),
        };
        let args = &arr[1..];

        if let Some(op) = ComparisonOperator::from_token(token) {
            expect_arity(token, args, 2)?;
            return Ok(Filter::Comparison {
                op,
                property: property_name(token, &args[0])?,
                value: args[1].clone(),
            });
        }
        if token == IS_NULL_TOKEN {
            expect_arity(token, args, 1)?;
            return Ok(Filter::is_null(property_name(token, &args[0])?));
        }
        if BETWEEN_TOKENS.contains(&token) {
            expect_arity(token, args, 3)?;
            return Ok(Filter::Between {
                property: property_name(token, &args[0])?,
                lower: args[1].clone(),
                upper: args[2].clone(),
            });
        }
        if NOT_TOKENS.contains(&token) {
            expect_arity(token, args, 1)?;
            return Ok(Filter::not(Filter::from_value(&args[0])?));
        }
        let combinator = match token {
            "&&" | "And" => Some(CombinationOperator::And),
            "||" | "Or" => Some(CombinationOperator::Or),
            _ => None,
        };
        if let Some(op) = combinator {
            let filters = args.iter().map(Filter::from_value).collect::<StyleResult<Vec<_>>>()?;
            return Ok(Filter::Combination { op, filters });
        }

        Err(StyleError::unsupported_operator(token))
    }

    /// Encode as a filter tuple.
    pub fn to_value(&self) -> Value {
        match self {
            Filter::Comparison { op, property, value } => {
                Value::Array(vec![op.symbol().into(), property.clone().into(), value.clone()])
            }
            Filter::Between { property, lower, upper } => Value::Array(vec![
                BETWEEN_TOKENS[0].into(),
                property.clone().into(),
                lower.clone(),
                upper.clone(),
            ]),
            Filter::Combination { op, filters } => {
                let mut arr = Vec::with_capacity(filters.len() + 1);
                arr.push(Value::from(op.symbol()));
                arr.extend(filters.iter().map(Filter::to_value));
                Value::Array(arr)
            }
            Filter::Not(inner) => Value::Array(vec![NOT_TOKENS[0].into(), inner.to_value()]),
        }
    }
}

fn expect_arity(token: &str, args: &[Value], n: usize) -> StyleResult<()> {
    if args.len() != n {
        return Err(StyleError::invalid_filter(format!(
            "{} expects {} operand(s), got {}",
            token,
            n,
            args.len()
        )));
    }
    Ok(())
}

fn property_name(token: &str, v: &Value) -> StyleResult<String> {
    v.as_str().map(str::to_string).ok_or_else(|| {
        StyleError::invalid_filter(format!("{}: property name must be a string, got {}", token, v))
    })
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Filter::from_value(&value).map_err(serde::de::Error::custom)
    }
}
