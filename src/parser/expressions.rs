//! Filter compilation.
//!
//! A `Filter` is compiled once into a `CompiledFilter` tree, which is then
//! interpreted against each feature's attributes. Literals are pre-parsed
//! and `like` patterns tokenized at compile time; evaluation is a single
//! walk over the tree.

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::{StyleError, StyleResult};
use crate::native::AttributeSource;
use crate::style::{CombinationOperator, ComparisonOperator, Filter};

static NULL: Value = Value::Null;

/// Ordering/equality test applied to one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Literal operand with its numeric reading cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
    number: Option<f64>,
}

impl Literal {
    fn new(value: Value) -> Self {
        let number = as_number(&value);
        Self { value, number }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Executable predicate over a feature's attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledFilter {
    Compare {
        op: CompareOp,
        property: String,
        literal: Literal,
    },
    Like {
        property: String,
        pattern: LikePattern,
    },
    All(Vec<CompiledFilter>),
    Any(Vec<CompiledFilter>),
    Not(Box<CompiledFilter>),
}

impl CompiledFilter {
    /// Evaluate against one feature. Pure; safe to call from any thread.
    pub fn matches<A: AttributeSource + ?Sized>(&self, attrs: &A) -> bool {
        match self {
            CompiledFilter::Compare { op, property, literal } => {
                let attr = attrs.attribute(property).unwrap_or(&NULL);
                compare(*op, attr, literal)
            }
            CompiledFilter::Like { property, pattern } => match attrs.attribute(property) {
                Some(Value::String(s)) => pattern.matches(s),
                Some(v @ (Value::Number(_) | Value::Bool(_))) => pattern.matches(&v.to_string()),
                _ => false,
            },
            CompiledFilter::All(filters) => filters.iter().all(|f| f.matches(attrs)),
            CompiledFilter::Any(filters) => filters.iter().any(|f| f.matches(attrs)),
            CompiledFilter::Not(inner) => !inner.matches(attrs),
        }
    }
}

/// Compile a filter tree into a predicate.
pub fn compile_filter(filter: &Filter) -> StyleResult<CompiledFilter> {
    let compiled = compile_node(filter)?;
    log::debug!("compiled filter with {} node(s)", filter.size());
    Ok(compiled)
}

/// Decode a raw filter tuple and compile it.
pub fn compile_filter_value(value: &Value) -> StyleResult<CompiledFilter> {
    compile_filter(&Filter::from_value(value)?)
}

fn compile_node(filter: &Filter) -> StyleResult<CompiledFilter> {
    let compiled = match filter {
        Filter::Comparison { op, property, value } => match compare_op(*op) {
            Some(op) => CompiledFilter::Compare {
                op,
                property: property.clone(),
                literal: Literal::new(value.clone()),
            },
            None => {
                let pattern = value.as_str().ok_or_else(|| {
                    StyleError::invalid_filter(format!(
                        "like pattern for {} must be a string, got {}",
                        property, value
                    ))
                })?;
                CompiledFilter::Like {
                    property: property.clone(),
                    pattern: LikePattern::compile(pattern),
                }
            }
        },
        Filter::Between { property, lower, upper } => CompiledFilter::All(vec![
            CompiledFilter::Compare {
                op: CompareOp::Ge,
                property: property.clone(),
                literal: Literal::new(lower.clone()),
            },
            CompiledFilter::Compare {
                op: CompareOp::Le,
                property: property.clone(),
                literal: Literal::new(upper.clone()),
            },
        ]),
        Filter::Combination { op, filters } => {
            let compiled = filters.iter().map(compile_node).collect::<StyleResult<Vec<_>>>()?;
            match op {
                CombinationOperator::And => CompiledFilter::All(compiled),
                CombinationOperator::Or => CompiledFilter::Any(compiled),
            }
        }
        Filter::Not(inner) => CompiledFilter::Not(Box::new(compile_node(inner)?)),
    };
    Ok(compiled)
}

/// `None` for `like`, which is matched by pattern instead.
fn compare_op(op: ComparisonOperator) -> Option<CompareOp> {
    match op {
        ComparisonOperator::Equal => Some(CompareOp::Eq),
        ComparisonOperator::NotEqual => Some(CompareOp::Ne),
        ComparisonOperator::Less => Some(CompareOp::Lt),
        ComparisonOperator::LessOrEqual => Some(CompareOp::Le),
        ComparisonOperator::Greater => Some(CompareOp::Gt),
        ComparisonOperator::GreaterOrEqual => Some(CompareOp::Ge),
        ComparisonOperator::Like => None,
    }
}

fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

// Missing attributes arrive here as Null.
fn compare(op: CompareOp, attr: &Value, literal: &Literal) -> bool {
    match op {
        CompareOp::Eq => values_equal(attr, literal),
        CompareOp::Ne => !values_equal(attr, literal),
        CompareOp::Lt => matches!(order(attr, literal), Some(Ordering::Less)),
        CompareOp::Le => matches!(order(attr, literal), Some(Ordering::Less | Ordering::Equal)),
        CompareOp::Gt => matches!(order(attr, literal), Some(Ordering::Greater)),
        CompareOp::Ge => matches!(order(attr, literal), Some(Ordering::Greater | Ordering::Equal)),
    }
}

fn values_equal(attr: &Value, literal: &Literal) -> bool {
    match (attr, &literal.value) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(_), _) | (_, Value::Number(_)) => {
            match (as_number(attr), literal.number) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        _ => false,
    }
}

fn order(attr: &Value, literal: &Literal) -> Option<Ordering> {
    match (attr, &literal.value) {
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Number(_), _) | (_, Value::Number(_)) => as_number(attr)?.partial_cmp(&literal.number?),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    Char(char),
    AnyChar,
    AnyRun,
}

/// Tokenized wildcard pattern: `*` any run, `.` one character, `!` escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    tokens: Vec<LikeToken>,
}

impl LikePattern {
    pub fn compile(pattern: &str) -> Self {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                '*' => {
                    if tokens.last() == Some(&LikeToken::AnyRun) {
                        continue;
                    }
                    LikeToken::AnyRun
                }
                '.' => LikeToken::AnyChar,
                '!' => LikeToken::Char(chars.next().unwrap_or('!')),
                other => LikeToken::Char(other),
            };
            tokens.push(token);
        }
        Self { tokens }
    }

    pub fn matches(&self, text: &str) -> bool {
        let char_at = |at: usize| text[at..].chars().next();
        // Byte offsets into `text`, token index into the pattern.
        let (mut t, mut p) = (0usize, 0usize);
        // Last `*` seen and the byte offset it is currently absorbing up to.
        let mut backtrack: Option<(usize, usize)> = None;

        while let Some(ch) = char_at(t) {
            match self.tokens.get(p) {
                Some(LikeToken::AnyRun) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some(LikeToken::AnyChar) => {
                    t += ch.len_utf8();
                    p += 1;
                }
                Some(LikeToken::Char(c)) if *c == ch => {
                    t += ch.len_utf8();
                    p += 1;
                }
                _ => match backtrack {
                    Some((star, absorbed)) => {
                        let resume = absorbed + char_at(absorbed).map_or(1, char::len_utf8);
                        backtrack = Some((star, resume));
                        p = star + 1;
                        t = resume;
                    }
                    None => return false,
                },
            }
        }
        self.tokens[p..].iter().all(|tok| *tok == LikeToken::AnyRun)
    }
}
