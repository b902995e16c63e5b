//! Predicate trees and their three-valued evaluation.
//!
//! Comparisons read a single field from a row through a named accessor and
//! test it against caller-supplied literals. Evaluation is explicitly
//! three-state: a comparison touching a null collapses to "unknown", and
//! unknown collapses to `false` only at the filter boundary. Null handling
//! never raises.

use std::fmt;

use crate::query::value::Value;

/// Named accessor extracting one field from a row as a [`Value`].
///
/// The name is carried for diagnostics only; evaluation goes through the
/// function pointer. Declaring accessors at the call site keeps every
/// projection and predicate shape explicitly typed.
pub struct FieldRef<R> {
    name: &'static str,
    get: fn(&R) -> Value,
}

impl<R> FieldRef<R> {
    /// Creates a named field accessor.
    pub fn new(name: &'static str, get: fn(&R) -> Value) -> Self {
        Self { name, get }
    }

    /// The field name this accessor was declared with.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from `row`.
    pub fn extract(&self, row: &R) -> Value {
        (self.get)(row)
    }
}

impl<R> Clone for FieldRef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldRef<R> {}

impl<R> fmt::Debug for FieldRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldRef({})", self.name)
    }
}

/// Three-state evaluation result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Truth {
    /// The predicate holds.
    True,
    /// The predicate does not hold.
    False,
    /// A null was involved; the comparison carries no information.
    Unknown,
}

impl Truth {
    /// Lifts a two-state bool into the three-state domain.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }

    /// Collapses unknown to `false`, the filter-boundary convention.
    pub fn collapse(self) -> bool {
        matches!(self, Truth::True)
    }

    fn negate(self) -> Self {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Unknown => Truth::Unknown,
        }
    }
}

/// Comparison leaf testing one field against literals.
#[derive(Clone, Debug)]
pub enum Comparison<R> {
    /// Field equals the literal.
    Eq {
        /// Field under test.
        field: FieldRef<R>,
        /// Literal to compare against.
        value: Value,
    },
    /// Field differs from the literal.
    Ne {
        /// Field under test.
        field: FieldRef<R>,
        /// Literal to compare against.
        value: Value,
    },
    /// Field orders strictly below the literal.
    Lt {
        /// Field under test.
        field: FieldRef<R>,
        /// Literal to compare against.
        value: Value,
    },
    /// Field orders at or below the literal.
    Le {
        /// Field under test.
        field: FieldRef<R>,
        /// Literal to compare against.
        value: Value,
    },
    /// Field orders strictly above the literal.
    Gt {
        /// Field under test.
        field: FieldRef<R>,
        /// Literal to compare against.
        value: Value,
    },
    /// Field orders at or above the literal.
    Ge {
        /// Field under test.
        field: FieldRef<R>,
        /// Literal to compare against.
        value: Value,
    },
    /// Field is a member of the literal set.
    In {
        /// Field under test.
        field: FieldRef<R>,
        /// Caller-supplied membership set; null entries are ignored.
        values: Vec<Value>,
    },
    /// Field is null.
    IsNull {
        /// Field under test.
        field: FieldRef<R>,
    },
    /// Field is present and not null.
    IsNotNull {
        /// Field under test.
        field: FieldRef<R>,
    },
}

/// Boolean predicate tree over rows of type `R`.
#[derive(Clone, Debug)]
pub enum Predicate<R> {
    /// Comparison leaf.
    Cmp(Comparison<R>),
    /// Logical AND; children evaluate left-to-right with short-circuit.
    And(Vec<Predicate<R>>),
    /// Logical OR; children evaluate left-to-right with short-circuit.
    Or(Vec<Predicate<R>>),
    /// Logical NOT; unknown stays unknown.
    Not(Box<Predicate<R>>),
}

impl<R> Predicate<R> {
    /// Equality leaf.
    pub fn eq(field: FieldRef<R>, value: impl Into<Value>) -> Self {
        Predicate::Cmp(Comparison::Eq {
            field,
            value: value.into(),
        })
    }

    /// Inequality leaf.
    pub fn ne(field: FieldRef<R>, value: impl Into<Value>) -> Self {
        Predicate::Cmp(Comparison::Ne {
            field,
            value: value.into(),
        })
    }

    /// Strict less-than leaf.
    pub fn lt(field: FieldRef<R>, value: impl Into<Value>) -> Self {
        Predicate::Cmp(Comparison::Lt {
            field,
            value: value.into(),
        })
    }

    /// Less-than-or-equal leaf.
    pub fn le(field: FieldRef<R>, value: impl Into<Value>) -> Self {
        Predicate::Cmp(Comparison::Le {
            field,
            value: value.into(),
        })
    }

    /// Strict greater-than leaf.
    pub fn gt(field: FieldRef<R>, value: impl Into<Value>) -> Self {
        Predicate::Cmp(Comparison::Gt {
            field,
            value: value.into(),
        })
    }

    /// Greater-than-or-equal leaf.
    pub fn ge(field: FieldRef<R>, value: impl Into<Value>) -> Self {
        Predicate::Cmp(Comparison::Ge {
            field,
            value: value.into(),
        })
    }

    /// Set-membership leaf against a caller-supplied literal set.
    pub fn in_list<I, V>(field: FieldRef<R>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::Cmp(Comparison::In {
            field,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Null-check leaf; true only when the field is null.
    pub fn is_null(field: FieldRef<R>) -> Self {
        Predicate::Cmp(Comparison::IsNull { field })
    }

    /// Not-null-check leaf.
    pub fn is_not_null(field: FieldRef<R>) -> Self {
        Predicate::Cmp(Comparison::IsNotNull { field })
    }

    /// Conjunction of the supplied predicates.
    pub fn and(children: Vec<Predicate<R>>) -> Self {
        Predicate::And(children)
    }

    /// Disjunction of the supplied predicates.
    pub fn or(children: Vec<Predicate<R>>) -> Self {
        Predicate::Or(children)
    }

    /// Negation of the supplied predicate.
    pub fn not(child: Predicate<R>) -> Self {
        Predicate::Not(Box::new(child))
    }

    /// Two-state evaluation: unknown collapses to `false`.
    ///
    /// This is the boundary documented by the filter stage; callers that
    /// need to distinguish unknown use [`Predicate::evaluate_truth`].
    pub fn evaluate(&self, row: &R) -> bool {
        self.evaluate_truth(row).collapse()
    }

    /// Three-state evaluation with left-to-right short-circuit.
    ///
    /// AND stops at the first false child, OR at the first true child;
    /// an unknown child alone never settles either combinator early.
    pub fn evaluate_truth(&self, row: &R) -> Truth {
        match self {
            Predicate::Cmp(cmp) => cmp.evaluate(row),
            Predicate::And(children) => {
                let mut saw_unknown = false;
                for child in children {
                    match child.evaluate_truth(row) {
                        Truth::False => return Truth::False,
                        Truth::Unknown => saw_unknown = true,
                        Truth::True => {}
                    }
                }
                if saw_unknown {
                    Truth::Unknown
                } else {
                    Truth::True
                }
            }
            Predicate::Or(children) => {
                let mut saw_unknown = false;
                for child in children {
                    match child.evaluate_truth(row) {
                        Truth::True => return Truth::True,
                        Truth::Unknown => saw_unknown = true,
                        Truth::False => {}
                    }
                }
                if saw_unknown {
                    Truth::Unknown
                } else {
                    Truth::False
                }
            }
            Predicate::Not(child) => child.evaluate_truth(row).negate(),
        }
    }
}

impl<R> Comparison<R> {
    fn evaluate(&self, row: &R) -> Truth {
        match self {
            Comparison::Eq { field, value } => ordered(field, value, row, |ord| ord.is_eq()),
            Comparison::Ne { field, value } => ordered(field, value, row, |ord| ord.is_ne()),
            Comparison::Lt { field, value } => ordered(field, value, row, |ord| ord.is_lt()),
            Comparison::Le { field, value } => ordered(field, value, row, |ord| ord.is_le()),
            Comparison::Gt { field, value } => ordered(field, value, row, |ord| ord.is_gt()),
            Comparison::Ge { field, value } => ordered(field, value, row, |ord| ord.is_ge()),
            Comparison::In { field, values } => {
                let actual = field.extract(row);
                if actual.is_null() {
                    return Truth::Unknown;
                }
                for literal in values {
                    if literal.is_null() {
                        continue;
                    }
                    if actual
                        .partial_cmp_value(literal)
                        .is_some_and(|ord| ord.is_eq())
                    {
                        return Truth::True;
                    }
                }
                Truth::False
            }
            Comparison::IsNull { field } => Truth::from_bool(field.extract(row).is_null()),
            Comparison::IsNotNull { field } => Truth::from_bool(!field.extract(row).is_null()),
        }
    }
}

/// Shared leg for the ordering comparisons: null on either side is
/// unknown; non-null values of incomparable types never satisfy the test.
fn ordered<R, F>(field: &FieldRef<R>, literal: &Value, row: &R, test: F) -> Truth
where
    F: Fn(std::cmp::Ordering) -> bool,
{
    let actual = field.extract(row);
    if actual.is_null() || literal.is_null() {
        return Truth::Unknown;
    }
    match actual.partial_cmp_value(literal) {
        Some(ord) => Truth::from_bool(test(ord)),
        None => Truth::False,
    }
}
