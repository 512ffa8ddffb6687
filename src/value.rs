//! Dynamically typed input cells
//!
//! [`Scalar`] lets callers hand over values whose type is only known at
//! runtime, for example a JSON array. Before such values are factorized they
//! are validated by [`validate_scalars`]: every cell must be a scalar and all
//! cells must share one kind.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single input value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A nested sequence; never valid as a factor key
    List(Vec<Scalar>),
}

/// Kind of a [`Scalar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
    List,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Str => "string",
            ScalarKind::List => "list",
        };
        f.write_str(name)
    }
}

impl Scalar {
    /// Kind of this value
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Str(_) => ScalarKind::Str,
            Scalar::List(_) => ScalarKind::List,
        }
    }
}

// -0.0 and 0.0 are the same key
fn normalize_float(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => {
                normalize_float(*a).total_cmp(&normalize_float(*b))
            }
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            (Scalar::List(a), Scalar::List(b)) => a.cmp(b),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Scalar::Bool(v) => v.hash(state),
            Scalar::Int(v) => v.hash(state),
            Scalar::Float(v) => normalize_float(*v).to_bits().hash(state),
            Scalar::Str(v) => v.hash(state),
            Scalar::List(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Str(v) => write!(f, "{}", v),
            Scalar::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// Check that `values` can be factorized and return them in a common kind
///
/// Integers mixed with floats are promoted to floats. Any other mix of kinds
/// is a [`Error::TypeMismatch`]; a nested list is an [`Error::NotFlat`].
/// NaN has no place in a total order and is rejected as a type mismatch.
pub fn validate_scalars(values: &[Scalar]) -> Result<Vec<Scalar>> {
    if let Some(pos) = values.iter().position(|v| v.kind() == ScalarKind::List) {
        return Err(Error::NotFlat(format!(
            "element {} is a nested sequence, expected a scalar",
            pos
        )));
    }

    let first = match values.first() {
        Some(v) => v.kind(),
        None => return Ok(Vec::new()),
    };

    let mut promote = false;
    for (pos, value) in values.iter().enumerate() {
        let kind = value.kind();
        if kind == first {
            continue;
        }
        match (first, kind) {
            (ScalarKind::Int, ScalarKind::Float) | (ScalarKind::Float, ScalarKind::Int) => {
                promote = true;
            }
            _ => {
                return Err(Error::TypeMismatch(format!(
                    "element {} is {} but element 0 is {}; values are not mutually comparable",
                    pos, kind, first
                )));
            }
        }
    }

    let mut out = Vec::with_capacity(values.len());
    for (pos, value) in values.iter().enumerate() {
        let value = match value {
            Scalar::Int(v) if promote => Scalar::Float(*v as f64),
            other => other.clone(),
        };
        if let Scalar::Float(v) = value {
            if v.is_nan() {
                return Err(Error::TypeMismatch(format!(
                    "element {} is NaN, which cannot be ordered",
                    pos
                )));
            }
        }
        out.push(value);
    }
    Ok(out)
}
