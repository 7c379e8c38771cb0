use std::cmp::Ordering;

///
/// FieldValue
///
/// Typed field projection used by the default sort path. Absent fields are
/// projected as empty text so comparison never fails.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Stable rank used for cross-variant ordering.
const fn variant_rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Text(_) => 0,
        FieldValue::Int(_) => 1,
        FieldValue::Float(_) => 2,
    }
}

impl FieldValue {
    /// Total, never-panicking ordering.
    ///
    /// Text compares case-insensitively through Unicode lowercasing; this is
    /// deterministic and locale-independent. Case-insensitively equal strings
    /// compare `Equal` so a stable sort preserves their input order. Numbers
    /// compare numerically across Int/Float; floats use IEEE total ordering
    /// so NaN sorts after every finite value instead of poisoning the sort.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            #[expect(clippy::cast_precision_loss)]
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            #[expect(clippy::cast_precision_loss)]
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            _ => variant_rank(self).cmp(&variant_rank(other)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

///
/// TESTS
///
