/// Filter operators understood by the data API.
///
/// Only equality is supported; multiple filters on one request are
/// conjunctive (AND). Disjunction, ranges, and text search are out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
}

impl Op {
    fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "eq",
        }
    }
}

/// A single `field=op.value` filter on an upstream table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub op: Op,
    pub value: String,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), op: Op::Eq, value: value.into() }
    }

    /// Query-pair encoding, e.g. `("user_id", "eq.abc-123")`.
    pub fn to_query_pair(&self) -> (String, String) {
        (self.field.clone(), format!("{}.{}", self.op.as_str(), self.value))
    }
}
