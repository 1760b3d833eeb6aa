//! Module: query::sort
//! Responsibility: `SortSpec` — an ordered list of sort keys with
//! direction and null-placement, and the comparator it compiles to.
//! Does not own: pagination (see `Page` in `mod.rs`).
//! Boundary: ties on every declared field leave relative order
//! unspecified beyond "stable w.r.t. the accessor's iteration order" —
//! callers that need a total order should include a unique field last.

use std::cmp::Ordering;

use crate::{record::Record, value::Value};

///
/// Direction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Ascending,
    Descending,
}

///
/// Nulls
///
/// Where a missing/`Null` attribute sorts relative to present values,
/// independent of `Direction` — "nulls first" means first in the output
/// regardless of whether the field itself sorts ascending or descending.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Nulls {
    First,
    Last,
}

///
/// SortField
///

#[derive(Clone, Debug, PartialEq)]
pub struct SortField {
    pub attribute: String,
    pub direction: Direction,
    pub nulls: Nulls,
}

impl SortField {
    /// Nulls default to last under ascending, first under descending —
    /// `with_nulls` overrides this explicitly.
    #[must_use]
    pub fn new(attribute: impl Into<String>, direction: Direction) -> Self {
        let nulls = match direction {
            Direction::Ascending => Nulls::Last,
            Direction::Descending => Nulls::First,
        };
        Self {
            attribute: attribute.into(),
            direction,
            nulls,
        }
    }

    #[must_use]
    pub fn with_nulls(mut self, nulls: Nulls) -> Self {
        self.nulls = nulls;
        self
    }
}

///
/// SortSpec
///
/// An ordered list of `SortField`s, applied left to right: records equal
/// under the first field are broken by the second, and so on.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortSpec {
    pub fields: Vec<SortField>,
}

impl SortSpec {
    #[must_use]
    pub fn new(fields: Vec<SortField>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn apply(&self, records: &mut [Record]) {
        records.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for field in &self.fields {
            let ordering = compare_field(a, b, field);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn compare_field(a: &Record, b: &Record, field: &SortField) -> Ordering {
    let a_value = a.attribute(&field.attribute);
    let b_value = b.attribute(&field.attribute);
    let a_is_null = matches!(a_value, None | Some(Value::Null));
    let b_is_null = matches!(b_value, None | Some(Value::Null));

    // Null placement is independent of direction — it must not be passed
    // through the `Descending` reversal below.
    match (a_is_null, b_is_null) {
        (true, true) => Ordering::Equal,
        (true, false) => nulls_ordering(field.nulls, true),
        (false, true) => nulls_ordering(field.nulls, false),
        (false, false) => {
            let ordering = a_value
                .unwrap()
                .partial_cmp(b_value.unwrap())
                .unwrap_or(Ordering::Equal);
            match field.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        }
    }
}

/// Null-placement is independent of `Direction` — computed once here and
/// never passed through `Ordering::reverse` by the caller a second time.
fn nulls_ordering(nulls: Nulls, lhs_is_null: bool) -> Ordering {
    let null_sorts_first = nulls == Nulls::First;
    match (lhs_is_null, null_sorts_first) {
        (true, true) | (false, false) => Ordering::Less,
        (true, false) | (false, true) => Ordering::Greater,
    }
}
