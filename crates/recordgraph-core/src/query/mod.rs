//! Module: query
//! Responsibility: the read-side query algebra —
//! `findRecord`, `findRecords` (filter/sort/page), `findRelatedRecord`,
//! `findRelatedRecords` — and the `Query` builder that lowers fluent
//! calls to the same AST the evaluator runs directly.
//! Does not own: mutation — queries never produce `Operation`s and never
//! touch the inverse index.
//! Boundary: `evaluate` is read-only; it takes `&GenericCache<A>`, never
//! `&mut`.

pub mod evaluator;
pub mod predicate;
pub mod sort;

pub use evaluator::{evaluate, QueryResult};
pub use predicate::{AttributeOp, Predicate, SetOp};
pub use sort::{Direction, Nulls, SortField, SortSpec};

use crate::identity::Identity;

///
/// Page
///
/// `limit`/`offset` pagination applied after filtering and sorting.
/// Per spec §4.6, a page clause requires a limit — "`limit` missing but
/// `page` present" is a `QueryExpressionParseError` — so `limit` is a
/// plain `usize` rather than an `Option`. "No pagination" is expressed by
/// the query carrying no `Page` at all (`Query::FindRecords.page: Option<Page>`),
/// not by a `Page` with an absent limit.
///

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

///
/// Query
///
/// The closed set of read operations. Constructed either directly or
/// through the fluent builder methods below, which are sugar over the
/// same variants.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    FindRecord {
        identity: Identity,
    },
    FindRecords {
        model: String,
        /// AND-combined clauses; an empty list matches everything.
        filter: Vec<Predicate>,
        sort: SortSpec,
        /// `None` means unpaginated — the full filtered, sorted result.
        page: Option<Page>,
    },
    FindRelatedRecord {
        identity: Identity,
        relationship: String,
    },
    FindRelatedRecords {
        identity: Identity,
        relationship: String,
        filter: Vec<Predicate>,
        sort: SortSpec,
        /// `None` means unpaginated — the full filtered, sorted result.
        page: Option<Page>,
    },
}

impl Query {
    #[must_use]
    pub fn find_record(identity: Identity) -> Self {
        Self::FindRecord { identity }
    }

    #[must_use]
    pub fn find_records(model: impl Into<String>) -> FindRecordsBuilder {
        FindRecordsBuilder {
            model: model.into(),
            filter: Vec::new(),
            sort: SortSpec::default(),
            page: None,
        }
    }

    #[must_use]
    pub fn find_related_record(identity: Identity, relationship: impl Into<String>) -> Self {
        Self::FindRelatedRecord {
            identity,
            relationship: relationship.into(),
        }
    }

    #[must_use]
    pub fn find_related_records(
        identity: Identity,
        relationship: impl Into<String>,
    ) -> FindRelatedRecordsBuilder {
        FindRelatedRecordsBuilder {
            identity,
            relationship: relationship.into(),
            filter: Vec::new(),
            sort: SortSpec::default(),
            page: None,
        }
    }
}

///
/// FindRecordsBuilder
///
/// Fluent sugar for `Query::FindRecords` — `.filter(...).sort(...).page(...)`
/// lower to the same fields the evaluator reads directly.
///

#[derive(Clone, Debug)]
pub struct FindRecordsBuilder {
    model: String,
    filter: Vec<Predicate>,
    sort: SortSpec,
    page: Option<Page>,
}

impl FindRecordsBuilder {
    /// AND another clause onto the filter. Calling this more than once
    /// accumulates clauses rather than replacing the last one.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter.push(predicate);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn build(self) -> Query {
        Query::FindRecords {
            model: self.model,
            filter: self.filter,
            sort: self.sort,
            page: self.page,
        }
    }
}

///
/// FindRelatedRecordsBuilder
///

#[derive(Clone, Debug)]
pub struct FindRelatedRecordsBuilder {
    identity: Identity,
    relationship: String,
    filter: Vec<Predicate>,
    sort: SortSpec,
    page: Option<Page>,
}

impl FindRelatedRecordsBuilder {
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter.push(predicate);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn build(self) -> Query {
        Query::FindRelatedRecords {
            identity: self.identity,
            relationship: self.relationship,
            filter: self.filter,
            sort: self.sort,
            page: self.page,
        }
    }
}
