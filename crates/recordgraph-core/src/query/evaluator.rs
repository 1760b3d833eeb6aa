//! Module: query::evaluator
//! Responsibility: run a `Query` against a `Cache` — resolving
//! related-record predicates, applying filter/sort/page, and producing
//! the result shape each query variant promises.
//! Does not own: the `Query`/`Predicate`/`SortSpec` shapes themselves.
//! Boundary: `findRecord` against an absent identity raises
//! `Error::RecordNotFound`; `findRelatedRecord` against
//! an absent or unset target is not an error and simply returns `None`. A
//! relationship-kind mismatch (asking `findRelatedRecord` of a `hasMany`
//! slot, or vice versa) is also a reported error.

use crate::{
    accessor::RecordAccessor,
    error::Error,
    pipeline::GenericCache,
    query::{predicate::Predicate, Page, Query, SortSpec},
    record::{RelatedData, Record},
};

///
/// QueryResult
///

#[derive(Clone, Debug, PartialEq)]
pub enum QueryResult {
    Record(Option<Record>),
    Records(Vec<Record>),
}

impl QueryResult {
    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record(record) => record,
            Self::Records(mut records) => records.pop(),
        }
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Record(record) => record.into_iter().collect(),
            Self::Records(records) => records,
        }
    }
}

/// Evaluate `query` against `cache`.
pub fn evaluate<A: RecordAccessor>(query: &Query, cache: &GenericCache<A>) -> Result<QueryResult, Error> {
    match query {
        Query::FindRecord { identity } => cache
            .accessor_get(identity)
            .map(|record| QueryResult::Record(Some(record)))
            .ok_or_else(|| Error::RecordNotFound(identity.clone())),

        Query::FindRecords {
            model,
            filter,
            sort,
            page,
        } => {
            let records = cache.records_of_model(model);
            Ok(QueryResult::Records(finish(records, filter, sort, page.as_ref(), cache)))
        }

        Query::FindRelatedRecord {
            identity,
            relationship,
        } => {
            let Some(record) = cache.accessor_get(identity) else {
                return Ok(QueryResult::Record(None));
            };
            match record.relationship(relationship) {
                None | Some(RelatedData::One(None)) => Ok(QueryResult::Record(None)),
                Some(RelatedData::One(Some(target))) => {
                    Ok(QueryResult::Record(cache.accessor_get(target)))
                }
                Some(RelatedData::Many(_)) => Err(Error::QueryExpressionParse(format!(
                    "findRelatedRecord on '{relationship}' which is hasMany"
                ))),
            }
        }

        Query::FindRelatedRecords {
            identity,
            relationship,
            filter,
            sort,
            page,
        } => {
            let Some(record) = cache.accessor_get(identity) else {
                return Ok(QueryResult::Records(Vec::new()));
            };
            let targets = match record.relationship(relationship) {
                None => Vec::new(),
                Some(RelatedData::Many(targets)) => targets.clone(),
                Some(RelatedData::One(_)) => {
                    return Err(Error::QueryExpressionParse(format!(
                        "findRelatedRecords on '{relationship}' which is hasOne"
                    )))
                }
            };
            let records = targets
                .iter()
                .filter_map(|target| cache.accessor_get(target))
                .collect();
            Ok(QueryResult::Records(finish(records, filter, sort, page.as_ref(), cache)))
        }
    }
}

fn finish<A: RecordAccessor>(
    mut records: Vec<Record>,
    filter: &[Predicate],
    sort: &SortSpec,
    page: Option<&Page>,
    cache: &GenericCache<A>,
) -> Vec<Record> {
    if !filter.is_empty() {
        records.retain(|record| filter.iter().all(|clause| matches(clause, record, cache)));
    }
    if !sort.is_empty() {
        sort.apply(&mut records);
    }
    paginate(records, page)
}

fn paginate(records: Vec<Record>, page: Option<&Page>) -> Vec<Record> {
    match page {
        Some(page) => records.into_iter().skip(page.offset).take(page.limit).collect(),
        None => records,
    }
}

/// Evaluate one `Predicate` clause against a record.
/// `RelatedRecord`/`RelatedRecords` read the relationship's *current*
/// target identities directly off the record — they never need to load
/// the target record itself, since the comparison is identity equality,
/// not a nested predicate (`cache` is accepted for interface symmetry
/// with a future traversal but is unused here).
fn matches<A: RecordAccessor>(predicate: &Predicate, record: &Record, _cache: &GenericCache<A>) -> bool {
    if let Some(result) = predicate.matches_attribute_only(record) {
        return result;
    }

    match predicate {
        Predicate::RelatedRecord { relationship, expected } => match record.relationship(relationship) {
            Some(RelatedData::One(Some(target))) => expected.contains(target),
            Some(RelatedData::One(None)) | None => expected.is_empty(),
            Some(RelatedData::Many(_)) => false,
        },

        Predicate::RelatedRecords { relationship, op, expected } => {
            let actual = match record.relationship(relationship) {
                Some(RelatedData::Many(targets)) => targets.as_slice(),
                _ => &[],
            };
            op.matches(expected, actual)
        }

        Predicate::Attribute { .. } => unreachable!("handled by matches_attribute_only"),
    }
}

#[cfg(test)]
mod tests {
    use recordgraph_schema::{node::Model, registry::SchemaRegistry};

    use super::*;
    use crate::{
        identity::Identity,
        operation::Operation,
        pipeline::Cache,
        query::{Direction, SortField},
    };

    fn schema() -> SchemaRegistry {
        SchemaRegistry::builder()
            .model(Model::new("planet").attribute("name").attribute("order"))
            .build()
            .expect("fixture schema builds")
    }

    /// Repeating the same `findRecords` filter/sort/page against the
    /// same state returns an identical sequence every time.
    #[test]
    fn find_records_is_deterministic_across_repeated_evaluation() {
        let mut cache = Cache::new(schema());
        for (id, order) in [("mercury", 3i64), ("venus", 1), ("earth", 2)] {
            let mut record = Record::new(Identity::new("planet", id));
            record.attributes.insert("order".into(), crate::value::Value::from(order));
            cache.patch(Operation::AddRecord { record }).unwrap();
        }

        let query = Query::find_records("planet")
            .sort(SortSpec::new(vec![SortField::new("order", Direction::Ascending)]))
            .page(Page::new(0, 2))
            .build();

        let first = evaluate(&query, &cache).unwrap();
        let second = evaluate(&query, &cache).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.into_records().iter().map(|r| r.identity.id.clone()).collect::<Vec<_>>(),
            vec!["venus", "earth"]
        );
    }

    #[test]
    fn find_record_against_an_absent_identity_raises_record_not_found() {
        let cache = Cache::new(schema());
        let identity = Identity::new("planet", "ceres");

        let err = evaluate(&Query::find_record(identity.clone()), &cache).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound(found) if found == identity));
    }
}
