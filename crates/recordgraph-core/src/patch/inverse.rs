//! Module: patch::inverse
//! Responsibility: the nine inverse-patch operators — each
//! reads the *pre-mutation* state of the targeted record and returns the
//! operation that would undo the forward operator about to run, or
//! `None` if there is nothing to undo.
//! Does not own: applying either the forward or inverse operation — see
//! `operators::apply`. `None` here also means the forward operator is
//! never called at all; this is the seam where the
//! pipeline decides an operation is a no-op.
//! Boundary: `compute_inverse` must run strictly before `operators::apply`
//! for the same operation; it is meaningless once the accessor has
//! already been mutated.

use crate::{accessor::RecordAccessor, operation::Operation, record::RelatedData, value::Value};

/// Set equality over identity sequences, ignoring order and duplicates —
/// the comparison `replaceRelatedRecords`'s inverse uses to decide
/// whether anything actually changed.
fn identity_sets_equal(a: &[crate::identity::Identity], b: &[crate::identity::Identity]) -> bool {
    a.len() == b.len() && a.iter().all(|id| b.contains(id)) && b.iter().all(|id| a.contains(id))
}

///
/// compute_inverse
///
/// Read `accessor`'s current state and return the operation that undoes
/// `op`, or `None` if `op` would have no observable effect. Must be
/// called before `op` is applied.
///

pub fn compute_inverse<A: RecordAccessor>(op: &Operation, accessor: &A) -> Option<Operation> {
    match op {
        Operation::AddRecord { record } => match accessor.get(&record.identity) {
            None => Some(Operation::RemoveRecord {
                identity: record.identity.clone(),
            }),
            Some(current) if &current == record => None,
            Some(current) => Some(Operation::ReplaceRecord { record: current }),
        },

        Operation::ReplaceRecord { record } => {
            let Some(current) = accessor.get(&record.identity) else {
                return Some(Operation::RemoveRecord {
                    identity: record.identity.clone(),
                });
            };
            replace_record_delta(record, &current)
        }

        Operation::RemoveRecord { identity } => accessor
            .get(identity)
            .map(|current| Operation::AddRecord { record: current }),

        Operation::ReplaceKey { identity, key, value } => {
            let current_value = accessor
                .get(identity)
                .and_then(|record| record.keys.get(key).cloned())
                .flatten();
            if &current_value == value {
                None
            } else {
                Some(Operation::ReplaceKey {
                    identity: identity.clone(),
                    key: key.clone(),
                    value: current_value,
                })
            }
        }

        Operation::ReplaceAttribute {
            identity,
            attribute,
            value,
        } => {
            let current_value = accessor
                .get(identity)
                .and_then(|record| record.attribute(attribute).cloned())
                .unwrap_or(Value::Null);
            if &current_value == value {
                None
            } else {
                Some(Operation::ReplaceAttribute {
                    identity: identity.clone(),
                    attribute: attribute.clone(),
                    value: current_value,
                })
            }
        }

        Operation::AddToRelatedRecords {
            identity,
            relationship,
            target,
        } => {
            let already_present = accessor
                .get(identity)
                .and_then(|record| record.relationship(relationship).cloned())
                .is_some_and(|data| data.identities().contains(target));
            if already_present {
                None
            } else {
                Some(Operation::RemoveFromRelatedRecords {
                    identity: identity.clone(),
                    relationship: relationship.clone(),
                    target: target.clone(),
                })
            }
        }

        Operation::RemoveFromRelatedRecords {
            identity,
            relationship,
            target,
        } => {
            let present = accessor
                .get(identity)
                .and_then(|record| record.relationship(relationship).cloned())
                .is_some_and(|data| data.identities().contains(target));
            if present {
                Some(Operation::AddToRelatedRecords {
                    identity: identity.clone(),
                    relationship: relationship.clone(),
                    target: target.clone(),
                })
            } else {
                None
            }
        }

        Operation::ReplaceRelatedRecords {
            identity,
            relationship,
            targets,
        } => {
            let current_targets = accessor
                .get(identity)
                .and_then(|record| record.relationship(relationship).cloned())
                .map(|data| data.identities())
                .unwrap_or_default();
            if identity_sets_equal(&current_targets, targets) {
                None
            } else {
                Some(Operation::ReplaceRelatedRecords {
                    identity: identity.clone(),
                    relationship: relationship.clone(),
                    targets: current_targets,
                })
            }
        }

        Operation::ReplaceRelatedRecord {
            identity,
            relationship,
            target,
        } => {
            let current_target = accessor
                .get(identity)
                .and_then(|record| record.relationship(relationship).cloned())
                .and_then(|data| match data {
                    RelatedData::One(target) => target,
                    RelatedData::Many(_) => None,
                });
            if &current_target == target {
                None
            } else {
                Some(Operation::ReplaceRelatedRecord {
                    identity: identity.clone(),
                    relationship: relationship.clone(),
                    target: current_target,
                })
            }
        }
    }
}

/// Build the delta inverse for `replaceRecord`: only the
/// fields the incoming `record` actually mentions, restoring whatever
/// `current` held for those fields before the merge. `None` when every
/// mentioned field is already equal to its current value — the merge
/// would be a no-op.
fn replace_record_delta(record: &crate::record::Record, current: &crate::record::Record) -> Option<Operation> {
    let mut delta = crate::record::Record::new(record.identity.clone());
    let mut changed = false;

    for (name, value) in &record.keys {
        let current_value = current.keys.get(name).cloned().flatten();
        if &current_value != value {
            delta.keys.insert(name.clone(), current_value);
            changed = true;
        }
    }

    for (name, value) in &record.attributes {
        let current_value = current.attribute(name).cloned().unwrap_or(Value::Null);
        if &current_value != value {
            delta.attributes.insert(name.clone(), current_value);
            changed = true;
        }
    }

    for (name, data) in &record.relationships {
        let current_data = current.relationship(name).cloned().unwrap_or_else(|| match data {
            RelatedData::One(_) => RelatedData::empty_one(),
            RelatedData::Many(_) => RelatedData::empty_many(),
        });
        let differs = match (data, &current_data) {
            (RelatedData::One(a), RelatedData::One(b)) => a != b,
            (RelatedData::Many(a), RelatedData::Many(b)) => !identity_sets_equal(a, b),
            _ => true,
        };
        if differs {
            delta.relationships.insert(name.clone(), current_data);
            changed = true;
        }
    }

    changed.then_some(Operation::ReplaceRecord { record: delta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{accessor::EphemeralAccessor, identity::Identity, record::Record};

    /// Unlike `addRecord`/`replaceRecord`, whose inverses synthesize a
    /// bare record skeleton when the target doesn't exist yet,
    /// `replaceAttribute`/`replaceKey` against an absent record compute an
    /// inverse that still names that record — applying it later is a silent
    /// no-op (the operator has nothing to act on), not an error. This is a
    /// documented peculiarity, preserved verbatim rather than papered over.
    #[test]
    fn replace_attribute_inverse_against_absent_record_names_a_record_that_is_not_synthesized() {
        let accessor = EphemeralAccessor::default();
        let identity = Identity::new("planet", "earth");

        let inverse = compute_inverse(
            &Operation::ReplaceAttribute {
                identity: identity.clone(),
                attribute: "name".into(),
                value: Value::from("Earth"),
            },
            &accessor,
        );

        match inverse {
            Some(Operation::ReplaceAttribute {
                identity: inv_identity,
                value: inv_value,
                ..
            }) => {
                assert_eq!(inv_identity, identity);
                assert_eq!(inv_value, Value::Null);
            }
            other => panic!("expected a ReplaceAttribute inverse naming the absent record, got {other:?}"),
        }
        assert!(accessor.get(&identity).is_none());
    }

    #[test]
    fn replace_key_inverse_against_absent_record_names_a_record_that_is_not_synthesized() {
        let accessor = EphemeralAccessor::default();
        let identity = Identity::new("planet", "earth");

        let inverse = compute_inverse(
            &Operation::ReplaceKey {
                identity: identity.clone(),
                key: "remoteId".into(),
                value: Some("nasa-3".into()),
            },
            &accessor,
        );

        match inverse {
            Some(Operation::ReplaceKey {
                identity: inv_identity,
                value: inv_value,
                ..
            }) => {
                assert_eq!(inv_identity, identity);
                assert_eq!(inv_value, None);
            }
            other => panic!("expected a ReplaceKey inverse naming the absent record, got {other:?}"),
        }
    }

    #[test]
    fn add_record_inverse_against_absent_record_is_a_synthesized_remove() {
        let accessor = EphemeralAccessor::default();
        let record = Record::new(Identity::new("planet", "earth"));

        let inverse = compute_inverse(&Operation::AddRecord { record: record.clone() }, &accessor);
        assert_eq!(
            inverse,
            Some(Operation::RemoveRecord {
                identity: record.identity
            })
        );
    }
}
