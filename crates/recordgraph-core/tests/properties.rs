//! Property tests for the patch pipeline's core invariants, run over a
//! small fixed two-model schema: `planet {attrs: name; rels: moons->moon
//! hasMany inv=planet}`, `moon {rels: planet->planet hasOne inv=moons}`.
//! A handful of fixed identities keep the state space small enough that
//! random sequences of operations actually collide and exercise the
//! mirroring/cascade logic, rather than mostly adding unrelated records.

use proptest::prelude::*;
use recordgraph_core::{
    identity::Identity,
    operation::Operation,
    pipeline::Cache,
    record::{RelatedData, Record},
};
use recordgraph_schema::{
    node::{Model, Relationship},
    registry::SchemaRegistry,
    types::RelationshipKind,
};

fn schema() -> SchemaRegistry {
    SchemaRegistry::builder()
        .model(
            Model::new("planet")
                .attribute("name")
                .relationship(Relationship::new("moons", RelationshipKind::HasMany, "moon").with_inverse("planet")),
        )
        .model(
            Model::new("moon")
                .relationship(Relationship::new("planet", RelationshipKind::HasOne, "planet").with_inverse("moons")),
        )
        .build()
        .expect("fixture schema builds")
}

const PLANETS: [&str; 3] = ["p0", "p1", "p2"];
const MOONS: [&str; 3] = ["m0", "m1", "m2"];

fn arb_planet() -> impl Strategy<Value = Identity> {
    prop_oneof![Just(PLANETS[0]), Just(PLANETS[1]), Just(PLANETS[2])].prop_map(|id| Identity::new("planet", id))
}

fn arb_moon() -> impl Strategy<Value = Identity> {
    prop_oneof![Just(MOONS[0]), Just(MOONS[1]), Just(MOONS[2])].prop_map(|id| Identity::new("moon", id))
}

fn arb_op() -> impl Strategy<Value = Operation> {
    prop_oneof![
        arb_planet().prop_map(|identity| Operation::AddRecord {
            record: Record::new(identity)
        }),
        arb_moon().prop_map(|identity| Operation::AddRecord {
            record: Record::new(identity)
        }),
        arb_planet().prop_map(|identity| Operation::RemoveRecord { identity }),
        arb_moon().prop_map(|identity| Operation::RemoveRecord { identity }),
        (arb_planet(), arb_moon()).prop_map(|(identity, target)| Operation::AddToRelatedRecords {
            identity,
            relationship: "moons".into(),
            target,
        }),
        (arb_planet(), arb_moon()).prop_map(|(identity, target)| Operation::RemoveFromRelatedRecords {
            identity,
            relationship: "moons".into(),
            target,
        }),
        (arb_moon(), proptest::option::of(arb_planet())).prop_map(|(identity, target)| {
            Operation::ReplaceRelatedRecord {
                identity,
                relationship: "planet".into(),
                target,
            }
        }),
    ]
}

fn arb_ops(max: usize) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(arb_op(), 0..max)
}

/// A sorted, content-comparable view of the whole cache, for asserting
/// two points in a run left it in exactly the same state.
fn snapshot(cache: &Cache) -> Vec<Record> {
    let mut records = cache.records_of_model("planet");
    records.extend(cache.records_of_model("moon"));
    records.sort_by(|a, b| a.identity.cmp(&b.identity));
    records
}

/// P3 / I4: every declared-inverse relationship is symmetric.
fn assert_inverse_symmetric(cache: &Cache) {
    for id in PLANETS {
        let identity = Identity::new("planet", id);
        let Some(record) = cache.accessor_get(&identity) else {
            continue;
        };
        let Some(RelatedData::Many(moons)) = record.relationship("moons") else {
            continue;
        };
        for moon in moons {
            let moon_record = cache
                .accessor_get(moon)
                .expect("a surviving planet's moon must still exist (I5)");
            assert_eq!(
                moon_record.relationship("planet"),
                Some(&RelatedData::One(Some(identity.clone()))),
                "moon {moon} is listed under planet {identity} but does not point back"
            );
        }
    }

    for id in MOONS {
        let identity = Identity::new("moon", id);
        let Some(record) = cache.accessor_get(&identity) else {
            continue;
        };
        let Some(RelatedData::One(Some(planet))) = record.relationship("planet") else {
            continue;
        };
        let planet_record = cache
            .accessor_get(planet)
            .expect("a surviving moon's planet must still exist (I5)");
        let Some(RelatedData::Many(moons)) = planet_record.relationship("moons") else {
            panic!("planet.moons should always be hasMany once the schema declares it");
        };
        assert!(
            moons.contains(&identity),
            "moon {identity} points at planet {planet} but is not listed under its moons"
        );
    }
}

/// P4 / I5: no surviving record's relationship points at a removed identity.
fn assert_no_dangling_pointers(cache: &Cache) {
    for id in PLANETS {
        let identity = Identity::new("planet", id);
        let Some(record) = cache.accessor_get(&identity) else {
            continue;
        };
        if let Some(RelatedData::Many(moons)) = record.relationship("moons") {
            for moon in moons {
                assert!(
                    cache.accessor_get(moon).is_some(),
                    "planet {identity} still points at removed moon {moon}"
                );
            }
        }
    }
    for id in MOONS {
        let identity = Identity::new("moon", id);
        let Some(record) = cache.accessor_get(&identity) else {
            continue;
        };
        if let Some(RelatedData::One(Some(planet))) = record.relationship("planet") {
            assert!(
                cache.accessor_get(planet).is_some(),
                "moon {identity} still points at removed planet {planet}"
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// P3: after any sequence of mutations over the fixed identity pool,
    /// every declared relationship stays symmetric with its inverse.
    #[test]
    fn inverse_symmetry_holds_after_any_sequence(ops in arb_ops(12)) {
        let mut cache = Cache::new(schema());
        for op in ops {
            let _ = cache.patch(op);
        }
        assert_inverse_symmetric(&cache);
    }

    /// P4: after any sequence including removals, referential integrity
    /// holds — nothing points at an identity that no longer exists.
    #[test]
    fn referential_integrity_holds_after_any_sequence(ops in arb_ops(12)) {
        let mut cache = Cache::new(schema());
        for op in ops {
            let _ = cache.patch(op);
        }
        assert_no_dangling_pointers(&cache);
    }

    /// P1: applying an operation and then every operation in its returned
    /// inverse, in order, restores the cache to its pre-operation state.
    #[test]
    fn inverse_of_an_operation_restores_prior_state(setup in arb_ops(8), op in arb_op()) {
        let mut cache = Cache::new(schema());
        for setup_op in setup {
            let _ = cache.patch(setup_op);
        }
        let before = snapshot(&cache);

        let result = cache.patch(op).expect("every generated op is well-formed against this fixture's schema");
        for inverse_op in result.inverse {
            cache
                .patch(inverse_op)
                .expect("a just-computed inverse always re-applies cleanly");
        }

        prop_assert_eq!(snapshot(&cache), before);
    }

    /// P2: an operation the pipeline reports as a pure no-op (an empty
    /// inverse) left no observable trace on the cache.
    #[test]
    fn empty_inverse_means_no_change(setup in arb_ops(8), op in arb_op()) {
        let mut cache = Cache::new(schema());
        for setup_op in setup {
            let _ = cache.patch(setup_op);
        }
        let before = snapshot(&cache);

        let result = cache.patch(op).expect("every generated op is well-formed against this fixture's schema");
        if result.inverse.is_empty() {
            prop_assert_eq!(snapshot(&cache), before);
        }
    }
}
