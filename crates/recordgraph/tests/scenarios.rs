//! End-to-end scenarios run against the public facade.
//!
//! Schema throughout: `planet {attrs: name, classification; keys: remoteId;
//! rels: moons->moon hasMany inv=planet, solarSystem->solarSystem hasOne
//! inv=planets}`, `moon {rels: planet->planet hasOne inv=moons}`,
//! `solarSystem {rels: planets->planet hasMany inv=solarSystem}`.

use recordgraph::design::prelude::{Model, Relationship, RelationshipKind, SchemaRegistry};
use recordgraph::prelude::*;

fn schema() -> SchemaRegistry {
    SchemaRegistry::builder()
        .model(
            Model::new("planet")
                .attribute("name")
                .attribute("classification")
                .attribute("order")
                .key("remoteId")
                .relationship(Relationship::new("moons", RelationshipKind::HasMany, "moon").with_inverse("planet"))
                .relationship(
                    Relationship::new("solarSystem", RelationshipKind::HasOne, "solarSystem")
                        .with_inverse("planets"),
                ),
        )
        .model(
            Model::new("moon")
                .relationship(Relationship::new("planet", RelationshipKind::HasOne, "planet").with_inverse("moons")),
        )
        .model(
            Model::new("solarSystem").relationship(
                Relationship::new("planets", RelationshipKind::HasMany, "planet").with_inverse("solarSystem"),
            ),
        )
        .build()
        .expect("fixture schema builds")
}

fn planet(id: &str) -> Identity {
    Identity::new("planet", id)
}

fn moon(id: &str) -> Identity {
    Identity::new("moon", id)
}

fn solar_system(id: &str) -> Identity {
    Identity::new("solarSystem", id)
}

#[test]
fn add_record_then_find_record_round_trips_and_pushes_keys() {
    let mut cache = Cache::new(schema()).with_key_map(Box::new(InMemoryKeyMap::default()));

    let mut jupiter = Record::new(planet("jupiter"));
    jupiter.keys.insert("remoteId".into(), Some("j".into()));
    jupiter.attributes.insert("name".into(), Value::from("Jupiter"));
    jupiter
        .attributes
        .insert("classification".into(), Value::from("gas giant"));

    cache.patch(Operation::AddRecord { record: jupiter.clone() }).unwrap();

    let found = evaluate(&Query::find_record(planet("jupiter")), &cache)
        .unwrap()
        .into_record()
        .expect("jupiter was just added");
    assert_eq!(found, jupiter);
    assert_eq!(cache.key_map().unwrap().key_to_id("planet", "remoteId", "j"), Some("jupiter".to_string()));
}

#[test]
fn replace_record_merges_and_its_inverse_restores_only_the_delta() {
    let mut cache = Cache::new(schema());

    let mut base = Record::new(planet("jupiter"));
    base.attributes.insert("name".into(), Value::from("Jupiter"));
    base.relationships
        .insert("moons".into(), RelatedData::Many(vec![moon("io")]));
    cache.patch(Operation::AddRecord { record: base }).unwrap();

    let mut delta = Record::new(planet("jupiter"));
    delta
        .attributes
        .insert("classification".into(), Value::from("gas giant"));
    delta
        .relationships
        .insert("solarSystem".into(), RelatedData::One(Some(solar_system("sol"))));

    let result = cache.patch(Operation::ReplaceRecord { record: delta }).unwrap();

    let merged = evaluate(&Query::find_record(planet("jupiter")), &cache)
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(merged.attribute("name"), Some(&Value::from("Jupiter")));
    assert_eq!(merged.attribute("classification"), Some(&Value::from("gas giant")));
    assert_eq!(
        merged.relationship("moons"),
        Some(&RelatedData::Many(vec![moon("io")]))
    );
    assert_eq!(
        merged.relationship("solarSystem"),
        Some(&RelatedData::One(Some(solar_system("sol"))))
    );

    // The inverse is the delta, not a full snapshot: it restores
    // `classification` to unset and `solarSystem` to null, and says
    // nothing about `name`/`moons`, which the merge never touched. A
    // second inverse entry undoes the mirrored `planets` addition that
    // schema consistency pushed onto `sol` when `solarSystem` was set.
    assert_eq!(result.inverse.len(), 2);
    match &result.inverse[0] {
        Operation::RemoveFromRelatedRecords {
            identity,
            relationship,
            target,
        } => {
            assert_eq!(identity, &solar_system("sol"));
            assert_eq!(relationship, "planets");
            assert_eq!(target, &planet("jupiter"));
        }
        other => panic!("expected a RemoveFromRelatedRecords inverse, got {other:?}"),
    }
    match &result.inverse[1] {
        Operation::ReplaceRecord { record } => {
            assert_eq!(record.attribute("classification"), Some(&Value::Null));
            assert_eq!(record.relationship("solarSystem"), Some(&RelatedData::One(None)));
            assert!(record.attribute("name").is_none());
            assert!(record.relationship("moons").is_none());
        }
        other => panic!("expected a ReplaceRecord inverse, got {other:?}"),
    }
}

#[test]
fn remove_from_related_records_against_absent_base_is_a_silent_no_op() {
    let mut cache = Cache::new(schema());

    let result = cache
        .patch(Operation::RemoveFromRelatedRecords {
            identity: planet("jupiter"),
            relationship: "moons".into(),
            target: moon("europa"),
        })
        .unwrap();

    assert_eq!(result.data, vec![PatchData::Null]);
    assert!(result.inverse.is_empty());
    assert!(matches!(
        evaluate(&Query::find_record(planet("jupiter")), &cache),
        Err(Error::RecordNotFound(_))
    ));
}

#[test]
fn inverse_symmetry_holds_after_a_batch_insert() {
    let mut cache = Cache::new(schema());

    cache
        .patch_batch(vec![
            Operation::AddRecord {
                record: Record::new(solar_system("sol")),
            },
            Operation::AddRecord {
                record: {
                    let mut earth = Record::new(planet("earth"));
                    earth
                        .relationships
                        .insert("solarSystem".into(), RelatedData::One(Some(solar_system("sol"))));
                    earth
                },
            },
            Operation::AddRecord {
                record: {
                    let mut jupiter = Record::new(planet("jupiter"));
                    jupiter
                        .relationships
                        .insert("solarSystem".into(), RelatedData::One(Some(solar_system("sol"))));
                    jupiter
                },
            },
            Operation::AddRecord {
                record: {
                    let mut io = Record::new(moon("io"));
                    io.relationships
                        .insert("planet".into(), RelatedData::One(Some(planet("jupiter"))));
                    io
                },
            },
        ])
        .unwrap();

    let sol = evaluate(&Query::find_record(solar_system("sol")), &cache)
        .unwrap()
        .into_record()
        .unwrap();
    let RelatedData::Many(sol_planets) = sol.relationship("planets").unwrap() else {
        panic!("planets should be hasMany");
    };
    assert_eq!(sol_planets.len(), 2);
    assert!(sol_planets.contains(&planet("earth")));
    assert!(sol_planets.contains(&planet("jupiter")));

    let jupiter = evaluate(&Query::find_record(planet("jupiter")), &cache)
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(
        jupiter.relationship("moons"),
        Some(&RelatedData::Many(vec![moon("io")]))
    );
}

#[test]
fn remove_record_cascades_to_every_forward_pointer() {
    let mut cache = Cache::new(schema());

    cache
        .patch_batch(vec![
            Operation::AddRecord {
                record: {
                    let mut jupiter = Record::new(planet("jupiter"));
                    jupiter.relationships.insert(
                        "moons".into(),
                        RelatedData::Many(vec![moon("io"), moon("europa")]),
                    );
                    jupiter
                },
            },
            Operation::AddRecord {
                record: {
                    let mut io = Record::new(moon("io"));
                    io.relationships
                        .insert("planet".into(), RelatedData::One(Some(planet("jupiter"))));
                    io
                },
            },
            Operation::AddRecord {
                record: {
                    let mut europa = Record::new(moon("europa"));
                    europa
                        .relationships
                        .insert("planet".into(), RelatedData::One(Some(planet("jupiter"))));
                    europa
                },
            },
        ])
        .unwrap();

    cache
        .patch(Operation::RemoveRecord {
            identity: planet("jupiter"),
        })
        .unwrap();

    assert!(matches!(
        evaluate(&Query::find_record(planet("jupiter")), &cache),
        Err(Error::RecordNotFound(_))
    ));

    let io = evaluate(&Query::find_record(moon("io")), &cache)
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(io.relationship("planet"), Some(&RelatedData::One(None)));

    let europa = evaluate(&Query::find_record(moon("europa")), &cache)
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(europa.relationship("planet"), Some(&RelatedData::One(None)));

    assert!(cache.backrefs_of(&planet("jupiter")).is_empty());
}

#[test]
fn find_records_applies_sort_then_page() {
    let mut cache = Cache::new(schema());

    for (id, order) in [("a", 5i64), ("b", 1i64), ("c", 3i64)] {
        let mut record = Record::new(planet(id));
        record.attributes.insert("order".into(), Value::from(order));
        cache.patch(Operation::AddRecord { record }).unwrap();
    }

    let query = Query::find_records("planet")
        .sort(SortSpec::new(vec![SortField::new("order", Direction::Ascending)]))
        .page(Page::new(1, 1))
        .build();

    let page = evaluate(&query, &cache).unwrap().into_records();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].attribute("order"), Some(&Value::from(3i64)));
}
