//! Integration tests for the mapping and repository layer

use std::sync::Arc;
use uuid::Uuid;
use widerow::{
    FieldDef, FieldValues, MemoryExecutor, RecordMetadata, Repository, StoreRecord, StoreResult,
    TableRepository, Value, ValueKind,
};

// Test record: partitioned by country, clustered by name then id
#[derive(Debug, Clone, PartialEq)]
struct Person {
    country: String,
    first_name: String,
    last_name: String,
    id: Uuid,
    age: i32,
}

impl Person {
    fn new(country: &str, first: &str, last: &str, age: i32) -> Self {
        Self {
            country: country.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            id: Uuid::new_v4(),
            age,
        }
    }

    fn key(&self) -> Vec<Value> {
        vec![
            Value::text(self.country.clone()),
            Value::text(self.first_name.clone()),
            Value::text(self.last_name.clone()),
            Value::Uuid(self.id),
        ]
    }
}

impl StoreRecord for Person {
    fn metadata() -> RecordMetadata {
        RecordMetadata::new(
            "Person",
            vec![
                FieldDef::partition("country", ValueKind::Text),
                FieldDef::clustering("firstName", 0, ValueKind::Text),
                FieldDef::clustering("lastName", 1, ValueKind::Text),
                FieldDef::clustering("id", 2, ValueKind::Uuid),
                FieldDef::regular("age", ValueKind::Int),
            ],
        )
    }

    fn field_value(&self, identifier: &str) -> Option<Value> {
        match identifier {
            "country" => Some(Value::text(self.country.clone())),
            "firstName" => Some(Value::text(self.first_name.clone())),
            "lastName" => Some(Value::text(self.last_name.clone())),
            "id" => Some(Value::Uuid(self.id)),
            "age" => Some(Value::Int(self.age)),
            _ => None,
        }
    }

    fn from_fields(fields: &FieldValues) -> StoreResult<Self> {
        Ok(Self {
            country: fields.text("country")?,
            first_name: fields.text("firstName")?,
            last_name: fields.text("lastName")?,
            id: fields.uuid("id")?,
            age: fields.int("age")?,
        })
    }
}

async fn person_repository() -> TableRepository<Person> {
    let executor = Arc::new(MemoryExecutor::new());
    executor
        .register_table(
            "person",
            vec![
                "country".to_string(),
                "first_name".to_string(),
                "last_name".to_string(),
                "id".to_string(),
            ],
        )
        .await;
    TableRepository::new(executor).unwrap()
}

#[tokio::test]
async fn save_then_find_returns_the_exact_record() {
    let repo = person_repository().await;
    let bob = Person::new("UK", "Bob", "Bobbington", 50);

    let saved = repo.save(bob.clone()).await.unwrap();
    assert_eq!(saved, bob);

    let found = repo.find(&bob.key()).await.unwrap();
    assert_eq!(found, Some(bob));
}

#[tokio::test]
async fn find_with_wrong_key_arity_is_a_validation_error() {
    let repo = person_repository().await;

    let err = repo
        .find(&[Value::text("UK"), Value::text("Bob")])
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = repo.delete(&[Value::text("UK")]).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn saving_twice_is_idempotent() {
    let repo = person_repository().await;
    let bob = Person::new("UK", "Bob", "Bobbington", 50);

    repo.save(bob.clone()).await.unwrap();
    repo.save(bob.clone()).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all, vec![bob]);
}

#[tokio::test]
async fn save_with_same_key_updates_the_row() {
    let repo = person_repository().await;
    let bob = Person::new("UK", "Bob", "Bobbington", 50);
    repo.save(bob.clone()).await.unwrap();

    // Same composite key, different non-key field
    let older_bob = Person { age: 51, ..bob.clone() };
    repo.save(older_bob.clone()).await.unwrap();

    let found = repo.find(&bob.key()).await.unwrap();
    assert_eq!(found, Some(older_bob));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_then_find_returns_absent_and_delete_is_idempotent() {
    let repo = person_repository().await;
    let bob = Person::new("UK", "Bob", "Bobbington", 50);
    repo.save(bob.clone()).await.unwrap();

    repo.delete(&bob.key()).await.unwrap();
    assert_eq!(repo.find(&bob.key()).await.unwrap(), None);

    // Deleting an absent key is a no-op, not an error
    repo.delete(&bob.key()).await.unwrap();
}

#[tokio::test]
async fn partition_scan_returns_exactly_the_partition() {
    let repo = person_repository().await;
    let bob = Person::new("UK", "Bob", "Bobbington", 50);
    let alice = Person::new("UK", "Alice", "Anderson", 40);
    let carol = Person::new("US", "Carol", "Carlson", 30);

    for person in [bob.clone(), alice.clone(), carol.clone()] {
        repo.save(person).await.unwrap();
    }

    let uk = repo
        .find_by_partition(&[Value::text("UK")])
        .await
        .unwrap();
    assert_eq!(uk.len(), 2);
    assert!(uk.contains(&bob));
    assert!(uk.contains(&alice));
    assert!(!uk.contains(&carol));

    let us = repo
        .find_by_partition(&[Value::text("US")])
        .await
        .unwrap();
    assert_eq!(us, vec![carol]);
}

#[tokio::test]
async fn partition_scan_arity_is_checked() {
    let repo = person_repository().await;

    let err = repo.find_by_partition(&[]).await.unwrap_err();
    assert!(err.is_validation());

    let err = repo
        .find_by_partition(&[Value::text("UK"), Value::text("Bob")])
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn find_all_returns_every_partition() {
    let repo = person_repository().await;
    repo.save(Person::new("UK", "Bob", "Bobbington", 50))
        .await
        .unwrap();
    repo.save(Person::new("US", "Carol", "Carlson", 30))
        .await
        .unwrap();
    repo.save(Person::new("FR", "Denis", "Dupont", 60))
        .await
        .unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn full_scenario_save_find_scan_delete() {
    let repo = person_repository().await;
    let bob = Person::new("UK", "Bob", "Bobbington", 50);
    let id = bob.id;

    repo.save(bob.clone()).await.unwrap();
    repo.save(Person::new("UK", "Alice", "Anderson", 40))
        .await
        .unwrap();
    repo.save(Person::new("US", "Carol", "Carlson", 30))
        .await
        .unwrap();

    // Point lookup by the full composite key, in declared order
    let key = vec![
        Value::text("UK"),
        Value::text("Bob"),
        Value::text("Bobbington"),
        Value::Uuid(id),
    ];
    assert_eq!(repo.find(&key).await.unwrap(), Some(bob.clone()));

    // Partition scan sees Bob alongside the other UK record, never the US one
    let uk = repo
        .find_by_partition(&[Value::text("UK")])
        .await
        .unwrap();
    assert_eq!(uk.len(), 2);
    assert!(uk.contains(&bob));

    repo.delete(&key).await.unwrap();
    assert_eq!(repo.find(&key).await.unwrap(), None);
}

#[tokio::test]
async fn concurrent_reads_share_one_repository() {
    let repo = Arc::new(person_repository().await);
    let bob = Person::new("UK", "Bob", "Bobbington", 50);
    repo.save(bob.clone()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = Arc::clone(&repo);
        let key = bob.key();
        handles.push(tokio::spawn(async move {
            repo.find(&key).await.unwrap().unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), bob);
    }
}
