//! PostgreSQL customer store tests
//!
//! Every test starts its own container; run with `cargo test -- --ignored`.

use core_kernel::{AdapterHealth, CustomerId, HealthCheckable};
use domain_customer::CustomerStore;
use infra_db::PostgresCustomerStore;
use test_utils::{assert_approx_eq, db_test, CustomerRecordBuilder};

db_test!(test_insert_assigns_id_and_timestamps, |pool| {
    let store = PostgresCustomerStore::new(pool);
    let saved = store.save(CustomerRecordBuilder::new().build()).await.unwrap();

    assert_eq!(saved.id, Some(CustomerId::new(1)));
    assert!(saved.creation_timestamp.is_some());
    assert!(saved.update_timestamp.is_some());
});

db_test!(test_update_keeps_creation_timestamp, |pool| {
    let store = PostgresCustomerStore::new(pool);
    let mut saved = store.save(CustomerRecordBuilder::new().build()).await.unwrap();
    let created = saved.creation_timestamp;

    saved.first_name = "Pedro".to_string();
    let updated = store.save(saved).await.unwrap();

    assert_eq!(updated.first_name, "Pedro");
    assert_eq!(updated.creation_timestamp, created);
    assert!(updated.update_timestamp >= created);
});

db_test!(test_update_of_missing_row_is_not_found, |pool| {
    let store = PostgresCustomerStore::new(pool);
    let ghost = CustomerRecordBuilder::new().with_id(999).build();

    let error = store.save(ghost).await.unwrap_err();
    assert!(error.is_not_found());
});

db_test!(test_find_all_newest_first, |pool| {
    let store = PostgresCustomerStore::new(pool);
    for name in ["Ana", "Luis", "Eva"] {
        store
            .save(CustomerRecordBuilder::new().with_names(name, "Pérez").build())
            .await
            .unwrap();
    }

    let names: Vec<_> = store
        .find_all_order_by_creation_desc()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.first_name)
        .collect();

    assert_eq!(names, vec!["Eva", "Luis", "Ana"]);
});

db_test!(test_delete_then_find_is_none, |pool| {
    let store = PostgresCustomerStore::new(pool);
    let saved = store.save(CustomerRecordBuilder::new().build()).await.unwrap();

    store.delete(&saved).await.unwrap();

    let id = saved.id.unwrap();
    assert!(store.find_by_id(id).await.unwrap().is_none());
});

db_test!(test_delete_of_vanished_row_is_not_found, |pool| {
    let store = PostgresCustomerStore::new(pool);
    let saved = store.save(CustomerRecordBuilder::new().build()).await.unwrap();

    store.delete(&saved).await.unwrap();
    let error = store.delete(&saved).await.unwrap_err();
    assert!(error.is_not_found());
});

db_test!(test_aggregates, |pool| {
    let store = PostgresCustomerStore::new(pool);
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(store.average_age().await.unwrap(), None);
    assert_eq!(store.age_standard_deviation().await.unwrap(), None);

    store.save(CustomerRecordBuilder::new().aged(20).build()).await.unwrap();
    store.save(CustomerRecordBuilder::new().aged(40).build()).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    assert_approx_eq(store.average_age().await.unwrap().unwrap(), 30.0, 1e-9);
    assert_approx_eq(store.age_standard_deviation().await.unwrap().unwrap(), 10.0, 1e-9);
});

db_test!(test_age_check_constraint, |pool| {
    let store = PostgresCustomerStore::new(pool);
    let mut record = CustomerRecordBuilder::new().build();
    record.age = 151;

    let error = store.save(record).await.unwrap_err();
    assert!(matches!(error, core_kernel::PortError::Validation { .. }));
});

db_test!(test_health_check_healthy, |pool| {
    let store = PostgresCustomerStore::new(pool);
    let health = store.health_check().await;

    assert_eq!(health.status, AdapterHealth::Healthy);
});
