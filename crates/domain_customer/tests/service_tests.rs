//! Customer service scenarios over the in-memory store

use std::sync::Arc;

use core_kernel::{plus_years, AdapterHealth, CustomerId};
use domain_customer::ports::mock::{InMemoryCustomerStore, RecordingNotificationSink};
use domain_customer::{topics, CustomerService, MILESTONE_AGE_YEARS};
use test_utils::{
    assert_approx_eq, assert_invalid_data, assert_not_found, assert_same_customer,
    assert_view_matches_request, CreateRequestBuilder, CustomerFixtures, CustomerRecordBuilder,
    DateFixtures, UpdateRequestBuilder,
};

fn service_over(store: InMemoryCustomerStore) -> (CustomerService, Arc<RecordingNotificationSink>) {
    let sink = Arc::new(RecordingNotificationSink::new());
    (CustomerService::new(Arc::new(store), sink.clone()), sink)
}

fn service() -> (CustomerService, Arc<RecordingNotificationSink>) {
    service_over(InMemoryCustomerStore::new())
}

#[tokio::test]
async fn test_create_trims_names_and_publishes_record() {
    let (service, sink) = service();
    let request = CreateRequestBuilder::new()
        .with_first_name("  María José ")
        .with_last_name("Núñez ")
        .build();

    let view = service.create(&request).await.unwrap();

    assert_eq!(view.first_name, "María José");
    assert_eq!(view.last_name, "Núñez");

    let created = sink.published_to(topics::CUSTOMER_CREATED).await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["firstName"], "María José");
    assert_eq!(created[0]["id"], serde_json::json!(view.id.unwrap().value()));
}

#[tokio::test]
async fn test_create_accepts_one_year_tolerance() {
    let (service, _) = service();

    for age in [29, 30, 31] {
        let request = CreateRequestBuilder::new()
            .with_age(age)
            .with_birth_date(DateFixtures::years_ago(30))
            .build();
        let view = service.create(&request).await.unwrap();
        assert_view_matches_request(&view, &request);
    }

    let too_old = CreateRequestBuilder::new()
        .with_age(32)
        .with_birth_date(DateFixtures::years_ago(30))
        .build();
    let expected = format!(
        "Age 32 does not match birth date {} (calculated age: 30)",
        DateFixtures::years_ago(30)
    );
    assert_invalid_data(service.create(&too_old).await, &expected);
}

#[tokio::test]
async fn test_create_missing_field_is_invalid_data() {
    let (service, sink) = service();

    let request = CreateRequestBuilder::new().without_last_name().build();

    assert_invalid_data(service.create(&request).await, "Last name cannot be null or empty");
    assert!(sink.published().await.is_empty());
}

#[tokio::test]
async fn test_get_all_newest_first() {
    let (service, _) = service();
    for request in [CustomerFixtures::juan(), CustomerFixtures::maria(), CustomerFixtures::luis()] {
        service.create(&request).await.unwrap();
    }

    let names: Vec<_> = service
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.first_name)
        .collect();

    assert_eq!(names, vec!["Luis", "María José", "Juan"]);
}

#[tokio::test]
async fn test_get_by_id_matches_created() {
    let (service, _) = service();
    let created = service.create(&CustomerFixtures::juan()).await.unwrap();

    let fetched = service.get_by_id(created.id.unwrap()).await.unwrap();

    assert_same_customer(&fetched, &created);
}

#[tokio::test]
async fn test_update_single_field_skips_age_check() {
    let (service, sink) = service();
    let created = service.create(&CustomerFixtures::juan()).await.unwrap();
    let id = created.id.unwrap();

    // Only one of the pair is supplied, so the stored birth date is not compared
    let updated = service
        .update(id, &UpdateRequestBuilder::new().age(50).build())
        .await
        .unwrap();

    assert_eq!(updated.age, 50);
    assert_eq!(updated.birth_date, created.birth_date);
    assert_eq!(updated.estimated_milestone_date, created.estimated_milestone_date);

    let payloads = sink.published_to(topics::CUSTOMER_UPDATED).await;
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["age"], 50);
}

#[tokio::test]
async fn test_update_pair_is_checked() {
    let (service, sink) = service();
    let created = service.create(&CustomerFixtures::juan()).await.unwrap();
    let id = created.id.unwrap();

    let request = UpdateRequestBuilder::new()
        .age(40)
        .birth_date(DateFixtures::years_ago(30))
        .build();

    let expected = format!(
        "Age 40 does not match birth date {} (calculated age: 30)",
        DateFixtures::years_ago(30)
    );
    assert_invalid_data(service.update(id, &request).await, &expected);
    assert_eq!(service.get_by_id(id).await.unwrap().age, 30);
    assert!(sink.published_to(topics::CUSTOMER_UPDATED).await.is_empty());
}

#[tokio::test]
async fn test_update_birth_date_recomputes_milestone() {
    let (service, _) = service();
    let created = service.create(&CustomerFixtures::juan()).await.unwrap();
    let birth = DateFixtures::years_ago(31);

    let updated = service
        .update(
            created.id.unwrap(),
            &UpdateRequestBuilder::new().age(31).birth_date(birth).build(),
        )
        .await
        .unwrap();

    assert_eq!(
        updated.estimated_milestone_date,
        Some(plus_years(birth, MILESTONE_AGE_YEARS).unwrap())
    );
}

#[tokio::test]
async fn test_update_blank_name_is_rejected() {
    let (service, _) = service();
    let created = service.create(&CustomerFixtures::juan()).await.unwrap();
    let id = created.id.unwrap();

    let request = UpdateRequestBuilder::new().first_name("  ").last_name("Gómez").build();

    assert_invalid_data(service.update(id, &request).await, "First name cannot be empty");
    assert_eq!(service.get_by_id(id).await.unwrap().last_name, "Pérez");
}

#[tokio::test]
async fn test_delete_publishes_id() {
    let (service, sink) = service();
    let created = service.create(&CustomerFixtures::juan()).await.unwrap();
    let id = created.id.unwrap();

    service.delete(id).await.unwrap();

    assert_not_found(service.get_by_id(id).await);
    assert_eq!(
        sink.published_to(topics::CUSTOMER_DELETED).await,
        vec![serde_json::json!(id.value())]
    );
}

#[tokio::test]
async fn test_missing_id_message_names_id() {
    let (service, _) = service();

    let error = service.get_by_id(CustomerFixtures::missing_id()).await.unwrap_err();

    assert_eq!(error.to_string(), "Customer not found with ID: 999");
}

#[tokio::test]
async fn test_stats_over_seeded_store() {
    let records = [20, 30, 40]
        .into_iter()
        .map(|age| CustomerRecordBuilder::new().aged(age).build())
        .collect();
    let (store, _) = InMemoryCustomerStore::with_records(records).await.unwrap();
    let (service, _) = service_over(store);

    let stats = service.get_stats().await.unwrap();

    assert_eq!(stats.total_count, 3);
    assert_approx_eq(stats.average_age.unwrap(), 30.0, 1e-9);
    // Population form: sqrt(200 / 3)
    assert_approx_eq(stats.age_standard_deviation.unwrap(), (200.0f64 / 3.0).sqrt(), 1e-9);
    assert_eq!(service.get_average_age().await.unwrap(), stats.average_age);
    assert_eq!(
        service.get_age_standard_deviation().await.unwrap(),
        stats.age_standard_deviation
    );
}

#[tokio::test]
async fn test_stats_empty_store() {
    let (service, _) = service();

    let stats = service.get_stats().await.unwrap();

    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.average_age, None);
    assert_eq!(stats.age_standard_deviation, None);
}

#[tokio::test]
async fn test_health_reflects_store() {
    let (healthy, _) = service();
    let (unhealthy, _) = service_over(InMemoryCustomerStore::unhealthy());

    assert_eq!(healthy.health_check().await.status, AdapterHealth::Healthy);
    assert_eq!(unhealthy.health_check().await.status, AdapterHealth::Unhealthy);
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let (service, _) = service();
    let first = service.create(&CustomerFixtures::juan()).await.unwrap();
    service.delete(first.id.unwrap()).await.unwrap();

    let second = service.create(&CustomerFixtures::juan()).await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(second.id > Some(CustomerId::new(1)));
}
