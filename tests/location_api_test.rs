mod common;

use chrono::{NaiveTime, Weekday};
use common::*;
use httpmock::prelude::*;
use kroger_api::{KrogerError, LocationQuery};
use serde_json::json;

#[tokio::test]
async fn test_search_locations_by_zip() {
    let server = MockServer::start();
    mock_token(&server);
    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/locations")
            .header("Authorization", bearer())
            .query_param("filter.zipCode.near", "45209")
            .query_param("filter.radiusInMiles", "5")
            .query_param("filter.chain", "Kroger")
            .query_param("filter.department", "09")
            .query_param("filter.limit", "2")
            .query_param("filter.start", "0");
        then.status(200).json_body(page(
            vec![location_json("01400943"), location_json("01400376")],
            0,
            2,
            7,
        ));
    });

    let client = client_for(&server);
    let query = LocationQuery::near_zip("45209")
        .radius_miles(5)
        .department("09")
        .top_n(2);
    let locations = client.search_locations(&query).await.unwrap();

    search_mock.assert();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations.total, Some(7));

    let ids: Vec<String> = locations.into_iter().map(|l| l.location_id).collect();
    assert_eq!(ids, vec!["01400943", "01400376"]);
}

#[tokio::test]
async fn test_get_location_maps_fixture_exactly() {
    let server = MockServer::start();
    mock_token(&server);
    let location_mock = server.mock(|when, then| {
        when.method(GET).path("/locations/01400943");
        then.status(200)
            .json_body(json!({"data": location_json("01400943")}));
    });

    let client = client_for(&server);
    let location = client.get_location("01400943").await.unwrap();

    location_mock.assert();
    assert_eq!(location.name, "Kroger - Hyde Park");
    assert_eq!(location.chain, "KROGER");
    assert_eq!(location.division_number, 14);
    assert_eq!(location.store_number, 943);
    assert_eq!(location.address.zip_code, "45209");
    assert_eq!(location.address.county.as_deref(), Some("Hamilton"));
    assert_eq!(location.geolocation.latitude, 39.1443);
    assert_eq!(location.hours.timezone.as_deref(), Some("America/New_York"));
    assert_eq!(
        location.hours.day(Weekday::Sun).open,
        NaiveTime::from_hms_opt(7, 0, 0).unwrap()
    );

    let pharmacy = location.department("09").unwrap();
    assert_eq!(pharmacy.name, "Pharmacy");
    let pharmacy_hours = pharmacy.hours.as_ref().unwrap();
    assert!(pharmacy_hours.is_open_at(Weekday::Sat, NaiveTime::from_hms_opt(17, 59, 0).unwrap()));
    assert!(!pharmacy_hours.is_open_at(Weekday::Sat, NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
}

#[tokio::test]
async fn test_zip_and_coordinates_are_exclusive() {
    let server = MockServer::start();
    let token_mock = mock_token(&server);
    let client = client_for(&server);

    let both = LocationQuery {
        lat_long: Some((39.1, -84.4)),
        ..LocationQuery::near_zip("45209")
    };
    let neither = LocationQuery::default();

    for query in [both, neither] {
        let err = client.search_locations(&query).await.unwrap_err();
        assert!(matches!(err, KrogerError::ValidationError { .. }));
    }
    token_mock.assert_hits(0);
}

#[tokio::test]
async fn test_chains_and_departments() {
    let server = MockServer::start();
    let token_mock = mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path("/chains");
        then.status(200).json_body(json!({"data": [
            {"name": "KROGER", "divisionNumbers": ["014", "016"]},
            {"name": "RALPHS", "divisionNumbers": ["703"]}
        ]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/chains/RALPHS");
        then.status(200)
            .json_body(json!({"data": {"name": "RALPHS", "divisionNumbers": ["703"]}}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/departments");
        then.status(200).json_body(json!({"data": [
            {"departmentId": "09", "name": "Pharmacy"},
            {"departmentId": "94", "name": "Pickup"}
        ]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/departments/09");
        then.status(200)
            .json_body(json!({"data": {"departmentId": "09", "name": "Pharmacy"}}));
    });

    let client = client_for(&server);

    let chains = client.list_chains().await.unwrap();
    assert_eq!(chains.len(), 2);
    assert_eq!(chains[0].division_numbers, vec!["014", "016"]);

    let ralphs = client.get_chain("RALPHS").await.unwrap();
    assert_eq!(ralphs.name, "RALPHS");

    let departments = client.list_departments().await.unwrap();
    assert_eq!(departments[1].name, "Pickup");

    let pharmacy = client.get_department("09").await.unwrap();
    assert_eq!(pharmacy.department_id, "09");

    token_mock.assert_hits(1);
}
