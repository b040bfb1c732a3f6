#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use kroger_api::{ClientConfig, KrogerClient};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-access-token";

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new("test-client", "test-secret")
        .with_scopes(["product.compact"])
        .with_base_url(server.base_url())
        .with_retry(2, 1)
}

pub fn client_for(server: &MockServer) -> KrogerClient {
    KrogerClient::new(config_for(server)).expect("valid test config")
}

pub fn mock_token(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).path("/connect/oauth2/token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "access_token": TOKEN,
                "expires_in": 1800,
                "token_type": "bearer"
            }));
    })
}

pub fn bearer() -> String {
    format!("Bearer {}", TOKEN)
}

/// A product payload using only fields the models know about.
pub fn product_json(product_id: &str) -> Value {
    json!({
        "productId": product_id,
        "upc": product_id,
        "aisleLocations": [{
            "bayNumber": 13,
            "description": "Aisle 12",
            "number": 12,
            "numberOfFacings": 4,
            "sequenceNumber": 3,
            "side": "R",
            "shelfNumber": 2,
            "shelfPositionInBay": 1
        }],
        "brand": "Kroger",
        "categories": ["Dairy"],
        "countryOrigin": "UNITED STATES",
        "description": format!("Kroger Product {}", product_id),
        "items": [{
            "itemId": product_id,
            "inventory": {"stockLevel": "HIGH"},
            "favorite": false,
            "fulfillment": {"curbside": true, "delivery": true, "inStore": true, "shipToHome": false},
            "price": {"regular": 3.49, "promo": 2.99, "regularPerUnitEstimate": 3.49, "promoPerUnitEstimate": 2.99},
            "nationalPrice": {"regular": 3.79, "promo": 0.0},
            "size": "1 gal",
            "soldBy": "UNIT"
        }],
        "itemInformation": {"depth": 4.0, "height": 10.2, "width": 6.1},
        "temperature": {"indicator": "Refrigerated", "heatSensitive": false},
        "images": [{
            "perspective": "front",
            "featured": true,
            "sizes": [{"size": "large", "url": format!("https://www.kroger.com/product/images/large/front/{}", product_id)}]
        }],
        "productPageURI": format!("/p/kroger-product/{}", product_id)
    })
}

fn day(open: &str, close: &str) -> Value {
    json!({"open": open, "close": close, "open24": false})
}

/// A location payload using only fields the models know about.
pub fn location_json(location_id: &str) -> Value {
    json!({
        "locationId": location_id,
        "chain": "KROGER",
        "divisionNumber": 14,
        "storeNumber": 943,
        "phone": "5137817500",
        "name": "Kroger - Hyde Park",
        "address": {
            "addressLine1": "3760 Paxton Ave",
            "city": "Cincinnati",
            "state": "OH",
            "zipCode": "45209",
            "county": "Hamilton"
        },
        "geolocation": {"latitude": 39.1443, "longitude": -84.4317},
        "hours": {
            "Open24": false,
            "gmtOffset": "(UTC-05:00) Eastern Time (US & Canada)",
            "timezone": "America/New_York",
            "monday": day("06:00", "23:00"),
            "tuesday": day("06:00", "23:00"),
            "wednesday": day("06:00", "23:00"),
            "thursday": day("06:00", "23:00"),
            "friday": day("06:00", "23:00"),
            "saturday": day("06:00", "23:00"),
            "sunday": day("07:00", "22:00")
        },
        "departments": [
            {"departmentId": "09", "name": "Pharmacy", "phone": "5137817520", "hours": {
                "Open24": false,
                "monday": day("09:00", "21:00"),
                "tuesday": day("09:00", "21:00"),
                "wednesday": day("09:00", "21:00"),
                "thursday": day("09:00", "21:00"),
                "friday": day("09:00", "21:00"),
                "saturday": day("09:00", "18:00"),
                "sunday": day("10:00", "18:00")
            }},
            {"departmentId": "94", "name": "Pickup", "offsite": false}
        ]
    })
}

pub fn page(data: Vec<Value>, start: usize, limit: usize, total: usize) -> Value {
    json!({
        "data": data,
        "meta": {"pagination": {"start": start, "limit": limit, "total": total}}
    })
}
