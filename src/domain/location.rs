use crate::domain::coerce;
use crate::domain::ports::Resource;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A store from the Locations API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: String,
    pub name: String,
    pub chain: String,
    #[serde(with = "coerce::int")]
    pub division_number: i64,
    #[serde(with = "coerce::int")]
    pub store_number: i64,
    pub phone: String,
    pub address: Address,
    #[serde(default)]
    pub departments: Vec<Department>,
    pub geolocation: Geolocation,
    pub hours: Hours,
}

impl Location {
    pub fn department(&self, department_id: &str) -> Option<&Department> {
        self.departments
            .iter()
            .find(|d| d.department_id == department_id)
    }
}

impl Resource for Location {
    const ENDPOINT: &'static str = "locations";
    const NAME: &'static str = "location";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    #[serde(with = "coerce::hh_mm")]
    pub open: NaiveTime,
    #[serde(with = "coerce::hh_mm")]
    pub close: NaiveTime,
    pub open24: bool,
}

impl DayHours {
    /// Closing times at or before opening are treated as past midnight.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.open24 {
            return true;
        }
        if self.close > self.open {
            time >= self.open && time < self.close
        } else {
            time >= self.open || time < self.close
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hours {
    #[serde(rename = "Open24")]
    pub open24: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmt_offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Hours {
    pub fn day(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn is_open_at(&self, weekday: Weekday, time: NaiveTime) -> bool {
        self.open24 || self.day(weekday).is_open_at(time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Hours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<Geolocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offsite: Option<bool>,
}

/// A chain entry from `GET /chains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub name: String,
    #[serde(default)]
    pub division_numbers: Vec<String>,
}

impl Resource for Chain {
    const ENDPOINT: &'static str = "chains";
    const NAME: &'static str = "chain";
}

/// A department entry from `GET /departments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInfo {
    pub department_id: String,
    pub name: String,
}

impl Resource for DepartmentInfo {
    const ENDPOINT: &'static str = "departments";
    const NAME: &'static str = "department";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(open: &str, close: &str) -> serde_json::Value {
        json!({"open": open, "close": close, "open24": false})
    }

    fn hours() -> serde_json::Value {
        json!({
            "Open24": false,
            "gmtOffset": "(UTC-05:00) Eastern Time (US & Canada)",
            "timezone": "America/New_York",
            "monday": day("06:00", "23:00"),
            "tuesday": day("06:00", "23:00"),
            "wednesday": day("06:00", "23:00"),
            "thursday": day("06:00", "23:00"),
            "friday": day("06:00", "01:00"),
            "saturday": day("06:00", "23:00"),
            "sunday": {"open": "00:00", "close": "00:00", "open24": true}
        })
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_hours_by_weekday() {
        let hours: Hours = serde_json::from_value(hours()).unwrap();

        assert!(hours.is_open_at(Weekday::Mon, at(12, 0)));
        assert!(!hours.is_open_at(Weekday::Mon, at(23, 0)));
        assert!(!hours.is_open_at(Weekday::Mon, at(5, 59)));
        assert!(hours.is_open_at(Weekday::Fri, at(0, 30)));
        assert!(hours.is_open_at(Weekday::Sun, at(3, 0)));
        assert_eq!(hours.day(Weekday::Tue).open, at(6, 0));
    }

    #[test]
    fn test_open24_store_is_always_open() {
        let mut raw = hours();
        raw["Open24"] = json!(true);
        let hours: Hours = serde_json::from_value(raw).unwrap();
        assert!(hours.is_open_at(Weekday::Mon, at(3, 0)));
    }

    #[test]
    fn test_location_numbers_are_coerced() {
        let location: Location = serde_json::from_value(json!({
            "locationId": "01400943",
            "chain": "KROGER",
            "divisionNumber": "014",
            "storeNumber": "00943",
            "phone": "5137817500",
            "name": "Kroger - Hyde Park",
            "address": {
                "addressLine1": "3760 Paxton Ave",
                "city": "Cincinnati",
                "state": "OH",
                "zipCode": "45209",
                "county": "Hamilton"
            },
            "geolocation": {"latitude": 39.1443, "longitude": -84.4317, "latLng": "39.1443,-84.4317"},
            "hours": hours(),
            "departments": [
                {"departmentId": "09", "name": "Pharmacy", "phone": "5137817520"},
                {"departmentId": "94", "name": "Pickup", "offsite": false}
            ]
        }))
        .unwrap();

        assert_eq!(location.division_number, 14);
        assert_eq!(location.store_number, 943);
        assert_eq!(location.address.address_line2, None);
        assert_eq!(
            location.department("09").and_then(|d| d.phone.as_deref()),
            Some("5137817520")
        );
        assert_eq!(location.department("94").and_then(|d| d.offsite), Some(false));
        assert!(location.department("01").is_none());
    }
}
