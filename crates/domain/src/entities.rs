use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque bearer credential returned by the token endpoint.
///
/// Re-acquired at the start of every run and dropped at run end; never
/// cached across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `driverId -> dispatcher display name`, rebuilt from scratch every run.
pub type AssignmentMap = HashMap<String, String>;

/// One entry of the dispatcher reference table. The table is configuration
/// data, and its order matters: when a driver shows up under more than one
/// dispatcher, the entry later in the table wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherEntry {
    pub id: i64,
    pub name: String,
}

/// A driver payload exactly as the fleet API returns it. Everything except
/// the identifier is optional; unknown fields are ignored. A payload
/// without a `driverId` fails deserialization, which surfaces as a fetch
/// failure and aborts the run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDriver {
    pub driver_id: String,
    pub status: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub truck_id: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub hired_on: Option<DateTime<Utc>>,
    pub company_id: Option<String>,
    pub first_language: Option<String>,
    pub second_language: Option<String>,
    // Communication preference flags, carried through unchanged.
    // "maintainance" is spelled the way the API spells it.
    pub global_dnd: Option<bool>,
    pub safety_call: Option<bool>,
    pub safety_message: Option<bool>,
    pub hos_support: Option<bool>,
    pub maintainance_call: Option<bool>,
    pub maintainance_message: Option<bool>,
    pub dispatch_call: Option<bool>,
    pub dispatch_message: Option<bool>,
    pub account_call: Option<bool>,
    pub account_message: Option<bool>,
}

/// The merged record written to the `drivers` table, one row per driver.
///
/// `hired_on` is write-once (never overwritten after the initial insert);
/// `updated_on` is stamped with the sync time on every run. `dispatcher` is
/// best effort: a driver without a matching assignment keeps NULL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRecord {
    pub driver_id: String,
    pub status: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub truck_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub hired_on: Option<DateTime<Utc>>,
    pub updated_on: DateTime<Utc>,
    pub company_id: Option<String>,
    pub dispatcher: Option<String>,
    pub first_language: Option<String>,
    pub second_language: Option<String>,
    pub global_dnd: Option<bool>,
    pub safety_call: Option<bool>,
    pub safety_message: Option<bool>,
    pub hos_support: Option<bool>,
    pub maintainance_call: Option<bool>,
    pub maintainance_message: Option<bool>,
    pub dispatch_call: Option<bool>,
    pub dispatch_message: Option<bool>,
    pub account_call: Option<bool>,
    pub account_message: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_driver_deserializes_camel_case() {
        let json = r#"{
            "driverId": "A1",
            "firstName": "Ana",
            "emailAddress": "a@x.com",
            "hosSupport": true,
            "maintainanceCall": false,
            "someFieldWeDoNotKnow": 42
        }"#;

        let driver: RawDriver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.driver_id, "A1");
        assert_eq!(driver.first_name.as_deref(), Some("Ana"));
        assert_eq!(driver.email_address.as_deref(), Some("a@x.com"));
        assert_eq!(driver.hos_support, Some(true));
        assert_eq!(driver.maintainance_call, Some(false));
        assert!(driver.status.is_none());
    }

    #[test]
    fn test_driver_without_id_is_rejected() {
        // driverId is the primary key; a record arriving without one must
        // fail the parse rather than collapse into an empty-string row.
        let result = serde_json::from_str::<RawDriver>(r#"{"status": "Active"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_driver_accepts_rfc3339_hired_on() {
        let json = r#"{"driverId": "A1", "hiredOn": "2021-03-15T00:00:00Z"}"#;
        let driver: RawDriver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.hired_on.unwrap().to_rfc3339(), "2021-03-15T00:00:00+00:00");
    }

    #[test]
    fn test_api_token_round_trip() {
        let token = ApiToken::new("abc123");
        assert_eq!(token.as_str(), "abc123");
    }
}
