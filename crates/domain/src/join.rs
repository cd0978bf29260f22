use chrono::{DateTime, Utc};

use crate::entities::{AssignmentMap, DriverRecord, RawDriver};

/// Merges the raw roster with the dispatcher assignments. Pure, no I/O.
///
/// Field reshaping happens here (`emailAddress` becomes `email`); optional
/// fields absent from the payload stay `None` and land as NULL. A driver
/// with no matching assignment keeps `dispatcher = None`, which is valid,
/// not an error. `updated_on` is stamped with the sync time of this run.
pub fn join_drivers(
    raw_drivers: &[RawDriver],
    assignments: &AssignmentMap,
    synced_at: DateTime<Utc>,
) -> Vec<DriverRecord> {
    raw_drivers
        .iter()
        .map(|raw| DriverRecord {
            driver_id: raw.driver_id.clone(),
            status: raw.status.clone(),
            first_name: raw.first_name.clone(),
            last_name: raw.last_name.clone(),
            truck_id: raw.truck_id.clone(),
            phone_number: raw.phone_number.clone(),
            email: raw.email_address.clone(),
            hired_on: raw.hired_on,
            updated_on: synced_at,
            company_id: raw.company_id.clone(),
            dispatcher: assignments.get(&raw.driver_id).cloned(),
            first_language: raw.first_language.clone(),
            second_language: raw.second_language.clone(),
            global_dnd: raw.global_dnd,
            safety_call: raw.safety_call,
            safety_message: raw.safety_message,
            hos_support: raw.hos_support,
            maintainance_call: raw.maintainance_call,
            maintainance_message: raw.maintainance_message,
            dispatch_call: raw.dispatch_call,
            dispatch_message: raw.dispatch_message,
            account_call: raw.account_call,
            account_message: raw.account_message,
        })
        .collect()
}
