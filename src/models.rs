use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// ============ Canonical Report ============

/// Canonical credit report extracted from one bureau document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub basic_details: Identity,
    pub report_summary: Summary,
    pub credit_accounts: Vec<Account>,
}

/// Applicant identity and score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// First and last name joined by a space, trimmed.
    pub name: String,
    pub mobile_phone: String,
    /// Income tax PAN. Taken from the first account's holder details, not from
    /// the applicant section, so a report without accounts has no PAN.
    pub pan: String,
    #[serde(serialize_with = "serialize_number")]
    pub credit_score: f64,
}

/// Pre-aggregated counters as reported by the bureau.
///
/// Values are copied from the summary section and never reconciled with the
/// account list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(serialize_with = "serialize_number")]
    pub total_accounts: f64,
    #[serde(serialize_with = "serialize_number")]
    pub active_accounts: f64,
    #[serde(serialize_with = "serialize_number")]
    pub closed_accounts: f64,
    #[serde(serialize_with = "serialize_number")]
    pub current_balance: f64,
    #[serde(serialize_with = "serialize_number")]
    pub secured_amount: f64,
    #[serde(serialize_with = "serialize_number")]
    pub unsecured_amount: f64,
    #[serde(rename = "last7DaysEnquiries", serialize_with = "serialize_number")]
    pub last_7_days_enquiries: f64,
}

/// One credit account line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: String,
    pub bank_name: String,
    #[serde(serialize_with = "serialize_number")]
    pub current_balance: f64,
    #[serde(serialize_with = "serialize_number")]
    pub overdue_amount: f64,
    /// Non-blank address lines joined by ", ".
    pub address: String,
}

/// Largest magnitude below which every whole `f64` is an exact `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes whole numbers as JSON integers (`1200` rather than `1200.0`).
pub fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

// ============ Stored Reports ============

/// A report as persisted, with its storage id and creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: Uuid,
    #[serde(flatten)]
    pub report: Report,
    pub created_at: DateTime<Utc>,
}

/// Row of the `credit_reports` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub basic_details: Json<Identity>,
    pub report_summary: Json<Summary>,
    pub credit_accounts: Json<Vec<Account>>,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRow> for StoredReport {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            report: Report {
                basic_details: row.basic_details.0,
                report_summary: row.report_summary.0,
                credit_accounts: row.credit_accounts.0,
            },
            created_at: row.created_at,
        }
    }
}

// ============ API Models ============

/// Response body for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub id: Uuid,
}
