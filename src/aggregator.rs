//! Summary counters copied from the bureau's pre-aggregated sections.
//!
//! Each counter is read from a fixed path and defaults to `0` on its own; the
//! values are taken as authoritative and not checked against each other or
//! against the account list.

use crate::accessor::{MissingElement, Node};
use crate::models::Summary;
use crate::schema;

/// One summary field: where it lives under its section and where it goes.
struct Counter {
    field: &'static str,
    assign: fn(&mut Summary, f64),
}

const CREDIT_ACCOUNT_COUNTERS: &[Counter] = &[
    Counter {
        field: schema::CREDIT_ACCOUNT_TOTAL,
        assign: |summary, value| summary.total_accounts = value,
    },
    Counter {
        field: schema::CREDIT_ACCOUNT_ACTIVE,
        assign: |summary, value| summary.active_accounts = value,
    },
    Counter {
        field: schema::CREDIT_ACCOUNT_CLOSED,
        assign: |summary, value| summary.closed_accounts = value,
    },
];

const OUTSTANDING_BALANCE_COUNTERS: &[Counter] = &[
    Counter {
        field: schema::OUTSTANDING_BALANCE_ALL,
        assign: |summary, value| summary.current_balance = value,
    },
    Counter {
        field: schema::OUTSTANDING_BALANCE_SECURED,
        assign: |summary, value| summary.secured_amount = value,
    },
    Counter {
        field: schema::OUTSTANDING_BALANCE_UNSECURED,
        assign: |summary, value| summary.unsecured_amount = value,
    },
];

fn apply(section: Node<'_>, counters: &[Counter], summary: &mut Summary) {
    for counter in counters {
        (counter.assign)(summary, section.number_or_default(&[counter.field]));
    }
}

/// Reads the summary counters under `profile`.
///
/// The credit-account and outstanding-balance sections must be present (their
/// fields may not be); the enquiry section is optional.
pub fn extract_summary(profile: Node<'_>) -> Result<Summary, MissingElement> {
    let credit_accounts = profile.require(schema::CREDIT_ACCOUNT_SUMMARY)?;
    let outstanding = profile.require(schema::OUTSTANDING_BALANCE_SUMMARY)?;

    let mut summary = Summary::default();
    apply(credit_accounts, CREDIT_ACCOUNT_COUNTERS, &mut summary);
    apply(outstanding, OUTSTANDING_BALANCE_COUNTERS, &mut summary);
    summary.last_7_days_enquiries = profile.number_or_default(schema::ENQUIRY_LAST_7_DAYS);

    Ok(summary)
}
