//! Bureau document to canonical report
//!
//! 1. Decode the input and build the generic XML tree
//! 2. Locate the `INProfileResponse` profile
//! 3. Read applicant identity and score
//! 4. Normalize the account list to a sequence and map each entry
//! 5. Read the summary counters
//!
//! Any missing required branch or malformed document aborts the whole parse
//! with a single `ParseFailure`; no partial report is returned.

use crate::accessor::{MissingElement, Node};
use crate::aggregator::extract_summary;
use crate::document::DocumentInput;
use crate::errors::ParseFailure;
use crate::models::{Account, Identity, Report};
use crate::schema;
use crate::xml_tree::parse_tree;

/// Parses a bureau credit report into the canonical [`Report`].
///
/// Accepts raw bytes or text. Calls share no state, so independent documents
/// can be parsed concurrently.
pub fn parse_credit_report(input: impl Into<DocumentInput>) -> Result<Report, ParseFailure> {
    let text = input.into().into_text();
    let tree = parse_tree(&text)?;
    let report = normalize(Node::new(&tree))?;

    tracing::debug!(
        accounts = report.credit_accounts.len(),
        credit_score = report.basic_details.credit_score,
        "Credit report normalized"
    );

    Ok(report)
}

/// Builds the report from an already-parsed document tree.
pub fn normalize(document: Node<'_>) -> Result<Report, MissingElement> {
    let profile = document.require(&[schema::PROFILE])?;
    let applicant = profile.require(schema::APPLICANT)?;
    let score = profile.require(schema::SCORE)?;
    profile.require(schema::CAIS_ACCOUNT)?;

    let account_nodes = profile.sequence_at(schema::ACCOUNT_DETAILS);
    let credit_accounts: Vec<Account> = account_nodes
        .iter()
        .map(|node| map_account(*node))
        .collect();

    let first_name = applicant.string_or_default(schema::FIRST_NAME);
    let last_name = applicant.string_or_default(schema::LAST_NAME);

    // PAN is only carried on account holder records.
    let pan = account_nodes
        .first()
        .map(|first| first.string_or_default(schema::HOLDER_PAN))
        .unwrap_or_default();

    let basic_details = Identity {
        name: format!("{} {}", first_name, last_name).trim().to_string(),
        mobile_phone: applicant.string_or_default(schema::MOBILE_PHONE),
        pan,
        credit_score: score.number_or_default(schema::BUREAU_SCORE),
    };

    let report_summary = extract_summary(profile)?;

    Ok(Report {
        basic_details,
        report_summary,
        credit_accounts,
    })
}

fn map_account(account: Node<'_>) -> Account {
    Account {
        account_number: account.string_or_default(schema::ACCOUNT_NUMBER),
        bank_name: account.string_or_default(schema::SUBSCRIBER_NAME),
        current_balance: account.number_or_default(schema::CURRENT_BALANCE),
        overdue_amount: account.number_or_default(schema::AMOUNT_PAST_DUE),
        address: account
            .at(schema::HOLDER_ADDRESS)
            .map(build_address)
            .unwrap_or_default(),
    }
}

fn build_address(address: Node<'_>) -> String {
    join_address_lines(
        schema::ADDRESS_LINES
            .iter()
            .map(|line| address.text_at(&[*line])),
    )
}

/// Trims each line, drops blank or absent ones and joins the rest with ", ".
pub fn join_address_lines<'a>(lines: impl IntoIterator<Item = Option<&'a str>>) -> String {
    lines
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
