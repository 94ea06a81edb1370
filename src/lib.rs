//! Credit Report API Library
//!
//! Turns bureau credit report XML into a canonical, strongly-typed report and
//! serves stored reports over HTTP.
//!
//! # Modules
//!
//! - `document`: Raw document input and UTF-8 decoding.
//! - `xml_tree`: Generic XML to tree conversion.
//! - `accessor`: Path lookup and default coercion over the tree.
//! - `schema`: Element paths of the bureau document.
//! - `normalizer`: Builds the canonical report (`parse_credit_report`).
//! - `aggregator`: Summary counters.
//! - `models`: Report and storage models.
//! - `errors`: `ParseFailure` and HTTP error types.
//! - `config`: Configuration management.
//! - `db`: Database connection and schema setup.
//! - `db_storage`: Report persistence.
//! - `handlers`: HTTP request handlers.
//! - `api`: Routing.

pub mod accessor;
pub mod aggregator;
pub mod api;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod document;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod schema;
pub mod xml_tree;

pub use document::DocumentInput;
pub use errors::ParseFailure;
pub use models::{Account, Identity, Report, Summary};
pub use normalizer::parse_credit_report;
