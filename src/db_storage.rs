use crate::errors::{AppError, ResultExt};
use crate::models::{Report, ReportRow, StoredReport};
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Database storage for parsed credit reports
pub struct ReportStorage {
    pool: PgPool,
}

impl ReportStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a completed report, assigning it a new id and creation time
    pub async fn store_report(&self, report: &Report) -> Result<StoredReport, AppError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO credit_reports (id, basic_details, report_summary, credit_accounts, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(Json(&report.basic_details))
        .bind(Json(&report.report_summary))
        .bind(Json(&report.credit_accounts))
        .bind(created_at)
        .execute(&self.pool)
        .await
        .context("Failed to store credit report")?;

        tracing::info!(
            "Stored credit report {} ({} accounts)",
            id,
            report.credit_accounts.len()
        );

        Ok(StoredReport {
            id,
            report: report.clone(),
            created_at,
        })
    }

    /// All stored reports, newest first
    pub async fn list_reports(&self) -> Result<Vec<StoredReport>, AppError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, basic_details, report_summary, credit_accounts, created_at
            FROM credit_reports
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list credit reports")?;

        Ok(rows.into_iter().map(StoredReport::from).collect())
    }

    pub async fn get_report(&self, id: Uuid) -> Result<Option<StoredReport>, AppError> {
        let row = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, basic_details, report_summary, credit_accounts, created_at
            FROM credit_reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load credit report")?;

        Ok(row.map(StoredReport::from))
    }
}
