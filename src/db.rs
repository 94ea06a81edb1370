use sqlx::{postgres::PgPoolOptions, PgPool};

const CREATE_REPORTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS credit_reports (
        id UUID PRIMARY KEY,
        basic_details JSONB NOT NULL,
        report_summary JSONB NOT NULL,
        credit_accounts JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS credit_reports_created_at_idx ON credit_reports (created_at DESC)";

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query(CREATE_REPORTS_TABLE).execute(&pool).await?;
        sqlx::query(CREATE_CREATED_AT_INDEX).execute(&pool).await?;

        Ok(Self { pool })
    }
}
