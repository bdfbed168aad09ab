//! PostgreSQL schema migrations for salary-survey storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS salary_survey (
            id BIGSERIAL PRIMARY KEY,
            date TIMESTAMP,
            title TEXT,
            company_size DOUBLE PRECISION,
            accoms TEXT,
            experience DOUBLE PRECISION,
            currency TEXT,
            pay_range TEXT,
            area TEXT,
            company_origin TEXT,
            work_style TEXT,
            work_area TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_salary_survey_pay_range ON salary_survey (pay_range)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_salary_survey_experience ON salary_survey (experience)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_salary_survey_company_size ON salary_survey (company_size)",
    )
    .execute(pool)
    .await?;

    tracing::info!("PostgreSQL migrations applied");
    Ok(())
}
