use sqlx::{postgres::PgPoolOptions, PgPool};

const CREATE_STUDENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id          BIGSERIAL PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    gender      TEXT NOT NULL,
    joke        TEXT,
    booking_id  INTEGER
)
"#;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query(CREATE_STUDENTS_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }
}
