use async_trait::async_trait;
use np_core::prelude::*;
use np_core::types::parse_timestamp;
use np_core::{Cursor, DeleteResult, InsertManyResult, InsertOneResult};
use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::Row;
use std::path::Path;
use tracing::info;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS news_articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        source TEXT NOT NULL,
        url TEXT,
        published_date TEXT,
        category TEXT NOT NULL DEFAULT 'general',
        image_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS chat_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_message TEXT NOT NULL,
        bot_message TEXT NOT NULL,
        timestamp TEXT NOT NULL
    )
    "#,
];

const INSERT_ARTICLE: &str = r#"
    INSERT INTO news_articles
    (title, content, source, url, published_date, category, image_url)
    VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> Error {
    move |e| Error::Database(format!("Failed to {}: {}", context, e))
}

/// File-backed article store. One SQLite file holds the articles table and the
/// (unused) chat history table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(db_error("connect to database"))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }

        info!("🔌 Connected to database: {}", db_path.display());
        Ok(Self { pool })
    }

    /// Rows in the chat history table. Nothing writes there yet.
    pub async fn chat_history_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_history")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count chat history"))?;
        Ok(count as u64)
    }
}

fn bind_article(article: &Article) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    sqlx::query(INSERT_ARTICLE)
        .bind(article.title.as_str())
        .bind(article.content.as_str())
        .bind(article.source.as_str())
        .bind(article.url.as_deref())
        .bind(article.published_date.map(|dt| dt.to_rfc3339()))
        .bind(article.category.as_str())
        .bind(article.image_url.as_deref())
}

fn row_to_article(row: &SqliteRow) -> Result<StoredArticle> {
    let get_error = db_error("read article row");
    let published_date = row
        .try_get::<Option<String>, _>("published_date")
        .map_err(&get_error)?
        .map(|raw| {
            parse_timestamp(&raw)
                .map_err(|e| Error::Database(format!("Failed to parse date {}: {}", raw, e)))
        })
        .transpose()?;

    Ok(StoredArticle {
        id: ArticleId::from_raw(row.try_get("id").map_err(&get_error)?),
        article: Article {
            title: row.try_get("title").map_err(&get_error)?,
            content: row.try_get("content").map_err(&get_error)?,
            source: row.try_get("source").map_err(&get_error)?,
            url: row.try_get("url").map_err(&get_error)?,
            published_date,
            category: row.try_get("category").map_err(&get_error)?,
            image_url: row.try_get("image_url").map_err(&get_error)?,
        },
    })
}

#[async_trait]
impl ArticleCollection for SqliteStore {
    async fn find(&self) -> Result<Cursor> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, source, url, published_date, category, image_url
            FROM news_articles
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find articles"))?;

        let docs = rows.iter().map(row_to_article).collect::<Result<Vec<_>>>()?;
        Ok(Cursor::new(docs))
    }

    async fn insert_one(&self, article: &Article) -> Result<InsertOneResult> {
        let result = bind_article(article)
            .execute(&self.pool)
            .await
            .map_err(db_error("store article"))?;
        Ok(InsertOneResult {
            inserted_id: ArticleId::from_raw(result.last_insert_rowid()),
        })
    }

    async fn insert_many(&self, articles: &[Article]) -> Result<InsertManyResult> {
        if articles.is_empty() {
            return Ok(InsertManyResult { inserted_ids: vec![] });
        }

        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;
        let mut inserted_ids = Vec::with_capacity(articles.len());
        for article in articles {
            let result = bind_article(article)
                .execute(&mut *tx)
                .await
                .map_err(db_error("store article"))?;
            inserted_ids.push(ArticleId::from_raw(result.last_insert_rowid()));
        }
        tx.commit().await.map_err(db_error("commit articles"))?;

        Ok(InsertManyResult { inserted_ids })
    }

    async fn delete_one(&self, id: ArticleId) -> Result<DeleteResult> {
        let result = sqlx::query("DELETE FROM news_articles WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete article"))?;
        Ok(DeleteResult {
            deleted_count: result.rows_affected(),
        })
    }

    async fn delete_many(&self) -> Result<DeleteResult> {
        let result = sqlx::query("DELETE FROM news_articles")
            .execute(&self.pool)
            .await
            .map_err(db_error("delete articles"))?;
        Ok(DeleteResult {
            deleted_count: result.rows_affected(),
        })
    }

    async fn count_documents(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news_articles")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count articles"))?;
        Ok(count as u64)
    }
}
