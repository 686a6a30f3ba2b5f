use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{
    likes_from_stored, likes_to_stored, Blog, NewBlog, NewUser, Repository, RepositoryError,
    RepositoryResult, User,
};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    title: String,
    author: String,
    url: String,
    likes: i64,
    owner_id: Option<Uuid>,
}

impl TryFrom<BlogRow> for Blog {
    type Error = RepositoryError;

    fn try_from(r: BlogRow) -> Result<Self, Self::Error> {
        // ---
        Ok(Blog {
            id: r.id,
            title: r.title,
            author: r.author,
            url: r.url,
            likes: likes_from_stored(r.likes)?,
            owner_id: r.owner_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    name: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, blog_ids: Vec<Uuid>) -> User {
        // ---
        User {
            id: self.id,
            username: self.username,
            name: self.name,
            password_hash: self.password_hash,
            blog_ids,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OwnedBlogRow {
    id: Uuid,
    owner_id: Uuid,
}

fn backend(err: sqlx::Error) -> RepositoryError {
    // ---
    RepositoryError::Backend(err.into())
}

pub struct PostgresRepository {
    // ---
    pool: PgPool,
}

impl PostgresRepository {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }

    async fn blog_ids_of(&self, user_id: Uuid) -> RepositoryResult<Vec<Uuid>> {
        // ---
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM blogs WHERE owner_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)
    }

    async fn with_blog_ids(&self, row: Option<UserRow>) -> RepositoryResult<Option<User>> {
        // ---
        match row {
            Some(row) => {
                let blog_ids = self.blog_ids_of(row.id).await?;
                Ok(Some(row.into_user(blog_ids)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl Repository for PostgresRepository {
    // ---
    async fn fetch_all_blogs(&self) -> RepositoryResult<Vec<Blog>> {
        // ---
        let rows = sqlx::query_as::<_, BlogRow>(
            "SELECT id, title, author, url, likes, owner_id FROM blogs ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(Blog::try_from).collect()
    }

    async fn fetch_blog_by_id(&self, blog_id: Uuid) -> RepositoryResult<Option<Blog>> {
        // ---
        let row = sqlx::query_as::<_, BlogRow>(
            "SELECT id, title, author, url, likes, owner_id FROM blogs WHERE id = $1",
        )
        .bind(blog_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(Blog::try_from).transpose()
    }

    async fn create_blog(&self, new_blog: NewBlog) -> RepositoryResult<Blog> {
        // ---
        let blog = Blog::new(new_blog);
        let likes = likes_to_stored(blog.likes).map_err(RepositoryError::Invalid)?;

        sqlx::query(
            "INSERT INTO blogs (id, title, author, url, likes, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(likes)
        .bind(blog.owner_id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(blog)
    }

    async fn update_blog_likes(&self, blog_id: Uuid, likes: u64) -> RepositoryResult<Option<Blog>> {
        // ---
        let likes = likes_to_stored(likes).map_err(RepositoryError::Invalid)?;

        let row = sqlx::query_as::<_, BlogRow>(
            "UPDATE blogs SET likes = $1 WHERE id = $2
             RETURNING id, title, author, url, likes, owner_id",
        )
        .bind(likes)
        .bind(blog_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(Blog::try_from).transpose()
    }

    async fn delete_blog_by_id(&self, blog_id: Uuid) -> RepositoryResult<bool> {
        // ---
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(blog_id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User> {
        // ---
        let user = User::new(new_user);

        sqlx::query(
            "INSERT INTO users (id, username, name, password_hash, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            let unique = err
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == UNIQUE_VIOLATION);
            if unique {
                RepositoryError::DuplicateUsername(user.username.clone())
            } else {
                backend(err)
            }
        })?;

        Ok(user)
    }

    async fn fetch_user_by_id(&self, user_id: Uuid) -> RepositoryResult<Option<User>> {
        // ---
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        self.with_blog_ids(row).await
    }

    async fn fetch_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        // ---
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        self.with_blog_ids(row).await
    }

    async fn fetch_all_users(&self) -> RepositoryResult<Vec<User>> {
        // ---
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, name, password_hash, created_at
             FROM users ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let owned = sqlx::query_as::<_, OwnedBlogRow>(
            "SELECT id, owner_id FROM blogs WHERE owner_id IS NOT NULL ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let mut by_owner: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for blog in owned {
            by_owner.entry(blog.owner_id).or_default().push(blog.id);
        }

        Ok(rows
            .into_iter()
            .map(|r| {
                let blog_ids = by_owner.remove(&r.id).unwrap_or_default();
                r.into_user(blog_ids)
            })
            .collect())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        // ---
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
