use crate::domain::{Blog, NewBlog, NewUser, Repository, RepositoryError, RepositoryResult, User};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    // Insertion order is the store order, as with `created_at` in Postgres.
    blogs: Vec<Blog>,
    users: Vec<User>,
}

/// Process-local repository for development runs and tests.
#[derive(Default)]
pub struct MemoryRepository {
    // ---
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn fetch_all_blogs(&self) -> RepositoryResult<Vec<Blog>> {
        // ---
        Ok(self.tables.read().await.blogs.clone())
    }

    async fn fetch_blog_by_id(&self, blog_id: Uuid) -> RepositoryResult<Option<Blog>> {
        // ---
        let tables = self.tables.read().await;
        Ok(tables.blogs.iter().find(|b| b.id == blog_id).cloned())
    }

    async fn create_blog(&self, new_blog: NewBlog) -> RepositoryResult<Blog> {
        // ---
        let mut tables = self.tables.write().await;

        let owner = tables
            .users
            .iter_mut()
            .find(|u| u.id == new_blog.owner_id)
            .ok_or_else(|| {
                RepositoryError::Backend(anyhow::anyhow!(
                    "owner {} does not exist",
                    new_blog.owner_id
                ))
            })?;

        let blog = Blog::new(new_blog);
        owner.blog_ids.push(blog.id);
        tables.blogs.push(blog.clone());

        Ok(blog)
    }

    async fn update_blog_likes(&self, blog_id: Uuid, likes: u64) -> RepositoryResult<Option<Blog>> {
        // ---
        let mut tables = self.tables.write().await;

        Ok(tables
            .blogs
            .iter_mut()
            .find(|b| b.id == blog_id)
            .map(|blog| {
                blog.likes = likes;
                blog.clone()
            }))
    }

    async fn delete_blog_by_id(&self, blog_id: Uuid) -> RepositoryResult<bool> {
        // ---
        let mut tables = self.tables.write().await;

        let Some(pos) = tables.blogs.iter().position(|b| b.id == blog_id) else {
            return Ok(false);
        };
        let removed = tables.blogs.remove(pos);

        if let Some(owner_id) = removed.owner_id {
            if let Some(owner) = tables.users.iter_mut().find(|u| u.id == owner_id) {
                owner.blog_ids.retain(|id| *id != blog_id);
            }
        }

        Ok(true)
    }

    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User> {
        // ---
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(RepositoryError::DuplicateUsername(new_user.username));
        }

        let user = User::new(new_user);
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn fetch_user_by_id(&self, user_id: Uuid) -> RepositoryResult<Option<User>> {
        // ---
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn fetch_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        // ---
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn fetch_all_users(&self) -> RepositoryResult<Vec<User>> {
        // ---
        Ok(self.tables.read().await.users.clone())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        // ---
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn new_user(username: &str) -> NewUser {
        // ---
        NewUser {
            username: username.to_string(),
            name: None,
            password_hash: "hash".to_string(),
        }
    }

    fn new_blog(owner_id: Uuid, title: &str) -> NewBlog {
        // ---
        NewBlog {
            title: title.to_string(),
            author: "Edsger W. Dijkstra".to_string(),
            url: "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html"
                .to_string(),
            likes: 5,
            owner_id,
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_reported() {
        // ---
        let repo = MemoryRepository::new();
        repo.create_user(new_user("root")).await.expect("first user");

        let err = repo.create_user(new_user("root")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateUsername(u) if u == "root"));
    }

    #[tokio::test]
    async fn blogs_are_tracked_on_their_owner_in_creation_order() {
        // ---
        let repo = MemoryRepository::new();
        let owner = repo.create_user(new_user("root")).await.expect("user");

        let first = repo.create_blog(new_blog(owner.id, "one")).await.expect("blog");
        let second = repo.create_blog(new_blog(owner.id, "two")).await.expect("blog");

        let owner = repo
            .fetch_user_by_id(owner.id)
            .await
            .expect("query")
            .expect("owner exists");
        assert_eq!(owner.blog_ids, vec![first.id, second.id]);

        assert!(repo.delete_blog_by_id(first.id).await.expect("delete"));
        let owner = repo
            .fetch_user_by_username("root")
            .await
            .expect("query")
            .expect("owner exists");
        assert_eq!(owner.blog_ids, vec![second.id]);
    }

    #[tokio::test]
    async fn blog_for_unknown_owner_is_rejected() {
        // ---
        let repo = MemoryRepository::new();
        assert!(repo.create_blog(new_blog(Uuid::new_v4(), "orphan")).await.is_err());
        assert!(repo.fetch_all_blogs().await.expect("query").is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_blog() {
        // ---
        let repo = MemoryRepository::new();
        let id = Uuid::new_v4();

        assert!(repo.update_blog_likes(id, 3).await.expect("query").is_none());
        assert!(!repo.delete_blog_by_id(id).await.expect("query"));
    }

    #[tokio::test]
    async fn update_changes_only_likes() {
        // ---
        let repo = MemoryRepository::new();
        let owner = repo.create_user(new_user("root")).await.expect("user");
        let blog = repo.create_blog(new_blog(owner.id, "one")).await.expect("blog");

        let updated = repo
            .update_blog_likes(blog.id, 10)
            .await
            .expect("query")
            .expect("blog exists");

        assert_eq!(updated.likes, 10);
        assert_eq!(updated.title, blog.title);
        assert_eq!(updated.owner_id, Some(owner.id));
    }
}
