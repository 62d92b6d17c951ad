//! Blog and tag storage.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entity::{blog, blog_tag, tag};
use crate::error::StorageError;

/// A blog row together with its attached tags.
#[derive(Debug, Clone)]
pub struct BlogWithTags {
    pub blog: blog::Model,
    pub tags: Vec<tag::Model>,
}

/// Input for creating a blog post. Timestamps are assigned by the storage layer.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

#[async_trait]
pub trait BlogStorage: Send + Sync {
    /// List blogs whose tag names form a superset of `tags` (AND semantics).
    /// An empty filter returns every blog.
    async fn list_blogs(&self, tags: &[String]) -> Result<Vec<BlogWithTags>, StorageError>;

    async fn list_blogs_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<BlogWithTags>, StorageError>;

    async fn list_tags(&self) -> Result<Vec<tag::Model>, StorageError>;

    async fn create_blog(&self, input: NewBlog) -> Result<blog::Model, StorageError>;

    /// Update title and/or content, refreshing `updated_at`.
    async fn update_blog(
        &self,
        id: i32,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<blog::Model, StorageError>;

    async fn create_tag(&self, name: &str) -> Result<tag::Model, StorageError>;

    async fn attach_tag(&self, blog_id: i32, tag_id: i32) -> Result<(), StorageError>;
}

pub struct SeaOrmBlogStorage {
    db: DatabaseConnection,
}

impl SeaOrmBlogStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_with_tags(
        &self,
        select: sea_orm::Select<blog::Entity>,
        wanted: &[String],
    ) -> Result<Vec<BlogWithTags>, StorageError> {
        let rows = select.find_with_related(tag::Entity).all(&self.db).await?;
        Ok(rows
            .into_iter()
            .filter(|(_, attached)| {
                // Every requested name must appear among the blog's tags.
                wanted
                    .iter()
                    .all(|name| attached.iter().any(|t| t.name == *name))
            })
            .map(|(blog, tags)| BlogWithTags { blog, tags })
            .collect())
    }
}

#[async_trait]
impl BlogStorage for SeaOrmBlogStorage {
    async fn list_blogs(&self, tags: &[String]) -> Result<Vec<BlogWithTags>, StorageError> {
        self.load_with_tags(blog::Entity::find(), tags).await
    }

    async fn list_blogs_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<BlogWithTags>, StorageError> {
        let select = blog::Entity::find().filter(blog::Column::AuthorId.eq(author_id));
        self.load_with_tags(select, &[]).await
    }

    async fn list_tags(&self) -> Result<Vec<tag::Model>, StorageError> {
        Ok(tag::Entity::find().all(&self.db).await?)
    }

    async fn create_blog(&self, input: NewBlog) -> Result<blog::Model, StorageError> {
        let now = Utc::now();
        let model = blog::ActiveModel {
            title: Set(input.title),
            content: Set(input.content),
            published_at: Set(now),
            updated_at: Set(now),
            author_id: Set(input.author_id),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn update_blog(
        &self,
        id: i32,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<blog::Model, StorageError> {
        let existing = blog::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("blog {id}")))?;

        let mut model: blog::ActiveModel = existing.into();
        if let Some(title) = title {
            model.title = Set(title);
        }
        if let Some(content) = content {
            model.content = Set(content);
        }
        model.updated_at = Set(Utc::now());
        Ok(model.update(&self.db).await?)
    }

    async fn create_tag(&self, name: &str) -> Result<tag::Model, StorageError> {
        let model = tag::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn attach_tag(&self, blog_id: i32, tag_id: i32) -> Result<(), StorageError> {
        let model = blog_tag::ActiveModel {
            blog_id: Set(blog_id),
            tag_id: Set(tag_id),
        };
        blog_tag::Entity::insert(model).exec(&self.db).await?;
        Ok(())
    }
}
