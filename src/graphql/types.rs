//! GraphQL object types mapped from the entity layer.

use std::sync::Arc;

use async_graphql::{Context, Object, Result, SimpleObject, ID};

use crate::entity::{tag, user};
use crate::storage::{BlogStorage, BlogWithTags, SeaOrmBlogStorage, SeaOrmUserStorage, UserStorage};

/// A registered user account.
#[derive(Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: String,
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn username(&self) -> &str {
        &self.username
    }

    async fn email(&self) -> &str {
        &self.email
    }

    async fn first_name(&self) -> &str {
        &self.first_name
    }

    async fn last_name(&self) -> &str {
        &self.last_name
    }

    async fn date_joined(&self) -> &str {
        &self.date_joined
    }

    /// Blogs authored by this user.
    async fn blogs(&self, ctx: &Context<'_>) -> Result<Vec<Blog>> {
        let storage = ctx.data_unchecked::<Arc<SeaOrmBlogStorage>>();
        let blogs = storage
            .list_blogs_by_author(self.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(blogs.into_iter().map(Blog::from).collect())
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            date_joined: model.date_joined.to_rfc3339(),
        }
    }
}

/// A free-form label attached to blog posts.
#[derive(SimpleObject, Clone)]
pub struct Tag {
    pub id: ID,
    pub name: String,
}

impl From<tag::Model> for Tag {
    fn from(model: tag::Model) -> Self {
        Self {
            id: ID(model.id.to_string()),
            name: model.name,
        }
    }
}

/// A blog post.
#[derive(Clone)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published_at: String,
    pub updated_at: String,
    pub author_id: i32,
    pub tags: Vec<Tag>,
}

#[Object]
impl Blog {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn content(&self) -> &str {
        &self.content
    }

    async fn published_at(&self) -> &str {
        &self.published_at
    }

    async fn updated_at(&self) -> &str {
        &self.updated_at
    }

    async fn tags(&self) -> Vec<Tag> {
        self.tags.clone()
    }

    /// The owning author.
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let storage = ctx.data_unchecked::<Arc<SeaOrmUserStorage>>();
        let author = storage
            .get_user(self.author_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(User::from(author))
    }
}

impl From<BlogWithTags> for Blog {
    fn from(row: BlogWithTags) -> Self {
        Self {
            id: row.blog.id,
            title: row.blog.title,
            content: row.blog.content,
            published_at: row.blog.published_at.to_rfc3339(),
            updated_at: row.blog.updated_at.to_rfc3339(),
            author_id: row.blog.author_id,
            tags: row.tags.into_iter().map(Tag::from).collect(),
        }
    }
}
