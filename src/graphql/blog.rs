//! Query resolvers for blogs and tags.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use super::types::{Blog, Tag};
use crate::storage::{BlogStorage, SeaOrmBlogStorage};

#[derive(Default)]
pub struct BlogQuery;

#[Object]
impl BlogQuery {
    /// List blogs, optionally narrowed to those carrying every requested tag.
    async fn blogs(&self, ctx: &Context<'_>, tags: Option<Vec<String>>) -> Result<Vec<Blog>> {
        let storage = ctx.data_unchecked::<Arc<SeaOrmBlogStorage>>();
        let blogs = storage
            .list_blogs(&tags.unwrap_or_default())
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(blogs.into_iter().map(Blog::from).collect())
    }

    /// List every tag, unfiltered.
    async fn tags(&self, ctx: &Context<'_>) -> Result<Vec<Tag>> {
        let storage = ctx.data_unchecked::<Arc<SeaOrmBlogStorage>>();
        let tags = storage
            .list_tags()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(tags.into_iter().map(Tag::from).collect())
    }
}
