//! Blog and tag queries, including the AND-semantics tag filter.

mod common;

use common::{execute, test_app, TestApp};
use scribe::auth::AuthSession;
use scribe::storage::{BlogStorage, NewBlog, NewUser, UserStorage};

/// Seed one author and three posts: "rust" tagged [x], "both" tagged [x, y],
/// "plain" untagged.
async fn seed(app: &TestApp) {
    let author = app
        .users
        .create_user(NewUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            first_name: "Alice".into(),
            last_name: "Author".into(),
            password_hash: "unused".into(),
        })
        .await
        .unwrap();

    let x = app.blogs.create_tag("x").await.unwrap();
    let y = app.blogs.create_tag("y").await.unwrap();

    let rust = app
        .blogs
        .create_blog(NewBlog {
            title: "rust".into(),
            content: "first".into(),
            author_id: author.id,
        })
        .await
        .unwrap();
    app.blogs.attach_tag(rust.id, x.id).await.unwrap();

    let both = app
        .blogs
        .create_blog(NewBlog {
            title: "both".into(),
            content: "second".into(),
            author_id: author.id,
        })
        .await
        .unwrap();
    app.blogs.attach_tag(both.id, x.id).await.unwrap();
    app.blogs.attach_tag(both.id, y.id).await.unwrap();

    app.blogs
        .create_blog(NewBlog {
            title: "plain".into(),
            content: "third".into(),
            author_id: author.id,
        })
        .await
        .unwrap();
}

fn titles(data: &serde_json::Value) -> Vec<String> {
    let mut titles: Vec<String> = data["blogs"]
        .as_array()
        .expect("blogs is a list")
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn no_filter_returns_all_blogs() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ blogs { title } }"#,
    )
    .await;
    assert_eq!(titles(&data), vec!["both", "plain", "rust"]);
}

#[tokio::test]
async fn empty_filter_returns_all_blogs() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ blogs(tags: []) { title } }"#,
    )
    .await;
    assert_eq!(titles(&data), vec!["both", "plain", "rust"]);
}

#[tokio::test]
async fn single_tag_filter_narrows() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ blogs(tags: ["x"]) { title } }"#,
    )
    .await;
    assert_eq!(titles(&data), vec!["both", "rust"]);
}

#[tokio::test]
async fn multiple_tags_require_all_of_them() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ blogs(tags: ["x", "y"]) { title } }"#,
    )
    .await;
    assert_eq!(titles(&data), vec!["both"]);
}

#[tokio::test]
async fn unknown_tag_matches_nothing() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ blogs(tags: ["z"]) { title } }"#,
    )
    .await;
    assert!(data["blogs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn blogs_expose_author_and_tags() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ blogs(tags: ["y"]) { title author { username } tags { name } } }"#,
    )
    .await;
    let blog = &data["blogs"][0];
    assert_eq!(blog["title"], "both");
    assert_eq!(blog["author"]["username"], "alice");

    let mut names: Vec<&str> = blog["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["x", "y"]);
}

#[tokio::test]
async fn tags_query_lists_every_tag() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ tags { name } }"#,
    )
    .await;
    let mut names: Vec<&str> = data["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["x", "y"]);
}

#[tokio::test]
async fn users_expose_their_blogs() {
    let app = test_app().await;
    seed(&app).await;

    let data = execute(
        &app.schema,
        &AuthSession::anonymous(),
        r#"{ user(username: "alice") { blogs { title } } }"#,
    )
    .await;
    let mut titles: Vec<&str> = data["user"]["blogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["both", "plain", "rust"]);
}

#[tokio::test]
async fn updating_a_blog_refreshes_updated_at() {
    let app = test_app().await;
    seed(&app).await;

    let before = app.blogs.list_blogs(&[]).await.unwrap();
    let target = &before.iter().find(|b| b.blog.title == "plain").unwrap().blog;
    assert_eq!(target.published_at, target.updated_at);

    let updated = app
        .blogs
        .update_blog(target.id, Some("renamed".into()), None)
        .await
        .unwrap();
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.content, "third");
    assert!(updated.updated_at >= updated.published_at);
    assert_eq!(updated.published_at, target.published_at);
}
