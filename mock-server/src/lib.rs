use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct NewPost {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    10
}

pub type Db = Arc<RwLock<Vec<Post>>>;

/// Router over an empty store.
pub fn app() -> Router {
    app_with_posts(Vec::new())
}

/// Router over a store seeded with `posts`. Ids are expected to be 1-based
/// and contiguous; new posts continue from the last one.
pub fn app_with_posts(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(RwLock::new(posts));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/status/{code}", get(respond_with_status))
        .route("/malformed", get(malformed))
        .with_state(db)
}

/// `count` generated posts with ids `1..=count`.
pub fn seed_posts(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|id| Post {
            id,
            title: format!("Post {id}"),
            body: format!("Body of post {id}"),
        })
        .collect()
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app).await
}

async fn list_posts(State(db): State<Db>, Query(page): Query<Pagination>) -> Json<PostsPage> {
    let posts = db.read().await;
    let total = posts.len() as u64;
    let slice = posts
        .iter()
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .cloned()
        .collect();
    tracing::debug!(skip = page.skip, limit = page.limit, total, "list posts");
    Json(PostsPage {
        posts: slice,
        total,
        skip: page.skip,
        limit: page.limit,
    })
}

async fn create_post(State(db): State<Db>, Json(input): Json<NewPost>) -> (StatusCode, Json<Post>) {
    let mut posts = db.write().await;
    let post = Post {
        id: posts.last().map_or(1, |p| p.id + 1),
        title: input.title,
        body: input.body,
    };
    posts.push(post.clone());
    tracing::debug!(id = post.id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    let posts = db.read().await;
    posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn respond_with_status(Path(code): Path<u16>) -> (StatusCode, String) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, format!("status {code}"))
}

async fn malformed() -> &'static str {
    "not-json"
}
