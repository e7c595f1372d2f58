//! Posts endpoints expressed on top of `HttpClient`.

use crate::client::HttpClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{NewPost, PageRequest, Post, PostsPage};

const POSTS: &str = "/posts";

/// Typed access to `/posts` through an injected client.
#[derive(Debug, Clone)]
pub struct PostsApi<T> {
    client: HttpClient<T>,
}

impl<T: Transport> PostsApi<T> {
    pub fn new(client: HttpClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient<T> {
        &self.client
    }

    pub async fn list(&self, page: PageRequest) -> Result<PostsPage, ApiError> {
        self.client.get(POSTS, Some(&page.query())).await
    }

    pub async fn get(&self, id: u64) -> Result<Post, ApiError> {
        self.client.get(&format!("{POSTS}/{id}"), None).await
    }

    pub async fn create(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.client.post(POSTS, post).await
    }

    /// Walk every page starting at `first`, collecting all posts.
    pub async fn list_all(&self, first: PageRequest) -> Result<Vec<Post>, ApiError> {
        let mut posts = Vec::new();
        let mut next = Some(first);
        while let Some(page) = next {
            let fetched = self.list(page).await?;
            next = if fetched.posts.is_empty() { None } else { fetched.next_page() };
            posts.extend(fetched.posts);
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Serves `/posts` pages from a fixed list and records request URLs.
    #[derive(Clone, Default)]
    struct PagedStub {
        total: u64,
        urls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Transport for PagedStub {
        type Response = HttpResponse;

        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.urls.lock().unwrap().push(request.url.clone());
            let url = url::Url::parse(&request.url).map_err(|e| TransportError::Other(e.to_string()))?;
            let param = |name: &str| {
                url.query_pairs()
                    .find(|(k, _)| k == name)
                    .and_then(|(_, v)| v.parse::<u64>().ok())
                    .unwrap_or(0)
            };
            let (skip, limit) = (param("skip"), param("limit"));
            let posts: Vec<Post> = (skip..(skip + limit).min(self.total))
                .map(|i| Post {
                    id: i + 1,
                    title: format!("post {}", i + 1),
                    body: String::new(),
                })
                .collect();
            let page = PostsPage {
                posts,
                total: self.total,
                skip,
                limit,
            };
            let body = serde_json::to_string(&page).map_err(|e| TransportError::Other(e.to_string()))?;
            Ok(HttpResponse::new(200, body))
        }
    }

    fn api(stub: PagedStub) -> PostsApi<PagedStub> {
        PostsApi::new(HttpClient::new("https://api.example.com", stub).unwrap())
    }

    #[tokio::test]
    async fn list_sends_skip_and_limit() {
        let stub = PagedStub {
            total: 3,
            ..Default::default()
        };
        let page = api(stub.clone()).list(PageRequest::default()).await.unwrap();
        assert_eq!(page.posts.len(), 3);
        assert_eq!(
            stub.urls.lock().unwrap().as_slice(),
            ["https://api.example.com/posts?skip=0&limit=10"]
        );
    }

    #[tokio::test]
    async fn list_all_walks_every_page() {
        let stub = PagedStub {
            total: 7,
            ..Default::default()
        };
        let posts = api(stub.clone()).list_all(PageRequest::page(0, 3)).await.unwrap();
        assert_eq!(posts.len(), 7);
        assert_eq!(posts.last().map(|p| p.id), Some(7));
        assert_eq!(stub.urls.lock().unwrap().len(), 3);
    }
}
