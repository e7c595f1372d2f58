//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises the client over
//! real HTTP twice: once through `ReqwestTransport` and once through the
//! host-does-IO path, where `ureq` executes the `HttpRequest` values built by
//! `JsonCodec`.

use std::net::SocketAddr;

use api_client::{
    ApiError, HttpClient, HttpMethod, HttpResponse, JsonCodec, NewPost, PageRequest, PostsApi,
    PostsPage, QueryParams, ReqwestTransport, TransportError,
};
use serde_json::Value;

async fn start_server(seed: u64) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = mock_server::app_with_posts(mock_server::seed_posts(seed));
    tokio::spawn(async move { mock_server::serve(listener, app).await });
    addr
}

fn client(addr: SocketAddr) -> HttpClient<ReqwestTransport> {
    HttpClient::new(&format!("http://{addr}"), ReqwestTransport::new()).unwrap()
}

#[tokio::test]
async fn paginated_fetch_and_create() {
    let addr = start_server(12).await;
    let posts = PostsApi::new(client(addr));

    // Step 1: first page.
    let page = posts.list(PageRequest::page(0, 5)).await.unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.posts.len(), 5);
    assert_eq!(page.posts[0].title, "Post 1");
    assert!(page.has_more());

    // Step 2: last page.
    let page = posts.list(PageRequest::page(2, 5)).await.unwrap();
    assert_eq!(page.posts.len(), 2);
    assert!(!page.has_more());

    // Step 3: walk everything.
    let all = posts.list_all(PageRequest::page(0, 5)).await.unwrap();
    assert_eq!(all.len(), 12);

    // Step 4: create and fetch back.
    let created = posts
        .create(&NewPost {
            title: "Integration test".to_string(),
            body: "created over HTTP".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 13);
    let fetched = posts.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn raw_get_returns_body_unchanged() {
    let addr = start_server(0).await;
    let query = QueryParams::new().with("skip", 0u64).with("limit", 10u64);

    let page: Value = client(addr).get("/posts", Some(&query)).await.unwrap();

    assert_eq!(
        page,
        serde_json::json!({"posts": [], "total": 0, "skip": 0, "limit": 10})
    );
}

#[tokio::test]
async fn server_rejection_is_status_error() {
    let addr = start_server(0).await;
    let client = client(addr);

    for code in [400u16, 404, 500, 503] {
        let err = client
            .get::<Value>(&format!("/status/{code}"), None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(code), "{code}");
    }

    let err = client.get::<Value>("/posts/999", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404 }));
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let addr = start_server(0).await;
    let err = client(addr).get::<Value>("/malformed", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let err = client(addr).get::<Value>("/posts", None).await.unwrap_err();
    assert!(
        matches!(err, ApiError::Transport(TransportError::Connection(_))),
        "unexpected error: {err:?}"
    );
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the codec
/// handle status interpretation.
fn execute(req: api_client::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).header("Content-Type", "application/json").call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse::new(status, body)
}

#[test]
fn host_does_io_lifecycle() {
    // Step 1: start mock server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let codec = JsonCodec::new(&format!("http://{addr}")).unwrap();

    // Step 2: list — should be empty.
    let req = codec.build_get("/posts", Some(&PageRequest::default().query())).unwrap();
    let page: PostsPage = codec.parse_response(execute(req)).unwrap();
    assert!(page.posts.is_empty(), "expected empty list");

    // Step 3: create a post.
    let req = codec
        .build_post(
            "/posts",
            &NewPost {
                title: "Host IO".to_string(),
                body: "executed by ureq".to_string(),
            },
        )
        .unwrap();
    let created: api_client::Post = codec.parse_response(execute(req)).unwrap();
    assert_eq!(created.title, "Host IO");

    // Step 4: get it back.
    let req = codec.build_get(&format!("/posts/{}", created.id), None).unwrap();
    let fetched: api_client::Post = codec.parse_response(execute(req)).unwrap();
    assert_eq!(fetched, created);

    // Step 5: missing post — Status(404).
    let req = codec.build_get("/posts/999", None).unwrap();
    let err = codec.parse_response::<Value>(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404 }));

    // Step 6: list — one item.
    let req = codec.build_get("/posts", None).unwrap();
    let page: PostsPage = codec.parse_response(execute(req)).unwrap();
    assert_eq!(page.total, 1);
}
