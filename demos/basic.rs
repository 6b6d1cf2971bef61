//! Run with `cargo run --example basic`, then:
//!
//! ```text
//! curl -i localhost:3000/health
//! curl -i localhost:3000/api/reports
//! curl -i -u admin:secret localhost:3000/api/reports
//! curl -i -X DELETE localhost:3000/api/reports
//! ```

use std::convert::Infallible;
use std::time::Instant;

use tracing::info;
use turnstile::filter::{self, Next};
use turnstile::{Authenticator, Request, Response, Router, Server, StatusCode};

#[tokio::main]
async fn main() -> Result<(), turnstile::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let auth = Authenticator::builder()
        .realm("reports")
        .validator(check)
        .build()?;

    let mut router = Router::new();
    router.get("/health", health);
    router.get("/api/reports", list_reports)
        .filter(filter::from_fn(timing))
        .filter(filter::from_fn(no_store))
        .authenticator(auth);
    router.post("/api/reports", create_report);

    Server::bind("0.0.0.0:3000").serve(router).await
}

async fn timing(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let path = req.path().to_owned();
    let res = next.run(req).await;
    info!(%path, status = %res.status_code(), elapsed = ?started.elapsed(), "served");
    res
}

async fn no_store(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    res.set_header("cache-control", "no-store");
    res
}

async fn health(_req: Request) -> &'static str {
    "ok"
}

async fn list_reports(_req: Request) -> Response {
    Response::json(br#"[{"id":1,"title":"q3"}]"#.to_vec())
}

async fn create_report(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }
    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/api/reports/2")
        .no_body()
}

fn check(username: &str, password: &str) -> Result<bool, Infallible> {
    Ok(username == "admin" && password == "secret")
}
