use appkit_client::cache::{AssetCache, InMemoryCache};
use appkit_client::{ApiClient, MemoryTokenStore};
use serde_json::json;

#[tokio::main]
async fn main() {
    let client = ApiClient::builder()
        .base_url("http://localhost:8080/api/v1")
        .token_store(MemoryTokenStore::new())
        .on_unauthorized(|| println!("session expired, back to login"))
        .build();

    match client
        .auth()
        .login(json!({ "email": "demo@example.test", "password": "demo" }))
        .await
    {
        Ok(body) => {
            if let Some(token) = body.get("access_token").and_then(|t| t.as_str()) {
                client.tokens().set(token).await;
            }
            println!("logged in: {body}");
        }
        Err(err) => println!("login failed: {err}"),
    }

    let assets = AssetCache::new("appkit-v1", InMemoryCache::new());
    let cached = assets
        .precache([
            "http://localhost:8080/frontend/css/base.css",
            "http://localhost:8080/frontend/js/config.js",
        ])
        .await;
    println!("precached {cached} assets");
}
