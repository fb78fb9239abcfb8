use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use service::store::ItemStore;
use tokio::net::TcpListener;

use server::startup::build_app;

struct TestApp {
    base_url: String,
}

async fn start_server(store: ItemStore) -> anyhow::Result<TestApp> {
    let app = build_app(Arc::new(store));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_crud_lifecycle() -> anyhow::Result<()> {
    let app = start_server(ItemStore::new()).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/items", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    // empty collection starts at id 1
    let res = c.post(format!("{}/items", app.base_url))
        .json(&json!({"name": "a", "description": "b"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created, json!({"id": 1, "name": "a", "description": "b"}));

    let res = c.put(format!("{}/items/1", app.base_url))
        .json(&json!({"description": "changed", "note": "kept"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"id": 1, "name": "a", "description": "changed", "note": "kept"}));

    let res = c.get(format!("{}/items/1", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, body);

    let res = c.delete(format!("{}/items/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["message"], "Item deleted successfully");

    let res = c.get(format!("{}/items/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_have_distinct_ids() -> anyhow::Result<()> {
    let app = start_server(ItemStore::seeded()).await?;
    let c = reqwest::Client::new();

    let mut tasks = Vec::new();
    for n in 0..16 {
        let c = c.clone();
        let url = format!("{}/items", app.base_url);
        tasks.push(tokio::spawn(async move {
            c.post(url)
                .json(&json!({"name": format!("n{n}"), "description": "d"}))
                .send()
                .await?
                .json::<serde_json::Value>()
                .await
        }));
    }
    let mut ids = Vec::new();
    for t in tasks {
        ids.push(t.await??["id"].as_i64().unwrap_or_default());
    }
    ids.sort_unstable();
    assert_eq!(ids, (3..=18).collect::<Vec<_>>());
    Ok(())
}
