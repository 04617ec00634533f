//! End-to-end HTTP test: start the router in-process with the in-memory repository and the
//! mock provider, then drive every endpoint over real HTTP.

use serde_json::{json, Value};
use std::sync::Arc;
use song_library::{transport, InMemorySongRepository, MockSongEnricher, SongService};

async fn start_server() -> Result<String, Box<dyn std::error::Error>> {
    let service = SongService::new(
        Arc::new(InMemorySongRepository::new()),
        Arc::new(MockSongEnricher::new()),
    );
    let router = transport::http::create_router(transport::http::AppState::new(service));

    // Bind to an ephemeral port to avoid conflicts with a running server.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

async fn create(
    client: &reqwest::Client,
    base_url: &str,
    group: &str,
    song: &str,
) -> Result<i64, Box<dyn std::error::Error>> {
    let resp = client
        .post(format!("{}/songs", base_url))
        .json(&json!({ "group": group, "song": song }))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body = resp.json::<Value>().await?;
    Ok(body["song_id"].as_i64().expect("song_id"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_and_page_verses() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    let id = create(&client, &base_url, "Muse", "Supermassive Black Hole").await?;
    assert!(id > 0);

    let first = client
        .get(format!("{}/songs/{}/verses?page=1&page_size=1", base_url, id))
        .send()
        .await?;
    assert_eq!(first.status(), 200);
    assert_eq!(first.json::<Value>().await?, json!(["first verse"]));

    let last = client
        .get(format!("{}/songs/{}/verses?page=2&page_size=2", base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(last, json!(["third verse"]));

    let explicit = client
        .get(format!("{}/songs/{}/verses?page=1&page_size=10", base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let out_of_range = client
        .get(format!("{}/songs/{}/verses?page=0&page_size=-5", base_url, id))
        .send()
        .await?;
    assert_eq!(out_of_range.status(), 200);
    let out_of_range = out_of_range.json::<Value>().await?;
    assert_eq!(out_of_range, explicit);
    assert_eq!(
        out_of_range,
        json!(["first verse", "second verse", "third verse"])
    );

    let past_end = client
        .get(format!("{}/songs/{}/verses?page=4&page_size=1", base_url, id))
        .send()
        .await?;
    assert_eq!(past_end.status(), 400);
    assert_eq!(
        past_end.json::<Value>().await?,
        json!({ "error": "no more verses available" })
    );

    let bad_id = client
        .get(format!("{}/songs/abc/verses", base_url))
        .send()
        .await?;
    assert_eq!(bad_id.status(), 400);
    assert_eq!(bad_id.json::<Value>().await?, json!({ "error": "invalid request" }));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_rejects_bad_input() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    let missing_song = client
        .post(format!("{}/songs", base_url))
        .json(&json!({ "group": "Muse" }))
        .send()
        .await?;
    assert_eq!(missing_song.status(), 400);

    let empty_group = client
        .post(format!("{}/songs", base_url))
        .json(&json!({ "group": "", "song": "Uprising" }))
        .send()
        .await?;
    assert_eq!(empty_group.status(), 400);

    let not_json = client
        .post(format!("{}/songs", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(not_json.status(), 400);
    assert_eq!(not_json.json::<Value>().await?, json!({ "error": "invalid request" }));

    let listed = client
        .get(format!("{}/songs", base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(listed, json!([]));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_filter_and_pagination_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    for i in 1..=12 {
        create(&client, &base_url, "Muse", &format!("Track {:02}", i)).await?;
    }
    let queen = create(&client, &base_url, "Queen", "Bohemian Rhapsody").await?;

    let defaults = client
        .get(format!("{}/songs", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    let invalid = client
        .get(format!("{}/songs?page=0&page_size=-5", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    let explicit = client
        .get(format!("{}/songs?page=1&page_size=10", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(defaults.len(), 10);
    assert_eq!(defaults, invalid);
    assert_eq!(defaults, explicit);

    let page_two = client
        .get(format!("{}/songs?group=muse&page=2&page_size=10", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(page_two.len(), 2);
    assert_eq!(page_two[0]["song"], "Track 11");

    let by_name = client
        .get(format!("{}/songs?name=RHAPSODY", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0]["id"], queen);
    assert_eq!(by_name[0]["group"], "Queen");
    assert_eq!(by_name[0]["link"], "test");
    assert!(by_name[0]["releaseDate"].is_string());

    let by_id = client
        .get(format!("{}/songs?id={}", base_url, queen))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(by_id, by_name);

    // A non-numeric id filter is ignored rather than rejected.
    let ignored_id = client
        .get(format!("{}/songs?id=abc&group=queen", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(ignored_id.len(), 1);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_repeated_query_keys_use_first_value() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    for i in 1..=12 {
        create(&client, &base_url, "Muse", &format!("Track {:02}", i)).await?;
    }

    let explicit = client
        .get(format!("{}/songs?page=1&page_size=10", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    let repeated = client
        .get(format!("{}/songs?page=1&page=2&page_size=10&page_size=3", base_url))
        .send()
        .await?;
    assert_eq!(repeated.status(), 200);
    let repeated = repeated.json::<Vec<Value>>().await?;
    assert_eq!(repeated.len(), 10);
    assert_eq!(repeated, explicit);

    let verses = client
        .get(format!(
            "{}/songs/1/verses?page=1&page=9&page_size=1&page_size=5",
            base_url
        ))
        .send()
        .await?;
    assert_eq!(verses.status(), 200);
    assert_eq!(verses.json::<Value>().await?, json!(["first verse"]));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_update_and_delete() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    let id = create(&client, &base_url, "Muse", "Uprising").await?;
    let before = client
        .get(format!("{}/songs?id={}", base_url, id))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;

    let updated = client
        .put(format!("{}/songs/{}", base_url, id))
        .json(&json!({ "text": "only verse" }))
        .send()
        .await?;
    assert_eq!(updated.status(), 200);
    assert_eq!(updated.json::<Value>().await?, json!({ "message": "song updated" }));

    let after = client
        .get(format!("{}/songs?id={}", base_url, id))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(after[0]["text"], "only verse");
    for field in ["group", "song", "link", "releaseDate"] {
        assert_eq!(after[0][field], before[0][field], "{} changed", field);
    }

    let dated = client
        .put(format!("{}/songs/{}", base_url, id))
        .json(&json!({ "releaseDate": "2009-09-14" }))
        .send()
        .await?;
    assert_eq!(dated.status(), 200);

    let bad_date = client
        .put(format!("{}/songs/{}", base_url, id))
        .json(&json!({ "releaseDate": "14.09.2009" }))
        .send()
        .await?;
    assert_eq!(bad_date.status(), 400);
    assert_eq!(
        bad_date.json::<Value>().await?,
        json!({ "error": "invalid release date" })
    );

    let missing = client
        .put(format!("{}/songs/{}", base_url, id + 100))
        .json(&json!({ "text": "x" }))
        .send()
        .await?;
    assert_eq!(missing.status(), 400);
    assert_eq!(missing.json::<Value>().await?, json!({ "error": "song not found" }));

    let deleted = client
        .delete(format!("{}/songs/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(deleted.status(), 200);
    assert_eq!(deleted.json::<Value>().await?, json!({ "message": "song deleted" }));

    let gone = client
        .get(format!("{}/songs?id={}", base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(gone, json!([]));

    let again = client
        .delete(format!("{}/songs/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(again.status(), 400);
    assert_eq!(again.json::<Value>().await?, json!({ "error": "song not found" }));

    let bad_id = client
        .delete(format!("{}/songs/one", base_url))
        .send()
        .await?;
    assert_eq!(bad_id.status(), 400);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_health_and_docs() -> Result<(), Box<dyn std::error::Error>> {
    use utoipa::OpenApi;

    let base_url = start_server().await?;
    let health = reqwest::get(format!("{}/health", base_url)).await?;
    assert_eq!(health.status(), 200);
    assert_eq!(health.json::<Value>().await?, json!({ "status": "ok" }));

    let doc = serde_json::to_value(transport::http::ApiDoc::openapi())?;
    assert!(doc["paths"]["/songs"]["get"].is_object());
    assert!(doc["paths"]["/songs/{id}/verses"]["get"].is_object());
    Ok(())
}
