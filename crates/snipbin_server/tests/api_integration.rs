//! Integration tests for the snipbin HTTP API.

mod support;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use support::{setup_test_server, test_config_for_db_path, test_server_for_config};
use tempfile::TempDir;

async fn create(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/paste").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_paste_lifecycle() {
    let (server, _temp) = setup_test_server();

    let paste = create(
        &server,
        json!({
            "title": "  Greeting  ",
            "content": "  print('hi')\n",
            "language": "python",
            "is_public": true
        }),
    )
    .await;
    let paste_id = paste["id"].as_str().expect("id").to_string();
    assert_eq!(paste["title"], "Greeting");
    assert_eq!(paste["content"], "print('hi')");
    assert_eq!(paste["user_id"], Value::Null);
    assert_eq!(paste["created_at"], paste["updated_at"]);

    let get_response = server.get(&format!("/api/paste/{}", paste_id)).await;
    assert_eq!(get_response.status_code(), StatusCode::OK);
    let fetched: Value = get_response.json();
    assert_eq!(fetched, paste);

    let update_response = server
        .put(&format!("/api/paste/{}", paste_id))
        .json(&json!({
            "title": "",
            "content": "print('bye')",
            "language": "python",
            "is_public": false
        }))
        .await;
    assert_eq!(update_response.status_code(), StatusCode::OK);
    let updated: Value = update_response.json();
    assert_eq!(updated["id"], paste["id"]);
    assert_eq!(updated["created_at"], paste["created_at"]);
    assert_eq!(updated["title"], "Untitled");
    assert_eq!(updated["content"], "print('bye')");
    assert_eq!(updated["is_public"], false);

    let delete_response = server.delete(&format!("/api/paste/{}", paste_id)).await;
    assert_eq!(delete_response.status_code(), StatusCode::OK);
    assert_eq!(
        delete_response.json::<Value>(),
        json!({ "success": true, "deleted": true })
    );

    let get_deleted = server.get(&format!("/api/paste/{}", paste_id)).await;
    assert_eq!(get_deleted.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(get_deleted.json::<Value>(), json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_create_defaults_optional_fields() {
    let (server, _temp) = setup_test_server();

    let paste = create(&server, json!({ "content": "just text" })).await;
    assert_eq!(paste["title"], "Untitled");
    assert_eq!(paste["language"], "text");
    assert_eq!(paste["is_public"], true);
}

#[tokio::test]
async fn test_blank_content_is_rejected() {
    let (server, _temp) = setup_test_server();

    for body in [json!({ "content": "   \n" }), json!({ "title": "no content" })] {
        let response = server.post("/api/paste").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Content is required" })
        );
    }

    let paste = create(&server, json!({ "content": "keep me" })).await;
    let response = server
        .put(&format!("/api/paste/{}", paste["id"].as_str().expect("id")))
        .json(&json!({ "content": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let list: Value = server.get("/api/pastes").await.json();
    assert_eq!(list["total_count"], 1);
    assert_eq!(list["items"][0]["content"], "keep me");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (server, _temp) = setup_test_server();

    let response = server.post("/api/paste").text("content=hello").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_oversized_content_is_rejected() {
    let temp_dir = TempDir::new().expect("temp dir");
    let mut config = test_config_for_db_path(&temp_dir.path().join("db"));
    config.max_paste_size = 16;
    let server = test_server_for_config(config);

    let response = server
        .post("/api/paste")
        .json(&json!({ "content": "x".repeat(17) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("exceeds maximum"));

    let response = server
        .post("/api/paste")
        .json(&json!({ "content": "x".repeat(16) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_without_visibility_makes_paste_public() {
    let (server, _temp) = setup_test_server();
    let paste = create(
        &server,
        json!({ "title": "secret", "content": "hidden", "is_public": false }),
    )
    .await;
    let path = format!("/api/paste/{}", paste["id"].as_str().expect("id"));

    let kept: Value = server
        .put(&path)
        .json(&json!({ "title": "secret", "content": "edited", "is_public": false }))
        .await
        .json();
    assert_eq!(kept["is_public"], false);

    // Updates are full replacements: an omitted is_public takes the create default.
    let reset: Value = server
        .put(&path)
        .json(&json!({ "title": "secret", "content": "edited again" }))
        .await
        .json();
    assert_eq!(reset["is_public"], true);
    assert_eq!(reset["language"], "text");
}

#[tokio::test]
async fn test_update_unknown_paste_is_not_found() {
    let (server, _temp) = setup_test_server();

    let response = server
        .put("/api/paste/does-not-exist")
        .json(&json!({ "content": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_paste_succeeds() {
    let (server, _temp) = setup_test_server();

    let response = server.delete("/api/paste/does-not-exist").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "deleted": false })
    );
}

#[tokio::test]
async fn test_private_paste_hidden_from_listing_but_fetchable() {
    let (server, _temp) = setup_test_server();

    let secret = create(
        &server,
        json!({ "title": "secret", "content": "hidden", "is_public": false }),
    )
    .await;
    create(&server, json!({ "title": "open", "content": "visible" })).await;

    let list: Value = server.get("/api/pastes").await.json();
    assert_eq!(list["total_count"], 1);
    assert_eq!(list["items"][0]["title"], "open");

    let search: Value = server
        .get("/api/pastes")
        .add_query_param("q", "hidden")
        .await
        .json();
    assert_eq!(search["total_count"], 0);

    let recent: Value = server.get("/api/pastes/recent").await.json();
    assert_eq!(recent.as_array().expect("array").len(), 1);

    let fetched = server
        .get(&format!("/api/paste/{}", secret["id"].as_str().expect("id")))
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_pagination_shape() {
    let (server, _temp) = setup_test_server();
    for idx in 0..25 {
        create(
            &server,
            json!({ "title": format!("paste {}", idx), "content": "body" }),
        )
        .await;
    }

    let first: Value = server.get("/api/pastes").await.json();
    assert_eq!(first["items"].as_array().expect("items").len(), 12);
    assert_eq!(first["total_count"], 25);
    assert_eq!(first["page"], 1);
    assert_eq!(first["page_size"], 12);
    assert_eq!(first["total_pages"], 3);

    let third: Value = server
        .get("/api/pastes")
        .add_query_param("page", 3)
        .await
        .json();
    assert_eq!(third["items"].as_array().expect("items").len(), 1);
    assert_eq!(third["page"], 3);

    let beyond: Value = server
        .get("/api/pastes")
        .add_query_param("page", 9)
        .await
        .json();
    assert!(beyond["items"].as_array().expect("items").is_empty());
    assert_eq!(beyond["total_count"], 25);

    let huge = server
        .get("/api/pastes")
        .add_query_param("page", usize::MAX)
        .await;
    assert_eq!(huge.status_code(), StatusCode::OK);
    let huge: Value = huge.json();
    assert!(huge["items"].as_array().expect("items").is_empty());
    assert_eq!(huge["total_count"], 25);

    let bad_page = server
        .get("/api/pastes")
        .add_query_param("page", "abc")
        .await;
    assert_eq!(bad_page.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_language_and_text() {
    let (server, _temp) = setup_test_server();
    create(
        &server,
        json!({ "title": "Foo helpers", "content": "x = 1", "language": "python" }),
    )
    .await;
    create(
        &server,
        json!({ "title": "misc", "content": "def foo(): pass", "language": "python" }),
    )
    .await;
    create(
        &server,
        json!({ "title": "foo.js", "content": "foo()", "language": "javascript" }),
    )
    .await;
    create(
        &server,
        json!({ "title": "bar", "content": "bar", "language": "python" }),
    )
    .await;

    let both: Value = server
        .get("/api/pastes")
        .add_query_param("q", "FOO")
        .add_query_param("language", "python")
        .await
        .json();
    assert_eq!(both["total_count"], 2);

    let all_languages: Value = server
        .get("/api/pastes")
        .add_query_param("q", "foo")
        .add_query_param("language", "all")
        .await
        .json();
    assert_eq!(all_languages["total_count"], 3);

    let blank_query: Value = server
        .get("/api/pastes")
        .add_query_param("q", "   ")
        .await
        .json();
    assert_eq!(blank_query["total_count"], 4);
}

#[tokio::test]
async fn test_recent_is_newest_first_and_limited() {
    let (server, _temp) = setup_test_server();
    for idx in 0..8 {
        create(
            &server,
            json!({ "title": format!("p{}", idx), "content": "body" }),
        )
        .await;
        // Distinct creation millis keep newest-first order deterministic.
        tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    }

    let recent: Value = server.get("/api/pastes/recent").await.json();
    let items = recent.as_array().expect("array");
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["title"], "p7");

    let limited: Value = server
        .get("/api/pastes/recent")
        .add_query_param("limit", 2)
        .await
        .json();
    assert_eq!(limited.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn test_raw_download_headers() {
    let (server, _temp) = setup_test_server();
    let paste = create(
        &server,
        json!({ "title": "My Script!", "content": "echo hi", "language": "bash" }),
    )
    .await;

    let response = server
        .get(&format!("/api/paste/{}/raw", paste["id"].as_str().expect("id")))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.assert_header(
        "content-disposition",
        "attachment; filename=\"my_script_.sh\"",
    );
    response.assert_header("content-type", "text/plain; charset=utf-8");
    assert_eq!(response.text(), "echo hi");

    let missing = server.get("/api/paste/nope/raw").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_languages_catalog() {
    let (server, _temp) = setup_test_server();

    let response = server.get("/api/languages").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let languages: Value = response.json();
    let languages = languages.as_array().expect("array");
    assert_eq!(languages.len(), 12);
    assert_eq!(
        languages[0],
        json!({ "value": "text", "label": "Plain Text", "extension": "txt" })
    );
    assert!(languages
        .iter()
        .any(|lang| lang["value"] == "bash" && lang["extension"] == "sh"));
}

#[tokio::test]
async fn test_security_headers_present() {
    let (server, _temp) = setup_test_server();

    let response = server.get("/api/languages").await;
    response.assert_header("x-content-type-options", "nosniff");
    response.assert_header("x-frame-options", "DENY");
    response.assert_contains_header("content-security-policy");
}
