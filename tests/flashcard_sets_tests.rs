// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flashcard set save/list/fetch/delete tests against the in-memory store.

use axum::http::StatusCode;
use axum::{extract::Query, routing::get, Json, Router};
use flashminds::config::Config;
use flashminds::models::{Flashcard, FlashcardSet};
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;

mod common;

fn sample_cards() -> Value {
    json!([
        {"front": "Mitochondria", "back": "Powerhouse of the cell"},
        {"front": "Ribosome", "back": "Protein synthesis"}
    ])
}

#[tokio::test]
async fn test_save_writes_index_entry_and_set_document() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/flashcard-sets",
            "user_1",
            Some(json!({"name": "Biology", "flashcards": sample_cards()})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::read_json(response).await;
    assert_eq!(body, json!({"name": "Biology", "count": 2, "created": true}));

    let user_doc = state.db.get_user_doc("user_1").await.unwrap().unwrap();
    let names: Vec<&str> = user_doc
        .flashcard_sets
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["Biology"]);

    let set = state
        .db
        .get_flashcard_set("user_1", "Biology")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        set.flashcards,
        vec![
            Flashcard {
                front: "Mitochondria".into(),
                back: "Powerhouse of the cell".into()
            },
            Flashcard {
                front: "Ribosome".into(),
                back: "Protein synthesis".into()
            },
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_keep_every_index_entry() {
    let (app, state) = common::create_test_app();
    let names: Vec<String> = (0..16).map(|i| format!("Set {}", i)).collect();

    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let app = app.clone();
            let payload = json!({"name": name, "flashcards": sample_cards()});
            tokio::spawn(async move {
                app.oneshot(common::authed_request(
                    "POST",
                    "/api/flashcard-sets",
                    "user_1",
                    Some(payload),
                ))
                .await
                .unwrap()
                .status()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let doc = state.db.get_user_doc("user_1").await.unwrap().unwrap();
    assert_eq!(doc.flashcard_sets.len(), names.len());
    for name in &names {
        assert!(doc.contains(name), "{} missing from index", name);
    }
}

#[tokio::test]
async fn test_save_appends_to_existing_index() {
    let (app, state) = common::create_test_app();
    let cards = FlashcardSet {
        flashcards: vec![Flashcard {
            front: "a".into(),
            back: "b".into(),
        }],
    };
    state
        .db
        .save_flashcard_set("user_1", "History", &cards)
        .await
        .unwrap();

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/flashcard-sets",
            "user_1",
            Some(json!({"name": "  Biology  ", "flashcards": sample_cards()})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let user_doc = state.db.get_user_doc("user_1").await.unwrap().unwrap();
    let names: Vec<&str> = user_doc
        .flashcard_sets
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    // Stored under the trimmed name
    assert_eq!(names, ["History", "Biology"]);
}

#[tokio::test]
async fn test_resave_same_name_overwrites_without_duplicate_entry() {
    let (app, state) = common::create_test_app();

    let first = app
        .clone()
        .oneshot(common::authed_request(
            "POST",
            "/api/flashcard-sets",
            "user_1",
            Some(json!({"name": "Biology", "flashcards": sample_cards()})),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(common::authed_request(
            "POST",
            "/api/flashcard-sets",
            "user_1",
            Some(json!({"name": "Biology", "flashcards": [{"front": "new", "back": "card"}]})),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(common::read_json(second).await["created"], false);

    let user_doc = state.db.get_user_doc("user_1").await.unwrap().unwrap();
    assert_eq!(user_doc.flashcard_sets.len(), 1);
    let set = state
        .db
        .get_flashcard_set("user_1", "Biology")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(set.flashcards.len(), 1);
    assert_eq!(set.flashcards[0].front, "new");
}

#[tokio::test]
async fn test_save_rejects_blank_name() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/flashcard-sets",
            "user_1",
            Some(json!({"name": "   ", "flashcards": sample_cards()})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::read_json(response).await;
    assert_eq!(
        body["details"],
        "Please enter a name for your flashcard set."
    );
    // Nothing written
    assert!(state.db.get_user_doc("user_1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_rejects_invalid_payloads() {
    for payload in [
        json!({"flashcards": sample_cards()}),
        json!({"name": "Biology", "flashcards": []}),
        json!({"name": "a/b", "flashcards": sample_cards()}),
        json!({"name": "__notes__", "flashcards": sample_cards()}),
    ] {
        let (app, _) = common::create_test_app();
        let response = app
            .oneshot(common::authed_request(
                "POST",
                "/api/flashcard-sets",
                "user_1",
                Some(payload.clone()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }
}

#[tokio::test]
async fn test_list_initializes_user_document() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(common::authed_request(
            "GET",
            "/api/flashcard-sets",
            "new_user",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::read_json(response).await, json!({"sets": []}));

    let user_doc = state.db.get_user_doc("new_user").await.unwrap();
    assert_eq!(user_doc.map(|d| d.flashcard_sets.len()), Some(0));
}

#[tokio::test]
async fn test_list_includes_study_url_and_no_thumbnail_without_key() {
    let (app, state) = common::create_test_app();
    let cards = FlashcardSet {
        flashcards: vec![Flashcard {
            front: "a".into(),
            back: "b".into(),
        }],
    };
    state
        .db
        .save_flashcard_set("user_1", "Spanish verbs", &cards)
        .await
        .unwrap();

    let response = app
        .oneshot(common::authed_request(
            "GET",
            "/api/flashcard-sets",
            "user_1",
            None,
        ))
        .await
        .unwrap();

    let body = common::read_json(response).await;
    assert_eq!(
        body,
        json!({"sets": [{
            "name": "Spanish verbs",
            "study_url": "/flashcard?id=Spanish%20verbs",
            "thumbnail_url": null
        }]})
    );
}

#[tokio::test]
async fn test_list_fetches_one_thumbnail_per_set() {
    async fn search(
        headers: axum::http::HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        assert_eq!(headers.get("authorization").unwrap(), "pexels-key");
        assert_eq!(params.get("per_page").map(String::as_str), Some("1"));
        let query = params.get("query").cloned().unwrap_or_default();
        if query == "Obscure" {
            return Json(json!({"photos": []}));
        }
        Json(json!({"photos": [{"src": {"medium": format!("https://img.test/{}.jpg", query)}}]}))
    }

    let base = common::spawn_mock_service(Router::new().route("/v1/search", get(search))).await;
    let config = Config {
        pexels_api_base: base,
        pexels_api_key: Some("pexels-key".into()),
        ..Config::test_default()
    };
    let (app, state) = common::create_test_app_with(config);

    let cards = FlashcardSet {
        flashcards: vec![Flashcard {
            front: "a".into(),
            back: "b".into(),
        }],
    };
    for name in ["Biology", "Obscure"] {
        state
            .db
            .save_flashcard_set("user_1", name, &cards)
            .await
            .unwrap();
    }

    let response = app
        .oneshot(common::authed_request(
            "GET",
            "/api/flashcard-sets",
            "user_1",
            None,
        ))
        .await
        .unwrap();

    let body = common::read_json(response).await;
    assert_eq!(body["sets"][0]["thumbnail_url"], "https://img.test/Biology.jpg");
    assert_eq!(body["sets"][1]["thumbnail_url"], Value::Null);
}

#[tokio::test]
async fn test_get_set_and_missing_set() {
    let (app, state) = common::create_test_app();
    let cards = FlashcardSet {
        flashcards: vec![Flashcard {
            front: "a".into(),
            back: "b".into(),
        }],
    };
    state
        .db
        .save_flashcard_set("user_1", "Spanish verbs", &cards)
        .await
        .unwrap();

    let found = app
        .clone()
        .oneshot(common::authed_request(
            "GET",
            "/api/flashcard-sets/Spanish%20verbs",
            "user_1",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(
        common::read_json(found).await,
        json!({"name": "Spanish verbs", "flashcards": [{"front": "a", "back": "b"}]})
    );

    // Another user's namespace does not see it
    let missing = app
        .oneshot(common::authed_request(
            "GET",
            "/api/flashcard-sets/Spanish%20verbs",
            "user_2",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        common::read_json(missing).await["details"],
        "Flashcard set not found."
    );
}

#[tokio::test]
async fn test_delete_removes_document_and_index_entry() {
    let (app, state) = common::create_test_app();
    let cards = FlashcardSet {
        flashcards: vec![Flashcard {
            front: "a".into(),
            back: "b".into(),
        }],
    };
    for name in ["Biology", "History"] {
        state
            .db
            .save_flashcard_set("user_1", name, &cards)
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "DELETE",
            "/api/flashcard-sets/Biology",
            "user_1",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(state
        .db
        .get_flashcard_set("user_1", "Biology")
        .await
        .unwrap()
        .is_none());
    let user_doc = state.db.get_user_doc("user_1").await.unwrap().unwrap();
    assert!(!user_doc.contains("Biology"));
    assert!(user_doc.contains("History"));

    // Deleting again is a no-op
    let again = app
        .oneshot(common::authed_request(
            "DELETE",
            "/api/flashcard-sets/Biology",
            "user_1",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_path_name_with_slash_rejected() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::authed_request(
            "DELETE",
            "/api/flashcard-sets/a%2Fb",
            "user_1",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
