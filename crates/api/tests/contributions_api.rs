//! HTTP-level tests for the contributions leaderboard.

mod common;

use axum::http::StatusCode;
use common::{begin_edit, body_json, create_practice, empty_app, get, save_edit};

#[tokio::test]
async fn test_leaderboard_ranks_additions_and_edits() {
    let app = empty_app();
    create_practice(&app, "Jane", "Use the 10-year Treasury").await;
    create_practice(&app, "Jane", "Use market weights").await;
    let id = create_practice(&app, "Raj", "Unlever the comparable betas").await;

    let session = begin_edit(&app, "Mia", id).await;
    let response = save_edit(&app, "Mia", id, &session, "Unlever, then relever at target D/E").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/api/v1/contributions").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["student"], "Jane");
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[0]["entries_added"], 2);
    assert_eq!(rows[0]["total_contributions"], 2);
    // Ties on one contribution are ordered by name.
    assert_eq!(rows[1]["student"], "Mia");
    assert_eq!(rows[1]["entries_edited"], 1);
    assert_eq!(rows[2]["student"], "Raj");
    assert_eq!(rows[2]["rank"], 3);
}

#[tokio::test]
async fn test_stats_counts_practices_contributors_and_edits() {
    let app = empty_app();
    create_practice(&app, "Jane", "Use the 10-year Treasury").await;
    let id = create_practice(&app, "Raj", "Unlever the comparable betas").await;

    let session = begin_edit(&app, "Jane", id).await;
    save_edit(&app, "Jane", id, &session, "Relever at target D/E").await;

    let json = body_json(get(&app, "/api/v1/contributions/stats").await).await;
    assert_eq!(json["data"]["practices"], 2);
    assert_eq!(json["data"]["contributors"], 2);
    assert_eq!(json["data"]["total_edits"], 1);
}

#[tokio::test]
async fn test_empty_knowledge_base_has_empty_leaderboard() {
    let app = empty_app();
    let json = body_json(get(&app, "/api/v1/contributions").await).await;
    assert_eq!(json["data"], serde_json::json!([]));
}
