//! Integration tests for `PracticeRepo` against a real database.
//!
//! Require `DATABASE_URL`; run with `cargo test -- --ignored`.

use capkb_core::practice::Content;
use capkb_core::store::{ConditionalUpdate, ContentUpdate, PracticeFilter, RecordStore};
use capkb_db::repositories::PracticeRepo;
use capkb_db::store::PgPracticeStore;
use chrono::Utc;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn content(category: &str, text: &str, rationale: &str) -> Content {
    Content::new(category, text, rationale)
}

fn update(text: &str, editor: &str) -> ContentUpdate {
    ContentUpdate {
        content: content("Cost of Capital", text, "Weights"),
        editor: editor.to_string(),
        edited_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let created = PracticeRepo::create(
        &pool,
        &content("Cost of Debt", "Use YTM", "Market cost"),
        "Jane",
    )
    .await
    .unwrap();

    assert_eq!(created.edit_count, 0);
    assert!(created.last_edited_by.is_none());

    let found = PracticeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.practice, "Use YTM");
    assert_eq!(found.added_by, "Jane");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_filters(pool: PgPool) {
    PracticeRepo::create(&pool, &content("Cost of Debt", "Use YTM", "100% literal"), "Jane")
        .await
        .unwrap();
    PracticeRepo::create(&pool, &content("Cost of Equity", "Use CAPM", "Beta"), "Raj")
        .await
        .unwrap();

    let all = PracticeRepo::list(&pool, &PracticeFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].id < all[1].id);

    let search = PracticeFilter {
        search: Some("capm".into()),
        ..Default::default()
    };
    let hits = PracticeRepo::list(&pool, &search).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].added_by, "Raj");

    let literal = PracticeFilter {
        search: Some("0%".into()),
        ..Default::default()
    };
    assert_eq!(PracticeRepo::list(&pool, &literal).await.unwrap().len(), 1);

    let by_author = PracticeFilter {
        added_by: Some("Jane".into()),
        category: Some("Cost of Equity".into()),
        ..Default::default()
    };
    assert!(PracticeRepo::list(&pool, &by_author).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_blank_practice_rejected_by_schema(pool: PgPool) {
    let result = PracticeRepo::create(&pool, &content("Cost of Debt", "   ", "x"), "Jane").await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Conditional update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_conditional_update_only_matches_current_content(pool: PgPool) {
    let original = content("Cost of Capital", "Use market weights", "Weights");
    let row = PracticeRepo::create(&pool, &original, "Owner").await.unwrap();

    let first = PracticeRepo::conditional_update(&pool, row.id, &original, &update("v2", "Alice"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.edit_count, 1);
    assert_eq!(first.last_edited_by.as_deref(), Some("Alice"));

    let second = PracticeRepo::conditional_update(&pool, row.id, &original, &update("v3", "Bob"))
        .await
        .unwrap();
    assert!(second.is_none());

    let stored = PracticeRepo::find_by_id(&pool, row.id).await.unwrap().unwrap();
    assert_eq!(stored.practice, "v2");
    assert_eq!(stored.edit_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_conditional_updates_single_winner(pool: PgPool) {
    let original = content("Cost of Capital", "Use market weights", "Weights");
    let store = PgPracticeStore::new(pool.clone());
    let id = PracticeRepo::create(&pool, &original, "Owner").await.unwrap().id;

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        let expected = original.clone();
        handles.push(tokio::spawn(async move {
            store
                .conditional_update(id, &expected, &update(&format!("writer {i}"), "Student"))
                .await
                .unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if let ConditionalUpdate::Updated(_) = handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let stored = store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.edit_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_conditional_update_after_delete_does_not_resurrect(pool: PgPool) {
    let original = content("Cost of Capital", "x", "Weights");
    let row = PracticeRepo::create(&pool, &original, "Owner").await.unwrap();
    assert!(PracticeRepo::delete(&pool, row.id).await.unwrap());
    assert!(!PracticeRepo::delete(&pool, row.id).await.unwrap());

    let result = PracticeRepo::conditional_update(&pool, row.id, &original, &update("y", "A"))
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(PracticeRepo::find_by_id(&pool, row.id).await.unwrap().is_none());
}
