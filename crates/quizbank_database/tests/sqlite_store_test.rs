//! Tests for the SQLite question store.

use quizbank_core::{NewQuestion, QuestionId};
use quizbank_database::SqliteQuestionStore;
use quizbank_interface::QuestionStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn question(n: u32) -> NewQuestion {
    NewQuestion::new(
        format!("Question numéro {}", n),
        "Paris",
        vec!["Lyon".to_string(), "Marseille".to_string()],
    )
}

#[tokio::test]
async fn test_insert_and_fetch() {
    let dir = TempDir::new().unwrap();
    let store = SqliteQuestionStore::open(dir.path().join("questions.db"))
        .await
        .unwrap();

    let id = store.insert(question(1)).await.unwrap();

    assert_eq!(store.backend(), "sqlite");
    assert!(store.exists(id).await.unwrap());

    let questions = store.fetch_all().await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].id, id);
    assert_eq!(questions[0].correct_answer, "Paris");
    assert_eq!(questions[0].incorrect_answers, vec!["Lyon", "Marseille"]);
}

#[tokio::test]
async fn test_empty_incorrect_answers_are_kept() {
    let dir = TempDir::new().unwrap();
    let store = SqliteQuestionStore::open(dir.path().join("questions.db"))
        .await
        .unwrap();

    store
        .insert(NewQuestion::new("Combien font deux et deux ?", "Quatre", vec![]))
        .await
        .unwrap();

    let questions = store.fetch_all().await.unwrap();
    assert!(questions[0].incorrect_answers.is_empty());
}

#[tokio::test]
async fn test_delete() {
    let dir = TempDir::new().unwrap();
    let store = SqliteQuestionStore::open(dir.path().join("questions.db"))
        .await
        .unwrap();
    let first = store.insert(question(1)).await.unwrap();
    let second = store.insert(question(2)).await.unwrap();

    assert!(store.delete(first).await.unwrap());
    assert!(!store.delete(first).await.unwrap());
    assert!(!store.delete(QuestionId(u64::MAX)).await.unwrap());

    let ids: Vec<_> = store
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(ids, vec![second]);
}

#[tokio::test]
async fn test_ids_not_reused_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("questions.db");

    let store = SqliteQuestionStore::open(&path).await.unwrap();
    assert_eq!(store.path(), path);
    store.insert(question(1)).await.unwrap();
    let newest = store.insert(question(2)).await.unwrap();
    store.delete(newest).await.unwrap();
    drop(store);

    let reopened = SqliteQuestionStore::open(&path).await.unwrap();
    assert_eq!(reopened.fetch_all().await.unwrap().len(), 1);
    let next = reopened.insert(question(3)).await.unwrap();
    assert!(next > newest);
}

#[tokio::test]
async fn test_random_insert_delete_sequences_match_model() {
    for seed in 0..4u64 {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("questions.db");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = SqliteQuestionStore::open(&path).await.unwrap();
        let mut model = BTreeSet::new();
        let mut allocated: Vec<QuestionId> = Vec::new();

        for step in 0..30u32 {
            if model.is_empty() || rng.gen_bool(0.6) {
                let id = store.insert(question(step)).await.unwrap();
                assert!(allocated.iter().all(|old| *old < id));
                allocated.push(id);
                model.insert(id);
            } else {
                let id = allocated[rng.gen_range(0..allocated.len())];
                assert_eq!(store.delete(id).await.unwrap(), model.remove(&id));
            }

            if rng.gen_bool(0.2) {
                drop(store);
                store = SqliteQuestionStore::open(&path).await.unwrap();
            }

            let ids: Vec<_> = store
                .fetch_all()
                .await
                .unwrap()
                .into_iter()
                .map(|q| q.id)
                .collect();
            assert_eq!(
                ids,
                model.iter().copied().collect::<Vec<_>>(),
                "seed {} step {}",
                seed,
                step
            );
        }
    }
}
