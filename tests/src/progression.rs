#![cfg(test)]
use std::sync::Arc;

use lts_common::LtsError;
use lts_common::models::ids::{CourseId, ModuleId, TopicId, UserId};
use lts_common::models::user::Session;
use lts_core::ports::store::Store;
use lts_core::progress;
use lts_core::services::catalog::CatalogService;
use lts_core::services::enrollment::EnrollmentService;
use lts_core::services::lessons::LessonService;
use lts_core::storage::{Document, MemoryStore};

use crate::fixture::{self, ANN, BOB};

fn lessons(store: &MemoryStore) -> LessonService {
    LessonService::new(Arc::new(store.clone()))
}

#[tokio::test]
async fn completing_topics_moves_the_course_counters() {
    let store = fixture::store();
    let lessons = lessons(&store);

    assert!(lessons.complete_topic(&fixture::ann(), TopicId(100)).await.unwrap());
    assert!(lessons.complete_topic(&fixture::ann(), TopicId(110)).await.unwrap());
    // Second completion is accepted but changes nothing.
    assert!(!lessons.complete_topic(&fixture::ann(), TopicId(100)).await.unwrap());

    let state = store.snapshot().await;
    let counts =
        progress::course_progress(&state.hierarchy, &state.ledger, UserId(1), CourseId(1))
            .unwrap();
    assert_eq!(counts.completed, 2);
    assert_eq!(counts.total, 5);
    assert_eq!(counts.to_string(), "Completed 2 of 5 topics");
    assert_eq!(state.ledger.len(), 2);
}

#[tokio::test]
async fn steps_outside_the_module_are_not_found() {
    let store = fixture::store();
    let lessons = lessons(&store);

    for step in [0, -1, 4, 99] {
        let err = lessons
            .lesson_page(&fixture::ann(), ModuleId(10), step)
            .await
            .unwrap_err();
        assert!(matches!(err, LtsError::OutOfRange { max_step: 3, .. }), "step {step}: {err}");
        assert!(err.is_not_found());
    }

    let page = lessons.lesson_page(&fixture::ann(), ModuleId(10), 3).await.unwrap();
    assert_eq!(page.topic.id, TopicId(102));
    assert_eq!(page.position.previous, 2);
    assert_eq!(page.position.next, 3);
    assert!(page.position.is_last());
}

#[tokio::test]
async fn lesson_page_reflects_own_completion_only() {
    let store = fixture::store();
    let lessons = lessons(&store);
    let bob = Session::new(BOB);

    lessons.complete_topic(&bob, TopicId(101)).await.unwrap();

    let mine = lessons.lesson_page(&fixture::ann(), ModuleId(10), 2).await.unwrap();
    let theirs = lessons.lesson_page(&bob, ModuleId(10), 2).await.unwrap();
    assert!(!mine.completed);
    assert!(theirs.completed);
    assert_eq!(theirs.course_id, CourseId(1));
}

#[tokio::test]
async fn assign_then_unassign_leaves_progress_alone() {
    let store = fixture::store();
    let enrollment = EnrollmentService::new(Arc::new(store.clone()));
    let catalog = CatalogService::new(
        Arc::new(store.clone()),
        Arc::new(lts_core::images::FsImageStorage::new("unused")),
    );
    let ann = fixture::ann();

    lessons(&store).complete_topic(&ann, TopicId(111)).await.unwrap();
    let before = catalog.course_page(&ann, CourseId(1)).await.unwrap();

    assert!(enrollment.assign(&ann, CourseId(1)).await.unwrap());
    assert!(!enrollment.assign(&ann, CourseId(1)).await.unwrap());
    assert!(catalog.course_page(&ann, CourseId(1)).await.unwrap().assigned);

    assert!(enrollment.unassign(&ann, CourseId(1)).await.unwrap());
    assert!(!enrollment.unassign(&ann, CourseId(1)).await.unwrap());

    let after = catalog.course_page(&ann, CourseId(1)).await.unwrap();
    assert!(!after.assigned);
    assert_eq!(after.progress, before.progress);
}

#[tokio::test]
async fn unknown_user_or_course_is_not_found() {
    let store = fixture::store();
    let enrollment = EnrollmentService::new(Arc::new(store.clone()));
    let stranger = Session::new("nobody@example.com");

    let err = lessons(&store).complete_topic(&stranger, TopicId(100)).await.unwrap_err();
    assert!(err.is_not_found());

    let err = enrollment.assign(&fixture::ann(), CourseId(404)).await.unwrap_err();
    assert!(err.is_not_found());

    let err = lessons(&store).complete_topic(&fixture::ann(), TopicId(404)).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(store.snapshot().await.ledger.is_empty());
}

#[tokio::test]
async fn concurrent_completions_of_one_pair_store_one_entry() {
    let store = fixture::store();
    let mut handles = Vec::new();
    for _ in 0..32 {
        let lessons = lessons(&store);
        handles.push(tokio::spawn(async move {
            lessons.complete_topic(&fixture::ann(), TopicId(100)).await
        }));
    }
    let mut added = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            added += 1;
        }
    }
    assert_eq!(added, 1, "exactly one request records the completion");

    let state = store.snapshot().await;
    assert_eq!(state.ledger.len(), 1);
    assert!(state.ledger.is_complete(UserId(1), TopicId(100)));
}

#[tokio::test]
async fn concurrent_completions_of_different_users_all_survive() {
    let store = fixture::store();
    let mut handles = Vec::new();
    for email in [ANN, BOB] {
        for topic in [100, 101, 102, 110, 111] {
            let lessons = lessons(&store);
            handles.push(tokio::spawn(async move {
                lessons.complete_topic(&Session::new(email), TopicId(topic)).await
            }));
        }
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let state = store.snapshot().await;
    assert_eq!(state.ledger.len(), 10);
    for user in [UserId(1), UserId(2)] {
        let counts =
            progress::course_progress(&state.hierarchy, &state.ledger, user, CourseId(1))
                .unwrap();
        assert!(counts.is_finished());
    }
}

#[tokio::test]
async fn uncommitted_unit_changes_nothing() {
    let store = fixture::store();
    let mut unit = store.begin().await.unwrap();
    unit.record(lts_core::state::Change::Assign {
        user: UserId(1),
        course: CourseId(1),
    });
    assert!(unit.state().enrollment.is_assigned(UserId(1), CourseId(1)));
    unit.rollback();

    assert!(store.snapshot().await.enrollment.entries().next().is_none());
}

#[tokio::test]
async fn file_store_keeps_progress_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lts.json");
    fixture::document().save(&path).await.unwrap();

    {
        let store = MemoryStore::open(&path).await.unwrap();
        let lessons = lessons(&store);
        lessons.complete_topic(&fixture::ann(), TopicId(101)).await.unwrap();
        EnrollmentService::new(Arc::new(store.clone()))
            .assign(&Session::new(BOB), CourseId(2))
            .await
            .unwrap();
    }

    let reopened = MemoryStore::open(&path).await.unwrap().snapshot().await;
    assert!(reopened.ledger.is_complete(UserId(1), TopicId(101)));
    assert!(reopened.enrollment.is_assigned(UserId(2), CourseId(2)));

    let document = Document::load(&path).await.unwrap();
    assert_eq!(document.completions.len(), 1);
    assert_eq!(document.courses[0].modules[1].topics.len(), 2);
}
