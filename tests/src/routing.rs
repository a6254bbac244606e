#![cfg(test)]
use lts_common::models::ids::{CourseId, ModuleId, TopicId, UserId};
use lts_core::{Response, Route};

use crate::fixture;

/// Follows redirects the way a browser would, returning every hop.
async fn follow(router: &lts_core::Router, target: &str) -> Vec<Response> {
    let session = fixture::ann();
    let mut hops = vec![router.dispatch(&session, "GET", target).await.unwrap()];
    while let Some(Response::Redirect(next)) = hops.last() {
        let next = next.clone();
        hops.push(router.handle(&session, next).await.unwrap());
    }
    hops
}

#[tokio::test]
async fn complete_redirects_through_topic_to_lesson_step() {
    let store = fixture::store();
    let images = tempfile::tempdir().unwrap();
    let router = fixture::router(&store, images.path());

    let hops = follow(&router, "/courses/1/modules/11/complete?topic_id=111").await;
    assert_eq!(hops.len(), 3);
    assert_eq!(
        hops[0],
        Response::Redirect(Route::LessonTopic {
            course: CourseId(1),
            module: ModuleId(11),
            topic: TopicId(111),
        })
    );
    assert_eq!(
        hops[1],
        Response::Redirect(Route::Lesson {
            course: CourseId(1),
            module: ModuleId(11),
            step: 2,
        })
    );
    match &hops[2] {
        Response::Lesson(page) => {
            assert_eq!(page.topic.id, TopicId(111));
            assert!(page.completed);
        }
        other => panic!("expected a lesson, got {other:?}"),
    }

    let state = store.snapshot().await;
    assert!(state.ledger.is_complete(UserId(1), TopicId(111)));
}

#[tokio::test]
async fn assign_redirects_to_course_page() {
    let store = fixture::store();
    let images = tempfile::tempdir().unwrap();
    let router = fixture::router(&store, images.path());

    let hops = follow(&router, "/courses/1/assign").await;
    assert_eq!(hops[0].status(), 303);
    match hops.last() {
        Some(Response::CoursePage(page)) => {
            assert!(page.assigned);
            assert_eq!(page.modules.len(), 2);
            assert_eq!(page.progress.total, 5);
        }
        other => panic!("expected the course page, got {other:?}"),
    }
}

#[tokio::test]
async fn lookups_outside_the_catalog_answer_not_found() {
    let store = fixture::store();
    let images = tempfile::tempdir().unwrap();
    let router = fixture::router(&store, images.path());
    let session = fixture::ann();

    for target in [
        "/courses/1/modules/10?step=4",
        "/courses/1/modules/10?step=0",
        "/courses/1/modules/99?step=1",
        "/courses/77",
        "/courses/1/modules/10/topics/110",
        "/courses/77/assign",
    ] {
        let response = router.dispatch(&session, "GET", target).await.unwrap();
        assert_eq!(response.status(), 404, "{target}");
    }

    let bad = router.dispatch(&session, "GET", "/lessons").await.unwrap();
    assert_eq!(bad.status(), 400);
    let bad = router.dispatch(&session, "POST", "/courses").await.unwrap();
    assert_eq!(bad.status(), 400);
}

#[tokio::test]
async fn course_list_filters_by_title_prefix() {
    let store = fixture::store();
    let images = tempfile::tempdir().unwrap();
    let router = fixture::router(&store, images.path());
    let session = fixture::ann();

    let titles = |response: Response| match response {
        Response::CourseList(list) => list.into_iter().map(|c| c.title).collect::<Vec<_>>(),
        other => panic!("expected a course list, got {other:?}"),
    };

    let all = router.dispatch(&session, "GET", "/courses").await.unwrap();
    assert_eq!(titles(all), ["Rust Basics", "Go Basics"]);

    let rust = router
        .dispatch(&session, "GET", "/courses?titlePrefix=rust%20b")
        .await
        .unwrap();
    assert_eq!(titles(rust), ["Rust Basics"]);

    let none = router
        .dispatch(&session, "GET", "/courses?titlePrefix=Java")
        .await
        .unwrap();
    assert!(titles(none).is_empty());
}

#[tokio::test]
async fn cover_falls_back_to_default_image() {
    let store = fixture::store();
    let images = tempfile::tempdir().unwrap();
    std::fs::write(images.path().join("default_cover.jpeg"), b"jpeg-bytes").unwrap();
    std::fs::write(images.path().join("go.png"), b"png-bytes").unwrap();
    let router = fixture::router(&store, images.path());
    let session = fixture::ann();

    match router.dispatch(&session, "GET", "/courses/1/avatar").await.unwrap() {
        Response::Image(image) => {
            assert_eq!(image.content_type, "image/jpeg");
            assert_eq!(image.data, b"jpeg-bytes");
        }
        other => panic!("expected an image, got {other:?}"),
    }

    match router.dispatch(&session, "GET", "/courses/2/avatar").await.unwrap() {
        Response::Image(image) => {
            assert_eq!(image.content_type, "image/png");
            assert_eq!(image.data, b"png-bytes");
        }
        other => panic!("expected an image, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_cover_file_is_not_found() {
    let store = fixture::store();
    let images = tempfile::tempdir().unwrap();
    let router = fixture::router(&store, images.path());

    let response = router
        .dispatch(&fixture::ann(), "GET", "/courses/1/avatar")
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
