//! # Request Surface
//!
//! Typed routes for the logical request surface and a [`Router`] that
//! dispatches them to the application services.
//!
//! | Route | Target |
//! |---|---|
//! | [`Route::Courses`] | `GET /courses?titlePrefix=` |
//! | [`Route::Course`] | `GET /courses/{id}` |
//! | [`Route::Cover`] | `GET /courses/{id}/avatar` |
//! | [`Route::Lesson`] | `GET /courses/{c}/modules/{m}?step=N` |
//! | [`Route::LessonTopic`] | `GET /courses/{c}/modules/{m}/topics/{t}` |
//! | [`Route::Complete`] | `GET /courses/{c}/modules/{m}/complete?topic_id=T` |
//! | [`Route::Assign`] | `GET /courses/{id}/assign` |
//! | [`Route::Unassign`] | `GET /courses/{id}/unassign` |
//!
//! Handlers that change state answer with [`Response::Redirect`] naming the
//! route to show next. A missing entity and an out-of-range step both come
//! back as [`Response::NotFound`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use lts_common::models::ids::{CourseId, ModuleId, TopicId};
use lts_common::models::user::Session;
use lts_common::{LtsError, Result};
use tracing::{debug, warn};

use crate::ports::images::ImageStorage;
use crate::ports::store::Store;
use crate::services::catalog::{CatalogService, CourseSummary, CoursePage, CoverImage};
use crate::services::enrollment::EnrollmentService;
use crate::services::lessons::{LessonPage, LessonService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Courses { title_prefix: String },
    Course { course: CourseId },
    Cover { course: CourseId },
    Lesson { course: CourseId, module: ModuleId, step: i64 },
    LessonTopic { course: CourseId, module: ModuleId, topic: TopicId },
    Complete { course: CourseId, module: ModuleId, topic: TopicId },
    Assign { course: CourseId },
    Unassign { course: CourseId },
}

impl Route {
    /// Parses a method and a request target (`/path?query`).
    ///
    /// Only `GET` is served.
    pub fn parse(method: &str, target: &str) -> Result<Route> {
        if !method.eq_ignore_ascii_case("GET") {
            return Err(LtsError::BadRequest(format!("method {method} not allowed")));
        }

        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let query = Query::parse(query)?;
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            ["courses"] => Route::Courses {
                title_prefix: query.get("titlePrefix").unwrap_or_default().to_string(),
            },
            ["courses", course] => Route::Course {
                course: id(course, "course id")?,
            },
            ["courses", course, "avatar"] => Route::Cover {
                course: id(course, "course id")?,
            },
            ["courses", course, "assign"] => Route::Assign {
                course: id(course, "course id")?,
            },
            ["courses", course, "unassign"] => Route::Unassign {
                course: id(course, "course id")?,
            },
            ["courses", course, "modules", module] => Route::Lesson {
                course: id(course, "course id")?,
                module: id(module, "module id")?,
                step: query.require("step")?,
            },
            ["courses", course, "modules", module, "topics", topic] => Route::LessonTopic {
                course: id(course, "course id")?,
                module: id(module, "module id")?,
                topic: id(topic, "topic id")?,
            },
            ["courses", course, "modules", module, "complete"] => Route::Complete {
                course: id(course, "course id")?,
                module: id(module, "module id")?,
                topic: query.require("topic_id")?,
            },
            _ => return Err(LtsError::BadRequest(format!("no route for {path}"))),
        };

        Ok(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Courses { title_prefix } if title_prefix.is_empty() => write!(f, "/courses"),
            Route::Courses { title_prefix } => {
                write!(f, "/courses?titlePrefix={}", urlencoding::encode(title_prefix))
            }
            Route::Course { course } => write!(f, "/courses/{course}"),
            Route::Cover { course } => write!(f, "/courses/{course}/avatar"),
            Route::Lesson { course, module, step } => {
                write!(f, "/courses/{course}/modules/{module}?step={step}")
            }
            Route::LessonTopic { course, module, topic } => {
                write!(f, "/courses/{course}/modules/{module}/topics/{topic}")
            }
            Route::Complete { course, module, topic } => {
                write!(f, "/courses/{course}/modules/{module}/complete?topic_id={topic}")
            }
            Route::Assign { course } => write!(f, "/courses/{course}/assign"),
            Route::Unassign { course } => write!(f, "/courses/{course}/unassign"),
        }
    }
}

fn id<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| LtsError::BadRequest(format!("invalid {what}: {raw}")))
}

struct Query(Vec<(String, String)>);

impl Query {
    /// Form-decodes `raw`. Decoding itself is lossy, so broken escapes are
    /// refused up front.
    fn parse(raw: &str) -> Result<Self> {
        if let Some(escape) = malformed_escape(raw) {
            return Err(LtsError::BadRequest(format!("bad escape {escape} in {raw}")));
        }
        serde_urlencoded::from_str(raw)
            .map(Query)
            .map_err(|err| LtsError::BadRequest(format!("invalid query {raw}: {err}")))
    }

    /// First value for `key`.
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self
            .get(key)
            .ok_or_else(|| LtsError::BadRequest(format!("missing parameter {key}")))?;
        id(raw, key)
    }
}

/// The first `%` not followed by two hex digits, with what follows it.
fn malformed_escape(raw: &str) -> Option<String> {
    raw.match_indices('%')
        .map(|(at, _)| &raw[at..])
        .find(|rest| {
            !rest
                .as_bytes()
                .get(1..3)
                .is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit))
        })
        .map(|rest| rest.chars().take(3).collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    CourseList(Vec<CourseSummary>),
    CoursePage(CoursePage),
    Lesson(LessonPage),
    Image(CoverImage),
    Redirect(Route),
    NotFound(String),
    BadRequest(String),
}

impl Response {
    /// The HTTP status a transport would answer with.
    pub fn status(&self) -> u16 {
        match self {
            Response::Redirect(_) => 303,
            Response::NotFound(_) => 404,
            Response::BadRequest(_) => 400,
            _ => 200,
        }
    }
}

/// Wires the services together and maps routes onto them.
pub struct Router {
    catalog: CatalogService,
    lessons: LessonService,
    enrollment: EnrollmentService,
}

impl Router {
    pub fn new(store: Arc<dyn Store>, images: Arc<dyn ImageStorage>) -> Self {
        Self {
            catalog: CatalogService::new(Arc::clone(&store), images),
            lessons: LessonService::new(Arc::clone(&store)),
            enrollment: EnrollmentService::new(store),
        }
    }

    /// Parses and handles a raw request target.
    pub async fn dispatch(
        &self,
        session: &Session,
        method: &str,
        target: &str,
    ) -> Result<Response> {
        match Route::parse(method, target) {
            Ok(route) => self.handle(session, route).await,
            Err(LtsError::BadRequest(msg)) => {
                warn!(request = target, "{msg}");
                Ok(Response::BadRequest(msg))
            }
            Err(err) => Err(err),
        }
    }

    /// Runs `route` for `session`.
    ///
    /// Not-found class failures and bad requests become responses; storage
    /// failures are returned as errors.
    pub async fn handle(&self, session: &Session, route: Route) -> Result<Response> {
        debug!(route = %route, user = %session.email, "handling request");
        match self.run(session, &route).await {
            Ok(response) => Ok(response),
            Err(err) if err.is_not_found() => {
                warn!(route = %route, "{err}");
                Ok(Response::NotFound(err.to_string()))
            }
            Err(LtsError::BadRequest(msg)) => Ok(Response::BadRequest(msg)),
            Err(err) => Err(err),
        }
    }

    async fn run(&self, session: &Session, route: &Route) -> Result<Response> {
        let response = match *route {
            Route::Courses { ref title_prefix } => {
                Response::CourseList(self.catalog.list_courses(title_prefix).await?)
            }
            Route::Course { course } => {
                Response::CoursePage(self.catalog.course_page(session, course).await?)
            }
            Route::Cover { course } => Response::Image(self.catalog.cover_image(course).await?),
            Route::Lesson { module, step, .. } => {
                Response::Lesson(self.lessons.lesson_page(session, module, step).await?)
            }
            Route::LessonTopic { course, module, topic } => {
                let step = self.lessons.step_for_topic(module, topic).await?;
                Response::Redirect(Route::Lesson {
                    course,
                    module,
                    step: step as i64,
                })
            }
            Route::Complete { course, module, topic } => {
                self.lessons.complete_topic(session, topic).await?;
                Response::Redirect(Route::LessonTopic { course, module, topic })
            }
            Route::Assign { course } => {
                self.enrollment.assign(session, course).await?;
                Response::Redirect(Route::Course { course })
            }
            Route::Unassign { course } => {
                self.enrollment.unassign(session, course).await?;
                Response::Redirect(Route::Course { course })
            }
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_route() {
        let cases = [
            ("/courses", Route::Courses { title_prefix: String::new() }),
            (
                "/courses?titlePrefix=Ru",
                Route::Courses { title_prefix: "Ru".into() },
            ),
            ("/courses/3", Route::Course { course: CourseId(3) }),
            ("/courses/3/avatar", Route::Cover { course: CourseId(3) }),
            ("/courses/3/assign", Route::Assign { course: CourseId(3) }),
            ("/courses/3/unassign", Route::Unassign { course: CourseId(3) }),
            (
                "/courses/3/modules/4?step=2",
                Route::Lesson {
                    course: CourseId(3),
                    module: ModuleId(4),
                    step: 2,
                },
            ),
            (
                "/courses/3/modules/4/topics/5",
                Route::LessonTopic {
                    course: CourseId(3),
                    module: ModuleId(4),
                    topic: TopicId(5),
                },
            ),
            (
                "/courses/3/modules/4/complete?topic_id=5",
                Route::Complete {
                    course: CourseId(3),
                    module: ModuleId(4),
                    topic: TopicId(5),
                },
            ),
        ];

        for (target, expected) in cases {
            let parsed = Route::parse("GET", target).unwrap();
            assert_eq!(parsed, expected, "parsing {target}");
            assert_eq!(parsed.to_string(), target, "rendering {target}");
        }
    }

    #[test]
    fn test_step_may_be_out_of_range_but_must_be_a_number() {
        assert_eq!(
            Route::parse("GET", "/courses/1/modules/1?step=0").unwrap(),
            Route::Lesson {
                course: CourseId(1),
                module: ModuleId(1),
                step: 0,
            }
        );
        assert_eq!(
            Route::parse("GET", "/courses/1/modules/1?step=-3").unwrap(),
            Route::Lesson {
                course: CourseId(1),
                module: ModuleId(1),
                step: -3,
            }
        );
        assert!(matches!(
            Route::parse("GET", "/courses/1/modules/1?step=two"),
            Err(LtsError::BadRequest(_))
        ));
        assert!(matches!(
            Route::parse("GET", "/courses/1/modules/1"),
            Err(LtsError::BadRequest(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_targets() {
        for target in ["/", "/news", "/courses/x", "/courses/1/modules/1/complete"] {
            assert!(
                matches!(Route::parse("GET", target), Err(LtsError::BadRequest(_))),
                "{target} should be rejected"
            );
        }
        assert!(Route::parse("POST", "/courses").is_err());
    }

    #[test]
    fn test_title_prefix_escaping_round_trips() {
        let route = Route::Courses { title_prefix: "Основы C++ & co".into() };
        let rendered = route.to_string();
        assert!(!rendered.contains(' '));
        assert_eq!(Route::parse("GET", &rendered).unwrap(), route);

        assert_eq!(
            Route::parse("get", "/courses?titlePrefix=Rust+Basics").unwrap(),
            Route::Courses { title_prefix: "Rust Basics".into() }
        );
        assert!(Route::parse("GET", "/courses?titlePrefix=%zz").is_err());
    }

    #[test]
    fn test_rejects_malformed_escapes() {
        for target in [
            "/courses?titlePrefix=%+1",
            "/courses?titlePrefix=%-1",
            "/courses?titlePrefix=Ru%2",
            "/courses?titlePrefix=%",
            "/courses/1/modules/1?step=%G1",
        ] {
            assert!(
                matches!(Route::parse("GET", target), Err(LtsError::BadRequest(_))),
                "{target} should be rejected"
            );
        }
        assert_eq!(
            Route::parse("GET", "/courses?titlePrefix=%2B1").unwrap(),
            Route::Courses { title_prefix: "+1".into() }
        );
    }
}
