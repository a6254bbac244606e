//! # Application Services
//!
//! The use cases of the core, one struct per feature area.
//!
//! * **Orchestration**: each method opens one unit of work on the
//!   [`Store`], runs the domain logic against it and commits.
//! * **All or nothing**: if the domain logic fails the unit is rolled back, so
//!   a failed request leaves no trace.
//! * **Plain data out**: results are structs for a presentation layer to
//!   render; nothing here knows about markup or transport.
//!
//! ## Available Services
//! * [`catalog::CatalogService`]: course list, course page, cover images.
//! * [`lessons::LessonService`]: lesson pages, topic lookup, completion.
//! * [`enrollment::EnrollmentService`]: self-assign and self-unassign.

pub mod catalog;
pub mod enrollment;
pub mod lessons;

use lts_common::Result;
use lts_common::models::user::{Session, User};

use crate::ports::store::{Store, UnitOfWork};
use crate::state::LearningState;

/// Runs `work` inside a fresh unit of work and commits it on success.
pub(crate) async fn in_unit<T, F>(store: &dyn Store, work: F) -> Result<T>
where
    T: Send,
    F: FnOnce(&mut dyn UnitOfWork) -> Result<T> + Send,
{
    let (value, _) = in_unit_applied(store, work).await?;
    Ok(value)
}

/// Like [`in_unit`], also returning how many changes the commit applied.
pub(crate) async fn in_unit_applied<T, F>(store: &dyn Store, work: F) -> Result<(T, usize)>
where
    T: Send,
    F: FnOnce(&mut dyn UnitOfWork) -> Result<T> + Send,
{
    let mut unit = store.begin().await?;
    match work(unit.as_mut()) {
        Ok(value) => {
            let applied = unit.commit().await?;
            Ok((value, applied))
        }
        Err(err) => {
            unit.rollback();
            Err(err)
        }
    }
}

pub(crate) fn current_user<'a>(state: &'a LearningState, session: &Session) -> Result<&'a User> {
    state.users.by_email(&session.email)
}
