use std::sync::Arc;

use lts_common::Result;
use lts_common::models::ids::CourseId;
use lts_common::models::user::Session;
use tracing::info;

use crate::ports::store::Store;
use crate::services::{current_user, in_unit};
use crate::state::Change;

/// Self-service course assignment. Never touches completion history.
pub struct EnrollmentService {
    store: Arc<dyn Store>,
}

impl EnrollmentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn assign(&self, session: &Session, course: CourseId) -> Result<bool> {
        self.change(session, course, true).await
    }

    pub async fn unassign(&self, session: &Session, course: CourseId) -> Result<bool> {
        self.change(session, course, false).await
    }

    async fn change(&self, session: &Session, course: CourseId, assign: bool) -> Result<bool> {
        in_unit(self.store.as_ref(), |unit| {
            let state = unit.state();
            let user = current_user(state, session)?.id;
            state.hierarchy.course(course)?;

            let change = if assign {
                Change::Assign { user, course }
            } else {
                Change::Unassign { user, course }
            };
            let changed = unit.record(change);
            info!(user = %user, course = %course, assign, changed, "enrollment updated");
            Ok(changed)
        })
        .await
    }
}
