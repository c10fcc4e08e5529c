pub mod history;
pub mod membership;
pub mod project;
pub mod project_option;
pub mod template;

use sqlx::PgPool;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_db::models::membership::Membership;
use taskboard_db::repositories::MembershipRepo;

use crate::error::{AppError, AppResult};

/// Load `user_id`'s membership in `project_id`.
///
/// Rejects with 403 when the user is not a member, or when `admin` is set
/// and the membership is not an admin one.
pub(crate) async fn require_member(
    pool: &PgPool,
    project_id: DbId,
    user_id: DbId,
    admin: bool,
) -> AppResult<Membership> {
    let membership = MembershipRepo::find_for_user(pool, project_id, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Not a member of this project".into(),
            ))
        })?;
    if admin && !membership.is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Project admin required".into(),
        )));
    }
    Ok(membership)
}
