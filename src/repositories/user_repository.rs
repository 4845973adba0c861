use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::user::User;
use crate::utils::errors::{is_unique_violation, AppError};

pub async fn insert_user(
    conn: &mut PgConnection,
    id: Uuid,
    username: &str,
    email: Option<&str>,
    full_name: &str,
    is_superuser: bool,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, full_name, is_staff, is_superuser)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(full_name)
    .bind(is_superuser)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e, "users_username_key") {
            AppError::Conflict(format!("Username '{}' is already taken", username))
        } else if is_unique_violation(&e, "users_pkey") {
            AppError::Conflict(format!("User '{}' already exists", id))
        } else {
            AppError::Database(e)
        }
    })
}

/// Set the staff flag (superusers always keep it); `None` when the user does not exist
pub async fn set_staff_flag(conn: &mut PgConnection, user_id: Uuid, is_staff: bool) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("UPDATE users SET is_staff = ($2 OR is_superuser) WHERE id = $1 RETURNING *")
        .bind(user_id)
        .bind(is_staff)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(user)
}
