use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::technician::Technician;
use crate::utils::errors::AppError;

pub struct TechnicianRepository {
    pool: PgPool,
}

impl TechnicianRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Technician>, AppError> {
        let technician = sqlx::query_as::<_, Technician>("SELECT * FROM technicians WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(technician)
    }
}

pub async fn upsert_technician(
    conn: &mut PgConnection,
    user_id: Uuid,
    assigned_station_id: Option<i64>,
    is_active_on_shift: bool,
) -> Result<Technician, AppError> {
    let technician = sqlx::query_as::<_, Technician>(
        r#"
        INSERT INTO technicians (user_id, assigned_station_id, is_active_on_shift)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE
        SET assigned_station_id = EXCLUDED.assigned_station_id,
            is_active_on_shift = EXCLUDED.is_active_on_shift
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(assigned_station_id)
    .bind(is_active_on_shift)
    .fetch_one(&mut *conn)
    .await?;

    Ok(technician)
}

/// Remove a technician row; false when there was none
pub async fn delete_technician(conn: &mut PgConnection, user_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM technicians WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
