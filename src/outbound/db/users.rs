use crate::domain::auth::{
    CreateUserDBParams, DeleteUserDBParams, FindUserByEmailDBParams, FindUserDBParams,
    UpdateUserDBParams, User, UserRepository,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::UserRow;
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl UserRepository for Repository {
    async fn create_user(&self, params: CreateUserDBParams) -> Result<User, Error> {
        let result = sqlx::query_as::<_, UserRow>(
            "insert into users (id, name, email, password_hash, role_key, role_weight) \
             values ($1, $2, $3, $4, $5, $6) returning *",
        )
        .bind(Uuid::now_v7())
        .bind(params.name)
        .bind(params.email)
        .bind(params.password_hash)
        .bind(params.role_key)
        .bind(params.role_weight)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(err) => {
                if let Some(database_error) = err.as_database_error()
                    && database_error.is_unique_violation()
                {
                    return Err(Error::OnConflict);
                }

                Err(Error::DatabaseError(err))
            }
        }
    }

    async fn find_user_by_email(
        &self,
        params: FindUserByEmailDBParams,
    ) -> Result<Option<User>, Error> {
        let result = sqlx::query_as::<_, UserRow>("select * from users where email = $1")
            .bind(params.email)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into());

        Ok(result)
    }

    async fn find_user_by_id(&self, params: FindUserDBParams) -> Result<Option<User>, Error> {
        let result = sqlx::query_as::<_, UserRow>("select * from users where id = $1")
            .bind(params.user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into());

        Ok(result)
    }

    async fn update_user(&self, params: UpdateUserDBParams) -> Result<User, Error> {
        let row = sqlx::query_as::<_, UserRow>(
            "update users set \
                 name = coalesce($2, name), \
                 status = coalesce($3, status), \
                 profile_image_url = coalesce($4, profile_image_url), \
                 updated_at = now() \
             where id = $1 returning *",
        )
        .bind(params.user_id)
        .bind(params.name)
        .bind(params.status)
        .bind(params.profile_image_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound)?;

        Ok(row.into())
    }

    async fn delete_user(&self, params: DeleteUserDBParams) -> Result<(), Error> {
        let result = sqlx::query("delete from users where id = $1")
            .bind(params.user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
