use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::events::{Collection, MutationKind, StoreEvent, StoreNotifier};
use crate::schema::{treasuries, users};
use crate::treasuries::TreasuryDb;

use super::model::UserDb;
use sarraf_core::errors::{DatabaseError, Error, Result};
use sarraf_core::treasuries::Treasury;
use sarraf_core::users::{User, UserRepositoryTrait};

diesel::define_sql_function! {
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Repository for user rows.
pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, user: User, treasury: Option<Treasury>) -> Result<User> {
        let user_db: UserDb = user.into();
        let treasury_db: Option<TreasuryDb> = treasury.map(Into::into);
        let treasury_id = treasury_db.as_ref().map(|t| t.id.clone());

        let user: User = self
            .writer
            .exec(move |conn| {
                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .into_core()?;

                if let Some(treasury_db) = &treasury_db {
                    diesel::insert_into(treasuries::table)
                        .values(treasury_db)
                        .execute(conn)
                        .into_core()?;
                }

                user_db.try_into()
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Users,
            MutationKind::Created,
            user.id.clone(),
        ));
        if let Some(treasury_id) = treasury_id {
            self.notifier.notify(StoreEvent::new(
                Collection::Treasuries,
                MutationKind::Created,
                treasury_id,
            ));
        }
        Ok(user)
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let row = users::table
            .select(UserDb::as_select())
            .find(user_id)
            .first::<UserDb>(&mut conn)
            .into_core()?;

        row.try_into()
    }

    fn find_active_by_username(&self, username_param: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let row = users::table
            .select(UserDb::as_select())
            .filter(lower(users::username).eq(username_param.to_lowercase()))
            .filter(users::is_active.eq(true))
            .first::<UserDb>(&mut conn)
            .optional()
            .into_core()?;

        row.map(User::try_from).transpose()
    }

    fn list(&self, company_id_param: &str, is_active_filter: Option<bool>) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = users::table
            .filter(users::company_id.eq(company_id_param))
            .into_boxed();
        if let Some(active) = is_active_filter {
            query = query.filter(users::is_active.eq(active));
        }

        let rows = query
            .select(UserDb::as_select())
            .order(users::username.asc())
            .load::<UserDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn set_active(&self, user_id: &str, is_active_param: bool) -> Result<()> {
        let id_owned = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(users::table.find(&id_owned))
                    .set((
                        users::is_active.eq(is_active_param),
                        users::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(id_owned)));
                }
                Ok(())
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Users,
            MutationKind::Updated,
            user_id,
        ));
        Ok(())
    }
}
