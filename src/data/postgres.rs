use crate::{
    data::{StudentStore, student::Student},
    error::{CommitTransactionSnafu, GetDatabaseConnectionSnafu, MakeQuerySnafu, RosterResult},
};
use async_trait::async_trait;
use futures::TryStreamExt;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, Transaction, pool::PoolConnection};

#[derive(Clone, Debug)]
pub struct PgStudentStore {
    pool: Pool<Postgres>,
}

impl PgStudentStore {
    pub const fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn get_connection(&self) -> RosterResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }

    async fn get_transaction(&self) -> RosterResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.context(GetDatabaseConnectionSnafu)
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        let mut conn = self.get_connection().await?;

        sqlx::query_as::<_, Student>(
            "SELECT id, name, major, age FROM public.students ORDER BY id",
        )
        .fetch(&mut *conn)
        .try_collect()
        .await
        .context(MakeQuerySnafu)
    }

    async fn find_by_id(&self, id: i64) -> RosterResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, major, age FROM public.students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)
    }

    async fn save(&self, student: Student) -> RosterResult<Student> {
        let Student {
            id,
            name,
            major,
            age,
        } = student;

        let Some(id) = id else {
            return sqlx::query_as::<_, Student>(
                "INSERT INTO public.students (name, major, age) VALUES ($1, $2, $3) \
                 RETURNING id, name, major, age",
            )
            .bind(name)
            .bind(major)
            .bind(age)
            .fetch_one(&mut *self.get_connection().await?)
            .await
            .context(MakeQuerySnafu);
        };

        let mut transaction = self.get_transaction().await?;

        let saved = sqlx::query_as::<_, Student>(
            "INSERT INTO public.students (id, name, major, age) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, major = EXCLUDED.major, age = EXCLUDED.age \
             RETURNING id, name, major, age",
        )
        .bind(id)
        .bind(name)
        .bind(major)
        .bind(age)
        .fetch_one(&mut *transaction)
        .await
        .context(MakeQuerySnafu)?;

        // explicit ids don't advance the identity sequence, so generated ids would eventually collide
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('public.students', 'id'), \
             GREATEST((SELECT MAX(id) FROM public.students), 1))",
        )
        .execute(&mut *transaction)
        .await
        .context(MakeQuerySnafu)?;

        transaction.commit().await.context(CommitTransactionSnafu)?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> RosterResult<()> {
        let result = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.get_connection().await?)
            .await
            .context(MakeQuerySnafu)?;

        if result.rows_affected() == 0 {
            debug!(id, "delete matched no rows");
        }
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
