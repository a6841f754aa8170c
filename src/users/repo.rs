use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::User;

const USER_COLUMNS: &str = "id, name, email, password, username, birthdate, gender, height, weight, \
     fatneed, proteinneed, caloryneed, fiberneed, carbohidrateneed, role, \
     smoke, alcho, active, cardiovascular";

/// Persistence for user records. Implementations must keep `email` unique.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: &User) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users"))
            .fetch_all(&self.db)
            .await
            .context("list users")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn create(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, username, birthdate, gender,
                               height, weight, fatneed, proteinneed, caloryneed, fiberneed,
                               carbohidrateneed, role, smoke, alcho, active, cardiovascular)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.username)
        .bind(user.birthdate)
        .bind(&user.gender)
        .bind(user.height)
        .bind(user.weight)
        .bind(user.fatneed)
        .bind(user.proteinneed)
        .bind(user.caloryneed)
        .bind(user.fiberneed)
        .bind(user.carbohidrateneed)
        .bind(&user.role)
        .bind(user.smoke)
        .bind(user.alcho)
        .bind(user.active)
        .bind(user.cardiovascular)
        .execute(&self.db)
        .await
        .context("insert user")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use tokio::sync::RwLock;

    use super::*;

    /// In-process store that counts calls and can be told to fail.
    #[derive(Default)]
    pub(crate) struct MemoryUserStore {
        users: RwLock<Vec<User>>,
        pub(crate) calls: AtomicUsize,
        pub(crate) fail_reads: AtomicBool,
        pub(crate) fail_writes: AtomicBool,
    }

    impl MemoryUserStore {
        pub(crate) async fn insert(&self, user: User) {
            self.users.write().await.push(user);
        }

        pub(crate) async fn len(&self) -> usize {
            self.users.read().await.len()
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn enter(&self, fail: &AtomicBool) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if fail.load(Ordering::SeqCst) {
                anyhow::bail!("store unavailable");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_all(&self) -> anyhow::Result<Vec<User>> {
            self.enter(&self.fail_reads)?;
            Ok(self.users.read().await.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
            self.enter(&self.fail_reads)?;
            Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            self.enter(&self.fail_reads)?;
            Ok(self
                .users
                .read()
                .await
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn create(&self, user: &User) -> anyhow::Result<()> {
            self.enter(&self.fail_writes)?;
            let mut users = self.users.write().await;
            if users.iter().any(|u| u.email == user.email) {
                anyhow::bail!("duplicate key value violates unique constraint \"users_email_key\"");
            }
            users.push(user.clone());
            Ok(())
        }
    }
}
