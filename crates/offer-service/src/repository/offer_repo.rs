//! Offer 仓储
//!
//! 负责 `offers` 表的建表和数据访问。所有读写都经由 [`OfferSession`] 进行，
//! 一个会话对应一次请求、一个事务。

use offer_shared::error::Result;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, instrument};

use crate::models::{Offer, OfferFields};

const CREATE_OFFERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS offers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        city TEXT NOT NULL,
        discount INTEGER NOT NULL,
        price INTEGER NOT NULL,
        popularity INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL
    )
"#;

const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_offers_category ON offers (category)";

/// Offer 存储
///
/// 持有连接池，可廉价克隆并在 handler 间共享
#[derive(Clone)]
pub struct OfferStore {
    pool: SqlitePool,
}

impl OfferStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 建表（幂等）
    ///
    /// 启动时调用；失败意味着服务无法处理请求
    #[instrument(skip(self))]
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_OFFERS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_CATEGORY_INDEX).execute(&self.pool).await?;

        info!("Offer schema ready");
        Ok(())
    }

    /// 打开一个会话
    ///
    /// 会话独占一个池连接直到 commit 或 drop
    pub async fn session(&self) -> Result<OfferSession> {
        let tx = self.pool.begin().await?;
        Ok(OfferSession { tx })
    }
}

/// 单次请求范围内的存储会话
///
/// 包装一个事务：`commit` 提交并释放连接；未提交即 drop 时回滚并释放连接，
/// 因此任何提前返回（校验失败、记录不存在、数据库错误）都不会泄漏连接或留下半成品。
pub struct OfferSession {
    tx: Transaction<'static, Sqlite>,
}

impl OfferSession {
    /// 列出 offer，可按分类精确匹配（区分大小写）过滤
    pub async fn list(&mut self, category: Option<&str>) -> Result<Vec<Offer>> {
        let offers = sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, title, category, city, discount, price, popularity, start_date, end_date
            FROM offers
            WHERE $1 IS NULL OR category = $1
            ORDER BY id ASC
            "#,
        )
        .bind(category)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(offers)
    }

    /// 插入新 offer，返回带已分配 id 的完整记录
    pub async fn insert(&mut self, fields: &OfferFields) -> Result<Offer> {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (title, category, city, discount, price, popularity, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, category, city, discount, price, popularity, start_date, end_date
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.category)
        .bind(&fields.city)
        .bind(fields.discount)
        .bind(fields.price)
        .bind(fields.popularity)
        .bind(&fields.start_date)
        .bind(&fields.end_date)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(offer)
    }

    /// 整体替换一条 offer 的全部字段
    ///
    /// 记录不存在时返回 `None`
    pub async fn replace(&mut self, id: i64, fields: &OfferFields) -> Result<Option<Offer>> {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers
            SET
                title = $2,
                category = $3,
                city = $4,
                discount = $5,
                price = $6,
                popularity = $7,
                start_date = $8,
                end_date = $9
            WHERE id = $1
            RETURNING id, title, category, city, discount, price, popularity, start_date, end_date
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.category)
        .bind(&fields.city)
        .bind(fields.discount)
        .bind(fields.price)
        .bind(fields.popularity)
        .bind(&fields.start_date)
        .bind(&fields.end_date)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(offer)
    }

    /// 删除 offer，返回是否确实删除了记录
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 提交并释放连接
    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offer_shared::test_utils::{test_database, test_title};

    fn fields(title: &str, category: &str) -> OfferFields {
        OfferFields {
            title: title.to_string(),
            category: category.to_string(),
            city: "Moscow".to_string(),
            discount: 15,
            price: 1200,
            popularity: 7,
            start_date: "2024-06-01".to_string(),
            end_date: "2024-06-30".to_string(),
        }
    }

    fn with_id(id: i64, fields: &OfferFields) -> Offer {
        Offer {
            id,
            title: fields.title.clone(),
            category: fields.category.clone(),
            city: fields.city.clone(),
            discount: fields.discount,
            price: fields.price,
            popularity: fields.popularity,
            start_date: fields.start_date.clone(),
            end_date: fields.end_date.clone(),
        }
    }

    async fn test_store() -> OfferStore {
        let db = test_database().await;
        let store = OfferStore::new(db.pool().clone());
        store.init_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let store = test_store().await;
        store.init_schema().await.unwrap();
        store.init_schema().await.unwrap();

        let mut session = store.session().await.unwrap();
        assert!(session.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_round_trips() {
        let store = test_store().await;
        let input = fields(&test_title("pizza"), "Food");

        let mut session = store.session().await.unwrap();
        let created = session.insert(&input).await.unwrap();
        session.commit().await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created, with_id(created.id, &input));

        let mut session = store.session().await.unwrap();
        assert_eq!(session.list(None).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_dropped_session_rolls_back() {
        let store = test_store().await;

        {
            let mut session = store.session().await.unwrap();
            session.insert(&fields("uncommitted", "Food")).await.unwrap();
            // 未提交即离开作用域
        }

        let mut session = store.session().await.unwrap();
        assert!(session.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_exact_category() {
        let store = test_store().await;

        let mut session = store.session().await.unwrap();
        session.insert(&fields("a", "Food")).await.unwrap();
        session.insert(&fields("b", "Travel")).await.unwrap();
        session.insert(&fields("c", "food")).await.unwrap();
        session.insert(&fields("d", "Food")).await.unwrap();
        session.commit().await.unwrap();

        let mut session = store.session().await.unwrap();
        let food = session.list(Some("Food")).await.unwrap();
        let titles: Vec<_> = food.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "d"]);

        assert!(session.list(Some("Foo")).await.unwrap().is_empty());
        assert_eq!(session.list(None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_replace_overwrites_every_field() {
        let store = test_store().await;

        let mut session = store.session().await.unwrap();
        let created = session.insert(&fields("old", "Food")).await.unwrap();

        let replacement = OfferFields {
            title: "new".to_string(),
            category: "Travel".to_string(),
            city: "Kazan".to_string(),
            discount: 50,
            price: 99,
            popularity: 1,
            start_date: "tomorrow".to_string(),
            end_date: "never".to_string(),
        };
        let updated = session
            .replace(created.id, &replacement)
            .await
            .unwrap()
            .unwrap();
        session.commit().await.unwrap();

        assert_eq!(updated, with_id(created.id, &replacement));

        let mut session = store.session().await.unwrap();
        assert_eq!(session.list(None).await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn test_replace_missing_returns_none() {
        let store = test_store().await;
        let mut session = store.session().await.unwrap();
        assert!(
            session
                .replace(9999, &fields("x", "Food"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_and_ids_are_not_reused() {
        let store = test_store().await;

        let mut session = store.session().await.unwrap();
        let first = session.insert(&fields("first", "Food")).await.unwrap();
        let second = session.insert(&fields("second", "Food")).await.unwrap();
        assert!(session.delete(second.id).await.unwrap());
        assert!(!session.delete(second.id).await.unwrap());
        let third = session.insert(&fields("third", "Food")).await.unwrap();
        session.commit().await.unwrap();

        assert!(third.id > second.id);
        assert_ne!(first.id, third.id);

        let mut session = store.session().await.unwrap();
        let ids: Vec<i64> = session.list(None).await.unwrap().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }
}
