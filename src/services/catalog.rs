use chrono::Utc;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        product::{Product, ProductDetail, ProductInput},
        rate::{ExchangeRate, ExchangeRateInput},
    },
};

/// Products and their exchange rates.
#[derive(Clone)]
pub struct CatalogStore {
    db: DbPool,
}

impl CatalogStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE (?1 = 0 OR is_active = 1) ORDER BY sort_order, id",
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;
        Ok(products)
    }

    pub async fn product_detail(&self, id: i64) -> Result<ProductDetail, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = ?1 AND is_active = 1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)?;
        let rates = self.list_rates(Some(id), true).await?;
        Ok(ProductDetail { product, rates })
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, AppError> {
        let input = input.validated()?;
        let now = Utc::now();
        let product = sqlx::query_as::<_, Product>(
            r#"INSERT INTO products
                   (name, category, image_url, description, sort_order, is_active, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
               RETURNING *"#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(&input.description)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(now)
        .fetch_one(&self.db)
        .await?;
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, input: ProductInput) -> Result<Product, AppError> {
        let input = input.validated()?;
        sqlx::query_as::<_, Product>(
            r#"UPDATE products
               SET name = ?1, category = ?2, image_url = ?3, description = ?4,
                   sort_order = ?5, is_active = ?6, updated_at = ?7
               WHERE id = ?8
               RETURNING *"#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(&input.description)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// `active_only` hides rates whose product is switched off.
    pub async fn list_rates(
        &self,
        product_id: Option<i64>,
        active_only: bool,
    ) -> Result<Vec<ExchangeRate>, AppError> {
        let rates = sqlx::query_as::<_, ExchangeRate>(
            r#"SELECT r.* FROM exchange_rates r
               JOIN products p ON p.id = r.product_id
               WHERE (?1 IS NULL OR r.product_id = ?1)
                 AND (?2 = 0 OR p.is_active = 1)
               ORDER BY r.product_id, r.id"#,
        )
        .bind(product_id)
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;
        Ok(rates)
    }

    pub async fn create_rate(&self, input: ExchangeRateInput) -> Result<ExchangeRate, AppError> {
        let input = input.validated()?;
        self.ensure_product_exists(input.product_id).await?;
        let now = Utc::now();
        let rate = sqlx::query_as::<_, ExchangeRate>(
            r#"INSERT INTO exchange_rates
                   (product_id, denomination, currency, rate, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?5)
               RETURNING *"#,
        )
        .bind(input.product_id)
        .bind(&input.denomination)
        .bind(&input.currency)
        .bind(input.rate)
        .bind(now)
        .fetch_one(&self.db)
        .await?;
        Ok(rate)
    }

    pub async fn update_rate(
        &self,
        id: i64,
        input: ExchangeRateInput,
    ) -> Result<ExchangeRate, AppError> {
        let input = input.validated()?;
        self.ensure_product_exists(input.product_id).await?;
        sqlx::query_as::<_, ExchangeRate>(
            r#"UPDATE exchange_rates
               SET product_id = ?1, denomination = ?2, currency = ?3, rate = ?4, updated_at = ?5
               WHERE id = ?6
               RETURNING *"#,
        )
        .bind(input.product_id)
        .bind(&input.denomination)
        .bind(&input.currency)
        .bind(input.rate)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn delete_rate(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM exchange_rates WHERE id = ?1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn ensure_product_exists(&self, product_id: i64) -> Result<(), AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
            .bind(product_id)
            .fetch_one(&self.db)
            .await?;
        if !exists {
            return Err(AppError::BadRequest("商品不存在".into()));
        }
        Ok(())
    }
}
