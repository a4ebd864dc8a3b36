//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    errors::ProductsRepositoryError,
    records::{ProductId, ProductRecord},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// [`ProductsRepository`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    /// Wrap a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            price: row.try_get::<Decimal, _>("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    #[tracing::instrument(name = "products.repository.list", skip(self), err)]
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(
        name = "products.repository.get",
        skip(self, product),
        fields(product_id = %product),
        err
    )]
    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(name = "products.repository.create", skip(self, product), err)]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.name.into_inner())
            .bind(product.price.into_decimal())
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(
        name = "products.repository.update",
        skip(self, product, update),
        fields(product_id = %product),
        err
    )]
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(update.name.map(|name| name.into_inner()))
            .bind(update.price.map(|price| price.into_decimal()))
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(
        name = "products.repository.delete",
        skip(self, product),
        fields(product_id = %product),
        err
    )]
    async fn delete_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

/// Persistence access for product records.
///
/// Lookups by id return `Ok(None)` when no record matches; errors are reserved
/// for storage failures.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Retrieves all products, oldest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsRepositoryError>;

    /// Retrieves a single product.
    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError>;

    /// Creates a product, letting the database assign its id and timestamps.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsRepositoryError>;

    /// Overwrites the fields present in `update` and refreshes `updated_at`.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError>;

    /// Deletes a product, returning it as it was before removal.
    async fn delete_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError>;
}
