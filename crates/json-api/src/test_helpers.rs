//! Test helpers.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use catalog_app::{
    context::AppContext,
    domain::products::{
        MockProductsRepository, ProductId, ProductRecord, ProductsRepository,
        ProductsRepositoryError,
        data::{NewProduct, ProductUpdate},
    },
};

use crate::{router::root_router, state::State};

pub(crate) fn make_product(id: i64) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(id),
        name: "Widget".to_owned(),
        price: Decimal::new(1250, 2),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A mock that fails the test if any repository method is called.
pub(crate) fn strict_products_mock() -> MockProductsRepository {
    let mut products = MockProductsRepository::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn state_with_products(products: impl ProductsRepository + 'static) -> Arc<State> {
    State::shared(AppContext {
        products: Arc::new(products),
    })
}

pub(crate) fn products_service(
    products: impl ProductsRepository + 'static,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

/// The served router over the given repository.
pub(crate) fn app_service(products: impl ProductsRepository + 'static) -> Service {
    Service::new(root_router(state_with_products(products)))
}

/// Process-local repository for exercising multi-request flows.
#[derive(Debug, Default)]
pub(crate) struct InMemoryProducts {
    inner: Mutex<Records>,
}

#[derive(Debug, Default)]
struct Records {
    next_id: i64,
    by_id: BTreeMap<i64, ProductRecord>,
}

impl InMemoryProducts {
    fn with_records<T>(&self, f: impl FnOnce(&mut Records) -> T) -> T {
        let mut records = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        f(&mut records)
    }
}

#[async_trait]
impl ProductsRepository for InMemoryProducts {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsRepositoryError> {
        Ok(self.with_records(|records| records.by_id.values().cloned().collect()))
    }

    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        Ok(self.with_records(|records| records.by_id.get(&product.into_i64()).cloned()))
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsRepositoryError> {
        let now = Timestamp::now();

        Ok(self.with_records(|records| {
            records.next_id += 1;

            let record = ProductRecord {
                id: ProductId::from_i64(records.next_id),
                name: product.name.into_inner(),
                price: product.price.into_decimal(),
                created_at: now,
                updated_at: now,
            };

            records.by_id.insert(records.next_id, record.clone());

            record
        }))
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        let now = Timestamp::now();

        Ok(self.with_records(|records| {
            let record = records.by_id.get_mut(&product.into_i64())?;

            if let Some(name) = update.name {
                record.name = name.into_inner();
            }

            if let Some(price) = update.price {
                record.price = price.into_decimal();
            }

            record.updated_at = now;

            Some(record.clone())
        }))
    }

    async fn delete_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        Ok(self.with_records(|records| records.by_id.remove(&product.into_i64())))
    }
}
