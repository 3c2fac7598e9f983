//! Catalog Service - 菜品管理
//!
//! 被订单引用的菜品只下架不删除，保证历史订单的菜品名称可查。

use serde::Serialize;
use shared::models::{
    BulkAction, CategoryCreate, MenuSection, Product, ProductBulkRequest, ProductCreate, ProductRemoval,
    ProductUpdate,
};
use sqlx::SqlitePool;

use crate::db::begin_write;
use crate::db::repository::{RepoError, product};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Result of a bulk catalog action
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkOutcome {
    pub updated: u64,
    pub deleted: u64,
    /// Referenced by orders, switched off instead of deleted
    pub disabled: u64,
}

#[derive(Debug, Clone)]
pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, category: Option<&str>) -> AppResult<Vec<Product>> {
        Ok(product::find_all(&self.pool, category).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<Product> {
        product::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    /// Available products grouped by category, categories alphabetical
    pub async fn menu(&self) -> AppResult<Vec<MenuSection>> {
        let products = product::find_available(&self.pool).await?;
        Ok(group_by_category(products))
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        Ok(product::categories(&self.pool).await?)
    }

    /// Register a new category
    ///
    /// 分类没有独立的表，由一个下架的占位菜品登记；返回更新后的分类列表。
    pub async fn create_category(&self, data: CategoryCreate) -> AppResult<Vec<String>> {
        let name = data.name.trim().to_string();
        validate_required_text(&name, "name", MAX_SHORT_TEXT_LEN)?;

        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;
        if product::category_exists(&mut *tx, &name).await? {
            return Err(AppError::with_message(
                ErrorCode::CategoryExists,
                format!("Category {name} already exists"),
            )
            .with_detail("category", name));
        }
        product::create(
            &mut *tx,
            ProductCreate {
                name: format!("Categoría: {name}"),
                description: Some("Categoría temporal - puede eliminar este producto".into()),
                price: 0.01,
                category: name.clone(),
                is_available: Some(false),
            },
        )
        .await?;
        tx.commit().await.map_err(db_error)?;

        tracing::info!(category = %name, "Category created");
        self.categories().await
    }

    pub async fn create(&self, mut data: ProductCreate) -> AppResult<Product> {
        data.name = data.name.trim().to_string();
        data.category = data.category.trim().to_string();
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.category, "category", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_price(data.price)?;

        let created = product::create(&self.pool, data).await?;
        tracing::info!(product_id = created.id, name = %created.name, "Product created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, mut data: ProductUpdate) -> AppResult<Product> {
        if let Some(name) = data.name.as_mut() {
            *name = name.trim().to_string();
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(category) = data.category.as_mut() {
            *category = category.trim().to_string();
            validate_required_text(category, "category", MAX_SHORT_TEXT_LEN)?;
        }
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        if let Some(price) = data.price {
            validate_price(price)?;
        }

        match product::update(&self.pool, id, data).await {
            Ok(updated) => Ok(updated),
            Err(RepoError::NotFound(_)) => Err(product_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a product, or switch it off when orders reference it
    pub async fn delete(&self, id: i64) -> AppResult<ProductRemoval> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;
        if product::find_by_id(&mut *tx, id).await?.is_none() {
            return Err(product_not_found(id));
        }

        let removal = if product::is_referenced(&mut *tx, id).await? {
            product::set_availability(&mut *tx, &[id], false).await?;
            ProductRemoval::Disabled
        } else {
            product::delete(&mut *tx, id).await?;
            ProductRemoval::Deleted
        };
        tx.commit().await.map_err(db_error)?;

        tracing::info!(product_id = id, ?removal, "Product removed");
        Ok(removal)
    }

    pub async fn bulk(&self, request: ProductBulkRequest) -> AppResult<BulkOutcome> {
        if request.ids.is_empty() {
            return Err(AppError::validation("ids must not be empty"));
        }

        let mut outcome = BulkOutcome::default();
        match request.action {
            BulkAction::Enable => {
                outcome.updated = product::set_availability(&self.pool, &request.ids, true).await?;
            }
            BulkAction::Disable => {
                outcome.updated = product::set_availability(&self.pool, &request.ids, false).await?;
            }
            BulkAction::Delete => {
                for id in &request.ids {
                    match self.delete(*id).await {
                        Ok(ProductRemoval::Deleted) => outcome.deleted += 1,
                        Ok(ProductRemoval::Disabled) => outcome.disabled += 1,
                        Err(e) if e.code == ErrorCode::ProductNotFound => {
                            tracing::warn!(product_id = id, "Bulk delete skipped missing product");
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }
        tracing::info!(action = ?request.action, ids = request.ids.len(), "Bulk catalog action");
        Ok(outcome)
    }
}

fn product_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
        .with_detail("product_id", id)
}

fn db_error(e: sqlx::Error) -> AppError {
    AppError::database(e.to_string())
}

/// Group products (already ordered by category) into menu sections
fn group_by_category(products: Vec<Product>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for p in products {
        match sections.last_mut() {
            Some(section) if section.category == p.category => section.products.push(p),
            _ => sections.push(MenuSection {
                category: p.category.clone(),
                products: vec![p],
            }),
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn new_product(name: &str, category: &str, price: f64) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            description: None,
            price,
            category: category.into(),
            is_available: None,
        }
    }

    async fn service() -> CatalogService {
        let db = DbService::in_memory().await.unwrap();
        CatalogService::new(db.pool)
    }

    #[tokio::test]
    async fn test_menu_groups_by_category() {
        let svc = service().await;
        svc.create(new_product("Refresco", "Bebidas", 2.50)).await.unwrap();
        svc.create(new_product("Pizza Pepperoni", "Pizzas", 12.99)).await.unwrap();
        svc.create(new_product("Agua Mineral", "Bebidas", 1.99)).await.unwrap();

        let menu = svc.menu().await.unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].category, "Bebidas");
        assert_eq!(menu[0].products.len(), 2);
        assert_eq!(menu[0].products[0].name, "Agua Mineral");
        assert_eq!(menu[1].category, "Pizzas");
    }

    #[tokio::test]
    async fn test_create_validation() {
        let svc = service().await;
        let err = svc.create(new_product("  ", "Bebidas", 1.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = svc.create(new_product("Agua", "Bebidas", -3.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);

        let created = svc.create(new_product(" Agua ", " Bebidas ", 1.0)).await.unwrap();
        assert_eq!(created.name, "Agua");
        assert_eq!(created.category, "Bebidas");
    }

    #[tokio::test]
    async fn test_create_category() {
        let svc = service().await;
        svc.create(new_product("Refresco", "Bebidas", 2.50)).await.unwrap();

        let categories = svc
            .create_category(CategoryCreate { name: "  Postres ".into() })
            .await
            .unwrap();
        assert_eq!(categories, vec!["Bebidas".to_string(), "Postres".to_string()]);
        // placeholder is registered but never offered
        assert!(svc.menu().await.unwrap().iter().all(|s| s.category != "Postres"));
        let placeholder = &svc.list(Some("Postres")).await.unwrap()[0];
        assert!(!placeholder.is_available);

        let err = svc
            .create_category(CategoryCreate { name: "Bebidas".into() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryExists);
        let err = svc
            .create_category(CategoryCreate { name: "   ".into() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(svc.categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_unreferenced_and_missing() {
        let svc = service().await;
        let p = svc.create(new_product("Refresco", "Bebidas", 2.50)).await.unwrap();
        assert_eq!(svc.delete(p.id).await.unwrap(), ProductRemoval::Deleted);
        let err = svc.delete(p.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        let err = svc.update(p.id, ProductUpdate::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }

    #[tokio::test]
    async fn test_delete_referenced_product_disables_it() {
        let db = DbService::in_memory().await.unwrap();
        let svc = CatalogService::new(db.pool.clone());
        let p = svc.create(new_product("Refresco", "Bebidas", 2.50)).await.unwrap();
        sqlx::query(
            "INSERT INTO orders (id, table_number, status, created_at, updated_at) VALUES (1, 1, 'pending', 0, 0)",
        )
        .execute(&db.pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO order_item (order_id, product_id, quantity, unit_price, created_at, updated_at) VALUES (1, ?, 1, 2.50, 0, 0)",
        )
        .bind(p.id)
        .execute(&db.pool)
        .await
        .unwrap();

        let outcome = svc
            .bulk(ProductBulkRequest {
                ids: vec![p.id, 999],
                action: BulkAction::Delete,
            })
            .await
            .unwrap();
        assert_eq!(outcome.disabled, 1);
        assert_eq!(outcome.deleted, 0);
        assert!(!svc.get(p.id).await.unwrap().is_available);
    }
}
