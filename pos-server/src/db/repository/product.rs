//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const COLUMNS: &str =
    "id, name, description, price, category, is_available, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool, category: Option<&str>) -> RepoResult<Vec<Product>> {
    let products = match category {
        Some(category) => {
            sqlx::query_as::<_, Product>(&format!(
                "SELECT {COLUMNS} FROM product WHERE category = ? ORDER BY name"
            ))
            .bind(category)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Product>(&format!(
                "SELECT {COLUMNS} FROM product ORDER BY category, name"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(products)
}

/// Products currently orderable, ordered for menu display
pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM product WHERE is_available = 1 ORDER BY category, name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Product>> {
    let product =
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM product WHERE id = ?"))
            .bind(id)
            .fetch_optional(ex)
            .await?;
    Ok(product)
}

/// Distinct category names, alphabetical
pub async fn categories(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let categories =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM product ORDER BY category")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn category_exists(ex: impl SqliteExecutor<'_>, category: &str) -> RepoResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM product WHERE category = ?)",
    )
    .bind(category)
    .fetch_one(ex)
    .await?;
    Ok(exists)
}

pub async fn count(ex: impl SqliteExecutor<'_>) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product")
        .fetch_one(ex)
        .await?;
    Ok(count)
}

pub async fn create(ex: impl SqliteExecutor<'_>, data: ProductCreate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO product (name, description, price, category, is_available, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.description.unwrap_or_default())
    .bind(data.price)
    .bind(data.category)
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .fetch_one(ex)
    .await?;
    Ok(product)
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE product SET name = COALESCE(?1, name), description = COALESCE(?2, description), \
         price = COALESCE(?3, price), category = COALESCE(?4, category), \
         is_available = COALESCE(?5, is_available), updated_at = ?6 WHERE id = ?7 RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .bind(data.category)
    .bind(data.is_available)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    product.ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Switch availability for a set of products, returns affected row count
pub async fn set_availability(
    ex: impl SqliteExecutor<'_>,
    ids: &[i64],
    available: bool,
) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE product SET is_available = ");
    qb.push_bind(available)
        .push(", updated_at = ")
        .push_bind(shared::util::now_millis())
        .push(" WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let rows = qb.build().execute(ex).await?;
    Ok(rows.rows_affected())
}

/// Whether any order line references the product
pub async fn is_referenced(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let referenced = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM order_item WHERE product_id = ?)",
    )
    .bind(id)
    .fetch_one(ex)
    .await?;
    Ok(referenced)
}

pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
