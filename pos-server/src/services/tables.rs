//! Table Service - 桌台管理
//!
//! 管理操作只动空闲桌台；占用状态只由订单服务修改。

use shared::models::{DiningTable, DiningTableCreate};
use sqlx::SqlitePool;

use crate::db::begin_write;
use crate::db::repository::{RepoError, dining_table, settings};
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_TABLES: i32 = 500;

#[derive(Debug, Clone)]
pub struct TableService {
    pool: SqlitePool,
}

impl TableService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<DiningTable>> {
        Ok(dining_table::find_all(&self.pool).await?)
    }

    pub async fn list_free(&self) -> AppResult<Vec<DiningTable>> {
        Ok(dining_table::find_free(&self.pool).await?)
    }

    /// Create one table; raises the configured table count when exceeded
    pub async fn create(&self, data: DiningTableCreate) -> AppResult<DiningTable> {
        validate_count(data.number, "number")?;
        let capacity = match data.capacity {
            Some(c) if c > 0 => c,
            Some(c) => {
                return Err(AppError::validation(format!(
                    "capacity must be positive, got {c}"
                )));
            }
            None => dining_table::DEFAULT_CAPACITY,
        };

        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;
        let table = dining_table::create(&mut *tx, data.number, capacity)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::TableNumberExists, msg)
                    .with_detail("table_number", data.number),
                other => other.into(),
            })?;

        let current = settings::get(&mut *tx).await?;
        if data.number > current.table_count {
            settings::set_table_count(&mut tx, data.number).await?;
        }
        tx.commit().await.map_err(db_error)?;

        tracing::info!(table_number = table.number, capacity, "Table created");
        Ok(table)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let table = dining_table::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| table_not_found(id))?;
        if table.is_occupied {
            return Err(table_occupied(table.number));
        }
        // guarded again in SQL in case an order grabbed it meanwhile
        if !dining_table::delete(&self.pool, id).await? {
            return Err(table_occupied(table.number));
        }
        tracing::info!(table_number = table.number, "Table deleted");
        Ok(())
    }

    /// Recreate tables `1..=table_count`; rejected while any table is occupied
    pub async fn reset(&self) -> AppResult<Vec<DiningTable>> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;
        let occupied = dining_table::count_occupied(&mut *tx).await?;
        if occupied > 0 {
            return Err(AppError::with_message(
                ErrorCode::TablesInUse,
                format!("{occupied} table(s) are occupied"),
            )
            .with_detail("occupied", occupied));
        }

        let count = settings::get(&mut *tx).await?.table_count;
        dining_table::delete_unoccupied(&mut tx).await?;
        dining_table::insert_missing(&mut tx, count).await?;
        let tables = dining_table::find_all(&mut *tx).await?;
        tx.commit().await.map_err(db_error)?;

        tracing::info!(table_count = count, "Tables reset");
        Ok(tables)
    }

    /// Change the table count, recreating the free tables as `1..=count`
    ///
    /// Occupied tables are kept as they are. Rejected when more tables are
    /// occupied than the new count allows.
    pub async fn resize(&self, count: i32) -> AppResult<Vec<DiningTable>> {
        validate_count(count, "table_count")?;

        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;
        let occupied = dining_table::count_occupied(&mut *tx).await?;
        if occupied > count as i64 {
            return Err(AppError::with_message(
                ErrorCode::TablesInUse,
                format!("{occupied} tables are occupied, cannot reduce to {count}"),
            )
            .with_detail("occupied", occupied)
            .with_detail("table_count", count));
        }

        settings::set_table_count(&mut tx, count).await?;
        dining_table::delete_unoccupied(&mut tx).await?;
        dining_table::insert_missing(&mut tx, count).await?;
        let tables = dining_table::find_all(&mut *tx).await?;
        tx.commit().await.map_err(db_error)?;

        tracing::info!(table_count = count, occupied, "Table count changed");
        Ok(tables)
    }
}

fn validate_count(value: i32, field: &str) -> AppResult<()> {
    if !(1..=MAX_TABLES).contains(&value) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between 1 and {MAX_TABLES}, got {value}"),
        ));
    }
    Ok(())
}

fn table_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
        .with_detail("table_id", id)
}

fn table_occupied(number: i32) -> AppError {
    AppError::with_message(
        ErrorCode::TableOccupied,
        format!("Table {number} is occupied"),
    )
    .with_detail("table_number", number)
}

fn db_error(e: sqlx::Error) -> AppError {
    AppError::database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::seed::seed_defaults;

    async fn service(count: i32) -> (TableService, SqlitePool) {
        let db = DbService::in_memory().await.unwrap();
        seed_defaults(&db.pool, count, false).await.unwrap();
        (TableService::new(db.pool.clone()), db.pool)
    }

    async fn occupy(pool: &SqlitePool, number: i32) {
        let mut conn = pool.acquire().await.unwrap();
        let order_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO orders (table_number, status, created_at, updated_at) VALUES (?, 'pending', 0, 0) RETURNING id",
        )
        .bind(number)
        .fetch_one(&mut *conn)
        .await
        .unwrap();
        assert!(dining_table::occupy(&mut conn, number, order_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_raises_table_count() {
        let (svc, pool) = service(4).await;
        let table = svc
            .create(DiningTableCreate {
                number: 7,
                capacity: None,
            })
            .await
            .unwrap();
        assert_eq!(table.capacity, 4);
        assert_eq!(settings::get(&pool).await.unwrap().table_count, 7);

        let err = svc
            .create(DiningTableCreate {
                number: 7,
                capacity: Some(2),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TableNumberExists);
    }

    #[tokio::test]
    async fn test_delete_occupied_rejected() {
        let (svc, pool) = service(3).await;
        occupy(&pool, 2).await;
        let table = dining_table::find_by_number(&pool, 2).await.unwrap().unwrap();
        let err = svc.delete(table.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TableOccupied);

        let free = dining_table::find_by_number(&pool, 3).await.unwrap().unwrap();
        svc.delete(free.id).await.unwrap();
        assert_eq!(svc.list().await.unwrap().len(), 2);
        assert_eq!(svc.delete(free.id).await.unwrap_err().code, ErrorCode::TableNotFound);
    }

    #[tokio::test]
    async fn test_reset_requires_all_free() {
        let (svc, pool) = service(3).await;
        svc.create(DiningTableCreate {
            number: 9,
            capacity: Some(8),
        })
        .await
        .unwrap();
        occupy(&pool, 1).await;
        assert_eq!(svc.reset().await.unwrap_err().code, ErrorCode::TablesInUse);

        sqlx::query("UPDATE dining_table SET is_occupied = 0, order_id = NULL")
            .execute(&pool)
            .await
            .unwrap();
        // table_count was raised to 9 by the create above
        let tables = svc.reset().await.unwrap();
        assert_eq!(tables.len(), 9);
        assert!(tables.iter().all(|t| t.capacity == 4));
    }

    #[tokio::test]
    async fn test_resize_keeps_occupied_tables() {
        let (svc, pool) = service(6).await;
        occupy(&pool, 5).await;

        let tables = svc.resize(3).await.unwrap();
        let numbers: Vec<i32> = tables.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 5]);
        assert!(tables.iter().find(|t| t.number == 5).unwrap().is_occupied);
        assert_eq!(settings::get(&pool).await.unwrap().table_count, 3);

        occupy(&pool, 1).await;
        occupy(&pool, 2).await;
        assert_eq!(svc.resize(2).await.unwrap_err().code, ErrorCode::TablesInUse);
        assert_eq!(svc.resize(0).await.unwrap_err().code, ErrorCode::ValueOutOfRange);
    }
}
