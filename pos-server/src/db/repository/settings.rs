//! Settings Repository (singleton row, id = 1)

use super::{RepoError, RepoResult};
use shared::models::{AppSettingsUpdate, PrinterSettingsUpdate, RestaurantSettingsUpdate, Settings};
use sqlx::{SqliteConnection, SqliteExecutor};

const COLUMNS: &str = "id, restaurant_name, address, phone, email, logo_path, default_printer, \
     auto_print, table_count, dark_mode, auto_refresh, language, tax_rate, currency_symbol, updated_at";

pub async fn find(ex: impl SqliteExecutor<'_>) -> RepoResult<Option<Settings>> {
    let settings =
        sqlx::query_as::<_, Settings>(&format!("SELECT {COLUMNS} FROM settings WHERE id = 1"))
            .fetch_optional(ex)
            .await?;
    Ok(settings)
}

pub async fn get(ex: impl SqliteExecutor<'_>) -> RepoResult<Settings> {
    find(ex)
        .await?
        .ok_or_else(|| RepoError::NotFound("Settings not initialized".into()))
}

/// Insert the default row if none exists; returns whether a row was created
pub async fn ensure_default(ex: impl SqliteExecutor<'_>, table_count: i32) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO settings (id, restaurant_name, address, phone, email, default_printer, \
         auto_print, table_count, dark_mode, auto_refresh, language, tax_rate, currency_symbol, updated_at) \
         VALUES (1, 'Resto', '123 Calle Principal', '(555) 123-4567', 'contacto@resto.com', 'thermal1', \
         1, ?, 0, 1, 'es', 0.16, '$', ?)",
    )
    .bind(table_count)
    .bind(shared::util::now_millis())
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn update_restaurant(
    ex: impl SqliteExecutor<'_>,
    data: &RestaurantSettingsUpdate,
) -> RepoResult<Settings> {
    let settings = sqlx::query_as::<_, Settings>(&format!(
        "UPDATE settings SET restaurant_name = ?, address = COALESCE(?, address), \
         phone = COALESCE(?, phone), email = COALESCE(?, email), logo_path = COALESCE(?, logo_path), \
         updated_at = ? WHERE id = 1 RETURNING {COLUMNS}"
    ))
    .bind(&data.restaurant_name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.logo_path)
    .bind(shared::util::now_millis())
    .fetch_optional(ex)
    .await?;
    settings.ok_or_else(|| RepoError::NotFound("Settings not initialized".into()))
}

pub async fn update_printer(
    ex: impl SqliteExecutor<'_>,
    data: &PrinterSettingsUpdate,
) -> RepoResult<Settings> {
    let settings = sqlx::query_as::<_, Settings>(&format!(
        "UPDATE settings SET default_printer = ?, auto_print = ?, updated_at = ? WHERE id = 1 RETURNING {COLUMNS}"
    ))
    .bind(&data.default_printer)
    .bind(data.auto_print)
    .bind(shared::util::now_millis())
    .fetch_optional(ex)
    .await?;
    settings.ok_or_else(|| RepoError::NotFound("Settings not initialized".into()))
}

pub async fn update_app(ex: impl SqliteExecutor<'_>, data: &AppSettingsUpdate) -> RepoResult<Settings> {
    let settings = sqlx::query_as::<_, Settings>(&format!(
        "UPDATE settings SET dark_mode = ?, auto_refresh = ?, language = COALESCE(?, language), \
         tax_rate = COALESCE(?, tax_rate), currency_symbol = COALESCE(NULLIF(?, ''), currency_symbol), \
         updated_at = ? WHERE id = 1 RETURNING {COLUMNS}"
    ))
    .bind(data.dark_mode)
    .bind(data.auto_refresh)
    .bind(&data.language)
    .bind(data.tax_rate)
    .bind(&data.currency_symbol)
    .bind(shared::util::now_millis())
    .fetch_optional(ex)
    .await?;
    settings.ok_or_else(|| RepoError::NotFound("Settings not initialized".into()))
}

pub async fn set_table_count(conn: &mut SqliteConnection, table_count: i32) -> RepoResult<()> {
    sqlx::query("UPDATE settings SET table_count = ?, updated_at = ? WHERE id = 1")
        .bind(table_count)
        .bind(shared::util::now_millis())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_defaults_and_updates() {
        let db = DbService::in_memory().await.unwrap();
        assert!(find(&db.pool).await.unwrap().is_none());
        assert!(ensure_default(&db.pool, 8).await.unwrap());
        assert!(!ensure_default(&db.pool, 20).await.unwrap());

        let settings = get(&db.pool).await.unwrap();
        assert_eq!(settings.restaurant_name, "Resto");
        assert_eq!(settings.table_count, 8);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.tax_rate, 0.16);

        let updated = update_app(
            &db.pool,
            &AppSettingsUpdate {
                dark_mode: true,
                auto_refresh: false,
                language: Some("en".into()),
                tax_rate: None,
                currency_symbol: Some(String::new()),
            },
        )
        .await
        .unwrap();
        assert!(updated.dark_mode);
        assert_eq!(updated.language, "en");
        assert_eq!(updated.tax_rate, 0.16);
        // empty currency keeps the previous symbol
        assert_eq!(updated.currency_symbol, "$");
    }
}
