//! Settings Service - 餐厅设置

use serde::Serialize;
use shared::models::{
    AppSettingsUpdate, Backup, DiningTable, PrinterSettingsUpdate, RestaurantSettingsUpdate,
    Settings,
};
use sqlx::SqlitePool;

use super::backup::BackupService;
use super::tables::TableService;
use crate::db::repository::settings;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Settings page payload
#[derive(Debug, Clone, Serialize)]
pub struct SettingsOverview {
    pub settings: Settings,
    pub tables: Vec<DiningTable>,
    pub backups: Vec<Backup>,
}

#[derive(Debug, Clone)]
pub struct SettingsService {
    pool: SqlitePool,
    tables: TableService,
    backups: BackupService,
}

impl SettingsService {
    pub fn new(pool: SqlitePool, tables: TableService, backups: BackupService) -> Self {
        Self {
            pool,
            tables,
            backups,
        }
    }

    pub async fn get(&self) -> AppResult<Settings> {
        settings::find(&self.pool)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::SettingsNotFound))
    }

    pub async fn overview(&self) -> AppResult<SettingsOverview> {
        Ok(SettingsOverview {
            settings: self.get().await?,
            tables: self.tables.list().await?,
            backups: self.backups.list().await?,
        })
    }

    pub async fn update_restaurant(&self, mut data: RestaurantSettingsUpdate) -> AppResult<Settings> {
        data.restaurant_name = data.restaurant_name.trim().to_string();
        validate_required_text(&data.restaurant_name, "restaurant_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.address, "address", MAX_ADDRESS_LEN)?;
        validate_optional_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.email, "email", MAX_EMAIL_LEN)?;
        validate_optional_text(&data.logo_path, "logo_path", MAX_URL_LEN)?;

        let updated = settings::update_restaurant(&self.pool, &data).await?;
        tracing::info!(restaurant_name = %updated.restaurant_name, "Restaurant settings updated");
        Ok(updated)
    }

    pub async fn update_printer(&self, data: PrinterSettingsUpdate) -> AppResult<Settings> {
        if data.default_printer.len() > MAX_SHORT_TEXT_LEN {
            return Err(AppError::validation(format!(
                "default_printer is too long (max {MAX_SHORT_TEXT_LEN})"
            )));
        }
        Ok(settings::update_printer(&self.pool, &data).await?)
    }

    pub async fn update_app(&self, data: AppSettingsUpdate) -> AppResult<Settings> {
        if let Some(rate) = data.tax_rate
            && !(0.0..=1.0).contains(&rate)
        {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("tax_rate must be between 0 and 1, got {rate}"),
            ));
        }
        validate_optional_text(&data.language, "language", 16)?;
        validate_optional_text(&data.currency_symbol, "currency_symbol", 8)?;
        Ok(settings::update_app(&self.pool, &data).await?)
    }

    /// Change the table count and rebuild the free tables
    pub async fn update_tables(&self, table_count: i32) -> AppResult<SettingsOverview> {
        self.tables.resize(table_count).await?;
        self.overview().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::seed::seed_defaults;

    async fn service() -> (SettingsService, tempfile::TempDir) {
        let db = DbService::in_memory().await.unwrap();
        seed_defaults(&db.pool, 4, false).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let svc = SettingsService::new(
            db.pool.clone(),
            TableService::new(db.pool.clone()),
            BackupService::new(db.pool, dir.path()),
        );
        (svc, dir)
    }

    #[tokio::test]
    async fn test_restaurant_name_required() {
        let (svc, _dir) = service().await;
        let err = svc
            .update_restaurant(RestaurantSettingsUpdate {
                restaurant_name: "   ".into(),
                address: None,
                phone: None,
                email: None,
                logo_path: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let updated = svc
            .update_restaurant(RestaurantSettingsUpdate {
                restaurant_name: "La Cocina".into(),
                address: None,
                phone: Some("555-0000".into()),
                email: None,
                logo_path: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.restaurant_name, "La Cocina");
        assert_eq!(updated.phone, "555-0000");
        assert_eq!(updated.address, "123 Calle Principal");
    }

    #[tokio::test]
    async fn test_tax_rate_range() {
        let (svc, _dir) = service().await;
        let err = svc
            .update_app(AppSettingsUpdate {
                dark_mode: false,
                auto_refresh: true,
                language: None,
                tax_rate: Some(16.0),
                currency_symbol: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[tokio::test]
    async fn test_update_tables() {
        let (svc, _dir) = service().await;
        let overview = svc.update_tables(8).await.unwrap();
        assert_eq!(overview.settings.table_count, 8);
        assert_eq!(overview.tables.len(), 8);
    }
}
