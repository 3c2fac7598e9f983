//! 首次启动数据初始化
//!
//! 幂等：settings 缺失时写入默认值，桌台表为空时按 settings.table_count 创建，
//! 菜单为空且允许时写入示例菜品。

use super::repository::{RepoResult, dining_table, product, settings};
use shared::models::ProductCreate;
use sqlx::SqlitePool;

/// (name, description, price, category)
const DEMO_MENU: &[(&str, &str, f64, &str)] = &[
    ("Hamburguesa Clásica", "Carne de res, lechuga, tomate y mayonesa", 8.99, "Hamburguesas"),
    ("Hamburguesa con Queso", "Carne de res, queso cheddar, lechuga, tomate", 9.99, "Hamburguesas"),
    ("Pizza Margarita", "Salsa de tomate, queso mozzarella y albahaca", 10.99, "Pizzas"),
    ("Pizza Pepperoni", "Salsa de tomate, queso mozzarella y pepperoni", 12.99, "Pizzas"),
    ("Ensalada César", "Lechuga romana, crutones, parmesano y aderezo césar", 7.99, "Ensaladas"),
    ("Papas Fritas", "Papas fritas crujientes con sal", 3.99, "Acompañamientos"),
    ("Refresco", "Variedad de refrescos", 2.50, "Bebidas"),
    ("Agua Mineral", "Agua mineral con o sin gas", 1.99, "Bebidas"),
];

/// What a seeding pass created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub settings_created: bool,
    pub tables_created: u64,
    pub products_created: usize,
}

/// Seed settings, tables and (optionally) the demo menu
pub async fn seed_defaults(
    pool: &SqlitePool,
    table_count: i32,
    demo_menu: bool,
) -> RepoResult<SeedReport> {
    let mut tx = super::begin_write(pool).await?;
    let mut report = SeedReport {
        settings_created: settings::ensure_default(&mut *tx, table_count).await?,
        ..Default::default()
    };

    if dining_table::find_all(&mut *tx).await?.is_empty() {
        let count = settings::get(&mut *tx).await?.table_count;
        report.tables_created = dining_table::insert_missing(&mut tx, count).await?;
    }

    if demo_menu && product::count(&mut *tx).await? == 0 {
        for (name, description, price, category) in DEMO_MENU {
            product::create(
                &mut *tx,
                ProductCreate {
                    name: (*name).into(),
                    description: Some((*description).into()),
                    price: *price,
                    category: (*category).into(),
                    is_available: Some(true),
                },
            )
            .await?;
        }
        report.products_created = DEMO_MENU.len();
    }

    tx.commit().await?;

    if report != SeedReport::default() {
        tracing::info!(
            settings_created = report.settings_created,
            tables_created = report.tables_created,
            products_created = report.products_created,
            "Initial data seeded"
        );
    }
    Ok(report)
}
