//! HTTP 场景测试
//!
//! 内存 SQLite + 完整路由，通过 `oneshot` 在进程内驱动每个请求。

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pos_server::api::build_router;
use pos_server::db::DbService;
use pos_server::db::seed::seed_defaults;
use pos_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _work_dir: tempfile::TempDir,
}

struct Reply {
    status: StatusCode,
    headers: axum::http::HeaderMap,
    body: Value,
}

impl TestApp {
    async fn new() -> Self {
        let work_dir = tempfile::tempdir().unwrap();
        let db = DbService::in_memory().await.unwrap();
        seed_defaults(&db.pool, 6, true).await.unwrap();
        let config = Config::with_work_dir(work_dir.path().to_string_lossy());
        let state = ServerState::from_pool(config, db.pool);
        Self {
            router: build_router(state),
            _work_dir: work_dir,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Reply {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Reply {
            status,
            headers,
            body,
        }
    }

    async fn get(&self, uri: &str) -> Reply {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> Reply {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Product id by its seeded name
    async fn product_id(&self, name: &str) -> i64 {
        let products = self.get("/products").await.body;
        products
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == name)
            .unwrap_or_else(|| panic!("product {name} not seeded"))["id"]
            .as_i64()
            .unwrap()
    }

    async fn table(&self, number: i64) -> Value {
        let tables = self.get("/tables").await.body;
        tables
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["number"] == number)
            .cloned()
            .unwrap()
    }

    async fn toggle(&self, item_id: i64) -> Reply {
        self.send(Method::PUT, &format!("/kitchen/items/{item_id}/toggle"), None)
            .await
    }

    async fn open_order(&self, table: i64, items: Value) -> Value {
        let reply = self
            .post("/orders", json!({ "table_number": table, "items": items }))
            .await;
        assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
        reply.body
    }
}

#[tokio::test]
async fn test_create_order_occupies_table() {
    let app = TestApp::new().await;
    assert_eq!(app.table(3).await["capacity"], 4);
    assert_eq!(app.table(3).await["is_occupied"], false);

    let reply = app.post("/orders", json!({ "table_number": 3 })).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "pending");
    assert_eq!(reply.body["total"], 0.0);
    assert!(reply.headers.contains_key("hx-trigger"));
    let order_id = reply.body["id"].as_i64().unwrap();
    assert_eq!(
        reply.headers.get("hx-redirect").unwrap(),
        format!("/order/{order_id}").as_str()
    );

    let table = app.table(3).await;
    assert_eq!(table["is_occupied"], true);
    assert_eq!(table["order_id"], order_id);
}

#[tokio::test]
async fn test_occupied_table_conflict_without_mutation() {
    let app = TestApp::new().await;
    app.open_order(3, json!([])).await;

    let reply = app.post("/orders", json!({ "table_number": 3 })).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["code"], 7002);

    let active = app.get("/orders").await.body;
    assert_eq!(active["orders"].as_array().unwrap().len(), 1);
    assert!(
        active["free_tables"]
            .as_array()
            .unwrap()
            .iter()
            .all(|t| t["number"] != 3)
    );

    let missing = app.post("/orders", json!({ "table_number": 99 })).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_burger_and_soda_total() {
    let app = TestApp::new().await;
    let burger = app.product_id("Hamburguesa Clásica").await;
    let soda = app.product_id("Refresco").await;

    let order = app.open_order(1, json!([])).await;
    let id = order["id"].as_i64().unwrap();
    app.post(&format!("/order/{id}/item"), json!({ "product_id": burger, "quantity": 2 }))
        .await;
    let reply = app
        .post(&format!("/order/{id}/item"), json!({ "product_id": soda }))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["total"], 20.48);
    assert_eq!(reply.body["items"].as_array().unwrap().len(), 2);

    // quantity update recomputes
    let soda_line = reply.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["product_id"] == soda)
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    let updated = app
        .send(
            Method::PUT,
            &format!("/order/item/{soda_line}"),
            Some(json!({ "quantity": 3 })),
        )
        .await;
    assert_eq!(updated.body["total"], 25.48);

    let negative = app
        .send(
            Method::PUT,
            &format!("/order/item/{soda_line}"),
            Some(json!({ "quantity": -1 })),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_only_item_resets_total() {
    let app = TestApp::new().await;
    let burger = app.product_id("Hamburguesa Clásica").await;
    let order = app.open_order(2, json!([{ "product_id": burger }])).await;
    assert_eq!(order["total"], 8.99);

    let id = order["id"].as_i64().unwrap();
    let item_id = order["items"][0]["id"].as_i64().unwrap();
    let reply = app
        .send(Method::DELETE, &format!("/order/{id}/item/{item_id}"), None)
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["total"], 0.0);
    assert!(reply.body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_kitchen_flow_and_completion() {
    let app = TestApp::new().await;
    let burger = app.product_id("Hamburguesa Clásica").await;
    let fries = app.product_id("Papas Fritas").await;
    let pizza = app.product_id("Pizza Margarita").await;
    let salad = app.product_id("Ensalada César").await;

    let order = app
        .open_order(
            4,
            json!([
                { "product_id": burger },
                { "product_id": fries },
                { "product_id": pizza },
                { "product_id": salad }
            ]),
        )
        .await;
    let id = order["id"].as_i64().unwrap();
    let items: Vec<i64> = order["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();

    let status = app.get(&format!("/kitchen/order/{id}/status")).await.body;
    assert_eq!(status["percentage"], 0);

    let sent = app.post(&format!("/order/{id}/process"), json!({})).await;
    assert_eq!(sent.body["status"], "in_progress");

    let kitchen = app.get("/kitchen").await.body;
    assert_eq!(kitchen.as_array().unwrap().len(), 1);

    app.toggle(items[0]).await;
    let half = app.toggle(items[1]).await;
    assert_eq!(half.body["progress"], 50);
    assert_eq!(half.body["all_ready"], false);

    app.toggle(items[2]).await;
    let done = app.toggle(items[3]).await;
    assert_eq!(done.body["all_ready"], true);
    let trigger = done.headers.get("hx-trigger").unwrap().to_str().unwrap();
    let trigger: Value = serde_json::from_str(trigger).unwrap();
    assert_eq!(
        trigger["showToast"]["message"],
        "¡Todos los productos están listos! Puede completar la orden."
    );

    let stamped = app.get(&format!("/order/{id}")).await.body["cooking_completed_at"].clone();
    assert!(stamped.is_i64());

    // un-ready keeps the first completion stamp
    let undo = app.toggle(items[0]).await;
    assert_eq!(undo.body["item"]["is_ready"], false);
    assert_eq!(
        app.get(&format!("/order/{id}")).await.body["cooking_completed_at"],
        stamped
    );

    let completed = app
        .post(&format!("/kitchen/order/{id}/complete"), json!({}))
        .await;
    assert_eq!(completed.status, StatusCode::OK);
    assert_eq!(completed.body["status"], "completed");
    assert_eq!(completed.body["cooking_completed_at"], stamped);

    let table = app.table(4).await;
    assert_eq!(table["is_occupied"], false);
    assert!(table["order_id"].is_null());
    assert!(app.get("/kitchen").await.body.as_array().unwrap().is_empty());

    // cancelling a completed order is an invalid transition
    let cancel = app.post(&format!("/order/{id}/cancel"), json!({})).await;
    assert_eq!(cancel.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.get(&format!("/order/{id}")).await.body["status"], "completed");

    let history = app.get("/history?range=today").await.body;
    assert_eq!(history["order_count"], 1);

    let dashboard = app.get("/dashboard").await.body;
    assert_eq!(dashboard["completed_orders"], 1);
    assert_eq!(dashboard["occupied_tables"], 0);
}

#[tokio::test]
async fn test_cancel_releases_table() {
    let app = TestApp::new().await;
    let order = app.open_order(5, json!([])).await;
    let id = order["id"].as_i64().unwrap();

    let reply = app.post(&format!("/order/{id}/cancel"), json!({})).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "cancelled");
    assert_eq!(app.table(5).await["is_occupied"], false);

    // the table can be opened again
    app.open_order(5, json!([])).await;
}

#[tokio::test]
async fn test_malformed_id_is_json_error() {
    let app = TestApp::new().await;
    let reply = app.get("/order/abc").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 5);

    let missing = app.get("/order/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["code"], 4001);
}

#[tokio::test]
async fn test_kitchen_stats_rejects_huge_window() {
    let app = TestApp::new().await;
    let reply = app.get("/kitchen/stats?days=200000000000").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 2);

    let ok = app.get("/kitchen/stats?days=7").await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["days"], 7);
}

#[tokio::test]
async fn test_create_category_rejects_duplicate() {
    let app = TestApp::new().await;
    let before = app.get("/categories").await.body.as_array().unwrap().len();

    let reply = app.post("/categories", json!({ "name": " Postres " })).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.headers.contains_key("hx-trigger"));
    let categories = reply.body.as_array().unwrap();
    assert_eq!(categories.len(), before + 1);
    assert!(categories.iter().any(|c| c == "Postres"));

    let dup = app.post("/categories", json!({ "name": "Postres" })).await;
    assert_eq!(dup.status, StatusCode::CONFLICT);
    assert_eq!(dup.body["code"], 6004);
    assert_eq!(app.get("/categories").await.body.as_array().unwrap().len(), before + 1);
}

#[tokio::test]
async fn test_health_and_menu() {
    let app = TestApp::new().await;
    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["checks"]["database"]["status"], "ok");
    assert_eq!(health.body["displays"]["orders"], 0);
    assert_eq!(health.body["displays"]["clients"].as_array().unwrap().len(), 0);

    let menu = app.get("/menu").await.body;
    let categories: Vec<&str> = menu
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["category"].as_str().unwrap())
        .collect();
    assert!(categories.contains(&"Bebidas"));
    assert_eq!(app.get("/categories").await.body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_backup_round_trip() {
    let app = TestApp::new().await;
    let created = app.post("/backup", json!({})).await;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.body["id"].as_i64().unwrap();

    let download = app.get(&format!("/backup/{id}/download")).await;
    assert_eq!(download.status, StatusCode::OK);
    assert!(
        download
            .headers
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("backup-")
    );

    let deleted = app.send(Method::DELETE, &format!("/backup/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(app.get("/backup/list").await.body.as_array().unwrap().is_empty());
}
