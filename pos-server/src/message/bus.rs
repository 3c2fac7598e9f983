//! 显示端通知总线
//!
//! # 架构
//!
//! ```text
//!  order service ──▶ publish() ──▶ mpsc (unbounded) ──▶ dispatch loop
//!                                                          │ serialize once
//!                                          ┌───────────────┴───────────────┐
//!                                          ▼                               ▼
//!                          broadcast<orders> (bounded)       broadcast<kitchen> (bounded)
//!                                          │                               │
//!                                  /ws/orders sockets              /ws/kitchen sockets
//! ```
//!
//! Each topic queue is a bounded `tokio::sync::broadcast` channel. A socket
//! that falls behind loses the oldest messages (`RecvError::Lagged`) instead of
//! stalling the dispatcher or the other sockets. Displays treat every message
//! as an invalidation hint and re-fetch state over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use shared::message::{DisplayMessage, DisplayTopic};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

/// 已连接的显示端
#[derive(Debug, Clone, Serialize)]
pub struct ConnectedDisplay {
    pub id: u64,
    pub topic: DisplayTopic,
    pub addr: Option<SocketAddr>,
    pub connected_at: i64,
}

/// 通知总线
///
/// Clone 成本很低，所有字段都是共享句柄。
#[derive(Debug, Clone)]
pub struct NotificationBus {
    /// 业务侧入口 (无界，发布永不阻塞)
    inbound: mpsc::UnboundedSender<DisplayMessage>,
    /// 前台显示端队列
    orders_tx: broadcast::Sender<Arc<str>>,
    /// 厨房显示端队列
    kitchen_tx: broadcast::Sender<Arc<str>>,
    /// 已连接的显示端 (id -> info)
    displays: Arc<DashMap<u64, ConnectedDisplay>>,
    next_display_id: Arc<AtomicU64>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl NotificationBus {
    /// 创建总线并启动分发循环
    ///
    /// `capacity` 是每个分组队列的容量。必须在 tokio runtime 内调用。
    pub fn spawn(capacity: usize) -> Self {
        let (inbound, inbound_rx) = mpsc::unbounded_channel();
        let (orders_tx, _) = broadcast::channel(capacity.max(1));
        let (kitchen_tx, _) = broadcast::channel(capacity.max(1));
        let bus = Self {
            inbound,
            orders_tx,
            kitchen_tx,
            displays: Arc::new(DashMap::new()),
            next_display_id: Arc::new(AtomicU64::new(1)),
            shutdown_token: CancellationToken::new(),
        };

        tokio::spawn(bus.clone().dispatch_loop(inbound_rx));
        bus
    }

    /// 发布消息 (fire-and-forget)
    pub fn publish(&self, msg: DisplayMessage) {
        if self.inbound.send(msg).is_err() {
            tracing::warn!("Notification dispatcher stopped, message dropped");
        }
    }

    /// 订阅指定分组
    pub fn subscribe(&self, topic: DisplayTopic) -> broadcast::Receiver<Arc<str>> {
        self.sender(topic).subscribe()
    }

    fn sender(&self, topic: DisplayTopic) -> &broadcast::Sender<Arc<str>> {
        match topic {
            DisplayTopic::Orders => &self.orders_tx,
            DisplayTopic::Kitchen => &self.kitchen_tx,
        }
    }

    /// 登记显示端连接，返回连接 ID
    pub fn register(&self, topic: DisplayTopic, addr: Option<SocketAddr>) -> u64 {
        let id = self.next_display_id.fetch_add(1, Ordering::Relaxed);
        self.displays.insert(
            id,
            ConnectedDisplay {
                id,
                topic,
                addr,
                connected_at: shared::util::now_millis(),
            },
        );
        tracing::info!(display_id = id, %topic, "Display connected");
        id
    }

    /// 移除显示端连接
    pub fn unregister(&self, id: u64) {
        if let Some((_, removed)) = self.displays.remove(&id) {
            tracing::info!(display_id = id, topic = %removed.topic, "Display disconnected");
        }
    }

    /// 获取已连接显示端列表
    pub fn connected_displays(&self) -> Vec<ConnectedDisplay> {
        let mut displays: Vec<_> = self.displays.iter().map(|e| e.value().clone()).collect();
        displays.sort_by_key(|d| d.id);
        displays
    }

    pub fn connected_count(&self, topic: DisplayTopic) -> usize {
        self.displays.iter().filter(|e| e.value().topic == topic).count()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 停止分发循环，所有 WebSocket 连接随之关闭
    pub fn shutdown(&self) {
        tracing::info!("Shutting down notification bus");
        self.shutdown_token.cancel();
    }

    async fn dispatch_loop(self, mut inbound_rx: mpsc::UnboundedReceiver<DisplayMessage>) {
        tracing::debug!("Notification dispatcher started");
        loop {
            tokio::select! {
                _ = self.shutdown_token.cancelled() => break,
                msg = inbound_rx.recv() => match msg {
                    Some(msg) => self.dispatch(&msg),
                    None => break,
                },
            }
        }
        tracing::debug!("Notification dispatcher stopped");
    }

    fn dispatch(&self, msg: &DisplayMessage) {
        let text: Arc<str> = match msg.to_text() {
            Ok(text) => text.into(),
            Err(e) => {
                tracing::warn!(kind = %msg.kind, "Failed to serialize display message: {e}");
                return;
            }
        };

        let topic = msg.topic();
        // Err only means nobody is listening on this topic
        if let Ok(receivers) = self.sender(topic).send(text) {
            tracing::trace!(kind = %msg.kind, %topic, receivers, "Display message dispatched");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::{ChangeAction, OrderChange};
    use shared::models::OrderStatus;
    use std::time::Duration;
    use tokio::sync::broadcast::error::RecvError;

    fn change(order_id: i64) -> OrderChange {
        OrderChange::new(ChangeAction::Created, order_id, 1, OrderStatus::Pending)
    }

    async fn recv_text(rx: &mut broadcast::Receiver<Arc<str>>) -> Arc<str> {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_routes_by_topic() {
        let bus = NotificationBus::spawn(8);
        let mut orders_rx = bus.subscribe(DisplayTopic::Orders);
        let mut kitchen_rx = bus.subscribe(DisplayTopic::Kitchen);

        bus.publish(DisplayMessage::kitchen_update(&change(5)));

        let text = recv_text(&mut kitchen_rx).await;
        assert!(text.contains("kitchen_update"));
        assert!(orders_rx.try_recv().is_err());

        bus.publish(DisplayMessage::order_update(&change(6)));
        let text = recv_text(&mut orders_rx).await;
        assert!(text.contains("\"order_id\":6"));
    }

    #[tokio::test]
    async fn test_slow_display_drops_oldest() {
        let bus = NotificationBus::spawn(2);
        let mut slow_rx = bus.subscribe(DisplayTopic::Orders);

        for id in 1..=5 {
            bus.publish(DisplayMessage::order_update(&change(id)));
        }
        // Let the dispatcher drain the inbound queue
        tokio::time::sleep(Duration::from_millis(50)).await;

        match slow_rx.recv().await {
            Err(RecvError::Lagged(skipped)) => assert_eq!(skipped, 3),
            other => panic!("expected lag, got {:?}", other),
        }
        let text = slow_rx.recv().await.unwrap();
        assert!(text.contains("\"order_id\":4"));
        let text = slow_rx.recv().await.unwrap();
        assert!(text.contains("\"order_id\":5"));
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let bus = NotificationBus::spawn(4);
        let a = bus.register(DisplayTopic::Kitchen, None);
        let b = bus.register(DisplayTopic::Orders, None);
        assert_ne!(a, b);
        assert_eq!(bus.connected_count(DisplayTopic::Kitchen), 1);
        assert_eq!(bus.connected_displays().len(), 2);

        bus.unregister(a);
        assert_eq!(bus.connected_count(DisplayTopic::Kitchen), 0);
        let remaining = bus.connected_displays();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b);
        assert_eq!(remaining[0].topic, DisplayTopic::Orders);

        // unknown ids are ignored
        bus.unregister(a);
        assert_eq!(bus.connected_displays().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_after_shutdown_is_noop() {
        let bus = NotificationBus::spawn(4);
        bus.shutdown();
        tokio::time::sleep(Duration::from_millis(20)).await;
        bus.publish(DisplayMessage::order_update(&change(1)));
    }
}
