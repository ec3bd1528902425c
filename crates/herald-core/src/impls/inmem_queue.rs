//! InMemoryQueue - 開発用・テスト用の SQS queue
//!
//! # 学習ポイント
//! - Mutex + Condvar による long polling（SQS の `WaitTimeSeconds` 相当）
//! - queue URL ごとの FIFO 管理
//! - receive と delete の分離（ack は呼び出し側の責務）

use crate::domain::errors::TransportError;
use crate::domain::events::{SqsEvent, SqsMessage};
use crate::observability::QueueCounts;
use crate::ports::{Clock, DeliveryReceipt, IdGenerator, QueueSender, SystemClock, UlidGenerator};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// 1 回の receive で返す最大件数（SQS の上限と同じ）
pub const MAX_RECEIVE_BATCH: usize = 10;

#[derive(Default)]
struct QueueState {
    visible: VecDeque<SqsMessage>,
    /// receipt handle -> 受信済みメッセージ
    in_flight: HashMap<String, SqsMessage>,
    deleted: usize,
}

/// InMemoryQueue は queue URL ごとにメッセージを保持する
///
/// # 実装詳細
/// - HashMap<String, QueueState> で queue ごとの状態を管理
/// - Mutex で排他制御
/// - Condvar で send 時に待機中の receive を起こす
///
/// # 使用例
/// ```ignore
/// let queue = InMemoryQueue::new();
/// queue.create_queue("https://sqs.eu-central-1.amazonaws.com/123/jobs");
/// let event = queue.receive(url, 10, Duration::from_secs(20))?;
/// handler.process(&event)?;
/// for message in &event.records {
///     queue.delete(url, &message.receipt_handle)?;
/// }
/// ```
pub struct InMemoryQueue {
    queues: Mutex<HashMap<String, QueueState>>,
    condvar: Condvar,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock<C: Clock + Clone + 'static>(clock: C) -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
            condvar: Condvar::new(),
            clock: Arc::new(clock.clone()),
            ids: Box::new(UlidGenerator::new(clock)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, QueueState>> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// queue を作成する（既にあれば何もしない）
    pub fn create_queue(&self, queue_url: &str) {
        self.lock().entry(queue_url.to_string()).or_default();
    }

    /// 最大 `max` 件のメッセージを受信する
    ///
    /// queue が空なら `wait` の間だけ新しいメッセージを待ちます。
    /// 1 件でも届けばその時点で返し、時間切れなら空の `SqsEvent` を返します。
    /// 受信したメッセージは `delete` されるまで in-flight として残ります。
    pub fn receive(
        &self,
        queue_url: &str,
        max: usize,
        wait: Duration,
    ) -> Result<SqsEvent, TransportError> {
        let max = max.clamp(1, MAX_RECEIVE_BATCH);
        let start = Instant::now();
        let mut guard = self.lock();

        loop {
            let state = guard
                .get_mut(queue_url)
                .ok_or_else(|| TransportError::DestinationNotFound(queue_url.to_string()))?;

            if !state.visible.is_empty() {
                let take = max.min(state.visible.len());
                let records: Vec<SqsMessage> = state.visible.drain(..take).collect();
                for message in &records {
                    state
                        .in_flight
                        .insert(message.receipt_handle.clone(), message.clone());
                }
                debug!(queue_url, count = records.len(), "messages received");
                return Ok(SqsEvent { records });
            }

            let elapsed = start.elapsed();
            if elapsed >= wait {
                return Ok(SqsEvent::default());
            }

            // 他の queue への send でも起こされるので、起きたら必ず再確認する
            let (next_guard, _) = self
                .condvar
                .wait_timeout(guard, wait - elapsed)
                .unwrap_or_else(PoisonError::into_inner);
            guard = next_guard;
        }
    }

    /// 受信済みメッセージを削除する（ack）
    pub fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<(), TransportError> {
        let mut queues = self.lock();
        let state = queues
            .get_mut(queue_url)
            .ok_or_else(|| TransportError::DestinationNotFound(queue_url.to_string()))?;

        match state.in_flight.remove(receipt_handle) {
            Some(_) => {
                state.deleted += 1;
                Ok(())
            }
            None => Err(TransportError::Failed(format!(
                "unknown receipt handle: {receipt_handle}"
            ))),
        }
    }

    pub fn counts(&self, queue_url: &str) -> Result<QueueCounts, TransportError> {
        let queues = self.lock();
        let state = queues
            .get(queue_url)
            .ok_or_else(|| TransportError::DestinationNotFound(queue_url.to_string()))?;

        Ok(QueueCounts {
            visible: state.visible.len(),
            in_flight: state.in_flight.len(),
            deleted: state.deleted,
        })
    }
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueSender for InMemoryQueue {
    fn send(&self, queue_url: &str, body: &str) -> Result<DeliveryReceipt, TransportError> {
        let mut queues = self.lock();
        let state = queues
            .get_mut(queue_url)
            .ok_or_else(|| TransportError::DestinationNotFound(queue_url.to_string()))?;

        let message_id = self.ids.next_message_id();
        let sent_at = self.clock.now().timestamp_millis();
        state.visible.push_back(SqsMessage {
            message_id: message_id.to_string(),
            receipt_handle: self.ids.next_receipt_handle(),
            body: body.to_string(),
            attributes: HashMap::from([("SentTimestamp".to_string(), sent_at.to_string())]),
            event_source_arn: None,
        });
        drop(queues);

        // 待機中の receive がどの queue を見ているか分からないので全員起こす
        self.condvar.notify_all();
        debug!(queue_url, %message_id, "message stored");

        Ok(DeliveryReceipt {
            message_id,
            destination: queue_url.to_string(),
        })
    }
}
