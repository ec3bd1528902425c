//! Observability - ログ初期化と queue の状態ビュー
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: "json" なら JSON 出力、それ以外はテキスト（default: text）
//! - `RUST_LOG`: ログレベルのフィルタ（default: info）

use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize logging for `service_name`.
///
/// 既に subscriber が設定されている場合（テストや組み込み先が先に設定した場合）は
/// 何もしません。
pub fn init_logging(service_name: &str) {
    let json = std::env::var("LOG_FORMAT")
        .unwrap_or_default()
        .eq_ignore_ascii_case("json");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if build_subscriber(json, env_filter, std::io::stdout)
        .try_init()
        .is_ok()
    {
        tracing::debug!(service = service_name, "logging initialized");
    }
}

/// JSON（本番、ログ集約向け）またはテキスト（開発向け）の subscriber
fn build_subscriber<W>(
    json: bool,
    env_filter: EnvFilter,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        Box::new(
            registry.with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .flatten_event(true)
                    .with_writer(writer),
            ),
        )
    } else {
        Box::new(
            registry.with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            ),
        )
    }
}

/// InMemoryQueue の 1 queue 分の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    /// 受信待ち
    pub visible: usize,
    /// 受信済みで未削除
    pub in_flight: usize,
    pub deleted: usize,
}

/// テスト用: ログ出力をメモリに溜める
#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    #[derive(Clone, Default)]
    pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub(crate) fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// `f` の実行中だけテキストの subscriber を設定し、出力を返す
    pub(crate) fn logs_of(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber =
            super::build_subscriber(false, EnvFilter::new("trace"), move || writer.clone());
        tracing::subscriber::with_default(subscriber, f);
        logs.text()
    }
}

#[cfg(test)]
mod tests {
    use super::capture::{CapturedLogs, logs_of};
    use super::*;

    #[test]
    fn json_subscriber_writes_flattened_events() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = build_subscriber(true, EnvFilter::new("info"), move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(queue_url = "https://sqs/123/jobs", "message stored");
            tracing::debug!("filtered out");
        });

        let lines: Vec<serde_json::Value> = logs
            .text()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["message"], "message stored");
        assert_eq!(lines[0]["queue_url"], "https://sqs/123/jobs");
        assert_eq!(lines[0]["level"], "INFO");
    }

    #[test]
    fn text_subscriber_has_no_ansi_codes() {
        let output = logs_of(|| tracing::warn!(attempt = 2, "retrying"));

        assert!(output.contains("WARN"));
        assert!(output.contains("retrying"));
        assert!(output.contains("attempt=2"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn queue_counts_serialize_as_snake_case() {
        let counts = QueueCounts {
            visible: 2,
            in_flight: 1,
            deleted: 0,
        };

        let json = serde_json::to_value(counts).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"visible": 2, "in_flight": 1, "deleted": 0})
        );
    }
}
