//! 통합 테스트 공용 mock.

#![allow(dead_code)]

use async_trait::async_trait;
use hystrix_core::error::CoreError;
use hystrix_core::models::metric::Counter;
use hystrix_core::models::snapshot::{Data, LatencyTotals};
use hystrix_core::ports::metrics_sink::{MetricsSession, MetricsSink};
use hystrix_core::ports::snapshot_source::SnapshotSource;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

/// 전송 완료된 세션 한 건
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub source: String,
    pub counters: Vec<Counter>,
}

/// 전송 내용을 메모리에 기록하는 싱크
#[derive(Default)]
pub struct RecordingSink {
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }

    pub fn sources(&self) -> Vec<String> {
        self.submissions().into_iter().map(|s| s.source).collect()
    }

    pub fn counters_for(&self, source: &str) -> Vec<Vec<Counter>> {
        self.submissions()
            .into_iter()
            .filter(|s| s.source == source)
            .map(|s| s.counters)
            .collect()
    }
}

struct RecordingSession {
    source: String,
    counters: Vec<Counter>,
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl MetricsSink for RecordingSink {
    fn open_session(&self, source: &str) -> Box<dyn MetricsSession> {
        Box::new(RecordingSession {
            source: source.to_string(),
            counters: Vec::new(),
            submissions: Arc::clone(&self.submissions),
        })
    }
}

#[async_trait]
impl MetricsSession for RecordingSession {
    fn add_counter(&mut self, name: &str, value: i64) {
        self.counters.push(Counter::new(name, value));
    }

    async fn finish(self: Box<Self>) -> Result<(), CoreError> {
        let this = *self;
        this.submissions.lock().push(Submission {
            source: this.source,
            counters: this.counters,
        });
        Ok(())
    }
}

/// 정해진 스냅샷을 차례로 보내고 끝나는 소스
pub struct FixedSource {
    snapshots: Vec<Data>,
}

impl FixedSource {
    pub fn new(snapshots: Vec<Data>) -> Arc<Self> {
        Arc::new(Self { snapshots })
    }
}

#[async_trait]
impl SnapshotSource for FixedSource {
    async fn run(&self, tx: mpsc::Sender<Data>) -> Result<(), CoreError> {
        for snapshot in &self.snapshots {
            if tx.send(snapshot.clone()).await.is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// orders/create 커맨드 스냅샷 (mean=42, L99=120, L100=200)
pub fn orders_create(open: Option<bool>) -> Data {
    Data {
        group: "orders".to_string(),
        name: "create".to_string(),
        open,
        mean_latency: Some(42),
        latency_totals: LatencyTotals {
            l50: Some(10),
            l90: Some(40),
            l99: Some(120),
            l100: Some(200),
            ..Default::default()
        },
    }
}
