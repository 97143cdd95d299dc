//! 클러스터별 릴레이.
//!
//! 클러스터마다 태스크 두 개를 띄운다.
//! - 소스 태스크: `SnapshotSource::run`이 스냅샷을 채널로 밀어 넣는다
//! - 릴레이 태스크: 채널에서 꺼낸 스냅샷을 `Reporter::report`에 넘긴다
//!
//! 리포터는 모든 클러스터가 공유한다.

use hystrix_core::models::snapshot::Data;
use hystrix_core::ports::snapshot_source::SnapshotSource;
use hystrix_report::Reporter;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 채널의 스냅샷을 종료 신호가 올 때까지 리포트. 처리한 스냅샷 수 반환
pub async fn relay_snapshots(
    reporter: Arc<Reporter>,
    cluster: String,
    mut rx: mpsc::Receiver<Data>,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    let mut processed = 0u64;

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("릴레이 종료 신호: {cluster}");
                    break;
                }
            }
            snapshot = rx.recv() => {
                let Some(data) = snapshot else {
                    debug!("스냅샷 채널 닫힘: {cluster}");
                    break;
                };
                reporter.report(&data, &cluster).await;
                processed += 1;
            }
        }
    }

    processed
}

/// 실행 중인 클러스터 파이프라인
pub struct ClusterHandle {
    cluster: String,
    source: JoinHandle<()>,
    relay: JoinHandle<u64>,
}

impl ClusterHandle {
    /// 클러스터 이름
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// 릴레이 종료를 기다리고 소스 태스크를 정리한다. 처리한 스냅샷 수 반환
    ///
    /// 종료 신호를 먼저 보낸 뒤 호출해야 한다.
    pub async fn join(self) -> u64 {
        let processed = match self.relay.await {
            Ok(n) => n,
            Err(e) => {
                warn!("릴레이 태스크 비정상 종료 ({}): {e}", self.cluster);
                0
            }
        };
        // 스트림 대기 중이면 채널 닫힘을 알아채지 못하므로 중단
        self.source.abort();
        info!("클러스터 종료: {} (스냅샷 {processed}개 처리)", self.cluster);
        processed
    }
}

/// 클러스터 하나의 소스/릴레이 태스크 시작
pub fn spawn_cluster(
    reporter: Arc<Reporter>,
    source: Arc<dyn SnapshotSource>,
    cluster: &str,
    channel_capacity: usize,
    shutdown: watch::Receiver<bool>,
) -> ClusterHandle {
    let (tx, rx) = mpsc::channel(channel_capacity.max(1));

    let source_cluster = cluster.to_string();
    let source_task = tokio::spawn(async move {
        if let Err(e) = source.run(tx).await {
            warn!("스냅샷 소스 종료 ({source_cluster}): {e}");
        }
    });

    let relay_task = tokio::spawn(relay_snapshots(
        reporter,
        cluster.to_string(),
        rx,
        shutdown,
    ));

    info!("클러스터 시작: {cluster}");
    ClusterHandle {
        cluster: cluster.to_string(),
        source: source_task,
        relay: relay_task,
    }
}
