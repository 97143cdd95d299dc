//! 클러스터 파이프라인 수명 관리.
//!
//! [`ClusterSupervisor`]가 클러스터별 소스/릴레이 태스크를 띄우고 보관한다.
//! 종료할 때는 신호를 한 번 브로드캐스트한 뒤 모든 릴레이를 기다려
//! 처리한 스냅샷 수를 합산한다.

use hystrix_core::error::CoreError;
use hystrix_core::ports::snapshot_source::SnapshotSource;
use hystrix_report::Reporter;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use crate::relay::{spawn_cluster, ClusterHandle};

/// 종료 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownSummary {
    /// 종료한 클러스터 수
    pub clusters: usize,
    /// 전체 클러스터에서 리포터로 넘긴 스냅샷 수
    pub processed: u64,
}

/// 공유 리포터 하나에 여러 클러스터 파이프라인을 붙여 관리
pub struct ClusterSupervisor {
    reporter: Arc<Reporter>,
    channel_capacity: usize,
    shutdown_tx: watch::Sender<bool>,
    clusters: Vec<ClusterHandle>,
}

impl ClusterSupervisor {
    pub fn new(reporter: Arc<Reporter>, channel_capacity: usize) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            reporter,
            channel_capacity,
            shutdown_tx,
            clusters: Vec::new(),
        }
    }

    /// 클러스터 하나를 시작하고 핸들을 보관
    pub fn start(&mut self, cluster: &str, source: Arc<dyn SnapshotSource>) {
        let handle = spawn_cluster(
            Arc::clone(&self.reporter),
            source,
            cluster,
            self.channel_capacity,
            self.shutdown_tx.subscribe(),
        );
        self.clusters.push(handle);
    }

    /// 시작 순서대로 클러스터 이름
    pub fn cluster_names(&self) -> Vec<&str> {
        self.clusters.iter().map(ClusterHandle::cluster).collect()
    }

    /// SIGINT/SIGTERM을 기다린 뒤 [`Self::shutdown`]
    pub async fn run_until_signal(self) -> Result<ShutdownSummary, CoreError> {
        let signal = termination_signal().await?;
        info!("{signal} 수신, 클러스터 {}개 종료 시작", self.clusters.len());
        Ok(self.shutdown().await)
    }

    /// 종료 신호를 보내고 모든 릴레이를 기다린다
    pub async fn shutdown(self) -> ShutdownSummary {
        // 수신자가 모두 끝났어도 값은 갱신된다
        self.shutdown_tx.send_replace(true);

        let clusters = self.clusters.len();
        let mut processed = 0;
        for handle in self.clusters {
            processed += handle.join().await;
        }

        info!(
            "클러스터 {clusters}개 종료: 스냅샷 {processed}개 처리, 추적 소스 {}개",
            self.reporter.throttle().tracked_sources()
        );
        ShutdownSummary {
            clusters,
            processed,
        }
    }
}

#[cfg(unix)]
async fn termination_signal() -> Result<&'static str, CoreError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT").map_err(CoreError::from),
        _ = sigterm.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn termination_signal() -> Result<&'static str, CoreError> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}
