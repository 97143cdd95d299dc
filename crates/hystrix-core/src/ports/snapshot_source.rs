//! 스냅샷 소스 포트.
//!
//! 구현: `hystrix-network` crate (`TurbineStreamClient`, SSE)

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::CoreError;
use crate::models::snapshot::Data;

/// 클러스터 하나의 Hystrix 커맨드 스냅샷 공급자
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// 스트림에 연결해 수신한 스냅샷을 `tx`로 전달한다.
    ///
    /// 연결이 끊기면 재연결하며, `tx`의 수신 측이 닫히면 `Ok(())`로 끝난다.
    async fn run(&self, tx: mpsc::Sender<Data>) -> Result<(), CoreError>;
}
