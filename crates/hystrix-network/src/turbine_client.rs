//! Turbine/Hystrix SSE 스트림 클라이언트.
//!
//! `SnapshotSource` 포트 구현. `HystrixCommand` 페이로드만 `Data`로 변환하고
//! 나머지(스레드 풀, 핑, 깨진 JSON)는 건너뛴다. 자동 재연결 + exponential backoff.

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::stream::StreamExt;
use hystrix_core::error::CoreError;
use hystrix_core::models::snapshot::Data;
use hystrix_core::ports::snapshot_source::SnapshotSource;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// 커맨드 스냅샷 페이로드 타입
const COMMAND_TYPE: &str = "HystrixCommand";

/// SSE 스트림 클라이언트: `SnapshotSource` 포트 구현
pub struct TurbineStreamClient {
    cluster: String,
    stream_url: String,
    max_retry_secs: u64,
    http_client: reqwest::Client,
}

impl TurbineStreamClient {
    /// 새 스트림 클라이언트 생성
    pub fn new(cluster: &str, stream_url: &str, max_retry_secs: u64) -> Self {
        Self {
            cluster: cluster.to_string(),
            stream_url: stream_url.to_string(),
            max_retry_secs: max_retry_secs.max(1),
            http_client: reqwest::Client::new(),
        }
    }

    /// `data:` 페이로드를 스냅샷으로 파싱
    fn parse_payload(data: &str) -> Option<Data> {
        let value: serde_json::Value = match serde_json::from_str(data) {
            Ok(v) => v,
            Err(e) => {
                debug!("JSON 아닌 스트림 데이터 무시: {e}");
                return None;
            }
        };

        match value.get("type").and_then(|t| t.as_str()) {
            Some(COMMAND_TYPE) => match serde_json::from_value::<Data>(value) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    debug!("커맨드 페이로드 파싱 실패: {e}");
                    None
                }
            },
            other => {
                debug!("커맨드 외 페이로드 무시: {other:?}");
                None
            }
        }
    }

    /// 연결 한 번. 수신 측이 닫혔으면 `Ok(true)`
    async fn stream_once(
        &self,
        tx: &mpsc::Sender<Data>,
        retry_delay: &mut u64,
    ) -> Result<bool, CoreError> {
        let resp = self
            .http_client
            .get(&self.stream_url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("스트림 연결 실패: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Network(format!("스트림 응답 에러 ({status})")));
        }

        debug!("스트림 연결 수립됨: {}", self.cluster);
        // 연결 성공 시 재시도 지연 리셋
        *retry_delay = 1;

        let mut events = resp.bytes_stream().eventsource();
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => {
                    let Some(snapshot) = Self::parse_payload(&event.data) else {
                        continue;
                    };
                    if tx.send(snapshot).await.is_err() {
                        info!("스냅샷 채널 닫힘, 스트림 종료: {}", self.cluster);
                        return Ok(true);
                    }
                }
                Err(e) => {
                    return Err(CoreError::Network(format!("스트림 에러: {e}")));
                }
            }
        }

        info!("스트림 종료: {}", self.cluster);
        Ok(false)
    }
}

#[async_trait]
impl SnapshotSource for TurbineStreamClient {
    async fn run(&self, tx: mpsc::Sender<Data>) -> Result<(), CoreError> {
        info!("스트림 연결 시작: {} ({})", self.cluster, self.stream_url);

        let mut retry_delay = 1u64;

        loop {
            match self.stream_once(&tx, &mut retry_delay).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => warn!("{}: {e}", self.cluster),
            }

            // 채널이 닫혔으면 종료
            if tx.is_closed() {
                return Ok(());
            }

            // exponential backoff 재연결
            warn!("스트림 재연결 대기 ({}): {retry_delay}초", self.cluster);
            tokio::time::sleep(Duration::from_secs(retry_delay)).await;
            retry_delay = (retry_delay * 2).min(self.max_retry_secs);
        }
    }
}
