//! 스냅샷 리포터.
//!
//! 스냅샷 하나에서 두 개의 소스를 만든다.
//! - `<cluster>.<group>`: 서킷 상태 (`hystrix.circuit.open`)
//! - `<cluster>.<group>.<name>`: 레이턴시 (`hystrix.latency.*`)
//!
//! 두 소스는 각각 독립적으로 스로틀되고 전송된다. 실패는 로그로만 남기며
//! 호출자에게 전파하지 않는다. 재시도는 하지 않는다.

use hystrix_core::error::CoreError;
use hystrix_core::models::metric::CIRCUIT_OPEN_METRIC;
use hystrix_core::models::snapshot::Data;
use hystrix_core::ports::metrics_sink::{MetricsSession, MetricsSink};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::latency::{compile_metrics, LatencyMetric};
use crate::throttle::ReportThrottle;

/// 리포터 설정
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// 레이턴시 레이블 (전송 순서)
    pub metrics: Vec<String>,
    /// 소스별 최소 리포트 간격
    pub interval: Duration,
    /// 세션 전송 완료 대기 한도
    pub submit_timeout: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            metrics: ["mean", "50", "90th", "99th", "100"]
                .into_iter()
                .map(String::from)
                .collect(),
            interval: Duration::from_secs(60),
            submit_timeout: Duration::from_secs(15),
        }
    }
}

/// 서킷 상태 소스 식별자
pub fn circuit_source(cluster: &str, data: &Data) -> String {
    format!("{cluster}.{}", data.group)
}

/// 레이턴시 소스 식별자
pub fn latency_source(cluster: &str, data: &Data) -> String {
    format!("{cluster}.{}.{}", data.group, data.name)
}

/// u64를 넘는 밀리초는 `u64::MAX`로 고정
fn millis_saturating(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Hystrix → Librato 리포터
///
/// `Arc`로 공유하여 클러스터별 태스크에서 동시에 호출해도 된다.
pub struct Reporter {
    sink: Arc<dyn MetricsSink>,
    throttle: ReportThrottle,
    metrics: Vec<LatencyMetric>,
    submit_timeout: Duration,
}

impl Reporter {
    /// 새 리포터 생성
    ///
    /// 레이턴시 레이블을 여기서 모두 해석한다. 해석할 수 없는 레이블이 있으면
    /// `CoreError::Config`.
    pub fn new(sink: Arc<dyn MetricsSink>, config: ReporterConfig) -> Result<Self, CoreError> {
        let metrics = compile_metrics(&config.metrics)?;
        debug!(
            "리포터 생성: 메트릭 {}개, 간격 {:?}",
            metrics.len(),
            config.interval
        );

        Ok(Self {
            sink,
            throttle: ReportThrottle::new(config.interval),
            metrics,
            submit_timeout: config.submit_timeout,
        })
    }

    /// 스냅샷 하나를 클러스터 기준으로 리포트
    pub async fn report(&self, data: &Data, cluster: &str) {
        let circuit = circuit_source(cluster, data);
        let latency = latency_source(cluster, data);

        if self.throttle.should_report(&circuit) {
            info!("리포트: {circuit}");
            if let Err(e) = self.report_circuit_open(data, &circuit).await {
                warn!("서킷 상태 전송 실패 ({circuit}): {e}");
            }
        }

        if self.throttle.should_report(&latency) {
            info!("리포트: {latency}");
            if let Err(e) = self.report_latencies(data, &latency).await {
                warn!("레이턴시 전송 실패 ({latency}): {e}");
            }
        }
    }

    /// 서킷 상태 카운터 전송 (스로틀 없음)
    pub async fn report_circuit_open(&self, data: &Data, source: &str) -> Result<(), CoreError> {
        let value = i64::from(data.is_open());

        let mut session = self.sink.open_session(source);
        session.add_counter(CIRCUIT_OPEN_METRIC, value);
        self.finish(session).await
    }

    /// 레이턴시 카운터 전송 (스로틀 없음)
    ///
    /// 값이 하나라도 없으면 세션을 열지 않고 `CoreError::MissingLatency`.
    pub async fn report_latencies(&self, data: &Data, source: &str) -> Result<(), CoreError> {
        let mut counters = Vec::with_capacity(self.metrics.len());
        for metric in &self.metrics {
            let value = metric
                .value(data)
                .ok_or_else(|| CoreError::MissingLatency {
                    source_id: source.to_string(),
                    label: metric.label().to_string(),
                })?;
            counters.push((metric.metric_name(), value));
        }

        let mut session = self.sink.open_session(source);
        for (name, value) in counters {
            session.add_counter(name, value);
        }
        self.finish(session).await
    }

    /// 세션 전송 완료 대기 (한도 초과 시 세션을 버리고 타임아웃 에러)
    async fn finish(&self, session: Box<dyn MetricsSession>) -> Result<(), CoreError> {
        match tokio::time::timeout(self.submit_timeout, session.finish()).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::ExecutionTimeout {
                timeout_ms: millis_saturating(self.submit_timeout),
            }),
        }
    }

    /// 내부 스로틀
    pub fn throttle(&self) -> &ReportThrottle {
        &self.throttle
    }
}
