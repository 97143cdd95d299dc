//! 애플리케이션 설정 구조체.
//!
//! Librato 자격증명, 리포트 주기/메트릭 레이블, 클러스터 스트림 목록을
//! 정의한다. `config` crate를 통해 파일/환경변수에서 로드.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Librato 연결 설정
    #[serde(default)]
    pub librato: LibratoConfig,
    /// 리포트 설정
    #[serde(default)]
    pub report: ReportConfig,
    /// 폴링할 클러스터 목록
    #[serde(default)]
    pub clusters: Vec<ClusterConfig>,
    /// 스트림 수신 설정
    #[serde(default)]
    pub stream: StreamConfig,
}

// ============================================================
// Librato 설정
// ============================================================

/// Librato 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibratoConfig {
    /// 계정 (basic auth user)
    #[serde(default)]
    pub user: String,
    /// API 토큰 (basic auth password)
    #[serde(default)]
    pub token: String,
    /// API 베이스 URL
    #[serde(default = "default_librato_base_url")]
    pub base_url: String,
    /// HTTP 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for LibratoConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            token: String::new(),
            base_url: default_librato_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

// ============================================================
// 리포트 설정
// ============================================================

/// 리포트 설정: 레이턴시 레이블, 스로틀 간격, 전송 대기 한도
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 전송할 레이턴시 레이블 (순서 유지, 예: "mean", "99th")
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    /// 같은 소스를 다시 리포트하기까지 최소 간격 (초)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// 세션 전송 완료 대기 한도 (밀리초)
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            interval_secs: default_interval_secs(),
            submit_timeout_ms: default_submit_timeout_ms(),
        }
    }
}

// ============================================================
// 클러스터/스트림 설정
// ============================================================

/// 클러스터 하나 (Turbine 스트림 하나)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// 소스 식별자 앞부분으로 쓰이는 클러스터 이름
    pub name: String,
    /// SSE 스트림 URL (예: http://turbine:8080/turbine.stream?cluster=prod)
    pub stream_url: String,
}

/// 스트림 수신 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// 재연결 최대 대기 (초)
    #[serde(default = "default_max_retry_secs")]
    pub max_retry_secs: u64,
    /// 클러스터별 스냅샷 채널 크기
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_retry_secs: default_max_retry_secs(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            librato: LibratoConfig::default(),
            report: ReportConfig::default(),
            clusters: Vec::new(),
            stream: StreamConfig::default(),
        }
    }

    /// 스로틀 간격을 Duration으로 반환
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report.interval_secs)
    }

    /// 전송 대기 한도를 Duration으로 반환
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.report.submit_timeout_ms)
    }

    /// Librato 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.librato.request_timeout_ms)
    }

    /// 시작 전 설정 검증
    ///
    /// 레이턴시 레이블 자체의 해석은 리포터 생성 시점에 검증한다.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.librato.user.trim().is_empty() {
            return Err(invalid("librato.user", "비어 있음"));
        }
        if self.librato.token.trim().is_empty() {
            return Err(invalid("librato.token", "비어 있음"));
        }
        if self.report.interval_secs == 0 {
            return Err(invalid("report.interval_secs", "0보다 커야 함"));
        }
        if self.report.submit_timeout_ms == 0 {
            return Err(invalid("report.submit_timeout_ms", "0보다 커야 함"));
        }
        if self.stream.channel_capacity == 0 {
            return Err(invalid("stream.channel_capacity", "0보다 커야 함"));
        }
        if self.clusters.is_empty() {
            return Err(invalid("clusters", "클러스터가 하나 이상 필요함"));
        }

        let mut seen = HashSet::new();
        for cluster in &self.clusters {
            if cluster.name.trim().is_empty() {
                return Err(invalid("clusters.name", "비어 있음"));
            }
            if cluster.stream_url.trim().is_empty() {
                return Err(invalid(
                    "clusters.stream_url",
                    &format!("{}: 비어 있음", cluster.name),
                ));
            }
            if !seen.insert(cluster.name.as_str()) {
                return Err(invalid(
                    "clusters.name",
                    &format!("중복된 클러스터: {}", cluster.name),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> CoreError {
    CoreError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_librato_base_url() -> String {
    "https://metrics-api.librato.com".to_string()
}
fn default_request_timeout_ms() -> u64 {
    10_000
}
fn default_metrics() -> Vec<String> {
    ["mean", "50", "90th", "99th", "100"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_interval_secs() -> u64 {
    60
}
fn default_submit_timeout_ms() -> u64 {
    15_000
}
fn default_max_retry_secs() -> u64 {
    30
}
fn default_channel_capacity() -> usize {
    256
}
