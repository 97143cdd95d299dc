//! Librato로 전송하는 카운터 모델.

use serde::{Deserialize, Serialize};

/// 서킷 상태 카운터 이름 (0 = closed, 1 = open)
pub const CIRCUIT_OPEN_METRIC: &str = "hystrix.circuit.open";

/// 레이턴시 카운터 이름 접두사
pub const LATENCY_METRIC_PREFIX: &str = "hystrix.latency.";

/// 이름 붙은 정수 카운터 한 개
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// 메트릭 이름 (예: "hystrix.latency.99th")
    pub name: String,
    /// 값
    pub value: i64,
}

impl Counter {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// 레이블에 대한 레이턴시 메트릭 이름 (`hystrix.latency.<label>`)
pub fn latency_metric_name(label: &str) -> String {
    format!("{LATENCY_METRIC_PREFIX}{label}")
}
