//! 레이턴시 레이블 → 메트릭 매핑.
//!
//! 설정된 레이블은 시작 시점에 한 번 해석되어 접근자로 고정된다.
//! `"mean"`은 평균 레이턴시, 나머지는 `.`과 `th`를 모두 지운 뒤 `L`을 붙인
//! 필드 이름(`"99th"` → `L99`, `"99.5th"` → `L995`)으로 백분위를 찾는다.

use hystrix_core::error::CoreError;
use hystrix_core::models::metric::latency_metric_name;
use hystrix_core::models::snapshot::{Data, Percentile};

/// 평균 레이턴시 레이블
pub const MEAN_LABEL: &str = "mean";

/// 레이블에서 `LatencyTotals` 필드 이름 도출
pub fn field_name_for_label(label: &str) -> String {
    format!("L{}", label.replace('.', "").replace("th", ""))
}

/// 스냅샷에서 값을 꺼내는 방법
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor {
    Mean,
    Percentile(Percentile),
}

/// 해석이 끝난 레이턴시 메트릭 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyMetric {
    label: String,
    metric_name: String,
    accessor: Accessor,
}

impl LatencyMetric {
    /// 레이블 해석. 대응하는 필드가 없으면 설정 에러
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        let accessor = if label == MEAN_LABEL {
            Accessor::Mean
        } else {
            let field = field_name_for_label(label);
            let percentile = Percentile::from_field_name(&field).ok_or_else(|| {
                CoreError::Config(format!(
                    "레이턴시 레이블 '{label}'에 대응하는 필드 {field} 없음"
                ))
            })?;
            Accessor::Percentile(percentile)
        };

        Ok(Self {
            label: label.to_string(),
            metric_name: latency_metric_name(label),
            accessor,
        })
    }

    /// 설정된 원래 레이블
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 전송할 메트릭 이름 (`hystrix.latency.<label>`)
    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    #[cfg(test)]
    fn percentile(&self) -> Option<Percentile> {
        match self.accessor {
            Accessor::Mean => None,
            Accessor::Percentile(p) => Some(p),
        }
    }

    /// 스냅샷에서 값 조회. 스냅샷에 해당 백분위가 없으면 `None`
    pub fn value(&self, data: &Data) -> Option<i64> {
        match self.accessor {
            Accessor::Mean => data.mean_latency,
            Accessor::Percentile(p) => data.latency_totals.get(p),
        }
    }
}

/// 레이블 목록 전체 해석 (순서 유지)
pub fn compile_metrics<S: AsRef<str>>(labels: &[S]) -> Result<Vec<LatencyMetric>, CoreError> {
    labels
        .iter()
        .map(|label| LatencyMetric::parse(label.as_ref()))
        .collect()
}
