//! Hystrix 커맨드 스냅샷 모델.
//!
//! Turbine/Hystrix 스트림의 `HystrixCommand` 페이로드 중 리포팅에 필요한
//! 필드만 표현한다. 서킷 상태의 타입 보정은 역직렬화 경계에서 끝낸다.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// 단일 커맨드의 서킷/레이턴시 스냅샷
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Data {
    /// 커맨드 그룹
    pub group: String,
    /// 그룹 내 커맨드 이름
    pub name: String,
    /// 서킷 오픈 여부. 불리언이 아닌 값(문자열, 숫자, null, 누락)은 `None`
    #[serde(
        rename = "isCircuitBreakerOpen",
        default,
        deserialize_with = "deserialize_lenient_bool"
    )]
    pub open: Option<bool>,
    /// 평균 레이턴시 (ms). 스트림에 없으면 `None`
    #[serde(rename = "latencyTotal_mean", default)]
    pub mean_latency: Option<i64>,
    /// 백분위별 레이턴시
    #[serde(rename = "latencyTotal", default)]
    pub latency_totals: LatencyTotals,
}

impl Data {
    /// 서킷 오픈 여부
    ///
    /// 상태를 알 수 없으면 오픈으로 간주한다.
    pub fn is_open(&self) -> bool {
        self.open.unwrap_or(true)
    }
}

/// 불리언만 받아들이고 나머지는 `None`으로 떨어뜨린다
fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Bool(b)) => Ok(Some(b)),
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(other) => {
            debug!("불리언이 아닌 서킷 상태 값: {other}");
            Ok(None)
        }
    }
}

/// 백분위별 누적 레이턴시 (`latencyTotal`)
///
/// 스트림이 일부 백분위를 생략할 수 있으므로 모두 `Option`이다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyTotals {
    #[serde(rename = "0", default)]
    pub l0: Option<i64>,
    #[serde(rename = "25", default)]
    pub l25: Option<i64>,
    #[serde(rename = "50", default)]
    pub l50: Option<i64>,
    #[serde(rename = "75", default)]
    pub l75: Option<i64>,
    #[serde(rename = "90", default)]
    pub l90: Option<i64>,
    #[serde(rename = "95", default)]
    pub l95: Option<i64>,
    #[serde(rename = "99", default)]
    pub l99: Option<i64>,
    #[serde(rename = "99.5", default)]
    pub l995: Option<i64>,
    #[serde(rename = "100", default)]
    pub l100: Option<i64>,
}

impl LatencyTotals {
    /// 백분위 값 조회
    pub fn get(&self, percentile: Percentile) -> Option<i64> {
        match percentile {
            Percentile::P0 => self.l0,
            Percentile::P25 => self.l25,
            Percentile::P50 => self.l50,
            Percentile::P75 => self.l75,
            Percentile::P90 => self.l90,
            Percentile::P95 => self.l95,
            Percentile::P99 => self.l99,
            Percentile::P995 => self.l995,
            Percentile::P100 => self.l100,
        }
    }
}

/// `LatencyTotals`가 가진 백분위 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Percentile {
    P0,
    P25,
    P50,
    P75,
    P90,
    P95,
    P99,
    P995,
    P100,
}

impl Percentile {
    /// 전체 목록 (필드 선언 순서)
    pub const ALL: [Percentile; 9] = [
        Percentile::P0,
        Percentile::P25,
        Percentile::P50,
        Percentile::P75,
        Percentile::P90,
        Percentile::P95,
        Percentile::P99,
        Percentile::P995,
        Percentile::P100,
    ];

    /// 필드 이름 (`L0` … `L995` … `L100`)
    pub fn field_name(self) -> &'static str {
        match self {
            Percentile::P0 => "L0",
            Percentile::P25 => "L25",
            Percentile::P50 => "L50",
            Percentile::P75 => "L75",
            Percentile::P90 => "L90",
            Percentile::P95 => "L95",
            Percentile::P99 => "L99",
            Percentile::P995 => "L995",
            Percentile::P100 => "L100",
        }
    }

    /// 필드 이름으로 백분위 조회. 없는 필드면 `None`
    pub fn from_field_name(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.field_name() == field)
    }
}
