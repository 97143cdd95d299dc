//! 메트릭 전송 포트.
//!
//! 구현: `hystrix-network` crate (`LibratoClient`, reqwest)

use async_trait::async_trait;

use crate::error::CoreError;

/// 메트릭 백엔드
///
/// 소스 식별자 하나에 묶인 단기 세션을 연다. 세션은 호출 한 번에만 쓰이고
/// 재사용되지 않는다.
pub trait MetricsSink: Send + Sync {
    /// `source`로 주소 지정된 전송 세션 생성
    fn open_session(&self, source: &str) -> Box<dyn MetricsSession>;
}

/// 단일 소스에 대한 전송 세션
///
/// `finish` 없이 드롭되면 아무것도 전송하지 않고 자원만 해제한다.
#[async_trait]
pub trait MetricsSession: Send {
    /// 카운터 추가
    fn add_counter(&mut self, name: &str, value: i64);

    /// 모아둔 카운터를 전송하고 완료를 기다린 뒤 세션을 닫는다
    async fn finish(self: Box<Self>) -> Result<(), CoreError>;
}
