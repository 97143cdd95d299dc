//! 핵심 에러 타입.
//!
//! 어댑터 crate와 리포터는 모두 `CoreError`를 반환한다.
//! 바이너리(`hystrix-app`)만 `anyhow`로 감싸서 시작 단계 에러를 보고한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 스냅샷에 설정된 레이턴시 백분위 값이 없음
    #[error("레이턴시 값 누락: source={source_id}, label={label}")]
    MissingLatency {
        /// 리포트 대상 소스 식별자
        source_id: String,
        /// 설정된 메트릭 레이블 (예: "99th")
        label: String,
    },

    /// 인증 실패 (잘못된 user/token)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// Rate Limit 초과 (429)
    #[error("요청 한도 초과, {retry_after_secs}초 후 재시도 가능")]
    RateLimit {
        /// 서버가 알려준 대기 시간 (초)
        retry_after_secs: u64,
    },

    /// 서비스 일시 불가 (503)
    #[error("서비스 일시 불가: {0}")]
    ServiceUnavailable(String),

    /// 전송 타임아웃
    #[error("실행 타임아웃: {timeout_ms}ms 초과")]
    ExecutionTimeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
