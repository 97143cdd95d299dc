//! 도메인 모델.
//!
//! Hystrix 스트림에서 들어오는 스냅샷과 Librato로 나가는 카운터를 정의한다.

pub mod metric;
pub mod snapshot;
