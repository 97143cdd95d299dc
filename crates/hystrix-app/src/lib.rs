//! # hystrix-app
//!
//! hystrix-librato 바이너리 구성 요소.
//! 설정 로드, CLI 오버라이드, 클러스터별 스트림 → 리포터 릴레이, 종료 처리.

pub mod cli;
pub mod lifecycle;
pub mod relay;
pub mod settings;
