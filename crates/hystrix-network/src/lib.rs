//! # hystrix-network
//!
//! 네트워크 어댑터.
//! Librato 메트릭 API 전송(`MetricsSink`)과 Turbine/Hystrix SSE 스트림
//! 수신(`SnapshotSource`)을 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use hystrix_network::librato_client::LibratoClient;
//! use hystrix_network::turbine_client::TurbineStreamClient;
//! ```

pub mod librato_client;
pub mod turbine_client;
