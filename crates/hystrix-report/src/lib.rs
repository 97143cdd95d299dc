//! # hystrix-report
//!
//! Hystrix 스냅샷을 받아 Librato 메트릭으로 내보낼지 결정하는 리포터.
//!
//! - [`throttle`]: 소스 식별자별 최소 리포트 간격 (고정 윈도우)
//! - [`latency`]: 레이턴시 레이블 → 메트릭 이름/값 매핑
//! - [`reporter`]: 스냅샷 하나를 서킷/레이턴시 두 소스로 나눠 전송
//!
//! ```rust,ignore
//! use hystrix_report::reporter::{Reporter, ReporterConfig};
//!
//! let reporter = Reporter::new(sink, ReporterConfig::default())?;
//! reporter.report(&data, "prod").await;
//! ```

pub mod latency;
pub mod reporter;
pub mod throttle;

pub use reporter::{Reporter, ReporterConfig};
