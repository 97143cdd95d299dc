//! 명령행 인자.

use clap::Parser;
use hystrix_core::config::AppConfig;
use std::path::PathBuf;

/// Hystrix 서킷/레이턴시 메트릭을 Librato로 전달
#[derive(Parser, Debug)]
#[command(name = "hystrix-librato")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 설정 파일 경로 (toml/json/yaml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    pub log_level: String,

    /// 소스별 리포트 간격 (초)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,

    /// 레이턴시 레이블 목록 (쉼표 구분, 예: mean,99th,100)
    #[arg(long, short = 'm', value_delimiter = ',')]
    pub metrics: Option<Vec<String>>,

    /// Librato 계정
    #[arg(long)]
    pub librato_user: Option<String>,

    /// Librato API 토큰
    #[arg(long)]
    pub librato_token: Option<String>,

    /// 설정 검증 후 적용된 설정을 출력하고 종료
    #[arg(long)]
    pub check_config: bool,
}

impl Cli {
    /// CLI 값으로 설정 덮어쓰기
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(interval) = self.interval {
            config.report.interval_secs = interval;
        }
        if let Some(ref metrics) = self.metrics {
            config.report.metrics = metrics.clone();
        }
        if let Some(ref user) = self.librato_user {
            config.librato.user = user.clone();
        }
        if let Some(ref token) = self.librato_token {
            config.librato.token = token.clone();
        }
    }

    /// 워크스페이스 crate 전체에 적용할 로그 필터
    pub fn log_filter(&self) -> String {
        [
            "hystrix_librato",
            "hystrix_app",
            "hystrix_core",
            "hystrix_report",
            "hystrix_network",
        ]
        .iter()
        .map(|target| format!("{target}={}", self.log_level))
        .collect::<Vec<_>>()
        .join(",")
    }
}
