//! # hystrix-librato
//!
//! 바이너리 진입점.
//! 설정 로드, DI 와이어링, 클러스터별 릴레이 시작, 시그널 대기 후 종료.

use anyhow::{Context, Result};
use clap::Parser;
use hystrix_app::cli::Cli;
use hystrix_app::lifecycle::ClusterSupervisor;
use hystrix_app::settings::{load_config, redacted_json};
use hystrix_network::librato_client::LibratoClient;
use hystrix_network::turbine_client::TurbineStreamClient;
use hystrix_report::{Reporter, ReporterConfig};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG가 있으면 우선
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    let mut config = load_config(cli.config.as_deref()).context("설정 로드 실패")?;
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        error!("설정 검증 실패: {e}");
        return Err(e).context("설정 검증 실패");
    }

    // ── 어댑터 생성 (DI 와이어링) ──

    let sink = Arc::new(
        LibratoClient::new(
            &config.librato.base_url,
            &config.librato.user,
            &config.librato.token,
            config.request_timeout(),
        )
        .context("Librato 클라이언트 생성 실패")?,
    );

    let reporter = Arc::new(
        Reporter::new(
            sink,
            ReporterConfig {
                metrics: config.report.metrics.clone(),
                interval: config.report_interval(),
                submit_timeout: config.submit_timeout(),
            },
        )
        .context("리포터 생성 실패 (레이턴시 레이블 확인)")?,
    );

    if cli.check_config {
        println!("{}", redacted_json(&config)?);
        return Ok(());
    }

    info!(
        "hystrix-librato 시작: 클러스터 {}개, 메트릭 {:?}, 간격 {}초",
        config.clusters.len(),
        config.report.metrics,
        config.report.interval_secs
    );

    let mut supervisor = ClusterSupervisor::new(reporter, config.stream.channel_capacity);
    for cluster in &config.clusters {
        let source = TurbineStreamClient::new(
            &cluster.name,
            &cluster.stream_url,
            config.stream.max_retry_secs,
        );
        supervisor.start(&cluster.name, Arc::new(source));
    }

    let summary = supervisor
        .run_until_signal()
        .await
        .context("시그널 핸들러 등록 실패")?;

    info!(
        "hystrix-librato 종료: 클러스터 {}개, 스냅샷 {}개 처리",
        summary.clusters, summary.processed
    );
    Ok(())
}
