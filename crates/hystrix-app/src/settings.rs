//! 설정 로드.
//!
//! 우선순위: 구조체 기본값 → 설정 파일(선택) → 환경변수.
//! CLI 오버라이드는 [`crate::cli`]에서 마지막에 적용한다.

use config::{Config, Environment, File};
use hystrix_core::config::AppConfig;
use hystrix_core::error::CoreError;
use std::path::Path;
use tracing::{debug, info};

/// 환경변수 접두사 (예: `HYSTRIX_LIBRATO_LIBRATO__TOKEN`)
pub const ENV_PREFIX: &str = "HYSTRIX_LIBRATO";

/// 설정 로드
///
/// 파일 형식은 확장자로 판단한다 (toml/json/yaml).
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, CoreError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(CoreError::Config(format!(
                "설정 파일 없음: {}",
                path.display()
            )));
        }
        info!("설정 파일 로드: {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    // prefix_separator("_"): HYSTRIX_LIBRATO_REPORT__INTERVAL_SECS 형태
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("report.metrics"),
    );

    let config: AppConfig = builder
        .build()
        .map_err(|e| CoreError::Config(format!("설정 빌드 실패: {e}")))?
        .try_deserialize()
        .map_err(|e| CoreError::Config(format!("설정 역직렬화 실패: {e}")))?;

    debug!(
        "설정 로드 완료: 클러스터 {}개, 간격 {}초",
        config.clusters.len(),
        config.report.interval_secs
    );
    Ok(config)
}

/// 토큰을 가린 설정 JSON (확인 출력용)
pub fn redacted_json(config: &AppConfig) -> Result<String, CoreError> {
    let mut shown = config.clone();
    if !shown.librato.token.is_empty() {
        shown.librato.token = "********".to_string();
    }
    Ok(serde_json::to_string_pretty(&shown)?)
}
