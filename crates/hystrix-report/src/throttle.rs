//! 소스별 리포트 스로틀.
//!
//! 소스 식별자마다 마지막으로 허용된 시각을 기록하고, 간격이 지나기 전의
//! 요청은 거절한다. 허용될 때만 시각이 갱신되므로 거절된 요청 수와 무관하게
//! 윈도우는 한 번의 허용으로만 리셋된다.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// 소스 식별자 → 마지막 리포트 시각
///
/// 항목은 제거되지 않는다. 클러스터/그룹/커맨드 조합 수만큼 자란다.
#[derive(Debug)]
pub struct ReportThrottle {
    interval: Duration,
    reports: Mutex<HashMap<String, Instant>>,
}

impl ReportThrottle {
    /// 새 스로틀 생성
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            reports: Mutex::new(HashMap::new()),
        }
    }

    /// 지금 리포트해도 되는지 판단하고, 허용 시 시각을 기록한다
    pub fn should_report(&self, source: &str) -> bool {
        self.should_report_at(source, Instant::now())
    }

    /// `now` 기준으로 판단 (확인과 갱신은 하나의 락 구간에서 수행)
    pub fn should_report_at(&self, source: &str, now: Instant) -> bool {
        let mut reports = self.reports.lock();
        if let Some(last) = reports.get(source) {
            if now.saturating_duration_since(*last) < self.interval {
                return false;
            }
        }
        reports.insert(source.to_string(), now);
        true
    }

    #[cfg(test)]
    pub(crate) fn last_reported(&self, source: &str) -> Option<Instant> {
        self.reports.lock().get(source).copied()
    }

    /// 추적 중인 소스 수
    pub fn tracked_sources(&self) -> usize {
        self.reports.lock().len()
    }
}
