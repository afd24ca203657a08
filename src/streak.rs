//! Detecção de sequências de falhas consecutivas por host.

use crate::types::{FailureReport, Host, ProbeRecord};
use std::collections::{HashMap, VecDeque};

/// Estado de streak de um único host.
#[derive(Debug, Clone, Default)]
struct StreakState {
    /// Falhas consecutivas vistas desde o último sucesso.
    streak: usize,
    /// Resultado do último registro processado (None antes do primeiro).
    last_outcome: Option<bool>,
    /// Últimas falhas da sequência corrente, limitadas ao threshold.
    window: VecDeque<ProbeRecord>,
}

/// Detector de falhas consecutivas.
///
/// Consome, host a host, registros em ordem crescente de timestamp e guarda
/// para cada host que atingiu o threshold uma cópia da janela de falhas no
/// momento da qualificação. Quando um host qualifica mais de uma vez, cada
/// qualificação sobrescreve a anterior: só a janela da sequência mais
/// recente sobrevive no resultado final.
///
/// O estado de cada host é independente; a ordem relativa entre hosts não
/// importa, apenas a ordem dos registros de um mesmo host.
#[derive(Debug, Clone)]
pub struct StreakDetector {
    threshold: usize,
    states: HashMap<String, StreakState>,
    windows: HashMap<String, Vec<ProbeRecord>>,
    /// Hosts na ordem em que qualificaram pela primeira vez.
    qualified: Vec<Host>,
}

impl StreakDetector {
    /// Cria um detector para o threshold desejado (mínimo 1).
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            states: HashMap::new(),
            windows: HashMap::new(),
            qualified: Vec::new(),
        }
    }

    /// Processa um registro de um host.
    ///
    /// Os registros de cada host devem chegar em ordem crescente de
    /// timestamp; empates de timestamp mantêm a ordem do chamador.
    pub fn observe(&mut self, host: &Host, record: &ProbeRecord) {
        let state = self.states.entry(host.ip.clone()).or_default();

        if record.success {
            // Um único sucesso encerra a sequência e descarta a janela.
            state.streak = 0;
            state.window.clear();
        } else {
            if state.last_outcome == Some(false) {
                state.streak += 1;
            } else {
                // Nova sequência: a janela anterior não se mistura com ela.
                state.streak = 1;
                state.window.clear();
            }
            state.window.push_back(record.clone());
            if state.window.len() > self.threshold {
                state.window.pop_front();
            }
        }
        state.last_outcome = Some(record.success);

        if state.streak >= self.threshold {
            if !self.windows.contains_key(&host.ip) {
                self.qualified.push(host.clone());
            }
            self.windows
                .insert(host.ip.clone(), state.window.iter().cloned().collect());
        }
    }

    /// Consome o detector e devolve os relatórios, um por host qualificado,
    /// na ordem em que cada host qualificou pela primeira vez.
    pub fn into_reports(self) -> Vec<FailureReport> {
        let mut windows = self.windows;
        self.qualified
            .into_iter()
            .filter_map(|host| {
                let window = windows.remove(&host.ip)?;
                Some(FailureReport { host, window })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, Timelike};

    fn host(ip: &str) -> Host {
        Host {
            ip: ip.into(),
            hostname: Some("gateway".into()),
        }
    }

    fn at_minute(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, minute, 0)
            .unwrap()
    }

    fn record(minute: u32, success: bool) -> ProbeRecord {
        ProbeRecord {
            timestamp: at_minute(minute),
            delay: if success { Some(20) } else { None },
            success,
        }
    }

    /// Alimenta um único host com a sequência dada, um registro por minuto.
    fn scan(threshold: usize, outcomes: &[bool]) -> Vec<FailureReport> {
        let mut detector = StreakDetector::new(threshold);
        let alvo = host("10.0.0.1");
        for (i, ok) in outcomes.iter().enumerate() {
            detector.observe(&alvo, &record(i as u32, *ok));
        }
        detector.into_reports()
    }

    fn window_minutes(report: &FailureReport) -> Vec<u32> {
        report
            .window
            .iter()
            .map(|r| r.timestamp.minute())
            .collect()
    }

    const F: bool = false;
    const S: bool = true;

    #[test]
    fn reports_run_of_exactly_threshold_failures() {
        let reports = scan(3, &[F, F, F]);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].host.ip, "10.0.0.1");
        assert_eq!(window_minutes(&reports[0]), vec![0, 1, 2]);
    }

    #[test]
    fn success_resets_run_and_discards_short_window() {
        let reports = scan(3, &[F, F, S, F, F, F]);
        assert_eq!(reports.len(), 1);
        assert_eq!(window_minutes(&reports[0]), vec![3, 4, 5]);
    }

    #[test]
    fn window_keeps_only_most_recent_failures_of_long_run() {
        let reports = scan(3, &[F, F, F, F, F]);
        assert_eq!(reports.len(), 1);
        assert_eq!(window_minutes(&reports[0]), vec![2, 3, 4]);
    }

    #[test]
    fn host_with_only_successes_is_absent() {
        assert!(scan(3, &[S, S]).is_empty());
    }

    #[test]
    fn host_without_records_is_absent() {
        let detector = StreakDetector::new(3);
        assert!(detector.into_reports().is_empty());
    }

    #[test]
    fn threshold_one_reports_single_failure() {
        let reports = scan(1, &[F]);
        assert_eq!(reports.len(), 1);
        assert_eq!(window_minutes(&reports[0]), vec![0]);
    }

    #[test]
    fn short_run_below_threshold_is_absent() {
        assert!(scan(3, &[F, F, S, F, F]).is_empty());
    }

    #[test]
    fn qualified_window_survives_later_success() {
        let reports = scan(3, &[F, F, F, S, S]);
        assert_eq!(reports.len(), 1);
        assert_eq!(window_minutes(&reports[0]), vec![0, 1, 2]);
    }

    #[test]
    fn last_qualifying_run_overwrites_earlier_one() {
        let reports = scan(3, &[F, F, F, S, F, F, F, F]);
        assert_eq!(reports.len(), 1);
        // A primeira sequência ([0, 1, 2]) é substituída pela mais recente.
        assert_eq!(window_minutes(&reports[0]), vec![5, 6, 7]);
    }

    #[test]
    fn hosts_are_tracked_independently() {
        let mut detector = StreakDetector::new(2);
        let a = host("10.0.0.1");
        let b = host("10.0.0.2");

        // Intercala: falhas de um host não alongam a sequência do outro.
        detector.observe(&a, &record(0, F));
        detector.observe(&b, &record(0, F));
        detector.observe(&a, &record(1, S));
        detector.observe(&b, &record(1, F));
        detector.observe(&a, &record(2, F));

        let reports = detector.into_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].host.ip, "10.0.0.2");
        assert_eq!(window_minutes(&reports[0]), vec![0, 1]);
    }

    #[test]
    fn reports_follow_first_qualification_order() {
        let mut detector = StreakDetector::new(1);
        let b = host("10.0.0.2");
        let a = host("10.0.0.1");

        detector.observe(&b, &record(0, F));
        detector.observe(&a, &record(1, F));

        let reports = detector.into_reports();
        let ips: Vec<&str> = reports.iter().map(|r| r.host.ip.as_str()).collect();
        assert_eq!(ips, vec!["10.0.0.2", "10.0.0.1"]);
    }

    #[test]
    fn window_is_contiguous_suffix_of_final_run() {
        let reports = scan(2, &[F, S, F, F, F]);
        assert_eq!(reports.len(), 1);
        // Sufixo da última sequência (minutos 2..=4), limitado ao threshold.
        assert_eq!(window_minutes(&reports[0]), vec![3, 4]);
        assert!(reports[0].window.iter().all(|r| !r.success));
    }

    #[test]
    fn detector_is_deterministic_over_same_input() {
        let outcomes = [F, F, S, F, F, F, S, F, F, F, F];
        assert_eq!(scan(3, &outcomes), scan(3, &outcomes));
    }
}
