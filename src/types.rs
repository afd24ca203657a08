use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Host monitorado (linha da tabela `hosts`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub ip: String,
    pub hostname: Option<String>,
}

impl Host {
    /// Rótulo de exibição: `ip (hostname)`, ou só o ip quando não há hostname.
    pub fn display_label(&self) -> String {
        match self.hostname.as_deref() {
            Some(hostname) if !hostname.is_empty() => format!("{} ({})", self.ip, hostname),
            _ => self.ip.clone(),
        }
    }
}

/// Resultado de um ping individual, lido da tabela de histórico do host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub timestamp: NaiveDateTime,
    /// Atraso em milissegundos; ausente quando o ping falhou.
    pub delay: Option<i64>,
    pub success: bool,
}

/// Evidência de um host que atingiu o threshold de falhas consecutivas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub host: Host,
    /// Últimas falhas da sequência qualificadora, da mais antiga para a mais recente.
    pub window: Vec<ProbeRecord>,
}

/// Estatísticas agregadas do histórico de um host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostStatistics {
    pub total: i64,
    pub successes: i64,
    /// Atraso médio dos pings com sucesso.
    pub avg_delay: Option<f64>,
    pub max_delay: Option<i64>,
    pub min_delay: Option<i64>,
    /// Registros mais recentes, do mais novo para o mais antigo.
    pub recent: Vec<ProbeRecord>,
}

impl HostStatistics {
    pub fn failures(&self) -> i64 {
        self.total - self.successes
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successes as f64 / self.total as f64 * 100.0
        }
    }

    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failures() as f64 / self.total as f64 * 100.0
        }
    }
}

/// Alerta ativo (linha da tabela `alerts`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub ip: String,
    pub hostname: Option<String>,
    pub created_time: NaiveDateTime,
}

/// Registro de recuperação (linha da tabela `recovery_records`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRecord {
    pub id: i64,
    pub ip: String,
    pub hostname: Option<String>,
    pub alert_time: Option<NaiveDateTime>,
    pub recovery_time: NaiveDateTime,
}
