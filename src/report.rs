//! Formatação em texto dos resultados, no formato impresso em stdout.

use crate::types::{Alert, FailureReport, HostStatistics, ProbeRecord, RecoveryRecord};

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn delay_text(record: &ProbeRecord) -> String {
    match record.delay {
        Some(delay) => format!("{delay}ms"),
        None => "-".into(),
    }
}

/// Relatório da varredura de falhas consecutivas.
pub fn render_failures(reports: &[FailureReport], threshold: usize) -> String {
    let mut out = String::new();

    if reports.is_empty() {
        out.push_str(&format!(
            "Nenhum host com {threshold} falhas consecutivas.\n"
        ));
        return out;
    }

    out.push_str(&format!("Hosts com {threshold} falhas consecutivas:\n"));
    out.push_str(&"-".repeat(50));
    out.push('\n');

    for report in reports {
        out.push_str(&format!("{}:\n", report.host.display_label()));
        for record in &report.window {
            out.push_str(&format!("  {}\n", record.timestamp.format(TIMESTAMP_FMT)));
        }
        out.push('\n');
    }
    out
}

/// Estatísticas de um único host (modo `--query`).
pub fn render_statistics(ip: &str, hostname: Option<&str>, stats: Option<&HostStatistics>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Estatísticas do IP: {} ({})\n",
        ip,
        hostname.unwrap_or("")
    ));
    out.push_str(&"=".repeat(57));
    out.push('\n');

    let stats = match stats {
        Some(stats) if stats.total > 0 => stats,
        _ => {
            out.push_str("Nenhum registro de ping encontrado para este IP.\n");
            return out;
        }
    };

    out.push_str(&format!("Total de registros: {}\n", stats.total));
    out.push_str(&format!("Pings com sucesso: {}\n", stats.successes));
    out.push_str(&format!("Pings com falha: {}\n", stats.failures()));
    out.push_str(&format!("Taxa de sucesso: {:.2}%\n", stats.success_rate()));
    out.push_str(&format!("Taxa de falha: {:.2}%\n", stats.failure_rate()));
    out.push_str(&format!(
        "Atraso médio (pings com sucesso): {:.2}ms\n",
        stats.avg_delay.unwrap_or(0.0)
    ));
    out.push_str(&format!(
        "Atraso máximo (pings com sucesso): {}ms\n",
        stats.max_delay.unwrap_or(0)
    ));
    out.push_str(&format!(
        "Atraso mínimo (pings com sucesso): {}ms\n",
        stats.min_delay.unwrap_or(0)
    ));

    out.push_str("\nRegistros recentes (últimos 10):\n");
    out.push_str("Timestamp           \tAtraso\tStatus\n");
    out.push_str(&"-".repeat(56));
    out.push('\n');
    for record in &stats.recent {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            record.timestamp.format(TIMESTAMP_FMT),
            delay_text(record),
            if record.success { "sucesso" } else { "falha" }
        ));
    }
    out
}

/// Lista de alertas ativos (modo `--alerts`).
pub fn render_alerts(alerts: &[Alert], days: Option<u32>) -> String {
    let mut out = String::new();

    if alerts.is_empty() {
        match days {
            Some(days) => out.push_str(&format!(
                "Nenhum alerta ativo nos últimos {days} dias.\n"
            )),
            None => out.push_str("Nenhum alerta ativo.\n"),
        }
        return out;
    }

    match days {
        Some(days) => out.push_str(&format!("Alertas ativos nos últimos {days} dias:\n")),
        None => out.push_str("Alertas ativos:\n"),
    }
    out.push_str("IP\tHostname\tCriado em\n");
    out.push_str(&"-".repeat(48));
    out.push('\n');
    for alert in alerts {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            alert.ip,
            alert.hostname.as_deref().unwrap_or(""),
            alert.created_time.format(TIMESTAMP_FMT)
        ));
    }
    out
}

/// Lista de registros de recuperação (modo `--recovery`).
pub fn render_recovery(records: &[RecoveryRecord], days: Option<u32>) -> String {
    let mut out = String::new();

    if records.is_empty() {
        match days {
            Some(days) => out.push_str(&format!(
                "Nenhum registro de recuperação nos últimos {days} dias.\n"
            )),
            None => out.push_str("Nenhum registro de recuperação.\n"),
        }
        return out;
    }

    match days {
        Some(days) => out.push_str(&format!(
            "Registros de recuperação nos últimos {days} dias:\n"
        )),
        None => out.push_str("Registros de recuperação:\n"),
    }
    out.push_str("ID\tIP\tHostname\tAlerta em\t\tRecuperado em\n");
    out.push_str(&"-".repeat(96));
    out.push('\n');
    for record in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            record.id,
            record.ip,
            record.hostname.as_deref().unwrap_or(""),
            record
                .alert_time
                .map(|t| t.format(TIMESTAMP_FMT).to_string())
                .unwrap_or_else(|| "-".into()),
            record.recovery_time.format(TIMESTAMP_FMT)
        ));
    }
    out
}
