mod config;
mod report;
mod storage;
mod streak;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

fn main() {
    // Inicializa o sistema de logging (tracing)
    tracing_subscriber::fmt::init();

    let config = config::Config::parse();
    if let Err(e) = run(config) {
        eprintln!("Erro: {e:#}");
        std::process::exit(1);
    }
}

fn run(config: config::Config) -> Result<()> {
    config.validate().map_err(anyhow::Error::msg)?;

    let storage = storage::Storage::open(&config.database).with_context(|| {
        format!(
            "não foi possível abrir o banco em {}",
            config.database.display()
        )
    })?;
    debug!("banco aberto em {}", config.database.display());

    if let Some(ip) = &config.query_ip {
        let hostname = storage.hostname_for(ip)?;
        let stats = storage.host_statistics(ip)?;
        print!(
            "{}",
            report::render_statistics(ip, hostname.as_deref(), stats.as_ref())
        );
        return Ok(());
    }

    if let Some(days) = config.alerts {
        let alerts = storage.active_alerts(days)?;
        print!("{}", report::render_alerts(&alerts, days));
        return Ok(());
    }

    if let Some(days) = config.recovery {
        let records = storage.recovery_records(days)?;
        print!("{}", report::render_recovery(&records, days));
        return Ok(());
    }

    // Modo padrão: varredura de falhas consecutivas.
    let hosts = storage.list_hosts()?;
    info!("{} hosts carregados do banco", hosts.len());

    let mut detector = streak::StreakDetector::new(config.threshold);
    for host in &hosts {
        let records = storage.probe_history(&host.ip)?;
        if records.is_empty() {
            debug!("host {} sem histórico de pings, ignorado", host.ip);
            continue;
        }
        for record in &records {
            detector.observe(host, record);
        }
    }

    let reports = detector.into_reports();
    info!("{} hosts atingiram o threshold", reports.len());
    print!("{}", report::render_failures(&reports, config.threshold));

    Ok(())
}
