use crate::types::{Alert, Host, HostStatistics, ProbeRecord, RecoveryRecord};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Erros da camada de acesso ao banco.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("erro no sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Acesso somente-leitura ao banco gerado pelo monitoramento.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Abre o banco em modo somente-leitura. Falha se o arquivo não existir.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Nome da tabela de histórico de um IP. O esquema de nomes é detalhe
    /// do coletor; nada fora desta camada depende dele.
    fn history_table(ip: &str) -> String {
        format!("ip_{}", ip.replace(['.', ':'], "_"))
    }

    fn table_exists(&self, name: &str) -> Result<bool, StorageError> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Lista os hosts conhecidos, em ordem de IP.
    pub fn list_hosts(&self) -> Result<Vec<Host>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT ip, hostname FROM hosts ORDER BY ip")?;
        let rows = stmt.query_map([], |row| {
            Ok(Host {
                ip: row.get(0)?,
                hostname: row.get(1)?,
            })
        })?;

        let mut hosts = Vec::new();
        for row in rows {
            hosts.push(row?);
        }
        Ok(hosts)
    }

    /// Hostname registrado para um IP, se houver.
    pub fn hostname_for(&self, ip: &str) -> Result<Option<String>, StorageError> {
        let hostname: Option<Option<String>> = self
            .conn
            .query_row("SELECT hostname FROM hosts WHERE ip = ?1", [ip], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(hostname.flatten())
    }

    /// Histórico de pings de um host, em ordem crescente de timestamp.
    /// Empates de timestamp preservam a ordem de inserção. Host sem tabela
    /// de histórico é tratado como histórico vazio, nunca como erro.
    pub fn probe_history(&self, ip: &str) -> Result<Vec<ProbeRecord>, StorageError> {
        let table = Self::history_table(ip);
        if !self.table_exists(&table)? {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT delay, success, timestamp FROM {table} ORDER BY timestamp, id"
        ))?;
        let rows = stmt.query_map([], probe_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Estatísticas agregadas de um host. `None` quando não há tabela de
    /// histórico para o IP.
    pub fn host_statistics(&self, ip: &str) -> Result<Option<HostStatistics>, StorageError> {
        let table = Self::history_table(ip);
        if !self.table_exists(&table)? {
            return Ok(None);
        }

        let (total, successes): (i64, i64) = self.conn.query_row(
            &format!(
                "SELECT COUNT(*), COALESCE(SUM(CASE WHEN success = 1 THEN 1 ELSE 0 END), 0)
                 FROM {table}"
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let (avg_delay, max_delay, min_delay): (Option<f64>, Option<i64>, Option<i64>) =
            self.conn.query_row(
                &format!("SELECT AVG(delay), MAX(delay), MIN(delay) FROM {table} WHERE success = 1"),
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT delay, success, timestamp FROM {table} ORDER BY timestamp DESC, id DESC LIMIT 10"
        ))?;
        let rows = stmt.query_map([], probe_from_row)?;

        let mut recent = Vec::new();
        for row in rows {
            recent.push(row?);
        }

        Ok(Some(HostStatistics {
            total,
            successes,
            avg_delay,
            max_delay,
            min_delay,
            recent,
        }))
    }

    /// Alertas ativos, opcionalmente restritos aos últimos `days` dias.
    /// Bancos antigos sem a tabela `alerts` são tratados como sem alertas.
    pub fn active_alerts(&self, days: Option<u32>) -> Result<Vec<Alert>, StorageError> {
        if !self.table_exists("alerts")? {
            return Ok(Vec::new());
        }

        let map = |row: &Row<'_>| -> rusqlite::Result<Alert> {
            Ok(Alert {
                ip: row.get(0)?,
                hostname: row.get(1)?,
                created_time: row.get(2)?,
            })
        };

        let mut alerts = Vec::new();
        match days {
            Some(days) => {
                let mut stmt = self.conn.prepare(
                    "SELECT ip, hostname, created_time FROM alerts
                     WHERE created_time >= datetime('now', ?1)",
                )?;
                let rows = stmt.query_map([format!("-{days} days")], map)?;
                for row in rows {
                    alerts.push(row?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare("SELECT ip, hostname, created_time FROM alerts")?;
                let rows = stmt.query_map([], map)?;
                for row in rows {
                    alerts.push(row?);
                }
            }
        }
        Ok(alerts)
    }

    /// Registros de recuperação, opcionalmente restritos aos últimos `days` dias.
    pub fn recovery_records(&self, days: Option<u32>) -> Result<Vec<RecoveryRecord>, StorageError> {
        if !self.table_exists("recovery_records")? {
            return Ok(Vec::new());
        }

        let map = |row: &Row<'_>| -> rusqlite::Result<RecoveryRecord> {
            Ok(RecoveryRecord {
                id: row.get(0)?,
                ip: row.get(1)?,
                hostname: row.get(2)?,
                alert_time: row.get(3)?,
                recovery_time: row.get(4)?,
            })
        };

        let mut records = Vec::new();
        match days {
            Some(days) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, ip, hostname, alert_time, recovery_time FROM recovery_records
                     WHERE recovery_time >= datetime('now', ?1)",
                )?;
                let rows = stmt.query_map([format!("-{days} days")], map)?;
                for row in rows {
                    records.push(row?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, ip, hostname, alert_time, recovery_time FROM recovery_records",
                )?;
                let rows = stmt.query_map([], map)?;
                for row in rows {
                    records.push(row?);
                }
            }
        }
        Ok(records)
    }
}

fn probe_from_row(row: &Row<'_>) -> rusqlite::Result<ProbeRecord> {
    Ok(ProbeRecord {
        delay: row.get(0)?,
        success: row.get(1)?,
        timestamp: row.get(2)?,
    })
}
