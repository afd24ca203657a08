use clap::Parser;
use std::path::PathBuf;

/// Configuração operacional da análise, vinda da linha de comando.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "analise_falhas",
    about = "Analisa o histórico de pings e reporta hosts com falhas consecutivas",
    version
)]
pub struct Config {
    /// Caminho do banco SQLite gerado pelo monitoramento
    #[arg(value_name = "BANCO")]
    pub database: PathBuf,

    /// Threshold de falhas consecutivas para reportar um host
    #[arg(short = 't', long, default_value_t = 3)]
    pub threshold: usize,

    /// Exibe estatísticas de um IP específico em vez da varredura
    #[arg(short = 'q', long = "query", value_name = "IP")]
    pub query_ip: Option<String>,

    /// Lista alertas ativos, opcionalmente só dos últimos N dias
    #[arg(short = 'a', long, value_name = "DIAS")]
    pub alerts: Option<Option<u32>>,

    /// Lista registros de recuperação, opcionalmente só dos últimos N dias
    #[arg(short = 'r', long, value_name = "DIAS")]
    pub recovery: Option<Option<u32>>,
}

impl Config {
    /// Validação dos parâmetros antes de tocar o banco.
    pub fn validate(&self) -> Result<(), String> {
        if self.threshold == 0 {
            return Err("threshold deve ser maior que zero".into());
        }
        Ok(())
    }
}
