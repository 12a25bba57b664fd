use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use spfcheck_lib::ValidationOptions;
use spfcheck_lib::spf::{DEFAULT_ATTEMPTS, DEFAULT_MAX_DEPTH, DEFAULT_NAMESERVER, DEFAULT_TIMEOUT};

const DEFAULT_TIMEOUT_MS: u64 = DEFAULT_TIMEOUT.as_millis() as u64;

#[derive(Parser)]
#[command(name = "spfcheck-cli", version, about = "Analyse SPF et autorisation d'expéditeur")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// format: human|json
    #[arg(long, global = true, default_value = "human")]
    pub format: String,

    /// plus de logs sur stderr (-v debug, -vv trace; feature `with-tracing`)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// évalue la politique SPF d'un domaine pour une adresse
    Check(CheckArgs),
    /// analyse un enregistrement et affiche ses directives
    Parse {
        /// texte de l'enregistrement, ex. "v=spf1 mx -all"
        record: String,
    },
}

#[derive(Args)]
pub struct CheckArgs {
    /// adresse IP de l'expéditeur
    #[arg(long, required_unless_present = "stdin")]
    pub ip: Option<IpAddr>,

    /// domaine dont la politique SPF est évaluée
    #[arg(long, required_unless_present = "stdin")]
    pub domain: Option<String>,

    /// évalue ce texte au lieu de lire l'enregistrement TXT du domaine
    #[arg(long, conflicts_with = "stdin")]
    pub record: Option<String>,

    /// lit des paires "<ip> <domaine>" depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// serveur DNS interrogé pour chaque requête
    #[arg(long, default_value_t = DEFAULT_NAMESERVER)]
    pub nameserver: SocketAddr,

    /// budget de profondeur include/redirect (négatif = illimité)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, allow_negative_numbers = true)]
    pub depth: i32,

    /// délai par requête, en millisecondes
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// nombre de tentatives par requête
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,
}

impl CheckArgs {
    pub fn options(&self) -> ValidationOptions {
        ValidationOptions::new()
            .with_nameserver(self.nameserver)
            .with_max_depth(self.depth)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_attempts(self.attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_default_follows_library_default() {
        let cli = Cli::parse_from([
            "spfcheck-cli",
            "check",
            "--ip",
            "192.0.2.1",
            "--domain",
            "example.com",
        ]);
        let Some(Commands::Check(check)) = cli.cmd else {
            panic!("expected check subcommand");
        };
        assert_eq!(check.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(check.options().timeout(), DEFAULT_TIMEOUT);
    }
}
