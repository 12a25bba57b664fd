mod args;
mod output;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use spfcheck_lib::{
    DnsResolver, Qualifier, SpfError, SpfLookup, parse_spf, spf::normalize_domain,
    validate_record_with, validate_with,
};

use std::io::{self, BufRead};
use std::net::IpAddr;

use args::{CheckArgs, Cli, Commands};
use output::{CheckSummary, human_record};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.cmd {
        Some(Commands::Check(ref check)) => run_check(&cli, check),
        Some(Commands::Parse { ref record }) => run_parse(&cli, record),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn run_parse(cli: &Cli, text: &str) -> Result<()> {
    let record = parse_spf(text).with_context(|| format!("parse '{text}'"))?;
    match cli.format.as_str() {
        "human" => {
            for line in human_record(&record) {
                println!("{line}");
            }
        }
        "json" => {
            #[cfg(feature = "with-serde")]
            {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            #[cfg(not(feature = "with-serde"))]
            {
                bail!("format=json requires the 'with-serde' feature");
            }
        }
        other => bail!("unknown --format '{other}', use: human|json"),
    }
    Ok(())
}

fn run_check(cli: &Cli, check: &CheckArgs) -> Result<()> {
    let options = check.options();
    let resolver = DnsResolver::from_options(&options).context("build resolver")?;
    let depth = options.max_depth();

    let mut rows = Vec::new();
    if check.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            rows.push(check_line(&resolver, trimmed, depth));
        }
    } else {
        let (Some(ip), Some(domain)) = (check.ip, check.domain.as_deref()) else {
            bail!("--ip and --domain are required without --stdin");
        };
        let outcome = match check.record.as_deref() {
            Some(text) => normalize_domain(domain)
                .and_then(|ascii| validate_record_with(&resolver, ip, &ascii, text, depth)),
            None => check_domain(&resolver, ip, domain, depth),
        };
        rows.push(CheckSummary::new(ip, domain, outcome));
    }

    print_rows(cli, &rows)?;

    // exit codes: 0 pass, 2 any other verdict, 1 lookup/parse errors
    if rows.iter().any(CheckSummary::is_error) {
        std::process::exit(1);
    }
    if !rows.iter().all(CheckSummary::is_pass) {
        std::process::exit(2);
    }
    Ok(())
}

fn check_line<R: SpfLookup>(resolver: &R, line: &str, depth: i32) -> CheckSummary {
    let mut fields = line.split_whitespace();
    let (Some(ip), Some(domain), None) = (fields.next(), fields.next(), fields.next()) else {
        return CheckSummary::invalid_input(line, "expected '<ip> <domain>'");
    };
    match ip.parse::<IpAddr>() {
        Ok(ip) => CheckSummary::new(ip, domain, check_domain(resolver, ip, domain, depth)),
        Err(err) => CheckSummary::invalid_input(line, format!("invalid ip '{ip}': {err}")),
    }
}

fn check_domain<R: SpfLookup>(
    resolver: &R,
    ip: IpAddr,
    domain: &str,
    depth: i32,
) -> Result<Qualifier, SpfError> {
    let ascii = normalize_domain(domain)?;
    validate_with(resolver, ip, &ascii, depth)
}

fn print_rows(cli: &Cli, rows: &[CheckSummary]) -> Result<()> {
    match cli.format.as_str() {
        "human" => {
            for row in rows {
                println!("{}", row.human_line());
            }
        }
        "json" => {
            #[cfg(feature = "with-serde")]
            {
                println!("{}", serde_json::to_string_pretty(rows)?);
            }
            #[cfg(not(feature = "with-serde"))]
            {
                bail!("format=json requires the 'with-serde' feature");
            }
        }
        other => bail!("unknown --format '{other}', use: human|json"),
    }
    Ok(())
}

#[cfg(feature = "with-tracing")]
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(io::stderr)
            .finish(),
    )
    .context("set tracing subscriber")
}

#[cfg(not(feature = "with-tracing"))]
fn init_logging(verbose: u8) -> Result<()> {
    if verbose > 0 {
        eprintln!("--verbose requires the 'with-tracing' feature");
    }
    Ok(())
}
