//! lldp-portname: rename switch ports after their LLDP neighbors.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use lldp_portname::{Credentials, NamePolicy, Session, discover_neighbors, rename_ports};
use regex::Regex;
use tracing_subscriber::EnvFilter;

/// Rename switch ports after their LLDP neighbors, over SNMPv3.
#[derive(Debug, Parser)]
#[command(name = "lldp-portname", version, about)]
struct Args {
    /// Switch management address (prompted for when omitted).
    #[arg(value_name = "ADDRESS")]
    target: Option<String>,

    #[command(flatten)]
    auth: AuthArgs,

    /// Regular expression a neighbor name must match to qualify.
    /// Without it, every discovered neighbor is renamed onto its port.
    #[arg(long = "match", value_name = "PATTERN")]
    pattern: Option<Regex>,

    /// Discover and list matching neighbors without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// SNMP UDP port on the target device.
    #[arg(long, default_value_t = 161, value_name = "PORT")]
    port: u16,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 5, value_name = "SECONDS")]
    timeout: u64,

    /// Number of retries per request.
    #[arg(long, default_value_t = 3, value_name = "COUNT")]
    retries: u32,
}

/// SNMPv3 USM credentials, sourced from the environment.
#[derive(Debug, clap::Args)]
struct AuthArgs {
    /// USM user name.
    #[arg(long, env = "SNMP_USER", hide_env_values = true, value_name = "USER")]
    username: String,

    /// Authentication key (HMAC-MD5).
    #[arg(
        long = "auth-key",
        env = "SNMP_PASS",
        hide_env_values = true,
        value_name = "KEY"
    )]
    auth_key: String,

    /// Privacy key (AES-128-CFB).
    #[arg(
        long = "priv-key",
        env = "SNMP_PRIV",
        hide_env_values = true,
        value_name = "KEY"
    )]
    priv_key: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing();

    let host = match args.target {
        Some(host) => host,
        None => match prompt_target() {
            Ok(host) => host,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };
    if host.is_empty() {
        eprintln!("Error: no target address given");
        return ExitCode::FAILURE;
    }

    let policy = NamePolicy::from(args.pattern);
    let session = Session::new(Credentials {
        username: args.auth.username,
        auth_key: args.auth.auth_key,
        priv_key: args.auth.priv_key,
    })
    .timeout(Duration::from_secs(args.timeout))
    .retries(args.retries);

    let target = match session.target(&host, args.port).await {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let discovery = discover_neighbors(&target, &policy).await;
    if let Some(line) = discovery.abort_report() {
        println!("{}", line);
    }

    if args.dry_run {
        for neighbor in &discovery.neighbors {
            println!("Port {} matched neighbor: {}", neighbor.port, neighbor.name);
        }
        return exit_code(discovery.aborted.is_some());
    }

    let outcomes = rename_ports(&target, &discovery.neighbors).await;
    let mut failed = discovery.aborted.is_some();
    for outcome in &outcomes {
        println!("{}", outcome);
        failed |= !outcome.is_renamed();
    }

    exit_code(failed)
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn prompt_target() -> io::Result<String> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "Enter switch IP: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}
