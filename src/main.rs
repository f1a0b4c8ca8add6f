use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wallet_ledger::Service;
use wallet_ledger::domain::account::Money;
use wallet_ledger::interfaces::csv::account_writer::AccountWriter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding dump files to restore the wallet from.
    /// When omitted, the wallet is seeded with sample data.
    #[arg(long)]
    import_dir: Option<PathBuf>,

    /// Directory to export dump files into after processing.
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut service = Service::new();
    match &cli.import_dir {
        Some(dir) => {
            // Whatever was applied before a failure is kept
            if let Err(e) = service.import(dir) {
                warn!(dir = %dir.display(), error = %e, "import failed");
            }
        }
        None => seed(&mut service),
    }

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(service.accounts()).into_diagnostic()?;

    if let Some(dir) = &cli.export_dir {
        service.export(dir).into_diagnostic()?;
        info!(dir = %dir.display(), "export finished");
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Registers two funded accounts and runs a favorite payment through the first one.
/// Failures are logged and the remaining steps still run.
fn seed(service: &mut Service) {
    let mut registered = Vec::new();
    for (phone, amount) in [("918925874", 10_00000), ("987026424", 20_00000)] {
        let account_id = match service.register_account(phone) {
            Ok(account) => account.id,
            Err(e) => {
                warn!(phone, error = %e, "registration failed");
                continue;
            }
        };
        if let Err(e) = service.deposit(account_id, Money::new(amount)) {
            warn!(account_id, error = %e, "deposit failed");
        }
        registered.push(account_id);
    }

    let Some(&account_id) = registered.first() else {
        return;
    };
    let payment_id = match service.pay(account_id, "mobile", Money::new(5_000)) {
        Ok(payment) => payment.id.clone(),
        Err(e) => {
            warn!(account_id, error = %e, "payment failed");
            return;
        }
    };
    let favorite_id = match service.favorite_payment(&payment_id, "phone-bill") {
        Ok(favorite) => favorite.id.clone(),
        Err(e) => {
            warn!(%payment_id, error = %e, "favorite failed");
            return;
        }
    };
    if let Err(e) = service.pay_from_favorite(&favorite_id) {
        warn!(%favorite_id, error = %e, "payment from favorite failed");
    }
}
