use clap::Parser;
use ka_splice::domain::model::BuildReport;
use ka_splice::utils::logger::{self, LogFormat};
use ka_splice::utils::validation::Validate;
use ka_splice::{BuildEngine, CliConfig, LocalStorage, SpliceError, SystemClock};

fn main() {
    let cli = CliConfig::parse();

    let log_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, cli.verbose);

    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    if let Err(e) = settings.validate() {
        fail(&e);
    }

    let engine = BuildEngine::new(LocalStorage::new(), SystemClock);

    match engine.run(&settings) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(&SpliceError::from(e)),
                }
            } else {
                print_summary(&report);
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &SpliceError) -> ! {
    tracing::error!(
        "splice failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn print_summary(report: &BuildReport) {
    if let Some(source) = report.source.path() {
        let note = if report.source.is_fallback() { " (fallback)" } else { "" };
        println!("📜 Source: {}{}", source.display(), note);
    }
    println!(
        "✂️  Replaced {} old lines with {} new lines",
        report.discarded_lines, report.payload_lines
    );
    if report.written {
        println!("📁 Output saved to: {}", report.output.display());
    } else {
        println!("🔍 Dry run, nothing written to {}", report.output.display());
    }
}
