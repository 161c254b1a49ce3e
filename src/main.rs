use anyhow::{Context, Result};
use clap::Parser;
use hourglass::{
    cli::{Cli, OutputFormat},
    config::DashboardConfig,
    csv_output::CsvOutput,
    dashboard::Dashboard,
    html_output::HtmlOutput,
    json_output::JsonReport,
};
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print the domain selector options, "All" first
fn print_domains(dashboard: &Dashboard) {
    for option in dashboard.domain_options() {
        println!("{}", option);
    }
}

/// Write the rendered output to a file or stdout
fn write_output(args: &Cli, content: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("wrote {} bytes to {}", content.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };

    let dashboard = Dashboard::load(&args.input)
        .with_context(|| format!("Failed to load access log {}", args.input.display()))?;

    if args.list_domains {
        print_domains(&dashboard);
        return Ok(());
    }

    let params = args.params(&config);
    let report = dashboard.render(&params);

    let content = match args.format {
        OutputFormat::Html => HtmlOutput::new(args.title(&config)).to_html(&report),
        OutputFormat::Json => JsonReport::new(&report)
            .to_json()
            .context("Failed to serialize report")?,
        OutputFormat::Csv => CsvOutput::new(&report)
            .to_csv()
            .context("Failed to write CSV tables")?,
    };

    write_output(&args, &content)
}
