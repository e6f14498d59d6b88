use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "login-probe")]
#[command(about = "Synthetic login monitoring probe")]
#[command(version)]
struct Cli {
    /// Probe config file
    config: PathBuf,

    /// Run in headless mode (overrides config)
    #[arg(long)]
    headless: bool,

    /// Validate config without running
    #[arg(long)]
    check: bool,

    /// Run the probe but skip the collector POST
    #[arg(long)]
    no_emit: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> login_probe::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut config = login_probe::Config::load(&cli.config)?;

    if cli.check {
        println!("Config valid: {}", config.website);
        println!("  Target: {}", config.target.url);
        println!("  Collector: {}", config.collector.url);
        println!(
            "  Wait: {}ms deadline, {}ms poll",
            config.wait.deadline_ms, config.wait.poll_ms
        );
        println!("  Headless: {}", config.browser.headless);
        return Ok(());
    }

    // Override headless if specified
    if cli.headless {
        config.browser.headless = true;
    }

    println!("Probing: {} ({})", config.website, config.target.url);

    let report = login_probe::probe::run(&config).await?;

    println!();
    if report.result.success {
        println!("✓ Login succeeded ({})", report.state);
    } else {
        println!("✗ Login failed ({})", report.state);
    }

    if cli.no_emit {
        println!("  Emission skipped (--no-emit)");
    } else {
        // Emission failure must not change the probe's determination, but a
        // silent monitoring gap is worth an error in the logs.
        if let Err(e) = login_probe::collector::emit(&config.collector, &report.result).await {
            tracing::error!("{}", e);
            println!("  Emission failed: {}", e);
        }
    }

    if !report.result.success {
        std::process::exit(1);
    }

    Ok(())
}
