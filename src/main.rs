use anyhow::{Context, Result};
use clap::Parser;
use orphanmap::app::App;
use orphanmap::cli::Cli;
use orphanmap::styles::{init_theme, ThemeType};

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before the default hook prints
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging directory
    let log_dir = orphanmap::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;
    let log_file = log_dir.join("orphanmap.log");

    // Initialize tracing with file logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "orphanmap.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    // One-shot subcommands print to stdout and never touch the terminal mode
    if cli.execute()? {
        drop(guard);
        return Ok(());
    }

    let (config, config_path) = cli.load_config()?;

    let theme_type = if std::env::var_os("NO_COLOR").is_some() {
        ThemeType::NoColor
    } else {
        config.theme.parse::<ThemeType>().unwrap_or_default()
    };
    init_theme(theme_type);

    // Print log location before TUI starts (this will be visible briefly)
    eprintln!("Logs are being written to: {:?}", log_file);
    eprintln!("View logs in real-time: tail -f {:?}", log_file);

    setup_panic_hook();

    let mut app = App::new(config, config_path)?;
    let result = app.run();

    drop(guard);
    result
}
