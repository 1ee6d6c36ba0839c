use clap::Parser;
use color_eyre::Result;
use crictui::error_display::{classify_report, user_message_from_report, LoadErrorKind};
use crictui::{App, AppConfig, AppEvent, Args, ConfigManager, Dataset, Theme};
use ratatui::DefaultTerminal;
use std::sync::mpsc::channel;

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    let (tx, rx) = channel::<AppEvent>();
    render(&mut terminal, &mut app)?;

    loop {
        if crossterm::event::poll(std::time::Duration::from_millis(25))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let updated = match rx.recv_timeout(std::time::Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
    Ok(())
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.generate_config {
        let manager = ConfigManager::new(crictui::APP_NAME)?;
        match manager.write_default_config() {
            Ok(path) => {
                println!("Wrote default config to {}", path.display());
                Ok(Some(()))
            }
            Err(e) => {
                eprintln!("Error generating config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Ok(None)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    color_eyre::install()?;

    let config = AppConfig::load(crictui::APP_NAME)?;
    let theme = Theme::from_config(&config.theme)?;

    // Load before touching the terminal: missing sources or a bad schema are
    // startup failures, reported plainly, never a partially drawn dashboard.
    let dataset = match Dataset::load(&args.deliveries, &args.top_scorers) {
        Ok(dataset) => dataset,
        Err(report) => {
            let prefix = match classify_report(&report) {
                LoadErrorKind::SourceUnavailable => "Input data unavailable",
                LoadErrorKind::SchemaMismatch => "Unexpected input schema",
                LoadErrorKind::Other => "Failed to load input data",
            };
            eprintln!("{}: {}", prefix, user_message_from_report(&report, None));
            std::process::exit(1);
        }
    };

    let hist_bins = args.bins.unwrap_or(config.chart.hist_bins);
    let app = App::new(dataset, &config, theme, args.batsman.as_deref(), hist_bins)?;

    let terminal = ratatui::init();
    let result = run(terminal, app);
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
