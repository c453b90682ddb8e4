use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::sync::Mutex;
use thai_covid_map::app::{App, PAGE_DAYS};
use thai_covid_map::config::Settings;
use thai_covid_map::dashboard::Dashboard;
use thai_covid_map::data::{self, Source};
use thai_covid_map::ui;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let settings = Settings::load()?;
    init_logging(&settings)?;

    // Both sources are fetched exactly once; any failure ends the program here
    eprintln!("Loading province boundaries and case data...");
    let dashboard = load_dashboard(&settings)?;

    let mut terminal = ratatui::init();
    terminal.clear()?;

    let result = run(&mut terminal, App::new(dashboard));

    ratatui::restore();

    result
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(settings: &Settings) -> Result<()> {
    let file = File::create(&settings.log_file)
        .with_context(|| format!("Failed to create log file {:?}", settings.log_file))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_dashboard(settings: &Settings) -> Result<Dashboard> {
    let polygons = data::load_polygons(&Source::parse(&settings.geo_source))
        .with_context(|| format!("Failed to load province boundaries from {}", settings.geo_source))?;
    let cases = data::load_daily_counts(&Source::parse(&settings.cases_source))
        .with_context(|| format!("Failed to load case data from {}", settings.cases_source))?;

    let unmatched: Vec<&str> = cases
        .dates()
        .filter_map(|date| cases.get(date))
        .flat_map(|day| day.iter().map(|(name, _)| name))
        .filter(|name| polygons.get(name).is_none())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    if !unmatched.is_empty() {
        tracing::warn!(?unmatched, "provinces with cases but no boundary; counted in totals only");
    }

    Ok(Dashboard::new(polygons, cases))
}

fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Redraw only when something happens
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    KeyCode::Left | KeyCode::Char('h') => app.step(-1),
                    KeyCode::Right | KeyCode::Char('l') => app.step(1),
                    KeyCode::PageDown | KeyCode::Char('j') => app.step(-PAGE_DAYS),
                    KeyCode::PageUp | KeyCode::Char('k') => app.step(PAGE_DAYS),
                    KeyCode::Home | KeyCode::Char('g') => app.jump_start(),
                    KeyCode::End | KeyCode::Char('G') => app.jump_end(),
                    KeyCode::Up => app.scroll_table(-1),
                    KeyCode::Down => app.scroll_table(1),

                    _ => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
