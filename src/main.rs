mod card;
mod config;
mod fetch;
mod logging;
mod models;
mod portrait;
mod transition;
mod ui;
mod utils;

use crossterm::event::{self, Event as CEvent, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::seq::IndexedRandom;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use reqwest::Url;
use std::error::Error;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::card::HeroCard;
use crate::config::Config;
use crate::fetch::{FetchError, HeroClient};
use crate::models::Hero;
use crate::portrait::PortraitCache;
use crate::ui::{draw_ui, App, Trigger};

/// Slot where a background fetch leaves its result for the event loop.
type FetchSlot = Arc<Mutex<Option<Result<Vec<Hero>, FetchError>>>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;

    // Fetch once, print a random hero and exit.
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--once") {
        logging::init_stderr_tracing();
        return run_once(&config).await;
    }

    logging::init_tracing(&config.log_path);
    info!(url = %config.api_url, "starting hero viewer");

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config);

    // Restore terminal
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    result
}

async fn run_once(config: &Config) -> Result<(), Box<dyn Error>> {
    let client = HeroClient::new(config.api_url.clone());
    let heroes = client.fetch_heroes().await?;
    match heroes.choose(&mut rand::rng()) {
        Some(hero) => {
            for line in HeroCard::from(hero).to_lines() {
                println!("{line}");
            }
        }
        None => eprintln!("No heroes returned by {}", client.url()),
    }
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let client = HeroClient::new(config.api_url.clone());
    let slot: FetchSlot = Arc::new(Mutex::new(None));
    let mut app = App::new(PortraitCache::new());

    start_fetch(&mut app, &client, &slot);

    let tick_rate = Duration::from_millis(50);
    loop {
        let now = Instant::now();
        app.tick(now);

        // Fetch completions are applied here so only the UI mutates the list.
        let finished = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(result) = finished {
            app.apply_fetch(result);
        }
        for url in app.take_portrait_requests() {
            spawn_portrait(&client, &app.portraits, url);
        }

        draw_ui(terminal, &app)?;

        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::F(1) | KeyCode::Char('h') => {
                        app.show_help = !app.show_help;
                    }
                    KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('t') => {
                        if app.trigger(&mut rand::rng(), Instant::now()) == Trigger::Refetch {
                            start_fetch(&mut app, &client, &slot);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn start_fetch(app: &mut App, client: &HeroClient, slot: &FetchSlot) {
    if !app.begin_fetch() {
        return;
    }
    let client = client.clone();
    let slot = slot.clone();
    tokio::spawn(async move {
        let result = client.fetch_heroes().await;
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
    });
}

fn spawn_portrait(client: &HeroClient, cache: &PortraitCache, url: Url) {
    let client = client.clone();
    let cache = cache.clone();
    tokio::spawn(async move {
        let key = url.to_string();
        match client.fetch_portrait(url).await {
            Ok(thumb) => cache.finish(&key, Some(thumb)),
            Err(e) => {
                warn!(url = %key, "portrait failed to load: {}", e);
                cache.finish(&key, None);
            }
        }
    });
}
