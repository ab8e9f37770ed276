use crate::card::{HeroCard, ImageSource};
use crate::fetch::{FetchError, FetchState};
use crate::models::Hero;
use crate::portrait::{placeholder_pixels, PortraitCache, BACKGROUND};
use crate::transition::{blend, Phase, Transition};
use crate::utils::stat_bar;
use rand::Rng;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use reqwest::Url;
use std::io;
use std::time::Instant;
use tracing::{error, info};

const TEXT: (u8, u8, u8) = (255, 255, 255);
const ACCENT: (u8, u8, u8) = (248, 208, 48);
const BAR: (u8, u8, u8) = (120, 200, 80);
const STAT_MAX: i64 = 100;

/// Outcome of the "show a hero" trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The list was empty; the caller should start a fetch.
    Refetch,
    /// The hero at this index is now displayed.
    Shown(usize),
}

pub struct App {
    pub heroes: Vec<Hero>,
    pub current: Option<HeroCard>,
    pub transition: Option<Transition>,
    pub fetch_state: FetchState,
    pub portraits: PortraitCache,
    pub show_help: bool,
    portrait_requests: Vec<Url>,
}

impl App {
    pub fn new(portraits: PortraitCache) -> Self {
        Self {
            heroes: Vec::new(),
            current: None,
            transition: None,
            fetch_state: FetchState::default(),
            portraits,
            show_help: false,
            portrait_requests: Vec::new(),
        }
    }

    /// Mark a hero fetch as started. Returns false while one is already in flight.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_state.in_progress {
            return false;
        }
        self.fetch_state.in_progress = true;
        true
    }

    /// Apply a completed hero fetch. Failures are logged and change nothing.
    pub fn apply_fetch(&mut self, result: Result<Vec<Hero>, FetchError>) {
        self.fetch_state.in_progress = false;
        match result {
            Ok(heroes) => {
                self.heroes = heroes;
                if let Some(first) = self.heroes.first() {
                    let card = HeroCard::from(first);
                    self.configure(card, None);
                }
            }
            Err(e) => error!("Error fetching heroes: {}", e),
        }
    }

    /// Show a random hero with a cross-dissolve, or ask for a refetch when
    /// there is nothing to pick from.
    pub fn trigger<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> Trigger {
        if self.heroes.is_empty() {
            info!("Hero list is empty. Fetching heroes again...");
            return Trigger::Refetch;
        }
        let idx = rng.random_range(0..self.heroes.len());
        let card = HeroCard::from(&self.heroes[idx]);
        self.configure(card, Some(now));
        Trigger::Shown(idx)
    }

    /// Display `card`, dissolving from the previous one when `animate_from` is set.
    fn configure(&mut self, card: HeroCard, animate_from: Option<Instant>) {
        if let ImageSource::Remote(url) = &card.image {
            if self.portraits.begin(url.as_str()) {
                self.portrait_requests.push(url.clone());
            }
        }
        info!("Configured hero: {}", card.name);
        let previous = self.current.replace(card);
        self.transition = match (previous, animate_from) {
            (Some(from), Some(start)) => Some(Transition::new(from, start)),
            _ => None,
        };
    }

    /// Portrait URLs that still need a download task.
    pub fn take_portrait_requests(&mut self) -> Vec<Url> {
        std::mem::take(&mut self.portrait_requests)
    }

    pub fn tick(&mut self, now: Instant) {
        if self.transition.as_ref().is_some_and(|t| t.is_finished(now)) {
            self.transition = None;
        }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn faded(color: (u8, u8, u8), opacity: f32) -> Style {
    Style::default().fg(rgb(blend(color, BACKGROUND, opacity)))
}

// helper to compute a centered rect for popups
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_w = r.width.saturating_mul(percent_x) / 100;
    let popup_h = r.height.saturating_mul(percent_y) / 100;
    let popup_x = r.x + (r.width.saturating_sub(popup_w) / 2);
    let popup_y = r.y + (r.height.saturating_sub(popup_h) / 2);
    Rect::new(popup_x, popup_y, popup_w, popup_h)
}

pub fn draw_ui<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> io::Result<()> {
    let now = Instant::now();
    terminal.draw(|f| render(f, app, now)).map(|_| ())
}

fn render<B: Backend>(f: &mut Frame<B>, app: &App, now: Instant) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(size);

    let shown = match app.transition.as_ref().map(|t| t.phase(now)) {
        Some(Phase::Outgoing(card, opacity)) => Some((card, opacity)),
        Some(Phase::Incoming(opacity)) => app.current.as_ref().map(|c| (c, opacity)),
        None => app.current.as_ref().map(|c| (c, 1.0)),
    };

    match shown {
        Some((card, opacity)) => render_card(f, app, card, opacity, chunks[0]),
        None => {
            let msg = if app.fetch_state.in_progress {
                "Loading heroes..."
            } else {
                "No hero loaded. Press Space to fetch."
            };
            let para = Paragraph::new(msg).block(Block::default().borders(Borders::ALL).title("Hero"));
            f.render_widget(para, chunks[0]);
        }
    }

    let status = if app.fetch_state.in_progress {
        "Fetching heroes...".to_string()
    } else {
        format!("{} heroes loaded", app.heroes.len())
    };
    let footer = Paragraph::new(vec![Spans::from(vec![
        Span::styled(status, Style::default().fg(rgb(ACCENT))),
        Span::raw("  |  Space/Enter: random hero  h: help  q: quit"),
    ])])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[1]);

    if app.show_help {
        let popup = centered_rect(60, 40, size);
        let help_lines = vec![
            Spans::from(Span::styled(
                "Keybindings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(Span::raw("")),
            Spans::from(Span::raw("Space/Enter/t  Show a random hero")),
            Spans::from(Span::raw("h/F1           Toggle this help")),
            Spans::from(Span::raw("q/Esc          Quit")),
        ];
        let help_para = Paragraph::new(help_lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, popup);
        f.render_widget(help_para, popup);
    }
}

fn render_card<B: Backend>(f: &mut Frame<B>, app: &App, card: &HeroCard, opacity: f32, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(8)])
        .split(columns[1]);

    // Portrait
    let rect = columns[0];
    let w = (rect.width.saturating_sub(2) as u32).clamp(1, 64);
    let h = (rect.height.saturating_sub(2) as u32).clamp(1, 64);
    let pixels = match &card.image {
        ImageSource::Remote(url) => app
            .portraits
            .pixels(url.as_str(), w, h)
            .unwrap_or_else(|| placeholder_pixels(w, h)),
        ImageSource::Placeholder => placeholder_pixels(w, h),
    };
    let portrait_lines: Vec<Spans> = pixels
        .into_iter()
        .map(|row| {
            Spans::from(
                row.into_iter()
                    .map(|px| Span::styled(" ", Style::default().bg(rgb(blend(px, BACKGROUND, opacity)))))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(
        Paragraph::new(portrait_lines).block(Block::default().borders(Borders::ALL).title("Portrait")),
        rect,
    );

    let text = faded(TEXT, opacity);
    let info_lines = vec![
        Spans::from(Span::styled(
            card.name.clone(),
            faded(ACCENT, opacity).add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::styled(card.description.clone(), text)),
        Spans::from(Span::styled(card.place_of_birth.clone(), text)),
        Spans::from(Span::styled(card.alignment.clone(), text)),
    ];
    let info_para = Paragraph::new(info_lines)
        .block(Block::default().borders(Borders::ALL).title("Hero"))
        .wrap(Wrap { trim: true });
    f.render_widget(info_para, right[0]);

    // NAME: VALUE | bar
    let inner_w = right[1].width.saturating_sub(2) as usize;
    let label_w = 18usize;
    let bar_w = inner_w.saturating_sub(label_w + 1);
    let stat_lines: Vec<Spans> = card
        .stats
        .entries()
        .iter()
        .zip(card.stat_labels())
        .map(|((_, value), label)| {
            Spans::from(vec![
                Span::styled(format!("{:<label_w$} ", label, label_w = label_w), text),
                Span::styled(stat_bar(*value, STAT_MAX, bar_w), faded(BAR, opacity)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(stat_lines).block(Block::default().borders(Borders::ALL).title("Powerstats")),
        right[1],
    );
}
