mod api;
mod config;
mod ui;
mod view;

use std::fs::OpenOptions;
use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use tokio::runtime::Runtime;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::{RpcClient, TodoApi};
use crate::config::ClientConfig;
use crate::view::TodoView;

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    Submit,
    Reload,
    Toggle,
    Delete,
    Next,
    Previous,
    Backspace,
    Type(char),
}

fn action_for(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::F(5) => Some(Action::Reload),
        KeyCode::Tab => Some(Action::Toggle),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Down => Some(Action::Next),
        KeyCode::Up => Some(Action::Previous),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            Some(Action::Type(c))
        }
        _ => None,
    }
}

fn init_logging(config: &ClientConfig) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &Runtime,
    client: &RpcClient,
    view: &mut TodoView,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, view))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(action) = action_for(key) else {
            continue;
        };
        match action {
            Action::Quit => return Ok(()),
            Action::Submit => runtime.block_on(view.submit(client)),
            Action::Reload => runtime.block_on(view.load(client)),
            Action::Toggle => runtime.block_on(view.toggle_selected(client)),
            Action::Delete => runtime.block_on(view.delete_selected(client)),
            Action::Next => view.select_next(),
            Action::Previous => view.select_previous(),
            Action::Backspace => {
                view.input.pop();
            }
            Action::Type(c) => view.input.push(c),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env();
    init_logging(&config)?;

    let runtime = Runtime::new()?;
    let client = RpcClient::new(&config.server_url)?;
    match runtime.block_on(client.healthcheck()) {
        Ok(health) => info!("server {} at {}", health.status, health.timestamp),
        Err(e) => warn!("healthcheck against {} failed: {e}", client.base_url()),
    }

    let mut view = TodoView::default();
    runtime.block_on(view.load(&client));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &runtime, &client, &mut view);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result?)
}
