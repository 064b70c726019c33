mod cli;
mod commands;
mod outline_view;
mod render;

use anyhow::{Context, Result, bail};
use clap::Parser;
use coursewright_config::Config;
use coursewright_engine::{CourseOutline, Level, io};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io::stdout;
use std::path::{Path, PathBuf};

use cli::{Cli, Command};
use outline_view::{OutlineItem, OutlineView};

struct App {
    outline: CourseOutline,
    view: OutlineView,
    items: Vec<OutlineItem>,
    list_state: ListState,
    current_content: Vec<String>,
}

impl App {
    fn new(content_path: &Path) -> Result<Self> {
        let outline = io::load_course(content_path)?;
        let view = OutlineView::default();
        let items = view.items(&outline);

        let mut app = Self {
            outline,
            view,
            items,
            list_state: ListState::default(),
            current_content: Vec::new(),
        };

        // Select first item if available
        if !app.items.is_empty() {
            app.list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn selected(&self) -> Option<&OutlineItem> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    fn next_item(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_item(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn refresh_items(&mut self) {
        self.items = self.view.items(&self.outline);
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        let Some(item) = self.selected().cloned() else {
            self.current_content.clear();
            return;
        };

        self.current_content = match item.level {
            Level::Lesson => match self.outline.find_lesson(&item.id) {
                Some(lesson) => {
                    let mut lines = vec![
                        format!("📄 {}", lesson.title),
                        format!("{} min  {}", lesson.duration, lesson.tags.join(", ")),
                        String::new(),
                    ];
                    let body = self
                        .outline
                        .lesson_body(&item.id)
                        .map(|doc| render::render_body(&doc))
                        .unwrap_or_default();
                    if body.is_empty() {
                        lines.push("(empty lesson)".to_string());
                    }
                    lines.extend(body);
                    lines
                }
                None => vec![format!("Lesson {} not found", item.id)],
            },
            Level::Section | Level::Subsection => {
                let children = match item.level {
                    Level::Section => self
                        .outline
                        .find_section(&item.id)
                        .map_or(0, |s| s.subsections.len()),
                    _ => self
                        .outline
                        .find_subsection(&item.id)
                        .map_or(0, |s| s.lessons.len()),
                };
                vec![
                    format!("📁 {}", item.title),
                    format!("{children} item(s)"),
                    String::new(),
                    "Press Enter/Space to toggle, → to expand, ← to collapse".to_string(),
                ]
            }
        };
    }

    fn activate_selected_item(&mut self) {
        if let Some(item) = self.selected()
            && item.is_folder()
        {
            let id = item.id.clone();
            self.view.toggle(&id);
            self.refresh_items();
        }
    }

    fn expand_selected_folder(&mut self) {
        if let Some(item) = self.selected()
            && item.is_folder()
            && !item.expanded
        {
            let id = item.id.clone();
            self.view.expand(&id);
            self.refresh_items();
        }
    }

    fn collapse_selected_folder(&mut self) {
        if let Some(item) = self.selected()
            && item.is_folder()
            && item.expanded
        {
            let id = item.id.clone();
            self.view.collapse(&id);
            self.refresh_items();
        }
    }
}

fn load_config() -> Option<Config> {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring config: {e}");
            None
        }
    }
}

/// Content path from the command line, else from the config file.
fn content_path(arg: Option<PathBuf>, config: Option<&Config>) -> Result<PathBuf> {
    match (arg, config) {
        (Some(path), _) => Ok(path),
        (None, Some(config)) => Ok(config.content_path.clone()),
        (None, None) => bail!(
            "no content path given and no config file at {}",
            Config::config_path().display()
        ),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config();
    let mut out = stdout();

    match cli.command {
        Some(Command::Blocks(args)) => commands::list_blocks(&args.file, &mut out),
        Some(Command::Normalize(args)) => commands::normalize(&args.file, &mut out),
        Some(Command::Tree { content_path: path }) => {
            let path = content_path(path, config.as_ref())?;
            commands::print_tree(&path, &mut out)
        }
        Some(Command::NewBlock(args)) => {
            let defaults = commands::block_defaults(config.as_ref());
            let id =
                commands::new_block(&args.file, &args.kind, args.after.as_deref(), &defaults)?;
            println!("{id}");
            Ok(())
        }
        None => {
            let path = content_path(cli.content_path, config.as_ref())?;
            browse(&path)
        }
    }
}

fn browse(content_path: &Path) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(content_path)
        .with_context(|| format!("cannot open course at '{}'", content_path.display()))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_item(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
                KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected_item(),
                KeyCode::Right => app.expand_selected_folder(),
                KeyCode::Left => app.collapse_selected_folder(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Outline panel
    let outline_items: Vec<ListItem> = app
        .items
        .iter()
        .map(|item| {
            let indent = "  ".repeat(item.depth);
            let icon = match (item.is_folder(), item.expanded) {
                (true, true) => "📂 ",
                (true, false) => "📁 ",
                (false, _) => "📄 ",
            };
            let display_text = format!("{}{}{}", indent, icon, item.title);
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let outline_list = List::new(outline_items)
        .block(Block::default().borders(Borders::ALL).title("Course"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(outline_list, chunks[0], &mut app.list_state);

    // Content panel
    let content_text = if app.current_content.is_empty() {
        vec![Line::from("Select a lesson to view its body")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Lesson"))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Enter/Space: Toggle | →: Expand | ←: Collapse"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    // Place help at bottom
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
