use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tui_textarea::TextArea;

use escape_room::puzzle::{PuzzleKind, RoomCatalog, RoomDefinition};
use escape_room::session::{
    ClockState, Event as SessionEvent, HintUse, RandomDiscovery, Severity, Submission,
};
use escape_room::{
    start_session, ContentError, Outcome, SessionError, SessionHandle, Snapshot, Step,
};

const TICK: Duration = Duration::from_secs(1);
const FRAME: Duration = Duration::from_millis(100);
const RETURN_TO_TITLE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "escape-room", version, about = "Point-and-click escape rooms in the terminal")]
struct Cli {
    /// Directory holding the room TOML files
    #[arg(long, default_value = "rooms")]
    rooms: PathBuf,

    /// Skip the title menu and open this room
    #[arg(long)]
    room: Option<String>,

    /// Seed the discovery rolls for a repeatable session
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs here; the game owns the terminal otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

enum GameState {
    TitleScreen,
    Intro,
    Playing,
    Ended,
}

struct Notice {
    message: String,
    severity: Severity,
    shown_at: Instant,
}

struct App<'a> {
    catalog: RoomCatalog,
    seed: Option<u64>,
    state: GameState,
    menu_selection: usize,
    session: Option<SessionHandle>,
    snapshot: Option<Snapshot>,
    selected: usize,
    answer: TextArea<'a>,
    notices: Vec<Notice>,
    last_tick: Instant,
    ended_at: Option<Instant>,
    summary: String,
}

impl<'a> App<'a> {
    fn new(catalog: RoomCatalog, seed: Option<u64>) -> Self {
        App {
            catalog,
            seed,
            state: GameState::TitleScreen,
            menu_selection: 0,
            session: None,
            snapshot: None,
            selected: 0,
            answer: answer_box(PuzzleKind::Text),
            notices: Vec::new(),
            last_tick: Instant::now(),
            ended_at: None,
            summary: String::new(),
        }
    }

    fn room(&self) -> Option<&RoomDefinition> {
        self.session.as_ref().map(|s| s.room())
    }

    fn open_room(&mut self, room: Arc<RoomDefinition>) -> Result<(), ContentError> {
        info!("opening {}", room.slug());
        let session = match self.seed {
            Some(seed) => SessionHandle::new(room, RandomDiscovery::seeded(seed))?,
            None => start_session(room)?,
        };
        self.snapshot = Some(session.snapshot());
        self.session = Some(session);
        self.selected = 0;
        self.notices.clear();
        self.ended_at = None;
        self.state = GameState::Intro;
        Ok(())
    }

    fn open_selected_room(&mut self) {
        let Some(room) = self.catalog.all().get(self.menu_selection).cloned() else {
            return;
        };
        if let Err(e) = self.open_room(room) {
            log::error!("{}", e);
            self.notify(format!("Cannot open room: {}", e), Severity::Warning);
        }
    }

    fn begin(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let step = session.begin();
        self.last_tick = Instant::now();
        self.state = GameState::Playing;
        self.apply(step);
    }

    fn back_to_title(&mut self) {
        if let Some(session) = self.session.take() {
            session.close();
        }
        self.snapshot = None;
        self.notices.clear();
        self.ended_at = None;
        self.state = GameState::TitleScreen;
    }

    fn selected_hotspot(&self) -> Option<String> {
        let snapshot = self.snapshot.as_ref()?;
        snapshot.hotspots.get(self.selected).map(|h| h.id.clone())
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.snapshot.as_ref().map_or(0, |s| s.hotspots.len());
        if count == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
    }

    fn puzzle_open(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.active.is_some())
    }

    fn reset_answer(&mut self) {
        let kind = self
            .session
            .as_ref()
            .and_then(|s| s.active_puzzle())
            .map_or(PuzzleKind::Text, |active| active.puzzle.kind);
        self.answer = answer_box(kind);
    }

    fn investigate(&mut self) {
        let Some(id) = self.selected_hotspot() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.investigate(&id) {
            Ok(step) => {
                let opened = step.snapshot.active.is_some();
                self.apply(step);
                if opened {
                    self.reset_answer();
                }
            }
            Err(e) => self.system_error(e),
        }
    }

    fn submit(&mut self) {
        let Some(id) = self.snapshot.as_ref().and_then(|s| s.active.clone()) else {
            return;
        };
        let answer = self.answer.lines().join("");
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.submit_answer(&id, &answer) {
            Ok(step) => {
                let moved_on = matches!(step.result, Submission::StageCleared { .. });
                let wrong = matches!(step.result, Submission::Incorrect { .. });
                self.apply(step);
                if moved_on || wrong {
                    self.reset_answer();
                }
            }
            Err(e) => self.system_error(e),
        }
    }

    fn show_hint(&mut self) {
        let Some(id) = self.snapshot.as_ref().and_then(|s| s.active.clone()) else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.use_hint(&id) {
            Ok(step) => {
                if let HintUse::Revealed { penalty: 0, .. } = step.result {
                    self.notify("The hint is already on the page.", Severity::Info);
                }
                self.apply(step);
            }
            Err(e) => self.system_error(e),
        }
    }

    fn dismiss(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let step = session.dismiss();
            self.apply(step);
        }
    }

    fn finish_transition(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let step = session.finish_transition();
            self.apply(step);
        }
    }

    /// Drives the session clock and timers from the wall clock.
    fn update(&mut self, elapsed: Duration) {
        let now = Instant::now();
        self.notices
            .retain(|n| now.duration_since(n.shown_at) < n.severity.dismiss_after());

        if let GameState::Ended = self.state {
            if self
                .ended_at
                .is_some_and(|t| now.duration_since(t) >= RETURN_TO_TITLE)
            {
                self.back_to_title();
            }
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let step = session.advance(elapsed);
        if step.result > 0 {
            self.selected = 0;
        }
        self.apply(step);

        let running = self
            .snapshot
            .as_ref()
            .is_some_and(|s| s.clock == ClockState::Running);
        if !running {
            self.last_tick = now;
            return;
        }
        if now.duration_since(self.last_tick) >= TICK {
            self.last_tick = now;
            if let Some(session) = self.session.as_mut() {
                let step = session.tick();
                self.apply(step);
            }
        }
    }

    fn apply<T>(&mut self, step: Step<T>) {
        for event in step.events {
            match event {
                SessionEvent::Notification { message, severity } => self.notify(message, severity),
                SessionEvent::SubRoomCleared { .. } => {}
                SessionEvent::Escaped | SessionEvent::TimedOut => self.ended_at = Some(Instant::now()),
            }
        }
        if step.snapshot.outcome.is_terminal() && !matches!(self.state, GameState::Ended) {
            self.summary = summary(&step.snapshot);
            self.ended_at.get_or_insert_with(Instant::now);
            self.state = GameState::Ended;
        }
        self.snapshot = Some(step.snapshot);
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notices.push(Notice {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    fn system_error(&mut self, error: SessionError) {
        log::error!("{}", error);
        self.notify(format!("System error: {}", error), Severity::Warning);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.state {
            GameState::TitleScreen => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    let count = self.catalog.len();
                    self.menu_selection = (self.menu_selection + count - 1) % count;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.menu_selection = (self.menu_selection + 1) % self.catalog.len();
                }
                KeyCode::Enter => self.open_selected_room(),
                KeyCode::Char('q') | KeyCode::Esc => return false,
                _ => {}
            },
            GameState::Intro => match key.code {
                KeyCode::Enter => self.begin(),
                KeyCode::Esc => self.back_to_title(),
                _ => {}
            },
            GameState::Ended => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.back_to_title();
                }
            }
            GameState::Playing if self.puzzle_open() => self.handle_puzzle_key(key),
            GameState::Playing => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
                KeyCode::Enter => {
                    if self.snapshot.as_ref().is_some_and(|s| s.in_transition) {
                        self.finish_transition();
                    } else {
                        self.investigate();
                    }
                }
                KeyCode::Char('q') | KeyCode::Esc => self.back_to_title(),
                _ => {}
            },
        }
        true
    }

    fn handle_puzzle_key(&mut self, key: KeyEvent) {
        let kind = self
            .session
            .as_ref()
            .and_then(|s| s.active_puzzle())
            .map(|active| active.puzzle.kind);

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::F(1) => self.show_hint(),
            KeyCode::Esc => self.dismiss(),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
                if kind == Some(PuzzleKind::Pattern) =>
            {
                self.answer.insert_char(arrow(key.code));
            }
            _ => {
                self.answer.input(key);
            }
        }
    }
}

fn arrow(code: KeyCode) -> char {
    match code {
        KeyCode::Up => '↑',
        KeyCode::Down => '↓',
        KeyCode::Left => '←',
        _ => '→',
    }
}

fn answer_box<'a>(kind: PuzzleKind) -> TextArea<'a> {
    let mut answer = TextArea::default();
    let (title, placeholder) = match kind {
        PuzzleKind::Text => (" Answer ", "Type your answer"),
        PuzzleKind::Code => (" Code ", "Enter the code"),
        PuzzleKind::Pattern => (" Pattern ", "Use the arrow keys"),
        PuzzleKind::Clock => (" Clock ", "HHMM, e.g. 0315"),
    };
    answer.set_block(Block::default().borders(Borders::ALL).title(title));
    answer.set_placeholder_text(placeholder);
    answer.set_cursor_line_style(Style::default());
    answer
}

fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn timer_color(seconds: u32) -> Color {
    if seconds > 120 {
        Color::Green
    } else if seconds > 60 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default().fg(Color::Cyan),
        Severity::Success => Style::default().fg(Color::Green),
        Severity::Warning => Style::default().fg(Color::Red),
    }
}

fn summary(snapshot: &Snapshot) -> String {
    let stats = &snapshot.stats;
    let headline = match snapshot.outcome {
        Outcome::Escaped => "=== YOU ESCAPED! ===",
        _ => "=== TIME IS UP ===",
    };
    format!(
        "{}\n\n\
        ╔══════════════════════════╗\n\
        ║  SESSION STATS           ║\n\
        ╠══════════════════════════╣\n\
        ║  Puzzles solved: {:>3}/{:<3}║\n\
        ║  Time left:       {:>6}  ║\n\
        ║  Time used:       {:>6}  ║\n\
        ║  Wrong answers:   {:>6}  ║\n\
        ║  Hints used:      {:>6}  ║\n\
        ║  Empty searches:  {:>6}  ║\n\
        ╚══════════════════════════╝\n\n\
        Press ENTER to return to the title screen",
        headline,
        snapshot.solved_total(),
        snapshot.hotspot_total(),
        format_clock(snapshot.remaining_seconds),
        format_clock(stats.elapsed_seconds + stats.penalty_seconds),
        stats.wrong_answers,
        stats.hints_used,
        stats.misses,
    )
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    match &cli.log_file {
        Some(path) => {
            let level = match cli.verbose {
                0 => LevelFilter::Info,
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            };
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            builder
                .filter_level(level)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Warn);
        }
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let catalog = RoomCatalog::load(&cli.rooms)?;
    if catalog.is_empty() {
        eprintln!("No rooms found in {:?}", cli.rooms);
        return Ok(());
    }
    info!("loaded {} rooms from {:?}", catalog.len(), cli.rooms);

    let mut app = App::new(catalog, cli.seed);
    if let Some(slug) = &cli.room {
        let room = app.catalog.by_slug(slug)?;
        app.open_room(room)?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result?;

    if !app.summary.is_empty() {
        println!("\n{}\n", app.summary.lines().next().unwrap_or_default());
    }
    Ok(())
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_frame = Instant::now();
    loop {
        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        app.update(now.duration_since(last_frame));
        last_frame = now;
    }
}

fn draw_ui(f: &mut Frame, app: &App) {
    match app.state {
        GameState::TitleScreen => draw_title_screen(f, app),
        GameState::Intro => draw_intro(f, app),
        GameState::Playing | GameState::Ended => {
            draw_room(f, app);
            if matches!(app.state, GameState::Ended) {
                draw_end_screen(f, app);
            }
        }
    }
}

fn draw_room(f: &mut Frame, app: &App) {
    let (Some(room), Some(snapshot)) = (app.room(), app.snapshot.as_ref()) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(6),
        ])
        .split(f.area());

    // Status bar
    let sub_room = &room.sub_rooms[snapshot.current_sub_room];
    let status = Line::from(vec![
        Span::styled(
            " ESCAPE ROOM ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", room.meta.title),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                " Room {}/{}: {} ",
                snapshot.current_sub_room + 1,
                snapshot.sub_rooms.len(),
                sub_room.name
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                " Solved: {}/{} ",
                snapshot.solved_total(),
                snapshot.hotspot_total()
            ),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", format_clock(snapshot.remaining_seconds)),
            Style::default()
                .fg(timer_color(snapshot.remaining_seconds))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let status_block = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status_block, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(main_chunks[0]);

    let hotspots: Vec<Line> = snapshot
        .hotspots
        .iter()
        .enumerate()
        .map(|(i, hotspot)| {
            let (marker, color) = if hotspot.solved {
                ("[x]", Color::Green)
            } else if !hotspot.accessible {
                ("[#]", Color::DarkGray)
            } else {
                ("[ ]", Color::White)
            };
            let stage = match hotspot.stage {
                Some(stage) if hotspot.stages > 1 => format!(" ({}/{})", stage + 1, hotspot.stages),
                _ => String::new(),
            };
            let mut style = Style::default().fg(color);
            if i == app.selected {
                style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(
                format!(" {} {}{} ", marker, hotspot.name, stage),
                style,
            ))
        })
        .collect();
    let scene = Paragraph::new(hotspots).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} [↑/↓ select | ENTER investigate | q leave] ", sub_room.name)),
    );
    f.render_widget(scene, left[0]);

    let inventory: Vec<Line> = if snapshot.inventory.is_empty() {
        vec![Line::styled(" (empty)", Style::default().fg(Color::DarkGray))]
    } else {
        snapshot
            .inventory
            .iter()
            .map(|entry| Line::from(format!(" • {}", entry.name)))
            .collect()
    };
    let inventory = Paragraph::new(inventory)
        .block(Block::default().borders(Borders::ALL).title(" Inventory "))
        .wrap(Wrap { trim: true });
    f.render_widget(inventory, left[1]);

    render_puzzle(f, app, snapshot, main_chunks[1]);

    let notices: Vec<Line> = app
        .notices
        .iter()
        .rev()
        .map(|n| Line::styled(n.message.clone(), severity_style(n.severity)))
        .collect();
    let notices = Paragraph::new(notices)
        .block(Block::default().borders(Borders::ALL).title(" Notices "))
        .wrap(Wrap { trim: false });
    f.render_widget(notices, chunks[2]);
}

fn render_puzzle(f: &mut Frame, app: &App, snapshot: &Snapshot, area: Rect) {
    let active = app.session.as_ref().and_then(|s| s.active_puzzle());
    let Some(active) = active else {
        let text = if snapshot.in_transition {
            "The way forward opens...\n\nPress ENTER to go through now."
        } else {
            "Pick something in the room and press ENTER to investigate it."
        };
        let idle = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" Puzzle "))
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(idle, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let mut lines = vec![Line::from(active.puzzle.question.as_str()), Line::raw("")];
    if active.hint_taken {
        lines.push(Line::styled(
            format!("HINT: {}", active.puzzle.hint),
            Style::default().fg(Color::Cyan),
        ));
    }
    let stage = if active.stages > 1 {
        format!(" ({}/{})", active.stage + 1, active.stages)
    } else {
        String::new()
    };
    let puzzle = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {}{} [ENTER submit | F1 hint | Esc close] ",
            active.hotspot.name, stage
        )))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));
    f.render_widget(puzzle, chunks[0]);
    f.render_widget(&app.answer, chunks[1]);
}

fn draw_intro(f: &mut Frame, app: &App) {
    let Some(room) = app.room() else {
        return;
    };
    let area = centered(f.area(), 70, 60);
    let text = vec![
        Line::styled(
            room.meta.title.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::from(room.meta.story.as_str()),
        Line::raw(""),
        Line::styled(
            format!(
                "Time limit: {}   Rooms: {}   Difficulty: {:?}",
                format_clock(room.meta.time_limit_seconds),
                room.sub_rooms.len(),
                room.meta.difficulty
            ),
            Style::default().fg(Color::Cyan),
        ),
        Line::raw(""),
        Line::styled(
            "ENTER to begin  •  Esc to go back",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let intro = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Briefing "))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);
    f.render_widget(intro, area);
}

fn draw_end_screen(f: &mut Frame, app: &App) {
    let escaped = app
        .snapshot
        .as_ref()
        .is_some_and(|s| s.outcome == Outcome::Escaped);
    let (style, title) = if escaped {
        (Style::default().fg(Color::Black).bg(Color::Green), " ESCAPED! ")
    } else {
        (Style::default().fg(Color::White).bg(Color::Red), " TIME'S UP ")
    };
    let area = centered(f.area(), 50, 60);
    f.render_widget(Clear, area);
    let message = Paragraph::new(app.summary.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center)
        .style(style);
    f.render_widget(message, area);
}

fn draw_title_screen(f: &mut Frame, app: &App) {
    let area = f.area();

    let title_art = r#"
    ╔═══════════════════════════════════════════════════════════╗
    ║                                                           ║
    ║        ███████╗███████╗ ██████╗ █████╗ ██████╗ ███████╗    ║
    ║        ██╔════╝██╔════╝██╔════╝██╔══██╗██╔══██╗██╔════╝    ║
    ║        █████╗  ███████╗██║     ███████║██████╔╝█████╗      ║
    ║        ██╔══╝  ╚════██║██║     ██╔══██║██╔═══╝ ██╔══╝      ║
    ║        ███████╗███████║╚██████╗██║  ██║██║     ███████╗    ║
    ║        ╚══════╝╚══════╝ ╚═════╝╚═╝  ╚═╝╚═╝     ╚══════╝    ║
    ║                                                           ║
    ║              "Find the way out before time runs out"      ║
    ║                                                           ║
    ╚═══════════════════════════════════════════════════════════╝
"#;

    let rooms = app.catalog.all();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(15),
            Constraint::Length(
                u16::try_from(rooms.len())
                    .unwrap_or(u16::MAX)
                    .saturating_add(2),
            ),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let menu: Vec<Line> = rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            let style = if i == app.menu_selection {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::styled(
                format!(
                    "  {}  ({:?}, {})  ",
                    room.meta.title,
                    room.meta.difficulty,
                    format_clock(room.meta.time_limit_seconds)
                ),
                style,
            )
        })
        .collect();
    let menu = Paragraph::new(menu).alignment(Alignment::Center);
    f.render_widget(menu, chunks[1]);

    let help = Paragraph::new("↑/↓ to select  •  ENTER to confirm  •  q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
