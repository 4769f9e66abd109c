//! raqam-tui - Terminal form for validating and generating national IDs
//!
//! The single UI over raqam-core: a validate screen with live feedback
//! and a generate form with governorate dropdown, checksum toggle, and
//! a preview that re-renders on every keystroke.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

use raqam_core::{Config, Gender, Governorate, NationalId};

#[derive(Parser)]
#[command(name = "raqam-tui")]
#[command(about = "Terminal form for national ID validation and generation")]
#[command(version)]
struct Cli {
    /// Open in generate mode instead of validate mode
    #[arg(short, long)]
    generate: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run_tui(cli.generate)
}

fn run_tui(start_in_generate: bool) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let config = Config::load(&Config::default_path()?)?;
    let mut app = App::new(config, start_in_generate);

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    const TICK_RATE: Duration = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            let action = parse_key_action(key);
            if app.handle_key_action(action) {
                return Ok(());
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppMode {
    Validate,
    Generate,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    BackTab,
    Escape,
    Backspace,
    Char(char),
    Noop,
}

fn parse_key_action(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Up => KeyAction::Up,
        KeyCode::Down => KeyAction::Down,
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::Enter => KeyAction::Enter,
        KeyCode::Tab => KeyAction::Tab,
        KeyCode::BackTab => KeyAction::BackTab,
        KeyCode::Esc => KeyAction::Escape,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(c) => KeyAction::Char(c),
        _ => KeyAction::Noop,
    }
}

/// Form field in generate mode, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    BirthDate,
    Governorate,
    Serial,
    Gender,
    GenderDigit,
    Checksum,
}

impl FormField {
    fn next(self) -> FormField {
        match self {
            FormField::BirthDate => FormField::Governorate,
            FormField::Governorate => FormField::Serial,
            FormField::Serial => FormField::Gender,
            FormField::Gender => FormField::GenderDigit,
            FormField::GenderDigit => FormField::Checksum,
            FormField::Checksum => FormField::BirthDate,
        }
    }

    fn previous(self) -> FormField {
        match self {
            FormField::BirthDate => FormField::Checksum,
            FormField::Governorate => FormField::BirthDate,
            FormField::Serial => FormField::Governorate,
            FormField::Gender => FormField::Serial,
            FormField::GenderDigit => FormField::Gender,
            FormField::Checksum => FormField::GenderDigit,
        }
    }
}

const MALE_DIGITS: [u8; 5] = [1, 3, 5, 7, 9];
const FEMALE_DIGITS: [u8; 4] = [2, 4, 6, 8];

struct GenerateForm {
    birth_date: String,
    governorate_idx: usize,
    serial: String,
    gender: Gender,
    gender_digit: u8,
    with_checksum: bool,
    selected_field: FormField,
}

impl GenerateForm {
    fn from_config(config: &Config) -> Self {
        let governorate_idx = Governorate::ALL
            .iter()
            .position(|g| g.code() == config.default_governorate)
            .unwrap_or(0);
        let gender = Gender::from_digit(config.default_gender_digit);
        Self {
            birth_date: String::new(),
            governorate_idx,
            serial: config.default_serial.clone(),
            gender,
            gender_digit: config.default_gender_digit,
            with_checksum: config.compute_checksum,
            selected_field: FormField::BirthDate,
        }
    }

    fn governorate(&self) -> Governorate {
        Governorate::ALL[self.governorate_idx]
    }

    fn digits(&self) -> &'static [u8] {
        match self.gender {
            Gender::Male => &MALE_DIGITS,
            Gender::Female => &FEMALE_DIGITS,
        }
    }

    fn toggle_gender(&mut self) {
        self.gender = match self.gender {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        };
        self.gender_digit = self.digits()[0];
    }

    fn cycle_gender_digit(&mut self, up: bool) {
        let digits = self.digits();
        let current = digits
            .iter()
            .position(|&d| d == self.gender_digit)
            .unwrap_or(0);
        let next = if up {
            (current + digits.len() - 1) % digits.len()
        } else {
            (current + 1) % digits.len()
        };
        self.gender_digit = digits[next];
    }

    fn cycle_governorate(&mut self, up: bool) {
        let len = Governorate::ALL.len();
        self.governorate_idx = if up {
            (self.governorate_idx + len - 1) % len
        } else {
            (self.governorate_idx + 1) % len
        };
    }

    fn parsed_birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d").ok()
    }

    /// The live preview line, re-evaluated on every keystroke
    fn preview(&self) -> String {
        match self.parsed_birth_date() {
            Some(date) => raqam_core::preview(
                date,
                self.governorate().code(),
                &self.serial,
                Some(self.gender_digit),
                self.with_checksum,
            ),
            None => "*".repeat(14),
        }
    }
}

struct App {
    mode: AppMode,
    previous_mode: AppMode,

    validate_input: String,
    validate_result: Option<raqam_core::Result<NationalId>>,

    form: GenerateForm,
    generated: Option<NationalId>,

    status_message: Option<String>,
    status_message_time: Option<Instant>,

    config: Config,
}

impl App {
    fn new(config: Config, start_in_generate: bool) -> Self {
        let mode = if start_in_generate {
            AppMode::Generate
        } else {
            AppMode::Validate
        };
        Self {
            mode,
            previous_mode: mode,
            validate_input: String::new(),
            validate_result: None,
            form: GenerateForm::from_config(&config),
            generated: None,
            status_message: None,
            status_message_time: None,
            config,
        }
    }

    fn show_status(&mut self, msg: String) {
        self.status_message = Some(msg);
        self.status_message_time = Some(Instant::now());
    }

    fn on_tick(&mut self) {
        if let Some(time) = self.status_message_time
            && time.elapsed() > Duration::from_secs(4)
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }

    /// Returns true when the app should quit
    fn handle_key_action(&mut self, action: KeyAction) -> bool {
        match self.mode {
            AppMode::Validate => self.handle_validate_mode(action),
            AppMode::Generate => self.handle_generate_mode(action),
            AppMode::Help => self.handle_help_mode(action),
        }
    }

    fn handle_validate_mode(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit | KeyAction::Char('q') => return true,
            KeyAction::Char('g') => self.mode = AppMode::Generate,
            KeyAction::Char('?') => {
                self.previous_mode = self.mode;
                self.mode = AppMode::Help;
            }
            KeyAction::Escape => {
                self.validate_input.clear();
                self.validate_result = None;
            }
            KeyAction::Backspace => {
                self.validate_input.pop();
                self.revalidate();
            }
            KeyAction::Char(c) if c.is_ascii_digit() => {
                if self.validate_input.len() < 14 {
                    self.validate_input.push(c);
                    self.revalidate();
                }
            }
            _ => {}
        }
        false
    }

    fn revalidate(&mut self) {
        if self.validate_input.is_empty() {
            self.validate_result = None;
        } else {
            self.validate_result = Some(NationalId::parse(&self.validate_input));
        }
    }

    fn handle_generate_mode(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit | KeyAction::Char('q') => return true,
            KeyAction::Char('v') => self.mode = AppMode::Validate,
            KeyAction::Char('?') => {
                self.previous_mode = self.mode;
                self.mode = AppMode::Help;
            }
            KeyAction::Escape => {
                self.form = GenerateForm::from_config(&self.config);
                self.generated = None;
            }
            KeyAction::Tab => self.form.selected_field = self.form.selected_field.next(),
            KeyAction::BackTab => self.form.selected_field = self.form.selected_field.previous(),
            KeyAction::Enter => self.submit_form(),
            KeyAction::Up | KeyAction::Down => {
                let up = action == KeyAction::Up;
                match self.form.selected_field {
                    FormField::Governorate => self.form.cycle_governorate(up),
                    FormField::Gender => self.form.toggle_gender(),
                    FormField::GenderDigit => self.form.cycle_gender_digit(up),
                    FormField::Checksum => self.form.with_checksum = !self.form.with_checksum,
                    _ => {}
                }
            }
            KeyAction::Left | KeyAction::Right => match self.form.selected_field {
                FormField::Gender => self.form.toggle_gender(),
                FormField::Checksum => self.form.with_checksum = !self.form.with_checksum,
                _ => {}
            },
            KeyAction::Backspace => match self.form.selected_field {
                FormField::BirthDate => {
                    self.form.birth_date.pop();
                }
                FormField::Serial => {
                    self.form.serial.pop();
                }
                _ => {}
            },
            KeyAction::Char(' ') => {
                if self.form.selected_field == FormField::Checksum {
                    self.form.with_checksum = !self.form.with_checksum;
                }
            }
            KeyAction::Char(c) => match self.form.selected_field {
                FormField::BirthDate if (c.is_ascii_digit() || c == '-') => {
                    if self.form.birth_date.len() < 10 {
                        self.form.birth_date.push(c);
                    }
                }
                FormField::Serial if c.is_ascii_digit() => {
                    if self.form.serial.len() < 3 {
                        self.form.serial.push(c);
                    }
                }
                _ => {}
            },
            _ => {}
        }
        false
    }

    fn submit_form(&mut self) {
        let Some(date) = self.form.parsed_birth_date() else {
            self.show_status("Birth date must be YYYY-MM-DD".to_string());
            return;
        };
        if self.form.serial.len() != 3 {
            self.show_status("Serial must be 3 digits".to_string());
            return;
        }
        if !self.form.with_checksum {
            self.show_status("Checksum off: preview only, no complete ID".to_string());
            return;
        }
        match raqam_core::generate(
            date,
            self.form.governorate().code(),
            &self.form.serial,
            self.form.gender_digit,
        ) {
            Ok(id) => {
                self.show_status(format!("Generated {}", id.as_str()));
                self.generated = Some(id);
            }
            Err(err) => self.show_status(err.to_string()),
        }
    }

    fn handle_help_mode(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => return true,
            KeyAction::Escape | KeyAction::Enter | KeyAction::Char('?') | KeyAction::Char('q') => {
                self.mode = self.previous_mode;
            }
            _ => {}
        }
        false
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_title_bar(f, app, chunks[0]);

    let screen = if app.mode == AppMode::Help {
        app.previous_mode
    } else {
        app.mode
    };
    match screen {
        AppMode::Validate => render_validate(f, app, chunks[1]),
        _ => render_generate(f, app, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_overlay(f);
    }
}

fn render_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray))
        }
    };

    let active = if app.mode == AppMode::Help {
        app.previous_mode
    } else {
        app.mode
    };

    let line = Line::from(vec![
        Span::styled(
            " raqam ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        tab("[v] Validate", active == AppMode::Validate),
        tab("[g] Generate", active == AppMode::Generate),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_validate(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(&app.validate_input),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(
                "National ID ({}/14 digits)",
                app.validate_input.len()
            )),
    );
    f.render_widget(input, chunks[0]);

    let body = match &app.validate_result {
        None => vec![Line::from(Span::styled(
            "Type a 14-digit national ID to validate it.",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(Ok(id)) => decomposition_lines(id, &app.config),
        Some(Err(err)) => vec![
            Line::from(vec![
                Span::styled(
                    "✗ Invalid: ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(err.to_string()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                if app.validate_input.len() < 14 {
                    "Keep typing - the ID is re-checked on every keystroke."
                } else {
                    "Check the digits and try again."
                },
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    let result = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title("Result"))
        .wrap(Wrap { trim: true });
    f.render_widget(result, chunks[1]);
}

fn decomposition_lines(id: &NationalId, config: &Config) -> Vec<Line<'static>> {
    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));
    vec![
        Line::from(Span::styled(
            "✓ Structurally valid",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            label("ID:           "),
            Span::styled(id.as_str().to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            label("Birth date:   "),
            Span::raw(
                id.birth_date()
                    .format(&config.display.date_format)
                    .to_string(),
            ),
        ]),
        Line::from(vec![
            label("Governorate:  "),
            Span::raw(format!("{} ({})", id.governorate(), id.governorate().code())),
        ]),
        Line::from(vec![
            label("Serial:       "),
            Span::raw(id.serial().to_string()),
        ]),
        Line::from(vec![
            label("Gender:       "),
            Span::raw(format!("{} (digit {})", id.gender(), id.gender_digit())),
        ]),
        Line::from(vec![
            label("Check digit:  "),
            Span::raw(id.check_digit().to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Structural validity only - not proof the ID was issued.",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn render_generate(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(f, app, chunks[0]);
    render_preview_pane(f, app, chunks[1]);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let field_style = |field: FormField| {
        if form.selected_field == field {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let hint = |s: &'static str| {
        if app.config.display.show_hints {
            Span::styled(s, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw("")
        }
    };

    let cursor = |field: FormField| {
        if form.selected_field == field {
            Span::styled("_", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw("")
        }
    };

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Birth date:   ", field_style(FormField::BirthDate)),
            Span::raw(form.birth_date.clone()),
            cursor(FormField::BirthDate),
            hint("  (YYYY-MM-DD)"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Governorate:  ", field_style(FormField::Governorate)),
            Span::styled(
                format!("[{} - {}]", form.governorate().code(), form.governorate()),
                field_style(FormField::Governorate),
            ),
            hint("  (↑/↓ to change)"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Serial:       ", field_style(FormField::Serial)),
            Span::raw(form.serial.clone()),
            cursor(FormField::Serial),
            hint("  (3 digits, civil registry)"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Gender:       ", field_style(FormField::Gender)),
            Span::styled(
                format!("[{}]", form.gender),
                field_style(FormField::Gender),
            ),
            hint("  (←/→ to toggle)"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Gender digit: ", field_style(FormField::GenderDigit)),
            Span::styled(
                format!("[{}]", form.gender_digit),
                field_style(FormField::GenderDigit),
            ),
            hint("  (odd male, even female)"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Checksum:     ", field_style(FormField::Checksum)),
            Span::styled(
                if form.with_checksum { "[x]" } else { "[ ]" },
                field_style(FormField::Checksum),
            ),
            hint("  (space to toggle)"),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Generate  "),
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::raw(" Next field  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Reset"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title("Generate"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_preview_pane(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Live preview",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.form.preview(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "* marks positions that are not settled yet.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(id) = &app.generated {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Generated",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        for line in decomposition_lines(id, &app.config) {
            lines.push(line);
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref msg) = app.status_message {
        Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            " v validate · g generate · Tab fields · ? help · q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  v          Validate mode"),
        Line::from("  g          Generate mode"),
        Line::from("  Tab/S-Tab  Next / previous field"),
        Line::from("  ↑/↓        Change dropdown value"),
        Line::from("  ←/→        Toggle gender / checksum"),
        Line::from("  Space      Toggle checksum (on its field)"),
        Line::from("  Enter      Generate the ID"),
        Line::from("  Esc        Clear input / reset form"),
        Line::from("  q, Ctrl-C  Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Validation runs on every keystroke; the preview shows `*`",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "for positions that are not settled yet.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Esc] Close",
            Style::default().fg(Color::Green),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .style(Style::default().bg(Color::Black))
                .title("Help"),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
