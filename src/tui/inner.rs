// src/tui/inner.rs  —  ratatui layout
use anyhow::Result;
use crossterm::{execute, terminal::{self, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use crate::app::{App, Focus};
use crate::form::Mode;
use std::io::stdout;

const CURSOR: &str = "▏";

pub struct Tui {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen)?;
        let backend  = CrosstermBackend::new(out);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }

    pub fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),       // header / mode
                    Constraint::Percentage(50),  // statements or JSON editor
                    Constraint::Length(3),       // language + translate
                    Constraint::Min(4),          // result
                    Constraint::Length(1),       // footer hints
                ])
                .split(area);

            draw_header(f, chunks[0], app);
            match app.form.state().mode {
                Mode::Form => draw_statements(f, chunks[1], app),
                Mode::Json => draw_json_editor(f, chunks[1], app),
            }
            draw_controls(f, chunks[2], app);
            draw_result(f, chunks[3], app);

            let hints = match app.form.state().mode {
                Mode::Form => " Tab = next field   Ctrl+N = add   Ctrl+D = remove   F2 = JSON input   Ctrl+S = translate   Esc = quit",
                Mode::Json => " Tab = next field   F2 = form input   Ctrl+S = translate   Esc = quit",
            };
            f.render_widget(
                Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
                chunks[4],
            );

            if let Some(msg) = &app.alert {
                draw_alert(f, area, msg);
            }
        })?;
        Ok(())
    }
}

fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let mode = app.form.state().mode;
    let radio = |m: Mode, label: &'static str| {
        let mark = if mode == m { "(•) " } else { "( ) " };
        Span::styled(
            format!("{mark}{label}   "),
            if mode == m {
                Style::default().fg(Color::Black).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Black)
            },
        )
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Statement Translator  |  ", Style::default().fg(Color::Black).add_modifier(Modifier::BOLD)),
        radio(Mode::Form, "Form Input"),
        radio(Mode::Json, "JSON Input"),
        Span::styled(format!("|  {}", app.base_url), Style::default().fg(Color::Black)),
    ]))
    .style(Style::default().bg(Color::Cyan))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_statements(f: &mut Frame, area: Rect, app: &App) {
    let st = app.form.state();
    let mut lines: Vec<Line> = Vec::new();
    let mut focus_line = 0usize;
    for (i, s) in st.statements.iter().enumerate() {
        let focused = app.focus == Focus::Statement(i);
        if focused { focus_line = lines.len(); }
        lines.push(Line::from(Span::styled(
            format!("Text {}:", s.id),
            border(focused).add_modifier(Modifier::BOLD),
        )));
        let mut value = s.value.clone();
        if focused { value.push_str(CURSOR); }
        if value.is_empty() {
            lines.push(Line::from(Span::styled("  Enter your text...", Style::default().fg(Color::DarkGray))));
        } else {
            lines.extend(value.split('\n').map(|l| Line::from(format!("  {l}"))));
        }
        lines.push(Line::from(""));
    }

    // Keep the focused statement's label on screen
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = focus_line.saturating_sub(visible.saturating_sub(3));
    let any_focused = matches!(app.focus, Focus::Statement(_));

    let block = Paragraph::new(lines)
        .block(Block::default()
            .title(format!(" Statements ({}) ", st.statements.len()))
            .borders(Borders::ALL)
            .border_style(border(any_focused)))
        .scroll((scroll as u16, 0));
    f.render_widget(block, area);
}

fn draw_json_editor(f: &mut Frame, area: Rect, app: &App) {
    let st = app.form.state();
    let focused = app.focus == Focus::JsonEditor;
    let mut text = st.raw_json.clone();
    if focused { text.push_str(CURSOR); }

    let mut block = Block::default()
        .title(" Enter JSON Object ")
        .borders(Borders::ALL)
        .border_style(if st.json_valid { border(focused) } else { Style::default().fg(Color::Red) });
    if let Some(err) = &st.json_error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" ⚠ {} ", err.inline_message()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let para = if st.raw_json.is_empty() && !focused {
        Paragraph::new(Span::styled(r#"{"key1":"Hello","key2":"World"}"#, Style::default().fg(Color::DarkGray)))
    } else {
        Paragraph::new(text)
    };
    f.render_widget(para.block(block).wrap(Wrap { trim: false }), area);
}

fn draw_controls(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let lang_focused = app.focus == Focus::Language;
    let lang = Paragraph::new(Line::from(vec![
        Span::raw(" ◀ "),
        Span::styled(app.form.state().target_language.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ▶"),
    ]))
    .block(Block::default()
        .title(" Target Language ")
        .borders(Borders::ALL)
        .border_style(border(lang_focused)));
    f.render_widget(lang, cols[0]);

    let enabled = app.form.can_submit();
    let label = if app.form.state().busy { "Translating..." } else { "Translate" };
    let style = if enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(Span::styled(format!("[ {label} ]"), style))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(border(app.focus == Focus::Translate)));
    f.render_widget(button, cols[1]);
}

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
    let Some(text) = app.result_text() else { return };
    let para = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Translated Text ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)))
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn draw_alert(f: &mut Frame, area: Rect, msg: &str) {
    let w = area.width.min(60);
    let h = 7.min(area.height);
    let rect = Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    };
    let body = vec![
        Line::from(msg.to_string()),
        Line::from(""),
        Line::from(Span::styled("Enter = OK", Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(body)
            .block(Block::default()
                .title(" Alert ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)))
            .wrap(Wrap { trim: true }),
        rect,
    );
}
