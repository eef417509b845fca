//! Live terminal preview.
//!
//! Projects the render model onto the user's terminal with ratatui: the
//! preview sink redraws on every emitted frame and sleeps the scaled hold,
//! so the animation plays at wall-clock speed while crossterm keeps the
//! terminal sane.

use std::io::{self, Stdout};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use unicode_width::UnicodeWidthStr;

use crate::ansi::{self, Rgb};
use crate::engine::{scale_hold, FrameSink, Simulation};
use crate::model::{LineKind, Preset, RenderModel};
use crate::raster::Theme;

/// Separator between the prompt path and the command, as in the raster
/// renderer.
const PROMPT_SEPARATOR: &str = " $ ";

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn span_style(seg_style: ansi::Style, theme: &Theme) -> Style {
    let mut style = Style::default().fg(to_color(seg_style.fg.unwrap_or(theme.default_fg)));
    if let Some(bg) = seg_style.bg {
        style = style.bg(to_color(bg));
    }
    if seg_style.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if seg_style.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Project the render model into styled ratatui lines.
///
/// Newlines inside a segment split the display line, matching the raster
/// renderer's forced breaks.
pub fn model_to_text(model: &RenderModel, theme: &Theme) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for record in model.lines() {
        let mut spans: Vec<Span<'static>> = Vec::new();
        if record.kind == LineKind::Prompt {
            spans.push(Span::styled(
                record.path.clone(),
                Style::default().fg(to_color(theme.accent)),
            ));
            spans.push(Span::styled(
                PROMPT_SEPARATOR,
                Style::default().fg(to_color(theme.secondary)),
            ));
        }
        for segment in ansi::parse(&record.raw_text) {
            let style = span_style(segment.style, theme);
            let mut pieces = segment.text.split('\n');
            if let Some(first) = pieces.next() {
                if !first.is_empty() {
                    spans.push(Span::styled(first.to_string(), style));
                }
            }
            for piece in pieces {
                lines.push(Line::from(std::mem::take(&mut spans)));
                if !piece.is_empty() {
                    spans.push(Span::styled(piece.to_string(), style));
                }
            }
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

/// Estimate how many display rows `text` occupies at `width` columns,
/// accounting for soft wrapping.
fn wrapped_rows(text: &Text<'_>, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.lines
        .iter()
        .map(|line| {
            let cols: usize = line.spans.iter().map(|s| s.content.width()).sum();
            ((cols.max(1) + width - 1) / width) as u16
        })
        .sum()
}

/// Real-time frame sink drawing to the terminal.
struct PreviewSink<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    time_scale: f64,
}

impl PreviewSink<'_> {
    fn render(&mut self, model: &RenderModel, footer: &str) -> Result<()> {
        let text = model_to_text(model, &self.theme);
        self.terminal.draw(|frame| {
            let [screen, status] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

            let inner_width = screen.width.saturating_sub(2);
            let inner_height = screen.height.saturating_sub(2);
            let scroll = wrapped_rows(&text, inner_width).saturating_sub(inner_height);

            let paragraph = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title(" tgm "))
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0));
            frame.render_widget(paragraph, screen);

            let status_line = Paragraph::new(Line::from(Span::styled(
                footer.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(status_line, status);
        })?;
        Ok(())
    }
}

impl FrameSink for PreviewSink<'_> {
    fn frame(&mut self, model: &RenderModel, hold: Duration) -> Result<()> {
        self.render(model, "simulating...")?;
        thread::sleep(scale_hold(hold, self.time_scale));
        Ok(())
    }
}

/// Play the preset's timeline as a live preview in the current terminal.
///
/// Blocks until the run completes and the user presses a key.
#[cfg(not(tarpaulin_include))]
pub fn run_preview(preset: &Preset) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        bail!("Preview needs an interactive terminal (stdout is not a TTY)");
    }
    if let Some((terminal_size::Width(w), terminal_size::Height(h))) = terminal_size::terminal_size()
    {
        if w < 20 || h < 6 {
            bail!("Terminal too small for preview ({}x{}, need at least 20x6)", w, h);
        }
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to build terminal")?;

    let result = play(&mut terminal, preset);

    // Restore the terminal even when the run failed.
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    result
}

#[cfg(not(tarpaulin_include))]
fn play(terminal: &mut Terminal<CrosstermBackend<Stdout>>, preset: &Preset) -> Result<()> {
    let theme = Theme::by_name(&preset.settings.theme);
    let mut sink = PreviewSink {
        terminal,
        theme,
        time_scale: 1.0,
    };

    let simulation = Simulation::new();
    simulation.run(&preset.steps, &preset.settings, &mut sink)?;

    sink.render(&simulation.model(), "done - press any key to exit")?;
    loop {
        if let Event::Key(_) = event::read().context("failed to read terminal event")? {
            break;
        }
    }
    Ok(())
}
