//! Terminal driver for the picker state machine.
//!
//! Owns the terminal exclusively for the duration of one [`pick`] call:
//! raw mode plus the alternate screen, restored on every exit path. The
//! only suspension point is the blocking wait for the next key press.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::{Frame, Terminal};

use super::{Picker, PickerEvent, Selection, Theme};

/// Run one interactive selection over `candidates`.
///
/// An empty candidate list returns an empty, non-cancelled selection
/// immediately, without touching the terminal.
pub fn pick(title: &str, candidates: Vec<String>, theme: &Theme) -> Result<Selection> {
    if candidates.is_empty() {
        tracing::info!(title, "candidate list is empty, nothing to pick");
        return Ok(Selection::empty());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(err) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(err.into());
        }
    };

    // Restore the terminal if rendering panics mid-pick.
    let original_hook = install_panic_hook();

    let mut picker = Picker::new(candidates);
    let outcome = run_picker(&mut terminal, &mut picker, title, theme);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    restore_panic_hook(original_hook);

    outcome
}

type PanicHook = dyn Fn(&std::panic::PanicHookInfo<'_>) + Send + Sync;

/// Swap in a panic hook that restores the terminal before delegating to
/// whatever hook was installed; hands the previous hook back so it can
/// be reinstalled once the terminal is released.
fn install_panic_hook() -> Arc<PanicHook> {
    let original: Arc<PanicHook> = Arc::from(std::panic::take_hook());
    let chained = Arc::clone(&original);
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        chained(panic);
    }));
    original
}

/// Put the previously installed hook back.
fn restore_panic_hook(original: Arc<PanicHook>) {
    let _ = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| original(panic)));
}

fn run_picker(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    picker: &mut Picker,
    title: &str,
    theme: &Theme,
) -> Result<Selection> {
    let mut list_state = ListState::default();

    loop {
        list_state.select(Some(picker.highlighted()));
        terminal.draw(|frame| render(frame, picker, title, theme, &mut list_state))?;

        // Blocking wait: nothing else happens until the next input event.
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(input) = map_key(key) else {
            continue;
        };
        if let Some(outcome) = picker.handle(input) {
            return Ok(outcome);
        }
    }
}

/// Map a key press onto a picker event.
fn map_key(key: KeyEvent) -> Option<PickerEvent> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(PickerEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(PickerEvent::Quit)
        }
        KeyCode::Down | KeyCode::Char('j') => Some(PickerEvent::MoveDown),
        KeyCode::Up | KeyCode::Char('k') => Some(PickerEvent::MoveUp),
        KeyCode::Tab | KeyCode::Char(' ') => Some(PickerEvent::Toggle),
        KeyCode::Enter => Some(PickerEvent::Confirm),
        _ => None,
    }
}

fn render(
    frame: &mut Frame,
    picker: &Picker,
    title: &str,
    theme: &Theme,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = picker
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let line = if picker.is_selected(index) {
                Line::from(vec![
                    Span::styled("✔ ", Style::default().fg(theme.marked)),
                    Span::raw(row.as_str()),
                ])
            } else {
                Line::from(format!("  {row}"))
            };
            ListItem::new(line)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(format!(" {title} "), theme.title));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.highlight)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, frame.area(), list_state);
}
