//! Accounts TUI - actor-based client for the accounts backend
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - screen state machine processing events
//! - Store Layer (Tokio) - async HTTP calls and observable account state

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use accounts_tui::app::state::AccountDialog;
use accounts_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use accounts_tui::messages::ui_events::{key_to_ui_event, DialogField, InputMode};
use accounts_tui::messages::{RenderState, UiEvent};
use accounts_tui::ui::{account_line, centered_rect, outcome_style, render_input};
use accounts_tui::{create_client, AccountStore, AppActor, Config, HttpAccountClient};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    tracing::info!(base_url = %config.base_url, version = APP_VERSION, "Starting");

    let api = HttpAccountClient::new(create_client(config.timeout_secs), &config.base_url)?;
    let store = AccountStore::new(Arc::new(api));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn app actor
    let app_actor = AppActor::new(store, &config, render_tx);
    let app_task = tokio::spawn(app_actor.run(ui_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    let _ = app_task.await;
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.input_mode, current_state.show_help)
                {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Account list
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, chunks[0]);
    draw_account_list(f, state, chunks[1]);
    draw_status_bar(f, state, chunks[2]);

    if let Some(dialog) = &state.dialog {
        draw_dialog(f, dialog, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(
            format!(" {} ", state.base_url),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_account_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = format!(" Accounts ({}) ", state.accounts.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    if state.accounts.is_empty() {
        let hint = if state.is_loading {
            "Loading accounts..."
        } else {
            "No accounts yet. Press 'a' to add one."
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .accounts
        .iter()
        .map(|account| ListItem::new(account_line(account)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = if let Some(toast) = &state.toast {
        Paragraph::new(format!(" {} ", toast.outcome.message()))
            .style(outcome_style(&toast.outcome))
    } else {
        let text = if state.is_loading {
            " Loading... "
        } else if state.input_mode == InputMode::Dialog {
            " Tab:next field | Enter:save | Esc:cancel "
        } else {
            " a:add | e:edit | d:delete | space:toggle | r:reload | ?:help | q:quit "
        };
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
    };
    f.render_widget(bar, area);
}

fn draw_dialog(f: &mut Frame, dialog: &AccountDialog, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(dialog.title())
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let fields = [DialogField::Name, DialogField::Balance, DialogField::Currency];
    for (field, row) in fields.iter().zip(rows.iter()) {
        let focused = *field == dialog.field;
        let value = dialog.value(*field);
        f.render_widget(render_input(value, field.label(), focused), *row);

        if focused {
            let max_x = row.x + row.width.saturating_sub(2);
            let cursor_x = (row.x + value.chars().count() as u16 + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, row.y + 1));
        }
    }

    let hint = Paragraph::new(" Enter:save  Esc:cancel  Tab:next field ")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, rows[3]);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 ACCOUNTS TUI - Keyboard Shortcuts

 LIST
   ↑ / ↓  (k / j)     Select account
   a                  Add account
   e / Enter          Edit selected account
   d / Delete         Delete selected account
   Space / t          Toggle active status
   r                  Reload from server

 DIALOG
   Tab / Shift+Tab    Next / previous field
   Enter              Save
   Esc                Cancel

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
