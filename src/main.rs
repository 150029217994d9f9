use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, KeyEvent, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use ravyz::api::Outbox;
use ravyz::app::{App, AppMirrors};
use ravyz::config::Config;
use ravyz::input::{pixel_to_cell, ClickState, InputEvent};
use ravyz::logging;
use ravyz::time::FrameClock;

/// Convert page pixel coordinates to a grid cell using the grid container's
/// bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    let event = match key.code {
        KeyCode::Char(c) => InputEvent::Key(c),
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Enter => InputEvent::Enter,
        KeyCode::Tab if key.shift => InputEvent::BackTab,
        KeyCode::Tab => InputEvent::Tab,
        KeyCode::Up => InputEvent::Up,
        KeyCode::Down => InputEvent::Down,
        KeyCode::Left => InputEvent::Left,
        KeyCode::Right => InputEvent::Right,
        KeyCode::Esc => InputEvent::Esc,
        KeyCode::F(n) => InputEvent::F(n),
        _ => return None,
    };
    Some(event)
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn page_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::DEBUG);

    let config = Config::from_query(&page_query());
    tracing::info!(?config, "starting");

    let mirrors = AppMirrors::platform(&config);
    let outbox = Outbox::platform(config.api_base.clone());
    let app = Rc::new(RefCell::new(App::new(config, mirrors, outbox)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let hit = cs.hit_test(col, row);
            drop(cs);

            tracing::debug!(col, row, ?hit, "click");
            if let Some(action_id) = hit {
                app.borrow_mut().handle_input(InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            if let Some(event) = map_key(&key_event) {
                app.borrow_mut().handle_input(event);
            }
        }
    });

    let mut clock = FrameClock::new();
    terminal.draw_web(move |f| {
        let delta = clock.update(now_ms());
        app.borrow_mut().tick(delta);
        app.borrow().render(f, &click_state);
    });

    Ok(())
}
