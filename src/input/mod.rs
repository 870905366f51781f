use macroquad::prelude::*;

use crate::application::Simulation;
use crate::domain::Pattern;
use crate::ui::{Action, Button, panel_x};

/// Map a screen position to the cell under it, for a field drawn at the origin.
pub fn cell_at(
    mouse_pos: (f32, f32),
    cell_px: usize,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let (mx, my) = mouse_pos;
    if mx < 0.0 || my < 0.0 || cell_px == 0 {
        return None;
    }
    let x = mx as usize / cell_px;
    let y = my as usize / cell_px;
    (x < width && y < height).then_some((x, y))
}

/// Next pattern in the cycle None -> 0 -> 1 -> ... -> None
pub fn next_pattern(current: Option<usize>, count: usize) -> Option<usize> {
    match current {
        None if count > 0 => Some(0),
        Some(i) if i + 1 < count => Some(i + 1),
        _ => None,
    }
}

/// Left click toggles a cell or stamps the pending pattern; right click or
/// Escape leaves placement mode.
pub fn handle_field_click(
    state: &mut Simulation,
    patterns: &[Pattern],
    cell_px: usize,
    mouse_pos: (f32, f32),
) {
    if state.pending_pattern_index.is_some()
        && (is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape))
    {
        state.pending_pattern_index = None;
        return;
    }
    if !is_mouse_button_pressed(MouseButton::Left) || mouse_pos.0 >= panel_x() {
        return;
    }

    let (width, height) = (state.engine().width(), state.engine().height());
    let Some((x, y)) = cell_at(mouse_pos, cell_px, width, height) else {
        return;
    };

    let result = match state.pending_pattern_index.and_then(|i| patterns.get(i)) {
        Some(pattern) => state.place_pattern(pattern, x, y),
        None => state.toggle_cell(x, y).map(|_| ()),
    };
    match result {
        Ok(()) => state.status = None,
        Err(err) => state.report(err),
    }
}

/// Apply keyboard shortcuts
pub fn process_keyboard_input(state: Simulation) -> Simulation {
    type KeyAction = (KeyCode, fn(Simulation) -> Simulation);

    let actions: [KeyAction; 8] = [
        (KeyCode::Space, Simulation::toggle_running),
        (KeyCode::N, Simulation::manual_step),
        (KeyCode::C, Simulation::clear),
        (KeyCode::R, Simulation::randomize),
        (KeyCode::M, Simulation::toggle_mode),
        (KeyCode::U, Simulation::cycle_rule),
        (KeyCode::Up, |s| s.adjust_speed(1.0)),
        (KeyCode::Down, |s| s.adjust_speed(-1.0)),
    ];

    actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    })
}

/// Apply the action of whichever panel button was clicked
pub fn process_button_clicks(
    state: Simulation,
    buttons: &[Button],
    pattern_count: usize,
    mouse_pos: (f32, f32),
) -> Simulation {
    buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .fold(state, |mut s, btn| match btn.action {
            Action::StartStop => s.toggle_running(),
            Action::Step => s.manual_step(),
            Action::Clear => s.clear(),
            Action::Randomize => s.randomize(),
            Action::Mode => s.toggle_mode(),
            Action::Rule => s.cycle_rule(),
            Action::Pattern => {
                s.pending_pattern_index = next_pattern(s.pending_pattern_index, pattern_count);
                s
            }
        })
}
