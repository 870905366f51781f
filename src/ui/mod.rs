mod button;

pub use button::{Action, Button};

use macroquad::prelude::screen_width;

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 34.0;
pub const BUTTON_GAP: f32 = 8.0;
pub const PANEL_TOP: f32 = 16.0;

/// Side of one cell on screen, in pixels
pub const CELL_PX: usize = 8;

/// Field the window opens with
pub const FIELD_WIDTH: usize = 100;
pub const FIELD_HEIGHT: usize = 90;

/// Panel buttons, top to bottom
pub const ACTIONS: [Action; 7] = [
    Action::StartStop,
    Action::Step,
    Action::Clear,
    Action::Randomize,
    Action::Mode,
    Action::Rule,
    Action::Pattern,
];

/// Left edge of the control panel
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Where the text block below the buttons starts
pub fn info_top() -> f32 {
    PANEL_TOP + ACTIONS.len() as f32 * (BUTTON_HEIGHT + BUTTON_GAP) + 12.0
}

/// Create one button per action in a vertical stack
pub fn create_buttons() -> Vec<Button> {
    let px = panel_x() + 10.0;
    ACTIONS
        .iter()
        .enumerate()
        .map(|(i, &action)| {
            let y = PANEL_TOP + i as f32 * (BUTTON_HEIGHT + BUTTON_GAP);
            Button::new(px, y, PANEL_WIDTH - 20.0, BUTTON_HEIGHT, action)
        })
        .collect()
}
