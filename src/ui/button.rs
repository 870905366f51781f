use macroquad::prelude::*;

const IDLE: Color = Color::new(0.27, 0.51, 0.71, 1.0);
const HOVER: Color = Color::new(0.39, 0.58, 0.93, 1.0);

/// What a button does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    StartStop,
    Step,
    Clear,
    Randomize,
    Mode,
    Rule,
    Pattern,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::StartStop => "Start/Stop",
            Action::Step => "Step",
            Action::Clear => "Clear",
            Action::Randomize => "Random",
            Action::Mode => "Mode",
            Action::Rule => "Rule",
            Action::Pattern => "Pattern",
        }
    }
}

/// Clickable panel button bound to an [`Action`]
#[derive(Clone)]
pub struct Button {
    bounds: Rect,
    pub action: Action,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, action: Action) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
            action,
        }
    }

    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        self.bounds.contains(vec2(mouse_pos.0, mouse_pos.1))
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let Rect { x, y, w, h } = self.bounds;
        let fill = if self.is_hovered(mouse_pos) { HOVER } else { IDLE };
        draw_rectangle(x, y, w, h, fill);
        draw_rectangle_lines(x, y, w, h, 2.0, WHITE);

        let label = self.action.label();
        let size = measure_text(label, None, 18, 1.0);
        draw_text(
            label,
            x + (w - size.width) / 2.0,
            y + (h + size.height) / 2.0,
            18.0,
            WHITE,
        );
    }

    /// Hovered and the left button went down this frame
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}
