mod bitmap;

pub use bitmap::{Bitmap, FieldCache, FieldKey, Palette, RenderError, Rgba, paint_field};

use std::time::Instant;

use macroquad::prelude::*;

use crate::application::Simulation;
use crate::domain::Pattern;
use crate::ui::{Button, PANEL_WIDTH, info_top, panel_x};

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// GPU side of the field: repaints the bitmap only when the simulation's
/// revision moves, then reuses the texture.
pub struct FieldView {
    cache: FieldCache,
    texture: Option<Texture2D>,
    painted: Option<(u64, usize)>,
}

impl FieldView {
    pub fn new(palette: Palette) -> Self {
        Self {
            cache: FieldCache::new(palette),
            texture: None,
            painted: None,
        }
    }

    /// Bring the texture up to date with `state`. Returns the time spent in ms,
    /// zero if nothing changed.
    pub fn sync(&mut self, state: &Simulation, cell_px: usize) -> Result<f32, RenderError> {
        let stamp = (state.revision(), cell_px);
        if self.texture.is_some() && self.painted == Some(stamp) {
            return Ok(0.0);
        }

        let start = Instant::now();
        let bitmap = paint_field(state.engine(), cell_px, &mut self.cache)?;
        let too_large = || RenderError::TooLarge {
            width: bitmap.width,
            height: bitmap.height,
        };
        let width = u16::try_from(bitmap.width).map_err(|_| too_large())?;
        let height = u16::try_from(bitmap.height).map_err(|_| too_large())?;

        match &self.texture {
            Some(texture) if texture.width() as u16 == width && texture.height() as u16 == height => {
                texture.update(&Image {
                    bytes: bitmap.pixels,
                    width,
                    height,
                });
            }
            _ => {
                let texture = Texture2D::from_rgba8(width, height, &bitmap.pixels);
                texture.set_filter(FilterMode::Nearest);
                self.texture = Some(texture);
            }
        }

        self.painted = Some(stamp);
        Ok(start.elapsed().as_secs_f32() * 1000.0)
    }

    /// Draw the field with its top-left corner at the window origin.
    pub fn draw(&self) {
        if let Some(texture) = &self.texture {
            draw_texture(texture, 0.0, 0.0, WHITE);
        }
    }
}

impl Default for FieldView {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// Ghost of the pending pattern, centered on the cursor like placement will be
pub fn draw_pattern_preview(state: &Simulation, pattern: &Pattern, cell_px: usize, mouse_pos: (f32, f32)) {
    let (width, height) = (state.engine().width(), state.engine().height());
    let Some((x, y)) = crate::input::cell_at(mouse_pos, cell_px, width, height) else {
        return;
    };
    let (ox, oy) = pattern.centered_origin(x, y, width, height);
    let size = cell_px as f32;

    for &(dx, dy) in &pattern.cells {
        let sx = (ox + dx) as f32 * size;
        let sy = (oy + dy) as f32 * size;
        draw_rectangle(sx, sy, size, size, Color::from_rgba(0, 255, 150, 120));
    }
    draw_rectangle_lines(
        ox as f32 * size,
        oy as f32 * size,
        pattern.width as f32 * size,
        pattern.height as f32 * size,
        2.0,
        Color::from_rgba(255, 255, 0, 180),
    );
}

/// Control panel: buttons, live statistics and key help
pub fn draw_controls(state: &Simulation, buttons: &[Button], patterns: &[Pattern], mouse_pos: (f32, f32)) {
    let px = panel_x();
    draw_rectangle(px, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let text_x = px + 10.0;
    let engine = state.engine();
    let rule = engine.rule();
    let dim = Color::from_rgba(180, 180, 180, 255);

    let status = if state.is_running { "Running" } else { "Paused" };
    let status_color = if state.is_running {
        Color::from_rgba(0, 255, 0, 255)
    } else {
        Color::from_rgba(255, 165, 0, 255)
    };

    // Update time: green under a frame at 60 fps, then yellow, then red
    let update_color = if state.last_update_ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if state.last_update_ms < 16.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    };

    let pending = state
        .pending_pattern_index
        .and_then(|i| patterns.get(i))
        .map_or("none", |p| p.name);

    let lines = [
        (format!("Generation: {}", state.generation), WHITE),
        (format!("Population: {}", format_number(engine.population())), WHITE),
        (format!("Field: {}x{}", engine.width(), engine.height()), dim),
        (format!("Rule: {} {}", rule.name(), rule), dim),
        (format!("Edges: {}", engine.topology().name()), dim),
        (format!("Mode: {} ({})", state.mode.name(), status), status_color),
        (format!("Speed: {:.0} gen/s", state.updates_per_second), dim),
        (format!("Update: {:.2}ms", state.last_update_ms), update_color),
        (format!("Render: {:.2}ms", state.last_render_time_ms), dim),
        (format!("FPS: {}", get_fps()), dim),
        (format!("Pattern: {}", pending), dim),
    ];

    let mut y = info_top();
    for (text, color) in &lines {
        draw_text(text, text_x, y, 16.0, *color);
        y += 18.0;
    }

    if let Some(message) = &state.status {
        y += 6.0;
        draw_text(message, text_x, y, 13.0, Color::from_rgba(255, 80, 80, 255));
        y += 16.0;
    }

    let help = [
        "Click: toggle / place",
        "RMB, Esc: cancel pattern",
        "Space: start/stop  N: step",
        "C: clear  R: random",
        "M: mode  U: rule",
        "Up/Down: speed",
    ];
    y += 12.0;
    for line in help {
        draw_text(line, text_x, y, 13.0, GRAY);
        y += 15.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_suffixes() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(2_000_000), "2.0M");
    }
}
