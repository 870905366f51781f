use macroquad::prelude::*;
use sparse_life::{
    EngineConfig, Simulation, presets,
    rendering::{self, FieldView},
    input,
    ui::{self, CELL_PX, FIELD_HEIGHT, FIELD_WIDTH, PANEL_WIDTH},
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Sparse Life".to_owned(),
        window_width: (FIELD_WIDTH * CELL_PX) as i32 + PANEL_WIDTH as i32,
        window_height: (FIELD_HEIGHT * CELL_PX) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = EngineConfig {
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
        ..Default::default()
    };
    let mut state = match Simulation::new(config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("cannot start: {err}");
            return;
        }
    };
    let patterns = presets::all_patterns();
    let mut view = FieldView::default();

    loop {
        let mouse_pos = mouse_position();
        let buttons = ui::create_buttons();

        // Input
        state = input::process_button_clicks(state, &buttons, patterns.len(), mouse_pos);
        input::handle_field_click(&mut state, &patterns, CELL_PX, mouse_pos);
        state = input::process_keyboard_input(state);

        // Timer
        state = state.tick(get_frame_time());

        // Render
        clear_background(BLACK);
        match view.sync(&state, CELL_PX) {
            Ok(ms) if ms > 0.0 => state.last_render_time_ms = ms,
            Ok(_) => {}
            Err(err) => state.status = Some(err.to_string()),
        }
        view.draw();

        if let Some(pattern) = state.pending_pattern_index.and_then(|i| patterns.get(i)) {
            if mouse_pos.0 < ui::panel_x() {
                rendering::draw_pattern_preview(&state, pattern, CELL_PX, mouse_pos);
            }
        }
        rendering::draw_controls(&state, &buttons, &patterns, mouse_pos);

        next_frame().await;
    }
}
