//! Visual keyboard tester panel.

use eframe::egui::{self, Color32, CornerRadius, Event, RichText, Sense, StrokeKind, Ui};

use super::app::App;
use super::components::{back_button, panel_header, styled_button};
use crate::keyboard;

const UNIT_KEY: f32 = 44.0;
const KEY_HEIGHT: f32 = 40.0;
const KEY_GAP: f32 = 4.0;

/// Show the keyboard tester panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Keyboard Tester");

    // Capture key presses while this panel is visible.
    ui.ctx().input(|input| {
        for event in &input.events {
            if let Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } = event
            {
                app.keyboard_state.record(*key);
            }
        }
    });

    ui.label("Press keys to light them up. Pressed keys stay highlighted.");
    ui.add_space(15.0);

    draw_layout(app, ui);

    ui.add_space(20.0);

    // Stats row
    ui.horizontal(|ui| {
        ui.label(format!("Total presses: {}", app.keyboard_state.total_presses));

        ui.add_space(20.0);

        let coverage = app.keyboard_state.coverage(&app.keyboard_layout);
        ui.label(format!("Coverage: {:.0}%", coverage * 100.0));

        ui.add_space(20.0);

        if let Some(last) = app.keyboard_state.last_key {
            ui.label(format!("Last key: {}", keyboard::label_for(last, &app.keyboard_layout)));
        }

        ui.add_space(20.0);

        if styled_button(ui, "Reset").clicked() {
            app.keyboard_state.reset();
        }
    });

    go_back
}

fn draw_layout(app: &App, ui: &mut Ui) {
    for row in &app.keyboard_layout {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = KEY_GAP;

            for cap in row {
                let size = egui::vec2(UNIT_KEY * cap.width, KEY_HEIGHT);

                let Some(key) = cap.key else {
                    ui.allocate_exact_size(size, Sense::hover());
                    continue;
                };

                let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
                if !ui.is_rect_visible(rect) {
                    continue;
                }

                let pressed = app.keyboard_state.is_pressed(key);
                let is_last = app.keyboard_state.last_key == Some(key);

                let fill = if is_last {
                    Color32::from_rgb(90, 160, 255)
                } else if pressed {
                    Color32::from_rgb(60, 120, 90)
                } else {
                    ui.visuals().extreme_bg_color
                };
                let text_color = if pressed || is_last {
                    Color32::WHITE
                } else {
                    ui.visuals().text_color()
                };

                let painter = ui.painter();
                painter.rect_filled(rect, CornerRadius::same(4), fill);
                painter.rect_stroke(
                    rect,
                    CornerRadius::same(4),
                    ui.visuals().widgets.noninteractive.bg_stroke,
                    StrokeKind::Inside,
                );
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    cap.label,
                    egui::FontId::proportional(12.0),
                    text_color,
                );
            }
        });
        ui.add_space(KEY_GAP);
    }

    ui.add_space(5.0);
    ui.label(
        RichText::new("Modifier lock keys are not shown; the tester tracks key-down events only.")
            .small()
            .weak(),
    );
}
