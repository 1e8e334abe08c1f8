use chrono::Datelike;
use egui::{Color32, CornerRadius, FontId, Frame, Margin, RichText, Sense};

use super::event_type_color;
use crate::grid::{weekday_label, DayCell};
use crate::index::EventIndex;
use crate::{CalendarAction, CalendarApp};

const MAX_CHIPS: usize = 3;
const CELL_MIN_HEIGHT: f32 = 96.0;

#[profiling::function]
pub(super) fn month_ui(
    app: &CalendarApp,
    index: &EventIndex<'_>,
    ui: &mut egui::Ui,
    actions: &mut Vec<CalendarAction>,
) {
    let view = app.month_view(index);

    egui::ScrollArea::vertical()
        .id_salt("sewa-calendar-month-scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.columns(7, |cols| {
                for (idx, col) in cols.iter_mut().enumerate() {
                    col.vertical_centered(|ui| {
                        ui.label(RichText::new(weekday_label(idx)).strong());
                    });
                }
            });

            ui.separator();

            for week in view.weeks() {
                ui.columns(7, |cols| {
                    for (col, cell) in cols.iter_mut().zip(week.iter()) {
                        day_cell_ui(app, col, cell, actions);
                    }
                });
            }
        });
}

fn day_cell_ui(
    app: &CalendarApp,
    ui: &mut egui::Ui,
    cell: &DayCell<'_>,
    actions: &mut Vec<CalendarAction>,
) {
    let is_today = cell.date == app.today();
    let is_selected = app.state().selected == Some(cell.date);

    let mut frame = Frame::new()
        .inner_margin(Margin::same(4))
        .corner_radius(CornerRadius::same(4))
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(60)));

    if is_today {
        frame = frame.fill(Color32::from_rgba_unmultiplied(0, 91, 187, 40));
    } else if is_selected {
        frame = frame.fill(Color32::from_rgb(40, 60, 80));
    } else if !cell.in_month {
        frame = frame.fill(Color32::from_gray(20));
    }

    let response = frame.show(ui, |ui| {
        ui.set_min_height(CELL_MIN_HEIGHT);
        ui.set_min_width(ui.available_width());

        let mut day = RichText::new(cell.date.day().to_string()).strong();
        if !cell.in_month {
            day = day.color(ui.visuals().weak_text_color());
        }
        ui.label(day);

        for event in cell.events.iter().take(MAX_CHIPS) {
            let chip = egui::Button::new(RichText::new(&event.title).small())
                .fill(event_type_color(event.event_type).gamma_multiply(0.5));
            let response = ui
                .add_sized([ui.available_width(), 16.0], chip)
                .on_hover_text(format!("{} · {}", event.event_type.label(), event.title));
            if response.clicked() {
                actions.push(CalendarAction::SelectDay(cell.date));
                actions.push(CalendarAction::EditEvent(event.id));
            }
        }

        let more = cell.events.len().saturating_sub(MAX_CHIPS);
        if more > 0 {
            ui.label(
                RichText::new(format!("+{more} more"))
                    .font(FontId::proportional(11.0))
                    .color(ui.visuals().weak_text_color()),
            );
        }
    });

    let response = response.response.interact(Sense::click());
    if response.double_clicked() {
        actions.push(CalendarAction::NewEventOn(cell.date));
    } else if response.clicked() {
        actions.push(CalendarAction::SelectDay(cell.date));
    }
}
