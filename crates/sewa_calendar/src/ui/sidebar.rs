use egui::{Color32, Frame, Margin, RichText, Sense};

use super::event_type_color;
use crate::index::EventIndex;
use crate::model::{CalendarEvent, Scope, Visibility};
use crate::timeline::Upcoming;
use crate::{CalendarAction, CalendarApp};

pub(super) fn upcoming_ui(app: &CalendarApp, ui: &mut egui::Ui, actions: &mut Vec<CalendarAction>) {
    ui.heading("Upcoming");
    ui.add_space(4.0);

    match app.upcoming() {
        Upcoming::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading…");
            });
        }
        Upcoming::Failed => {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Could not load events").weak());
                if ui.small_button("Retry").clicked() {
                    actions.push(CalendarAction::Refresh);
                }
            });
        }
        Upcoming::Ready(events) if events.is_empty() => {
            ui.label(RichText::new("No upcoming events").weak());
        }
        Upcoming::Ready(events) => {
            for event in events {
                let response = ui
                    .horizontal(|ui| {
                        ui.label(
                            RichText::new(event.event_date.format("%b %e").to_string())
                                .color(event_type_color(event.event_type))
                                .strong(),
                        );
                        ui.label(&event.title);
                    })
                    .response
                    .interact(Sense::click());

                if response.clicked() {
                    actions.push(CalendarAction::SelectDay(event.event_date));
                }
            }
        }
    }
}

pub(super) fn agenda_ui(
    app: &CalendarApp,
    index: &EventIndex<'_>,
    ui: &mut egui::Ui,
    actions: &mut Vec<CalendarAction>,
) {
    let Some(date) = app.state().selected else {
        ui.label(RichText::new("Select a day to see its events").weak());
        return;
    };

    ui.horizontal(|ui| {
        ui.heading(date.format("%A, %B %e").to_string());
        if ui.small_button("×").on_hover_text("Clear selection").clicked() {
            actions.push(CalendarAction::ClearSelection);
        }
    });

    if ui.button("➕ Add event on this day").clicked() {
        actions.push(CalendarAction::NewEventOn(date));
    }
    ui.add_space(4.0);

    let events = app.agenda(index);
    if events.is_empty() {
        ui.label("No events on this day");
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("sewa-calendar-agenda")
        .show(ui, |ui| {
            for event in events {
                agenda_item_ui(app, event, ui, actions);
                ui.add_space(4.0);
            }
        });
}

fn agenda_item_ui(
    app: &CalendarApp,
    event: &CalendarEvent,
    ui: &mut egui::Ui,
    actions: &mut Vec<CalendarAction>,
) {
    Frame::new()
        .fill(Color32::from_gray(40))
        .inner_margin(Margin::same(6))
        .stroke(egui::Stroke::new(1.0, event_type_color(event.event_type)))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(&event.title).strong());

            let scope = match event.scope_id {
                Some(id) => app.scope_filter().label(Scope::Chapter(id)),
                None => "Global".to_owned(),
            };
            let mut meta = format!("{} · {}", event.event_type.label(), scope);
            if event.visibility == Visibility::MembersOnly {
                meta.push_str(" · ");
                meta.push_str(event.visibility.label());
            }
            ui.label(RichText::new(meta).small().weak());

            if let Some(description) = &event.description {
                ui.label(description);
            }

            ui.horizontal(|ui| {
                if ui.small_button("Edit").clicked() {
                    actions.push(CalendarAction::EditEvent(event.id));
                }

                let deleting = app.is_deleting(event.id);
                let label = if deleting { "Deleting…" } else { "Delete" };
                if ui
                    .add_enabled(!deleting, egui::Button::new(label).small())
                    .clicked()
                {
                    actions.push(CalendarAction::RequestDelete(event.id));
                }
            });
        });
}
