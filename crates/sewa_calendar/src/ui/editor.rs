use egui::{Color32, RichText};
use strum::IntoEnumIterator;

use crate::editor::EditorMode;
use crate::forms::DraftChange;
use crate::model::{EventType, Scope, Visibility};
use crate::{CalendarAction, CalendarApp};

const INVALID: Color32 = Color32::from_rgb(230, 110, 100);

pub(super) fn editor_window_ui(
    app: &CalendarApp,
    ctx: &egui::Context,
    actions: &mut Vec<CalendarAction>,
) {
    let editor = app.editor();
    let title = match editor.mode() {
        EditorMode::Closed => return,
        EditorMode::Creating => "New event",
        EditorMode::Editing(_) => "Edit event",
    };

    let form = editor.form();
    let errors = editor.errors();
    let mut open = true;

    egui::Window::new(title)
        .id(egui::Id::new("sewa-calendar-editor"))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            egui::Grid::new("sewa-calendar-editor-grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title");
                    let mut event_title = form.title.clone();
                    ui.vertical(|ui| {
                        if ui
                            .add(egui::TextEdit::singleline(&mut event_title).hint_text("Title"))
                            .changed()
                        {
                            actions.push(CalendarAction::EditDraft(DraftChange::Title(
                                event_title,
                            )));
                        }
                        if let Some(err) = &errors.title {
                            ui.colored_label(INVALID, err);
                        }
                    });
                    ui.end_row();

                    ui.label("Date");
                    let mut date = form.date.clone();
                    ui.vertical(|ui| {
                        if ui
                            .add(egui::TextEdit::singleline(&mut date).hint_text("YYYY-MM-DD"))
                            .changed()
                        {
                            actions.push(CalendarAction::EditDraft(DraftChange::Date(date)));
                        }
                        if let Some(err) = &errors.date {
                            ui.colored_label(INVALID, err);
                        }
                    });
                    ui.end_row();

                    ui.label("Description");
                    let mut description = form.description.clone();
                    if ui
                        .add(egui::TextEdit::multiline(&mut description).desired_rows(3))
                        .changed()
                    {
                        actions.push(CalendarAction::EditDraft(DraftChange::Description(
                            description,
                        )));
                    }
                    ui.end_row();

                    ui.label("Type");
                    egui::ComboBox::from_id_salt("sewa-calendar-editor-type")
                        .selected_text(form.event_type.label())
                        .show_ui(ui, |ui| {
                            for event_type in EventType::iter() {
                                if ui
                                    .selectable_label(form.event_type == event_type, event_type.label())
                                    .clicked()
                                {
                                    actions.push(CalendarAction::EditDraft(
                                        DraftChange::EventType(event_type),
                                    ));
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Chapter");
                    let filter = app.scope_filter();
                    let selected = form
                        .scope_id
                        .map(|id| filter.label(Scope::Chapter(id)))
                        .unwrap_or_else(|| "Global".to_owned());
                    egui::ComboBox::from_id_salt("sewa-calendar-editor-chapter")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            if ui.selectable_label(form.scope_id.is_none(), "Global").clicked() {
                                actions.push(CalendarAction::EditDraft(DraftChange::Scope(None)));
                            }
                            for chapter in filter.chapters() {
                                let is_selected = form.scope_id == Some(chapter.id);
                                if ui.selectable_label(is_selected, &chapter.name).clicked() {
                                    actions.push(CalendarAction::EditDraft(DraftChange::Scope(
                                        Some(chapter.id),
                                    )));
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Visibility");
                    ui.horizontal(|ui| {
                        for visibility in Visibility::iter() {
                            if ui
                                .selectable_label(form.visibility == visibility, visibility.label())
                                .clicked()
                            {
                                actions.push(CalendarAction::EditDraft(DraftChange::Visibility(
                                    visibility,
                                )));
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.separator();

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(editor.can_submit(), egui::Button::new("Save"))
                    .clicked()
                {
                    actions.push(CalendarAction::Submit);
                }

                if ui.button("Cancel").clicked() {
                    actions.push(CalendarAction::Cancel);
                }

                if editor.is_submitting() {
                    ui.spinner();
                    ui.label(RichText::new("Saving…").weak());
                }
            });
        });

    if !open {
        actions.push(CalendarAction::Cancel);
    }
}

pub(super) fn confirm_delete_ui(
    app: &CalendarApp,
    ctx: &egui::Context,
    actions: &mut Vec<CalendarAction>,
) {
    let Some(id) = app.state().confirm_delete else {
        return;
    };

    let title = app
        .store()
        .get(id)
        .map(|event| event.title.as_str())
        .unwrap_or("this event");

    egui::Window::new("Delete event?")
        .id(egui::Id::new("sewa-calendar-confirm-delete"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("\"{title}\" will be removed for everyone."));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("Delete").color(INVALID))
                    .clicked()
                {
                    actions.push(CalendarAction::ConfirmDelete);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(CalendarAction::CancelDelete);
                }
            });
        });
}
