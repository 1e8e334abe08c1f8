mod editor;
mod month;
mod sidebar;

use std::time::Duration;

use egui::{Color32, RichText};

use crate::model::{EventType, Scope};
use crate::{CalendarAction, CalendarApp};

const PENDING_REPAINT: Duration = Duration::from_millis(100);
const NOTICE_COLOR: Color32 = Color32::from_rgb(230, 110, 100);

impl CalendarApp {
    /// Poll the backend, draw the calendar and apply whatever the user did.
    #[profiling::function]
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.poll();

        let mut actions = Vec::new();
        let index = self.index();

        notices_ui(self, ui, &mut actions);
        toolbar_ui(self, ui, &mut actions);
        ui.separator();

        egui::SidePanel::right("sewa-calendar-sidebar")
            .resizable(false)
            .default_width(260.0)
            .show_inside(ui, |ui| {
                sidebar::upcoming_ui(self, ui, &mut actions);
                ui.separator();
                sidebar::agenda_ui(self, &index, ui, &mut actions);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            month::month_ui(self, &index, ui, &mut actions);
        });

        editor::editor_window_ui(self, ui.ctx(), &mut actions);
        editor::confirm_delete_ui(self, ui.ctx(), &mut actions);

        // ehttp resolves off-thread and never wakes the ui
        if self.has_pending() {
            ui.ctx().request_repaint_after(PENDING_REPAINT);
        }

        for action in actions {
            self.dispatch(action);
        }
    }
}

fn toolbar_ui(app: &CalendarApp, ui: &mut egui::Ui, actions: &mut Vec<CalendarAction>) {
    ui.horizontal(|ui| {
        if ui.button("◀").clicked() {
            actions.push(CalendarAction::PrevMonth);
        }

        if ui.button("▶").clicked() {
            actions.push(CalendarAction::NextMonth);
        }

        if ui.button("Today").clicked() {
            actions.push(CalendarAction::GoToToday);
        }

        ui.separator();
        ui.label(RichText::new(app.state().month.to_string()).size(18.0).strong());
        ui.separator();

        scope_combo_ui(app, ui, actions);

        if app.is_loading() {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🔄 Refresh").clicked() {
                actions.push(CalendarAction::Refresh);
            }

            if ui.button("➕ New Event").clicked() {
                actions.push(CalendarAction::NewEvent);
            }
        });
    });
}

fn scope_combo_ui(app: &CalendarApp, ui: &mut egui::Ui, actions: &mut Vec<CalendarAction>) {
    let filter = app.scope_filter();
    let current = filter.scope();

    egui::ComboBox::from_id_salt("sewa-calendar-scope")
        .selected_text(filter.label(current))
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(current == Scope::All, filter.label(Scope::All))
                .clicked()
            {
                actions.push(CalendarAction::SelectScope(Scope::All));
            }

            for chapter in filter.chapters() {
                let scope = Scope::Chapter(chapter.id);
                let label = match &chapter.location {
                    Some(location) => format!("{} ({location})", chapter.name),
                    None => chapter.name.clone(),
                };
                if ui.selectable_label(current == scope, label).clicked() {
                    actions.push(CalendarAction::SelectScope(scope));
                }
            }
        });
}

fn notices_ui(app: &CalendarApp, ui: &mut egui::Ui, actions: &mut Vec<CalendarAction>) {
    for (idx, notice) in app.notices().iter().enumerate() {
        ui.horizontal(|ui| {
            ui.colored_label(NOTICE_COLOR, &notice.message);
            if ui.small_button("×").clicked() {
                actions.push(CalendarAction::DismissNotice(idx));
            }
        });
    }
}

pub(crate) fn event_type_color(event_type: EventType) -> Color32 {
    match event_type {
        EventType::Meeting => Color32::from_rgb(100, 150, 255),
        EventType::SocialEvent => Color32::from_rgb(255, 150, 100),
        EventType::Workshop => Color32::from_rgb(150, 100, 255),
        EventType::Agm => Color32::from_rgb(230, 90, 90),
        EventType::Festival => Color32::from_rgb(240, 190, 60),
        EventType::General => Color32::from_gray(140),
    }
}
