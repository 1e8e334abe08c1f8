use std::path::Path;

use chrono::{Local, NaiveDate};
use sewa::{ApiClient, ApiConfig, Args, DataPath, Settings, SettingsHandler};
use sewa_calendar::{
    CalendarAction, CalendarApp, CalendarConfig, HttpCalendarBackend, Scope, ScopeId,
};
use tracing::{error, info, warn};

use crate::app_size::AppSizeHandler;

/// Our desktop host: loads settings, wires the calendar to the portal api
/// and keeps the calendar's idea of "today" current.
pub struct SewaChrome {
    calendar: CalendarApp,
    settings: SettingsHandler,
    app_size: AppSizeHandler,
}

impl eframe::App for SewaChrome {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        if let Err(err) = self.settings.save() {
            error!("failed to save settings: {err}");
        }
    }

    #[profiling::function]
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.calendar.set_today(today());

        egui::CentralPanel::default().show(ctx, |ui| {
            self.calendar.ui(ui);
        });

        self.app_size.try_save_app_size(ctx);
    }
}

impl SewaChrome {
    pub fn new<P: AsRef<Path>>(data_path: P, args: &[String]) -> sewa::Result<Self> {
        let (parsed_args, unrecognized) = Args::parse(args);
        for arg in &unrecognized {
            warn!("ignoring unrecognized argument '{arg}'");
        }

        let path = match &parsed_args.datapath {
            Some(datapath) => DataPath::new(datapath),
            None => DataPath::new(data_path),
        };

        let settings = SettingsHandler::new(&path).load();
        let api = ApiConfig::resolve(&parsed_args, &settings.settings())?;
        info!("using portal api at {}", api.base_url);

        let backend = HttpCalendarBackend::new(ApiClient::new(api));
        let config = calendar_config(&parsed_args, &settings.settings());
        let mut calendar = CalendarApp::new(Box::new(backend), config, today());
        calendar.dispatch(CalendarAction::Enter);

        Ok(Self {
            calendar,
            settings,
            app_size: AppSizeHandler::new(&path),
        })
    }

    pub fn calendar(&self) -> &CalendarApp {
        &self.calendar
    }
}

/// cli args win over the settings file
pub fn calendar_config(args: &Args, settings: &Settings) -> CalendarConfig {
    CalendarConfig {
        scope: Scope::from(args.scope.map(ScopeId)),
        upcoming_limit: args.upcoming.unwrap_or(settings.upcoming_limit),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
