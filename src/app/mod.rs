//! The launcher application.
//!
//! | Sub-module  | Responsibility |
//! | ----------- | -------------- |
//! | [`sidebar`] | Tool-menu sidebar rendering (drag reorder, detach, device selector) |
//! | [`run`]     | Top-level entry point, window/viewport setup, and icon loading |
//!
//! [`Launcher`] itself wires the pieces together: it drains the command
//! channel once per frame, keeps the tool menu in sync with the preferences
//! revision, and renders the central placeholder panel plus any detached
//! tool windows.

mod sidebar;
mod run;

pub use run::{run_launcher, LaunchOptions};

use std::sync::mpsc::Receiver;

use eframe::egui;
use tracing::{debug, info, warn};

use crate::commands::LauncherCommand;
use crate::events::{MenuEvent, MenuEvents};
use crate::filter::DeviceProfile;
use crate::i18n::Translator;
use crate::preferences::Preferences;
use crate::script::{parse_program, Script, ScriptCommand};
use crate::settings::SharedSettings;
use crate::tool_menu::{SelectOutcome, ToolMenu};
use crate::tools::Tool;

pub struct Launcher {
    rx: Receiver<LauncherCommand>,
    pub menu: ToolMenu,
    pub prefs: Preferences,
    pub translator: Translator,

    /// Currently connected hardware profile.
    connected: Option<DeviceProfile>,
    /// Profiles offered by the device selector.
    profiles: Vec<DeviceProfile>,
    /// Tool whose panel occupies the central area.
    active_tool: Option<Tool>,

    events: MenuEvents,
    event_log_rx: Receiver<MenuEvent>,
    seen_prefs_revision: u64,

    // Transient dialog state.
    show_prefs_window: bool,
    script_path_prompt: Option<String>,
}

impl Launcher {
    pub fn new(
        rx: Receiver<LauncherCommand>,
        settings: SharedSettings,
        prefs: Preferences,
        translator: Translator,
    ) -> Self {
        let events = MenuEvents::new();
        let event_log_rx = events.subscribe_all();
        let menu = ToolMenu::new(settings, &translator, &prefs, events.clone());
        let seen_prefs_revision = prefs.revision();
        Self {
            rx,
            menu,
            prefs,
            translator,
            connected: None,
            profiles: DeviceProfile::builtin(),
            active_tool: None,
            events,
            event_log_rx,
            seen_prefs_revision,
            show_prefs_window: false,
            script_path_prompt: None,
        }
    }

    /// Event controller, for external subscribers embedding the launcher.
    pub fn events(&self) -> &MenuEvents {
        &self.events
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.active_tool
    }

    pub fn connected(&self) -> Option<&DeviceProfile> {
        self.connected.as_ref()
    }

    // ── Command processing ───────────────────────────────────────────────────

    fn process_commands(&mut self) {
        while let Ok(cmd) = self.rx.try_recv() {
            match cmd {
                LauncherCommand::RunScript(script) => self.run_program(&script),
                LauncherCommand::SelectTool(tool) => self.select(tool),
                LauncherCommand::Detach(tool) => self.menu.set_detached(tool, true),
                LauncherCommand::ApplyProfile(profile) => self.connect(profile),
                LauncherCommand::Disconnect => self.disconnect(),
            }
        }
    }

    /// Execute a script program against the live launcher.
    fn run_program(&mut self, script: &Script) {
        info!(path = %script.path.display(), "running script");
        for cmd in parse_program(&script.source) {
            match cmd {
                ScriptCommand::Select(tool) => self.select(tool),
                ScriptCommand::Detach(tool) => self.menu.set_detached(tool, true),
                ScriptCommand::Device(profile) => self.connect(profile),
                ScriptCommand::Disconnect => self.disconnect(),
            }
        }
    }

    pub(crate) fn select(&mut self, tool: Tool) {
        let visible = self.menu.item_for(tool).map(|it| it.visible).unwrap_or(false);
        if !visible {
            debug!(tool = tool.id(), "ignoring selection of hidden tool");
            return;
        }
        if self.menu.select(tool) == SelectOutcome::Selected {
            self.active_tool = Some(tool);
        }
    }

    pub(crate) fn connect(&mut self, profile: DeviceProfile) {
        self.menu.apply_filter(Some(&profile));
        self.connected = Some(profile);
        self.drop_hidden_active_tool();
    }

    pub(crate) fn disconnect(&mut self) {
        self.menu.apply_filter(None);
        self.connected = None;
        self.active_tool = None;
    }

    /// A filter change may have hidden the tool currently on screen.
    fn drop_hidden_active_tool(&mut self) {
        if let Some(tool) = self.active_tool {
            let still_visible = self
                .menu
                .item_for(tool)
                .map(|it| it.visible)
                .unwrap_or(false);
            if !still_visible {
                self.active_tool = None;
            }
        }
    }

    // ── Script dialog ────────────────────────────────────────────────────────

    pub(crate) fn open_script_dialog(&mut self) {
        if self.prefs.native_dialogs() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Scripts", &["bds", "txt"])
                .pick_file()
            {
                self.load_and_run_script(path.display().to_string());
            }
        } else {
            self.script_path_prompt = Some(String::new());
        }
    }

    fn load_and_run_script(&mut self, path: String) {
        match Script::load(&path) {
            Ok(script) => self.run_program(&script),
            Err(e) => warn!("{e:#}"),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    fn central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match self.active_tool {
            Some(tool) => {
                let label = self
                    .menu
                    .item_for(tool)
                    .map(|it| it.label.clone())
                    .unwrap_or_else(|| tool.id().to_string());
                ui.heading(format!("{} {label}", tool.icon()));
                ui.separator();
                ui.label(self.translator.tr("panel.placeholder"));
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(self.translator.tr("menu.no_tool"));
                });
            }
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.connected {
                    Some(profile) => ui.label(profile.name().to_string()),
                    None => ui.label(self.translator.tr("menu.no_device")),
                };
                if !self.prefs.use_decoders() {
                    ui.separator();
                    ui.label(self.translator.tr("status.decoders_off"));
                }
            });
        });
    }

    fn detached_windows(&mut self, ctx: &egui::Context) {
        let detached: Vec<(Tool, String, &'static str)> = self
            .menu
            .items()
            .iter()
            .filter(|it| it.detached)
            .map(|it| (it.tool, it.label.clone(), it.icon))
            .collect();

        let mut reattach = Vec::new();
        for (tool, label, icon) in detached {
            let mut open = true;
            egui::Window::new(format!("{icon} {label}"))
                .id(egui::Id::new(("detached_tool", tool)))
                .open(&mut open)
                .default_size(egui::vec2(420.0, 300.0))
                .show(ctx, |ui| {
                    ui.label(self.translator.tr("panel.placeholder"));
                });
            if !open {
                reattach.push(tool);
            }
        }
        for tool in reattach {
            self.menu.set_detached(tool, false);
        }
    }

    fn preferences_window(&mut self, ctx: &egui::Context) {
        if !self.show_prefs_window {
            return;
        }
        let mut open = true;
        egui::Window::new(self.translator.tr("menu.preferences"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                let mut detach = self.prefs.double_click_to_detach();
                if ui
                    .checkbox(&mut detach, self.translator.tr("prefs.double_click_to_detach"))
                    .changed()
                {
                    self.prefs.set_double_click_to_detach(detach);
                }

                let mut native = self.prefs.native_dialogs();
                if ui
                    .checkbox(&mut native, self.translator.tr("prefs.native_dialogs"))
                    .changed()
                {
                    self.prefs.set_native_dialogs(native);
                }

                ui.horizontal(|ui| {
                    ui.label(self.translator.tr("prefs.language"));
                    let mut language = self.prefs.language().to_string();
                    let before = language.clone();
                    egui::ComboBox::from_id_salt("prefs_language")
                        .selected_text(language.clone())
                        .show_ui(ui, |ui| {
                            for code in ["auto", "en", "de"] {
                                ui.selectable_value(&mut language, code.to_string(), code);
                            }
                        });
                    // Takes effect at the next start, like the translator install.
                    if language != before {
                        self.prefs.set_language(language);
                    }
                });
            });
        if !open {
            self.show_prefs_window = false;
        }
    }

    fn script_prompt_window(&mut self, ctx: &egui::Context) {
        let Some(mut path) = self.script_path_prompt.take() else {
            return;
        };
        let mut open = true;
        let mut run = false;
        egui::Window::new(self.translator.tr("menu.run_script"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Path:");
                    ui.text_edit_singleline(&mut path);
                });
                if ui.button(self.translator.tr("menu.run_script")).clicked() {
                    run = true;
                }
            });
        if run {
            self.load_and_run_script(path);
        } else if open {
            self.script_path_prompt = Some(path);
        }
    }

    fn drain_event_log(&mut self) {
        while let Ok(event) = self.event_log_rx.try_recv() {
            debug!(kinds = %event.kinds, tool = ?event.tool, "menu event");
        }
    }
}

impl eframe::App for Launcher {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_commands();

        if self.prefs.revision() != self.seen_prefs_revision {
            self.seen_prefs_revision = self.prefs.revision();
            self.menu.read_preferences(&self.prefs);
        }

        sidebar::show(self, ctx);
        self.status_bar(ctx);
        self.central_panel(ctx);
        self.detached_windows(ctx);
        self.preferences_window(ctx);
        self.script_prompt_window(ctx);

        self.drain_event_log();
    }
}
