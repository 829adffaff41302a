//! Sidebar rendering for the tool menu.
//!
//! Draws the device selector, the draggable tool list, and the script /
//! preferences buttons. All state changes go through [`Launcher`] and
//! [`ToolMenu`](crate::tool_menu::ToolMenu) methods; this module only
//! translates egui interactions into those calls.

use eframe::egui;
use egui_dnd::dnd;
use egui_phosphor::regular::DOTS_SIX_VERTICAL;

use super::Launcher;
use crate::filter::DeviceProfile;
use crate::tools::Tool;

/// Snapshot of one menu row, taken before the immutable menu borrow ends so
/// the drag closure does not alias the launcher.
#[derive(Hash)]
struct Row {
    tool: Tool,
    label: String,
    icon: &'static str,
    detached: bool,
    double_click_to_detach: bool,
}

pub(super) fn show(launcher: &mut Launcher, ctx: &egui::Context) {
    egui::SidePanel::left("tool_menu")
        .resizable(false)
        .default_width(210.0)
        .show(ctx, |ui| {
            device_selector(launcher, ui);
            ui.separator();
            tool_list(launcher, ui);
            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.add_space(4.0);
                if ui.button(launcher.translator.tr("menu.preferences")).clicked() {
                    launcher.show_prefs_window = true;
                }
                if ui.button(launcher.translator.tr("menu.run_script")).clicked() {
                    launcher.open_script_dialog();
                }
                ui.separator();
            });
        });
}

fn device_selector(launcher: &mut Launcher, ui: &mut egui::Ui) {
    let mut pending_connect: Option<DeviceProfile> = None;
    let mut pending_disconnect = false;

    ui.horizontal(|ui| {
        ui.label(launcher.translator.tr("menu.device"));
        let selected = launcher
            .connected
            .as_ref()
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| launcher.translator.tr("menu.no_device"));
        egui::ComboBox::from_id_salt("device_selector")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for profile in &launcher.profiles {
                    let is_current = launcher.connected.as_ref().map(|p| p.name())
                        == Some(profile.name());
                    if ui.selectable_label(is_current, profile.name()).clicked() && !is_current {
                        pending_connect = Some(profile.clone());
                    }
                }
            });
    });
    if launcher.connected.is_some()
        && ui
            .button(launcher.translator.tr("menu.disconnect"))
            .clicked()
    {
        pending_disconnect = true;
    }

    if let Some(profile) = pending_connect {
        launcher.connect(profile);
    }
    if pending_disconnect {
        launcher.disconnect();
    }
}

fn tool_list(launcher: &mut Launcher, ui: &mut egui::Ui) {
    let rows: Vec<Row> = launcher
        .menu
        .visible_items()
        .map(|it| Row {
            tool: it.tool,
            label: it.label.clone(),
            icon: it.icon,
            detached: it.detached,
            double_click_to_detach: it.double_click_to_detach,
        })
        .collect();

    let active = launcher.active_tool;
    let detach_label = launcher.translator.tr("menu.detach");
    let reattach_label = launcher.translator.tr("menu.reattach");

    let mut clicked: Option<Tool> = None;
    let mut detach_request: Option<(Tool, bool)> = None;

    let response = dnd(ui, "tool_menu_dnd").show(rows.iter(), |ui, row, handle, _state| {
        ui.horizontal(|ui| {
            handle.ui(ui, |ui| {
                ui.label(DOTS_SIX_VERTICAL);
            });
            let is_active = active == Some(row.tool) && !row.detached;
            let resp = ui.selectable_label(is_active, format!("{} {}", row.icon, row.label));
            if resp.double_clicked() && row.double_click_to_detach && !row.detached {
                detach_request = Some((row.tool, true));
            } else if resp.clicked() {
                clicked = Some(row.tool);
            }
            resp.context_menu(|ui| {
                let (label, target) = if row.detached {
                    (&reattach_label, false)
                } else {
                    (&detach_label, true)
                };
                if ui.button(label).clicked() {
                    detach_request = Some((row.tool, target));
                    ui.close();
                }
            });
        });
    });

    // The drag update reports the insertion slot; convert it to the final
    // index of the moved item before handing it to the menu.
    if let Some(update) = response.final_update() {
        let to = update.to - usize::from(update.from < update.to);
        launcher.menu.handle_move(update.from, to);
    }

    if let Some((tool, detached)) = detach_request {
        launcher.menu.set_detached(tool, detached);
    } else if let Some(tool) = clicked {
        launcher.select(tool);
    }
}
