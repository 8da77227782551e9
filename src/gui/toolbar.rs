//! Toolbar Widget
//! Top panel with the drop zone, file info and table actions.

use crate::data::Delimiter;
use egui::{Color32, RichText};

/// What the toolbar needs to know about the current document.
#[derive(Debug, Clone, Default)]
pub struct ToolbarState {
    pub file_name: Option<String>,
    pub delimiter: Option<Delimiter>,
    pub row_count: usize,
    pub column_count: usize,
    pub ragged_rows: usize,
    pub has_table: bool,
    pub is_modified: bool,
    pub is_loading: bool,
    /// Latest progress message from the background load
    pub load_status: Option<String>,
    pub is_hovering_file: bool,
    pub can_open_export: bool,
}

/// Actions triggered by the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    Browse,
    AddRow,
    Export,
    OpenExport,
    CloseFile,
}

pub struct Toolbar;

impl Toolbar {
    /// Hint shown inside the drop zone.
    pub fn drop_hint(state: &ToolbarState) -> &str {
        if state.is_loading {
            state.load_status.as_deref().unwrap_or("Loading CSV file...")
        } else if state.is_hovering_file {
            "Drop the CSV file here ..."
        } else {
            "Drag 'n' drop a CSV file here, or click to select a file"
        }
    }

    /// Draw the toolbar
    pub fn show(ui: &mut egui::Ui, state: &ToolbarState) -> ToolbarAction {
        let mut action = ToolbarAction::None;

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("📝 CSV Editor")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );

            if let Some(name) = &state.file_name {
                ui.add_space(10.0);
                let marker = if state.is_modified { " •" } else { "" };
                ui.label(RichText::new(format!("{name}{marker}")).size(14.0).strong());
            }
        });
        ui.add_space(8.0);

        // ===== Drop Zone =====
        let border = if state.is_hovering_file {
            Color32::from_rgb(100, 149, 237)
        } else {
            Color32::GRAY
        };
        let zone = egui::Frame::none()
            .stroke(egui::Stroke::new(2.0, border))
            .rounding(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(Self::drop_hint(state)).size(14.0));
                });
            });
        let zone = zone.response.interact(egui::Sense::click());
        if !state.is_loading && zone.clicked() {
            action = ToolbarAction::Browse;
        }

        ui.add_space(8.0);

        // ===== Actions =====
        ui.horizontal(|ui| {
            ui.add_enabled_ui(!state.is_loading, |ui| {
                if ui.button("📂 Browse").clicked() {
                    action = ToolbarAction::Browse;
                }
            });

            ui.add_enabled_ui(state.has_table && !state.is_loading, |ui| {
                if ui.button("➕ Add Row").clicked() {
                    action = ToolbarAction::AddRow;
                }
                if ui.button("💾 Download CSV").clicked() {
                    action = ToolbarAction::Export;
                }
                if ui.button("✖ Close").clicked() {
                    action = ToolbarAction::CloseFile;
                }
            });

            if state.can_open_export && ui.button("📄 Open Export").clicked() {
                action = ToolbarAction::OpenExport;
            }

            if state.has_table {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(Self::summary(state))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                    if state.ragged_rows > 0 {
                        ui.label(
                            RichText::new(format!(
                                "⚠ {} row(s) differ from header width",
                                state.ragged_rows
                            ))
                            .size(11.0)
                            .color(Color32::from_rgb(255, 165, 0)),
                        );
                    }
                });
            }
        });

        ui.add_space(5.0);
        action
    }

    fn summary(state: &ToolbarState) -> String {
        let mut text = format!("{} rows, {} columns", state.row_count, state.column_count);
        if let Some(delimiter) = state.delimiter {
            text.push_str(&format!(" · {delimiter}"));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_hint_follows_state() {
        let mut state = ToolbarState::default();
        assert_eq!(
            Toolbar::drop_hint(&state),
            "Drag 'n' drop a CSV file here, or click to select a file"
        );
        state.is_hovering_file = true;
        assert_eq!(Toolbar::drop_hint(&state), "Drop the CSV file here ...");
        state.is_loading = true;
        assert_eq!(Toolbar::drop_hint(&state), "Loading CSV file...");
    }

    #[test]
    fn test_drop_hint_shows_load_progress() {
        let mut state = ToolbarState {
            is_loading: true,
            load_status: Some("Parsing data.csv...".to_string()),
            ..ToolbarState::default()
        };
        assert_eq!(Toolbar::drop_hint(&state), "Parsing data.csv...");

        state.is_loading = false;
        assert_eq!(
            Toolbar::drop_hint(&state),
            "Drag 'n' drop a CSV file here, or click to select a file"
        );
    }

    #[test]
    fn test_summary() {
        let state = ToolbarState {
            row_count: 3,
            column_count: 2,
            delimiter: Some(Delimiter::Tab),
            ..ToolbarState::default()
        };
        assert_eq!(Toolbar::summary(&state), "3 rows, 2 columns · Tab");
    }
}
