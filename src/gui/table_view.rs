//! Table View Widget
//! Scrollable editable grid: one text input per cell and a delete button per row.
//! Only the visible rows are laid out, so large tables stay responsive.

use crate::data::CsvTable;
use egui::{Color32, RichText, ScrollArea};

const ROW_HEIGHT: f32 = 24.0;
const CELL_WIDTH: f32 = 160.0;
const INDEX_WIDTH: f32 = 48.0;
const ACTIONS_WIDTH: f32 = 60.0;

/// Edits requested by the grid, applied by the app after drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    EditCell {
        row: usize,
        col: usize,
        value: String,
    },
    DeleteRow(usize),
}

#[derive(Default)]
pub struct TableView {
    scroll_to_row: Option<usize>,
    /// Bumped whenever rows move, so text edits never inherit the focus or
    /// cursor of the row that used to sit at their index.
    generation: u64,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring a row into view on the next frame.
    pub fn scroll_to(&mut self, row: usize) {
        self.scroll_to_row = Some(row);
    }

    /// Rows were removed or replaced; forget per-cell widget state.
    pub fn rows_shifted(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn cell_id(&self, row: usize, col: usize) -> egui::Id {
        egui::Id::new(("csv_cell", self.generation, row, col))
    }

    pub fn show(&mut self, ui: &mut egui::Ui, table: &CsvTable) -> Vec<TableAction> {
        let mut actions = Vec::new();

        if table.headers().is_empty() && table.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return actions;
        }

        let width = table.column_count();
        let row_stride = ROW_HEIGHT + ui.spacing().item_spacing.y;
        let scroll_offset = self.scroll_to_row.take().map(|row| row as f32 * row_stride);
        let view = &*self;

        ScrollArea::horizontal()
            .id_salt("table_h")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    // ===== Header =====
                    ui.horizontal(|ui| {
                        ui.add_sized([INDEX_WIDTH, ROW_HEIGHT], egui::Label::new(""));
                        for header in table.headers() {
                            ui.add_sized(
                                [CELL_WIDTH, ROW_HEIGHT],
                                egui::Label::new(RichText::new(header).strong()).truncate(),
                            );
                        }
                        ui.add_sized(
                            [ACTIONS_WIDTH, ROW_HEIGHT],
                            egui::Label::new(RichText::new("Actions").strong()),
                        );
                    });
                    ui.separator();

                    if table.is_empty() {
                        ui.label(
                            RichText::new("No rows. Use Add Row to create one.")
                                .color(Color32::GRAY),
                        );
                        return;
                    }

                    let mut rows_area = ScrollArea::vertical()
                        .id_salt("table_v")
                        .auto_shrink([false, false]);
                    if let Some(offset) = scroll_offset {
                        rows_area = rows_area.vertical_scroll_offset(offset);
                    }

                    rows_area.show_rows(ui, ROW_HEIGHT, table.row_count(), |ui, row_range| {
                        for row in row_range {
                            let Some(cells) = table.row(row) else {
                                continue;
                            };
                            ui.horizontal(|ui| {
                                let index_color = if cells.len() == width {
                                    Color32::GRAY
                                } else {
                                    Color32::from_rgb(255, 165, 0)
                                };
                                ui.add_sized(
                                    [INDEX_WIDTH, ROW_HEIGHT],
                                    egui::Label::new(
                                        RichText::new((row + 1).to_string()).color(index_color),
                                    ),
                                );

                                for (col, cell) in cells.iter().enumerate() {
                                    let mut value = cell.clone();
                                    let response = ui.add_sized(
                                        [CELL_WIDTH, ROW_HEIGHT],
                                        egui::TextEdit::singleline(&mut value)
                                            .id(view.cell_id(row, col)),
                                    );
                                    if response.changed() {
                                        actions.push(TableAction::EditCell { row, col, value });
                                    }
                                }

                                // Keep the delete buttons aligned for short rows.
                                let missing = width.saturating_sub(cells.len());
                                if missing > 0 {
                                    ui.add_space(
                                        missing as f32 * (CELL_WIDTH + ui.spacing().item_spacing.x),
                                    );
                                }

                                if ui
                                    .add_sized(
                                        [ACTIONS_WIDTH, ROW_HEIGHT],
                                        egui::Button::new(
                                            RichText::new("🗑").color(Color32::from_rgb(220, 53, 69)),
                                        ),
                                    )
                                    .on_hover_text("Delete row")
                                    .clicked()
                                {
                                    actions.push(TableAction::DeleteRow(row));
                                }
                            });
                        }
                    });
                });
            });

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ids_are_stable_between_frames() {
        let view = TableView::new();
        assert_eq!(view.cell_id(2, 1), view.cell_id(2, 1));
        assert_ne!(view.cell_id(2, 1), view.cell_id(1, 2));
    }

    #[test]
    fn test_cell_ids_change_after_rows_shift() {
        let mut view = TableView::new();
        let before = view.cell_id(0, 0);
        view.rows_shifted();
        assert_ne!(view.cell_id(0, 0), before);
    }
}
