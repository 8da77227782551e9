//! CSV Editor Main Application
//! Main window with toolbar, editable table and notices.

use crate::config::EditorConfig;
use crate::data::{CsvExporter, CsvLoader, CsvTable, Delimiter, LoadOptions, LoadedFile};
use crate::gui::{Notices, TableAction, TableView, Toolbar, ToolbarAction, ToolbarState};
use egui::{Color32, RichText};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Box<LoadedFile>),
    Error(String),
}

/// Where a file to load comes from
enum LoadSource {
    Path(PathBuf),
    Bytes { name: String, bytes: Arc<[u8]> },
}

impl LoadSource {
    fn display_name(&self) -> String {
        match self {
            LoadSource::Path(path) => file_name(path),
            LoadSource::Bytes { name, .. } => name.clone(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether a window close should be cancelled. `ask` is only consulted
/// when there is something to lose.
fn should_cancel_close(has_unsaved_changes: bool, ask: impl FnOnce() -> bool) -> bool {
    has_unsaved_changes && !ask()
}

/// The file currently being edited.
struct OpenDocument {
    table: CsvTable,
    name: String,
    path: Option<PathBuf>,
    delimiter: Delimiter,
}

/// Main application window.
pub struct CsvEditorApp {
    config: EditorConfig,
    load_options: LoadOptions,
    document: Option<OpenDocument>,
    table_view: TableView,
    notices: Notices,
    last_export: Option<PathBuf>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    loading_name: Option<String>,
    load_status: Option<String>,
}

impl CsvEditorApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: EditorConfig,
        load_options: LoadOptions,
        startup_path: Option<PathBuf>,
    ) -> Self {
        let notices = Notices::new(Duration::from_secs_f32(config.notice_seconds));
        let mut app = Self {
            config,
            load_options,
            document: None,
            table_view: TableView::new(),
            notices,
            last_export: None,
            load_rx: None,
            is_loading: false,
            loading_name: None,
            load_status: None,
        };

        if let Some(path) = startup_path {
            app.start_load(LoadSource::Path(path));
        }
        app
    }

    fn has_unsaved_changes(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|doc| doc.table.is_modified())
    }

    /// Ask before throwing away unsaved edits.
    fn confirm_discard(&self) -> bool {
        let Some(doc) = &self.document else {
            return true;
        };
        if !doc.table.is_modified() {
            return true;
        }

        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title("Unsaved changes")
            .set_description(format!("Discard unsaved changes to {}?", doc.name))
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        answer == rfd::MessageDialogResult::Yes
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading || !self.confirm_discard() {
            return;
        }

        let mut dialog = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "tsv", "psv", "txt"])
            .add_filter("All Files", &["*"]);
        if let Some(dir) = self.current_dir() {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.pick_file() {
            self.start_load(LoadSource::Path(path));
        }
    }

    /// Handle files dropped onto the window. Only the first one is opened.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(first) = dropped.first() else {
            return;
        };

        if self.is_loading {
            self.notices.info("Still loading the previous file");
            return;
        }
        if dropped.len() > 1 {
            self.notices
                .info(format!("{} files dropped, opening the first", dropped.len()));
        }
        if !self.confirm_discard() {
            return;
        }

        let source = if let Some(path) = &first.path {
            LoadSource::Path(path.clone())
        } else if let Some(bytes) = &first.bytes {
            LoadSource::Bytes {
                name: first.name.clone(),
                bytes: bytes.clone(),
            }
        } else {
            tracing::warn!(name = %first.name, "Dropped file has neither path nor contents");
            self.notices.error("Could not read the dropped file");
            return;
        };

        self.start_load(source);
    }

    /// Parse the file in a background thread
    fn start_load(&mut self, source: LoadSource) {
        let name = source.display_name();
        tracing::info!(file = %name, "Loading CSV");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.load_status = None;
        self.loading_name = Some(name.clone());

        let options = self.load_options;
        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!("Reading {name}...")));

            let result = match &source {
                LoadSource::Path(path) => CsvLoader::load_path(path, options),
                LoadSource::Bytes { name, bytes } => {
                    let _ = tx.send(LoadResult::Progress(format!(
                        "Parsing {name} ({} bytes)...",
                        bytes.len()
                    )));
                    CsvLoader::load_bytes(bytes, Some(Path::new(name)), options)
                }
            };

            match result {
                Ok(loaded) => {
                    let _ = tx.send(LoadResult::Complete(Box::new(loaded)));
                }
                Err(e) => {
                    tracing::warn!(file = %source.display_name(), error = %e, "Failed to load CSV");
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        tracing::debug!("{status}");
                        self.load_status = Some(status);
                    }
                    LoadResult::Complete(loaded) => {
                        let LoadedFile {
                            path,
                            table,
                            delimiter,
                            encoding,
                        } = *loaded;
                        let name = self
                            .loading_name
                            .take()
                            .unwrap_or_else(|| "untitled.csv".to_string());

                        tracing::info!(file = %name, %delimiter, encoding, "Opened CSV");
                        let ragged = table.ragged_rows().len();
                        self.notices.success(format!(
                            "Loaded {} rows, {} columns",
                            table.row_count(),
                            table.column_count()
                        ));
                        if ragged > 0 {
                            self.notices.info(format!(
                                "{ragged} row(s) do not match the header width"
                            ));
                        }

                        self.document = Some(OpenDocument {
                            table,
                            name,
                            path,
                            delimiter,
                        });
                        self.table_view.rows_shifted();
                        self.last_export = None;
                        self.load_status = None;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.notices.error(format!("Error: {error}"));
                        self.loading_name = None;
                        self.load_status = None;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn current_dir(&self) -> Option<PathBuf> {
        self.document
            .as_ref()
            .and_then(|doc| doc.path.as_ref())
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
    }

    fn handle_add_row(&mut self) {
        if let Some(doc) = &mut self.document {
            let row = doc.table.add_row();
            self.table_view.scroll_to(row);
        }
    }

    fn apply_table_action(&mut self, action: TableAction) {
        let Some(doc) = &mut self.document else {
            return;
        };

        let result = match action {
            TableAction::EditCell { row, col, value } => doc.table.set_cell(row, col, value),
            TableAction::DeleteRow(row) => match doc.table.delete_row(row) {
                Ok(_) => {
                    self.table_view.rows_shifted();
                    self.notices.info(format!("Row {} deleted", row + 1));
                    Ok(())
                }
                Err(e) => Err(e),
            },
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Table edit rejected");
            self.notices.error(e.to_string());
        }
    }

    /// Handle CSV export - ask for a target and write the table
    fn handle_export(&mut self) {
        let Some(source) = self.document.as_ref().map(|doc| doc.delimiter) else {
            self.notices.info("No data to export");
            return;
        };

        let options = self.config.export_options(source);
        let extension = options.delimiter.extension();
        let mut dialog = rfd::FileDialog::new()
            .add_filter(
                format!("{} Files", extension.to_ascii_uppercase()),
                &[extension],
            )
            .add_filter("All Files", &["*"])
            .set_file_name(self.config.export_file_name(options.delimiter));
        if let Some(dir) = self.current_dir() {
            dialog = dialog.set_directory(dir);
        }
        let Some(output_path) = dialog.save_file() else {
            return; // User cancelled
        };

        let Some(doc) = &mut self.document else {
            return;
        };
        match CsvExporter::write_path(&doc.table, &output_path, options) {
            Ok(_) => {
                doc.table.mark_saved();
                self.notices.success(format!(
                    "Saved {} rows to {}",
                    doc.table.row_count(),
                    file_name(&output_path)
                ));
                self.last_export = Some(output_path);
            }
            Err(e) => {
                tracing::error!(path = %output_path.display(), error = %e, "Export failed");
                self.notices.error(format!("Export error: {e}"));
            }
        }
    }

    fn handle_open_export(&mut self) {
        if let Some(path) = &self.last_export {
            if let Err(e) = open::that(path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to open export");
                self.notices.error(format!("Could not open {}: {e}", file_name(path)));
            }
        }
    }

    fn handle_close(&mut self) {
        if self.confirm_discard() {
            self.document = None;
            self.last_export = None;
            self.table_view.rows_shifted();
        }
    }

    /// Window close was requested; keep the window open unless the user
    /// agrees to drop unsaved edits.
    fn handle_close_request(&self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        if should_cancel_close(self.has_unsaved_changes(), || self.confirm_discard()) {
            tracing::debug!("Window close cancelled, unsaved changes kept");
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }
    }

    fn toolbar_state(&self, ctx: &egui::Context) -> ToolbarState {
        let is_hovering_file = ctx.input(|i| !i.raw.hovered_files.is_empty());
        match &self.document {
            Some(doc) => ToolbarState {
                file_name: Some(doc.name.clone()),
                delimiter: Some(doc.delimiter),
                row_count: doc.table.row_count(),
                column_count: doc.table.column_count(),
                ragged_rows: doc.table.ragged_rows().len(),
                has_table: true,
                is_modified: doc.table.is_modified(),
                is_loading: self.is_loading,
                load_status: self.load_status.clone(),
                is_hovering_file,
                can_open_export: self.last_export.is_some(),
            },
            None => ToolbarState {
                file_name: self.loading_name.clone(),
                is_loading: self.is_loading,
                load_status: self.load_status.clone(),
                is_hovering_file,
                ..ToolbarState::default()
            },
        }
    }

    fn show_drop_overlay(ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_overlay"),
        ));
        painter.rect_filled(screen, 0.0, Color32::from_black_alpha(160));
        painter.text(
            screen.center(),
            egui::Align2::CENTER_CENTER,
            "Drop the CSV file here ...",
            egui::FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

impl eframe::App for CsvEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.handle_dropped_files(ctx);
        self.handle_close_request(ctx);

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        let state = self.toolbar_state(ctx);

        // Top panel - Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            match Toolbar::show(ui, &state) {
                ToolbarAction::Browse => self.handle_browse_csv(),
                ToolbarAction::AddRow => self.handle_add_row(),
                ToolbarAction::Export => self.handle_export(),
                ToolbarAction::OpenExport => self.handle_open_export(),
                ToolbarAction::CloseFile => self.handle_close(),
                ToolbarAction::None => {}
            }
        });

        // Central panel - Table
        egui::CentralPanel::default().show(ctx, |ui| {
            let actions = match &self.document {
                Some(doc) => self.table_view.show(ui, &doc.table),
                None if self.is_loading => {
                    ui.centered_and_justified(|ui| ui.spinner());
                    Vec::new()
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No Data").size(20.0).color(Color32::GRAY));
                    });
                    Vec::new()
                }
            };
            for action in actions {
                self.apply_table_action(action);
            }
        });

        if state.is_hovering_file {
            Self::show_drop_overlay(ctx);
        }

        self.notices.show(ctx);
    }
}
