//! Notices Widget
//! Short-lived status messages stacked in the bottom-right corner.

use egui::{Color32, RichText};
use std::time::{Duration, Instant};

const MAX_NOTICES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    fn color(self) -> Color32 {
        match self {
            NoticeKind::Info => Color32::from_rgb(100, 149, 237),
            NoticeKind::Success => Color32::from_rgb(40, 167, 69),
            NoticeKind::Error => Color32::from_rgb(220, 53, 69),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    created: Instant,
}

/// Info and success notices expire; errors stay until dismissed.
pub struct Notices {
    items: Vec<Notice>,
    lifetime: Duration,
}

impl Notices {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into(), Instant::now());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into(), Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into(), Instant::now());
    }

    fn push(&mut self, kind: NoticeKind, text: String, created: Instant) {
        self.items.push(Notice {
            kind,
            text,
            created,
        });
        if self.items.len() > MAX_NOTICES {
            self.items.remove(0);
        }
    }

    /// Drop expired notices.
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.items.retain(|n| {
            n.kind == NoticeKind::Error || now.saturating_duration_since(n.created) < lifetime
        });
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    #[cfg(test)]
    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    /// Whether any notice is waiting to expire.
    pub fn has_pending_expiry(&self) -> bool {
        self.items.iter().any(|n| n.kind != NoticeKind::Error)
    }

    /// Draw the notice stack.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.items.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for (i, notice) in self.items.iter().enumerate() {
                    egui::Frame::none()
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .stroke(egui::Stroke::new(1.5, notice.kind.color()))
                        .rounding(6.0)
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&notice.text).color(notice.kind.color()));
                                if ui.small_button("✖").clicked() {
                                    dismissed = Some(i);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(i) = dismissed {
            self.dismiss(i);
        }

        if self.has_pending_expiry() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
