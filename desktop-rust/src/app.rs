use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use eframe::egui::{self, Color32, RichText};

use cableway_common::fields::FieldGroup;
use cableway_common::images::IMAGE_EXTENSIONS;
use cableway_common::export::assembler::ReportOptions;
use cableway_report::config::Config;
use cableway_report::generate_report_with;

use crate::model::AppState;

const LABEL_WIDTH: f32 = 180.0;

pub struct DesktopApp {
    state: AppState,
    config: Config,
    status: String,
    status_ok: bool,
    generate_rx: Option<Receiver<UiMessage>>,
}

enum UiMessage {
    GenerateDone { ok: bool, message: String },
}

impl Default for DesktopApp {
    fn default() -> Self {
        let (config, status) = match Config::load() {
            Ok(config) => (config, String::new()),
            Err(err) => (Config::default(), format!("Config not loaded: {err}")),
        };
        Self {
            state: AppState::default(),
            config,
            status,
            status_ok: true,
            generate_rx: None,
        }
    }
}

impl DesktopApp {
    fn generating(&self) -> bool {
        self.generate_rx.is_some()
    }

    fn set_status(&mut self, ok: bool, message: String) {
        self.status_ok = ok;
        self.status = message;
    }

    fn browse_images(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Image files", IMAGE_EXTENSIONS)
            .pick_files()
        {
            self.add_images(paths);
        }
    }

    fn add_images(&mut self, paths: Vec<PathBuf>) {
        let offered = paths.len();
        let added = self.state.add_images(paths);
        if added < offered {
            self.set_status(false, format!("Ignored {} unsupported file(s)", offered - added));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.add_images(dropped);
        }
    }

    /// Snapshot the form and photos, then build the report off the UI thread
    fn run_generate(&mut self) {
        if self.generating() {
            return;
        }
        let snapshot = match self.state.form.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.set_status(false, format!("Report failed: {err}"));
                return;
            }
        };
        let images = self.state.images.clone();
        let output_dir = self.config.resolve_output_dir(None);
        let options = ReportOptions {
            title: self.config.document_title.clone(),
            ..ReportOptions::default()
        };
        let date = chrono::Local::now().date_naive();

        let (tx, rx) = mpsc::channel();
        self.generate_rx = Some(rx);
        self.set_status(true, "Generating report...".to_string());

        std::thread::spawn(move || {
            let message = match generate_report_with(&snapshot, &images, date, &output_dir, &options) {
                Ok(report) => {
                    let mut message = format!("Report saved as {}", report.file_name);
                    if report.skipped_images > 0 {
                        message.push_str(&format!(" ({} image(s) skipped)", report.skipped_images));
                    }
                    UiMessage::GenerateDone { ok: true, message }
                }
                Err(err) => {
                    let mut message = format!("Report failed: {err}");
                    if let Some(hint) = err.hint() {
                        message.push_str(&format!("\n{hint}"));
                    }
                    UiMessage::GenerateDone { ok: false, message }
                }
            };
            let _ = tx.send(message);
        });
    }

    fn poll_messages(&mut self) {
        let Some(rx) = &self.generate_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(UiMessage::GenerateDone { ok, message }) => {
                self.generate_rx = None;
                self.set_status(ok, message);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.generate_rx = None;
                self.set_status(false, "Report failed: worker stopped".to_string());
            }
        }
    }

    fn render_group(&mut self, ui: &mut egui::Ui, group: FieldGroup) {
        ui.label(RichText::new(group.heading()).strong().size(15.0));
        egui::Grid::new(group.heading())
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for (field, value) in self.state.form.group_mut(group) {
                    ui.add_sized([LABEL_WIDTH, 18.0], egui::Label::new(field.name));
                    ui.text_edit_singleline(value);
                    ui.end_row();
                }
            });
    }

    fn render_images(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(RichText::new("Image Upload").strong());
            ui.label(
                RichText::new("Drag and drop images here or click Browse")
                    .color(Color32::from_gray(150)),
            );
            ui.horizontal(|ui| {
                if ui.button("Browse").clicked() {
                    self.browse_images();
                }
                ui.label(format!("Images: {}", self.state.images.len()));
            });
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        self.render_images(ui);
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let button = egui::Button::new(RichText::new("Generate Report").strong());
            if ui.add_enabled(!self.generating(), button).clicked() {
                self.run_generate();
            }
            if self.generating() {
                ui.spinner();
            }
        });
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_actions(ui);
            if !self.status.is_empty() {
                let color = if self.status_ok {
                    Color32::from_gray(170)
                } else {
                    Color32::from_rgb(230, 90, 80)
                };
                ui.label(RichText::new(&self.status).color(color));
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                self.render_group(ui, FieldGroup::General);
                ui.add_space(8.0);
                self.render_group(ui, FieldGroup::Cable);
            });
        });

        if self.generating() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
