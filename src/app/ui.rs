use eframe::egui::{self, Align, RichText};
use rfd::FileDialog;

use super::{GoArtApp, LoginField, SubmissionStatus};
use crate::upload::{ArtworkField, SelectedImage};
use crate::utils::file_size::format_size;

impl GoArtApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 30.0;
            let content_height = total_height - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(15.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("GO ART!");
                        ui.add_space(3.0);
                        let greeting = self.greeting.as_deref().unwrap_or("Loading...");
                        ui.label(greeting);
                        ui.label(
                            RichText::new("Art gallery starter client")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(15.0);
                    self.render_gallery(ui);

                    ui.add_space(15.0);
                    self.render_login(ui);

                    ui.add_space(15.0);
                    self.render_uploader(ui);

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("API: {}", self.config.base_url))
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.5)),
                );
            });
        });
    }

    fn render_gallery(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(RichText::new("Gallery").strong());
            ui.add_space(5.0);
            for artwork in &self.artworks {
                ui.horizontal(|ui| {
                    ui.label(format!("#{}", artwork.id));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&artwork.title).strong());
                        ui.label(format!("{} | {}", artwork.owner_name, artwork.thumbnail_url));
                    });
                });
                ui.add_space(4.0);
            }
        });
    }

    fn render_login(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(RichText::new("REGISTER / LOGIN").strong());
            ui.add_space(5.0);

            for field in LoginField::ALL {
                ui.horizontal(|ui| {
                    ui.label(field.label());
                    let edit = egui::TextEdit::singleline(self.login.field_mut(field))
                        .password(field.is_password());
                    ui.add(edit);
                });
            }

            ui.add_space(5.0);
            if ui.button("Submit").clicked() {
                self.login.acknowledge();
            }
            if let Some(ack) = &self.login.ack {
                ui.label(ack);
            }
        });
    }

    fn render_uploader(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(RichText::new("New Artwork & Image Upload").strong());
            ui.add_space(8.0);

            for field in ArtworkField::ALL {
                ui.horizontal(|ui| {
                    ui.label(field.label());
                    ui.add(
                        egui::TextEdit::singleline(self.form.field_mut(field))
                            .desired_width(ui.available_width()),
                    );
                });
            }

            ui.add_space(8.0);

            let uploading = self.submission.status == SubmissionStatus::Uploading;

            ui.horizontal(|ui| {
                ui.add_enabled_ui(!uploading, |ui| {
                    if ui.button("🖼 Select Image").clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "gif"])
                            .pick_file()
                        {
                            self.select_image(SelectedImage::from_path(path));
                        }
                    }
                });
                if let Some(image) = &self.form.image {
                    ui.label(format!(
                        "{} ({})",
                        image.file_name,
                        format_size(image.size)
                    ));
                }
            });

            ui.add_space(8.0);

            let can_submit = !self.form.title.is_empty() && self.form.image.is_some() && !uploading;
            ui.vertical_centered(|ui| {
                ui.add_enabled_ui(can_submit, |ui| {
                    let label = if uploading {
                        "Processing..."
                    } else {
                        "Create Artwork & Upload Image"
                    };
                    let button = egui::Button::new(label).min_size(egui::vec2(220.0, 36.0));
                    if ui.add(button).clicked() {
                        self.start_submission();
                    }
                });
            });

            if uploading {
                ui.add_space(8.0);
                let progress_bar =
                    egui::ProgressBar::new(self.submission.percent as f32 / 100.0)
                        .show_percentage()
                        .animate(true);
                ui.add(progress_bar);
            }

            if !self.submission.message.is_empty() {
                ui.add_space(8.0);
                ui.colored_label(
                    self.submission.status_color(),
                    format!("Status: {}", self.submission.message),
                );
            }

            if let Some(url) = self.submission.thumbnail_url(&self.config) {
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    if let Some(receipt) = &self.submission.receipt {
                        ui.label(format!("Preview of Image ID: {}", receipt.image_id));
                    }
                    if ui.link("View thumbnail").clicked() {
                        if let Err(e) = open::that(&url) {
                            tracing::warn!("could not open {url}: {e}");
                        }
                    }
                });
            }
        });
    }
}
