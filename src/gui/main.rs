use eframe::egui;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::Path;
use std::time::{Duration, Instant};

use gifforge::render::PREVIEW_MAX_DIM;
use gifforge::{
    build_plan, export, render_preview, ExportSettings, FrameList, Preview, DELAY_OPTIONS,
    SETTINGS_FILE,
};

const INPUT_DIR: &str = "gif";
const OUTPUT_DIR: &str = "output";

fn main() -> Result<(), eframe::Error> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GifForge",
        options,
        Box::new(|_cc| Ok(Box::new(GifForgeApp::new()))),
    )
}

struct GifForgeApp {
    frames: FrameList,
    selected: Option<usize>,
    settings: ExportSettings,
    status_message: String,
    thumbnail: Option<egui::TextureHandle>,
    playback: Option<PreviewPlayback>,
}

/// Animated preview state: one texture per decoded frame, advanced on the
/// plan's uniform delay.
struct PreviewPlayback {
    textures: Vec<egui::TextureHandle>,
    delay: Duration,
    current: usize,
    last_advance: Instant,
}

impl PreviewPlayback {
    fn new(preview: Preview, ctx: &egui::Context) -> Self {
        let textures = preview
            .frames
            .iter()
            .enumerate()
            .map(|(i, rgba)| {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [rgba.width() as usize, rgba.height() as usize],
                    rgba.as_raw(),
                );
                ctx.load_texture(
                    format!("preview_frame_{}", i),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            })
            .collect();

        Self {
            textures,
            delay: Duration::from_millis(u64::from(preview.delay_ms)),
            current: 0,
            last_advance: Instant::now(),
        }
    }
}

impl eframe::App for GifForgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("GifForge");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(&self.status_message);
                });
            });
        });

        egui::SidePanel::left("frame_list").show(ctx, |ui| {
            self.show_frame_list(ui, ctx);
        });

        egui::SidePanel::right("settings").show(ctx, |ui| {
            self.show_settings_panel(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_preview_area(ui);
        });

        self.advance_playback(ctx);
    }
}

impl GifForgeApp {
    fn new() -> Self {
        for dir in [INPUT_DIR, OUTPUT_DIR] {
            if let Err(err) = std::fs::create_dir_all(dir) {
                log::warn!("could not create '{}': {}", dir, err);
            }
        }

        let settings = ExportSettings::load_or_default(Path::new(SETTINGS_FILE));

        let (frames, status_message) = match FrameList::scan(Path::new(INPUT_DIR)) {
            Ok(frames) => {
                let message = if frames.is_empty() {
                    show_info(&format!(
                        "Add images to the '{}' folder to build a GIF.",
                        INPUT_DIR
                    ));
                    "No images found".to_string()
                } else {
                    format!("Loaded {} images from '{}'", frames.len(), INPUT_DIR)
                };
                (frames, message)
            }
            Err(err) => {
                show_error(&err.to_string());
                (FrameList::default(), err.to_string())
            }
        };

        Self {
            frames,
            selected: None,
            settings,
            status_message,
            thumbnail: None,
            playback: None,
        }
    }

    fn show_frame_list(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Frame List");
        ui.separator();

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (index, path) in self.frames.paths().iter().enumerate() {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    if ui
                        .selectable_label(self.selected == Some(index), name)
                        .clicked()
                    {
                        clicked = Some(index);
                    }
                }
            });
        if let Some(index) = clicked {
            self.selected = Some(index);
            self.load_thumbnail(ctx);
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("↑ Move Up").clicked() {
                self.move_selected_up();
            }
            if ui.button("↓ Move Down").clicked() {
                self.move_selected_down();
            }
            if ui.button("🗑 Delete").clicked() {
                self.delete_selected(ctx);
            }
        });
    }

    fn show_settings_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Settings");
        ui.separator();

        ui.label("Delay (seconds)");
        egui::ComboBox::from_id_source("delay")
            .selected_text(format!("{:.1}", self.settings.delay))
            .show_ui(ui, |ui| {
                for &option in DELAY_OPTIONS.iter() {
                    ui.selectable_value(&mut self.settings.delay, option, format!("{:.1}", option));
                }
            });

        ui.checkbox(&mut self.settings.random_order, "Random order");

        ui.separator();

        if ui.button("🔄 Preview").clicked() {
            self.build_preview(ctx);
        }
        if ui.button("💾 Create GIF").clicked() {
            self.export_gif();
        }
    }

    fn show_preview_area(&mut self, ui: &mut egui::Ui) {
        let texture = match (&self.playback, &self.thumbnail) {
            (Some(playback), _) => Some(&playback.textures[playback.current]),
            (None, Some(thumbnail)) => Some(thumbnail),
            (None, None) => None,
        };

        ui.centered_and_justified(|ui| match texture {
            Some(texture) => {
                ui.image((texture.id(), texture.size_vec2()));
            }
            None => {
                ui.label("Select an image, or press Preview to play the animation");
            }
        });
    }

    fn advance_playback(&mut self, ctx: &egui::Context) {
        if let Some(playback) = &mut self.playback {
            if playback.textures.len() > 1 && playback.last_advance.elapsed() >= playback.delay {
                playback.current = (playback.current + 1) % playback.textures.len();
                playback.last_advance = Instant::now();
            }
            ctx.request_repaint_after(playback.delay);
        }
    }

    fn move_selected_up(&mut self) {
        if let Some(index) = self.selected {
            if self.frames.move_up(index) {
                self.selected = Some(index - 1);
            }
        }
    }

    fn move_selected_down(&mut self) {
        if let Some(index) = self.selected {
            if self.frames.move_down(index) {
                self.selected = Some(index + 1);
            }
        }
    }

    fn delete_selected(&mut self, ctx: &egui::Context) {
        let Some(index) = self.selected else {
            return;
        };

        let confirmed = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Delete frame")
            .set_description("Remove the selected image from the list?")
            .set_buttons(MessageButtons::YesNo)
            .show();
        if !matches!(confirmed, MessageDialogResult::Yes) {
            return;
        }

        if self.frames.remove(index).is_some() {
            self.thumbnail = None;
            if self.frames.is_empty() {
                self.selected = None;
            } else {
                self.selected = Some(index.min(self.frames.len() - 1));
                self.load_thumbnail(ctx);
            }
            self.status_message = format!("{} images in list", self.frames.len());
        }
    }

    fn load_thumbnail(&mut self, ctx: &egui::Context) {
        self.thumbnail = None;
        self.playback = None;

        let Some(index) = self.selected else {
            return;
        };
        let Some(path) = self.frames.paths().get(index) else {
            return;
        };

        match image::open(path) {
            Ok(img) => {
                let rgba = img.thumbnail(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM).to_rgba8();
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [rgba.width() as usize, rgba.height() as usize],
                    rgba.as_raw(),
                );
                self.thumbnail = Some(ctx.load_texture(
                    "selected_thumbnail",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
            Err(err) => show_error(&format!("Could not preview image: {}", err)),
        }
    }

    fn build_preview(&mut self, ctx: &egui::Context) {
        let plan = match build_plan(&self.frames, &self.settings) {
            Ok(plan) => plan,
            Err(err) => {
                show_error(&err.to_string());
                return;
            }
        };

        match render_preview(&plan) {
            Ok(preview) => {
                self.playback = Some(PreviewPlayback::new(preview, ctx));
                self.status_message = "Preview ready".to_string();
            }
            Err(err) => show_error(&format!("Could not build preview: {}", err)),
        }
    }

    fn export_gif(&mut self) {
        let plan = match build_plan(&self.frames, &self.settings) {
            Ok(plan) => plan,
            Err(err) => {
                show_error(&err.to_string());
                return;
            }
        };

        // Cancelling the dialog aborts silently.
        let Some(dest) = FileDialog::new()
            .add_filter("GIF image", &["gif"])
            .set_directory(OUTPUT_DIR)
            .set_file_name("animation.gif")
            .save_file()
        else {
            return;
        };

        match export(&plan, &dest) {
            Ok(()) => {
                self.settings.save(Path::new(SETTINGS_FILE));
                self.status_message = format!("GIF created: {}", dest.display());
                show_info(&format!("GIF created successfully:\n{}", dest.display()));
            }
            Err(err) => show_error(&format!("Could not create GIF: {}", err)),
        }
    }
}

fn show_error(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .show();
}

fn show_info(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("GifForge")
        .set_description(message)
        .show();
}
