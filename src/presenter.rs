use crate::{app::Presenter, error::Result, models::FetchedImage};
use chrono::Utc;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Terminal presenter: prints status lines and writes images to a directory.
pub struct ConsolePresenter {
    output_dir: PathBuf,
    run_stamp: String,
    saved: Vec<PathBuf>,
    colors: bool,
}

impl ConsolePresenter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            run_stamp: Utc::now().format("%Y%m%d_%H%M%S").to_string(),
            saved: Vec::new(),
            colors: true,
        }
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn saved_files(&self) -> &[PathBuf] {
        &self.saved
    }

    fn save(&mut self, image: &FetchedImage) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let filename = format!(
            "concept_{}_{}.{}",
            self.run_stamp,
            image.index + 1,
            image.extension()
        );
        let path = self.output_dir.join(filename);
        fs::write(&path, &image.bytes)?;
        self.saved.push(path.clone());
        Ok(path)
    }

    fn line(&self, message: &str, color: Color) {
        if self.colors {
            println!("{}", message.color(color).bold());
        } else {
            println!("{}", message);
        }
    }
}

impl Presenter for ConsolePresenter {
    fn busy(&mut self, message: &str) {
        self.line(message, Color::Cyan);
    }

    fn success(&mut self, message: &str) {
        self.line(message, Color::Green);
    }

    fn warning(&mut self, message: &str) {
        self.line(&format!("⚠️  {}", message), Color::Yellow);
    }

    fn error(&mut self, message: &str) {
        self.line(&format!("❌ {}", message), Color::Red);
    }

    fn image(&mut self, image: &FetchedImage) {
        match self.save(image) {
            Ok(path) => {
                log::info!("💾 Image {} saved to: {}", image.index + 1, path.display());
                self.line(
                    &format!("🖼️  Image {}: {} ({} bytes)", image.index + 1, path.display(), image.bytes.len()),
                    Color::White,
                );
            }
            Err(e) => {
                log::error!("❌ Failed to save image {}: {}", image.index + 1, e);
                self.warning(&format!("Could not save image {}: {}", image.index + 1, e));
            }
        }
    }
}
