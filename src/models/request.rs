use crate::error::{ConceptifyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_RESULTS: u8 = 1;
pub const MAX_RESULTS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "3:4")]
    ClassicPortrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Classic,
        AspectRatio::ClassicPortrait,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::ClassicPortrait => "3:4",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = ConceptifyError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == trimmed)
            .ok_or_else(|| {
                ConceptifyError::InvalidRequest(format!(
                    "unsupported aspect ratio '{}', expected one of 1:1, 16:9, 9:16, 4:3, 3:4",
                    trimmed
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Art,
    Photography,
}

/// Visual style offered by the form; drives both the prompt suffix and the medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStyle {
    SimpleDiagram,
    DetailedLabeledDiagram,
    RealisticScene,
    ComicStyle,
}

impl ImageStyle {
    pub const ALL: [ImageStyle; 4] = [
        ImageStyle::SimpleDiagram,
        ImageStyle::DetailedLabeledDiagram,
        ImageStyle::RealisticScene,
        ImageStyle::ComicStyle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ImageStyle::SimpleDiagram => "Simple diagram",
            ImageStyle::DetailedLabeledDiagram => "Detailed labeled diagram",
            ImageStyle::RealisticScene => "Realistic scene",
            ImageStyle::ComicStyle => "Comic-style",
        }
    }

    pub fn medium(&self) -> Medium {
        match self {
            ImageStyle::RealisticScene => Medium::Photography,
            _ => Medium::Art,
        }
    }

    pub fn apply_to(&self, prompt: &str) -> String {
        format!("{}, in {} style", prompt.trim(), self.label().to_lowercase())
    }
}

impl Default for ImageStyle {
    fn default() -> Self {
        ImageStyle::SimpleDiagram
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ImageStyle {
    type Err = ConceptifyError;

    // Accepts the form labels as well as kebab-case CLI spellings.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        ImageStyle::ALL
            .into_iter()
            .find(|style| style.label().to_lowercase().replace('-', " ") == wanted)
            .ok_or_else(|| ConceptifyError::InvalidRequest(format!("unknown image style '{}'", s.trim())))
    }
}

/// Body of the text-to-image call. Field names are the wire names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub num_results: u8,
    pub aspect_ratio: AspectRatio,
    pub sync: bool,
    pub enhance_image: bool,
    pub medium: Medium,
    pub prompt_enhancement: bool,
    pub content_moderation: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            num_results: 1,
            aspect_ratio: AspectRatio::default(),
            sync: true,
            enhance_image: true,
            medium: Medium::Art,
            prompt_enhancement: true,
            content_moderation: false,
        }
    }

    pub fn with_num_results(mut self, num_results: u8) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_medium(mut self, medium: Medium) -> Self {
        self.medium = medium;
        self
    }

    pub fn with_enhance_image(mut self, enabled: bool) -> Self {
        self.enhance_image = enabled;
        self
    }

    pub fn with_prompt_enhancement(mut self, enabled: bool) -> Self {
        self.prompt_enhancement = enabled;
        self
    }

    pub fn with_content_moderation(mut self, enabled: bool) -> Self {
        self.content_moderation = enabled;
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ConceptifyError::InvalidRequest("prompt must not be empty".into()));
        }
        if !(MIN_RESULTS..=MAX_RESULTS).contains(&self.num_results) {
            return Err(ConceptifyError::InvalidRequest(format!(
                "number of images must be between {} and {}, got {}",
                MIN_RESULTS, MAX_RESULTS, self.num_results
            )));
        }
        Ok(())
    }
}

/// Raw values as typed into the form, before validation.
#[derive(Debug, Clone)]
pub struct GenerationForm {
    pub prompt: String,
    pub num_images: u8,
    pub aspect_ratio: String,
    pub enhance_image: bool,
    pub style: String,
    /// Wait for the images to be rendered before the call returns.
    pub sync: bool,
}

impl Default for GenerationForm {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            num_images: 1,
            aspect_ratio: AspectRatio::default().to_string(),
            enhance_image: true,
            style: ImageStyle::default().label().to_string(),
            sync: true,
        }
    }
}

impl GenerationForm {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn to_request(&self) -> Result<GenerationRequest> {
        let aspect_ratio: AspectRatio = self.aspect_ratio.parse()?;
        let style: ImageStyle = self.style.parse()?;
        if self.prompt.trim().is_empty() {
            return Err(ConceptifyError::InvalidRequest(
                "describe your concept before generating".into(),
            ));
        }

        let request = GenerationRequest::new(style.apply_to(&self.prompt))
            .with_num_results(self.num_images)
            .with_aspect_ratio(aspect_ratio)
            .with_enhance_image(self.enhance_image)
            .with_medium(style.medium())
            .with_sync(self.sync);
        request.validate()?;
        Ok(request)
    }
}
