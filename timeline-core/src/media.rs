//! Image candidates for a card: modern formats first, the original last.
//!
//! Every raster image is expected to have `.avif` and `.webp` siblings with
//! the same base name. The browser picks a `<source>` by type alone and does
//! not move on when that file is missing, so a failed alternate moves the
//! card to [`MediaStage::OriginalOnly`] and it is rendered again with just
//! the original.

use serde::{Deserialize, Serialize};

/// Image encodings the renderer knows how to offer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Avif,
    Webp,
    Png,
    Jpeg,
    Other,
}

impl ImageFormat {
    /// MIME type used for `<source type>`; `None` for formats every browser
    /// decodes anyway.
    pub fn mime(self) -> Option<&'static str> {
        match self {
            ImageFormat::Avif => Some("image/avif"),
            ImageFormat::Webp => Some("image/webp"),
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Other => None,
        }
    }

    fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "avif" => ImageFormat::Avif,
            "webp" => ImageFormat::Webp,
            _ => ImageFormat::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageCandidate {
    pub src: String,
    pub format: ImageFormat,
}

/// Resolved image for one card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageSource {
    /// Candidates in preference order; the last one is always `original`.
    pub candidates: Vec<ImageCandidate>,
    /// Path as written in the data, or the placeholder.
    pub original: String,
    pub is_placeholder: bool,
}

impl ImageSource {
    /// Resolves `image_path`, substituting `placeholder` when it is absent or
    /// empty.
    ///
    /// Only `png`, `jpg` and `jpeg` paths (any case) get `avif`/`webp`
    /// siblings; the placeholder is offered as-is.
    pub fn resolve(image_path: Option<&str>, placeholder: &str) -> Self {
        let Some(path) = image_path.filter(|path| !path.is_empty()) else {
            return Self {
                candidates: vec![ImageCandidate {
                    src: placeholder.to_string(),
                    format: format_of(placeholder),
                }],
                original: placeholder.to_string(),
                is_placeholder: true,
            };
        };

        let mut candidates = Vec::with_capacity(3);
        if let Some(base) = raster_base(path) {
            candidates.push(ImageCandidate {
                src: format!("{base}.avif"),
                format: ImageFormat::Avif,
            });
            candidates.push(ImageCandidate {
                src: format!("{base}.webp"),
                format: ImageFormat::Webp,
            });
        }
        candidates.push(ImageCandidate {
            src: path.to_string(),
            format: format_of(path),
        });

        Self {
            candidates,
            original: path.to_string(),
            is_placeholder: false,
        }
    }

    /// Candidate paths in preference order.
    pub fn sources(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.src.as_str()).collect()
    }

    /// Alternate-format candidates, i.e. everything except the original.
    pub fn alternates(&self) -> &[ImageCandidate] {
        let len = self.candidates.len().saturating_sub(1);
        &self.candidates[..len]
    }

    /// First candidate whose format `supports` accepts; the original when
    /// none of the alternates are decodable.
    pub fn select(&self, supports: impl Fn(ImageFormat) -> bool) -> &str {
        self.alternates()
            .iter()
            .find(|candidate| supports(candidate.format))
            .map_or(self.original.as_str(), |candidate| candidate.src.as_str())
    }

    /// The same image with every alternate format dropped.
    pub fn without_alternates(&self) -> Self {
        Self {
            candidates: vec![ImageCandidate {
                src: self.original.clone(),
                format: format_of(&self.original),
            }],
            original: self.original.clone(),
            is_placeholder: self.is_placeholder,
        }
    }

    /// Candidates to render at `stage`.
    pub fn for_stage(&self, stage: MediaStage) -> Self {
        match stage {
            MediaStage::Candidates => self.clone(),
            MediaStage::OriginalOnly => self.without_alternates(),
        }
    }

    /// Whether `src` is one of the alternates. The browser reports resolved
    /// URLs, so a path matching the tail of `src` counts.
    pub fn is_alternate(&self, src: &str) -> bool {
        self.alternates()
            .iter()
            .any(|candidate| src.ends_with(candidate.src.as_str()))
    }
}

/// Which candidates a card is currently offering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaStage {
    #[default]
    Candidates,
    OriginalOnly,
}

impl MediaStage {
    /// Stage after the displayed image failed to load from `failed_src`.
    ///
    /// A failed alternate falls back to the original. A failed original
    /// stays where it is.
    pub fn after_error(self, image: &ImageSource, failed_src: &str) -> Self {
        match self {
            MediaStage::Candidates if image.is_alternate(failed_src) => MediaStage::OriginalOnly,
            stage => stage,
        }
    }
}

/// Base name of a `png`/`jpg`/`jpeg` path, extension stripped.
fn raster_base(path: &str) -> Option<&str> {
    let (base, ext) = path.rsplit_once('.')?;
    if ext.contains('/') {
        return None;
    }
    match ImageFormat::from_extension(ext) {
        ImageFormat::Png | ImageFormat::Jpeg => Some(base),
        _ => None,
    }
}

fn format_of(path: &str) -> ImageFormat {
    match path.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => ImageFormat::from_extension(ext),
        _ => ImageFormat::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_directories_are_not_extensions() {
        let source = ImageSource::resolve(Some("/assets.v2/diagram"), "/p.jpg");
        assert_eq!(source.sources(), vec!["/assets.v2/diagram"]);
    }

    #[test]
    fn only_the_last_extension_is_replaced() {
        let source = ImageSource::resolve(Some("/img/a.b.JPEG"), "/p.jpg");
        assert_eq!(
            source.sources(),
            vec!["/img/a.b.avif", "/img/a.b.webp", "/img/a.b.JPEG"]
        );
    }

    #[test]
    fn a_missing_webp_also_falls_back() {
        let source = ImageSource::resolve(Some("/img/x.jpg"), "/p.jpg");
        assert_eq!(
            MediaStage::Candidates.after_error(&source, "/img/x.webp"),
            MediaStage::OriginalOnly
        );
        assert_eq!(
            MediaStage::Candidates.after_error(&source, "/img/x.jpg"),
            MediaStage::Candidates
        );
    }
}
