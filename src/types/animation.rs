//! Animation definitions: frames with durations and named tags.

use serde::Serialize;

use crate::error::{FactoryError, Result};

use super::PixelTemplate;

/// One animation frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub template: PixelTemplate,
    /// Display duration in milliseconds.
    pub duration_ms: u32,
}

/// A named, contiguous frame range. `from` and `to` are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    #[serde(skip)]
    pub name: String,
    pub from: usize,
    pub to: usize,
}

/// An ordered list of frames plus tags over them.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    frames: Vec<Frame>,
    tags: Vec<Tag>,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `templates` as frames with a shared duration and tag them.
    pub fn push_sequence(
        &mut self,
        tag: impl Into<String>,
        templates: Vec<PixelTemplate>,
        duration_ms: u32,
    ) -> Result<()> {
        let tag = tag.into();
        if templates.is_empty() {
            return Err(FactoryError::Build {
                message: format!("Animation tag '{}' has no frames", tag),
                help: None,
            });
        }
        if self.tags.iter().any(|t| t.name == tag) {
            return Err(FactoryError::Build {
                message: format!("Animation tag '{}' is defined twice", tag),
                help: None,
            });
        }

        let from = self.frames.len() + 1;
        for template in templates {
            self.frames.push(Frame {
                template,
                duration_ms,
            });
        }
        self.tags.push(Tag {
            name: tag,
            from,
            to: self.frames.len(),
        });
        Ok(())
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame dimensions, or `None` for an empty animation.
    pub fn size(&self) -> Option<(usize, usize)> {
        self.frames
            .first()
            .map(|f| (f.template.width(), f.template.height()))
    }

    /// Check frame sizes agree and every tag range lies within the frames.
    pub fn check(&self) -> Result<()> {
        if let Some((w, h)) = self.size() {
            for (i, frame) in self.frames.iter().enumerate() {
                let size = (frame.template.width(), frame.template.height());
                if size != (w, h) {
                    return Err(FactoryError::Build {
                        message: format!(
                            "Frame {} is {}x{}, expected {}x{}",
                            i + 1,
                            size.0,
                            size.1,
                            w,
                            h
                        ),
                        help: None,
                    });
                }
            }
        }
        for tag in &self.tags {
            if tag.from == 0 || tag.from > tag.to || tag.to > self.frames.len() {
                return Err(FactoryError::Build {
                    message: format!(
                        "Tag '{}' spans frames {}-{} outside 1-{}",
                        tag.name,
                        tag.from,
                        tag.to,
                        self.frames.len()
                    ),
                    help: None,
                });
            }
        }
        Ok(())
    }
}
