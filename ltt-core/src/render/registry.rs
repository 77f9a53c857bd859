use std::collections::HashMap;

use super::{DocumentRenderer, RenderError};

/// Document renderers keyed by [`DocumentRenderer::format_name`].
///
/// Typical lifetime:
/// 1. Create with `RendererRegistry::new()`.
/// 2. Call `register` once per available format.
/// 3. Call `get` whenever the user asks for an export.
pub struct RendererRegistry {
    renderers: HashMap<&'static str, Box<dyn DocumentRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers a renderer, replacing any earlier one with the same format name.
    pub fn register(
        &mut self,
        renderer: Box<dyn DocumentRenderer>,
    ) {
        self.renderers.insert(renderer.format_name(), renderer);
    }

    /// Names of every registered format, sorted alphabetically.
    pub fn available_formats(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.renderers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Looks up the renderer for `format` (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownFormat`] when nothing is registered under that name.
    pub fn get(
        &self,
        format: &str,
    ) -> Result<&dyn DocumentRenderer, RenderError> {
        self.renderers
            .get(format.trim().to_ascii_lowercase().as_str())
            .map(|renderer| renderer.as_ref())
            .ok_or_else(|| RenderError::UnknownFormat {
                requested: format.to_string(),
                available: self.available_formats(),
            })
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}
