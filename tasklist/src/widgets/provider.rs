//! Design system provider.
//!
//! Builds a neutral palette from a seed color and publishes named color
//! tokens to its subtree, both through [`Theme`] and as CSS custom
//! properties on its own `style` attribute.

use std::collections::BTreeMap;

use listdom::{create_color_palette, Color, Document, NodeId, Theme};

use crate::component::{Component, Task};
use crate::context::Context;
use crate::error::HostError;

pub const NEUTRAL_BASE_COLOR_ATTR: &str = "neutral-base-color";
pub const BODY_FONT_ATTR: &str = "body-font";

// Palette offsets for the named tokens, lightest swatch first.
const NAMED_TOKENS: &[(&str, usize)] = &[
    ("neutral-layer-l1", 0),
    ("neutral-fill-stealth-rest", 0),
    ("neutral-fill-stealth-hover", 3),
    ("neutral-fill-active", 5),
    ("neutral-fill-rest", 7),
    ("neutral-fill-stealth-selected", 7),
    ("neutral-fill-hover", 10),
];

/// Token for the darkest swatch.
const FOREGROUND_TOKEN: &str = "neutral-foreground-rest";

/// Provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignSystemConfig {
    /// Seed for the neutral palette.
    pub neutral_base_color: Color,
    pub body_font: String,
    pub palette_steps: usize,
}

impl Default for DesignSystemConfig {
    fn default() -> Self {
        Self {
            neutral_base_color: Color::rgb(0xFF, 0x00, 0x00),
            body_font: "Segoe UI".to_string(),
            palette_steps: 63,
        }
    }
}

impl DesignSystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neutral_base_color(mut self, color: Color) -> Self {
        self.neutral_base_color = color;
        self
    }

    /// Parse the seed from a hex string such as `#336699`.
    pub fn neutral_base_color_str(self, color: &str) -> Result<Self, HostError> {
        let color = Color::parse(color).ok_or_else(|| HostError::InvalidColor(color.to_string()))?;
        Ok(self.neutral_base_color(color))
    }

    pub fn body_font(mut self, font: impl Into<String>) -> Self {
        self.body_font = font.into();
        self
    }

    pub fn palette_steps(mut self, steps: usize) -> Self {
        self.palette_steps = steps.max(1);
        self
    }
}

#[derive(Debug)]
pub struct DesignSystemProvider {
    config: DesignSystemConfig,
    /// Values restored when an attribute is removed.
    defaults: DesignSystemConfig,
    palette: Vec<Color>,
    tokens: BTreeMap<String, Color>,
}

impl Default for DesignSystemProvider {
    fn default() -> Self {
        Self::new(DesignSystemConfig::default())
    }
}

impl DesignSystemProvider {
    pub fn new(config: DesignSystemConfig) -> Self {
        let mut provider = Self {
            defaults: config.clone(),
            config,
            palette: Vec::new(),
            tokens: BTreeMap::new(),
        };
        provider.rebuild();
        provider
    }

    pub fn config(&self) -> &DesignSystemConfig {
        &self.config
    }

    /// The neutral palette, lightest swatch first.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn tokens(&self) -> impl Iterator<Item = (&str, &Color)> {
        self.tokens.iter().map(|(name, color)| (name.as_str(), color))
    }

    fn rebuild(&mut self) {
        self.palette = create_color_palette(&self.config.neutral_base_color, self.config.palette_steps);
        self.tokens.clear();

        let Some(last) = self.palette.len().checked_sub(1) else {
            return;
        };
        for (i, swatch) in self.palette.iter().enumerate() {
            self.tokens.insert(format!("neutral-palette-{i}"), swatch.clone());
        }
        for (name, offset) in NAMED_TOKENS {
            self.tokens
                .insert(name.to_string(), self.palette[(*offset).min(last)].clone());
        }
        self.tokens
            .insert(FOREGROUND_TOKEN.to_string(), self.palette[last].clone());
        log::debug!(
            "[provider] palette rebuilt from {} ({} swatches)",
            self.config.neutral_base_color.to_hex(),
            self.palette.len()
        );
    }

    /// The `style` value publishing the font and named tokens.
    pub fn style(&self) -> String {
        let mut declarations = vec![format!("--body-font: {}", self.config.body_font)];
        declarations.extend(
            NAMED_TOKENS
                .iter()
                .map(|(name, _)| *name)
                .chain([FOREGROUND_TOKEN])
                .filter_map(|name| {
                    let color = self.tokens.get(name)?;
                    Some(format!("--{name}: {}", color.to_hex()))
                }),
        );
        declarations.join("; ")
    }

    /// Apply configuration attributes. Returns true if anything changed.
    fn read_attributes(&mut self, doc: &Document, node: NodeId) -> bool {
        let color = match doc.get_attribute(node, NEUTRAL_BASE_COLOR_ATTR) {
            Some(value) => Color::parse(value).unwrap_or_else(|| {
                log::warn!("[provider] ignoring invalid {NEUTRAL_BASE_COLOR_ATTR} {value:?}");
                self.config.neutral_base_color.clone()
            }),
            None => self.defaults.neutral_base_color.clone(),
        };
        let font = doc
            .get_attribute(node, BODY_FONT_ATTR)
            .unwrap_or(self.defaults.body_font.as_str());

        let mut changed = false;
        if color != self.config.neutral_base_color {
            self.config.neutral_base_color = color;
            changed = true;
        }
        if font != self.config.body_font {
            self.config.body_font = font.to_string();
            changed = true;
        }
        changed
    }

    fn publish(&self, doc: &mut Document, node: NodeId) {
        doc.set_attribute(node, "style", self.style());
    }
}

impl Theme for DesignSystemProvider {
    fn resolve(&self, name: &str) -> Option<&Color> {
        self.tokens.get(name)
    }
}

impl Component for DesignSystemProvider {
    fn connected(&mut self, node: NodeId, cx: &mut Context) {
        if self.read_attributes(cx.doc(), node) {
            self.rebuild();
        }
        self.publish(cx.doc_mut(), node);
    }

    fn attribute_changed(
        &mut self,
        node: NodeId,
        name: &str,
        _old_value: Option<&str>,
        cx: &mut Context,
    ) {
        if name != NEUTRAL_BASE_COLOR_ATTR && name != BODY_FONT_ATTR {
            return;
        }
        if !self.read_attributes(cx.doc(), node) {
            return;
        }
        self.rebuild();
        self.publish(cx.doc_mut(), node);

        // Descendants that paint from tokens pick up the new values.
        for descendant in cx.doc().descendants(node) {
            if cx.doc().is_element(descendant) {
                cx.queue_update(descendant, Task::Render);
            }
        }
    }
}

/// Look up a CSS custom property (`--name`) on `node` or its nearest
/// ancestor that declares it in `style`.
pub fn custom_property(doc: &Document, node: NodeId, name: &str) -> Option<String> {
    std::iter::once(node)
        .chain(doc.ancestors(node))
        .find_map(|id| declared_property(doc.get_attribute(id, "style")?, name))
}

fn declared_property(style: &str, name: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (property, value) = declaration.split_once(':')?;
        (property.trim() == name).then(|| value.trim().to_string())
    })
}
