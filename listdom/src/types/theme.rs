use super::color::Color;

/// A theme provides named color variables.
pub trait Theme {
    /// Resolve a color variable name to a concrete color.
    /// Returns None if the variable is not defined.
    fn resolve(&self, name: &str) -> Option<&Color>;
}

/// Default empty theme that resolves nothing.
pub struct EmptyTheme;

impl Theme for EmptyTheme {
    fn resolve(&self, _name: &str) -> Option<&Color> {
        None
    }
}

/// Context for resolving color variables.
pub struct ColorContext<'a> {
    theme: &'a dyn Theme,
}

// Guards against themes whose variables refer to each other.
const MAX_VAR_DEPTH: usize = 16;

impl<'a> ColorContext<'a> {
    pub fn new(theme: &'a dyn Theme) -> Self {
        Self { theme }
    }

    /// Resolve a color to a concrete Color (no Var variants).
    /// Unresolved variables become black.
    pub fn resolve(&self, color: &Color) -> Color {
        self.resolve_depth(color, 0)
    }

    fn resolve_depth(&self, color: &Color, depth: usize) -> Color {
        match color {
            Color::Var(name) if depth < MAX_VAR_DEPTH => match self.theme.resolve(name) {
                Some(resolved) => self.resolve_depth(resolved, depth + 1),
                None => {
                    log::trace!("[theme] unresolved color variable {name}");
                    Color::rgb(0, 0, 0)
                }
            },
            Color::Var(name) => {
                log::warn!("[theme] color variable {name} nests too deeply");
                Color::rgb(0, 0, 0)
            }
            other => other.clone(),
        }
    }
}

/// Build a neutral palette from a seed color.
///
/// Swatch 0 is the lightest and the last swatch the darkest. The seed's hue
/// is kept at a tenth of its chroma so the palette reads as tinted greys.
pub fn create_color_palette(seed: &Color, steps: usize) -> Vec<Color> {
    let (_, c, h) = seed.to_oklch();
    let chroma = c * 0.1;
    match steps {
        0 => Vec::new(),
        1 => vec![Color::oklch(0.5, chroma, h)],
        _ => (0..steps)
            .map(|i| {
                let l = 1.0 - i as f32 / (steps - 1) as f32;
                Color::oklch(l, chroma, h)
            })
            .collect(),
    }
}
