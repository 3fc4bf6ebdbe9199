mod color;
mod theme;

pub use color::{Color, Rgb};
pub use theme::{create_color_palette, ColorContext, EmptyTheme, Theme};
