//! Collaborator traits for drawing.
//!
//! The engine never owns a window, a GPU surface, or image bytes. Each
//! frame it is handed a [`Surface`] and a [`Sprite`] and issues one tinted
//! draw per particle, then resets the tint to neutral. The wgpu-backed
//! implementation lives in [`canvas`](crate::canvas); tests substitute a
//! recording implementation.

/// An axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// A `size` × `size` rect centered on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        let half = size / 2.0;
        Self {
            x: cx - half,
            y: cy - half,
            w: size,
            h: size,
        }
    }
}

/// A renderable image handle with a settable color tint and alpha.
///
/// The engine modulates these before every draw and restores the neutral
/// tint (255, 255, 255, 255) afterwards.
pub trait Sprite {
    fn set_color_mod(&mut self, r: u8, g: u8, b: u8);
    fn set_alpha_mod(&mut self, alpha: u8);
}

/// A display surface the engine draws sprites onto.
pub trait Surface {
    type Sprite: Sprite;

    /// Draw `sprite`, with its current tint, into `rect`.
    fn blit(&mut self, sprite: &Self::Sprite, rect: Rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let r = Rect::centered(10.0, 20.0, 6.0);
        assert_eq!(r, Rect { x: 7.0, y: 17.0, w: 6.0, h: 6.0 });
    }
}
