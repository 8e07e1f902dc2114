//! Pointer-driven decoration: a cursor ring that follows the mouse and a
//! tilt on the profile card.
//!
//! Both are plain state machines fed from egui input each frame, so they can
//! be exercised without a window.

use std::time::Duration;

/// Largest card rotation in degrees, reached at the card edge.
pub const MAX_TILT_DEG: f32 = 10.0;
/// Time to ease from the current rotation to a new target.
pub const TILT_EASE: Duration = Duration::from_millis(500);
/// Ring scale while hovering something clickable.
pub const CURSOR_GROW: f32 = 1.5;

/// Custom cursor ring.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorFollow {
    pub pos: egui::Pos2,
    pub grow: bool,
    pub visible: bool,
}

impl Default for CursorFollow {
    fn default() -> Self {
        Self {
            pos: egui::Pos2::ZERO,
            grow: false,
            visible: false,
        }
    }
}

impl CursorFollow {
    /// Feed this frame's pointer position (`None` once it left the window)
    /// and whether it is over an interactive widget.
    pub fn update(&mut self, pointer: Option<egui::Pos2>, over_interactive: bool) {
        match pointer {
            Some(pos) => {
                self.pos = pos;
                self.visible = true;
                self.grow = over_interactive;
            }
            None => {
                self.visible = false;
                self.grow = false;
            }
        }
    }

    pub fn scale(&self) -> f32 {
        if self.grow {
            CURSOR_GROW
        } else {
            1.0
        }
    }

    pub fn opacity(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn paint(&self, painter: &egui::Painter, color: egui::Color32) {
        if !self.visible {
            return;
        }
        let radius = 10.0 * self.scale();
        painter.circle_stroke(self.pos, radius, egui::Stroke::new(2.0, color));
        painter.circle_filled(self.pos, 2.5, color);
    }
}

/// Card rotation in degrees around the X and Y axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub rot_x: f32,
    pub rot_y: f32,
}

impl Tilt {
    /// Target rotation for a pointer at `pointer` over `card`.
    pub fn toward(card: egui::Rect, pointer: egui::Pos2) -> Self {
        if card.width() <= 0.0 || card.height() <= 0.0 {
            return Self::default();
        }
        let x = (pointer.x - card.left()) / card.width() - 0.5;
        let y = (pointer.y - card.top()) / card.height() - 0.5;
        Self {
            rot_x: -y * MAX_TILT_DEG,
            rot_y: x * MAX_TILT_DEG,
        }
    }

    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            rot_x: self.rot_x + (to.rot_x - self.rot_x) * t,
            rot_y: self.rot_y + (to.rot_y - self.rot_y) * t,
        }
    }
}

/// power2.out: fast start, gentle landing.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Eased card tilt. Every new target restarts the tween from wherever the
/// card currently is.
#[derive(Debug, Clone, Default)]
pub struct CardTilt {
    from: Tilt,
    target: Tilt,
    elapsed: Duration,
}

impl CardTilt {
    /// Pointer moved over the card (`Some`) or left it (`None`).
    pub fn hover(&mut self, card: egui::Rect, pointer: Option<egui::Pos2>) {
        let target = match pointer {
            Some(p) if card.contains(p) => Tilt::toward(card, p),
            _ => Tilt::default(),
        };
        if target != self.target {
            self.from = self.current();
            self.target = target;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(TILT_EASE);
    }

    pub fn current(&self) -> Tilt {
        let t = self.elapsed.as_secs_f32() / TILT_EASE.as_secs_f32();
        self.from.lerp(self.target, ease_out_quad(t))
    }

    pub fn target(&self) -> Tilt {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= TILT_EASE || self.from == self.target
    }

    /// Screen-space offset that stands in for the 3-D rotation: the card
    /// slides toward the raised edge by up to `max_shift` points.
    pub fn parallax(&self, max_shift: f32) -> egui::Vec2 {
        let tilt = self.current();
        egui::vec2(
            tilt.rot_y / MAX_TILT_DEG * max_shift,
            -tilt.rot_x / MAX_TILT_DEG * max_shift,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(100.0, 100.0), egui::vec2(200.0, 100.0))
    }

    #[test]
    fn cursor_follows_and_hides() {
        let mut cursor = CursorFollow::default();
        cursor.update(Some(egui::pos2(12.0, 34.0)), true);
        assert_eq!(cursor.pos, egui::pos2(12.0, 34.0));
        assert_eq!(cursor.opacity(), 1.0);
        assert_eq!(cursor.scale(), CURSOR_GROW);

        cursor.update(Some(egui::pos2(13.0, 34.0)), false);
        assert_eq!(cursor.scale(), 1.0);

        cursor.update(None, false);
        assert_eq!(cursor.opacity(), 0.0);
        assert_eq!(cursor.pos, egui::pos2(13.0, 34.0));
    }

    #[test]
    fn tilt_targets_follow_pointer_quadrant() {
        let centre = Tilt::toward(card(), card().center());
        assert_eq!(centre, Tilt::default());

        let corner = Tilt::toward(card(), card().right_bottom());
        assert_eq!(corner.rot_y, 5.0);
        assert_eq!(corner.rot_x, -5.0);

        let top_left = Tilt::toward(card(), card().left_top());
        assert_eq!(top_left.rot_y, -5.0);
        assert_eq!(top_left.rot_x, 5.0);
    }

    #[test]
    fn ease_curve_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_quad(2.0), 1.0);
    }

    #[test]
    fn tilt_eases_in_and_settles() {
        let mut tilt = CardTilt::default();
        tilt.hover(card(), Some(card().right_bottom() - egui::vec2(0.001, 0.001)));
        assert_eq!(tilt.current(), Tilt::default());

        tilt.advance(Duration::from_millis(250));
        let mid = tilt.current();
        assert!(mid.rot_y > 3.5 && mid.rot_y < 4.0, "rot_y = {}", mid.rot_y);

        tilt.advance(Duration::from_secs(1));
        assert!(tilt.is_settled());
        assert!((tilt.current().rot_y - tilt.target().rot_y).abs() < 1e-6);
    }

    #[test]
    fn leaving_card_returns_to_flat() {
        let mut tilt = CardTilt::default();
        tilt.hover(card(), Some(card().left_top()));
        tilt.advance(TILT_EASE);
        assert!(tilt.current().rot_y < 0.0);

        tilt.hover(card(), None);
        assert_eq!(tilt.target(), Tilt::default());
        tilt.advance(TILT_EASE);
        assert_eq!(tilt.current(), Tilt::default());
        assert_eq!(tilt.parallax(8.0), egui::Vec2::ZERO);
    }
}
