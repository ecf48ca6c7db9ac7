//! Frame rendering: the backend seam plus a primitive CPU field painter.
//!
//! The playback engine only needs something that turns `(play, frame index)`
//! into pixels; everything about how those pixels look is presentation. The
//! built-in painter draws the field, role-colored player discs, the ball, and
//! the receiver-to-nearest-defender separation line.

use image::{Rgba, RgbaImage};

use crate::{
    core::{FIELD_LENGTH_YD, FIELD_WIDTH_YD, FieldPos, Role},
    model::{Frame, Play, PlayerSnapshot},
};

/// One rendered frame, straight RGBA8, fully opaque.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Renders one frame of a play. An out-of-range index renders nothing and the
/// tick is simply skipped.
pub trait FrameRenderer {
    fn render(&mut self, play: &Play, frame_index: usize) -> Option<FrameRgba>;
}

const FIELD_GREEN: Rgba<u8> = Rgba([26, 71, 42, 255]);
const YARD_LINE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HASH_MARK: Rgba<u8> = Rgba([160, 180, 160, 255]);
const TARGET_BLUE: Rgba<u8> = Rgba([59, 130, 246, 255]);
const PASSER_BLUE: Rgba<u8> = Rgba([96, 165, 250, 255]);
const COVERAGE_RED: Rgba<u8> = Rgba([239, 68, 68, 255]);
const OFFENSE_BLUE: Rgba<u8> = Rgba([147, 197, 253, 255]);
const DEFENSE_RED: Rgba<u8> = Rgba([248, 113, 113, 255]);
const BALL_BROWN: Rgba<u8> = Rgba([139, 69, 19, 255]);
const SEPARATION_YELLOW: Rgba<u8> = Rgba([251, 191, 36, 255]);

/// Fixed-canvas painter mapping the 120x53.3-yard field onto pixels.
#[derive(Clone, Copy, Debug)]
pub struct FieldPainter {
    pub width: u32,
    pub height: u32,
}

impl Default for FieldPainter {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
        }
    }
}

impl FieldPainter {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn to_px(&self, pos: FieldPos) -> (f64, f64) {
        (
            pos.x / FIELD_LENGTH_YD * f64::from(self.width),
            pos.y / FIELD_WIDTH_YD * f64::from(self.height),
        )
    }

    fn paint(&self, frame: &Frame) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(self.width, self.height, FIELD_GREEN);

        // Yard lines every 10 yards along the long axis.
        for i in 0..=12 {
            let x = (f64::from(i) * 10.0 / FIELD_LENGTH_YD * f64::from(self.width)) as u32;
            draw_vline(&mut img, x.min(self.width.saturating_sub(1)), YARD_LINE);
        }

        // Hash marks.
        for frac in [0.4, 0.6] {
            let y = (f64::from(self.height) * frac) as u32;
            draw_hline(&mut img, y.min(self.height.saturating_sub(1)), HASH_MARK);
        }

        if let (Some(wr), Some(nearest)) = (frame.targeted_receiver(), nearest_defender(frame)) {
            let a = self.to_px(wr.pos);
            let b = self.to_px(nearest.pos);
            draw_dashed_line(&mut img, a, b, SEPARATION_YELLOW);
        }

        if let Some(ball) = frame.ball {
            let (x, y) = self.to_px(ball);
            draw_disc(&mut img, x, y, 5.0, BALL_BROWN);
        }

        let wr_side = frame.targeted_receiver().map(|p| p.side.clone());
        for player in &frame.players {
            let (fill, radius) = style_for(player, wr_side.as_deref());
            let (x, y) = self.to_px(player.pos);
            draw_disc(&mut img, x, y, radius, fill);
        }

        img
    }
}

impl FrameRenderer for FieldPainter {
    fn render(&mut self, play: &Play, frame_index: usize) -> Option<FrameRgba> {
        let frame = play.frame(frame_index)?;
        let img = self.paint(frame);
        Some(FrameRgba {
            width: self.width,
            height: self.height,
            data: img.into_raw(),
        })
    }
}

fn nearest_defender(frame: &Frame) -> Option<&PlayerSnapshot> {
    let wr = frame.targeted_receiver()?;
    frame
        .defenders()
        .min_by(|a, b| wr.pos.distance_to(a.pos).total_cmp(&wr.pos.distance_to(b.pos)))
}

fn style_for(player: &PlayerSnapshot, wr_side: Option<&str>) -> (Rgba<u8>, f64) {
    match player.role {
        Role::TargetedReceiver => (TARGET_BLUE, 12.0),
        Role::Passer => (PASSER_BLUE, 11.0),
        Role::DefensiveCoverage => (COVERAGE_RED, 10.0),
        Role::OtherOffense | Role::OtherDefense => {
            if wr_side.is_some_and(|side| !side.is_empty() && side == player.side) {
                (OFFENSE_BLUE, 8.0)
            } else {
                (DEFENSE_RED, 8.0)
            }
        }
    }
}

fn draw_vline(img: &mut RgbaImage, x: u32, color: Rgba<u8>) {
    for y in 0..img.height() {
        img.put_pixel(x, y, color);
    }
}

fn draw_hline(img: &mut RgbaImage, y: u32, color: Rgba<u8>) {
    for x in 0..img.width() {
        img.put_pixel(x, y, color);
    }
}

fn draw_disc(img: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Rgba<u8>) {
    let r = radius.ceil() as i64;
    let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx * dx + dy * dy) as f64 > radius * radius {
                continue;
            }
            let (x, y) = (cx_i + dx, cy_i + dy);
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

fn draw_dashed_line(img: &mut RgbaImage, a: (f64, f64), b: (f64, f64), color: Rgba<u8>) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let steps = dx.hypot(dy).ceil().max(1.0) as u32;
    for step in 0..=steps {
        // 4-on / 4-off dash pattern.
        if step % 8 >= 4 {
            continue;
        }
        let t = f64::from(step) / f64::from(steps);
        let (x, y) = (a.0 + dx * t, a.1 + dy * t);
        if x >= 0.0 && y >= 0.0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assemble::assemble, record::TrackingRow};

    fn play() -> Play {
        let mk = |frame: &str, name: &str, role: &str, x: &str, y: &str| TrackingRow {
            game_id: "1".to_string(),
            play_id: "10".to_string(),
            frame_id: frame.to_string(),
            display_name: name.to_string(),
            player_role: role.to_string(),
            x: x.to_string(),
            y: y.to_string(),
            ..TrackingRow::default()
        };
        let input = vec![
            mk("1", "WR", "Targeted Receiver", "50", "20"),
            mk("1", "CB", "Defensive Coverage", "50", "25"),
            mk("1", "football", "", "49", "21"),
            mk("2", "WR", "Targeted Receiver", "55", "20"),
        ];
        assemble(input, vec![], vec![]).plays.remove(0)
    }

    #[test]
    fn renders_a_full_opaque_frame() {
        let play = play();
        let mut painter = FieldPainter::new(160, 90);
        let frame = painter.render(&play, 0).unwrap();
        assert_eq!(frame.width, 160);
        assert_eq!(frame.height, 90);
        assert_eq!(frame.data.len(), 160 * 90 * 4);
        assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn out_of_bounds_frame_renders_nothing() {
        let play = play();
        let mut painter = FieldPainter::default();
        assert!(painter.render(&play, play.frame_count()).is_none());
    }

    #[test]
    fn frames_with_moved_players_produce_different_pixels() {
        let play = play();
        let mut painter = FieldPainter::new(160, 90);
        let a = painter.render(&play, 0).unwrap();
        let b = painter.render(&play, 1).unwrap();
        assert_ne!(a.data, b.data);
    }
}
