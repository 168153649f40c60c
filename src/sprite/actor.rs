use std::{borrow::Cow, sync::Arc};

use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::core::BoundingBox,
    render::{
        composite::{PixelRect, composite_sprite},
        frame::FrameAccum,
    },
    sprite::motion::{MovementFn, RowCol, ScaleFn},
};

/// Spawn-time parameters; together with the lifetime they fully determine where an actor is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub initial_position: RowCol,
    pub initial_scale: RowCol,
    /// Pixels per second.
    pub velocity: RowCol,
    /// Scale units per second; negative shrinks.
    pub scale_speed: RowCol,
    pub movement: MovementFn,
    pub scale: ScaleFn,
}

/// Lifecycle of an actor. `Expired` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorState {
    Active,
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Drawn; the box is clipped to the frame with off-screen sides pinned to the edge.
    Visible(BoundingBox),
    /// Entirely outside the frame. The actor is now expired and nothing was drawn.
    OffScreen,
}

/// One live, animated sprite instance.
#[derive(Clone, Debug)]
pub struct SpriteActor {
    kind: Arc<str>,
    image: Arc<RgbaImage>,
    kinematics: Kinematics,
    lifetime: f64,
    tick_secs: f64,
    min_scale: f64,
    state: ActorState,
}

impl SpriteActor {
    pub fn new(
        kind: impl Into<Arc<str>>,
        image: Arc<RgbaImage>,
        kinematics: Kinematics,
        tick_secs: f64,
        min_scale: f64,
    ) -> Self {
        Self {
            kind: kind.into(),
            image,
            kinematics,
            lifetime: 0.0,
            tick_secs,
            min_scale,
            state: ActorState::Active,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Source variant this actor was spawned with, before scaling.
    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    /// Seconds since spawn.
    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ActorState::Active
    }

    /// Advance by one frame tick. Call exactly once per produced frame.
    pub fn increase_lifetime(&mut self) {
        if self.is_active() {
            self.lifetime += self.tick_secs;
        }
    }

    pub fn position(&self) -> RowCol {
        let k = &self.kinematics;
        k.movement
            .position(k.initial_position, self.lifetime, k.velocity)
    }

    pub fn scale(&self) -> RowCol {
        let k = &self.kinematics;
        k.scale
            .scale(k.initial_scale, self.lifetime, k.scale_speed, self.min_scale)
    }

    /// On-screen size `(rows, cols)` at the current lifetime.
    pub fn footprint(&self) -> (u32, u32) {
        let s = self.scale();
        let rows = (s[0] * f64::from(self.image.height())).round_ties_even();
        let cols = (s[1] * f64::from(self.image.width())).round_ties_even();
        (rows.max(0.0) as u32, cols.max(0.0) as u32)
    }

    /// Draw into `frame` and report the visible box, or expire if fully off-screen.
    pub fn render(&mut self, frame: &mut FrameAccum) -> RenderOutcome {
        if !self.is_active() {
            return RenderOutcome::OffScreen;
        }

        let pos = self.position();
        let (rows, cols) = self.footprint();
        let frame_h = i64::from(frame.height());
        let frame_w = i64::from(frame.width());

        let top = pos[0].round_ties_even() as i64;
        let left = pos[1].round_ties_even() as i64;
        let bottom = top + i64::from(rows);
        let right = left + i64::from(cols);

        if bottom < 0 || top >= frame_h || right < 0 || left >= frame_w {
            self.state = ActorState::Expired;
            tracing::debug!(kind = %self.kind, lifetime = self.lifetime, "sprite left the frame");
            return RenderOutcome::OffScreen;
        }

        let overlap_top = (-top).max(0);
        let overlap_bottom = (bottom - frame_h).max(0);
        let overlap_left = (-left).max(0);
        let overlap_right = (right - frame_w).max(0);

        let visible_rows = (i64::from(rows) - overlap_top - overlap_bottom).max(0);
        let visible_cols = (i64::from(cols) - overlap_left - overlap_right).max(0);

        if visible_rows > 0 && visible_cols > 0 {
            let scaled = self.resampled(rows, cols);
            composite_sprite(
                frame,
                &scaled,
                PixelRect {
                    row: overlap_top as u32,
                    col: overlap_left as u32,
                    height: visible_rows as u32,
                    width: visible_cols as u32,
                },
                top.max(0) as u32,
                left.max(0) as u32,
            );
        }

        RenderOutcome::Visible(BoundingBox {
            top: if overlap_top > 0 { 0 } else { top as u32 },
            bottom: (bottom - overlap_bottom) as u32,
            left: if overlap_left > 0 { 0 } else { left as u32 },
            right: (right - overlap_right) as u32,
        })
    }

    fn resampled(&self, rows: u32, cols: u32) -> Cow<'_, RgbaImage> {
        if (cols, rows) == self.image.dimensions() {
            return Cow::Borrowed(&*self.image);
        }
        Cow::Owned(image::imageops::resize(
            &*self.image,
            cols,
            rows,
            FilterType::Triangle,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/actor.rs"]
mod tests;
