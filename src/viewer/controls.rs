//! View parameter arithmetic for viewer controls and keyboard navigation

use crate::constants::view::{
    DEFAULT_HFOV, KEY_STEP, MAX_HFOV, MAX_KEY_PITCH, MIN_BUTTON_HFOV, MIN_KEY_HFOV,
};
use crate::error::{Error, Result};
use crate::model::Photo;
use serde::Serialize;
use std::str::FromStr;

/// Engine view parameters, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewParams {
    pub yaw: f64,
    pub pitch: f64,
    pub hfov: f64,
}

impl ViewParams {
    /// Starting view for `photo`
    pub fn for_photo(photo: &Photo) -> Self {
        Self {
            yaw: photo.initial_yaw(),
            pitch: photo.initial_pitch(),
            hfov: DEFAULT_HFOV,
        }
    }

    pub fn turned(self, delta: f64) -> Self {
        Self {
            yaw: wrap_yaw(self.yaw + delta),
            ..self
        }
    }

    /// Button zoom, kept inside [50, 120]
    pub fn zoomed(self, delta: f64) -> Self {
        Self {
            hfov: step_hfov(self.hfov, delta, MIN_BUTTON_HFOV, MAX_HFOV),
            ..self
        }
    }

    /// Apply one keyboard step
    pub fn with_key(self, key: NavKey) -> Self {
        match key {
            NavKey::Left => self.turned(-KEY_STEP),
            NavKey::Right => self.turned(KEY_STEP),
            NavKey::Up => Self {
                pitch: (self.pitch + KEY_STEP).clamp(-MAX_KEY_PITCH, MAX_KEY_PITCH),
                ..self
            },
            NavKey::Down => Self {
                pitch: (self.pitch - KEY_STEP).clamp(-MAX_KEY_PITCH, MAX_KEY_PITCH),
                ..self
            },
            NavKey::ZoomIn => Self {
                hfov: step_hfov(self.hfov, -KEY_STEP, MIN_KEY_HFOV, MAX_HFOV),
                ..self
            },
            NavKey::ZoomOut => Self {
                hfov: step_hfov(self.hfov, KEY_STEP, MIN_KEY_HFOV, MAX_HFOV),
                ..self
            },
        }
    }
}

/// Yaw normalized into [-180, 180)
pub fn wrap_yaw(yaw: f64) -> f64 {
    (yaw + 180.0).rem_euclid(360.0) - 180.0
}

/// Move `hfov` by `delta` without crossing a bound in the direction of travel
///
/// A value already outside `[min, max]` is never pushed further out, nor
/// snapped back against the direction of travel.
pub fn step_hfov(hfov: f64, delta: f64, min: f64, max: f64) -> f64 {
    let next = hfov + delta;
    if delta < 0.0 {
        next.max(min).min(hfov)
    } else {
        next.min(max).max(hfov)
    }
}

/// Keys bound while a panorama is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    ZoomIn,
    ZoomOut,
}

impl FromStr for NavKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Self::Left),
            "right" | "arrowright" => Ok(Self::Right),
            "up" | "arrowup" => Ok(Self::Up),
            "down" | "arrowdown" => Ok(Self::Down),
            "+" | "=" => Ok(Self::ZoomIn),
            "-" => Ok(Self::ZoomOut),
            other => Err(Error::Viewer(format!(
                "Unknown key '{}'. Use left, right, up, down, +, = or -",
                other
            ))),
        }
    }
}

/// What the viewer shows about its current view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewInfo {
    pub yaw: f64,
    pub pitch: f64,
    /// 50% at the widest button zoom, 150% at the narrowest
    pub zoom_percent: i64,
}

impl From<ViewParams> for ViewInfo {
    fn from(view: ViewParams) -> Self {
        Self {
            yaw: view.yaw,
            pitch: view.pitch,
            zoom_percent: ((MAX_HFOV - view.hfov) / 90.0 * 100.0 + 50.0).round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::view::TURN_STEP;
    use approx::assert_abs_diff_eq;

    fn view(yaw: f64, pitch: f64, hfov: f64) -> ViewParams {
        ViewParams { yaw, pitch, hfov }
    }

    #[test]
    fn test_wrap_yaw() {
        assert_abs_diff_eq!(wrap_yaw(200.0), -160.0);
        assert_abs_diff_eq!(wrap_yaw(-190.0), 170.0);
        assert_abs_diff_eq!(wrap_yaw(45.0), 45.0);
        assert_abs_diff_eq!(wrap_yaw(720.0), 0.0);
    }

    #[test]
    fn test_turn_wraps() {
        let v = view(170.0, 0.0, 90.0).turned(TURN_STEP);
        assert_abs_diff_eq!(v.yaw, -160.0);
        assert_abs_diff_eq!(v.hfov, 90.0);
    }

    #[test]
    fn test_button_zoom_bounds() {
        let mut v = view(0.0, 0.0, 90.0);
        for _ in 0..10 {
            v = v.zoomed(-10.0);
        }
        assert_abs_diff_eq!(v.hfov, 50.0);

        for _ in 0..10 {
            v = v.zoomed(10.0);
        }
        assert_abs_diff_eq!(v.hfov, 120.0);
    }

    #[test]
    fn test_button_zoom_out_from_key_zoom() {
        // Key zoom may go below the button minimum; zooming out must not jump
        let v = view(0.0, 0.0, 30.0).zoomed(10.0);
        assert_abs_diff_eq!(v.hfov, 40.0);
        let v = view(0.0, 0.0, 30.0).zoomed(-10.0);
        assert_abs_diff_eq!(v.hfov, 30.0);
    }

    #[test]
    fn test_key_pitch_clamped() {
        let mut v = view(0.0, 0.0, 90.0);
        for _ in 0..5 {
            v = v.with_key(NavKey::Up);
        }
        assert_abs_diff_eq!(v.pitch, 30.0);
        for _ in 0..8 {
            v = v.with_key(NavKey::Down);
        }
        assert_abs_diff_eq!(v.pitch, -30.0);
    }

    #[test]
    fn test_key_zoom_bounds() {
        let mut v = view(0.0, 0.0, 90.0);
        for _ in 0..10 {
            v = v.with_key(NavKey::ZoomIn);
        }
        assert_abs_diff_eq!(v.hfov, 30.0);
        for _ in 0..12 {
            v = v.with_key(NavKey::ZoomOut);
        }
        assert_abs_diff_eq!(v.hfov, 120.0);
    }

    #[test]
    fn test_key_names() {
        assert_eq!("ArrowLeft".parse::<NavKey>().unwrap(), NavKey::Left);
        assert_eq!("=".parse::<NavKey>().unwrap(), NavKey::ZoomIn);
        assert_eq!("+".parse::<NavKey>().unwrap(), NavKey::ZoomIn);
        assert_eq!("-".parse::<NavKey>().unwrap(), NavKey::ZoomOut);
        assert!("space".parse::<NavKey>().is_err());
    }

    #[test]
    fn test_zoom_percent() {
        assert_eq!(ViewInfo::from(view(0.0, 0.0, 90.0)).zoom_percent, 83);
        assert_eq!(ViewInfo::from(view(0.0, 0.0, 120.0)).zoom_percent, 50);
        assert_eq!(ViewInfo::from(view(0.0, 0.0, 30.0)).zoom_percent, 150);
    }
}
