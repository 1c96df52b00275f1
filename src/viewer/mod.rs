//! Terminal playback viewer for posed source skeletons.
//!
//! Every Nth timestamp of the recording is posed through the provider and its
//! bones are drawn as line segments on a braille canvas. The view is an orbit
//! projection around the bounds fitted from the first frame.

mod event;
mod theme;
mod ui;

use std::f64::consts::FRAC_PI_2;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ndarray::{Array3, Axis};

use crate::config::ViewerConfig;
use crate::constants;
use crate::error::Error;
use crate::provider::BodyDataProvider;

use event::{Event, EventHandler};

/// Orbit camera angles in radians. The source data is z-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    /// Rotation about the vertical axis.
    pub yaw: f64,
    /// Tilt towards looking down on the skeleton.
    pub pitch: f64,
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self {
            yaw: -1.05,
            pitch: 0.5,
        }
    }
}

impl ViewAngles {
    /// Projects a point onto the screen plane, relative to `center`.
    #[must_use]
    pub fn project(&self, point: [f64; 3], center: [f64; 3]) -> (f64, f64) {
        let [x, y, z] = [point[0] - center[0], point[1] - center[1], point[2] - center[2]];
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let screen_x = x * cos_yaw - y * sin_yaw;
        let depth = x * sin_yaw + y * cos_yaw;
        let screen_y = depth * sin_pitch + z * cos_pitch;
        (screen_x, screen_y)
    }
}

/// Cubic plot limits shared by all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Fits limits to every endpoint of `bones`, widened by `padding`.
    #[must_use]
    pub fn fit(bones: &Array3<f64>, padding: f64) -> Option<Self> {
        let (min, max) = bones
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        Some(Self {
            min: min - padding,
            max: max + padding,
        })
    }

    #[must_use]
    pub fn center(&self) -> [f64; 3] {
        let mid = (self.min + self.max) / 2.0;
        [mid, mid, mid]
    }

    /// Half-width of the screen window that keeps the cube visible while
    /// orbiting about the vertical axis.
    #[must_use]
    pub fn screen_radius(&self) -> f64 {
        (self.max - self.min) / 2.0 * std::f64::consts::SQRT_2
    }
}

/// Playback state.
pub struct ViewerApp<'a, P: BodyDataProvider + ?Sized> {
    provider: &'a P,
    timestamps: Vec<i64>,
    cursor: usize,
    bones: Option<Array3<f64>>,
    bounds: Option<Bounds>,
    view: ViewAngles,
    paused: bool,
    should_quit: bool,
}

impl<'a, P: BodyDataProvider + ?Sized> ViewerApp<'a, P> {
    /// Prepares playback of every `frame_stride`-th timestamp.
    ///
    /// # Errors
    ///
    /// Fails if the provider has no timestamps.
    pub fn new(provider: &'a P, config: &ViewerConfig) -> crate::error::Result<Self> {
        let all = provider.xsens_data().timestamps_us()?;
        let timestamps: Vec<i64> = all.into_iter().step_by(config.frame_stride.max(1)).collect();
        if timestamps.is_empty() {
            return Err(Error::InvalidScalar {
                key: constants::KEY_TIMESTAMPS_US.to_string(),
                reason: "recording has no frames".to_string(),
            });
        }

        let mut app = Self {
            provider,
            timestamps,
            cursor: 0,
            bones: None,
            bounds: None,
            view: ViewAngles::default(),
            paused: false,
            should_quit: false,
        };
        app.refresh();
        app.bounds = app
            .bones
            .as_ref()
            .and_then(|bones| Bounds::fit(bones, config.axis_padding));
        Ok(app)
    }

    fn refresh(&mut self) {
        let t_us = self.timestamps[self.cursor];
        self.bones = self.provider.posed_skeleton(t_us);
        if self.bones.is_none() {
            tracing::debug!(t_us, "no posed skeleton");
        }
    }

    /// Advances one subsampled frame unless paused; pauses on the last frame.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        if self.cursor + 1 < self.timestamps.len() {
            self.cursor += 1;
            self.refresh();
        } else {
            self.paused = true;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('r') => {
                self.cursor = 0;
                self.paused = false;
                self.refresh();
            }
            KeyCode::Left => self.view.yaw -= constants::VIEW_ROTATION_STEP,
            KeyCode::Right => self.view.yaw += constants::VIEW_ROTATION_STEP,
            KeyCode::Up => {
                self.view.pitch = (self.view.pitch + constants::VIEW_ROTATION_STEP).min(FRAC_PI_2);
            }
            KeyCode::Down => {
                self.view.pitch = (self.view.pitch - constants::VIEW_ROTATION_STEP).max(-FRAC_PI_2);
            }
            _ => {}
        }
    }

    /// Screen-space segments of the current frame.
    #[must_use]
    pub fn projected_bones(&self) -> Vec<((f64, f64), (f64, f64))> {
        let (Some(bones), Some(bounds)) = (&self.bones, &self.bounds) else {
            return Vec::new();
        };
        let center = bounds.center();
        bones
            .axis_iter(Axis(0))
            .map(|bone| {
                let a = [bone[[0, 0]], bone[[0, 1]], bone[[0, 2]]];
                let b = [bone[[1, 0]], bone[[1, 1]], bone[[1, 2]]];
                (self.view.project(a, center), self.view.project(b, center))
            })
            .collect()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    #[must_use]
    pub fn frame_position(&self) -> (usize, usize) {
        (self.cursor, self.timestamps.len())
    }

    #[must_use]
    pub fn current_timestamp(&self) -> i64 {
        self.timestamps[self.cursor]
    }

    #[must_use]
    pub fn has_skeleton(&self) -> bool {
        self.bones.is_some()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn view(&self) -> ViewAngles {
        self.view
    }
}

/// Runs the viewer until the user quits.
///
/// # Errors
///
/// Fails if the terminal cannot be drawn or the event thread stops.
pub fn run<P: BodyDataProvider + ?Sized>(mut app: ViewerApp<'_, P>, tick_rate_ms: u64) -> Result<()> {
    let events = EventHandler::new(tick_rate_ms);

    let mut terminal = ratatui::init();
    let result = (|| -> Result<()> {
        while !app.should_quit() {
            terminal.draw(|frame| ui::render(frame, &app))?;
            match events.next()? {
                Event::Key(key) => app.handle_key(key),
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {}
            }
        }
        Ok(())
    })();
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::tests::synthetic_data;
    use crate::skeleton::NUM_PARTS;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn config(stride: usize) -> ViewerConfig {
        ViewerConfig {
            frame_stride: stride,
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn test_projection_front_view() {
        let view = ViewAngles { yaw: 0.0, pitch: 0.0 };
        let (x, y) = view.project([1.0, 2.0, 3.0], [0.0, 0.0, 0.0]);
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_projection_quarter_turn() {
        let view = ViewAngles { yaw: FRAC_PI_2, pitch: 0.0 };
        let (x, y) = view.project([1.0, 2.0, 3.0], [0.0, 0.0, 0.0]);
        assert!((x + 2.0).abs() < 1e-12);
        assert!((y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_fit_with_padding() {
        let mut bones = Array3::<f64>::zeros((2, 2, 3));
        bones[[0, 0, 0]] = -1.0;
        bones[[1, 1, 2]] = 2.0;
        let bounds = Bounds::fit(&bones, 0.1).unwrap();
        assert!((bounds.min + 1.1).abs() < 1e-12);
        assert!((bounds.max - 2.1).abs() < 1e-12);
        assert!((bounds.center()[2] - 0.5).abs() < 1e-12);
        assert!(Bounds::fit(&Array3::<f64>::zeros((0, 2, 3)), 0.1).is_none());
    }

    #[test]
    fn test_subsampled_playback_stops_at_end() {
        let data = synthetic_data(25, 30.0);
        let mut app = ViewerApp::new(&data, &config(10)).unwrap();
        assert_eq!(app.frame_position(), (0, 3));
        assert!(app.has_skeleton());
        assert_eq!(app.projected_bones().len(), NUM_PARTS - 1);

        app.tick();
        assert_eq!(app.current_timestamp(), 10_000);
        app.tick();
        assert_eq!(app.current_timestamp(), 20_000);
        app.tick();
        assert!(app.is_paused());
        assert_eq!(app.frame_position(), (2, 3));
    }

    #[test]
    fn test_bounds_fixed_from_first_frame() {
        let data = synthetic_data(12, 30.0);
        let mut app = ViewerApp::new(&data, &config(5)).unwrap();
        let first = app.bounds().unwrap();
        assert!((first.max - 22.1).abs() < 1e-9);
        app.tick();
        assert_eq!(app.bounds(), Some(first));
    }

    #[test]
    fn test_keys() {
        let data = synthetic_data(3, 30.0);
        let mut app = ViewerApp::new(&data, &config(1)).unwrap();

        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.is_paused());
        app.tick();
        assert_eq!(app.frame_position().0, 0);

        let yaw = app.view().yaw;
        app.handle_key(key(KeyCode::Right));
        assert!((app.view().yaw - yaw - constants::VIEW_ROTATION_STEP).abs() < 1e-12);

        for _ in 0..40 {
            app.handle_key(key(KeyCode::Up));
        }
        assert!((app.view().pitch - FRAC_PI_2).abs() < 1e-12);

        app.handle_key(key(KeyCode::Char(' ')));
        app.tick();
        app.tick();
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.frame_position().0, 0);
        assert!(!app.is_paused());

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_empty_recording_rejected() {
        let data = synthetic_data(0, 30.0);
        assert!(ViewerApp::new(&data, &config(10)).is_err());
    }
}
