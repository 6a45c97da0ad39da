//! Background rotator
//!
//! Keeps one slide per background image and cycles which one is active on a
//! fixed interval. At most one rotation task is alive at a time.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::models::{ImageRef, Slide};
use crate::utils::threading::spawn_background;

/// Default rotation interval
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_millis(30_000);

#[derive(Debug, Default)]
struct Slides {
    slides: Vec<Slide>,
    index: usize,
}

impl Slides {
    fn advance(&mut self) -> Option<usize> {
        let count = self.slides.len();
        if count == 0 {
            return None;
        }

        self.slides[self.index].active = false;
        self.index = (self.index + 1) % count;
        self.slides[self.index].active = true;
        Some(self.index)
    }
}

/// Point-in-time view of the rotator
#[derive(Debug, Clone, Serialize)]
pub struct RotatorSnapshot {
    pub slides: Vec<Slide>,
    pub index: usize,
    pub running: bool,
    pub interval_ms: u64,
}

/// Cycles background slides
pub struct BackgroundRotator {
    state: Arc<Mutex<Slides>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    interval: Mutex<Duration>,
}

impl BackgroundRotator {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Slides::default())),
            timer: Mutex::new(None),
            interval: Mutex::new(DEFAULT_ROTATION_INTERVAL),
        }
    }

    /// Rebuild slides from images, activating the first
    pub fn build(&self, images: &[ImageRef]) {
        let mut state = self.state.lock();
        state.slides = images.iter().cloned().map(Slide::new).collect();
        state.index = 0;
        if let Some(first) = state.slides.first_mut() {
            first.active = true;
        }
        tracing::debug!("Built {} background slides", state.slides.len());
    }

    /// Activate the next slide, returning its index
    pub fn advance(&self) -> Option<usize> {
        self.state.lock().advance()
    }

    /// (Re)start rotation, replacing any running timer
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, interval: Duration) {
        self.stop();
        let interval = interval.max(Duration::from_millis(1));

        let state = Arc::clone(&self.state);
        let handle = spawn_background(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            loop {
                ticker.tick().await;
                if let Some(index) = state.lock().advance() {
                    tracing::trace!("Background advanced to slide {}", index);
                }
            }
        });

        *self.interval.lock() = interval;
        *self.timer.lock() = Some(handle);
        tracing::info!("Background rotation every {:?}", interval);
    }

    /// Stop rotation; safe when not running
    pub fn stop(&self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
            tracing::debug!("Background rotation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.state.lock().index
    }

    pub fn snapshot(&self) -> RotatorSnapshot {
        let (slides, index) = {
            let state = self.state.lock();
            (state.slides.clone(), state.index)
        };

        RotatorSnapshot {
            slides,
            index,
            running: self.is_running(),
            interval_ms: self.interval.lock().as_millis() as u64,
        }
    }
}

impl Default for BackgroundRotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundRotator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<ImageRef> {
        (0..n).map(|i| format!("https://img.example/{}.jpg", i)).collect()
    }

    fn active_indices(rotator: &BackgroundRotator) -> Vec<usize> {
        rotator
            .snapshot()
            .slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_build_activates_first() {
        let rotator = BackgroundRotator::new();
        rotator.build(&images(3));
        assert_eq!(active_indices(&rotator), vec![0]);

        rotator.advance();
        rotator.build(&images(4));
        assert_eq!(rotator.index(), 0);
        assert_eq!(rotator.snapshot().slides.len(), 4);
        assert_eq!(active_indices(&rotator), vec![0]);
    }

    #[test]
    fn test_advance_wraps() {
        let rotator = BackgroundRotator::new();
        rotator.build(&images(3));

        assert_eq!(rotator.advance(), Some(1));
        assert_eq!(rotator.advance(), Some(2));
        assert_eq!(rotator.advance(), Some(0));
        assert_eq!(active_indices(&rotator), vec![0]);
    }

    #[test]
    fn test_advance_single_and_empty() {
        let rotator = BackgroundRotator::new();
        assert_eq!(rotator.advance(), None);

        rotator.build(&images(1));
        assert_eq!(rotator.advance(), Some(0));
        assert_eq!(active_indices(&rotator), vec![0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_cycles_on_interval() {
        let rotator = BackgroundRotator::new();
        rotator.build(&images(3));
        rotator.start(Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(rotator.index(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rotator.index(), 2);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(rotator.index(), 0);
        assert!(rotator.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_one_timer() {
        let rotator = BackgroundRotator::new();
        rotator.build(&images(5));
        rotator.start(Duration::from_millis(100));
        rotator.start(Duration::from_millis(100));
        rotator.start(Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(rotator.index(), 1);
        assert_eq!(rotator.snapshot().interval_ms, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_rotation() {
        let rotator = BackgroundRotator::new();
        rotator.build(&images(3));
        rotator.stop();

        rotator.start(Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(150)).await;
        rotator.stop();
        rotator.stop();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(rotator.index(), 1);
        assert!(!rotator.is_running());
    }
}
