use std::sync::{Arc, RwLock};
use std::time::Instant;

use gpui::prelude::*;
use gpui::{Window, canvas, div};

use crate::bar::{ProgressUpdate, SegmentBar};

use super::config::SegmentBarViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};

type ProgressListener = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

/// A GPUI view that renders a [`SegmentBar`].
///
/// The view advances the bar's progress animation once per frame and keeps
/// requesting frames until the animation settles.
#[derive(Clone)]
pub struct GpuiSegmentBarView {
    bar: Arc<RwLock<SegmentBar>>,
    config: SegmentBarViewConfig,
    listener: Option<ProgressListener>,
}

impl GpuiSegmentBarView {
    /// Create a new GPUI view for the given bar.
    ///
    /// Uses the default [`SegmentBarViewConfig`].
    pub fn new(bar: SegmentBar) -> Self {
        Self::with_config(bar, SegmentBarViewConfig::default())
    }

    /// Create a new GPUI view with a custom configuration.
    pub fn with_config(bar: SegmentBar, config: SegmentBarViewConfig) -> Self {
        Self {
            bar: Arc::new(RwLock::new(bar)),
            config,
            listener: None,
        }
    }

    /// Receive progress notifications as the animation advances.
    ///
    /// Each update carries the overlay coordinates for the frame's layout.
    pub fn on_progress_event(
        mut self,
        listener: impl Fn(ProgressUpdate) + Send + Sync + 'static,
    ) -> Self {
        self.listener = Some(Arc::new(listener));
        self
    }

    /// Get a handle for mutating the underlying bar.
    ///
    /// This is useful for driving progress from async tasks.
    pub fn bar_handle(&self) -> SegmentBarHandle {
        SegmentBarHandle {
            bar: Arc::clone(&self.bar),
        }
    }
}

impl Render for GpuiSegmentBarView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let bar = Arc::clone(&self.bar);
        let config = self.config.clone();
        let listener = self.listener.clone();

        let mut root = div().size_full();
        if let Some(background) = config.background {
            root = root.bg(to_hsla(background));
        }
        root.child(
            canvas(
                move |bounds, window, _| {
                    let now = Instant::now();
                    let frame = {
                        let mut bar = bar.write().expect("segment bar lock");
                        build_frame(&mut bar, &config, bounds, now)
                    };
                    if let (Some(listener), Some(update)) = (&listener, frame.update) {
                        listener(update);
                    }
                    if frame.needs_next_frame {
                        window.request_animation_frame();
                    }
                    frame
                },
                move |_, frame, window, _| {
                    paint_frame(&frame, window);
                },
            )
            .size_full(),
        )
    }
}

/// A handle for mutating a [`SegmentBar`] held inside a `GpuiSegmentBarView`.
///
/// The handle clones cheaply and can be moved into async tasks. Call
/// `notify` on the view entity after writing so the new target gets drawn.
#[derive(Clone)]
pub struct SegmentBarHandle {
    bar: Arc<RwLock<SegmentBar>>,
}

impl SegmentBarHandle {
    /// Read the bar state.
    ///
    /// The bar is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&SegmentBar) -> R) -> R {
        let bar = self.bar.read().expect("segment bar lock");
        f(&bar)
    }

    /// Mutate the bar state.
    ///
    /// The bar is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut SegmentBar) -> R) -> R {
        let mut bar = self.bar.write().expect("segment bar lock");
        f(&mut bar)
    }
}
