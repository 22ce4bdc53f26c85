use std::time::{Duration, Instant};

use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};
use tracing_subscriber::EnvFilter;

use gpui_segmentbar::{
    BreathEffect, GpuiSegmentBarView, ProgressEvent, ProgressUpdate, SegmentBar,
    SegmentBarViewConfig, Theme,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(480.0), px(120.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let theme = Theme::dark();
            let bar = SegmentBar::builder()
                .theme(&theme)
                .segment_count(5)
                .spacing(8.0)
                .angle(20.0)
                .breath(BreathEffect::default())
                .build()
                .expect("valid bar configuration");

            let config = SegmentBarViewConfig {
                bar_height: Some(16.0),
                background: Some(theme.background),
                ..Default::default()
            };
            let view = GpuiSegmentBarView::with_config(bar, config).on_progress_event(|update: ProgressUpdate| {
                if let ProgressEvent::Finished { progress } = update.event {
                    tracing::info!(
                        progress,
                        edge = update.coordinates.top_right_x,
                        "segment reached"
                    );
                }
            });
            let handle = view.bar_handle();
            let view_handle = cx.new(|_| view);

            let view_for_task = view_handle.clone();
            window
                .spawn(cx, move |cx: &mut AsyncWindowContext| {
                    let mut cx = cx.clone();
                    async move {
                        loop {
                            Timer::after(Duration::from_millis(1500)).await;
                            cx.update(|_, cx| {
                                view_for_task.update(cx, |_view, view_cx| {
                                    handle.write(|bar| {
                                        let now = Instant::now();
                                        if !bar.increment(now) {
                                            bar.set_progress(0.0, now);
                                        }
                                    });
                                    view_cx.notify();
                                });
                            })
                            .ok();
                        }
                    }
                })
                .detach();

            view_handle
        })
        .expect("open demo window");
    });
}
