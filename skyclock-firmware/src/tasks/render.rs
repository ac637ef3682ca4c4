//! Render task
//!
//! Shows the "WiFi Connecting" splash until the clock is usable, then
//! drives the composer at the configured render interval. All panel
//! traffic goes through the shared panel's bus mutex.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker, Timer};
use skyclock_core::config::DeviceConfig;
use skyclock_core::layout::regions::SPLASH_TEXT;
use skyclock_core::layout::{Rect, SCREEN};
use skyclock_core::state::DisplayState;
use skyclock_core::traits::{Canvas, Font, TextRenderer, TextStyle};
use skyclock_display::{Composer, Phase};
use skyclock_drivers::FontSet;

use crate::channels::{current_weather, wall_clock, LINK_READY};
use crate::Panel;

/// Splash animation frame
const SPLASH_FRAME: Duration = Duration::from_millis(500);

/// Splash label, followed by up to four dots
const SPLASH_LABEL: &str = "WiFi Connecting";
const SPLASH_DOTS: &str = "....";

/// Interval between wall-clock log lines
const TIME_LOG_INTERVAL: Duration = Duration::from_secs(30);

#[embassy_executor::task]
pub async fn render_task(
    panel: &'static Panel,
    composer: &'static mut Composer<'static, FontSet>,
    fonts: FontSet,
    config: &'static DeviceConfig,
) {
    info!("Render task started");

    splash(panel, &fonts, config).await;

    let mut ticker = Ticker::every(Duration::from_millis(config.clock.render_interval_ms as u64));
    let mut last_log: Option<Instant> = None;

    loop {
        let now = Instant::now();
        let clock = wall_clock();
        let time = clock.now(now.as_millis());
        let state =
            DisplayState::from_parts(&time, &current_weather(), config.clock.location.as_str());

        let full_refresh = composer.phase() == Phase::FullRefresh;
        let report = composer.render_tick(panel, &state);
        if full_refresh && composer.verify_regions() > 0 {
            warn!("Render: background captures look blank, restores may erase to black");
        }
        if report.errors > 0 {
            warn!(
                "Render: {} failed operations, {} regions repainted",
                report.errors,
                report.repainted.len()
            );
        }

        if last_log.map_or(true, |at| now.duration_since(at) >= TIME_LOG_INTERVAL) {
            info!(
                "Time {}-{}-{} {}:{}:{} ({:?})",
                time.year,
                time.month,
                time.day,
                time.hour,
                time.minute,
                time.second,
                clock.source()
            );
            last_log = Some(now);
        }

        ticker.next().await;
    }
}

/// Animate the connecting splash until the link is ready or the sync
/// timeout passes
async fn splash(panel: &Panel, fonts: &FontSet, config: &DeviceConfig) {
    let background = config.palette.background_color();
    let style = TextStyle::new(Font::Standard, config.palette.text_color());

    if let Err(e) = panel.fill_rect(SCREEN, background) {
        warn!("Splash: clear failed: {:?}", e);
    }
    let advance = match fonts.draw_text(panel, SPLASH_TEXT, SPLASH_LABEL, style, SCREEN) {
        Ok(advance) => advance,
        Err(e) => {
            warn!("Splash: label failed: {:?}", e);
            fonts.text_width(SPLASH_LABEL, Font::Standard)
        }
    };

    let dots_origin = SPLASH_TEXT.right(advance);
    let (cell_w, cell_h) = Font::Standard.cell_size();
    let dots_area = Rect::new(
        dots_origin.x,
        dots_origin.y,
        cell_w * SPLASH_DOTS.len() as u16,
        cell_h,
    );

    let deadline = Instant::now() + Duration::from_secs(config.clock.sync_timeout_s as u64);
    let mut dots = 0;

    loop {
        if let Either::First(()) = select(LINK_READY.wait(), Timer::after(SPLASH_FRAME)).await {
            info!("Link ready, leaving splash");
            return;
        }
        if Instant::now() >= deadline {
            warn!("Splash: link not ready before timeout");
            return;
        }

        dots = (dots + 1) % (SPLASH_DOTS.len() + 1);
        if let Err(e) = panel.fill_rect(dots_area, background) {
            warn!("Splash: dots clear failed: {:?}", e);
            continue;
        }
        if let Err(e) = fonts.draw_text(panel, dots_origin, &SPLASH_DOTS[..dots], style, dots_area) {
            warn!("Splash: dots failed: {:?}", e);
        }
    }
}
