//! Display composer / dirty-region engine
//!
//! The composer owns the previously rendered state and the background
//! cache. Each tick it compares the new [`DisplayState`] with the old one,
//! and for every changed slot restores the captured background and draws
//! the new text, clipped to that slot's region.
//!
//! Nothing here returns an error: failures are logged and counted in the
//! [`TickReport`], and the next tick simply tries again.

use skyclock_core::config::Palette;
use skyclock_core::layout::regions::COLON;
use skyclock_core::layout::weather::ELLIPSIS;
use skyclock_core::layout::{
    date_field, plan_weather, region, seconds_at_region, two_digits, Origin, Rect,
};
use skyclock_core::state::{DirtySet, DisplayState, Slot};
use skyclock_core::traits::{Canvas, CanvasError, Font, TextRenderer, TextStyle};

use crate::background::Background;
use crate::cache::{BackgroundCache, CacheError};
use crate::fmt::{debug, info, warn};

/// Refresh mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Next tick repaints everything
    FullRefresh,
    /// Steady state: only changed slots are touched
    PartialRefresh,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Slots restored and redrawn
    pub repainted: DirtySet,
    /// Canvas or cache operations that failed
    pub errors: u8,
}

impl TickReport {
    /// Nothing changed, nothing was sent
    pub fn is_idle(&self) -> bool {
        self.repainted.is_empty() && self.errors == 0
    }

    fn fail(&mut self) {
        self.errors = self.errors.saturating_add(1);
    }
}

/// Dirty-region engine
pub struct Composer<'a, R: TextRenderer> {
    phase: Phase,
    previous: Option<DisplayState>,
    cache: BackgroundCache,
    background: Background<'a>,
    fonts: R,
    palette: Palette,
}

impl<'a, R: TextRenderer> Composer<'a, R> {
    pub fn new(background: Background<'a>, fonts: R, palette: Palette) -> Self {
        Self {
            phase: Phase::FullRefresh,
            previous: None,
            cache: BackgroundCache::new(),
            background,
            fonts,
            palette,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// State as last drawn
    pub fn previous(&self) -> Option<&DisplayState> {
        self.previous.as_ref()
    }

    pub fn cache(&self) -> &BackgroundCache {
        &self.cache
    }

    /// Paint the static background over the whole screen
    pub fn paint_background<C: Canvas + ?Sized>(&self, canvas: &C) -> Result<(), CanvasError> {
        self.background.paint(canvas)
    }

    /// Capture every region not captured yet
    ///
    /// Must run after the background is painted and before any text is
    /// drawn over it. Returns the number of regions newly captured.
    pub fn init_regions<C: Canvas + ?Sized>(&mut self, canvas: &C) -> usize {
        let mut report = TickReport::default();
        self.capture_missing(canvas, &mut report)
    }

    /// Render one tick
    pub fn render_tick<C: Canvas + ?Sized>(&mut self, canvas: &C, state: &DisplayState) -> TickReport {
        match self.phase {
            Phase::FullRefresh => self.full_refresh(canvas, state),
            Phase::PartialRefresh => self.partial_refresh(canvas, state),
        }
    }

    /// Go back to a full repaint on the next tick
    ///
    /// Captures are kept since the background itself has not changed.
    pub fn reset(&mut self) {
        self.phase = Phase::FullRefresh;
        self.previous = None;
    }

    /// Check every captured region against the plain background colour
    ///
    /// Returns how many captures look like they were taken before the
    /// background image was on the panel.
    pub fn verify_regions(&self) -> usize {
        let reference = self.palette.background_color();
        let mut suspect = 0;
        for slot in Slot::ALL {
            match self.cache.verify(slot, reference) {
                Ok(result) if result.is_suspect() => {
                    warn!(
                        "composer: {:?} capture is {}/{} background fill",
                        slot,
                        result.matching,
                        result.total
                    );
                    suspect += 1;
                }
                Ok(_) | Err(CacheError::NotCaptured) => {}
                Err(err) => warn!("composer: verify {:?} failed: {:?}", slot, err),
            }
        }
        suspect
    }

    fn full_refresh<C: Canvas + ?Sized>(&mut self, canvas: &C, state: &DisplayState) -> TickReport {
        let report = self.repaint_all(canvas, state);
        self.phase = Phase::PartialRefresh;
        info!(
            "composer: full refresh done, {} regions cached, {} errors",
            self.cache.captured_count(),
            report.errors
        );
        report
    }

    /// Paint the background, capture what is missing and draw every slot
    ///
    /// The previous state is only seeded when the whole frame went out, so
    /// a failed frame is repainted on the next tick.
    fn repaint_all<C: Canvas + ?Sized>(&mut self, canvas: &C, state: &DisplayState) -> TickReport {
        let mut report = TickReport::default();

        match self.paint_background(canvas) {
            Ok(()) => {
                self.capture_missing(canvas, &mut report);
            }
            Err(err) => {
                warn!("composer: background paint failed: {:?}", err);
                report.fail();
            }
        }

        let (cell_w, cell_h) = Font::XLarge.cell_size();
        let colon = TextStyle::new(Font::XLarge, self.palette.text_color());
        let colon_clip = Rect::new(COLON.x, COLON.y, cell_w, cell_h);
        self.text(canvas, COLON, ":", colon, colon_clip, &mut report);

        for slot in Slot::ALL {
            self.draw_slot(canvas, slot, state, &mut report);
        }

        report.repainted = DirtySet::all();
        self.previous = if report.errors == 0 {
            Some(state.clone())
        } else {
            None
        };
        report
    }

    fn partial_refresh<C: Canvas + ?Sized>(&mut self, canvas: &C, state: &DisplayState) -> TickReport {
        let previous = match &self.previous {
            Some(previous) if self.cache.captured_count() == Slot::ALL.len() => Some(previous),
            _ => None,
        };
        let Some(dirty) = previous.map(|previous| DirtySet::between(previous, state)) else {
            debug!("composer: last full frame incomplete, repainting");
            return self.repaint_all(canvas, state);
        };

        let mut report = TickReport::default();
        if dirty.is_empty() {
            debug!("composer: no change");
            return report;
        }

        for slot in dirty.iter() {
            if let Err(err) = self.cache.restore(canvas, slot) {
                debug!("composer: restore {:?}: {:?}", slot, err);
                report.fail();
            }
            self.draw_slot(canvas, slot, state, &mut report);
        }

        report.repainted = dirty;
        // Keep diffing against the last good frame until this one goes out
        if report.errors == 0 {
            self.previous = Some(state.clone());
        }
        report
    }

    fn capture_missing<C: Canvas + ?Sized>(&mut self, canvas: &C, report: &mut TickReport) -> usize {
        let mut captured = 0;
        for slot in Slot::ALL {
            if self.cache.is_captured(slot) {
                continue;
            }
            match self.cache.capture(canvas, slot) {
                Ok(()) => captured += 1,
                Err(err) => {
                    warn!("composer: capture {:?} failed: {:?}", slot, err);
                    report.fail();
                }
            }
        }
        captured
    }

    fn draw_slot<C: Canvas + ?Sized>(
        &self,
        canvas: &C,
        slot: Slot,
        state: &DisplayState,
        report: &mut TickReport,
    ) {
        let clip = region(slot);
        let text_color = self.palette.text_color();
        let script = TextStyle::new(Font::Script, text_color);
        let standard = TextStyle::new(Font::Standard, text_color);
        let digits = TextStyle::new(Font::XLarge, text_color);

        match slot {
            Slot::Location => {
                self.text(canvas, clip.origin(), &state.location, script, clip, report);
            }
            Slot::Weather => {
                let plan = plan_weather(&state.weather, &state.temperature);
                self.text(canvas, plan.label_at, &plan.label, script, clip, report);
                if let Some(at) = plan.ellipsis_at {
                    self.text(canvas, at, ELLIPSIS, standard, clip, report);
                }
                let temperature = TextStyle::new(Font::Large, self.palette.temperature_color());
                self.text(canvas, plan.temperature_at, &plan.temperature, temperature, clip, report);
            }
            Slot::Hour => {
                self.text(canvas, clip.origin(), &two_digits(state.hour), digits, clip, report);
            }
            Slot::Minute => {
                self.text(canvas, clip.origin(), &two_digits(state.minute), digits, clip, report);
            }
            Slot::Second => {
                let field = seconds_at_region(state.second, canvas.bounds().width);
                self.text(canvas, field.origin, &field.text, standard, clip, report);
            }
            Slot::Date => {
                let field = date_field(state.month, state.day, Font::Standard.cell_size().0);
                self.text(canvas, field.origin, &field.text, standard, clip, report);
                self.text(canvas, field.weekday_at, state.weekday_label(), script, clip, report);
            }
        }
    }

    fn text<C: Canvas + ?Sized>(
        &self,
        canvas: &C,
        origin: Origin,
        text: &str,
        style: TextStyle,
        clip: Rect,
        report: &mut TickReport,
    ) {
        if let Err(err) = self.fonts.draw_text(canvas, origin, text, style, clip) {
            warn!("composer: text draw failed: {:?}", err);
            report.fail();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, MemCanvas};
    use embedded_graphics::pixelcolor::Rgb565;
    use proptest::prelude::*;
    use skyclock_core::clock::CivilTime;
    use skyclock_core::layout::SCREEN;
    use skyclock_core::weather::WeatherReport;
    use skyclock_drivers::{FontSet, GlyphTable};
    use std::vec::Vec;

    fn sky(x: u16, y: u16) -> Rgb565 {
        Rgb565::new((y / 8) as u8, (x / 4 + 8) as u8, 31 - (y / 8) as u8)
    }

    fn image() -> Vec<Rgb565> {
        let mut pixels = Vec::new();
        for y in 0..128 {
            for x in 0..128 {
                pixels.push(sky(x, y));
            }
        }
        pixels
    }

    fn initial_state() -> DisplayState {
        let time = CivilTime {
            year: 2024,
            month: 1,
            day: 1,
            hour: 9,
            minute: 5,
            second: 0,
            weekday: 1,
        };
        DisplayState::from_parts(&time, &WeatherReport::new("晴", "5"), "杭州")
    }

    fn composer(pixels: &[Rgb565]) -> Composer<'_, FontSet> {
        Composer::new(
            Background::Image(pixels),
            FontSet::new(GlyphTable::empty()),
            Palette::default(),
        )
    }

    fn touched(call: &Call) -> Option<Rect> {
        match call {
            Call::Fill(r) | Call::Image(r) | Call::Read(r) => Some(*r),
            Call::Pixel(x, y) => Some(Rect::new(*x, *y, 1, 1)),
        }
    }

    #[test]
    fn test_first_tick_is_full_refresh() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);
        let state = initial_state();

        assert_eq!(composer.phase(), Phase::FullRefresh);
        let report = composer.render_tick(&canvas, &state);

        assert_eq!(report.repainted, DirtySet::all());
        assert_eq!(report.errors, 0);
        assert_eq!(composer.phase(), Phase::PartialRefresh);
        assert_eq!(composer.cache().captured_count(), 6);
        assert_eq!(composer.previous(), Some(&state));
        assert_eq!(canvas.log()[0], Call::Image(SCREEN));
    }

    #[test]
    fn test_captures_hold_background_not_text() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);

        composer.render_tick(&canvas, &initial_state());

        for slot in Slot::ALL {
            let rect = region(slot);
            let mut expected = Vec::new();
            for y in rect.y..rect.bottom() {
                for x in rect.x..rect.right() {
                    expected.push(sky(x, y));
                }
            }
            assert_eq!(composer.cache().pixels(slot), &expected[..], "{:?}", slot);
        }
    }

    #[test]
    fn test_unchanged_state_is_silent() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);
        let state = initial_state();
        composer.render_tick(&canvas, &state);
        canvas.clear_log();

        let report = composer.render_tick(&canvas, &state);

        assert!(report.is_idle());
        assert_eq!(canvas.calls(), 0);
    }

    #[test]
    fn test_second_tick_touches_only_seconds() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);
        let mut state = initial_state();
        composer.render_tick(&canvas, &state);
        canvas.clear_log();

        state.second = 1;
        let report = composer.render_tick(&canvas, &state);

        let seconds = region(Slot::Second);
        assert_eq!(report.repainted, [Slot::Second].into_iter().collect());
        assert_eq!(canvas.log()[0], Call::Image(seconds));
        assert!(canvas
            .log()
            .iter()
            .filter_map(touched)
            .all(|r| seconds.contains_rect(&r)));
    }

    #[test]
    fn test_repaint_order() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);
        composer.render_tick(&canvas, &initial_state());
        canvas.clear_log();

        let time = CivilTime {
            year: 2024,
            month: 1,
            day: 2,
            hour: 10,
            minute: 0,
            second: 0,
            weekday: 2,
        };
        let next = DisplayState::from_parts(&time, &WeatherReport::new("多云", "7"), "上海");
        composer.render_tick(&canvas, &next);

        let restores: Vec<Rect> = canvas
            .log()
            .into_iter()
            .filter_map(|c| match c {
                Call::Image(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(
            restores,
            [Slot::Location, Slot::Weather, Slot::Hour, Slot::Minute, Slot::Date]
                .map(region)
                .to_vec()
        );
    }

    #[test]
    fn test_weather_placeholder_redraws_weather_only() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);
        let mut state = initial_state();
        composer.render_tick(&canvas, &state);
        canvas.clear_log();

        state.set_weather(",", "12");
        let report = composer.render_tick(&canvas, &state);

        let weather = region(Slot::Weather);
        assert_eq!(report.repainted, [Slot::Weather].into_iter().collect());
        assert!(canvas
            .log()
            .iter()
            .filter_map(touched)
            .all(|r| weather.contains_rect(&r)));
    }

    #[test]
    fn test_errors_are_counted_not_raised() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        canvas.fail_with(Some(CanvasError::NotReady));
        let mut composer = composer(&pixels);

        let report = composer.render_tick(&canvas, &initial_state());

        assert!(report.errors > 0);
        assert_eq!(composer.phase(), Phase::PartialRefresh);
        assert_eq!(composer.cache().captured_count(), 0);
    }

    #[test]
    fn test_failed_paint_skips_capture() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        canvas.fail_with(Some(CanvasError::Transport));
        let mut composer = composer(&pixels);

        composer.render_tick(&canvas, &initial_state());

        assert!(!canvas.log().iter().any(|c| matches!(c, Call::Read(_))));
        assert!(composer.previous().is_none());
    }

    #[test]
    fn test_failed_first_frame_recovers() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        canvas.fail_with(Some(CanvasError::Transport));
        let mut composer = composer(&pixels);
        let mut state = initial_state();
        composer.render_tick(&canvas, &state);

        canvas.fail_with(None);
        canvas.clear_log();
        state.second = 1;
        let report = composer.render_tick(&canvas, &state);

        let hour = region(Slot::Hour);
        assert_eq!(report.errors, 0);
        assert_eq!(report.repainted, DirtySet::all());
        assert_eq!(composer.cache().captured_count(), 6);
        assert_eq!(composer.previous(), Some(&state));
        assert_eq!(canvas.log()[0], Call::Image(SCREEN));
        assert!(canvas
            .log()
            .iter()
            .any(|c| matches!(c, Call::Fill(r) if hour.contains_rect(r))));

        canvas.clear_log();
        assert!(composer.render_tick(&canvas, &state).is_idle());
        assert_eq!(canvas.calls(), 0);
    }

    #[test]
    fn test_failed_partial_tick_is_retried() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);
        let mut state = initial_state();
        composer.render_tick(&canvas, &state);

        canvas.fail_with(Some(CanvasError::Transport));
        state.second = 1;
        assert!(composer.render_tick(&canvas, &state).errors > 0);

        canvas.fail_with(None);
        let report = composer.render_tick(&canvas, &state);
        assert_eq!(report.errors, 0);
        assert_eq!(report.repainted, [Slot::Second].into_iter().collect());
    }

    #[test]
    fn test_reset_keeps_captures() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
        let mut composer = composer(&pixels);
        let state = initial_state();
        composer.render_tick(&canvas, &state);

        composer.reset();
        assert_eq!(composer.phase(), Phase::FullRefresh);
        assert!(composer.previous().is_none());
        canvas.clear_log();

        let report = composer.render_tick(&canvas, &state);
        assert_eq!(report.errors, 0);
        assert_eq!(report.repainted, DirtySet::all());
        assert!(!canvas.log().iter().any(|c| matches!(c, Call::Read(_))));
    }

    #[test]
    fn test_init_regions_counts_new_captures() {
        let pixels = image();
        let canvas = MemCanvas::with_pattern(sky);
        let mut composer = composer(&pixels);

        assert_eq!(composer.init_regions(&canvas), 6);
        assert_eq!(composer.init_regions(&canvas), 0);
    }

    #[test]
    fn test_verify_regions() {
        let black = Rgb565::new(0, 0, 0);
        let pixels = image();

        let blank = MemCanvas::with_pattern(|_, _| black);
        let mut early = composer(&pixels);
        early.init_regions(&blank);
        assert_eq!(early.verify_regions(), 6);

        let painted = MemCanvas::with_pattern(sky);
        let mut on_time = composer(&pixels);
        on_time.init_regions(&painted);
        assert_eq!(on_time.verify_regions(), 0);
    }

    #[test]
    fn test_solid_background() {
        let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(31, 0, 0));
        let mut composer = Composer::new(
            Background::Solid(Rgb565::new(0, 0, 0)),
            FontSet::new(GlyphTable::empty()),
            Palette::default(),
        );

        composer.render_tick(&canvas, &initial_state());

        assert_eq!(canvas.log()[0], Call::Fill(SCREEN));
        assert!(composer
            .cache()
            .pixels(Slot::Hour)
            .iter()
            .all(|p| *p == Rgb565::new(0, 0, 0)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_tick_repaints_only_dirty_regions(
            hour in 0u8..24,
            minute in 0u8..60,
            second in 0u8..60,
            next_hour in 0u8..24,
            next_minute in 0u8..60,
            next_second in 0u8..60,
        ) {
            let pixels = image();
            let canvas = MemCanvas::with_pattern(|_, _| Rgb565::new(0, 0, 0));
            let mut composer = composer(&pixels);
            let time = CivilTime { year: 2024, month: 3, day: 9, hour, minute, second, weekday: 6 };
            let state = DisplayState::from_parts(&time, &WeatherReport::new("晴", "5"), "杭州");
            composer.render_tick(&canvas, &state);
            canvas.clear_log();

            let mut next = state.clone();
            next.hour = next_hour;
            next.minute = next_minute;
            next.second = next_second;
            let report = composer.render_tick(&canvas, &next);

            let dirty = DirtySet::between(&state, &next);
            prop_assert_eq!(report.repainted, dirty);
            prop_assert_eq!(report.errors, 0);
            prop_assert!(canvas
                .log()
                .iter()
                .filter_map(touched)
                .all(|r| dirty.iter().any(|slot| region(slot).contains_rect(&r))));
        }
    }
}
