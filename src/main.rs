//! Flipper entry point
//!
//! On the web this binds the page's controls to the flip engine. Natively it
//! runs a headless batch of flips and prints the tally.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Element, Event, HtmlButtonElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use flipper::audio::{AudioManager, SoundEffect};
    use flipper::consts::*;
    use flipper::persistence::{LocalStore, Store};
    use flipper::sim::{
        FlipEngine, FlipPhase, KeyAction, Outcome, PositionHint, SeededRandom, TapDebounce,
    };
    use flipper::{Settings, Tally, ThemeToggle, ui};

    const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

    /// Widget instance holding all state
    struct App {
        engine: FlipEngine<SeededRandom, LocalStore>,
        settings: Settings,
        theme: ThemeToggle,
        taps: TapDebounce,
        audio: AudioManager,
        /// Bumped per announcement so stale clear timers leave newer text alone
        announce_seq: u32,
    }

    type Shared = Rc<RefCell<App>>;

    fn element(id: &str) -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    fn html_element(id: &str) -> Option<HtmlElement> {
        element(id)?.dyn_into().ok()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str, on: bool) {
        if let Some(el) = element(id) {
            let list = el.class_list();
            let _ = if on { list.add_1(class) } else { list.remove_1(class) };
        }
    }

    fn has_class(id: &str, class: &str) -> bool {
        element(id).is_some_and(|el| el.class_list().contains(class))
    }

    fn set_style(id: &str, property: &str, value: &str) {
        if let Some(el) = html_element(id) {
            let _ = el.style().set_property(property, value);
        }
    }

    fn set_timeout(ms: u32, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else { return };
        let callback = Closure::once_into_js(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            ms as i32,
        );
    }

    fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    fn motion_query() -> Option<web_sys::MediaQueryList> {
        web_sys::window()?.match_media(REDUCED_MOTION_QUERY).ok().flatten()
    }

    fn prefers_reduced_motion() -> bool {
        motion_query().is_some_and(|q| q.matches())
    }

    /// Keep the CSS flip duration in step with the engine's timer
    fn sync_animation_duration(settings: &Settings) {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let duration = settings.animation_duration_ms();
            let _ = root
                .style()
                .set_property("--animation-duration", &format!("{duration}ms"));
        }
    }

    /// Hint for a pointer at `client_x` over the flip button
    fn hint_at(client_x: f64) -> Option<PositionHint> {
        let rect = element("flipBtn")?.get_bounding_client_rect();
        PositionHint::from_client_x(client_x, rect.left(), rect.width())
    }

    fn announce(app: &Shared, msg: &str) {
        let seq = {
            let mut a = app.borrow_mut();
            a.announce_seq = a.announce_seq.wrapping_add(1);
            a.announce_seq
        };
        set_text("ariaLive", msg);

        let app = app.clone();
        set_timeout(ARIA_TIMEOUT_MS, move || {
            if app.borrow().announce_seq == seq {
                set_text("ariaLive", "");
            }
        });
    }

    fn count_id(outcome: Outcome) -> &'static str {
        match outcome {
            Outcome::Heads => "headsCount",
            Outcome::Tails => "tailsCount",
        }
    }

    fn render_tally(tally: &Tally, changed: Option<Outcome>, reduced_motion: bool) {
        for outcome in [Outcome::Heads, Outcome::Tails] {
            set_text(count_id(outcome), &tally.count(outcome).to_string());
        }

        let Some(outcome) = changed else { return };
        if reduced_motion {
            return;
        }
        let id = count_id(outcome);
        set_class(id, "updated", true);
        set_timeout(STATS_UPDATE_DURATION_MS, move || set_class(id, "updated", false));
    }

    fn set_flip_button(phase: FlipPhase) {
        let button = element("flipBtn").and_then(|e| e.dyn_into::<HtmlButtonElement>().ok());
        if let Some(btn) = button {
            btn.set_disabled(phase.is_flipping());
        }
        set_text("flipBtn", ui::flip_button_label(phase));
    }

    fn apply_theme(app: &Shared) {
        let theme = app.borrow().theme.theme();
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
        if let Some(toggle) = element("themeToggle") {
            let _ = toggle.set_attribute("aria-label", &theme.toggle_label());
        }

        // The icon is an <svg>, so style it through the attribute
        let Some(icon) = element("themeIcon") else { return };
        let _ = icon.set_attribute("style", "opacity: 0; transform: scale(0.8)");
        set_timeout(THEME_ICON_SWAP_MS, move || {
            icon.set_inner_html(ui::theme_icon_svg(theme));
            let _ = icon.set_attribute("style", "opacity: 1; transform: scale(1)");
        });
    }

    fn begin_flip(app: &Shared, hint: Option<PositionHint>) {
        let (start, phase, duration, reduced_motion) = {
            let mut a = app.borrow_mut();
            let Some(start) = a.engine.begin_flip(hint) else { return };
            a.audio.play(SoundEffect::Flip);
            (
                start,
                a.engine.phase(),
                a.settings.animation_duration_ms(),
                a.settings.reduced_motion,
            )
        };

        set_flip_button(phase);
        set_class("resultLabel", "show", false);
        set_text("resultLabel", "");
        announce(app, ui::FLIPPING_ANNOUNCEMENT);

        if let Some(wrapped) = start.wrapped_rotation {
            // Jump without a transition so the reset is invisible
            if let Some(coin) = html_element("coin") {
                let style = coin.style();
                let _ = style.set_property("transition", "none");
                let _ = style.set_property("transform", &format!("rotateX({wrapped}deg)"));
                let _ = coin.offset_width();
                let _ = style.remove_property("transition");
            }
        }

        set_class("coin", "coin-flipping", true);
        set_style("coin", "transform", &format!("rotateX({}deg)", start.target_rotation));
        if !reduced_motion {
            set_class("shadow", "shadow-animate", true);
        }

        let app = app.clone();
        set_timeout(duration, move || complete_flip(&app));
    }

    fn complete_flip(app: &Shared) {
        let (done, rotation, settings) = {
            let mut a = app.borrow_mut();
            let done = a.engine.complete_flip();
            if done.outcome.is_some() {
                a.audio.play(SoundEffect::Land);
            }
            (done, a.engine.rotation(), a.settings)
        };
        let Some(outcome) = done.outcome else { return };

        set_flip_button(FlipPhase::Idle);
        set_class("coin", "coin-flipping", false);
        set_style("coin", "transition", "none");

        match settings.settle_duration_ms() {
            Some(settle) => {
                set_style("coin", "--final-rotation", &format!("{rotation}deg"));
                set_class("coin", "coin-settling", true);
                set_timeout(settle, || {
                    set_class("coin", "coin-settling", false);
                    set_style("coin", "transition", "");
                });
            }
            None => set_style("coin", "transition", ""),
        }

        set_class("shadow", "shadow-animate", false);
        set_text("resultLabel", outcome.label());
        set_class("resultLabel", "show", true);
        announce(app, &ui::result_announcement(outcome));
        render_tally(&done.tally, Some(outcome), settings.reduced_motion);
    }

    fn show_reset_confirmation(app: &Shared) {
        if has_class("confirmOverlay", "show") {
            return;
        }
        let (tally, reduced_motion) = {
            let a = app.borrow();
            if !a.engine.can_request_reset() {
                return;
            }
            (a.engine.tally(), a.settings.reduced_motion)
        };

        set_text("confirmHeads", &tally.heads_count.to_string());
        set_text("confirmTails", &tally.tails_count.to_string());
        set_class("confirmOverlay", "show", true);
        if let Some(cancel) = html_element("confirmCancel") {
            let _ = cancel.focus();
        }

        if !reduced_motion {
            set_class("confirmIcon", "shake", true);
            set_timeout(SHAKE_DURATION_MS, || set_class("confirmIcon", "shake", false));
        }
    }

    fn hide_reset_confirmation() {
        set_class("confirmOverlay", "show", false);
        if let Some(reset) = html_element("resetBtn") {
            let _ = reset.focus();
        }
    }

    /// Keep Tab and Shift+Tab cycling inside the open reset dialog
    fn trap_dialog_focus(overlay: &Element, event: &KeyboardEvent) {
        if event.key() != "Tab" || !overlay.class_list().contains("show") {
            return;
        }
        let Ok(nodes) = overlay.query_selector_all(ui::FOCUSABLE_SELECTOR) else {
            return;
        };
        let focusable: Vec<HtmlElement> = (0..nodes.length())
            .filter_map(|i| nodes.item(i)?.dyn_into().ok())
            .collect();
        let active = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.active_element());
        let focused = active.and_then(|a| focusable.iter().position(|el| **el == a));

        let Some(target) = ui::focus_trap_target(focused, focusable.len(), event.shift_key())
        else {
            return;
        };
        event.prevent_default();
        let _ = focusable[target].focus();
    }

    fn confirm_reset(app: &Shared) {
        let tally = app.borrow_mut().engine.reset_tally();
        render_tally(&tally, None, true);
        set_class("resultLabel", "show", false);
        announce(app, ui::RESET_ANNOUNCEMENT);
        hide_reset_confirmation();
    }

    fn toggle_theme(app: &Shared) {
        let toggled = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            a.theme.toggle(now_ms(), a.engine.store_mut())
        };
        if let Some(theme) = toggled {
            apply_theme(app);
            announce(app, &ui::theme_announcement(theme));
        }
    }

    fn handle_key(app: &Shared, event: &KeyboardEvent) {
        let Some(action) = KeyAction::from_code(&event.code()) else { return };
        let dialog_open = has_class("confirmOverlay", "show");

        if !action.is_flip() {
            if dialog_open {
                hide_reset_confirmation();
            }
            return;
        }
        if dialog_open || app.borrow().engine.is_flipping() {
            return;
        }

        let document = web_sys::window().and_then(|w| w.document());
        let active = document.and_then(|d| d.active_element());
        let tag = active.as_ref().map(|el| el.tag_name()).unwrap_or_default();
        if tag == "INPUT" || tag == "TEXTAREA" {
            return;
        }

        let hint = match action {
            KeyAction::Flip => {
                // Space/Enter on other buttons belongs to those buttons
                let on_flip_button = active.as_ref().is_some_and(|el| el.id() == "flipBtn");
                if tag != "BODY" && !on_flip_button {
                    return;
                }
                None
            }
            _ => {
                let Some(rect) = element("flipBtn").map(|b| b.get_bounding_client_rect()) else {
                    return;
                };
                action.position_hint(rect.left(), rect.width())
            }
        };

        event.prevent_default();
        begin_flip(app, hint);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flipper starting...");

        let rng = SeededRandom::new(now_ms() as u64);
        let seed = rng.seed();
        let store = LocalStore::new();
        let settings = Settings::new(prefers_reduced_motion());
        let theme = ThemeToggle::new(store.load_theme());

        let engine = FlipEngine::new(rng, store);
        let tally = engine.tally();
        let rotation = engine.rotation();

        let app: Shared = Rc::new(RefCell::new(App {
            engine,
            settings,
            theme,
            taps: TapDebounce::new(),
            audio: AudioManager::new(),
            announce_seq: 0,
        }));

        render_tally(&tally, None, true);
        set_style("coin", "transform", &format!("rotateX({rotation}deg)"));
        set_style("coin", "--final-rotation", &format!("{rotation}deg"));
        sync_animation_duration(&settings);
        apply_theme(&app);
        setup_input_handlers(app);

        log::info!("Flipper running (seed {})", seed);
    }

    fn on_click(id: &str, app: &Shared, f: fn(&Shared)) {
        let Some(el) = element(id) else {
            log::warn!("Missing element #{id}");
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| f(&app));
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(app: Shared) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Flip button: click position biases the outcome
        if let Some(btn) = element("flipBtn") {
            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    begin_flip(&app, hint_at(event.client_x() as f64));
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if !app.borrow_mut().taps.accept(now_ms()) {
                        return;
                    }
                    let hint = event
                        .touches()
                        .get(0)
                        .and_then(|t| hint_at(t.client_x() as f64));
                    begin_flip(&app, hint);
                });
                let options = web_sys::AddEventListenerOptions::new();
                options.set_passive(false);
                let _ = btn.add_event_listener_with_callback_and_add_event_listener_options(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                    &options,
                );
                closure.forget();
            }
        }

        on_click("resetBtn", &app, show_reset_confirmation);
        on_click("confirmCancel", &app, |_| hide_reset_confirmation());
        on_click("confirmReset", &app, confirm_reset);
        on_click("themeToggle", &app, toggle_theme);

        // Clicking the backdrop (not the dialog) closes it
        if let Some(overlay) = element("confirmOverlay") {
            let overlay_clone = overlay.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|t| t == overlay_clone);
                if on_backdrop {
                    hide_reset_confirmation();
                }
            });
            let _ = overlay
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();

            let trap_target = overlay.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                trap_dialog_focus(&trap_target, &event);
            });
            let _ = overlay
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Follow the OS motion setting if it changes while the page is open
        if let Some(query) = motion_query() {
            let app = app.clone();
            let query_clone = query.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let settings = {
                    let mut a = app.borrow_mut();
                    a.settings.reduced_motion = query_clone.matches();
                    a.settings
                };
                log::info!("Reduced motion preference: {}", settings.reduced_motion);
                sync_animation_duration(&settings);
            });
            let _ = query
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            handle_key(&app, &event);
        });
        let _ = document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flipper::sim::{FlipEngine, SeededRandom};
    use flipper::{MemoryStore, ui};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let count = match args.next().map(|a| a.parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Invalid flip count ({e}), using 10");
            10
        }
        None => 10,
    };
    let seed = args.next().and_then(|a| a.parse::<u64>().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let rng = SeededRandom::new(seed);
    log::info!("Flipper (native) flipping {} coins with seed {}", count, rng.seed());

    let mut engine = FlipEngine::new(rng, MemoryStore::new());
    for i in 1..=count {
        let Some(start) = engine.begin_flip(None) else {
            continue;
        };
        let done = engine.complete_flip();
        log::info!(
            "Flip {}: {} ({} spins, {}°)",
            i,
            start.outcome.label(),
            start.extra_spins,
            start.target_rotation
        );
        debug_assert_eq!(done.outcome, Some(start.outcome));
    }

    println!("{}", ui::tally_summary(&engine.tally()));
}
