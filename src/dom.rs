//! Browser wiring for the game.
//!
//! Looks up the page's markup once at mount, hangs click listeners on the
//! frogs and the control buttons, and implements [`Stage`] on top of CSS
//! animation classes and timed suspensions. The session itself never sees a
//! DOM type; everything here stays on the presentation side of the boundary.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlAudioElement, HtmlButtonElement, HtmlElement, console, window};

use crate::session::roster::{FOODS, FROGS, OPENING_FOOD};
use crate::session::{self, Food, Frog, ROUND_SECONDS, RoundSummary, Session, Stage, Tone};

// Animation timings, matched to the page's CSS transitions.
const LID_SHAKE_MS: i32 = 430;
const LID_FLY_MS: i32 = 510;
const FLIGHT_MS: i32 = 700;
const ERROR_FLASH_MS: i32 = 1500;

struct App {
    session: RefCell<Session>,
    stage: DomStage,
    /// Active countdown interval handle, replaced on every round start.
    timer: Cell<Option<i32>>,
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

pub fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let stage = DomStage::lookup(&doc).map_err(|missing| {
        console::error_1(&format!("missing required game element: #{missing}").into());
        JsValue::from_str("required game markup not found")
    })?;

    let app = Rc::new(App {
        session: RefCell::new(Session::new(FROGS, FOODS, OPENING_FOOD)),
        stage,
        timer: Cell::new(None),
    });

    // Frog click targets: one listener per ring element carrying a frog id.
    let frogs = doc.query_selector_all(".frog")?;
    for i in 0..frogs.length() {
        let Some(node) = frogs.item(i) else { continue };
        let el: Element = match node.dyn_into() {
            Ok(el) => el,
            Err(_) => continue,
        };
        let Some(frog_id) = el.get_attribute("data-frog-id") else {
            continue;
        };
        let handler = app.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let app = handler.clone();
            let frog_id = frog_id.clone();
            spawn_local(async move {
                session::deliver(&app.session, &app.stage, &frog_id).await;
            });
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let handler = app.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let app = handler.clone();
            spawn_local(async move {
                session::roll(&app.session, &app.stage).await;
            });
        }) as Box<dyn FnMut(_)>);
        app.stage
            .next_btn
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let handler = app.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            start_round(&handler);
        }) as Box<dyn FnMut(_)>);
        app.stage
            .start_btn
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let handler = app.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let on = !handler.stage.music_on.get();
            handler.stage.set_music(on);
        }) as Box<dyn FnMut(_)>);
        app.stage
            .music_btn
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Idle state until the first round: ring locked, empty tray, fresh HUD.
    app.stage
        .ring
        .style()
        .set_property("pointer-events", "none")
        .ok();
    app.stage.show_tray(None);
    app.stage.render_hud(0, 0, ROUND_SECONDS);
    app.stage.update_music_button();

    APP.with(|slot| slot.replace(Some(app)));
    Ok(())
}

/// Launch a fresh round: the start flow runs as a local task while the
/// countdown fires once a second until the round reports itself over.
fn start_round(app: &Rc<App>) {
    if app.session.borrow().is_running() {
        return;
    }
    stop_countdown(app);

    let flow = app.clone();
    spawn_local(async move {
        session::start(&flow.session, &flow.stage).await;
    });

    let ticker = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        if !session::tick(&ticker.session, &ticker.stage) {
            stop_countdown(&ticker);
        }
    }) as Box<dyn FnMut()>);
    let Some(win) = window() else {
        closure.forget();
        return;
    };
    if let Ok(handle) = win
        .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), 1000)
    {
        app.timer.set(Some(handle));
    }
    closure.forget();
}

fn stop_countdown(app: &App) {
    if let Some(handle) = app.timer.take() {
        if let Some(win) = window() {
            win.clear_interval_with_handle(handle);
        }
    }
}

// --- Awaitable timing helpers -------------------------------------------------

async fn wait(ms: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(win) = window() {
            win.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .ok();
        }
    });
    let _ = JsFuture::from(promise).await;
}

async fn next_frame() {
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(win) = window() {
            win.request_animation_frame(&resolve).ok();
        }
    });
    let _ = JsFuture::from(promise).await;
}

// --- DOM stage ----------------------------------------------------------------

/// The page elements the game touches, resolved once at mount.
struct DomStage {
    doc: Document,
    ring: HtmlElement,
    center_box: Element,
    fed_count: Element,
    mistakes: Element,
    time: Element,
    message: Element,
    food_glyph: Element,
    food_label: Element,
    next_btn: HtmlButtonElement,
    start_btn: Element,
    overlay: Element,
    overlay_title: Element,
    overlay_text: Element,
    music_btn: Element,
    music: HtmlAudioElement,
    message_timer: Cell<Option<i32>>,
    music_on: Rc<Cell<bool>>,
}

fn grab(doc: &Document, id: &'static str) -> Result<Element, &'static str> {
    doc.get_element_by_id(id).ok_or(id)
}

impl DomStage {
    /// Resolve every required element, reporting the first missing id.
    fn lookup(doc: &Document) -> Result<Self, &'static str> {
        Ok(Self {
            ring: grab(doc, "ring")?.dyn_into().map_err(|_| "ring")?,
            center_box: grab(doc, "center-box")?,
            fed_count: grab(doc, "fed-count")?,
            mistakes: grab(doc, "mistakes")?,
            time: grab(doc, "time")?,
            message: grab(doc, "message")?,
            food_glyph: grab(doc, "food-emoji")?,
            food_label: grab(doc, "food-label")?,
            next_btn: grab(doc, "next-food-btn")?
                .dyn_into()
                .map_err(|_| "next-food-btn")?,
            start_btn: grab(doc, "start-btn")?,
            overlay: grab(doc, "overlay")?,
            overlay_title: grab(doc, "overlay-title")?,
            overlay_text: grab(doc, "overlay-text")?,
            music_btn: grab(doc, "music-toggle")?,
            music: grab(doc, "bg-music")?.dyn_into().map_err(|_| "bg-music")?,
            message_timer: Cell::new(None),
            music_on: Rc::new(Cell::new(false)),
            doc: doc.clone(),
        })
    }

    fn frog_element(&self, id: &str) -> Option<Element> {
        self.doc
            .query_selector(&format!("[data-frog-id=\"{id}\"]"))
            .ok()
            .flatten()
    }

    fn show_tray(&self, food: Option<&Food>) {
        match food {
            Some(food) => {
                self.food_glyph.set_text_content(Some(food.glyph));
                self.food_label.set_text_content(Some(food.label));
            }
            None => {
                self.food_glyph.set_text_content(Some("❔"));
                self.food_label.set_text_content(Some("No food"));
            }
        }
    }

    /// Build the transient element that carries the food across the ring.
    fn spawn_flight(&self, food: &Food) -> Option<HtmlElement> {
        let el: HtmlElement = self.doc.create_element("div").ok()?.dyn_into().ok()?;
        el.set_class_name("flying-food");
        el.set_text_content(Some(food.glyph));
        let (x, y) = self.center_in_ring(&self.center_box);
        el.style().set_property("left", &format!("{x}px")).ok();
        el.style().set_property("top", &format!("{y}px")).ok();
        self.ring.append_child(&el).ok()?;
        Some(el)
    }

    fn center_in_ring(&self, el: &Element) -> (f64, f64) {
        let ring = self.ring.get_bounding_client_rect();
        let rect = el.get_bounding_client_rect();
        (
            rect.left() - ring.left() + rect.width() / 2.0,
            rect.top() - ring.top() + rect.height() / 2.0,
        )
    }

    fn update_music_button(&self) {
        let label = if self.music_on.get() {
            "Music: on"
        } else {
            "Music: off"
        };
        self.music_btn.set_text_content(Some(label));
    }

    /// Play failures degrade to a message and a reverted toggle; the round
    /// itself never depends on the audio element.
    fn set_music(&self, on: bool) {
        self.music_on.set(on);
        self.update_music_button();
        if !on {
            self.music.pause().ok();
            return;
        }
        self.music.set_volume(0.35);
        match self.music.play() {
            Ok(promise) => {
                let flag = self.music_on.clone();
                let btn = self.music_btn.clone();
                let message = self.message.clone();
                spawn_local(async move {
                    if JsFuture::from(promise).await.is_err() {
                        flag.set(false);
                        btn.set_text_content(Some("Music: off"));
                        message.set_text_content(Some(
                            "Could not start the music. Check audio/bg.mp3.",
                        ));
                    }
                });
            }
            Err(_) => {
                self.music_on.set(false);
                self.update_music_button();
            }
        }
    }
}

impl Stage for DomStage {
    fn render_hud(&self, fed: usize, mistakes: u32, seconds_left: u32) {
        self.fed_count.set_text_content(Some(&fed.to_string()));
        self.mistakes.set_text_content(Some(&mistakes.to_string()));
        self.time.set_text_content(Some(&seconds_left.to_string()));
    }

    fn show_message(&self, text: &str, tone: Tone) {
        self.message.set_text_content(Some(text));
        let errored = matches!(tone, Tone::Error);
        self.message
            .class_list()
            .toggle_with_force("is-error", errored)
            .ok();
        if let Some(handle) = self.message_timer.take() {
            if let Some(win) = window() {
                win.clear_timeout_with_handle(handle);
            }
        }
        if errored {
            let message = self.message.clone();
            let flash = Closure::once_into_js(move || {
                message.class_list().remove_1("is-error").ok();
            });
            if let Some(win) = window() {
                if let Ok(handle) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                    flash.unchecked_ref(),
                    ERROR_FLASH_MS,
                ) {
                    self.message_timer.set(Some(handle));
                }
            }
        }
    }

    fn frog_fed(&self, frog: &Frog) {
        let Some(el) = self.frog_element(frog.id) else {
            return;
        };
        el.class_list().add_1("fed").ok();
        if let Ok(Some(state)) = el.query_selector(".frog-state") {
            state.set_text_content(Some("Full frog"));
        }
    }

    fn round_started(&self) {
        if let Ok(frogs) = self.doc.query_selector_all(".frog") {
            for i in 0..frogs.length() {
                let Some(node) = frogs.item(i) else { continue };
                let el: Element = match node.dyn_into() {
                    Ok(el) => el,
                    Err(_) => continue,
                };
                el.class_list().remove_1("fed").ok();
                if let Ok(Some(state)) = el.query_selector(".frog-state") {
                    state.set_text_content(Some("Hungry frog"));
                }
            }
        }
        self.overlay.set_attribute("hidden", "").ok();
        self.ring.style().set_property("pointer-events", "auto").ok();
        self.next_btn.set_disabled(false);
        self.show_tray(None);
    }

    fn round_over(&self, summary: &RoundSummary) {
        self.overlay.remove_attribute("hidden").ok();
        self.ring.style().set_property("pointer-events", "none").ok();
        self.start_btn.set_text_content(Some("Play again"));
        if summary.won {
            self.overlay_title.set_text_content(Some("Victory!"));
            self.overlay_text.set_text_content(Some(&format!(
                "Every frog is fed. Mistakes: {}.",
                summary.mistakes
            )));
        } else {
            self.overlay_title.set_text_content(Some("Time is up"));
            self.overlay_text.set_text_content(Some(&format!(
                "Fed: {}/{}. Mistakes: {}.",
                summary.fed, summary.roster, summary.mistakes
            )));
        }
    }

    async fn play_reveal(&self, food: Option<&'static Food>) {
        let Some(food) = food else {
            // Nothing left to offer; clear the tray without the lid dance.
            self.show_tray(None);
            return;
        };
        self.next_btn.set_disabled(true);
        let lid = self.center_box.class_list();
        lid.remove_2("reveal-done", "lid-fly").ok();
        lid.add_1("lid-shake").ok();
        self.show_tray(None);
        wait(LID_SHAKE_MS).await;
        lid.remove_1("lid-shake").ok();
        lid.add_1("lid-fly").ok();
        self.show_tray(Some(food));
        wait(LID_FLY_MS).await;
        lid.add_1("reveal-done").ok();
        self.next_btn.set_disabled(false);
    }

    async fn play_delivery(&self, food: &'static Food, frog: &'static Frog) {
        let Some(target) = self.frog_element(frog.id) else {
            return;
        };
        let Some(flying) = self.spawn_flight(food) else {
            return;
        };
        self.next_btn.set_disabled(true);
        // Two frames so the starting position is committed before the
        // transition target is set.
        next_frame().await;
        next_frame().await;
        let (x, y) = self.center_in_ring(&target);
        flying.style().set_property("left", &format!("{x}px")).ok();
        flying.style().set_property("top", &format!("{y}px")).ok();
        wait(FLIGHT_MS).await;
        flying.remove();
        self.next_btn.set_disabled(false);
    }
}
