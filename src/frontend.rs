use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::{Interval, Timeout};
use js_sys::{Array, Math};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, PageTransitionEvent, ScrollBehavior,
    ScrollToOptions,
};

use crate::config::{
    BehaviorConfig, FLASH_DURATION_MS, HERO_VISIBILITY_THRESHOLD, QUOTE_ENTER_DELAY_MS,
    QUOTE_EXIT_MS, REVEAL_VISIBILITY_THRESHOLD, SKILL_BAR_VISIBILITY_THRESHOLD,
};
use crate::hero::{self, flash_overlay_css, icon_visible_after, BAT_SIGNAL_ID, FLASH_KEYFRAMES, HERO_ID};
use crate::logging::{log_event, LogLevel};
use crate::nav::{
    anchor_scroll_top, fragment_target, is_scrolled, MenuState, ACTIVE_CLASS, IN_PAGE_ANCHOR_SELECTOR,
    NAV_CONTAINER_SELECTOR, NAV_ID, NAV_LINKS_SELECTOR, NAV_TOGGLE_ID, SCROLLED_CLASS,
};
use crate::quotes::{self, pick_quote, PopupPhase, PopupSlot, PopupTimeline, POPUP_CLASS, SOURCE_CLASS, TEXT_CLASS};
use crate::reveal::{self, animated_selector_list, plan_reveals, EntrySnapshot, ANIMATE_ON_SCROLL_CLASS};
use crate::skills::{
    skill_bar_action, SkillBarAction, ANIMATED_CLASS, SKILL_BAR_SELECTOR, TARGET_WIDTH_PROPERTY,
    WIDTH_ATTRIBUTE,
};
use crate::typing::{line_start_delay_ms, typed_prefix, CHAR_INTERVAL_MS, TAGLINE_ITEM_SELECTOR};

const PROJECT_CARD_SELECTOR: &str = ".project-card";
const CARD_GLOW_SHADOW: &str = "0 0 30px rgba(0, 168, 232, 0.4)";

const BANNER: &str = "
%c🦇 Welcome to the Batcave... I mean, Calvin's Portfolio! 🦇

%cBuilt with passion for AI and cinema.

Contact: calvinjmy993@gmail.com

\"It's not who I am underneath, but what I do that defines me.\"
";
const BANNER_TITLE_STYLE: &str = "font-size: 16px; font-weight: bold; color: #d4af37;";
const BANNER_BODY_STYLE: &str = "font-size: 12px; color: #00a8e8;";

type QuoteSlot = Rc<RefCell<PopupSlot<Element>>>;

/// An intersection observer together with the closure it calls back into.
/// Dropping it disconnects the observer.
struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    fn new(
        threshold: f64,
        mut on_entries: impl FnMut(&[IntersectionObserverEntry], &IntersectionObserver) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let entries: Vec<IntersectionObserverEntry> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .collect();
                on_entries(&entries, &observer);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe(&self, target: &Element) {
        self.observer.observe(target);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything one page load wires up. Dropping it removes every listener,
/// disconnects every observer and takes injected nodes back out.
#[derive(Default)]
struct Page {
    listeners: Vec<EventListener>,
    observers: Vec<Observer>,
    injected: Vec<Element>,
}

impl Page {
    fn mount(document: &Document, config: &BehaviorConfig) -> Self {
        let mut page = Self::default();
        let quote_slot: QuoteSlot = Rc::new(RefCell::new(PopupSlot::default()));

        let outcomes = [
            ("navigation", mount_navigation(document, config, &mut page)),
            ("scroll_reveal", mount_scroll_reveal(document, config, &mut page)),
            ("bat_signal", mount_bat_signal(document, config, &quote_slot, &mut page)),
            ("mobile_menu", mount_mobile_menu(document, &mut page)),
            ("skill_bars", mount_skill_bars(document, config, &mut page)),
            ("card_glow", mount_card_glow(document, &mut page)),
        ];

        for (feature, outcome) in outcomes {
            report_mount(config, feature, outcome);
        }

        if config.typing_effect {
            report_mount(config, "typing_effect", start_typing_effect(document));
        }

        page
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for node in self.injected.drain(..) {
            node.remove();
        }
    }
}

fn report_mount(config: &BehaviorConfig, feature: &str, outcome: Result<bool, JsValue>) {
    match outcome {
        Ok(true) => {}
        Ok(false) => log_event(
            config.log_level,
            LogLevel::Debug,
            "feature.skipped",
            json!({ "feature": feature }),
        ),
        Err(error) => report_failure(config, feature, &error),
    }
}

fn report_failure(config: &BehaviorConfig, feature: &str, error: &JsValue) {
    log_event(
        config.log_level,
        LogLevel::Info,
        "feature.failed",
        json!({ "feature": feature, "error": describe_js_error(error) }),
    );
}

fn describe_js_error(error: &JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn set_class(element: &Element, class: &str, present: bool) {
    let classes = element.class_list();
    let _ = if present {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

fn read_config(document: &Document) -> BehaviorConfig {
    let body = document.body();
    BehaviorConfig::from_attributes(|name| body.as_ref().and_then(|body| body.get_attribute(name)))
}

fn mount_navigation(document: &Document, config: &BehaviorConfig, page: &mut Page) -> Result<bool, JsValue> {
    let Some(win) = window() else {
        return Ok(false);
    };
    let Some(nav) = document.get_element_by_id(NAV_ID) else {
        return Ok(false);
    };
    let nav: HtmlElement = nav.dyn_into()?;
    let threshold = config.nav_scroll_threshold_px;

    set_class(&nav, SCROLLED_CLASS, is_scrolled(win.scroll_y()?, threshold));

    {
        let nav = nav.clone();
        let scroll_window = win.clone();
        page.listeners.push(EventListener::new(&win, "scroll", move |_| {
            let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
            set_class(&nav, SCROLLED_CLASS, is_scrolled(scroll_y, threshold));
        }));
    }

    for anchor in query_all(document, IN_PAGE_ANCHOR_SELECTOR)? {
        let link = anchor.clone();
        let document = document.clone();
        let nav = nav.clone();
        let win = win.clone();

        page.listeners.push(EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();

                let href = link.get_attribute("href").unwrap_or_default();
                let Some(target) = fragment_target(&href)
                    .and_then(|id| document.get_element_by_id(id))
                    .and_then(|target| target.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };

                close_mobile_menu(&document);

                let options = ScrollToOptions::new();
                options.set_top(anchor_scroll_top(target.offset_top(), nav.offset_height()));
                options.set_behavior(ScrollBehavior::Smooth);
                win.scroll_to_with_scroll_to_options(&options);
            },
        ));
    }

    Ok(true)
}

fn set_menu_state(links: &Element, toggle: &Element, state: MenuState) {
    set_class(links, ACTIVE_CLASS, state.is_open());
    set_class(toggle, ACTIVE_CLASS, state.is_open());
}

fn close_mobile_menu(document: &Document) {
    if let Ok(Some(links)) = document.query_selector(NAV_LINKS_SELECTOR) {
        set_class(&links, ACTIVE_CLASS, false);
    }
    if let Some(toggle) = document.get_element_by_id(NAV_TOGGLE_ID) {
        set_class(&toggle, ACTIVE_CLASS, false);
    }
}

fn mount_mobile_menu(document: &Document, page: &mut Page) -> Result<bool, JsValue> {
    let (Some(toggle), Some(links)) = (
        document.get_element_by_id(NAV_TOGGLE_ID),
        document.query_selector(NAV_LINKS_SELECTOR)?,
    ) else {
        return Ok(false);
    };

    {
        let toggle_button = toggle.clone();
        let links = links.clone();
        page.listeners.push(EventListener::new(&toggle, "click", move |_| {
            let next = MenuState::from_active(links.class_list().contains(ACTIVE_CLASS)).toggled();
            set_menu_state(&links, &toggle_button, next);
        }));
    }

    page.listeners.push(EventListener::new(document, "click", move |event| {
        let inside_nav = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(NAV_CONTAINER_SELECTOR).ok().flatten())
            .is_some();
        let current = MenuState::from_active(links.class_list().contains(ACTIVE_CLASS));
        set_menu_state(&links, &toggle, current.after_document_click(inside_nav));
    }));

    Ok(true)
}

fn mount_scroll_reveal(document: &Document, config: &BehaviorConfig, page: &mut Page) -> Result<bool, JsValue> {
    let elements = query_all(document, &animated_selector_list())?;
    if elements.is_empty() {
        return Ok(false);
    }

    for element in &elements {
        element.class_list().add_1(ANIMATE_ON_SCROLL_CLASS)?;
    }

    let stagger_ms = config.reveal_stagger_ms;
    let min_level = config.log_level;
    let observer = Observer::new(REVEAL_VISIBILITY_THRESHOLD, move |entries, observer| {
        let snapshots: Vec<EntrySnapshot> = entries
            .iter()
            .map(|entry| EntrySnapshot {
                intersecting: entry.is_intersecting(),
                already_revealed: entry.target().class_list().contains(reveal::VISIBLE_CLASS),
            })
            .collect();

        for entry in entries.iter().filter(|entry| entry.is_intersecting()) {
            observer.unobserve(&entry.target());
        }

        let steps = plan_reveals(&snapshots, stagger_ms);
        for step in &steps {
            let target = entries[step.entry_index].target();
            Timeout::new(step.delay_ms, move || {
                set_class(&target, reveal::VISIBLE_CLASS, true);
            })
            .forget();
        }

        if !steps.is_empty() {
            log_event(
                min_level,
                LogLevel::Debug,
                "reveal.scheduled",
                json!({ "count": steps.len(), "stagger_ms": stagger_ms }),
            );
        }
    })?;

    for element in &elements {
        observer.observe(element);
    }
    page.observers.push(observer);

    Ok(true)
}

fn mount_bat_signal(
    document: &Document,
    config: &BehaviorConfig,
    quote_slot: &QuoteSlot,
    page: &mut Page,
) -> Result<bool, JsValue> {
    let Some(icon) = document.get_element_by_id(BAT_SIGNAL_ID) else {
        return Ok(false);
    };
    let icon: HtmlElement = icon.dyn_into()?;

    match document.get_element_by_id(HERO_ID) {
        Some(hero_section) => {
            let icon = icon.clone();
            let observer = Observer::new(HERO_VISIBILITY_THRESHOLD, move |entries, _| {
                let intersecting: Vec<bool> = entries.iter().map(|entry| entry.is_intersecting()).collect();
                if let Some(visible) = icon_visible_after(&intersecting) {
                    set_class(&icon, hero::VISIBLE_CLASS, visible);
                }
            })?;
            observer.observe(&hero_section);
            page.observers.push(observer);
        }
        None => log_event(
            config.log_level,
            LogLevel::Debug,
            "feature.skipped",
            json!({ "feature": "hero_observer" }),
        ),
    }

    let style = icon.style();
    style.set_property("cursor", "pointer")?;
    style.set_property("pointer-events", "auto")?;

    if let Some(head) = document.head() {
        let keyframes = document.create_element("style")?;
        keyframes.set_text_content(Some(FLASH_KEYFRAMES));
        head.append_child(&keyframes)?;
        page.injected.push(keyframes);
    }

    let click_icon = icon.clone();
    let document = document.clone();
    let config = config.clone();
    let quote_slot = quote_slot.clone();
    page.listeners.push(EventListener::new(&icon, "click", move |_| {
        if let Err(error) = spawn_flash(&document, &click_icon) {
            report_failure(&config, "flash", &error);
        }
        if let Err(error) = show_quote(&document, &config, &quote_slot) {
            report_failure(&config, "quote_popup", &error);
        }
    }));

    Ok(true)
}

fn spawn_flash(document: &Document, icon: &HtmlElement) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };

    let flash: HtmlElement = document.create_element("div")?.dyn_into()?;
    flash
        .style()
        .set_css_text(&flash_overlay_css(icon.offset_left(), icon.offset_top()));
    body.append_child(&flash)?;

    Timeout::new(FLASH_DURATION_MS, move || flash.remove()).forget();
    Ok(())
}

fn show_quote(document: &Document, config: &BehaviorConfig, quote_slot: &QuoteSlot) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    let quote = pick_quote(Math::random());

    let popup = document.create_element("div")?;
    popup.set_class_name(POPUP_CLASS);

    let text = document.create_element("p")?;
    text.set_class_name(TEXT_CLASS);
    text.set_text_content(Some(&quote.display_text()));
    popup.append_child(&text)?;

    let source = document.create_element("span")?;
    source.set_class_name(SOURCE_CLASS);
    source.set_text_content(Some(&quote.display_source()));
    popup.append_child(&source)?;

    quote_slot
        .borrow_mut()
        .show(popup.clone(), |previous| previous.remove());
    body.append_child(&popup)?;

    let timeline = PopupTimeline {
        enter_delay_ms: QUOTE_ENTER_DELAY_MS,
        dwell_ms: config.quote_duration_ms,
        exit_ms: QUOTE_EXIT_MS,
    };
    for (phase, at_ms) in timeline.schedule() {
        let popup = popup.clone();
        let quote_slot = quote_slot.clone();
        Timeout::new(at_ms, move || match phase {
            PopupPhase::Visible => set_class(&popup, quotes::VISIBLE_CLASS, true),
            PopupPhase::Fading => set_class(&popup, quotes::VISIBLE_CLASS, false),
            PopupPhase::Removed => {
                quote_slot.borrow_mut().release(&popup);
                popup.remove();
            }
            PopupPhase::Absent | PopupPhase::Inserted => {}
        })
        .forget();
    }

    log_event(config.log_level, LogLevel::Debug, "quote.shown", json!({ "quote": quote }));
    Ok(())
}

fn mount_skill_bars(document: &Document, config: &BehaviorConfig, page: &mut Page) -> Result<bool, JsValue> {
    let bars = query_all(document, SKILL_BAR_SELECTOR)?;
    if bars.is_empty() {
        return Ok(false);
    }

    let min_level = config.log_level;
    let observer = Observer::new(SKILL_BAR_VISIBILITY_THRESHOLD, move |entries, observer| {
        for entry in entries {
            let bar = entry.target();
            let action = skill_bar_action(
                entry.is_intersecting(),
                bar.class_list().contains(ANIMATED_CLASS),
                bar.get_attribute(WIDTH_ATTRIBUTE).as_deref(),
            );

            match action {
                SkillBarAction::Wait => {}
                SkillBarAction::Release => observer.unobserve(&bar),
                SkillBarAction::Animate { target_width } => {
                    if let Some(bar) = bar.dyn_ref::<HtmlElement>() {
                        let _ = bar.style().set_property(TARGET_WIDTH_PROPERTY, &target_width);
                    }
                    set_class(&bar, ANIMATED_CLASS, true);
                    observer.unobserve(&bar);
                    log_event(
                        min_level,
                        LogLevel::Debug,
                        "skill_bar.animated",
                        json!({ "target_width": target_width }),
                    );
                }
            }
        }
    })?;

    for bar in &bars {
        observer.observe(bar);
    }
    page.observers.push(observer);

    Ok(true)
}

fn mount_card_glow(document: &Document, page: &mut Page) -> Result<bool, JsValue> {
    let cards: Vec<HtmlElement> = query_all(document, PROJECT_CARD_SELECTOR)?
        .into_iter()
        .filter_map(|card| card.dyn_into::<HtmlElement>().ok())
        .collect();
    if cards.is_empty() {
        return Ok(false);
    }

    for card in cards {
        let entered = card.clone();
        page.listeners.push(EventListener::new(&card, "mouseenter", move |_| {
            let _ = entered.style().set_property("box-shadow", CARD_GLOW_SHADOW);
        }));

        let left = card.clone();
        page.listeners.push(EventListener::new(&card, "mouseleave", move |_| {
            let _ = left.style().remove_property("box-shadow");
        }));
    }

    Ok(true)
}

fn start_typing_effect(document: &Document) -> Result<bool, JsValue> {
    let items = query_all(document, TAGLINE_ITEM_SELECTOR)?;
    if items.is_empty() {
        return Ok(false);
    }

    for (index, item) in items.into_iter().enumerate() {
        let Ok(item) = item.dyn_into::<HtmlElement>() else {
            continue;
        };
        let text = item.text_content().unwrap_or_default();
        item.set_text_content(Some(""));
        item.style().set_property("opacity", "1")?;

        Timeout::new(line_start_delay_ms(index), move || type_line(item, text)).forget();
    }

    Ok(true)
}

fn type_line(item: HtmlElement, text: String) {
    let total_chars = text.chars().count();
    let typed_chars = Cell::new(0usize);
    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

    let finished = handle.clone();
    let interval = Interval::new(CHAR_INTERVAL_MS, move || {
        let typed = typed_chars.get();
        if typed < total_chars {
            typed_chars.set(typed + 1);
            item.set_text_content(Some(typed_prefix(&text, typed + 1)));
            return;
        }

        // Dropping the interval from inside its own tick would free the
        // running closure, so hand it to a zero-delay timeout instead.
        if let Some(interval) = finished.borrow_mut().take() {
            Timeout::new(0, move || drop(interval)).forget();
        }
    });

    *handle.borrow_mut() = Some(interval);
}

fn print_banner() {
    web_sys::console::log_3(
        &JsValue::from_str(BANNER),
        &JsValue::from_str(BANNER_TITLE_STYLE),
        &JsValue::from_str(BANNER_BODY_STYLE),
    );
}

fn mount_page() {
    let Some(win) = window() else {
        return;
    };
    let Some(document) = win.document() else {
        return;
    };

    let config = read_config(&document);
    let page = Rc::new(RefCell::new(Some(Page::mount(&document, &config))));
    log_event(config.log_level, LogLevel::Info, "page.mounted", json!({ "config": config }));

    let min_level = config.log_level;
    EventListener::new(&win, "pagehide", move |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(|event| event.persisted());
        if persisted {
            return;
        }

        if page.borrow_mut().take().is_some() {
            log_event(min_level, LogLevel::Info, "page.teardown", json!({}));
        }
    })
    .forget();
}

pub fn run() {
    print_banner();

    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| mount_page()).forget();
    } else {
        mount_page();
    }
}
