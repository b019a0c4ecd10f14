use crate::core::chrome::{anchor_target, scroll_top_for, FadeIn, NavbarStyle};
use crate::core::config::Config;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

const FADE_IN_SELECTOR: &str = ".content-box";

const NAV_LINKS: [(&str, &str); 4] = [
    ("#home", "Home"),
    ("#about", "The Booker Prize"),
    ("#characters", "Characters"),
    ("#quiz", "Quiz"),
];

pub fn toggle_fullscreen() {
    let doc = document();
    if doc.fullscreen_element().is_some() {
        doc.exit_fullscreen();
    } else if let Some(root) = doc.document_element() {
        if let Err(e) = root.request_fullscreen() {
            log::warn!("Error attempting to enable fullscreen: {:?}", e);
        }
    }
}

pub fn exit_fullscreen() {
    let doc = document();
    if doc.fullscreen_element().is_some() {
        doc.exit_fullscreen();
    }
}

fn smooth_scroll_to(href: &str, navbar_offset: f64) {
    let Some(id) = anchor_target(href) else {
        return;
    };
    let Some(target) = document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        log::warn!("no scroll target '{}'", id);
        return;
    };

    let options = web_sys::ScrollToOptions::new();
    options.set_top(scroll_top_for(target.offset_top() as f64, navbar_offset));
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&options);
}

#[component]
pub fn Navbar(config: Config) -> impl IntoView {
    let (scroll_y, set_scroll_y) = create_signal(0.0);
    let threshold = config.navbar_scroll_threshold;
    let offset = config.anchor_offset;

    let scroll = window_event_listener(ev::scroll, move |_| {
        set_scroll_y.set(window().scroll_y().unwrap_or(0.0));
    });
    on_cleanup(move || scroll.remove());

    let style = move || NavbarStyle::for_scroll(scroll_y.get(), threshold);

    view! {
        <nav
            class="navbar"
            style:background-color=move || style().background()
            style:box-shadow=move || style().box_shadow()
        >
            <div class="logo">"Life of Pi"</div>
            <ul class="nav-links">
                {NAV_LINKS
                    .iter()
                    .map(|&(href, label)| {
                        view! {
                            <li>
                                <a
                                    href=href
                                    on:click=move |ev: ev::MouseEvent| {
                                        ev.prevent_default();
                                        smooth_scroll_to(href, offset);
                                    }
                                >
                                    {label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

/// Adds `fade-in` to content blocks the first time they scroll into view.
pub fn observe_fade_ins(threshold: f64) {
    let fade = Rc::new(RefCell::new(FadeIn::new(threshold)));

    let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let key = target.id();
                let revealed = fade.borrow_mut().observe(
                    &key,
                    entry.is_intersecting(),
                    entry.intersection_ratio(),
                );
                if revealed {
                    if let Err(e) = target.class_list().add_1("fade-in") {
                        log::warn!("Failed to fade in '{}': {:?}", key, e);
                    }
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = web_sys::IntersectionObserverInit::new();
    init.set_threshold(&wasm_bindgen::JsValue::from_f64(threshold));
    let observer = match web_sys::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &init,
    ) {
        Ok(observer) => observer,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
            return;
        }
    };
    // the observer lives as long as the page
    callback.forget();

    let Ok(nodes) = document().query_selector_all(FADE_IN_SELECTOR) else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
            observer.observe(&el);
        }
    }
}
