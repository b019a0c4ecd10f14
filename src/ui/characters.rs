use super::{dispatch, drive, Timer};
use crate::core::content::ContentRegistry;
use crate::core::modal::ModalPresenter;
use crate::core::roster::{needs_horizontal_scroll, Category, CharacterCarousel, ALL_CATEGORY};
use crate::core::timer::{TimerDirective, TimerSlot};
use leptos::*;
use std::time::Duration;

fn send(
    roster: RwSignal<CharacterCarousel>,
    timer: Timer,
    op: impl FnOnce(&mut CharacterCarousel) -> TimerDirective,
) {
    dispatch(roster, timer, CharacterCarousel::tick, op);
}

fn thumbnail_id(index: usize) -> String {
    format!("character-thumb-{}", index)
}

/// Scrolls the thumbnail strip sideways until the active thumbnail is on screen.
fn reveal_thumbnail(strip: &web_sys::Element, index: usize) {
    let Some(thumb) = document().get_element_by_id(&thumbnail_id(index)) else {
        return;
    };
    let rect = thumb.get_bounding_client_rect();
    let viewport = window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    if !needs_horizontal_scroll(rect.left(), rect.right(), viewport) {
        return;
    }

    let delta = if rect.left() < 0.0 {
        rect.left()
    } else {
        rect.right() - viewport
    };
    let options = web_sys::ScrollToOptions::new();
    options.set_left(delta);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    strip.scroll_by_with_scroll_to_options(&options);
}

#[component]
pub fn CharacterSlider(
    registry: StoredValue<ContentRegistry>,
    modals: RwSignal<ModalPresenter>,
    period: Duration,
) -> impl IntoView {
    let characters = registry.with_value(|r| r.characters.clone());
    let mut categories = vec![ALL_CATEGORY.to_string()];
    categories.extend(registry.with_value(|r| r.categories()));

    let roster = create_rw_signal(CharacterCarousel::new(
        characters.iter().map(|c| c.category.clone()).collect(),
        period,
    ));
    let timer: Timer = store_value(TimerSlot::new());
    let strip = create_node_ref::<html::Div>();

    drive(roster, timer, CharacterCarousel::tick, roster.with_untracked(|r| r.start()));
    on_cleanup(move || timer.update_value(|t| t.clear()));

    create_effect(move |_| {
        let current = roster.with(|r| r.current());
        request_animation_frame(move || {
            if let Some(strip) = strip.get_untracked() {
                reveal_thumbnail(&strip, current);
            }
        });
    });

    let thumbnails = characters.clone();

    view! {
        <div class="category-filter">
            {categories
                .into_iter()
                .map(|tag| {
                    let label = tag.clone();
                    let selected = tag.clone();
                    view! {
                        <button
                            class="category-btn"
                            class:active=move || roster.with(|r| r.filter().as_str() == selected)
                            on:click=move |_| send(roster, timer, |r| r.set_filter(Category::parse(&tag)))
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
        <div
            class="character-slider"
            on:mouseenter=move |_| send(roster, timer, CharacterCarousel::pointer_enter)
            on:mouseleave=move |_| send(roster, timer, CharacterCarousel::pointer_leave)
        >
            <div class="list">
                {characters
                    .into_iter()
                    .enumerate()
                    .map(|(i, character)| {
                        let key = character.key.clone();
                        view! {
                            <div
                                class="item"
                                class:active=move || roster.with(|r| r.is_active(i))
                                style:display=move || if roster.with(|r| r.is_visible(i)) { "block" } else { "none" }
                            >
                                <div class="content">
                                    <div class="category-tag">{character.category}</div>
                                    <h2>{character.name}</h2>
                                    <h3>{character.role}</h3>
                                    <p>{character.description}</p>
                                    <button
                                        class="character-read-more"
                                        on:click=move |_| {
                                            registry.with_value(|r| {
                                                modals.update(|m| {
                                                    m.open_character(&key, r);
                                                })
                                            })
                                        }
                                    >
                                        "Read More"
                                    </button>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="arrows">
                <button id="characterPrev" on:click=move |_| send(roster, timer, CharacterCarousel::prev)>"<"</button>
                <button id="characterNext" on:click=move |_| send(roster, timer, CharacterCarousel::next)>">"</button>
            </div>
        </div>
        <div class="character-thumbnail" node_ref=strip>
            {thumbnails
                .into_iter()
                .enumerate()
                .map(|(i, character)| {
                    view! {
                        <div
                            id=thumbnail_id(i)
                            class="item"
                            class:active=move || roster.with(|r| r.is_active(i))
                            on:click=move |_| send(roster, timer, |r| r.select_thumbnail(i))
                        >
                            <div class="content">
                                <div class="title">{character.name}</div>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
