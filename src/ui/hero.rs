use super::chrome::{exit_fullscreen, toggle_fullscreen};
use super::{dispatch, drive, Timer};
use crate::core::chrome::KeyCommand;
use crate::core::config::Config;
use crate::core::content::HeroSlide;
use crate::core::hero::{Direction, GestureTracker, HeroCarousel};
use crate::core::modal::ModalPresenter;
use crate::core::timer::{TimerDirective, TimerSlot};
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;
use std::time::Duration;

const PROGRESS_KICKOFF: Duration = Duration::from_millis(50);

/// Wheel listener bound on the slider itself and non-passive, so it can hold the page still.
fn wheel_event() -> ev::Custom<ev::WheelEvent> {
    let mut event = ev::Custom::new("wheel");
    event.options_mut().set_passive(false);
    event
}

fn send(hero: RwSignal<HeroCarousel>, timer: Timer, op: impl FnOnce(&mut HeroCarousel) -> TimerDirective) {
    dispatch(hero, timer, HeroCarousel::tick, op);
}

#[component]
pub fn HeroSlider(slides: Vec<HeroSlide>, config: Config, modals: RwSignal<ModalPresenter>) -> impl IntoView {
    let hero = create_rw_signal(HeroCarousel::new(
        slides.len(),
        config.hero_period(),
        config.gesture_threshold,
    ));
    let timer: Timer = store_value(TimerSlot::new());
    let drag = create_rw_signal(GestureTracker::default());
    let swipe = store_value(GestureTracker::default());
    let (progress_filling, set_progress_filling) = create_signal(false);
    let kickoff: StoredValue<TimerSlot<TimeoutHandle>> = store_value(TimerSlot::new());
    let container = create_node_ref::<html::Section>();

    drive(hero, timer, HeroCarousel::tick, hero.with_untracked(|h| h.start()));

    // restart the progress fill on every slide change
    create_effect(move |_| {
        let directive = hero.with(|h| h.progress_kickoff(PROGRESS_KICKOFF));
        set_progress_filling.set(false);
        kickoff.update_value(|slot| {
            slot.apply(directive, |delay| {
                set_timeout_with_handle(move || set_progress_filling.set(true), delay)
                    .map_err(|e| log::error!("Failed to schedule progress fill: {:?}", e))
                    .ok()
            })
        });
    });

    let keys = window_event_listener(ev::keydown, move |ev| match KeyCommand::from_key(&ev.key()) {
        Some(KeyCommand::Prev) => send(hero, timer, |h| h.advance(Direction::Backward)),
        Some(KeyCommand::Next) => send(hero, timer, |h| h.advance(Direction::Forward)),
        Some(KeyCommand::TogglePlay) => {
            ev.prevent_default();
            send(hero, timer, HeroCarousel::toggle_play);
        }
        Some(KeyCommand::Escape) => exit_fullscreen(),
        None => {}
    });
    let drag_move = window_event_listener(ev::mousemove, move |ev| {
        if drag.with_untracked(|d| d.is_dragging()) {
            drag.update(|d| d.move_to(ev.client_x() as f64));
        }
    });
    let drag_end = window_event_listener(ev::mouseup, move |_| {
        if let Some(delta) = drag.try_update(|d| d.release()).flatten() {
            send(hero, timer, |h| h.on_gesture(delta));
        }
    });
    on_cleanup(move || {
        keys.remove();
        drag_move.remove();
        drag_end.remove();
        timer.update_value(|t| t.clear());
        kickoff.update_value(|t| t.clear());
    });

    container.on_load(move |el| {
        let _ = el.on(wheel_event(), move |ev: ev::WheelEvent| {
            ev.prevent_default();
            send(hero, timer, |h| h.on_gesture(ev.delta_y()));
        });
    });

    let period_ms = config.hero_rotation_ms;
    let total = slides.len();

    view! {
        <section
            id="home"
            class="hero-slider-container"
            node_ref=container
            style:cursor=move || drag.with(|d| d.cursor())
            on:touchstart=move |ev: ev::TouchEvent| {
                if let Some(touch) = ev.changed_touches().get(0) {
                    swipe.update_value(|s| s.press(touch.screen_x() as f64));
                }
            }
            on:touchend=move |ev: ev::TouchEvent| {
                let Some(touch) = ev.changed_touches().get(0) else { return };
                if let Some(delta) = swipe.try_update_value(|s| s.release_at(touch.screen_x() as f64)).flatten() {
                    send(hero, timer, |h| h.on_gesture(delta));
                }
            }
            on:mousedown=move |ev: ev::MouseEvent| drag.update(|d| d.press(ev.client_x() as f64))
        >
            <div class="slider">
                {slides
                    .into_iter()
                    .enumerate()
                    .map(|(i, slide)| {
                        let modal_id = slide.modal.clone();
                        view! {
                            <div class=move || format!("slide {}", hero.with(|h| h.zone_of(i).css_class()))>
                                <div class="slide-content">
                                    <h2>{slide.title}</h2>
                                    <h3>{slide.subtitle}</h3>
                                    <p>{slide.summary}</p>
                                    <button
                                        class="read-more-btn"
                                        on:click=move |_| {
                                            modals.update(|m| {
                                                m.open(&modal_id);
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
            <div class="slider-controls">
                <button id="prevSlide" class="nav-btn" on:click=move |_| send(hero, timer, |h| h.advance(Direction::Backward))>
                    <i class="fas fa-chevron-left"></i>
                </button>
                <button id="playPause" class="nav-btn" on:click=move |_| send(hero, timer, HeroCarousel::toggle_play)>
                    <i
                        id="playIcon"
                        class=move || if hero.with(|h| h.is_playing()) { "fas fa-pause" } else { "fas fa-play" }
                    ></i>
                </button>
                <button id="nextSlide" class="nav-btn" on:click=move |_| send(hero, timer, |h| h.advance(Direction::Forward))>
                    <i class="fas fa-chevron-right"></i>
                </button>
                <button id="fullscreen" class="nav-btn" on:click=move |_| toggle_fullscreen()>
                    <i class="fas fa-expand"></i>
                </button>
            </div>
            <div class="slider-dots">
                {(0..total)
                    .map(|i| {
                        view! {
                            <span
                                class="dot"
                                class:active=move || hero.with(|h| h.is_dot_active(i))
                                on:click=move |_| send(hero, timer, |h| h.goto(i))
                            ></span>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="slide-counter">
                <span id="currentSlide">{move || hero.with(|h| h.counter_label())}</span>
                " / "
                <span>{format!("{:02}", total)}</span>
            </div>
            <div class="progress-track">
                <div
                    id="progressBar"
                    class="progress-bar"
                    class:animating=move || progress_filling.get()
                    style:width=move || if progress_filling.get() { "100%" } else { "0%" }
                    style:transition=move || {
                        if progress_filling.get() {
                            format!("width {}ms linear", period_ms)
                        } else {
                            "none".to_string()
                        }
                    }
                ></div>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::ev::EventDescriptor;

    #[test]
    fn test_wheel_listener_is_element_bound_and_cancelable() {
        let event = wheel_event();
        assert_eq!(event.name(), "wheel");
        assert!(!<ev::Custom<ev::WheelEvent> as EventDescriptor>::BUBBLES);
        let options = event.options().as_ref().expect("wheel listener options");
        assert_eq!(options.get_passive(), Some(false));
    }
}
