mod characters;
mod chrome;
mod hero;
mod modal;
mod quiz;

use crate::core::chrome::KeyCommand;
use crate::core::config::Config;
use crate::core::content::{ContentRegistry, SectionEssay};
use crate::core::modal::ModalPresenter;
use crate::core::quiz::QuizSession;
use crate::core::timer::{TimerDirective, TimerHandle, TimerSlot};
use leptos::leptos_dom::helpers::{IntervalHandle, TimeoutHandle};
use leptos::*;

use characters::CharacterSlider;
use chrome::{observe_fade_ins, Navbar};
use hero::HeroSlider;
use modal::Modals;
use quiz::QuizPanel;

impl TimerHandle for IntervalHandle {
    fn cancel(self) {
        self.clear();
    }
}

impl TimerHandle for TimeoutHandle {
    fn cancel(self) {
        self.clear();
    }
}

pub(crate) type Timer = StoredValue<TimerSlot<IntervalHandle>>;

/// Applies `directive` to `timer`; a fresh interval feeds `tick` back into `machine`.
pub(crate) fn drive<T: 'static>(
    machine: RwSignal<T>,
    timer: Timer,
    tick: fn(&mut T) -> TimerDirective,
    directive: TimerDirective,
) {
    timer.update_value(|slot| {
        slot.apply(directive, |period| {
            set_interval_with_handle(
                move || {
                    let next = machine.try_update(tick).unwrap_or(TimerDirective::Unchanged);
                    drive(machine, timer, tick, next);
                },
                period,
            )
            .map_err(|e| log::error!("Failed to schedule timer: {:?}", e))
            .ok()
        })
    });
}

/// Runs one state-machine operation and applies the directive it returns.
pub(crate) fn dispatch<T: 'static>(
    machine: RwSignal<T>,
    timer: Timer,
    tick: fn(&mut T) -> TimerDirective,
    op: impl FnOnce(&mut T) -> TimerDirective,
) {
    let directive = machine.try_update(op).unwrap_or(TimerDirective::Unchanged);
    drive(machine, timer, tick, directive);
}

#[component]
pub fn App() -> impl IntoView {
    let config = Config::default();

    let loaded = ContentRegistry::builtin().and_then(|registry| {
        let quiz = QuizSession::new(registry.quiz.clone())?;
        Ok((registry, quiz))
    });

    match loaded {
        Ok((registry, quiz)) => view! { <Page config=config registry=registry quiz=quiz/> }.into_view(),
        Err(e) => {
            log::error!("Failed to load page content: {:#}", e);
            view! { <p class="load-error">"Error loading content: " {format!("{:#}", e)}</p> }
                .into_view()
        }
    }
}

#[component]
fn Page(config: Config, registry: ContentRegistry, quiz: QuizSession) -> impl IntoView {
    let modals = create_rw_signal(ModalPresenter::for_registry(&registry));
    let slides = registry.hero_slides.clone();
    let sections = registry.sections.clone();
    let registry = store_value(registry);

    create_effect(move |_| {
        let locked = modals.with(|m| m.scroll_locked());
        if let Some(body) = document().body() {
            let overflow = if locked { "hidden" } else { "auto" };
            if let Err(e) = body.style().set_property("overflow", overflow) {
                log::warn!("Failed to toggle scroll lock: {:?}", e);
            }
        }
    });

    let escape = window_event_listener(ev::keydown, move |ev| {
        if KeyCommand::from_key(&ev.key()) == Some(KeyCommand::Escape) {
            modals.update(|m| m.close_all());
        }
    });
    on_cleanup(move || escape.remove());

    let fade_threshold = config.fade_in_threshold;
    request_animation_frame(move || observe_fade_ins(fade_threshold));

    view! {
        <Navbar config=config.clone()/>
        <HeroSlider slides=slides config=config.clone() modals=modals/>
        <section id="about" class="about-section">
            {sections
                .into_iter()
                .map(|essay| view! { <SectionCard essay=essay registry=registry modals=modals/> })
                .collect_view()}
        </section>
        <section id="characters" class="characters-section">
            <h2 class="section-title">"Characters"</h2>
            <CharacterSlider registry=registry modals=modals period=config.character_period()/>
        </section>
        <section id="quiz" class="quiz-section">
            <h2 class="section-title">"Literary Quiz"</h2>
            <QuizPanel session=quiz/>
        </section>
        <Modals registry=registry modals=modals/>
    }
}

#[component]
fn SectionCard(
    essay: SectionEssay,
    registry: StoredValue<ContentRegistry>,
    modals: RwSignal<ModalPresenter>,
) -> impl IntoView {
    let key = essay.key.clone();
    let on_read_more = move |_| {
        registry.with_value(|r| {
            modals.update(|m| {
                m.open_section(&key, r);
            })
        });
    };

    view! {
        <div class="content-box" id=essay.key.clone()>
            <h3>{essay.title}</h3>
            <p class="subtitle">{essay.subtitle}</p>
            <button class="read-more-section" on:click=on_read_more>"Read More"</button>
        </div>
    }
}
