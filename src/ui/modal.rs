use crate::core::content::{CharacterProfile, ContentRegistry, HeroSlide, SectionEssay};
use crate::core::modal::{ModalContent, ModalPresenter, CHARACTER_MODAL, SECTION_MODAL};
use leptos::*;

#[component]
fn ModalFrame(id: String, modals: RwSignal<ModalPresenter>, children: Children) -> impl IntoView {
    let shown = id.clone();
    view! {
        <div
            id=id
            class="modal"
            style:display=move || if modals.with(|m| m.is_open(&shown)) { "flex" } else { "none" }
            on:click=move |_| modals.update(|m| m.close_all())
        >
            <div class="modal-content" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <span class="close-modal" on:click=move |_| modals.update(|m| m.close_all())>
                    "×"
                </span>
                {children()}
            </div>
        </div>
    }
}

fn character_body(profile: CharacterProfile) -> View {
    view! {
        <h2>{profile.name}</h2>
        <h3>{profile.role}</h3>
        <div class="modal-body">
            <div class="character-detail">
                <h4>"Character Overview"</h4>
                <p>{profile.description}</p>
                <h4>"Key Characteristics"</h4>
                <ul>
                    {profile
                        .characteristics
                        .into_iter()
                        .map(|c| view! { <li>{c}</li> })
                        .collect_view()}
                </ul>
                <h4>"Symbolic Significance"</h4>
                <p>{profile.symbolism}</p>
                <h4>"Literary Analysis"</h4>
                <p>{profile.analysis}</p>
            </div>
        </div>
    }
    .into_view()
}

fn section_body(essay: SectionEssay) -> View {
    view! {
        <h2>{essay.title}</h2>
        <div class="modal-body">
            <h3>{essay.subtitle}</h3>
            <div class="section-detail">
                <div inner_html=essay.content></div>
                {essay.additional_info.map(|info| view! {
                    <h4>"Additional Information"</h4>
                    <p>{info}</p>
                })}
                {essay.impact.map(|impact| view! {
                    <h4>"Impact on Literature"</h4>
                    <p>{impact}</p>
                })}
            </div>
        </div>
    }
    .into_view()
}

fn article_body(slide: HeroSlide) -> View {
    view! {
        <h2>{slide.title}</h2>
        <div class="modal-body">
            <h3>{slide.subtitle}</h3>
            {slide.details.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
        </div>
    }
    .into_view()
}

#[component]
pub fn Modals(registry: StoredValue<ContentRegistry>, modals: RwSignal<ModalPresenter>) -> impl IntoView {
    let articles = registry.with_value(|r| r.hero_slides.clone());

    let character = move || match modals.with(|m| m.content().cloned()) {
        Some(ModalContent::Character(profile)) => character_body(profile),
        _ => ().into_view(),
    };
    let section = move || match modals.with(|m| m.content().cloned()) {
        Some(ModalContent::Section(essay)) => section_body(essay),
        _ => ().into_view(),
    };

    view! {
        {articles
            .into_iter()
            .map(|slide| {
                let id = slide.modal.clone();
                view! {
                    <ModalFrame id=id modals=modals>
                        {article_body(slide)}
                    </ModalFrame>
                }
            })
            .collect_view()}
        <ModalFrame id=CHARACTER_MODAL.to_string() modals=modals>
            <div id="characterModalContent">{character}</div>
        </ModalFrame>
        <ModalFrame id=SECTION_MODAL.to_string() modals=modals>
            <div id="sectionModalContent">{section}</div>
        </ModalFrame>
    }
}
