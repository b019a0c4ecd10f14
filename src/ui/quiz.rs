use crate::core::quiz::{QuizPhase, QuizSession};
use leptos::*;

#[component]
pub fn QuizPanel(session: QuizSession) -> impl IntoView {
    let quiz = create_rw_signal(session);
    let finished = move || quiz.with(|q| q.is_finished());

    let question_view = move || {
        quiz.with(|q| {
            let options = q
                .current_question()
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    view! {
                        <div
                            class="option-btn"
                            class:selected=move || quiz.with(|q| q.is_selected(i))
                            on:click=move |_| quiz.update(|q| q.select_answer(i))
                        >
                            {option.clone()}
                        </div>
                    }
                })
                .collect_view();

            view! {
                <div class="question-container">
                    <div class="question-text">{q.question_heading()}</div>
                    <div class="options-grid">{options}</div>
                </div>
            }
        })
    };

    let result_view = move || match quiz.with(|q| q.phase()) {
        QuizPhase::Finished(result) => view! {
            <div id="scoreDisplay" class="score">{result.score_label()}</div>
            <p id="scoreMessage">{result.tier().message()}</p>
        }
        .into_view(),
        QuizPhase::Answering => ().into_view(),
    };

    view! {
        <div class="quiz-container">
            <div class="quiz-progress">
                <div
                    id="progressBarQuiz"
                    class="progress-bar"
                    style:width=move || format!("{}%", quiz.with(|q| q.progress_percent()))
                ></div>
            </div>
            <div id="questionContainer" style:display=move || if finished() { "none" } else { "block" }>
                {question_view}
            </div>
            <div class="quiz-controls" style:display=move || if finished() { "none" } else { "flex" }>
                <button
                    id="prevBtn"
                    style:display=move || if quiz.with(|q| q.shows_prev()) { "block" } else { "none" }
                    on:click=move |_| quiz.update(|q| q.prev_question())
                >
                    "Previous"
                </button>
                <button id="nextBtn" on:click=move |_| quiz.update(|q| q.next_question())>
                    {move || quiz.with(|q| q.next_label())}
                </button>
            </div>
            <div id="resultContainer" style:display=move || if finished() { "block" } else { "none" }>
                {result_view}
                <button class="restart-btn" on:click=move |_| quiz.update(|q| q.restart())>
                    "Try Again"
                </button>
            </div>
        </div>
    }
}
