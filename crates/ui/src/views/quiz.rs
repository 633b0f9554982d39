use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{QuizIntent, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let vm = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || QuizVm::start(&quiz_loop)
    });
    let error = use_signal(|| None::<ViewError>);

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut error = error;
        let result = vm.write().dispatch(&quiz_loop, intent);
        error.set(result.err());
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let screen = vm.read().screen();
    let locked = screen.can_advance;
    let feedback_class = match &screen.feedback {
        Some(feedback) if feedback.correct => "notice notice--success",
        _ => "notice notice--error",
    };

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h3 { class: "quiz-heading", "{screen.heading}" }
                p { class: "quiz-question", strong { "{screen.question}" } }
            }

            if let Some(notice) = screen.completion_notice {
                div { class: "notice notice--success", "{notice}" }
            }

            fieldset { class: "quiz-options",
                legend { "Select your answer:" }
                for option in screen.options.iter().cloned() {
                    label { class: "quiz-option",
                        input {
                            r#type: "radio",
                            name: "quiz-option",
                            value: "{option.letter}",
                            checked: option.selected,
                            disabled: locked,
                            onchange: move |_| dispatch_intent.call(QuizIntent::Select(option.letter)),
                        }
                        span { "{option.label}" }
                    }
                }
            }

            div { class: "quiz-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !screen.can_submit,
                    onclick: move |_| dispatch_intent.call(QuizIntent::Submit),
                    "Submit"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !screen.can_advance,
                    onclick: move |_| dispatch_intent.call(QuizIntent::Next),
                    "Next Question"
                }
            }

            if let Some(feedback) = screen.feedback.clone() {
                div { class: feedback_class,
                    "{feedback.headline}"
                }
                if let Some(explanation) = feedback.explanation {
                    div { class: "notice notice--info", "{explanation}" }
                }
                if feedback.replayed {
                    p { class: "quiz-note", "Already answered in this session. Score unchanged." }
                }
            }

            if let Some(err) = error() {
                p { class: "quiz-error", "{err.message()}" }
            }

            section { class: "quiz-progress",
                h4 { "{screen.score_label}" }
                h4 { "{screen.lifetime_label}" }
                progress {
                    value: "{screen.lifetime_answered}",
                    max: "{screen.bank_size}",
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| dispatch_intent.call(QuizIntent::Restart),
                    "New Session"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<QuizVm>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<QuizVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<QuizVm> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
