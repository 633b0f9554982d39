use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::QuestionBank;
use services::QuizLoopService;
use storage::{InMemorySource, QuestionSource, Sheet};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HomeView, QuizView};
use crate::vm::{QuizIntent, QuizScreen};

#[derive(Clone)]
struct TestApp {
    title: String,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn app_title(&self) -> String {
        self.title.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub bank: Arc<QuestionBank>,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self
            .quiz_handles
            .as_ref()
            .expect("quiz handles for quiz view")
            .dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn screen(&self) -> QuizScreen {
        let vm = self
            .quiz_handles
            .as_ref()
            .expect("quiz handles for quiz view")
            .vm();
        self.dom.in_runtime(|| vm.read().screen())
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Three questions over one sheet, correct answers A, B and C in bank order.
pub fn sample_bank() -> Arc<QuestionBank> {
    let sheet = Sheet::new(
        "Fundamentals",
        [
            "Question",
            "Option A",
            "Option B",
            "Option C",
            "Correct Answer",
            "Explanation",
        ],
    )
    .with_row([
        "Which component stores cluster state?",
        "etcd",
        "kubelet",
        "kube-proxy",
        "a",
        "etcd is the backing store.",
    ])
    .with_row([
        "What is the smallest deployable unit?",
        "Node",
        "Pod",
        "Namespace",
        "B",
        "",
    ])
    .with_row([
        "Which object exposes pods on a stable address?",
        "ConfigMap",
        "Secret",
        "Service",
        " C ",
        "Services route to matching pods.",
    ]);
    let bank = InMemorySource::new("harness")
        .with_sheet(sheet)
        .load_bank()
        .expect("sample bank");
    Arc::new(bank)
}

pub fn setup_view_harness(view: ViewKind, title: &str) -> ViewHarness {
    let bank = sample_bank();
    let quiz_loop = Arc::new(QuizLoopService::new(Arc::clone(&bank)).with_seed(Some(17)));
    let quiz_handles = match view {
        ViewKind::Quiz => Some(QuizTestHandles::default()),
        ViewKind::Home => None,
    };

    let app = Arc::new(TestApp {
        title: title.to_string(),
        quiz_loop,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        bank,
        quiz_handles,
    }
}
