use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { class: "app-title", "{ctx.app_title()}" }
                nav { class: "app-nav",
                    Link { to: Route::Home {}, "Home" }
                    Link { to: Route::Quiz {}, "Quiz" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
