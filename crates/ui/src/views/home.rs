use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "page",
            h2 { "{ctx.app_title()}" }
            p { "Questions in bank: {ctx.bank_size()}" }
            p { "Questions are shown in a random order. Each one counts once per session." }
            Link { class: "btn btn-primary", to: Route::Quiz {}, "Start Quiz" }
        }
    }
}
