//! friendlink WASM frontend — Dioxus app root.

mod api;
mod components;

use dioxus::prelude::*;

fn main() {
    dioxus::launch(App);
}

fn App() -> Element {
    rsx! {
        div { id: "main",
            components::add_friend::AddFriend {}
        }
    }
}
