//! Add-friend form — URL input, submit button, one feedback line.

use dioxus::prelude::*;

use friendlink_core::form::{FriendForm, Outcome};

use crate::api::BrowserClient;

pub fn AddFriend() -> Element {
    let mut form = use_signal(FriendForm::new);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let submission = form.write().submit();
        if let Some(submission) = submission {
            spawn(async move {
                let completion = submission.send(&BrowserClient).await;
                form.write().complete(completion);
            });
        }
    };

    let (input, enabled, label, feedback) = {
        let f = form.read();
        let feedback = match f.outcome() {
            Outcome::Idle => None,
            Outcome::Success(msg) => Some(("feedback success", msg.clone())),
            Outcome::Failure(msg) => Some(("feedback error", msg.clone())),
        };
        (
            f.input().to_string(),
            f.controls_enabled(),
            f.submit_label(),
            feedback,
        )
    };

    rsx! {
        div { class: "add-friend",
            h1 { "Add a Spotify Friend" }
            form { onsubmit,
                input {
                    r#type: "text",
                    placeholder: "Paste Spotify profile URL",
                    value: "{input}",
                    disabled: !enabled,
                    oninput: move |e| form.write().set_input(e.value()),
                }
                button {
                    r#type: "submit",
                    disabled: !enabled,
                    "{label}"
                }
            }
            if let Some((class, msg)) = feedback {
                p { class: "{class}", "{msg}" }
            }
        }
    }
}
