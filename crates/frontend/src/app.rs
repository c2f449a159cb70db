use crate::layout::Shell;
use crate::shared::notifications::{provide_notifications, NotificationHost};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn App() -> impl IntoView {
    provide_notifications();

    view! {
        <NotificationHost/>
        <Shell/>
    }
}
