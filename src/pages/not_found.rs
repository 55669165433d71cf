use leptos::prelude::*;

/// 404 page.
#[component]
pub fn NotFound() -> impl IntoView {
	view! { <h1>"Nothing to see here"</h1> }
}
