use leptos::prelude::*;

/// Submit button. `action` names the wizard action it posts.
#[component]
pub fn Button(
    #[prop(optional)] action: Option<&'static str>,
    #[prop(optional)] skip_validation: bool,
    children: Children,
) -> impl IntoView {
    let name = action.map(|_| "action");
    let novalidate = skip_validation.then_some("");

    view! {
        <button type="submit" name=name value=action formnovalidate=novalidate>
            {children()}
        </button>
    }
}
