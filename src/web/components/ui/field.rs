//! Labelled form controls, each followed by its field error when there is one.

use leptos::prelude::*;

#[component]
fn FieldError(error: Option<&'static str>) -> impl IntoView {
    error.map(|message| view! { <p class="error">{message}</p> })
}

#[component]
pub fn TextInput(
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] kind: &'static str,
    #[prop(into)] value: String,
    error: Option<&'static str>,
) -> impl IntoView {
    let invalid = error.map(|_| "true");

    view! {
        <label for=name>
            {label}
            <input id=name name=name type=kind value=value aria-invalid=invalid />
        </label>
        <FieldError error=error />
    }
}

#[component]
pub fn TextArea(
    label: &'static str,
    name: &'static str,
    #[prop(into)] value: String,
    error: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label for=name>
            {label}
            <textarea id=name name=name rows="4">{value}</textarea>
        </label>
        <FieldError error=error />
    }
}

/// `<select>` with an empty placeholder option ahead of `options`.
#[component]
pub fn Select(
    label: &'static str,
    name: &'static str,
    options: &'static [&'static str],
    #[prop(into)] selected: String,
    error: Option<&'static str>,
) -> impl IntoView {
    let options = options
        .iter()
        .map(|option| {
            let chosen = (*option == selected).then_some("");
            view! { <option value=*option selected=chosen>{*option}</option> }
        })
        .collect_view();

    view! {
        <label for=name>
            {label}
            <select id=name name=name>
                <option value="">"Select a role"</option>
                {options}
            </select>
        </label>
        <FieldError error=error />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::components::render;
    use axum::response::Html;

    #[test]
    fn inputs_escape_values_and_show_errors() {
        let Html(html) = render(|| {
            view! {
                <TextInput
                    label="Email address"
                    name="email"
                    kind="email"
                    value="\"><script>"
                    error=Some("Bad")
                />
            }
        });
        assert!(!html.contains("\"><script>"));
        assert!(html.contains("aria-invalid=\"true\""));
        assert!(html.contains("<p class=\"error\">Bad</p>"));

        let Html(html) = render(|| {
            view! { <TextInput label="Email address" name="email" value="" error=None /> }
        });
        assert!(html.contains("type=\"text\""));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("aria-invalid"));
    }

    #[test]
    fn select_marks_the_chosen_option() {
        let Html(html) = render(|| {
            view! { <Select label="Role" name="role" options=&["A", "B"] selected="B" error=None /> }
        });
        assert!(html.contains("<option value=\"B\" selected=\"\">B</option>"));
        assert!(html.contains("<option value=\"A\">A</option>"));
    }
}
