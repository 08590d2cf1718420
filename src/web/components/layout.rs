//! Page frames. Views are rendered to HTML once per request; there is no
//! client-side hydration.

use axum::response::Html;
use leptos::prelude::*;

pub const BRAND: &str = "TeamFlow";

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#f8fafc;color:#0f172a}\
header,footer{background:#fff;border-bottom:1px solid #e2e8f0;padding:1rem 1.5rem;display:flex;justify-content:space-between}\
footer{border-top:1px solid #e2e8f0;justify-content:center;font-size:.75rem;color:#64748b}\
main{max-width:72rem;margin:0 auto;padding:3rem 1.5rem;display:grid;gap:2.5rem;grid-template-columns:1fr .8fr}\
section{background:#fff;border-radius:1rem;padding:2rem}\
aside{background:#4f46e5;color:#eef2ff;border-radius:1rem;padding:2.5rem}\
label{display:block;margin-bottom:1rem;font-size:.875rem}\
input,select,textarea{display:block;width:100%;margin-top:.25rem;padding:.5rem}\
.error{color:#b91c1c;font-size:.75rem}\
[role=alert]{border:1px solid #fecaca;background:#fef2f2;color:#b91c1c;padding:.75rem 1rem}\
[role=status]{border:1px solid #a7f3d0;background:#ecfdf5;color:#047857;padding:.75rem 1rem}\
table{width:100%;border-collapse:collapse}td,th{padding:.75rem 1.5rem;text-align:left}";

const ASIDE_TITLE: &str = "Your next chapter starts here";
const ASIDE_DESCRIPTION: &str =
    "Join a multidisciplinary team that values collaboration, growth, and meaningful work.";

/// Renders a view into a complete HTML document.
pub fn render<F, V>(page: F) -> Html<String>
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    let html = owner.with(|| page().to_html());
    Html(format!("<!DOCTYPE html>{html}"))
}

#[component]
pub fn Document(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let title = format!("{title} | {BRAND}");

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{title}</title>
                <style>{STYLE}</style>
            </head>
            <body>{children()}</body>
        </html>
    }
}

/// Shown while the session is still being restored. No navigation chrome.
#[component]
pub fn LoadingScreen(message: &'static str) -> impl IntoView {
    view! {
        <Document title=message>
            <main>
                <p role="status">{message}</p>
            </main>
        </Document>
    }
}

/// Frame used by the login, forgot-password and registration pages.
#[component]
pub fn AuthLayout(
    title: &'static str,
    description: &'static str,
    #[prop(default = "Sign up")] action_label: &'static str,
    #[prop(default = "/register")] action_href: &'static str,
    #[prop(default = ASIDE_TITLE)] aside_title: &'static str,
    #[prop(default = ASIDE_DESCRIPTION)] aside_description: &'static str,
    children: Children,
) -> impl IntoView {
    let why = format!("Why {BRAND}");
    let footer = format!("{BRAND}. All rights reserved.");

    view! {
        <Document title=title>
            <header>
                <a href="/">{BRAND}</a>
                <a href=action_href>{action_label}</a>
            </header>
            <main>
                <section>
                    <h1>{title}</h1>
                    <p>{description}</p>
                    {children()}
                </section>
                <aside>
                    <p>{why}</p>
                    <h2>{aside_title}</h2>
                    <p>{aside_description}</p>
                    <blockquote>
                        "From day one, you are empowered to contribute, learn, and grow with peers who cheer you on."
                    </blockquote>
                </aside>
            </main>
            <footer>{footer}</footer>
        </Document>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_layout_defaults_to_the_sign_up_action() {
        let Html(html) = render(|| {
            view! {
                <AuthLayout title="Welcome back" description="Sign in">
                    <form method="post"></form>
                </AuthLayout>
            }
        });
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Welcome back | TeamFlow</title>"));
        assert!(html.contains("href=\"/register\""));
        assert!(html.contains("<h1>Welcome back</h1>"));
        assert!(html.contains("<form method=\"post\">"));
    }

    #[test]
    fn loading_screen_has_no_navigation() {
        let Html(html) = render(|| view! { <LoadingScreen message="Loading session..." /> });
        assert!(html.contains("Loading session..."));
        assert!(!html.contains("<header>"));
        assert!(!html.contains("href="));
    }
}
