use super::ensure_ready;
use crate::{
    session::SessionContext,
    web::components::{Button, Document, render},
};
use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect, Response},
};
use leptos::prelude::*;
use std::sync::Arc;
use tracing::error;

/// Row of the static team directory shown to signed-in users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamMember {
    pub id: &'static str,
    pub name: &'static str,
    pub department: &'static str,
    pub role: &'static str,
}

pub const TEAM_MEMBERS: [TeamMember; 5] = [
    TeamMember {
        id: "EMP-001",
        name: "Jane Cooper",
        department: "Product",
        role: "Product Manager",
    },
    TeamMember {
        id: "EMP-002",
        name: "Devon Lane",
        department: "Engineering",
        role: "Frontend Developer",
    },
    TeamMember {
        id: "EMP-003",
        name: "Leslie Alexander",
        department: "Design",
        role: "UI/UX Designer",
    },
    TeamMember {
        id: "EMP-004",
        name: "Courtney Henry",
        department: "Operations",
        role: "Scrum Master",
    },
    TeamMember {
        id: "EMP-005",
        name: "Bessie Cooper",
        department: "Engineering",
        role: "Backend Developer",
    },
];

#[component]
fn DashboardPage(#[prop(into)] username: String) -> impl IntoView {
    let greeting = if username.is_empty() {
        "Welcome, team member!".to_string()
    } else {
        format!("Welcome, {username}!")
    };

    let rows = TEAM_MEMBERS
        .iter()
        .map(|member| {
            view! {
                <tr>
                    <td><code>{member.id}</code></td>
                    <td>{member.name}</td>
                    <td>{member.department}</td>
                    <td>{member.role}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <Document title="Dashboard">
            <header>
                <div>
                    <h1>"Dashboard"</h1>
                    <p>{greeting}</p>
                </div>
                <form method="post" action="/logout">
                    <Button>"Log out"</Button>
                </form>
            </header>
            <main>
                <section>
                    <h2>"Team directory"</h2>
                    <p>"A snapshot of the teammates you will collaborate with."</p>
                    <table>
                        <thead>
                            <tr>
                                <th scope="col">"ID"</th>
                                <th scope="col">"Name"</th>
                                <th scope="col">"Department"</th>
                                <th scope="col">"Role"</th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                </section>
            </main>
        </Document>
    }
}

/// Guarded: only reachable with a current user.
pub async fn show(session: Extension<Arc<SessionContext>>) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    match session.current_user().await {
        Some(user) => render(|| view! { <DashboardPage username=user.username /> }).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

pub async fn logout(session: Extension<Arc<SessionContext>>) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    if let Err(err) = session.logout().await {
        error!("Failed to clear the stored session: {err}");
    }
    Redirect::to("/login").into_response()
}
