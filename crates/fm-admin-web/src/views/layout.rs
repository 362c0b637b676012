//! Page skeleton, sidebar and shared widgets

use crate::guard::Route;
use crate::notify::Notification;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = r"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,sans-serif;background:#f8fafc;color:#0f172a}
a{color:inherit}
.app{display:flex;min-height:100vh}
.sidebar{width:240px;background:#0f172a;color:#e2e8f0;display:flex;flex-direction:column;padding:1.5rem 1rem}
.sidebar h1{font-size:1.1rem;margin:0 0 2rem}
.sidebar nav a{display:flex;justify-content:space-between;padding:.6rem .8rem;border-radius:.5rem;text-decoration:none}
.sidebar nav a.active,.sidebar nav a:hover{background:#1e293b}
.sidebar form{margin-top:auto}
.badge{background:#ef4444;color:#fff;border-radius:999px;padding:0 .5rem;font-size:.75rem}
.badge[hidden]{display:none}
main{flex:1;padding:2rem}
.toasts{position:fixed;top:1rem;right:1rem;display:flex;flex-direction:column;gap:.5rem}
.toast{padding:.75rem 1rem;border-radius:.5rem;background:#fff;box-shadow:0 2px 8px #0002;min-width:260px}
.toast-success{border-left:4px solid #22c55e}
.toast-error{border-left:4px solid #ef4444}
.toast p{margin:.25rem 0 0;color:#475569;font-size:.9rem}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:1rem}
.card{background:#fff;border-radius:.75rem;padding:1rem;box-shadow:0 1px 3px #0001}
.card img{width:100%;height:160px;object-fit:cover;border-radius:.5rem}
.muted{color:#64748b}
button,.button{cursor:pointer;border:0;border-radius:.5rem;padding:.5rem 1rem;background:#0f172a;color:#fff}
button.danger{background:#dc2626}
button.secondary{background:#e2e8f0;color:#0f172a}
.modal{position:fixed;inset:0;background:#0006;display:flex;align-items:center;justify-content:center}
.modal .card{max-width:420px}
.progress{height:.5rem;background:#e2e8f0;border-radius:999px;overflow:hidden}
.progress span{display:block;height:100%;background:#0f172a}
label{display:block;margin:.75rem 0 .25rem}
input[type=text],input[type=password],input[type=email]{width:100%;padding:.5rem;border:1px solid #cbd5e1;border-radius:.5rem}
";

const UNSEEN_SCRIPT: &str = r#"
(function(){
  var badge=document.getElementById("unseen-badge");
  if(!badge||!window.WebSocket){return;}
  var scheme=location.protocol==="https:"?"wss://":"ws://";
  var socket=new WebSocket(scheme+location.host+"/ws/unseen");
  socket.onmessage=function(event){
    var update=JSON.parse(event.data);
    if(update.type!=="unseen"){return;}
    badge.textContent=update.count;
    badge.hidden=update.count===0;
  };
  window.addEventListener("pagehide",function(){socket.close();});
})();
"#;

const LOAD_SCRIPT: &str = r#"
(function(){
  document.querySelectorAll("[data-load]").forEach(function(slot){
    fetch(slot.getAttribute("data-load"),{credentials:"same-origin"})
      .then(function(response){
        if(response.redirected){location.href=response.url;return null;}
        return response.text();
      })
      .then(function(markup){if(markup!==null){slot.outerHTML=markup;}});
  });
})();
"#;

/// Bare HTML document
pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Admin Panel" }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
}

/// Protected page with the sidebar
pub fn shell(
    active: Route,
    unseen: Option<usize>,
    notifications: &[Notification],
    content: Markup,
) -> Markup {
    page(
        active.title(),
        html! {
            div class="app" {
                (sidebar(active, unseen))
                main { (content) }
            }
            (toasts(notifications))
            script { (PreEscaped(LOAD_SCRIPT)) }
            script { (PreEscaped(UNSEEN_SCRIPT)) }
        },
    )
}

fn sidebar(active: Route, unseen: Option<usize>) -> Markup {
    let count = unseen.unwrap_or_default();
    html! {
        aside class="sidebar" {
            h1 { "Admin Panel" }
            nav {
                @for route in Route::PROTECTED {
                    a href=(route.path()) class=[(route == active).then_some("active")] {
                        span { (route.title()) }
                        @if route == Route::Bookings {
                            span id="unseen-badge" class="badge" hidden[count == 0] { (count) }
                        }
                    }
                }
            }
            form method="post" action="/logout" {
                button type="submit" class="secondary" { "Sign out" }
            }
        }
    }
}

/// Toast stack
pub fn toasts(notifications: &[Notification]) -> Markup {
    html! {
        @if !notifications.is_empty() {
            div class="toasts" role="status" {
                @for notification in notifications {
                    div class={ "toast " (notification.level.css_class()) } {
                        strong { (notification.title) }
                        @if let Some(description) = &notification.description {
                            p { (description) }
                        }
                    }
                }
            }
        }
    }
}

/// Irreversible-action confirmation
pub fn confirm_modal(
    title: &str,
    description: &str,
    confirm_action: &str,
    cancel_action: &str,
) -> Markup {
    html! {
        div class="modal" role="dialog" aria-modal="true" {
            div class="card" {
                h3 { (title) }
                p class="muted" { (description) }
                div style="display:flex;gap:.5rem;justify-content:flex-end" {
                    form method="post" action=(cancel_action) {
                        button type="submit" class="secondary" { "Cancel" }
                    }
                    form method="post" action=(confirm_action) {
                        button type="submit" class="danger" { "Delete" }
                    }
                }
            }
        }
    }
}

/// Placeholder while a collection loads
fn loading() -> Markup {
    html! {
        p class="muted" aria-busy="true" { "Loading..." }
    }
}

/// Loading placeholder replaced by the markup served at `source`
pub fn deferred(source: &str) -> Markup {
    html! {
        div data-load=(source) { (loading()) }
    }
}
