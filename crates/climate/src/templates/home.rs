use maud::{html, Markup, DOCTYPE};

/// Landing page listing the available API routes
pub fn home_page(routes: &[&str]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Hawaii Climate API" }
            }
            body {
                h1 { "Welcome to the Hawaii Climate API!" }
                p { "Available Routes:" }
                ul {
                    @for route in routes {
                        li { code { (route) } }
                    }
                }
                p {
                    "Dates are yyyy-mm-dd. Add "
                    code { "?mode=dict" }
                    " to a temperature route for labeled results. "
                    a href="/docs" { "API docs" }
                }
            }
        }
    }
}
