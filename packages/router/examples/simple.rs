//! A small app rendered to strings, driven by an in-memory location.
//!
//! Run with `cargo run --example simple` to watch the router dispatch.

use std::rc::Rc;

use hashrouter::prelude::*;
use tracing::Level;

#[derive(Debug)]
enum Html {
    Text(String),
    Element(&'static str, Vec<View<Html>>),
    Body(String, Option<View<Html>>),
    Anchor(String, View<Html>),
}

impl Markup for Html {
    fn body(id: &str, children: Option<View<Self>>) -> Self {
        Html::Body(id.to_string(), children)
    }

    fn anchor(link: Link, content: View<Self>) -> Self {
        Html::Anchor(link.href(), content)
    }
}

impl Html {
    fn render(&self) -> String {
        match self {
            Html::Text(text) => text.clone(),
            Html::Element(tag, children) => {
                let inner: String = children.iter().map(|child| child.render()).collect();
                format!("<{tag}>{inner}</{tag}>")
            }
            Html::Body(id, children) => {
                let inner = children.as_ref().map(|c| c.render()).unwrap_or_default();
                format!("<div id=\"{id}\">{inner}</div>")
            }
            Html::Anchor(href, content) => format!("<a href=\"{href}\">{}</a>", content.render()),
        }
    }
}

fn text(value: impl Into<String>) -> View<Html> {
    View::new(Html::Text(value.into()))
}

fn element(tag: &'static str, children: Vec<View<Html>>) -> View<Html> {
    View::new(Html::Element(tag, children))
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let location = Rc::new(MemoryLocation::default());
    let nav = location.clone();

    let config = RouterConfig::default()
        .default_path("/home")
        .container_id("app")
        .on_update(|content: Option<&View<Html>>| {
            if let Some(content) = content {
                println!("{}", content.render());
            }
        });

    let mut router = Router::new(config);
    router.handle_func("/home", move |_| {
        let nav: Rc<dyn Location> = nav.clone();
        element(
            "main",
            vec![
                element("h1", vec![text("Home")]),
                link(&nav, "/users/1", text("First user")),
            ],
        )
    });
    router.group_func(
        "/users",
        |ctx| {
            let mut children = vec![element("h1", vec![text("Users")])];
            children.extend(ctx.children.clone());
            element("section", children)
        },
        |users| {
            users.handle_func("/:userID", |ctx| {
                let id = ctx.params.get("userID").unwrap_or_default();
                element("p", vec![text(format!("Profile of user {id}"))])
            });
            users.handle_func("/:userID/network", |ctx| {
                let id = ctx.params.get("userID").unwrap_or_default();
                element("p", vec![text(format!("Network of user {id}"))])
            });
        },
    );
    router.handle_func("/*", |ctx| {
        element("h1", vec![text(format!("Nothing at {}", ctx.path))])
    });

    let service = match router.body(location.clone()) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("failed to start the router: {e}");
            return;
        }
    };

    for path in ["/users/1", "/users/1/network", "/users/1/network", "/missing"] {
        if let Err(e) = service.go(path) {
            tracing::error!("failed to navigate to {path}: {e}");
        }
    }
}
