use std::{cell::Cell, rc::Rc};

use hashrouter::prelude::*;

#[derive(Debug)]
enum Node {
    Text(String),
    Body(String, Option<View<Node>>),
    Anchor(Link, View<Node>),
}

impl Markup for Node {
    fn body(id: &str, children: Option<View<Self>>) -> Self {
        Node::Body(id.to_string(), children)
    }

    fn anchor(link: Link, content: View<Self>) -> Self {
        Node::Anchor(link, content)
    }
}

fn text(value: impl Into<String>) -> View<Node> {
    View::new(Node::Text(value.into()))
}

fn text_of(view: &View<Node>) -> &str {
    match &**view {
        Node::Text(text) => text,
        other => panic!("expected text, found {other:?}"),
    }
}

fn current_text(service: &RouterService<Node>) -> Option<String> {
    service.current().map(|view| text_of(&view).to_string())
}

fn app(config: RouterConfig<Node>) -> Router<Node> {
    let mut router = Router::new(config);
    router.handle_func("/", |_| text("home"));
    router.handle_func("/about", |_| text("about"));
    router.handle_func("/users/:userID", |ctx| {
        text(format!("user {}", ctx.params.get("userID").unwrap_or_default()))
    });
    router.handle_func("/search", |ctx| {
        text(format!("search {}", ctx.params.get_all("q").join(",")))
    });
    router
}

fn update_counter(config: RouterConfig<Node>) -> (RouterConfig<Node>, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    let config = config.on_update(move |_| inner.set(inner.get() + 1));
    (config, count)
}

#[test]
fn first_load_redirects_to_default_path() {
    let (config, updates) = update_counter(RouterConfig::default().default_path("/about"));
    let location = Rc::new(MemoryLocation::default());

    let service = app(config).start(location.clone()).unwrap();

    assert_eq!(location.current_path(), "/about");
    assert_eq!(current_text(&service), Some("about".into()));
    assert_eq!(updates.get(), 1);
}

#[test]
fn existing_fragment_is_kept() {
    let location = Rc::new(MemoryLocation::with_initial_path("/users/3"));

    let service = app(RouterConfig::default()).start(location.clone()).unwrap();

    assert_eq!(location.current_path(), "/users/3");
    assert_eq!(current_text(&service), Some("user 3".into()));
}

#[test]
fn invalid_default_path_fails_to_start() {
    let location = Rc::new(MemoryLocation::default());
    let config = RouterConfig::default().default_path("/bad%zz");

    let Err(err) = app(config).start(location.clone()) else {
        panic!("starting with an invalid default path should fail");
    };

    assert!(matches!(
        err,
        RouterError::Address(AddressError::InvalidEscape(_))
    ));
    assert_eq!(location.current_path(), "");
}

#[test]
fn location_changes_dispatch_again() {
    let (config, updates) = update_counter(RouterConfig::default());
    let location = Rc::new(MemoryLocation::with_initial_path("/"));
    let service = app(config).start(location.clone()).unwrap();
    assert_eq!(current_text(&service), Some("home".into()));

    location.set_fragment("#/users/7");
    assert_eq!(current_text(&service), Some("user 7".into()));
    assert_eq!(service.current_path_only(), "/users/7");
    assert_eq!(
        service.context().unwrap().params.get_all("userID"),
        ["7"]
    );
    assert_eq!(updates.get(), 2);

    // writing the same fragment is not a change
    location.set_fragment("/users/7");
    assert_eq!(updates.get(), 2);
}

#[test]
fn navigation_round_trips_params() {
    let location = Rc::new(MemoryLocation::with_initial_path("/"));
    let service = app(RouterConfig::default()).start(location.clone()).unwrap();
    let params: Params = [("q", "b"), ("q", "a"), ("page", "x y")]
        .into_iter()
        .collect();

    service.navigate("/search", &params).unwrap();

    assert_eq!(current_text(&service), Some("search b,a".into()));
    assert_eq!(service.context().unwrap().params, params);
    assert_eq!(service.current_path_only(), "/search");
}

#[test]
fn navigation_keeps_the_query_of_the_path() {
    let location = Rc::new(MemoryLocation::with_initial_path("/"));
    let service = app(RouterConfig::default()).start(location.clone()).unwrap();

    service
        .navigate("/search?q=first", &Params::parse("q=second"))
        .unwrap();

    assert_eq!(location.current_path(), "/search?q=first&q=second");
    assert_eq!(current_text(&service), Some("search first,second".into()));
}

#[test]
fn invalid_navigation_is_an_error() {
    let location = Rc::new(MemoryLocation::with_initial_path("/about"));
    let service = app(RouterConfig::default()).start(location.clone()).unwrap();

    let err = service.go("/users/%zz").unwrap_err();

    assert!(matches!(err, RouterError::Address(_)));
    assert_eq!(location.current_path(), "/about");
    assert_eq!(current_text(&service), Some("about".into()));
}

#[test]
fn body_wraps_every_dispatch() {
    let location = Rc::new(MemoryLocation::with_initial_path("/about"));
    let config = RouterConfig::default().container_id("app");
    let service = app(config).body(location.clone()).unwrap();

    let current = service.current().unwrap();
    let Node::Body(id, Some(children)) = &*current else {
        panic!("expected a body with children, found {current:?}");
    };
    assert_eq!(id, "app");
    assert_eq!(text_of(children), "about");

    service.go("/users/9").unwrap();
    let current = service.current().unwrap();
    let Node::Body(_, Some(children)) = &*current else {
        panic!("expected a body with children, found {current:?}");
    };
    assert_eq!(text_of(children), "user 9");
    assert_eq!(
        service.context().unwrap().params.get_all("userID"),
        ["9"]
    );
}

#[test]
fn body_without_matching_route() {
    let location = Rc::new(MemoryLocation::with_initial_path("/missing"));
    let mut router = Router::default();
    router.handle_func("/about", |_| text("about"));

    let service = router.body(location).unwrap();

    let current = service.current().unwrap();
    assert!(matches!(&*current, Node::Body(id, None) if id == "Body"));
}

#[test]
fn on_update_receives_the_new_content() {
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = seen.clone();
    let config = RouterConfig::default().on_update(move |content: Option<&View<Node>>| {
        log.borrow_mut()
            .push(content.map(|view| text_of(view).to_string()));
    });
    let mut router = Router::new(config);
    router.handle_func("/about", |_| text("about"));

    let location = Rc::new(MemoryLocation::with_initial_path("/about"));
    let _service = router.start(location.clone()).unwrap();
    location.set_fragment("/contact");

    assert_eq!(*seen.borrow(), [Some("about".to_string()), None]);
}

#[test]
fn links_navigate_on_activation() {
    let location = Rc::new(MemoryLocation::with_initial_path("/"));
    let service = app(RouterConfig::default()).start(location.clone()).unwrap();

    let anchor = service.link("/about", text("About us"));
    let Node::Anchor(link, content) = &*anchor else {
        panic!("expected an anchor, found {anchor:?}");
    };
    assert_eq!(link.href(), "#/about");
    assert_eq!(text_of(content), "About us");

    link.activate().unwrap();
    assert_eq!(location.current_path(), "/about");
    assert_eq!(current_text(&service), Some("about".into()));
}

#[test]
fn links_carry_params() {
    let location: Rc<dyn Location> = Rc::new(MemoryLocation::with_initial_path("/"));
    let anchor = link_with_params(
        &location,
        "/search",
        Params::parse("q=rust lang"),
        text("Search"),
    );
    let Node::Anchor(link, _) = &*anchor else {
        panic!("expected an anchor, found {anchor:?}");
    };

    assert_eq!(link.href(), "#/search?q=rust+lang");
    assert_eq!(link.params().get("q"), Some("rust lang"));

    link.activate().unwrap();
    assert_eq!(location.current_path(), "/search?q=rust+lang");
}

#[test]
fn dropped_service_stops_dispatching() {
    let (config, updates) = update_counter(RouterConfig::default());
    let location = Rc::new(MemoryLocation::with_initial_path("/"));
    let service = app(config).start(location.clone()).unwrap();
    let clone = service.clone();
    assert_eq!(location.listener_count(), 1);

    drop(service);
    location.set_fragment("/about");
    assert_eq!(updates.get(), 2);
    assert_eq!(current_text(&clone), Some("about".into()));

    drop(clone);
    assert_eq!(location.listener_count(), 0);
    location.set_fragment("/users/1");
    assert_eq!(updates.get(), 2);
}

#[test]
fn handlers_can_redirect() {
    let (config, updates) = update_counter(RouterConfig::default());
    let location = Rc::new(MemoryLocation::with_initial_path("/old"));

    let mut router = Router::new(config);
    let redirect = location.clone();
    router.handle_func("/old", move |_| {
        redirect.navigate("/new", &Params::new()).unwrap();
        text("old")
    });
    router.handle_func("/new", |_| text("new"));

    let service = router.start(location.clone()).unwrap();

    assert_eq!(location.current_path(), "/new");
    assert_eq!(current_text(&service), Some("new".into()));
    assert_eq!(updates.get(), 1);

    let content = service.update().unwrap();
    assert_eq!(text_of(&content), "new");
    assert_eq!(updates.get(), 2);
}

#[test]
fn redirect_loops_terminate() {
    let location = Rc::new(MemoryLocation::with_initial_path("/ping"));

    let mut router = Router::default();
    let to_pong = location.clone();
    router.handle_func("/ping", move |_| {
        to_pong.navigate("/pong", &Params::new()).unwrap();
        text("ping")
    });
    let to_ping = location.clone();
    router.handle_func("/pong", move |_| {
        to_ping.navigate("/ping", &Params::new()).unwrap();
        text("pong")
    });

    let service = router.start(location.clone()).unwrap();

    assert!(service.current().is_some());
}
