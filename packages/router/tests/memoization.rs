use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use hashrouter::prelude::*;

fn text(value: impl Into<String>) -> View<String> {
    View::new(value.into())
}

fn counter() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    (count.clone(), count)
}

#[test]
fn same_dispatch_reuses_content() {
    let (calls, counter) = counter();
    let mut router: Router<String> = Router::default();
    router.handle_func("/users/:userID", move |ctx| {
        counter.set(counter.get() + 1);
        text(format!("user {}", ctx.params.get("userID").unwrap_or_default()))
    });

    let first = router.resolve("/users/1").content.unwrap();
    let second = router.resolve("/users/1/").content.unwrap();

    assert!(View::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);

    let third = router.resolve("/users/2").content.unwrap();
    assert!(!View::ptr_eq(&first, &third));
    assert_eq!(calls.get(), 2);
}

#[test]
fn query_order_of_distinct_keys_does_not_matter() {
    let (calls, counter) = counter();
    let mut router: Router<String> = Router::default();
    router.handle_func("/list", move |_| {
        counter.set(counter.get() + 1);
        text("list")
    });

    router.resolve("/list?page=2&sort=name");
    router.resolve("/list?sort=name&page=2");
    assert_eq!(calls.get(), 1);

    router.resolve("/list?sort=date&page=2");
    assert_eq!(calls.get(), 2);
}

#[test]
fn group_root_follows_nested_content() {
    let (root_calls, root_counter) = counter();
    let (leaf_calls, leaf_counter) = counter();

    let mut router: Router<String> = Router::default();
    router.group_func(
        "/users",
        move |ctx| {
            root_counter.set(root_counter.get() + 1);
            text(format!(
                "users[{}]",
                ctx.children.as_deref().map_or("", String::as_str)
            ))
        },
        move |users| {
            users.handle_func("/:userID", move |ctx| {
                leaf_counter.set(leaf_counter.get() + 1);
                text(ctx.params.get("userID").unwrap_or_default())
            });
        },
    );

    let first = router.resolve("/users/1").content.unwrap();
    let again = router.resolve("/users/1").content.unwrap();
    assert!(View::ptr_eq(&first, &again));
    assert_eq!((root_calls.get(), leaf_calls.get()), (1, 1));

    let other = router.resolve("/users/2").content.unwrap();
    assert_eq!(*other, "users[2]");
    assert_eq!((root_calls.get(), leaf_calls.get()), (2, 2));

    // the leaf is rendered anew, so the root sees different children
    let back = router.resolve("/users/1").content.unwrap();
    assert_eq!(*back, "users[1]");
    assert!(!View::ptr_eq(&first, &back));
    assert_eq!((root_calls.get(), leaf_calls.get()), (3, 3));
}

#[test]
fn update_flag_tracks_previous_dispatches() {
    let flags = Rc::new(RefCell::new(Vec::new()));
    let seen = flags.clone();

    let mut router: Router<String> = Router::default();
    router.handle_func("/users/:userID", move |ctx| {
        seen.borrow_mut().push(ctx.should_update);
        text(ctx.params.get("userID").unwrap_or_default())
    });

    for path in ["/users/1", "/users/1", "/users/2", "/users/1", "/users/1"] {
        router.resolve(path);
    }

    assert_eq!(*flags.borrow(), [false, true, true]);
}

#[test]
fn stateful_handler_rebuilds_on_update() {
    struct Cached {
        view: Option<View<String>>,
        builds: Rc<Cell<usize>>,
    }

    impl Handler<String> for Cached {
        fn on_route(&mut self, ctx: &Context<String>) -> View<String> {
            match &self.view {
                Some(view) if !ctx.should_update => view.clone(),
                _ => {
                    self.builds.set(self.builds.get() + 1);
                    let view = text(ctx.params.get("tab").unwrap_or("none"));
                    self.view = Some(view.clone());
                    view
                }
            }
        }
    }

    let (builds, counter) = counter();
    let mut router: Router<String> = Router::default();
    router.handle(
        "/settings",
        Cached {
            view: None,
            builds: counter,
        },
    );

    assert_eq!(*router.resolve("/settings").content.unwrap(), "none");
    assert_eq!(*router.resolve("/settings?tab=a").content.unwrap(), "a");
    assert_eq!(*router.resolve("/settings?tab=a").content.unwrap(), "a");
    assert_eq!(builds.get(), 2);

    let route = &router.routes()[0];
    assert_eq!(route.last_context().unwrap().params.get("tab"), Some("a"));
}

#[test]
fn unmatched_routes_keep_their_memo() {
    let (calls, counter) = counter();
    let mut router: Router<String> = Router::default();
    router.handle_func("/a", move |_| {
        counter.set(counter.get() + 1);
        text("a")
    });
    router.handle_func("/b", |_| text("b"));

    let first = router.resolve("/a").content.unwrap();
    router.resolve("/b");
    let back = router.resolve("/a").content.unwrap();

    assert!(View::ptr_eq(&first, &back));
    assert_eq!(calls.get(), 1);
}
