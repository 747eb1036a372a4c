//! Integration tests for pagebox.
//!
//! These tests exercise the public API from outside the crate: apps with
//! registered pages, navigation through sessions and the Pilot, and the
//! resulting page trees.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pagebox::app::{App, AppConfig};
use pagebox::builder::BuildError;
use pagebox::dispatch::{DispatchError, Navigation, PageError};
use pagebox::page::Host;
use pagebox::registry::Registry;
use pagebox::session::SessionHandle;
use pagebox::testing::{HeadlessPage, HeadlessRuntime, Pilot};
use pagebox::widget::{construct, FromProps, Namespace, Props, SlotKind, Widget, WidgetClass};
use pagebox::widgets::*;
use pretty_assertions::assert_eq;

fn quiet() -> AppConfig {
    AppConfig::default().with_verbose(false)
}

// ---------------------------------------------------------------------------
// Path parameters
// ---------------------------------------------------------------------------

#[test]
fn test_user_page_receives_id_param() {
    let seen = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&seen);

    let mut app = App::new(quiet());
    app.view("/users/{id}", move |cx| {
        let id = cx.param("id")?.to_owned();
        *captured.lock().unwrap() = Some(id.clone());
        cx.builder.add(Text::new(format!("user {id}")))?;
        Ok(())
    })
    .unwrap();

    let pilot = Pilot::from_app(&mut app, "/users/42").unwrap();
    assert_eq!(seen.lock().unwrap().as_deref(), Some("42"));
    let tree = pilot.current().unwrap();
    assert_eq!(tree.route(), Some("/users/42"));
    assert_eq!(pilot.find::<Text>().unwrap().value, "user 42");
}

#[test]
fn test_query_and_typed_params() {
    let mut app = App::new(quiet());
    app.view("/search/{page}", |cx| {
        let page: u32 = cx.parse("page")?;
        let term = cx.query("q").unwrap_or("").to_owned();
        cx.builder.add(Text::new(format!("{term} p{page}")))?;
        Ok(())
    })
    .unwrap();

    let mut pilot = Pilot::from_app(&mut app, "/search/2?q=red+shoes").unwrap();
    assert_eq!(pilot.find::<Text>().unwrap().value, "red shoes p2");

    let err = pilot.navigate("/search/two").unwrap_err();
    assert!(matches!(err, DispatchError::Page { .. }));
}

#[test]
fn test_wildcard_captures_rest_of_path() {
    let mut app = App::new(quiet());
    app.view("/files/{*path}", |cx| {
        let path = cx.param("path")?.to_owned();
        cx.builder.add(Text::new(path))?;
        Ok(())
    })
    .unwrap();

    let mut pilot = Pilot::from_app(&mut app, "/files/docs/a%20b.txt").unwrap();
    assert_eq!(pilot.find::<Text>().unwrap().value, "docs/a b.txt");
    pilot.navigate("/files").unwrap();
    assert_eq!(pilot.find::<Text>().unwrap().value, "");
}

#[test]
fn test_literal_beats_param() {
    let mut app = App::new(quiet());
    app.view("/users/{id}", |cx| {
        cx.builder.add(Text::new("param"))?;
        Ok(())
    })
    .unwrap();
    app.view("/users/me", |cx| {
        cx.builder.add(Text::new("literal"))?;
        Ok(())
    })
    .unwrap();

    let mut pilot = Pilot::from_app(&mut app, "/users/me").unwrap();
    assert_eq!(pilot.find::<Text>().unwrap().value, "literal");
    pilot.navigate("/users/7").unwrap();
    assert_eq!(pilot.find::<Text>().unwrap().value, "param");
}

// ---------------------------------------------------------------------------
// Tree construction
// ---------------------------------------------------------------------------

#[test]
fn test_scope_children_attach_in_order() {
    let mut app = App::new(quiet());
    app.view("/", |cx| {
        let mut col = cx.builder.open(Column::new())?;
        col.add(Text::new("B"))?;
        col.add(Text::new("C"))?;
        Ok(())
    })
    .unwrap();

    let pilot = Pilot::from_app(&mut app, "/").unwrap();
    let tree = pilot.current().unwrap();
    let (column, _) = tree.find::<Column>().unwrap();
    assert_eq!(tree.slot(column), SlotKind::Controls);
    let values: Vec<&str> = tree
        .children(column)
        .iter()
        .filter_map(|&id| tree.downcast::<Text>(id))
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(values, vec!["B", "C"]);
}

#[test]
fn test_leaf_under_leaf_is_orphan() {
    let mut app = App::new(quiet());
    app.view("/", |cx| {
        let leaf = cx.builder.add(Text::new("leaf"))?;
        cx.builder.enter(leaf)?;
        cx.builder.add(Icon::new("star"))?;
        Ok(())
    })
    .unwrap();

    let err = Pilot::from_app(&mut app, "/").unwrap_err();
    match err {
        DispatchError::Page {
            source: PageError::Build(BuildError::OrphanWidget { widget, parent }),
            ..
        } => {
            assert_eq!(widget, "Icon");
            assert_eq!(parent, "Text");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_single_slot_replacement_keeps_last() {
    let mut app = App::new(quiet());
    app.view("/", |cx| {
        let mut card = cx.builder.open(Card::new())?;
        card.add(Text::new("first"))?;
        card.add(Text::new("second"))?;
        Ok(())
    })
    .unwrap();

    let pilot = Pilot::from_app(&mut app, "/").unwrap();
    let tree = pilot.current().unwrap();
    let (card, _) = tree.find::<Card>().unwrap();
    assert_eq!(tree.children(card).len(), 1);
    assert_eq!(pilot.find::<Text>().unwrap().value, "second");
    // View, Card, Text.
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_name_based_creation() {
    let mut app = App::new(quiet());
    app.view("/", |cx| {
        let mut row = cx.builder.open_named("Row", &Props::new().with("spacing", 4))?;
        row.create("Text", &Props::new().with("value", "by name"))?;
        Ok(())
    })
    .unwrap();

    let pilot = Pilot::from_app(&mut app, "/").unwrap();
    assert_eq!(pilot.find::<Row>().unwrap().spacing, Some(4));
    assert_eq!(pilot.find::<Text>().unwrap().value, "by name");
}

#[test]
fn test_outline_snapshot() {
    let mut app = App::new(quiet());
    app.view("/users/{id}", |cx| {
        let id: u32 = cx.parse("id")?;
        cx.builder.scope(Column::new().with_spacing(8), |b| {
            b.add(Text::new(format!("User {id}")).with_size(20))?;
            b.scope(Row::new(), |b| {
                b.add(TextButton::new("Back"))?;
                b.add(ElevatedButton::new("Save").with_bgcolor("blue"))?;
                Ok::<_, PageError>(())
            })
        })?;
        Ok(())
    })
    .unwrap();

    let pilot = Pilot::from_app(&mut app, "/users/42").unwrap();
    insta::assert_snapshot!(pilot.outline(), @r#"
    View route="/users/42"
      Column spacing=8
        Text size=20 value="User 42"
        Row
          TextButton text="Back"
          ElevatedButton bgcolor="blue" text="Save"
    "#);
}

// ---------------------------------------------------------------------------
// Catch-all and failures
// ---------------------------------------------------------------------------

#[test]
fn test_catch_all_handles_unknown_route() {
    let mut app = App::new(quiet().with_catch_all("/404"));
    app.view("/", |cx| {
        cx.builder.add(Text::new("home"))?;
        Ok(())
    })
    .unwrap();
    app.view("/404", |cx| {
        let route = cx.route.to_owned();
        cx.builder.add(Text::new(format!("not found: {route}")))?;
        Ok(())
    })
    .unwrap();

    let pilot = Pilot::from_app(&mut app, "/nope").unwrap();
    assert_eq!(pilot.find::<Text>().unwrap().value, "not found: /nope");
    assert_eq!(pilot.routes(), vec!["/nope"]);
}

#[test]
fn test_no_catch_all_is_route_error() {
    let mut app = App::new(quiet());
    app.view("/", |_| Ok(())).unwrap();
    let err = Pilot::from_app(&mut app, "/nope").unwrap_err();
    assert_eq!(err.to_string(), "no route matched: /nope");
}

// ---------------------------------------------------------------------------
// View stack
// ---------------------------------------------------------------------------

#[test]
fn test_back_navigation_reuses_tree() {
    static HOME_BUILDS: AtomicUsize = AtomicUsize::new(0);

    let mut app = App::new(quiet());
    app.view("/", |cx| {
        HOME_BUILDS.fetch_add(1, Ordering::SeqCst);
        cx.builder.add(Text::new("home"))?;
        Ok(())
    })
    .unwrap();
    app.view("/settings", |cx| {
        cx.builder.add(Checkbox::new().with_label("dark mode"))?;
        Ok(())
    })
    .unwrap();

    let mut pilot = Pilot::from_app(&mut app, "/").unwrap();
    pilot.push("/settings").unwrap();
    assert_eq!(pilot.routes(), vec!["/", "/settings"]);
    assert!(pilot.find::<Checkbox>().is_some());

    assert_eq!(pilot.pop().as_deref(), Some("/"));
    assert_eq!(pilot.route(), "/");
    assert_eq!(pilot.find::<Text>().unwrap().value, "home");
    assert_eq!(HOME_BUILDS.load(Ordering::SeqCst), 1);
    assert_eq!(pilot.pop(), None);
}

#[test]
fn test_postexec_sees_shown_tree() {
    let shown = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&shown);

    let mut app = App::new(quiet());
    app.view("/", move |cx| {
        cx.builder.add(Text::new("home"))?;
        let record = Arc::clone(&record);
        cx.builder.postexec(move |host| {
            let routes = host.views().routes().iter().map(|r| r.to_string()).collect::<Vec<_>>();
            record.lock().unwrap().extend(routes);
        });
        Ok(())
    })
    .unwrap();

    Pilot::from_app(&mut app, "/").unwrap();
    assert_eq!(*shown.lock().unwrap(), vec!["/".to_string()]);
}

// ---------------------------------------------------------------------------
// Extension namespaces
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Gauge {
    value: i64,
}

static GAUGE: WidgetClass = WidgetClass {
    name: "Gauge",
    attributes: &["value", "min", "max"],
    construct: construct::<Gauge>,
};

static METERS: Namespace = Namespace {
    name: "meters",
    classes: &[&GAUGE],
};

impl FromProps for Gauge {
    fn from_props(props: &Props) -> Self {
        Self {
            value: props.int("value").unwrap_or(0),
        }
    }
}

impl Widget for Gauge {
    fn class(&self) -> &'static WidgetClass {
        &GAUGE
    }

    fn props(&self) -> Props {
        Props::new().with("value", self.value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn test_extension_widgets_by_alias() {
    let registry = Registry::new().with_namespace("m", &METERS);
    let mut app = App::with_registry(quiet(), registry);
    app.view("/", |cx| {
        let mut col = cx.builder.open(Column::new())?;
        col.create("m.Gauge", &Props::new().with("value", 70))?;
        Ok(())
    })
    .unwrap();

    let pilot = Pilot::from_app(&mut app, "/").unwrap();
    assert_eq!(pilot.find::<Gauge>().unwrap().value, 70);
    assert!(pilot.outline().contains("    Gauge value=70\n"));
}

#[test]
fn test_unknown_namespace_fails_the_page() {
    let mut app = App::new(quiet());
    app.view("/", |cx| {
        cx.builder.create("m.Gauge", &Props::new())?;
        Ok(())
    })
    .unwrap();
    let err = Pilot::from_app(&mut app, "/").unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Page {
            source: PageError::Build(BuildError::UnknownNamespace(_)),
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[test]
fn test_runtime_sessions_are_isolated() {
    let mut app = App::new(quiet());
    app.view("/", |cx| {
        cx.builder.add(Text::new("home"))?;
        Ok(())
    })
    .unwrap();
    app.view("/items/{id}", |cx| {
        let id = cx.param("id")?.to_owned();
        cx.builder.add(Text::new(id))?;
        Ok(())
    })
    .unwrap();

    let mut runtime = HeadlessRuntime::new().with_client("/").with_client("/items/8");
    app.run(&mut runtime).unwrap();

    let sessions = runtime.sessions();
    assert_eq!(sessions[0].host().views().routes(), vec!["/"]);
    assert_eq!(sessions[1].host().views().routes(), vec!["/items/8"]);
}

#[tokio::test]
async fn test_spawned_sessions_keep_their_own_state() {
    let mut app = App::new(quiet());
    app.view("/items/{id}", |cx| {
        let id: u32 = cx.parse("id")?;
        cx.builder.add(Text::new(format!("item {id}")))?;
        Ok(())
    })
    .unwrap();
    let server = app.serve();

    let mut handles = Vec::new();
    for n in 0..4 {
        let page = HeadlessPage::new(format!("/items/{n}")).with_client_addr(format!("10.0.0.{n}"));
        let (handle, initial) = server.connect(page);
        tokio_test::assert_ok!(initial);
        handles.push(handle);
    }

    let navs = navigate_each(&handles).await;
    for (n, nav) in navs.into_iter().enumerate() {
        assert_eq!(nav.route, format!("/items/{}", n + 10));
    }

    for (n, handle) in handles.into_iter().enumerate() {
        let page = handle.close().await.unwrap();
        assert_eq!(page.route(), format!("/items/{}", n + 10));
        assert_eq!(page.client_addr(), Some(format!("10.0.0.{n}").as_str()));
    }
}

/// Send every session to `/items/{n + 10}`.
async fn navigate_each(handles: &[SessionHandle<HeadlessPage>]) -> Vec<Navigation> {
    let mut navs = Vec::new();
    for (n, handle) in handles.iter().enumerate() {
        navs.push(handle.navigate(format!("/items/{}", n + 10)).await.unwrap());
    }
    navs
}
