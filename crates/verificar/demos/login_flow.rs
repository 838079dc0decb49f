//! Login Flow Demo - Screen Verification End to End
//!
//! Demonstrates the verification engine against mock elements:
//! - narrowing a candidate set with predicates
//! - screen readiness checks
//! - state and property assertions with fast-path waits
//! - the nested activity trace a run leaves behind
//!
//! # Running
//!
//! ```bash
//! cargo run --example login_flow -p verificar
//! ```

use std::time::Duration;

use verificar::mock::MockElement;
use verificar::{
    assert_property, assert_state, verify_screen, ActivityTrace, CollectingSink, Combinator,
    ConditionWaiter, ElementState, Icon, MatchField, MatchMode, Predicate, Property, Screen,
    Timeout,
};

struct LoginScreen {
    username_field: MockElement,
    login_button: MockElement,
    error_alert: MockElement,
}

impl LoginScreen {
    fn new() -> Self {
        Self {
            username_field: MockElement::new("Username field")
                .with_identifier("login.username")
                .with_placeholder_value("Enter username"),
            login_button: MockElement::new("Login button")
                .with_identifier("login.submit")
                .with_label("Login Button")
                .with_state(ElementState::Enabled, false),
            error_alert: MockElement::new("error alert")
                .with_state(ElementState::Exists, false),
        }
    }
}

impl Screen for LoginScreen {
    fn name(&self) -> &str {
        "LoginScreen"
    }

    fn is_loaded(&self) -> bool {
        use verificar::ElementHandle;
        self.login_button.exists() && self.username_field.exists()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Verificar Login Flow Demo ===\n");

    let screen = LoginScreen::new();
    let waiter = ConditionWaiter::new();
    let trace = ActivityTrace::new();
    let mut sink = CollectingSink::new().with_name("Login flow");

    // Screen readiness, wrapped in a screen-level scope
    verify_screen(&screen, &waiter, &trace, &mut sink);

    // Narrow a candidate set the way a query capability would
    let candidates = vec![
        screen.username_field.clone(),
        screen.login_button.clone(),
        screen.error_alert.clone(),
    ];
    let predicate = Predicate::builder(MatchField::Label, MatchMode::Contains)
        .texts(["Log", "in"])
        .with_combinator(Combinator::And)
        .build()
        .expect("valid predicate");
    let matches = predicate.filter(&candidates);
    println!("predicate narrowed {} candidates to {}", candidates.len(), matches.len());

    // The button starts disabled; typing a username enables it shortly after
    let button = screen.login_button.clone();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(150));
        button.set_state(ElementState::Enabled, true);
    });

    trace.run(Icon::Step, "Typing the username", || {
        screen.username_field.set_value(Some("jane".to_string()));
    });

    trace.run_state("Login button", ElementState::Enabled, true, || {
        assert_state(
            &screen.login_button,
            ElementState::Enabled,
            true,
            Timeout::Normal,
            &waiter,
            &mut sink,
        );
    });

    // Negative assertion: already-absent alert returns without waiting
    trace.run_state("error alert", ElementState::Exists, false, || {
        assert_state(
            &screen.error_alert,
            ElementState::Exists,
            false,
            Timeout::Loading,
            &waiter,
            &mut sink,
        );
    });

    trace.run_property("Login button", Property::Label, "Login Button", true, || {
        assert_property(
            &screen.login_button,
            Property::Label,
            "Login Button",
            true,
            Timeout::Normal,
            &waiter,
            &mut sink,
        );
    });

    println!("\n{}\n", sink.summary());
    println!("--- Activity trace ---");
    print!("{}", trace.archive().render_text());

    for outcome in sink.outcomes() {
        println!("[{}] {}", if outcome.passed { "PASS" } else { "FAIL" }, outcome.message);
    }

    println!("\n=== Login Flow Demo Complete ===");
}
