mod common;

use common::{Harness, HostEvent, NavEvent, StaticForms};
use family_habits_client_core::action::{CHILDREN_LABEL, TASK_LABEL};
use family_habits_client_core::{PageContext, TransitionState};

#[test]
fn shop_page_hides_primary_and_shows_back() {
    let harness = Harness::new(
        "https://habits.example.com/shop.html?tab=rewards",
        StaticForms::default(),
    );
    let router = harness.router();
    assert_eq!(router.page(), PageContext::Shop);

    router.install();

    assert_eq!(
        harness.host.events(),
        vec![HostEvent::HidePrimary, HostEvent::ShowBack]
    );
}

#[test]
fn index_page_hides_both_controls() {
    let harness = Harness::new("https://habits.example.com/", StaticForms::default());
    let router = harness.router();

    router.install();

    assert_eq!(router.page(), PageContext::Index);
    assert_eq!(
        harness.host.events(),
        vec![HostEvent::HidePrimary, HostEvent::HideBack]
    );
}

#[test]
fn children_and_task_pages_show_labelled_primary_and_back() {
    for (location, label) in [
        ("/registration-children.html", CHILDREN_LABEL),
        ("/create-task.html", TASK_LABEL),
    ] {
        let harness = Harness::new(location, StaticForms::default());
        harness.router().install();
        assert_eq!(
            harness.host.events(),
            vec![HostEvent::ShowPrimary(label.to_string()), HostEvent::ShowBack],
            "{location}"
        );
    }
}

#[test]
fn back_control_follows_destination_table() {
    let cases = [
        (
            "/registration-children.html",
            NavEvent::Navigate("registration.html".to_string()),
        ),
        ("/welcome.html", NavEvent::Navigate("index.html".to_string())),
        ("/profile.html", NavEvent::Navigate("index.html".to_string())),
        ("/shop.html", NavEvent::Navigate("index.html".to_string())),
        ("/statistics.html", NavEvent::Navigate("index.html".to_string())),
        ("/create-task.html", NavEvent::Navigate("index.html".to_string())),
    ];
    for (location, expected) in cases {
        let harness = Harness::new(location, StaticForms::default());
        let router = harness.router();
        router.install();
        harness.host.click_back();
        assert_eq!(harness.navigator.events(), vec![expected], "{location}");
    }
}

#[test]
fn pages_without_fixed_destination_use_history() {
    for location in ["/index.html", "/registration.html"] {
        let harness = Harness::new(location, StaticForms::default());
        harness.router().go_back();
        assert_eq!(harness.navigator.events(), vec![NavEvent::Back], "{location}");
    }
}

#[test]
fn dropped_router_turns_callbacks_into_no_ops() {
    let harness = Harness::new("/registration.html", StaticForms::default());
    let router = harness.router();
    router.install();
    drop(router);

    harness.host.click_primary();

    assert_eq!(harness.spawner.pending(), 0);
}

#[test]
fn snapshot_reports_page_spec_and_state() {
    let harness = Harness::new("/create-task.html", StaticForms::default());
    let router = harness.router();

    let snapshot = serde_json::to_value(router.snapshot()).expect("snapshot json");

    assert_eq!(snapshot["page"], "create-task");
    assert_eq!(snapshot["spec"]["on_trigger"], "submit_task");
    assert_eq!(snapshot["state"]["state"], "idle");
    assert_eq!(snapshot["host_present"], false);
    assert_eq!(router.state(), TransitionState::Idle);
}

#[test]
fn context_reads_query_parameters_from_location() {
    let harness = Harness::new(
        "https://habits.example.com/profile.html?user_id=9&family_id=4&stars=12&tab=tasks#top",
        StaticForms::default(),
    );

    let params = harness.ctx.url_params();

    assert_eq!(harness.ctx.current_page(), PageContext::Profile);
    assert_eq!(params.user_id.as_deref(), Some("9"));
    assert_eq!(params.family_id.as_deref(), Some("4"));
    assert_eq!(params.stars_count(), Some(12));
    assert_eq!(params.tab.as_deref(), Some("tasks"));
    assert_eq!(params.first_name, None);
}
