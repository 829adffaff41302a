//! Integration tests for the tool-menu controller: filtering, drag moves,
//! order persistence, and event delivery.

use benchdeck::settings::shared;
use benchdeck::{
    DeviceProfile, EventFilter, EventKind, MemSettings, MenuEvents, Preferences, SelectOutcome,
    SharedSettings, Tool, ToolMenu, Translator,
};

fn menu_with(store: SharedSettings) -> (ToolMenu, MenuEvents) {
    let events = MenuEvents::new();
    let prefs = Preferences::load(store.clone());
    let translator = Translator::from_pref("en");
    let menu = ToolMenu::new(store, &translator, &prefs, events.clone());
    (menu, events)
}

fn fresh_menu() -> (ToolMenu, MenuEvents) {
    menu_with(shared(MemSettings::default()))
}

#[test]
fn fresh_menu_tracks_the_whole_catalog_hidden() {
    let (menu, _) = fresh_menu();
    assert_eq!(menu.order(), Tool::ALL.to_vec());
    assert_eq!(menu.shown(), 0);
    assert!(menu.visible_items().next().is_none());
    assert_eq!(menu.current_hw(), None);
}

#[test]
fn connecting_hardware_shows_its_compatible_tools() {
    let (mut menu, events) = fresh_menu();
    let rx = events.subscribe(EventFilter::only(EventKind::FILTER_APPLIED));

    menu.apply_filter(Some(&DeviceProfile::all_tools("m2k")));

    assert_eq!(menu.shown(), Tool::ALL.len());
    assert_eq!(menu.current_hw(), Some("m2k"));
    let evt = rx.try_recv().unwrap();
    assert_eq!(evt.hw_name.as_deref(), Some("m2k"));
}

#[test]
fn reapplying_the_same_hardware_identity_is_a_noop() {
    let (mut menu, events) = fresh_menu();
    let rx = events.subscribe(EventFilter::only(EventKind::FILTER_APPLIED));

    menu.apply_filter(Some(&DeviceProfile::all_tools("m2k")));
    // Same identity, different tool set: must change nothing.
    menu.apply_filter(Some(&DeviceProfile::new("m2k", [Tool::Voltmeter])));

    assert_eq!(menu.shown(), Tool::ALL.len());
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[test]
fn removing_incompatible_tools_wins_over_inserting_compatible_ones() {
    let (mut menu, _) = fresh_menu();
    let dmm = DeviceProfile::new(
        "generic-dmm",
        [Tool::Voltmeter, Tool::PowerSupply, Tool::Calibration],
    );
    let pluto = DeviceProfile::new(
        "adalm-pluto",
        [Tool::SpectrumAnalyzer, Tool::SignalGenerator],
    );

    menu.apply_filter(Some(&DeviceProfile::all_tools("m2k")));
    menu.apply_filter(Some(&dmm));
    // Only the removal is applied, so the visible set shrinks to the
    // intersection of what was shown and what the new device supports.
    assert_eq!(menu.shown(), 3);
    assert!(menu.item_for(Tool::Voltmeter).unwrap().visible);
    assert!(!menu.item_for(Tool::Oscilloscope).unwrap().visible);

    // Switching to disjoint hardware removes everything; the newly
    // compatible tools are not inserted in the same pass.
    menu.apply_filter(Some(&pluto));
    assert_eq!(menu.shown(), 0);
    assert!(!menu.item_for(Tool::SpectrumAnalyzer).unwrap().visible);
}

#[test]
fn moves_are_ignored_while_any_tool_is_hidden() {
    let (mut menu, _) = fresh_menu();
    assert!(!menu.handle_move(0, 3));

    menu.apply_filter(Some(&DeviceProfile::new("dmm", [Tool::Voltmeter])));
    assert!(!menu.handle_move(0, 3));
    assert_eq!(menu.order(), Tool::ALL.to_vec());
}

#[test]
fn moves_apply_and_notify_when_every_tool_is_shown() {
    let (mut menu, events) = fresh_menu();
    let rx = events.subscribe(EventFilter::only(EventKind::ORDER_CHANGED));
    menu.apply_filter(Some(&DeviceProfile::all_tools("m2k")));

    assert!(menu.handle_move(0, 2));

    let order = menu.order();
    assert_eq!(order[2], Tool::ALL[0]);
    assert_eq!(order[0], Tool::ALL[1]);

    let evt = rx.try_recv().unwrap();
    assert_eq!(evt.moved, Some((0, 2)));
    assert_eq!(evt.order.as_deref(), Some(order.as_slice()));
}

#[test]
fn display_order_survives_a_restart() {
    let store = shared(MemSettings::default());
    let expected;
    {
        let (mut menu, _) = menu_with(store.clone());
        menu.apply_filter(Some(&DeviceProfile::all_tools("m2k")));
        assert!(menu.handle_move(0, 5));
        expected = menu.order();
        // Dropping the menu persists the order.
    }
    let (menu, _) = menu_with(store);
    assert_eq!(menu.order(), expected);
}

#[test]
fn clicking_a_detached_tool_does_not_select_it() {
    let (mut menu, events) = fresh_menu();
    let rx = events.subscribe(EventFilter::only(
        EventKind::TOOL_SELECTED | EventKind::TOOL_DETACHED | EventKind::TOOL_ATTACHED,
    ));
    menu.apply_filter(Some(&DeviceProfile::all_tools("m2k")));

    menu.set_detached(Tool::Voltmeter, true);
    assert_eq!(menu.select(Tool::Voltmeter), SelectOutcome::Detached);

    menu.set_detached(Tool::Voltmeter, false);
    assert_eq!(menu.select(Tool::Voltmeter), SelectOutcome::Selected);

    let kinds: Vec<_> = rx.try_iter().map(|e| e.kinds).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::TOOL_DETACHED,
            EventKind::TOOL_ATTACHED,
            EventKind::TOOL_SELECTED,
        ]
    );
}

#[test]
fn disconnecting_clears_the_menu() {
    let (mut menu, events) = fresh_menu();
    let rx = events.subscribe(EventFilter::only(EventKind::MENU_CLEARED));
    menu.apply_filter(Some(&DeviceProfile::all_tools("m2k")));

    menu.apply_filter(None);

    assert_eq!(menu.shown(), 0);
    assert_eq!(menu.current_hw(), None);
    assert!(rx.try_recv().is_ok());
}

#[test]
fn stale_persisted_order_is_reconciled() {
    let store = shared(MemSettings::default());
    store
        .borrow_mut()
        .set("toolMenu/pos", serde_json::json!([99, 2, 2, 0]));

    let (menu, _) = menu_with(store);
    let order = menu.order();
    assert_eq!(order.len(), Tool::ALL.len());
    assert_eq!(order[0], Tool::ALL[2]);
    assert_eq!(order[1], Tool::ALL[0]);
    // Every tool appears exactly once.
    let mut seen = order.clone();
    seen.sort_by_key(|t| t.index());
    assert_eq!(seen, Tool::ALL.to_vec());
}
