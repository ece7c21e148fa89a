use crossterm::event::{KeyCode, KeyModifiers};

use crate::bar::Focus;

use super::support::Harness;

fn with_results(ids: &[&'static str], shortcuts: bool) -> Harness {
    let mut harness = Harness::present(Some("q"), shortcuts);
    harness.complete_last(ids);
    harness
}

#[test]
fn escape_dismisses_without_activation() {
    let mut harness = with_results(&["A", "B", "C"], false);

    assert!(harness.press(KeyCode::Esc));

    assert!(!harness.window.is_presented());
    assert!(!harness.window.user_did_activate_item());
    assert_eq!(harness.dismissed.get(), Some(false));
    assert!(harness.activated.borrow().is_empty());
}

#[test]
fn return_activates_selected_row_and_dismisses() {
    let mut harness = with_results(&["A", "B", "C"], false);

    assert!(harness.press(KeyCode::Down));
    assert_eq!(harness.window.results().selected_row(), Some(1));
    assert!(harness.press(KeyCode::Enter));

    assert_eq!(*harness.activated.borrow(), vec!["B"]);
    assert_eq!(harness.source.selected(), vec!["B"]);
    assert!(harness.window.user_did_activate_item());
    assert!(!harness.window.is_presented());
    assert_eq!(harness.dismissed.get(), Some(true));
}

#[test]
fn return_with_no_results_changes_nothing() {
    let mut harness = with_results(&[], false);

    harness.press(KeyCode::Enter);

    assert!(harness.window.is_presented());
    assert!(harness.activated.borrow().is_empty());
    assert_eq!(harness.window.results().selected_row(), None);
}

#[test]
fn modifier_digit_activates_matching_row() {
    let mut harness = with_results(&["A", "B", "C"], true);

    assert!(harness.press_with(KeyCode::Char('2'), KeyModifiers::ALT));

    assert_eq!(*harness.activated.borrow(), vec!["B"]);
    assert_eq!(harness.dismissed.get(), Some(true));
}

#[test]
fn digit_shortcuts_cover_nine_rows_and_skip_zero() {
    let ids = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];
    for digit in 1..=9u32 {
        let mut harness = with_results(&ids, true);
        let ch = char::from_digit(digit, 10).expect("single digit");
        assert!(harness.press_with(KeyCode::Char(ch), KeyModifiers::ALT));
        assert_eq!(*harness.activated.borrow(), vec![ids[digit as usize - 1]]);
    }

    let mut harness = with_results(&ids, true);
    assert!(!harness.press_with(KeyCode::Char('0'), KeyModifiers::ALT));
    assert!(harness.activated.borrow().is_empty());
    assert!(harness.window.is_presented());
}

#[test]
fn shortcut_on_separator_or_when_disabled_is_ignored() {
    let mut harness = with_results(&["A", "-", "C"], true);
    assert!(!harness.press_with(KeyCode::Char('2'), KeyModifiers::ALT));
    assert!(!harness.press_with(KeyCode::Char('7'), KeyModifiers::ALT));
    assert_eq!(harness.window.edit_text(), "q");
    assert!(harness.activated.borrow().is_empty());

    let mut harness = with_results(&["A", "B"], false);
    harness.press_with(KeyCode::Char('2'), KeyModifiers::ALT);
    assert!(harness.activated.borrow().is_empty());
    assert!(harness.window.is_presented());
}

#[test]
fn arrows_skip_unselectable_rows() {
    let mut harness = with_results(&["-", "A", "--", "B"], false);
    assert_eq!(harness.window.results().selected_row(), Some(1));

    assert!(harness.press(KeyCode::Down));
    assert_eq!(harness.window.results().selected_row(), Some(3));
    assert!(!harness.press(KeyCode::Down));

    assert!(harness.press(KeyCode::Up));
    assert_eq!(harness.window.results().selected_row(), Some(1));
}

#[test]
fn up_and_down_are_not_consumed_for_single_row() {
    let mut harness = with_results(&["A"], false);
    assert!(!harness.press(KeyCode::Down));
    assert!(!harness.press(KeyCode::Up));
    assert_eq!(harness.window.results().selected_row(), Some(0));
}

#[test]
fn left_arrow_in_results_returns_focus_to_field() {
    let mut harness = with_results(&["A", "B"], false);

    assert!(harness.press(KeyCode::Tab));
    assert_eq!(harness.window.focus(), Focus::Results);
    assert!(harness.press(KeyCode::Down));
    assert_eq!(harness.window.results().selected_row(), Some(1));

    assert!(harness.press(KeyCode::Left));
    assert_eq!(harness.window.focus(), Focus::SearchField);
}

#[test]
fn typing_in_results_goes_back_to_the_field() {
    let mut harness = with_results(&["A"], false);
    harness.press(KeyCode::Tab);

    harness.type_text("z", 0);

    assert_eq!(harness.window.focus(), Focus::SearchField);
    assert_eq!(harness.window.edit_text(), "qz");
    assert!(harness.window.debounce_deadline().is_some());
}

#[test]
fn keys_after_dismissal_are_ignored() {
    let mut harness = with_results(&["A"], false);
    harness.press(KeyCode::Esc);
    assert!(!harness.press(KeyCode::Enter));
    assert!(harness.activated.borrow().is_empty());
}
