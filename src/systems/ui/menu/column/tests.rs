use std::sync::atomic::Ordering as AtomicOrdering;

use crate::systems::{
    colors::{HUD_PAUSEMAP_TINT, HUD_PAUSE_BG},
    ui::menu::{
        defs::{AdjustDirection, ColumnPosition, ScrollStyle, VerticalDirection},
        errors::MenuWarning,
        events::{FeedbackSound, MenuEvent},
        item::{Description, ItemValue, MenuItem, SlotVariant},
        resolver::tests::gated_resolver,
        sync::{SlotPayload, SyncCall, SyncChannel},
    },
};

use super::{Activation, ItemColumn, NavigationProgress};

/// Rows whose label starts with '-' become jumpable separators.
pub(crate) fn item_for(label: &str) -> MenuItem {
    if label.starts_with('-') {
        MenuItem::separator(label, true)
    } else {
        MenuItem::new(label)
    }
}

pub(crate) fn column_of(labels: &[&str], visible_items: usize) -> ItemColumn {
    let mut column = ItemColumn::new("test", visible_items);
    let mut sync = SyncChannel::default();
    for label in labels {
        column.add_item(item_for(label), &mut sync);
    }
    column
}

fn shown(mut column: ItemColumn) -> (ItemColumn, SyncChannel) {
    let mut sync = SyncChannel::default();
    column.set_visible(true);
    column.focus(&mut sync);
    column.populate(&mut sync);
    column.show(&mut sync);
    sync.take_calls();
    sync.drain_events();
    sync.drain_feedback();
    (column, sync)
}

fn shown_labels(labels: &[&str], visible_items: usize) -> (ItemColumn, SyncChannel) {
    shown(column_of(labels, visible_items))
}

fn shown_items(items: Vec<MenuItem>, visible_items: usize) -> (ItemColumn, SyncChannel) {
    let mut column = ItemColumn::new("test", visible_items);
    let mut sync = SyncChannel::default();
    for item in items {
        column.add_item(item, &mut sync);
    }
    shown(column)
}

fn labels(column: &ItemColumn) -> Vec<String> {
    column.items().iter().map(|item| item.label.clone()).collect()
}

fn step(column: &mut ItemColumn, direction: VerticalDirection, sync: &mut SyncChannel) -> usize {
    let mut progress = column.move_selection(direction, sync);
    let mut frames = 0;
    loop {
        match progress {
            NavigationProgress::Landed(index) => return index,
            NavigationProgress::Pending => {
                frames += 1;
                assert!(frames <= column.len(), "navigation never landed");
                progress = column.resume_navigation(sync);
            }
            NavigationProgress::Ignored => panic!("navigation was ignored"),
        }
    }
}

fn assert_window_holds_selection(column: &ItemColumn) {
    assert!(column.top_edge() <= column.selection());
    assert!(column.selection() < column.top_edge() + column.visible_items());
    assert!(column.top_edge() <= column.len().saturating_sub(column.visible_items()));
}

fn assert_slot_calls_in_range(calls: &[SyncCall], len: usize) {
    for call in calls {
        if let (Some(ColumnPosition::Left), Some(index)) = (call.column(), call.slot_index()) {
            if !matches!(call, SyncCall::RemoveSlot { .. }) {
                assert!(index < len, "{call:?} points past {len} rows");
            }
        }
    }
}

#[test]
fn wrapping_up_from_the_top_snaps_window_to_the_tail() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c", "d", "e"], 3);

    assert_eq!(column.move_selection(VerticalDirection::Up, &mut sync), NavigationProgress::Landed(4));
    assert_eq!(column.selection(), 4);
    assert_eq!(column.top_edge(), 2);

    let calls = sync.take_calls();
    assert!(calls.contains(&SyncCall::SetScrollState {
        column: ColumnPosition::Left,
        scrollbar: true,
        top_edge: 2,
        selection: 4,
        total: 5,
        visible_items: 3,
    }));
    assert!(calls.contains(&SyncCall::SetHighlight {
        column: ColumnPosition::Left,
        index: 4,
    }));
    assert!(calls.contains(&SyncCall::SetDescriptionIndex {
        column: ColumnPosition::Left,
        index: 2,
        animate: true,
    }));
    assert_eq!(sync.drain_feedback(), vec![FeedbackSound::NavUpDown]);
}

#[test]
fn wrapping_down_from_the_bottom_snaps_window_to_zero() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c", "d", "e"], 3);
    column.set_current_selection(4, &mut sync);
    assert_eq!(column.top_edge(), 2);

    assert_eq!(step(&mut column, VerticalDirection::Down, &mut sync), 0);
    assert_eq!(column.top_edge(), 0);
}

#[test]
fn jumpable_separator_costs_one_frame() {
    let (mut column, mut sync) = shown_labels(&["a", "-", "c"], 12);

    assert_eq!(column.move_selection(VerticalDirection::Down, &mut sync), NavigationProgress::Pending);
    assert!(column.is_navigating());
    assert!(!column.items()[0].is_selected());
    assert!(!column.items()[1].is_selected());
    assert_eq!(
        column.move_selection(VerticalDirection::Up, &mut sync),
        NavigationProgress::Pending,
        "a second command while skipping is dropped"
    );

    assert_eq!(column.resume_navigation(&mut sync), NavigationProgress::Landed(2));
    assert_eq!(column.selection(), 2);
    assert!(column.items()[2].is_selected());
    assert!(!column.is_navigating());
}

#[test]
fn all_jumpable_column_lands_on_first_row() {
    let (mut column, mut sync) = shown_labels(&["-a", "-b", "-c"], 12);
    assert_eq!(step(&mut column, VerticalDirection::Down, &mut sync), 0);
    assert_eq!(step(&mut column, VerticalDirection::Up, &mut sync), 0);
}

#[test]
fn repeated_steps_visit_landable_rows_in_wrapped_order() {
    let rows = ["a", "-", "b", "c", "-", "d"];
    let landable = [0, 2, 3, 5];

    let (mut column, mut sync) = shown_labels(&rows, 3);
    for n in 1..=10 {
        let landed = step(&mut column, VerticalDirection::Down, &mut sync);
        assert_eq!(landed, landable[n % landable.len()]);
        assert_window_holds_selection(&column);
    }

    let (mut column, mut sync) = shown_labels(&rows, 3);
    for n in 1..=10 {
        let landed = step(&mut column, VerticalDirection::Up, &mut sync);
        let expected = (landable.len() * 10 - n) % landable.len();
        assert_eq!(landed, landable[expected]);
        assert_window_holds_selection(&column);
    }
}

#[test]
fn short_column_never_scrolls() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c"], 5);
    for direction in [
        VerticalDirection::Up,
        VerticalDirection::Up,
        VerticalDirection::Down,
        VerticalDirection::Up,
        VerticalDirection::Down,
        VerticalDirection::Down,
    ] {
        step(&mut column, direction, &mut sync);
        assert_eq!(column.top_edge(), 0);
    }
}

#[test]
fn window_slides_minimally_on_plain_steps() {
    let (mut column, mut sync) = shown_labels(&["0", "1", "2", "3", "4", "5", "6", "7"], 3);
    for expected_top in [0, 0, 1, 2] {
        step(&mut column, VerticalDirection::Down, &mut sync);
        assert_eq!(column.top_edge(), expected_top);
    }
    assert_eq!(column.selection(), 4);
    step(&mut column, VerticalDirection::Up, &mut sync);
    step(&mut column, VerticalDirection::Up, &mut sync);
    step(&mut column, VerticalDirection::Up, &mut sync);
    assert_eq!((column.selection(), column.top_edge()), (1, 1));
}

#[test]
fn hidden_column_ignores_navigation_and_stays_silent() {
    let mut column = column_of(&["a", "b"], 12);
    let mut sync = SyncChannel::default();
    assert_eq!(column.move_selection(VerticalDirection::Down, &mut sync), NavigationProgress::Ignored);
    column.add_item(MenuItem::new("c"), &mut sync);
    column.set_item_enabled(0, false, &mut sync);
    assert_eq!(column.len(), 3);
    assert!(!column.items()[0].enabled);
    assert_eq!(sync.pending(), 0);
}

#[test]
fn pointer_scroll_moves_selection_only_when_it_leaves_the_window() {
    let rows = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    let (mut column, mut sync) = shown_labels(&rows, 4);
    column.set_current_selection(1, &mut sync);
    sync.drain_events();

    assert!(column.pointer_scroll(1, &mut sync));
    assert_eq!((column.top_edge(), column.selection()), (1, 1));
    assert!(sync.drain_events().is_empty());

    assert!(column.pointer_scroll(1, &mut sync));
    assert_eq!((column.top_edge(), column.selection()), (2, 2));
    assert_eq!(sync.drain_events().len(), 1);

    assert!(column.pointer_scroll(-5, &mut sync));
    assert_eq!((column.top_edge(), column.selection()), (0, 2));

    assert!(column.pointer_scroll(100, &mut sync));
    assert_eq!((column.top_edge(), column.selection()), (6, 6));
    assert!(!column.pointer_scroll(1, &mut sync), "already at the tail");
}

#[test]
fn pointer_scroll_snaps_past_jumpable_edge_rows() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "-", "d", "e", "f"], 2);
    column.pointer_scroll(2, &mut sync);
    assert_eq!(column.top_edge(), 2);
    assert_eq!(column.selection(), 3);
}

#[test]
fn hovered_row_follows_the_scroll() {
    let rows = ["0", "1", "2", "3", "4", "5"];
    let (mut column, mut sync) = shown_labels(&rows, 3);
    column.handle_hover(1, true, &mut sync);
    column.pointer_scroll(2, &mut sync);
    assert_eq!(column.hovered(), Some(3));
    assert!(column.items()[3].is_hovered());
    assert!(!column.items()[1].is_hovered());
}

#[test]
fn selection_scroll_style_turns_wheel_into_navigation() {
    let mut column = column_of(&["a", "b", "c", "d"], 2).with_scroll_style(ScrollStyle::Selection);
    column.set_scroll_style(ScrollStyle::Selection);
    let (mut column, mut sync) = shown(column);
    assert!(column.pointer_scroll(1, &mut sync));
    assert_eq!(column.selection(), 1);
    assert!(column.pointer_scroll(-1, &mut sync));
    assert_eq!(column.selection(), 0);
}

#[test]
fn filter_then_reset_restores_sequence_and_selection() {
    let rows = ["apple", "banana", "cherry", "avocado"];
    let (mut column, mut sync) = shown_labels(&rows, 12);
    column.set_current_selection(2, &mut sync);

    assert_eq!(column.filter(|item| item.label.starts_with('a'), &mut sync), Ok(2));
    assert_eq!(labels(&column), vec!["apple", "avocado"]);
    assert_eq!(column.selection(), 0);
    assert!(column.is_filtered());
    assert_slot_calls_in_range(&sync.take_calls(), column.len());

    assert!(column.reset_filter(&mut sync));
    assert_eq!(labels(&column), rows);
    assert_eq!(column.selection(), 2);
    assert!(column.items()[2].is_selected());
    assert!(!column.reset_filter(&mut sync), "nothing left to restore");
}

#[test]
fn items_added_while_filtered_survive_reset() {
    let (mut column, mut sync) = shown_labels(&["a1", "b1", "a2"], 12);
    column.filter(|item| item.label.starts_with('a'), &mut sync).unwrap();
    column.add_item(MenuItem::new("a3"), &mut sync);
    column.reset_filter(&mut sync);
    assert_eq!(labels(&column), vec!["a1", "b1", "a2", "a3"]);
}

#[test]
fn empty_filter_warns_and_changes_nothing() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c"], 12);
    column.set_current_selection(1, &mut sync);
    sync.take_calls();

    assert_eq!(
        column.filter(|item| item.label == "zzz", &mut sync),
        Err(MenuWarning::EmptyFilterResult)
    );
    assert_eq!(labels(&column), vec!["a", "b", "c"]);
    assert_eq!(column.selection(), 1);
    assert!(!column.is_filtered());
    assert_eq!(sync.pending(), 0);
}

#[test]
fn failing_predicate_is_reported_without_partial_filtering() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c"], 12);
    let result = column.try_filter(
        |item| {
            if item.label == "b" {
                Err("cannot judge b")
            } else {
                Ok(true)
            }
        },
        &mut sync,
    );
    assert_eq!(result, Err(MenuWarning::PredicateFailed("cannot judge b".to_string())));
    assert_eq!(labels(&column), vec!["a", "b", "c"]);
    assert!(!column.is_filtered());
}

#[test]
fn sort_is_a_permutation_that_keeps_the_selected_item() {
    let (mut column, mut sync) = shown_labels(&["delta", "alpha", "charlie", "bravo"], 12);
    let selected = column.items()[0].id();
    let mut before = labels(&column);

    column.sort_by(|a, b| a.label.cmp(&b.label), &mut sync);

    let after = labels(&column);
    assert_eq!(after, vec!["alpha", "bravo", "charlie", "delta"]);
    before.sort();
    assert_eq!(before, after);
    assert_eq!(column.current_item().map(MenuItem::id), Some(selected));

    column.reset_filter(&mut sync);
    assert_eq!(labels(&column), vec!["delta", "alpha", "charlie", "bravo"]);
}

#[test]
fn reset_returns_to_the_arrangement_before_the_last_reorder() {
    let (mut column, mut sync) = shown_labels(&["c", "a", "b", "d"], 12);
    column.filter(|item| item.label != "d", &mut sync).unwrap();
    column.sort_by(|a, b| a.label.cmp(&b.label), &mut sync);
    assert_eq!(labels(&column), vec!["a", "b", "c"]);

    assert!(column.reset_filter(&mut sync));
    assert_eq!(labels(&column), vec!["c", "a", "b"]);
    assert!(!column.is_filtered());
}

#[test]
fn disabled_item_refuses_adjust_with_error_feedback_and_no_sync() {
    let slider = MenuItem::slider("volume", 10, 1, 5).unwrap().with_enabled(false);
    let (mut column, mut sync) = shown_items(vec![slider], 12);

    assert!(!column.adjust_current(AdjustDirection::Left, &mut sync));
    assert_eq!(column.items()[0].value(), Some(ItemValue::Number(5)));
    assert_eq!(sync.drain_feedback(), vec![FeedbackSound::Error]);
    assert_eq!(sync.pending(), 0);
    assert!(sync.events().is_empty());
}

#[test]
fn disabled_item_refuses_activation() {
    let item = MenuItem::checkbox("subtitles", false).with_enabled(false);
    let (mut column, mut sync) = shown_items(vec![item], 12);
    assert_eq!(column.activate_current(&mut sync), Activation::Rejected);
    assert_eq!(column.items()[0].value(), Some(ItemValue::Checked(false)));
    assert_eq!(sync.drain_feedback(), vec![FeedbackSound::Error]);
}

#[test]
fn checkbox_activation_repaints_and_reports_value() {
    let (mut column, mut sync) = shown_items(vec![MenuItem::checkbox("subtitles", false)], 12);
    let id = column.items()[0].id();

    assert_eq!(column.activate_current(&mut sync), Activation::Activated);
    let calls = sync.take_calls();
    assert!(matches!(
        &calls[0],
        SyncCall::UpdateSlot {
            column: ColumnPosition::Left,
            index: 0,
            payload: SlotPayload::Item(slot),
        } if slot.variant == (SlotVariant::Checkbox { checked: true, style: Default::default() })
    ));
    assert_eq!(
        sync.drain_events(),
        vec![MenuEvent::ItemValueChanged {
            tab: 0,
            column: ColumnPosition::Left,
            index: 0,
            item: id,
            value: ItemValue::Checked(true),
        }]
    );
}

#[test]
fn list_activation_reports_its_index() {
    let options = vec!["low".to_string(), "high".to_string()];
    let list = MenuItem::list("quality", options, 1).unwrap();
    let (mut column, mut sync) = shown_items(vec![list], 12);
    column.activate_current(&mut sync);
    assert!(matches!(
        sync.drain_events().as_slice(),
        [MenuEvent::ItemActivated { list_index: Some(1), .. }]
    ));
}

#[test]
fn dynamic_value_resolves_over_frames_one_request_at_a_time() {
    let (resolver, gate) = gated_resolver("rainy");
    let (mut column, mut sync) =
        shown_items(vec![MenuItem::dynamic_list("weather", "sunny", resolver)], 12);
    let id = column.items()[0].id();

    assert!(column.adjust_current(AdjustDirection::Right, &mut sync));
    assert!(column.has_pending_resolution(id));
    assert!(!column.adjust_current(AdjustDirection::Left, &mut sync), "still in flight");
    assert_eq!(column.poll_resolutions(&mut sync), 0);
    sync.take_calls();
    sync.drain_events();

    gate.store(true, AtomicOrdering::SeqCst);
    assert_eq!(column.poll_resolutions(&mut sync), 1);
    assert_eq!(column.items()[0].value(), Some(ItemValue::Text("rainy".to_string())));
    assert!(!column.has_pending_resolution(id));
    assert!(sync.take_calls().iter().any(|call| matches!(
        call,
        SyncCall::UpdateSlot { column: ColumnPosition::Left, index: 0, .. }
    )));
    assert!(matches!(
        sync.drain_events().as_slice(),
        [MenuEvent::ItemValueChanged { value: ItemValue::Text(value), .. }] if value == "rainy"
    ));
}

#[test]
fn removing_an_item_cancels_its_resolution() {
    let (resolver, _gate) = gated_resolver("never");
    let (mut column, mut sync) = shown_items(
        vec![MenuItem::dynamic_list("weather", "sunny", resolver), MenuItem::new("other")],
        12,
    );
    let id = column.items()[0].id();
    column.adjust_current(AdjustDirection::Right, &mut sync);
    assert_eq!(column.pending_resolutions(), 1);

    let removed = column.remove_item(id, &mut sync);
    assert_eq!(removed.map(|item| item.id()), Some(id));
    assert_eq!(column.pending_resolutions(), 0);
}

#[test]
fn add_item_syncs_only_rows_inside_the_window() {
    let (mut column, mut sync) = shown_labels(&["a"], 2);
    column.add_item(MenuItem::new("b"), &mut sync);
    assert!(sync.take_calls().iter().any(|call| matches!(
        call,
        SyncCall::AddSlot { index: 1, .. }
    )));
    column.add_item(MenuItem::new("c"), &mut sync);
    assert_eq!(sync.pending(), 0);
    assert_eq!(column.len(), 3);
}

#[test]
fn default_tints_alternate_by_position() {
    let column = column_of(&["a", "b", "c"], 12);
    let tints: Vec<_> = column.items().iter().map(|item| item.main_tint).collect();
    assert_eq!(
        tints,
        vec![Some(HUD_PAUSEMAP_TINT), Some(HUD_PAUSE_BG), Some(HUD_PAUSEMAP_TINT)]
    );
}

#[test]
fn insert_keeps_the_selected_item() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c"], 12);
    column.set_current_selection(1, &mut sync);
    sync.take_calls();

    assert!(column.insert_item(0, MenuItem::new("z"), &mut sync).is_ok());
    assert_eq!(labels(&column), vec!["z", "a", "b", "c"]);
    assert_eq!(column.current_item().map(|item| item.label.as_str()), Some("b"));
    assert!(matches!(
        sync.take_calls().as_slice(),
        [SyncCall::SpliceSlot { index: 0, .. }]
    ));

    assert_eq!(
        column.insert_item(4, MenuItem::new("late"), &mut sync),
        Err(MenuWarning::IndexOutOfRange { index: 4, len: 4 })
    );
    assert_eq!(column.len(), 4);
}

#[test]
fn removal_rederives_selection_and_description() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c"], 12);
    column.set_current_selection(2, &mut sync);
    sync.take_calls();
    sync.drain_events();

    assert!(column.remove_at(2, &mut sync).is_some());
    assert_eq!(column.selection(), 1);
    assert!(column.items()[1].is_selected());
    let calls = sync.take_calls();
    assert_eq!(
        calls[0],
        SyncCall::RemoveSlot {
            column: ColumnPosition::Left,
            index: 2,
        }
    );
    assert!(calls.iter().any(|call| matches!(
        call,
        SyncCall::UpdateSlot { column: ColumnPosition::Right, .. }
    )));
    assert_slot_calls_in_range(&calls, column.len());
    assert_eq!(sync.drain_events().len(), 1);

    assert!(column.remove_at(7, &mut sync).is_none());
    assert_eq!(sync.pending(), 0);

    column.remove_at(0, &mut sync);
    assert_eq!(column.current_item().map(|item| item.label.as_str()), Some("b"));
}

#[test]
fn clear_resets_everything() {
    let (mut column, mut sync) = shown_labels(&["a", "b", "c"], 2);
    column.set_current_selection(2, &mut sync);
    column.clear(&mut sync);
    assert!(column.is_empty());
    assert_eq!((column.selection(), column.top_edge()), (0, 0));
    let calls = sync.take_calls();
    assert!(calls.contains(&SyncCall::ClearColumn {
        column: ColumnPosition::Left,
    }));
    assert!(calls.contains(&SyncCall::SetScrollState {
        column: ColumnPosition::Left,
        scrollbar: false,
        top_edge: 0,
        selection: 0,
        total: 0,
        visible_items: 2,
    }));
}

#[test]
fn hover_previews_descriptions_and_leave_restores_selection() {
    let (mut column, mut sync) = shown_items(
        vec![
            MenuItem::new("a").with_description("first"),
            MenuItem::new("b").with_description("second"),
        ],
        12,
    );

    column.handle_hover(1, true, &mut sync);
    let calls = sync.take_calls();
    assert_eq!(
        calls[0],
        SyncCall::UpdateSlot {
            column: ColumnPosition::Right,
            index: 0,
            payload: SlotPayload::Description(Description::new("second")),
        }
    );
    assert!(calls.contains(&SyncCall::SetDescriptionIndex {
        column: ColumnPosition::Left,
        index: 1,
        animate: true,
    }));

    column.handle_hover(1, false, &mut sync);
    assert_eq!(
        sync.take_calls()[0],
        SyncCall::UpdateSlot {
            column: ColumnPosition::Right,
            index: 0,
            payload: SlotPayload::Description(Description::new("first")),
        }
    );
    assert_eq!(column.hovered(), None);
}

#[test]
fn removal_keeps_previewing_the_hovered_row() {
    let (mut column, mut sync) = shown_items(
        vec![
            MenuItem::new("a").with_description("first"),
            MenuItem::new("b").with_description("second"),
            MenuItem::new("c").with_description("third"),
        ],
        12,
    );
    column.handle_hover(2, true, &mut sync);
    sync.take_calls();

    column.remove_at(1, &mut sync);
    assert_eq!(column.hovered(), Some(1));
    let calls = sync.take_calls();
    let panel = SyncCall::UpdateSlot {
        column: ColumnPosition::Right,
        index: 0,
        payload: SlotPayload::Description(Description::new("third")),
    };
    assert!(calls.contains(&panel));
    assert!(calls.contains(&SyncCall::SetDescriptionIndex {
        column: ColumnPosition::Left,
        index: 1,
        animate: true,
    }));
}

#[test]
fn programmatic_selection_wraps_and_skips_jumpable_rows() {
    let (mut column, mut sync) = shown_labels(&["a", "-", "c"], 12);
    assert!(!column.set_current_selection(1, &mut sync));
    assert!(column.set_current_selection(2, &mut sync));
    assert!(column.set_current_selection(9, &mut sync));
    assert_eq!(column.selection(), 0);
}

#[test]
fn show_moves_selection_off_a_leading_separator() {
    let (column, _sync) = shown_labels(&["-", "b", "c"], 12);
    assert_eq!(column.selection(), 1);
    assert!(column.items()[1].is_selected());
}

#[test]
fn label_edits_respect_item_variant() {
    let (mut column, mut sync) =
        shown_items(vec![MenuItem::new("money"), MenuItem::checkbox("vsync", true)], 12);
    assert_eq!(
        column.update_item_labels(0, "cash", Some("$10".to_string()), &mut sync),
        Ok(true)
    );
    assert_eq!(column.items()[0].right_label(), Some("$10"));
    assert!(column
        .update_item_labels(1, "v-sync", Some("on".to_string()), &mut sync)
        .is_err());
    assert_eq!(column.items()[1].label, "vsync");
    assert_eq!(column.update_item_labels(5, "x", None, &mut sync), Ok(false));
}

#[test]
fn navigation_sequences_keep_slot_calls_in_range() {
    let rows = ["a", "-", "c", "d", "-", "f", "g"];
    let (mut column, mut sync) = shown_labels(&rows, 3);
    for direction in [
        VerticalDirection::Up,
        VerticalDirection::Up,
        VerticalDirection::Down,
        VerticalDirection::Down,
        VerticalDirection::Down,
        VerticalDirection::Up,
    ] {
        step(&mut column, direction, &mut sync);
        assert_window_holds_selection(&column);
        column.remove_at(column.len() - 1, &mut sync);
        column.add_item(item_for("new"), &mut sync);
        assert_slot_calls_in_range(&sync.take_calls(), column.len());
    }
}
