//! Document public API property tests
//!
//! 任意の編集列の後でも、容量とカーソル位置の不変条件が保たれることを確認する

use ke::buffer::{CursorPosition, Document, Limits};
use ke::editor::Coordinator;
use ke::ui::ScrollPolicy;
use proptest::test_runner::Config as ProptestConfig;
use proptest::{prelude::*, prop_oneof};

#[derive(Debug, Clone)]
enum Operation {
    Insert(char),
    Newline,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => proptest::char::range('a', 'z').prop_map(Operation::Insert),
        1 => Just(Operation::Newline),
        2 => Just(Operation::Backspace),
        1 => Just(Operation::Up),
        1 => Just(Operation::Down),
        1 => Just(Operation::Left),
        1 => Just(Operation::Right),
    ]
}

fn small_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![4 => proptest::char::range('a', 'z'), 1 => Just('\n')],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn edits_respect_limits_and_keep_cursor_valid(
        ops in proptest::collection::vec(operation_strategy(), 0..64),
        width in 1usize..6,
        height in 1usize..4,
        policy in prop_oneof![Just(ScrollPolicy::Step), Just(ScrollPolicy::Center)],
    ) {
        let limits = Limits::new(4, 5);
        let mut document = Document::new(limits);
        let mut coordinator = Coordinator::new(width, height, policy);

        for op in ops {
            let _ = match op {
                Operation::Insert(ch) => coordinator.insert_char(&mut document, ch),
                Operation::Newline => coordinator.insert_newline(&mut document),
                Operation::Backspace => coordinator.delete_backward(&mut document),
                Operation::Up => coordinator.move_up(&document),
                Operation::Down => coordinator.move_down(&document),
                Operation::Left => coordinator.move_left(&document),
                Operation::Right => coordinator.move_right(&document),
            };
            match policy {
                // 1回の補正は1行・1列ずつなので収束するまで繰り返す
                ScrollPolicy::Step => while coordinator.scroll() {},
                // 中央寄せは1回の補正で必ず表示領域に入る
                ScrollPolicy::Center => {
                    coordinator.scroll();
                }
            }

            prop_assert!(document.row_count() >= 1);
            prop_assert!(document.row_count() <= limits.max_lines);
            for row in document.rows() {
                prop_assert!(row.len() <= limits.max_line_length);
            }
            prop_assert!(document.is_valid_position(coordinator.cursor()));
            prop_assert!(coordinator.viewport().contains(coordinator.cursor()));
        }
    }

    #[test]
    fn split_then_join_restores_document(text in small_text(), row_seed in 0usize..32, col_seed in 0usize..32) {
        let mut document = Document::from_text(&text, Limits::default()).unwrap();
        let before = document.to_text("\n");

        let row = row_seed % document.row_count();
        let col = col_seed % (document.line_len(row) + 1);

        let split = document.insert_character('\n', row, col).unwrap();
        prop_assert_eq!(split, CursorPosition::new(row + 1, 0));
        prop_assert_eq!(document.row_count(), before.matches('\n').count() + 2);

        let joined = document.delete_character(split.row, split.col).unwrap();
        prop_assert_eq!(joined, CursorPosition::new(row, col));
        prop_assert_eq!(document.to_text("\n"), before);
    }

    #[test]
    fn text_round_trips_through_document(text in small_text()) {
        let document = Document::from_text(&text, Limits::default()).unwrap();
        prop_assert_eq!(document.to_text("\n"), text);
    }
}
