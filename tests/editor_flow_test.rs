//! Editing flows: undo/redo, batches and tool integration.

mod common;

use bead_quant::{ConvertOptions, Rgba};
use beadsmith::error::EditError;
use beadsmith::models::BeadCell;
use beadsmith::services::GridEditor;
use beadsmith::tools::ToolManager;
use common::fixtures;
use pretty_assertions::assert_eq;

/// 3x3 editor: top row RED, rest WHITE
fn loaded_editor() -> GridEditor {
    let mut editor = GridEditor::with_options(
        fixtures::test_palette(),
        ConvertOptions::default(),
        100,
    );
    let mut pixels = Vec::new();
    for y in 0..3 {
        for _ in 0..3 {
            if y == 0 {
                pixels.extend_from_slice(&[255, 0, 0, 255]);
            } else {
                pixels.extend_from_slice(&[255, 255, 255, 255]);
            }
        }
    }
    let buffer = bead_quant::PixelBuffer::new(pixels, 3, 3).unwrap();
    editor.convert(&buffer).unwrap();
    editor
}

fn grid_json(editor: &GridEditor) -> String {
    serde_json::to_string(editor.result().unwrap().grid()).unwrap()
}

#[test]
fn test_undo_restores_exact_grid_after_each_mutation() {
    let mutations: Vec<Box<dyn Fn(&mut GridEditor)>> = vec![
        Box::new(|ed: &mut GridEditor| ed.set_cell(1, 1, fixtures::bead("BLUE")).unwrap()),
        Box::new(|ed: &mut GridEditor| {
            ed.remove_cell(0, 0).unwrap();
        }),
        Box::new(|ed: &mut GridEditor| {
            ed.replace_color_everywhere("RED", &fixtures::bead("GREEN"))
                .unwrap();
        }),
        Box::new(|ed: &mut GridEditor| {
            ed.remove_cells_where(|c| c.y == 2).unwrap();
        }),
        Box::new(|ed: &mut GridEditor| {
            ed.upsert_cells(vec![BeadCell::new(2, 2, fixtures::custom(1, 2, 3))])
                .unwrap();
        }),
    ];

    for mutate in mutations {
        let mut editor = loaded_editor();
        let before = grid_json(&editor);
        mutate(&mut editor);
        let after = grid_json(&editor);
        assert_ne!(before, after);

        editor.undo().unwrap();
        assert_eq!(grid_json(&editor), before);
        common::assert_stats_consistent(editor.result().unwrap());

        editor.redo().unwrap();
        assert_eq!(grid_json(&editor), after);
        common::assert_stats_consistent(editor.result().unwrap());
    }
}

#[test]
fn test_stats_follow_mutations() {
    let mut editor = loaded_editor();
    editor
        .replace_color_everywhere("WHITE", &fixtures::bead("BLACK"))
        .unwrap();
    editor.remove_cell(0, 0).unwrap();

    let result = editor.result().unwrap();
    assert_eq!(result.color_stats().get("BLACK"), Some(&6));
    assert_eq!(result.color_stats().get("RED"), Some(&2));
    assert_eq!(result.color_stats().get("WHITE"), None);
    common::assert_stats_consistent(result);
}

#[test]
fn test_cancelled_batch_is_invisible() {
    let mut editor = loaded_editor();
    editor.set_cell(0, 1, fixtures::bead("GREEN")).unwrap();
    let before = grid_json(&editor);
    let undo_len = editor.history().undo_len();

    editor.start_batch().unwrap();
    editor.set_cell(0, 0, fixtures::bead("BLACK")).unwrap();
    editor.remove_cells_where(|c| c.x == 2).unwrap();
    editor.cancel_batch().unwrap();

    assert_eq!(grid_json(&editor), before);
    assert_eq!(editor.history().undo_len(), undo_len);
}

#[test]
fn test_committed_batch_is_one_undo_step() {
    let mut editor = loaded_editor();
    let before = grid_json(&editor);

    editor.start_batch().unwrap();
    editor.set_cell(0, 0, fixtures::bead("BLACK")).unwrap();
    editor.set_cell(1, 0, fixtures::bead("BLACK")).unwrap();
    editor.remove_cell(2, 2).unwrap();
    editor.commit_batch().unwrap();
    let after = grid_json(&editor);

    assert_eq!(editor.history().undo_len(), 1);
    editor.undo().unwrap();
    assert_eq!(grid_json(&editor), before);
    assert!(matches!(editor.undo(), Err(EditError::NoHistory)));
    editor.redo().unwrap();
    assert_eq!(grid_json(&editor), after);
}

#[test]
fn test_commit_clears_redo() {
    let mut editor = loaded_editor();
    editor.set_cell(0, 0, fixtures::bead("BLACK")).unwrap();
    editor.undo().unwrap();
    assert!(editor.can_redo());

    editor
        .run_batch(|ed| ed.set_cell(1, 1, fixtures::bead("BLUE")))
        .unwrap();
    assert!(!editor.can_redo());
}

#[test]
fn test_failing_batch_rolls_back() {
    let mut editor = loaded_editor();
    let before = grid_json(&editor);

    let err = editor
        .run_batch(|ed| {
            ed.set_cell(0, 0, fixtures::bead("BLACK"))?;
            ed.remove_cell(1, 1)?;
            ed.set_cell(3, 0, fixtures::bead("BLACK"))
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "Cell (3, 0) is outside the 3x3 grid");
    assert_eq!(grid_json(&editor), before);
    assert!(!editor.is_batch_active());
}

#[test]
fn test_tool_edits_through_editor() {
    let mut editor = loaded_editor();
    let mut tools = ToolManager::default();

    tools.select("fill");
    let filled = editor
        .apply_tool(&mut tools, 1, 2, Some(&fixtures::bead("GREEN")))
        .unwrap();
    assert_eq!(filled.len(), 6);

    tools.select("brush");
    editor
        .apply_tool(&mut tools, 0, 0, Some(&fixtures::bead("BLUE")))
        .unwrap();

    common::assert_grid_names(
        editor.result().unwrap().grid(),
        &[
            &["BLUE", "RED", "RED"],
            &["GREEN", "GREEN", "GREEN"],
            &["GREEN", "GREEN", "GREEN"],
        ],
    );
    assert_eq!(editor.history().undo_len(), 2);
    assert_eq!(tools.history().undo_len(), 2);

    editor.undo().unwrap();
    assert_eq!(
        editor.result().unwrap().grid().color_at(0, 0).unwrap().name,
        "RED"
    );
}

#[test]
fn test_load_without_conversion_fails() {
    let mut editor = GridEditor::with_options(
        fixtures::test_palette(),
        ConvertOptions::default(),
        100,
    );
    assert!(matches!(
        editor.set_cell(0, 0, fixtures::bead("RED")),
        Err(EditError::NoActiveResult)
    ));

    editor
        .convert(&fixtures::solid(1, 1, Rgba::new(0, 0, 0, 255)))
        .unwrap();
    assert!(editor.set_cell(0, 0, fixtures::bead("RED")).is_ok());
}
