// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Minimal REPL with filesystem tab completion. Type a path and press tab; ctrl-d or
//! closing stdin ends the session.

use r3bl_line_editor::{CommonResult, CrosstermTerminal, FileMatchGenerator, InlineString,
                       LineEditor, LineEditorDesc};

fn main() -> CommonResult<()> {
    let desc = LineEditorDesc {
        terminal: Some(Box::new(CrosstermTerminal::new())),
        shell_name: InlineString::from_str("demo"),
        prompt: InlineString::from_str("demo> "),
        word_delims: InlineString::from_str(" \t"),
        partial_delims: InlineString::from_str("/\\"),
        ..LineEditorDesc::default()
    };

    let mut editor = LineEditor::try_new(desc)?;
    editor.add_generator(Box::new(FileMatchGenerator::default()));

    while let Some(line) = editor.edit() {
        println!("got: {line}");
    }
    Ok(())
}
