//! `hugodoc presets` command implementation.

use hugodoc_renderer::Preset;

use crate::output::Output;

/// Print every preset with its description.
pub(crate) fn execute() {
    let output = Output::new();
    let width = name_width();
    for preset in Preset::ALL {
        output.entry(preset.name(), width, preset.description());
    }
}

fn name_width() -> usize {
    Preset::ALL
        .iter()
        .map(|preset| preset.name().len())
        .max()
        .unwrap_or_default()
}
