mod preset;

pub use preset::PresetDialog;
