use std::sync::atomic::{AtomicU8, Ordering};

/// Where container views come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Pre-generated artifacts are consulted before the generator.
    GeneratedViews = 0,

    /// Assemblies are no longer scanned; the generator produces every view.
    RuntimeGeneration = 1,
}

/// One-way switch from [`Mode::GeneratedViews`] to
/// [`Mode::RuntimeGeneration`].
#[derive(Debug)]
pub(super) struct ModeFlag(AtomicU8);

impl ModeFlag {
    pub(super) fn new(mode: Mode) -> Self {
        Self(AtomicU8::new(mode as u8))
    }

    pub(super) fn get(&self) -> Mode {
        match self.0.load(Ordering::Acquire) {
            0 => Mode::GeneratedViews,
            _ => Mode::RuntimeGeneration,
        }
    }

    /// Switches to runtime generation. Returns `true` for the call that
    /// performed the switch.
    pub(super) fn switch_to_runtime(&self) -> bool {
        self.0
            .compare_exchange(
                Mode::GeneratedViews as u8,
                Mode::RuntimeGeneration as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}
