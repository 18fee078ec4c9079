#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FontEntryCommand {
    Cancel,
    Submit,
    Backspace,
    Insert(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Command {
    Exit,
    NextPage,
    PreviousPage,
    StepFontSize(i64),
    StartFontEntry,
    ToggleTheme,
    ClosePopup,
    Replay,
    StopSpeech,
    ScrollDown(u16),
    ScrollUp(u16),
    ToggleHelp,
    CloseHelp,
    FontEntry(FontEntryCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandOutcome {
    Continue,
    Exit,
}
