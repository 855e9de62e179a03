use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// One or more tick intervals have elapsed.
    #[from(ignore)]
    Tick(u32),
    Render,
    Crossterm(CrosstermEvent),
}
