pub mod focus_arbitrator;
pub mod hotkeys;
