pub mod workspace;
pub mod zorder;
