// Subcommands of the stroker binary

pub mod list;
pub mod simulate;
