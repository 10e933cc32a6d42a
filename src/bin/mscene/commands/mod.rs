mod blender;
mod common;
mod view;

use blender::run_blender;
use view::run_view;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Blender(args) => run_blender(args, ctx),
        Command::View(args) => run_view(args, ctx),
    }
}
