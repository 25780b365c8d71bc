mod actions;
mod anim;
mod app;
mod canvas;
mod color;
mod config;
mod input;
mod model;
mod sprite;
mod storage;
mod term;
mod traits;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
