mod capture;
mod cli;
mod config;
mod core;
mod domain;
mod error;
mod localize;
mod session;
mod widget;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .filter_module("naga", log::LevelFilter::Error)
        .init();
    localize::localize();
    cli::run(cli::Args::parse())
}
