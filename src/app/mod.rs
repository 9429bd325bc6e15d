pub mod display;
pub mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use display::LogDisplay;
use rota::config::WorkbenchConfig;
use rota::control::{Command, CommandQueue, CommandSender};
use rota::Workbench;

/// Headless operator for the rotation workbench.
#[derive(Debug, Clone, Parser)]
#[command(name = "euler", version)]
pub struct AppConfig {
    /// Scene config in RON. Defaults to the built-in two-frame scene.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input events to replay, as a RON list of commands.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Extra clock time to play after the script, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub duration_ms: u64,
}

pub struct EulerApp {
    workbench: Workbench,
    queue: CommandQueue,
    sender: CommandSender,
    script: Vec<Command>,
    duration_ms: u64,
}

impl EulerApp {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let scene = match &config.config {
            Some(path) => WorkbenchConfig::load(path)?,
            None => WorkbenchConfig::default(),
        };
        let script = match &config.script {
            Some(path) => script::load(path)?,
            None => script::demo()?,
        };

        let mut workbench = Workbench::from_config(&scene).context("building workbench")?;
        workbench.subscribe(Box::new(LogDisplay::new()));
        let (queue, sender) = CommandQueue::new();

        Ok(Self {
            workbench,
            queue,
            sender,
            script,
            duration_ms: config.duration_ms,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        tracing::info!(target: "engine", commands = self.script.len(), "workbench starting");

        for command in self.script.drain(..) {
            self.sender.send(command);
            let reports = self.workbench.drain(&self.queue);
            let notifications: usize = reports.iter().map(|r| r.notifications).sum();
            tracing::debug!(target: "engine", passes = reports.len(), notifications, "event handled");
        }

        if self.duration_ms > 0 {
            self.sender.send(Command::Elapse(self.duration_ms));
            self.workbench.drain(&self.queue);
        }

        self.print_summary();
        tracing::info!(target: "engine", "workbench shutdown complete");
        Ok(())
    }

    fn print_summary(&self) {
        println!("--- Rotation Workbench ---");
        for frame in self.workbench.broker().frames() {
            let [w, x, y, z] = frame.orientation().components();
            let [a, b, c] = frame.euler().to_degrees();
            println!(
                "{:<26} {}  q = ({w:>7.4}, {x:>7.4}, {y:>7.4}, {z:>7.4})  euler = ({a:>8.2}, {b:>8.2}, {c:>8.2})",
                frame.name(),
                frame.axes(),
            );
        }
    }
}
