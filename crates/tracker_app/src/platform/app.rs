use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use tracker_core::{update, DashboardState, Msg, NoticeLevel};
use tracker_logging::{tracker_error, tracker_info};

use super::cli::{Cli, Command};
use super::effects::{self, EffectRunner};
use super::{config, logging, render};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli.config)?;
    logging::initialize(config.log);
    tracker_info!("Using jobs API at {}", config.base_url);

    let runner = EffectRunner::new(config.client_settings()).context("starting engine")?;
    // The client enforces its own timeouts; this only guards against a stalled engine.
    let wait = Duration::from_secs(config.connect_timeout_secs + config.request_timeout_secs + 5);
    let mut session = Session::new(runner, wait);

    let show_stats = matches!(cli.command, Command::Stats);
    for msg in cli.command.into_messages() {
        session.dispatch(msg)?;
    }

    let view = session.state.view();
    print!("{}", render::render(&view, show_stats));
    match view.notice {
        Some(notice) if notice.level == NoticeLevel::Error => {
            tracker_error!("{}", notice.text);
            bail!(notice.text)
        }
        _ => Ok(()),
    }
}

struct Session {
    state: DashboardState,
    runner: EffectRunner,
    wait: Duration,
}

impl Session {
    fn new(runner: EffectRunner, wait: Duration) -> Self {
        Self {
            state: DashboardState::new(),
            runner,
            wait,
        }
    }

    /// Applies `msg` and pumps engine events until every effect it caused has settled.
    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let mut outstanding = self.apply(msg);
        while outstanding > 0 {
            let msg = self
                .runner
                .next_msg(self.wait)
                .ok_or_else(|| anyhow!("timed out waiting for the jobs API"))?;
            if effects::is_terminal(&msg) {
                outstanding -= 1;
            }
            outstanding += self.apply(msg);
        }
        Ok(())
    }

    fn apply(&mut self, msg: Msg) -> usize {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects)
    }
}
