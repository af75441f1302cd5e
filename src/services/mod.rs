//! # Services
//!
//! The collaborators the wizard talks to: a step runner that performs install
//! steps and a skill catalog. Both sit behind async traits so tests can swap
//! in fakes.
//!
//! Work is started from an [`Effect`] and reported back as [`Action`]s on a
//! `std::sync::mpsc` channel owned by the event loop. Every reply carries the
//! ticket of the request that produced it.

pub mod catalog;
pub mod runner;

pub use catalog::{CatalogError, FsSkillCatalog, SkillCatalog};
pub use runner::{CommandStepRunner, StepError, StepRunner};

use std::sync::{Arc, mpsc};

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::choices::UserChoices;
use crate::core::config::ResolvedConfig;
use crate::core::plan::InstallStep;
use crate::core::skills::SkillOp;
use crate::core::state::{App, Ticket};

/// Where the wizard stands after [`Services::drive`].
pub enum Drive {
    /// Keep looping. Holds the background task started, if any.
    Continue(Option<JoinHandle<()>>),
    Quit,
}

#[derive(Clone)]
pub struct Services {
    pub runner: Arc<dyn StepRunner>,
    pub catalog: Arc<dyn SkillCatalog>,
}

impl Services {
    pub fn new(runner: Arc<dyn StepRunner>, catalog: Arc<dyn SkillCatalog>) -> Self {
        Self { runner, catalog }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            Arc::new(CommandStepRunner::from_config(config)),
            Arc::new(FsSkillCatalog::from_config(config)),
        )
    }

    /// True when `effect` must run in the foreground with the terminal.
    pub fn needs_terminal(&self, effect: &Effect) -> bool {
        matches!(effect, Effect::RunStep { step, .. } if self.runner.needs_terminal(step))
    }

    /// Spawn the background task for `effect`. Returns `None` for effects
    /// that are not background work.
    pub fn spawn(&self, effect: Effect, tx: mpsc::Sender<Action>) -> Option<JoinHandle<()>> {
        let handle = match effect {
            Effect::RunStep {
                ticket,
                step,
                choices,
            } => spawn_step(self.runner.clone(), ticket, step, choices, tx),
            Effect::FetchSkills { ticket } => {
                let catalog = self.catalog.clone();
                tokio::spawn(async move {
                    let result = catalog.list().await.map_err(|e| e.to_string());
                    send(&tx, Action::SkillsLoaded { ticket, result });
                })
            }
            Effect::ApplySkills { ticket, op, names } => {
                let catalog = self.catalog.clone();
                tokio::spawn(async move {
                    info!("{:?} {} skills", op, names.len());
                    let result = match op {
                        SkillOp::Install => catalog.install(&names).await,
                        SkillOp::Remove => catalog.remove(&names).await,
                    };
                    let result = result.map_err(|e| e.to_string());
                    send(&tx, Action::SkillsApplied { ticket, result });
                })
            }
            Effect::UpdateCatalog { ticket } => {
                let catalog = self.catalog.clone();
                tokio::spawn(async move {
                    let result = catalog.update().await.map_err(|e| e.to_string());
                    send(&tx, Action::CatalogUpdated { ticket, result });
                })
            }
            Effect::None | Effect::Quit => return None,
        };
        Some(handle)
    }

    /// Carry out `effect` and everything it chains into. Foreground steps go
    /// through `run_foreground`, whose reply is fed back to `update`; the
    /// first background effect is spawned and ends the chain.
    pub fn drive<E>(
        &self,
        app: &mut App,
        effect: Effect,
        tx: &mpsc::Sender<Action>,
        mut run_foreground: impl FnMut(Effect) -> Result<Option<Action>, E>,
    ) -> Result<Drive, E> {
        let mut effect = effect;
        loop {
            match effect {
                Effect::None => return Ok(Drive::Continue(None)),
                Effect::Quit => return Ok(Drive::Quit),
                foreground if self.needs_terminal(&foreground) => {
                    let Some(action) = run_foreground(foreground)? else {
                        return Ok(Drive::Continue(None));
                    };
                    effect = update(app, action);
                }
                background => {
                    debug!("Spawning {:?}", background);
                    return Ok(Drive::Continue(self.spawn(background, tx.clone())));
                }
            }
        }
    }

    /// Run an interactive step on the calling thread and build the action
    /// reporting its outcome.
    pub fn run_interactive(&self, effect: Effect) -> Option<Action> {
        let Effect::RunStep {
            ticket,
            step,
            choices,
        } = effect
        else {
            return None;
        };
        let result = self
            .runner
            .run_interactive(&step, &choices)
            .map_err(|e| e.to_string());
        Some(Action::StepFinished { ticket, result })
    }
}

fn spawn_step(
    runner: Arc<dyn StepRunner>,
    ticket: Ticket,
    step: InstallStep,
    choices: UserChoices,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning step '{}' (ticket {:?})", step.key, ticket);
    tokio::spawn(async move {
        let (log_tx, mut log_rx) = tokio::sync::mpsc::channel::<String>(100);

        // Forward output lines; finishes once the runner drops its sender.
        let forward_tx = tx.clone();
        let forward = tokio::spawn(async move {
            while let Some(line) = log_rx.recv().await {
                if forward_tx.send(Action::StepLog { ticket, line }).is_err() {
                    return;
                }
            }
        });

        let result = runner.run(&step, &choices, log_tx).await;
        let _ = forward.await;

        let result = result.map_err(|e| e.to_string());
        send(&tx, Action::StepFinished { ticket, result });
    })
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choices::UserChoices;
    use crate::core::handlers::run_current_step;
    use crate::core::screen::Screen;
    use crate::core::state::{FlowKind, FlowProgress};
    use crate::test_support::{FakeCatalog, FakeRunner, skill, test_app};

    fn services(runner: FakeRunner) -> (Arc<FakeRunner>, Services) {
        let runner = Arc::new(runner);
        let catalog = Arc::new(FakeCatalog::new(vec![
            skill("git-pr", "git", false),
            skill("tdd", "testing", true),
        ]));
        (runner.clone(), Services::new(runner, catalog))
    }

    #[tokio::test]
    async fn test_step_reports_logs_then_result() {
        let (runner, services) = services(FakeRunner::default());
        let (tx, rx) = mpsc::channel();
        let effect = Effect::RunStep {
            ticket: Ticket(4),
            step: InstallStep::new("backup", "Back up"),
            choices: UserChoices::default(),
        };
        services.spawn(effect, tx).unwrap().await.unwrap();

        let actions: Vec<Action> = rx.try_iter().collect();
        assert_eq!(
            actions,
            vec![
                Action::StepLog {
                    ticket: Ticket(4),
                    line: "running backup".to_string()
                },
                Action::StepFinished {
                    ticket: Ticket(4),
                    result: Ok(())
                },
            ]
        );
        assert_eq!(runner.ran(), vec!["backup"]);
    }

    #[tokio::test]
    async fn test_step_failure_is_stringified() {
        let (_, services) = services(FakeRunner::failing(&["backup"]));
        let (tx, rx) = mpsc::channel();
        let effect = Effect::RunStep {
            ticket: Ticket(1),
            step: InstallStep::new("backup", "Back up"),
            choices: UserChoices::default(),
        };
        services.spawn(effect, tx).unwrap().await.unwrap();

        let last = rx.try_iter().last();
        assert_eq!(
            last,
            Some(Action::StepFinished {
                ticket: Ticket(1),
                result: Err("command exited with status 1: backup broke".to_string())
            })
        );
    }

    #[tokio::test]
    async fn test_apply_and_update_carry_ticket() {
        let (_, services) = services(FakeRunner::default());
        let (tx, rx) = mpsc::channel();
        let apply = Effect::ApplySkills {
            ticket: Ticket(7),
            op: SkillOp::Install,
            names: vec!["git-pr".to_string()],
        };
        services.spawn(apply, tx.clone()).unwrap().await.unwrap();
        services
            .spawn(Effect::UpdateCatalog { ticket: Ticket(8) }, tx)
            .unwrap()
            .await
            .unwrap();

        let actions: Vec<Action> = rx.try_iter().collect();
        assert_eq!(
            actions,
            vec![
                Action::SkillsApplied {
                    ticket: Ticket(7),
                    result: Ok("Installed 1".to_string())
                },
                Action::CatalogUpdated {
                    ticket: Ticket(8),
                    result: Err("catalog update failed: offline".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_non_background_effects_spawn_nothing() {
        let (_, services) = services(FakeRunner::default());
        let (tx, _rx) = mpsc::channel();
        assert!(services.spawn(Effect::None, tx.clone()).is_none());
        assert!(services.spawn(Effect::Quit, tx).is_none());
        assert!(!services.needs_terminal(&Effect::None));
    }

    #[tokio::test]
    async fn test_drive_resumes_flow_after_foreground_step() {
        let (runner, services) = services(FakeRunner::interactive(&["os.linux"]));
        let (tx, rx) = mpsc::channel();
        let mut app = test_app();
        app.flow = Some(FlowProgress::new(
            FlowKind::Install,
            vec![
                InstallStep::new("os.linux", "Prepare Linux"),
                InstallStep::new("shell.fish", "Install Fish"),
            ],
        ));
        let effect = run_current_step(&mut app);

        let mut foreground = Vec::new();
        let drive = services
            .drive(&mut app, effect, &tx, |effect| {
                foreground.push(effect.clone());
                Ok::<_, std::io::Error>(services.run_interactive(effect))
            })
            .unwrap();
        assert_eq!(foreground.len(), 1);
        assert_eq!(runner.ran(), vec!["os.linux"]);

        // The step after the foreground one runs in the background.
        let Drive::Continue(Some(handle)) = drive else {
            panic!("expected the next step to be spawned");
        };
        handle.await.unwrap();
        assert_eq!(runner.ran(), vec!["os.linux", "shell.fish"]);

        for action in rx.try_iter() {
            let effect = update(&mut app, action);
            assert_eq!(effect, Effect::None);
        }
        assert_eq!(app.screen, Screen::InstallComplete);
        assert!(app.failure.is_none());
    }

    #[test]
    fn test_drive_stops_on_quit_and_none() {
        let (_, services) = services(FakeRunner::default());
        let (tx, _rx) = mpsc::channel();
        let mut app = test_app();
        let never = |_: Effect| -> Result<Option<Action>, ()> { panic!("no foreground work") };

        let quit = services.drive(&mut app, Effect::Quit, &tx, never).unwrap();
        assert!(matches!(quit, Drive::Quit));
        let none = services.drive(&mut app, Effect::None, &tx, never).unwrap();
        assert!(matches!(none, Drive::Continue(None)));
    }

    #[test]
    fn test_interactive_unsupported_step_is_an_error() {
        let (_, services) = services(FakeRunner::default());
        let effect = Effect::RunStep {
            ticket: Ticket(2),
            step: InstallStep::new("os.linux", "Prepare Linux"),
            choices: UserChoices::default(),
        };
        let action = services.run_interactive(effect);
        assert!(matches!(
            action,
            Some(Action::StepFinished { ticket: Ticket(2), result: Err(_) })
        ));
    }
}
