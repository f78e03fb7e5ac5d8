// End-to-end tests for the app task: commands in, snapshots out.

use golfdraft_app::{run, AppState};
use golfdraft_core::config::*;
use golfdraft_core::draft::{Candidate, DraftPhase};
use golfdraft_core::pool::CandidatePool;
use golfdraft_core::protocol::*;

use tokio::sync::mpsc;

// ===========================================================================
// Test helpers
// ===========================================================================

fn test_config() -> Config {
    Config {
        draft: DraftConfig {
            num_teams: 2,
            team_names: vec![],
        },
        pool: PoolConfig {
            source: PoolSourceKind::File,
            path: "data/rankings.json".into(),
            tier_count: 4,
            tier_size: 10,
        },
        api: ApiConfig {
            host: "live-golf-data.p.rapidapi.com".into(),
            stat_id: "186".into(),
            year: 2025,
        },
        credentials: CredentialsConfig::default(),
    }
}

/// 45 ranked golfers, ids "1".."45"; 4 tiers of 10 and 5 outside.
fn test_pool() -> CandidatePool {
    let ranked = (1..=45)
        .map(|i| Candidate::new(i.to_string(), format!("Golfer {i}")))
        .collect();
    CandidatePool::from_ranked(ranked, 4, 10).unwrap()
}

struct Harness {
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    async fn start() -> Self {
        let state = AppState::new(
            test_config(),
            test_pool(),
            PoolStatus::Ready {
                source: "test".into(),
            },
        );
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);
        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));

        match ui_rx.recv().await {
            Some(UiUpdate::Snapshot(snapshot)) => assert!(snapshot.state.is_none()),
            other => panic!("expected initial snapshot, got {other:?}"),
        }

        Harness {
            cmd_tx,
            ui_rx,
            handle,
        }
    }

    async fn send(&mut self, cmd: UserCommand) -> UiUpdate {
        self.cmd_tx.send(cmd).await.unwrap();
        self.ui_rx.recv().await.expect("app sent an update")
    }

    async fn snapshot(&mut self, cmd: UserCommand) -> Box<DraftSnapshot> {
        match self.send(cmd).await {
            UiUpdate::Snapshot(snapshot) => snapshot,
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    async fn rejection(&mut self, cmd: UserCommand) -> String {
        match self.send(cmd).await {
            UiUpdate::PickRejected { message } => message,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    async fn quit(self) {
        self.cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(self.handle.await.unwrap().is_ok());
    }
}

fn pick(id: &str) -> UserCommand {
    UserCommand::Pick {
        candidate_id: id.into(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn full_two_team_draft_through_the_app() {
    let mut app = Harness::start().await;

    let snap = app.snapshot(UserCommand::SetupDraft { team_count: 2 }).await;
    assert_eq!(snap.phase(), Some(DraftPhase::Initializing));
    assert_eq!(snap.current_team_index(), Some(0));

    // Team 1 takes one per tier; Team 2 mixes in an outside golfer.
    let order = ["1", "2", "11", "41", "21", "22", "31", "32"];
    let mut last = None;
    for (k, id) in order.iter().enumerate() {
        let snap = app.snapshot(pick(id)).await;
        if k + 1 < order.len() {
            assert_eq!(snap.current_team_index(), Some((k + 1) % 2));
        }
        last = Some(snap);
    }

    let snap = last.unwrap();
    assert!(snap.is_complete());
    assert_eq!(snap.phase(), Some(DraftPhase::Complete));
    assert_eq!(snap.current_team_index(), None);
    assert!(snap.teams().iter().all(|t| t.is_full()));

    let message = app.rejection(pick("45")).await;
    assert_eq!(message, "the draft is already complete");

    app.quit().await;
}

#[tokio::test]
async fn illegal_pick_reports_team_and_tier() {
    let mut app = Harness::start().await;
    app.snapshot(UserCommand::SetupDraft { team_count: 3 }).await;

    app.snapshot(pick("1")).await; // Team 1, Tier 1
    app.snapshot(pick("42")).await; // Team 2, Outside
    app.snapshot(pick("43")).await; // Team 3, Outside

    let message = app.rejection(pick("2")).await;
    assert_eq!(
        message,
        "Team 1 cannot draft from Tier 1: already has a golfer from Tier 1"
    );

    // Team 1 is still on the clock and can pick elsewhere.
    let snap = app.snapshot(pick("12")).await;
    assert_eq!(snap.current_team_index(), Some(1));

    app.quit().await;
}

#[tokio::test]
async fn setup_with_one_team_is_raised_to_two() {
    let mut app = Harness::start().await;
    let snap = app.snapshot(UserCommand::SetupDraft { team_count: 1 }).await;
    assert_eq!(snap.teams().len(), 2);
    app.quit().await;
}

#[tokio::test]
async fn pick_before_setup_is_rejected() {
    let mut app = Harness::start().await;
    let message = app.rejection(pick("1")).await;
    assert_eq!(message, "no draft has been set up yet");
    app.quit().await;
}

#[tokio::test]
async fn rename_then_restart_resets_names() {
    let mut app = Harness::start().await;
    app.snapshot(UserCommand::SetupDraft { team_count: 2 }).await;

    let snap = app
        .snapshot(UserCommand::RenameTeam {
            index: 1,
            name: "Sand Savers".into(),
        })
        .await;
    assert_eq!(snap.teams()[1].name, "Sand Savers");

    let message = app
        .rejection(UserCommand::RenameTeam {
            index: 5,
            name: "Nobody".into(),
        })
        .await;
    assert_eq!(message, "team index 5 is out of range for 2 teams");

    app.snapshot(pick("1")).await;
    let snap = app.snapshot(UserCommand::SetupDraft { team_count: 2 }).await;
    assert_eq!(snap.teams()[1].name, "Team 2");
    assert!(snap.is_available(&"1".into()));

    app.quit().await;
}
