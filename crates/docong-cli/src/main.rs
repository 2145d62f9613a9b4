use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docong_core::app::{BoardBuilder, CardMove, LaneCounts};
use docong_core::domain::{
    BoardError, BoardProjection, GroupId, GroupRecord, Member, PredictionRequest, Session, TodoId,
    TodoInput, TodoRecord, TodoStatus, UserProfile, WorkImportance, WorkProficiency, WorkType,
    effort_from_score,
};
use docong_core::impls::{ChannelEventSink, HttpEffortPredictor, InMemoryBoardStore};
use docong_core::ports::{Clock, EffortPredictor, SystemClock};
use docong_core::settings::{DEFAULT_CONFIG_FILE, Settings};

#[derive(Parser)]
#[command(name = "docong", about = "Group todo board tools")]
struct Cli {
    /// Settings file (TOML); missing is fine.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a JSON list of todos into status lanes.
    Board {
        #[arg(long)]
        todos: PathBuf,

        /// Print the lane counts as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Ask the prediction endpoint for an effort estimate.
    Predict {
        /// JSON user profile (needs `birth`).
        #[arg(long)]
        profile: PathBuf,

        #[arg(long, default_value = "개발")]
        work_type: WorkType,

        #[arg(long, default_value = "중")]
        importance: WorkImportance,

        #[arg(long, default_value = "중급")]
        proficiency: WorkProficiency,
    },

    /// Run a scripted session against an in-memory store.
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_from(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Board { todos, json } => board(&todos, json),
        Command::Predict {
            profile,
            work_type,
            importance,
            proficiency,
        } => predict(&settings, &profile, work_type, importance, proficiency).await,
        Command::Demo => demo().await,
    }
}

#[derive(Serialize)]
struct BoardReport<'a> {
    counts: LaneCounts,
    lanes: Vec<(TodoStatus, Vec<&'a str>)>,
}

fn board(path: &Path, json: bool) -> Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let todos: Vec<TodoRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    let projection = BoardProjection::project(&todos);
    let counts = LaneCounts::of(&projection);

    if json {
        let report = BoardReport {
            counts,
            lanes: projection
                .lanes()
                .map(|(status, cards)| (status, cards.iter().map(|t| t.title.as_str()).collect()))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_projection(&projection);
    Ok(())
}

fn print_projection(projection: &BoardProjection) {
    for (status, cards) in projection.lanes() {
        println!("{status} ({})", cards.len());
        for card in cards {
            let running = if card.active { " [running]" } else { "" };
            println!(
                "  {} {} ({}/{} pomo) {}{running}",
                card.id, card.title, card.real_pomo, card.predicted_pomo, card.assignee.email
            );
        }
    }
}

async fn predict(
    settings: &Settings,
    profile: &Path,
    work_type: WorkType,
    importance: WorkImportance,
    proficiency: WorkProficiency,
) -> Result<()> {
    let raw =
        fs::read_to_string(profile).with_context(|| format!("reading {}", profile.display()))?;
    let user: UserProfile =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", profile.display()))?;
    if !user.can_predict() {
        bail!(BoardError::ProfileIncomplete);
    }

    let mut draft = TodoInput::new(GroupId::new(0), user.email.clone());
    draft.work_type = work_type;
    draft.work_importance = importance;
    draft.work_proficiency = proficiency;

    let clock = SystemClock;
    let request = PredictionRequest::new(&user, &draft, clock.now(), clock.local_offset())?;
    let predictor = HttpEffortPredictor::from_settings(settings)?;
    info!(endpoint = %predictor.endpoint(), "requesting prediction");

    let score = predictor.predict(&request).await?;
    println!("score {score:.2} -> {} pomo", effort_from_score(score));
    Ok(())
}

fn member(email: &str, name: &str) -> Member {
    Member {
        email: email.into(),
        name: name.into(),
        image: None,
    }
}

/// Fixed score so the demo runs without the prediction service.
struct FixedScore(f64);

#[async_trait]
impl EffortPredictor for FixedScore {
    async fn predict(&self, _request: &PredictionRequest) -> Result<f64, BoardError> {
        Ok(self.0)
    }
}

async fn demo() -> Result<()> {
    const KIM: &str = "kim@example.com";
    const LEE: &str = "lee@example.com";
    let team = GroupId::new(1);

    let store = Arc::new(InMemoryBoardStore::new());
    store
        .insert_group(GroupRecord {
            leader_email: Some(KIM.into()),
            members: vec![member(KIM, "Kim"), member(LEE, "Lee")],
            ..GroupRecord::new(team, "docong")
        })
        .await;
    let group = store
        .group(team)
        .await
        .context("demo group disappeared")?;
    let (events, mut rx) = ChannelEventSink::channel();

    let mut workspace = BoardBuilder::new()
        .team(team)
        .todo_store(store.clone())
        .timer(store.clone())
        .group_store(store.clone())
        .predictor(Arc::new(FixedScore(9.0)))
        .events(Arc::new(events))
        .build()?;

    let mut kim = UserProfile::new(KIM);
    kim.birth = NaiveDate::from_ymd_opt(1995, 3, 14);
    let session = Session::signed_in(kim);

    for (title, assignee) in [("write report", KIM), ("review PR", LEE), ("plan sprint", KIM)] {
        let form = &mut workspace.todo_form;
        form.open_create(&session)?;
        form.set_title(title);
        form.set_content(format!("{title} for this week"));
        form.set_assignee(assignee, &group)?;
        let effort = form.predict_effort(&session).await?;
        info!(title, effort, "predicted");
        form.submit().await?;
    }

    let board = &mut workspace.board;
    board.sync(Some(&store.todos().await), &session);

    let first = TodoId::new(1);
    board.select(first)?;
    board.start_timer(&session).await?;
    let running = board.selected().cloned().context("selection lost")?;
    let session = session.with_timer_selection(running);
    board.sync(Some(&store.todos().await), &session);

    let blocked = CardMove::new(first, TodoStatus::Todo, TodoStatus::Done);
    if let Err(err) = board.move_card(blocked, &session).await {
        println!("refused: {err}");
    }

    board.select(TodoId::new(2))?;
    if let Err(err) = board.start_timer(&session).await {
        println!("refused: {err}");
    }

    let mv = CardMove::new(TodoId::new(3), TodoStatus::Todo, TodoStatus::InProgress).at(0);
    board.move_card(mv, &session).await?;
    board.sync(Some(&store.todos().await), &session);

    workspace.group_form.observe(&group, &session);
    workspace.group_form.set_name("docong-core");
    workspace.group_form.submit().await?;

    print_projection(workspace.board.projection());
    let counts = workspace.board.counts();
    println!(
        "total {} (todo {}, in progress {}, done {})",
        counts.total(),
        counts.todo,
        counts.in_progress,
        counts.done
    );

    drop(workspace);
    while let Ok(event) = rx.try_recv() {
        println!("event: {}", event.name());
    }
    Ok(())
}
