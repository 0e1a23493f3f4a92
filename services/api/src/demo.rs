use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use volunteer_ops::access::{ProjectDirectory, User, UserId};
use volunteer_ops::error::AppError;
use volunteer_ops::workflows::evaluations::resolve_scope;
use volunteer_ops::workflows::intake::RosterImporter;
use volunteer_ops::workflows::recruitment::{
    BoardView, MoveRequest, PipelineBoard, PipelineService, Stage,
};

use crate::infra::{
    seed_candidates, seed_evaluations, seed_projects, seed_users, InMemoryStatusPersistence,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional roster CSV export to hydrate the board instead of seed data.
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Viewer to resolve the dashboard for (defaults to the seeded lead).
    #[arg(long, default_value = "lead-1")]
    pub(crate) viewer: String,
    /// Role of the viewer (admin, hr, lead, volunteer).
    #[arg(long, default_value = "lead")]
    pub(crate) viewer_role: String,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let role = args.viewer_role.parse()?;
    let viewer = User::new(args.viewer.clone(), role);

    let candidates = match &args.roster_csv {
        Some(path) => RosterImporter::from_path(path)?,
        None => seed_candidates(),
    };
    let imported = args.roster_csv.is_some();
    let board = PipelineBoard::seeded(candidates)?;

    let persistence = Arc::new(InMemoryStatusPersistence::default());
    let pipeline = Arc::new(PipelineService::new(
        board,
        persistence.clone(),
        Duration::from_secs(2),
    ));

    println!("Volunteer operations demo");
    if imported {
        println!("Data source: roster CSV import");
    } else {
        println!("Data source: seeded board");
    }

    // Walk the first waiting candidate through an HR interview, the way a
    // drag on the board would.
    let next_up = pipeline.with_board(|board| board.lane(Stage::HrInterviewScheduled).first().cloned());
    if let Some(candidate_id) = next_up {
        let outcome = pipeline
            .move_candidate(MoveRequest {
                candidate_id,
                from_stage: Stage::HrInterviewScheduled,
                to_stage: Stage::HrInterviewCompleted,
                target_index: 0,
            })
            .await?;
        println!(
            "\nMoved {} from {} to {} (persisted: {})",
            outcome.candidate.name,
            outcome.from.stage.label(),
            outcome.to.stage.label(),
            outcome.persisted
        );
    }

    let view = pipeline.with_board(BoardView::from_board);
    println!("\nPipeline board ({} candidates)", view.total);
    for lane in &view.lanes {
        if lane.count == 0 {
            continue;
        }
        println!("- {} ({})", lane.stage_label, lane.count);
        for candidate in &lane.candidates {
            let to_do = if candidate.to_do.is_empty() {
                String::new()
            } else {
                format!(" | next: {}", candidate.to_do.join(", "))
            };
            println!(
                "    {} | {} | {}{}",
                candidate.name, candidate.applied_role, candidate.team, to_do
            );
        }
    }

    let users = seed_users();
    let evaluations = seed_evaluations();
    let directory = ProjectDirectory::new(seed_projects());
    let resolution = resolve_scope(&viewer, &evaluations, &users, &directory);

    println!(
        "\nDashboard for {} ({} scope)",
        args.viewer,
        resolution.policy.label()
    );
    let metrics = &resolution.metrics;
    println!(
        "Evaluations: {} total, {} completed, {} pending, {} overdue ({} at risk)",
        metrics.total, metrics.completed, metrics.pending, metrics.overdue, metrics.risk_evaluations
    );
    println!(
        "Completion rate {:.1}%, average visible score {:.2}",
        metrics.completion_rate, metrics.average_score
    );

    println!("\nVisible records");
    for record in &resolution.records {
        let payload = match &record.details {
            Some(details) => format!("score {:.1}", details.overall_score),
            None if record.subject_id == UserId(args.viewer.clone()) => "no payload".to_string(),
            None => "confidential".to_string(),
        };
        println!(
            "- {} | {} | {} | {}",
            record.id.0,
            record.subject_id,
            record.status.label(),
            payload
        );
    }

    let log = persistence.log();
    if !log.is_empty() {
        println!("\nPersisted status changes");
        for (candidate_id, stage) in log {
            println!("- {} -> {}", candidate_id, stage.label());
        }
    }

    Ok(())
}
