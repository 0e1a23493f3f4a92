//! Roster CSV intake: hydrate the recruitment board from a form-tool export.
//!
//! Rows whose status cell cannot be mapped onto the stage enum are skipped
//! with a warning rather than failing the whole import; an export tool that
//! grows a new column value should not take the board down with it.

mod mapping;
mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::workflows::recruitment::domain::{Candidate, CptOptStatus, VolunteerType};
use crate::workflows::recruitment::pipeline::{next_candidate_id, PipelineBoard, PipelineError};

/// Errors raised while importing a roster export.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not seed the pipeline board: {0}")]
    Board(#[from] PipelineError),
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, RosterImportError> {
        let mut candidates = Vec::new();

        for record in parser::parse_records(reader)? {
            let Some(stage) = mapping::stage_for_normalized(&record.normalized_status) else {
                warn!(
                    name = %record.name,
                    status = %record.normalized_status,
                    "skipping roster row with unrecognized status"
                );
                continue;
            };

            let volunteer_type =
                mapping::volunteer_type_for_normalized(&record.normalized_volunteer_type)
                    .unwrap_or(VolunteerType::Regular);

            let mut candidate = Candidate::new(
                next_candidate_id().0,
                record.name,
                record.email,
                record.applied_role,
                record.team,
                volunteer_type,
            );
            candidate.status = stage;
            candidate.contact.phone = record.phone;
            candidate.hr_interview_date = record.hr_interview_date;
            candidate.pm_interview_date = record.pm_interview_date;
            candidate.start_date = record.start_date;
            candidate.end_date = record.end_date;
            candidate.notes = record.notes.unwrap_or_default();
            if let Some(status) = record
                .normalized_cpt_opt
                .as_deref()
                .and_then(mapping::cpt_opt_status_for_normalized)
            {
                candidate.cpt_opt_status = status;
            }
            candidate.normalize();

            candidates.push(candidate);
        }

        Ok(candidates)
    }

    /// Import and seed a board in one step.
    pub fn board_from_reader<R: Read>(reader: R) -> Result<PipelineBoard, RosterImportError> {
        let candidates = Self::from_reader(reader)?;
        Ok(PipelineBoard::seeded(candidates)?)
    }
}
