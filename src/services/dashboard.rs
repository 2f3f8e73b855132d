//! Dashboard statistics aggregation for faculty and student views.

use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::dashboard::{BreakdownEntry, DashboardStats};
use crate::models::document::{ExperimentRecord, StudentRecord};
use crate::models::profile::{Profile, Role};
use crate::store::{DocumentStore, FieldFilter, EXPERIMENTS, STUDENTS};

/// Section slice colors, assigned in group-discovery order and cycled.
pub const SECTION_PALETTE: [&str; 8] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FFC658", "#FF6B6B",
];

pub const COMPLETED_COLOR: &str = "#10B981";
pub const PENDING_COLOR: &str = "#F59E0B";
pub const ATTEMPTED_COLOR: &str = "#3B82F6";
pub const NOT_ATTEMPTED_COLOR: &str = "#EF4444";

/// Placeholder: experiments each student is assumed to have. There is no
/// per-student catalog to derive this from yet.
pub const ASSUMED_STUDENT_EXPERIMENTS: u64 = 5;

/// Placeholder: viva questions each student is assumed to face.
pub const ASSUMED_STUDENT_VIVA_QUESTIONS: u64 = 5;

/// Placeholder: faculty viva attempts are not wired to a data source.
pub const FACULTY_VIVA_ATTEMPTS: u64 = 0;

/// Placeholder: fixed faculty viva split (attempted, not attempted).
pub const FACULTY_VIVA_SPLIT: (u64, u64) = (30, 70);

/// Field linking students and experiments to their faculty member.
const FACULTY_FIELD: &str = "facultyId";

/// Group students by section label in encounter order.
pub fn section_breakdown(students: &[StudentRecord]) -> Vec<BreakdownEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<BreakdownEntry> = Vec::new();

    for student in students {
        let label = student.section_label();
        match positions.get(label).copied() {
            Some(i) => entries[i].count += 1,
            None => {
                let color = SECTION_PALETTE[entries.len() % SECTION_PALETTE.len()];
                positions.insert(label, entries.len());
                entries.push(BreakdownEntry::new(label, 1, color));
            }
        }
    }

    entries
}

/// Build faculty statistics from already-fetched records.
pub fn aggregate_faculty(
    students: &[StudentRecord],
    experiments: &[ExperimentRecord],
) -> DashboardStats {
    let total_students = students.len() as u64;
    let total_experiments = experiments.len() as u64;
    let completed_experiments: u64 = students.iter().map(StudentRecord::completed_count).sum();

    // Assumes every student owes every experiment exactly once.
    let pending = total_students
        .saturating_mul(total_experiments)
        .saturating_sub(completed_experiments);

    let (attempted, not_attempted) = FACULTY_VIVA_SPLIT;

    DashboardStats {
        total_students,
        total_experiments,
        completed_experiments,
        viva_attempts: FACULTY_VIVA_ATTEMPTS,
        section_breakdown: section_breakdown(students),
        experiment_progress: vec![
            BreakdownEntry::new("Completed", completed_experiments, COMPLETED_COLOR),
            BreakdownEntry::new("Pending", pending, PENDING_COLOR),
        ],
        viva_progress: vec![
            BreakdownEntry::new("Attempted", attempted, ATTEMPTED_COLOR),
            BreakdownEntry::new("Not Attempted", not_attempted, NOT_ATTEMPTED_COLOR),
        ],
    }
}

/// Build student statistics from the profile alone.
pub fn aggregate_student(profile: &Profile) -> DashboardStats {
    let completed_experiments = profile.experiments_completed_count();
    let viva_attempts = profile.viva_attempt_count();

    DashboardStats {
        total_students: 0,
        total_experiments: ASSUMED_STUDENT_EXPERIMENTS,
        completed_experiments,
        viva_attempts,
        section_breakdown: Vec::new(),
        experiment_progress: vec![
            BreakdownEntry::new("Completed", completed_experiments, COMPLETED_COLOR),
            BreakdownEntry::new(
                "Remaining",
                ASSUMED_STUDENT_EXPERIMENTS.saturating_sub(completed_experiments),
                PENDING_COLOR,
            ),
        ],
        viva_progress: vec![
            BreakdownEntry::new("Attempted", viva_attempts, ATTEMPTED_COLOR),
            BreakdownEntry::new(
                "Remaining",
                ASSUMED_STUDENT_VIVA_QUESTIONS.saturating_sub(viva_attempts),
                NOT_ATTEMPTED_COLOR,
            ),
        ],
    }
}

/// Compute dashboard statistics for a profile.
///
/// Returns `Ok(None)` without touching the store when there is no profile.
/// Students are served from their profile; faculty trigger two concurrent
/// collection queries.
pub async fn fetch_stats<S: DocumentStore>(
    store: &S,
    profile: Option<&Profile>,
) -> Result<Option<DashboardStats>, AppError> {
    let Some(profile) = profile else {
        return Ok(None);
    };

    let stats = match profile.role {
        Role::Student => aggregate_student(profile),
        Role::Faculty => fetch_faculty_stats(store, &profile.uid).await?,
    };
    Ok(Some(stats))
}

async fn fetch_faculty_stats<S: DocumentStore>(
    store: &S,
    faculty_uid: &str,
) -> Result<DashboardStats, AppError> {
    let filter = FieldFilter::equals(FACULTY_FIELD, faculty_uid);

    let (student_docs, experiment_docs) = tokio::try_join!(
        store.query(STUDENTS, &filter),
        store.query(EXPERIMENTS, &filter),
    )?;

    let students = student_docs
        .iter()
        .map(StudentRecord::from_document)
        .collect::<Result<Vec<_>, _>>()?;
    let experiments: Vec<ExperimentRecord> =
        experiment_docs.iter().map(ExperimentRecord::from).collect();

    tracing::debug!(
        faculty = faculty_uid,
        students = students.len(),
        experiments = experiments.len(),
        "Aggregating faculty dashboard"
    );

    Ok(aggregate_faculty(&students, &experiments))
}
