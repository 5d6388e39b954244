//! Batch reports.

use std::fmt::Write;

use crate::job::{Job, JobId, JobStatus};

/// Batch-level facts printed above the per-job table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportHeader {
    pub algorithm: String,
    pub objective: String,
    pub variables: usize,
    pub space: String,
}

/// One line of a report: a job's terminal outcome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JobRecord {
    /// Position within the batch.
    pub index: usize,
    pub id: JobId,
    pub status: JobStatus,
    pub evaluations_used: Option<usize>,
    pub score: Option<f64>,
    /// Failure description for `Error` jobs.
    pub error: Option<String>,
}

impl JobRecord {
    pub fn from_job(index: usize, job: &Job) -> Self {
        let outcome = job.result();
        Self {
            index,
            id: job.id(),
            status: outcome.status,
            evaluations_used: outcome.result().map(|r| r.evaluations_used),
            score: outcome.result().map(|r| r.best_score),
            error: outcome.error().map(|e| e.to_string()),
        }
    }
}

/// Turns a finished batch into human-readable output.
pub trait Report: Send + Sync {
    fn render(&self, header: &ReportHeader, records: &[JobRecord]) -> String;
}

/// Two boxed plain-text tables: the batch header, then one row per job.
/// Failed jobs show `-` evaluations and an `Error` score.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableReport;

impl Report for TableReport {
    fn render(&self, header: &ReportHeader, records: &[JobRecord]) -> String {
        let header_rows = vec![
            vec!["Algorithm".to_string(), header.algorithm.clone()],
            vec!["Objective function".to_string(), header.objective.clone()],
            vec!["Variables".to_string(), header.variables.to_string()],
            vec!["Space".to_string(), header.space.clone()],
        ];

        let content_rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| match (record.status, record.evaluations_used, record.score) {
                (JobStatus::Done, Some(evaluations), Some(score)) => vec![
                    record.index.to_string(),
                    evaluations.to_string(),
                    format!("{score:.6}"),
                ],
                (JobStatus::Error, ..) => {
                    vec![record.index.to_string(), "-".into(), "Error".into()]
                }
                (status, ..) => vec![record.index.to_string(), "-".into(), status.to_string()],
            })
            .collect();

        let mut out = draw_table(None, &header_rows);
        out.push_str(&draw_table(
            Some(&["No.", "Evaluations", "Score"]),
            &content_rows,
        ));
        out
    }
}

fn draw_table(titles: Option<&[&str]>, rows: &[Vec<String>]) -> String {
    let columns = titles
        .map(|t| t.len())
        .or_else(|| rows.first().map(Vec::len))
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in titles
        .map(|t| t.iter().map(|s| s.to_string()).collect::<Vec<_>>())
        .iter()
        .chain(rows)
    {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border: String = widths.iter().fold(String::from("+"), |mut acc, w| {
        acc.push_str(&"-".repeat(w + 2));
        acc.push('+');
        acc
    });

    let line = |cells: &[String]| {
        let mut out = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            let _ = write!(out, " {cell:<width$} |");
        }
        out
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    if let Some(titles) = titles {
        let titles: Vec<String> = titles.iter().map(|s| s.to_string()).collect();
        out.push_str(&line(&titles));
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&border);
    out.push('\n');
    out
}
