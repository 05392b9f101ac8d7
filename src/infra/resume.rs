//! Loads the home page resume from a TOML file.

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::domain::resume::ResumeData;

use super::error::InfraError;

pub fn parse_resume(text: &str) -> Result<ResumeData, InfraError> {
    let resume: ResumeData =
        toml::from_str(text).map_err(|err| InfraError::resume(err.to_string()))?;
    resume
        .validate()
        .map_err(|err| InfraError::resume(err.to_string()))?;
    Ok(resume)
}

/// Read and validate the resume at `path`, or fall back to the placeholder
/// when no file is configured. A configured but unreadable file is an error.
pub async fn load_resume(path: Option<&Path>) -> Result<ResumeData, InfraError> {
    let Some(path) = path else {
        info!(
            target = "folio::resume",
            "no resume configured; serving the placeholder"
        );
        return Ok(ResumeData::placeholder());
    };

    let text = fs::read_to_string(path)
        .await
        .map_err(|err| InfraError::resume(format!("cannot read {}: {err}", path.display())))?;
    let resume = parse_resume(&text)
        .map_err(|err| InfraError::resume(format!("{}: {err}", path.display())))?;

    debug!(
        target = "folio::resume",
        path = %path.display(),
        work = resume.work.len(),
        projects = resume.projects.len(),
        "loaded resume"
    );
    Ok(resume)
}
